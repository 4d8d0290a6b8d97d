use std::path::Path;

/// Write `summary` to `path` as UTF-8.
///
/// On failure the error is reported on stderr and the summary is printed to
/// stdout instead, so it is never lost. Returns whether the file was written.
pub fn save_summary_to_file(summary: &str, path: &Path) -> bool {
    match std::fs::write(path, summary) {
        Ok(()) => {
            println!("Summary saved to: {}", path.display());
            tracing::info!(path = %path.display(), bytes = summary.len(), "Summary written");
            true
        }
        Err(e) => {
            eprintln!("Error saving to {}: {e}", path.display());
            println!("\nSummary:");
            println!("{summary}");
            false
        }
    }
}

/// Send the summary to `path` when given, else to stdout.
pub fn emit(summary: &str, path: Option<&Path>) {
    match path {
        Some(path) => {
            save_summary_to_file(summary, path);
        }
        None => println!("{summary}"),
    }
}
