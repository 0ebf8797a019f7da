//! CLI command definitions and argument parsing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use std::path::Path;

/// Print the end-of-run summary to stderr.
///
/// One line per produced file; a red cross when a requested review
/// could not be generated.
pub fn print_summary(
    context_path: Option<&Path>,
    review_requested: bool,
    review_path: Option<&Path>,
) {
    use colored::Colorize;
    use std::io::Write;
    let stderr = std::io::stderr();
    let mut handle = stderr.lock();
    if let Some(path) = context_path {
        let _ = writeln!(
            handle,
            "  {} Context written to {}",
            "✔".green().bold(),
            path.display(),
        );
    }
    match (review_requested, review_path) {
        (_, Some(path)) => {
            let _ = writeln!(
                handle,
                "  {} Review written to {}",
                "✔".green().bold(),
                path.display(),
            );
        }
        (true, None) => {
            let _ = writeln!(
                handle,
                "  {} {}",
                "✖".red().bold(),
                "Review could not be generated (context document is unaffected)".red(),
            );
        }
        (false, None) => {}
    }
    let _ = handle.flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn print_summary_all_combinations() {
        let ctx = PathBuf::from("review-context-working-20250101-120000.md");
        let review = PathBuf::from("code-review-20250101-120000.md");
        // Should not panic for any combination.
        print_summary(Some(&ctx), true, Some(&review));
        print_summary(Some(&ctx), true, None);
        print_summary(Some(&ctx), false, None);
        print_summary(None, false, None);
    }
}
