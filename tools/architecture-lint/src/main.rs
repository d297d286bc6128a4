//! `architecture-lint [BACKEND_DIR]` checks the merch-store layer rules.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

/// Check that the merch-store backend keeps its layer boundaries.
#[derive(Debug, Parser)]
#[command(name = "architecture-lint", version)]
struct Cli {
    /// Backend crate directory; defaults to the nearest `backend/` holding
    /// `src/lib.rs`, searched upwards from the working directory.
    backend_dir: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(backend_dir) = cli.backend_dir.or_else(default_backend_dir) else {
        let _ = writeln!(
            io::stderr().lock(),
            "no backend directory given and none found above the working directory"
        );
        return ExitCode::FAILURE;
    };

    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(report) => {
            let _ = writeln!(
                io::stdout().lock(),
                "{}: {} layer modules respect their boundaries",
                backend_dir.display(),
                report.checked.len()
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            let _ = writeln!(io::stderr().lock(), "{error}");
            ExitCode::FAILURE
        }
    }
}

fn default_backend_dir() -> Option<PathBuf> {
    let from_cwd = std::env::current_dir().ok();
    from_cwd
        .as_deref()
        .and_then(find_backend)
        .or_else(|| find_backend(Path::new(env!("CARGO_MANIFEST_DIR"))))
}

fn find_backend(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join("backend"))
        .find(|candidate| candidate.join("src").join("lib.rs").is_file())
}
