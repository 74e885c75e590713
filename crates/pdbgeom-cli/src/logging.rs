use crate::error::{CliError, Result};
use std::fs::File;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_subscriber::{Layer, filter::LevelFilter, fmt, prelude::*, registry::LookupSpan};

fn level_filter(verbosity: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::OFF;
    }
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Plain-text layer for `--log-file`, with targets and thread ids.
fn file_layer<S>(file: File) -> impl Layer<S>
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_thread_ids(true)
        .with_target(true)
}

/// Installs the global subscriber: a compact stderr layer and, with
/// `log_file`, a plain-text file layer.
///
/// Warnings (symmetry parse problems, reused chain labels) are visible at the
/// default verbosity; `quiet` silences everything.
pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<PathBuf>) -> Result<()> {
    let console = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();
    let registry = tracing_subscriber::registry()
        .with(level_filter(verbosity, quiet))
        .with(console);

    let installed = match log_file {
        Some(path) => registry.with(file_layer(File::create(&path)?)).try_init(),
        None => registry.try_init(),
    };
    installed.map_err(|e| CliError::Other(anyhow::anyhow!("Failed to install logger: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::sync::Once;
    use tracing::{info, warn};

    static GLOBAL: Once = Once::new();

    fn install_global_logger() {
        GLOBAL.call_once(|| {
            setup_logging(3, false, None).expect("global logger for tests");
        });
    }

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_filter(0, false), LevelFilter::WARN);
        assert_eq!(level_filter(1, false), LevelFilter::INFO);
        assert_eq!(level_filter(2, false), LevelFilter::DEBUG);
        assert_eq!(level_filter(7, false), LevelFilter::TRACE);
        assert_eq!(level_filter(2, true), LevelFilter::OFF);
    }

    #[test]
    #[serial]
    fn second_initialization_is_an_error_not_a_panic() {
        install_global_logger();
        assert!(matches!(setup_logging(0, false, None), Err(CliError::Other(_))));
    }

    #[test]
    #[serial]
    fn file_layer_records_level_target_and_thread() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pdbsymm.log");
        let subscriber = tracing_subscriber::registry().with(file_layer(File::create(&path).unwrap()));

        tracing::subscriber::with_default(subscriber, || {
            warn!("Chain 'Q' named by symmetry operator 2 is not in the structure");
            info!("Applied 1 symmetry operator(s)");
        });

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("WARN"));
        assert!(content.contains("Chain 'Q' named by symmetry operator 2"));
        assert!(content.contains("INFO"));
        assert!(content.contains("pdbgeom_cli::logging::tests"));
        assert!(content.contains("ThreadId"));
        assert!(!content.contains('\u{1b}'));
    }

    #[test]
    #[serial]
    fn unwritable_log_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("run.log");
        assert!(matches!(setup_logging(0, false, Some(path)), Err(CliError::Io(_))));
    }
}
