use clap::Parser;
use pdbgeom_cli::cli::{LineCli, parse_exit_status};
use pdbgeom_cli::error::Result;
use pdbgeom_cli::{commands, logging};
use tracing::{debug, error, info};

fn main() {
    // Usage problems and -h end with status 1, --version with 0.
    let cli = match LineCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_status(e.kind(), 1));
        }
    };

    if let Err(e) = run_app(cli) {
        eprintln!("Error (pdbline): {}", e);
        std::process::exit(1);
    }
}

fn run_app(cli: LineCli) -> Result<()> {
    logging::setup_logging(cli.common.verbose, cli.common.quiet, cli.common.log_file.clone())?;
    info!("pdbline v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = commands::line::run(&cli);
    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
