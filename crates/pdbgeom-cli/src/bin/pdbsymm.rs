use clap::Parser;
use pdbgeom_cli::cli::{SymmCli, parse_exit_status};
use pdbgeom_cli::error::Result;
use pdbgeom_cli::{commands, logging};
use tracing::{debug, error, info};

fn main() {
    let cli = match SymmCli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            std::process::exit(parse_exit_status(e.kind(), 0));
        }
    };

    if let Err(e) = run_app(cli) {
        eprintln!("Error (pdbsymm): {}", e);
        std::process::exit(1);
    }
}

fn run_app(cli: SymmCli) -> Result<()> {
    logging::setup_logging(cli.common.verbose, cli.common.quiet, cli.common.log_file.clone())?;
    info!("pdbsymm v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let result = commands::symm::run(&cli);
    match &result {
        Ok(()) => info!("Command completed successfully."),
        Err(e) => error!("Command failed: {}", e),
    }
    result
}
