use clap::error::ErrorKind;
use clap::{Args, Parser};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

/// Exit status after a command-line parse stopped the program.
///
/// `--version` succeeds, `-h` exits with `help_status`, and every other
/// parse error is a usage error with status 1.
pub fn parse_exit_status(kind: ErrorKind, help_status: i32) -> i32 {
    match kind {
        ErrorKind::DisplayVersion => 0,
        ErrorKind::DisplayHelp | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => help_status,
        _ => 1,
    }
}

/// Options shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonArgs {
    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output, including warnings
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Read settings from a TOML configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
#[command(
    name = "pdbline",
    author,
    version,
    about = "pdbline - Fit a best-fit line through the CA atoms of a residue zone and write it as pseudo-atoms.",
    help_template = HELP_TEMPLATE,
    allow_negative_numbers = true,
    after_help = "Residues are given as [chain]resnum[insert], e.g. L24, 100A or B.-3. \
                  Input is read from stdin and output written to stdout when no files are given."
)]
pub struct LineCli {
    /// Residue name for the line pseudo-atoms [default: LIN]
    #[arg(short = 'r', long = "residue-name", value_name = "RESNAM")]
    pub residue_name: Option<String>,

    /// Atom name for the line pseudo-atoms [default: X]
    #[arg(short = 'a', long = "atom-name", value_name = "ATNAM")]
    pub atom_name: Option<String>,

    /// Chain label for the line pseudo-atoms [default: X]
    #[arg(long = "chain", value_name = "LABEL")]
    pub chain: Option<String>,

    /// First residue of the zone
    #[arg(value_name = "FIRSTRES")]
    pub first: String,

    /// Last residue of the zone
    #[arg(value_name = "LASTRES")]
    pub last: String,

    /// Input PDB file
    #[arg(value_name = "INFILE")]
    pub input: Option<PathBuf>,

    /// Output PDB file
    #[arg(value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub common: CommonArgs,
}

#[derive(Parser, Debug)]
#[command(
    name = "pdbsymm",
    author,
    version,
    about = "pdbsymm - Apply the REMARK 350 BIOMT operators of a PDB file and append the generated chains.",
    help_template = HELP_TEMPLATE,
    after_help = "Input is read from stdin and output written to stdout when no files are given."
)]
pub struct SymmCli {
    /// Input PDB file
    #[arg(value_name = "INFILE")]
    pub input: Option<PathBuf>,

    /// Output PDB file
    #[arg(value_name = "OUTFILE")]
    pub output: Option<PathBuf>,

    /// Label after which generated chain labels start (order A-Z, 1-9, a-z) [default: Z]
    #[arg(long, value_name = "LABEL")]
    pub start_after: Option<char>,

    /// Allow generated chains to reuse labels of the input chains
    #[arg(long)]
    pub reuse_labels: bool,

    /// Skip operators whose BIOMT rows could not all be read instead of applying them zero-filled
    #[arg(long)]
    pub skip_degraded: bool,

    #[command(flatten)]
    pub common: CommonArgs,
}
