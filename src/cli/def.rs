use clap::{Parser, Subcommand};

/// Parse and query YAML documents
#[derive(Parser)]
#[command(author, about, long_about=None, disable_version_flag(true))]
pub struct Args {
    /// force color mode (defaults to check tty)
    #[arg(long)]
    pub color: bool,

    /// force no-color mode (defaults to check tty)
    #[arg(long)]
    pub no_color: bool,

    /// display version and quit
    #[arg(short = 'V', long = "version")]
    pub version: bool,

    /// prepend time to each log line
    #[arg(long)]
    pub log_time: bool,

    /// Turn general verbose logging
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// quiet path errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Output strict YAML
    #[arg(short = 'y', long)]
    pub yaml: bool,

    /// YAML file to read
    #[clap(name = "FILE")]
    pub file: Option<String>,

    #[command(subcommand)]
    pub action: Option<Actions>,
}

#[derive(Subcommand)]
pub enum Actions {
    GetValue {
        /// The path to get value of
        #[clap(name = "PATH")]
        path: Option<String>,

        /// Default printed when the path does not resolve
        #[clap(name = "DEFAULT")]
        default: Option<String>,

        /// Output strict YAML
        #[arg(short = 'y', long)]
        yaml: bool,
    },
    GetType {
        /// The path to get type of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
    GetLength {
        /// The path to get length of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
    Keys {
        /// The path of the mapping to list keys of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
    Values {
        /// The path of the mapping to list values of
        #[clap(name = "PATH")]
        path: Option<String>,
    },
}
