use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "Felo",
    author = "Felo rating",
    long_about = "Calculates Felo ratings of fencers from the bouts listed in Felo files"
)]
pub struct Args {
    /// Felo files to rate. Each file is rated on its own.
    #[arg(required = true, value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Searches initial ratings that are consistent with all bouts of the file
    #[arg(short, long, action = clap::ArgAction::SetTrue)]
    pub bootstrap: bool,

    /// Maximal number of bootstrapping cycles
    #[arg(long, default_value_t = 1000, value_name = "NUMBER")]
    pub max_cycles: usize,

    /// Lists the freshmen with their estimated ratings instead of the leaderboard
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub estimate_freshmen: bool,

    /// Writes the new initial ratings back to the Felo file. A backup copy
    /// with the extension .bak is made first.
    ///
    /// Only meaningful together with --bootstrap or --estimate-freshmen.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub write_back: bool,

    /// Rewrites each Felo file in canonical form, with sorted sections and
    /// aligned columns
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub reformat: bool,

    /// Writes the result lists to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Prints the result lists as JSON
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "warn",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}
