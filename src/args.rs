use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

/// Command-line arguments for the packager
#[derive(Debug, Default)]
pub struct Args {
    /// Print every archive entry as it is added
    pub verbose: bool,

    /// Directory that contains the plugin folder
    pub root: Option<PathBuf>,

    /// Plugin folder name, used as the top-level entry in the archive
    pub folder: Option<String>,

    /// Destination path without the `.zip` extension
    pub output: Option<PathBuf>,

    /// Path to a TOML configuration file
    pub config: Option<PathBuf>,
}

impl Args {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        Self::from_matches(Self::command().get_matches())
    }

    fn command() -> Command {
        Command::new("plugin-zip")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Package a plugin folder into a ZIP archive")
            .arg(
                Arg::new("root")
                    .short('r')
                    .long("root")
                    .value_name("DIR")
                    .help("Directory that contains the plugin folder (default: current directory)")
            )
            .arg(
                Arg::new("folder")
                    .short('f')
                    .long("folder")
                    .value_name("NAME")
                    .help("Plugin folder name, stored as the top-level entry of the archive")
            )
            .arg(
                Arg::new("output")
                    .short('o')
                    .long("output")
                    .value_name("PATH")
                    .help("Destination path without the .zip extension")
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .value_name("FILE")
                    .help("TOML configuration file (default: packager.toml if present)")
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .action(ArgAction::SetTrue)
                    .help("Print every entry as it is added")
            )
    }

    fn from_matches(matches: clap::ArgMatches) -> Self {
        Self {
            verbose: matches.get_flag("verbose"),
            root: matches.get_one::<String>("root").map(PathBuf::from),
            folder: matches.get_one::<String>("folder").cloned(),
            output: matches.get_one::<String>("output").map(PathBuf::from),
            config: matches.get_one::<String>("config").map(PathBuf::from),
        }
    }
}
