//! `yumebox` CLI arguments.
use std::path::PathBuf;

use clap::builder::TypedValueParser;
use tracing::level_filters::LevelFilter;

use yumebox_constants::build::GIT_VERSION;

use crate::constants::YUMEBOX_BIN;

/// `YumeBox` build identification.
#[derive(clap::Parser, Debug)]
#[command(name = YUMEBOX_BIN, version = GIT_VERSION, about)]
pub(crate) struct Args {
    /// The minimum log level written to stderr.
    #[arg(
        long,
        global = true,
        default_value_t = LevelFilter::INFO,
        value_parser = clap::builder::PossibleValuesParser::new(["error", "warn", "info", "debug", "trace"])
            .try_map(|s| s.parse::<LevelFilter>()),
    )]
    pub(crate) log_level: LevelFilter,

    /// What to do, defaults to `info`.
    #[command(subcommand)]
    pub(crate) command: Option<Command>,
}

/// `yumebox` subcommands.
#[derive(clap::Subcommand, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    /// Print information about this build.
    Info {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print a documented default `version.toml`.
    GenerateConfig,

    /// Compute the build identifier a checkout would be stamped with.
    Stamp(StampArgs),
}

impl Default for Command {
    fn default() -> Self {
        Self::Info { json: false }
    }
}

/// Arguments for [`Command::Stamp`].
#[derive(clap::Args, Debug, PartialEq, Eq)]
pub(crate) struct StampArgs {
    /// The git repository to stamp.
    #[arg(long, default_value = ".")]
    pub(crate) repo: PathBuf,

    /// The PATH of the stamp config, defaults to `<REPO>/version.toml`.
    #[arg(long)]
    pub(crate) config_file: Option<PathBuf>,

    /// Write `KEY=value` properties to this file instead of printing the identifier.
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,

    /// Print every part of the stamp as JSON.
    #[arg(long, conflicts_with = "output")]
    pub(crate) json: bool,
}
