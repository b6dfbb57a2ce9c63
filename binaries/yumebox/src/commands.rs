//! `yumebox` command handlers.
use std::{fs, io::Write};

use anyhow::Context;

use yumebox_helper::{
    git::GitCli,
    stamp::{validate_identifier, Stamp, StampConfig, CONFIG_FILE_NAME, OVERRIDE_ENV},
    time::build_time,
};

use crate::{
    args::{Command, StampArgs},
    info::BuildInfo,
};

/// Run `command`, writing its output to `out`.
///
/// # Errors
/// Returns an error if the command fails or `out` cannot be written to.
pub(crate) fn run(command: Command, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Command::Info { json } => info(json, out),
        Command::GenerateConfig => {
            write!(out, "{}", StampConfig::documented_config())?;
            Ok(())
        }
        Command::Stamp(args) => stamp(&args, out),
    }
}

/// [`Command::Info`].
fn info(json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let info = BuildInfo::CURRENT;

    if json {
        serde_json::to_writer_pretty(&mut *out, &info)?;
        writeln!(out)?;
    } else {
        writeln!(out, "{info}")?;
    }

    Ok(())
}

/// [`Command::Stamp`].
fn stamp(args: &StampArgs, out: &mut impl Write) -> anyhow::Result<()> {
    // An explicitly given config must exist.
    let config = match &args.config_file {
        Some(path) => StampConfig::read_from_path(path)?,
        None => StampConfig::read_or_default(args.repo.join(CONFIG_FILE_NAME))?,
    };

    if let Ok(value) = std::env::var(OVERRIDE_ENV) {
        tracing::warn!("{OVERRIDE_ENV} is set to {value:?}, builds will use it instead");
    }

    let (stamp, _) = Stamp::collect(&config, &GitCli::new(&args.repo), build_time());
    let identifier = validate_identifier(&stamp.identifier())?.to_owned();

    tracing::info!(
        commit = %stamp.commit,
        branch = %stamp.branch,
        suffix = %stamp.suffix,
        timestamp = %stamp.timestamp,
        "stamped {identifier}"
    );

    match &args.output {
        Some(path) => fs::write(path, stamp.to_properties())
            .with_context(|| format!("failed to write `{}`", path.display()))?,
        None if args.json => {
            serde_json::to_writer_pretty(&mut *out, &stamp)?;
            writeln!(out)?;
        }
        None => writeln!(out, "{identifier}")?,
    }

    Ok(())
}
