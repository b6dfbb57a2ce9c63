//! General constants used throughout `yumebox`.
use const_format::formatcp;

use yumebox_constants::build::{BUILD, GIT_VERSION};

/// The name of the binary.
pub(crate) const YUMEBOX_BIN: &str = "yumebox";

/// `yumebox`'s crate version (`MAJOR.MINOR.PATCH`) as string.
///
/// This is not the build identifier, see [`GIT_VERSION`].
pub(crate) const VERSION: &str = clap::crate_version!();

/// [`YUMEBOX_BIN`] + [`GIT_VERSION`], e.g. `yumebox Alpha-d33dbbe2`.
pub(crate) const NAME_VER: &str = formatcp!("{YUMEBOX_BIN} {GIT_VERSION}");

/// [`NAME_VER`] + the build type.
///
/// If a debug build, the suffix is `-debug`, else it is `-release`.
pub(crate) const VERSION_BUILD: &str = formatcp!("{NAME_VER}-{BUILD}");
