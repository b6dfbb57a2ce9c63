//! Build information.
use std::fmt;

use serde::Serialize;

use yumebox_constants::build::{BUILD, GIT_VERSION};

use crate::constants::{VERSION, YUMEBOX_BIN};

/// Everything known about this build, all fixed at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct BuildInfo {
    /// The binary name.
    pub(crate) name: &'static str,
    /// The crate version.
    pub(crate) version: &'static str,
    /// The build identifier, [`GIT_VERSION`].
    pub(crate) git_version: &'static str,
    /// `debug` or `release`.
    pub(crate) build: &'static str,
    /// Target OS.
    pub(crate) os: &'static str,
    /// Target arch.
    pub(crate) arch: &'static str,
}

impl BuildInfo {
    /// The [`BuildInfo`] of this binary.
    pub(crate) const CURRENT: Self = Self {
        name: YUMEBOX_BIN,
        version: VERSION,
        git_version: GIT_VERSION,
        build: BUILD,
        os: std::env::consts::OS,
        arch: std::env::consts::ARCH,
    };
}

/// - name + build identifier
/// - OS + Arch
/// - Build profile
///
/// e.g:
///
/// ```text
/// yumebox Alpha-d33dbbe2
/// linux x86_64
/// release
/// ```
impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}\n{} {}\n{}",
            self.name, self.git_version, self.os, self.arch, self.build
        )
    }
}
