//! Build related metadata.

use const_format::assertcp;

/// The identifier of this build, e.g. `Alpha-d33dbbe2`.
///
/// This is stamped before compilation, see the crate documentation.
///
/// # Format
/// The value is opaque display text, the only guarantees are that it is:
/// - Non-empty
/// - Free of surrounding whitespace
/// - Free of control characters (no newline)
///
/// ```rust
/// # use yumebox_constants::build::*;
/// assert!(!GIT_VERSION.is_empty());
/// assert_eq!(GIT_VERSION.trim(), GIT_VERSION);
/// assert!(!GIT_VERSION.chars().any(char::is_control));
/// ```
pub const GIT_VERSION: &str = core::env!("GIT_VERSION"); // Set in `constants/build.rs`.

assertcp!(!GIT_VERSION.is_empty(), "GIT_VERSION is 0 length");

/// `true` if `debug_assertions` are enabled.
pub const DEBUG: bool = cfg!(debug_assertions);

/// `true` if `debug_assertions` are disabled.
pub const RELEASE: bool = !DEBUG;

/// The build profile, `debug` or `release`.
pub const BUILD: &str = if DEBUG { "debug" } else { "release" };
