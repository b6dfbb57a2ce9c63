//! Compile-time stringification.
//!
//! [`make_str!`] quotes a token's *name*, [`make_string!`] quotes its *value*.
//!
//! ```rust
//! use yumebox_constants::{build::GIT_VERSION, make_str, make_string};
//!
//! assert_eq!(make_str!(GIT_VERSION), "GIT_VERSION");
//! assert_eq!(make_string!(GIT_VERSION), GIT_VERSION);
//! ```

/// Quote the given tokens as written, without evaluating them.
///
/// ```rust
/// # use yumebox_constants::make_str;
/// const FOO: u32 = 42;
/// assert_eq!(make_str!(FOO), "FOO");
/// assert_eq!(make_str!(1 + 1), "1 + 1");
/// ```
#[macro_export]
macro_rules! make_str {
    ($($tokens:tt)*) => {
        ::core::stringify!($($tokens)*)
    };
}

/// Evaluate a constant expression, then quote its value.
///
/// The expression must be a `&str`, integer, `char` or `bool` constant.
/// The output is a `&'static str` that can be used in `const` items.
///
/// ```rust
/// # use yumebox_constants::make_string;
/// const FOO: u32 = 42;
/// const FOO_STR: &str = make_string!(FOO);
/// assert_eq!(FOO_STR, "42");
///
/// const NAME: &str = "yumebox";
/// assert_eq!(make_string!(NAME), "yumebox");
/// assert_eq!(make_string!(FOO + 1), "43");
///
/// const SEP: char = '-';
/// assert_eq!(make_string!(SEP), "-");
/// ```
#[macro_export]
macro_rules! make_string {
    ($value:expr $(,)?) => {
        $crate::__private::formatcp!("{}", $value)
    };
}
