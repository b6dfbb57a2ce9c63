#![doc = include_str!("../README.md")]
#![deny(missing_docs, reason = "all constants should document what they are")]

mod macros;

pub mod build;

#[doc(hidden)]
pub mod __private {
    pub use const_format::formatcp;
}
