#![doc = include_str!("../README.md")]

//---------------------------------------------------------------------------------------------------- Public API
#[cfg(feature = "git")]
pub mod git;

#[cfg(feature = "stamp")]
pub mod stamp;

#[cfg(feature = "time")]
pub mod time;

//---------------------------------------------------------------------------------------------------- Private Usage
#[cfg(feature = "stamp")]
mod macros;

//----------------------------------------------------------------------------------------------------
