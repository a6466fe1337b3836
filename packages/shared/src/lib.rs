//! Utilities shared by the Hiroba binaries: logging bootstrap and clock helpers.

pub mod logger;
pub mod time;
