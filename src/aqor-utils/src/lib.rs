//! Miscellaneous helpers shared by the AQOR crates.

#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
#![deny(clippy::pedantic)]

#[doc(hidden)]
pub mod env;
