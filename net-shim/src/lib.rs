#![no_std]
//! Platform layer underneath the IP core.
//!
//! Everything here depends on the host the stack is compiled for, never on
//! how the network is configured.

#[macro_use]
extern crate cfg_if;

pub mod endian;
pub use endian::*;

pub use log;
