//! Internal utilities for the tpm2crypt library
//!
//! Not part of the public API; shared by the other workspace crates.

#![no_std]

pub mod constant_time;
pub mod endian;

pub use constant_time::{ct_eq, ct_select_u64};
