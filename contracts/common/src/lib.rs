//! Shared authorization helpers for the reward-pool contracts.
//!
//! [`access`] implements the tiered administrator registry every
//! administrative entry point is gated on.

#![no_std]

pub mod access;

pub use access::*;
