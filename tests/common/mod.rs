//! Shared helpers for the integration test binaries.
//!
//! Each test binary compiles its own copy of this module, so not every
//! helper is used everywhere.
#![allow(dead_code)]

pub mod fixtures;
pub mod harness;
pub mod http_client;
