//! Code shared between the HostelEase client crates

#![warn(unused_crate_dependencies)]

pub mod const_config;
pub mod errors;
pub mod id;
pub mod req_args;
pub mod token;
pub mod uac;

pub use errors::flatten_error_body;

#[cfg(not(target_arch = "wasm32"))]
pub mod telemetry;
