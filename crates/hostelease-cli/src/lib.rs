#![warn(unused_crate_dependencies)]

mod suppress_bin_warnings {
    // Only used in binary and triggers unused warning
    use tokio as _;
}


pub mod cli;
mod commands;
pub mod configuration;
pub mod tracing;

pub use commands::run;
pub use configuration::{get_configuration, Configuration};
