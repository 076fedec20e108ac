//! Stores functionality that should be shared between different clients
//! NB: The assumption is made that the async runtime has already been started
//! before any functions from this library are called

#![warn(unused_crate_dependencies)]


mod client;
mod errors;
mod session;
mod storage;

pub use client::{api::ApiRecord, Client, UiCallBack, NO_ARGS};
pub use errors::ApiError;
pub use session::{LoginOutcome, RegisterOutcome, SessionManager, SessionStatus, SessionView};
#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileTokenStore;
pub use storage::{MemoryTokenStore, TokenStore};
