//! Shared items related to user accounts

mod user;

pub use user::{RegisteredUser, Role, UserRecord, Username};
