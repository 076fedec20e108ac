#![warn(unused_crate_dependencies)]

use hostelease_shared::{
    req_args::LoginReqArgs,
    telemetry::{self, get_subscriber, init_subscriber},
};
use std::ops::Deref;
use std::sync::LazyLock;
use uuid::Uuid;

mod mock_api;

pub use mock_api::{unreachable_address, MockApi, RecordedRequest};

/// Length of the passwords made by [`TestUser::generate`]
pub const TEST_PASSWORD_LEN: usize = 16;

// Ensure that the `tracing` stack is only initialised once
pub static TRACING: LazyLock<String> = LazyLock::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();
    if std::env::var("TEST_LOG").is_ok() {
        let log_file_name = format!("client_tests{}", Uuid::new_v4());
        let trace_file = telemetry::create_trace_file(&log_file_name).unwrap();
        let subscriber = get_subscriber(subscriber_name, default_filter_level, trace_file.file);
        init_subscriber(subscriber).unwrap();
        format!("Traces for tests being written to: {:?}", trace_file.path)
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber).unwrap();
        "Traces set to std::io::sink".to_string()
    }
});

/// Empty function for use when a call back isn't needed
pub fn no_cb() {}

pub fn start_tracing() {
    // Accessing TRACING also forces the LazyLock to initialize
    let logging_msg = TRACING.deref();
    println!("{logging_msg}");
}

#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub password: String,
}

impl TestUser {
    pub fn new<S: Into<String>>(username: S, password: S) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn generate(username_prefix: &str) -> Self {
        let username = format!("{username_prefix}-{}", &Uuid::new_v4().to_string()[..8]);
        Self {
            username,
            password: Uuid::new_v4().to_string()[..TEST_PASSWORD_LEN].to_string(),
        }
    }

    pub fn login_args(&self) -> LoginReqArgs {
        LoginReqArgs::new(self.username.clone(), self.password.clone().into())
    }
}
