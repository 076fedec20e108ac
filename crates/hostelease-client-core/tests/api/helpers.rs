use hostelease_client_core::{Client, LoginOutcome, MemoryTokenStore, SessionManager, TokenStore};
use hostelease_shared::{
    const_config::storage::{STORAGE_KEY_ACCESS, STORAGE_KEY_REFRESH},
    uac::Role,
};
use hostelease_test_helper::MockApi;
use std::sync::Arc;

pub use hostelease_test_helper::{no_cb, unreachable_address, TestUser};

#[derive(Debug)]
pub struct TestApp {
    pub api: MockApi,
    pub store: MemoryTokenStore,
    pub session: SessionManager,
    pub test_user: TestUser,
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_role(Role::Student).await
}

pub async fn spawn_app_with_role(role: Role) -> TestApp {
    let api = MockApi::spawn().await;
    let test_user = TestUser::generate(&role.to_string());
    api.add_user(&test_user, role);
    let store = MemoryTokenStore::new();
    let session = new_session(&api.address, &store);
    TestApp {
        api,
        store,
        session,
        test_user,
    }
}

/// A session for a client that talks to nothing
pub fn spawn_offline_session(store: &MemoryTokenStore) -> SessionManager {
    new_session(&unreachable_address(), store)
}

fn new_session(address: &str, store: &MemoryTokenStore) -> SessionManager {
    SessionManager::new(Client::new(address.to_string()), Arc::new(store.clone()))
}

impl TestApp {
    pub async fn login(&self) -> LoginOutcome {
        self.session
            .login(self.test_user.login_args(), no_cb)
            .await
            .expect("failed to receive on rx")
    }

    /// Simulates an application restart, a new session using the same store
    pub fn restart(&self) -> SessionManager {
        new_session(&self.api.address, &self.store)
    }

    /// Puts a token in the store as if a previous run had logged in
    pub fn seed_tokens(&self, access: &str) {
        self.store.set(STORAGE_KEY_ACCESS, access).unwrap();
        self.store.set(STORAGE_KEY_REFRESH, "refresh-seeded").unwrap();
    }

    pub fn stored_access_token(&self) -> Option<String> {
        self.store.get(STORAGE_KEY_ACCESS).unwrap()
    }

    pub fn stored_refresh_token(&self) -> Option<String> {
        self.store.get(STORAGE_KEY_REFRESH).unwrap()
    }

    /// The authorization header sent with the last request to `path`
    pub fn authorization_sent_to(&self, path: &str) -> Option<String> {
        self.api
            .last_request_to(path)
            .expect("no request received for path")
            .authorization
    }
}
