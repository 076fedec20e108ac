//! Tracks who is logged in and keeps the client's credential in step with it
//!
//! Status transitions:
//!
//! ```text
//!                 bootstrap (no token)
//!   Checking ----------------------------> Unauthenticated
//!      |  bootstrap (token rejected)             |    ^
//!      |---------------------------------------->|    | logout
//!      |                                   login |    |
//!      |  bootstrap (token accepted)             v    |
//!      +-----------------------------------> Authenticated
//! ```
//!
//! A failed login leaves everything as it was. Nothing here guards against
//! overlapping logins, if two are in flight the one that completes last
//! determines the final state. The result of a bootstrap is dropped if the
//! token it checked is no longer the session's token by the time it arrives
//! (a logout or login happened in the meantime).

use futures::channel::oneshot;
use hostelease_shared::{
    const_config::{
        error::{ERR_LOGIN_FAILED, ERR_REGISTRATION_FAILED},
        path::{PATH_AUTH_TOKEN, PATH_REGISTER, PATH_USERS_ME},
        storage::{STORAGE_KEY_ACCESS, STORAGE_KEY_REFRESH},
    },
    errors::NotLoggedInError,
    req_args::{LoginReqArgs, RegisterReqArgs},
    token::{AccessToken, RefreshToken, TokenPair},
    uac::{RegisteredUser, UserRecord},
};
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::{
    client::{process_json_body, send_result, UiCallBack, NO_ARGS},
    errors::ApiError,
    storage::TokenStore,
    Client,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    /// A persisted token is being verified
    Checking,
    Authenticated(Arc<UserRecord>),
}

/// What the views need to decide what to show
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub user: Option<Arc<UserRecord>>,
    pub loading: bool,
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success,
    /// Message suitable for showing to the user
    Failed(String),
}

#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegisterOutcome {
    Created(RegisteredUser),
    /// Message suitable for showing to the user
    Failed(String),
}

/// Handle to the session, cheap to clone and meant to be given to every part
/// of the application that needs to know the user or talk to the API
#[derive(Debug, Clone)]
pub struct SessionManager {
    client: Client,
    store: Arc<dyn TokenStore>,
    state: Arc<Mutex<Session>>,
}

#[derive(Debug)]
struct Session {
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
    status: SessionStatus,
}

impl SessionStatus {
    pub fn user(&self) -> Option<&Arc<UserRecord>> {
        match self {
            SessionStatus::Authenticated(user) => Some(user),
            SessionStatus::Unauthenticated | SessionStatus::Checking => None,
        }
    }

    /// Returns `true` if the session status is [`Authenticated`].
    ///
    /// [`Authenticated`]: SessionStatus::Authenticated
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(..))
    }

    /// Returns `true` if the session status is [`Checking`].
    ///
    /// [`Checking`]: SessionStatus::Checking
    #[must_use]
    pub fn is_checking(&self) -> bool {
        matches!(self, Self::Checking)
    }
}

impl LoginOutcome {
    /// Returns `true` if the login outcome is [`Success`].
    ///
    /// [`Success`]: LoginOutcome::Success
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoginOutcome::Success => None,
            LoginOutcome::Failed(msg) => Some(msg),
        }
    }
}

impl RegisterOutcome {
    /// Returns `true` if the register outcome is [`Created`].
    ///
    /// [`Created`]: RegisterOutcome::Created
    #[must_use]
    pub fn is_created(&self) -> bool {
        matches!(self, Self::Created(..))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RegisterOutcome::Created(_) => None,
            RegisterOutcome::Failed(msg) => Some(msg),
        }
    }
}

impl SessionManager {
    /// Starts in [`SessionStatus::Checking`] if `store` holds an access token
    /// and [`SessionStatus::Unauthenticated`] otherwise.
    /// [`Self::bootstrap`] should be called once to resolve the status.
    #[tracing::instrument(name = "NEW SESSION", skip(store))]
    pub fn new(client: Client, store: Arc<dyn TokenStore>) -> Self {
        let access_token = read_store(store.as_ref(), STORAGE_KEY_ACCESS).map(AccessToken::from);
        let refresh_token =
            read_store(store.as_ref(), STORAGE_KEY_REFRESH).map(RefreshToken::from);
        let status = if access_token.is_some() {
            SessionStatus::Checking
        } else {
            SessionStatus::Unauthenticated
        };
        Self {
            client,
            store,
            state: Arc::new(Mutex::new(Session {
                access_token,
                refresh_token,
                status,
            })),
        }
    }

    /// The shared client, carries the current credential
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn status(&self) -> SessionStatus {
        self.state.lock().expect("mutex poisoned").status.clone()
    }

    pub fn user(&self) -> Option<Arc<UserRecord>> {
        self.status().user().cloned()
    }

    /// Same as [`Self::user`] but as an error for callers that require a login
    pub fn require_user(&self) -> Result<Arc<UserRecord>, NotLoggedInError> {
        self.user().ok_or(NotLoggedInError)
    }

    pub fn is_loading(&self) -> bool {
        self.status().is_checking()
    }

    pub fn view(&self) -> SessionView {
        let status = self.status();
        SessionView {
            loading: status.is_checking(),
            user: status.user().cloned(),
        }
    }

    /// Restores the session from the persisted token if there is one
    ///
    /// Never fails, any problem verifying the token results in the persisted
    /// tokens being discarded and [`SessionStatus::Unauthenticated`]
    #[tracing::instrument(skip(self, ui_notify))]
    pub fn bootstrap<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<SessionStatus> {
        let (tx, rx) = oneshot::channel();
        let Some(access_token) = self.begin_check() else {
            info!("no persisted token found");
            send_result(tx, SessionStatus::Unauthenticated);
            ui_notify();
            return rx;
        };
        self.client.set_credential(Some(access_token.clone()));
        let manager = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let status = manager.process_bootstrap(access_token, resp).await;
            send_result(tx, status);
            ui_notify();
        };
        self.client.initiate_request(&PATH_USERS_ME, NO_ARGS, on_done);
        rx
    }

    /// Exchanges the credentials for tokens and loads the user they belong to
    #[tracing::instrument(skip(self, ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<LoginOutcome> {
        let (tx, rx) = oneshot::channel();
        let manager = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let outcome = manager.process_login(resp).await;
            send_result(tx, outcome);
            ui_notify();
        };
        self.client
            .initiate_request(&PATH_AUTH_TOKEN, &args.to_json(), on_done);
        rx
    }

    /// Forgets the tokens and the user, safe to call when not logged in
    #[tracing::instrument(skip(self))]
    pub fn logout(&self) {
        self.reset();
    }

    /// Creates a new account, the session is not affected (a login is still
    /// required afterwards)
    #[tracing::instrument(skip(self, ui_notify))]
    pub fn register<F: UiCallBack>(
        &self,
        args: &RegisterReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<RegisterOutcome> {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let outcome = match process_json_body::<RegisteredUser>(resp).await {
                Ok(user) => RegisterOutcome::Created(user),
                Err(e) => {
                    warn!(?e, "registration failed");
                    RegisterOutcome::Failed(e.message_or(ERR_REGISTRATION_FAILED))
                }
            };
            send_result(tx, outcome);
            ui_notify();
        };
        self.client
            .initiate_request(&PATH_REGISTER, &args.to_json(), on_done);
        rx
    }

    /// Moves to [`SessionStatus::Checking`] and returns the token to verify,
    /// or moves to [`SessionStatus::Unauthenticated`] if there is none
    fn begin_check(&self) -> Option<AccessToken> {
        let mut guard = self.state.lock().expect("mutex poisoned");
        match guard.access_token.clone() {
            Some(token) => {
                guard.status = SessionStatus::Checking;
                Some(token)
            }
            None => {
                guard.status = SessionStatus::Unauthenticated;
                None
            }
        }
    }

    #[tracing::instrument(skip(self, checked))]
    async fn process_bootstrap(
        &self,
        checked: AccessToken,
        response: reqwest::Result<reqwest::Response>,
    ) -> SessionStatus {
        let result = process_json_body::<UserRecord>(response).await;
        let mut guard = self.state.lock().expect("mutex poisoned");
        let is_current = guard
            .access_token
            .as_ref()
            .is_some_and(|x| x.expose_secret() == checked.expose_secret());
        if !is_current {
            info!("session changed while the token was being checked, result ignored");
            return guard.status.clone();
        }
        match result {
            Ok(user) => {
                let status = SessionStatus::Authenticated(Arc::new(user));
                guard.status = status.clone();
                info!("session restored");
                status
            }
            Err(e) => {
                drop(guard);
                // An expired token is expected so this is not reported further
                info!(?e, "persisted token not accepted, discarding it");
                self.reset();
                SessionStatus::Unauthenticated
            }
        }
    }

    #[tracing::instrument(skip(self))]
    async fn process_login(&self, response: reqwest::Result<reqwest::Response>) -> LoginOutcome {
        match self.fetch_tokens_and_user(response).await {
            Ok((tokens, user)) => {
                self.commit_login(tokens, user);
                LoginOutcome::Success
            }
            Err(e) => {
                warn!(?e, "login failed");
                LoginOutcome::Failed(e.detail().unwrap_or_else(|| ERR_LOGIN_FAILED.to_string()))
            }
        }
    }

    /// Nothing is stored until both steps succeed so a failure leaves the
    /// session untouched
    async fn fetch_tokens_and_user(
        &self,
        response: reqwest::Result<reqwest::Response>,
    ) -> Result<(TokenPair, UserRecord), ApiError> {
        let tokens: TokenPair = process_json_body(response).await?;
        let response = self
            .client
            .send_with_credential(&PATH_USERS_ME, NO_ARGS, &tokens.access)
            .await;
        let user = process_json_body(response).await?;
        Ok((tokens, user))
    }

    fn commit_login(&self, tokens: TokenPair, user: UserRecord) {
        write_store(
            self.store.as_ref(),
            STORAGE_KEY_ACCESS,
            tokens.access.expose_secret(),
        );
        write_store(
            self.store.as_ref(),
            STORAGE_KEY_REFRESH,
            tokens.refresh.expose_secret(),
        );
        self.client.set_credential(Some(tokens.access.clone()));
        let mut guard = self.state.lock().expect("mutex poisoned");
        info!(username = %user.username, "logged in");
        *guard = Session {
            access_token: Some(tokens.access),
            refresh_token: Some(tokens.refresh),
            status: SessionStatus::Authenticated(Arc::new(user)),
        };
    }

    /// Clears the persisted tokens, the client's credential and the user
    fn reset(&self) {
        remove_from_store(self.store.as_ref(), STORAGE_KEY_ACCESS);
        remove_from_store(self.store.as_ref(), STORAGE_KEY_REFRESH);
        self.client.set_credential(None);
        *self.state.lock().expect("mutex poisoned") = Session {
            access_token: None,
            refresh_token: None,
            status: SessionStatus::Unauthenticated,
        };
    }

    #[cfg(test)]
    fn has_refresh_token(&self) -> bool {
        self.state
            .lock()
            .expect("mutex poisoned")
            .refresh_token
            .is_some()
    }
}

// Storage failures are logged and otherwise ignored, the worst case is that the
// user has to log in again on the next start

fn read_store(store: &dyn TokenStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(value) => value.filter(|x| !x.is_empty()),
        Err(err) => {
            warn!(?err, key, "failed to read from token store");
            None
        }
    }
}

fn write_store(store: &dyn TokenStore, key: &str, value: &str) {
    if let Err(err) = store.set(key, value) {
        warn!(?err, key, "failed to write to token store");
    }
}

fn remove_from_store(store: &dyn TokenStore, key: &str) {
    if let Err(err) = store.remove(key) {
        warn!(?err, key, "failed to remove from token store");
    }
}
