use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use hostelease_shared::{
    const_config::{client::CLIENT_DEFAULT_BASE_URL, path::PathSpec},
    token::AccessToken,
};
use reqwest::{header::AUTHORIZATION, Method};
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::errors::ApiError;

pub mod api;

/// Empty argument list, sent as no query string or as `{}` for a json body
pub const NO_ARGS: &NoArgs = &NoArgs {};

#[derive(Debug, serde::Serialize)]
pub struct NoArgs {}

/// The HTTP client every API call goes through
///
/// Cloning is cheap and all clones share the same bearer credential. The
/// credential can only be changed from inside this crate (by the session)
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
}

#[derive(Debug)]
struct ClientInner {
    base_url: String,
    credential: Option<AccessToken>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(CLIENT_DEFAULT_BASE_URL.to_string())
    }
}

impl ClientInner {
    #[tracing::instrument]
    fn new(base_url: String) -> Self {
        Self {
            base_url,
            credential: None,
        }
    }
}

impl Client {
    /// `base_url` is expected to end with a `/` as paths are appended directly
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(base_url: String) -> Self {
        if !base_url.ends_with('/') {
            warn!(?base_url, "base url does not end with a slash");
        }
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(base_url))),
        }
    }

    pub fn base_url(&self) -> String {
        self.inner.lock().expect("mutex poisoned").base_url.clone()
    }

    /// Returns `true` if requests are currently sent with a bearer credential
    pub fn has_credential(&self) -> bool {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .credential
            .is_some()
    }

    #[tracing::instrument(skip(credential), fields(is_set = credential.is_some()))]
    pub(crate) fn set_credential(&self, credential: Option<AccessToken>) {
        self.inner.lock().expect("mutex poisoned").credential = credential;
    }

    fn credential(&self) -> Option<AccessToken> {
        self.inner.lock().expect("mutex poisoned").credential.clone()
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it my contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    pub(crate) fn initiate_request<T, F, O>(&self, path_spec: &PathSpec, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug + ?Sized,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let request = self.build_request(path_spec, args);
        reqwest_cross::fetch(request, on_done)
    }

    /// Sends a request that authenticates with `credential` instead of the
    /// stored one. Used to verify a freshly issued token before it is stored.
    #[tracing::instrument(skip(args, credential))]
    pub(crate) async fn send_with_credential<T>(
        &self,
        path_spec: &PathSpec,
        args: &T,
        credential: &AccessToken,
    ) -> reqwest::Result<reqwest::Response>
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        self.build_request_with_credential(path_spec, args, Some(credential))
            .send()
            .await
    }

    fn build_request<T>(&self, path_spec: &PathSpec, args: &T) -> reqwest::RequestBuilder
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        let credential = self.credential();
        self.build_request_with_credential(path_spec, args, credential.as_ref())
    }

    /// The only place where the authorization header gets attached
    fn build_request_with_credential<T>(
        &self,
        path_spec: &PathSpec,
        args: &T,
        credential: Option<&AccessToken>,
    ) -> reqwest::RequestBuilder
    where
        T: serde::Serialize + Debug + ?Sized,
    {
        debug_assert!(
            !path_spec.has_placeholder(),
            "id not filled in for path: {}",
            path_spec.path
        );
        let uses_query = matches!(path_spec.method, Method::GET | Method::DELETE);
        let mut request = self
            .api_client
            .request(path_spec.method.clone(), self.path_to_url(&path_spec.path));
        request = if uses_query {
            request.query(args)
        } else {
            request.json(args)
        };
        if let Some(credential) = credential {
            request = request.header(AUTHORIZATION, credential.bearer_header_value());
        }
        request
    }

    pub(crate) fn send_request_expect_json<F, T, U>(
        &self,
        path_spec: &PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + Debug + ?Sized,
        F: UiCallBack,
        U: Send + Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await.map_err(anyhow::Error::from);
            send_result(tx, msg);
            ui_notify();
        };
        self.initiate_request(path_spec, args, on_done);
        rx
    }

    /// Same as [`Self::send_request_expect_json`] but on failure the error
    /// message is the flattened API error body or `fallback`
    pub(crate) fn send_request_expect_json_or<F, T, U>(
        &self,
        path_spec: &PathSpec,
        args: &T,
        fallback: &'static str,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + Debug + ?Sized,
        F: UiCallBack,
        U: Send + Debug + serde::de::DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp)
                .await
                .map_err(|e| with_display_message(e, fallback));
            send_result(tx, msg);
            ui_notify();
        };
        self.initiate_request(path_spec, args, on_done);
        rx
    }

    pub(crate) fn send_request_expect_empty<F, T>(
        &self,
        path_spec: &PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + Debug + ?Sized,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp).await.map_err(anyhow::Error::from);
            send_result(tx, msg);
            ui_notify();
        };
        self.initiate_request(path_spec, args, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .base_url
        )
    }
}

/// Wraps the error so that its message is fit to show to the user while
/// keeping the [`ApiError`] available for downcasting
pub(crate) fn with_display_message(err: ApiError, fallback: &str) -> anyhow::Error {
    let message = err.message_or(fallback);
    anyhow::Error::new(err).context(message)
}

/// Sends the result to the waiting receiver, the receiver may have been dropped
/// if the caller lost interest which is not an error
pub(crate) fn send_result<T: Debug>(tx: oneshot::Sender<T>, msg: T) {
    if let Err(msg) = tx.send(msg) {
        warn!(?msg, "receiver dropped before the result was delivered");
    }
}

#[tracing::instrument(ret, err(Debug))]
pub(crate) async fn process_empty(
    response: reqwest::Result<reqwest::Response>,
) -> Result<(), ApiError> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
pub(crate) async fn process_json_body<T>(
    response: reqwest::Result<reqwest::Response>,
) -> Result<T, ApiError>
where
    T: Debug + serde::de::DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response.json().await.map_err(ApiError::Decode)
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> ApiError {
    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            warn!(?err, "failed to get response body");
            String::new()
        }
    };
    ApiError::Rejected { status, body }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> Result<(reqwest::Response, reqwest::StatusCode), ApiError> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.map_err(ApiError::Transport)?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
