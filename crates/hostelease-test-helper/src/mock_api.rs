//! In process stand in for the REST API
//!
//! Implements only as much of each endpoint as the client relies on and
//! records every request it receives so tests can check what was sent

use actix_web::{
    http::{header::AUTHORIZATION, Method, StatusCode},
    web, App, HttpRequest, HttpResponse, HttpServer,
};
use anyhow::Context as _;
use hostelease_shared::uac::Role;
use serde_json::{json, Map, Value};
use std::{
    collections::HashMap,
    net::TcpListener,
    sync::Mutex,
    time::Duration,
};
use tracing::info;
use uuid::Uuid;

use crate::{start_tracing, TestUser};

const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials";
const MSG_NO_CREDENTIALS: &str = "Authentication credentials were not provided.";
const MSG_INVALID_TOKEN: &str = "Given token not valid for any token type";
const MAX_PHONE_NUMBER_LEN: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path without the `/api/` prefix, for example `users/me/`
    pub path: String,
    pub query: String,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

/// Handle to a running mock API, the server keeps running until the test ends
#[derive(Debug, Clone)]
pub struct MockApi {
    /// Base url to give to the client, ends with `/api/`
    pub address: String,
    state: web::Data<MockState>,
}

#[derive(Debug, Default)]
struct MockState {
    accounts: Mutex<Vec<Account>>,
    /// Maps access tokens to usernames
    issued_tokens: Mutex<HashMap<String, String>>,
    requests: Mutex<Vec<RecordedRequest>>,
    register_response: Mutex<Option<(StatusCode, Value)>>,
    me_response: Mutex<Option<(StatusCode, Value)>>,
    token_delays: Mutex<HashMap<String, Duration>>,
}

#[derive(Debug, Clone)]
struct Account {
    password: String,
    record: Value,
}

#[derive(Debug, serde::Deserialize)]
struct TokenReqArgs {
    username: String,
    password: String,
}

/// Returns a base url that nothing is listening on
pub fn unreachable_address() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind to a random port");
    let port = listener
        .local_addr()
        .expect("failed to get local address of listener")
        .port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api/")
}

impl MockApi {
    /// Starts the server on a random port in the background
    pub async fn spawn() -> Self {
        start_tracing();
        Self::try_spawn().await.expect("failed to start mock api")
    }

    async fn try_spawn() -> anyhow::Result<Self> {
        let state = web::Data::new(MockState::default());
        let listener =
            TcpListener::bind("127.0.0.1:0").context("failed to bind to a random port")?;
        let port = listener
            .local_addr()
            .context("failed to get local address of listener")?
            .port();
        info!(?port, "Port assigned to the mock api is {port}");

        let app_state = state.clone();
        let server = HttpServer::new(move || {
            App::new().app_data(app_state.clone()).service(
                web::scope("/api")
                    .route("/auth/token/", web::post().to(token))
                    .route("/register/", web::post().to(register))
                    .service(
                        web::resource("/users/me/")
                            .route(web::get().to(me))
                            .route(web::patch().to(update_me)),
                    )
                    .route("/users/students/", web::get().to(students))
                    .route("/users/change-password/", web::post().to(change_password))
                    .default_service(web::to(catch_all)),
            )
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .context("Failed to bind HTTP Server to listener")?
        .run();
        tokio::spawn(server);

        Ok(Self {
            address: format!("http://127.0.0.1:{port}/api/"),
            state,
        })
    }

    /// Creates an account that can log in with the user's credentials
    pub fn add_user(&self, user: &TestUser, role: Role) {
        self.state.add_account(user, role);
    }

    /// Issues a token the same way a login would, for seeding a token store
    pub fn issue_token(&self, username: &str) -> String {
        self.state.issue_token(username)
    }

    /// Makes every token issued so far invalid (as if they expired)
    pub fn revoke_all_tokens(&self) {
        self.state
            .issued_tokens
            .lock()
            .expect("mutex poisoned")
            .clear();
    }

    /// Forces the next registrations to be answered with `body`
    pub fn set_register_response(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).expect("invalid status code");
        *self.state.register_response.lock().expect("mutex poisoned") = Some((status, body));
    }

    /// Forces every `GET users/me/` to be answered with `body`, even
    /// unauthenticated ones
    pub fn set_me_response(&self, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).expect("invalid status code");
        *self.state.me_response.lock().expect("mutex poisoned") = Some((status, body));
    }

    /// Delays the token endpoint's answer when `username` logs in
    pub fn set_token_delay(&self, username: &str, delay: Duration) {
        self.state
            .token_delays
            .lock()
            .expect("mutex poisoned")
            .insert(username.to_string(), delay);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().expect("mutex poisoned").clone()
    }

    /// The most recent request received for `path` (without the `/api/` prefix)
    pub fn last_request_to(&self, path: &str) -> Option<RecordedRequest> {
        self.requests().into_iter().rev().find(|x| x.path == path)
    }

    pub fn has_user(&self, username: &str) -> bool {
        self.state.find_account(username).is_some()
    }
}

impl MockState {
    fn add_account(&self, user: &TestUser, role: Role) {
        let mut accounts = self.accounts.lock().expect("mutex poisoned");
        let record = json!({
            "id": accounts.len() + 1,
            "username": user.username,
            "email": format!("{}@example.com", user.username),
            "first_name": "Test",
            "last_name": "User",
            "full_name": "Test User",
            "role": role,
            "phone_number": "",
            "address": "",
        });
        accounts.push(Account {
            password: user.password.clone(),
            record,
        });
    }

    fn record(&self, req: &HttpRequest, body: &web::Bytes) -> Option<Value> {
        let body = serde_json::from_slice::<Value>(body).ok();
        let request = RecordedRequest {
            method: req.method().clone(),
            path: req
                .path()
                .strip_prefix("/api/")
                .unwrap_or(req.path())
                .to_string(),
            query: req.query_string().to_string(),
            authorization: req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|x| x.to_str().ok())
                .map(|x| x.to_string()),
            body: body.clone(),
        };
        info!(?request, "mock api received request");
        self.requests.lock().expect("mutex poisoned").push(request);
        body
    }

    fn issue_token(&self, username: &str) -> String {
        let access = format!("access-{}", Uuid::new_v4());
        self.issued_tokens
            .lock()
            .expect("mutex poisoned")
            .insert(access.clone(), username.to_string());
        access
    }

    fn find_account(&self, username: &str) -> Option<Account> {
        self.accounts
            .lock()
            .expect("mutex poisoned")
            .iter()
            .find(|x| x.record["username"] == username)
            .cloned()
    }

    fn update_account<F: FnOnce(&mut Account)>(&self, username: &str, f: F) -> Option<Account> {
        let mut accounts = self.accounts.lock().expect("mutex poisoned");
        let account = accounts
            .iter_mut()
            .find(|x| x.record["username"] == username)?;
        f(account);
        Some(account.clone())
    }

    /// Returns the username the request authenticates as or the response to
    /// send back if it does not
    fn authenticate(&self, req: &HttpRequest) -> Result<String, HttpResponse> {
        let Some(header) = req.headers().get(AUTHORIZATION) else {
            return Err(unauthorized(MSG_NO_CREDENTIALS));
        };
        let token = header
            .to_str()
            .ok()
            .and_then(|x| x.strip_prefix("Bearer "))
            .ok_or_else(|| unauthorized(MSG_INVALID_TOKEN))?;
        self.issued_tokens
            .lock()
            .expect("mutex poisoned")
            .get(token)
            .cloned()
            .ok_or_else(|| unauthorized(MSG_INVALID_TOKEN))
    }
}

fn unauthorized(detail: &str) -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "detail": detail }))
}

fn field_error(errors: &mut Map<String, Value>, field: &str, msg: &str) {
    errors.insert(field.to_string(), json!([msg]));
}

async fn token(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    state.record(&req, &body);
    let Ok(args) = serde_json::from_slice::<TokenReqArgs>(&body) else {
        return HttpResponse::BadRequest().json(json!({"username": ["This field is required."]}));
    };
    let delay = state
        .token_delays
        .lock()
        .expect("mutex poisoned")
        .get(&args.username)
        .copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    match state.find_account(&args.username) {
        Some(account) if account.password == args.password => {
            let access = state.issue_token(&args.username);
            HttpResponse::Ok().json(json!({
                "access": access,
                "refresh": format!("refresh-{}", Uuid::new_v4()),
            }))
        }
        _ => unauthorized(MSG_INVALID_CREDENTIALS),
    }
}

async fn me(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    state.record(&req, &body);
    let forced = state.me_response.lock().expect("mutex poisoned").clone();
    if let Some((status, body)) = forced {
        return HttpResponse::build(status).json(body);
    }
    let username = match state.authenticate(&req) {
        Ok(username) => username,
        Err(response) => return response,
    };
    match state.find_account(&username) {
        Some(account) => HttpResponse::Ok().json(account.record),
        None => HttpResponse::NotFound().json(json!({"detail": "Not found."})),
    }
}

async fn update_me(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let body = state.record(&req, &body);
    let username = match state.authenticate(&req) {
        Ok(username) => username,
        Err(response) => return response,
    };
    let Some(Value::Object(changes)) = body else {
        return HttpResponse::BadRequest().json(json!(["Invalid data"]));
    };
    let phone_len = changes
        .get("phone_number")
        .and_then(|x| x.as_str())
        .map_or(0, |x| x.len());
    if phone_len > MAX_PHONE_NUMBER_LEN {
        let mut errors = Map::new();
        field_error(
            &mut errors,
            "phone_number",
            "Ensure this field has no more than 20 characters.",
        );
        return HttpResponse::BadRequest().json(errors);
    }
    let updated = state.update_account(&username, |account| {
        if let Value::Object(record) = &mut account.record {
            for (key, value) in changes {
                record.insert(key, value);
            }
        }
    });
    match updated {
        Some(account) => HttpResponse::Ok().json(account.record),
        None => HttpResponse::NotFound().json(json!({"detail": "Not found."})),
    }
}

async fn change_password(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<MockState>,
) -> HttpResponse {
    let body = state.record(&req, &body).unwrap_or_default();
    let username = match state.authenticate(&req) {
        Ok(username) => username,
        Err(response) => return response,
    };
    let field = |name: &str| body.get(name).and_then(|x| x.as_str()).unwrap_or_default();
    let Some(account) = state.find_account(&username) else {
        return HttpResponse::NotFound().json(json!({"detail": "Not found."}));
    };
    let mut errors = Map::new();
    if field("current_password") != account.password {
        field_error(&mut errors, "current_password", "Current password is incorrect");
    }
    if field("new_password") != field("confirm_password") {
        field_error(&mut errors, "confirm_password", "Passwords do not match");
    }
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(errors);
    }
    let new_password = field("new_password").to_string();
    state.update_account(&username, |account| account.password = new_password);
    HttpResponse::Ok().json(json!({"detail": "Password changed successfully"}))
}

async fn register(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let body = state.record(&req, &body).unwrap_or_default();
    let forced = state
        .register_response
        .lock()
        .expect("mutex poisoned")
        .clone();
    if let Some((status, body)) = forced {
        return HttpResponse::build(status).json(body);
    }

    let field = |name: &str| body.get(name).and_then(|x| x.as_str()).unwrap_or_default();
    let mut errors = Map::new();
    if field("username").is_empty() {
        field_error(&mut errors, "username", "This field may not be blank.");
    } else if state.find_account(field("username")).is_some() {
        field_error(
            &mut errors,
            "username",
            "A user with that username already exists.",
        );
    }
    if field("password") != field("password_confirm") {
        field_error(&mut errors, "non_field_errors", "Passwords don't match");
    }
    if !errors.is_empty() {
        return HttpResponse::BadRequest().json(errors);
    }

    let role = field("role").parse::<Role>().unwrap_or_default();
    let user = TestUser::new(field("username"), field("password"));
    state.add_account(&user, role);
    // Only the registration fields are echoed back, there is no id
    let created = json!({
        "username": field("username"),
        "email": field("email"),
        "first_name": field("first_name"),
        "last_name": field("last_name"),
        "phone_number": field("phone_number"),
        "date_of_birth": body.get("date_of_birth").cloned().unwrap_or(Value::Null),
        "address": field("address"),
        "emergency_contact": field("emergency_contact"),
        "role": role,
    });
    state.update_account(field("username"), |account| {
        if let (Value::Object(record), Value::Object(created)) = (&mut account.record, &created) {
            for key in ["email", "first_name", "last_name", "phone_number"] {
                record.insert(key.to_string(), created[key].clone());
            }
        }
    });
    HttpResponse::Created().json(created)
}

async fn students(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    state.record(&req, &body);
    if let Err(response) = state.authenticate(&req) {
        return response;
    }
    let students: Vec<Value> = state
        .accounts
        .lock()
        .expect("mutex poisoned")
        .iter()
        .filter(|x| x.record["role"] == "student")
        .map(|x| x.record.clone())
        .collect();
    HttpResponse::Ok().json(students)
}

/// Stands in for the feature endpoints. Requires a valid token, lists return a
/// single record naming the path and writes echo the body back
async fn catch_all(req: HttpRequest, body: web::Bytes, state: web::Data<MockState>) -> HttpResponse {
    let body = state.record(&req, &body);
    if let Err(response) = state.authenticate(&req) {
        return response;
    }
    let path = req.path().strip_prefix("/api/").unwrap_or(req.path());
    if req.method() == Method::GET {
        return HttpResponse::Ok().json(json!([{ "id": 1, "path": path }]));
    }
    if req.method() == Method::DELETE {
        return HttpResponse::NoContent().finish();
    }
    let mut record = match body {
        Some(Value::Object(map)) => map,
        _ => Map::new(),
    };
    record.insert("id".to_string(), json!(1));
    if req.method() == Method::POST {
        HttpResponse::Created().json(record)
    } else {
        HttpResponse::Ok().json(record)
    }
}
