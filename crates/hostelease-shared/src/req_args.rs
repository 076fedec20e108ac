//! This module stores the expected format of the arguments for the requests
//! The structure of the module is supposed to match the path of the endpoints.
//! Arguments that carry a password are not `Serialize`, the client builds the
//! json body itself so the secret is only exposed at that point

use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::uac::Role;

pub mod api;

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub username: String,
    pub password: SecretString,
}

/// Profile submitted to `register/`
#[derive(Clone)]
pub struct RegisterReqArgs {
    pub username: String,
    pub email: String,
    pub password: SecretString,
    pub password_confirm: SecretString,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub role: Role,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(username: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            password,
        }
    }

    pub fn username(mut self, username: String) -> Self {
        self.username = username;
        self
    }

    pub fn password(mut self, password: SecretString) -> Self {
        self.password = password;
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "password": self.password.expose_secret(),
        })
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("username", &self.username)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

impl RegisterReqArgs {
    /// Starts a registration for a student with both password fields set to
    /// `password`, the remaining fields can be set with the builder methods
    pub fn new<S: Into<String>>(username: S, email: S, password: SecretString) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password_confirm: password.clone(),
            password,
            first_name: String::new(),
            last_name: String::new(),
            phone_number: String::new(),
            role: Role::default(),
        }
    }

    pub fn password_confirm(mut self, password_confirm: SecretString) -> Self {
        self.password_confirm = password_confirm;
        self
    }

    pub fn name<S: Into<String>>(mut self, first_name: S, last_name: S) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    pub fn phone_number<S: Into<String>>(mut self, phone_number: S) -> Self {
        self.phone_number = phone_number.into();
        self
    }

    pub fn role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.username,
            "email": self.email,
            "password": self.password.expose_secret(),
            "password_confirm": self.password_confirm.expose_secret(),
            "first_name": self.first_name,
            "last_name": self.last_name,
            "phone_number": self.phone_number,
            "role": self.role,
        })
    }
}

impl Debug for RegisterReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterReqArgs")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("phone_number", &self.phone_number)
            .field("role", &self.role)
            .finish()
    }
}
