use std::borrow::Cow;

use reqwest::{self, Method};

use crate::id::DbId;

const ID_PLACEHOLDER: &str = "{id}";

/// An endpoint relative to the API base url and the method used to reach it
///
/// Paths that address a single record contain an `{id}` placeholder which must
/// be filled in with [`PathSpec::with_id`] before the request is sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSpec {
    pub path: Cow<'static, str>,
    pub method: reqwest::Method,
}

impl PathSpec {
    pub const fn get(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::GET,
        }
    }

    pub const fn post(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::POST,
        }
    }

    pub const fn patch(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::PATCH,
        }
    }

    pub const fn delete(path: &'static str) -> Self {
        Self {
            path: Cow::Borrowed(path),
            method: Method::DELETE,
        }
    }

    /// Returns a copy with the `{id}` placeholder replaced by `id`
    pub fn with_id(&self, id: DbId) -> Self {
        debug_assert!(
            self.has_placeholder(),
            "path does not take an id: {}",
            self.path
        );
        Self {
            path: Cow::Owned(self.path.replace(ID_PLACEHOLDER, &id.to_string())),
            method: self.method.clone(),
        }
    }

    pub fn has_placeholder(&self) -> bool {
        self.path.contains(ID_PLACEHOLDER)
    }
}
