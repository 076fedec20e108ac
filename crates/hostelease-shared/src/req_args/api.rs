//! Arguments for the endpoints used by the feature pages

use chrono::NaiveDate;
use secrecy::{ExposeSecret, SecretString};
use std::fmt::Debug;

use crate::id::DbId;

#[derive(Clone)]
pub struct ChangePasswordReqArgs {
    pub current_password: SecretString,
    pub new_password: SecretString,
    pub confirm_password: SecretString,
}

impl ChangePasswordReqArgs {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "current_password": self.current_password.expose_secret(),
            "new_password": self.new_password.expose_secret(),
            "confirm_password": self.confirm_password.expose_secret(),
        })
    }
}

impl Debug for ChangePasswordReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangePasswordReqArgs").finish_non_exhaustive()
    }
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct ProfileUpdateReqArgs {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub address: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NewAllocationReqArgs {
    pub room: DbId,
    pub start_date: NaiveDate,
    pub status: &'static str,
}

impl NewAllocationReqArgs {
    /// An allocation of `room` that is active from `start_date`
    pub fn active(room: DbId, start_date: NaiveDate) -> Self {
        Self {
            room,
            start_date,
            status: "active",
        }
    }
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct TransferReqArgs {
    pub room: DbId,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NewComplaintReqArgs {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct ComplaintCommentReqArgs {
    pub message: String,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct NewMaintenanceReqArgs {
    pub title: String,
    pub description: String,
    pub room: DbId,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MaintenanceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct MaintenanceStatusReqArgs {
    pub status: MaintenanceStatus,
}

#[derive(Debug, Default, Clone, serde::Serialize)]
pub struct VisitorPassReqArgs {
    pub visitor_name: String,
    pub visitor_phone: String,
    pub purpose: String,
    pub visit_date: String,
    pub visit_time: String,
}
