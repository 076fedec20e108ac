use futures::channel::oneshot;
use hostelease_shared::{
    const_config::{
        error::{ERR_CHANGE_PASSWORD_FAILED, ERR_PROFILE_UPDATE_FAILED},
        path::{
            PATH_CHANGE_PASSWORD, PATH_PROFILE_AVATAR_REMOVE, PATH_PROFILE_UPDATE, PATH_USERS_ME,
        },
    },
    errors::error_detail,
    req_args::api::{ChangePasswordReqArgs, ProfileUpdateReqArgs},
    uac::UserRecord,
};

use super::{process_json_body, send_result, with_display_message, NO_ARGS};
use crate::{client::UiCallBack, Client};

mod attendance;
mod complaints;
mod dashboard;
mod maintenance;
mod notices;
mod payments;
mod rooms;
mod students;
mod visitors;

/// A record the dashboard only displays, passed through as returned by the API
pub type ApiRecord = serde_json::Value;

/// Query used by the listings that show the newest entries first
const NEWEST_FIRST: &[(&str, &str)] = &[("ordering", "-created_at")];

const PASSWORD_UPDATED: &str = "Password updated";

impl Client {
    /// Fetches a fresh copy of the logged in user's record
    ///
    /// Does not update the session, that only happens on login or bootstrap
    #[tracing::instrument(skip(ui_notify))]
    pub fn get_profile<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserRecord>> {
        self.send_request_expect_json(&PATH_USERS_ME, NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn update_profile<F: UiCallBack>(
        &self,
        args: &ProfileUpdateReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<UserRecord>> {
        self.send_request_expect_json_or(
            &PATH_PROFILE_UPDATE,
            args,
            ERR_PROFILE_UPDATE_FAILED,
            ui_notify,
        )
    }

    /// On success returns the confirmation message from the API
    #[tracing::instrument(skip(args, ui_notify))]
    pub fn change_password<F: UiCallBack>(
        &self,
        args: &ChangePasswordReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<String>> {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body::<ApiRecord>(resp)
                .await
                .map(|body| error_detail(&body).unwrap_or_else(|| PASSWORD_UPDATED.to_string()))
                .map_err(|e| with_display_message(e, ERR_CHANGE_PASSWORD_FAILED));
            send_result(tx, msg);
            ui_notify();
        };
        self.initiate_request(&PATH_CHANGE_PASSWORD, &args.to_json(), on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn remove_avatar<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(&PATH_PROFILE_AVATAR_REMOVE, NO_ARGS, ui_notify)
    }
}
