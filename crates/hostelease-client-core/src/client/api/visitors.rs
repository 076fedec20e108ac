use futures::channel::oneshot;
use hostelease_shared::{
    const_config::path::{PATH_VISITORS, PATH_VISITOR_CREATE, PATH_VISITOR_UPDATE},
    id::DbId,
    req_args::api::VisitorPassReqArgs,
};

use super::{ApiRecord, NEWEST_FIRST};
use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_visitors<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_VISITORS, NEWEST_FIRST, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn request_visitor_pass<F: UiCallBack>(
        &self,
        args: &VisitorPassReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_VISITOR_CREATE, args, ui_notify)
    }

    /// Only available to wardens
    #[tracing::instrument(skip(ui_notify))]
    pub fn approve_visitor<F: UiCallBack>(
        &self,
        visit: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        let args = serde_json::json!({ "status": "approved" });
        self.send_request_expect_json(&PATH_VISITOR_UPDATE.with_id(visit), &args, ui_notify)
    }
}
