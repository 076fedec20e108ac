use futures::channel::oneshot;
use hostelease_shared::{
    const_config::path::{PATH_COMPLAINTS, PATH_COMPLAINT_COMMENT, PATH_COMPLAINT_CREATE},
    id::DbId,
    req_args::api::{ComplaintCommentReqArgs, NewComplaintReqArgs},
};

use super::{ApiRecord, NEWEST_FIRST};
use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_complaints<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_COMPLAINTS, NEWEST_FIRST, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn new_complaint<F: UiCallBack>(
        &self,
        args: &NewComplaintReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_COMPLAINT_CREATE, args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn comment_on_complaint<F: UiCallBack>(
        &self,
        complaint: DbId,
        args: &ComplaintCommentReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_COMPLAINT_COMMENT.with_id(complaint), args, ui_notify)
    }
}
