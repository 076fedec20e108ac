use futures::channel::oneshot;
use hostelease_shared::const_config::path::{PATH_ATTENDANCE, PATH_ATTENDANCE_MARK};

use super::ApiRecord;
use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

const LATEST_DATE_FIRST: &[(&str, &str)] = &[("ordering", "-date")];

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_attendance<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_ATTENDANCE, LATEST_DATE_FIRST, ui_notify)
    }

    /// Marks the logged in student as present for today
    #[tracing::instrument(skip(ui_notify))]
    pub fn mark_attendance<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        self.send_request_expect_empty(&PATH_ATTENDANCE_MARK, NO_ARGS, ui_notify)
    }
}
