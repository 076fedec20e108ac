use futures::channel::oneshot;
use hostelease_shared::const_config::path::{
    PATH_DASHBOARD_STATS, PATH_PAYMENTS_STATS, PATH_ROOMS_STATS,
};

use super::ApiRecord;
use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn dashboard_stats<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_DASHBOARD_STATS, NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn room_stats<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_ROOMS_STATS, NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn payment_stats<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_PAYMENTS_STATS, NO_ARGS, ui_notify)
    }
}
