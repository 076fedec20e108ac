use futures::channel::oneshot;
use hostelease_shared::const_config::path::{PATH_PAYMENTS, PATH_PAYMENTS_PENDING};

use super::{ApiRecord, NEWEST_FIRST};
use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_payments<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_PAYMENTS, NEWEST_FIRST, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn pending_payments<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_PAYMENTS_PENDING, NO_ARGS, ui_notify)
    }
}
