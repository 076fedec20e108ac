use futures::channel::oneshot;
use hostelease_shared::{const_config::path::PATH_STUDENTS, uac::UserRecord};

use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    /// Only available to wardens and admins
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_students<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<UserRecord>>> {
        self.send_request_expect_json(&PATH_STUDENTS, NO_ARGS, ui_notify)
    }
}
