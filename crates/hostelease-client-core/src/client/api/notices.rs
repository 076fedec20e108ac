use futures::channel::oneshot;
use hostelease_shared::{
    const_config::path::{PATH_NOTICES, PATH_NOTICE_READ, PATH_NOTICE_UNREAD},
    id::DbId,
};

use super::{ApiRecord, NEWEST_FIRST};
use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_notices<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_NOTICES, NEWEST_FIRST, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn set_notice_read<F: UiCallBack>(
        &self,
        notice: DbId,
        is_read: bool,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let path_spec = if is_read {
            PATH_NOTICE_READ.with_id(notice)
        } else {
            PATH_NOTICE_UNREAD.with_id(notice)
        };
        self.send_request_expect_empty(&path_spec, NO_ARGS, ui_notify)
    }
}
