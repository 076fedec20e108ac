use futures::channel::oneshot;
use hostelease_shared::{
    const_config::path::{
        PATH_MAINTENANCE, PATH_MAINTENANCE_CREATE, PATH_MAINTENANCE_UPDATE_STATUS,
    },
    id::DbId,
    req_args::api::{MaintenanceStatus, MaintenanceStatusReqArgs, NewMaintenanceReqArgs},
};

use super::{ApiRecord, NEWEST_FIRST};
use crate::{client::UiCallBack, Client};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn list_maintenance<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_MAINTENANCE, NEWEST_FIRST, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn new_maintenance_request<F: UiCallBack>(
        &self,
        args: &NewMaintenanceReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_MAINTENANCE_CREATE, args, ui_notify)
    }

    /// Only available to wardens
    #[tracing::instrument(skip(ui_notify))]
    pub fn update_maintenance_status<F: UiCallBack>(
        &self,
        request: DbId,
        status: MaintenanceStatus,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(
            &PATH_MAINTENANCE_UPDATE_STATUS.with_id(request),
            &MaintenanceStatusReqArgs { status },
            ui_notify,
        )
    }
}
