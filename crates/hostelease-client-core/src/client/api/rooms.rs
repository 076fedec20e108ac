use futures::channel::oneshot;
use hostelease_shared::{
    const_config::path::{
        PATH_ALLOCATIONS_ACTIVE, PATH_ALLOCATION_CREATE, PATH_ALLOCATION_TRANSFER,
        PATH_ROOMS_AVAILABLE,
    },
    id::DbId,
    req_args::api::{NewAllocationReqArgs, TransferReqArgs},
};

use super::ApiRecord;
use crate::{
    client::{UiCallBack, NO_ARGS},
    Client,
};

impl Client {
    #[tracing::instrument(skip(ui_notify))]
    pub fn available_rooms<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_ROOMS_AVAILABLE, NO_ARGS, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn active_allocations<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<ApiRecord>>> {
        self.send_request_expect_json(&PATH_ALLOCATIONS_ACTIVE, NO_ARGS, ui_notify)
    }

    /// Requests `room` for the logged in user starting today
    #[tracing::instrument(skip(ui_notify))]
    pub fn allocate_room<F: UiCallBack>(
        &self,
        room: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        let args = NewAllocationReqArgs::active(room, chrono::Local::now().date_naive());
        self.send_request_expect_json(&PATH_ALLOCATION_CREATE, &args, ui_notify)
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn transfer_room<F: UiCallBack>(
        &self,
        room: DbId,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<ApiRecord>> {
        self.send_request_expect_json(&PATH_ALLOCATION_TRANSFER, &TransferReqArgs { room }, ui_notify)
    }
}
