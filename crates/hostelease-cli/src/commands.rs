use anyhow::{bail, Context as _};
use futures::channel::oneshot;
use hostelease_client_core::{
    Client, FileTokenStore, LoginOutcome, RegisterOutcome, SessionManager,
};
use hostelease_shared::req_args::{LoginReqArgs, RegisterReqArgs};
use serde::Serialize;
use std::{io::Write, sync::Arc};
use tracing::info;

use crate::{cli::Command, configuration::Configuration};

/// Runs `command` and writes its result to `out` as JSON
#[tracing::instrument(skip(command, configuration, out))]
pub async fn run<W: Write>(
    command: Command,
    configuration: &Configuration,
    out: &mut W,
) -> anyhow::Result<()> {
    let session = start_session(configuration).await?;
    if command.requires_login() {
        session.require_user()?;
    }
    let client = session.client();

    match command {
        Command::Login { username, password } => {
            let args = LoginReqArgs::new(username, password.into());
            match receive(session.login(args, no_cb)).await? {
                LoginOutcome::Success => print_json(out, &*session.require_user()?),
                LoginOutcome::Failed(msg) => bail!(msg),
            }
        }
        Command::Logout => {
            session.logout();
            print_json(out, &serde_json::json!({ "logged_out": true }))
        }
        Command::Whoami => print_json(out, &*session.require_user()?),
        Command::Register {
            username,
            email,
            password,
            password_confirm,
            first_name,
            last_name,
            phone_number,
            role,
        } => {
            let mut args = RegisterReqArgs::new(username, email, password.into())
                .name(first_name, last_name)
                .phone_number(phone_number)
                .role(role);
            if let Some(password_confirm) = password_confirm {
                args = args.password_confirm(password_confirm.into());
            }
            match receive(session.register(&args, no_cb)).await? {
                RegisterOutcome::Created(user) => print_json(out, &user),
                RegisterOutcome::Failed(msg) => bail!(msg),
            }
        }
        Command::Rooms => {
            let available = receive(client.available_rooms(no_cb)).await??;
            let allocations = receive(client.active_allocations(no_cb)).await??;
            print_json(
                out,
                &serde_json::json!({
                    "available": available,
                    "active_allocations": allocations,
                }),
            )
        }
        Command::Students => print_json(out, &receive(client.list_students(no_cb)).await??),
        Command::Notices => print_json(out, &receive(client.list_notices(no_cb)).await??),
        Command::Complaints => print_json(out, &receive(client.list_complaints(no_cb)).await??),
        Command::Visitors => print_json(out, &receive(client.list_visitors(no_cb)).await??),
        Command::Maintenance => {
            print_json(out, &receive(client.list_maintenance(no_cb)).await??)
        }
        Command::Attendance => print_json(out, &receive(client.list_attendance(no_cb)).await??),
        Command::Payments => {
            let payments = receive(client.list_payments(no_cb)).await??;
            let pending = receive(client.pending_payments(no_cb)).await??;
            print_json(
                out,
                &serde_json::json!({ "payments": payments, "pending": pending }),
            )
        }
        Command::Dashboard => {
            let stats = receive(client.dashboard_stats(no_cb)).await??;
            let rooms = receive(client.room_stats(no_cb)).await??;
            let payments = receive(client.payment_stats(no_cb)).await??;
            print_json(
                out,
                &serde_json::json!({ "overview": stats, "rooms": rooms, "payments": payments }),
            )
        }
    }
}

/// Restores the session left by the previous command
async fn start_session(configuration: &Configuration) -> anyhow::Result<SessionManager> {
    let store = FileTokenStore::new(&configuration.storage.token_file);
    let client = Client::new(configuration.api.base_url.clone());
    let session = SessionManager::new(client, Arc::new(store));
    let status = receive(session.bootstrap(no_cb)).await?;
    info!(?status, "session started");
    Ok(session)
}

fn print_json<W: Write, T: Serialize>(out: &mut W, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value).context("failed to write output")?;
    writeln!(out).context("failed to write output")
}

/// The CLI waits on each result so there is nothing to notify
fn no_cb() {}

/// The sender is only dropped without a value if the request task died
async fn receive<T>(rx: oneshot::Receiver<T>) -> anyhow::Result<T> {
    rx.await.context("response channel closed without a result")
}
