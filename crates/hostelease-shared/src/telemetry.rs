//! Trace output shared by the CLI and the tests
//!
//! Spans and events are written as bunyan JSON lines. `RUST_LOG` overrides the
//! filter passed in by the caller.

use anyhow::Context;
use std::{
    fs::{create_dir_all, File},
    path::{Path, PathBuf},
};
use tracing::Subscriber;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_log::LogTracer;
use tracing_subscriber::{fmt::MakeWriter, layer::SubscriberExt, EnvFilter, Registry};

/// Folder trace files are written to, relative to the working directory
pub const TRACE_FOLDER: &str = "traces";

const TRACE_FILE_EXTENSION: &str = "log";

/// A newly created file for traces to be written to
#[derive(Debug)]
pub struct TraceFile {
    pub file: File,
    pub path: PathBuf,
}

/// Builds a subscriber that writes bunyan formatted JSON to `sink`
///
/// `default_filter` is used when `RUST_LOG` is unset or invalid, it takes
/// [`EnvFilter`] directives (for example `info` or `hostelease_client_core=debug`)
pub fn get_subscriber<Sink, S>(
    name: String,
    default_filter: S,
    sink: Sink,
) -> impl Subscriber + Sync + Send
where
    Sink: for<'a> MakeWriter<'a> + Send + Sync + 'static,
    S: AsRef<str>,
{
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    Registry::default()
        .with(filter)
        .with(JsonStorageLayer)
        .with(BunyanFormattingLayer::new(name, sink))
}

/// Installs `subscriber` for the whole process and routes `log` records to it
///
/// Fails if called a second time
pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send) -> anyhow::Result<()> {
    LogTracer::init().context("Failed to route log records to tracing")?;
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set global tracing subscriber")
}

/// Creates a timestamped trace file for `app_name` in [`TRACE_FOLDER`]
pub fn create_trace_file(app_name: &str) -> anyhow::Result<TraceFile> {
    create_trace_file_in(Path::new(TRACE_FOLDER), app_name)
}

/// Same as [`create_trace_file`] but in `folder`, which is created if missing
pub fn create_trace_file_in(folder: &Path, app_name: &str) -> anyhow::Result<TraceFile> {
    create_dir_all(folder)
        .with_context(|| format!("Failed to create trace folder: {folder:?}"))?;
    let path = folder.join(trace_file_name(app_name));
    let file =
        File::create(&path).with_context(|| format!("Failed to create trace file: {path:?}"))?;
    Ok(TraceFile { file, path })
}

fn trace_file_name(app_name: &str) -> String {
    let started = chrono::Local::now().format("%Y-%m-%dT%H-%M-%S");
    format!("{started}_{app_name}.{TRACE_FILE_EXTENSION}")
}
