use anyhow::bail;
use hostelease_shared::telemetry;

use crate::cli::Cli;

const TRACE_NAME: &str = "hostelease_cli";

/// Starts tracing to a file under the traces folder or to stderr if requested
///
/// Falls back to stderr if the file cannot be created. Stdout is left for the
/// command output.
pub fn init(cli: &Cli) -> anyhow::Result<()> {
    fn init_to_file() -> anyhow::Result<()> {
        let trace_file = telemetry::create_trace_file(TRACE_NAME)?;
        let subscriber = telemetry::get_subscriber(TRACE_NAME.into(), "info", trace_file.file);

        // Start logging to file
        match telemetry::init_subscriber(subscriber) {
            Ok(_) => {
                eprintln!("Tracing started to file {:?}", trace_file.path);
                Ok(())
            }
            Err(e) => {
                bail!("Failed to start tracing to file. Error: {e}");
            }
        }
    }

    if !cli.is_to_std_out {
        match init_to_file() {
            Ok(_) => return Ok(()),
            Err(e) => {
                // Print error and fall though to logging to stderr
                eprintln!("Failed to start logging to file: {e}");
            }
        }
    }

    match tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .try_init()
    {
        Ok(_) => Ok(()),
        Err(e) => {
            bail!("Failed to start tracing. Error: {e}");
        }
    }
}
