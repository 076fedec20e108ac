use anyhow::Context as _;
use hostelease_shared::const_config::client::CLIENT_DEFAULT_BASE_URL;
use std::path::{Path, PathBuf};

const DEFAULT_TOKEN_FILE: &str = "hostelease_tokens.ron";

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Configuration {
    pub api: ApiSettings,
    pub storage: StorageSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    /// Root of the API, must end with `/`
    pub base_url: String,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct StorageSettings {
    pub token_file: PathBuf,
}

/// Loads the configuration from the `configuration` folder in the current
/// directory, the files are optional and the defaults point at a local API
pub fn get_configuration() -> anyhow::Result<Configuration> {
    let base_path = std::env::current_dir().context("failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("failed to parse APP_ENVIRONMENT")?;

    build_configuration(&configuration_directory, environment)
}

/// Layers the base file, the environment's file and then `APP_` prefixed
/// environment variables
///
/// For example `APP_API__BASE_URL` sets `Configuration.api.base_url`
pub fn build_configuration(
    configuration_directory: &Path,
    environment: Environment,
) -> anyhow::Result<Configuration> {
    let environment_filename = format!("{}.toml", environment.as_str());
    let settings = config::Config::builder()
        .set_default("api.base_url", CLIENT_DEFAULT_BASE_URL)?
        .set_default("storage.token_file", DEFAULT_TOKEN_FILE)?
        .add_source(
            config::File::from(configuration_directory.join("base.toml")).required(false),
        )
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .context("failed to build configuration")?;

    settings
        .try_deserialize::<Configuration>()
        .context("failed to deserialize configuration")
}

/// The possible runtime environment for our application.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{other} is not a supported environment. Use either `local` or `production`."
            )),
        }
    }
}
