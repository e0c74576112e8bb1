//! Application configuration
//!
//! Layered load: hard defaults, then an optional `config/default`
//! file, then an environment-specific file selected by
//! `HOSPITAL_ENV`, then `HOSPITAL_*` environment variables, and
//! finally command-line flags.

use std::fmt;

use clap::Parser;
use serde::Deserialize;

/// Root of the API when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/hospital/api";

/// Fixed `Authorization` header value. The API accepts this literal
/// (or a nurse's own id); it is not a real credential scheme.
pub const DEFAULT_AUTHORIZATION: &str = "admin";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    pub authorization: String,
    pub response_format: ResponseFormat,
}

/// Wire format negotiated with the API. Only JSON is implemented;
/// requests issued under `Xml` fail with an unsupported-format error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    Json,
    Xml,
}

impl ResponseFormat {
    /// Content type sent on requests and expected on responses.
    pub fn content_type(&self) -> String {
        format!("application/{self}")
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseFormat::Json => write!(f, "json"),
            ResponseFormat::Xml => write!(f, "xml"),
        }
    }
}

/// Command-line overrides for the layered configuration.
#[derive(Debug, Parser)]
#[command(name = "hospital-admin", about = "Administrative console for the hospital resource API")]
pub struct Cli {
    /// Root URL of the hospital API
    #[arg(long)]
    pub base_url: Option<String>,

    /// Value sent in the Authorization header
    #[arg(long)]
    pub authorization: Option<String>,

    /// Response format to negotiate with the API
    #[arg(long, value_enum)]
    pub format: Option<ResponseFormat>,
}

/// Load configuration from files and the environment, with CLI flags
/// taking precedence.
pub fn load(cli: &Cli) -> Result<Settings, config::ConfigError> {
    let env = std::env::var("HOSPITAL_ENV").unwrap_or_else(|_| "development".into());

    let mut builder = config::Config::builder()
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("authorization", DEFAULT_AUTHORIZATION)?
        .set_default("response_format", "json")?
        .add_source(config::File::with_name("config/default").required(false))
        .add_source(config::File::with_name(&format!("config/{env}")).required(false))
        .add_source(config::Environment::with_prefix("HOSPITAL"));

    if let Some(base_url) = &cli.base_url {
        builder = builder.set_override("base_url", base_url.as_str())?;
    }
    if let Some(authorization) = &cli.authorization {
        builder = builder.set_override("authorization", authorization.as_str())?;
    }
    if let Some(format) = cli.format {
        builder = builder.set_override("response_format", format.to_string())?;
    }

    builder.build()?.try_deserialize()
}
