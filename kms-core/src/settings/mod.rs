use std::path::Path;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use crate::settings::duration::ConfigDuration;
use crate::KMS_CONFIG;

pub mod duration;

#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder)]
pub struct Settings {
    #[builder(default)]
    pub endpoints: Vec<String>,
    #[serde(rename = "api-key")]
    #[builder(default, setter(into))]
    pub api_key: String,
    /// Scheme of every request. Endpoints are reduced to hosts, so their own scheme is ignored.
    #[builder(default = "https".to_string(), setter(into))]
    pub scheme: String,
    #[serde(rename = "insecure-skip-verify")]
    #[builder(default)]
    pub insecure_skip_verify: bool,
    #[serde(rename = "request-timeout")]
    #[builder(default = ConfigDuration::from_secs(10))]
    pub request_timeout: ConfigDuration,
    #[serde(rename = "join-timeout")]
    #[builder(default = ConfigDuration::from_mins(1))]
    pub join_timeout: ConfigDuration,
}

impl Settings {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let settings: Self = config.get("kms")?;
        Ok(settings)
    }

    /// Builder seeded with the embedded reference configuration.
    pub fn reference() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(KMS_CONFIG, FileFormat::Toml))
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = Self::reference();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }
        Self::new(&builder.build()?)
    }
}
