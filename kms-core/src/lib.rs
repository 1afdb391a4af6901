pub const KMS_CONFIG: &'static str = include_str!("../kms.toml");

pub mod client;
pub mod error;
pub mod ext;
pub mod host;
pub mod settings;
pub mod status;
