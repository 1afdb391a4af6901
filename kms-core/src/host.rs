use std::fmt::{Display, Formatter};
use std::ops::Deref;

use serde::{Deserialize, Serialize};

/// Scheme prefixes stripped from configured endpoints before they are compared.
pub const SCHEMES: [&'static str; 2] = ["https://", "http://"];

/// A cluster node address with its scheme stripped.
///
/// Two endpoints name the same node iff their hosts are equal, so every `Host` is
/// normalized on construction, including when it is decoded from a server response.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Host(String);

impl Host {
    pub fn normalize(endpoint: &str) -> Self {
        let endpoint = endpoint.trim();
        let host = SCHEMES
            .iter()
            .find_map(|scheme| endpoint.strip_prefix(scheme))
            .unwrap_or(endpoint);
        let host = host.strip_suffix('/').unwrap_or(host);
        Self(host.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Host {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl Display for Host {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Host {
    fn from(value: &str) -> Self {
        Host::normalize(value)
    }
}

impl From<String> for Host {
    fn from(value: String) -> Self {
        Host::normalize(&value)
    }
}

impl From<Host> for String {
    fn from(value: Host) -> Self {
        value.0
    }
}
