use std::fmt::{Debug, Formatter};

use anyhow::{bail, Context};
use async_trait::async_trait;
use rand::Rng;
use reqwest::{Method, Response};
use tracing::{debug, warn};
use url::Url;

use kms_core::client::ClusterClient;
use kms_core::error::KmsError;
use kms_core::host::Host;
use kms_core::settings::Settings;
use kms_core::status::ClusterStatus;

use crate::wire::{error_message, AddNodeRequest, CLUSTER_ADD_PATH, CLUSTER_STATUS_PATH};

/// [`ClusterClient`] talking to KMS servers over HTTP.
///
/// Each request starts at a random host of the target set and moves on to the next one
/// only when the connection cannot be established. A server that answers with an error
/// status ends the request.
///
/// Hosts carry no scheme, so every request uses the scheme from [`Settings`], whatever scheme
/// the endpoint was configured with.
#[derive(Clone)]
pub struct HttpClient {
    inner: reqwest::Client,
    scheme: String,
    api_key: Option<String>,
}

impl Debug for HttpClient {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

impl HttpClient {
    pub fn new(settings: &Settings) -> anyhow::Result<Self> {
        match settings.scheme.as_str() {
            "https" | "http" => {}
            scheme => bail!("unsupported scheme {}, expected https or http", scheme),
        }
        let inner = reqwest::Client::builder()
            .timeout(settings.request_timeout.to_std_duration())
            .danger_accept_invalid_certs(settings.insecure_skip_verify)
            .build()
            .context("cannot build http client")?;
        let api_key = if settings.api_key.is_empty() {
            None
        } else {
            Some(settings.api_key.clone())
        };
        let client = Self {
            inner,
            scheme: settings.scheme.clone(),
            api_key,
        };
        Ok(client)
    }

    fn url(&self, host: &Host, path: &str) -> anyhow::Result<Url> {
        let base = Url::parse(&format!("{}://{}", self.scheme, host))
            .map_err(|_| KmsError::InvalidEndpoint(host.to_string()))?;
        Ok(base.join(path)?)
    }

    async fn execute(
        &self,
        hosts: &[Host],
        method: Method,
        path: &str,
        body: Option<&AddNodeRequest>,
    ) -> anyhow::Result<Response> {
        if hosts.is_empty() {
            return Err(KmsError::NoHosts.into());
        }
        let start = rand::thread_rng().gen_range(0..hosts.len());
        let mut last_error = None;
        for host in hosts.iter().cycle().skip(start).take(hosts.len()) {
            let url = self.url(host, path)?;
            debug!("{} {}", method, url);
            let mut request = self.inner.request(method.clone(), url);
            if let Some(api_key) = &self.api_key {
                request = request.bearer_auth(api_key);
            }
            if let Some(body) = body {
                request = request.json(body);
            }
            match request.send().await {
                Ok(response) => return Self::check(host, response).await,
                Err(error) if error.is_connect() => {
                    warn!("cannot connect to {}: {}", host, error);
                    last_error = Some(error);
                }
                Err(error) => return Err(error.into()),
            }
        }
        match last_error {
            Some(error) => Err(error.into()),
            None => Err(KmsError::NoHosts.into()),
        }
    }

    async fn check(host: &Host, response: Response) -> anyhow::Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let error = KmsError::UnexpectedStatus {
            host: host.clone(),
            status: status.as_u16(),
            message: error_message(response.text().await),
        };
        Err(error.into())
    }
}

#[async_trait]
impl ClusterClient for HttpClient {
    async fn cluster_status(&self, hosts: &[Host]) -> anyhow::Result<ClusterStatus> {
        let response = self
            .execute(hosts, Method::GET, CLUSTER_STATUS_PATH, None)
            .await?;
        let status = response.json::<ClusterStatus>().await?;
        Ok(status)
    }

    async fn add_node(&self, hosts: &[Host], node: &Host) -> anyhow::Result<()> {
        let request = AddNodeRequest { host: node.clone() };
        self.execute(hosts, Method::POST, CLUSTER_ADD_PATH, Some(&request))
            .await?;
        Ok(())
    }
}
