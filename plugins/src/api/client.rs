use std::sync::RwLock;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use polctl_core::api::ApiConfig;

use super::{parse_peer, PolicyApi, PolicyPeer};

const POLICIES_PATH: &str = "/v1/policies";

/// HTTP client for the policy controller.
///
/// The API key lives behind a lock so `initialize` can refresh it from the
/// environment before every dispatched command without rebuilding the client.
pub struct HttpPolicyClient {
    http: reqwest::Client,
    base_url: String,
    api_key: RwLock<Option<String>>,
}

#[derive(Deserialize)]
struct PoliciesPayload {
    #[serde(default)]
    policies: Vec<String>,
}

#[derive(Serialize)]
struct PeerPayload<'a> {
    peer: &'a str,
}

impl HttpPolicyClient {
    pub fn new(cfg: &ApiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(cfg.timeout_ms))
            .build()
            .context("failed to build http client")?;
        let api_key = (!cfg.api_key.is_empty()).then(|| cfg.api_key.clone());
        Ok(Self {
            http,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            api_key: RwLock::new(api_key),
        })
    }

    fn policies_url(&self) -> String {
        format!("{}{}", self.base_url, POLICIES_PATH)
    }

    fn authorized(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.api_key.read().unwrap().as_deref() {
            Some(key) => req.bearer_auth(key),
            None => req,
        }
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response> {
        let resp = self
            .authorized(req)
            .send()
            .await
            .context("request to policy controller failed")?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("policy controller returned {status}: {body}");
        }
        Ok(resp)
    }

    fn refresh_credentials(&self, get: impl Fn(&str) -> Option<String>) {
        if let Some(key) = get("POLCTL_API_KEY") {
            if !key.trim().is_empty() {
                *self.api_key.write().unwrap() = Some(key);
            }
        }
    }
}

#[async_trait]
impl PolicyApi for HttpPolicyClient {
    fn name(&self) -> &str {
        "policy_controller"
    }

    async fn list(&self) -> Result<Vec<PolicyPeer>> {
        let resp = self.send(self.http.get(self.policies_url())).await?;
        let payload: PoliciesPayload = resp
            .json()
            .await
            .context("malformed policy list from controller")?;

        let mut peers = Vec::with_capacity(payload.policies.len());
        for entry in payload.policies {
            match parse_peer(&entry) {
                Ok(peer) => peers.push(peer),
                Err(_) => tracing::warn!(%entry, "skipping malformed policy entry"),
            }
        }
        Ok(peers)
    }

    async fn create(&self, peer: &PolicyPeer) -> Result<()> {
        let wire = peer.to_string();
        self.send(
            self.http
                .post(self.policies_url())
                .json(&PeerPayload { peer: &wire }),
        )
        .await?;
        tracing::debug!(peer = %wire, "created policy");
        Ok(())
    }

    async fn delete(&self, peer: &PolicyPeer) -> Result<()> {
        let wire = peer.to_string();
        self.send(
            self.http
                .delete(self.policies_url())
                .query(&[("peer", wire.as_str())]),
        )
        .await?;
        tracing::debug!(peer = %wire, "deleted policy");
        Ok(())
    }

    /// Re-read credentials from the environment. Runs before every dispatched
    /// command, so it stays cheap and idempotent.
    async fn initialize(&self) -> Result<()> {
        self.refresh_credentials(|key| std::env::var(key).ok());
        Ok(())
    }
}
