mod client;

pub use client::HttpPolicyClient;

use anyhow::Result;
use async_trait::async_trait;

/// One allowed connection between two containers, `source` may talk to
/// `target`. Wire form is `"SOURCE:TARGET"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyPeer {
    pub source: String,
    pub target: String,
}

impl std::fmt::Display for PolicyPeer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.source, self.target)
    }
}

/// Parse the wire form, rejecting anything that is not exactly two
/// non-empty names around a single colon.
pub fn parse_peer(s: &str) -> Result<PolicyPeer> {
    match s.split(':').collect::<Vec<_>>()[..] {
        [source, target] if !source.is_empty() && !target.is_empty() => Ok(PolicyPeer {
            source: source.to_string(),
            target: target.to_string(),
        }),
        _ => anyhow::bail!("invalid peer {s:?} (expected CONTAINER:CONTAINER)"),
    }
}

/// The policy controller as the command handlers see it.
///
/// `initialize` is the optional setup capability the dispatch engine runs
/// before every resolved command; implementations must keep it idempotent
/// and cheap. The default does nothing.
#[async_trait]
pub trait PolicyApi: Send + Sync {
    fn name(&self) -> &str;

    async fn list(&self) -> Result<Vec<PolicyPeer>>;

    async fn create(&self, peer: &PolicyPeer) -> Result<()>;

    async fn delete(&self, peer: &PolicyPeer) -> Result<()>;

    async fn initialize(&self) -> Result<()> {
        Ok(())
    }
}
