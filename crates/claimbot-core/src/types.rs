//! Bounty records and claim request/response types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::reward::parse_reward;

/// Status value the marketplace uses for claimable bounties
pub const OPEN_STATUS: &str = "open";

/// Opaque bounty identifier
///
/// The marketplace serves ids as either JSON numbers or strings. The wire
/// representation is kept so that reported ids round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BountyId {
    Number(u64),
    /// Negative or fractional numeric id
    OtherNumber(serde_json::Number),
    Text(String),
}

impl std::fmt::Display for BountyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BountyId::Number(n) => write!(f, "{}", n),
            BountyId::OtherNumber(n) => write!(f, "{}", n),
            BountyId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<u64> for BountyId {
    fn from(id: u64) -> Self {
        BountyId::Number(id)
    }
}

impl From<&str> for BountyId {
    fn from(id: &str) -> Self {
        BountyId::Text(id.to_string())
    }
}

/// A bounty as listed by the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bounty {
    pub id: BountyId,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status: String,
    /// Fixed-point reward, 6 implied decimals
    #[serde(default, deserialize_with = "deserialize_reward")]
    pub reward: Option<String>,
    #[serde(default, deserialize_with = "deserialize_tags")]
    pub tags: Vec<String>,
}

impl Bounty {
    /// Reward in USDC
    pub fn reward_usdc(&self) -> f64 {
        parse_reward(self.reward.as_deref())
    }

    pub fn is_open(&self) -> bool {
        self.status == OPEN_STATUS
    }
}

// Rewards are documented as strings but some deployments send numbers.
fn deserialize_reward<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

// Null or non-string text becomes empty; an empty status never matches "open".
fn deserialize_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => s,
        _ => String::new(),
    })
}

// Non-string entries are dropped; a non-array value means no tags.
fn deserialize_tags<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(tag) => Some(tag),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// Body of a claim request
///
/// The bounty id travels in the URL path, not the body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimRequest {
    #[serde(skip)]
    pub bounty_id: BountyId,
    pub wallet: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ClaimRequest {
    /// Create a claim request; a blank claimer name is dropped
    pub fn new(bounty_id: BountyId, wallet: impl Into<String>, name: Option<String>) -> Self {
        Self {
            bounty_id,
            wallet: wallet.into(),
            name: name.filter(|n| !n.trim().is_empty()),
        }
    }
}

/// Outcome reported by the claim endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimResult {
    pub success: bool,
    pub message: String,
}

impl ClaimResult {
    pub const DEFAULT_SUCCESS_MESSAGE: &'static str = "Claimed";
    pub const DEFAULT_FAILURE_MESSAGE: &'static str = "Failed";

    /// Build a result from the HTTP outcome and the optional server message
    pub fn from_response(success: bool, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.is_empty()).unwrap_or_else(|| {
            if success {
                Self::DEFAULT_SUCCESS_MESSAGE.to_string()
            } else {
                Self::DEFAULT_FAILURE_MESSAGE.to_string()
            }
        });
        Self { success, message }
    }
}
