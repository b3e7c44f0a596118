//! Run configuration
//!
//! Operator input arrives as loosely-typed strings (flags or `INPUT_*`
//! environment variables) and optionally as a TOML file. [`RunInputs::resolve`]
//! merges both over the defaults and normalises them into a [`ClaimConfig`].
//!
//! Precedence: explicit input, then config file, then defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::filter::FilterCriteria;
use crate::{ClaimError, Result};

/// Marketplace used when no `api_url` is configured
pub const DEFAULT_API_URL: &str = "https://bounty.owockibot.xyz";

const DEFAULT_MAX_CLAIMS: usize = 1;
const DEFAULT_CLAIM_DELAY_MS: u64 = 1000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Optional configuration file, usually `claimbot.toml`
///
/// Every key is optional; missing keys fall through to defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClaimConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,

    #[serde(default)]
    pub wallet_address: Option<String>,

    #[serde(default)]
    pub claimer_name: Option<String>,

    /// Comma-separated tag filter
    #[serde(default)]
    pub tags: Option<String>,

    /// Minimum reward in USDC
    #[serde(default)]
    pub min_reward: Option<f64>,

    #[serde(default)]
    pub max_claims: Option<i64>,

    #[serde(default)]
    pub dry_run: Option<bool>,

    /// Pause between consecutive claims, in milliseconds
    #[serde(default)]
    pub claim_delay_ms: Option<u64>,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

impl ClaimConfigFile {
    /// Load a config file from `path`
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            ClaimError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })
    }

    /// Load the file when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Raw operator inputs, exactly as supplied
///
/// Empty strings are treated the same as absent values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunInputs {
    pub api_url: Option<String>,
    pub wallet_address: Option<String>,
    pub claimer_name: Option<String>,
    pub tags: Option<String>,
    pub min_reward: Option<String>,
    pub max_claims: Option<String>,
    pub dry_run: Option<String>,
}

impl RunInputs {
    /// Merge with the config file and defaults into a validated config
    pub fn resolve(self, file: &ClaimConfigFile) -> Result<ClaimConfig> {
        let wallet_address = non_empty(self.wallet_address)
            .or_else(|| non_empty(file.wallet_address.clone()))
            .ok_or_else(|| {
                ClaimError::Config("Input required and not supplied: wallet_address".to_string())
            })?;

        let api_url = non_empty(self.api_url)
            .or_else(|| non_empty(file.api_url.clone()))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let claimer_name =
            non_empty(self.claimer_name).or_else(|| non_empty(file.claimer_name.clone()));

        let tags = non_empty(self.tags)
            .or_else(|| file.tags.clone())
            .unwrap_or_default();

        let min_reward = match non_empty(self.min_reward) {
            Some(raw) => parse_min_reward(&raw),
            None => file.min_reward.filter(|v| v.is_finite()).unwrap_or(0.0),
        };

        let max_claims = match non_empty(self.max_claims) {
            Some(raw) => parse_max_claims(&raw),
            None => file
                .max_claims
                .map(positive_or_default)
                .unwrap_or(DEFAULT_MAX_CLAIMS),
        };

        let dry_run = match non_empty(self.dry_run) {
            Some(raw) => raw == "true",
            None => file.dry_run.unwrap_or(false),
        };

        Ok(ClaimConfig {
            api_url,
            wallet_address,
            claimer_name,
            criteria: FilterCriteria::new(&tags, min_reward),
            max_claims,
            dry_run,
            claim_delay: Duration::from_millis(
                file.claim_delay_ms.unwrap_or(DEFAULT_CLAIM_DELAY_MS),
            ),
            request_timeout: Duration::from_secs(
                file.request_timeout_secs
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
        })
    }
}

/// Fully resolved configuration for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimConfig {
    /// Marketplace base URL, injected into the HTTP client
    pub api_url: String,
    /// Wallet every claim in the run is made for
    pub wallet_address: String,
    pub claimer_name: Option<String>,
    pub criteria: FilterCriteria,
    /// Upper bound on claims attempted, always at least 1
    pub max_claims: usize,
    /// Fetch and filter only, never claim
    pub dry_run: bool,
    /// Pause between consecutive claim requests
    pub claim_delay: Duration,
    pub request_timeout: Duration,
}

impl ClaimConfig {
    /// Defaults for everything except the wallet
    pub fn new(wallet_address: impl Into<String>) -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            wallet_address: wallet_address.into(),
            claimer_name: None,
            criteria: FilterCriteria::default(),
            max_claims: DEFAULT_MAX_CLAIMS,
            dry_run: false,
            claim_delay: Duration::from_millis(DEFAULT_CLAIM_DELAY_MS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn with_claimer_name(mut self, name: impl Into<String>) -> Self {
        self.claimer_name = Some(name.into());
        self
    }

    pub fn with_criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Set the claim bound; zero is raised to 1
    pub fn with_max_claims(mut self, max_claims: usize) -> Self {
        self.max_claims = max_claims.max(1);
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_claim_delay(mut self, delay: Duration) -> Self {
        self.claim_delay = delay;
        self
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_min_reward(raw: &str) -> f64 {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// Integer input wins; a decimal like "2.7" truncates to 2.
fn parse_max_claims(raw: &str) -> usize {
    let parsed = raw.parse::<i64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    });
    parsed.map(positive_or_default).unwrap_or(DEFAULT_MAX_CLAIMS)
}

fn positive_or_default(value: i64) -> usize {
    if value > 0 {
        value as usize
    } else {
        DEFAULT_MAX_CLAIMS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn inputs(wallet: &str) -> RunInputs {
        RunInputs {
            wallet_address: Some(wallet.to_string()),
            ..RunInputs::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = inputs("0xabc").resolve(&ClaimConfigFile::default()).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.wallet_address, "0xabc");
        assert_eq!(config.claimer_name, None);
        assert!(config.criteria.tags.is_empty());
        assert_eq!(config.criteria.min_reward, 0.0);
        assert_eq!(config.max_claims, 1);
        assert!(!config.dry_run);
        assert_eq!(config.claim_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_missing_wallet_is_config_error() {
        let err = RunInputs::default()
            .resolve(&ClaimConfigFile::default())
            .unwrap_err();
        assert!(matches!(err, ClaimError::Config(_)));

        let blank = inputs("   ").resolve(&ClaimConfigFile::default());
        assert!(blank.is_err());
    }

    #[test]
    fn test_lenient_numeric_inputs() {
        let mut raw = inputs("0xabc");
        raw.min_reward = Some("abc".to_string());
        raw.max_claims = Some("lots".to_string());
        let config = raw.resolve(&ClaimConfigFile::default()).unwrap();
        assert_eq!(config.criteria.min_reward, 0.0);
        assert_eq!(config.max_claims, 1);

        let mut raw = inputs("0xabc");
        raw.min_reward = Some("2.5".to_string());
        raw.max_claims = Some("3".to_string());
        let config = raw.resolve(&ClaimConfigFile::default()).unwrap();
        assert_eq!(config.criteria.min_reward, 2.5);
        assert_eq!(config.max_claims, 3);
    }

    #[test]
    fn test_non_positive_max_claims_defaults_to_one() {
        for raw_value in ["0", "-4", "0.5"] {
            let mut raw = inputs("0xabc");
            raw.max_claims = Some(raw_value.to_string());
            let config = raw.resolve(&ClaimConfigFile::default()).unwrap();
            assert_eq!(config.max_claims, 1, "max_claims={}", raw_value);
        }

        let mut raw = inputs("0xabc");
        raw.max_claims = Some("2.7".to_string());
        assert_eq!(raw.resolve(&ClaimConfigFile::default()).unwrap().max_claims, 2);
    }

    #[test]
    fn test_dry_run_requires_exact_true() {
        for (value, expected) in [("true", true), ("TRUE", false), ("yes", false), ("false", false)] {
            let mut raw = inputs("0xabc");
            raw.dry_run = Some(value.to_string());
            let config = raw.resolve(&ClaimConfigFile::default()).unwrap();
            assert_eq!(config.dry_run, expected, "dry_run={}", value);
        }
    }

    #[test]
    fn test_inputs_override_file() {
        let file = ClaimConfigFile {
            api_url: Some("http://file.example".to_string()),
            wallet_address: Some("0xfile".to_string()),
            tags: Some("python".to_string()),
            max_claims: Some(5),
            dry_run: Some(true),
            ..ClaimConfigFile::default()
        };

        let mut raw = inputs("0xflag");
        raw.tags = Some("Rust".to_string());
        raw.dry_run = Some("false".to_string());
        let config = raw.resolve(&file).unwrap();

        assert_eq!(config.api_url, "http://file.example");
        assert_eq!(config.wallet_address, "0xflag");
        assert_eq!(config.criteria.tags, vec!["rust"]);
        assert_eq!(config.max_claims, 5);
        assert!(!config.dry_run);
    }

    #[test]
    fn test_empty_input_falls_through_to_file() {
        let file = ClaimConfigFile {
            wallet_address: Some("0xfile".to_string()),
            ..ClaimConfigFile::default()
        };
        let raw = RunInputs {
            wallet_address: Some(String::new()),
            ..RunInputs::default()
        };
        assert_eq!(raw.resolve(&file).unwrap().wallet_address, "0xfile");
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
api_url = "http://localhost:8080"
wallet_address = "0xtoml"
tags = "rust,docs"
min_reward = 10.0
max_claims = 2
claim_delay_ms = 250
"#
        )
        .unwrap();

        let loaded = ClaimConfigFile::load(file.path()).unwrap();
        assert_eq!(loaded.wallet_address.as_deref(), Some("0xtoml"));
        assert_eq!(loaded.max_claims, Some(2));

        let config = RunInputs::default().resolve(&loaded).unwrap();
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.criteria.tags, vec!["rust", "docs"]);
        assert_eq!(config.criteria.min_reward, 10.0);
        assert_eq!(config.claim_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_claims = \"many\"").unwrap();
        let err = ClaimConfigFile::load(file.path()).unwrap_err();
        assert!(matches!(err, ClaimError::Config(_)));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(
            ClaimConfigFile::load_or_default(None).unwrap(),
            ClaimConfigFile::default()
        );
    }

    #[test]
    fn test_builder_clamps_max_claims() {
        let config = ClaimConfig::new("0xabc").with_max_claims(0);
        assert_eq!(config.max_claims, 1);
    }
}
