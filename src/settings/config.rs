use std::fs;
use std::path::Path;

use log::{debug, info};
use serde::Deserialize;

use crate::constants::{
    blackmatrix7_url, misha_tgshv_url, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT, PROXY_SYSTEM,
};
use crate::error::{Result, SyncError};
use crate::models::{BundleConfig, RuleSource};

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT
}

fn default_proxy() -> String {
    PROXY_SYSTEM.to_string()
}

fn default_local_rules() -> Vec<String> {
    vec![
        "rules/whitelist_direct.list".to_string(),
        "rules/greylist_proxy.list".to_string(),
    ]
}

fn default_bundle() -> BundleConfig {
    BundleConfig {
        path: "rules/google-gemini.list".to_string(),
        label: "Google + Gemini bundle".to_string(),
        members: vec![
            blackmatrix7_url("Google"),
            blackmatrix7_url("Gemini"),
            blackmatrix7_url("GoogleFCM"),
        ],
    }
}

fn default_sources() -> Vec<RuleSource> {
    vec![
        RuleSource::new(
            "rules/google.list",
            &blackmatrix7_url("Google"),
            "Upstream list from blackmatrix7",
        ),
        RuleSource::new(
            "rules/microsoft.list",
            &blackmatrix7_url("Microsoft"),
            "Upstream list from blackmatrix7 for MS365/Teams/Office",
        ),
        RuleSource::new(
            "rules/telegram.list",
            &blackmatrix7_url("Telegram"),
            "Upstream list from blackmatrix7",
        ),
        RuleSource::new(
            "rules/youtube.list",
            &blackmatrix7_url("YouTube"),
            "Upstream list from blackmatrix7",
        ),
        RuleSource::new(
            "rules/youtubemusic.list",
            &blackmatrix7_url("YouTubeMusic"),
            "Upstream list from blackmatrix7",
        ),
        RuleSource::new(
            "rules/domain_ips.list",
            &misha_tgshv_url("domain_ips.list"),
            "Upstream list from misha-tgshv",
        ),
        RuleSource::new(
            "rules/voice_ports.list",
            &misha_tgshv_url("voice_ports.list"),
            "Upstream list from misha-tgshv",
        ),
        RuleSource::new(
            "rules/gemini_ip.list",
            "",
            "Local list in this repo; keep manual control",
        ),
        RuleSource::new(
            "rules/russia_extended.list",
            "",
            "Local list in this repo; keep manual control",
        ),
    ]
}

/// The configuration table driving one sync run.
///
/// Built once at startup and passed to the syncer; nothing mutates it
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `SYSTEM`, `NONE` or an explicit proxy URL
    #[serde(default = "default_proxy")]
    pub proxy: String,
    /// Manually curated lists that are announced and never touched
    #[serde(default = "default_local_rules")]
    pub local_rules: Vec<String>,
    #[serde(default = "default_bundle")]
    pub bundle: BundleConfig,
    #[serde(default = "default_sources")]
    pub sources: Vec<RuleSource>,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            proxy: default_proxy(),
            local_rules: default_local_rules(),
            bundle: default_bundle(),
            sources: default_sources(),
        }
    }
}

impl SyncSettings {
    /// Parse settings from TOML content; keys that are absent keep their
    /// built-in values
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: SyncSettings = toml::from_str(content)
            .map_err(|e| SyncError::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading settings from {}", path.display());
        let content = fs::read_to_string(path).map_err(|e| SyncError::io(path, e))?;
        Self::from_toml(&content)
    }

    /// Settings from `path` when given, the built-in table otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => {
                debug!("Using built-in settings");
                let settings = Self::default();
                settings.validate()?;
                Ok(settings)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(SyncError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.bundle.members.is_empty() {
            return Err(SyncError::Config(format!(
                "bundle '{}' has no members",
                self.bundle.path
            )));
        }

        let paths = self
            .local_rules
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(self.bundle.path.as_str()))
            .chain(self.sources.iter().map(|source| source.path.as_str()));
        for path in paths {
            if path.trim().is_empty() {
                return Err(SyncError::Config("empty rule list path".to_string()));
            }
            if Path::new(path).is_absolute() {
                return Err(SyncError::Config(format!(
                    "rule list path must be relative to the repository root: {}",
                    path
                )));
            }
        }

        Ok(())
    }
}
