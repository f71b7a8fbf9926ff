use serde::{Deserialize, Serialize};

use crate::domain::service::ServiceConfig;

/// Configuration for the org_admin module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrgAdminConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: u64,
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    #[serde(default = "default_max_name_length")]
    pub max_name_length: usize,
}

impl Default for OrgAdminConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            max_name_length: default_max_name_length(),
        }
    }
}

impl From<&OrgAdminConfig> for ServiceConfig {
    fn from(cfg: &OrgAdminConfig) -> Self {
        Self {
            max_name_length: cfg.max_name_length,
            default_page_size: cfg.default_page_size,
            max_page_size: cfg.max_page_size.max(1),
        }
    }
}

fn default_page_size() -> u64 {
    50
}

fn default_max_page_size() -> u64 {
    1000
}

fn default_max_name_length() -> usize {
    100
}
