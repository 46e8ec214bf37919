//! Local file locations consulted during a run

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Paths of the files the checker reads and writes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Registration client config holding `[instance] dataProvider`
    pub region_client_config: PathBuf,
    /// Product definition holding the OS identifier
    pub base_product: PathBuf,
    pub hosts: PathBuf,
    pub proxy_config: PathBuf,
    /// Last determined flavor
    pub cache: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            region_client_config: PathBuf::from("/etc/regionserverclnt.cfg"),
            base_product: PathBuf::from("/etc/products.d/baseproduct"),
            hosts: PathBuf::from("/etc/hosts"),
            proxy_config: PathBuf::from("/etc/sysconfig/proxy"),
            cache: PathBuf::from("/var/cache/instance-flavor-check/flavor"),
        }
    }
}
