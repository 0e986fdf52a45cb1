//! Application settings loaded from the environment.
//!
//! These are the service-side equivalents of the dashboard's
//! `NEXT_PUBLIC_*` variables: `OVT_PROGRAM_ID`, `OVT_TREASURY_ADDRESS`,
//! `OVT_ARCH_ENDPOINT`, and `OVT_MOCK_MODE`.

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

const ENV_PROGRAM_ID: &str = "OVT_PROGRAM_ID";
const ENV_TREASURY_ADDRESS: &str = "OVT_TREASURY_ADDRESS";
const ENV_ARCH_ENDPOINT: &str = "OVT_ARCH_ENDPOINT";
const ENV_MOCK_MODE: &str = "OVT_MOCK_MODE";
const ENV_ADMIN_WALLETS: &str = "OVT_ADMIN_WALLETS";

const DEFAULT_ARCH_ENDPOINT: &str = "http://localhost:9002";
const MOCK_PROGRAM_ID: &str = "ovt-mock-program";
const MOCK_TREASURY_ADDRESS: &str = "tb1qmock0treasury0address0000000000000000";

/// Mock-mode admin registry, one address per registry slot.
const MOCK_ADMIN_WALLETS: [&str; 5] = [
    "tb1qadmin0one0000000000000000000000000000",
    "tb1qadmin0two0000000000000000000000000000",
    "tb1qadmin0three00000000000000000000000000",
    "tb1qadmin0four000000000000000000000000000",
    "tb1qadmin0five000000000000000000000000000",
];

/// Runtime configuration of the fund service.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub program_id: String,
    pub treasury_address: String,
    pub arch_endpoint: String,
    /// Addresses allowed to sign admin actions.
    pub admin_wallets: Vec<String>,
    /// When set, repositories are seeded from bundled fixtures and no
    /// on-chain program is contacted.
    pub mock_mode: bool,
}

impl AppSettings {
    /// Loads settings from process environment variables.
    ///
    /// Mock mode defaults to on, so a bare environment yields a runnable
    /// fixture-backed configuration. Outside mock mode the program id and
    /// treasury address are required.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mock_mode = match lookup(ENV_MOCK_MODE).as_deref() {
            None => true,
            Some("true") | Some("1") => true,
            Some("false") | Some("0") => false,
            Some(other) => {
                return Err(Error::InvalidConfigValue(format!(
                    "{}={} (expected true/false)",
                    ENV_MOCK_MODE, other
                )))
            }
        };

        let program_id = match lookup(ENV_PROGRAM_ID) {
            Some(value) => value,
            None if mock_mode => MOCK_PROGRAM_ID.to_string(),
            None => return Err(Error::MissingConfigKey(ENV_PROGRAM_ID.to_string())),
        };

        let treasury_address = match lookup(ENV_TREASURY_ADDRESS) {
            Some(value) => value,
            None if mock_mode => MOCK_TREASURY_ADDRESS.to_string(),
            None => return Err(Error::MissingConfigKey(ENV_TREASURY_ADDRESS.to_string())),
        };

        let arch_endpoint =
            lookup(ENV_ARCH_ENDPOINT).unwrap_or_else(|| DEFAULT_ARCH_ENDPOINT.to_string());

        let admin_wallets = match lookup(ENV_ADMIN_WALLETS) {
            Some(value) => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None if mock_mode => MOCK_ADMIN_WALLETS.iter().map(|s| s.to_string()).collect(),
            None => return Err(Error::MissingConfigKey(ENV_ADMIN_WALLETS.to_string())),
        };

        Ok(Self {
            program_id,
            treasury_address,
            arch_endpoint,
            admin_wallets,
            mock_mode,
        })
    }
}
