//! Billing flavor types and the exit-code mapping.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Billing flavor of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Flavor {
    /// Pay-as-you-go, billed through the marketplace
    #[serde(rename = "PAYG")]
    Payg,
    /// Bring-your-own-subscription
    #[serde(rename = "BYOS")]
    Byos,
}

impl Flavor {
    pub fn as_str(&self) -> &'static str {
        match self {
            Flavor::Payg => "PAYG",
            Flavor::Byos => "BYOS",
        }
    }

    /// Status code reported when this flavor was determined.
    pub fn determined_code(&self) -> StatusCode {
        match self {
            Flavor::Payg => StatusCode::DeterminedPayg,
            Flavor::Byos => StatusCode::DeterminedByos,
        }
    }
}

impl fmt::Display for Flavor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flavor {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PAYG" => Ok(Flavor::Payg),
            "BYOS" => Ok(Flavor::Byos),
            _ => Err(format!("Unknown flavor: {}", s)),
        }
    }
}

/// Process status code paired with a flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCode {
    DeterminedPayg,
    DeterminedByos,
    /// No authoritative answer, BYOS assumed
    Undetermined,
}

impl StatusCode {
    pub fn exit_code(&self) -> i32 {
        match self {
            StatusCode::DeterminedPayg => 10,
            StatusCode::DeterminedByos => 11,
            StatusCode::Undetermined => 12,
        }
    }
}

/// Why no authoritative answer could be obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndeterminedReason {
    /// Neither IPv4 nor IPv6 connectivity
    NoNetwork,
    /// Instance metadata or product identifier unavailable
    MissingEvidence,
    /// No update server address could be found
    NoAddresses,
}

/// Where the final flavor came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum OutcomeSource {
    UpdateServer { address: String },
    Cache,
    Undetermined { reason: UndeterminedReason },
}

/// Final result of one resolution run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorOutcome {
    pub flavor: Flavor,
    pub status: StatusCode,
    #[serde(flatten)]
    pub source: OutcomeSource,
}

impl FlavorOutcome {
    /// Answer given by an update server.
    pub fn from_server(flavor: Flavor, address: impl Into<String>) -> Self {
        Self {
            flavor,
            status: flavor.determined_code(),
            source: OutcomeSource::UpdateServer {
                address: address.into(),
            },
        }
    }

    /// Last known answer read back from the cache.
    pub fn from_cache(flavor: Flavor) -> Self {
        Self {
            flavor,
            status: flavor.determined_code(),
            source: OutcomeSource::Cache,
        }
    }

    /// No answer; BYOS is assumed.
    pub fn undetermined(reason: UndeterminedReason) -> Self {
        Self {
            flavor: Flavor::Byos,
            status: StatusCode::Undetermined,
            source: OutcomeSource::Undetermined { reason },
        }
    }

    pub fn exit_code(&self) -> i32 {
        self.status.exit_code()
    }
}
