//! Link-status sources.
//!
//! A [`SignalSource`] yields the raw link-status text for a wireless
//! interface. Production code uses [`IwSource`], which shells out to the
//! `iw` tool; tests substitute a scripted source from [`crate::mock`].

use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use crate::error::{Error, Result};

static SIGNAL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"signal:\s*(-?\d+)\s*dBm").unwrap());

/// Raw link-status text for a wireless interface.
#[async_trait]
pub trait SignalSource: Send + Sync {
    /// Return the link-status output for `interface`.
    async fn link_status(&self, interface: &str) -> Result<String>;
}

/// Queries link status via `iw dev <interface> link`.
///
/// There is no timeout around the invocation: a hung query blocks the
/// task that asked for it until the tool exits.
#[derive(Debug, Default, Clone, Copy)]
pub struct IwSource;

#[async_trait]
impl SignalSource for IwSource {
    async fn link_status(&self, interface: &str) -> Result<String> {
        let output = Command::new("iw")
            .args(["dev", interface, "link"])
            .output()
            .await
            .map_err(|e| Error::LinkQuery {
                interface: interface.to_string(),
                reason: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(Error::LinkQuery {
                interface: interface.to_string(),
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Extract the signed dBm value from link-status output.
///
/// Matches the first `signal: <integer> dBm` occurrence; anything else in
/// the output is ignored.
pub fn parse_signal_dbm(output: &str, interface: &str) -> Result<i32> {
    let cap = SIGNAL_RE
        .captures(output)
        .ok_or_else(|| Error::SignalNotFound(interface.to_string()))?;
    cap[1]
        .parse::<i32>()
        .map_err(|_| Error::SignalNotFound(interface.to_string()))
}
