//! Scripted link-status source for testing.
//!
//! [`MockSource`] replays a fixed script of readings without touching any
//! real wireless hardware, so sampling behavior can be tested
//! deterministically (including failure substitution).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::source::SignalSource;

/// A [`SignalSource`] that replays a script of readings.
///
/// Each call consumes the next entry: `Some(dbm)` produces realistic `iw`
/// link output carrying that value, `None` simulates a failed query. An
/// exhausted script also fails, which keeps over-consuming tests loud.
pub struct MockSource {
    script: Mutex<VecDeque<Option<i32>>>,
}

impl MockSource {
    /// Create a source that replays `readings` in order.
    pub fn new(readings: Vec<Option<i32>>) -> Self {
        Self {
            script: Mutex::new(readings.into()),
        }
    }
}

#[async_trait]
impl SignalSource for MockSource {
    async fn link_status(&self, interface: &str) -> Result<String> {
        let next = self.script.lock().unwrap().pop_front();
        match next {
            Some(Some(dbm)) => Ok(format!(
                "Connected to d8:0d:17:2b:5a:f1 (on {interface})\n\
                 \tSSID: office-5g\n\
                 \tsignal: {dbm} dBm\n\
                 \trx bitrate: 866.7 MBit/s\n"
            )),
            Some(None) | None => Err(Error::LinkQuery {
                interface: interface.to_string(),
                reason: "scripted failure".to_string(),
            }),
        }
    }
}
