//! Wi-Fi link sampling for the sigmap survey service.
//!
//! This crate turns noisy repeated link-status readings into one robust
//! signal estimate. It drives the external `iw` tool (or any other
//! [`SignalSource`]) a configurable number of times with a fixed delay
//! between queries and reduces the collected dBm values with a median
//! filter, so a single bad reading cannot skew the stored estimate.
//!
//! # Example
//!
//! ```no_run
//! use sigmap_wifi::{IwSource, SampleOptions, Sampler};
//!
//! # async fn example() {
//! let sampler = Sampler::new(IwSource, "wlan0");
//! let dbm = sampler.sample(SampleOptions::default()).await;
//! println!("estimate: {dbm} dBm");
//! # }
//! ```

pub mod error;
pub mod mock;
pub mod sampler;
pub mod source;

pub use error::{Error, Result};
pub use sampler::{
    DEFAULT_INTERVAL_MS, DEFAULT_SAMPLES, FAILED_SAMPLE_DBM, SampleOptions, Sampler, median,
};
pub use source::{IwSource, SignalSource, parse_signal_dbm};
