//! Sampling pipeline: repeated link queries reduced to one estimate.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::source::{SignalSource, parse_signal_dbm};

/// Substituted for a sample when the link query or parse fails.
pub const FAILED_SAMPLE_DBM: i32 = -999;

/// Sample count used when the requested count is not positive.
pub const DEFAULT_SAMPLES: u32 = 5;

/// Inter-sample delay used when the requested interval is not positive.
pub const DEFAULT_INTERVAL_MS: u64 = 500;

/// Requested sampling parameters.
///
/// Non-positive values fall back to [`DEFAULT_SAMPLES`] and
/// [`DEFAULT_INTERVAL_MS`], so a zeroed request body samples with the
/// standard settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct SampleOptions {
    /// Number of samples to collect.
    pub samples: i32,
    /// Delay between consecutive samples, in milliseconds.
    pub interval_ms: i64,
}

impl SampleOptions {
    /// Effective sample count.
    #[must_use]
    pub fn effective_samples(&self) -> u32 {
        if self.samples <= 0 {
            DEFAULT_SAMPLES
        } else {
            self.samples as u32
        }
    }

    /// Effective inter-sample delay.
    #[must_use]
    pub fn effective_interval(&self) -> Duration {
        if self.interval_ms <= 0 {
            Duration::from_millis(DEFAULT_INTERVAL_MS)
        } else {
            Duration::from_millis(self.interval_ms as u64)
        }
    }
}

/// Drives repeated link queries against a [`SignalSource`] and reduces
/// them to a single dBm estimate.
///
/// Sampling is strictly sequential: one query at a time, with the
/// configured delay between queries, so invocations of the external tool
/// never overlap. A failed query contributes [`FAILED_SAMPLE_DBM`] to the
/// sample set instead of aborting the run.
pub struct Sampler {
    source: Box<dyn SignalSource>,
    interface: String,
}

impl Sampler {
    /// Create a sampler for the given interface.
    pub fn new(source: impl SignalSource + 'static, interface: impl Into<String>) -> Self {
        Self {
            source: Box::new(source),
            interface: interface.into(),
        }
    }

    /// The interface this sampler queries.
    #[must_use]
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Collect samples per `opts` and return their median.
    pub async fn sample(&self, opts: SampleOptions) -> i32 {
        let n = opts.effective_samples();
        let interval = opts.effective_interval();

        let mut readings = Vec::with_capacity(n as usize);
        for i in 0..n {
            let dbm = match self.source.link_status(&self.interface).await {
                Ok(output) => match parse_signal_dbm(&output, &self.interface) {
                    Ok(dbm) => dbm,
                    Err(e) => {
                        warn!("Substituting failed sample on {}: {}", self.interface, e);
                        FAILED_SAMPLE_DBM
                    }
                },
                Err(e) => {
                    warn!("Substituting failed sample on {}: {}", self.interface, e);
                    FAILED_SAMPLE_DBM
                }
            };

            debug!(
                "Sample {}/{} on {}: {} dBm",
                i + 1,
                n,
                self.interface,
                dbm
            );
            readings.push(dbm);

            if i + 1 < n {
                sleep(interval).await;
            }
        }

        median(&readings)
    }
}

/// Median of a sample set.
///
/// Sorts ascending; odd-length sets yield the middle element, even-length
/// sets the integer average of the two middle elements with truncating
/// (toward-zero) division.
#[must_use]
pub fn median(values: &[i32]) -> i32 {
    if values.is_empty() {
        return 0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_unstable();

    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockSource;

    #[test]
    fn test_median_odd() {
        assert_eq!(median(&[-70, -65, -999]), -70);
        assert_eq!(median(&[-50]), -50);
        assert_eq!(median(&[-80, -60, -70, -65, -75]), -70);
    }

    #[test]
    fn test_median_even_truncates_toward_zero() {
        // (-81 + -80) / 2 = -161 / 2 truncates to -80, not -81.
        assert_eq!(median(&[-81, -80]), -80);
        assert_eq!(median(&[-70, -60, -65, -75]), -67);
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median(&[]), 0);
    }

    #[test]
    fn test_sample_options_defaults() {
        let opts = SampleOptions::default();
        assert_eq!(opts.effective_samples(), DEFAULT_SAMPLES);
        assert_eq!(
            opts.effective_interval(),
            Duration::from_millis(DEFAULT_INTERVAL_MS)
        );

        let negative = SampleOptions {
            samples: -3,
            interval_ms: -100,
        };
        assert_eq!(negative.effective_samples(), DEFAULT_SAMPLES);
        assert_eq!(
            negative.effective_interval(),
            Duration::from_millis(DEFAULT_INTERVAL_MS)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_query_substitutes_sentinel() {
        let sampler = Sampler::new(
            MockSource::new(vec![Some(-70), Some(-65), None]),
            "wlan0",
        );
        let dbm = sampler
            .sample(SampleOptions {
                samples: 3,
                interval_ms: 100,
            })
            .await;

        // Sorted samples are [-999, -70, -65]; the median rides out the failure.
        assert_eq!(dbm, -70);
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_queries_failed() {
        let sampler = Sampler::new(MockSource::new(vec![None, None, None]), "wlan0");
        let dbm = sampler
            .sample(SampleOptions {
                samples: 3,
                interval_ms: 50,
            })
            .await;
        assert_eq!(dbm, FAILED_SAMPLE_DBM);
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_positive_count_uses_default() {
        let source = MockSource::new(vec![Some(-60), Some(-61), Some(-62), Some(-63), Some(-64)]);
        let sampler = Sampler::new(source, "wlan0");
        let dbm = sampler
            .sample(SampleOptions {
                samples: 0,
                interval_ms: 0,
            })
            .await;

        // All five scripted readings were consumed.
        assert_eq!(dbm, -62);
    }

    #[tokio::test(start_paused = true)]
    async fn test_even_sample_count() {
        let sampler = Sampler::new(MockSource::new(vec![Some(-81), Some(-80)]), "wlan0");
        let dbm = sampler
            .sample(SampleOptions {
                samples: 2,
                interval_ms: 10,
            })
            .await;
        assert_eq!(dbm, -80);
    }
}
