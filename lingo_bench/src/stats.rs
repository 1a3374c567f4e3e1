// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::drivers::{OutcomeSet, TransportArm};
use std::fmt;
use std::time::Duration;

/// Aggregate statistics over one outcome set. Latency figures cover
/// successful calls only; failures count toward the success rate and
/// nothing else. Throughput divides the full submitted batch by the
/// batch's wall-clock span, since calls overlap.
#[derive(Clone, Debug)]
pub struct Summary {
    pub arm: TransportArm,
    pub total: usize,
    pub successes: usize,
    pub failures: usize,
    pub min_latency: Option<Duration>,
    pub max_latency: Option<Duration>,
    pub mean_latency: Option<Duration>,
    pub median_latency: Option<Duration>,
    /// Sample standard deviation; only defined for two or more
    /// successful calls.
    pub stddev_latency: Option<Duration>,
    pub wall_clock: Duration,
    pub throughput: f64,
}

impl Summary {
    pub fn from_outcomes(outcomes: &OutcomeSet) -> Self {
        let total = outcomes.records.len();
        let mut latencies: Vec<f64> = outcomes
            .records
            .iter()
            .filter(|record| record.is_success())
            .map(|record| record.latency.as_secs_f64())
            .collect();
        latencies.sort_by(|a, b| a.total_cmp(b));

        let successes = latencies.len();
        let failures = total - successes;

        let min_latency = latencies.first().copied().map(Duration::from_secs_f64);
        let max_latency = latencies.last().copied().map(Duration::from_secs_f64);
        let mean = (successes > 0).then(|| latencies.iter().sum::<f64>() / successes as f64);
        let median_latency = (successes > 0).then(|| {
            let mid = successes / 2;
            let median = if successes % 2 == 0 {
                (latencies[mid - 1] + latencies[mid]) / 2.0
            } else {
                latencies[mid]
            };
            Duration::from_secs_f64(median)
        });
        let stddev_latency = (successes >= 2).then(|| {
            let mean = mean.unwrap();
            let variance = latencies
                .iter()
                .map(|latency| (latency - mean).powi(2))
                .sum::<f64>()
                / (successes - 1) as f64;
            Duration::from_secs_f64(variance.sqrt())
        });

        let throughput = if outcomes.wall_clock.is_zero() {
            0.0
        } else {
            total as f64 / outcomes.wall_clock.as_secs_f64()
        };

        Summary {
            arm: outcomes.arm,
            total,
            successes,
            failures,
            min_latency,
            max_latency,
            mean_latency: mean.map(Duration::from_secs_f64),
            median_latency,
            stddev_latency,
            wall_clock: outcomes.wall_clock,
            throughput,
        }
    }

    /// Success rate in percent.
    pub fn success_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.successes as f64 / self.total as f64 * 100.0
        }
    }
}

fn ms(duration: Duration) -> f64 {
    duration.as_secs_f64() * 1000.0
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "== {} arm ==", self.arm)?;
        writeln!(
            f,
            "requests:   {} total, {} ok / {} failed ({:.1}% success)",
            self.total,
            self.successes,
            self.failures,
            self.success_rate()
        )?;
        match (
            self.min_latency,
            self.max_latency,
            self.mean_latency,
            self.median_latency,
        ) {
            (Some(min), Some(max), Some(mean), Some(median)) => {
                writeln!(
                    f,
                    "latency:    min {:.2} ms, max {:.2} ms, mean {:.2} ms, median {:.2} ms",
                    ms(min),
                    ms(max),
                    ms(mean),
                    ms(median)
                )?;
            }
            _ => writeln!(f, "latency:    no successful calls")?,
        }
        if let Some(stddev) = self.stddev_latency {
            writeln!(f, "stddev:     {:.2} ms", ms(stddev))?;
        }
        writeln!(
            f,
            "throughput: {:.2} requests/s over {:.2} ms",
            self.throughput,
            ms(self.wall_clock)
        )
    }
}

/// Head-to-head contrast of two summaries for the same task shape. The
/// relative percentage is computed against the slower arm's mean, using
/// successful-call latencies only.
#[derive(Clone, Debug)]
pub struct Comparison {
    pub faster: TransportArm,
    pub slower: TransportArm,
    pub faster_mean_ms: f64,
    pub slower_mean_ms: f64,
    /// How much faster the faster arm is, as a percentage of the slower
    /// arm's mean latency.
    pub relative_percent: f64,
    /// First summary's success rate minus the second's, in percentage
    /// points.
    pub success_rate_delta: f64,
}

impl Comparison {
    /// `None` when either arm has no successful calls to compare.
    pub fn between(a: &Summary, b: &Summary) -> Option<Comparison> {
        let mean_a = ms(a.mean_latency?);
        let mean_b = ms(b.mean_latency?);
        let (faster, slower) = if mean_a <= mean_b { (a, b) } else { (b, a) };
        let faster_mean_ms = mean_a.min(mean_b);
        let slower_mean_ms = mean_a.max(mean_b);
        let relative_percent = if slower_mean_ms == 0.0 {
            0.0
        } else {
            (slower_mean_ms - faster_mean_ms) / slower_mean_ms * 100.0
        };
        Some(Comparison {
            faster: faster.arm,
            slower: slower.arm,
            faster_mean_ms,
            slower_mean_ms,
            relative_percent,
            success_rate_delta: a.success_rate() - b.success_rate(),
        })
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} arm is {:.1}% faster than the {} arm (mean {:.2} ms vs {:.2} ms)",
            self.faster, self.relative_percent, self.slower, self.faster_mean_ms, self.slower_mean_ms
        )?;
        writeln!(
            f,
            "success rate delta: {:+.1} points",
            self.success_rate_delta
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::{OutcomeRecord, OutcomeStatus, TaskId};

    fn record(caller_id: u64, latency_ms: u64, status: OutcomeStatus) -> OutcomeRecord {
        OutcomeRecord {
            task: TaskId {
                caller_id,
                request_index: 0,
            },
            arm: TransportArm::Direct,
            latency: Duration::from_millis(latency_ms),
            status,
        }
    }

    fn outcomes(records: Vec<OutcomeRecord>) -> OutcomeSet {
        OutcomeSet {
            arm: TransportArm::Direct,
            records,
            wall_clock: Duration::from_millis(100),
        }
    }

    #[test]
    fn counts_add_up_and_failures_are_excluded_from_latency() {
        let set = outcomes(vec![
            record(0, 10, OutcomeStatus::Ok),
            record(1, 20, OutcomeStatus::Ok),
            record(2, 30, OutcomeStatus::Ok),
            record(3, 5000, OutcomeStatus::Timeout),
            record(4, 1, OutcomeStatus::Transport("connection refused".to_string())),
        ]);
        let summary = Summary::from_outcomes(&set);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.successes, 3);
        assert_eq!(summary.failures, 2);
        assert_eq!(summary.successes + summary.failures, summary.total);
        assert_eq!(summary.min_latency, Some(Duration::from_millis(10)));
        assert_eq!(summary.max_latency, Some(Duration::from_millis(30)));
        assert_eq!(summary.mean_latency, Some(Duration::from_millis(20)));
        assert_eq!(summary.median_latency, Some(Duration::from_millis(20)));
        assert!(summary.throughput > 0.0 && summary.throughput.is_finite());
    }

    #[test]
    fn median_of_even_count_averages_the_middle_pair() {
        let set = outcomes(vec![
            record(0, 10, OutcomeStatus::Ok),
            record(1, 20, OutcomeStatus::Ok),
            record(2, 40, OutcomeStatus::Ok),
            record(3, 80, OutcomeStatus::Ok),
        ]);
        let summary = Summary::from_outcomes(&set);
        assert_eq!(summary.median_latency, Some(Duration::from_millis(30)));
    }

    #[test]
    fn stddev_requires_at_least_two_successes() {
        let set = outcomes(vec![record(0, 10, OutcomeStatus::Ok)]);
        let summary = Summary::from_outcomes(&set);
        assert_eq!(summary.stddev_latency, None);

        let set = outcomes(vec![
            record(0, 10, OutcomeStatus::Ok),
            record(1, 30, OutcomeStatus::Ok),
        ]);
        let summary = Summary::from_outcomes(&set);
        // Sample stddev of {10, 30} is sqrt(200) ~= 14.14 ms.
        let stddev = summary.stddev_latency.unwrap().as_secs_f64() * 1000.0;
        assert!((stddev - 14.142).abs() < 0.01);
    }

    #[test]
    fn no_successes_leaves_latency_undefined() {
        let set = outcomes(vec![record(0, 10, OutcomeStatus::Timeout)]);
        let summary = Summary::from_outcomes(&set);
        assert_eq!(summary.mean_latency, None);
        assert_eq!(summary.median_latency, None);
        assert_eq!(summary.stddev_latency, None);
        assert_eq!(summary.success_rate(), 0.0);
    }

    fn summary_with_mean(arm: TransportArm, mean_ms: u64) -> Summary {
        Summary {
            arm,
            total: 100,
            successes: 100,
            failures: 0,
            min_latency: Some(Duration::from_millis(mean_ms)),
            max_latency: Some(Duration::from_millis(mean_ms)),
            mean_latency: Some(Duration::from_millis(mean_ms)),
            median_latency: Some(Duration::from_millis(mean_ms)),
            stddev_latency: None,
            wall_clock: Duration::from_secs(1),
            throughput: 100.0,
        }
    }

    #[test]
    fn relative_percent_is_against_the_slower_arm() {
        let direct = summary_with_mean(TransportArm::Direct, 12);
        let rpc = summary_with_mean(TransportArm::Rpc, 18);
        let comparison = Comparison::between(&direct, &rpc).unwrap();
        assert_eq!(comparison.faster, TransportArm::Direct);
        assert_eq!(comparison.slower, TransportArm::Rpc);
        assert!((comparison.relative_percent - 33.333).abs() < 0.01);
        assert_eq!(comparison.success_rate_delta, 0.0);

        // Argument order must not change which arm is reported faster.
        let comparison = Comparison::between(&rpc, &direct).unwrap();
        assert_eq!(comparison.faster, TransportArm::Direct);
        assert!((comparison.relative_percent - 33.333).abs() < 0.01);
    }

    #[test]
    fn comparison_is_undefined_without_successes() {
        let direct = summary_with_mean(TransportArm::Direct, 12);
        let mut rpc = summary_with_mean(TransportArm::Rpc, 18);
        rpc.mean_latency = None;
        assert!(Comparison::between(&direct, &rpc).is_none());
    }
}
