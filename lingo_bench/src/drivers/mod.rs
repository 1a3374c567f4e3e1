// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt;
use std::time::Duration;

mod bench_driver;
pub use bench_driver::BenchDriver;

/// One of the two call paths under comparison.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum TransportArm {
    Rpc,
    Direct,
}

impl fmt::Display for TransportArm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportArm::Rpc => write!(f, "RPC"),
            TransportArm::Direct => write!(f, "direct"),
        }
    }
}

/// Which operation the task batch exercises.
#[derive(Clone, Debug)]
pub enum OperationKind {
    Text { language: String },
    Audio { payload: Vec<u8> },
}

/// Identity of one task attempt: which simulated caller issued it and
/// where it sits in that caller's request sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct TaskId {
    pub caller_id: u64,
    pub request_index: u64,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum OutcomeStatus {
    Ok,
    Timeout,
    Transport(String),
    Application(String),
}

impl OutcomeStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, OutcomeStatus::Ok)
    }
}

/// The result of one task attempt. Written once by the worker that made
/// the call and never mutated afterward.
#[derive(Clone, Debug)]
pub struct OutcomeRecord {
    pub task: TaskId,
    pub arm: TransportArm,
    pub latency: Duration,
    pub status: OutcomeStatus,
}

impl OutcomeRecord {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

/// All outcome records for one transport arm and one task batch,
/// together with the wall-clock span of the whole batch. Consumed once
/// by the statistics engine.
pub struct OutcomeSet {
    pub arm: TransportArm,
    pub records: Vec<OutcomeRecord>,
    pub wall_clock: Duration,
}
