// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use super::{OperationKind, OutcomeRecord, OutcomeSet, OutcomeStatus, TaskId, TransportArm};
use anyhow::anyhow;
use futures::{stream::FuturesUnordered, StreamExt};
use lingo_core::client::ServiceApi;
use lingo_types::error::LingoError;
use lingo_types::messages::{AudioRequest, TranslateRequest};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time;
use tokio::time::Instant;
use tracing::{debug, info};

/// Drives a fixed batch of `concurrent_callers x requests_per_caller`
/// tasks against one transport arm. Each simulated caller issues its
/// requests sequentially; callers run concurrently, so at most
/// `concurrent_callers` calls are in flight at once.
pub struct BenchDriver {
    pub concurrent_callers: u64,
    pub requests_per_caller: u64,
    pub call_timeout: Duration,
}

impl BenchDriver {
    pub fn new(concurrent_callers: u64, requests_per_caller: u64, call_timeout: Duration) -> Self {
        Self {
            concurrent_callers,
            requests_per_caller,
            call_timeout,
        }
    }

    pub fn task_count(&self) -> u64 {
        self.concurrent_callers * self.requests_per_caller
    }

    /// Run the full batch and collect one outcome record per task. A
    /// failing call is recorded, never propagated: only a pre-flight
    /// failure or a panicking caller task aborts the run.
    pub async fn run(
        &self,
        arm: TransportArm,
        operation: OperationKind,
        api: Arc<dyn ServiceApi + Send + Sync>,
    ) -> Result<OutcomeSet, anyhow::Error> {
        // One cheap probe up front so an unreachable service produces a
        // single diagnostic instead of a batch of individual timeouts.
        preflight(&operation, &*api).await.map_err(|error| {
            anyhow!("pre-flight check failed on the {arm} arm, submitting no tasks: {error}")
        })?;

        let total = self.task_count() as usize;
        info!(
            "Submitting {} tasks on the {} arm ({} callers x {} requests)",
            total, arm, self.concurrent_callers, self.requests_per_caller
        );

        let (sender, mut receiver) = mpsc::channel(total.max(1));
        let start = Instant::now();

        let mut callers = FuturesUnordered::new();
        for caller_id in 0..self.concurrent_callers {
            let api = api.clone();
            let sender = sender.clone();
            let operation = operation.clone();
            let requests_per_caller = self.requests_per_caller;
            let call_timeout = self.call_timeout;

            callers.push(tokio::spawn(async move {
                for request_index in 0..requests_per_caller {
                    let task = TaskId {
                        caller_id,
                        request_index,
                    };
                    let call_start = Instant::now();
                    let status =
                        match time::timeout(call_timeout, invoke(&operation, task, &*api)).await {
                            Err(_) => OutcomeStatus::Timeout,
                            Ok(Ok(())) => OutcomeStatus::Ok,
                            Ok(Err(error)) => classify(error),
                        };
                    let record = OutcomeRecord {
                        task,
                        arm,
                        latency: call_start.elapsed(),
                        status,
                    };
                    if sender.send(record).await.is_err() {
                        break;
                    }
                }
                debug!("Caller {caller_id} done");
            }));
        }
        drop(sender);

        let mut records = Vec::with_capacity(total);
        while let Some(record) = receiver.recv().await {
            records.push(record);
        }
        while let Some(joined) = callers.next().await {
            joined?;
        }

        Ok(OutcomeSet {
            arm,
            records,
            wall_clock: start.elapsed(),
        })
    }
}

async fn preflight(
    operation: &OperationKind,
    api: &(dyn ServiceApi + Send + Sync),
) -> Result<(), LingoError> {
    match operation {
        OperationKind::Text { language } => api
            .translate(TranslateRequest {
                text: String::new(),
                language: language.clone(),
            })
            .await
            .map(|_| ()),
        OperationKind::Audio { .. } => api
            .process_audio(AudioRequest { audio: Vec::new() })
            .await
            .map(|_| ()),
    }
}

async fn invoke(
    operation: &OperationKind,
    task: TaskId,
    api: &(dyn ServiceApi + Send + Sync),
) -> Result<(), LingoError> {
    match operation {
        OperationKind::Text { language } => {
            let request = TranslateRequest {
                text: format!(
                    "Hello World from caller {}, request {}",
                    task.caller_id, task.request_index
                ),
                language: language.clone(),
            };
            api.translate(request).await.map(|_| ())
        }
        OperationKind::Audio { payload } => {
            let request = AudioRequest {
                audio: payload.clone(),
            };
            api.process_audio(request).await.map(|_| ())
        }
    }
}

fn classify(error: LingoError) -> OutcomeStatus {
    match &error {
        LingoError::ClientIoError { .. } => OutcomeStatus::Transport(error.to_string()),
        _ => OutcomeStatus::Application(error.to_string()),
    }
}
