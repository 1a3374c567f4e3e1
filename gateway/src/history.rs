// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;
use std::time::{SystemTime, UNIX_EPOCH};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Text,
    Audio,
}

/// One delivered message as the gateway recorded it. Audio entries keep
/// a size summary rather than the raw bytes.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRecord {
    pub sender: String,
    pub receiver: String,
    pub kind: MessageKind,
    pub original: String,
    pub translated: String,
    pub timestamp_ms: u64,
}

/// In-memory history of everything sent through the gateway. Lost on
/// restart; nothing is persisted.
#[derive(Debug, Default)]
pub struct HistoryStore {
    records: RwLock<Vec<ChatRecord>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn append(&self, record: ChatRecord) {
        self.records.write().await.push(record);
    }

    /// Full history, most recent entry first.
    pub async fn newest_first(&self) -> Vec<ChatRecord> {
        let records = self.records.read().await;
        records.iter().rev().cloned().collect()
    }
}

pub fn unix_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0)
}
