// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct SendTextResponse {
    pub translated_text: String,
    pub response_time_ms: f64,
    pub payload_size_bytes: usize,
    pub method: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SendAudioResponse {
    pub message: String,
    /// Base64 of the processed bytes.
    pub processed_audio: String,
    pub response_time_ms: f64,
    pub original_size_bytes: usize,
    pub processed_size_bytes: usize,
    pub method: &'static str,
}
