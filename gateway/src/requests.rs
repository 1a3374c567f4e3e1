// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use lingo_types::error::LingoError;
use lingo_types::fp_ensure;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub username: String,
    pub language: String,
}

impl SetLanguageRequest {
    pub fn validate(&self) -> Result<(), LingoError> {
        fp_ensure!(
            !self.username.trim().is_empty(),
            LingoError::ValidationError {
                error: "username must not be empty".to_string(),
            }
        );
        fp_ensure!(
            !self.language.trim().is_empty(),
            LingoError::ValidationError {
                error: "language must not be empty".to_string(),
            }
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SendTextRequest {
    pub sender: String,
    pub receiver: String,
    pub text: String,
    /// When absent, the receiver's stored preference applies, then a
    /// default of `fr`.
    #[serde(default)]
    pub target_language: Option<String>,
}

impl SendTextRequest {
    pub fn validate(&self) -> Result<(), LingoError> {
        fp_ensure!(
            !self.sender.trim().is_empty(),
            LingoError::ValidationError {
                error: "sender must not be empty".to_string(),
            }
        );
        fp_ensure!(
            !self.receiver.trim().is_empty(),
            LingoError::ValidationError {
                error: "receiver must not be empty".to_string(),
            }
        );
        fp_ensure!(
            !self.text.is_empty(),
            LingoError::ValidationError {
                error: "text must not be empty".to_string(),
            }
        );
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
pub struct SendAudioRequest {
    pub sender: String,
    pub receiver: String,
    /// Base64-encoded audio bytes. Plain UTF-8 is accepted as a
    /// fallback for hand-written test payloads.
    pub audio: String,
}

impl SendAudioRequest {
    pub fn validate(&self) -> Result<(), LingoError> {
        fp_ensure!(
            !self.sender.trim().is_empty(),
            LingoError::ValidationError {
                error: "sender must not be empty".to_string(),
            }
        );
        fp_ensure!(
            !self.receiver.trim().is_empty(),
            LingoError::ValidationError {
                error: "receiver must not be empty".to_string(),
            }
        );
        fp_ensure!(
            !self.audio.is_empty(),
            LingoError::ValidationError {
                error: "audio must not be empty".to_string(),
            }
        );
        Ok(())
    }

    pub fn decode_audio(&self) -> Vec<u8> {
        match base64::decode(&self.audio) {
            Ok(bytes) => bytes,
            Err(_) => self.audio.clone().into_bytes(),
        }
    }
}
