// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

/// Ask the translation service to render `text` in `language`.
///
/// An empty `text` or an empty `language` code is a fully formed,
/// valid request.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct TranslateRequest {
    pub text: String,
    pub language: String,
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translated_text: String,
}

/// Ask the audio service to transform a raw byte payload.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct AudioRequest {
    pub audio: Vec<u8>,
}

#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize)]
pub struct AudioResponse {
    pub audio: Vec<u8>,
}
