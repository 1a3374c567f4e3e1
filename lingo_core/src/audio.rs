// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use lingo_types::messages::{AudioRequest, AudioResponse};

/// The audio service. Stands in for a real processing pipeline by
/// reversing the payload end-to-end: O(n), byte-exact, and symmetric,
/// so applying it twice reproduces the original bytes.
#[derive(Clone, Copy, Debug, Default)]
pub struct AudioState;

impl AudioState {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_audio_request(&self, request: AudioRequest) -> AudioResponse {
        let mut audio = request.audio;
        audio.reverse();
        AudioResponse { audio }
    }
}
