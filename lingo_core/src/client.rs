// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::audio::AudioState;
use crate::translation::TranslationState;
use async_trait::async_trait;
use lingo_network::network::NetworkClient;
use lingo_types::{error::*, messages::*, serialize::*};

#[cfg(test)]
#[path = "unit_tests/client_tests.rs"]
mod client_tests;

/// One logical contract, two call paths. The network implementation
/// crosses a wire to a long-lived service process; the local one runs
/// the same operations in-process. Both must produce identical results
/// for identical inputs.
#[async_trait]
pub trait ServiceApi {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, LingoError>;

    async fn process_audio(&self, request: AudioRequest) -> Result<AudioResponse, LingoError>;
}

/// Thin synchronous stubs over the two service endpoints. All transport
/// failures surface as `LingoError`, never as panics; the caller is
/// expected to treat them as ordinary outcomes.
#[derive(Clone, Debug)]
pub struct NetworkServiceClient {
    translation: NetworkClient,
    audio: NetworkClient,
}

impl NetworkServiceClient {
    pub fn new(translation: NetworkClient, audio: NetworkClient) -> Self {
        Self { translation, audio }
    }
}

#[async_trait]
impl ServiceApi for NetworkServiceClient {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, LingoError> {
        let response = self
            .translation
            .send_recv_bytes(serialize_translate_request(&request))
            .await?;
        deserialize_translate_response(response)
    }

    async fn process_audio(&self, request: AudioRequest) -> Result<AudioResponse, LingoError> {
        let response = self
            .audio
            .send_recv_bytes(serialize_audio_request(&request))
            .await?;
        deserialize_audio_response(response)
    }
}

/// The direct-invocation path: no network hop, no serialization.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalServiceClient {
    translation: TranslationState,
    audio: AudioState,
}

impl LocalServiceClient {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceApi for LocalServiceClient {
    async fn translate(&self, request: TranslateRequest) -> Result<TranslateResponse, LingoError> {
        Ok(self.translation.handle_translate_request(request))
    }

    async fn process_audio(&self, request: AudioRequest) -> Result<AudioResponse, LingoError> {
        Ok(self.audio.handle_audio_request(request))
    }
}
