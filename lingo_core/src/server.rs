// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::audio::AudioState;
use crate::translation::TranslationState;
use lingo_network::transport::*;
use lingo_types::{error::*, serialize::*};

use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::*;

/// Which service a `Server` instance hosts. Each service listens on its
/// own port and answers exactly one operation.
pub enum ServiceState {
    Translation(TranslationState),
    Audio(AudioState),
}

pub struct Server {
    base_address: String,
    base_port: u16,
    state: ServiceState,
    buffer_size: usize,
    // Stats
    packets_processed: AtomicUsize,
    user_errors: AtomicUsize,
}

impl Server {
    pub fn new_translation(base_address: String, base_port: u16, buffer_size: usize) -> Self {
        Self::new(
            base_address,
            base_port,
            ServiceState::Translation(TranslationState::new()),
            buffer_size,
        )
    }

    pub fn new_audio(base_address: String, base_port: u16, buffer_size: usize) -> Self {
        Self::new(
            base_address,
            base_port,
            ServiceState::Audio(AudioState::new()),
            buffer_size,
        )
    }

    fn new(base_address: String, base_port: u16, state: ServiceState, buffer_size: usize) -> Self {
        Self {
            base_address,
            base_port,
            state,
            buffer_size,
            packets_processed: AtomicUsize::new(0),
            user_errors: AtomicUsize::new(0),
        }
    }

    pub fn packets_processed(&self) -> usize {
        self.packets_processed.load(Ordering::Relaxed)
    }

    pub fn user_errors(&self) -> usize {
        self.user_errors.load(Ordering::Relaxed)
    }

    pub async fn spawn(self) -> Result<SpawnedServer, io::Error> {
        info!(
            "Listening to TCP traffic on {}:{}",
            self.base_address, self.base_port
        );
        let address = format!("{}:{}", self.base_address, self.base_port);
        let buffer_size = self.buffer_size;
        let state = RunningServerState { server: self };

        spawn_server(&address, state, buffer_size).await
    }
}

struct RunningServerState {
    server: Server,
}

impl MessageHandler for RunningServerState {
    fn handle_message<'a>(
        &'a self,
        buffer: &'a [u8],
    ) -> futures::future::BoxFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move {
            let reply = match deserialize_message(buffer) {
                Err(_) => Err(LingoError::InvalidDecoding),
                Ok(SerializedMessage::TranslateReq(message)) => match &self.server.state {
                    ServiceState::Translation(state) => Ok(Some(serialize_translate_response(
                        &state.handle_translate_request(*message),
                    ))),
                    ServiceState::Audio(_) => Err(LingoError::UnexpectedMessage),
                },
                Ok(SerializedMessage::AudioReq(message)) => match &self.server.state {
                    ServiceState::Audio(state) => Ok(Some(serialize_audio_response(
                        &state.handle_audio_request(*message),
                    ))),
                    ServiceState::Translation(_) => Err(LingoError::UnexpectedMessage),
                },
                Ok(_) => Err(LingoError::UnexpectedMessage),
            };

            self.server
                .packets_processed
                .fetch_add(1, Ordering::Relaxed);

            if self.server.packets_processed() % 5000 == 0 {
                info!(
                    "{}:{} has processed {} packets",
                    self.server.base_address,
                    self.server.base_port,
                    self.server.packets_processed()
                );
            }

            match reply {
                Ok(x) => x,
                Err(error) => {
                    warn!("User query failed: {}", error);
                    self.server.user_errors.fetch_add(1, Ordering::Relaxed);
                    Some(serialize_error(&error))
                }
            }
        })
    }
}
