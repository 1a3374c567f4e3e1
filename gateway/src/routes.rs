// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::errors::GatewayError;
use crate::history::{unix_timestamp_ms, ChatRecord, HistoryStore, MessageKind};
use crate::requests::{SendAudioRequest, SendTextRequest, SetLanguageRequest};
use crate::responses::{MessageResponse, SendAudioResponse, SendTextResponse};
use axum::extract::Extension;
use axum::routing::{get, post};
use axum::{Json, Router};
use lingo_core::client::ServiceApi;
use lingo_types::messages::{AudioRequest, TranslateRequest};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::RwLock;
use tracing::info;

const DEFAULT_LANGUAGE: &str = "fr";

/// Which call path a handler routes through. The two paths expose the
/// same operations on the same state; only the transport differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CallPath {
    Rpc,
    Direct,
}

impl CallPath {
    fn label(self) -> &'static str {
        match self {
            CallPath::Rpc => "rpc",
            CallPath::Direct => "direct",
        }
    }
}

pub struct AppState {
    pub rpc: Arc<dyn ServiceApi + Send + Sync>,
    pub direct: Arc<dyn ServiceApi + Send + Sync>,
    pub history: HistoryStore,
    pub profiles: RwLock<HashMap<String, String>>,
}

impl AppState {
    pub fn new(
        rpc: Arc<dyn ServiceApi + Send + Sync>,
        direct: Arc<dyn ServiceApi + Send + Sync>,
    ) -> Self {
        Self {
            rpc,
            direct,
            history: HistoryStore::new(),
            profiles: RwLock::new(HashMap::new()),
        }
    }

    fn api(&self, path: CallPath) -> &Arc<dyn ServiceApi + Send + Sync> {
        match path {
            CallPath::Rpc => &self.rpc,
            CallPath::Direct => &self.direct,
        }
    }
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/set-language", post(set_language))
        .route("/api/send-text", post(send_text_rpc))
        .route("/api/send-text-direct", post(send_text_direct))
        .route("/api/send-audio", post(send_audio_rpc))
        .route("/api/send-audio-direct", post(send_audio_direct))
        .route("/api/history", get(chat_history))
        .layer(Extension(state))
}

async fn health() -> &'static str {
    "OK"
}

async fn set_language(
    Json(request): Json<SetLanguageRequest>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<MessageResponse>, GatewayError> {
    request.validate()?;
    state
        .profiles
        .write()
        .await
        .insert(request.username.clone(), request.language.clone());
    info!(
        "Language preference for {} set to {}",
        request.username, request.language
    );
    Ok(Json(MessageResponse {
        message: format!("Language preference updated to {}", request.language),
    }))
}

async fn send_text_rpc(
    Json(request): Json<SendTextRequest>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<SendTextResponse>, GatewayError> {
    send_text(state, request, CallPath::Rpc).await
}

async fn send_text_direct(
    Json(request): Json<SendTextRequest>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<SendTextResponse>, GatewayError> {
    send_text(state, request, CallPath::Direct).await
}

async fn send_text(
    state: Arc<AppState>,
    request: SendTextRequest,
    path: CallPath,
) -> Result<Json<SendTextResponse>, GatewayError> {
    request.validate()?;
    let language = match &request.target_language {
        Some(language) => language.clone(),
        None => state
            .profiles
            .read()
            .await
            .get(&request.receiver)
            .cloned()
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    };

    let started = Instant::now();
    let response = state
        .api(path)
        .translate(TranslateRequest {
            text: request.text.clone(),
            language,
        })
        .await?;
    let elapsed = started.elapsed();

    state
        .history
        .append(ChatRecord {
            sender: request.sender,
            receiver: request.receiver,
            kind: MessageKind::Text,
            original: request.text,
            translated: response.translated_text.clone(),
            timestamp_ms: unix_timestamp_ms(),
        })
        .await;

    Ok(Json(SendTextResponse {
        payload_size_bytes: response.translated_text.len(),
        translated_text: response.translated_text,
        response_time_ms: elapsed.as_secs_f64() * 1000.0,
        method: path.label(),
    }))
}

async fn send_audio_rpc(
    Json(request): Json<SendAudioRequest>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<SendAudioResponse>, GatewayError> {
    send_audio(state, request, CallPath::Rpc).await
}

async fn send_audio_direct(
    Json(request): Json<SendAudioRequest>,
    Extension(state): Extension<Arc<AppState>>,
) -> Result<Json<SendAudioResponse>, GatewayError> {
    send_audio(state, request, CallPath::Direct).await
}

async fn send_audio(
    state: Arc<AppState>,
    request: SendAudioRequest,
    path: CallPath,
) -> Result<Json<SendAudioResponse>, GatewayError> {
    request.validate()?;
    let audio = request.decode_audio();
    let original_size = audio.len();

    let started = Instant::now();
    let response = state.api(path).process_audio(AudioRequest { audio }).await?;
    let elapsed = started.elapsed();

    state
        .history
        .append(ChatRecord {
            sender: request.sender,
            receiver: request.receiver,
            kind: MessageKind::Audio,
            original: format!("audio-{original_size}-bytes"),
            translated: format!("audio-{}-bytes", response.audio.len()),
            timestamp_ms: unix_timestamp_ms(),
        })
        .await;

    Ok(Json(SendAudioResponse {
        message: "Audio processed successfully".to_string(),
        processed_size_bytes: response.audio.len(),
        processed_audio: base64::encode(&response.audio),
        response_time_ms: elapsed.as_secs_f64() * 1000.0,
        original_size_bytes: original_size,
        method: path.label(),
    }))
}

async fn chat_history(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<ChatRecord>> {
    Json(state.history.newest_first().await)
}
