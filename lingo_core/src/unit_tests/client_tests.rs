// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::server::Server;
use lingo_network::network::PortAllocator;
use std::time::Duration;

const BUFFER_SIZE: usize = 65507;

fn network_client(port: u16) -> NetworkClient {
    NetworkClient::new(
        "127.0.0.1".to_string(),
        port,
        BUFFER_SIZE,
        Duration::from_secs(4),
        Duration::from_secs(4),
    )
}

async fn spawn_services() -> (
    NetworkServiceClient,
    lingo_network::transport::SpawnedServer,
    lingo_network::transport::SpawnedServer,
) {
    let mut ports = PortAllocator::new(9810);
    let translation_port = ports.next_port().unwrap();
    let audio_port = ports.next_port().unwrap();

    let translation = Server::new_translation("127.0.0.1".to_string(), translation_port, BUFFER_SIZE)
        .spawn()
        .await
        .unwrap();
    let audio = Server::new_audio("127.0.0.1".to_string(), audio_port, BUFFER_SIZE)
        .spawn()
        .await
        .unwrap();

    let client = NetworkServiceClient::new(network_client(translation_port), network_client(audio_port));
    (client, translation, audio)
}

#[tokio::test]
async fn both_arms_produce_identical_results() {
    let (rpc, translation, audio) = spawn_services().await;
    let direct = LocalServiceClient::new();

    let request = TranslateRequest {
        text: "Hello World".to_string(),
        language: "fr".to_string(),
    };
    let over_wire = rpc.translate(request.clone()).await.unwrap();
    let in_process = direct.translate(request).await.unwrap();
    assert_eq!(over_wire.translated_text, "Bonjour");
    assert_eq!(over_wire, in_process);

    let request = AudioRequest {
        audio: b"Hello".to_vec(),
    };
    let over_wire = rpc.process_audio(request.clone()).await.unwrap();
    let in_process = direct.process_audio(request).await.unwrap();
    assert_eq!(over_wire.audio, b"olleH".to_vec());
    assert_eq!(over_wire, in_process);

    translation.kill().await.unwrap();
    audio.kill().await.unwrap();
}

#[tokio::test]
async fn unknown_language_echoes_over_the_wire() {
    let (rpc, translation, audio) = spawn_services().await;

    let response = rpc
        .translate(TranslateRequest {
            text: "untranslated".to_string(),
            language: "xx".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.translated_text, "untranslated");

    translation.kill().await.unwrap();
    audio.kill().await.unwrap();
}

#[tokio::test]
async fn wrong_endpoint_rejects_the_operation() {
    let (rpc, translation, audio) = spawn_services().await;

    // Swap the stubs so the audio request lands on the translation port.
    let crossed = NetworkServiceClient::new(rpc.audio.clone(), rpc.translation.clone());
    let result = crossed
        .process_audio(AudioRequest {
            audio: b"Hello".to_vec(),
        })
        .await;
    assert_eq!(result, Err(LingoError::UnexpectedMessage));

    translation.kill().await.unwrap();
    audio.kill().await.unwrap();
}

#[tokio::test]
async fn unreachable_endpoint_is_a_transport_error() {
    // Allocate a free port and never bind a server to it.
    let port = PortAllocator::new(9900).next_port().unwrap();
    let client = NetworkServiceClient::new(network_client(port), network_client(port));

    let result = client
        .translate(TranslateRequest {
            text: "Hello".to_string(),
            language: "fr".to_string(),
        })
        .await;
    assert!(matches!(result, Err(LingoError::ClientIoError { .. })));
}
