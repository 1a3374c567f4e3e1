// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use lingo_bench::drivers::{BenchDriver, OperationKind, TransportArm};
use lingo_bench::stats::Summary;
use lingo_core::client::{LocalServiceClient, NetworkServiceClient, ServiceApi};
use lingo_core::server::Server;
use lingo_network::network::{NetworkClient, PortAllocator};
use lingo_types::messages::TranslateRequest;
use std::collections::HashSet;
use std::sync::Arc;
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

#[tokio::test]
async fn direct_arm_batch_produces_one_record_per_task() {
    let driver = BenchDriver::new(20, 5, Duration::from_secs(10));
    let api = Arc::new(LocalServiceClient::new());
    let outcomes = driver
        .run(
            TransportArm::Direct,
            OperationKind::Text {
                language: "fr".to_string(),
            },
            api.clone(),
        )
        .await
        .unwrap();

    assert_eq!(outcomes.records.len(), 100);
    let identities: HashSet<_> = outcomes.records.iter().map(|record| record.task).collect();
    assert_eq!(identities.len(), 100);
    assert!(outcomes.records.iter().all(|record| record.is_success()));

    // The service behind the batch maps every `fr` request to the same
    // fixed phrase, whatever the input text.
    let response = api
        .translate(TranslateRequest {
            text: "Hello World from caller 0, request 0".to_string(),
            language: "fr".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(response.translated_text, "Bonjour");

    let summary = Summary::from_outcomes(&outcomes);
    assert_eq!(summary.total, 100);
    assert_eq!(summary.successes + summary.failures, summary.total);
    assert!(summary.throughput > 0.0 && summary.throughput.is_finite());
}

#[tokio::test]
async fn rpc_arm_batch_runs_against_live_services() {
    let mut ports = PortAllocator::new(10200);
    let translation_port = ports.next_port().unwrap();
    let audio_port = ports.next_port().unwrap();

    let translation =
        Server::new_translation("127.0.0.1".to_string(), translation_port, BUFFER_SIZE)
            .spawn()
            .await
            .unwrap();
    let audio = Server::new_audio("127.0.0.1".to_string(), audio_port, BUFFER_SIZE)
        .spawn()
        .await
        .unwrap();

    let api: Arc<dyn ServiceApi + Send + Sync> = Arc::new(NetworkServiceClient::new(
        network_client(translation_port),
        network_client(audio_port),
    ));

    let driver = BenchDriver::new(5, 2, Duration::from_secs(10));
    let outcomes = driver
        .run(
            TransportArm::Rpc,
            OperationKind::Audio {
                payload: b"Hello".to_vec(),
            },
            api,
        )
        .await
        .unwrap();

    assert_eq!(outcomes.records.len(), 10);
    assert!(outcomes.records.iter().all(|record| record.is_success()));
    assert_eq!(outcomes.arm, TransportArm::Rpc);

    translation.kill().await.unwrap();
    audio.kill().await.unwrap();
}

#[tokio::test]
async fn unreachable_service_fails_preflight_and_submits_nothing() {
    // A free port with no server behind it.
    let port = PortAllocator::new(10300).next_port().unwrap();
    let api: Arc<dyn ServiceApi + Send + Sync> = Arc::new(NetworkServiceClient::new(
        network_client(port),
        network_client(port),
    ));

    let driver = BenchDriver::new(4, 2, Duration::from_secs(1));
    let result = driver
        .run(
            TransportArm::Rpc,
            OperationKind::Text {
                language: "fr".to_string(),
            },
            api,
        )
        .await;

    let error = result.err().unwrap().to_string();
    assert!(error.contains("pre-flight"));
    assert!(error.contains("submitting no tasks"));
}
