// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(warnings)]

use clap::{ArgEnum, Parser};
use lingo_bench::drivers::{BenchDriver, OperationKind, TransportArm};
use lingo_bench::stats::{Comparison, Summary};
use lingo_core::client::{LocalServiceClient, NetworkServiceClient, ServiceApi};
use lingo_core::server::Server;
use lingo_network::network::NetworkClient;
use lingo_network::transport::DEFAULT_MAX_DATAGRAM_SIZE;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::info;

/// Stand-in audio payload, the same one the HTTP clients send.
const AUDIO_PAYLOAD: &[u8] = b"Hello World Audio Test";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgEnum)]
enum Operation {
    Text,
    Audio,
}

#[derive(Debug, Clone, Parser)]
#[clap(
    name = "Lingo Benchmark",
    about = "Local end-to-end benchmark comparing the RPC and direct transport arms",
    rename_all = "kebab-case"
)]
struct BenchmarkOpt {
    /// Hostname the services listen on
    #[clap(long, default_value = "127.0.0.1")]
    host: String,
    /// Port for the translation service
    #[clap(long, default_value = "50051")]
    translation_port: u16,
    /// Port for the audio service
    #[clap(long, default_value = "50052")]
    audio_port: u16,
    /// Number of simulated concurrent callers
    #[clap(long, default_value = "20")]
    concurrent_callers: u64,
    /// Number of requests each caller issues
    #[clap(long, default_value = "5")]
    requests_per_caller: u64,
    /// Which operation to benchmark
    #[clap(long, arg_enum, default_value = "text")]
    operation: Operation,
    /// Target language for the text operation
    #[clap(long, default_value = "fr")]
    target_language: String,
    /// Timeout for sending queries (us)
    #[clap(long, default_value = "4000000")]
    send_timeout_us: u64,
    /// Timeout for receiving responses (us)
    #[clap(long, default_value = "4000000")]
    recv_timeout_us: u64,
    /// Per-call timeout after which a task is recorded as failed (s)
    #[clap(long, default_value = "10")]
    call_timeout_secs: u64,
    /// Maximum size of messages received and sent (bytes)
    #[clap(long, default_value = DEFAULT_MAX_DATAGRAM_SIZE)]
    buffer_size: usize,
    /// Also write the report to this file
    #[clap(long)]
    report_path: Option<PathBuf>,
}

impl BenchmarkOpt {
    fn operation_kind(&self) -> OperationKind {
        match self.operation {
            Operation::Text => OperationKind::Text {
                language: self.target_language.clone(),
            },
            Operation::Audio => OperationKind::Audio {
                payload: AUDIO_PAYLOAD.to_vec(),
            },
        }
    }

    fn network_client(&self, port: u16) -> NetworkClient {
        NetworkClient::new(
            self.host.clone(),
            port,
            self.buffer_size,
            Duration::from_micros(self.send_timeout_us),
            Duration::from_micros(self.recv_timeout_us),
        )
    }
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let options = BenchmarkOpt::parse();

    // Host both services in-process for a local end-to-end run; the RPC
    // arm still crosses real sockets to reach them.
    let translation = Server::new_translation(
        options.host.clone(),
        options.translation_port,
        options.buffer_size,
    )
    .spawn()
    .await?;
    let audio = Server::new_audio(
        options.host.clone(),
        options.audio_port,
        options.buffer_size,
    )
    .spawn()
    .await?;
    time::sleep(Duration::from_millis(100)).await;

    let driver = BenchDriver::new(
        options.concurrent_callers,
        options.requests_per_caller,
        Duration::from_secs(options.call_timeout_secs),
    );

    // The two arms run strictly one after the other so they never
    // compete for CPU or sockets.
    let rpc_client: Arc<dyn ServiceApi + Send + Sync> = Arc::new(NetworkServiceClient::new(
        options.network_client(options.translation_port),
        options.network_client(options.audio_port),
    ));
    let rpc_outcomes = driver
        .run(TransportArm::Rpc, options.operation_kind(), rpc_client)
        .await?;

    let direct_client: Arc<dyn ServiceApi + Send + Sync> = Arc::new(LocalServiceClient::new());
    let direct_outcomes = driver
        .run(TransportArm::Direct, options.operation_kind(), direct_client)
        .await?;

    let rpc_summary = Summary::from_outcomes(&rpc_outcomes);
    let direct_summary = Summary::from_outcomes(&direct_outcomes);

    let mut report = format!("{rpc_summary}\n{direct_summary}\n");
    match Comparison::between(&direct_summary, &rpc_summary) {
        Some(comparison) => report.push_str(&format!("{comparison}")),
        None => report.push_str("comparison unavailable: an arm had no successful calls\n"),
    }
    println!("{report}");

    if let Some(path) = options.report_path {
        fs::write(&path, &report)?;
        info!("Report written to {}", path.display());
    }

    translation.kill().await?;
    audio.kill().await?;
    Ok(())
}
