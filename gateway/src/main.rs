// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use axum::error_handling::HandleErrorLayer;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::BoxError;
use clap::Parser;
use lingo_core::client::{LocalServiceClient, NetworkServiceClient};
use lingo_gateway::{app, AppState};
use lingo_network::network::NetworkClient;
use lingo_network::transport::DEFAULT_MAX_DATAGRAM_SIZE;
use std::borrow::Cow;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tracing::info;

const DEFAULT_SERVER_PORT: &str = "8000";
const DEFAULT_SERVER_ADDR_IPV4: &str = "127.0.0.1";

const REQUEST_BUFFER_SIZE: usize = 128;
const CONCURRENCY_LIMIT: usize = 64;
const TIMEOUT_IN_SECONDS: u64 = 30;

#[derive(Parser)]
#[clap(
    name = "Lingo Gateway",
    about = "HTTP front-end for the translation and audio services",
    rename_all = "kebab-case"
)]
struct GatewayConfig {
    #[clap(long, default_value = DEFAULT_SERVER_PORT)]
    port: u16,

    #[clap(long, default_value = DEFAULT_SERVER_ADDR_IPV4)]
    host: Ipv4Addr,

    /// Hostname the backing services listen on
    #[clap(long, default_value = "127.0.0.1")]
    service_host: String,

    /// Port for the translation service
    #[clap(long, default_value = "50051")]
    translation_port: u16,

    /// Port for the audio service
    #[clap(long, default_value = "50052")]
    audio_port: u16,

    /// Timeout for sending queries (us)
    #[clap(long, default_value = "4000000")]
    send_timeout_us: u64,

    /// Timeout for receiving responses (us)
    #[clap(long, default_value = "4000000")]
    recv_timeout_us: u64,

    /// Maximum size of messages received and sent (bytes)
    #[clap(long, default_value = DEFAULT_MAX_DATAGRAM_SIZE)]
    buffer_size: usize,
}

impl GatewayConfig {
    fn network_client(&self, port: u16) -> NetworkClient {
        NetworkClient::new(
            self.service_host.clone(),
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

    let config: GatewayConfig = GatewayConfig::parse();

    let rpc = Arc::new(NetworkServiceClient::new(
        config.network_client(config.translation_port),
        config.network_client(config.audio_port),
    ));
    let direct = Arc::new(LocalServiceClient::new());
    let state = Arc::new(AppState::new(rpc, direct));

    let app = app(state).layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(handle_error))
            .buffer(REQUEST_BUFFER_SIZE)
            .concurrency_limit(CONCURRENCY_LIMIT)
            .timeout(Duration::from_secs(TIMEOUT_IN_SECONDS))
            .into_inner(),
    );

    let addr = SocketAddr::new(IpAddr::V4(config.host), config.port);
    info!("listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}

async fn handle_error(error: BoxError) -> impl IntoResponse {
    if error.is::<tower::timeout::error::Elapsed>() {
        return (StatusCode::REQUEST_TIMEOUT, Cow::from("request timed out"));
    }

    if error.is::<tower::load_shed::error::Overloaded>() {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Cow::from("service is overloaded, try again later"),
        );
    }

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Cow::from(format!("Unhandled internal error: {}", error)),
    )
}
