// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

#![deny(warnings)]

use clap::Parser;
use lingo_core::server::Server;
use lingo_network::transport::DEFAULT_MAX_DATAGRAM_SIZE;
use tracing::info;

#[derive(Parser)]
#[clap(
    name = "Lingo Server",
    about = "Hosts the translation and audio services, each on its own port",
    rename_all = "kebab-case"
)]
struct ServerOpt {
    /// Address to listen on
    #[clap(long, default_value = "127.0.0.1")]
    host: String,
    /// Port for the translation service
    #[clap(long, default_value = "50051")]
    translation_port: u16,
    /// Port for the audio service
    #[clap(long, default_value = "50052")]
    audio_port: u16,
    /// Maximum size of messages received and sent (bytes)
    #[clap(long, default_value = DEFAULT_MAX_DATAGRAM_SIZE)]
    buffer_size: usize,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt::init();
    let options = ServerOpt::parse();

    let translation = Server::new_translation(
        options.host.clone(),
        options.translation_port,
        options.buffer_size,
    )
    .spawn()
    .await?;
    let audio = Server::new_audio(options.host.clone(), options.audio_port, options.buffer_size)
        .spawn()
        .await?;

    info!("Translation and audio services are up.");
    let (translation, audio) = tokio::join!(translation.join(), audio.join());
    translation?;
    audio?;
    Ok(())
}
