// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use super::*;
use crate::network::PortAllocator;

struct EchoService;

impl MessageHandler for EchoService {
    fn handle_message<'a>(&'a self, buffer: &'a [u8]) -> future::BoxFuture<'a, Option<Vec<u8>>> {
        Box::pin(async move { Some(buffer.to_vec()) })
    }
}

#[tokio::test]
async fn tcp_data_stream_exchanges_framed_messages() {
    let port = PortAllocator::new(9600).next_port().unwrap();
    let address = format!("127.0.0.1:{port}");
    let server = spawn_server(&address, EchoService, 65507).await.unwrap();

    let mut stream = TcpDataStream::connect(address, 65507).await.unwrap();
    stream.write_data(b"hello").await.unwrap();
    let reply = stream.read_data().await.unwrap().unwrap();
    assert_eq!(reply, b"hello".to_vec());

    // A zero-length payload is a valid frame.
    stream.write_data(b"").await.unwrap();
    let reply = stream.read_data().await.unwrap().unwrap();
    assert!(reply.is_empty());

    drop(stream);
    server.kill().await.unwrap();
}

#[tokio::test]
async fn oversized_frame_is_rejected() {
    let port = PortAllocator::new(9700).next_port().unwrap();
    let address = format!("127.0.0.1:{port}");
    let server = spawn_server(&address, EchoService, 64).await.unwrap();

    // The client accepts the large frame locally but the server must
    // drop the connection instead of echoing it back.
    let mut stream = TcpDataStream::connect(address, 65507).await.unwrap();
    stream.write_data(&vec![0u8; 1024]).await.unwrap();
    let reply = stream.read_data().await;
    assert!(!matches!(reply, Some(Ok(_))));

    server.kill().await.unwrap();
}
