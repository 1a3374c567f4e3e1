// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use bytes::Bytes;
use futures::future::{self, Either};
use futures::{SinkExt, StreamExt};
use std::io::ErrorKind;
use std::{io, sync::Arc};
use tokio::net::{TcpListener, TcpSocket, TcpStream};
use tokio_util::codec::{Framed, LengthDelimitedCodec};
use tracing::*;

#[cfg(test)]
#[path = "unit_tests/transport_tests.rs"]
mod transport_tests;

/// Suggested buffer size
pub const DEFAULT_MAX_DATAGRAM_SIZE: &str = "65507";

/// The handler required to create a service.
pub trait MessageHandler {
    fn handle_message<'a>(&'a self, buffer: &'a [u8]) -> future::BoxFuture<'a, Option<Vec<u8>>>;
}

/// The result of spawning a server is a oneshot channel to kill it and a
/// handle to track completion.
pub struct SpawnedServer {
    complete: futures::channel::oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl SpawnedServer {
    pub async fn join(self) -> Result<(), std::io::Error> {
        // Note that dropping `self.complete` would terminate the server.
        self.handle.await??;
        Ok(())
    }

    pub async fn kill(self) -> Result<(), std::io::Error> {
        self.complete
            .send(())
            .map_err(|_| io::Error::new(ErrorKind::Other, "server already exited"))?;
        self.handle.await??;
        Ok(())
    }
}

/// Wire format: a 4-byte little-endian length prefix followed by the
/// message bytes. Frames above `max_data_size` are rejected.
fn framed(stream: TcpStream, max_data_size: usize) -> Framed<TcpStream, LengthDelimitedCodec> {
    LengthDelimitedCodec::builder()
        .max_frame_length(max_data_size)
        .length_field_length(4)
        .little_endian()
        .new_framed(stream)
}

/// An implementation of DataStream based on TCP.
pub struct TcpDataStream {
    framed: Framed<TcpStream, LengthDelimitedCodec>,
}

impl TcpDataStream {
    pub async fn connect(address: String, max_data_size: usize) -> Result<Self, std::io::Error> {
        let addr = address
            .parse()
            .map_err(|e| std::io::Error::new(ErrorKind::Other, e))?;
        let socket = TcpSocket::new_v4()?;
        let stream = socket.connect(addr).await?;
        Ok(Self {
            framed: framed(stream, max_data_size),
        })
    }

    pub async fn write_data<'a>(&'a mut self, buffer: &'a [u8]) -> Result<(), std::io::Error> {
        self.framed.send(Bytes::copy_from_slice(buffer)).await
    }

    /// Read one frame. `None` signals a clean end of stream.
    pub async fn read_data(&mut self) -> Option<Result<Vec<u8>, std::io::Error>> {
        self.framed
            .next()
            .await
            .map(|result| result.map(|bytes| bytes.to_vec()))
    }
}

/// Run a server for this protocol and the given message handler.
pub async fn spawn_server<S>(
    address: &str,
    state: S,
    buffer_size: usize,
) -> Result<SpawnedServer, std::io::Error>
where
    S: MessageHandler + Send + Sync + 'static,
{
    let (complete, receiver) = futures::channel::oneshot::channel();
    let handle = {
        // The listener must be set to non-blocking before handing it to tokio.
        let std_listener = std::net::TcpListener::bind(address)?;
        std_listener.set_nonblocking(true)?;
        let listener = TcpListener::from_std(std_listener)?;

        tokio::spawn(run_tcp_server(listener, state, receiver, buffer_size))
    };
    Ok(SpawnedServer { complete, handle })
}

async fn run_tcp_server<S>(
    listener: TcpListener,
    state: S,
    mut exit_future: futures::channel::oneshot::Receiver<()>,
    buffer_size: usize,
) -> Result<(), std::io::Error>
where
    S: MessageHandler + Send + Sync + 'static,
{
    let guarded_state = Arc::new(state);
    loop {
        let (stream, _) = match future::select(exit_future, Box::pin(listener.accept())).await {
            Either::Left(_) => break,
            Either::Right((value, new_exit_future)) => {
                exit_future = new_exit_future;
                value?
            }
        };

        let guarded_state = guarded_state.clone();
        tokio::spawn(async move {
            let mut framed = framed(stream, buffer_size);
            while let Some(frame) = framed.next().await {
                let buffer = match frame {
                    Ok(buffer) => buffer,
                    Err(err) => {
                        // We expect an EOF error at the end.
                        if err.kind() != io::ErrorKind::UnexpectedEof {
                            error!("Error while reading TCP stream: {}", err);
                        }
                        break;
                    }
                };

                if let Some(reply) = guarded_state.handle_message(&buffer[..]).await {
                    if let Err(error) = framed.send(Bytes::from(reply)).await {
                        error!("Failed to send query response: {}", error);
                        break;
                    }
                };
            }
        });
    }
    Ok(())
}
