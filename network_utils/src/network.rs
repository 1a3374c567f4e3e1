// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::transport::*;
use lingo_types::{error::*, serialize::*};

use std::io;
use std::net::TcpListener;
use tokio::time;

/// A client for one service endpoint. Every call opens a fresh
/// connection, mirroring the per-invocation channels of the services it
/// talks to, so that connect cost is part of what gets measured.
#[derive(Clone, Debug)]
pub struct NetworkClient {
    base_address: String,
    base_port: u16,
    buffer_size: usize,
    send_timeout: std::time::Duration,
    recv_timeout: std::time::Duration,
}

impl NetworkClient {
    pub fn new(
        base_address: String,
        base_port: u16,
        buffer_size: usize,
        send_timeout: std::time::Duration,
        recv_timeout: std::time::Duration,
    ) -> Self {
        NetworkClient {
            base_address,
            base_port,
            buffer_size,
            send_timeout,
            recv_timeout,
        }
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.base_address, self.base_port)
    }

    async fn send_recv_bytes_internal(&self, buf: Vec<u8>) -> Result<Option<Vec<u8>>, io::Error> {
        let mut stream = TcpDataStream::connect(self.address(), self.buffer_size).await?;
        // Send message
        time::timeout(self.send_timeout, stream.write_data(&buf)).await??;
        // Wait for reply
        time::timeout(self.recv_timeout, async {
            stream.read_data().await.transpose()
        })
        .await?
    }

    pub async fn send_recv_bytes(&self, buf: Vec<u8>) -> Result<SerializedMessage, LingoError> {
        match self.send_recv_bytes_internal(buf).await {
            Err(error) => Err(LingoError::ClientIoError {
                error: format!("{error}"),
            }),
            Ok(Some(response)) => {
                // Parse reply
                match deserialize_message(&response[..]) {
                    Ok(SerializedMessage::Error(error)) => Err(*error),
                    Ok(message) => Ok(message),
                    Err(_) => Err(LingoError::InvalidDecoding),
                }
            }
            Ok(None) => Err(LingoError::ClientIoError {
                error: "Empty response from service.".to_string(),
            }),
        }
    }
}

pub struct PortAllocator {
    next_port: u16,
}

impl PortAllocator {
    pub fn new(starting_port: u16) -> Self {
        Self {
            next_port: starting_port,
        }
    }
    pub fn next_port(&mut self) -> Option<u16> {
        for port in self.next_port..65535 {
            if TcpListener::bind(("127.0.0.1", port)).is_ok() {
                self.next_port = port + 1;
                return Some(port);
            }
        }
        None
    }
}
