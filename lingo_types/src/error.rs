// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use thiserror::Error;

#[macro_export]
macro_rules! fp_bail {
    ($e:expr) => {
        return Err($e)
    };
}

#[macro_export(local_inner_macros)]
macro_rules! fp_ensure {
    ($cond:expr, $e:expr) => {
        if !($cond) {
            fp_bail!($e);
        }
    };
}

/// Custom error type for Lingo. Serializable so that a service can send
/// it back over the wire as a reply in its own right.
#[derive(Eq, PartialEq, Clone, Debug, Serialize, Deserialize, Error, Hash)]
pub enum LingoError {
    #[error("Failed to decode the message payload.")]
    InvalidDecoding,
    #[error("Unexpected message kind for this service endpoint.")]
    UnexpectedMessage,
    #[error("Client IO error: {error}")]
    ClientIoError { error: String },
    #[error("Failed to decode the audio payload: {error}")]
    AudioDecodeError { error: String },
    #[error("Invalid request: {error}")]
    ValidationError { error: String },
}

pub type LingoResult<T> = Result<T, LingoError>;
