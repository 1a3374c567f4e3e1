// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use crate::error::*;
use crate::messages::*;

use anyhow::format_err;
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "unit_tests/serialize_tests.rs"]
mod serialize_tests;

#[derive(Serialize, Deserialize, Debug)]
pub enum SerializedMessage {
    TranslateReq(Box<TranslateRequest>),
    TranslateResp(Box<TranslateResponse>),
    AudioReq(Box<AudioRequest>),
    AudioResp(Box<AudioResponse>),
    Error(Box<LingoError>),
}

// This helper structure is only here to avoid cloning while serializing
// messages. Here we must replicate the definition of SerializedMessage
// exactly so that the variant tags match.
// (Note that this relies on bincode writing identical serializations
// for Box<T> and &T)
#[allow(dead_code)]
#[derive(Serialize)]
enum ShallowSerializedMessage<'a> {
    TranslateReq(&'a TranslateRequest),
    TranslateResp(&'a TranslateResponse),
    AudioReq(&'a AudioRequest),
    AudioResp(&'a AudioResponse),
    Error(&'a LingoError),
}

fn serialize(msg: &ShallowSerializedMessage<'_>) -> Vec<u8> {
    let mut buf = Vec::new();
    bincode::serialize_into(&mut buf, msg)
        .expect("Serializing to a resizable buffer should not fail.");
    buf
}

pub fn serialize_translate_request(value: &TranslateRequest) -> Vec<u8> {
    serialize(&ShallowSerializedMessage::TranslateReq(value))
}

pub fn serialize_translate_response(value: &TranslateResponse) -> Vec<u8> {
    serialize(&ShallowSerializedMessage::TranslateResp(value))
}

pub fn serialize_audio_request(value: &AudioRequest) -> Vec<u8> {
    serialize(&ShallowSerializedMessage::AudioReq(value))
}

pub fn serialize_audio_response(value: &AudioResponse) -> Vec<u8> {
    serialize(&ShallowSerializedMessage::AudioResp(value))
}

pub fn serialize_error(value: &LingoError) -> Vec<u8> {
    serialize(&ShallowSerializedMessage::Error(value))
}

pub fn deserialize_message<R>(reader: R) -> Result<SerializedMessage, anyhow::Error>
where
    R: std::io::Read,
{
    bincode::deserialize_from(reader).map_err(|err| format_err!("{err}"))
}

pub fn deserialize_translate_response(
    message: SerializedMessage,
) -> Result<TranslateResponse, LingoError> {
    match message {
        SerializedMessage::TranslateResp(resp) => Ok(*resp),
        SerializedMessage::Error(error) => Err(*error),
        _ => Err(LingoError::UnexpectedMessage),
    }
}

pub fn deserialize_audio_response(message: SerializedMessage) -> Result<AudioResponse, LingoError> {
    match message {
        SerializedMessage::AudioResp(resp) => Ok(*resp),
        SerializedMessage::Error(error) => Err(*error),
        _ => Err(LingoError::UnexpectedMessage),
    }
}
