// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod audio;
pub mod client;
pub mod server;
pub mod translation;
