// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod network;
pub mod transport;
