// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod error;
pub mod messages;
pub mod serialize;
