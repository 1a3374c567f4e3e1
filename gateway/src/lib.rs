// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod errors;
pub mod history;
pub mod requests;
pub mod responses;
mod routes;

pub use errors::GatewayError;
pub use routes::{app, AppState};
