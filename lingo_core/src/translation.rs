// Copyright (c) Lingo Contributors
// SPDX-License-Identifier: Apache-2.0

use lingo_types::messages::{TranslateRequest, TranslateResponse};
use once_cell::sync::Lazy;
use std::collections::HashMap;

#[cfg(test)]
#[path = "unit_tests/service_tests.rs"]
mod service_tests;

/// The fixed phrase returned for each supported language code.
static TRANSLATIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [("ur", "ہیلو"), ("fr", "Bonjour"), ("es", "Hola")]
        .into_iter()
        .collect()
});

/// The translation service. It holds no per-call mutable state, so a
/// single instance can serve arbitrarily many concurrent invocations
/// without locking.
#[derive(Clone, Copy, Debug, Default)]
pub struct TranslationState;

impl TranslationState {
    pub fn new() -> Self {
        Self
    }

    /// Unknown language codes (including the empty string) echo the
    /// original text back. This pass-through is intentional, not an
    /// error.
    pub fn handle_translate_request(&self, request: TranslateRequest) -> TranslateResponse {
        let translated_text = match TRANSLATIONS.get(request.language.as_str()) {
            Some(fixed) => (*fixed).to_string(),
            None => request.text,
        };
        TranslateResponse { translated_text }
    }
}
