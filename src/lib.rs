#![doc(test(attr(deny(warnings))))]

//! Otori Core builds and stores honeypot profiles: a terminal wizard that
//! assembles a profile draft, a preview step that gates persistence, and a
//! JSON profile store that understands both on-disk layouts.

pub mod cli;
pub mod config;
pub mod errors;
pub mod profile;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Otori Core tracing initialized.");
    });
}
