//! Kiwi front-end driver.
//!
//! Wires the lexer and parser to the file system and the terminal:
//!
//! ```text
//! path / stdin ──► Session::lex ──► TokenStream
//!                                       │
//!                                       ▼
//!                  Session::parse ──► ParseOutput + DiagnosticQueue
//! ```
//!
//! The `kiwi` binary is a thin argument parser over [`commands`].

pub mod commands;
mod session;

use std::sync::Once;

pub use session::{Session, SourceError, STDIN_PATH};

static TRACING_INIT: Once = Once::new();

/// Install a hierarchical tracing subscriber when `RUST_LOG` is set.
///
/// Safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(tracing_tree::HierarchicalLayer::new(2).with_targets(true))
                .with(filter)
                .init();
        }
    });
}
