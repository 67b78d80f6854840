//! Shared helpers for integration tests

use stackscript_core::{Token, TokenSource};

/// Initialize a tracing subscriber for tests with DEBUG level
///
/// Call this at the start of tests where you want to see logging output.
#[allow(dead_code)]
pub fn init_test_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    // Try to initialize, ignore error if already initialized
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A token source that records how many tokens were pulled from it
pub struct CountingSource {
    tokens: Vec<Token>,
    pub reads: usize,
}

impl CountingSource {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, reads: 0 }
    }
}

impl TokenSource for &mut CountingSource {
    fn next_token(&mut self) -> Token {
        let token = self
            .tokens
            .get(self.reads)
            .cloned()
            .unwrap_or(Token::EndOfScript);
        self.reads += 1;
        token
    }
}
