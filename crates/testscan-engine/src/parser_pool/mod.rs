//! Parser Pool (§4.B): a bounded pool of `tree_sitter::Parser` instances per
//! language. A parser is single-owner while held — the pool hands out an owned
//! handle and never lets two holders see the same instance concurrently.

mod cache;
mod grammars;

pub use cache::{content_hash, ParseCache};
pub use grammars::tree_sitter_language;

use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TryRecvError};
use rustc_hash::FxHashMap;
use testscan_core::Language;

use crate::cancellation::ScanCancellation;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, thiserror::Error)]
pub enum ParsePoolError {
    #[error("parser acquisition cancelled")]
    Cancelled,
    #[error("failed to parse source as {0}")]
    ParseFailed(Language),
    #[error("no pool configured for language {0}")]
    UnconfiguredLanguage(Language),
}

struct LanguagePool {
    tx: Sender<tree_sitter::Parser>,
    rx: Receiver<tree_sitter::Parser>,
}

/// Owns one bounded channel of parser instances per language. Channels start
/// pre-filled to `capacity_per_language`; acquiring blocks (politely, checking
/// cancellation) when the channel is momentarily empty.
pub struct ParserPool {
    pools: FxHashMap<Language, LanguagePool>,
    cache: ParseCache,
}

impl ParserPool {
    pub fn new(capacity_per_language: usize) -> Self {
        let mut pools = FxHashMap::default();
        for &language in Language::ALL {
            let (tx, rx) = crossbeam_channel::bounded(capacity_per_language.max(1));
            for _ in 0..capacity_per_language.max(1) {
                if let Some(parser) = new_parser(language) {
                    let _ = tx.send(parser);
                }
            }
            pools.insert(language, LanguagePool { tx, rx });
        }
        Self {
            pools,
            cache: ParseCache::default(),
        }
    }

    /// Acquire a parser for `language`. Blocks until one is free or `cancellation`
    /// is tripped, in which case `Err(ParsePoolError::Cancelled)` is returned.
    pub fn acquire(
        &self,
        language: Language,
        cancellation: &ScanCancellation,
    ) -> Result<ParserHandle<'_>, ParsePoolError> {
        let pool = self
            .pools
            .get(&language)
            .ok_or(ParsePoolError::UnconfiguredLanguage(language))?;

        loop {
            if cancellation.is_cancelled() {
                return Err(ParsePoolError::Cancelled);
            }
            match pool.rx.try_recv() {
                Ok(parser) => {
                    return Ok(ParserHandle {
                        language,
                        parser: Some(parser),
                        return_tx: pool.tx.clone(),
                    })
                }
                Err(TryRecvError::Empty) => std::thread::sleep(POLL_INTERVAL),
                Err(TryRecvError::Disconnected) => {
                    return Err(ParsePoolError::UnconfiguredLanguage(language))
                }
            }
        }
    }

    pub fn release(&self, handle: ParserHandle<'_>) {
        drop(handle);
    }

    pub fn cache(&self) -> &ParseCache {
        &self.cache
    }
}

fn new_parser(language: Language) -> Option<tree_sitter::Parser> {
    let mut parser = tree_sitter::Parser::new();
    parser.set_language(&tree_sitter_language(language)).ok()?;
    Some(parser)
}

/// An owned, single-holder parser instance. Returns itself to the pool on drop,
/// resetting tree-sitter's internal state so a failed parse never poisons the
/// instance for its next borrower.
pub struct ParserHandle<'pool> {
    language: Language,
    parser: Option<tree_sitter::Parser>,
    return_tx: Sender<tree_sitter::Parser>,
}

impl<'pool> ParserHandle<'pool> {
    pub fn language(&self) -> Language {
        self.language
    }

    /// Parse `bytes`, returning the syntax tree. The tree borrows nothing from
    /// `self` — callers must keep `bytes` alive for as long as they hold the tree,
    /// since tree-sitter nodes re-read source text lazily.
    pub fn parse(&mut self, bytes: &[u8]) -> Result<tree_sitter::Tree, ParsePoolError> {
        let parser = self.parser.as_mut().expect("handle parser taken");
        parser
            .parse(bytes, None)
            .ok_or(ParsePoolError::ParseFailed(self.language))
    }
}

impl<'pool> Drop for ParserHandle<'pool> {
    fn drop(&mut self) {
        if let Some(mut parser) = self.parser.take() {
            parser.reset();
            let _ = self.return_tx.send(parser);
        }
    }
}
