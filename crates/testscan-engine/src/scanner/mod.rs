//! Top-level `Scanner` orchestrating walk → detect → extract → `Inventory` (§4.H).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use testscan_core::config::ScanOptions;
use testscan_core::errors::{ScanError, ScanErrorKind, ScanPhase};
use testscan_core::events::{ScanCompleteEvent, ScanErrorEvent, ScanProgressEvent, ScanStartedEvent};
use testscan_core::{Inventory, Language, ScanEventHandler};

use crate::cancellation::ScanCancellation;
use crate::config_scope::ConfigScope;
use crate::detection::{self, DetectionWinner};
use crate::parser_pool::ParserPool;
use crate::registry::{builtin_registry, FrameworkRegistry};
use crate::signals::Signal;
use crate::source::{DiscoveredFile, LocalSource, Source, SourceError};

const PROGRESS_INTERVAL: usize = 100;

/// Orchestrates a single scan of a [`Source`] against the built-in framework
/// registry. Holds no state of its own between scans besides the cancellation
/// token, so one `Scanner` can be reused (or cancelled mid-flight) across calls.
pub struct Scanner {
    options: ScanOptions,
    registry: &'static FrameworkRegistry,
    cancellation: ScanCancellation,
}

impl Scanner {
    pub fn new(options: ScanOptions) -> Self {
        Self {
            options,
            registry: builtin_registry(),
            cancellation: ScanCancellation::new(),
        }
    }

    /// A handle to this scan's cancellation flag, for callers that need to stop
    /// a scan running on another thread.
    pub fn cancellation(&self) -> &ScanCancellation {
        &self.cancellation
    }

    /// Scans `root` on the local filesystem and returns the resulting
    /// `Inventory` plus any non-fatal per-file errors gathered along the way.
    pub fn scan_local(
        &self,
        root: impl Into<std::path::PathBuf>,
        event_handler: &dyn ScanEventHandler,
    ) -> Result<(Inventory, Vec<ScanError>), ScanError> {
        let root = root.into();
        let source = LocalSource::new(root)
            .with_include(self.options.include.clone())
            .with_exclude(self.options.exclude.clone())
            .with_follow_symlinks(self.options.effective_follow_symlinks());
        self.scan(&source, event_handler)
    }

    /// Scans an arbitrary [`Source`], independent of where it's actually rooted.
    pub fn scan(
        &self,
        source: &dyn Source,
        event_handler: &dyn ScanEventHandler,
    ) -> Result<(Inventory, Vec<ScanError>), ScanError> {
        self.cancellation.reset();
        let started = Instant::now();
        let root_path = source.root().to_string_lossy().to_string();

        event_handler.on_scan_started(&ScanStartedEvent { root_path: &root_path });

        let deadline = self.options.timeout.map(|d| started + d);

        let files = match source.list_files(&self.cancellation) {
            Ok(files) => files,
            Err(SourceError::Cancelled) => {
                let err = ScanError::cancelled();
                event_handler.on_scan_error(&ScanErrorEvent { error: &err });
                return Err(err);
            }
            Err(e) => {
                let err = ScanError::without_path(ScanErrorKind::SourceError, ScanPhase::Walking, e.to_string());
                event_handler.on_scan_error(&ScanErrorEvent { error: &err });
                return Err(err);
            }
        };

        event_handler.on_scan_progress(&ScanProgressEvent {
            files_discovered: files.len(),
            files_processed: 0,
        });

        // Phase 1: project-level config files bias detection for the files that
        // follow. Read sequentially — there are rarely more than a handful.
        let config_scopes = collect_config_scopes(source, &files, self.registry);

        let parser_pool = ParserPool::new(self.options.effective_workers().max(1));
        let max_nesting_depth = self.options.effective_max_nesting_depth();
        let max_file_size = self.options.effective_max_file_size();
        let processed = AtomicUsize::new(0);
        let total = files.len();

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.options.effective_workers())
            .build()
            .map_err(|e| ScanError::without_path(ScanErrorKind::SourceError, ScanPhase::Walking, e.to_string()))?;

        // Phase 2: detect + extract every remaining file concurrently.
        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .filter_map(|file| {
                    if self.cancellation.is_cancelled() || past_deadline(deadline) {
                        return None;
                    }

                    let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                    if count % PROGRESS_INTERVAL == 0 || count == total {
                        event_handler.on_scan_progress(&ScanProgressEvent {
                            files_discovered: total,
                            files_processed: count,
                        });
                    }

                    let outcome = process_file(
                        source,
                        file,
                        self.registry,
                        &parser_pool,
                        &self.cancellation,
                        max_nesting_depth,
                        max_file_size,
                        &root_path,
                        &config_scopes,
                    );
                    match &outcome {
                        FileOutcome::Error(err) | FileOutcome::TestFileWithError(_, err) => {
                            event_handler.on_scan_error(&ScanErrorEvent { error: err });
                            tracing::warn!(path = %file.path.display(), error = %err.cause, "scan error");
                        }
                        _ => {}
                    }
                    Some(outcome)
                })
                .collect()
        });

        let mut inventory = Inventory::new(root_path.clone());
        let mut errors = Vec::new();
        for outcome in outcomes {
            match outcome {
                FileOutcome::TestFile(tf) => inventory.files.push(tf),
                FileOutcome::TestFileWithError(tf, err) => {
                    inventory.files.push(tf);
                    errors.push(err);
                }
                FileOutcome::NoMatch => {}
                FileOutcome::Error(err) => errors.push(err),
            }
        }

        if self.cancellation.is_cancelled() || past_deadline(deadline) {
            errors.push(ScanError::cancelled());
        }

        event_handler.on_scan_complete(&ScanCompleteEvent {
            files_total: inventory.files.len(),
            tests_total: inventory.total_tests(),
            errors_total: errors.len(),
            elapsed: started.elapsed(),
        });

        Ok((inventory, errors))
    }
}

fn past_deadline(deadline: Option<Instant>) -> bool {
    deadline.map(|d| Instant::now() >= d).unwrap_or(false)
}

/// Reads every file whose name matches a registered framework's config-file
/// patterns and parses it into a `ConfigScope`, indexed by framework name. A
/// malformed config is recorded nowhere here — the caller's detection pass
/// simply proceeds without that framework's scope, which is no worse than if
/// the config file hadn't been found at all.
fn collect_config_scopes(
    source: &dyn Source,
    files: &[DiscoveredFile],
    registry: &FrameworkRegistry,
) -> FxHashMap<String, ConfigScope> {
    let mut scopes = FxHashMap::default();
    for file in files {
        let Some(filename) = file.path.file_name().map(|n| n.to_string_lossy().to_string()) else {
            continue;
        };
        for lang in Language::ALL {
            for def in registry.all_for_language(*lang) {
                let Some(parser) = &def.config_parser else { continue };
                let matches_name = def
                    .matchers
                    .iter()
                    .any(|m| m.match_signal(&Signal::ConfigFilename(&filename)).confidence > 0);
                if !matches_name || scopes.contains_key(def.name) {
                    continue;
                }
                if let Ok(bytes) = source.open(&file.path) {
                    if let Ok(scope) = parser.parse(&bytes) {
                        scopes.insert(def.name.to_string(), scope);
                    }
                }
            }
        }
    }
    scopes
}

enum FileOutcome {
    TestFile(testscan_core::TestFile),
    /// Extraction succeeded but stopped descending past `max_nesting_depth`; the
    /// partial `TestFile` is kept (§4.G) alongside the phase-`extraction` error
    /// it produces (§7).
    TestFileWithError(testscan_core::TestFile, ScanError),
    NoMatch,
    Error(ScanError),
}

#[allow(clippy::too_many_arguments)]
fn process_file(
    source: &dyn Source,
    file: &DiscoveredFile,
    registry: &FrameworkRegistry,
    parser_pool: &ParserPool,
    cancellation: &ScanCancellation,
    max_nesting_depth: u32,
    max_file_size: u64,
    root_path: &str,
    config_scopes: &FxHashMap<String, ConfigScope>,
) -> FileOutcome {
    let rel_path = file
        .path
        .strip_prefix(root_path)
        .unwrap_or(&file.path)
        .to_string_lossy()
        .trim_start_matches('/')
        .to_string();

    if file.size > max_file_size {
        return FileOutcome::Error(ScanError::new(
            ScanErrorKind::Oversize,
            ScanPhase::Walking,
            rel_path,
            format!("file size {} exceeds max {}", file.size, max_file_size),
        ));
    }

    let Some(filename) = file.path.file_name().map(|n| n.to_string_lossy().to_string()) else {
        return FileOutcome::NoMatch;
    };
    let Some(ext) = file.path.extension().map(|e| e.to_string_lossy().to_string()) else {
        return FileOutcome::NoMatch;
    };
    let Some(language) = Language::from_extension(&ext) else {
        return FileOutcome::NoMatch;
    };

    let bytes = match source.open(&file.path) {
        Ok(bytes) => bytes,
        Err(e) => {
            return FileOutcome::Error(ScanError::new(
                ScanErrorKind::SourceError,
                ScanPhase::Walking,
                rel_path,
                e.to_string(),
            ))
        }
    };

    let winner: DetectionWinner = match detection::detect(
        registry,
        language,
        &filename,
        &rel_path,
        &bytes,
        detection::DEFAULT_FLOOR,
        config_scopes,
    ) {
        Some(w) => w,
        None => return FileOutcome::NoMatch,
    };

    let Some(def) = registry.by_name(winner.framework) else {
        return FileOutcome::Error(ScanError::new(
            ScanErrorKind::DetectionError,
            ScanPhase::Detection,
            rel_path,
            format!("winning framework `{}` not found in registry", winner.framework),
        ));
    };

    let hash = crate::parser_pool::content_hash(&bytes);
    if let Some(mut cached) = parser_pool.cache().get(hash, def.name) {
        cached.path = rel_path.clone();
        if config_scopes.contains_key(def.name) {
            cached.config_scope = Some(def.name.to_string());
        }
        return if cached.is_empty() {
            FileOutcome::NoMatch
        } else {
            FileOutcome::TestFile(cached)
        };
    }

    let ctx = crate::extractors::ExtractionContext {
        path: &rel_path,
        bytes: &bytes,
        parser_pool,
        cancellation,
        max_nesting_depth,
        depth_exceeded: std::cell::Cell::new(false),
    };

    match def.extractor.extract(&ctx) {
        Ok(mut test_file) => {
            let depth_exceeded = ctx.depth_exceeded.get();
            parser_pool.cache().insert(hash, def.name, test_file.clone());
            if config_scopes.contains_key(def.name) {
                test_file.config_scope = Some(def.name.to_string());
            }
            if test_file.is_empty() {
                FileOutcome::NoMatch
            } else if depth_exceeded {
                let err = ScanError::new(
                    ScanErrorKind::ExtractionError,
                    ScanPhase::Extraction,
                    rel_path,
                    crate::extractors::ExtractionError::DepthExceeded(max_nesting_depth).to_string(),
                );
                FileOutcome::TestFileWithError(test_file, err)
            } else {
                FileOutcome::TestFile(test_file)
            }
        }
        Err(e) if is_cancelled(&e) => {
            FileOutcome::Error(ScanError::new(ScanErrorKind::Cancelled, ScanPhase::Extraction, rel_path, e.to_string()))
        }
        Err(e) => FileOutcome::Error(ScanError::new(
            ScanErrorKind::ExtractionError,
            ScanPhase::Extraction,
            rel_path,
            e.to_string(),
        )),
    }
}

fn is_cancelled(e: &crate::extractors::ExtractionError) -> bool {
    matches!(e, crate::extractors::ExtractionError::Cancelled)
        || matches!(e, crate::extractors::ExtractionError::Parser(crate::parser_pool::ParsePoolError::Cancelled))
}
