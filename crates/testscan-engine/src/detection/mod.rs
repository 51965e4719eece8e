//! Detection Arbitrator (§4.F): for a candidate file, gather matches from every
//! framework whose language applies, collapse each framework's matcher results
//! into one confidence score, and select a winner under the tie-break order.

use glob::Pattern;
use rustc_hash::FxHashMap;
use testscan_core::{FrameworkPriority, Language};

use crate::config_scope::ConfigScope;
use crate::registry::{FrameworkDefinition, FrameworkRegistry};
use crate::signals::Signal;

/// Confidence floor below which a framework is discarded (§4.F step 4).
pub const DEFAULT_FLOOR: u8 = 30;

#[derive(Debug, Clone)]
pub struct DetectionWinner {
    pub framework: &'static str,
    pub priority: FrameworkPriority,
    pub confidence: u8,
    pub reasons: Vec<String>,
}

/// Detects which registered framework, if any, a candidate file belongs to.
///
/// `language` is the result of extension-based inference (§4.F "Language
/// inference"); frameworks whose language set doesn't contain it are never
/// considered. `filename` is the file's base name; `rel_path` is its
/// inventory-relative path, used only to weigh a framework's own
/// `ConfigScope` include/exclude patterns. `bytes` is read once by the caller
/// and passed in — the arbitrator itself never performs I/O.
pub fn detect(
    registry: &FrameworkRegistry,
    language: Language,
    filename: &str,
    rel_path: &str,
    bytes: &[u8],
    floor: u8,
    config_scopes: &FxHashMap<String, ConfigScope>,
) -> Option<DetectionWinner> {
    let candidates = registry.all_for_language(language);
    if candidates.is_empty() {
        return None;
    }

    let mut survivors: Vec<(&FrameworkDefinition, Accumulator)> = Vec::new();

    // Step 1: filename (and config-filename) signal against every candidate,
    // narrowed by that framework's own exclude patterns and broadened by its
    // include patterns, both read from its project config (§6).
    for def in candidates {
        if excluded_by_config_scope(def.name, rel_path, config_scopes) {
            continue;
        }
        let mut acc = Accumulator::default();
        acc.feed(def, &Signal::Filename(filename));
        acc.feed(def, &Signal::ConfigFilename(filename));
        if included_by_config_scope(def.name, rel_path, config_scopes) {
            acc.confidence = acc.confidence.saturating_add(20).min(100);
            acc.reasons
                .push(format!("path matches `{}`'s configured include pattern", def.name));
        }
        if acc.confidence > 0 {
            survivors.push((def, acc));
        }
    }

    if survivors.is_empty() {
        return None;
    }

    // Step 2: content signal, read once, against every survivor.
    let content = Signal::FileContent(bytes);
    for (def, acc) in survivors.iter_mut() {
        acc.feed(def, &content);
    }

    // Step 3: a framework whose project config enables implicit globals gets a
    // chance to match even when the file carries no import statement of its own.
    for (def, acc) in survivors.iter_mut() {
        if config_scopes.get(def.name).map(|s| s.globals).unwrap_or(false) {
            acc.feed(def, &Signal::ConfigScopeHit(def.name));
        }
    }

    // Step 4: discard below floor.
    survivors.retain(|(_, acc)| acc.confidence >= floor);
    if survivors.is_empty() {
        return None;
    }

    // Step 5: select by descending (priority, confidence), tie-broken by
    // ascending framework name.
    survivors.sort_by(|(a_def, a_acc), (b_def, b_acc)| {
        b_def
            .priority
            .cmp(&a_def.priority)
            .then(b_acc.confidence.cmp(&a_acc.confidence))
            .then(a_def.name.cmp(b_def.name))
    });

    let (winner, acc) = survivors.into_iter().next()?;
    Some(DetectionWinner {
        framework: winner.name,
        priority: winner.priority,
        confidence: acc.confidence,
        reasons: acc.reasons,
    })
}

fn excluded_by_config_scope(name: &str, rel_path: &str, config_scopes: &FxHashMap<String, ConfigScope>) -> bool {
    let Some(scope) = config_scopes.get(name) else { return false };
    scope
        .exclude
        .iter()
        .any(|pattern| Pattern::new(pattern).map(|p| p.matches(rel_path)).unwrap_or(false))
}

fn included_by_config_scope(name: &str, rel_path: &str, config_scopes: &FxHashMap<String, ConfigScope>) -> bool {
    let Some(scope) = config_scopes.get(name) else { return false };
    scope
        .include
        .iter()
        .any(|pattern| Pattern::new(pattern).map(|p| p.matches(rel_path)).unwrap_or(false))
}

/// Accumulates a single framework's matcher results across signal rounds:
/// confidences add (capped at 100), a definite match short-circuits to 100.
#[derive(Default)]
struct Accumulator {
    confidence: u8,
    definite: bool,
    reasons: Vec<String>,
}

impl Accumulator {
    fn feed(&mut self, def: &FrameworkDefinition, signal: &Signal) {
        if self.definite {
            return;
        }
        for matcher in &def.matchers {
            let result = matcher.match_signal(signal);
            if result.confidence == 0 && !result.is_definite {
                continue;
            }
            if result.is_definite {
                self.definite = true;
                self.confidence = 100;
                self.reasons = vec![result.reason];
                return;
            }
            self.confidence = self.confidence.saturating_add(result.confidence).min(100);
            self.reasons.push(result.reason);
        }
    }
}
