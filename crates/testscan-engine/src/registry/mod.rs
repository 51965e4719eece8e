//! Framework Registry (§4.D): the immutable, process-wide table of every
//! framework `Definition` the engine knows how to detect and extract.
//!
//! Registration happens once, at first access, by the strategy modules under
//! `crate::extractors` — each one contributes a `FrameworkDefinition` built from
//! its matchers (`crate::signals`) and its extractor (`crate::extractors::Extractor`).
//! After `builtin_registry()` returns the first time, the table is frozen; there is
//! no API to mutate it, only to build a fresh one via `FrameworkRegistryBuilder`.

mod definition;

pub use definition::FrameworkDefinition;

use std::sync::OnceLock;

use rustc_hash::FxHashMap;
use testscan_core::Language;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("framework `{0}` is already registered")]
    DuplicateName(String),
}

/// Holds all framework Definitions, indexed by name. Built once via
/// [`FrameworkRegistryBuilder`], then frozen — every method here takes `&self`.
pub struct FrameworkRegistry {
    by_name: FxHashMap<String, FrameworkDefinition>,
}

impl FrameworkRegistry {
    pub fn builder() -> FrameworkRegistryBuilder {
        FrameworkRegistryBuilder::default()
    }

    pub fn by_name(&self, name: &str) -> Option<&FrameworkDefinition> {
        self.by_name.get(name)
    }

    /// Every definition whose language set intersects `lang`, in a stable
    /// (lexicographic by name) order so the arbitrator's iteration order — and
    /// hence its tie-breaking — is deterministic.
    pub fn all_for_language(&self, lang: Language) -> Vec<&FrameworkDefinition> {
        let mut out: Vec<&FrameworkDefinition> = self
            .by_name
            .values()
            .filter(|def| def.languages.contains(&lang))
            .collect();
        out.sort_by(|a, b| a.name.cmp(b.name));
        out
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }
}

#[derive(Default)]
pub struct FrameworkRegistryBuilder {
    by_name: FxHashMap<String, FrameworkDefinition>,
}

impl FrameworkRegistryBuilder {
    /// Registers a definition. Fails if a definition with the same name was
    /// already registered — the registry "must not accept a second registration
    /// under the same name" (§4.D).
    pub fn register(&mut self, def: FrameworkDefinition) -> Result<(), RegistryError> {
        if self.by_name.contains_key(def.name) {
            return Err(RegistryError::DuplicateName(def.name.to_string()));
        }
        self.by_name.insert(def.name.to_string(), def);
        Ok(())
    }

    pub fn build(self) -> FrameworkRegistry {
        FrameworkRegistry {
            by_name: self.by_name,
        }
    }
}

static BUILTIN: OnceLock<FrameworkRegistry> = OnceLock::new();

/// The process-wide registry of all ~20 built-in framework strategies,
/// constructed once and reused by every scan thereafter.
pub fn builtin_registry() -> &'static FrameworkRegistry {
    BUILTIN.get_or_init(|| {
        crate::extractors::register_all(FrameworkRegistry::builder())
            .expect("built-in framework strategies must register without name collisions")
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_registration_is_rejected() {
        let mut builder = FrameworkRegistry::builder();
        let def = crate::extractors::jest::definition();
        builder.register(def).unwrap();
        let dup = crate::extractors::jest::definition();
        assert!(builder.register(dup).is_err());
    }

    #[test]
    fn builtin_registry_has_every_language_covered() {
        let registry = builtin_registry();
        assert!(registry.len() >= 20);
        for lang in Language::ALL {
            assert!(
                !registry.all_for_language(*lang).is_empty(),
                "no framework registered for {lang}"
            );
        }
    }
}
