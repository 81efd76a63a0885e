//! Maps languages and file extensions to engine instances.

use crate::parser::ParseEngine;
use crate::parser::utils::extension_of;
use std::collections::HashMap;
use std::sync::Arc;

/// Holds one singleton engine per language plus a derived
/// extension-to-language table. Built once at process start and read-only
/// afterwards; registration is idempotent and last-wins per extension.
#[derive(Default, Clone)]
pub struct ParserRegistry {
    engines: HashMap<String, Arc<dyn ParseEngine>>,
    extensions: HashMap<String, String>,
}

impl ParserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, engine: Arc<dyn ParseEngine>) {
        let language = engine.language().to_string();
        for ext in engine.extensions() {
            self.extensions
                .insert(ext.to_ascii_lowercase(), language.clone());
        }
        self.engines.insert(language, engine);
    }

    pub fn get(&self, language: &str) -> Option<Arc<dyn ParseEngine>> {
        self.engines.get(language).cloned()
    }

    /// Extension lookup, case-insensitive.
    pub fn get_for_file(&self, path: &str) -> Option<Arc<dyn ParseEngine>> {
        self.language_for_file(path)
            .and_then(|lang| self.get(&lang))
    }

    pub fn language_for_file(&self, path: &str) -> Option<String> {
        let ext = extension_of(path)?;
        self.extensions.get(&ext).cloned()
    }

    pub fn languages(&self) -> Vec<String> {
        let mut languages: Vec<String> = self.engines.keys().cloned().collect();
        languages.sort();
        languages
    }

    pub fn extensions(&self) -> Vec<String> {
        let mut extensions: Vec<String> = self.extensions.keys().cloned().collect();
        extensions.sort();
        extensions
    }
}
