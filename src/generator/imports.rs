//! Import bookkeeping for emitted modules.
//!
//! Emitters register every external name they reference against the module it
//! comes from; rendering dedupes, sorts, and prints one import statement per
//! module with package imports ahead of local ones.

use std::collections::BTreeSet;

/// Collects names imported from one module.
#[derive(Debug, Clone)]
pub struct ImportBuilder {
    module: String,
    values: BTreeSet<String>,
    types: BTreeSet<String>,
}

impl ImportBuilder {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            values: BTreeSet::new(),
            types: BTreeSet::new(),
        }
    }

    /// Register a runtime import and hand the name back for emission.
    pub fn value(&mut self, name: &str) -> String {
        self.values.insert(name.to_string());
        name.to_string()
    }

    /// Register a type-only import. `void` is a keyword, never an import.
    pub fn ty(&mut self, name: &str) -> String {
        if name != "void" {
            self.types.insert(name.to_string());
        }
        name.to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.types.is_empty()
    }

    fn sort_key(&self) -> (bool, String) {
        let local = self.module.starts_with('.');
        let name = self.module.trim_start_matches('@').to_string();
        (local, name)
    }

    fn render(&self, type_only: bool) -> String {
        let mut names: Vec<(&str, bool)> = self
            .values
            .iter()
            .map(|n| (n.as_str(), false))
            .chain(
                self.types
                    .iter()
                    .filter(|n| !self.values.contains(*n))
                    .map(|n| (n.as_str(), true)),
            )
            .collect();
        names.sort_by_key(|(n, _)| n.to_lowercase());

        if type_only && self.values.is_empty() {
            let list = names.iter().map(|(n, _)| *n).collect::<Vec<_>>().join(", ");
            return format!("import type {{ {list} }} from '{}';", self.module);
        }
        let list = names
            .iter()
            .map(|(n, is_type)| {
                if type_only && *is_type {
                    format!("type {n}")
                } else {
                    (*n).to_string()
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("import {{ {list} }} from '{}';", self.module)
    }
}

/// Render import statements for a module: package imports first, then local
/// ones, alphabetical within each group (ignoring a leading `@`). Empty
/// builders are skipped.
pub fn render_imports(builders: &[&ImportBuilder], type_only: bool) -> Vec<String> {
    let mut nonempty: Vec<&&ImportBuilder> = builders.iter().filter(|b| !b.is_empty()).collect();
    nonempty.sort_by_key(|b| b.sort_key());
    nonempty.iter().map(|b| b.render(type_only)).collect()
}
