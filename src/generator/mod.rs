//! React Query module generation.
//!
//! Pipeline: deserialize the service descriptor ([`crate::model`]), classify
//! each method (classify), derive names (names) and cache keys (keys), then
//! emit one hooks module per interface plus the shared `hooks/runtime.ts`,
//! `hooks/context.tsx`, `hooks/README.md`, and `hooks/keys.ts`
//! (options/hooks/context/runtime/readme/keymap). Output is a flat list of
//! [`SourceFile`] records; [`write_files`] persists them.

pub mod classify;
pub mod context;
pub mod hooks;
pub mod imports;
pub mod keymap;
pub mod keys;
pub mod module;
pub mod names;
pub mod options;
pub mod readme;
pub mod runtime;

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::model::{Interface, Method, Service};

use hooks::{emit_infinite_hooks, emit_mutation_hook, emit_query_hooks};
use imports::render_imports;
use module::ModuleWriter;
use options::{
    FileCx, MethodPlan, emit_infinite_query_options, emit_mutation_options, emit_query_options,
};

/// Which call-site surface the generated modules expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmissionMode {
    /// Hook wrappers only; the options factories stay module-private.
    LegacyHooksOnly,
    /// Options factories only; no hook wrappers.
    OptionsExportsOnly,
    /// Both surfaces, with the hook wrappers marked deprecated.
    #[default]
    Both,
}

/// Cache key convention, applied uniformly across a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyConvention {
    /// `['<interface>', '<method>', params]` tuples.
    #[default]
    FlatTuple,
    /// HTTP path template keys with a query-param bag.
    ResourcePath,
}

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Module specifier the generated type imports resolve against.
    pub types_module: String,
    /// Module specifier of the generated HTTP client.
    pub client_module: String,
    /// Import react as a namespace (`import * as React`) instead of named
    /// imports.
    pub react_namespace_import: bool,
    /// Emit `import type` / inline `type` markers for type-only imports.
    pub type_only_imports: bool,
    pub emission_mode: EmissionMode,
    pub key_convention: KeyConvention,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            types_module: "../types".to_string(),
            client_module: "../http-client".to_string(),
            react_namespace_import: false,
            type_only_imports: true,
            emission_mode: EmissionMode::default(),
            key_convention: KeyConvention::default(),
        }
    }
}

/// One generated file: a path relative to the output root, and its contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: String,
    pub contents: String,
}

const FILE_HEADER: &str = "// Generated by hookgen. Do not edit.";
const MARKDOWN_HEADER: &str = "<!-- Generated by hookgen. Do not edit. -->";

/// Generate every output file for a service.
///
/// Everything lands under `hooks/` so the relative specifiers inside the
/// emitted modules (`./runtime`, `./context`, the configured `types_module`
/// and `client_module`) resolve identically from every file. Order is
/// stable: `hooks/runtime.ts`, `hooks/context.tsx`, `hooks/README.md`, the
/// flat-tuple key map, then one hooks module per interface in descriptor
/// order. Interfaces with no HTTP-bound methods produce no hooks module.
pub fn generate(service: &Service, opts: &GeneratorOptions) -> Result<Vec<SourceFile>, String> {
    validate(service)?;
    let mut files = vec![
        SourceFile {
            path: "hooks/runtime.ts".to_string(),
            contents: runtime::runtime_contents(FILE_HEADER),
        },
        SourceFile {
            path: "hooks/context.tsx".to_string(),
            contents: context::context_contents(service, opts, FILE_HEADER),
        },
        SourceFile {
            path: "hooks/README.md".to_string(),
            contents: readme::readme_contents(service, MARKDOWN_HEADER),
        },
    ];
    if opts.key_convention == KeyConvention::FlatTuple {
        files.push(SourceFile {
            path: "hooks/keys.ts".to_string(),
            contents: keymap::keymap_contents(service, opts, FILE_HEADER),
        });
    }
    for interface in &service.interfaces {
        if let Some(file) = interface_module(service, interface, opts) {
            files.push(file);
        }
    }
    for file in &files {
        debug!(path = %file.path, bytes = file.contents.len(), "generated file");
    }
    Ok(files)
}

/// Parse a JSON service descriptor and generate from it.
pub fn generate_from_json(json: &str, opts: &GeneratorOptions) -> Result<Vec<SourceFile>, String> {
    let service: Service =
        serde_json::from_str(json).map_err(|err| format!("Failed to parse service description: {err}"))?;
    generate(&service, opts)
}

/// Reject descriptors that would produce colliding or dangling output.
fn validate(service: &Service) -> Result<(), String> {
    let mut interface_names = BTreeSet::new();
    for interface in &service.interfaces {
        if !interface_names.insert(interface.name.as_str()) {
            return Err(format!("Duplicate interface name '{}'", interface.name));
        }
        let mut method_names = BTreeSet::new();
        for method in &interface.methods {
            if !method_names.insert(method.name.as_str()) {
                return Err(format!(
                    "Duplicate method name '{}' in interface '{}'",
                    method.name, interface.name
                ));
            }
        }
        for route in &interface.routes {
            for binding in &route.bindings {
                if !method_names.contains(binding.method.as_str()) {
                    return Err(format!(
                        "Route '{}' binds unknown method '{}' in interface '{}'",
                        route.path, binding.method, interface.name
                    ));
                }
            }
        }
    }
    Ok(())
}

/// Emit the hooks module for one interface, or `None` if nothing is bound.
fn interface_module(
    service: &Service,
    interface: &Interface,
    opts: &GeneratorOptions,
) -> Option<SourceFile> {
    let mut cx = FileCx::new(service, interface, opts);
    let mut w = ModuleWriter::new();

    // Stable output: methods ordered by their primary hook name.
    let mut methods: Vec<&Method> = interface.methods.iter().collect();
    methods.sort_by_key(|m| {
        let is_get = interface
            .http_binding(&m.name)
            .is_some_and(|(_, b)| b.verb.is_get());
        names::hook_name(&m.name, is_get, false, false)
    });

    let emit_hooks = opts.emission_mode != EmissionMode::OptionsExportsOnly;
    for method in methods {
        let Some(plan) = MethodPlan::new(service, interface, method) else {
            continue;
        };
        if plan.is_query() {
            emit_query_options(&mut w, &mut cx, &plan);
            if plan.paginated {
                emit_infinite_query_options(&mut w, &mut cx, &plan);
            }
            if emit_hooks {
                emit_query_hooks(&mut w, &mut cx, &plan);
                if plan.paginated {
                    emit_infinite_hooks(&mut w, &mut cx, &plan);
                }
            }
        } else {
            emit_mutation_options(&mut w, &mut cx, &plan);
            if emit_hooks {
                emit_mutation_hook(&mut w, &mut cx, &plan);
            }
        }
    }

    if w.is_empty() {
        return None;
    }
    let imports = render_imports(
        &[&cx.tanstack, &cx.runtime, &cx.context, &cx.types],
        opts.type_only_imports,
    );
    Some(SourceFile {
        path: names::hooks_file_path(&interface.name),
        contents: w.assemble(FILE_HEADER, imports),
    })
}

/// Write generated files under `out_dir`, creating directories as needed.
pub fn write_files(files: &[SourceFile], out_dir: &Path) -> Result<(), String> {
    for file in files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| format!("Failed to create {}: {err}", parent.display()))?;
        }
        fs::write(&path, &file.contents)
            .map_err(|err| format!("Failed to write {}: {err}", path.display()))?;
        debug!(path = %path.display(), "wrote generated file");
    }
    Ok(())
}
