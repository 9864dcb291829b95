//! Type-safe query key module emission (`hooks/keys.ts`).
//!
//! The emitted module mirrors the flat-tuple key convention: `QueryKeyMap`
//! types every `[interface, method, params]` tuple the generated options
//! factories produce, and `matchQueryKey` builds partial keys for cache
//! operations (`invalidateQueries`, `removeQueries`) at whatever depth the
//! caller needs. Only emitted under [`KeyConvention::FlatTuple`]; resource
//! path keys are plain path strings and need no map.
//!
//! [`KeyConvention::FlatTuple`]: super::KeyConvention::FlatTuple

use crate::model::{Method, Service};

use super::GeneratorOptions;
use super::imports::{ImportBuilder, render_imports};
use super::module::ModuleWriter;
use super::names;

/// Build the complete `hooks/keys.ts` module.
pub fn keymap_contents(service: &Service, opts: &GeneratorOptions, header: &str) -> String {
    let mut types = ImportBuilder::new(opts.types_module.clone());
    let mut w = ModuleWriter::new();

    emit_key_map(&mut w, service, &mut types);
    w.blank();
    emit_type_helpers(&mut w);
    w.blank();
    emit_match_query_key(&mut w);

    w.assemble(header, render_imports(&[&types], opts.type_only_imports))
}

fn emit_key_map(w: &mut ModuleWriter, service: &Service, types: &mut ImportBuilder) {
    w.push("/**");
    w.push(" * Type mapping for all available query keys in the service");
    w.push(" */");
    w.push("export interface QueryKeyMap {");
    for interface in &service.interfaces {
        w.push_at(1, format!("{}: {{", names::camel(&interface.name)));
        for method in &interface.methods {
            w.push_at(
                2,
                format!("{}: {};", names::camel(&method.name), params_entry(method, types)),
            );
        }
        w.push_at(1, "};");
    }
    w.push("}");
}

/// The value type of one map entry. Methods without parameters key on the
/// empty object, so their entry is `undefined`; all-optional params keep the
/// `| undefined` escape hatch the call sites have.
fn params_entry(method: &Method, types: &mut ImportBuilder) -> String {
    if !method.has_params() {
        return "undefined".to_string();
    }
    let params = types.ty(&names::params_type_name(&method.name));
    if method.params_all_optional() {
        format!("{params} | undefined")
    } else {
        params
    }
}

fn emit_type_helpers(w: &mut ModuleWriter) {
    w.push("/**");
    w.push(" * Extract all service names from QueryKeyMap");
    w.push(" */");
    w.push("export type ServiceKeys = keyof QueryKeyMap;");
    w.blank();
    w.push("/**");
    w.push(" * Extract operation names for a given service");
    w.push(" */");
    w.push("export type OperationKeys<S extends ServiceKeys> = keyof QueryKeyMap[S];");
    w.blank();
    w.push("/**");
    w.push(" * Extract parameter type for a given service and operation");
    w.push(" */");
    w.push("export type OperationParams<");
    w.push_at(1, "S extends ServiceKeys,");
    w.push_at(1, "O extends OperationKeys<S>");
    w.push("> = QueryKeyMap[S][O];");
}

fn emit_match_query_key(w: &mut ModuleWriter) {
    w.push("/**");
    w.push(" * Build type-safe query keys for React Query cache operations");
    w.push(" *");
    w.push(" * @example");
    w.push(" * // Match all queries for a service");
    w.push(" * matchQueryKey('widget')");
    w.push(" * // Returns: ['widget']");
    w.push(" *");
    w.push(" * @example");
    w.push(" * // Match all queries for a specific operation");
    w.push(" * matchQueryKey('widget', 'getWidgets')");
    w.push(" * // Returns: ['widget', 'getWidgets']");
    w.push(" *");
    w.push(" * @example");
    w.push(" * // Match specific query with parameters");
    w.push(" * matchQueryKey('widget', 'getWidgets', { status: 'active' })");
    w.push(" * // Returns: ['widget', 'getWidgets', { status: 'active' }]");
    w.push(" */");
    w.push("export function matchQueryKey<S extends ServiceKeys>(");
    w.push_at(1, "service: S");
    w.push("): readonly [S];");
    w.blank();
    w.push("export function matchQueryKey<");
    w.push_at(1, "S extends ServiceKeys,");
    w.push_at(1, "O extends OperationKeys<S>");
    w.push(">(");
    w.push_at(1, "service: S,");
    w.push_at(1, "operation: O");
    w.push("): readonly [S, O];");
    w.blank();
    w.push("export function matchQueryKey<");
    w.push_at(1, "S extends ServiceKeys,");
    w.push_at(1, "O extends OperationKeys<S>");
    w.push(">(");
    w.push_at(1, "service: S,");
    w.push_at(1, "operation: O,");
    w.push_at(
        1,
        "params: OperationParams<S, O> extends undefined ? undefined : OperationParams<S, O>",
    );
    w.push("): readonly [S, O, OperationParams<S, O> extends undefined ? {} : OperationParams<S, O>];");
    w.blank();
    w.push("export function matchQueryKey<");
    w.push_at(1, "S extends ServiceKeys,");
    w.push_at(1, "O extends OperationKeys<S>");
    w.push(">(");
    w.push_at(1, "service: S,");
    w.push_at(1, "operation?: O,");
    w.push_at(1, "params?: OperationParams<S, O>");
    w.push(") {");
    w.push_at(1, "if (arguments.length === 3 && operation !== undefined) {");
    w.push_at(2, "const finalParams = params === undefined ? {} : params;");
    w.push_at(2, "return [service, operation, finalParams] as const;");
    w.push_at(1, "}");
    w.push_at(1, "if (operation !== undefined) {");
    w.push_at(2, "return [service, operation] as const;");
    w.push_at(1, "}");
    w.push_at(1, "return [service] as const;");
    w.push("}");
}
