//! Emits `hooks/context.tsx`: the configuration type, the React Provider, and the
//! per-interface service accessors.
//!
//! Two accessor forms exist per interface. The hook form reads the Provider
//! context and throws outside the Provider tree. The getter form takes an
//! explicit config and otherwise falls back to an ambient value that is only
//! ever set through the exported init function, so rendering a Provider never
//! mutates process-wide state.

use crate::model::Service;

use super::GeneratorOptions;
use super::imports::{ImportBuilder, render_imports};
use super::module::ModuleWriter;
use super::names;

pub fn context_contents(service: &Service, opts: &GeneratorOptions, header: &str) -> String {
    let config_type = names::config_type_name(&service.title);
    let context = names::context_name(&service.title);
    let provider = names::provider_name(&service.title);
    let config_hook = names::config_hook_name(&service.title);
    let init_fn = names::ambient_init_name(&service.title);
    let client_options = names::client_options_type_name(&service.title);

    let mut react = ImportBuilder::new("react");
    let mut client = ImportBuilder::new(opts.client_module.clone());
    let mut types = ImportBuilder::new(opts.types_module.clone());

    // With the namespace toggle, react names are qualified instead of imported.
    let react_value = |b: &mut ImportBuilder, name: &str| {
        if opts.react_namespace_import {
            format!("React.{name}")
        } else {
            b.value(name)
        }
    };
    let react_type = |b: &mut ImportBuilder, name: &str| {
        if opts.react_namespace_import {
            format!("React.{name}")
        } else {
            b.ty(name)
        }
    };

    let create_context = react_value(&mut react, "createContext");
    let use_context = react_value(&mut react, "useContext");
    let use_memo = react_value(&mut react, "useMemo");
    let fc = react_type(&mut react, "FC");
    let props_with_children = react_type(&mut react, "PropsWithChildren");

    let fetch_like = client.ty("FetchLike");
    let options_type = client.ty(&client_options);

    let mut w = ModuleWriter::new();

    w.push(format!("export interface {config_type} {{"));
    w.push_at(1, format!("fetch: {fetch_like};"));
    w.push_at(1, format!("options: {options_type};"));
    w.push("}");
    w.blank();

    w.push(format!(
        "const {context} = {create_context}<{config_type} | undefined>(undefined);"
    ));
    w.blank();
    w.push(format!("let ambientConfig: {config_type} | undefined;"));
    w.blank();

    w.push("/**".to_string());
    w.push(" * Installs the fallback configuration used by the service getters when no");
    w.push(" * explicit config is passed. Call once at startup, or per request on the");
    w.push(" * server, before any getter runs.");
    w.push(" */");
    w.push(format!("export function {init_fn}(config: {config_type}): void {{"));
    w.push_at(1, "ambientConfig = config;");
    w.push("}");
    w.blank();

    w.push(format!(
        "export const {provider}: {fc}<{props_with_children}<{config_type}>> = ({{"
    ));
    w.push_at(1, "children,");
    w.push_at(1, "fetch,");
    w.push_at(1, "options,");
    w.push("}) => {");
    w.push_at(1, format!("const value = {use_memo}(() => ({{ fetch, options }}), [fetch, options]);"));
    w.push_at(1, format!("return <{context}.Provider value={{value}}>{{children}}</{context}.Provider>;"));
    w.push("};");
    w.blank();

    w.push("/** Reads the Provider configuration, throwing outside the Provider tree. */");
    w.push(format!("export const {config_hook} = (): {config_type} => {{"));
    w.push_at(1, format!("const config = {use_context}({context});"));
    w.push_at(1, "if (!config) {");
    w.push_at(2, format!("throw new Error('{config_hook} must be used within a {provider}');"));
    w.push_at(1, "}");
    w.push_at(1, "return config;");
    w.push("};");

    for interface in &service.interfaces {
        let service_type = types.ty(&names::service_type_name(&interface.name));
        let client_class = client.value(&names::http_client_class_name(&interface.name));
        let getter = names::service_getter_name(&interface.name);
        let hook = names::service_hook_name(&interface.name);

        w.blank();
        w.push(format!(
            "export const {getter} = (config?: {config_type}): {service_type} => {{"
        ));
        w.push_at(1, "const resolved = config ?? ambientConfig;");
        w.push_at(1, "if (!resolved) {");
        w.push_at(2, "throw new Error(");
        w.push_at(3, format!("'{getter} was called without a config and before {init_fn}',"));
        w.push_at(2, ");");
        w.push_at(1, "}");
        w.push_at(1, format!("return new {client_class}(resolved.fetch, resolved.options);"));
        w.push("};");
        w.blank();
        w.push(format!("export const {hook} = (): {service_type} => {{"));
        w.push_at(1, format!("const config = {config_hook}();"));
        w.push_at(1, format!("return new {client_class}(config.fetch, config.options);"));
        w.push("};");
    }

    let mut imports = Vec::new();
    if opts.react_namespace_import {
        imports.push("import * as React from 'react';".to_string());
    }
    imports.extend(render_imports(&[&react, &client, &types], opts.type_only_imports));
    w.assemble(header, imports)
}
