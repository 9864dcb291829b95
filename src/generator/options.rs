//! Emits the per-method options factories: `queryOptions` wrappers for
//! GET-bound methods, mutation options for everything else, and infinite
//! query options for relay-paginated methods.
//!
//! The factories are the composable surface: hook wrappers (hooks.rs) and
//! consumer call sites both spread them into the TanStack hooks. Every
//! factory accepts an optional trailing config so server-side callers can
//! bypass the React context entirely.

use crate::model::{HttpBinding, HttpRoute, Interface, Method, Service};

use super::classify::{Envelope, is_relay_paginated, resolve_envelope};
use super::imports::ImportBuilder;
use super::keys::QueryKeyBuilder;
use super::module::ModuleWriter;
use super::names;
use super::{EmissionMode, GeneratorOptions};

/// Map a descriptor primitive to its TypeScript spelling.
fn ts_primitive(name: &str) -> &'static str {
    match name {
        "integer" | "number" | "long" | "float" | "double" => "number",
        "boolean" => "boolean",
        "date" | "date-time" => "Date",
        _ => "string",
    }
}

/// Render a descriptor type reference, registering named types for import.
pub(crate) fn ts_type(
    types: &mut ImportBuilder,
    type_name: &str,
    is_primitive: bool,
    is_array: bool,
) -> String {
    let base = if is_primitive {
        ts_primitive(type_name).to_string()
    } else {
        types.ty(&names::pascal(type_name))
    };
    if is_array { format!("{base}[]") } else { base }
}

/// Shared import state for one emitted hooks module.
#[derive(Debug)]
pub(crate) struct FileCx<'a> {
    pub service: &'a Service,
    pub interface: &'a Interface,
    pub opts: &'a GeneratorOptions,
    pub keys: QueryKeyBuilder<'a>,
    pub tanstack: ImportBuilder,
    pub runtime: ImportBuilder,
    pub context: ImportBuilder,
    pub types: ImportBuilder,
}

impl<'a> FileCx<'a> {
    pub fn new(service: &'a Service, interface: &'a Interface, opts: &'a GeneratorOptions) -> Self {
        Self {
            service,
            interface,
            opts,
            keys: QueryKeyBuilder::new(interface, opts.key_convention),
            tanstack: ImportBuilder::new("@tanstack/react-query"),
            runtime: ImportBuilder::new("./runtime"),
            context: ImportBuilder::new("./context"),
            types: ImportBuilder::new(opts.types_module.clone()),
        }
    }

    /// `export ` unless factories are module-private (legacy-only mode).
    fn export_kw(&self) -> &'static str {
        if self.opts.emission_mode == EmissionMode::LegacyHooksOnly {
            ""
        } else {
            "export "
        }
    }
}

/// Everything derived about one method that emission needs.
#[derive(Debug)]
pub(crate) struct MethodPlan<'a> {
    pub method: &'a Method,
    pub route: &'a HttpRoute,
    pub binding: &'a HttpBinding,
    pub envelope: Option<Envelope<'a>>,
    pub paginated: bool,
}

impl<'a> MethodPlan<'a> {
    pub fn new(service: &'a Service, interface: &'a Interface, method: &'a Method) -> Option<Self> {
        let (route, binding) = interface.http_binding(&method.name)?;
        Some(Self {
            method,
            route,
            binding,
            envelope: resolve_envelope(service, method),
            paginated: is_relay_paginated(service, method),
        })
    }

    pub fn is_query(&self) -> bool {
        self.binding.verb.is_get()
    }

    /// Optional-params marker for member access (`params?.x` vs `params.x`).
    pub fn q(&self) -> &'static str {
        if self.method.params_all_optional() { "?" } else { "" }
    }

    /// The `params` parameter of factories and hooks, if the method has one.
    pub fn params_sig(&self, types: &mut ImportBuilder) -> Option<String> {
        if !self.method.has_params() {
            return None;
        }
        let ty = types.ty(&names::params_type_name(&self.method.name));
        Some(format!("params{}: {ty}", self.q()))
    }

    /// Argument list forwarding `params` to a factory call.
    pub fn params_arg(&self) -> &'static str {
        if self.method.has_params() { "params" } else { "" }
    }

    /// The raw service result type.
    pub fn result_ts(&self, types: &mut ImportBuilder) -> String {
        match &self.method.returns {
            Some(r) => ts_type(types, &r.type_name, r.is_primitive, r.is_array),
            None => "void".to_string(),
        }
    }

    /// The `QueryError<...>` type for this method's failures.
    pub fn error_ts(&self, types: &mut ImportBuilder, runtime: &mut ImportBuilder) -> String {
        let query_error = runtime.ty("QueryError");
        match &self.envelope {
            Some(env) => {
                let payload = ts_type(
                    types,
                    &env.error_prop.type_name,
                    env.error_prop.is_primitive,
                    env.error_prop.is_array,
                );
                format!("{query_error}<{payload}>")
            }
            None => format!("{query_error}<never>"),
        }
    }

    /// The unwrapped data type, when a `select` will be attached.
    pub fn select_ts(&self, types: &mut ImportBuilder) -> Option<String> {
        let env = self.envelope.as_ref()?;
        if env.has_extra_properties() {
            return None;
        }
        Some(ts_type(
            types,
            &env.data_prop.type_name,
            env.data_prop.is_primitive,
            env.data_prop.is_array,
        ))
    }

    /// Name of the local service accessor variable, e.g. `widgetService`.
    pub fn service_var(&self, interface: &Interface) -> String {
        names::camel(&format!("{}_service", interface.name))
    }
}

/// Emit the `const fooService = getFooService(config);` accessor line.
fn emit_service_accessor(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>) {
    let getter = cx.context.value(&names::service_getter_name(&cx.interface.name));
    let var = plan.service_var(cx.interface);
    w.push_at(1, format!("const {var} = {getter}(config);"));
}

/// Emit the handled-error check inside a query/mutation function. Only
/// methods with a resolved envelope report structured errors.
fn emit_handled_check(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>, depth: usize) {
    let Some(env) = &plan.envelope else {
        return;
    };
    let error_ts = plan.error_ts(&mut cx.types, &mut cx.runtime);
    let opt = if env.error_prop.required { "" } else { "?" };
    let prop = &env.error_prop.name;
    w.push_at(depth, format!("if (res.{prop}{opt}.length) {{"));
    w.push_at(
        depth + 1,
        format!("const handled: {error_ts} = {{ kind: 'handled', payload: res.{prop} }};"),
    );
    w.push_at(depth + 1, "throw handled;");
    w.push_at(depth, "}");
}

/// Doc block for an options factory: the method description, plus a bare
/// `@deprecated` marker when the descriptor flags the method itself.
fn emit_description(w: &mut ModuleWriter, method: &Method) {
    match (&method.description, method.deprecated) {
        (None, false) => {}
        (Some(desc), false) => w.push(format!("/** {desc} */")),
        (None, true) => w.push("/** @deprecated */"),
        (Some(desc), true) => {
            w.push("/**");
            w.push(format!(" * {desc}"));
            w.push(" *");
            w.push(" * @deprecated");
            w.push(" */");
        }
    }
}

/// Emit the `queryOptions` factory for a GET-bound method.
pub(crate) fn emit_query_options(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>) {
    let factory = names::query_options_name(&plan.method.name);
    let query_options = cx.tanstack.value("queryOptions");
    let config_type = cx.context.ty(&names::config_type_name(&cx.service.title));
    let result_ts = plan.result_ts(&mut cx.types);
    let error_ts = plan.error_ts(&mut cx.types, &mut cx.runtime);
    let select_ts = plan.select_ts(&mut cx.types);
    let key = cx
        .keys
        .query_key(plan.method, plan.binding, plan.route, false, &mut cx.runtime);
    let guard = cx.runtime.value("guard");
    let var = plan.service_var(cx.interface);
    let call = format!("{var}.{}({})", plan.method.name, plan.params_arg());

    let mut sig: Vec<String> = Vec::new();
    if let Some(params) = plan.params_sig(&mut cx.types) {
        sig.push(params);
    }
    sig.push(format!("config?: {config_type}"));

    let generics = match &select_ts {
        Some(select) => format!("<{result_ts}, {error_ts}, {select}>"),
        None => format!("<{result_ts}, {error_ts}>"),
    };

    w.blank();
    emit_description(w, plan.method);
    w.push(format!(
        "{}const {factory} = ({}) => {{",
        cx.export_kw(),
        sig.join(", ")
    ));
    emit_service_accessor(w, cx, plan);
    w.push_at(1, format!("return {query_options}{generics}({{"));
    w.push_at(2, format!("queryKey: {key},"));
    if plan.envelope.is_some() {
        w.push_at(2, "queryFn: async () => {");
        w.push_at(3, format!("const res = await {guard}({call});"));
        emit_handled_check(w, cx, plan, 3);
        w.push_at(3, "return res;");
        w.push_at(2, "},");
    } else {
        w.push_at(2, format!("queryFn: () => {guard}({call}),"));
    }
    if select_ts.is_some() {
        emit_select(w, cx, plan, 2);
    }
    w.push_at(1, "});");
    w.push("};");
}

/// Emit the `select` entry unwrapping the envelope's data property.
fn emit_select(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>, depth: usize) {
    let Some(env) = &plan.envelope else {
        return;
    };
    let prop = &env.data_prop.name;
    if env.data_prop.required {
        w.push_at(depth, format!("select: (data) => data.{prop},"));
    } else {
        let assert = cx.runtime.value("assert");
        w.push_at(depth, "select: (data) => {");
        w.push_at(depth + 1, format!("{assert}(data.{prop});"));
        w.push_at(depth + 1, format!("return data.{prop};"));
        w.push_at(depth, "},");
    }
}

/// Emit the mutation options factory for a non-GET method. Invalidation runs
/// inside `mutationFn`, after the awaited call and before the mutation
/// promise resolves, so follow-up reads observe invalidated entries.
pub(crate) fn emit_mutation_options(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>) {
    let factory = names::mutation_options_name(&plan.method.name);
    let options_type = cx.tanstack.ty("UseMutationOptions");
    let query_client = cx.tanstack.ty("QueryClient");
    let config_type = cx.context.ty(&names::config_type_name(&cx.service.title));
    let error_ts = plan.error_ts(&mut cx.types, &mut cx.runtime);
    let guard = cx.runtime.value("guard");
    let var = plan.service_var(cx.interface);
    let call = format!("{var}.{}({})", plan.method.name, plan.params_arg());

    let vars_ts = match plan.params_sig(&mut cx.types) {
        Some(_) => cx.types.ty(&names::params_type_name(&plan.method.name)),
        None => "void".to_string(),
    };
    let data_ts = match &plan.envelope {
        Some(env) => ts_type(
            &mut cx.types,
            &env.data_prop.type_name,
            env.data_prop.is_primitive,
            env.data_prop.is_array,
        ),
        None => plan.result_ts(&mut cx.types),
    };

    let fn_params = match plan.params_sig(&mut cx.types) {
        Some(params) => format!("({params})"),
        None => "()".to_string(),
    };

    w.blank();
    emit_description(w, plan.method);
    w.push(format!("{}const {factory} = (", cx.export_kw()));
    w.push_at(1, format!("queryClient: {query_client},"));
    w.push_at(1, format!("config?: {config_type},"));
    w.push(format!("): {options_type}<{data_ts}, {error_ts}, {vars_ts}> => {{"));
    emit_service_accessor(w, cx, plan);
    w.push_at(1, "return {");
    w.push_at(2, format!("mutationFn: async {fn_params} => {{"));
    if plan.method.returns.is_some() {
        w.push_at(3, format!("const res = await {guard}({call});"));
    } else {
        w.push_at(3, format!("await {guard}({call});"));
    }
    emit_handled_check(w, cx, plan, 3);
    for key in cx.keys.invalidation_keys(plan.method, plan.route) {
        w.push_at(3, format!("await queryClient.invalidateQueries({{ queryKey: {key} }});"));
    }
    match &plan.envelope {
        Some(env) => {
            let prop = &env.data_prop.name;
            if !env.data_prop.required {
                let assert = cx.runtime.value("assert");
                w.push_at(3, format!("{assert}(res.{prop});"));
            }
            w.push_at(3, format!("return res.{prop};"));
        }
        None if plan.method.returns.is_some() => w.push_at(3, "return res;"),
        None => {}
    }
    w.push_at(2, "},");
    w.push_at(1, "};");
    w.push("};");
}

/// Emit the infinite query options factory for a relay-paginated method.
pub(crate) fn emit_infinite_query_options(
    w: &mut ModuleWriter,
    cx: &mut FileCx<'_>,
    plan: &MethodPlan<'_>,
) {
    let factory = names::infinite_query_options_name(&plan.method.name);
    let config_type = cx.context.ty(&names::config_type_name(&cx.service.title));
    let key = cx
        .keys
        .query_key(plan.method, plan.binding, plan.route, true, &mut cx.runtime);
    let guard = cx.runtime.value("guard");
    let page_param_ts = cx.runtime.ty("PageParam");
    let apply = cx.runtime.value("applyPageParam");
    let initial = cx.runtime.value("getInitialPageParam");
    let next = cx.runtime.value("getNextPageParam");
    let previous = cx.runtime.value("getPreviousPageParam");
    let var = plan.service_var(cx.interface);

    // Paginated methods always carry the relay params, so `params` exists.
    let paged_params = if plan.q() == "?" { "params ?? {}" } else { "params" };
    let call = format!("{var}.{}({apply}({paged_params}, pageParam))", plan.method.name);

    let mut sig: Vec<String> = Vec::new();
    if let Some(params) = plan.params_sig(&mut cx.types) {
        sig.push(params);
    }
    sig.push(format!("config?: {config_type}"));

    w.blank();
    emit_description(w, plan.method);
    w.push(format!(
        "{}const {factory} = ({}) => {{",
        cx.export_kw(),
        sig.join(", ")
    ));
    emit_service_accessor(w, cx, plan);
    w.push_at(1, "return {");
    w.push_at(2, format!("queryKey: {key},"));
    w.push_at(2, format!("queryFn: async ({{ pageParam }}: {page_param_ts}) => {{"));
    w.push_at(3, format!("const res = await {guard}({call});"));
    emit_handled_check(w, cx, plan, 3);
    w.push_at(3, "return res;");
    w.push_at(2, "},");
    w.push_at(2, format!("initialPageParam: {initial}({paged_params}),"));
    w.push_at(2, format!("getNextPageParam: {next},"));
    w.push_at(2, format!("getPreviousPageParam: {previous},"));
    if let Some(env) = &plan.envelope {
        let infinite_data = cx.tanstack.ty("InfiniteData");
        let result_ts = plan.result_ts(&mut cx.types);
        let prop = &env.data_prop.name;
        let fallback = if env.data_prop.required { "" } else { " ?? []" };
        w.push_at(
            2,
            format!(
                "select: (data: {infinite_data}<{result_ts}>) => data.pages.flatMap((page) => page.{prop}{fallback}),"
            ),
        );
    }
    w.push_at(1, "};");
    w.push("};");
}
