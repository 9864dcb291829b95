//! Emits the hook wrappers around the options factories.
//!
//! Each wrapper resolves the Provider configuration, spreads the factory
//! output into the matching TanStack hook, and shallow-merges any caller
//! options on top. In [`EmissionMode::Both`] the wrappers carry deprecation
//! docs steering call sites toward the factories; in
//! [`EmissionMode::LegacyHooksOnly`] they are the public API and carry none.

use super::module::ModuleWriter;
use super::names;
use super::options::{FileCx, MethodPlan};
use super::{EmissionMode, GeneratorOptions};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookKind {
    Query,
    SuspenseQuery,
    Infinite,
    SuspenseInfinite,
    Mutation,
}

impl HookKind {
    fn label(self) -> &'static str {
        match self {
            Self::Query => "hook",
            Self::SuspenseQuery => "suspense query hook",
            Self::Infinite => "infinite query hook",
            Self::SuspenseInfinite => "suspense infinite query hook",
            Self::Mutation => "mutation hook",
        }
    }

    fn tanstack_hook(self) -> &'static str {
        match self {
            Self::Query => "useQuery",
            Self::SuspenseQuery => "useSuspenseQuery",
            Self::Infinite => "useInfiniteQuery",
            Self::SuspenseInfinite => "useSuspenseInfiniteQuery",
            Self::Mutation => "useMutation",
        }
    }
}

/// Emit the doc block for a hook: the method description, plus (in `Both`
/// mode) the deprecation notice with a before/after migration example.
fn emit_hook_doc(
    w: &mut ModuleWriter,
    opts: &GeneratorOptions,
    plan: &MethodPlan<'_>,
    kind: HookKind,
    hook: &str,
    factory: &str,
) {
    let deprecate = opts.emission_mode == EmissionMode::Both;
    if plan.method.description.is_none() && !deprecate {
        return;
    }
    w.push("/**");
    if let Some(desc) = &plan.method.description {
        w.push(format!(" * {desc}"));
        if deprecate {
            w.push(" *");
        }
    }
    if deprecate {
        let rq_hook = kind.tanstack_hook();
        let args = plan.params_arg();
        w.push(format!(
            " * @deprecated This {} is deprecated and will be removed in a future version.",
            kind.label()
        ));
        w.push(format!(" * Use `{rq_hook}` with `{factory}` instead."));
        w.push(" *");
        w.push(" * ```typescript");
        w.push(" * // Old pattern (deprecated)");
        if kind == HookKind::Mutation {
            w.push(format!(" * const mutation = {hook}();"));
            w.push(" *");
            w.push(" * // New pattern");
            w.push(" * const queryClient = useQueryClient();");
            w.push(format!(" * const mutation = {rq_hook}({factory}(queryClient));"));
        } else {
            w.push(format!(" * const result = {hook}({args});"));
            w.push(" *");
            w.push(" * // New pattern");
            w.push(format!(" * const result = {rq_hook}({factory}({args}));"));
        }
        w.push(" * ```");
    }
    w.push(" */");
}

/// Factory call with the Provider config appended, e.g.
/// `getWidgetsQueryOptions(params, config)`.
fn factory_call(factory: &str, plan: &MethodPlan<'_>) -> String {
    if plan.method.has_params() {
        format!("{factory}(params, config)")
    } else {
        format!("{factory}(config)")
    }
}

fn emit_config_line(w: &mut ModuleWriter, cx: &mut FileCx<'_>) {
    let config_hook = cx.context.value(&names::config_hook_name(&cx.service.title));
    w.push_at(1, format!("const config = {config_hook}();"));
}

fn query_hook_signature(cx: &mut FileCx<'_>, plan: &MethodPlan<'_>, omit_select: bool) -> String {
    let options_type = cx.tanstack.ty("UndefinedInitialDataOptions");
    let result_ts = plan.result_ts(&mut cx.types);
    let error_ts = plan.error_ts(&mut cx.types, &mut cx.runtime);
    let mut omitted = vec!["'queryKey'", "'queryFn'"];
    if omit_select {
        omitted.push("'select'");
    }
    let options = format!(
        "options?: Omit<{options_type}<{result_ts}, {error_ts}>, {}>",
        omitted.join(" | ")
    );
    match plan.params_sig(&mut cx.types) {
        Some(params) => format!("{params}, {options}"),
        None => options,
    }
}

/// Emit the plain and suspense query hooks for a GET-bound method.
pub(crate) fn emit_query_hooks(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>) {
    let factory = names::query_options_name(&plan.method.name);
    let has_select = plan.select_ts(&mut cx.types).is_some();
    for kind in [HookKind::Query, HookKind::SuspenseQuery] {
        let suspense = kind == HookKind::SuspenseQuery;
        let hook = names::hook_name(&plan.method.name, true, suspense, false);
        let rq_hook = cx.tanstack.value(kind.tanstack_hook());
        let sig = query_hook_signature(cx, plan, has_select);
        w.blank();
        emit_hook_doc(w, cx.opts, plan, kind, &hook, &factory);
        w.push(format!("export const {hook} = ({sig}) => {{"));
        emit_config_line(w, cx);
        w.push_at(1, format!("return {rq_hook}({{ ...{}, ...options }});", factory_call(&factory, plan)));
        w.push("};");
    }
}

/// Emit the infinite and suspense infinite hooks for a paginated method.
pub(crate) fn emit_infinite_hooks(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>) {
    let factory = names::infinite_query_options_name(&plan.method.name);
    for kind in [HookKind::Infinite, HookKind::SuspenseInfinite] {
        let suspense = kind == HookKind::SuspenseInfinite;
        let hook = names::hook_name(&plan.method.name, true, suspense, true);
        let rq_hook = cx.tanstack.value(kind.tanstack_hook());
        let options_type = cx.tanstack.ty("UseInfiniteQueryOptions");
        let result_ts = plan.result_ts(&mut cx.types);
        let error_ts = plan.error_ts(&mut cx.types, &mut cx.runtime);
        let options = format!(
            "options?: Omit<{options_type}<{result_ts}, {error_ts}>, 'queryKey' | 'queryFn' | 'select' | 'initialPageParam' | 'getNextPageParam' | 'getPreviousPageParam'>"
        );
        let sig = match plan.params_sig(&mut cx.types) {
            Some(params) => format!("{params}, {options}"),
            None => options,
        };
        w.blank();
        emit_hook_doc(w, cx.opts, plan, kind, &hook, &factory);
        w.push(format!("export const {hook} = ({sig}) => {{"));
        emit_config_line(w, cx);
        w.push_at(1, format!("return {rq_hook}({{ ...{}, ...options }});", factory_call(&factory, plan)));
        w.push("};");
    }
}

/// Emit the mutation hook for a non-GET method.
pub(crate) fn emit_mutation_hook(w: &mut ModuleWriter, cx: &mut FileCx<'_>, plan: &MethodPlan<'_>) {
    let factory = names::mutation_options_name(&plan.method.name);
    let hook = names::hook_name(&plan.method.name, false, false, false);
    let use_mutation = cx.tanstack.value("useMutation");
    let use_query_client = cx.tanstack.value("useQueryClient");
    let options_type = cx.tanstack.ty("UseMutationOptions");
    let error_ts = plan.error_ts(&mut cx.types, &mut cx.runtime);
    let data_ts = match &plan.envelope {
        Some(env) => super::options::ts_type(
            &mut cx.types,
            &env.data_prop.type_name,
            env.data_prop.is_primitive,
            env.data_prop.is_array,
        ),
        None => plan.result_ts(&mut cx.types),
    };
    let vars_ts = if plan.method.has_params() {
        cx.types.ty(&names::params_type_name(&plan.method.name))
    } else {
        "void".to_string()
    };

    w.blank();
    emit_hook_doc(w, cx.opts, plan, HookKind::Mutation, &hook, &factory);
    w.push(format!(
        "export const {hook} = (options?: Omit<{options_type}<{data_ts}, {error_ts}, {vars_ts}>, 'mutationFn'>) => {{"
    ));
    w.push_at(1, format!("const queryClient = {use_query_client}();"));
    emit_config_line(w, cx);
    w.push_at(1, format!("const mutationOptions = {factory}(queryClient, config);"));
    w.push_at(1, format!("return {use_mutation}({{ ...mutationOptions, ...options }});"));
    w.push("};");
}
