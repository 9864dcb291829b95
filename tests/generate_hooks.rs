//! End-to-end generation over a complete service descriptor.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use hookgen::generator::{generate_from_json, write_files};
use hookgen::{EmissionMode, GeneratorOptions, KeyConvention};

const WIDGET_JSON: &str = include_str!("fixtures/widget_service.json");

fn widget_hooks(opts: &GeneratorOptions) -> String {
    let files = generate_from_json(WIDGET_JSON, opts).unwrap();
    files
        .into_iter()
        .find(|f| f.path == "hooks/widgets.ts")
        .map(|f| f.contents)
        .unwrap()
}

#[test]
fn paginated_query_gets_both_option_factories() {
    let code = widget_hooks(&GeneratorOptions::default());
    assert!(code.contains("export const getWidgetsQueryOptions = (params?: GetWidgetsParams, config?: WidgetApiServiceConfig) => {"));
    assert!(code.contains("export const getWidgetsInfiniteQueryOptions = "));
    assert!(
        code.contains("queryKey: ['widget', 'getWidgets', compact({ status: params?.status }) ?? {}],"),
        "plain query key must exclude the relay cursor params"
    );
    assert!(
        code.contains("queryKey: ['widget', 'getWidgets', compact({ status: params?.status }) ?? {}, { infinite: true }],"),
        "infinite key differs from the plain key only by the marker"
    );
}

#[test]
fn infinite_options_wire_the_cursor_helpers() {
    let code = widget_hooks(&GeneratorOptions::default());
    assert!(code.contains("queryFn: async ({ pageParam }: PageParam) => {"));
    assert!(code.contains("widgetService.getWidgets(applyPageParam(params ?? {}, pageParam))"));
    assert!(code.contains("initialPageParam: getInitialPageParam(params ?? {}),"));
    assert!(code.contains("getNextPageParam: getNextPageParam,"));
    assert!(code.contains("getPreviousPageParam: getPreviousPageParam,"));
    assert!(code.contains("data.pages.flatMap((page) => page.data)"));
}

#[test]
fn handled_errors_are_raised_as_query_errors() {
    let code = widget_hooks(&GeneratorOptions::default());
    assert!(code.contains("const res = await guard(widgetService.getWidgets(params));"));
    assert!(code.contains("if (res.errors.length) {"));
    assert!(code.contains("const handled: QueryError<WidgetError[]> = { kind: 'handled', payload: res.errors };"));
    assert!(code.contains("throw handled;"));
    // deleteWidget has no envelope, so no handled-error check for it.
    assert!(code.contains("await guard(widgetService.deleteWidget(params));"));
    assert!(!code.contains("QueryError<never> = { kind: 'handled'"));
}

#[test]
fn mutation_invalidates_interface_tag_under_flat_keys() {
    let code = widget_hooks(&GeneratorOptions::default());
    assert!(code.contains("await queryClient.invalidateQueries({ queryKey: ['widget'] });"));
    // Inside mutationFn, after the guarded call and before the data returns.
    let block = code
        .split("export const createWidgetMutationOptions")
        .nth(1)
        .unwrap();
    let call = block.find("await guard(widgetService.createWidget(params));").unwrap();
    let invalidate = block.find("invalidateQueries").unwrap();
    let ret = block.find("return res.data;").unwrap();
    assert!(call < invalidate && invalidate < ret);
}

#[test]
fn resource_keys_invalidate_exact_and_parent() {
    let opts = GeneratorOptions {
        key_convention: KeyConvention::ResourcePath,
        ..GeneratorOptions::default()
    };
    let code = widget_hooks(&opts);
    // deleteWidget targets /widgets/{id}: exact key plus the collection key.
    assert!(code.contains("await queryClient.invalidateQueries({ queryKey: [`/widgets/${params.id}`] });"));
    assert!(code.contains("await queryClient.invalidateQueries({ queryKey: [`/widgets`] });"));
    assert!(code.contains("queryKey: [`/widgets`, compact({ status: params?.status })].filter(Boolean),"));
}

#[test]
fn deprecated_hooks_reference_their_factories() {
    let code = widget_hooks(&GeneratorOptions::default());
    assert!(code.contains("export const useWidgets = "));
    assert!(code.contains("export const useSuspenseWidgets = "));
    assert!(code.contains("export const useInfiniteWidgets = "));
    assert!(code.contains("export const useSuspenseInfiniteWidgets = "));
    assert!(code.contains("export const useCreateWidget = "));
    assert!(code.contains("@deprecated This hook is deprecated and will be removed in a future version."));
    assert!(code.contains("@deprecated This mutation hook is deprecated"));
    assert!(code.contains("@deprecated This suspense infinite query hook is deprecated"));
    assert!(code.contains("const result = useQuery(getWidgetsQueryOptions(params));"));

    // deleteWidget is flagged deprecated in the descriptor itself.
    let factory = code.find("export const deleteWidgetMutationOptions").unwrap();
    let marker = code.find("/** @deprecated */").unwrap();
    assert!(marker < factory && factory - marker < 40);
}

#[test]
fn emission_modes_gate_the_surfaces() {
    let legacy = widget_hooks(&GeneratorOptions {
        emission_mode: EmissionMode::LegacyHooksOnly,
        ..GeneratorOptions::default()
    });
    assert!(legacy.contains("const getWidgetsQueryOptions = "));
    assert!(!legacy.contains("export const getWidgetsQueryOptions"));
    assert!(legacy.contains("export const useWidgets = "));
    assert!(!legacy.contains("@deprecated This"));

    let options_only = widget_hooks(&GeneratorOptions {
        emission_mode: EmissionMode::OptionsExportsOnly,
        ..GeneratorOptions::default()
    });
    assert!(options_only.contains("export const getWidgetsQueryOptions"));
    assert!(!options_only.contains("export const use"));
}

#[test]
fn hooks_module_imports_are_grouped_and_sorted() {
    let code = widget_hooks(&GeneratorOptions::default());
    let tanstack = code.find("from '@tanstack/react-query';").unwrap();
    let types = code.find("from '../types';").unwrap();
    let context = code.find("from './context';").unwrap();
    let runtime = code.find("from './runtime';").unwrap();
    assert!(tanstack < types && types < context && context < runtime);
    assert!(code.contains("import type {"), "type-only imports expected");

    let plain = widget_hooks(&GeneratorOptions {
        type_only_imports: false,
        ..GeneratorOptions::default()
    });
    assert!(!plain.contains("import type {"));
    assert!(!plain.contains(" type "));
}

#[test]
fn context_module_exposes_accessors_and_ambient_init() {
    let files = generate_from_json(WIDGET_JSON, &GeneratorOptions::default()).unwrap();
    let context = &files.iter().find(|f| f.path == "hooks/context.tsx").unwrap().contents;
    assert!(context.contains("export const WidgetApiProvider"));
    assert!(context.contains("export function initWidgetApiContext(config: WidgetApiServiceConfig): void {"));
    assert!(context.contains("export const getWidgetService = (config?: WidgetApiServiceConfig): WidgetService => {"));
    assert!(context.contains("export const useWidgetService = (): WidgetService => {"));
    assert!(context.contains("'useWidgetApiConfig must be used within a WidgetApiProvider'"));
}

#[test]
fn runtime_module_is_emitted_once_with_helpers() {
    let files = generate_from_json(WIDGET_JSON, &GeneratorOptions::default()).unwrap();
    let runtime = &files.iter().find(|f| f.path == "hooks/runtime.ts").unwrap().contents;
    assert!(runtime.contains("export type QueryError<T>"));
    assert!(runtime.contains("export async function guard<T>"));
    assert!(runtime.contains("export function applyPageParam<T extends RelayParams>"));
    assert!(runtime.contains("export function compact<T extends Record<string, unknown>>"));
}

#[test]
fn readme_documents_the_generated_surface() {
    let files = generate_from_json(WIDGET_JSON, &GeneratorOptions::default()).unwrap();
    let readme = &files.iter().find(|f| f.path == "hooks/README.md").unwrap().contents;
    assert!(readme.contains("# WidgetApi React Query hooks"));
    assert!(readme.contains("useQuery(getWidgetsQueryOptions(params))"));
    assert!(readme.contains("useMutation(createWidgetMutationOptions(queryClient))"));
    assert!(readme.contains("## Server-side rendering"));
}

#[test]
fn write_files_creates_the_output_tree() {
    let files = generate_from_json(WIDGET_JSON, &GeneratorOptions::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    write_files(&files, dir.path()).unwrap();

    let hooks = std::fs::read_to_string(dir.path().join("hooks/widgets.ts")).unwrap();
    assert!(hooks.starts_with("// Generated by hookgen. Do not edit."));
    assert!(dir.path().join("hooks/runtime.ts").is_file());
    assert!(dir.path().join("hooks/context.tsx").is_file());
    assert!(dir.path().join("hooks/README.md").is_file());
    assert!(dir.path().join("hooks/keys.ts").is_file());
}

#[test]
fn relative_imports_resolve_within_the_emitted_tree() {
    let files = generate_from_json(WIDGET_JSON, &GeneratorOptions::default()).unwrap();
    let emitted: Vec<&str> = files.iter().map(|f| f.path.as_str()).collect();

    for file in &files {
        if !file.path.ends_with(".ts") && !file.path.ends_with(".tsx") {
            continue;
        }
        let dir = file.path.rsplit_once('/').map_or("", |(d, _)| d);
        for line in file.contents.lines() {
            let Some(spec) = line
                .split("from './")
                .nth(1)
                .and_then(|rest| rest.split('\'').next())
            else {
                continue;
            };
            let target = if dir.is_empty() {
                spec.to_string()
            } else {
                format!("{dir}/{spec}")
            };
            assert!(
                emitted.contains(&format!("{target}.ts").as_str())
                    || emitted.contains(&format!("{target}.tsx").as_str()),
                "{} imports './{spec}' which is not an emitted file",
                file.path
            );
        }
    }
}

#[test]
fn key_map_module_mirrors_the_flat_keys() {
    let files = generate_from_json(WIDGET_JSON, &GeneratorOptions::default()).unwrap();
    let keys = &files.iter().find(|f| f.path == "hooks/keys.ts").unwrap().contents;
    assert!(keys.contains("export interface QueryKeyMap {"));
    assert!(keys.contains("  widget: {"));
    assert!(keys.contains("    getWidgets: GetWidgetsParams | undefined;"));
    assert!(keys.contains("export type ServiceKeys = keyof QueryKeyMap;"));
    assert!(keys.contains("export function matchQueryKey<S extends ServiceKeys>("));
    assert!(keys.contains("return [service, operation, finalParams] as const;"));

    let opts = GeneratorOptions {
        key_convention: KeyConvention::ResourcePath,
        ..GeneratorOptions::default()
    };
    let files = generate_from_json(WIDGET_JSON, &opts).unwrap();
    assert!(files.iter().all(|f| f.path != "hooks/keys.ts"));
}
