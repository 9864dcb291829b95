//! Identifier derivation for generated TypeScript.
//!
//! All emitted names funnel through this module so the naming rules live in
//! one place: hook names, options factory names, Provider/context names, and
//! the per-interface file paths.

/// Split an identifier into words on `_`, `-`, `.`, spaces, and lower-to-upper
/// case boundaries.
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' || c == '.' || c == ' ' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if c.is_ascii_uppercase() {
            let after_lower = i > 0 && (chars[i - 1].is_ascii_lowercase() || chars[i - 1].is_ascii_digit());
            if after_lower && !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
    }
}

/// Convert to camelCase (`"use_suspense_Widgets"` becomes `"useSuspenseWidgets"`).
pub fn camel(s: &str) -> String {
    let words = split_words(s);
    let mut out = String::new();
    for (i, word) in words.iter().enumerate() {
        if i == 0 {
            out.push_str(&word.to_lowercase());
        } else {
            out.push_str(&capitalize(word));
        }
    }
    out
}

/// Convert to PascalCase.
pub fn pascal(s: &str) -> String {
    split_words(s).iter().map(|w| capitalize(w)).collect()
}

/// Convert to kebab-case.
pub fn kebab(s: &str) -> String {
    split_words(s)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Naive English pluralization, good enough for interface names.
pub fn pluralize(s: &str) -> String {
    if let Some(stem) = s.strip_suffix('y') {
        let vowel_before = stem
            .chars()
            .last()
            .is_some_and(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u'));
        if !vowel_before {
            return format!("{stem}ies");
        }
    }
    if s.ends_with('s') || s.ends_with('x') || s.ends_with('z') || s.ends_with("ch") || s.ends_with("sh") {
        return format!("{s}es");
    }
    format!("{s}s")
}

/// True when a GET-bound method named `get*` should have the prefix stripped
/// from its hook name (`getWidgets` reads as `useWidgets`, not `useGetWidgets`).
fn strippable_get_prefix(method_name: &str, is_get: bool) -> bool {
    is_get && method_name.len() > 3 && method_name[..3].eq_ignore_ascii_case("get")
}

/// Derive a hook name: `use`, optional `Suspense`, optional `Infinite`, then
/// the method name (with a leading `get` stripped for GET-bound methods).
pub fn hook_name(method_name: &str, is_get: bool, suspense: bool, infinite: bool) -> String {
    let base = if strippable_get_prefix(method_name, is_get) {
        &method_name[3..]
    } else {
        method_name
    };
    let mut tokens = String::from("use");
    if suspense {
        tokens.push_str("_suspense");
    }
    if infinite {
        tokens.push_str("_infinite");
    }
    tokens.push('_');
    tokens.push_str(base);
    camel(&tokens)
}

pub fn query_options_name(method_name: &str) -> String {
    camel(&format!("{method_name}_query_options"))
}

pub fn infinite_query_options_name(method_name: &str) -> String {
    camel(&format!("{method_name}_infinite_query_options"))
}

pub fn mutation_options_name(method_name: &str) -> String {
    camel(&format!("{method_name}_mutation_options"))
}

/// Name of the generated params object type, e.g. `GetWidgetsParams`.
pub fn params_type_name(method_name: &str) -> String {
    pascal(&format!("{method_name}_params"))
}

/// Name of the generated HTTP client class for an interface.
pub fn http_client_class_name(interface_name: &str) -> String {
    pascal(&format!("http_{interface_name}_service"))
}

/// Name of the client interface type, e.g. `WidgetService`.
pub fn service_type_name(interface_name: &str) -> String {
    pascal(&format!("{interface_name}_service"))
}

pub fn service_getter_name(interface_name: &str) -> String {
    camel(&format!("get_{interface_name}_service"))
}

pub fn service_hook_name(interface_name: &str) -> String {
    camel(&format!("use_{interface_name}_service"))
}

pub fn context_name(service_title: &str) -> String {
    pascal(&format!("{service_title}_context"))
}

pub fn provider_name(service_title: &str) -> String {
    pascal(&format!("{service_title}_provider"))
}

/// Name of the configuration object type shared by Provider and accessors.
pub fn config_type_name(service_title: &str) -> String {
    pascal(&format!("{service_title}_service_config"))
}

/// Name of the client options type emitted alongside the HTTP client.
pub fn client_options_type_name(service_title: &str) -> String {
    pascal(&format!("{service_title}_options"))
}

pub fn config_hook_name(service_title: &str) -> String {
    camel(&format!("use_{service_title}_config"))
}

pub fn ambient_init_name(service_title: &str) -> String {
    camel(&format!("init_{service_title}_context"))
}

/// Relative output path of the hooks module for an interface.
pub fn hooks_file_path(interface_name: &str) -> String {
    format!("hooks/{}.ts", kebab(&pluralize(interface_name)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_camel() {
        assert_eq!(camel("get_widgets"), "getWidgets");
        assert_eq!(camel("getWidgets"), "getWidgets");
        assert_eq!(camel("use_suspense_infinite_Widgets"), "useSuspenseInfiniteWidgets");
        assert_eq!(camel("widget api"), "widgetApi");
        assert_eq!(camel("HTTPService"), "httpservice");
    }

    #[test]
    fn test_pascal() {
        assert_eq!(pascal("widget api"), "WidgetApi");
        assert_eq!(pascal("createWidget_params"), "CreateWidgetParams");
        assert_eq!(pascal("gizmo"), "Gizmo");
    }

    #[test]
    fn test_kebab_and_pluralize() {
        assert_eq!(kebab(&pluralize("widget")), "widgets");
        assert_eq!(kebab(&pluralize("category")), "categories");
        assert_eq!(kebab(&pluralize("dispatch")), "dispatches");
        assert_eq!(kebab(&pluralize("gizmoFactory")), "gizmo-factories");
        assert_eq!(kebab(&pluralize("status")), "statuses");
        assert_eq!(hooks_file_path("auditLog"), "hooks/audit-logs.ts");
    }

    #[test]
    fn test_hook_name_strips_get_for_get_bound_methods() {
        assert_eq!(hook_name("getWidgets", true, false, false), "useWidgets");
        assert_eq!(hook_name("getWidgets", true, true, false), "useSuspenseWidgets");
        assert_eq!(hook_name("getWidgets", true, false, true), "useInfiniteWidgets");
        assert_eq!(hook_name("getWidgets", true, true, true), "useSuspenseInfiniteWidgets");
    }

    #[test]
    fn test_hook_name_keeps_other_prefixes() {
        // Non-GET verbs keep the method name even when it starts with "get".
        assert_eq!(hook_name("getOrCreate", false, false, false), "useGetOrCreate");
        assert_eq!(hook_name("createWidget", false, false, false), "useCreateWidget");
        assert_eq!(hook_name("listWidgets", true, false, false), "useListWidgets");
        // "get" alone has nothing left to strip.
        assert_eq!(hook_name("get", true, false, false), "useGet");
    }

    #[test]
    fn test_options_names() {
        assert_eq!(query_options_name("getWidgets"), "getWidgetsQueryOptions");
        assert_eq!(infinite_query_options_name("getWidgets"), "getWidgetsInfiniteQueryOptions");
        assert_eq!(mutation_options_name("createWidget"), "createWidgetMutationOptions");
        assert_eq!(params_type_name("getWidgets"), "GetWidgetsParams");
    }

    #[test]
    fn test_service_and_context_names() {
        assert_eq!(service_getter_name("widget"), "getWidgetService");
        assert_eq!(service_hook_name("widget"), "useWidgetService");
        assert_eq!(service_type_name("widget"), "WidgetService");
        assert_eq!(http_client_class_name("widget"), "HttpWidgetService");
        assert_eq!(context_name("widget api"), "WidgetApiContext");
        assert_eq!(provider_name("widget api"), "WidgetApiProvider");
        assert_eq!(config_type_name("widget api"), "WidgetApiServiceConfig");
        assert_eq!(client_options_type_name("widget api"), "WidgetApiOptions");
        assert_eq!(config_hook_name("widget api"), "useWidgetApiConfig");
        assert_eq!(ambient_init_name("widget api"), "initWidgetApiContext");
    }
}
