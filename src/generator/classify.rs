//! Method classification: relay pagination detection, result envelope
//! resolution, and cache-parameter selection.
//!
//! Classification is purely structural. A method is paginated or enveloped
//! because its signature and return type say so, never because of naming
//! conventions on the method itself.

use crate::model::{HttpBinding, HttpLocation, Method, Parameter, Property, Service, TypeDef};

use super::names::camel;

/// The four relay cursor parameters, in canonical order.
pub const RELAY_PARAMS: [&str; 4] = ["first", "after", "last", "before"];

/// True for `first`/`after`/`last`/`before` under camelCase comparison.
pub fn is_relay_param(name: &str) -> bool {
    let camelized = camel(name);
    RELAY_PARAMS.contains(&camelized.as_str())
}

fn relay_param_type(name: &str) -> &'static str {
    match name {
        "first" | "last" => "integer",
        _ => "string",
    }
}

/// A resolved `{ data, errors }` result envelope.
///
/// Present only when the return type is a named object with a data-carrying
/// property and an error-list property whose types both resolve to named
/// declarations. Generated code unwraps `data` via `select` and raises the
/// error list as a handled [`QueryError`](super::runtime).
#[derive(Debug, Clone, Copy)]
pub struct Envelope<'a> {
    pub return_type: &'a TypeDef,
    pub data_prop: &'a Property,
    pub error_prop: &'a Property,
}

impl Envelope<'_> {
    /// True when the return type carries payload properties beyond the
    /// envelope pair. Unwrapping via `select` would silently drop them, so
    /// such results are returned whole.
    pub fn has_extra_properties(&self) -> bool {
        self.return_type
            .properties
            .iter()
            .any(|p| p.name != self.data_prop.name && p.name != self.error_prop.name)
    }
}

fn is_data_prop(name: &str) -> bool {
    name.eq_ignore_ascii_case("data") || name.eq_ignore_ascii_case("value") || name.eq_ignore_ascii_case("values")
}

fn is_error_prop(name: &str) -> bool {
    name.eq_ignore_ascii_case("error") || name.eq_ignore_ascii_case("errors")
}

/// Resolve the result envelope of a method, if it has one.
///
/// Every gate failing returns `None`: no return type, a primitive or
/// unresolvable return type, a missing data or error property, or a property
/// type that does not resolve to a declaration.
pub fn resolve_envelope<'a>(service: &'a Service, method: &'a Method) -> Option<Envelope<'a>> {
    let returns = method.returns.as_ref()?;
    if returns.is_primitive {
        return None;
    }
    let return_type = service.type_by_name(&returns.type_name)?;
    let data_prop = return_type.properties.iter().find(|p| is_data_prop(&p.name))?;
    let error_prop = return_type.properties.iter().find(|p| is_error_prop(&p.name))?;
    service.declaration_by_name(&data_prop.type_name)?;
    service.declaration_by_name(&error_prop.type_name)?;
    Some(Envelope {
        return_type,
        data_prop,
        error_prop,
    })
}

/// True when a method follows the relay cursor convention: a resolvable
/// return type with a `pageInfo` property, plus all four cursor parameters
/// (`first`/`last` integers, `after`/`before` strings).
pub fn is_relay_paginated(service: &Service, method: &Method) -> bool {
    let Some(returns) = method.returns.as_ref() else {
        return false;
    };
    if returns.is_primitive {
        return false;
    }
    let Some(return_type) = service.type_by_name(&returns.type_name) else {
        return false;
    };
    if !return_type.properties.iter().any(|p| camel(&p.name) == "pageInfo") {
        return false;
    }
    RELAY_PARAMS.iter().all(|&name| {
        method
            .parameters
            .iter()
            .any(|p| camel(&p.name) == name && p.is_primitive && p.type_name == relay_param_type(name))
    })
}

/// Every method parameter except the relay cursors. The flat key convention
/// keys over all of these, so two lookups differing only in a path parameter
/// never share a cache entry.
pub fn non_relay_params(method: &Method) -> Vec<&Parameter> {
    method
        .parameters
        .iter()
        .filter(|p| !is_relay_param(&p.name))
        .collect()
}

/// Select the method parameters that belong in the query cache key: those
/// bound to the query string, excluding the relay cursor parameters unless
/// `include_relay` is set.
pub fn cache_params<'a>(
    method: &'a Method,
    binding: &HttpBinding,
    include_relay: bool,
) -> Vec<&'a Parameter> {
    method
        .parameters
        .iter()
        .filter(|p| {
            binding
                .parameter(&p.name)
                .is_some_and(|hp| hp.location == HttpLocation::Query)
        })
        .filter(|p| include_relay || !is_relay_param(&p.name))
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn paginated_service() -> Service {
        serde_json::from_str(
            r#"{
            "title": "widget api",
            "interfaces": [
                {
                    "name": "widget",
                    "methods": [
                        {
                            "name": "getWidgets",
                            "parameters": [
                                { "name": "status", "typeName": "string", "isPrimitive": true },
                                { "name": "first", "typeName": "integer", "isPrimitive": true },
                                { "name": "after", "typeName": "string", "isPrimitive": true },
                                { "name": "last", "typeName": "integer", "isPrimitive": true },
                                { "name": "before", "typeName": "string", "isPrimitive": true }
                            ],
                            "returns": { "typeName": "widgetConnection" }
                        }
                    ],
                    "routes": [
                        {
                            "path": "/widgets",
                            "bindings": [
                                {
                                    "method": "getWidgets",
                                    "verb": "get",
                                    "parameters": [
                                        { "name": "status", "in": "query" },
                                        { "name": "first", "in": "query" },
                                        { "name": "after", "in": "query" },
                                        { "name": "last", "in": "query" },
                                        { "name": "before", "in": "query" }
                                    ]
                                }
                            ]
                        }
                    ]
                }
            ],
            "types": [
                {
                    "name": "widgetConnection",
                    "properties": [
                        { "name": "data", "typeName": "widget", "isArray": true, "required": true },
                        { "name": "errors", "typeName": "widgetError", "isArray": true, "required": true },
                        { "name": "pageInfo", "typeName": "pageInfo", "required": true }
                    ]
                },
                { "name": "widget", "properties": [] },
                { "name": "widgetError", "properties": [] },
                { "name": "pageInfo", "properties": [] }
            ]
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_is_relay_paginated() {
        let service = paginated_service();
        let method = &service.interfaces[0].methods[0];
        assert!(is_relay_paginated(&service, method));
    }

    #[test]
    fn test_pagination_requires_all_cursor_params() {
        for missing in ["first", "after", "last", "before"] {
            let mut service = paginated_service();
            service.interfaces[0].methods[0]
                .parameters
                .retain(|p| p.name != missing);
            let method = &service.interfaces[0].methods[0];
            assert!(
                !is_relay_paginated(&service, method),
                "missing '{missing}' must suppress pagination"
            );
        }
    }

    #[test]
    fn test_pagination_requires_cursor_param_types() {
        for (name, wrong_type) in [
            ("first", "string"),
            ("after", "integer"),
            ("last", "string"),
            ("before", "integer"),
        ] {
            let mut service = paginated_service();
            let param = service.interfaces[0].methods[0]
                .parameters
                .iter_mut()
                .find(|p| p.name == name)
                .unwrap();
            param.type_name = wrong_type.to_string();
            let method = &service.interfaces[0].methods[0];
            assert!(
                !is_relay_paginated(&service, method),
                "'{name}: {wrong_type}' must suppress pagination"
            );
        }
    }

    #[test]
    fn test_pagination_requires_page_info() {
        let mut service = paginated_service();
        service.types[0].properties.retain(|p| p.name != "pageInfo");
        let method = &service.interfaces[0].methods[0];
        assert!(!is_relay_paginated(&service, method));
    }

    #[test]
    fn test_resolve_envelope() {
        let service = paginated_service();
        let method = &service.interfaces[0].methods[0];
        let envelope = resolve_envelope(&service, method).unwrap();
        assert_eq!(envelope.data_prop.name, "data");
        assert_eq!(envelope.error_prop.name, "errors");
        // pageInfo sits outside the envelope pair.
        assert!(envelope.has_extra_properties());
    }

    #[test]
    fn test_envelope_gates() {
        // Unresolvable data property type defeats the envelope.
        let mut service = paginated_service();
        service.types.retain(|t| t.name != "widget");
        let method = &service.interfaces[0].methods[0];
        assert!(resolve_envelope(&service, method).is_none());

        // A return type without an error-list property is not an envelope.
        let mut service = paginated_service();
        service.types[0].properties.retain(|p| p.name != "errors");
        let method = &service.interfaces[0].methods[0];
        assert!(resolve_envelope(&service, method).is_none());

        // Nor one without a data property.
        let mut service = paginated_service();
        service.types[0].properties.retain(|p| p.name != "data");
        let method = &service.interfaces[0].methods[0];
        assert!(resolve_envelope(&service, method).is_none());

        // No return type, no envelope.
        let mut service = paginated_service();
        service.interfaces[0].methods[0].returns = None;
        let method = &service.interfaces[0].methods[0];
        assert!(resolve_envelope(&service, method).is_none());
    }

    #[test]
    fn test_cache_params_exclude_relay() {
        let service = paginated_service();
        let iface = &service.interfaces[0];
        let method = &iface.methods[0];
        let (_, binding) = iface.http_binding("getWidgets").unwrap();
        let names: Vec<&str> = cache_params(method, binding, false)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, vec!["status"]);

        let with_relay: Vec<&str> = cache_params(method, binding, true)
            .iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(with_relay, vec!["status", "first", "after", "last", "before"]);
    }
}
