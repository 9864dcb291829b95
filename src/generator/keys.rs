//! Query cache key construction.
//!
//! Two key conventions exist in deployed consumers; one is chosen per
//! generation run and applied uniformly to every key and every invalidation
//! target, so generated output never mixes them:
//!
//! - [`KeyConvention::FlatTuple`]: `['<interface>', '<method>', bag]`, where
//!   the bag is the compacted cache-parameter object (always present, `{}`
//!   when empty). Infinite queries append `{ infinite: true }`. Mutations
//!   invalidate the interface tag `['<interface>']`, which prefix-matches
//!   every query of that interface.
//! - [`KeyConvention::ResourcePath`]: the HTTP path template with parameters
//!   substituted, plus the compacted bag when parameters exist. Mutations
//!   invalidate the exact resource key and the parent collection key (the
//!   path with trailing `{param}` segments removed).
//!
//! Relay cursor parameters never appear in a key bag. The plain and infinite
//! keys for a paginated method differ by the `{ infinite: true }` marker.

use crate::model::{HttpBinding, HttpRoute, Interface, Method, Parameter};

use super::KeyConvention;
use super::classify::{cache_params, non_relay_params};
use super::imports::ImportBuilder;
use super::names::camel;

/// Builds cache key expressions for one interface under one convention.
#[derive(Debug, Clone, Copy)]
pub struct QueryKeyBuilder<'a> {
    interface: &'a Interface,
    convention: KeyConvention,
}

impl<'a> QueryKeyBuilder<'a> {
    pub fn new(interface: &'a Interface, convention: KeyConvention) -> Self {
        Self { interface, convention }
    }

    /// The TypeScript expression for a method's query key.
    pub fn query_key(
        &self,
        method: &Method,
        binding: &HttpBinding,
        route: &HttpRoute,
        infinite: bool,
        runtime: &mut ImportBuilder,
    ) -> String {
        let mut elements = match self.convention {
            KeyConvention::FlatTuple => {
                // The flat convention keys over every non-cursor parameter,
                // path and body included.
                let params = non_relay_params(method);
                let bag = if params.is_empty() {
                    "{}".to_string()
                } else {
                    format!("{} ?? {{}}", self.compact_bag(method, &params, runtime))
                };
                vec![
                    format!("'{}'", camel(&self.interface.name)),
                    format!("'{}'", method.name),
                    bag,
                ]
            }
            KeyConvention::ResourcePath => {
                // Path params live in the template; only the query string
                // contributes to the bag.
                let params = cache_params(method, binding, false);
                let mut elements = vec![resource_key(&route.path, method, false)];
                if !params.is_empty() {
                    elements.push(self.compact_bag(method, &params, runtime));
                }
                elements
            }
        };
        if infinite {
            elements.push("{ infinite: true }".to_string());
        }
        let needs_filter = self.convention == KeyConvention::ResourcePath && elements.len() > 1;
        let tuple = format!("[{}]", elements.join(", "));
        if needs_filter {
            format!("{tuple}.filter(Boolean)")
        } else {
            tuple
        }
    }

    /// The key expressions a mutation invalidates, in invalidation order.
    pub fn invalidation_keys(&self, method: &Method, route: &HttpRoute) -> Vec<String> {
        match self.convention {
            KeyConvention::FlatTuple => {
                vec![format!("['{}']", camel(&self.interface.name))]
            }
            KeyConvention::ResourcePath => {
                let exact = format!("[{}]", resource_key(&route.path, method, false));
                let parent = format!("[{}]", resource_key(&route.path, method, true));
                let mut keys = vec![exact];
                if !keys.contains(&parent) {
                    keys.push(parent);
                }
                keys
            }
        }
    }

    fn compact_bag(
        &self,
        method: &Method,
        params: &[&Parameter],
        runtime: &mut ImportBuilder,
    ) -> String {
        let q = if method.params_all_optional() { "?" } else { "" };
        let entries = params
            .iter()
            .map(|p| {
                let mut access = format!("params{q}.{}", p.name);
                if p.is_array {
                    if p.required && q.is_empty() {
                        access.push_str(".join(',')");
                    } else {
                        access.push_str("?.join(',')");
                    }
                }
                format!("{}: {access}", p.name)
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("{}({{ {entries} }})", runtime.value("compact"))
    }
}

/// Substitute `{param}` path segments and render the path as a template
/// literal key element. With `skip_terminal`, trailing parameter segments are
/// dropped first, yielding the parent collection path.
fn resource_key(path: &str, method: &Method, skip_terminal: bool) -> String {
    let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if skip_terminal {
        while segments.last().is_some_and(|s| s.starts_with('{') && s.ends_with('}')) {
            segments.pop();
        }
    }
    let q = if method.params_all_optional() { "?" } else { "" };
    let rendered: Vec<String> = segments
        .iter()
        .map(|s| {
            if let Some(name) = s.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                format!("${{params{q}.{name}}}")
            } else {
                (*s).to_string()
            }
        })
        .collect();
    format!("`/{}`", rendered.join("/"))
}
