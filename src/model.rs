//! Service descriptor model.
//!
//! Deserialized from the JSON description a host framework produces for a
//! generated HTTP client: interfaces with methods, the HTTP routes those
//! methods are bound to, and the named type declarations their signatures
//! reference. The generator treats a [`Service`] as immutable input; every
//! accessor below borrows.

use serde::Deserialize;

/// Top-level service description.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Human-readable service title (e.g. "widget api"). Used to derive the
    /// Provider, context and config type names.
    pub title: String,
    #[serde(default)]
    pub version: Option<String>,
    pub interfaces: Vec<Interface>,
    #[serde(default)]
    pub types: Vec<TypeDef>,
    #[serde(default)]
    pub enums: Vec<EnumDef>,
    #[serde(default)]
    pub unions: Vec<UnionDef>,
}

/// A group of related methods exposed by one client class.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interface {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub methods: Vec<Method>,
    /// HTTP routes binding this interface's methods to verbs and paths.
    #[serde(default)]
    pub routes: Vec<HttpRoute>,
}

/// One callable method of an interface.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub deprecated: bool,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    #[serde(default)]
    pub returns: Option<ReturnType>,
}

/// A method parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    /// Primitive name ("string", "integer", ...) or a declaration name.
    pub type_name: String,
    #[serde(default)]
    pub is_primitive: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub required: bool,
}

/// A method return type.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnType {
    pub type_name: String,
    #[serde(default)]
    pub is_primitive: bool,
    #[serde(default)]
    pub is_array: bool,
}

/// An HTTP path template and the method bindings mounted on it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRoute {
    /// Path template with `{param}` segments, e.g. `/widgets/{id}`.
    pub path: String,
    #[serde(default)]
    pub bindings: Vec<HttpBinding>,
}

/// Binds one method to a verb on a route.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpBinding {
    /// Name of the bound [`Method`].
    pub method: String,
    pub verb: HttpVerb,
    #[serde(default)]
    pub parameters: Vec<HttpParameter>,
}

/// HTTP verb of a binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpVerb {
    pub fn is_get(self) -> bool {
        self == Self::Get
    }
}

/// Where a bound parameter travels on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpLocation {
    Path,
    Query,
    Header,
    Body,
}

/// Wire location for one method parameter.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpParameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: HttpLocation,
}

/// A named object type declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeDef {
    pub name: String,
    #[serde(default)]
    pub properties: Vec<Property>,
}

/// A property of a [`TypeDef`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    pub type_name: String,
    #[serde(default)]
    pub is_primitive: bool,
    #[serde(default)]
    pub is_array: bool,
    #[serde(default)]
    pub required: bool,
}

/// A named enum declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumDef {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// A named union declaration.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnionDef {
    pub name: String,
    #[serde(default)]
    pub members: Vec<String>,
}

/// A resolved named declaration of any kind.
#[derive(Debug, Clone, Copy)]
pub enum Declaration<'a> {
    Type(&'a TypeDef),
    Enum(&'a EnumDef),
    Union(&'a UnionDef),
}

impl Service {
    pub fn type_by_name(&self, name: &str) -> Option<&TypeDef> {
        self.types.iter().find(|t| t.name == name)
    }

    pub fn enum_by_name(&self, name: &str) -> Option<&EnumDef> {
        self.enums.iter().find(|e| e.name == name)
    }

    pub fn union_by_name(&self, name: &str) -> Option<&UnionDef> {
        self.unions.iter().find(|u| u.name == name)
    }

    /// Resolve a name against types, enums, and unions, in that order.
    pub fn declaration_by_name(&self, name: &str) -> Option<Declaration<'_>> {
        self.type_by_name(name)
            .map(Declaration::Type)
            .or_else(|| self.enum_by_name(name).map(Declaration::Enum))
            .or_else(|| self.union_by_name(name).map(Declaration::Union))
    }
}

impl Interface {
    /// Find the route and binding for a method, if it is HTTP-exposed.
    pub fn http_binding(&self, method_name: &str) -> Option<(&HttpRoute, &HttpBinding)> {
        self.routes.iter().find_map(|route| {
            route
                .bindings
                .iter()
                .find(|b| b.method == method_name)
                .map(|b| (route, b))
        })
    }
}

impl Method {
    pub fn has_params(&self) -> bool {
        !self.parameters.is_empty()
    }

    /// True when every parameter is optional (or there are none), in which
    /// case call sites take an optional params object.
    pub fn params_all_optional(&self) -> bool {
        self.parameters.iter().all(|p| !p.required)
    }
}

impl HttpBinding {
    pub fn parameter(&self, name: &str) -> Option<&HttpParameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}
