//! Host and function manifests consumed by the Azure Functions runtime.
//!
//! Both documents have a fixed shape and are written as compact JSON with
//! keys in declaration order.

use crate::result::Result;
use crate::utils;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const HOST_FILE: &str = "host.json";
pub const FUNCTION_FILE: &str = "function.json";

/// `host.json`: runtime version and HTTP routing options
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HostManifest {
    pub version: String,
    pub extensions: Extensions,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Extensions {
    pub http: HttpExtension,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpExtension {
    pub route_prefix: String,
}

impl Default for HostManifest {
    fn default() -> Self {
        Self {
            version: "2.0".to_string(),
            extensions: Extensions {
                http: HttpExtension {
                    route_prefix: String::new(),
                },
            },
        }
    }
}

/// `function.json`: a single catch-all HTTP function
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionManifest {
    pub entry_point: String,
    pub bindings: Vec<Binding>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Binding {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_level: Option<AuthLevel>,
    #[serde(rename = "type")]
    pub kind: BindingKind,
    pub direction: Direction,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<HttpMethod>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthLevel {
    Anonymous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingKind {
    HttpTrigger,
    Http,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Delete,
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
    ];
}

impl Binding {
    /// Anonymous HTTP trigger matching every path and method, bound to `req`
    pub fn catch_all_trigger() -> Self {
        Self {
            auth_level: Some(AuthLevel::Anonymous),
            kind: BindingKind::HttpTrigger,
            direction: Direction::In,
            name: "req".to_string(),
            route: Some("{*url}".to_string()),
            methods: HttpMethod::ALL.to_vec(),
        }
    }

    /// HTTP response output bound to `res`
    pub fn http_response() -> Self {
        Self {
            auth_level: None,
            kind: BindingKind::Http,
            direction: Direction::Out,
            name: "res".to_string(),
            route: None,
            methods: Vec::new(),
        }
    }
}

impl Default for FunctionManifest {
    fn default() -> Self {
        Self {
            entry_point: "handle".to_string(),
            bindings: vec![Binding::catch_all_trigger(), Binding::http_response()],
        }
    }
}

/// Serialize `value` as compact JSON into `path`
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    utils::write_file(path, json)
}
