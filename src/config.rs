//! # Resolver Configuration Module
//!
//! Everything the intent resolver needs besides the request itself: the URL
//! prefix the API is mounted under and the tables of custom actions.
//!
//! ## Sources
//!
//! - Builder methods on [`ResolverConfig`] for code-driven setup
//! - A YAML file via [`ResolverConfig::load`]
//! - Environment variables via [`ResolverConfig::from_env`]
//!
//! ## YAML Layout
//!
//! ```yaml
//! prefix: /api/v1
//! collection_actions:
//!   search: [GET, POST]
//! resource_actions:
//!   publish: [POST]
//! ```
//!
//! ## Environment Variables
//!
//! ### `JSONAPI_CONFIG`
//!
//! Path of a YAML file loaded first when set.
//!
//! ### `JSONAPI_PREFIX`
//!
//! Overrides the URL prefix, e.g. `api/v1`. Leading and trailing slashes are
//! ignored.

use anyhow::{Context, Result};
use http::Method;
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::Path;

/// Action name to the HTTP methods it accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionTable {
    actions: HashMap<String, Vec<Method>>,
}

impl ActionTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `name` for `methods`, replacing any previous registration.
    pub fn insert(&mut self, name: impl Into<String>, methods: impl IntoIterator<Item = Method>) {
        self.actions
            .insert(name.into(), methods.into_iter().collect());
    }

    /// `true` when `name` is registered and accepts `method`.
    #[must_use]
    pub fn allows(&self, name: &str, method: &Method) -> bool {
        self.actions
            .get(name)
            .is_some_and(|methods| methods.contains(method))
    }

    #[must_use]
    pub fn methods(&self, name: &str) -> Option<&[Method]> {
        self.actions.get(name).map(Vec::as_slice)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

impl<N: Into<String>, M: IntoIterator<Item = Method>> FromIterator<(N, M)> for ActionTable {
    fn from_iter<I: IntoIterator<Item = (N, M)>>(iter: I) -> Self {
        let mut table = ActionTable::new();
        for (name, methods) in iter {
            table.insert(name, methods);
        }
        table
    }
}

/// Configuration consumed by [`crate::request::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// URL prefix without leading/trailing slashes (e.g. `api/v1`), empty for none.
    pub prefix: String,
    /// Actions addressed as `/<type>/<action>`.
    pub collection_actions: ActionTable,
    /// Actions addressed as `/<type>/<id>/<action>`.
    pub resource_actions: ActionTable,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawResolverConfig {
    prefix: String,
    collection_actions: HashMap<String, Vec<String>>,
    resource_actions: HashMap<String, Vec<String>>,
}

impl ResolverConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_prefix(mut self, prefix: impl AsRef<str>) -> Self {
        self.prefix = prefix.as_ref().trim_matches('/').to_string();
        self
    }

    #[must_use]
    pub fn with_collection_action(
        mut self,
        name: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
    ) -> Self {
        self.collection_actions.insert(name, methods);
        self
    }

    #[must_use]
    pub fn with_resource_action(
        mut self,
        name: impl Into<String>,
        methods: impl IntoIterator<Item = Method>,
    ) -> Self {
        self.resource_actions.insert(name, methods);
        self
    }

    /// Parse a YAML configuration document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let raw: RawResolverConfig =
            serde_yaml::from_str(yaml).context("Failed to parse resolver configuration")?;

        Ok(Self {
            prefix: raw.prefix.trim_matches('/').to_string(),
            collection_actions: action_table(raw.collection_actions)
                .context("Invalid collection_actions")?,
            resource_actions: action_table(raw.resource_actions)
                .context("Invalid resource_actions")?,
        })
    }

    /// Load a YAML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resolver configuration {}", path.display()))?;
        Self::from_yaml_str(&yaml)
            .with_context(|| format!("Failed to load resolver configuration {}", path.display()))
    }

    /// Load configuration from `JSONAPI_CONFIG` and `JSONAPI_PREFIX`.
    pub fn from_env() -> Result<Self> {
        let mut config = match env::var("JSONAPI_CONFIG") {
            Ok(path) if !path.is_empty() => Self::load(path)?,
            _ => Self::default(),
        };
        if let Ok(prefix) = env::var("JSONAPI_PREFIX") {
            config = config.with_prefix(prefix);
        }
        Ok(config)
    }
}

fn action_table(raw: HashMap<String, Vec<String>>) -> Result<ActionTable> {
    let mut table = ActionTable::new();
    for (name, methods) in raw {
        let methods = methods
            .iter()
            .map(|m| {
                let upper = m.to_ascii_uppercase();
                match upper.as_str() {
                    "GET" => Ok(Method::GET),
                    "POST" => Ok(Method::POST),
                    "PATCH" => Ok(Method::PATCH),
                    "DELETE" => Ok(Method::DELETE),
                    _ => Err(anyhow::anyhow!("unsupported method '{m}' for action '{name}'")),
                }
            })
            .collect::<Result<Vec<_>>>()?;
        table.insert(name, methods);
    }
    Ok(table)
}
