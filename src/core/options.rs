//! Named build options passed to CMake as cache definitions.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Option carrying the active configuration name.
pub const BUILD_TYPE_OPTION: &str = "CMAKE_BUILD_TYPE";

/// Value of a single named option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OptionValue {
    Bool(bool),
    String(String),
    Path(PathBuf),
}

impl OptionValue {
    /// Render as a `-D` argument for `name`.
    pub fn to_define(&self, name: &str) -> String {
        match self {
            OptionValue::Bool(b) => format!("-D{}:BOOL={}", name, if *b { "ON" } else { "OFF" }),
            OptionValue::String(s) => format!("-D{}={}", name, s),
            OptionValue::Path(p) => format!("-D{}:PATH={}", name, p.display()),
        }
    }
}

impl From<bool> for OptionValue {
    fn from(b: bool) -> Self {
        OptionValue::Bool(b)
    }
}

impl From<&str> for OptionValue {
    fn from(s: &str) -> Self {
        OptionValue::String(s.to_string())
    }
}

impl From<String> for OptionValue {
    fn from(s: String) -> Self {
        OptionValue::String(s)
    }
}

impl From<PathBuf> for OptionValue {
    fn from(p: PathBuf) -> Self {
        OptionValue::Path(p)
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" => Some(true),
        "off" | "false" | "no" => Some(false),
        _ => None,
    }
}

/// A `NAME=VALUE` definition given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDefine {
    pub name: String,
    pub value: OptionValue,
}

impl FromStr for OptionDefine {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| format!("invalid option '{}'; expected NAME=VALUE", s))?;

        let name = name.trim();
        if name.is_empty() {
            return Err(format!("invalid option '{}'; name is empty", s));
        }

        let value = parse_bool(value)
            .map(OptionValue::Bool)
            .unwrap_or_else(|| OptionValue::String(value.to_string()));

        Ok(OptionDefine {
            name: name.to_string(),
            value,
        })
    }
}

/// Ordered set of named options. Later inserts win on collision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildOptionSet {
    options: BTreeMap<String, OptionValue>,
}

impl BuildOptionSet {
    pub fn new() -> Self {
        BuildOptionSet::default()
    }

    /// Insert or replace an option.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<OptionValue>) {
        self.options.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.options.get(name)
    }

    /// Overlay another layer on top of this one.
    pub fn merge(&mut self, layer: &BuildOptionSet) {
        for (name, value) in &layer.options {
            self.options.insert(name.clone(), value.clone());
        }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.options.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Render every option as a `-D` argument, in name order.
    pub fn to_defines(&self) -> Vec<String> {
        self.iter().map(|(name, value)| value.to_define(name)).collect()
    }
}

impl<K: Into<String>, V: Into<OptionValue>> FromIterator<(K, V)> for BuildOptionSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = BuildOptionSet::new();
        for (k, v) in iter {
            set.set(k, v);
        }
        set
    }
}

impl<K: Into<String>, V: Into<OptionValue>> Extend<(K, V)> for BuildOptionSet {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}
