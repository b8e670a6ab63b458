use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::pattern::Pattern;
use super::rule::ModuleRule;
use crate::CanonError;

/// Configuration after the upstream defaulting stage.
///
/// Every field is optional so that a stage which failed to run is detected
/// at translation time instead of being papered over. Unknown keys are
/// ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedOptions {
    pub context: Option<PathBuf>,
    pub mode: Option<Mode>,
    pub entry: Option<IndexMap<String, EntryDescription>>,
    pub target: Option<Target>,
    pub output: Option<OutputOptions>,
    pub resolve: Option<Value>,
    pub module: Option<ModuleOptions>,
    pub externals: Option<Externals>,
    pub externals_type: Option<String>,
    pub devtool: Option<Devtool>,
    pub optimization: Option<OptimizationOptions>,
    pub stats: Option<StatsOptions>,
    pub dev_server: Option<DevServerOptions>,
    pub snapshot: Option<SnapshotOptions>,
    pub cache: Option<CacheSetting>,
    pub experiments: Option<ExperimentsOptions>,
    pub node: Option<NodeOptions>,
    pub builtins: Option<Value>,
}

impl NormalizedOptions {
    /// Deserialize normalized options from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError::Json`] on malformed JSON or an unsupported
    /// value shape.
    pub fn from_json(input: &str) -> Result<Self, CanonError> {
        Ok(serde_json::from_str(input)?)
    }

    /// Deserialize normalized options from an already parsed JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError::Json`] on an unsupported value shape.
    pub fn from_json_value(value: Value) -> Result<Self, CanonError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Read a JSON file and deserialize the normalized options it contains.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] on I/O or deserialization failure.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CanonError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_json(&input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
    None,
}

// -- Entry / target ---------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDescription {
    pub import: Option<Vec<String>>,
    pub runtime: Option<EntryRuntime>,
}

/// Runtime chunk name of an entry; `false` in JSON means no runtime.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "FalseOrName")]
pub enum EntryRuntime {
    Disabled,
    Named(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Target {
    One(String),
    Many(Vec<String>),
}

// -- Devtool ----------------------------------------------------------------

/// Source-map mode; `false` in JSON turns source maps off.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "FalseOrName")]
pub enum Devtool {
    Off,
    Named(String),
}

impl Devtool {
    /// The canonical text form; empty when source maps are off.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Devtool::Off => "",
            Devtool::Named(name) => name,
        }
    }
}

impl From<&str> for Devtool {
    fn from(v: &str) -> Self {
        Devtool::Named(v.to_owned())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FalseOrName {
    Flag(bool),
    Name(String),
}

impl TryFrom<FalseOrName> for Devtool {
    type Error = String;

    fn try_from(repr: FalseOrName) -> Result<Self, Self::Error> {
        match repr {
            FalseOrName::Flag(false) => Ok(Devtool::Off),
            FalseOrName::Flag(true) => {
                Err("devtool `true` is not a normalized value; expected `false` or a string".into())
            }
            FalseOrName::Name(name) => Ok(Devtool::Named(name)),
        }
    }
}

impl TryFrom<FalseOrName> for EntryRuntime {
    type Error = String;

    fn try_from(repr: FalseOrName) -> Result<Self, Self::Error> {
        match repr {
            FalseOrName::Flag(false) => Ok(EntryRuntime::Disabled),
            FalseOrName::Flag(true) => {
                Err("entry runtime `true` is not a normalized value; expected `false` or a string".into())
            }
            FalseOrName::Name(name) => Ok(EntryRuntime::Named(name)),
        }
    }
}

// -- Output -----------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    pub path: Option<PathBuf>,
    pub public_path: Option<String>,
    pub asset_module_filename: Option<String>,
    pub filename: Option<String>,
    pub chunk_filename: Option<String>,
    pub css_filename: Option<String>,
    pub css_chunk_filename: Option<String>,
    pub unique_name: Option<String>,
    pub strict_module_error_handling: Option<bool>,
    pub library: Option<LibraryOptions>,
}

/// Library output settings, passed through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryOptions {
    #[serde(rename = "type")]
    pub library_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub export: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub umd_named_define: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary_comment: Option<Value>,
}

// -- Module -----------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleOptions {
    /// Built-in rules, applied before user rules. Filled in by defaulting.
    pub default_rules: Option<Vec<ModuleRule>>,
    #[serde(default)]
    pub rules: Vec<ModuleRule>,
    pub parser: Option<Value>,
}

// -- Externals --------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Externals {
    /// A single request name, treated as mapping to itself.
    Name(String),
    Other(Value),
}

// -- Optimization -----------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationOptions {
    pub module_ids: Option<String>,
    pub remove_available_modules: Option<bool>,
    pub side_effects: Option<FlagOrText>,
    /// `false` in JSON means disabled and reads as `None`.
    #[serde(default, deserialize_with = "split_chunks_or_false")]
    pub split_chunks: Option<SplitChunksOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitChunksOptions {
    #[serde(default)]
    pub cache_groups: IndexMap<String, CacheGroupOptions>,
    pub chunks: Option<ChunkSelection>,
    pub min_chunks: Option<u32>,
    pub min_size: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroupOptions {
    pub test: Option<Pattern>,
    pub name: Option<String>,
    pub priority: Option<i32>,
    pub min_chunks: Option<u32>,
    pub chunks: Option<ChunkSelection>,
}

/// Which chunks a split-chunks policy considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSelection {
    All,
    Async,
    Initial,
}

fn split_chunks_or_false<'de, D>(deserializer: D) -> Result<Option<SplitChunksOptions>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Flag(bool),
        Options(SplitChunksOptions),
    }

    match Option::<Repr>::deserialize(deserializer)? {
        None | Some(Repr::Flag(false)) => Ok(None),
        Some(Repr::Flag(true)) => Err(D::Error::custom(
            "splitChunks `true` is not a normalized value; expected `false` or an object",
        )),
        Some(Repr::Options(options)) => Ok(Some(options)),
    }
}

/// A setting that is either a boolean or a text mode, such as
/// `sideEffects: "flag"` or `node.dirname: "mock"`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FlagOrText {
    Flag(bool),
    Text(String),
}

impl fmt::Display for FlagOrText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagOrText::Flag(v) => write!(f, "{v}"),
            FlagOrText::Text(v) => f.write_str(v),
        }
    }
}

impl From<bool> for FlagOrText {
    fn from(v: bool) -> Self {
        FlagOrText::Flag(v)
    }
}

impl From<&str> for FlagOrText {
    fn from(v: &str) -> Self {
        FlagOrText::Text(v.to_owned())
    }
}

// -- Small sections ---------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StatsOptions {
    pub colors: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DevServerOptions {
    pub hot: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SnapshotOptions {
    pub resolve: Option<SnapshotStrategy>,
    pub module: Option<SnapshotStrategy>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SnapshotStrategy {
    pub timestamp: Option<bool>,
    pub hash: Option<bool>,
}

/// `cache: false`, `cache: true`, or a cache configuration object.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CacheSetting {
    Flag(bool),
    Options(Map<String, Value>),
}

impl CacheSetting {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        match self {
            CacheSetting::Flag(enabled) => *enabled,
            CacheSetting::Options(_) => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperimentsOptions {
    pub lazy_compilation: Option<bool>,
    pub incremental_rebuild: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NodeOptions {
    pub dirname: Option<FlagOrText>,
}
