//! The canonical option tree handed to the build engine.
//!
//! Field names and shapes here are the wire contract: every struct
//! serializes with camelCase keys and the engine performs no further
//! adaptation.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use super::encoded::EncodedCondition;
use super::options::{ChunkSelection, LibraryOptions, Mode};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalOptions {
    pub entry: IndexMap<String, RawEntryDescription>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    pub target: Vec<String>,
    pub context: PathBuf,
    pub output: RawOutputOptions,
    pub resolve: Value,
    pub module: RawModuleOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externals: Option<Value>,
    pub externals_type: String,
    pub devtool: String,
    pub optimization: RawOptimizationOptions,
    pub stats: RawStatsOptions,
    pub dev_server: RawDevServer,
    pub snapshot: RawSnapshotOptions,
    pub cache: RawCacheOptions,
    pub experiments: RawExperiments,
    pub node: RawNodeOption,
    pub builtins: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawEntryDescription {
    pub import: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub runtime: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOutputOptions {
    pub path: PathBuf,
    pub public_path: String,
    pub asset_module_filename: String,
    pub filename: String,
    pub chunk_filename: String,
    pub css_filename: String,
    pub css_chunk_filename: String,
    pub unique_name: String,
    pub strict_module_error_handling: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<LibraryOptions>,
}

// -- Module -----------------------------------------------------------------

/// Compiled rule list, default rules first, plus the parser passthrough.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RawModuleOptions {
    pub rules: Vec<RawModuleRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<Value>,
}

/// A module rule with its conditions in tagged form.
///
/// Absent conditions and passthrough fields are omitted from the wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawModuleRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test: Option<EncodedCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include: Option<EncodedCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude: Option<EncodedCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<EncodedCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource_query: Option<EncodedCondition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuer: Option<EncodedCondition>,
    #[serde(rename = "use")]
    pub uses: Vec<RawModuleRuleUse>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parser: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolve: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub side_effects: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<RawModuleRule>>,
}

impl RawModuleRule {
    /// Nesting depth of the `oneOf` tree rooted at this rule.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self
            .one_of
            .iter()
            .flatten()
            .map(Self::depth)
            .max()
            .unwrap_or(0)
    }
}

/// One loader of a compiled chain. `options` is pre-serialized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawModuleRuleUse {
    pub loader: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<String>,
}

// -- Optimization -----------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOptimizationOptions {
    /// Absent when split chunks are disabled, never an empty record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub split_chunks: Option<RawSplitChunksOptions>,
    pub module_ids: String,
    pub remove_available_modules: bool,
    pub side_effects: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSplitChunksOptions {
    pub cache_groups: IndexMap<String, RawCacheGroupOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_chunks: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_size: Option<f64>,
}

/// A cache group; all five fields are always present, `null` when unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCacheGroupOptions {
    /// Raw pattern source, not a tagged condition.
    pub test: Option<String>,
    pub name: Option<String>,
    pub priority: Option<i32>,
    pub min_chunks: Option<u32>,
    pub chunks: Option<ChunkSelection>,
}

// -- Small sections ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawStatsOptions {
    pub colors: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawDevServer {
    pub hot: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawSnapshotOptions {
    pub resolve: RawSnapshotStrategy,
    pub module: RawSnapshotStrategy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RawSnapshotStrategy {
    pub timestamp: bool,
    pub hash: bool,
}

/// Fixed minimal cache descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCacheOptions {
    #[serde(rename = "type")]
    pub cache_type: String,
    pub max_generations: u32,
    pub max_age: u64,
    pub profile: bool,
    pub build_dependencies: Vec<String>,
    pub cache_directory: String,
    pub cache_location: String,
    pub name: String,
    pub version: String,
}

impl RawCacheOptions {
    /// `"memory"` when enabled, `"disable"` otherwise; tuning fields zeroed.
    #[must_use]
    pub fn fixed(enabled: bool) -> Self {
        let cache_type = if enabled { "memory" } else { "disable" };
        Self {
            cache_type: cache_type.to_owned(),
            max_generations: 0,
            max_age: 0,
            profile: false,
            build_dependencies: Vec::new(),
            cache_directory: String::new(),
            cache_location: String::new(),
            name: String::new(),
            version: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExperiments {
    pub lazy_compilation: bool,
    pub incremental_rebuild: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawNodeOption {
    pub dirname: String,
}
