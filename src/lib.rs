mod condition;
mod error;
mod module_rules;
mod optimization;
pub mod parse;
mod sections;
mod translate;
mod types;
mod use_chain;
pub mod validate;

pub use condition::{encode_condition, encode_logical};
pub use error::CanonError;
pub use module_rules::{compile_module, compile_rule};
pub use optimization::{encode_optimization, encode_split_chunks};
pub use sections::{
    encode_cache, encode_dev_server, encode_entry, encode_experiments, encode_externals,
    encode_node, encode_output, encode_snapshot, encode_stats, encode_target,
};
pub use translate::{Translator, translate_json};
pub use types::{
    CacheGroupOptions, CacheSetting, CanonicalOptions, ChunkSelection, CompilerHandle, Condition,
    DevServerOptions, Devtool, EncodedCondition, EncodedLogical, EntryDescription, EntryRuntime,
    ExperimentsOptions, Externals, FlagOrText, LibraryOptions, LogicalCondition, Mode,
    ModuleOptions, ModuleRule, NodeOptions, NormalizedOptions, OptimizationOptions, OutputOptions,
    PATTERN_KEY, Pattern, RawCacheGroupOptions, RawCacheOptions, RawDevServer,
    RawEntryDescription, RawExperiments, RawModuleOptions, RawModuleRule, RawModuleRuleUse,
    RawNodeOption, RawOptimizationOptions, RawOutputOptions, RawSnapshotOptions,
    RawSnapshotStrategy, RawSplitChunksOptions, RawStatsOptions, RuleUse, SnapshotOptions,
    SnapshotStrategy, SplitChunksOptions, StatsOptions, Target, TranslateError, UseChainContext,
    UseChainEncoder, UseItem, all_of, any_of, list, regexp, text,
};
pub use use_chain::{BUILTIN_PREFIX, LoaderChainEncoder};
