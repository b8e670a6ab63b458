mod condition;
mod encoded;
mod error;
mod options;
mod pattern;
mod raw;
mod rule;
mod use_chain;

pub use condition::{Condition, LogicalCondition, all_of, any_of, list, regexp, text};
pub use encoded::{EncodedCondition, EncodedLogical};
pub use error::TranslateError;
pub use options::{
    CacheGroupOptions, CacheSetting, ChunkSelection, DevServerOptions, Devtool, EntryDescription,
    EntryRuntime, ExperimentsOptions, Externals, FlagOrText, LibraryOptions, Mode, ModuleOptions,
    NodeOptions, NormalizedOptions, OptimizationOptions, OutputOptions, SnapshotOptions,
    SnapshotStrategy, SplitChunksOptions, StatsOptions, Target,
};
pub use pattern::{PATTERN_KEY, Pattern};
pub use raw::{
    CanonicalOptions, RawCacheGroupOptions, RawCacheOptions, RawDevServer, RawEntryDescription,
    RawExperiments, RawModuleOptions, RawModuleRule, RawModuleRuleUse, RawNodeOption,
    RawOptimizationOptions, RawOutputOptions, RawSnapshotOptions, RawSnapshotStrategy,
    RawSplitChunksOptions, RawStatsOptions,
};
pub use rule::{ModuleRule, RuleUse, UseItem};
pub use use_chain::{CompilerHandle, UseChainContext, UseChainEncoder};
