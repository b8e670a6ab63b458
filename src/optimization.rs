use indexmap::IndexMap;

use crate::validate::missing_fields;
use crate::{
    CacheGroupOptions, OptimizationOptions, RawCacheGroupOptions, RawOptimizationOptions,
    RawSplitChunksOptions, SplitChunksOptions, TranslateError,
};

const SECTION: &str = "optimization";

/// Encode the optimization section.
///
/// `sideEffects` is stringified whatever its original shape. Disabled split
/// chunks stay absent rather than becoming an empty record.
///
/// # Errors
///
/// Returns [`TranslateError::MissingFields`] naming each of `moduleIds`,
/// `removeAvailableModules` and `sideEffects` that is absent, all of them
/// when the section itself is absent.
pub fn encode_optimization(
    optimization: Option<&OptimizationOptions>,
) -> Result<RawOptimizationOptions, TranslateError> {
    let default = OptimizationOptions::default();
    let optimization = optimization.unwrap_or(&default);

    let (Some(module_ids), Some(remove_available_modules), Some(side_effects)) = (
        optimization.module_ids.as_ref(),
        optimization.remove_available_modules,
        optimization.side_effects.as_ref(),
    ) else {
        return Err(missing_fields(
            SECTION,
            &[
                ("moduleIds", optimization.module_ids.is_some()),
                (
                    "removeAvailableModules",
                    optimization.remove_available_modules.is_some(),
                ),
                ("sideEffects", optimization.side_effects.is_some()),
            ],
        ));
    };

    Ok(RawOptimizationOptions {
        split_chunks: optimization.split_chunks.as_ref().map(encode_split_chunks),
        module_ids: module_ids.clone(),
        remove_available_modules,
        side_effects: side_effects.to_string(),
    })
}

/// Encode split-chunks settings, keeping cache groups in declaration order.
#[must_use]
pub fn encode_split_chunks(split_chunks: &SplitChunksOptions) -> RawSplitChunksOptions {
    let cache_groups: IndexMap<String, RawCacheGroupOptions> = split_chunks
        .cache_groups
        .iter()
        .map(|(name, group)| (name.clone(), encode_cache_group(group)))
        .collect();

    RawSplitChunksOptions {
        cache_groups,
        chunks: split_chunks.chunks,
        min_chunks: split_chunks.min_chunks,
        min_size: split_chunks.min_size,
    }
}

fn encode_cache_group(group: &CacheGroupOptions) -> RawCacheGroupOptions {
    RawCacheGroupOptions {
        test: group.test.as_ref().map(|pattern| pattern.source().to_owned()),
        name: group.name.clone(),
        priority: group.priority,
        min_chunks: group.min_chunks,
        chunks: group.chunks,
    }
}
