//! Encoders for the flat sections of the option tree.
//!
//! Each encoder checks its own required fields and names every missing one
//! in a single error.

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::validate::{missing_fields, require};
use crate::{
    CacheSetting, DevServerOptions, EntryDescription, EntryRuntime, ExperimentsOptions, Externals,
    NodeOptions, OutputOptions, RawCacheOptions, RawDevServer, RawEntryDescription,
    RawExperiments, RawNodeOption, RawOutputOptions, RawSnapshotOptions, RawSnapshotStrategy,
    RawStatsOptions, SnapshotOptions, SnapshotStrategy, StatsOptions, Target, TranslateError,
};

/// Map each named entry to its imports and optional runtime.
///
/// `runtime: false` reads as no runtime and is omitted.
///
/// # Errors
///
/// Fails when the entry map is absent, or names every entry lacking
/// `import` as `"<name>.import"`.
pub fn encode_entry(
    entry: Option<&IndexMap<String, EntryDescription>>,
) -> Result<IndexMap<String, RawEntryDescription>, TranslateError> {
    let entry = require("options", "entry", entry)?;

    let missing: Vec<String> = entry
        .iter()
        .filter(|(_, description)| description.import.is_none())
        .map(|(name, _)| format!("{name}.import"))
        .collect();
    if !missing.is_empty() {
        return Err(TranslateError::MissingFields {
            section: "entry".to_owned(),
            fields: missing,
        });
    }

    Ok(entry
        .iter()
        .filter_map(|(name, description)| {
            let import = description.import.clone()?;
            let runtime = match &description.runtime {
                Some(EntryRuntime::Named(runtime)) => Some(runtime.clone()),
                Some(EntryRuntime::Disabled) | None => None,
            };
            Some((name.clone(), RawEntryDescription { import, runtime }))
        })
        .collect())
}

/// Absent target is an empty list; a single name becomes a one-element list.
#[must_use]
pub fn encode_target(target: Option<&Target>) -> Vec<String> {
    match target {
        None => Vec::new(),
        Some(Target::One(name)) => vec![name.clone()],
        Some(Target::Many(names)) => names.clone(),
    }
}

/// Pass the output section through once every path and filename is present.
///
/// # Errors
///
/// Returns [`TranslateError::MissingFields`] naming each absent field.
pub fn encode_output(output: Option<&OutputOptions>) -> Result<RawOutputOptions, TranslateError> {
    let default = OutputOptions::default();
    let o = output.unwrap_or(&default);

    let (
        Some(path),
        Some(public_path),
        Some(asset_module_filename),
        Some(filename),
        Some(chunk_filename),
        Some(css_filename),
        Some(css_chunk_filename),
        Some(unique_name),
        Some(strict_module_error_handling),
    ) = (
        o.path.as_ref(),
        o.public_path.as_ref(),
        o.asset_module_filename.as_ref(),
        o.filename.as_ref(),
        o.chunk_filename.as_ref(),
        o.css_filename.as_ref(),
        o.css_chunk_filename.as_ref(),
        o.unique_name.as_ref(),
        o.strict_module_error_handling,
    )
    else {
        return Err(missing_fields(
            "output",
            &[
                ("path", o.path.is_some()),
                ("publicPath", o.public_path.is_some()),
                ("assetModuleFilename", o.asset_module_filename.is_some()),
                ("filename", o.filename.is_some()),
                ("chunkFilename", o.chunk_filename.is_some()),
                ("cssFilename", o.css_filename.is_some()),
                ("cssChunkFilename", o.css_chunk_filename.is_some()),
                ("uniqueName", o.unique_name.is_some()),
                (
                    "strictModuleErrorHandling",
                    o.strict_module_error_handling.is_some(),
                ),
            ],
        ));
    };

    Ok(RawOutputOptions {
        path: path.clone(),
        public_path: public_path.clone(),
        asset_module_filename: asset_module_filename.clone(),
        filename: filename.clone(),
        chunk_filename: chunk_filename.clone(),
        css_filename: css_filename.clone(),
        css_chunk_filename: css_chunk_filename.clone(),
        unique_name: unique_name.clone(),
        strict_module_error_handling,
        library: o.library.clone(),
    })
}

/// A single request name maps to itself; anything else passes through.
#[must_use]
pub fn encode_externals(externals: Option<&Externals>) -> Option<Value> {
    externals.map(|externals| match externals {
        Externals::Name(name) => {
            let mut map = Map::new();
            map.insert(name.clone(), Value::String(name.clone()));
            Value::Object(map)
        }
        Externals::Other(value) => value.clone(),
    })
}

/// # Errors
///
/// Returns [`TranslateError::MissingFields`] naming each absent
/// `resolve`/`module` timestamp or hash flag.
pub fn encode_snapshot(
    snapshot: Option<&SnapshotOptions>,
) -> Result<RawSnapshotOptions, TranslateError> {
    let resolve = snapshot.and_then(|s| s.resolve.as_ref());
    let module = snapshot.and_then(|s| s.module.as_ref());
    let flags = |strategy: Option<&SnapshotStrategy>| {
        (
            strategy.and_then(|s| s.timestamp),
            strategy.and_then(|s| s.hash),
        )
    };
    let (resolve_timestamp, resolve_hash) = flags(resolve);
    let (module_timestamp, module_hash) = flags(module);

    let (Some(rt), Some(rh), Some(mt), Some(mh)) =
        (resolve_timestamp, resolve_hash, module_timestamp, module_hash)
    else {
        return Err(missing_fields(
            "snapshot",
            &[
                ("resolve.timestamp", resolve_timestamp.is_some()),
                ("resolve.hash", resolve_hash.is_some()),
                ("module.timestamp", module_timestamp.is_some()),
                ("module.hash", module_hash.is_some()),
            ],
        ));
    };

    Ok(RawSnapshotOptions {
        resolve: RawSnapshotStrategy {
            timestamp: rt,
            hash: rh,
        },
        module: RawSnapshotStrategy {
            timestamp: mt,
            hash: mh,
        },
    })
}

/// # Errors
///
/// Returns [`TranslateError::MissingFields`] naming each absent flag.
pub fn encode_experiments(
    experiments: Option<&ExperimentsOptions>,
) -> Result<RawExperiments, TranslateError> {
    let lazy = experiments.and_then(|e| e.lazy_compilation);
    let incremental = experiments.and_then(|e| e.incremental_rebuild);

    let (Some(lazy_compilation), Some(incremental_rebuild)) = (lazy, incremental) else {
        return Err(missing_fields(
            "experiments",
            &[
                ("lazyCompilation", lazy.is_some()),
                ("incrementalRebuild", incremental.is_some()),
            ],
        ));
    };

    Ok(RawExperiments {
        lazy_compilation,
        incremental_rebuild,
    })
}

/// The directory-name marker, coerced to text.
///
/// # Errors
///
/// Returns [`TranslateError::MissingFields`] when `dirname` is absent.
pub fn encode_node(node: Option<&NodeOptions>) -> Result<RawNodeOption, TranslateError> {
    let dirname = require("node", "dirname", node.and_then(|n| n.dirname.as_ref()))?;
    Ok(RawNodeOption {
        dirname: dirname.to_string(),
    })
}

#[must_use]
pub fn encode_stats(stats: Option<&StatsOptions>) -> RawStatsOptions {
    RawStatsOptions {
        colors: stats.and_then(|s| s.colors).unwrap_or(false),
    }
}

#[must_use]
pub fn encode_dev_server(dev_server: Option<&DevServerOptions>) -> RawDevServer {
    RawDevServer {
        hot: dev_server.and_then(|d| d.hot).unwrap_or(false),
    }
}

/// Fixed minimal cache descriptor for the given setting.
#[must_use]
pub fn encode_cache(cache: &CacheSetting) -> RawCacheOptions {
    RawCacheOptions::fixed(cache.is_enabled())
}
