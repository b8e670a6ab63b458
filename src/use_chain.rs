use serde_json::{Map, Value};

use crate::parse::parse_loader_request;
use crate::{RawModuleRuleUse, RuleUse, TranslateError, UseChainContext, UseChainEncoder, UseItem};

/// Prefix of loaders implemented inside the engine itself.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// Default [`UseChainEncoder`]: one engine loader per loader in the chain.
///
/// Request strings are split on `!`, with inline `?` options kept as text.
/// Object options are serialized to JSON text. Built-in loaders get
/// `"sourceMap": true` added to their object options when the active
/// devtool produces source maps and the options do not set it.
///
/// Loader paths are not resolved.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoaderChainEncoder;

impl LoaderChainEncoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl UseChainEncoder for LoaderChainEncoder {
    fn encode_use(
        &self,
        uses: &RuleUse,
        ctx: &UseChainContext<'_>,
    ) -> Result<Vec<RawModuleRuleUse>, TranslateError> {
        let mut chain = Vec::with_capacity(uses.len());
        for item in uses.items() {
            match item {
                UseItem::Request(request) => {
                    let loaders = parse_loader_request(request)
                        .map_err(|e| TranslateError::UseChain(Box::new(e)))?;
                    chain.extend(loaders.into_iter().map(|l| RawModuleRuleUse {
                        loader: l.loader,
                        options: l.query,
                    }));
                }
                UseItem::Loader { loader, options } => {
                    chain.push(RawModuleRuleUse {
                        loader: loader.clone(),
                        options: encode_options(loader, options.as_ref(), ctx.devtool)?,
                    });
                }
            }
        }
        Ok(chain)
    }
}

fn encode_options(
    loader: &str,
    options: Option<&Value>,
    devtool: &str,
) -> Result<Option<String>, TranslateError> {
    match options {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.clone())),
        Some(Value::Object(map)) if wants_source_map(loader, map, devtool) => {
            let mut map = map.clone();
            map.insert("sourceMap".to_owned(), Value::Bool(true));
            to_json(&Value::Object(map)).map(Some)
        }
        Some(other) => to_json(other).map(Some),
    }
}

fn wants_source_map(loader: &str, options: &Map<String, Value>, devtool: &str) -> bool {
    loader.starts_with(BUILTIN_PREFIX)
        && devtool.contains("source-map")
        && !options.contains_key("sourceMap")
}

fn to_json(value: &Value) -> Result<String, TranslateError> {
    serde_json::to_string(value).map_err(|e| TranslateError::UseChain(Box::new(e)))
}
