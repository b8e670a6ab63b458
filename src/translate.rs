use crate::module_rules::compile_module;
use crate::optimization::encode_optimization;
use crate::sections::{
    encode_cache, encode_dev_server, encode_entry, encode_experiments, encode_externals,
    encode_node, encode_output, encode_snapshot, encode_stats, encode_target,
};
use crate::validate::missing_fields;
use crate::{
    CanonError, CanonicalOptions, CompilerHandle, LoaderChainEncoder, ModuleOptions,
    NormalizedOptions, TranslateError, UseChainContext, UseChainEncoder,
};

/// Turns normalized options into the engine's canonical option tree.
///
/// A translator borrows the compiler it works for and owns its use-chain
/// encoder. It keeps no state between calls: translating the same input
/// twice yields identical output.
///
/// ```
/// use canonopts::{CompilerHandle, NormalizedOptions, Translator};
///
/// let compiler = CompilerHandle::new("web");
/// let translator = Translator::new(&compiler);
/// let err = translator.translate(&NormalizedOptions::default()).unwrap_err();
/// assert_eq!(err.missing_fields(), ["context", "devtool", "cache"]);
/// ```
#[derive(Debug, Clone)]
pub struct Translator<'a, E = LoaderChainEncoder> {
    compiler: &'a CompilerHandle,
    encoder: E,
}

impl<'a> Translator<'a> {
    /// A translator using the default [`LoaderChainEncoder`].
    #[must_use]
    pub fn new(compiler: &'a CompilerHandle) -> Self {
        Self {
            compiler,
            encoder: LoaderChainEncoder,
        }
    }
}

impl<'a, E: UseChainEncoder> Translator<'a, E> {
    #[must_use]
    pub fn with_use_encoder(compiler: &'a CompilerHandle, encoder: E) -> Self {
        Self { compiler, encoder }
    }

    #[must_use]
    pub fn compiler(&self) -> &CompilerHandle {
        self.compiler
    }

    /// Translate `options` in a single top-down pass.
    ///
    /// `devtool: false` becomes `""`, both in the output and in the context
    /// handed to the use-chain encoder.
    ///
    /// # Errors
    ///
    /// Returns [`TranslateError::MissingFields`] if `context`, `devtool` or
    /// `cache`, or a required field of any section, is absent. Errors from
    /// the use-chain encoder are returned unchanged. Nothing is returned on
    /// failure; translation is all or nothing.
    pub fn translate(&self, options: &NormalizedOptions) -> Result<CanonicalOptions, TranslateError> {
        let (Some(context), Some(devtool), Some(cache)) = (
            options.context.as_ref(),
            options.devtool.as_ref(),
            options.cache.as_ref(),
        ) else {
            return Err(missing_fields(
                "options",
                &[
                    ("context", options.context.is_some()),
                    ("devtool", options.devtool.is_some()),
                    ("cache", options.cache.is_some()),
                ],
            ));
        };
        let devtool = devtool.as_str();

        let ctx = UseChainContext {
            compiler: self.compiler,
            devtool,
            context: context.as_path(),
        };

        let entry = encode_entry(options.entry.as_ref())?;
        let output = encode_output(options.output.as_ref())?;
        let default_module = ModuleOptions::default();
        let module = compile_module(
            options.module.as_ref().unwrap_or(&default_module),
            &self.encoder,
            &ctx,
        )?;
        let optimization = encode_optimization(options.optimization.as_ref())?;
        let snapshot = encode_snapshot(options.snapshot.as_ref())?;
        let experiments = encode_experiments(options.experiments.as_ref())?;
        let node = encode_node(options.node.as_ref())?;

        tracing::debug!(
            compiler = self.compiler.name(),
            entries = entry.len(),
            rules = module.rules.len(),
            devtool,
            split_chunks = optimization.split_chunks.is_some(),
            cache = cache.is_enabled(),
            "translated options"
        );

        Ok(CanonicalOptions {
            entry,
            mode: options.mode,
            target: encode_target(options.target.as_ref()),
            context: context.clone(),
            output,
            resolve: passthrough(options.resolve.as_ref()),
            module,
            externals: encode_externals(options.externals.as_ref()),
            externals_type: options.externals_type.clone().unwrap_or_default(),
            devtool: devtool.to_owned(),
            optimization,
            stats: encode_stats(options.stats.as_ref()),
            dev_server: encode_dev_server(options.dev_server.as_ref()),
            snapshot,
            cache: encode_cache(cache),
            experiments,
            node,
            builtins: passthrough(options.builtins.as_ref()),
        })
    }
}

/// Opaque JSON section, `{}` when absent.
fn passthrough(value: Option<&serde_json::Value>) -> serde_json::Value {
    value
        .cloned()
        .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()))
}

/// Load normalized options from JSON and translate them with the default
/// use-chain encoder.
///
/// # Errors
///
/// Returns [`CanonError::Json`] if the input does not deserialize, or
/// [`CanonError::Translate`] if translation fails.
pub fn translate_json(input: &str, compiler: &CompilerHandle) -> Result<CanonicalOptions, CanonError> {
    let options = NormalizedOptions::from_json(input)?;
    Ok(Translator::new(compiler).translate(&options)?)
}
