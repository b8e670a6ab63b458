use std::path::Path;

use super::error::TranslateError;
use super::raw::RawModuleRuleUse;
use super::rule::RuleUse;

/// Identity of the compiler instance a translation runs for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerHandle {
    name: String,
}

impl CompilerHandle {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// What a [`UseChainEncoder`] may consult while encoding a rule's loaders.
#[derive(Debug, Clone, Copy)]
pub struct UseChainContext<'a> {
    pub compiler: &'a CompilerHandle,
    /// Active source-map mode; empty when source maps are off.
    pub devtool: &'a str,
    /// Base directory of the configuration.
    pub context: &'a Path,
}

/// Encodes a rule's `use` specification into the engine's loader chain.
///
/// The translator treats implementations as a black box and propagates
/// their errors unchanged.
pub trait UseChainEncoder {
    /// # Errors
    ///
    /// Implementations report failures as [`TranslateError::UseChain`].
    fn encode_use(
        &self,
        uses: &RuleUse,
        ctx: &UseChainContext<'_>,
    ) -> Result<Vec<RawModuleRuleUse>, TranslateError>;
}

impl<T: UseChainEncoder + ?Sized> UseChainEncoder for &T {
    fn encode_use(
        &self,
        uses: &RuleUse,
        ctx: &UseChainContext<'_>,
    ) -> Result<Vec<RawModuleRuleUse>, TranslateError> {
        (**self).encode_use(uses, ctx)
    }
}
