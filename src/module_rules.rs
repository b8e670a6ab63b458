use crate::condition::encode_condition;
use crate::validate::require;
use crate::{
    Condition, EncodedCondition, ModuleOptions, ModuleRule, RawModuleOptions, RawModuleRule,
    RuleUse, TranslateError, UseChainContext, UseChainEncoder,
};

/// Compile one rule, and its `oneOf` sub-rules, into canonical form.
///
/// Conditions are encoded when present and omitted otherwise. The `use`
/// chain goes to `encoder` unchanged, as an empty chain when absent.
/// Passthrough fields are copied as they are.
///
/// # Errors
///
/// Fails only when `encoder` fails, for this rule or a nested one.
pub fn compile_rule<E>(
    rule: &ModuleRule,
    encoder: &E,
    ctx: &UseChainContext<'_>,
) -> Result<RawModuleRule, TranslateError>
where
    E: UseChainEncoder + ?Sized,
{
    let empty = RuleUse::new();
    let uses = encoder.encode_use(rule.uses.as_ref().unwrap_or(&empty), ctx)?;

    let one_of = rule
        .one_of
        .as_deref()
        .map(|rules| {
            rules
                .iter()
                .map(|sub| compile_rule(sub, encoder, ctx))
                .collect::<Result<Vec<_>, _>>()
        })
        .transpose()?;

    Ok(RawModuleRule {
        test: encode_opt(rule.test.as_ref()),
        include: encode_opt(rule.include.as_ref()),
        exclude: encode_opt(rule.exclude.as_ref()),
        resource: encode_opt(rule.resource.as_ref()),
        resource_query: encode_opt(rule.resource_query.as_ref()),
        issuer: encode_opt(rule.issuer.as_ref()),
        uses,
        module_type: rule.module_type.clone(),
        parser: rule.parser.clone(),
        generator: rule.generator.clone(),
        resolve: rule.resolve.clone(),
        side_effects: rule.side_effects,
        one_of,
    })
}

/// Compile the module section: default rules first, then user rules.
///
/// # Errors
///
/// Returns [`TranslateError::MissingFields`] if `defaultRules` is absent,
/// before any rule is compiled. Otherwise fails when a rule fails.
pub fn compile_module<E>(
    module: &ModuleOptions,
    encoder: &E,
    ctx: &UseChainContext<'_>,
) -> Result<RawModuleOptions, TranslateError>
where
    E: UseChainEncoder + ?Sized,
{
    let defaults = require("module", "defaultRules", module.default_rules.as_ref())?;

    let rules = defaults
        .iter()
        .chain(&module.rules)
        .enumerate()
        .map(|(index, rule)| -> Result<RawModuleRule, TranslateError> {
            let compiled = compile_rule(rule, encoder, ctx)?;
            tracing::trace!(
                index,
                builtin = index < defaults.len(),
                loaders = compiled.uses.len(),
                depth = compiled.depth(),
                "compiled module rule"
            );
            Ok(compiled)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(RawModuleOptions {
        rules,
        parser: module.parser.clone(),
    })
}

fn encode_opt(condition: Option<&Condition>) -> Option<EncodedCondition> {
    condition.map(encode_condition)
}
