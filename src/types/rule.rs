use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::condition::Condition;

/// A module rule as it appears in the normalized configuration.
///
/// Condition fields are narrowed on deserialization; `type`, `parser`,
/// `generator`, `resolve` and `sideEffects` are carried opaquely. Rules nest
/// through `oneOf`. A condition field holding `null` is rejected like any
/// other unsupported shape; only an absent key reads as `None`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleRule {
    #[serde(default, deserialize_with = "present_condition")]
    pub test: Option<Condition>,
    #[serde(default, deserialize_with = "present_condition")]
    pub include: Option<Condition>,
    #[serde(default, deserialize_with = "present_condition")]
    pub exclude: Option<Condition>,
    #[serde(default, deserialize_with = "present_condition")]
    pub resource: Option<Condition>,
    #[serde(default, deserialize_with = "present_condition")]
    pub resource_query: Option<Condition>,
    #[serde(default, deserialize_with = "present_condition")]
    pub issuer: Option<Condition>,
    #[serde(rename = "type")]
    pub module_type: Option<String>,
    pub parser: Option<Value>,
    pub generator: Option<Value>,
    pub resolve: Option<Value>,
    pub side_effects: Option<bool>,
    #[serde(rename = "use")]
    pub uses: Option<RuleUse>,
    pub one_of: Option<Vec<ModuleRule>>,
}

fn present_condition<'de, D>(deserializer: D) -> Result<Option<Condition>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Condition::try_from(value)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

impl ModuleRule {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn test(mut self, condition: impl Into<Condition>) -> Self {
        self.test = Some(condition.into());
        self
    }

    #[must_use]
    pub fn include(mut self, condition: impl Into<Condition>) -> Self {
        self.include = Some(condition.into());
        self
    }

    #[must_use]
    pub fn exclude(mut self, condition: impl Into<Condition>) -> Self {
        self.exclude = Some(condition.into());
        self
    }

    #[must_use]
    pub fn resource(mut self, condition: impl Into<Condition>) -> Self {
        self.resource = Some(condition.into());
        self
    }

    #[must_use]
    pub fn resource_query(mut self, condition: impl Into<Condition>) -> Self {
        self.resource_query = Some(condition.into());
        self
    }

    #[must_use]
    pub fn issuer(mut self, condition: impl Into<Condition>) -> Self {
        self.issuer = Some(condition.into());
        self
    }

    #[must_use]
    pub fn module_type(mut self, module_type: &str) -> Self {
        self.module_type = Some(module_type.to_owned());
        self
    }

    #[must_use]
    pub fn side_effects(mut self, side_effects: bool) -> Self {
        self.side_effects = Some(side_effects);
        self
    }

    #[must_use]
    pub fn uses(mut self, uses: impl Into<RuleUse>) -> Self {
        self.uses = Some(uses.into());
        self
    }

    #[must_use]
    pub fn one_of(mut self, rules: Vec<ModuleRule>) -> Self {
        self.one_of = Some(rules);
        self
    }
}

/// The loader chain of a rule, in application order.
///
/// Accepts a single request string, a single `{loader, options}` object, or
/// an array of either.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "RuleUseRepr")]
pub struct RuleUse(Vec<UseItem>);

/// One element of a [`RuleUse`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum UseItem {
    /// Loader request, possibly chaining several loaders with `!`.
    Request(String),
    Loader {
        loader: String,
        #[serde(default)]
        options: Option<Value>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RuleUseRepr {
    One(UseItem),
    Many(Vec<UseItem>),
}

impl From<RuleUseRepr> for RuleUse {
    fn from(repr: RuleUseRepr) -> Self {
        match repr {
            RuleUseRepr::One(item) => RuleUse(vec![item]),
            RuleUseRepr::Many(items) => RuleUse(items),
        }
    }
}

impl RuleUse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn items(&self) -> &[UseItem] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append a loader request string.
    #[must_use]
    pub fn request(mut self, request: &str) -> Self {
        self.0.push(UseItem::Request(request.to_owned()));
        self
    }

    /// Append a loader with options.
    #[must_use]
    pub fn loader(mut self, loader: &str, options: Option<Value>) -> Self {
        self.0.push(UseItem::Loader {
            loader: loader.to_owned(),
            options,
        });
        self
    }
}

impl From<&str> for RuleUse {
    fn from(request: &str) -> Self {
        RuleUse::new().request(request)
    }
}

impl From<Vec<UseItem>> for RuleUse {
    fn from(items: Vec<UseItem>) -> Self {
        RuleUse(items)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{regexp, text};

    #[test]
    fn builder_sets_fields() {
        let rule = ModuleRule::new()
            .test(regexp(r"\.css$"))
            .exclude("node_modules")
            .module_type("css")
            .uses("css-loader");
        assert_eq!(rule.test, Some(regexp(r"\.css$")));
        assert_eq!(rule.exclude, Some(text("node_modules")));
        assert_eq!(rule.module_type.as_deref(), Some("css"));
        assert_eq!(rule.uses.as_ref().map(RuleUse::len), Some(1));
        assert!(rule.one_of.is_none());
    }

    #[test]
    fn deserialize_rule_with_one_of() {
        let rule: ModuleRule = serde_json::from_value(json!({
            "test": { "$regexp": "/\\.svg$/" },
            "resourceQuery": "raw",
            "type": "asset/source",
            "sideEffects": false,
            "oneOf": [
                { "resourceQuery": "inline", "type": "asset/inline" },
                { "use": ["svgo-loader"] }
            ]
        }))
        .unwrap();
        assert_eq!(rule.test, Some(regexp(r"\.svg$")));
        assert_eq!(rule.resource_query, Some(text("raw")));
        assert_eq!(rule.module_type.as_deref(), Some("asset/source"));
        assert_eq!(rule.side_effects, Some(false));
        let one_of = rule.one_of.unwrap();
        assert_eq!(one_of.len(), 2);
        assert_eq!(one_of[0].module_type.as_deref(), Some("asset/inline"));
        assert_eq!(one_of[1].uses.as_ref().map(RuleUse::len), Some(1));
    }

    #[test]
    fn deserialize_use_shapes() {
        let single: RuleUse = serde_json::from_value(json!("babel-loader")).unwrap();
        assert_eq!(single.items(), [UseItem::Request("babel-loader".into())]);

        let object: RuleUse =
            serde_json::from_value(json!({ "loader": "sass-loader", "options": { "x": 1 } }))
                .unwrap();
        assert_eq!(
            object.items(),
            [UseItem::Loader {
                loader: "sass-loader".into(),
                options: Some(json!({ "x": 1 })),
            }]
        );

        let many: RuleUse =
            serde_json::from_value(json!(["style-loader", { "loader": "css-loader" }])).unwrap();
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn deserialize_rejects_scalar_condition() {
        let result: Result<ModuleRule, _> = serde_json::from_value(json!({ "include": 3 }));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unsupported condition shape"));
    }

    #[test]
    fn deserialize_rejects_null_condition_field() {
        for field in ["test", "include", "exclude", "resource", "resourceQuery", "issuer"] {
            let result: Result<ModuleRule, _> = serde_json::from_value(json!({ field: null }));
            let message = result.unwrap_err().to_string();
            assert!(message.contains("unsupported condition shape"), "{field}: {message}");
        }
    }

    #[test]
    fn absent_condition_fields_read_as_none() {
        let rule: ModuleRule = serde_json::from_value(json!({ "type": "json" })).unwrap();
        assert!(rule.test.is_none());
        assert!(rule.resource_query.is_none());
    }
}
