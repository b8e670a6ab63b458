use std::ops::Not;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::TranslateError;
use super::pattern::{Pattern, PATTERN_KEY};

/// A user-facing matching condition, narrowed from its JSON shape.
///
/// Conditions nest arbitrarily deep. Encoding into the engine's tagged form
/// happens in [`encode_condition`](crate::encode_condition).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub enum Condition {
    Text(String),
    Pattern(Pattern),
    /// Matches if any element matches.
    List(Vec<Condition>),
    Logical(Box<LogicalCondition>),
}

/// `and` / `or` / `not` combination over conditions. Absent keys stay absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogicalCondition {
    pub and: Option<Vec<Condition>>,
    pub or: Option<Vec<Condition>>,
    pub not: Option<Condition>,
}

impl Condition {
    #[must_use]
    pub fn logical(logical: LogicalCondition) -> Self {
        Condition::Logical(Box::new(logical))
    }
}

impl From<&str> for Condition {
    fn from(v: &str) -> Self {
        Condition::Text(v.to_owned())
    }
}

impl From<String> for Condition {
    fn from(v: String) -> Self {
        Condition::Text(v)
    }
}

impl From<Pattern> for Condition {
    fn from(v: Pattern) -> Self {
        Condition::Pattern(v)
    }
}

impl From<Vec<Condition>> for Condition {
    fn from(v: Vec<Condition>) -> Self {
        Condition::List(v)
    }
}

impl From<LogicalCondition> for Condition {
    fn from(v: LogicalCondition) -> Self {
        Condition::logical(v)
    }
}

impl Not for Condition {
    type Output = Condition;

    fn not(self) -> Condition {
        Condition::logical(LogicalCondition {
            not: Some(self),
            ..LogicalCondition::default()
        })
    }
}

/// Literal text condition.
#[must_use]
pub fn text(value: &str) -> Condition {
    Condition::Text(value.to_owned())
}

/// Pattern condition from pattern source text, without delimiters or flags.
#[must_use]
pub fn regexp(source: &str) -> Condition {
    Condition::Pattern(Pattern::new(source))
}

/// Ordered list condition.
#[must_use]
pub fn list(items: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::List(items.into_iter().collect())
}

/// Logical combination with only an `and` key.
#[must_use]
pub fn all_of(items: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::logical(LogicalCondition {
        and: Some(items.into_iter().collect()),
        ..LogicalCondition::default()
    })
}

/// Logical combination with only an `or` key.
#[must_use]
pub fn any_of(items: impl IntoIterator<Item = Condition>) -> Condition {
    Condition::logical(LogicalCondition {
        or: Some(items.into_iter().collect()),
        ..LogicalCondition::default()
    })
}

// -- Narrowing from JSON ----------------------------------------------------

impl TryFrom<Value> for Condition {
    type Error = TranslateError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Condition::Text(text)),
            Value::Array(items) => items
                .into_iter()
                .map(Condition::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(Condition::List),
            Value::Object(map) => object_condition(map),
            other => Err(TranslateError::unsupported(describe(&other))),
        }
    }
}

fn object_condition(mut map: Map<String, Value>) -> Result<Condition, TranslateError> {
    if let Some(literal) = map.remove(PATTERN_KEY) {
        if let Some(extra) = map.keys().next() {
            return Err(TranslateError::unsupported(format!(
                "pattern object with extra key `{extra}`"
            )));
        }
        let literal = match literal {
            Value::String(literal) => literal,
            other => {
                return Err(TranslateError::unsupported(format!(
                    "pattern marker holding {}",
                    describe(&other)
                )));
            }
        };
        return Pattern::parse(&literal)
            .map(Condition::Pattern)
            .map_err(|e| TranslateError::unsupported(format!("pattern `{literal}` ({e})")));
    }

    let mut logical = LogicalCondition::default();
    for (key, value) in map {
        match key.as_str() {
            "and" => logical.and = Some(condition_list("and", value)?),
            "or" => logical.or = Some(condition_list("or", value)?),
            "not" => logical.not = Some(Condition::try_from(value)?),
            _ => {
                return Err(TranslateError::unsupported(format!(
                    "logical object with unknown key `{key}`"
                )));
            }
        }
    }
    Ok(Condition::logical(logical))
}

fn condition_list(key: &str, value: Value) -> Result<Vec<Condition>, TranslateError> {
    match value {
        Value::Array(items) => items.into_iter().map(Condition::try_from).collect(),
        other => Err(TranslateError::unsupported(format!(
            "`{key}` holding {} instead of an array",
            describe(&other)
        ))),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(v) => format!("boolean `{v}`"),
        Value::Number(v) => format!("number `{v}`"),
        Value::String(v) => format!("string {v:?}"),
        Value::Array(v) => format!("array of {} element(s)", v.len()),
        Value::Object(_) => "object".to_owned(),
    }
}

// -- Back to JSON -----------------------------------------------------------

impl From<Condition> for Value {
    fn from(condition: Condition) -> Self {
        match condition {
            Condition::Text(text) => Value::String(text),
            Condition::Pattern(pattern) => {
                let mut map = Map::new();
                map.insert(PATTERN_KEY.to_owned(), Value::String(pattern.to_string()));
                Value::Object(map)
            }
            Condition::List(items) => list_value(items),
            Condition::Logical(logical) => {
                let LogicalCondition { and, or, not } = *logical;
                let mut map = Map::new();
                if let Some(and) = and {
                    map.insert("and".to_owned(), list_value(and));
                }
                if let Some(or) = or {
                    map.insert("or".to_owned(), list_value(or));
                }
                if let Some(not) = not {
                    map.insert("not".to_owned(), Value::from(not));
                }
                Value::Object(map)
            }
        }
    }
}

fn list_value(items: Vec<Condition>) -> Value {
    Value::Array(items.into_iter().map(Value::from).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_narrows_to_text() {
        let condition = Condition::try_from(json!("src/index.js")).unwrap();
        assert_eq!(condition, text("src/index.js"));
    }

    #[test]
    fn marker_object_narrows_to_pattern() {
        let condition = Condition::try_from(json!({ "$regexp": "/\\.m?js$/i" })).unwrap();
        assert_eq!(
            condition,
            Condition::Pattern(Pattern::new(r"\.m?js$").with_flags("i"))
        );
    }

    #[test]
    fn array_narrows_element_wise() {
        let condition =
            Condition::try_from(json!(["a", { "$regexp": "/b/" }, ["c"]])).unwrap();
        assert_eq!(condition, list([text("a"), regexp("b"), list([text("c")])]));
    }

    #[test]
    fn object_narrows_to_logical() {
        let condition = Condition::try_from(json!({
            "and": ["a", "b"],
            "not": { "or": ["c"] }
        }))
        .unwrap();
        let expected = Condition::logical(LogicalCondition {
            and: Some(vec![text("a"), text("b")]),
            or: None,
            not: Some(any_of([text("c")])),
        });
        assert_eq!(condition, expected);
    }

    #[test]
    fn empty_object_is_empty_logical() {
        let condition = Condition::try_from(json!({})).unwrap();
        assert_eq!(condition, Condition::logical(LogicalCondition::default()));
    }

    #[test]
    fn scalars_are_unsupported() {
        for value in [json!(null), json!(true), json!(7), json!(1.5)] {
            let err = Condition::try_from(value).unwrap_err();
            assert!(matches!(err, TranslateError::UnsupportedCondition { .. }));
        }
    }

    #[test]
    fn nested_scalar_is_unsupported() {
        let err = Condition::try_from(json!({ "or": ["a", [false]] })).unwrap_err();
        match err {
            TranslateError::UnsupportedCondition { found } => {
                assert_eq!(found, "boolean `false`");
            }
            other => panic!("expected UnsupportedCondition, got {other:?}"),
        }
    }

    #[test]
    fn unknown_logical_key_is_unsupported() {
        let err = Condition::try_from(json!({ "xor": ["a"] })).unwrap_err();
        assert!(err.to_string().contains("unknown key `xor`"));
    }

    #[test]
    fn non_array_and_is_unsupported() {
        let err = Condition::try_from(json!({ "and": "a" })).unwrap_err();
        assert!(err.to_string().contains("`and` holding string \"a\""));
    }

    #[test]
    fn malformed_pattern_is_unsupported() {
        let err = Condition::try_from(json!({ "$regexp": "/a/q" })).unwrap_err();
        assert!(matches!(err, TranslateError::UnsupportedCondition { .. }));

        let err = Condition::try_from(json!({ "$regexp": "/a/", "and": [] })).unwrap_err();
        assert!(err.to_string().contains("extra key `and`"));
    }

    #[test]
    fn not_operator_builds_logical_not() {
        let condition = !text("node_modules");
        assert_eq!(
            condition,
            Condition::logical(LogicalCondition {
                not: Some(text("node_modules")),
                ..LogicalCondition::default()
            })
        );
    }

    #[test]
    fn deserialize_through_serde() {
        let condition: Condition = serde_json::from_str(r#"["a", {"not": "b"}]"#).unwrap();
        assert_eq!(condition, list([text("a"), !text("b")]));

        let result: Result<Condition, _> = serde_json::from_str("42");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unsupported condition shape: number `42`"));
    }

    #[test]
    fn serialize_back_to_json_shape() {
        let condition = all_of([regexp(r"\.js$"), !text("vendor")]);
        assert_eq!(
            serde_json::to_value(condition).unwrap(),
            json!({ "and": [{ "$regexp": "/\\.js$/" }, { "not": "vendor" }] })
        );
    }
}
