use crate::{Condition, EncodedCondition, EncodedLogical, LogicalCondition};

/// Encode a condition into the engine's tagged form.
///
/// Lists encode element-wise and keep their order. A logical object is
/// wrapped in a one-element `logicalMatcher` list. Pattern flags are not
/// carried over; only the source text reaches the engine.
#[must_use]
pub fn encode_condition(condition: &Condition) -> EncodedCondition {
    match condition {
        Condition::Text(text) => EncodedCondition::String {
            string_matcher: text.clone(),
        },
        Condition::Pattern(pattern) => EncodedCondition::Regexp {
            regexp_matcher: pattern.source().to_owned(),
        },
        Condition::List(items) => EncodedCondition::Array {
            array_matcher: encode_all(items),
        },
        Condition::Logical(logical) => EncodedCondition::Logical {
            logical_matcher: vec![encode_logical(logical)],
        },
    }
}

/// Encode an `and` / `or` / `not` combination. Absent keys stay absent.
#[must_use]
pub fn encode_logical(logical: &LogicalCondition) -> EncodedLogical {
    EncodedLogical {
        and: logical.and.as_deref().map(encode_all),
        or: logical.or.as_deref().map(encode_all),
        not: logical
            .not
            .as_ref()
            .map(|not| Box::new(encode_condition(not))),
    }
}

fn encode_all(items: &[Condition]) -> Vec<EncodedCondition> {
    items.iter().map(encode_condition).collect()
}
