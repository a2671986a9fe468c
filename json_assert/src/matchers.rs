mod value_matcher;
pub use value_matcher::*;

use serde_json::Value;

use crate::{
    eval::{Eval, NodeKind, Resolution},
    tokenizer::{Token, Tokenizer},
    JsonAssertError, JsonAssertResult,
};

/// Assertions against a single path expression, applied to raw JSON
/// document text. The expression is compiled once and can be asserted
/// against any number of documents.
pub struct JsonPathMatchers {
    expression: String,
    tokens: Vec<Token>,
}

impl JsonPathMatchers {
    /// Compiles `expression`; a malformed expression fails here, before
    /// any document is parsed or compared.
    pub fn new(expression: &str) -> JsonAssertResult<Self> {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize(expression)?;
        Ok(JsonPathMatchers {
            expression: expression.to_string(),
            tokens,
        })
    }

    /// Asserts that the resolved value structurally equals `expected`.
    pub fn value<T: Into<Value>>(&self, body: &str, expected: T) -> JsonAssertResult<()> {
        let actual = self.resolve_found(body)?;
        let expected = expected.into();
        if actual != expected {
            return Err(JsonAssertError::ValueMismatch {
                expression: self.expression.clone(),
                expected,
                actual,
            });
        }
        Ok(())
    }

    /// Asserts that the resolved value satisfies `matcher`.
    pub fn matches<M: ValueMatcher>(&self, body: &str, matcher: M) -> JsonAssertResult<()> {
        let actual = self.resolve_found(body)?;
        if !matcher.matches(&actual) {
            return Err(JsonAssertError::PredicateMismatch {
                expression: self.expression.clone(),
                expectation: matcher.expectation(),
                actual,
            });
        }
        Ok(())
    }

    /// Asserts that the expression resolves to a value.
    pub fn exists(&self, body: &str) -> JsonAssertResult<()> {
        match self.resolve(body)? {
            Resolution::Found(_) => Ok(()),
            Resolution::Missing => Err(JsonAssertError::ExistsViolation(format!(
                "Expected a value at JSON path \"{}\" but found none",
                self.expression
            ))),
        }
    }

    /// Asserts that the expression resolves to nothing.
    pub fn does_not_exist(&self, body: &str) -> JsonAssertResult<()> {
        match self.resolve(body)? {
            Resolution::Found(v) => Err(JsonAssertError::ExistsViolation(format!(
                "Expected no value at JSON path \"{}\" but found <{}>",
                self.expression, v
            ))),
            Resolution::Missing => Ok(()),
        }
    }

    pub fn is_array(&self, body: &str) -> JsonAssertResult<()> {
        self.assert_kind(body, NodeKind::Array)
    }

    pub fn is_boolean(&self, body: &str) -> JsonAssertResult<()> {
        self.assert_kind(body, NodeKind::Boolean)
    }

    pub fn is_number(&self, body: &str) -> JsonAssertResult<()> {
        self.assert_kind(body, NodeKind::Number)
    }

    pub fn is_map(&self, body: &str) -> JsonAssertResult<()> {
        self.assert_kind(body, NodeKind::Map)
    }

    pub fn is_string(&self, body: &str) -> JsonAssertResult<()> {
        self.assert_kind(body, NodeKind::String)
    }

    fn assert_kind(&self, body: &str, expected: NodeKind) -> JsonAssertResult<()> {
        let actual = self.resolve_found(body)?;
        let kind = NodeKind::of(&actual);
        if kind != expected {
            return Err(JsonAssertError::TypeMismatch {
                expression: self.expression.clone(),
                expected,
                actual: kind,
            });
        }
        Ok(())
    }

    fn resolve(&self, body: &str) -> JsonAssertResult<Resolution> {
        let json: Value = serde_json::from_str(body)
            .map_err(|e| JsonAssertError::InvalidDocument(e.to_string()))?;
        let eval = Eval::new();
        eval.eval(&json, &self.tokens)
    }

    fn resolve_found(&self, body: &str) -> JsonAssertResult<Value> {
        match self.resolve(body)? {
            Resolution::Found(v) => Ok(v),
            Resolution::Missing => Err(JsonAssertError::NotFound(self.expression.clone())),
        }
    }
}

#[cfg(test)]
mod test {
    use serde_json::json;

    use crate::eval::NodeKind;
    use crate::{JsonAssertError, JsonAssertResult};

    use super::{equal_to, satisfies, JsonPathMatchers};

    const RESPONSE_CONTENT: &str = r#"{"foo":"bar", "qux":["baz1","baz2"], "icanhaz":true, "howmanies": 5, "cheeseburger": {"pickles": true} }"#;

    #[test]
    fn value_passes_on_an_equal_value() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.foo")?.value(RESPONSE_CONTENT, "bar")
    }

    #[test]
    fn value_fails_on_a_different_value() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .value(RESPONSE_CONTENT, "bogus")
            .unwrap_err();
        assert_eq!(
            JsonAssertError::ValueMismatch {
                expression: "$.foo".to_string(),
                expected: json!("bogus"),
                actual: json!("bar"),
            },
            err
        );
    }

    #[test]
    fn value_fails_when_nothing_is_resolved() {
        let err = JsonPathMatchers::new("$.bogus")
            .unwrap()
            .value(RESPONSE_CONTENT, "bar")
            .unwrap_err();
        assert_eq!(JsonAssertError::NotFound("$.bogus".to_string()), err);
    }

    #[test]
    fn value_does_not_coerce_across_number_types() {
        let err = JsonPathMatchers::new("$.howmanies")
            .unwrap()
            .value(RESPONSE_CONTENT, 5.0)
            .unwrap_err();
        assert!(matches!(err, JsonAssertError::ValueMismatch { .. }));
    }

    #[test]
    fn matches_passes_on_a_satisfied_matcher() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.foo")?.matches(RESPONSE_CONTENT, equal_to("bar"))
    }

    #[test]
    fn matches_fails_on_an_unsatisfied_matcher() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .matches(RESPONSE_CONTENT, equal_to("bogus"))
            .unwrap_err();
        assert_eq!(
            JsonAssertError::PredicateMismatch {
                expression: "$.foo".to_string(),
                expectation: "equal to <\"bogus\">".to_string(),
                actual: json!("bar"),
            },
            err
        );
    }

    #[test]
    fn matches_supports_closure_matchers() -> JsonAssertResult<()> {
        let matchers = JsonPathMatchers::new("$.howmanies")?;
        matchers.matches(
            RESPONSE_CONTENT,
            satisfies("a number greater than 3", |v| {
                v.as_i64().is_some_and(|n| n > 3)
            }),
        )?;
        let err = matchers
            .matches(
                RESPONSE_CONTENT,
                satisfies("a number greater than 7", |v| {
                    v.as_i64().is_some_and(|n| n > 7)
                }),
            )
            .unwrap_err();
        assert!(matches!(err, JsonAssertError::PredicateMismatch { .. }));
        Ok(())
    }

    #[test]
    fn exists_passes_on_a_present_value() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.foo")?.exists(RESPONSE_CONTENT)
    }

    #[test]
    fn exists_fails_on_an_absent_value() {
        let err = JsonPathMatchers::new("$.bogus")
            .unwrap()
            .exists(RESPONSE_CONTENT)
            .unwrap_err();
        assert_eq!(
            JsonAssertError::ExistsViolation(
                "Expected a value at JSON path \"$.bogus\" but found none".to_string()
            ),
            err
        );
    }

    #[test]
    fn does_not_exist_passes_on_an_absent_value() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.bogus")?.does_not_exist(RESPONSE_CONTENT)
    }

    #[test]
    fn does_not_exist_fails_on_a_present_value() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .does_not_exist(RESPONSE_CONTENT)
            .unwrap_err();
        assert_eq!(
            JsonAssertError::ExistsViolation(
                "Expected no value at JSON path \"$.foo\" but found <\"bar\">".to_string()
            ),
            err
        );
    }

    #[test]
    fn a_null_value_exists() -> JsonAssertResult<()> {
        let body = r#"{"maybe": null}"#;
        JsonPathMatchers::new("$.maybe")?.exists(body)?;
        let err = JsonPathMatchers::new("$.maybe")?
            .does_not_exist(body)
            .unwrap_err();
        assert!(matches!(err, JsonAssertError::ExistsViolation(_)));
        JsonPathMatchers::new("$.maybe")?.value(body, json!(null))
    }

    #[test]
    fn is_array_passes_on_an_array() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.qux")?.is_array(RESPONSE_CONTENT)
    }

    #[test]
    fn is_array_fails_when_nothing_is_resolved() {
        let err = JsonPathMatchers::new("$.bar")
            .unwrap()
            .is_array(RESPONSE_CONTENT)
            .unwrap_err();
        assert_eq!(JsonAssertError::NotFound("$.bar".to_string()), err);
    }

    #[test]
    fn is_boolean_passes_on_a_boolean() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.icanhaz")?.is_boolean(RESPONSE_CONTENT)
    }

    #[test]
    fn is_boolean_fails_on_a_string() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .is_boolean(RESPONSE_CONTENT)
            .unwrap_err();
        assert_eq!(
            JsonAssertError::TypeMismatch {
                expression: "$.foo".to_string(),
                expected: NodeKind::Boolean,
                actual: NodeKind::String,
            },
            err
        );
    }

    #[test]
    fn is_number_passes_on_a_number() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.howmanies")?.is_number(RESPONSE_CONTENT)
    }

    #[test]
    fn is_number_fails_on_a_string() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .is_number(RESPONSE_CONTENT)
            .unwrap_err();
        assert!(matches!(err, JsonAssertError::TypeMismatch { .. }));
    }

    #[test]
    fn is_map_passes_on_a_map() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.cheeseburger")?.is_map(RESPONSE_CONTENT)
    }

    #[test]
    fn is_map_fails_on_a_string() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .is_map(RESPONSE_CONTENT)
            .unwrap_err();
        assert!(matches!(err, JsonAssertError::TypeMismatch { .. }));
    }

    #[test]
    fn is_string_passes_on_a_string() -> JsonAssertResult<()> {
        JsonPathMatchers::new("$.foo")?.is_string(RESPONSE_CONTENT)
    }

    #[test]
    fn is_string_fails_on_an_array() {
        let err = JsonPathMatchers::new("$.qux")
            .unwrap()
            .is_string(RESPONSE_CONTENT)
            .unwrap_err();
        assert_eq!(
            JsonAssertError::TypeMismatch {
                expression: "$.qux".to_string(),
                expected: NodeKind::String,
                actual: NodeKind::Array,
            },
            err
        );
    }

    #[test]
    fn nested_paths_resolve_through_maps_and_arrays() -> JsonAssertResult<()> {
        let matchers = JsonPathMatchers::new("$.cheeseburger.pickles")?;
        matchers.value(RESPONSE_CONTENT, true)?;
        JsonPathMatchers::new("$.qux[0]")?.value(RESPONSE_CONTENT, "baz1")?;
        JsonPathMatchers::new("$.qux[-1]")?.value(RESPONSE_CONTENT, "baz2")
    }

    #[test]
    fn a_malformed_expression_fails_at_construction() {
        let err = JsonPathMatchers::new("$..foo").unwrap_err();
        assert!(matches!(err, JsonAssertError::PathSyntax(_, _)));
    }

    #[test]
    fn an_unparseable_document_fails_with_invalid_document() {
        let err = JsonPathMatchers::new("$.foo")
            .unwrap()
            .exists("{not json")
            .unwrap_err();
        assert!(matches!(err, JsonAssertError::InvalidDocument(_)));
    }

    #[test]
    fn assertions_are_repeatable() -> JsonAssertResult<()> {
        let matchers = JsonPathMatchers::new("$.foo")?;
        matchers.value(RESPONSE_CONTENT, "bar")?;
        matchers.value(RESPONSE_CONTENT, "bar")?;
        matchers.is_string(RESPONSE_CONTENT)?;
        matchers.exists(RESPONSE_CONTENT)
    }
}
