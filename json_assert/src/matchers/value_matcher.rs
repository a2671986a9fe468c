use serde_json::Value;

/// Externally supplied comparison strategy for [`matches`].
///
/// [`matches`]: super::JsonPathMatchers::matches
pub trait ValueMatcher {
    fn matches(&self, value: &Value) -> bool;

    /**
     * a short description of the expectation, rendered into the failure
     * diagnostic, e.g. `equal to <"bar">`.
     */
    fn expectation(&self) -> String;
}

pub struct EqualTo {
    expected: Value,
}

/// Matches values structurally equal to `expected`.
pub fn equal_to<T: Into<Value>>(expected: T) -> EqualTo {
    EqualTo {
        expected: expected.into(),
    }
}

impl ValueMatcher for EqualTo {
    fn matches(&self, value: &Value) -> bool {
        *value == self.expected
    }

    fn expectation(&self) -> String {
        format!("equal to <{}>", self.expected)
    }
}

pub struct Satisfies<F> {
    description: String,
    predicate: F,
}

/// Matches values for which `predicate` returns true.
pub fn satisfies<F>(description: &str, predicate: F) -> Satisfies<F>
where
    F: Fn(&Value) -> bool,
{
    Satisfies {
        description: description.to_string(),
        predicate,
    }
}

impl<F> ValueMatcher for Satisfies<F>
where
    F: Fn(&Value) -> bool,
{
    fn matches(&self, value: &Value) -> bool {
        (self.predicate)(value)
    }

    fn expectation(&self) -> String {
        self.description.clone()
    }
}
