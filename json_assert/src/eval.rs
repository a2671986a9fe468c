use std::{fmt::Display, iter::Peekable};

use serde_json::Value;

use crate::{
    tokenizer::{ArrayIndexPathToken, PropertyPathToken, Token},
    JsonAssertError, JsonAssertResult,
};

/// The structural category of a JSON value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Null,
    Boolean,
    Number,
    String,
    Array,
    Map,
}

impl NodeKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => NodeKind::Null,
            Value::Bool(_) => NodeKind::Boolean,
            Value::Number(_) => NodeKind::Number,
            Value::String(_) => NodeKind::String,
            Value::Array(_) => NodeKind::Array,
            Value::Object(_) => NodeKind::Map,
        }
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            NodeKind::Null => "null",
            NodeKind::Boolean => "boolean",
            NodeKind::Number => "number",
            NodeKind::String => "string",
            NodeKind::Array => "array",
            NodeKind::Map => "map",
        })
    }
}

/// Outcome of resolving a path expression against a document: either the
/// addressed value, or an explicit marker that nothing is addressed.
#[derive(Debug, PartialEq)]
pub enum Resolution {
    Found(Value),
    Missing,
}

impl Resolution {
    pub fn is_found(&self) -> bool {
        matches!(self, Resolution::Found(_))
    }
}

pub struct Eval {}

impl Eval {
    pub fn new() -> Self {
        Eval {}
    }

    pub fn eval(&self, json: &Value, tokens: &[Token]) -> JsonAssertResult<Resolution> {
        let mut tokens = tokens.iter().peekable();

        match tokens.next() {
            Some(Token::Root(_root)) => self.visit_root(json, &mut tokens),
            None => Err(JsonAssertError::PathResolution(
                "empty token sequence".to_string(),
            )),
            Some(_) => Err(JsonAssertError::PathResolution(
                "the token sequence must start at the document root".to_string(),
            )),
        }
    }

    fn visit_root<'a>(
        &self,
        json: &Value,
        tokens: &mut Peekable<impl Iterator<Item = &'a Token>>,
    ) -> JsonAssertResult<Resolution> {
        match tokens.peek() {
            None => Ok(Resolution::Found(json.clone())),
            Some(_) => self.visit_next_token(json, tokens),
        }
    }

    fn visit_next_token<'a>(
        &self,
        json: &Value,
        tokens: &mut Peekable<impl Iterator<Item = &'a Token>>,
    ) -> JsonAssertResult<Resolution> {
        match tokens.next() {
            Some(Token::Property(property)) => self.visit_property(property, json, tokens),
            Some(Token::ArrayIndex(index)) => self.visit_array_index(index, json, tokens),
            Some(Token::Root(_)) | None => Err(JsonAssertError::PathResolution(
                "the token sequence must contain property or index steps after the root"
                    .to_string(),
            )),
        }
    }

    fn visit_property<'a>(
        &self,
        token: &PropertyPathToken,
        json: &Value,
        tokens: &mut Peekable<impl Iterator<Item = &'a Token>>,
    ) -> JsonAssertResult<Resolution> {
        let object = json.as_object().ok_or_else(|| {
            JsonAssertError::PathResolution(format!(
                "cannot read property '{}' of a {} value",
                token.name,
                NodeKind::of(json)
            ))
        })?;

        match object.get(&token.name) {
            Some(v) => match tokens.peek() {
                None => Ok(Resolution::Found(v.clone())),
                Some(_t) => self.visit_next_token(v, tokens),
            },
            None => Ok(Resolution::Missing),
        }
    }

    fn visit_array_index<'a>(
        &self,
        token: &ArrayIndexPathToken,
        json: &Value,
        tokens: &mut Peekable<impl Iterator<Item = &'a Token>>,
    ) -> JsonAssertResult<Resolution> {
        let array = json.as_array().ok_or_else(|| {
            JsonAssertError::PathResolution(format!(
                "cannot index into a {} value with [{}]",
                NodeKind::of(json),
                token.index
            ))
        })?;

        // negative indices count from the end
        let index = if token.index < 0 {
            token.index + array.len() as i64
        } else {
            token.index
        };
        if index < 0 || index as usize >= array.len() {
            return Ok(Resolution::Missing);
        }

        let v = &array[index as usize];
        match tokens.peek() {
            None => Ok(Resolution::Found(v.clone())),
            Some(_t) => self.visit_next_token(v, tokens),
        }
    }
}
