mod errors;
pub mod eval;
pub mod matchers;
pub mod tokenizer;
pub use errors::*;
use eval::{Eval, Resolution};
use serde_json::Value;
use tokenizer::Tokenizer;

pub trait JsonPathQuery {
    fn query(&self, json_path: &str) -> JsonAssertResult<Resolution>;
}

impl JsonPathQuery for Value {
    fn query(&self, json_path: &str) -> JsonAssertResult<Resolution> {
        let tz = Tokenizer::new();
        let tokens = tz.tokenize(json_path)?;
        let eval = Eval::new();
        eval.eval(self, &tokens)
    }
}
