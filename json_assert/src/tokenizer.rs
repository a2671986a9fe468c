mod constants;
mod stream;
mod tokens;

use std::str::Chars;

use constants::*;
use peekmore::{PeekMore, PeekMoreIterator};
use stream::PeekableExt;
pub use tokens::*;

use crate::{JsonAssertError, JsonAssertResult};

/// Character stream over a path expression, tracking how many characters
/// have been consumed so syntax errors can carry a position.
pub struct TokenStream<'a> {
    chars: PeekMoreIterator<Chars<'a>>,
    pos: usize,
}

impl<'a> TokenStream<'a> {
    pub fn new(expression: &'a str) -> Self {
        TokenStream {
            chars: expression.chars().peekmore(),
            pos: 0,
        }
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }
}

impl<'a> Iterator for TokenStream<'a> {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }
}

pub struct Tokenizer {}

impl Tokenizer {
    pub fn new() -> Self {
        Tokenizer {}
    }

    pub fn tokenize(&self, expression: &str) -> JsonAssertResult<Vec<Token>> {
        let mut stream = TokenStream::new(expression);

        let root_path_char = stream
            .next_significant()
            .filter(|c| self.is_root_path_char(c))
            .ok_or(JsonAssertError::PathSyntax(
                "the expression must start with '$'".to_string(),
                0,
            ))?;

        let mut tokens = vec![Token::Root(RootPathToken { root_path_char })];
        loop {
            match stream.peek_significant() {
                None => break,
                Some(&PERIOD) => self.read_dot_property(&mut stream, &mut tokens)?,
                Some(&OPEN_SQUARE_BRACKET) => self.read_bracket(&mut stream, &mut tokens)?,
                Some(&c) => {
                    return Err(JsonAssertError::PathSyntax(
                        format!("illegal character '{}', expected '.' or '['", c),
                        stream.pos(),
                    ));
                }
            }
        }

        Ok(tokens)
    }

    fn read_dot_property(
        &self,
        stream: &mut TokenStream,
        tokens: &mut Vec<Token>,
    ) -> JsonAssertResult<()> {
        stream.next();
        match stream.peek() {
            Some(&PERIOD) => {
                return Err(JsonAssertError::PathSyntax(
                    "the scan operator '..' is not supported".to_string(),
                    stream.pos(),
                ));
            }
            Some(&WILDCARD) => {
                return Err(JsonAssertError::PathSyntax(
                    "the wildcard '*' is not supported".to_string(),
                    stream.pos(),
                ));
            }
            Some(&OPEN_SQUARE_BRACKET) => {
                // `$.['foo']` is accepted as an alias of `$['foo']`
                return self.read_bracket(stream, tokens);
            }
            None => {
                return Err(JsonAssertError::PathSyntax(
                    "the expression must not end with a '.'".to_string(),
                    stream.pos(),
                ));
            }
            _ => {}
        }

        let name = self.read_property_name(stream)?;
        tokens.push(Token::Property(PropertyPathToken { name }));
        Ok(())
    }

    fn read_property_name(&self, stream: &mut TokenStream) -> JsonAssertResult<String> {
        let mut name = String::new();
        while let Some(&c) = stream.peek() {
            if c == PERIOD || c == OPEN_SQUARE_BRACKET || c.is_whitespace() {
                break;
            }
            if c == CLOSE_SQUARE_BRACKET {
                return Err(JsonAssertError::PathSyntax(
                    "unexpected ']'".to_string(),
                    stream.pos(),
                ));
            }
            name.push(c);
            stream.next();
        }
        if name.is_empty() {
            return Err(JsonAssertError::PathSyntax(
                "expected a property name".to_string(),
                stream.pos(),
            ));
        }
        Ok(name)
    }

    fn read_bracket(
        &self,
        stream: &mut TokenStream,
        tokens: &mut Vec<Token>,
    ) -> JsonAssertResult<()> {
        stream.next();
        let token = match stream.peek_significant() {
            Some(&SINGLE_QUOTE) | Some(&DOUBLE_QUOTE) => {
                let name = stream.read_quoted_string()?;
                Token::Property(PropertyPathToken { name })
            }
            Some(&WILDCARD) => {
                return Err(JsonAssertError::PathSyntax(
                    "the wildcard '*' is not supported".to_string(),
                    stream.pos(),
                ));
            }
            Some(&BEGIN_FILTER) => {
                return Err(JsonAssertError::PathSyntax(
                    "filter expressions are not supported".to_string(),
                    stream.pos(),
                ));
            }
            Some(c) if c.is_ascii_digit() || *c == MINUS => {
                let index = stream.read_index()?;
                Token::ArrayIndex(ArrayIndexPathToken { index })
            }
            Some(&c) => {
                return Err(JsonAssertError::PathSyntax(
                    format!("unexpected character '{}' after '['", c),
                    stream.pos(),
                ));
            }
            None => {
                return Err(JsonAssertError::PathSyntax(
                    "unterminated '['".to_string(),
                    stream.pos(),
                ));
            }
        };

        match stream.next_significant() {
            Some(CLOSE_SQUARE_BRACKET) => {}
            Some(COMMA) => {
                return Err(JsonAssertError::PathSyntax(
                    "union selectors are not supported".to_string(),
                    stream.pos(),
                ));
            }
            Some(SPLIT) => {
                return Err(JsonAssertError::PathSyntax(
                    "slice selectors are not supported".to_string(),
                    stream.pos(),
                ));
            }
            Some(c) => {
                return Err(JsonAssertError::PathSyntax(
                    format!("unexpected character '{}', expected ']'", c),
                    stream.pos(),
                ));
            }
            None => {
                return Err(JsonAssertError::PathSyntax(
                    "unterminated '['".to_string(),
                    stream.pos(),
                ));
            }
        }

        tokens.push(token);
        Ok(())
    }

    fn is_root_path_char(&self, c: &char) -> bool {
        *c == DOC_CONTEXT
    }
}
