use crate::{JsonAssertError, JsonAssertResult};

use super::{
    constants::{DOUBLE_QUOTE, ESCAPE, MINUS, SINGLE_QUOTE},
    TokenStream,
};

pub trait PeekableExt {
    fn drop_while<P>(&mut self, predicate: P)
    where
        P: FnMut(&char) -> bool;

    fn next_significant(&mut self) -> Option<char>;

    fn peek_significant(&mut self) -> Option<&char>;

    /**
     * read a quoted string, e.g. 'pickles' or "pickles"; a backslash
     * escapes the character after it.
     */
    fn read_quoted_string(&mut self) -> JsonAssertResult<String>;

    fn read_index(&mut self) -> JsonAssertResult<i64>;
}

impl<'a> PeekableExt for TokenStream<'a> {
    fn drop_while<P>(&mut self, mut predicate: P)
    where
        P: FnMut(&char) -> bool,
    {
        while let Some(c) = self.peek() {
            if predicate(c) {
                self.next();
            } else {
                break;
            }
        }
    }

    fn next_significant(&mut self) -> Option<char> {
        self.drop_while(|c| c.is_whitespace());
        self.next()
    }

    fn peek_significant(&mut self) -> Option<&char> {
        self.drop_while(|c| c.is_whitespace());
        self.peek()
    }

    fn read_quoted_string(&mut self) -> JsonAssertResult<String> {
        let quote = match self.next_significant() {
            Some(c) if c == SINGLE_QUOTE || c == DOUBLE_QUOTE => c,
            _x => {
                return Err(JsonAssertError::PathSyntax(
                    "expected a quoted string".to_string(),
                    self.pos(),
                ));
            }
        };

        let mut s = String::new();
        let mut in_escape = false;
        let mut closed = false;
        for c in self.by_ref() {
            if in_escape {
                s.push(c);
                in_escape = false;
            } else if c == ESCAPE {
                in_escape = true;
            } else if c == quote {
                closed = true;
                break;
            } else {
                s.push(c);
            }
        }
        if !closed {
            return Err(JsonAssertError::PathSyntax(
                "unterminated quoted string".to_string(),
                self.pos(),
            ));
        }

        Ok(s)
    }

    fn read_index(&mut self) -> JsonAssertResult<i64> {
        let mut w = String::new();
        while let Some(c) = self.peek() {
            if !c.is_ascii_digit() && *c != MINUS {
                break;
            }
            w.push(*c);
            self.next();
        }
        if w.is_empty() {
            return Err(JsonAssertError::PathSyntax(
                "expected an array index".to_string(),
                self.pos(),
            ));
        }
        w.parse::<i64>().map_err(|_e| {
            JsonAssertError::PathSyntax(format!("'{}' is not a valid array index", w), self.pos())
        })
    }
}
