//! Lexical analysis: splits a YPath expression into a stream of tokens.

use super::error::{PathError, Span};
use super::reader::Reader;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    StreamStart,
    StreamEnd,

    // Operators
    Slash,
    Sibling,
    Comma,
    ScalarFilter,
    CollectionFilter,
    SeqFilter,
    MapFilter,

    // Operands
    Root,
    This,
    Parent,
    EveryChild,
    EveryChildRecursive,
    Alias(String),
    SimpleMapKey(String),
    MapKey(Value),
    SeqIndex(i64),
    SeqSlice(u64, Option<u64>),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

pub(crate) struct Tokenizer<'a> {
    reader: Reader<'a>,
    started: bool,
    ended: bool,
}

impl<'a> Tokenizer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Tokenizer {
            reader: Reader::new(src),
            started: false,
            ended: false,
        }
    }

    fn lex_one(&mut self) -> Result<Option<Token>, PathError> {
        let Some(c) = self.reader.peek() else {
            return Ok(None);
        };

        let token = match c {
            '/' => Token {
                kind: TokenKind::Slash,
                span: self.reader.take_span(1),
            },
            '^' => Token {
                kind: TokenKind::Root,
                span: self.reader.take_span(1),
            },
            ':' => Token {
                kind: TokenKind::Sibling,
                span: self.reader.take_span(1),
            },
            '$' => Token {
                kind: TokenKind::ScalarFilter,
                span: self.reader.take_span(1),
            },
            '%' => Token {
                kind: TokenKind::CollectionFilter,
                span: self.reader.take_span(1),
            },
            ',' => Token {
                kind: TokenKind::Comma,
                span: self.reader.take_span(1),
            },
            '[' if self.reader.matches("[]") => Token {
                kind: TokenKind::SeqFilter,
                span: self.reader.take_span(2),
            },
            '{' if self.reader.matches("{}") => Token {
                kind: TokenKind::MapFilter,
                span: self.reader.take_span(2),
            },
            '"' | '\'' | '[' | '{' => self.lex_flow_map_key()?,
            '.' if self.reader.matches("..") => Token {
                kind: TokenKind::Parent,
                span: self.reader.take_span(2),
            },
            '.' => Token {
                kind: TokenKind::This,
                span: self.reader.take_span(1),
            },
            '*' if self.reader.matches("**") => Token {
                kind: TokenKind::EveryChildRecursive,
                span: self.reader.take_span(2),
            },
            '*' if self
                .reader
                .peek_at(1)
                .is_some_and(|c| c.is_ascii_alphabetic()) =>
            {
                self.lex_alias()?
            }
            '*' => Token {
                kind: TokenKind::EveryChild,
                span: self.reader.take_span(1),
            },
            c if c.is_ascii_alphabetic() => self.lex_simple_map_key(),
            c if c.is_ascii_digit() || c == '-' => self.lex_number()?,
            other => {
                let span = self.reader.take_span(1);
                return Err(PathError::lex(
                    span,
                    format!("unexpected character '{}'", other),
                ));
            }
        };
        Ok(Some(token))
    }

    fn lex_simple_map_key(&mut self) -> Token {
        let start = self.reader.pos();
        self.reader.advance_by(1);
        while self.reader.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.reader.advance_by(1);
        }
        let text = self.reader.source()[start..self.reader.pos()].to_string();
        Token {
            kind: TokenKind::SimpleMapKey(text),
            span: Span::new(start, self.reader.pos()),
        }
    }

    fn lex_alias(&mut self) -> Result<Token, PathError> {
        let start = self.reader.pos();
        self.reader.advance_by(1); // '*'
        let name_start = self.reader.pos();
        while self.reader.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.reader.advance_by(1);
        }
        if self.reader.pos() == name_start {
            let span = Span::new(start, self.reader.pos());
            return Err(PathError::lex(span, "alias name cannot be empty"));
        }
        let name = self.reader.source()[name_start..self.reader.pos()].to_string();
        Ok(Token {
            kind: TokenKind::Alias(name),
            span: Span::new(start, self.reader.pos()),
        })
    }

    fn lex_number(&mut self) -> Result<Token, PathError> {
        let start = self.reader.pos();
        let negative = self.reader.peek() == Some('-');
        if negative {
            self.reader.advance_by(1);
        }
        let digits_start = self.reader.pos();
        while self.reader.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.reader.advance_by(1);
        }
        if self.reader.pos() == digits_start {
            let span = Span::new(start, self.reader.pos());
            return Err(PathError::lex(span, "malformed numeric literal"));
        }
        let digits = &self.reader.source()[digits_start..self.reader.pos()];

        // A slice start must be non-negative.
        if !negative && self.reader.peek() == Some(':') {
            let start_val: u64 = digits.parse().map_err(|_| {
                PathError::lex(Span::new(start, self.reader.pos()), "numeric overflow")
            })?;
            self.reader.advance_by(1); // ':'
            let end_digits_start = self.reader.pos();
            while self.reader.peek().is_some_and(|c| c.is_ascii_digit()) {
                self.reader.advance_by(1);
            }
            let end = if self.reader.pos() == end_digits_start {
                None
            } else {
                let end_digits = &self.reader.source()[end_digits_start..self.reader.pos()];
                let end_val: u64 = end_digits.parse().map_err(|_| {
                    PathError::lex(Span::new(start, self.reader.pos()), "numeric overflow")
                })?;
                Some(end_val)
            };
            if let Some(end_val) = end {
                if start_val >= end_val {
                    let span = Span::new(start, self.reader.pos());
                    return Err(PathError::lex(
                        span,
                        "slice start must be less than its end",
                    ));
                }
            }
            return Ok(Token {
                kind: TokenKind::SeqSlice(start_val, end),
                span: Span::new(start, self.reader.pos()),
            });
        }

        let text = if negative {
            format!("-{}", digits)
        } else {
            digits.to_string()
        };
        let value: i64 = text
            .parse()
            .map_err(|_| PathError::lex(Span::new(start, self.reader.pos()), "numeric overflow"))?;
        Ok(Token {
            kind: TokenKind::SeqIndex(value),
            span: Span::new(start, self.reader.pos()),
        })
    }

    fn lex_flow_map_key(&mut self) -> Result<Token, PathError> {
        let start = self.reader.pos();
        let span = self.scan_flow_literal()?;
        let text = &self.reader.source()[start..span.end];
        let value = build_flow_value(text, span)?;
        Ok(Token {
            kind: TokenKind::MapKey(value),
            span,
        })
    }

    fn scan_flow_literal(&mut self) -> Result<Span, PathError> {
        let start = self.reader.pos();
        match self.reader.peek() {
            Some(q @ ('"' | '\'')) => self.scan_quoted(q, start),
            Some('{') | Some('[') => self.scan_bracketed(start),
            _ => unreachable!("scan_flow_literal called on non-literal start"),
        }
    }

    fn scan_quoted(&mut self, quote: char, start: usize) -> Result<Span, PathError> {
        self.reader.advance_by(1); // opening quote
        loop {
            match self.reader.peek() {
                None => {
                    return Err(PathError::lex(
                        Span::new(start, self.reader.pos()),
                        "unterminated quoted map key",
                    ));
                }
                Some(c) if c == quote => {
                    self.reader.advance_by(1);
                    if quote == '\'' && self.reader.peek() == Some('\'') {
                        self.reader.advance_by(1); // doubled '' is an escaped quote
                        continue;
                    }
                    return Ok(Span::new(start, self.reader.pos()));
                }
                Some('\\') if quote == '"' => {
                    self.reader.advance_by(1);
                    if self.reader.peek().is_some() {
                        self.reader.advance_by(1);
                    }
                }
                Some(_) => self.reader.advance_by(1),
            }
        }
    }

    fn scan_bracketed(&mut self, start: usize) -> Result<Span, PathError> {
        let mut stack = Vec::new();
        let open = self.reader.peek().expect("caller checked peek");
        stack.push(if open == '{' { '}' } else { ']' });
        self.reader.advance_by(1);
        loop {
            match self.reader.peek() {
                None => {
                    return Err(PathError::lex(
                        Span::new(start, self.reader.pos()),
                        "unterminated flow map key",
                    ));
                }
                Some(q @ ('"' | '\'')) => {
                    self.scan_quoted(q, self.reader.pos())?;
                }
                Some(c @ ('{' | '[')) => {
                    stack.push(if c == '{' { '}' } else { ']' });
                    self.reader.advance_by(1);
                }
                Some(c @ ('}' | ']')) => {
                    self.reader.advance_by(1);
                    if stack.pop() != Some(c) {
                        return Err(PathError::lex(
                            Span::new(start, self.reader.pos()),
                            "mismatched bracket in flow map key",
                        ));
                    }
                    if stack.is_empty() {
                        return Ok(Span::new(start, self.reader.pos()));
                    }
                }
                Some(_) => self.reader.advance_by(1),
            }
        }
    }
}

fn build_flow_value(text: &str, span: Span) -> Result<Value, PathError> {
    let doc = crate::Document::parse_str(text)
        .map_err(|e| PathError::document(span, format!("invalid map key literal: {}", e)))?;
    let root = doc
        .root()
        .ok_or_else(|| PathError::document(span, "empty map key literal"))?;
    Value::from_node_ref(root)
        .map_err(|e| PathError::document(span, format!("invalid map key literal: {}", e)))
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, PathError>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.started {
            self.started = true;
            return Some(Ok(Token {
                kind: TokenKind::StreamStart,
                span: Span::new(0, 0),
            }));
        }
        if self.ended {
            return None;
        }
        match self.lex_one() {
            Ok(Some(tok)) => Some(Ok(tok)),
            Ok(None) => {
                self.ended = true;
                let pos = self.reader.pos();
                Some(Ok(Token {
                    kind: TokenKind::StreamEnd,
                    span: Span::new(pos, pos),
                }))
            }
            Err(e) => {
                self.ended = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Tokenizer::new(src)
            .map(|t| t.unwrap().kind)
            .collect::<Vec<_>>()
    }

    #[test]
    fn brackets_and_slashes() {
        let ks = kinds("/a/b");
        assert_eq!(
            ks,
            vec![
                TokenKind::StreamStart,
                TokenKind::Slash,
                TokenKind::SimpleMapKey("a".into()),
                TokenKind::Slash,
                TokenKind::SimpleMapKey("b".into()),
                TokenKind::StreamEnd,
            ]
        );
    }

    #[test]
    fn every_child_vs_recursive_vs_alias() {
        assert_eq!(
            kinds("*"),
            vec![TokenKind::StreamStart, TokenKind::EveryChild, TokenKind::StreamEnd]
        );
        assert_eq!(
            kinds("**"),
            vec![
                TokenKind::StreamStart,
                TokenKind::EveryChildRecursive,
                TokenKind::StreamEnd
            ]
        );
        assert_eq!(
            kinds("*anc"),
            vec![
                TokenKind::StreamStart,
                TokenKind::Alias("anc".into()),
                TokenKind::StreamEnd
            ]
        );
    }

    #[test]
    fn seq_index_negative() {
        assert_eq!(
            kinds("-1"),
            vec![
                TokenKind::StreamStart,
                TokenKind::SeqIndex(-1),
                TokenKind::StreamEnd
            ]
        );
    }

    #[test]
    fn seq_slice_open_and_closed() {
        assert_eq!(
            kinds("1:3"),
            vec![
                TokenKind::StreamStart,
                TokenKind::SeqSlice(1, Some(3)),
                TokenKind::StreamEnd
            ]
        );
        assert_eq!(
            kinds("2:"),
            vec![
                TokenKind::StreamStart,
                TokenKind::SeqSlice(2, None),
                TokenKind::StreamEnd
            ]
        );
    }

    #[test]
    fn malformed_slice_is_a_lex_error() {
        let mut t = Tokenizer::new("3:1");
        assert!(t.next().unwrap().is_ok()); // StreamStart
        let err = t.next().unwrap();
        assert!(matches!(err, Err(PathError::Lex { .. })));
    }

    #[test]
    fn numeric_overflow_is_a_lex_error() {
        let mut t = Tokenizer::new("99999999999999999999");
        assert!(t.next().unwrap().is_ok()); // StreamStart
        let err = t.next().unwrap();
        assert!(matches!(err, Err(PathError::Lex { .. })));
    }

    #[test]
    fn quoted_map_key_builds_a_value() {
        let mut t = Tokenizer::new("\"a b\"");
        t.next(); // StreamStart
        let tok = t.next().unwrap().unwrap();
        match tok.kind {
            TokenKind::MapKey(Value::String(s)) => assert_eq!(s, "a b"),
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn flow_sequence_map_key_builds_a_value() {
        let mut t = Tokenizer::new("[1, 2]");
        t.next(); // StreamStart
        let tok = t.next().unwrap().unwrap();
        match tok.kind {
            TokenKind::MapKey(Value::Sequence(items)) => assert_eq!(items.len(), 2),
            other => panic!("unexpected token {:?}", other),
        }
    }

    #[test]
    fn unterminated_quote_is_a_lex_error() {
        let mut t = Tokenizer::new("\"abc");
        t.next();
        let err = t.next().unwrap();
        assert!(matches!(err, Err(PathError::Lex { .. })));
    }

    #[test]
    fn illegal_character_is_a_lex_error() {
        let mut t = Tokenizer::new("#");
        t.next();
        let err = t.next().unwrap();
        assert!(matches!(err, Err(PathError::Lex { .. })));
    }
}
