use std::fmt;

use crate::ast::{Token, TokenKind};

/// Errors that abort lexing.
///
/// The lexer never emits a malformed token stream; the first unrecognized
/// character fails the whole scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// A character no lexer state recognizes, at the given byte offset.
    IllegalChar { ch: char, pos: usize },

    /// A string literal whose closing quote never arrives.
    UnterminatedString { pos: usize },
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::IllegalChar { ch, pos } => {
                write!(f, "unrecognized character '{}' at position {}", ch, pos)
            }
            LexError::UnterminatedString { pos } => {
                write!(f, "unterminated string starting at position {}", pos)
            }
        }
    }
}

impl std::error::Error for LexError {}

/// Character-at-a-time scanner producing [`Token`]s.
///
/// Each invocation owns its own lexer; no scanning state is shared across
/// queries. Token positions are byte offsets into the source.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(ch) = self.peek() {
            self.pos += ch.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Emit a token whose text runs from `start` to the current position.
    fn emit(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, &self.input[start..self.pos], start)
    }

    /// A run of digits; any `.` inside the run marks the literal as a
    /// float. Runs like `1.2.3` lex as one float token and are rejected
    /// by the parser.
    fn read_number(&mut self) -> Token {
        let start = self.pos;
        let mut is_float = false;

        while let Some(ch) = self.peek() {
            if ch == '.' {
                is_float = true;
            } else if !ch.is_ascii_digit() {
                break;
            }
            self.advance();
        }

        let kind = if is_float {
            TokenKind::Float
        } else {
            TokenKind::Int
        };
        self.emit(kind, start)
    }

    /// Any run of letters, digits, `_` or `$`. `$` is a legal identifier
    /// character so the root binding name lexes as a plain identifier.
    fn read_identifier(&mut self) -> Token {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.advance();
        }
        self.emit(TokenKind::Ident, start)
    }

    /// Single-quote delimited, no escape processing; content runs
    /// verbatim to the next single quote. The token text excludes the
    /// quotes and its position points at the first content byte.
    fn read_string(&mut self) -> Result<Token, LexError> {
        self.advance(); // opening quote
        let start = self.pos;

        loop {
            match self.peek() {
                Some('\'') => {
                    let tok = self.emit(TokenKind::Str, start);
                    self.advance(); // closing quote
                    return Ok(tok);
                }
                Some(_) => self.advance(),
                None => return Err(LexError::UnterminatedString { pos: start }),
            }
        }
    }

    /// Single-character token.
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        self.emit(kind, start)
    }

    /// `ch` followed by `=` emits `long`, otherwise `short`
    /// (longest-match for `>= <= !=` against `> < !`).
    fn one_or_two(&mut self, long: TokenKind, short: TokenKind) -> Token {
        let start = self.pos;
        self.advance();
        if self.peek() == Some('=') {
            self.advance();
            self.emit(long, start)
        } else {
            self.emit(short, start)
        }
    }

    /// Scans and returns the next token.
    ///
    /// After the end of input is reached, every further call returns the
    /// `Eof` marker again.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let Some(ch) = self.peek() else {
            return Ok(Token::eof(self.pos));
        };

        let tok = match ch {
            '0'..='9' => self.read_number(),
            '\'' => self.read_string()?,
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            '[' => self.single(TokenKind::LBrack),
            ']' => self.single(TokenKind::RBrack),
            '.' => self.single(TokenKind::Dot),
            ',' => self.single(TokenKind::Comma),
            '+' => self.single(TokenKind::Add),
            '-' => self.single(TokenKind::Sub),
            '*' => self.single(TokenKind::Mul),
            '/' => self.single(TokenKind::Quo),
            '%' => self.single(TokenKind::Rem),
            '>' => self.one_or_two(TokenKind::Gte, TokenKind::Gt),
            '<' => self.one_or_two(TokenKind::Lte, TokenKind::Lt),
            '!' => self.one_or_two(TokenKind::NotEqual, TokenKind::Not),
            '=' => {
                // bare '=' is not an operator in this language
                let start = self.pos;
                self.advance();
                if self.peek() == Some('=') {
                    self.advance();
                    self.emit(TokenKind::Equal, start)
                } else {
                    return Err(LexError::IllegalChar { ch: '=', pos: start });
                }
            }
            c if is_ident_char(c) => self.read_identifier(),
            c => return Err(LexError::IllegalChar { ch: c, pos: self.pos }),
        };

        Ok(tok)
    }
}

fn is_ident_char(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric()
}

/// Lex the whole input into a token sequence.
///
/// The returned sequence is in strictly increasing position order and
/// always ends with exactly one `Eof` marker.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();

    loop {
        let tok = lexer.next_token()?;
        let done = tok.kind == TokenKind::Eof;
        tokens.push(tok);
        if done {
            return Ok(tokens);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        lex(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn ends_with_single_eof() {
        assert_eq!(kinds(""), vec![TokenKind::Eof]);
        assert_eq!(kinds("   "), vec![TokenKind::Eof]);
        assert_eq!(kinds("1"), vec![TokenKind::Int, TokenKind::Eof]);
    }

    #[test]
    fn numbers() {
        let toks = lex("42 4.2 1.").unwrap();
        assert_eq!(toks[0], Token::new(TokenKind::Int, "42", 0));
        assert_eq!(toks[1], Token::new(TokenKind::Float, "4.2", 3));
        assert_eq!(toks[2], Token::new(TokenKind::Float, "1.", 7));
    }

    #[test]
    fn identifiers_including_root() {
        let toks = lex("$ foo $bar _x2").unwrap();
        assert_eq!(toks[0], Token::new(TokenKind::Ident, "$", 0));
        assert_eq!(toks[1], Token::new(TokenKind::Ident, "foo", 2));
        assert_eq!(toks[2], Token::new(TokenKind::Ident, "$bar", 6));
        assert_eq!(toks[3], Token::new(TokenKind::Ident, "_x2", 11));
    }

    #[test]
    fn strings_are_verbatim_without_quotes() {
        let toks = lex("'foo bar'").unwrap();
        assert_eq!(toks[0], Token::new(TokenKind::Str, "foo bar", 1));

        // no escape processing: backslash is content
        let toks = lex(r"'a\n'").unwrap();
        assert_eq!(toks[0].text, r"a\n");
    }

    #[test]
    fn unterminated_string_fails() {
        assert_eq!(
            lex("'abc"),
            Err(LexError::UnterminatedString { pos: 1 })
        );
    }

    #[test]
    fn longest_match_operators() {
        assert_eq!(
            kinds(">= <= != == > < !"),
            vec![
                TokenKind::Gte,
                TokenKind::Lte,
                TokenKind::NotEqual,
                TokenKind::Equal,
                TokenKind::Gt,
                TokenKind::Lt,
                TokenKind::Not,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn bare_equal_is_illegal() {
        assert_eq!(lex("a = b"), Err(LexError::IllegalChar { ch: '=', pos: 2 }));
    }

    #[test]
    fn illegal_character_aborts() {
        assert_eq!(lex("1 # 2"), Err(LexError::IllegalChar { ch: '#', pos: 2 }));
    }

    #[test]
    fn positions_strictly_increase() {
        let toks = lex("$.foo[0] + 'x'").unwrap();
        for pair in toks.windows(2) {
            assert!(pair[0].pos < pair[1].pos || pair[1].kind == TokenKind::Eof);
        }
    }

    #[test]
    fn chained_query_tokens() {
        assert_eq!(
            kinds("$.foo[0].bar()"),
            vec![
                TokenKind::Ident,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::LBrack,
                TokenKind::Int,
                TokenKind::RBrack,
                TokenKind::Dot,
                TokenKind::Ident,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }
}
