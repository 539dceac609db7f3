use std::fmt;

/// Lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// End of input. Every token sequence ends with exactly one.
    Eof,

    // Literals and names
    /// Identifier: letters, digits, `_` and `$`
    ///
    /// `$` is a legal identifier character so that the root binding is
    /// lexically a plain identifier.
    ///
    /// # Examples
    /// ```text
    /// $
    /// foo
    /// _bar2
    /// ```
    Ident,

    /// Integer literal
    ///
    /// # Examples
    /// ```text
    /// 42
    /// ```
    Int,

    /// Float literal: a digit run containing a `.`
    ///
    /// # Examples
    /// ```text
    /// 42.3
    /// ```
    Float,

    /// String literal: single-quoted, no escape sequences
    ///
    /// The token text excludes the quotes.
    ///
    /// # Examples
    /// ```text
    /// 'hello'
    /// ```
    Str,

    // Grouping, calls, indexing, fields and argument lists
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
    /// Left bracket
    LBrack,
    /// Right bracket
    RBrack,
    /// Dot for field access
    Dot,
    /// Comma separating call arguments
    Comma,

    // Operators
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Quo,
    /// Remainder (`%`)
    Rem,
    /// Equality (`==`)
    Equal,
    /// Inequality (`!=`)
    NotEqual,
    /// Less than or equal (`<=`)
    Lte,
    /// Greater than or equal (`>=`)
    Gte,
    /// Less than (`<`)
    Lt,
    /// Greater than (`>`)
    Gt,
    /// Logical not (`!`)
    Not,
}

impl TokenKind {
    /// Whether this token can appear as a unary or binary operator.
    ///
    /// `Dot` and `Comma` are not operators at the token level; the parser
    /// handles them as part of postfix chains and argument lists.
    pub fn is_operator(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Add | Sub | Mul | Quo | Rem | Equal | NotEqual | Lte | Gte | Lt | Gt | Not
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Eof => "EOF",
            TokenKind::Ident => "Ident",
            TokenKind::Int => "Int",
            TokenKind::Float => "Float",
            TokenKind::Str => "String",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrack => "[",
            TokenKind::RBrack => "]",
            TokenKind::Dot => ".",
            TokenKind::Comma => ",",
            TokenKind::Add => "+",
            TokenKind::Sub => "-",
            TokenKind::Mul => "*",
            TokenKind::Quo => "/",
            TokenKind::Rem => "%",
            TokenKind::Equal => "==",
            TokenKind::NotEqual => "!=",
            TokenKind::Lte => "<=",
            TokenKind::Gte => ">=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Not => "!",
        };
        f.write_str(s)
    }
}

/// A single lexical token: its category, raw source text, and the byte
/// offset where that text begins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub pos: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, pos: usize) -> Self {
        Token {
            kind,
            text: text.into(),
            pos,
        }
    }

    /// The end-of-input marker at the given offset.
    pub fn eof(pos: usize) -> Self {
        Token::new(TokenKind::Eof, "", pos)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident | TokenKind::Int | TokenKind::Float | TokenKind::Str => {
                write!(f, "{}:{}({})", self.pos, self.kind, self.text)
            }
            _ => write!(f, "{}:{}", self.pos, self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operator_classification() {
        assert!(TokenKind::Add.is_operator());
        assert!(TokenKind::Not.is_operator());
        assert!(TokenKind::Equal.is_operator());
        assert!(!TokenKind::Dot.is_operator());
        assert!(!TokenKind::Comma.is_operator());
        assert!(!TokenKind::LBrack.is_operator());
        assert!(!TokenKind::Eof.is_operator());
    }

    #[test]
    fn token_display() {
        assert_eq!(Token::new(TokenKind::Int, "42", 3).to_string(), "3:Int(42)");
        assert_eq!(Token::new(TokenKind::Add, "+", 0).to_string(), "0:+");
        assert_eq!(Token::eof(7).to_string(), "7:EOF");
    }
}
