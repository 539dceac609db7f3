use std::fmt;

use crate::ast::{Expr, Op, Token, TokenKind};

/// Errors that abort parsing.
///
/// Parsing never recovers or returns partial results; the first
/// structurally invalid token fails the whole parse. The offending token
/// is always carried for diagnostics, and the unexpected-token case also
/// renders the partial expression built so far.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A token that no production accepts, with the expression parsed up
    /// to that point.
    UnexpectedToken { found: Token, parsed: String },

    /// A `)` or `]` that should close an open group but does not.
    ExpectedClosing { expected: TokenKind, found: Token },

    /// A dot not followed by an identifier.
    ExpectedFieldName { found: Token },

    /// A numeric literal whose text does not fit the literal type.
    BadLiteral { token: Token },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken { found, parsed } => {
                write!(
                    f,
                    "unexpected token '{}', expression so far: {}",
                    found, parsed
                )
            }
            ParseError::ExpectedClosing { expected, found } => {
                write!(f, "expected '{}', found: {}", expected, found)
            }
            ParseError::ExpectedFieldName { found } => {
                write!(f, "expected identifier after dot, got: {}", found)
            }
            ParseError::BadLiteral { token } => {
                write!(f, "couldn't parse literal token: {}", token)
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Recursive-descent consumer of a token sequence.
///
/// Grammar (one precedence level, right-associative binaries):
///
/// ```text
/// expr    := operand (BINOP expr)?
/// operand := UNOP expr | literal postfix*
/// literal := INT | FLOAT | STRING | IDENT | '(' expr ')'
/// postfix := '[' expr ']' | '(' (expr (',' expr)*)? ')' | '.' IDENT
/// ```
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    /// The caller supplies tokens up to and including the end marker,
    /// as produced by [`crate::lexer::lex`].
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    fn peek(&self) -> Token {
        self.tokens
            .get(self.pos)
            .cloned()
            .unwrap_or_else(|| Token::eof(0))
    }

    fn next(&mut self) -> Token {
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            self.pos += 1;
        }
        tok
    }

    /// Parses one expression and requires the sequence to be fully
    /// consumed up to the end marker.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.expr()?;
        let tok = self.peek();
        if tok.kind != TokenKind::Eof {
            return Err(ParseError::UnexpectedToken {
                found: tok,
                parsed: expr.to_string(),
            });
        }
        Ok(expr)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        let tok = self.next();
        let expr = self.operand(tok)?;

        let peeked = self.peek();
        match peeked.kind {
            TokenKind::Eof | TokenKind::RParen | TokenKind::RBrack | TokenKind::Comma => {
                return Ok(expr);
            }
            _ => {}
        }

        if peeked.kind.is_operator() {
            self.next();
            let op = peeked.kind.op().expect("operator token maps to an op");
            // right-recursion: all binary operators associate right
            return Ok(Expr::binary(op, expr, self.expr()?));
        }

        Err(ParseError::UnexpectedToken {
            found: peeked,
            parsed: expr.to_string(),
        })
    }

    fn operand(&mut self, tok: Token) -> Result<Expr, ParseError> {
        // a leading operator is unary and binds the whole remaining
        // expression: `!a + b` parses as `!(a + b)`
        if tok.kind.is_operator() {
            let op = tok.kind.op().expect("operator token maps to an op");
            return Ok(Expr::unary(op, self.expr()?));
        }

        let mut expr = self.literal(tok)?;

        // keep chaining postfix index/call/field until none apply
        loop {
            expr = match self.peek().kind {
                TokenKind::LBrack => self.index(expr)?,
                TokenKind::LParen => self.call(expr)?,
                TokenKind::Dot => self.field(expr)?,
                _ => return Ok(expr),
            };
        }
    }

    fn index(&mut self, expr: Expr) -> Result<Expr, ParseError> {
        self.next(); // '['
        let index = self.expr()?;
        let tok = self.next();
        if tok.kind != TokenKind::RBrack {
            return Err(ParseError::ExpectedClosing {
                expected: TokenKind::RBrack,
                found: tok,
            });
        }

        Ok(Expr::binary(Op::Index, expr, index))
    }

    /// Field access desugars to an index-like binary node whose right
    /// operand is a string literal holding the identifier text.
    fn field(&mut self, expr: Expr) -> Result<Expr, ParseError> {
        self.next(); // '.'

        let tok = self.next();
        if tok.kind != TokenKind::Ident {
            return Err(ParseError::ExpectedFieldName { found: tok });
        }

        Ok(Expr::binary(Op::Field, expr, Expr::Str(tok.text)))
    }

    fn call(&mut self, expr: Expr) -> Result<Expr, ParseError> {
        self.next(); // '('

        let mut args = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::RParen => {
                    self.next();
                    break;
                }
                TokenKind::Comma => {
                    self.next();
                }
                TokenKind::Eof => {
                    return Err(ParseError::ExpectedClosing {
                        expected: TokenKind::RParen,
                        found: self.peek(),
                    });
                }
                _ => args.push(self.expr()?),
            }
        }

        Ok(Expr::Call {
            func: Box::new(expr),
            args,
        })
    }

    fn literal(&mut self, tok: Token) -> Result<Expr, ParseError> {
        match tok.kind {
            TokenKind::Ident => Ok(Expr::Var(tok.text)),
            TokenKind::Str => Ok(Expr::Str(tok.text)),
            TokenKind::Int => match tok.text.parse::<i64>() {
                Ok(i) => Ok(Expr::Int(i)),
                Err(_) => Err(ParseError::BadLiteral { token: tok }),
            },
            TokenKind::Float => match tok.text.parse::<f64>() {
                Ok(n) => Ok(Expr::Float(n)),
                Err(_) => Err(ParseError::BadLiteral { token: tok }),
            },
            TokenKind::LParen => {
                let expr = self.expr()?;
                let closing = self.next();
                if closing.kind != TokenKind::RParen {
                    return Err(ParseError::ExpectedClosing {
                        expected: TokenKind::RParen,
                        found: closing,
                    });
                }
                Ok(expr)
            }
            _ => Err(ParseError::UnexpectedToken {
                found: tok,
                parsed: "<none>".to_string(),
            }),
        }
    }
}
