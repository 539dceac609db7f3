use pluck_lang::{LexError, Token, TokenKind, lex};

#[test]
fn every_clean_input_ends_with_exactly_one_eof() {
    let inputs = [
        "",
        "   ",
        "$",
        "$.foo[0].bar()",
        "1 + 2 + 3",
        "'a string' == other",
        "!(a + b)",
        "f(1, 2.5, 'x')",
        "10 % 3 >= 2 <= 1 != 0",
    ];

    for input in inputs {
        let tokens = lex(input).unwrap_or_else(|e| panic!("lex({:?}): {}", input, e));
        let eofs = tokens
            .iter()
            .filter(|t| t.kind == TokenKind::Eof)
            .count();
        assert_eq!(eofs, 1, "input {:?}", input);
        assert_eq!(tokens.last().unwrap().kind, TokenKind::Eof, "input {:?}", input);
    }
}

#[test]
fn tokens_carry_text_and_byte_offsets() {
    let tokens = lex("$.foo[10]").unwrap();
    assert_eq!(
        tokens,
        vec![
            Token::new(TokenKind::Ident, "$", 0),
            Token::new(TokenKind::Dot, ".", 1),
            Token::new(TokenKind::Ident, "foo", 2),
            Token::new(TokenKind::LBrack, "[", 5),
            Token::new(TokenKind::Int, "10", 6),
            Token::new(TokenKind::RBrack, "]", 8),
            Token::eof(9),
        ]
    );
}

#[test]
fn float_requires_dot_in_digit_run() {
    let tokens = lex("1 1.5 10.0").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Int);
    assert_eq!(tokens[1].kind, TokenKind::Float);
    assert_eq!(tokens[1].text, "1.5");
    assert_eq!(tokens[2].kind, TokenKind::Float);
}

#[test]
fn all_operators() {
    let tokens = lex("+ - * / % == != <= >= < > !").unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Add,
            TokenKind::Sub,
            TokenKind::Mul,
            TokenKind::Quo,
            TokenKind::Rem,
            TokenKind::Equal,
            TokenKind::NotEqual,
            TokenKind::Lte,
            TokenKind::Gte,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Not,
            TokenKind::Eof,
        ]
    );
    assert!(kinds[..kinds.len() - 1].iter().all(|k| k.is_operator()));
}

#[test]
fn string_content_is_verbatim() {
    let tokens = lex("'hello world' 'with \"quotes\"'").unwrap();
    assert_eq!(tokens[0], Token::new(TokenKind::Str, "hello world", 1));
    assert_eq!(tokens[1].text, "with \"quotes\"");
}

#[test]
fn unrecognized_character_aborts_the_scan() {
    assert_eq!(lex("a & b"), Err(LexError::IllegalChar { ch: '&', pos: 2 }));
    assert_eq!(lex("a = b"), Err(LexError::IllegalChar { ch: '=', pos: 2 }));
}
