/// Spec tests for the CFS lexer.
///
/// Each test verifies that specific source text tokenises to the expected
/// sequence of token kinds.  Structural tokens (Newline, Eof) are filtered
/// out unless the test is specifically about structure.
use cfs::lexer::{Lexer, TokenKind};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn lex_all(src: &str) -> Vec<TokenKind> {
    let mut lexer = Lexer::new(src);
    lexer
        .tokenize()
        .unwrap()
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

/// Filter out Newline and Eof tokens — tests focus on meaningful tokens only.
fn lex(src: &str) -> Vec<TokenKind> {
    lex_all(src)
        .into_iter()
        .filter(|k| !matches!(k, TokenKind::Newline | TokenKind::Eof))
        .collect()
}

fn lex_err(src: &str) -> bool {
    Lexer::new(src).tokenize().is_err()
}

fn lex_err_msg(src: &str) -> String {
    Lexer::new(src)
        .tokenize()
        .expect_err("lex should fail")
        .to_string()
}

fn num(text: &str) -> TokenKind {
    TokenKind::Number(text.to_string())
}

// ---------------------------------------------------------------------------
// Numbers
// ---------------------------------------------------------------------------

#[test]
fn int_basic() {
    assert_eq!(lex("42"), vec![num("42")]);
}

#[test]
fn float_basic() {
    assert_eq!(lex("3.14"), vec![num("3.14")]);
}

#[test]
fn float_leading_dot() {
    assert_eq!(lex(".5"), vec![num(".5")]);
}

#[test]
fn float_lexeme_is_verbatim() {
    // No normalisation: trailing zeros and leading dots survive as written
    assert_eq!(lex("2.50"), vec![num("2.50")]);
}

#[test]
fn exponent_plain() {
    assert_eq!(lex("1e3"), vec![num("1e3")]);
}

#[test]
fn exponent_signed() {
    assert_eq!(lex("2.5e-10"), vec![num("2.5e-10")]);
    assert_eq!(lex("1E+2"), vec![num("1E+2")]);
}

#[test]
fn exponent_without_digits_is_not_consumed() {
    // `2e` is a number directly followed by an identifier character
    assert!(lex_err("2e"));
}

#[test]
fn number_with_two_dots_is_error() {
    assert!(lex_err("1.2.3"));
}

#[test]
fn number_with_trailing_dot_is_error() {
    assert!(lex_err_msg("1. ").contains("malformed number"));
}

#[test]
fn digit_leading_identifier_is_error() {
    assert!(lex_err_msg("12abc").contains("identifier may not begin with a digit"));
}

// ---------------------------------------------------------------------------
// Identifiers, keywords, reserved constants
// ---------------------------------------------------------------------------

#[test]
fn ident_simple() {
    assert_eq!(lex("speed"), vec![TokenKind::Ident("speed".to_string())]);
}

#[test]
fn ident_underscore_and_digits() {
    assert_eq!(lex("_x1"), vec![TokenKind::Ident("_x1".to_string())]);
}

#[test]
fn keywords() {
    assert_eq!(lex("function"), vec![TokenKind::Function]);
    assert_eq!(lex("def"), vec![TokenKind::Def]);
    assert_eq!(lex("double"), vec![TokenKind::Double]);
    assert_eq!(lex("return"), vec![TokenKind::Return]);
    assert_eq!(lex("if"), vec![TokenKind::If]);
    assert_eq!(lex("not"), vec![TokenKind::Not]);
    assert_eq!(lex("and"), vec![TokenKind::And]);
    assert_eq!(lex("or"), vec![TokenKind::Or]);
}

#[test]
fn pi_and_e_are_tags() {
    assert_eq!(lex("pi"), vec![TokenKind::Tag("pi".to_string())]);
    assert_eq!(lex("e"), vec![TokenKind::Tag("e".to_string())]);
}

#[test]
fn pi_prefix_is_plain_ident() {
    assert_eq!(lex("pi2"), vec![TokenKind::Ident("pi2".to_string())]);
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

#[test]
fn tag_basic() {
    assert_eq!(lex("#DWFSS#"), vec![TokenKind::Tag("#DWFSS#".to_string())]);
}

#[test]
fn tag_empty() {
    assert_eq!(lex("##"), vec![TokenKind::Tag("##".to_string())]);
}

#[test]
fn tag_unterminated_is_error() {
    assert!(lex_err_msg("#DWFSS").contains("unterminated tag"));
    assert!(lex_err("#DW\nFSS#"));
}

// ---------------------------------------------------------------------------
// Operators — longest match first
// ---------------------------------------------------------------------------

#[test]
fn two_char_operators() {
    assert_eq!(lex("=="), vec![TokenKind::Eq]);
    assert_eq!(lex("!="), vec![TokenKind::Neq]);
    assert_eq!(lex("<>"), vec![TokenKind::Diamond]);
    assert_eq!(lex("<="), vec![TokenKind::Lte]);
    assert_eq!(lex(">="), vec![TokenKind::Gte]);
    assert_eq!(lex("<:"), vec![TokenKind::LtF]);
    assert_eq!(lex(">:"), vec![TokenKind::GtF]);
    assert_eq!(lex("&&"), vec![TokenKind::AndAnd]);
    assert_eq!(lex("||"), vec![TokenKind::OrOr]);
}

#[test]
fn one_char_operators() {
    assert_eq!(lex("="), vec![TokenKind::Assign]);
    assert_eq!(lex("!"), vec![TokenKind::Bang]);
    assert_eq!(lex("<"), vec![TokenKind::Lt]);
    assert_eq!(lex(">"), vec![TokenKind::Gt]);
    assert_eq!(lex("%"), vec![TokenKind::Percent]);
    assert_eq!(lex("^"), vec![TokenKind::Caret]);
    assert_eq!(lex("?"), vec![TokenKind::Question]);
    assert_eq!(lex(":"), vec![TokenKind::Colon]);
    assert_eq!(lex(";"), vec![TokenKind::Semi]);
}

#[test]
fn longest_match_priority() {
    // `<::` is `<:` then `:`, never `<` `:` `:`
    assert_eq!(lex("<::"), vec![TokenKind::LtF, TokenKind::Colon]);
    // `===` is `==` then `=`
    assert_eq!(lex("==="), vec![TokenKind::Eq, TokenKind::Assign]);
    // `!==` is `!=` then `=`
    assert_eq!(lex("!=="), vec![TokenKind::Neq, TokenKind::Assign]);
}

#[test]
fn lone_ampersand_is_error() {
    assert!(lex_err("&"));
    assert!(lex_err("|"));
}

#[test]
fn unrecognized_input_is_error() {
    assert!(lex_err_msg("$").contains("unrecognized input"));
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[test]
fn line_comment_is_skipped() {
    assert_eq!(lex("// comment\n42"), vec![num("42")]);
}

#[test]
fn trailing_line_comment_is_skipped() {
    assert_eq!(lex("42 // trailing"), vec![num("42")]);
}

#[test]
fn block_comment_is_skipped() {
    assert_eq!(lex("1 /* gone */ 2"), vec![num("1"), num("2")]);
}

#[test]
fn block_comment_spans_lines() {
    assert_eq!(lex("1 /* a\nb\nc */ 2"), vec![num("1"), num("2")]);
}

#[test]
fn unterminated_block_comment_is_error() {
    assert!(lex_err_msg("1 /* never closed").contains("unterminated block comment"));
}

// ---------------------------------------------------------------------------
// Newlines and structure
// ---------------------------------------------------------------------------

#[test]
fn newline_token_between_lines() {
    assert_eq!(
        lex_all("1\n2"),
        vec![num("1"), TokenKind::Newline, num("2"), TokenKind::Eof]
    );
}

#[test]
fn newline_runs_collapse() {
    assert_eq!(
        lex_all("1\n\n\n2"),
        vec![num("1"), TokenKind::Newline, num("2"), TokenKind::Eof]
    );
}

#[test]
fn leading_newlines_produce_no_token() {
    assert_eq!(lex_all("\n\n1"), vec![num("1"), TokenKind::Eof]);
}

#[test]
fn carriage_return_is_discarded() {
    assert_eq!(
        lex_all("1\r\n2"),
        vec![num("1"), TokenKind::Newline, num("2"), TokenKind::Eof]
    );
}

#[test]
fn eof_is_always_last() {
    assert_eq!(lex_all(""), vec![TokenKind::Eof]);
}

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

#[test]
fn token_positions_are_line_and_column() {
    let mut lexer = Lexer::new("  x\n y");
    let tokens = lexer.tokenize().unwrap();
    assert_eq!((tokens[0].pos.line, tokens[0].pos.col), (1, 3)); // x
    assert_eq!((tokens[2].pos.line, tokens[2].pos.col), (2, 2)); // y
}

#[test]
fn error_position_points_at_offender() {
    let msg = lex_err_msg("main() return $");
    assert!(msg.starts_with("1:15:"), "unexpected message: {}", msg);
}

// ---------------------------------------------------------------------------
// Mixed sequences
// ---------------------------------------------------------------------------

#[test]
fn function_header_tokens() {
    assert_eq!(
        lex("f(a, b)"),
        vec![
            TokenKind::Ident("f".to_string()),
            TokenKind::LParen,
            TokenKind::Ident("a".to_string()),
            TokenKind::Comma,
            TokenKind::Ident("b".to_string()),
            TokenKind::RParen,
        ]
    );
}

#[test]
fn expression_with_tag_and_comparison() {
    assert_eq!(
        lex("#ZLEVEL# <= 3"),
        vec![
            TokenKind::Tag("#ZLEVEL#".to_string()),
            TokenKind::Lte,
            num("3"),
        ]
    );
}

#[test]
fn negative_is_minus_then_number() {
    // Unary minus is not part of the numeric literal
    assert_eq!(lex("-5"), vec![TokenKind::Minus, num("5")]);
}
