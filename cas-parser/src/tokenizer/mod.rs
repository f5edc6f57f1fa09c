pub mod token;

use logos::{Lexer, Logos};
pub use token::{Token, TokenKind};

/// Returns an iterator over the token kinds produced by the tokenizer.
pub fn tokenize(input: &str) -> Lexer<TokenKind> {
    TokenKind::lexer(input)
}

/// Returns an owned array containing all of the tokens produced by the tokenizer. This allows the
/// parser to look ahead and backtrack freely.
///
/// Every character matches at least the catch-all [`TokenKind::Symbol`], so lexing never fails;
/// a lexer error would only stop the stream early.
pub fn tokenize_complete(input: &str) -> Box<[Token]> {
    let mut lexer = tokenize(input);
    let mut tokens = Vec::new();

    while let Some(Ok(kind)) = lexer.next() {
        tokens.push(Token {
            span: lexer.span(),
            kind,
            lexeme: lexer.slice(),
        });
    }

    tokens.into_boxed_slice()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Compares the tokens produced by the tokenizer to the raw expected tokens.
    fn compare_tokens<'source, const N: usize>(input: &'source str, expected: [(TokenKind, &'source str); N]) {
        let mut lexer = tokenize(input);

        for (expected_kind, expected_lexeme) in expected.into_iter() {
            assert_eq!(lexer.next(), Some(Ok(expected_kind)));
            assert_eq!(lexer.slice(), expected_lexeme);
        }

        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn equation() {
        compare_tokens(
            "x^2 = 4",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Exp, "^"),
                (TokenKind::Int, "2"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Assign, "="),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "4"),
            ],
        );
    }

    #[test]
    fn implicit_multiplication_and_parameters() {
        compare_tokens(
            "5exp(K_1)**2.5",
            [
                (TokenKind::Int, "5"),
                (TokenKind::Name, "exp"),
                (TokenKind::OpenParen, "("),
                (TokenKind::Name, "K_1"),
                (TokenKind::CloseParen, ")"),
                (TokenKind::Exp, "**"),
                (TokenKind::Float, "2.5"),
            ],
        );
    }

    #[test]
    fn unknown_characters() {
        compare_tokens(
            "x $ 1",
            [
                (TokenKind::Name, "x"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Symbol, "$"),
                (TokenKind::Whitespace, " "),
                (TokenKind::Int, "1"),
            ],
        );
    }
}
