use crate::tokens::{Token, TokenType};
use csslint_shared::errors::{CssResult, SyntaxError};
use std::collections::VecDeque;

/// Maximum number of tokens that can be looked ahead or behind
pub const MAX_LOOKAHEAD: usize = 5;

/// Anything that can produce tokens one by one. After the input is exhausted it keeps returning EOF tokens.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

/// Token stream with a small ring buffer that allows bounded lookahead, lookbehind and ungetting.
///
/// Hidden tokens (comments) are never buffered. Tokens on a channel are skipped unless that channel
/// is requested.
pub struct TokenStream<S: TokenSource> {
    source: S,
    /// The last returned tokens, at most [`MAX_LOOKAHEAD`]
    lt: VecDeque<Token>,
    /// Index in `lt` of the token that the next `get()` returns
    lt_index: usize,
    /// How far each of the last `get()` calls moved `lt_index`, so `unget()` can move back exactly
    lt_index_cache: VecDeque<usize>,
    /// The current token
    token: Option<Token>,
    /// Last token pushed out of the ring buffer
    evicted: Option<Token>,
}

impl<S: TokenSource> TokenStream<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            lt: VecDeque::with_capacity(MAX_LOOKAHEAD + 1),
            lt_index: 0,
            lt_index_cache: VecDeque::with_capacity(MAX_LOOKAHEAD + 1),
            token: None,
            evicted: None,
        }
    }

    /// Moves to the next token on the default channel and returns its type
    pub fn get(&mut self) -> TokenType {
        self.get_on(None)
    }

    /// Moves to the next token that is visible on the given channel and returns its type
    pub fn get_on(&mut self, channel: Option<&str>) -> TokenType {
        let mut skipped = 0;

        if self.lt_index < self.lt.len() {
            while self.lt_index < self.lt.len() {
                let token = self.lt[self.lt_index].clone();
                self.lt_index += 1;
                skipped += 1;

                let visible = token.channel.is_none() || token.channel == channel;
                let token_type = token.token_type;
                self.token = Some(token);

                if visible {
                    self.lt_index_cache.push_back(skipped);
                    self.trim_cache();
                    return token_type;
                }
            }
        }

        loop {
            let token = self.source.next_token();
            let info = token.token_type.info();

            if info.hide {
                continue;
            }

            let token_type = token.token_type;
            let visible = token.channel.is_none() || token.channel == channel;

            self.token = Some(token.clone());
            self.lt.push_back(token);
            self.lt_index_cache
                .push_back(self.lt.len() - self.lt_index + skipped);

            if self.lt.len() > MAX_LOOKAHEAD {
                self.evicted = self.lt.pop_front();
            }
            self.trim_cache();
            self.lt_index = self.lt.len();

            if visible {
                return token_type;
            }

            skipped = 0;
        }
    }

    fn trim_cache(&mut self) {
        while self.lt_index_cache.len() > MAX_LOOKAHEAD {
            self.lt_index_cache.pop_front();
        }
    }

    /// Moves back to the previous token. Can be done as many times as tokens were read, up to the
    /// buffer size.
    #[allow(clippy::panic)]
    pub fn unget(&mut self) {
        let Some(distance) = self.lt_index_cache.pop_back() else {
            panic!("Too much lookahead.");
        };

        self.lt_index = self.lt_index.saturating_sub(distance);
        self.token = if self.lt_index == 0 {
            self.evicted.clone()
        } else {
            self.lt.get(self.lt_index - 1).cloned()
        };
    }

    /// Returns the type of the token at the given offset from the current one. Positive values look
    /// ahead, negative values look behind and zero is the current token.
    ///
    /// Looking further than [`MAX_LOOKAHEAD`] tokens in either direction means the grammar asks for
    /// more than the buffer holds, and panics.
    #[allow(clippy::panic)]
    pub fn la(&mut self, index: isize) -> TokenType {
        if index > 0 {
            if index as usize > MAX_LOOKAHEAD {
                panic!("Too much lookahead.");
            }
            let mut token_type = TokenType::Eof;
            for _ in 0..index {
                token_type = self.get();
            }
            for _ in 0..index {
                self.unget();
            }
            return token_type;
        }

        if index < 0 {
            let back = index.unsigned_abs();
            if back > MAX_LOOKAHEAD || back > self.lt_index {
                panic!("Too much lookbehind.");
            }
            return self.lt[self.lt_index - back].token_type;
        }

        self.token
            .as_ref()
            .map(|t| t.token_type)
            .unwrap_or(TokenType::Eof)
    }

    /// Returns the token at the given offset, see [`TokenStream::la`]
    #[allow(clippy::panic)]
    pub fn lt(&mut self, index: isize) -> Token {
        self.la(index);

        if index == 0 {
            return self.token();
        }

        let position = self.lt_index as isize + index - 1;
        match usize::try_from(position).ok().and_then(|p| self.lt.get(p)) {
            Some(token) => token.clone(),
            None => panic!("Too much lookbehind."),
        }
    }

    /// Type of the next token without consuming it
    pub fn peek(&mut self) -> TokenType {
        self.la(1)
    }

    /// The current token. Before anything is read this is an EOF token.
    pub fn token(&self) -> Token {
        match &self.token {
            Some(token) => token.clone(),
            None => Token::new(TokenType::Eof, "", Default::default(), Default::default()),
        }
    }

    /// Consumes the next token when its type is one of `types`, otherwise leaves the stream unchanged
    pub fn match_token(&mut self, types: &[TokenType]) -> bool {
        self.match_on(types, None)
    }

    pub fn match_on(&mut self, types: &[TokenType], channel: Option<&str>) -> bool {
        let token_type = self.get_on(channel);
        if types.contains(&token_type) {
            return true;
        }
        self.unget();
        false
    }

    /// Like [`TokenStream::match_token`], but fails with an error naming the first expected type
    pub fn must_match(&mut self, types: &[TokenType]) -> CssResult<()> {
        if self.match_token(types) {
            return Ok(());
        }

        let token = self.lt(1);
        let expected = types.first().map(|t| t.name()).unwrap_or("EOF");
        Err(SyntaxError::new(
            &format!(
                "Expected {} at line {}, col {}.",
                expected, token.start.line, token.start.column
            ),
            token.start,
        ))
    }

    /// Skips tokens until one of `types` has been consumed or the end of the input is reached.
    /// Returns the type of the current token.
    pub fn advance(&mut self, types: &[TokenType]) -> TokenType {
        self.advance_on(types, None)
    }

    pub fn advance_on(&mut self, types: &[TokenType], channel: Option<&str>) -> TokenType {
        loop {
            let eof = self.token.is_some() && self.la(0) == TokenType::Eof;
            if eof || self.match_on(types, channel) {
                break;
            }
            self.get();
        }
        self.la(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::Tokenizer;
    use csslint_shared::reader::Location;

    struct VecSource {
        tokens: Vec<Token>,
        position: usize,
    }

    impl VecSource {
        fn new(types: &[TokenType]) -> Self {
            let tokens = types
                .iter()
                .enumerate()
                .map(|(i, tt)| {
                    let loc = Location::new(1, i + 1, i);
                    Token::new(*tt, &i.to_string(), loc, loc)
                })
                .collect();
            Self { tokens, position: 0 }
        }
    }

    impl TokenSource for VecSource {
        fn next_token(&mut self) -> Token {
            let token = match self.tokens.get(self.position) {
                Some(token) => token.clone(),
                None => Token::new(TokenType::Eof, "", Location::default(), Location::default()),
            };
            self.position += 1;
            token
        }
    }

    fn stream(input: &str) -> TokenStream<Tokenizer> {
        TokenStream::new(Tokenizer::new(input))
    }

    #[test]
    fn comments_are_skipped() {
        let mut ts = stream("a/* comment */b");
        assert_eq!(ts.get(), TokenType::Ident);
        assert_eq!(ts.get(), TokenType::Ident);
        assert_eq!(ts.token().value, "b");
        assert_eq!(ts.get(), TokenType::Eof);
    }

    #[test]
    fn unget_restores_previous_token() {
        let mut ts = stream("a b c");
        ts.get();
        ts.get();
        assert_eq!(ts.token().value, " ");
        ts.unget();
        assert_eq!(ts.token().value, "a");
        assert_eq!(ts.get(), TokenType::S);
        assert_eq!(ts.get(), TokenType::Ident);
        assert_eq!(ts.token().value, "b");
    }

    #[test]
    fn lookahead_does_not_consume() {
        let mut ts = stream("a > b");
        assert_eq!(ts.la(1), TokenType::Ident);
        assert_eq!(ts.la(2), TokenType::S);
        assert_eq!(ts.la(3), TokenType::Greater);
        assert_eq!(ts.lt(3).value, ">");
        assert_eq!(ts.get(), TokenType::Ident);
        assert_eq!(ts.token().value, "a");
        assert_eq!(ts.la(-1), TokenType::Ident);
        assert_eq!(ts.la(0), TokenType::Ident);
    }

    #[test]
    fn lookahead_of_five_is_allowed() {
        let mut ts = TokenStream::new(VecSource::new(&[
            TokenType::Ident,
            TokenType::S,
            TokenType::Plus,
            TokenType::S,
            TokenType::Hash,
            TokenType::Comma,
        ]));
        ts.get();
        assert_eq!(ts.la(5), TokenType::Comma);
        assert_eq!(ts.la(4), TokenType::Hash);
        assert_eq!(ts.la(1), TokenType::S);
        assert_eq!(ts.token().value, "0");
    }

    #[test]
    #[should_panic(expected = "Too much lookahead.")]
    fn lookahead_of_six_panics() {
        let mut ts = stream("a b c d e f g");
        ts.la(6);
    }

    #[test]
    #[should_panic(expected = "Too much lookbehind.")]
    fn lookbehind_past_start_panics() {
        let mut ts = stream("a b");
        ts.get();
        ts.la(-2);
    }

    #[test]
    fn unget_across_eviction() {
        let mut ts = TokenStream::new(VecSource::new(&[TokenType::Ident; 8]));
        for _ in 0..7 {
            ts.get();
        }
        assert_eq!(ts.token().value, "6");
        for _ in 0..5 {
            ts.unget();
        }
        assert_eq!(ts.token().value, "1");
        for expected in 2..8 {
            ts.get();
            assert_eq!(ts.token().value, expected.to_string());
        }
    }

    #[test]
    fn match_and_must_match() {
        let mut ts = stream("a{");
        assert!(!ts.match_token(&[TokenType::LBrace]));
        assert!(ts.match_token(&[TokenType::Hash, TokenType::Ident]));
        let err = ts.must_match(&[TokenType::RBrace, TokenType::Semicolon]).unwrap_err();
        assert_eq!(err.message, "Expected RBRACE at line 1, col 2.");
        assert!(ts.match_token(&[TokenType::LBrace]));
    }

    #[test]
    fn advance_to_sync_token() {
        let mut ts = stream("a b c; d");
        assert_eq!(ts.advance(&[TokenType::Semicolon]), TokenType::Semicolon);
        assert_eq!(ts.get(), TokenType::S);
        assert_eq!(ts.get(), TokenType::Ident);
        assert_eq!(ts.advance(&[TokenType::RBrace]), TokenType::Eof);
    }
}
