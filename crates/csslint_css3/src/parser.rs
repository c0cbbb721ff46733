use crate::event::ParserEvent;
use crate::tokens::{Token, TokenType};
use crate::Css3;
use csslint_shared::errors::{CssResult, SyntaxError};

mod at_rule;
mod declaration;
mod keyframes;
mod media;
mod page;
mod rule;
mod selector;
mod stylesheet;
mod value;

impl Css3<'_, '_> {
    /// Consumes all whitespace tokens and returns them as a single string
    pub(crate) fn read_whitespace(&mut self) -> String {
        let mut ws = String::new();
        while self.stream.match_token(&[TokenType::S]) {
            ws.push_str(&self.stream.token().value);
        }
        ws
    }

    /// Skips whitespace and the HTML comment delimiters `<!--` and `-->`
    pub(crate) fn skip_cruft(&mut self) {
        while self
            .stream
            .match_token(&[TokenType::S, TokenType::Cdo, TokenType::Cdc])
        {}
    }

    pub(crate) fn unexpected_token(&self, token: &Token) -> SyntaxError {
        SyntaxError::new(
            &format!(
                "Unexpected token '{}' at line {}, col {}.",
                token.value, token.start.line, token.start.column
            ),
            token.start,
        )
    }

    /// Fails with an unexpected token error unless the whole input has been consumed
    pub(crate) fn verify_end(&mut self) -> CssResult<()> {
        if self.stream.la(1) != TokenType::Eof {
            let token = self.stream.lt(1);
            return Err(self.unexpected_token(&token));
        }
        Ok(())
    }

    pub(crate) fn fire(&mut self, event: ParserEvent) {
        self.events.fire(event);
    }

    /// Reports a syntax error that the parser recovers from
    pub(crate) fn report(&mut self, err: SyntaxError) {
        log::warn!("recovering from: {}", err);
        self.fire(ParserEvent::Error {
            message: err.message.clone(),
            location: err.location,
            error: Some(err),
        });
    }

    /// Like `TokenStream::must_match`, but returns the matched token
    pub(crate) fn consume(&mut self, types: &[TokenType]) -> CssResult<Token> {
        self.stream.must_match(types)?;
        Ok(self.stream.token())
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::event::ParserEvent;
    use crate::parser_config::ParserConfig;
    use crate::Parser;
    use csslint_shared::errors::CssResult;

    /// Parses a stylesheet and collects every fired event
    pub fn parse_events(input: &str, config: ParserConfig) -> (CssResult<()>, Vec<ParserEvent>) {
        let mut events = Vec::new();
        let result = {
            let mut parser = Parser::new(config);
            parser.add_any_listener(|event| events.push(event.clone()));
            parser.parse(input)
        };
        (result, events)
    }

    pub fn event_names(events: &[ParserEvent]) -> Vec<String> {
        events.iter().map(|e| e.event_type().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::parse_events;
    use crate::parser_config::ParserConfig;
    use crate::Parser;

    #[test]
    fn verify_end_reports_trailing_tokens() {
        let mut parser = Parser::new(ParserConfig::default());
        let err = parser.parse_selector("a {").unwrap_err();
        assert_eq!(err.message, "Unexpected token '{' at line 1, col 3.");
        assert_eq!(err.location.column, 3);
    }

    #[test]
    fn cruft_is_skipped() {
        let (result, events) = parse_events("<!-- a { color: red } -->", ParserConfig::default());
        assert!(result.is_ok());
        assert_eq!(events.len(), 5);
    }
}
