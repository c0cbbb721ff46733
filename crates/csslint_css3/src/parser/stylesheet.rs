use crate::event::ParserEvent;
use crate::tokens::TokenType;
use crate::{Css3, RuleOutcome};
use csslint_shared::errors::{CssResult, SyntaxError};

impl Css3<'_, '_> {
    /// Parses a complete stylesheet. In non-strict mode syntax errors inside a top level construct are
    /// reported as error events and parsing continues with the next construct.
    pub(crate) fn parse_stylesheet(&mut self) -> CssResult<()> {
        log::trace!("parse_stylesheet");

        let start = self.stream.lt(1).start;
        self.fire(ParserEvent::StartStylesheet { location: start });

        self.parse_charset()?;
        self.skip_cruft();

        while self.stream.peek() == TokenType::ImportSym {
            self.parse_import()?;
            self.skip_cruft();
        }

        while self.stream.peek() == TokenType::NamespaceSym {
            self.parse_namespace()?;
            self.skip_cruft();
        }

        let mut tt = self.stream.peek();
        while tt != TokenType::Eof {
            if let Err(err) = self.parse_stylesheet_item(tt) {
                if self.config.strict {
                    return Err(err);
                }
                self.report(err);
            }
            tt = self.stream.peek();
        }

        let end = self.stream.lt(1).start;
        self.fire(ParserEvent::EndStylesheet { location: end });

        Ok(())
    }

    fn parse_stylesheet_item(&mut self, tt: TokenType) -> CssResult<()> {
        match tt {
            TokenType::MediaSym => {
                self.parse_media()?;
                self.skip_cruft();
            }
            TokenType::PageSym => {
                self.parse_page()?;
                self.skip_cruft();
            }
            TokenType::FontFaceSym => {
                self.parse_font_face()?;
                self.skip_cruft();
            }
            TokenType::KeyframesSym => {
                self.parse_keyframes()?;
                self.skip_cruft();
            }
            TokenType::ViewportSym => {
                self.parse_viewport()?;
                self.skip_cruft();
            }
            TokenType::UnknownSym => self.skip_unknown_at_rule()?,
            TokenType::S => {
                self.read_whitespace();
            }
            _ => {
                if self.parse_ruleset()? != RuleOutcome::Absent {
                    self.skip_cruft();
                    return Ok(());
                }
                return Err(self.misplaced(tt));
            }
        }

        Ok(())
    }

    /// Builds the error for a token that cannot start a rule. Misplaced `@charset`, `@import` and
    /// `@namespace` rules are still parsed, and their events fired, before the error is returned.
    fn misplaced(&mut self, tt: TokenType) -> SyntaxError {
        let token = self.stream.lt(1);

        let result = match tt {
            TokenType::CharsetSym => self.parse_charset().map(|_| "@charset"),
            TokenType::ImportSym => self.parse_import().map(|_| "@import"),
            TokenType::NamespaceSym => self.parse_namespace().map(|_| "@namespace"),
            _ => {
                self.stream.get();
                let token = self.stream.token();
                return self.unexpected_token(&token);
            }
        };

        match result {
            Ok(rule) => SyntaxError::new(&format!("{} not allowed here.", rule), token.start),
            Err(err) => err,
        }
    }

    /// Skips an at-rule the grammar does not know. The rule ends at a `;` or after its block.
    fn skip_unknown_at_rule(&mut self) -> CssResult<()> {
        self.stream.get();
        let token = self.stream.token();

        if self.config.strict {
            return Err(SyntaxError::new("Unknown @ rule.", token.start));
        }

        log::warn!("skipping unknown at-rule {}", token.value);
        self.fire(ParserEvent::Error {
            error: None,
            message: format!("Unknown @ rule: {}.", token.value),
            location: token.start,
        });

        let mut depth = 0usize;
        loop {
            match self
                .stream
                .advance(&[TokenType::LBrace, TokenType::RBrace, TokenType::Semicolon])
            {
                TokenType::LBrace => depth += 1,
                TokenType::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        break;
                    }
                }
                TokenType::Semicolon if depth == 0 => break,
                TokenType::Semicolon => {}
                _ => break,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::event::ParserEvent;
    use crate::parser::test_support::{event_names, parse_events};
    use crate::parser_config::ParserConfig;

    #[test]
    fn recovers_from_broken_rule() {
        let (result, events) = parse_events(
            "a{color:red} b{{{ c:1 } d{color:blue}",
            ParserConfig::default(),
        );
        assert!(result.is_ok());

        let names = event_names(&events);
        assert_eq!(names.first().map(String::as_str), Some("startstylesheet"));
        assert_eq!(names.last().map(String::as_str), Some("endstylesheet"));
        assert!(names.iter().any(|n| n == "error"));

        let rules: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                ParserEvent::StartRule { selectors, .. } => Some(selectors[0].text.clone()),
                _ => None,
            })
            .collect();
        assert!(rules.contains(&"a".to_string()));
        assert!(rules.contains(&"d".to_string()));

        let properties: Vec<String> = events
            .iter()
            .filter_map(|e| match e {
                ParserEvent::Property { value, .. } => Some(value.text.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(properties, vec!["red", "blue"]);
    }

    #[test]
    fn strict_mode_fails_on_first_error() {
        let config = ParserConfig {
            strict: true,
            ..Default::default()
        };
        let (result, _) = parse_events("a{color:red} b{{{ c:1 } d{color:blue}", config);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_at_rule_is_skipped() {
        let (result, events) = parse_events(
            "@foo bar { a { color: red } } p { color: blue }",
            ParserConfig::default(),
        );
        assert!(result.is_ok());

        let error = events.iter().find_map(|e| match e {
            ParserEvent::Error { message, error, .. } => Some((message.clone(), error.is_none())),
            _ => None,
        });
        assert_eq!(error, Some(("Unknown @ rule: @foo.".to_string(), true)));
        assert_eq!(
            event_names(&events),
            vec!["startstylesheet", "error", "startrule", "property", "endrule", "endstylesheet"]
        );
    }

    #[test]
    fn unknown_statement_at_rule_ends_at_semicolon() {
        let (_, events) = parse_events("@foo bar; p { color: blue }", ParserConfig::default());
        assert!(event_names(&events).contains(&"startrule".to_string()));
    }

    #[test]
    fn unknown_at_rule_is_an_error_in_strict_mode() {
        let config = ParserConfig {
            strict: true,
            ..Default::default()
        };
        let (result, _) = parse_events("@foo bar;", config);
        assert_eq!(result.unwrap_err().message, "Unknown @ rule.");
    }

    #[test]
    fn misplaced_import_still_fires() {
        let (result, events) = parse_events(
            "a { color: red }\n@import url(foo.css);",
            ParserConfig::default(),
        );
        assert!(result.is_ok());
        let names = event_names(&events);
        let import = names.iter().position(|n| n == "import");
        let error = names.iter().position(|n| n == "error");
        assert!(import.is_some());
        assert!(import < error);

        let message = events.iter().find_map(|e| match e {
            ParserEvent::Error { message, location, .. } => Some((message.clone(), location.line)),
            _ => None,
        });
        assert_eq!(message, Some(("@import not allowed here.".to_string(), 2)));
    }

    #[test]
    fn unexpected_token_at_top_level() {
        let (_, events) = parse_events("} a { color: red }", ParserConfig::default());
        let message = events.iter().find_map(|e| match e {
            ParserEvent::Error { message, .. } => Some(message.clone()),
            _ => None,
        });
        assert_eq!(message.as_deref(), Some("Unexpected token '}' at line 1, col 1."));
        assert!(event_names(&events).contains(&"startrule".to_string()));
    }
}
