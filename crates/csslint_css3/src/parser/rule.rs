use crate::event::ParserEvent;
use crate::node::Selector;
use crate::tokens::TokenType;
use crate::{Css3, RuleOutcome};
use csslint_shared::errors::CssResult;

impl Css3<'_, '_> {
    /// A style rule: a selector group followed by a declaration block.
    ///
    /// When a selector fails to parse in non-strict mode the whole rule is skipped up to its closing
    /// brace, and [`RuleOutcome::Recovered`] is returned so the caller keeps going.
    pub(crate) fn parse_ruleset(&mut self) -> CssResult<RuleOutcome> {
        log::trace!("parse_ruleset");

        let selectors = match self.parse_selectors_group() {
            Ok(selectors) => selectors,
            Err(err) if !self.config.strict => {
                let location = err.location;
                self.report(err.clone());

                if self.stream.advance(&[TokenType::RBrace]) == TokenType::RBrace {
                    return Ok(RuleOutcome::Recovered);
                }

                log::debug!("no closing brace after selector error at {:?}", location);
                return Err(err);
            }
            Err(err) => return Err(err),
        };

        let Some(selectors) = selectors else {
            return Ok(RuleOutcome::Absent);
        };

        let location = selectors
            .first()
            .map(|s| s.location)
            .unwrap_or_default();

        self.fire(ParserEvent::StartRule {
            selectors: selectors.clone(),
            location,
        });
        self.read_declarations(true, false)?;
        self.fire(ParserEvent::EndRule {
            selectors: selectors.clone(),
            location,
        });

        Ok(RuleOutcome::Parsed(selectors))
    }

    /// Comma separated selectors. Returns None when there is no selector at all.
    fn parse_selectors_group(&mut self) -> CssResult<Option<Vec<Selector>>> {
        let Some(first) = self.parse_selector()? else {
            return Ok(None);
        };

        let mut selectors = vec![first];
        while self.stream.match_token(&[TokenType::Comma]) {
            self.read_whitespace();
            match self.parse_selector()? {
                Some(selector) => selectors.push(selector),
                None => {
                    let token = self.stream.lt(1);
                    return Err(self.unexpected_token(&token));
                }
            }
        }

        Ok(Some(selectors))
    }
}

#[cfg(test)]
mod tests {
    use crate::event::{EventType, ParserEvent};
    use crate::parser_config::ParserConfig;
    use crate::specificity::Specificity;
    use crate::{Parser, RuleOutcome};

    #[test]
    fn rule_with_selector_group() {
        let mut selectors = Vec::new();
        let outcome = {
            let mut parser = Parser::new(ParserConfig::default());
            parser.add_listener(EventType::StartRule, |event| {
                if let ParserEvent::StartRule { selectors: s, .. } = event {
                    selectors = s.iter().map(|s| s.text.clone()).collect();
                }
            });
            parser.parse_rule("  h1, ul > li.item , #main a:hover { color: red }  ").unwrap()
        };

        assert_eq!(selectors, vec!["h1", "ul > li.item", "#main a:hover"]);
        match outcome {
            RuleOutcome::Parsed(parsed) => {
                assert_eq!(parsed.len(), 3);
                assert_eq!(parsed[2].specificity, Specificity::new(0, 1, 1, 1));
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn broken_selector_is_recovered() {
        let mut errors = 0;
        let outcome = {
            let mut parser = Parser::new(ParserConfig::default());
            parser.add_listener(EventType::Error, |_| errors += 1);
            parser.parse_rule("a, { color: red }").unwrap()
        };
        assert_eq!(outcome, RuleOutcome::Recovered);
        assert_eq!(errors, 1);
    }

    #[test]
    fn broken_selector_fails_in_strict_mode() {
        let mut parser = Parser::new(ParserConfig {
            strict: true,
            ..Default::default()
        });
        let err = parser.parse_rule("a, { color: red }").unwrap_err();
        assert_eq!(err.message, "Unexpected token '{' at line 1, col 4.");
    }

    #[test]
    fn no_rule() {
        let mut parser = Parser::new(ParserConfig::default());
        assert_eq!(parser.parse_rule("   ").unwrap(), RuleOutcome::Absent);
    }
}
