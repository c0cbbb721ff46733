use crate::event::ParserEvent;
use crate::node::{PropertyHack, PropertyName};
use crate::tokens::TokenType;
use crate::validation;
use crate::Css3;
use csslint_shared::errors::CssResult;

impl Css3<'_, '_> {
    /// Reads a declaration block up to and including the closing brace.
    ///
    /// In non-strict mode a broken declaration is reported and skipped up to the next `;` or `}`, after
    /// which reading continues with the next declaration.
    pub(crate) fn read_declarations(&mut self, check_start: bool, read_margins: bool) -> CssResult<()> {
        log::trace!("read_declarations");

        self.read_whitespace();
        if check_start {
            self.stream.must_match(&[TokenType::LBrace])?;
        }

        loop {
            let result = self.read_declaration_list(read_margins);
            let err = match result {
                Ok(()) => return Ok(()),
                Err(err) if self.config.strict => return Err(err),
                Err(err) => err,
            };

            self.report(err.clone());

            match self
                .stream
                .advance(&[TokenType::Semicolon, TokenType::RBrace])
            {
                TokenType::Semicolon => continue,
                TokenType::RBrace => return Ok(()),
                _ => return Err(err),
            }
        }
    }

    fn read_declaration_list(&mut self, read_margins: bool) -> CssResult<()> {
        self.read_whitespace();

        loop {
            if self.stream.match_token(&[TokenType::Semicolon]) || (read_margins && self.parse_margin()?) {
                // nothing to do
            } else if self.parse_declaration()? {
                if !self.stream.match_token(&[TokenType::Semicolon]) {
                    break;
                }
            } else {
                break;
            }

            self.read_whitespace();
        }

        self.stream.must_match(&[TokenType::RBrace])?;
        self.read_whitespace();

        Ok(())
    }

    /// `property: value !important`. Returns false when there is no property name. The value is
    /// validated against the grammar of the property and the outcome attached to the property event.
    pub(crate) fn parse_declaration(&mut self) -> CssResult<bool> {
        let Some(property) = self.parse_property() else {
            return Ok(false);
        };

        log::trace!("parse_declaration {}", property);

        self.stream.must_match(&[TokenType::Colon])?;
        self.read_whitespace();

        let Some(value) = self.parse_expr(false)? else {
            let token = self.stream.lt(1);
            return Err(self.unexpected_token(&token));
        };

        let important = self.parse_prio();

        let invalid = validation::validate(&property, &value).err();
        if let Some(err) = &invalid {
            log::debug!("invalid value for {}: {}", property, err);
        }

        self.fire(ParserEvent::Property {
            location: property.location,
            property,
            value,
            important,
            invalid,
        });

        Ok(true)
    }

    /// Property name, with the star or underscore hack stripped when enabled
    fn parse_property(&mut self) -> Option<PropertyName> {
        let mut hack = None;
        let mut location = None;

        if self.config.star_hack && self.stream.peek() == TokenType::Star {
            self.stream.get();
            hack = Some(PropertyHack::Star);
            location = Some(self.stream.token().start);
        }

        if !self.stream.match_token(&[TokenType::Ident]) {
            return None;
        }

        let token = self.stream.token();
        let mut name = token.value.as_str();

        if self.config.underscore_hack {
            if let Some(stripped) = name.strip_prefix('_') {
                hack = Some(PropertyHack::Underscore);
                name = stripped;
            }
        }

        let property = PropertyName::new(name, hack, location.unwrap_or(token.start));
        self.read_whitespace();

        Some(property)
    }

    fn parse_prio(&mut self) -> bool {
        let important = self.stream.match_token(&[TokenType::ImportantSym]);
        self.read_whitespace();
        important
    }
}

#[cfg(test)]
mod tests {
    use crate::event::{EventType, ParserEvent};
    use crate::node::PropertyHack;
    use crate::parser::test_support::{event_names, parse_events};
    use crate::parser_config::ParserConfig;
    use crate::Parser;

    fn properties(css: &str, config: ParserConfig) -> Vec<ParserEvent> {
        let (_, events) = parse_events(css, config);
        events
            .into_iter()
            .filter(|e| e.event_type() == EventType::Property)
            .collect()
    }

    #[test]
    fn declaration_fields() {
        let events = properties("a { color : red !important; width: 10 }", ParserConfig::default());
        assert_eq!(events.len(), 2);

        match &events[0] {
            ParserEvent::Property {
                property,
                value,
                important,
                invalid,
                location,
            } => {
                assert_eq!(property.text, "color");
                assert_eq!(value.text, "red");
                assert!(*important);
                assert!(invalid.is_none());
                assert_eq!(location.column, 5);
            }
            other => panic!("unexpected event {:?}", other),
        }

        match &events[1] {
            ParserEvent::Property { invalid, .. } => {
                let err = invalid.as_ref().expect("width: 10 is invalid");
                assert_eq!(
                    err.message,
                    "Expected (<length> | <percentage> | <content-sizing> | auto | inherit) but found '10'."
                );
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn broken_declaration_is_skipped() {
        let (result, events) = parse_events(
            "a { color: red; width: ; height: 1px }",
            ParserConfig::default(),
        );
        assert!(result.is_ok());
        assert_eq!(
            event_names(&events),
            vec![
                "startstylesheet",
                "startrule",
                "property",
                "error",
                "property",
                "endrule",
                "endstylesheet"
            ]
        );
    }

    #[test]
    fn star_hack() {
        let css = "a { *color: red }";
        assert!(properties(css, ParserConfig::default()).is_empty());

        let config = ParserConfig {
            star_hack: true,
            ..Default::default()
        };
        match &properties(css, config)[0] {
            ParserEvent::Property { property, invalid, .. } => {
                assert_eq!(property.hack, Some(PropertyHack::Star));
                assert_eq!(property.text, "color");
                assert_eq!(property.to_string(), "*color");
                assert!(invalid.is_none());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn underscore_hack() {
        let css = "a { _color: red }";
        match &properties(css, ParserConfig::default())[0] {
            ParserEvent::Property { property, invalid, .. } => {
                assert_eq!(property.text, "_color");
                assert_eq!(property.hack, None);
                assert_eq!(
                    invalid.as_ref().map(|e| e.message.as_str()),
                    Some("Unknown property '_color'.")
                );
            }
            other => panic!("unexpected event {:?}", other),
        }

        let config = ParserConfig {
            underscore_hack: true,
            ..Default::default()
        };
        match &properties(css, config)[0] {
            ParserEvent::Property { property, invalid, .. } => {
                assert_eq!(property.hack, Some(PropertyHack::Underscore));
                assert_eq!(property.text, "color");
                assert!(invalid.is_none());
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn style_attribute() {
        let mut names = Vec::new();
        {
            let mut parser = Parser::new(ParserConfig::default());
            parser.add_listener(EventType::Property, |event| {
                if let ParserEvent::Property { property, .. } = event {
                    names.push(property.text.clone());
                }
            });
            parser
                .parse_style_attribute("color: red; margin: 0 auto")
                .unwrap();
        }
        assert_eq!(names, vec!["color", "margin"]);
    }
}
