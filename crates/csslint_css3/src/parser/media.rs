use crate::event::ParserEvent;
use crate::node::{MediaFeature, MediaQuery};
use crate::tokens::{Token, TokenType};
use crate::{Css3, RuleOutcome};
use csslint_shared::errors::CssResult;

impl Css3<'_, '_> {
    /// `@media screen, print { ... }`. Page, font-face, viewport and nested media rules are allowed
    /// inside the block.
    pub(crate) fn parse_media(&mut self) -> CssResult<()> {
        log::trace!("parse_media");

        let location = self.consume(&[TokenType::MediaSym])?.start;
        self.read_whitespace();

        let media = self.parse_media_query_list()?;

        self.stream.must_match(&[TokenType::LBrace])?;
        self.read_whitespace();

        self.fire(ParserEvent::StartMedia {
            media: media.clone(),
            location,
        });

        loop {
            match self.stream.peek() {
                TokenType::PageSym => self.parse_page()?,
                TokenType::FontFaceSym => self.parse_font_face()?,
                TokenType::ViewportSym => self.parse_viewport()?,
                TokenType::MediaSym => self.parse_media()?,
                _ => {
                    if self.parse_ruleset()? == RuleOutcome::Absent {
                        break;
                    }
                }
            }
        }

        self.stream.must_match(&[TokenType::RBrace])?;
        self.read_whitespace();

        self.fire(ParserEvent::EndMedia { media, location });
        Ok(())
    }

    pub(crate) fn parse_media_query_list(&mut self) -> CssResult<Vec<MediaQuery>> {
        log::trace!("parse_media_query_list");

        let mut list = Vec::new();
        self.read_whitespace();

        if matches!(self.stream.peek(), TokenType::Ident | TokenType::LParen) {
            list.extend(self.parse_media_query()?);
        }

        while self.stream.match_token(&[TokenType::Comma]) {
            self.read_whitespace();
            list.extend(self.parse_media_query()?);
        }

        Ok(list)
    }

    /// `[only | not]? type [and (feature)]*` or `(feature) [and (feature)]*`
    pub(crate) fn parse_media_query(&mut self) -> CssResult<Option<MediaQuery>> {
        log::trace!("parse_media_query");

        let mut modifier = None;
        let mut location = None;

        if self.stream.match_token(&[TokenType::Ident]) {
            let token = self.stream.token();
            let ident = token.value.to_lowercase();
            if ident == "only" || ident == "not" {
                modifier = Some(ident);
                location = Some(token.start);
            } else {
                self.stream.unget();
            }
        }

        self.read_whitespace();

        let mut media_type = None;
        let mut features = Vec::new();

        match self.stream.peek() {
            TokenType::Ident => {
                let token = self.parse_media_feature()?;
                location.get_or_insert(token.start);
                media_type = Some(token.value);
            }
            TokenType::LParen => {
                location.get_or_insert(self.stream.lt(1).start);
                features.push(self.parse_media_expression()?);
            }
            _ => {}
        }

        if media_type.is_none() && features.is_empty() {
            return Ok(None);
        }

        self.read_whitespace();
        while self.stream.match_token(&[TokenType::Ident]) {
            let token = self.stream.token();
            if !token.value.eq_ignore_ascii_case("and") {
                return Err(self.unexpected_token(&token));
            }
            self.read_whitespace();
            features.push(self.parse_media_expression()?);
        }

        Ok(Some(MediaQuery::new(
            modifier,
            media_type,
            features,
            location.unwrap_or_default(),
        )))
    }

    fn parse_media_feature(&mut self) -> CssResult<Token> {
        self.read_whitespace();
        self.consume(&[TokenType::Ident])
    }

    /// `( feature [: expression]? )`
    fn parse_media_expression(&mut self) -> CssResult<MediaFeature> {
        log::trace!("parse_media_expression");

        let location = self.consume(&[TokenType::LParen])?.start;
        self.read_whitespace();

        let name = self.parse_media_feature()?.value;
        self.read_whitespace();

        let mut value = None;
        if self.stream.match_token(&[TokenType::Colon]) {
            self.read_whitespace();
            value = self.parse_expression();
        }

        self.stream.must_match(&[TokenType::RParen])?;
        self.read_whitespace();

        Ok(MediaFeature::new(&name, value, location))
    }

    /// Loose sequence of value tokens as used in media features and functional pseudo-classes
    pub(crate) fn parse_expression(&mut self) -> Option<String> {
        let mut value = String::new();

        while self.stream.match_token(&[
            TokenType::Plus,
            TokenType::Minus,
            TokenType::Dimension,
            TokenType::Number,
            TokenType::String,
            TokenType::Ident,
            TokenType::Length,
            TokenType::Freq,
            TokenType::Angle,
            TokenType::Time,
            TokenType::Resolution,
            TokenType::Percentage,
            TokenType::Slash,
        ]) {
            value.push_str(&self.stream.token().value);
            value.push_str(&self.read_whitespace());
        }

        let value = value.trim_end();
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::event::ParserEvent;
    use crate::parser::test_support::{event_names, parse_events};
    use crate::parser_config::ParserConfig;
    use crate::Parser;
    use test_case::test_case;

    #[test]
    fn media_query_with_feature() {
        let mut parser = Parser::new(ParserConfig::default());
        let query = parser
            .parse_media_query("screen and (min-width: 768px)")
            .unwrap()
            .unwrap();

        assert_eq!(query.modifier, None);
        assert_eq!(query.media_type.as_deref(), Some("screen"));
        assert_eq!(query.features.len(), 1);
        assert_eq!(query.features[0].name, "min-width");
        assert_eq!(query.features[0].value.as_deref(), Some("768px"));
        assert_eq!(query.text, "screen and (min-width:768px)");
    }

    #[test_case("only screen", Some("only"), Some("screen"), 0)]
    #[test_case("NOT print and (color)", Some("not"), Some("print"), 1)]
    #[test_case("(orientation: landscape) and (max-width: 10em)", None, None, 2)]
    #[test_case("all and (-webkit-min-device-pixel-ratio: 1.5)", None, Some("all"), 1)]
    fn media_query_shapes(input: &str, modifier: Option<&str>, media_type: Option<&str>, features: usize) {
        let mut parser = Parser::new(ParserConfig::default());
        let query = parser.parse_media_query(input).unwrap().unwrap();
        assert_eq!(query.modifier.as_deref(), modifier);
        assert_eq!(query.media_type.as_deref(), media_type);
        assert_eq!(query.features.len(), features);
    }

    #[test]
    fn media_query_requires_and() {
        let mut parser = Parser::new(ParserConfig::default());
        let err = parser.parse_media_query("screen or (color)").unwrap_err();
        assert_eq!(err.message, "Unexpected token 'or' at line 1, col 8.");
    }

    #[test]
    fn media_block() {
        let css = "@media screen, print { a { color: red } @page { margin: 0 } }";
        let (result, events) = parse_events(css, ParserConfig::default());
        assert!(result.is_ok());
        assert_eq!(
            event_names(&events),
            vec![
                "startstylesheet",
                "startmedia",
                "startrule",
                "property",
                "endrule",
                "startpage",
                "property",
                "endpage",
                "endmedia",
                "endstylesheet"
            ]
        );

        match &events[1] {
            ParserEvent::StartMedia { media, .. } => {
                let texts: Vec<&str> = media.iter().map(|m| m.text.as_str()).collect();
                assert_eq!(texts, vec!["screen", "print"]);
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
