use crate::event::ParserEvent;
use crate::tokens::{TokenType, MARGIN_SYMS};
use crate::Css3;
use csslint_shared::errors::CssResult;

impl Css3<'_, '_> {
    /// `@page name:first { margin: 1in; @top-left { content: "x" } }`
    pub(crate) fn parse_page(&mut self) -> CssResult<()> {
        log::trace!("parse_page");

        let location = self.consume(&[TokenType::PageSym])?.start;
        self.read_whitespace();

        let mut id = None;
        if self.stream.match_token(&[TokenType::Ident]) {
            let token = self.stream.token();
            // "auto" is reserved and cannot name a page
            if token.value.eq_ignore_ascii_case("auto") {
                return Err(self.unexpected_token(&token));
            }
            id = Some(token.value);
        }

        let mut pseudo = None;
        if self.stream.peek() == TokenType::Colon {
            pseudo = Some(self.parse_pseudo_page()?);
        }

        self.read_whitespace();

        self.fire(ParserEvent::StartPage {
            id: id.clone(),
            pseudo: pseudo.clone(),
            location,
        });
        self.read_declarations(true, true)?;
        self.fire(ParserEvent::EndPage { id, pseudo, location });

        Ok(())
    }

    fn parse_pseudo_page(&mut self) -> CssResult<String> {
        self.stream.must_match(&[TokenType::Colon])?;
        Ok(self.consume(&[TokenType::Ident])?.value)
    }

    /// A margin box inside a page rule. Returns false when the next token is not a margin symbol.
    pub(crate) fn parse_margin(&mut self) -> CssResult<bool> {
        if !self.stream.match_token(&MARGIN_SYMS) {
            return Ok(false);
        }

        log::trace!("parse_margin");
        let token = self.stream.token();
        let margin = token.value.to_lowercase();

        self.fire(ParserEvent::StartPageMargin {
            margin: margin.clone(),
            location: token.start,
        });
        self.read_declarations(true, false)?;
        self.fire(ParserEvent::EndPageMargin {
            margin,
            location: token.start,
        });

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use crate::event::ParserEvent;
    use crate::parser::test_support::{event_names, parse_events};
    use crate::parser_config::ParserConfig;

    #[test]
    fn page_with_margin_boxes() {
        let css = "@page toc:first { margin: 1in; @top-left { content: \"x\" } size: a4 }";
        let (result, events) = parse_events(css, ParserConfig::default());
        assert!(result.is_ok());
        assert_eq!(
            event_names(&events),
            vec![
                "startstylesheet",
                "startpage",
                "property",
                "startpagemargin",
                "property",
                "endpagemargin",
                "property",
                "endpage",
                "endstylesheet"
            ]
        );

        match &events[1] {
            ParserEvent::StartPage { id, pseudo, .. } => {
                assert_eq!(id.as_deref(), Some("toc"));
                assert_eq!(pseudo.as_deref(), Some("first"));
            }
            other => panic!("unexpected event {:?}", other),
        }

        match &events[3] {
            ParserEvent::StartPageMargin { margin, .. } => assert_eq!(margin, "@top-left"),
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn anonymous_page() {
        let (_, events) = parse_events("@page :left { margin: 0 }", ParserConfig::default());
        match &events[1] {
            ParserEvent::StartPage { id, pseudo, .. } => {
                assert_eq!(*id, None);
                assert_eq!(pseudo.as_deref(), Some("left"));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn page_named_auto_is_rejected() {
        let (result, events) = parse_events("@page auto { margin: 0 }", ParserConfig::default());
        assert!(result.is_ok());
        let message = events.iter().find_map(|e| match e {
            ParserEvent::Error { message, .. } => Some(message.clone()),
            _ => None,
        });
        assert_eq!(message.as_deref(), Some("Unexpected token 'auto' at line 1, col 7."));
    }
}
