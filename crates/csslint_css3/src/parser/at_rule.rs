use crate::event::ParserEvent;
use crate::tokenizer::unquote;
use crate::tokens::TokenType;
use crate::Css3;
use csslint_shared::errors::CssResult;

/// Extracts the address from a STRING or URI token value: `"a.css"` and `url("a.css")` both give `a.css`
fn uri_value(text: &str) -> String {
    let inner = match text.get(..4) {
        Some(prefix) if prefix.eq_ignore_ascii_case("url(") => text[4..].trim_end_matches(')'),
        _ => text,
    };
    let inner = inner.trim();
    if inner.starts_with('"') || inner.starts_with('\'') {
        return unquote(inner);
    }
    inner.to_string()
}

impl Css3<'_, '_> {
    /// `@charset "UTF-8";`, only when the next token is a charset symbol
    pub(crate) fn parse_charset(&mut self) -> CssResult<()> {
        if !self.stream.match_token(&[TokenType::CharsetSym]) {
            return Ok(());
        }

        log::trace!("parse_charset");
        let location = self.stream.token().start;

        self.read_whitespace();
        let charset = self.consume(&[TokenType::String])?.value;
        self.read_whitespace();
        self.stream.must_match(&[TokenType::Semicolon])?;

        self.fire(ParserEvent::Charset { charset, location });
        Ok(())
    }

    /// `@import url(foo.css) screen, print;`
    pub(crate) fn parse_import(&mut self) -> CssResult<()> {
        log::trace!("parse_import");

        let location = self.consume(&[TokenType::ImportSym])?.start;
        self.read_whitespace();

        let uri = uri_value(&self.consume(&[TokenType::String, TokenType::Uri])?.value);
        self.read_whitespace();

        let media = self.parse_media_query_list()?;

        self.stream.must_match(&[TokenType::Semicolon])?;
        self.read_whitespace();

        self.fire(ParserEvent::Import { uri, media, location });
        Ok(())
    }

    /// `@namespace svg url(http://www.w3.org/2000/svg);`
    pub(crate) fn parse_namespace(&mut self) -> CssResult<()> {
        log::trace!("parse_namespace");

        let location = self.consume(&[TokenType::NamespaceSym])?.start;
        self.read_whitespace();

        let mut prefix = None;
        if self.stream.match_token(&[TokenType::Ident]) {
            prefix = Some(self.stream.token().value);
            self.read_whitespace();
        }

        let uri = uri_value(&self.consume(&[TokenType::String, TokenType::Uri])?.value);
        self.read_whitespace();

        self.stream.must_match(&[TokenType::Semicolon])?;
        self.read_whitespace();

        self.fire(ParserEvent::Namespace { prefix, uri, location });
        Ok(())
    }

    pub(crate) fn parse_font_face(&mut self) -> CssResult<()> {
        log::trace!("parse_font_face");

        let location = self.consume(&[TokenType::FontFaceSym])?.start;
        self.read_whitespace();

        self.fire(ParserEvent::StartFontFace { location });
        self.read_declarations(true, false)?;
        self.fire(ParserEvent::EndFontFace { location });

        Ok(())
    }

    pub(crate) fn parse_viewport(&mut self) -> CssResult<()> {
        log::trace!("parse_viewport");

        let location = self.consume(&[TokenType::ViewportSym])?.start;
        self.read_whitespace();

        self.fire(ParserEvent::StartViewport { location });
        self.read_declarations(true, false)?;
        self.fire(ParserEvent::EndViewport { location });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::uri_value;
    use crate::event::ParserEvent;
    use crate::parser::test_support::{event_names, parse_events};
    use crate::parser_config::ParserConfig;
    use test_case::test_case;

    #[test_case("\"foo.css\"", "foo.css")]
    #[test_case("'foo.css'", "foo.css")]
    #[test_case("url(\"foo.css\")", "foo.css")]
    #[test_case("URL('a b.css')", "a b.css")]
    #[test_case("url(bare.css)", "bare.css")]
    fn extracts_uri(text: &str, expected: &str) {
        assert_eq!(uri_value(text), expected);
    }

    #[test]
    fn charset_import_and_namespace() {
        let css = "@charset \"UTF-8\";\n@import url(foo.css) screen, print;\n@namespace svg \"http://www.w3.org/2000/svg\";\n";
        let (result, events) = parse_events(css, ParserConfig::default());
        assert!(result.is_ok());

        assert_eq!(
            event_names(&events),
            vec!["startstylesheet", "charset", "import", "namespace", "endstylesheet"]
        );

        match &events[1] {
            ParserEvent::Charset { charset, location } => {
                assert_eq!(charset, "\"UTF-8\"");
                assert_eq!(location.line, 1);
            }
            other => panic!("unexpected event {:?}", other),
        }

        match &events[2] {
            ParserEvent::Import { uri, media, location } => {
                assert_eq!(uri, "foo.css");
                assert_eq!(media.len(), 2);
                assert_eq!(media[0].text, "screen");
                assert_eq!(media[1].text, "print");
                assert_eq!(location.line, 2);
            }
            other => panic!("unexpected event {:?}", other),
        }

        match &events[3] {
            ParserEvent::Namespace { prefix, uri, .. } => {
                assert_eq!(prefix.as_deref(), Some("svg"));
                assert_eq!(uri, "http://www.w3.org/2000/svg");
            }
            other => panic!("unexpected event {:?}", other),
        }
    }

    #[test]
    fn font_face_and_viewport() {
        let (result, events) = parse_events(
            "@font-face { font-family: foo; src: url(foo.woff) } @viewport { width: device-width }",
            ParserConfig::default(),
        );
        assert!(result.is_ok());
        assert_eq!(
            event_names(&events),
            vec![
                "startstylesheet",
                "startfontface",
                "property",
                "property",
                "endfontface",
                "startviewport",
                "property",
                "endviewport",
                "endstylesheet"
            ]
        );
    }

    #[test]
    fn charset_without_string_is_an_error() {
        let (result, _) = parse_events("@charset utf-8;", ParserConfig::default());
        assert_eq!(result.unwrap_err().message, "Expected STRING at line 1, col 10.");
    }
}
