use crate::event::ParserEvent;
use crate::node::PropertyValuePart;
use crate::tokens::TokenType;
use crate::Css3;
use csslint_shared::errors::CssResult;

/// Vendor prefix of a keyframes symbol: `@-webkit-keyframes` gives `webkit`
fn vendor_prefix(symbol: &str) -> Option<String> {
    let rest = symbol.strip_prefix("@-")?;
    let (prefix, _) = rest.split_once('-')?;
    if prefix.is_empty() {
        return None;
    }
    Some(prefix.to_string())
}

impl Css3<'_, '_> {
    /// `@keyframes name { from { ... } 50% { ... } to { ... } }`
    pub(crate) fn parse_keyframes(&mut self) -> CssResult<()> {
        log::trace!("parse_keyframes");

        let token = self.consume(&[TokenType::KeyframesSym])?;
        let prefix = vendor_prefix(&token.value);
        self.read_whitespace();

        let name = self.consume(&[TokenType::Ident, TokenType::String])?.value;
        self.read_whitespace();

        self.stream.must_match(&[TokenType::LBrace])?;

        self.fire(ParserEvent::StartKeyframes {
            name: name.clone(),
            prefix: prefix.clone(),
            location: token.start,
        });

        self.read_whitespace();
        while matches!(self.stream.peek(), TokenType::Ident | TokenType::Percentage) {
            self.parse_keyframe_rule()?;
            self.read_whitespace();
        }

        self.fire(ParserEvent::EndKeyframes {
            name,
            prefix,
            location: token.start,
        });

        self.read_whitespace();
        self.stream.must_match(&[TokenType::RBrace])?;
        self.read_whitespace();

        Ok(())
    }

    fn parse_keyframe_rule(&mut self) -> CssResult<()> {
        log::trace!("parse_keyframe_rule");

        let keys = self.parse_key_list()?;
        let location = keys.first().map(|k| k.location).unwrap_or_default();

        self.fire(ParserEvent::StartKeyframeRule {
            keys: keys.clone(),
            location,
        });
        self.read_declarations(true, false)?;
        self.fire(ParserEvent::EndKeyframeRule { keys, location });

        Ok(())
    }

    fn parse_key_list(&mut self) -> CssResult<Vec<PropertyValuePart>> {
        let mut keys = vec![self.parse_key()?];
        self.read_whitespace();

        while self.stream.match_token(&[TokenType::Comma]) {
            self.read_whitespace();
            keys.push(self.parse_key()?);
            self.read_whitespace();
        }

        Ok(keys)
    }

    /// A percentage, `from` or `to`
    fn parse_key(&mut self) -> CssResult<PropertyValuePart> {
        if self.stream.match_token(&[TokenType::Percentage]) {
            return Ok(PropertyValuePart::from_token(&self.stream.token()));
        }

        if self.stream.match_token(&[TokenType::Ident]) {
            let token = self.stream.token();
            if token.value.eq_ignore_ascii_case("from") || token.value.eq_ignore_ascii_case("to") {
                return Ok(PropertyValuePart::from_token(&token));
            }
            self.stream.unget();
        }

        let token = self.stream.lt(1);
        Err(self.unexpected_token(&token))
    }
}
