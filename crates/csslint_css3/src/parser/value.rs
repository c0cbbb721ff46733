use crate::node::{PropertyValue, PropertyValuePart};
use crate::tokens::{Token, TokenType};
use crate::Css3;
use csslint_shared::errors::{CssResult, SyntaxError};

/// Tokens that are a term on their own
const SIMPLE_TERMS: [TokenType; 12] = [
    TokenType::Number,
    TokenType::Percentage,
    TokenType::Length,
    TokenType::Angle,
    TokenType::Time,
    TokenType::Freq,
    TokenType::Dimension,
    TokenType::Resolution,
    TokenType::String,
    TokenType::Ident,
    TokenType::Uri,
    TokenType::UnicodeRange,
];

impl Css3<'_, '_> {
    /// `term [operator? term]*`. Inside function arguments `+`, `-` and `*` are operators too.
    pub(crate) fn parse_expr(&mut self, in_function: bool) -> CssResult<Option<PropertyValue>> {
        log::trace!("parse_expr");

        let Some(first) = self.parse_term(in_function)? else {
            return Ok(None);
        };

        let location = first.location;
        let mut parts = vec![first];

        loop {
            let operator = self.parse_operator(in_function);

            match self.parse_term(in_function)? {
                Some(term) => {
                    parts.extend(operator);
                    parts.push(term);
                }
                None => match operator {
                    Some(operator) => {
                        return Err(SyntaxError::new(
                            &format!(
                                "Unexpected token '{}' at line {}, col {}.",
                                operator.text, operator.location.line, operator.location.column
                            ),
                            operator.location,
                        ))
                    }
                    None => break,
                },
            }
        }

        Ok(Some(PropertyValue::new(parts, location)))
    }

    fn parse_operator(&mut self, in_function: bool) -> Option<PropertyValuePart> {
        let matched = if in_function {
            self.stream.match_token(&[
                TokenType::Slash,
                TokenType::Comma,
                TokenType::Plus,
                TokenType::Star,
                TokenType::Minus,
            ])
        } else {
            self.stream.match_token(&[TokenType::Slash, TokenType::Comma])
        };

        if !matched {
            return None;
        }

        let token = self.stream.token();
        self.read_whitespace();
        Some(PropertyValuePart::from_token(&token))
    }

    fn parse_unary_operator(&mut self) -> Option<Token> {
        if self.stream.match_token(&[TokenType::Minus, TokenType::Plus]) {
            return Some(self.stream.token());
        }
        None
    }

    fn parse_term(&mut self, in_function: bool) -> CssResult<Option<PropertyValuePart>> {
        let unary = self.parse_unary_operator();
        let mut location = unary.as_ref().map(|t| t.start);
        let value;

        if self.config.ie_filters && self.stream.peek() == TokenType::IeFunction {
            location.get_or_insert(self.stream.lt(1).start);
            value = self.parse_ie_function()?;
        } else if in_function
            && self
                .stream
                .match_token(&[TokenType::LParen, TokenType::LBrace, TokenType::LBracket])
        {
            let token = self.stream.token();
            location.get_or_insert(token.start);

            let mut text = token.value.clone();
            if let Some(inner) = self.parse_expr(in_function)? {
                text.push_str(&inner.text);
            }

            if let Some(end) = token.end_char() {
                let end_type = TokenType::from_literal(&end.to_string()).unwrap_or(TokenType::Char);
                self.stream.must_match(&[end_type])?;
                text.push(end);
            }
            self.read_whitespace();
            value = Some(text);
        } else if self.stream.match_token(&SIMPLE_TERMS) {
            let token = self.stream.token();
            self.read_whitespace();

            if unary.is_none() {
                return Ok(Some(PropertyValuePart::from_token(&token)));
            }
            value = Some(token.value);
        } else if let Some(token) = self.parse_hexcolor() {
            location.get_or_insert(token.start);
            value = Some(token.value);
        } else {
            location.get_or_insert(self.stream.lt(1).start);
            value = if self.config.ie_filters && self.stream.la(3) == TokenType::Equals {
                self.parse_ie_function()?
            } else {
                self.parse_function()?
            };
        }

        let Some(value) = value else {
            if let Some(unary) = unary {
                let token = self.stream.lt(1);
                log::debug!("dangling unary operator {}", unary.value);
                return Err(self.unexpected_token(&token));
            }
            return Ok(None);
        };

        let text = match &unary {
            Some(unary) => format!("{}{}", unary.value, value),
            None => value,
        };

        Ok(Some(PropertyValuePart::new(&text, location.unwrap_or_default())))
    }

    /// `name( expr )`. With IE filters enabled, `name(key=value, ...)` argument lists are accepted.
    fn parse_function(&mut self) -> CssResult<Option<String>> {
        if !self.stream.match_token(&[TokenType::Function]) {
            return Ok(None);
        }

        log::trace!("parse_function");

        let mut text = self.stream.token().value;
        text.push_str(&self.read_whitespace());

        if let Some(expr) = self.parse_expr(true)? {
            text.push_str(&expr.text);
        }

        if self.config.ie_filters && self.stream.peek() == TokenType::Equals {
            self.read_ie_arguments(&mut text);
        }

        self.stream.must_match(&[TokenType::RParen])?;
        text.push(')');
        self.read_whitespace();

        Ok(Some(text))
    }

    /// `progid:DXImageTransform.Microsoft.gradient(startColorstr='#000', endColorstr='#fff')` and
    /// `alpha(opacity=50)`
    fn parse_ie_function(&mut self) -> CssResult<Option<String>> {
        if !self
            .stream
            .match_token(&[TokenType::IeFunction, TokenType::Function])
        {
            return Ok(None);
        }

        log::trace!("parse_ie_function");

        let mut text = self.stream.token().value;
        self.read_ie_arguments(&mut text);

        self.stream.must_match(&[TokenType::RParen])?;
        text.push(')');
        self.read_whitespace();

        Ok(Some(text))
    }

    /// Raw `key=value` arguments, copied as written up to the closing paren
    fn read_ie_arguments(&mut self, text: &mut String) {
        loop {
            text.push_str(&self.read_whitespace());

            if self.stream.match_token(&[TokenType::Ident]) {
                text.push_str(&self.stream.token().value);
            }
            if self.stream.match_token(&[TokenType::Equals]) {
                text.push('=');
            }

            while !matches!(
                self.stream.peek(),
                TokenType::Comma | TokenType::S | TokenType::RParen | TokenType::Eof
            ) {
                self.stream.get();
                text.push_str(&self.stream.token().value);
            }

            if !self.stream.match_token(&[TokenType::Comma, TokenType::S]) {
                break;
            }
            text.push_str(&self.stream.token().value);
        }
    }

    /// A hash token used as a color. The digits are validated later, together with the value.
    fn parse_hexcolor(&mut self) -> Option<Token> {
        if !self.stream.match_token(&[TokenType::Hash]) {
            return None;
        }

        let token = self.stream.token();
        self.read_whitespace();
        Some(token)
    }
}

#[cfg(test)]
mod tests {
    use crate::node::PartKind;
    use crate::parser_config::ParserConfig;
    use crate::Parser;
    use test_case::test_case;

    fn texts(input: &str, config: ParserConfig) -> Vec<String> {
        let mut parser = Parser::new(config);
        let value = parser.parse_property_value(input).unwrap().unwrap();
        value.parts.into_iter().map(|p| p.text).collect()
    }

    #[test_case("1px solid red", &["1px", "solid", "red"])]
    #[test_case("-1px +2em", &["-1px", "+2em"])]
    #[test_case("Arial, sans-serif", &["Arial", ",", "sans-serif"])]
    #[test_case("12px/1.5 serif", &["12px", "/", "1.5", "serif"])]
    #[test_case("#fff url(\"a.png\")", &["#fff", "url(\"a.png\")"])]
    #[test_case("rgba(0, 0, 0, .5)", &["rgba(0 , 0 , 0 , .5)"])]
    #[test_case("calc(100% - 2 * 10px)", &["calc(100% - 2 * 10px)"])]
    #[test_case("U+0-7F", &["U+0-7F"])]
    fn value_parts(input: &str, expected: &[&str]) {
        assert_eq!(texts(input, ParserConfig::default()), expected);
    }

    #[test]
    fn part_kinds() {
        let mut parser = Parser::new(ParserConfig::default());
        let value = parser
            .parse_property_value("10px 50% 2 'x' bold #ABCDEF rgb(1,2,3)")
            .unwrap()
            .unwrap();
        let kinds: Vec<PartKind> = value.parts.iter().map(|p| p.kind).collect();
        assert_eq!(
            kinds,
            vec![
                PartKind::Length,
                PartKind::Percentage,
                PartKind::Integer,
                PartKind::String,
                PartKind::Identifier,
                PartKind::Color,
                PartKind::Color
            ]
        );
        assert!(value.parts[4].was_ident);
    }

    #[test]
    fn ie_filters() {
        let config = ParserConfig {
            ie_filters: true,
            ..Default::default()
        };
        assert_eq!(texts("alpha(opacity=50)", config.clone()), vec!["alpha(opacity=50)"]);
        assert_eq!(
            texts(
                "progid:DXImageTransform.Microsoft.gradient(startColorstr='#000', endColorstr='#fff')",
                config
            ),
            vec!["progid:DXImageTransform.Microsoft.gradient(startColorstr='#000', endColorstr='#fff')"]
        );

        let mut parser = Parser::new(ParserConfig::default());
        assert!(parser.parse_property_value("alpha(opacity=50)").is_err());
    }

    #[test]
    fn trailing_garbage() {
        let mut parser = Parser::new(ParserConfig::default());
        let err = parser.parse_property_value("red }").unwrap_err();
        assert_eq!(err.message, "Unexpected token '}' at line 1, col 5.");
    }

    #[test_case("Arial,", "Unexpected token ',' at line 1, col 6.")]
    #[test_case("12px /  ", "Unexpected token '/' at line 1, col 6.")]
    #[test_case("a, b,", "Unexpected token ',' at line 1, col 5.")]
    fn dangling_operator(input: &str, message: &str) {
        let mut parser = Parser::new(ParserConfig::default());
        let err = parser.parse_property_value(input).unwrap_err();
        assert_eq!(err.message, message);
    }

    #[test]
    fn empty_value() {
        let mut parser = Parser::new(ParserConfig::default());
        assert_eq!(parser.parse_property_value("  ").unwrap(), None);
    }
}
