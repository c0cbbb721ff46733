use crate::node::{
    Combinator, Selector, SelectorComponent, SelectorPart, SelectorSubPart, SubPartKind,
};
use crate::tokens::TokenType;
use crate::Css3;
use csslint_shared::errors::{CssResult, SyntaxError};
use csslint_shared::reader::Location;

/// Element name or universal selector, including any namespace prefix
struct ElementName {
    text: String,
    location: Location,
}

impl Css3<'_, '_> {
    /// A sequence of simple selectors separated by combinators. Whitespace is a descendant combinator
    /// unless an explicit combinator follows it.
    pub(crate) fn parse_selector(&mut self) -> CssResult<Option<Selector>> {
        log::trace!("parse_selector");

        let Some(first) = self.parse_simple_selector_sequence()? else {
            return Ok(None);
        };

        let location = first.location;
        let mut parts = vec![SelectorComponent::Part(first)];

        loop {
            if let Some(combinator) = self.parse_combinator() {
                parts.push(SelectorComponent::Combinator(combinator));
                match self.parse_simple_selector_sequence()? {
                    Some(next) => parts.push(SelectorComponent::Part(next)),
                    None => {
                        let token = self.stream.lt(1);
                        return Err(self.unexpected_token(&token));
                    }
                }
                continue;
            }

            if self.read_whitespace().is_empty() {
                break;
            }

            let ws = self.stream.token();
            let ws = Combinator::new(&ws.value, ws.start);
            let combinator = self.parse_combinator();

            match self.parse_simple_selector_sequence()? {
                Some(next) => {
                    parts.push(SelectorComponent::Combinator(combinator.unwrap_or(ws)));
                    parts.push(SelectorComponent::Part(next));
                }
                None if combinator.is_some() => {
                    let token = self.stream.lt(1);
                    return Err(self.unexpected_token(&token));
                }
                None => {}
            }
        }

        Ok(Some(Selector::new(parts, location)))
    }

    fn parse_combinator(&mut self) -> Option<Combinator> {
        if !self
            .stream
            .match_token(&[TokenType::Plus, TokenType::Greater, TokenType::Tilde])
        {
            return None;
        }

        let token = self.stream.token();
        self.read_whitespace();
        Some(Combinator::new(&token.value, token.start))
    }

    /// An optional element name followed by any number of id, class, attribute, pseudo and negation
    /// selectors. Stops at whitespace.
    fn parse_simple_selector_sequence(&mut self) -> CssResult<Option<SelectorPart>> {
        let location = self.stream.lt(1).start;

        let element = match self.parse_type_selector()? {
            Some(element) => Some(element),
            None => self.parse_universal()?,
        };

        let mut text = element.as_ref().map(|e| e.text.clone()).unwrap_or_default();
        let mut modifiers = Vec::new();

        while self.stream.peek() != TokenType::S {
            let Some(modifier) = self.parse_modifier()? else {
                break;
            };
            text.push_str(&modifier.text);
            modifiers.push(modifier);
        }

        if text.is_empty() {
            return Ok(None);
        }

        Ok(Some(SelectorPart::new(
            element.map(|e| e.text),
            modifiers,
            &text,
            location,
        )))
    }

    fn parse_modifier(&mut self) -> CssResult<Option<SelectorSubPart>> {
        if let Some(hash) = self.parse_hash() {
            return Ok(Some(hash));
        }
        if let Some(class) = self.parse_class()? {
            return Ok(Some(class));
        }
        if let Some(attrib) = self.parse_attrib()? {
            return Ok(Some(attrib));
        }
        if let Some(pseudo) = self.parse_pseudo()? {
            return Ok(Some(pseudo));
        }
        self.parse_negation()
    }

    fn parse_hash(&mut self) -> Option<SelectorSubPart> {
        if !self.stream.match_token(&[TokenType::Hash]) {
            return None;
        }
        let token = self.stream.token();
        Some(SelectorSubPart::new(&token.value, SubPartKind::Id, token.start))
    }

    fn parse_type_selector(&mut self) -> CssResult<Option<ElementName>> {
        let ns = self.parse_namespace_prefix()?;

        if !self.stream.match_token(&[TokenType::Ident]) {
            // give the namespace back so the universal selector can read it again
            if let Some(ns) = ns {
                self.stream.unget();
                if ns.len() > 1 {
                    self.stream.unget();
                }
            }
            return Ok(None);
        }

        let token = self.stream.token();
        let element = match ns {
            Some(ns) => ElementName {
                location: Location::new(
                    token.start.line,
                    token.start.column.saturating_sub(ns.chars().count()),
                    token.start.offset.saturating_sub(ns.len()),
                ),
                text: ns + &token.value,
            },
            None => ElementName {
                text: token.value,
                location: token.start,
            },
        };

        Ok(Some(element))
    }

    fn parse_universal(&mut self) -> CssResult<Option<ElementName>> {
        let location = self.stream.lt(1).start;
        let mut text = self.parse_namespace_prefix()?.unwrap_or_default();

        if self.stream.match_token(&[TokenType::Star]) {
            text.push('*');
        }

        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(ElementName { text, location }))
    }

    /// `ns|`, `*|` or `|`. Only read when a pipe is one of the next two tokens.
    fn parse_namespace_prefix(&mut self) -> CssResult<Option<String>> {
        if self.stream.la(1) != TokenType::Pipe && self.stream.la(2) != TokenType::Pipe {
            return Ok(None);
        }

        let mut value = String::new();
        if self.stream.match_token(&[TokenType::Ident, TokenType::Star]) {
            value.push_str(&self.stream.token().value);
        }

        self.stream.must_match(&[TokenType::Pipe])?;
        value.push('|');

        Ok(Some(value))
    }

    fn parse_class(&mut self) -> CssResult<Option<SelectorSubPart>> {
        if !self.stream.match_token(&[TokenType::Dot]) {
            return Ok(None);
        }

        let dot = self.stream.token();
        let token = self.consume(&[TokenType::Ident])?;
        Ok(Some(SelectorSubPart::new(
            &format!(".{}", token.value),
            SubPartKind::Class,
            dot.start,
        )))
    }

    /// `[ns|attr]`, `[attr=value]`, `[attr~="value"]` and the other match operators
    fn parse_attrib(&mut self) -> CssResult<Option<SelectorSubPart>> {
        if !self.stream.match_token(&[TokenType::LBracket]) {
            return Ok(None);
        }

        let start = self.stream.token();
        let mut value = start.value.clone();
        value.push_str(&self.read_whitespace());

        if let Some(ns) = self.parse_namespace_prefix()? {
            value.push_str(&ns);
        }

        value.push_str(&self.consume(&[TokenType::Ident])?.value);
        value.push_str(&self.read_whitespace());

        if self.stream.match_token(&[
            TokenType::PrefixMatch,
            TokenType::SuffixMatch,
            TokenType::SubstringMatch,
            TokenType::Equals,
            TokenType::Includes,
            TokenType::DashMatch,
        ]) {
            value.push_str(&self.stream.token().value);
            value.push_str(&self.read_whitespace());
            value.push_str(&self.consume(&[TokenType::Ident, TokenType::String])?.value);
            value.push_str(&self.read_whitespace());
        }

        self.stream.must_match(&[TokenType::RBracket])?;
        value.push(']');

        Ok(Some(SelectorSubPart::new(&value, SubPartKind::Attribute, start.start)))
    }

    /// `:hover`, `::before` or a functional pseudo-class such as `:nth-child(2n+1)`
    fn parse_pseudo(&mut self) -> CssResult<Option<SelectorSubPart>> {
        if !self.stream.match_token(&[TokenType::Colon]) {
            return Ok(None);
        }

        let colon = self.stream.token();
        let mut colons = String::from(":");
        if self.stream.match_token(&[TokenType::Colon]) {
            colons.push(':');
        }

        let pseudo = if self.stream.match_token(&[TokenType::Ident]) {
            Some(self.stream.token().value)
        } else if self.stream.match_token(&[TokenType::Function]) {
            let mut value = self.stream.token().value;
            value.push_str(&self.read_whitespace());
            value.push_str(&self.parse_expression().unwrap_or_default());
            self.stream.must_match(&[TokenType::RParen])?;
            value.push(')');
            Some(value)
        } else {
            None
        };

        match pseudo {
            Some(pseudo) => Ok(Some(SelectorSubPart::new(
                &format!("{}{}", colons, pseudo),
                SubPartKind::Pseudo,
                colon.start,
            ))),
            None => {
                let location = self.stream.lt(1).start;
                Err(SyntaxError::new(
                    &format!(
                        "Expected a `FUNCTION` or `IDENT` after colon at line {}, col {}.",
                        location.line, location.column
                    ),
                    location,
                ))
            }
        }
    }

    /// `:not(...)` with a single simple selector as argument
    fn parse_negation(&mut self) -> CssResult<Option<SelectorSubPart>> {
        if !self.stream.match_token(&[TokenType::Not]) {
            return Ok(None);
        }

        let token = self.stream.token();
        let mut value = token.value.clone();
        value.push_str(&self.read_whitespace());

        let arg = self.parse_negation_arg()?;
        value.push_str(&arg.text);
        value.push_str(&self.read_whitespace());

        self.stream.must_match(&[TokenType::RParen])?;
        value.push(')');

        let mut subpart = SelectorSubPart::new(&value, SubPartKind::Not, token.start);
        subpart.args.push(arg);
        Ok(Some(subpart))
    }

    fn parse_negation_arg(&mut self) -> CssResult<SelectorPart> {
        let location = self.stream.lt(1).start;

        let element = match self.parse_type_selector()? {
            Some(element) => Some(element),
            None => self.parse_universal()?,
        };
        if let Some(element) = element {
            let text = element.text.clone();
            return Ok(SelectorPart::new(Some(element.text), vec![], &text, location));
        }

        let modifier = match self.parse_hash() {
            Some(hash) => Some(hash),
            None => match self.parse_class()? {
                Some(class) => Some(class),
                None => match self.parse_attrib()? {
                    Some(attrib) => Some(attrib),
                    None => self.parse_pseudo()?,
                },
            },
        };

        match modifier {
            Some(modifier) => {
                let text = modifier.text.clone();
                Ok(SelectorPart::new(None, vec![modifier], &text, location))
            }
            None => {
                let token = self.stream.lt(1);
                Err(self.unexpected_token(&token))
            }
        }
    }
}
