//! CSS3 parser that reports what it finds as a stream of [`event::ParserEvent`]s, and validates every
//! declared property value against the grammar of its property.
use crate::event::{EventTarget, EventType, ParserEvent};
use crate::node::{MediaQuery, PropertyValue, Selector};
use crate::parser_config::ParserConfig;
use crate::token_stream::TokenStream;
use crate::tokenizer::Tokenizer;
use csslint_shared::errors::CssResult;

pub mod colors;
pub mod event;
pub mod node;
pub mod parser;
pub mod parser_config;
pub mod specificity;
pub mod token_stream;
pub mod tokenizer;
pub mod tokens;
pub mod validation;

/// Parser state for a single input. Grammar productions are implemented on this struct in the
/// `parser` modules.
pub struct Css3<'p, 'l> {
    /// Token stream over the input
    pub(crate) stream: TokenStream<Tokenizer>,
    /// The parser configuration as given
    pub(crate) config: &'p ParserConfig,
    /// Listeners that receive the events
    pub(crate) events: &'p mut EventTarget<'l>,
}

impl<'p, 'l> Css3<'p, 'l> {
    fn new(input: &str, config: &'p ParserConfig, events: &'p mut EventTarget<'l>) -> Self {
        Self {
            stream: TokenStream::new(Tokenizer::new(input)),
            config,
            events,
        }
    }
}

/// What [`Parser::parse_rule`] found
#[derive(Debug, Clone, PartialEq)]
pub enum RuleOutcome {
    /// A complete rule with these selectors
    Parsed(Vec<Selector>),
    /// The selectors were broken; an error was reported and the rule skipped
    Recovered,
    /// There was no rule at all
    Absent,
}

/// Event driven CSS parser.
///
/// A parser can be reused for several inputs, but every parse call runs on its own fresh token stream.
///
/// ```
/// use csslint_css3::event::{EventType, ParserEvent};
/// use csslint_css3::parser_config::ParserConfig;
/// use csslint_css3::Parser;
///
/// let mut invalid = Vec::new();
/// {
///     let mut parser = Parser::new(ParserConfig::default());
///     parser.add_listener(EventType::Property, |event| {
///         if let ParserEvent::Property { invalid: Some(err), .. } = event {
///             invalid.push(err.message.clone());
///         }
///     });
///     parser.parse("a { width: 10; }").unwrap();
/// }
/// assert_eq!(invalid.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct Parser<'l> {
    config: ParserConfig,
    events: EventTarget<'l>,
}

impl<'l> Parser<'l> {
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            events: EventTarget::new(),
        }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Subscribes a listener to a single event type
    pub fn add_listener(&mut self, event_type: EventType, listener: impl FnMut(&ParserEvent) + 'l) {
        self.events.add_listener(event_type, listener);
    }

    /// Subscribes a listener to every event
    pub fn add_any_listener(&mut self, listener: impl FnMut(&ParserEvent) + 'l) {
        self.events.add_any_listener(listener);
    }

    fn css3<'p>(&'p mut self, input: &str) -> Css3<'p, 'l> {
        Css3::new(input, &self.config, &mut self.events)
    }

    /// Parses a complete stylesheet. All results are reported through events.
    pub fn parse(&mut self, input: &str) -> CssResult<()> {
        if let Some(source) = &self.config.source {
            log::debug!("parsing stylesheet {}", source);
        }
        self.css3(input).parse_stylesheet()
    }

    pub fn parse_style_sheet(&mut self, input: &str) -> CssResult<()> {
        self.parse(input)
    }

    /// Parses a single media query such as `screen and (min-width: 768px)`
    pub fn parse_media_query(&mut self, input: &str) -> CssResult<Option<MediaQuery>> {
        let mut css3 = self.css3(input);
        css3.read_whitespace();
        let query = css3.parse_media_query()?;
        css3.read_whitespace();
        css3.verify_end()?;
        Ok(query)
    }

    /// Parses a property value such as `1px solid red`
    pub fn parse_property_value(&mut self, input: &str) -> CssResult<Option<PropertyValue>> {
        let mut css3 = self.css3(input);
        css3.read_whitespace();
        let value = css3.parse_expr(false)?;
        css3.read_whitespace();
        css3.verify_end()?;
        Ok(value)
    }

    /// Parses a single rule, firing its events
    pub fn parse_rule(&mut self, input: &str) -> CssResult<RuleOutcome> {
        let mut css3 = self.css3(input);
        css3.read_whitespace();
        let outcome = css3.parse_ruleset()?;
        css3.read_whitespace();
        css3.verify_end()?;
        Ok(outcome)
    }

    /// Parses a single selector such as `ul > li.active`
    pub fn parse_selector(&mut self, input: &str) -> CssResult<Option<Selector>> {
        let mut css3 = self.css3(input);
        css3.read_whitespace();
        let selector = css3.parse_selector()?;
        css3.read_whitespace();
        css3.verify_end()?;
        Ok(selector)
    }

    /// Parses the contents of a `style` attribute, firing a property event per declaration
    pub fn parse_style_attribute(&mut self, input: &str) -> CssResult<()> {
        let input = format!("{}}}", input);
        self.css3(&input).read_declarations(false, false)
    }
}
