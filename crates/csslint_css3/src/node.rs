use crate::colors::{is_named_color, is_system_color, named_color, parse_hex, RgbColor};
use crate::specificity::Specificity;
use crate::tokenizer::unquote;
use crate::tokens::{Token, TokenType};
use csslint_shared::reader::Location;
use itertools::Itertools;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

/// Shared shape of every node the parser produces: the source text it was built from and where it starts.
pub trait Located {
    fn text(&self) -> &str;

    fn location(&self) -> Location;

    fn line(&self) -> usize {
        self.location().line
    }

    fn column(&self) -> usize {
        self.location().column
    }
}

macro_rules! located {
    ($($node:ty),+) => {
        $(
            impl Located for $node {
                fn text(&self) -> &str {
                    &self.text
                }

                fn location(&self) -> Location {
                    self.location
                }
            }

            impl fmt::Display for $node {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}", self.text)
                }
            }
        )+
    };
}

located!(
    PropertyValue,
    PropertyValuePart,
    Selector,
    SelectorPart,
    SelectorSubPart,
    Combinator,
    MediaQuery,
    MediaFeature
);

/// Browser hack that was stripped from a property name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyHack {
    /// `*color: red`
    Star,
    /// `_color: red`
    Underscore,
}

impl PropertyHack {
    pub fn as_char(&self) -> char {
        match self {
            PropertyHack::Star => '*',
            PropertyHack::Underscore => '_',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyName {
    /// Name without the hack character
    pub text: String,
    pub hack: Option<PropertyHack>,
    pub location: Location,
}

impl PropertyName {
    pub fn new(text: &str, hack: Option<PropertyHack>, location: Location) -> Self {
        Self {
            text: text.to_string(),
            hack,
            location,
        }
    }
}

impl Located for PropertyName {
    fn text(&self) -> &str {
        &self.text
    }

    fn location(&self) -> Location {
        self.location
    }
}

impl fmt::Display for PropertyName {
    /// Renders the name as written, including any hack character
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.hack {
            Some(hack) => write!(f, "{}{}", hack.as_char(), self.text),
            None => write!(f, "{}", self.text),
        }
    }
}

/// A complete property value, e.g. `1px solid red`
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValue {
    pub text: String,
    pub parts: Vec<PropertyValuePart>,
    pub location: Location,
}

impl PropertyValue {
    pub fn new(parts: Vec<PropertyValuePart>, location: Location) -> Self {
        Self {
            text: parts.iter().map(|p| p.text.as_str()).join(" "),
            parts,
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartKind {
    Number,
    Integer,
    Percentage,
    Length,
    Angle,
    Time,
    Frequency,
    Resolution,
    Dimension,
    Color,
    Uri,
    Function,
    String,
    Identifier,
    Operator,
    Unknown,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PartKind::Number => "number",
            PartKind::Integer => "integer",
            PartKind::Percentage => "percentage",
            PartKind::Length => "length",
            PartKind::Angle => "angle",
            PartKind::Time => "time",
            PartKind::Frequency => "frequency",
            PartKind::Resolution => "resolution",
            PartKind::Dimension => "dimension",
            PartKind::Color => "color",
            PartKind::Uri => "uri",
            PartKind::Function => "function",
            PartKind::String => "string",
            PartKind::Identifier => "identifier",
            PartKind::Operator => "operator",
            PartKind::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Channels of a color part
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColorValue {
    Rgb(RgbColor),
    Hsl {
        hue: f64,
        saturation: f64,
        lightness: f64,
        alpha: f64,
    },
}

/// Builds one of the classification patterns below, which are all literals
#[allow(clippy::expect_used)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid classification pattern")
}

lazy_static! {
    static ref DIMENSION: Regex = regex(r"(?i)^([+-]?[\d.]+)([a-z]+)$");
    static ref PERCENTAGE: Regex = regex(r"^([+-]?[\d.]+)%$");
    static ref INTEGER: Regex = regex(r"^([+-]?\d+)$");
    static ref NUMBER: Regex = regex(r"^([+-]?[\d.]+)$");
    static ref HEX: Regex = regex(r"(?i)^#[a-f0-9]+$");
    static ref RGB: Regex = regex(r"(?i)^rgb\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*\)");
    static ref RGB_PERCENT: Regex = regex(r"(?i)^rgb\(\s*(\d+)%\s*,\s*(\d+)%\s*,\s*(\d+)%\s*\)");
    static ref RGBA: Regex = regex(r"(?i)^rgba\(\s*(\d+)\s*,\s*(\d+)\s*,\s*(\d+)\s*,\s*([\d.]+)\s*\)");
    static ref RGBA_PERCENT: Regex = regex(r"(?i)^rgba\(\s*(\d+)%\s*,\s*(\d+)%\s*,\s*(\d+)%\s*,\s*([\d.]+)\s*\)");
    static ref HSL: Regex = regex(r"(?i)^hsl\(\s*(\d+)\s*,\s*(\d+)%\s*,\s*(\d+)%\s*\)");
    static ref HSLA: Regex = regex(r"(?i)^hsla\(\s*(\d+)\s*,\s*(\d+)%\s*,\s*(\d+)%\s*,\s*([\d.]+)\s*\)");
    static ref URI: Regex = regex(r#"(?i)^url\(("([^\\"]|\\.)*")\)"#);
    static ref FUNCTION: Regex = regex(r"^([^(]+)\(");
    static ref IDENTIFIER: Regex = regex(r"(?i)^-?[a-z_\x{00A0}-\x{FFFF}][a-z0-9\-_\x{00A0}-\x{FFFF}]*$");
}

/// One space or operator separated piece of a property value, classified by its text
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyValuePart {
    pub text: String,
    pub kind: PartKind,
    /// Numeric value for numbers, percentages and dimensions
    pub value: Option<f64>,
    pub units: Option<String>,
    pub color: Option<ColorValue>,
    /// Function name, without the paren
    pub name: Option<String>,
    /// Unquoted URL of a `url()` part
    pub uri: Option<String>,
    /// Unquoted contents of a string part
    pub string: Option<String>,
    /// The part was produced from an IDENT token
    pub was_ident: bool,
    pub location: Location,
}

impl PropertyValuePart {
    pub fn new(text: &str, location: Location) -> Self {
        let mut part = Self {
            text: text.to_string(),
            kind: PartKind::Unknown,
            value: None,
            units: None,
            color: None,
            name: None,
            uri: None,
            string: None,
            was_ident: false,
            location,
        };
        part.classify();
        part
    }

    /// Builds a part from a single token. Identifier tokens keep that information so escaped names are
    /// still recognized as identifiers.
    pub fn from_token(token: &Token) -> Self {
        let mut part = Self::new(&token.value, token.start);
        part.was_ident = token.token_type == TokenType::Ident;
        part
    }

    fn classify(&mut self) {
        let text = self.text.clone();

        if let Some(caps) = DIMENSION.captures(&text) {
            let units = caps[2].to_string();
            self.value = caps[1].parse().ok();
            self.kind = match units.to_ascii_lowercase().as_str() {
                "em" | "rem" | "ex" | "px" | "cm" | "mm" | "in" | "pt" | "pc" | "ch" | "vh" | "vw" | "vmax"
                | "vmin" => PartKind::Length,
                "deg" | "rad" | "grad" | "turn" => PartKind::Angle,
                "ms" | "s" => PartKind::Time,
                "hz" | "khz" => PartKind::Frequency,
                "dpi" | "dpcm" => PartKind::Resolution,
                _ => PartKind::Dimension,
            };
            self.units = Some(units);
        } else if let Some(caps) = PERCENTAGE.captures(&text) {
            self.kind = PartKind::Percentage;
            self.value = caps[1].parse().ok();
        } else if let Some(caps) = INTEGER.captures(&text) {
            self.kind = PartKind::Integer;
            self.value = caps[1].parse().ok();
        } else if let Some(caps) = NUMBER.captures(&text) {
            self.kind = PartKind::Number;
            self.value = caps[1].parse().ok();
        } else if HEX.is_match(&text) {
            if let Some(color) = parse_hex(&text) {
                self.kind = PartKind::Color;
                self.color = Some(ColorValue::Rgb(color));
            }
        } else if let Some(color) = parse_color_function(&text) {
            self.kind = PartKind::Color;
            self.color = Some(color);
        } else if let Some(caps) = URI.captures(&text) {
            self.kind = PartKind::Uri;
            self.uri = Some(unquote(&caps[1]));
        } else if let Some(caps) = FUNCTION.captures(&text) {
            self.kind = PartKind::Function;
            self.name = Some(caps[1].to_string());
        } else if is_quoted(&text) {
            self.kind = PartKind::String;
            self.string = Some(unquote(&text));
        } else if is_named_color(&text) {
            self.kind = PartKind::Color;
            self.color = named_color(&text).map(ColorValue::Rgb);
        } else if is_system_color(&text) {
            self.kind = PartKind::Color;
        } else if text == "," || text == "/" {
            self.kind = PartKind::Operator;
        } else if IDENTIFIER.is_match(&text) {
            self.kind = PartKind::Identifier;
        }
    }
}

fn channel(caps: &regex::Captures, idx: usize) -> f64 {
    caps.get(idx)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(0.0)
}

fn parse_color_function(text: &str) -> Option<ColorValue> {
    if let Some(caps) = RGB.captures(text) {
        return Some(ColorValue::Rgb(RgbColor::new(
            channel(&caps, 1),
            channel(&caps, 2),
            channel(&caps, 3),
            1.0,
        )));
    }
    if let Some(caps) = RGB_PERCENT.captures(text) {
        return Some(ColorValue::Rgb(RgbColor::new(
            channel(&caps, 1) * 255.0 / 100.0,
            channel(&caps, 2) * 255.0 / 100.0,
            channel(&caps, 3) * 255.0 / 100.0,
            1.0,
        )));
    }
    if let Some(caps) = RGBA.captures(text) {
        return Some(ColorValue::Rgb(RgbColor::new(
            channel(&caps, 1),
            channel(&caps, 2),
            channel(&caps, 3),
            channel(&caps, 4),
        )));
    }
    if let Some(caps) = RGBA_PERCENT.captures(text) {
        return Some(ColorValue::Rgb(RgbColor::new(
            channel(&caps, 1) * 255.0 / 100.0,
            channel(&caps, 2) * 255.0 / 100.0,
            channel(&caps, 3) * 255.0 / 100.0,
            channel(&caps, 4),
        )));
    }
    if let Some(caps) = HSL.captures(text) {
        return Some(ColorValue::Hsl {
            hue: channel(&caps, 1),
            saturation: channel(&caps, 2) / 100.0,
            lightness: channel(&caps, 3) / 100.0,
            alpha: 1.0,
        });
    }
    if let Some(caps) = HSLA.captures(text) {
        return Some(ColorValue::Hsl {
            hue: channel(&caps, 1),
            saturation: channel(&caps, 2) / 100.0,
            lightness: channel(&caps, 3) / 100.0,
            alpha: channel(&caps, 4),
        });
    }
    None
}

fn is_quoted(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) => (first == '"' || first == '\'') && first == last,
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombinatorKind {
    Descendant,
    Child,
    AdjacentSibling,
    Sibling,
    Unknown,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Combinator {
    pub text: String,
    pub kind: CombinatorKind,
    pub location: Location,
}

impl Combinator {
    pub fn new(text: &str, location: Location) -> Self {
        let kind = if text.trim().is_empty() {
            CombinatorKind::Descendant
        } else {
            match text {
                ">" => CombinatorKind::Child,
                "+" => CombinatorKind::AdjacentSibling,
                "~" => CombinatorKind::Sibling,
                _ => CombinatorKind::Unknown,
            }
        };

        Self {
            text: text.to_string(),
            kind,
            location,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubPartKind {
    Id,
    Class,
    Attribute,
    Pseudo,
    Not,
}

/// A modifier of a simple selector: `#id`, `.class`, `[attr]`, `:pseudo` or `:not(...)`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorSubPart {
    pub text: String,
    pub kind: SubPartKind,
    /// Negated selector of a `:not(...)`
    pub args: Vec<SelectorPart>,
    pub location: Location,
}

impl SelectorSubPart {
    pub fn new(text: &str, kind: SubPartKind, location: Location) -> Self {
        Self {
            text: text.to_string(),
            kind,
            args: vec![],
            location,
        }
    }
}

/// A simple selector sequence such as `div.foo#bar:hover`
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorPart {
    pub text: String,
    /// Element name including any namespace prefix, `*` for the universal selector
    pub element_name: Option<String>,
    pub modifiers: Vec<SelectorSubPart>,
    pub location: Location,
}

impl SelectorPart {
    pub fn new(
        element_name: Option<String>,
        modifiers: Vec<SelectorSubPart>,
        text: &str,
        location: Location,
    ) -> Self {
        Self {
            text: text.to_string(),
            element_name,
            modifiers,
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectorComponent {
    Part(SelectorPart),
    Combinator(Combinator),
}

impl SelectorComponent {
    pub fn text(&self) -> &str {
        match self {
            SelectorComponent::Part(part) => &part.text,
            SelectorComponent::Combinator(combinator) => &combinator.text,
        }
    }
}

/// A full selector. Specificity is computed once, when the selector is created. The text puts
/// single spaces around combinators.
#[derive(Debug, Clone, PartialEq)]
pub struct Selector {
    pub text: String,
    pub parts: Vec<SelectorComponent>,
    pub specificity: Specificity,
    pub location: Location,
}

impl Selector {
    pub fn new(parts: Vec<SelectorComponent>, location: Location) -> Self {
        let text = parts
            .iter()
            .map(|p| match p {
                SelectorComponent::Combinator(c) if c.kind != CombinatorKind::Descendant => {
                    format!(" {} ", c.text)
                }
                SelectorComponent::Combinator(_) => " ".to_string(),
                SelectorComponent::Part(part) => part.text.clone(),
            })
            .join("");
        let specificity = Specificity::from(parts.as_slice());

        Self {
            text,
            parts,
            specificity,
            location,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MediaFeature {
    pub text: String,
    pub name: String,
    pub value: Option<String>,
    pub location: Location,
}

impl MediaFeature {
    pub fn new(name: &str, value: Option<String>, location: Location) -> Self {
        let text = match &value {
            Some(value) => format!("({}:{})", name, value),
            None => format!("({})", name),
        };

        Self {
            text,
            name: name.to_string(),
            value,
            location,
        }
    }
}

/// A single media query, e.g. `only screen and (min-width: 768px)`
#[derive(Debug, Clone, PartialEq)]
pub struct MediaQuery {
    pub text: String,
    pub modifier: Option<String>,
    pub media_type: Option<String>,
    pub features: Vec<MediaFeature>,
    pub location: Location,
}

impl MediaQuery {
    pub fn new(
        modifier: Option<String>,
        media_type: Option<String>,
        features: Vec<MediaFeature>,
        location: Location,
    ) -> Self {
        let head = [modifier.as_deref(), media_type.as_deref()]
            .into_iter()
            .flatten()
            .join(" ");
        let tail = features.iter().map(|f| f.text.as_str());
        let text = std::iter::once(head.as_str())
            .filter(|h| !h.is_empty())
            .chain(tail)
            .join(" and ");

        Self {
            text,
            modifier,
            media_type,
            features,
            location,
        }
    }
}
