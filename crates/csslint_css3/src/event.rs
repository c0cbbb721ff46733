use crate::node::{MediaQuery, PropertyName, PropertyValue, PropertyValuePart, Selector};
use csslint_shared::errors::{SyntaxError, ValidationError};
use csslint_shared::reader::Location;
use std::collections::HashMap;
use std::fmt;
use std::fmt::Debug;

/// Names of the events the parser fires, used to subscribe listeners
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    StartStylesheet,
    EndStylesheet,
    Charset,
    Import,
    Namespace,
    StartMedia,
    EndMedia,
    StartPage,
    EndPage,
    StartPageMargin,
    EndPageMargin,
    StartFontFace,
    EndFontFace,
    StartViewport,
    EndViewport,
    StartKeyframes,
    EndKeyframes,
    StartKeyframeRule,
    EndKeyframeRule,
    StartRule,
    EndRule,
    Property,
    Error,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventType::StartStylesheet => "startstylesheet",
            EventType::EndStylesheet => "endstylesheet",
            EventType::Charset => "charset",
            EventType::Import => "import",
            EventType::Namespace => "namespace",
            EventType::StartMedia => "startmedia",
            EventType::EndMedia => "endmedia",
            EventType::StartPage => "startpage",
            EventType::EndPage => "endpage",
            EventType::StartPageMargin => "startpagemargin",
            EventType::EndPageMargin => "endpagemargin",
            EventType::StartFontFace => "startfontface",
            EventType::EndFontFace => "endfontface",
            EventType::StartViewport => "startviewport",
            EventType::EndViewport => "endviewport",
            EventType::StartKeyframes => "startkeyframes",
            EventType::EndKeyframes => "endkeyframes",
            EventType::StartKeyframeRule => "startkeyframerule",
            EventType::EndKeyframeRule => "endkeyframerule",
            EventType::StartRule => "startrule",
            EventType::EndRule => "endrule",
            EventType::Property => "property",
            EventType::Error => "error",
        };
        write!(f, "{}", name)
    }
}

/// Structural event fired while parsing. Every event carries the location it starts at.
#[derive(Debug, Clone, PartialEq)]
pub enum ParserEvent {
    StartStylesheet {
        location: Location,
    },
    EndStylesheet {
        location: Location,
    },
    Charset {
        charset: String,
        location: Location,
    },
    Import {
        uri: String,
        media: Vec<MediaQuery>,
        location: Location,
    },
    Namespace {
        prefix: Option<String>,
        uri: String,
        location: Location,
    },
    StartMedia {
        media: Vec<MediaQuery>,
        location: Location,
    },
    EndMedia {
        media: Vec<MediaQuery>,
        location: Location,
    },
    StartPage {
        id: Option<String>,
        pseudo: Option<String>,
        location: Location,
    },
    EndPage {
        id: Option<String>,
        pseudo: Option<String>,
        location: Location,
    },
    StartPageMargin {
        margin: String,
        location: Location,
    },
    EndPageMargin {
        margin: String,
        location: Location,
    },
    StartFontFace {
        location: Location,
    },
    EndFontFace {
        location: Location,
    },
    StartViewport {
        location: Location,
    },
    EndViewport {
        location: Location,
    },
    StartKeyframes {
        name: String,
        prefix: Option<String>,
        location: Location,
    },
    EndKeyframes {
        name: String,
        prefix: Option<String>,
        location: Location,
    },
    StartKeyframeRule {
        keys: Vec<PropertyValuePart>,
        location: Location,
    },
    EndKeyframeRule {
        keys: Vec<PropertyValuePart>,
        location: Location,
    },
    StartRule {
        selectors: Vec<Selector>,
        location: Location,
    },
    EndRule {
        selectors: Vec<Selector>,
        location: Location,
    },
    Property {
        property: PropertyName,
        value: PropertyValue,
        important: bool,
        /// Set when the value does not match the grammar of the property
        invalid: Option<ValidationError>,
        location: Location,
    },
    Error {
        error: Option<SyntaxError>,
        message: String,
        location: Location,
    },
}

impl ParserEvent {
    pub fn event_type(&self) -> EventType {
        match self {
            ParserEvent::StartStylesheet { .. } => EventType::StartStylesheet,
            ParserEvent::EndStylesheet { .. } => EventType::EndStylesheet,
            ParserEvent::Charset { .. } => EventType::Charset,
            ParserEvent::Import { .. } => EventType::Import,
            ParserEvent::Namespace { .. } => EventType::Namespace,
            ParserEvent::StartMedia { .. } => EventType::StartMedia,
            ParserEvent::EndMedia { .. } => EventType::EndMedia,
            ParserEvent::StartPage { .. } => EventType::StartPage,
            ParserEvent::EndPage { .. } => EventType::EndPage,
            ParserEvent::StartPageMargin { .. } => EventType::StartPageMargin,
            ParserEvent::EndPageMargin { .. } => EventType::EndPageMargin,
            ParserEvent::StartFontFace { .. } => EventType::StartFontFace,
            ParserEvent::EndFontFace { .. } => EventType::EndFontFace,
            ParserEvent::StartViewport { .. } => EventType::StartViewport,
            ParserEvent::EndViewport { .. } => EventType::EndViewport,
            ParserEvent::StartKeyframes { .. } => EventType::StartKeyframes,
            ParserEvent::EndKeyframes { .. } => EventType::EndKeyframes,
            ParserEvent::StartKeyframeRule { .. } => EventType::StartKeyframeRule,
            ParserEvent::EndKeyframeRule { .. } => EventType::EndKeyframeRule,
            ParserEvent::StartRule { .. } => EventType::StartRule,
            ParserEvent::EndRule { .. } => EventType::EndRule,
            ParserEvent::Property { .. } => EventType::Property,
            ParserEvent::Error { .. } => EventType::Error,
        }
    }

    pub fn location(&self) -> Location {
        match self {
            ParserEvent::StartStylesheet { location }
            | ParserEvent::EndStylesheet { location }
            | ParserEvent::Charset { location, .. }
            | ParserEvent::Import { location, .. }
            | ParserEvent::Namespace { location, .. }
            | ParserEvent::StartMedia { location, .. }
            | ParserEvent::EndMedia { location, .. }
            | ParserEvent::StartPage { location, .. }
            | ParserEvent::EndPage { location, .. }
            | ParserEvent::StartPageMargin { location, .. }
            | ParserEvent::EndPageMargin { location, .. }
            | ParserEvent::StartFontFace { location }
            | ParserEvent::EndFontFace { location }
            | ParserEvent::StartViewport { location }
            | ParserEvent::EndViewport { location }
            | ParserEvent::StartKeyframes { location, .. }
            | ParserEvent::EndKeyframes { location, .. }
            | ParserEvent::StartKeyframeRule { location, .. }
            | ParserEvent::EndKeyframeRule { location, .. }
            | ParserEvent::StartRule { location, .. }
            | ParserEvent::EndRule { location, .. }
            | ParserEvent::Property { location, .. }
            | ParserEvent::Error { location, .. } => *location,
        }
    }
}

type Listener<'l> = Box<dyn FnMut(&ParserEvent) + 'l>;

/// Keeps the listeners per event type and calls them, in the order they were added, when an event fires
#[derive(Default)]
pub struct EventTarget<'l> {
    listeners: HashMap<EventType, Vec<Listener<'l>>>,
    /// Listeners that receive every event
    any: Vec<Listener<'l>>,
}

impl<'l> EventTarget<'l> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_listener(&mut self, event_type: EventType, listener: impl FnMut(&ParserEvent) + 'l) {
        self.listeners
            .entry(event_type)
            .or_default()
            .push(Box::new(listener));
    }

    pub fn add_any_listener(&mut self, listener: impl FnMut(&ParserEvent) + 'l) {
        self.any.push(Box::new(listener));
    }

    pub fn fire(&mut self, event: ParserEvent) {
        log::trace!("fire {} at {:?}", event.event_type(), event.location());

        if let Some(listeners) = self.listeners.get_mut(&event.event_type()) {
            for listener in listeners.iter_mut() {
                listener(&event);
            }
        }
        for listener in self.any.iter_mut() {
            listener(&event);
        }
    }
}

impl Debug for EventTarget<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventTarget")
            .field("listeners", &self.listeners.values().map(Vec::len).sum::<usize>())
            .field("any", &self.any.len())
            .finish()
    }
}
