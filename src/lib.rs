//! Command line front end for the csslint CSS3 parser.
//!
//! The parser itself lives in [`csslint_css3`]; this crate adds helpers to collect and print the
//! events of a parse.

pub use csslint_css3 as css3;
pub use csslint_shared as shared;

use csslint_css3::event::ParserEvent;
use csslint_css3::parser_config::ParserConfig;
use csslint_css3::Parser;
use csslint_shared::errors::{CssResult, SyntaxError};
use csslint_shared::reader::normalize_newlines;
use itertools::Itertools;

/// Parses a stylesheet and returns every event it fired, in order, together with the result of the
/// parse. Events fired before a fatal error are kept.
pub fn collect_events(css: &str, config: ParserConfig) -> (CssResult<()>, Vec<ParserEvent>) {
    let mut events = Vec::new();
    let result = {
        let mut parser = Parser::new(config);
        parser.add_any_listener(|event| events.push(event.clone()));
        parser.parse(css)
    };
    (result, events)
}

/// One line description of an event: `line:col type payload`
pub fn describe_event(event: &ParserEvent) -> String {
    let location = event.location();
    let payload = event_payload(event);

    if payload.is_empty() {
        format!("{}:{} {}", location.line, location.column, event.event_type())
    } else {
        format!(
            "{}:{} {} {}",
            location.line,
            location.column,
            event.event_type(),
            payload
        )
    }
}

/// Source lines around a syntax error, numbered, with a marker under the failing column. Up to five
/// lines of context are shown on either side.
pub fn error_snippet(css: &str, err: &SyntaxError) -> String {
    let css = normalize_newlines(css);
    let lines: Vec<&str> = css.split('\n').collect();
    let line_nr = err.line().saturating_sub(1);
    let col_nr = err.column().saturating_sub(2);

    if col_nr > 1000 {
        return "Error is too far to the right to display.\n".to_string();
    }

    let mut out = String::new();
    for n in line_nr.saturating_sub(5)..line_nr {
        if let Some(line) = lines.get(n) {
            out.push_str(&format!("{:<5}|{}\n", n + 1, line));
        }
    }

    if let Some(line) = lines.get(line_nr) {
        out.push_str(&format!("{:<5}|{}\n", line_nr + 1, line));
        out.push_str(&format!("   ---{}^\n", "-".repeat(col_nr)));
    }

    for (n, line) in lines.iter().enumerate().skip(line_nr + 1).take(5) {
        out.push_str(&format!("{:<5}|{}\n", n + 1, line));
    }

    out
}

fn event_payload(event: &ParserEvent) -> String {
    match event {
        ParserEvent::StartStylesheet { .. }
        | ParserEvent::EndStylesheet { .. }
        | ParserEvent::StartFontFace { .. }
        | ParserEvent::EndFontFace { .. }
        | ParserEvent::StartViewport { .. }
        | ParserEvent::EndViewport { .. } => String::new(),
        ParserEvent::Charset { charset, .. } => charset.clone(),
        ParserEvent::Import { uri, media, .. } => {
            if media.is_empty() {
                uri.clone()
            } else {
                format!("{} {}", uri, media.iter().join(", "))
            }
        }
        ParserEvent::Namespace { prefix, uri, .. } => match prefix {
            Some(prefix) => format!("{} {}", prefix, uri),
            None => uri.clone(),
        },
        ParserEvent::StartMedia { media, .. } | ParserEvent::EndMedia { media, .. } => media.iter().join(", "),
        ParserEvent::StartPage { id, pseudo, .. } | ParserEvent::EndPage { id, pseudo, .. } => format!(
            "{}{}",
            id.as_deref().unwrap_or_default(),
            pseudo.as_deref().map(|p| format!(":{}", p)).unwrap_or_default()
        ),
        ParserEvent::StartPageMargin { margin, .. } | ParserEvent::EndPageMargin { margin, .. } => {
            margin.clone()
        }
        ParserEvent::StartKeyframes { name, prefix, .. } | ParserEvent::EndKeyframes { name, prefix, .. } => {
            match prefix {
                Some(prefix) => format!("{} ({})", name, prefix),
                None => name.clone(),
            }
        }
        ParserEvent::StartKeyframeRule { keys, .. } | ParserEvent::EndKeyframeRule { keys, .. } => {
            keys.iter().join(", ")
        }
        ParserEvent::StartRule { selectors, .. } | ParserEvent::EndRule { selectors, .. } => {
            selectors.iter().join(", ")
        }
        ParserEvent::Property {
            property,
            value,
            important,
            invalid,
            ..
        } => {
            let mut text = format!("{}: {}", property, value);
            if *important {
                text.push_str(" !important");
            }
            if let Some(err) = invalid {
                text.push_str(&format!(" [invalid: {}]", err));
            }
            text
        }
        ParserEvent::Error { message, .. } => message.clone(),
    }
}
