use csslint_bin::{collect_events, describe_event, error_snippet};
use csslint_css3::event::{EventType, ParserEvent};
use csslint_css3::parser_config::ParserConfig;
use csslint_css3::specificity::Specificity;
use csslint_css3::{Parser, RuleOutcome};
use test_case::test_case;

const STYLESHEET: &str = r#"@charset "UTF-8";
@import url("print.css") print;
@namespace svg url("http://www.w3.org/2000/svg");

@media screen and (min-width: 768px) {
    .nav > li { float: left }
}

@font-face { font-family: Foo; src: url("foo.woff") }

@page :first { margin: 1in }

@keyframes spin {
    from { opacity: 0 }
    to { opacity: 1 }
}

a:hover, #id .cls { color: red !important; }
"#;

fn event_types(events: &[ParserEvent]) -> Vec<String> {
    events.iter().map(|e| e.event_type().to_string()).collect()
}

#[test]
fn full_stylesheet() {
    let (result, events) = collect_events(STYLESHEET, ParserConfig::default());
    assert!(result.is_ok());

    assert_eq!(
        event_types(&events),
        vec![
            "startstylesheet",
            "charset",
            "import",
            "namespace",
            "startmedia",
            "startrule",
            "property",
            "endrule",
            "endmedia",
            "startfontface",
            "property",
            "property",
            "endfontface",
            "startpage",
            "property",
            "endpage",
            "startkeyframes",
            "startkeyframerule",
            "property",
            "endkeyframerule",
            "startkeyframerule",
            "property",
            "endkeyframerule",
            "endkeyframes",
            "startrule",
            "property",
            "endrule",
            "endstylesheet",
        ]
    );

    for event in &events {
        if let ParserEvent::Property { property, invalid, .. } = event {
            assert!(invalid.is_none(), "{} is invalid: {:?}", property, invalid);
        }
    }
}

#[test]
fn rule_selectors_and_specificity() {
    let (_, events) = collect_events(STYLESHEET, ParserConfig::default());

    let selectors: Vec<(String, Specificity)> = events
        .iter()
        .filter_map(|e| match e {
            ParserEvent::StartRule { selectors, .. } => Some(selectors.clone()),
            _ => None,
        })
        .flatten()
        .map(|s| (s.text.clone(), s.specificity))
        .collect();

    assert_eq!(
        selectors,
        vec![
            (".nav > li".to_string(), Specificity::new(0, 0, 1, 1)),
            ("a:hover".to_string(), Specificity::new(0, 0, 1, 1)),
            ("#id .cls".to_string(), Specificity::new(0, 1, 1, 0)),
        ]
    );
}

#[test]
fn described_properties() {
    let (_, events) = collect_events("a { color: red; width: 10 }", ParserConfig::default());
    let lines: Vec<String> = events
        .iter()
        .filter(|e| e.event_type() == EventType::Property)
        .map(describe_event)
        .collect();

    assert_eq!(
        lines,
        vec![
            "1:5 property color: red".to_string(),
            "1:17 property width: 10 [invalid: Expected (<length> | <percentage> | <content-sizing> | auto | inherit) but found '10'.]"
                .to_string(),
        ]
    );
}

#[test_case("a { color: red }", true, true ; "clean")]
#[test_case("a { color: }", true, false ; "missing value")]
#[test_case("@foo bar;", true, false ; "unknown at rule")]
#[test_case("a { color: red } @import url(b.css);", true, false ; "late import")]
#[test_case("a { color: red } }", true, false ; "stray brace")]
#[test_case("a { font-family: Arial, }", true, false ; "dangling comma")]
fn strict_and_lenient(css: &str, lenient_ok: bool, strict_ok: bool) {
    let (result, _) = collect_events(css, ParserConfig::default());
    assert_eq!(result.is_ok(), lenient_ok);

    let config = ParserConfig {
        strict: true,
        ..Default::default()
    };
    let (result, _) = collect_events(css, config);
    assert_eq!(result.is_ok(), strict_ok);
}

#[test]
fn errors_are_reported_and_parsing_continues() {
    let (result, events) = collect_events(
        "a { color: red; } b { color: ; } c { color: blue }",
        ParserConfig::default(),
    );
    assert!(result.is_ok());

    let errors = events
        .iter()
        .filter(|e| e.event_type() == EventType::Error)
        .count();
    assert_eq!(errors, 1);

    let values: Vec<String> = events
        .iter()
        .filter_map(|e| match e {
            ParserEvent::Property { value, .. } => Some(value.text.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(values, vec!["red", "blue"]);
}

#[test]
fn fragments() {
    let mut parser = Parser::new(ParserConfig::default());

    let selector = parser.parse_selector("ul > li.item:first-child").unwrap().unwrap();
    assert_eq!(selector.text, "ul > li.item:first-child");
    assert_eq!(selector.specificity, Specificity::new(0, 0, 2, 2));

    let query = parser
        .parse_media_query("only screen and (max-width: 600px)")
        .unwrap()
        .unwrap();
    assert_eq!(query.text, "only screen and (max-width:600px)");

    let value = parser.parse_property_value("1px solid #000").unwrap().unwrap();
    assert_eq!(value.parts.len(), 3);

    assert_eq!(parser.parse_rule("   ").unwrap(), RuleOutcome::Absent);
    assert!(matches!(
        parser.parse_rule("p { margin: 0 }").unwrap(),
        RuleOutcome::Parsed(selectors) if selectors.len() == 1
    ));
}

#[test]
fn dangling_comma_skips_the_declaration() {
    let (result, events) = collect_events("a { font-family: Arial, ; color: red }", ParserConfig::default());
    assert!(result.is_ok());

    let lines: Vec<String> = events
        .iter()
        .filter(|e| matches!(e.event_type(), EventType::Property | EventType::Error))
        .map(describe_event)
        .collect();
    assert_eq!(
        lines,
        vec![
            "1:23 error Unexpected token ',' at line 1, col 23.".to_string(),
            "1:27 property color: red".to_string(),
        ]
    );
}

#[test]
fn snippet_with_carriage_return_line_endings() {
    let css = "a { color: red }\r\r\rb { color: red ";
    let config = ParserConfig {
        strict: true,
        ..Default::default()
    };
    let (result, _) = collect_events(css, config);
    let err = result.unwrap_err();
    assert_eq!(err.line(), 4);

    let snippet = error_snippet(css, &err);
    let lines: Vec<&str> = snippet.lines().collect();
    assert_eq!(
        &lines[..4],
        &["1    |a { color: red }", "2    |", "3    |", "4    |b { color: red "]
    );
    assert_eq!(lines.len(), 5);
    assert!(lines[4].starts_with("   ---") && lines[4].ends_with('^'));
}

#[test]
fn snippet_context_is_clamped() {
    let css = "a { color: red }\nb { color: red; }\n}";
    let config = ParserConfig {
        strict: true,
        ..Default::default()
    };
    let (result, _) = collect_events(css, config);
    let err = result.unwrap_err();
    assert_eq!(err.line(), 3);

    let snippet = error_snippet(css, &err);
    assert_eq!(
        snippet,
        "1    |a { color: red }\n2    |b { color: red; }\n3    |}\n   ---^\n"
    );
}
