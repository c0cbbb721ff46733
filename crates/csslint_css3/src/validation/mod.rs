//! Property value validation.
//!
//! Every known property has a [`properties::Descriptor`] describing the values it accepts. Values are
//! matched part by part with a [`PropertyValueIterator`]; a mismatch is reported as a
//! [`ValidationError`] pointing at the offending part.

mod iterator;
mod properties;
mod types;

pub use iterator::PropertyValueIterator;
pub use properties::{Descriptor, PROPERTIES};

use crate::node::{PropertyName, PropertyValue, PropertyValuePart};
use csslint_shared::errors::{ValidationError, ValidationResult};

/// Keywords every property accepts on their own
const CSS_WIDE_KEYWORDS: &str = "inherit | initial | unset";

/// Checks a value against the grammar of its property.
///
/// Unknown properties are an error unless they carry a vendor prefix. Properties without a grammar
/// accept anything.
pub fn validate(property: &PropertyName, value: &PropertyValue) -> ValidationResult<()> {
    let name = property.text.to_lowercase();

    let Some(descriptor) = PROPERTIES.get(name.as_str()) else {
        if name.starts_with('-') {
            return Ok(());
        }
        return Err(ValidationError::new(
            &format!("Unknown property '{}'.", property.text),
            property.location,
        ));
    };

    if matches!(descriptor, Descriptor::NoOp) {
        return Ok(());
    }

    let mut expression = PropertyValueIterator::new(value);

    if types::is_any(&mut expression, CSS_WIDE_KEYWORDS)? {
        return match expression.next() {
            Some(part) => Err(end_of_value(part)),
            None => Ok(()),
        };
    }

    match *descriptor {
        Descriptor::NoOp => Ok(()),
        Descriptor::Grammar(types) if types.contains(" || ") => group_property(types, &mut expression),
        Descriptor::Grammar(types) => single_property(types, &mut expression, 1),
        Descriptor::Multi { types, comma, max } => multi_property(types, &mut expression, comma, max),
        Descriptor::Custom(check) => check(&mut expression),
    }
}

pub(crate) fn end_of_value(part: &PropertyValuePart) -> ValidationError {
    ValidationError::new(
        &format!("Expected end of value but found '{}'.", part.text),
        part.location,
    )
}

fn expected_types(types: &str, value: &PropertyValue) -> ValidationError {
    ValidationError::new(
        &format!("Expected ({}) but found '{}'.", types, value.text),
        value.location,
    )
}

/// Up to `max` space separated values, each one of `types`
pub(crate) fn single_property(
    types: &str,
    expression: &mut PropertyValueIterator,
    max: usize,
) -> ValidationResult<()> {
    let value = expression.value();
    let mut result = false;
    let mut count = 0;

    while expression.has_next() && count < max {
        result = types::is_any(expression, types)?;
        if !result {
            break;
        }
        count += 1;
    }

    if !result {
        if let Some(part) = expression.peek(0).filter(|_| !expression.is_first()) {
            return Err(end_of_value(part));
        }
        return Err(expected_types(types, value));
    }

    match expression.next() {
        Some(part) => Err(end_of_value(part)),
        None => Ok(()),
    }
}

/// Up to `max` values of `types`, comma separated when `comma` is set. `None` means no limit.
pub(crate) fn multi_property(
    types: &str,
    expression: &mut PropertyValueIterator,
    comma: bool,
    max: Option<usize>,
) -> ValidationResult<()> {
    let value = expression.value();
    let max = max.unwrap_or(usize::MAX);
    let mut result = false;
    let mut count = 0;

    while expression.has_next() && !result && count < max {
        if !types::is_any(expression, types)? {
            break;
        }
        count += 1;

        if !expression.has_next() {
            result = true;
        } else if comma {
            if expression.peek(0).is_some_and(|p| p.text == ",") {
                expression.next();
            } else {
                break;
            }
        }
    }

    if !result {
        if let Some(part) = expression.peek(0).filter(|_| !expression.is_first()) {
            return Err(end_of_value(part));
        }
        if let Some(part) = expression.previous().filter(|p| comma && p.text == ",") {
            return Err(end_of_value(part));
        }
        return Err(expected_types(types, value));
    }

    match expression.next() {
        Some(part) => Err(end_of_value(part)),
        None => Ok(()),
    }
}

/// Any combination of the ` || ` separated groups, each at most once
pub(crate) fn group_property(types: &str, expression: &mut PropertyValueIterator) -> ValidationResult<()> {
    let value = expression.value();
    let group_count = types.split(" || ").count();
    let mut seen: Vec<&str> = Vec::new();
    let mut result = false;

    while expression.has_next() && !result {
        let Some(name) = types::is_any_of_group(expression, types)? else {
            break;
        };
        if seen.contains(&name) {
            break;
        }
        seen.push(name);

        if seen.len() == group_count || !expression.has_next() {
            result = true;
        }
    }

    if !result {
        if let Some(part) = expression.peek(0).filter(|_| !seen.is_empty()) {
            return Err(end_of_value(part));
        }
        return Err(expected_types(types, value));
    }

    match expression.next() {
        Some(part) => Err(end_of_value(part)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser_config::ParserConfig;
    use crate::Parser;
    use csslint_shared::reader::Location;
    use test_case::test_case;

    fn check(property: &str, value: &str) -> ValidationResult<()> {
        let mut parser = Parser::new(ParserConfig::default());
        let value = parser.parse_property_value(value).unwrap().unwrap();
        let name = PropertyName::new(property, None, Location::default());
        validate(&name, &value)
    }

    fn message(property: &str, value: &str) -> String {
        check(property, value).unwrap_err().message
    }

    #[test_case("color", "#fff")]
    #[test_case("color", "rgba(0, 0, 0, .5)")]
    #[test_case("color", "inherit")]
    #[test_case("COLOR", "Red")]
    #[test_case("width", "10px")]
    #[test_case("width", "50%")]
    #[test_case("width", "max-content")]
    #[test_case("width", "calc(100% - 10px)")]
    #[test_case("margin", "0 auto")]
    #[test_case("margin", "0 0 0 0")]
    #[test_case("padding", "1px 2px 3px")]
    #[test_case("display", "flex")]
    #[test_case("display", "-webkit-box")]
    #[test_case("background-position", "left top")]
    #[test_case("background-position", "10px 20%")]
    #[test_case("background-position", "center")]
    #[test_case("background-position", "left top, right 10px bottom")]
    #[test_case("background-image", "url(\"a.png\"), linear-gradient(red, blue)")]
    #[test_case("background-repeat", "repeat-x")]
    #[test_case("background-size", "cover")]
    #[test_case("background-size", "50% auto")]
    #[test_case("flex", "none")]
    #[test_case("flex", "1")]
    #[test_case("flex", "2 1 auto")]
    #[test_case("flex", "1 30px")]
    #[test_case("flex-flow", "row wrap")]
    #[test_case("border", "1px solid red")]
    #[test_case("border", "solid")]
    #[test_case("border-radius", "5px")]
    #[test_case("border-radius", "5px 10px / 2px")]
    #[test_case("border-bottom-left-radius", "5px 10%")]
    #[test_case("border-image-slice", "10% fill")]
    #[test_case("box-shadow", "none")]
    #[test_case("box-shadow", "1px 1px 2px red, inset 0 0 5px #000")]
    #[test_case("text-shadow", "1px 1px #ccc")]
    #[test_case("azimuth", "behind far-left")]
    #[test_case("azimuth", "30deg")]
    #[test_case("animation-name", "slide, fade")]
    #[test_case("font-weight", "700")]
    #[test_case("font-feature-settings", "normal")]
    #[test_case("font-feature-settings", "\"liga\" 1, \"kern\" off")]
    #[test_case("z-index", "auto")]
    #[test_case("opacity", "0.5")]
    #[test_case("font", "italic bold 12px/30px Georgia, serif")]
    #[test_case("-webkit-transition", "all 1s")]
    #[test_case("-moz-anything", "goes")]
    fn valid(property: &str, value: &str) {
        assert_eq!(check(property, value), Ok(()));
    }

    #[test_case("color", "#ff", "Expected (<color> | inherit) but found '#ff'.")]
    #[test_case(
        "width",
        "10",
        "Expected (<length> | <percentage> | <content-sizing> | auto | inherit) but found '10'."
    )]
    #[test_case("margin", "0 0 0 0 0", "Expected end of value but found '0'.")]
    #[test_case("color", "red blue", "Expected end of value but found 'blue'.")]
    #[test_case("color", "inherit red", "Expected end of value but found 'red'.")]
    #[test_case("background-position", "left left", "Expected end of value but found 'left'.")]
    #[test_case("border", "solid solid", "Expected end of value but found 'solid'.")]
    #[test_case(
        "flex",
        "1 2 3 4",
        "Expected (none | [ <flex-grow> <flex-shrink>? || <flex-basis> ]) but found '1 2 3 4'."
    )]
    #[test_case("border-radius", "5px foo", "Expected (<'border-radius'>) but found 'foo'.")]
    #[test_case("border-radius", "1px 2px 3px 4px 5px 6px 7px 8px 9px", "Expected end of value but found '9px'.")]
    #[test_case("border-radius", "foo", "Expected (<'border-radius'>) but found 'foo'.")]
    #[test_case("box-shadow", "none 1px", "Expected end of value but found '1px'.")]
    #[test_case("box-shadow", "1px", "Expected (<shadow>) but found '1px'.")]
    #[test_case("azimuth", "nowhere", "Expected (<'azimuth'>) but found 'nowhere'.")]
    #[test_case("colr", "red", "Unknown property 'colr'.")]
    fn invalid(property: &str, value: &str, expected: &str) {
        assert_eq!(message(property, value), expected);
    }

    #[test]
    fn display_typo_lists_the_grammar() {
        let msg = message("display", "flext");
        assert!(msg.starts_with("Expected (inline | block | list-item"));
        assert!(msg.ends_with("but found 'flext'."));
    }

    #[test]
    fn error_points_at_offending_part() {
        let err = check("margin", "0 0 0 0 5px").unwrap_err();
        assert_eq!(err.location.column, 9);
    }

    #[test]
    fn trailing_comma_in_list() {
        let parts = ["slide", ","]
            .iter()
            .map(|text| PropertyValuePart::new(text, Location::default()))
            .collect();
        let value = PropertyValue::new(parts, Location::default());
        let name = PropertyName::new("animation-name", None, Location::default());
        assert_eq!(
            validate(&name, &value).unwrap_err().message,
            "Expected end of value but found ','."
        );
    }

}
