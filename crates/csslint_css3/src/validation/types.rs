use crate::node::{PartKind, PropertyValuePart};
use crate::validation::iterator::PropertyValueIterator;
use csslint_shared::errors::{ValidationError, ValidationResult};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CALC: Regex = regex(r"(?i)^(?:-(?:ms|moz|o|webkit)-)?calc");
    static ref GRADIENT: Regex =
        regex(r"(?i)^(?:-(?:ms|moz|o|webkit)-)?(?:repeating-)?(?:radial-|linear-)?gradient");
    static ref FEATURE_TAG: Regex = regex(r"^[A-Za-z0-9]{4}$");
}

#[allow(clippy::expect_used)]
fn regex(pattern: &str) -> Regex {
    Regex::new(pattern).expect("invalid value type pattern")
}

/// Case-insensitive match of a single part against ` | ` separated alternatives. An alternative is a
/// keyword, a simple `<type>`, or `name()` for a function call of that name.
pub fn is_literal(part: &PropertyValuePart, literals: &str) -> bool {
    literals.split(" | ").any(|literal| {
        if literal.starts_with('<') {
            simple(literal, part).unwrap_or(false)
        } else if let Some(name) = literal.strip_suffix("()") {
            part.kind == PartKind::Function
                && part
                    .name
                    .as_deref()
                    .is_some_and(|n| n.eq_ignore_ascii_case(name))
        } else {
            part.text.eq_ignore_ascii_case(literal)
        }
    })
}

/// Tries each ` | ` separated type in order and stops at the first one that matches
pub fn is_any(expression: &mut PropertyValueIterator, types: &str) -> ValidationResult<bool> {
    for ty in types.split(" | ") {
        if !expression.has_next() {
            break;
        }
        if is_type(expression, ty)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Like [`is_any`] for ` || ` separated groups, returning the group that matched
pub fn is_any_of_group<'t>(
    expression: &mut PropertyValueIterator,
    types: &'t str,
) -> ValidationResult<Option<&'t str>> {
    for ty in types.split(" || ") {
        if is_type(expression, ty)? {
            return Ok(Some(ty));
        }
    }
    Ok(None)
}

/// Matches the next part(s) against a keyword list, a simple type or a complex type, consuming what
/// matched
pub fn is_type(expression: &mut PropertyValueIterator, ty: &str) -> ValidationResult<bool> {
    let Some(part) = expression.peek(0) else {
        return Ok(false);
    };

    if !ty.starts_with('<') {
        let matched = is_literal(part, ty);
        if matched {
            expression.next();
        }
        return Ok(matched);
    }

    if let Some(matched) = simple(ty, part) {
        if matched {
            expression.next();
        }
        return Ok(matched);
    }

    if let Some(result) = complex(ty, expression) {
        return result;
    }

    log::warn!("unknown value type {}", ty);
    Ok(false)
}

/// Single part types. Returns None when `name` is not a simple type.
pub fn simple(name: &str, part: &PropertyValuePart) -> Option<bool> {
    let text = part.text.as_str();

    let matched = match name {
        "<absolute-size>" => is_literal(
            part,
            "xx-small | x-small | small | medium | large | x-large | xx-large",
        ),
        "<angle>" => part.kind == PartKind::Angle,
        "<attachment>" => is_literal(part, "scroll | fixed | local"),
        "<attr>" => is_literal(part, "attr()"),
        "<bg-image>" => is_literal(part, "<image> | <gradient> | none"),
        "<border-style>" => is_literal(
            part,
            "none | hidden | dotted | dashed | solid | double | groove | ridge | inset | outset",
        ),
        "<border-width>" => is_literal(part, "<length> | thin | medium | thick"),
        "<box>" => is_literal(part, "padding-box | border-box | content-box"),
        "<color>" => {
            part.kind == PartKind::Color
                || text.eq_ignore_ascii_case("transparent")
                || text.eq_ignore_ascii_case("currentColor")
        }
        "<content>" => is_literal(part, "content()"),
        "<content-sizing>" => is_literal(
            part,
            "fill-available | -moz-available | -webkit-fill-available | max-content | -moz-max-content | \
             -webkit-max-content | min-content | -moz-min-content | -webkit-min-content | fit-content | \
             -moz-fit-content | -webkit-fit-content",
        ),
        "<feature-tag-value>" => {
            part.kind == PartKind::String
                && part.string.as_deref().is_some_and(|s| FEATURE_TAG.is_match(s))
        }
        "<flex-basis>" => is_literal(part, "<width>"),
        "<flex-direction>" => is_literal(part, "row | row-reverse | column | column-reverse"),
        "<flex-grow>" | "<flex-shrink>" => is_literal(part, "<number>"),
        "<flex-wrap>" => is_literal(part, "nowrap | wrap | wrap-reverse"),
        "<gradient>" => part.kind == PartKind::Function && GRADIENT.is_match(text),
        "<ident>" => part.kind == PartKind::Identifier || part.was_ident,
        "<image>" => is_literal(part, "<uri>"),
        "<integer>" => part.kind == PartKind::Integer,
        "<length>" => {
            (part.kind == PartKind::Function && CALC.is_match(text))
                || part.kind == PartKind::Length
                || text == "0"
        }
        "<margin-width>" => is_literal(part, "<length> | <percentage> | auto"),
        "<number>" => matches!(part.kind, PartKind::Number | PartKind::Integer),
        "<padding-width>" => is_literal(part, "<length> | <percentage>"),
        "<percentage>" => part.kind == PartKind::Percentage || text == "0",
        "<relative-size>" => is_literal(part, "smaller | larger"),
        "<shape>" => is_literal(part, "rect() | inset-rect()"),
        "<string>" => part.kind == PartKind::String,
        "<time>" => part.kind == PartKind::Time,
        "<uri>" => part.kind == PartKind::Uri,
        "<width>" => is_literal(part, "<margin-width>"),
        _ => return None,
    };

    Some(matched)
}

/// Types that may span several parts. Returns None when `name` is not a complex type.
pub fn complex(name: &str, expression: &mut PropertyValueIterator) -> Option<ValidationResult<bool>> {
    let result = match name {
        "<bg-position>" => bg_position(expression),
        "<bg-size>" => bg_size(expression),
        "<repeat-style>" => repeat_style(expression),
        "<shadow>" => shadow(expression),
        "<x-one-radius>" => x_one_radius(expression),
        "<flex>" => flex(expression),
        _ => return None,
    };
    Some(result)
}

const NUMERIC: &str = "<percentage> | <length>";
const X_DIRECTION: &str = "left | right";
const Y_DIRECTION: &str = "top | bottom";

/// One, two, three or four value background position. The number of parts before the next comma
/// decides which forms are possible.
fn bg_position(expression: &mut PropertyValueIterator) -> ValidationResult<bool> {
    let mut count = 0;
    while expression.peek(count).is_some_and(|p| p.text != ",") {
        count += 1;
    }

    if count < 3 {
        if is_any(expression, "left | right | center | <percentage> | <length>")? {
            is_any(expression, "top | bottom | center | <percentage> | <length>")?;
            return Ok(true);
        }
        if is_any(expression, Y_DIRECTION)? {
            is_any(expression, "left | right | center")?;
            return Ok(true);
        }
        return Ok(false);
    }

    if is_any(expression, X_DIRECTION)? {
        return edge_offset(expression, Y_DIRECTION);
    }
    if is_any(expression, Y_DIRECTION)? {
        return edge_offset(expression, X_DIRECTION);
    }
    if is_any(expression, "center")? && is_any(expression, "left | right | top | bottom")? {
        is_any(expression, NUMERIC)?;
        return Ok(true);
    }
    Ok(false)
}

/// Rest of a three or four value position after the first edge keyword
fn edge_offset(expression: &mut PropertyValueIterator, other: &str) -> ValidationResult<bool> {
    if is_any(expression, other)? {
        is_any(expression, NUMERIC)?;
        return Ok(true);
    }
    if is_any(expression, NUMERIC)? {
        if is_any(expression, other)? {
            is_any(expression, NUMERIC)?;
            return Ok(true);
        }
        return is_any(expression, "center");
    }
    Ok(false)
}

fn bg_size(expression: &mut PropertyValueIterator) -> ValidationResult<bool> {
    if is_any(expression, "cover | contain")? {
        return Ok(true);
    }
    if is_any(expression, "<percentage> | <length> | auto")? {
        is_any(expression, "<percentage> | <length> | auto")?;
        return Ok(true);
    }
    Ok(false)
}

fn repeat_style(expression: &mut PropertyValueIterator) -> ValidationResult<bool> {
    const VALUES: &str = "repeat | space | round | no-repeat";

    if is_any(expression, "repeat-x | repeat-y")? {
        return Ok(true);
    }
    if is_any(expression, VALUES)? {
        is_any(expression, VALUES)?;
        return Ok(true);
    }
    Ok(false)
}

/// `inset? && [ <length>{2,4} && <color>? ]`
fn shadow(expression: &mut PropertyValueIterator) -> ValidationResult<bool> {
    if !expression.has_next() {
        return Ok(false);
    }

    let inset = is_any(expression, "inset")?;
    let color = is_any(expression, "<color>")?;

    let mut count = 0;
    while count < 4 && is_any(expression, "<length>")? {
        count += 1;
    }

    if expression.has_next() {
        if !color {
            is_any(expression, "<color>")?;
        }
        if !inset {
            is_any(expression, "inset")?;
        }
    }

    Ok((2..=4).contains(&count))
}

/// `[ <length> | <percentage> ] [ <length> | <percentage> ]?`
fn x_one_radius(expression: &mut PropertyValueIterator) -> ValidationResult<bool> {
    const SIMPLE: &str = "<length> | <percentage> | inherit";

    if is_any(expression, SIMPLE)? {
        is_any(expression, SIMPLE)?;
        return Ok(true);
    }
    Ok(false)
}

/// `none | [ <flex-grow> <flex-shrink>? || <flex-basis> ]`
fn flex(expression: &mut PropertyValueIterator) -> ValidationResult<bool> {
    let matched = if is_any(expression, "none | inherit")? {
        true
    } else if is_type(expression, "<flex-grow>")? {
        if !expression.has_next() {
            true
        } else if is_type(expression, "<flex-shrink>")? {
            !expression.has_next() || is_type(expression, "<flex-basis>")?
        } else if is_type(expression, "<flex-basis>")? {
            !expression.has_next()
        } else {
            false
        }
    } else {
        is_type(expression, "<flex-basis>")?
    };

    if matched {
        return Ok(true);
    }

    let value = expression.value();
    let location = expression.peek(0).map_or(value.location, |p| p.location);
    Err(ValidationError::new(
        &format!(
            "Expected (none | [ <flex-grow> <flex-shrink>? || <flex-basis> ]) but found '{}'.",
            value.text
        ),
        location,
    ))
}
