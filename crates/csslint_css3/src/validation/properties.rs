use crate::validation::iterator::PropertyValueIterator;
use crate::validation::types::is_any;
use crate::validation::{end_of_value, multi_property};
use csslint_shared::errors::{ValidationError, ValidationResult};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// How the value of a property is checked
#[derive(Clone, Copy)]
pub enum Descriptor {
    /// Known property whose value is not checked
    NoOp,
    /// A single value from ` | ` separated types, or any combination of ` || ` separated groups
    Grammar(&'static str),
    /// Up to `max` values, optionally separated by commas
    Multi {
        types: &'static str,
        comma: bool,
        max: Option<usize>,
    },
    /// Hand written check for grammars that do not fit the forms above
    Custom(fn(&mut PropertyValueIterator) -> ValidationResult<()>),
}

impl std::fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Descriptor::NoOp => write!(f, "NoOp"),
            Descriptor::Grammar(types) => write!(f, "Grammar({:?})", types),
            Descriptor::Multi { types, comma, max } => {
                write!(f, "Multi({:?}, comma: {}, max: {:?})", types, comma, max)
            }
            Descriptor::Custom(_) => write!(f, "Custom"),
        }
    }
}

use Descriptor::{Custom, Grammar, NoOp};

const fn multi(types: &'static str, max: usize) -> Descriptor {
    Descriptor::Multi {
        types,
        comma: false,
        max: Some(max),
    }
}

const fn comma_list(types: &'static str) -> Descriptor {
    Descriptor::Multi {
        types,
        comma: true,
        max: None,
    }
}

const BORDER: &str = "<border-width> || <border-style> || <color>";
const BOX_ALIGN: &str = "start | end | center | baseline | stretch";
const BOX_DIRECTION: &str = "normal | reverse | inherit";
const BOX_LINES: &str = "single | multiple";
const BOX_ORIENT: &str = "horizontal | vertical | inline-axis | block-axis | inherit";
const BOX_PACK: &str = "start | end | center | justify";
const ALIGN_ITEMS: &str = "flex-start | flex-end | center | baseline | stretch";
const ALIGN_CONTENT: &str = "flex-start | flex-end | center | space-between | space-around | stretch";
const ALIGN_SELF: &str = "auto | flex-start | flex-end | center | baseline | stretch";
const JUSTIFY_CONTENT: &str = "flex-start | flex-end | center | space-between | space-around";
const FLEX_DIRECTION: &str = "row | row-reverse | column | column-reverse";
const FLEX_FLOW: &str = "<flex-direction> || <flex-wrap>";
const FLEX_WRAP: &str = "nowrap | wrap | wrap-reverse";
const BREAK: &str = "auto | always | avoid | left | right | page | column | avoid-page | avoid-column";
const PAGE_BREAK: &str = "auto | always | avoid | left | right | inherit";
const OFFSET: &str = "<margin-width> | inherit";
const PADDING: &str = "<padding-width> | inherit";
const MAX_SIZE: &str = "<length> | <percentage> | <content-sizing> | none | inherit";
const MIN_SIZE: &str =
    "<length> | <percentage> | <content-sizing> | contain-floats | -moz-contain-floats | -webkit-contain-floats | inherit";
const TOUCH_ACTION: &str = "auto | none | pan-x | pan-y | pan-left | pan-right | pan-up | pan-down | manipulation";
const ALIGN_BASELINE: &str = "baseline | use-script | before-edge | text-before-edge | after-edge | text-after-edge | \
     central | middle | ideographic | alphabetic | hanging | mathematical";
const DISPLAY: &str = "inline | block | list-item | inline-block | table | inline-table | table-row-group | \
     table-header-group | table-footer-group | table-row | table-column-group | table-column | table-cell | \
     table-caption | grid | inline-grid | none | inherit | -moz-box | -moz-inline-block | -moz-inline-box | \
     -moz-inline-grid | -moz-inline-stack | -moz-inline-table | -moz-grid | -moz-grid-group | -moz-grid-line | \
     -moz-groupbox | -moz-deck | -moz-popup | -moz-stack | -moz-marker | -webkit-box | -webkit-inline-box | \
     -ms-flexbox | -ms-inline-flexbox | flex | -webkit-flex | inline-flex | -webkit-inline-flex";

lazy_static! {
    /// Known properties by lowercase name
    pub static ref PROPERTIES: HashMap<&'static str, Descriptor> = HashMap::from([
        ("align-items", Grammar(ALIGN_ITEMS)),
        ("align-content", Grammar(ALIGN_CONTENT)),
        ("align-self", Grammar(ALIGN_SELF)),
        ("-webkit-align-items", Grammar(ALIGN_ITEMS)),
        ("-webkit-align-content", Grammar(ALIGN_CONTENT)),
        ("-webkit-align-self", Grammar(ALIGN_SELF)),
        ("alignment-adjust", Grammar(
            "auto | baseline | before-edge | text-before-edge | middle | central | after-edge | text-after-edge | \
             ideographic | alphabetic | hanging | mathematical | <percentage> | <length>",
        )),
        ("alignment-baseline", Grammar(ALIGN_BASELINE)),
        ("animation", NoOp),
        ("animation-delay", comma_list("<time>")),
        ("animation-direction", comma_list("normal | alternate")),
        ("animation-duration", comma_list("<time>")),
        ("animation-fill-mode", comma_list("none | forwards | backwards | both")),
        ("animation-iteration-count", comma_list("<number> | infinite")),
        ("animation-name", comma_list("none | <ident>")),
        ("animation-play-state", comma_list("running | paused")),
        ("animation-timing-function", NoOp),
        ("appearance", Grammar(
            "icon | window | desktop | workspace | document | tooltip | dialog | button | push-button | hyperlink | \
             radio-button | checkbox | menu-item | tab | menu | menubar | pull-down-menu | pop-up-menu | list-menu | \
             radio-group | checkbox-group | outline-tree | range | field | combo-box | signature | password | normal | \
             none | inherit",
        )),
        ("azimuth", Custom(azimuth)),
        ("backface-visibility", Grammar("visible | hidden")),
        ("background", NoOp),
        ("background-attachment", comma_list("<attachment>")),
        ("background-clip", comma_list("<box>")),
        ("background-color", Grammar("<color> | inherit")),
        ("background-image", comma_list("<bg-image>")),
        ("background-origin", comma_list("<box>")),
        ("background-position", comma_list("<bg-position>")),
        ("background-repeat", Descriptor::Multi { types: "<repeat-style>", comma: false, max: None }),
        ("background-size", comma_list("<bg-size>")),
        ("baseline-shift", Grammar("baseline | sub | super | <percentage> | <length>")),
        ("behavior", NoOp),
        ("binding", NoOp),
        ("bleed", Grammar("<length>")),
        ("bookmark-label", Grammar("<content> | <attr> | <string>")),
        ("bookmark-level", Grammar("none | <integer>")),
        ("bookmark-state", Grammar("open | closed")),
        ("bookmark-target", Grammar("none | <uri> | <attr>")),
        ("border", Grammar(BORDER)),
        ("border-bottom", Grammar(BORDER)),
        ("border-bottom-color", Grammar("<color> | inherit")),
        ("border-bottom-left-radius", Grammar("<x-one-radius>")),
        ("border-bottom-right-radius", Grammar("<x-one-radius>")),
        ("border-bottom-style", Grammar("<border-style>")),
        ("border-bottom-width", Grammar("<border-width>")),
        ("border-collapse", Grammar("collapse | separate | inherit")),
        ("border-color", multi("<color> | inherit", 4)),
        ("border-image", NoOp),
        ("border-image-outset", multi("<length> | <number>", 4)),
        ("border-image-repeat", multi("stretch | repeat | round", 2)),
        ("border-image-slice", Custom(border_image_slice)),
        ("border-image-source", Grammar("<image> | none")),
        ("border-image-width", multi("<length> | <percentage> | <number> | auto", 4)),
        ("border-left", Grammar(BORDER)),
        ("border-left-color", Grammar("<color> | inherit")),
        ("border-left-style", Grammar("<border-style>")),
        ("border-left-width", Grammar("<border-width>")),
        ("border-radius", Custom(border_radius)),
        ("border-right", Grammar(BORDER)),
        ("border-right-color", Grammar("<color> | inherit")),
        ("border-right-style", Grammar("<border-style>")),
        ("border-right-width", Grammar("<border-width>")),
        ("border-spacing", multi("<length> | inherit", 2)),
        ("border-style", multi("<border-style>", 4)),
        ("border-top", Grammar(BORDER)),
        ("border-top-color", Grammar("<color> | inherit")),
        ("border-top-left-radius", Grammar("<x-one-radius>")),
        ("border-top-right-radius", Grammar("<x-one-radius>")),
        ("border-top-style", Grammar("<border-style>")),
        ("border-top-width", Grammar("<border-width>")),
        ("border-width", multi("<border-width>", 4)),
        ("bottom", Grammar(OFFSET)),
        ("-moz-box-align", Grammar(BOX_ALIGN)),
        ("-moz-box-decoration-break", Grammar("slice | clone")),
        ("-moz-box-direction", Grammar(BOX_DIRECTION)),
        ("-moz-box-flex", Grammar("<number>")),
        ("-moz-box-flex-group", Grammar("<integer>")),
        ("-moz-box-lines", Grammar(BOX_LINES)),
        ("-moz-box-ordinal-group", Grammar("<integer>")),
        ("-moz-box-orient", Grammar(BOX_ORIENT)),
        ("-moz-box-pack", Grammar(BOX_PACK)),
        ("-webkit-box-align", Grammar(BOX_ALIGN)),
        ("-webkit-box-decoration-break", Grammar("slice | clone")),
        ("-webkit-box-direction", Grammar(BOX_DIRECTION)),
        ("-webkit-box-flex", Grammar("<number>")),
        ("-webkit-box-flex-group", Grammar("<integer>")),
        ("-webkit-box-lines", Grammar(BOX_LINES)),
        ("-webkit-box-ordinal-group", Grammar("<integer>")),
        ("-webkit-box-orient", Grammar(BOX_ORIENT)),
        ("-webkit-box-pack", Grammar(BOX_PACK)),
        ("box-shadow", Custom(box_shadow)),
        ("box-sizing", Grammar("content-box | border-box | inherit")),
        ("break-after", Grammar(BREAK)),
        ("break-before", Grammar(BREAK)),
        ("break-inside", Grammar("auto | avoid | avoid-page | avoid-column")),
        ("caption-side", Grammar("top | bottom | inherit")),
        ("clear", Grammar("none | right | left | both | inherit")),
        ("clip", NoOp),
        ("color", Grammar("<color> | inherit")),
        ("color-profile", NoOp),
        ("column-count", Grammar("<integer> | auto")),
        ("column-fill", Grammar("auto | balance")),
        ("column-gap", Grammar("<length> | normal")),
        ("column-rule", Grammar(BORDER)),
        ("column-rule-color", Grammar("<color>")),
        ("column-rule-style", Grammar("<border-style>")),
        ("column-rule-width", Grammar("<border-width>")),
        ("column-span", Grammar("none | all")),
        ("column-width", Grammar("<length> | auto")),
        ("columns", NoOp),
        ("content", NoOp),
        ("counter-increment", NoOp),
        ("counter-reset", NoOp),
        ("crop", Grammar("<shape> | auto")),
        ("cue", Grammar("cue-after | cue-before | inherit")),
        ("cue-after", NoOp),
        ("cue-before", NoOp),
        ("cursor", NoOp),
        ("direction", Grammar("ltr | rtl | inherit")),
        ("display", Grammar(DISPLAY)),
        ("dominant-baseline", NoOp),
        ("drop-initial-after-adjust", Grammar(
            "central | middle | after-edge | text-after-edge | ideographic | alphabetic | mathematical | \
             <percentage> | <length>",
        )),
        ("drop-initial-after-align", Grammar(ALIGN_BASELINE)),
        ("drop-initial-before-adjust", Grammar(
            "before-edge | text-before-edge | central | middle | hanging | mathematical | <percentage> | <length>",
        )),
        ("drop-initial-before-align", Grammar(
            "caps-height | baseline | use-script | before-edge | text-before-edge | after-edge | text-after-edge | \
             central | middle | ideographic | alphabetic | hanging | mathematical",
        )),
        ("drop-initial-size", Grammar("auto | line | <length> | <percentage>")),
        ("drop-initial-value", Grammar("initial | <integer>")),
        ("elevation", Grammar("<angle> | below | level | above | higher | lower | inherit")),
        ("empty-cells", Grammar("show | hide | inherit")),
        ("filter", NoOp),
        ("fit", Grammar("fill | hidden | meet | slice")),
        ("fit-position", NoOp),
        ("flex", Grammar("<flex>")),
        ("flex-basis", Grammar("<width>")),
        ("flex-direction", Grammar(FLEX_DIRECTION)),
        ("flex-flow", Grammar(FLEX_FLOW)),
        ("flex-grow", Grammar("<number>")),
        ("flex-shrink", Grammar("<number>")),
        ("flex-wrap", Grammar(FLEX_WRAP)),
        ("-webkit-flex", Grammar("<flex>")),
        ("-webkit-flex-basis", Grammar("<width>")),
        ("-webkit-flex-direction", Grammar(FLEX_DIRECTION)),
        ("-webkit-flex-flow", Grammar(FLEX_FLOW)),
        ("-webkit-flex-grow", Grammar("<number>")),
        ("-webkit-flex-shrink", Grammar("<number>")),
        ("-webkit-flex-wrap", Grammar(FLEX_WRAP)),
        ("-ms-flex", Grammar("<flex>")),
        ("-ms-flex-align", Grammar("start | end | center | stretch | baseline")),
        ("-ms-flex-direction", Grammar("row | column | row-reverse | column-reverse | inherit")),
        ("-ms-flex-order", Grammar("<number>")),
        ("-ms-flex-pack", Grammar("start | end | center | justify")),
        ("-ms-flex-wrap", Grammar("nowrap | wrap | wrap-reverse")),
        ("float", Grammar("left | right | none | inherit")),
        ("float-offset", NoOp),
        ("font", NoOp),
        ("font-family", NoOp),
        ("font-feature-settings", Custom(font_feature_settings)),
        ("font-kerning", Grammar("auto | normal | none")),
        ("font-size", Grammar("<absolute-size> | <relative-size> | <length> | <percentage> | inherit")),
        ("font-size-adjust", Grammar("<number> | none | inherit")),
        ("font-stretch", Grammar(
            "normal | ultra-condensed | extra-condensed | condensed | semi-condensed | semi-expanded | expanded | \
             extra-expanded | ultra-expanded | inherit",
        )),
        ("font-style", Grammar("normal | italic | oblique | inherit")),
        ("font-variant", Grammar("normal | small-caps | inherit")),
        ("font-weight", Grammar(
            "normal | bold | bolder | lighter | 100 | 200 | 300 | 400 | 500 | 600 | 700 | 800 | 900 | inherit",
        )),
        ("grid-cell-stacking", Grammar("columns | rows | layer")),
        ("grid-column", NoOp),
        ("grid-columns", NoOp),
        ("grid-column-align", Grammar("start | end | center | stretch")),
        ("grid-column-sizing", NoOp),
        ("grid-column-span", Grammar("<integer>")),
        ("grid-flow", Grammar("none | rows | columns")),
        ("grid-layer", Grammar("<integer>")),
        ("grid-row", NoOp),
        ("grid-rows", NoOp),
        ("grid-row-align", Grammar("start | end | center | stretch")),
        ("grid-row-span", Grammar("<integer>")),
        ("grid-row-sizing", NoOp),
        ("hanging-punctuation", NoOp),
        ("height", Grammar("<margin-width> | <content-sizing> | inherit")),
        ("hyphenate-after", Grammar("<integer> | auto")),
        ("hyphenate-before", Grammar("<integer> | auto")),
        ("hyphenate-character", Grammar("<string> | auto")),
        ("hyphenate-lines", Grammar("no-limit | <integer>")),
        ("hyphenate-resource", NoOp),
        ("hyphens", Grammar("none | manual | auto")),
        ("icon", NoOp),
        ("image-orientation", Grammar("<angle> | auto")),
        ("image-rendering", NoOp),
        ("image-resolution", NoOp),
        ("ime-mode", Grammar("auto | normal | active | inactive | disabled | inherit")),
        ("inline-box-align", Grammar("initial | last | <integer>")),
        ("justify-content", Grammar(JUSTIFY_CONTENT)),
        ("-webkit-justify-content", Grammar(JUSTIFY_CONTENT)),
        ("left", Grammar(OFFSET)),
        ("letter-spacing", Grammar("<length> | normal | inherit")),
        ("line-height", Grammar("<number> | <length> | <percentage> | normal | inherit")),
        ("line-break", Grammar("auto | loose | normal | strict")),
        ("line-stacking", NoOp),
        ("line-stacking-ruby", Grammar("exclude-ruby | include-ruby")),
        ("line-stacking-shift", Grammar("consider-shifts | disregard-shifts")),
        ("line-stacking-strategy", Grammar("inline-line-height | block-line-height | max-height | grid-height")),
        ("list-style", NoOp),
        ("list-style-image", Grammar("<uri> | none | inherit")),
        ("list-style-position", Grammar("inside | outside | inherit")),
        ("list-style-type", Grammar(
            "disc | circle | square | decimal | decimal-leading-zero | lower-roman | upper-roman | lower-greek | \
             lower-latin | upper-latin | armenian | georgian | lower-alpha | upper-alpha | none | inherit",
        )),
        ("margin", multi("<margin-width> | inherit", 4)),
        ("margin-bottom", Grammar(OFFSET)),
        ("margin-left", Grammar(OFFSET)),
        ("margin-right", Grammar(OFFSET)),
        ("margin-top", Grammar(OFFSET)),
        ("mark", NoOp),
        ("mark-after", NoOp),
        ("mark-before", NoOp),
        ("marks", NoOp),
        ("marquee-direction", NoOp),
        ("marquee-play-count", NoOp),
        ("marquee-speed", NoOp),
        ("marquee-style", NoOp),
        ("max-height", Grammar(MAX_SIZE)),
        ("max-width", Grammar(MAX_SIZE)),
        ("min-height", Grammar(MIN_SIZE)),
        ("min-width", Grammar(MIN_SIZE)),
        ("move-to", NoOp),
        ("nav-down", NoOp),
        ("nav-index", NoOp),
        ("nav-left", NoOp),
        ("nav-right", NoOp),
        ("nav-up", NoOp),
        ("object-fit", Grammar("fill | contain | cover | none | scale-down")),
        ("object-position", Grammar("<bg-position>")),
        ("opacity", Grammar("<number> | inherit")),
        ("order", Grammar("<integer>")),
        ("-webkit-order", Grammar("<integer>")),
        ("orphans", Grammar("<integer> | inherit")),
        ("outline", NoOp),
        ("outline-color", Grammar("<color> | invert | inherit")),
        ("outline-offset", NoOp),
        ("outline-style", Grammar("<border-style> | inherit")),
        ("outline-width", Grammar("<border-width> | inherit")),
        ("overflow", Grammar("visible | hidden | scroll | auto | inherit")),
        ("overflow-style", NoOp),
        ("overflow-wrap", Grammar("normal | break-word")),
        ("overflow-x", NoOp),
        ("overflow-y", NoOp),
        ("padding", multi(PADDING, 4)),
        ("padding-bottom", Grammar(PADDING)),
        ("padding-left", Grammar(PADDING)),
        ("padding-right", Grammar(PADDING)),
        ("padding-top", Grammar(PADDING)),
        ("page", NoOp),
        ("page-break-after", Grammar(PAGE_BREAK)),
        ("page-break-before", Grammar(PAGE_BREAK)),
        ("page-break-inside", Grammar("auto | avoid | inherit")),
        ("page-policy", NoOp),
        ("pause", NoOp),
        ("pause-after", NoOp),
        ("pause-before", NoOp),
        ("perspective", NoOp),
        ("perspective-origin", NoOp),
        ("phonemes", NoOp),
        ("pitch", NoOp),
        ("pitch-range", NoOp),
        ("play-during", NoOp),
        ("pointer-events", Grammar(
            "auto | none | visiblePainted | visibleFill | visibleStroke | visible | painted | fill | stroke | all | \
             inherit",
        )),
        ("position", Grammar("static | relative | absolute | fixed | inherit")),
        ("presentation-level", NoOp),
        ("punctuation-trim", NoOp),
        ("quotes", NoOp),
        ("rendering-intent", NoOp),
        ("resize", NoOp),
        ("rest", NoOp),
        ("rest-after", NoOp),
        ("rest-before", NoOp),
        ("richness", NoOp),
        ("right", Grammar(OFFSET)),
        ("rotation", NoOp),
        ("rotation-point", NoOp),
        ("ruby-align", NoOp),
        ("ruby-overhang", NoOp),
        ("ruby-position", NoOp),
        ("ruby-span", NoOp),
        ("size", NoOp),
        ("speak", Grammar("normal | none | spell-out | inherit")),
        ("speak-header", Grammar("once | always | inherit")),
        ("speak-numeral", Grammar("digits | continuous | inherit")),
        ("speak-punctuation", Grammar("code | none | inherit")),
        ("speech-rate", NoOp),
        ("src", NoOp),
        ("stress", NoOp),
        ("string-set", NoOp),
        ("table-layout", Grammar("auto | fixed | inherit")),
        ("tab-size", Grammar("<integer> | <length>")),
        ("target", NoOp),
        ("target-name", NoOp),
        ("target-new", NoOp),
        ("target-position", NoOp),
        ("text-align", Grammar("left | right | center | justify | match-parent | start | end | inherit")),
        ("text-align-last", NoOp),
        ("text-decoration", NoOp),
        ("text-emphasis", NoOp),
        ("text-height", NoOp),
        ("text-indent", Grammar("<length> | <percentage> | inherit")),
        ("text-justify", Grammar("auto | none | inter-word | inter-ideograph | inter-cluster | distribute | kashida")),
        ("text-outline", NoOp),
        ("text-overflow", NoOp),
        ("text-rendering", Grammar("auto | optimizeSpeed | optimizeLegibility | geometricPrecision | inherit")),
        ("text-shadow", Custom(box_shadow)),
        ("text-transform", Grammar("capitalize | uppercase | lowercase | none | inherit")),
        ("text-wrap", Grammar("normal | none | avoid")),
        ("top", Grammar(OFFSET)),
        ("-ms-touch-action", Grammar(TOUCH_ACTION)),
        ("touch-action", Grammar(TOUCH_ACTION)),
        ("transform", NoOp),
        ("transform-origin", NoOp),
        ("transform-style", NoOp),
        ("transition", NoOp),
        ("transition-delay", NoOp),
        ("transition-duration", NoOp),
        ("transition-property", NoOp),
        ("transition-timing-function", NoOp),
        ("unicode-bidi", Grammar(
            "normal | embed | isolate | bidi-override | isolate-override | plaintext | inherit",
        )),
        ("user-modify", Grammar("read-only | read-write | write-only | inherit")),
        ("user-select", Grammar("none | text | toggle | element | elements | all | inherit")),
        ("vertical-align", Grammar(
            "auto | use-script | baseline | sub | super | top | text-top | central | middle | bottom | text-bottom | \
             <percentage> | <length> | inherit",
        )),
        ("visibility", Grammar("visible | hidden | collapse | inherit")),
        ("voice-balance", NoOp),
        ("voice-duration", NoOp),
        ("voice-family", NoOp),
        ("voice-pitch", NoOp),
        ("voice-pitch-range", NoOp),
        ("voice-rate", NoOp),
        ("voice-stress", NoOp),
        ("voice-volume", NoOp),
        ("volume", NoOp),
        ("white-space", Grammar(
            "normal | pre | nowrap | pre-wrap | pre-line | inherit | -pre-wrap | -o-pre-wrap | -moz-pre-wrap | \
             -hp-pre-wrap",
        )),
        ("white-space-collapse", NoOp),
        ("widows", Grammar("<integer> | inherit")),
        ("width", Grammar("<length> | <percentage> | <content-sizing> | auto | inherit")),
        ("word-break", Grammar("normal | keep-all | break-all")),
        ("word-spacing", Grammar("<length> | normal | inherit")),
        ("word-wrap", Grammar("normal | break-word")),
        ("writing-mode", Grammar(
            "horizontal-tb | vertical-rl | vertical-lr | lr-tb | rl-tb | tb-rl | bt-rl | tb-lr | bt-lr | lr-bt | \
             rl-bt | lr | rl | tb | inherit",
        )),
        ("z-index", Grammar("<integer> | auto | inherit")),
        ("zoom", Grammar("<number> | <percentage> | normal")),
    ]);
}

fn expected(grammar: &str, found: &crate::node::PropertyValuePart) -> ValidationError {
    ValidationError::new(
        &format!("Expected ({}) but found '{}'.", grammar, found.text),
        found.location,
    )
}

/// Leftover parts are an error. Which message depends on whether anything before them matched.
fn finish(expression: &mut PropertyValueIterator, valid: bool, grammar: &str) -> ValidationResult<()> {
    match expression.next() {
        Some(part) if valid => Err(end_of_value(part)),
        Some(part) => Err(expected(grammar, part)),
        None => Ok(()),
    }
}

/// `<angle> | [[ left-side | ... | right-side ] || behind ] | leftwards | rightwards | inherit`
fn azimuth(expression: &mut PropertyValueIterator) -> ValidationResult<()> {
    const SIMPLE: &str = "<angle> | leftwards | rightwards | inherit";
    const DIRECTION: &str =
        "left-side | far-left | left | center-left | center | center-right | right | far-right | right-side";

    let mut valid = false;

    if !is_any(expression, SIMPLE)? {
        let behind = is_any(expression, "behind")?;
        valid = behind;

        if is_any(expression, DIRECTION)? {
            valid = true;
            if !behind {
                is_any(expression, "behind")?;
            }
        }
    }

    finish(expression, valid, "<'azimuth'>")
}

/// `[<number> | <percentage>]{1,4} && fill?`
fn border_image_slice(expression: &mut PropertyValueIterator) -> ValidationResult<()> {
    let mut valid = false;
    let fill = is_any(expression, "fill")?;
    if fill {
        valid = true;
    }

    let mut count = 0;
    while expression.has_next() && count < 4 {
        valid = is_any(expression, "<number> | <percentage>")?;
        if !valid {
            break;
        }
        count += 1;
    }

    if fill {
        valid = true;
    } else {
        is_any(expression, "fill")?;
    }

    finish(expression, valid, "[<number> | <percentage>]{1,4} && fill?")
}

/// Up to four horizontal radii, optionally followed by a slash and up to four vertical radii
fn border_radius(expression: &mut PropertyValueIterator) -> ValidationResult<()> {
    let mut valid = false;
    let mut slash = false;
    let mut count = 0;
    let mut max = 8;

    while expression.has_next() && count < max {
        valid = is_any(expression, "<length> | <percentage> | inherit")?;
        if !valid {
            let is_slash = expression.peek(0).is_some_and(|p| p.text == "/");
            if is_slash && count > 0 && !slash {
                slash = true;
                max = count + 5;
                expression.next();
            } else {
                break;
            }
        }
        count += 1;
    }

    finish(expression, valid, "<'border-radius'>")
}

/// `none | <shadow> [ , <shadow> ]*`
fn box_shadow(expression: &mut PropertyValueIterator) -> ValidationResult<()> {
    if is_any(expression, "none")? {
        return match expression.next() {
            Some(part) => Err(end_of_value(part)),
            None => Ok(()),
        };
    }

    multi_property("<shadow>", expression, true, None)
}

/// `normal | [ <feature-tag-value> [ <integer> | on | off ]? ]#`
fn font_feature_settings(expression: &mut PropertyValueIterator) -> ValidationResult<()> {
    const GRAMMAR: &str = "normal | <feature-tag-value> [ <integer> | on | off ]?#";

    if is_any(expression, "normal")? {
        return finish(expression, true, GRAMMAR);
    }

    loop {
        let Some(part) = expression.peek(0) else {
            break;
        };
        if !is_any(expression, "<feature-tag-value>")? {
            return Err(expected(GRAMMAR, part));
        }
        is_any(expression, "<integer> | on | off")?;

        match expression.peek(0) {
            Some(part) if part.text == "," => {
                expression.next();
                if !expression.has_next() {
                    return Err(end_of_value(part));
                }
            }
            Some(part) => return Err(end_of_value(part)),
            None => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_by_lowercase_name() {
        assert!(matches!(PROPERTIES.get("color"), Some(Grammar(_))));
        assert!(matches!(PROPERTIES.get("margin"), Some(Descriptor::Multi { max: Some(4), .. })));
        assert!(matches!(PROPERTIES.get("font"), Some(NoOp)));
        assert!(matches!(PROPERTIES.get("box-shadow"), Some(Custom(_))));
        assert!(PROPERTIES.get("Color").is_none());
    }

    #[test]
    fn group_grammars_use_double_bars() {
        for name in ["border", "border-top", "column-rule", "flex-flow"] {
            match PROPERTIES.get(name) {
                Some(Grammar(types)) => assert!(types.contains(" || "), "{}", name),
                other => panic!("{} is {:?}", name, other),
            }
        }
    }
}
