/// ParserConfig holds the options that change how CSS is parsed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParserConfig {
    /// Accept `*property: value` and validate it as `property`
    pub star_hack: bool,
    /// Accept `_property: value` and validate it as `property`
    pub underscore_hack: bool,
    /// Accept old IE `filter` syntax like `progid:...(a=b)` and `alpha(opacity=50)`
    pub ie_filters: bool,
    /// Every syntax error aborts the parse instead of being reported and skipped
    pub strict: bool,
    /// Optional source filename or url, only used for logging
    pub source: Option<String>,
}
