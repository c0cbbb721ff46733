use csslint_shared::reader::Location;
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::fmt;

/// Channel that comment tokens are placed on. Tokens on a channel are only returned when that
/// channel is explicitly requested.
pub const COMMENT_CHANNEL: &str = "comment";

/// All token types the tokenizer can produce. The discriminant indexes [`TOKEN_INFO`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenType {
    Eof,
    Cdo,
    Cdc,
    S,
    Comment,
    Includes,
    DashMatch,
    PrefixMatch,
    SuffixMatch,
    SubstringMatch,
    String,
    Ident,
    Hash,
    ImportSym,
    PageSym,
    MediaSym,
    FontFaceSym,
    CharsetSym,
    NamespaceSym,
    ViewportSym,
    UnknownSym,
    KeyframesSym,
    ImportantSym,
    Length,
    Angle,
    Time,
    Freq,
    Dimension,
    Percentage,
    Number,
    Uri,
    Function,
    UnicodeRange,
    Invalid,
    Plus,
    Greater,
    Comma,
    Tilde,
    Not,
    TopLeftCornerSym,
    TopLeftSym,
    TopCenterSym,
    TopRightSym,
    TopRightCornerSym,
    BottomLeftCornerSym,
    BottomLeftSym,
    BottomCenterSym,
    BottomRightSym,
    BottomRightCornerSym,
    LeftTopSym,
    LeftMiddleSym,
    LeftBottomSym,
    RightTopSym,
    RightMiddleSym,
    RightBottomSym,
    Resolution,
    IeFunction,
    Char,
    Pipe,
    Slash,
    Minus,
    Star,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Equals,
    Colon,
    Semicolon,
    LParen,
    RParen,
    Dot,
}

/// Static metadata for a token type
pub struct TokenInfo {
    pub token_type: TokenType,
    /// Name used in error messages
    pub name: &'static str,
    /// Literal source texts that lex to this type
    pub literals: &'static [&'static str],
    /// Hidden tokens are never handed to the parser
    pub hide: bool,
    pub channel: Option<&'static str>,
    /// Closing character for bracket tokens
    pub end_char: Option<char>,
}

const fn info(token_type: TokenType, name: &'static str, literals: &'static [&'static str]) -> TokenInfo {
    TokenInfo {
        token_type,
        name,
        literals,
        hide: false,
        channel: None,
        end_char: None,
    }
}

const fn bracket(
    token_type: TokenType,
    name: &'static str,
    literals: &'static [&'static str],
    end_char: char,
) -> TokenInfo {
    TokenInfo {
        token_type,
        name,
        literals,
        hide: false,
        channel: None,
        end_char: Some(end_char),
    }
}

pub static TOKEN_INFO: [TokenInfo; 72] = [
    info(TokenType::Eof, "EOF", &[]),
    info(TokenType::Cdo, "CDO", &["<!--"]),
    info(TokenType::Cdc, "CDC", &["-->"]),
    info(TokenType::S, "S", &[]),
    TokenInfo {
        token_type: TokenType::Comment,
        name: "COMMENT",
        literals: &[],
        hide: true,
        channel: Some(COMMENT_CHANNEL),
        end_char: None,
    },
    info(TokenType::Includes, "INCLUDES", &["~="]),
    info(TokenType::DashMatch, "DASHMATCH", &["|="]),
    info(TokenType::PrefixMatch, "PREFIXMATCH", &["^="]),
    info(TokenType::SuffixMatch, "SUFFIXMATCH", &["$="]),
    info(TokenType::SubstringMatch, "SUBSTRINGMATCH", &["*="]),
    info(TokenType::String, "STRING", &[]),
    info(TokenType::Ident, "IDENT", &[]),
    info(TokenType::Hash, "HASH", &[]),
    info(TokenType::ImportSym, "IMPORT_SYM", &["@import"]),
    info(TokenType::PageSym, "PAGE_SYM", &["@page"]),
    info(TokenType::MediaSym, "MEDIA_SYM", &["@media"]),
    info(TokenType::FontFaceSym, "FONT_FACE_SYM", &["@font-face"]),
    info(TokenType::CharsetSym, "CHARSET_SYM", &["@charset"]),
    info(TokenType::NamespaceSym, "NAMESPACE_SYM", &["@namespace"]),
    info(
        TokenType::ViewportSym,
        "VIEWPORT_SYM",
        &["@viewport", "@-ms-viewport", "@-o-viewport"],
    ),
    info(TokenType::UnknownSym, "UNKNOWN_SYM", &[]),
    info(
        TokenType::KeyframesSym,
        "KEYFRAMES_SYM",
        &[
            "@keyframes",
            "@-webkit-keyframes",
            "@-moz-keyframes",
            "@-o-keyframes",
        ],
    ),
    info(TokenType::ImportantSym, "IMPORTANT_SYM", &["!important"]),
    info(TokenType::Length, "LENGTH", &[]),
    info(TokenType::Angle, "ANGLE", &[]),
    info(TokenType::Time, "TIME", &[]),
    info(TokenType::Freq, "FREQ", &[]),
    info(TokenType::Dimension, "DIMENSION", &[]),
    info(TokenType::Percentage, "PERCENTAGE", &[]),
    info(TokenType::Number, "NUMBER", &[]),
    info(TokenType::Uri, "URI", &[]),
    info(TokenType::Function, "FUNCTION", &[]),
    info(TokenType::UnicodeRange, "UNICODE_RANGE", &[]),
    info(TokenType::Invalid, "INVALID", &[]),
    info(TokenType::Plus, "PLUS", &["+"]),
    info(TokenType::Greater, "GREATER", &[">"]),
    info(TokenType::Comma, "COMMA", &[","]),
    info(TokenType::Tilde, "TILDE", &["~"]),
    info(TokenType::Not, "NOT", &[":not("]),
    info(TokenType::TopLeftCornerSym, "TOPLEFTCORNER_SYM", &["@top-left-corner"]),
    info(TokenType::TopLeftSym, "TOPLEFT_SYM", &["@top-left"]),
    info(TokenType::TopCenterSym, "TOPCENTER_SYM", &["@top-center"]),
    info(TokenType::TopRightSym, "TOPRIGHT_SYM", &["@top-right"]),
    info(TokenType::TopRightCornerSym, "TOPRIGHTCORNER_SYM", &["@top-right-corner"]),
    info(TokenType::BottomLeftCornerSym, "BOTTOMLEFTCORNER_SYM", &["@bottom-left-corner"]),
    info(TokenType::BottomLeftSym, "BOTTOMLEFT_SYM", &["@bottom-left"]),
    info(TokenType::BottomCenterSym, "BOTTOMCENTER_SYM", &["@bottom-center"]),
    info(TokenType::BottomRightSym, "BOTTOMRIGHT_SYM", &["@bottom-right"]),
    info(TokenType::BottomRightCornerSym, "BOTTOMRIGHTCORNER_SYM", &["@bottom-right-corner"]),
    info(TokenType::LeftTopSym, "LEFTTOP_SYM", &["@left-top"]),
    info(TokenType::LeftMiddleSym, "LEFTMIDDLE_SYM", &["@left-middle"]),
    info(TokenType::LeftBottomSym, "LEFTBOTTOM_SYM", &["@left-bottom"]),
    info(TokenType::RightTopSym, "RIGHTTOP_SYM", &["@right-top"]),
    info(TokenType::RightMiddleSym, "RIGHTMIDDLE_SYM", &["@right-middle"]),
    info(TokenType::RightBottomSym, "RIGHTBOTTOM_SYM", &["@right-bottom"]),
    info(TokenType::Resolution, "RESOLUTION", &[]),
    info(TokenType::IeFunction, "IE_FUNCTION", &[]),
    info(TokenType::Char, "CHAR", &[]),
    info(TokenType::Pipe, "PIPE", &["|"]),
    info(TokenType::Slash, "SLASH", &["/"]),
    info(TokenType::Minus, "MINUS", &["-"]),
    info(TokenType::Star, "STAR", &["*"]),
    bracket(TokenType::LBrace, "LBRACE", &["{"], '}'),
    info(TokenType::RBrace, "RBRACE", &["}"]),
    bracket(TokenType::LBracket, "LBRACKET", &["["], ']'),
    info(TokenType::RBracket, "RBRACKET", &["]"]),
    info(TokenType::Equals, "EQUALS", &["="]),
    info(TokenType::Colon, "COLON", &[":"]),
    info(TokenType::Semicolon, "SEMICOLON", &[";"]),
    bracket(TokenType::LParen, "LPAREN", &["("], ')'),
    info(TokenType::RParen, "RPAREN", &[")"]),
    info(TokenType::Dot, "DOT", &["."]),
];

lazy_static! {
    static ref LITERALS: HashMap<&'static str, TokenType> = {
        let mut map = HashMap::new();
        for entry in TOKEN_INFO.iter() {
            for literal in entry.literals {
                map.insert(*literal, entry.token_type);
            }
        }
        map
    };
}

/// The margin box symbols allowed inside `@page`
pub const MARGIN_SYMS: [TokenType; 16] = [
    TokenType::TopLeftCornerSym,
    TokenType::TopLeftSym,
    TokenType::TopCenterSym,
    TokenType::TopRightSym,
    TokenType::TopRightCornerSym,
    TokenType::BottomLeftCornerSym,
    TokenType::BottomLeftSym,
    TokenType::BottomCenterSym,
    TokenType::BottomRightSym,
    TokenType::BottomRightCornerSym,
    TokenType::LeftTopSym,
    TokenType::LeftMiddleSym,
    TokenType::LeftBottomSym,
    TokenType::RightTopSym,
    TokenType::RightMiddleSym,
    TokenType::RightBottomSym,
];

impl TokenType {
    pub fn info(self) -> &'static TokenInfo {
        &TOKEN_INFO[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Looks up the token type for a literal text such as `@media` or `~=`
    pub fn from_literal(text: &str) -> Option<TokenType> {
        LITERALS.get(text).copied()
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Token {
    pub token_type: TokenType,
    /// Source text of the token. URIs are normalized to `url("...")`.
    pub value: String,
    pub start: Location,
    pub end: Location,
    pub channel: Option<&'static str>,
}

impl Token {
    pub fn new(token_type: TokenType, value: &str, start: Location, end: Location) -> Token {
        Token {
            token_type,
            value: value.to_string(),
            start,
            end,
            channel: token_type.info().channel,
        }
    }

    pub fn end_char(&self) -> Option<char> {
        self.token_type.info().end_char
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
