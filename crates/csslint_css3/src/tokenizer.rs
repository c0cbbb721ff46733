use crate::token_stream::TokenSource;
use crate::tokens::{Token, TokenType};
use csslint_shared::reader::{Location, Reader};

/// CSS tokenizer. Produces one [`Token`] per call by dispatching on the next character of the reader.
pub struct Tokenizer {
    reader: Reader,
    /// Set when the EOF token has been handed out by the iterator
    done: bool,
}

impl Tokenizer {
    pub fn new(input: &str) -> Self {
        Self {
            reader: Reader::new(input),
            done: false,
        }
    }

    pub fn current_location(&self) -> Location {
        self.reader.location()
    }

    /// Reads the next token. Returns an EOF token when the input is exhausted.
    pub fn consume_token(&mut self) -> Token {
        let start = self.reader.location();

        let Some(c) = self.reader.read() else {
            return self.create_token(TokenType::Eof, "", start);
        };

        match c {
            '/' => {
                if self.reader.peek(1) == Some('*') {
                    self.comment_token(c, start)
                } else {
                    self.char_token(c, start)
                }
            }
            '|' | '~' | '^' | '$' | '*' => {
                if self.reader.peek(1) == Some('=') {
                    self.comparison_token(c, start)
                } else {
                    self.char_token(c, start)
                }
            }
            '"' | '\'' => self.string_token(c, start),
            '#' => {
                if self.reader.peek(1).is_some_and(is_name_char) {
                    self.hash_token(c, start)
                } else {
                    self.char_token(c, start)
                }
            }
            '.' => {
                if self.reader.peek(1).is_some_and(|ch| ch.is_ascii_digit()) {
                    self.number_token(c, start)
                } else {
                    self.char_token(c, start)
                }
            }
            '-' => {
                if self.reader.peek(1) == Some('-') {
                    self.html_comment_end_token(c, start)
                } else if self.reader.peek(1).is_some_and(is_name_start) {
                    self.ident_or_function_token(c.to_string(), start)
                } else {
                    self.char_token(c, start)
                }
            }
            '!' => self.important_token(c, start),
            '@' => self.at_rule_token(c, start),
            ':' => self.not_token(c, start),
            '<' => self.html_comment_start_token(c, start),
            '\\' => {
                if self.reader.peek(1).is_some_and(|ch| !is_newline(ch)) {
                    let first = self.read_escape();
                    self.ident_or_function_token(first.to_string(), start)
                } else {
                    self.char_token(c, start)
                }
            }
            'u' | 'U' if self.reader.peek(1) == Some('+') => self.unicode_range_token(c, start),
            _ => {
                if c.is_ascii_digit() {
                    self.number_token(c, start)
                } else if is_whitespace(c) {
                    self.whitespace_token(c, start)
                } else if is_ident_start(c) {
                    self.ident_or_function_token(c.to_string(), start)
                } else {
                    self.char_token(c, start)
                }
            }
        }
    }

    fn create_token(&self, token_type: TokenType, value: &str, start: Location) -> Token {
        Token::new(token_type, value, start, self.reader.location())
    }

    /// Single character token. Known literals get their own type, anything else is a CHAR.
    fn char_token(&self, c: char, start: Location) -> Token {
        let mut buf = [0; 4];
        let text = c.encode_utf8(&mut buf);
        let token_type = TokenType::from_literal(text).unwrap_or(TokenType::Char);
        self.create_token(token_type, text, start)
    }

    fn comment_token(&mut self, first: char, start: Location) -> Token {
        let comment = self.read_comment(first);
        self.create_token(TokenType::Comment, &comment, start)
    }

    fn comparison_token(&mut self, first: char, start: Location) -> Token {
        let mut comparison = first.to_string();
        if let Some(c) = self.reader.read() {
            comparison.push(c);
        }
        let token_type = TokenType::from_literal(&comparison).unwrap_or(TokenType::Char);
        self.create_token(token_type, &comparison, start)
    }

    fn hash_token(&mut self, first: char, start: Location) -> Token {
        let name = self.read_name(first.to_string());
        self.create_token(TokenType::Hash, &name, start)
    }

    fn html_comment_start_token(&mut self, first: char, start: Location) -> Token {
        self.reader.mark();
        let text = format!("{}{}", first, self.reader.read_count(3));
        if text == "<!--" {
            self.create_token(TokenType::Cdo, &text, start)
        } else {
            self.reader.reset();
            self.char_token(first, start)
        }
    }

    fn html_comment_end_token(&mut self, first: char, start: Location) -> Token {
        self.reader.mark();
        let text = format!("{}{}", first, self.reader.read_count(2));
        if text == "-->" {
            self.create_token(TokenType::Cdc, &text, start)
        } else {
            self.reader.reset();
            self.char_token(first, start)
        }
    }

    fn at_rule_token(&mut self, first: char, start: Location) -> Token {
        self.reader.mark();
        let rule = self.read_name(first.to_string());

        if let Some(token_type) = TokenType::from_literal(&rule.to_lowercase()) {
            if token_type != TokenType::Char {
                return self.create_token(token_type, &rule, start);
            }
        }

        if rule.chars().count() > 1 {
            return self.create_token(TokenType::UnknownSym, &rule, start);
        }

        self.reader.reset();
        self.char_token(first, start)
    }

    /// `!important`, with any whitespace or comments between the `!` and the keyword
    fn important_token(&mut self, first: char, start: Location) -> Token {
        self.reader.mark();
        let mut important = first.to_string();

        while let Some(c) = self.reader.read() {
            if c == '/' {
                if self.reader.peek(1) != Some('*') || self.read_comment(c).is_empty() {
                    break;
                }
            } else if is_whitespace(c) {
                important.push(c);
                important.push_str(&self.reader.read_while(is_whitespace));
            } else if c == 'i' || c == 'I' {
                let rest = self.reader.read_count(8);
                if rest.eq_ignore_ascii_case("mportant") {
                    important.push(c);
                    important.push_str(&rest);
                    return self.create_token(TokenType::ImportantSym, &important, start);
                }
                break;
            } else {
                break;
            }
        }

        self.reader.reset();
        self.char_token(first, start)
    }

    fn not_token(&mut self, first: char, start: Location) -> Token {
        self.reader.mark();
        let text = format!("{}{}", first, self.reader.read_count(4));
        if text.eq_ignore_ascii_case(":not(") {
            self.create_token(TokenType::Not, &text, start)
        } else {
            self.reader.reset();
            self.char_token(first, start)
        }
    }

    fn number_token(&mut self, first: char, start: Location) -> Token {
        let mut value = self.read_number(first);
        let mut token_type = TokenType::Number;

        match self.reader.peek(1) {
            Some(c) if is_ident_start(c) => {
                let unit = self.read_unit();
                token_type = unit_token_type(&unit);
                value.push_str(&unit);
            }
            Some('%') => {
                self.reader.read();
                value.push('%');
                token_type = TokenType::Percentage;
            }
            _ => {}
        }

        self.create_token(token_type, &value, start)
    }

    fn read_unit(&mut self) -> String {
        match self.reader.read() {
            Some('\\') => {
                let first = self.read_escape();
                self.read_name(first.to_string())
            }
            Some(c) => self.read_name(c.to_string()),
            None => String::new(),
        }
    }

    /// Quoted string. An unescaped newline or the end of the input inside the string gives an INVALID token.
    fn string_token(&mut self, delim: char, start: Location) -> Token {
        let mut string = delim.to_string();
        let mut token_type = TokenType::String;
        let mut current = self.reader.read();

        loop {
            let Some(c) = current else {
                token_type = TokenType::Invalid;
                break;
            };
            string.push(c);

            if c == '\\' {
                current = self.reader.read();
                let Some(next) = current else {
                    token_type = TokenType::Invalid;
                    break;
                };

                if !next.is_ascii_hexdigit() && !is_newline(next) {
                    string.push(next);
                } else {
                    let mut digits = 0;
                    while let Some(h) = current {
                        if !h.is_ascii_hexdigit() || digits >= 6 {
                            break;
                        }
                        string.push(h);
                        current = self.reader.read();
                        digits += 1;
                    }

                    match current {
                        Some(ws) if is_whitespace(ws) => string.push(ws),
                        _ => continue,
                    }
                }
            } else if c == delim {
                break;
            } else if self.reader.peek(1).is_some_and(is_newline) {
                token_type = TokenType::Invalid;
                break;
            }

            current = self.reader.read();
        }

        self.create_token(token_type, &string, start)
    }

    /// Handles the `-` + `u+` case as well: when no range follows, the `u` is read as an identifier.
    fn unicode_range_token(&mut self, first: char, start: Location) -> Token {
        self.reader.mark();
        self.reader.read();
        let part = self.read_unicode_range_part(true);

        if part.is_empty() {
            self.reader.reset();
            return self.ident_or_function_token(first.to_string(), start);
        }

        let mut value = format!("{}+{}", first, part);
        if !part.contains('?') && self.reader.peek(1) == Some('-') {
            self.reader.mark();
            self.reader.read();
            let second = self.read_unicode_range_part(false);
            if second.is_empty() {
                self.reader.reset();
            } else {
                value.push('-');
                value.push_str(&second);
            }
        }

        self.create_token(TokenType::UnicodeRange, &value, start)
    }

    fn read_unicode_range_part(&mut self, allow_question_mark: bool) -> String {
        let mut part = String::new();

        while part.len() < 6 {
            match self.reader.peek(1) {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.reader.read();
                    part.push(c);
                }
                _ => break,
            }
        }

        if allow_question_mark {
            while part.len() < 6 && self.reader.peek(1) == Some('?') {
                self.reader.read();
                part.push('?');
            }
        }

        part
    }

    fn whitespace_token(&mut self, first: char, start: Location) -> Token {
        let mut value = first.to_string();
        value.push_str(&self.reader.read_while(is_whitespace));
        self.create_token(TokenType::S, &value, start)
    }

    /// Identifier, or a function / URI when directly followed by `(`. `progid:` starts an IE filter function.
    fn ident_or_function_token(&mut self, first: String, start: Location) -> Token {
        let mut ident = self.read_name(first);
        let mut token_type = TokenType::Ident;

        match self.reader.peek(1) {
            Some('(') => {
                self.reader.read();
                ident.push('(');
                token_type = TokenType::Function;

                if ident.eq_ignore_ascii_case("url(") {
                    self.reader.mark();
                    match self.read_uri(&ident) {
                        Some(uri) => {
                            ident = uri;
                            token_type = TokenType::Uri;
                        }
                        None => self.reader.reset(),
                    }
                }
            }
            Some(':') if ident.eq_ignore_ascii_case("progid") => match self.reader.read_to("(") {
                Ok(rest) => {
                    ident.push_str(&rest);
                    token_type = TokenType::IeFunction;
                }
                Err(err) => {
                    log::warn!("unterminated filter function: {}", err);
                    token_type = TokenType::Invalid;
                }
            },
            _ => {}
        }

        self.create_token(token_type, &ident, start)
    }

    /// Reads the body of `url(` up to and including the closing paren. The result is always
    /// normalized to a double quoted argument.
    fn read_uri(&mut self, prefix: &str) -> Option<String> {
        self.reader.read_while(is_whitespace);

        let inner = match self.reader.peek(1) {
            Some(q @ ('"' | '\'')) => {
                self.reader.read();
                let start = self.reader.location();
                let token = self.string_token(q, start);
                if token.token_type == TokenType::Invalid {
                    None
                } else {
                    Some(unquote(&token.value))
                }
            }
            _ => Some(self.read_unquoted_url()),
        };

        self.reader.read_while(is_whitespace);

        let inner = inner?;
        if self.reader.peek(1) != Some(')') {
            return None;
        }
        self.reader.read();

        Some(format!("{}{})", prefix, quote(&inner)))
    }

    fn read_unquoted_url(&mut self) -> String {
        let mut url = String::new();

        while let Some(c) = self.reader.peek(1) {
            if !c.is_ascii() || is_url_char(c) {
                url.push(c);
                self.reader.read();
            } else if c == '\\' && self.reader.peek(2).is_some_and(|n| !is_newline(n)) {
                self.reader.read();
                url.push(self.read_escape());
            } else {
                break;
            }
        }

        url
    }

    fn read_comment(&mut self, first: char) -> String {
        let mut comment = first.to_string();

        match self.reader.read() {
            Some('*') => comment.push('*'),
            _ => return String::new(),
        }

        while let Some(c) = self.reader.read() {
            comment.push(c);
            if c == '*' && comment.len() > 2 && self.reader.peek(1) == Some('/') {
                self.reader.read();
                comment.push('/');
                break;
            }
        }

        comment
    }

    fn read_number(&mut self, first: char) -> String {
        let mut number = first.to_string();
        let mut has_dot = first == '.';

        while let Some(c) = self.reader.peek(1) {
            if c.is_ascii_digit() {
                number.push(c);
            } else if c == '.' && !has_dot {
                has_dot = true;
                number.push(c);
            } else {
                break;
            }
            self.reader.read();
        }

        number
    }

    fn read_name(&mut self, first: String) -> String {
        let mut ident = first;

        while let Some(c) = self.reader.peek(1) {
            if c == '\\' {
                if !self.reader.peek(2).is_some_and(|n| !is_newline(n)) {
                    break;
                }
                self.reader.read();
                ident.push(self.read_escape());
            } else if is_name_char(c) {
                ident.push(c);
                self.reader.read();
            } else {
                break;
            }
        }

        ident
    }

    /// Reads an escape after the backslash has been consumed: one to six hex digits with an optional
    /// trailing whitespace, or a single literal character.
    fn read_escape(&mut self) -> char {
        let mut hex = String::new();
        while hex.len() < 6 {
            match self.reader.peek(1) {
                Some(c) if c.is_ascii_hexdigit() => {
                    self.reader.read();
                    hex.push(c);
                }
                _ => break,
            }
        }

        if hex.is_empty() {
            return match self.reader.read() {
                Some(c) => c,
                None => char::REPLACEMENT_CHARACTER,
            };
        }

        if self.reader.peek(1).is_some_and(is_whitespace) {
            self.reader.read();
        }

        u32::from_str_radix(&hex, 16)
            .ok()
            .filter(|cp| *cp != 0)
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

impl TokenSource for Tokenizer {
    fn next_token(&mut self) -> Token {
        self.consume_token()
    }
}

impl Iterator for Tokenizer {
    type Item = Token;

    /// Yields every token including comments and the final EOF token
    fn next(&mut self) -> Option<Token> {
        if self.done {
            return None;
        }
        let token = self.consume_token();
        if token.is_eof() {
            self.done = true;
        }
        Some(token)
    }
}

fn unit_token_type(unit: &str) -> TokenType {
    match unit.to_ascii_lowercase().as_str() {
        "em" | "ex" | "px" | "gd" | "rem" | "vw" | "vh" | "vmax" | "vmin" | "ch" | "cm" | "mm" | "in"
        | "pt" | "pc" => TokenType::Length,
        "deg" | "rad" | "grad" | "turn" => TokenType::Angle,
        "ms" | "s" => TokenType::Time,
        "hz" | "khz" => TokenType::Freq,
        "dpi" | "dpcm" => TokenType::Resolution,
        _ => TokenType::Dimension,
    }
}

/// Strips the quotes of a string token and resolves its escapes
pub fn unquote(text: &str) -> String {
    let mut chars = text.chars();
    let delim = chars.next();
    let mut inner: Vec<char> = chars.collect();
    if inner.last().copied() == delim {
        inner.pop();
    }

    let mut out = String::new();
    let mut iter = inner.into_iter().peekable();
    while let Some(c) = iter.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let mut hex = String::new();
        while hex.len() < 6 && iter.peek().is_some_and(|h| h.is_ascii_hexdigit()) {
            if let Some(h) = iter.next() {
                hex.push(h);
            }
        }
        if hex.is_empty() {
            match iter.next() {
                Some('\n') | None => {}
                Some(other) => out.push(other),
            }
            continue;
        }
        if iter.peek().is_some_and(|w| is_whitespace(*w)) {
            iter.next();
        }
        let ch = u32::from_str_radix(&hex, 16)
            .ok()
            .and_then(char::from_u32)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        out.push(ch);
    }
    out
}

/// Wraps a value in double quotes, escaping quotes and line breaks
pub fn quote(text: &str) -> String {
    let mut out = String::from("\"");
    for c in text.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\n' | '\u{000C}' => out.push_str(&format!("\\{:x} ", c as u32)),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

pub(crate) fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | '\u{000C}')
}

fn is_newline(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{000C}')
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '\\' || c >= '\u{00A0}'
}

fn is_name_char(c: char) -> bool {
    is_name_start(c) || c.is_ascii_digit() || c == '-'
}

fn is_ident_start(c: char) -> bool {
    c == '-' || is_name_start(c)
}

fn is_url_char(c: char) -> bool {
    matches!(c, '-' | '!' | '#' | '$' | '%' | '&' | '*'..='[' | ']'..='~')
}
