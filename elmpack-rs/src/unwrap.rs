//! Unwrapping of the Elm compiler's generated bundle.
//!
//! The compiler emits one self-invoking function,
//! `(function(scope){ ... }(this));`, which exports the application onto
//! `scope`. Unwrapping strips that wrapper and declares `scope` as the ambient
//! global object instead, so the application becomes visible to the starter
//! script that is concatenated after it.
//!
//! The function body is located with a brace-depth scanner rather than by raw
//! string search, so braces inside string, template, comment and regular
//! expression literals do not shift the boundaries.
//!
//! Whether a `/` starts a regular expression is decided from the preceding
//! token: a `)` closing an `if`/`for`/`while`/`with` header or a `}` closing a
//! block allows one, a `)` closing a call or a `}` closing an object literal
//! does not. Automatic semicolon insertion is not modelled, so a regular
//! expression at the start of a line following an identifier is read as a
//! division.

use crate::error::{ElmpackError, ElmpackResult};
use crate::text::{is_identifier, strip_bom};

/// Global object the unwrapped bundle is bound to in a browser.
pub const DEFAULT_GLOBAL_OBJECT: &str = "window";

/// Keywords after which a `/` starts a regular expression rather than a division.
const REGEX_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "case",
    "delete",
    "do",
    "else",
    "in",
    "new",
    "of",
    "throw",
    "void",
    "yield",
];

/// Keywords whose parenthesized header is followed by a statement.
const CONTROL_KEYWORDS: &[&str] = &["if", "for", "while", "with"];

/// Keywords after which a `{` opens an object literal rather than a block.
const OBJECT_PREFIX_KEYWORDS: &[&str] = &[
    "return",
    "typeof",
    "instanceof",
    "case",
    "delete",
    "in",
    "new",
    "of",
    "throw",
    "void",
    "yield",
];

/// Strips the self-invoking wrapper of `bundle` and rebinds `scope` to `global`.
///
/// Returns `var scope = <global>;` followed by the text strictly between the
/// first `{` and its matching `}`.
///
/// # Example
/// ```
/// let unwrapped = elmpack_rs::unwrap("(function(){var a=1;})();", "window").unwrap();
/// assert_eq!(unwrapped, "var scope = window;var a=1;");
/// ```
pub fn unwrap(bundle: &str, global: &str) -> ElmpackResult<String> {
    if !is_identifier(global) {
        return Err(ElmpackError::InvalidGlobalHandle(global.to_string()));
    }
    let body = function_body(strip_bom(bundle))?;
    log::debug!(
        "Unwrapped bundle: {} bytes in, {} bytes of function body",
        bundle.len(),
        body.len()
    );
    Ok(format!("var scope = {global};{body}"))
}

/// Finds the body of the single outermost brace pair in `text`.
fn function_body(text: &str) -> ElmpackResult<&str> {
    let mut scanner = BraceScanner::new(text);

    let open = match scanner.next_brace()? {
        Some((at, Brace::Open)) => at,
        Some((at, Brace::Close)) => {
            return Err(malformed(format!(
                "unmatched `}}` at byte {at} before the function body"
            )))
        }
        None => return Err(malformed("no `{` found".to_string())),
    };

    let mut depth = 1usize;
    let close = loop {
        match scanner.next_brace()? {
            Some((_, Brace::Open)) => depth += 1,
            Some((at, Brace::Close)) => {
                depth -= 1;
                if depth == 0 {
                    break at;
                }
            }
            None => {
                return Err(malformed(format!(
                    "function body opened at byte {open} is never closed"
                )))
            }
        }
    };

    // Anything braced after the body means the text is not one wrapper.
    if let Some((at, _)) = scanner.next_brace()? {
        return Err(malformed(format!(
            "unexpected brace at byte {at} after the function body closed at byte {close}"
        )));
    }

    Ok(&text[open + 1..close])
}

fn malformed(reason: String) -> ElmpackError {
    ElmpackError::MalformedBundleShape(reason)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Brace {
    Open,
    Close,
}

/// Byte-level scanner yielding the braces of JavaScript source that are
/// structural, i.e. outside of literals and comments.
///
/// Every delimiter it looks at is ASCII, so scanning bytes is safe for UTF-8
/// input: continuation bytes never match.
struct BraceScanner<'a> {
    src: &'a [u8],
    pos: usize,
    /// Index of the last significant (non-whitespace, non-comment) byte.
    prev: Option<usize>,
    /// Open parentheses, `true` for a control statement header.
    parens: Vec<bool>,
    /// Open braces, `true` for an object literal.
    braces: Vec<bool>,
    /// Offset of the last closing `)` or `}` and whether a regex may follow it.
    closed: Option<(usize, bool)>,
}

impl<'a> BraceScanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            src: text.as_bytes(),
            pos: 0,
            prev: None,
            parens: Vec::new(),
            braces: Vec::new(),
            closed: None,
        }
    }

    /// Advances to the next structural brace and returns its byte offset.
    fn next_brace(&mut self) -> ElmpackResult<Option<(usize, Brace)>> {
        while let Some(&b) = self.src.get(self.pos) {
            match b {
                b'\'' | b'"' => {
                    let start = self.pos;
                    self.skip_string(b)?;
                    self.prev = Some(start);
                    continue;
                }
                b'`' => {
                    let start = self.pos;
                    self.skip_template()?;
                    self.prev = Some(start);
                    continue;
                }
                b'/' => match self.src.get(self.pos + 1) {
                    Some(b'/') => {
                        self.skip_line_comment();
                        continue;
                    }
                    Some(b'*') => {
                        self.skip_block_comment()?;
                        continue;
                    }
                    _ if self.regex_allowed() => {
                        let start = self.pos;
                        self.skip_regex()?;
                        self.prev = Some(start);
                        continue;
                    }
                    _ => {}
                },
                b'(' => {
                    let control = self
                        .prev_word()
                        .is_some_and(|word| is_one_of(word, CONTROL_KEYWORDS));
                    self.parens.push(control);
                }
                b')' => {
                    let control = self.parens.pop().unwrap_or(false);
                    self.closed = Some((self.pos, control));
                }
                b'{' | b'}' => {
                    let at = self.pos;
                    let brace = if b == b'{' {
                        let object = self.brace_opens_object();
                        self.braces.push(object);
                        Brace::Open
                    } else {
                        let object = self.braces.pop().unwrap_or(false);
                        self.closed = Some((at, !object));
                        Brace::Close
                    };
                    self.pos += 1;
                    self.prev = Some(at);
                    return Ok(Some((at, brace)));
                }
                _ => {}
            }
            if !b.is_ascii_whitespace() {
                self.prev = Some(self.pos);
            }
            self.pos += 1;
        }
        Ok(None)
    }

    /// Decides whether a `/` at the current position opens a regex literal,
    /// based on the preceding significant token.
    fn regex_allowed(&self) -> bool {
        let Some(prev) = self.prev else {
            return true;
        };
        if let Some((at, allowed)) = self.closed {
            if at == prev {
                return allowed;
            }
        }
        if let Some(word) = self.prev_word() {
            return is_one_of(word, REGEX_PREFIX_KEYWORDS);
        }
        !matches!(self.src[prev], b')' | b']' | b'\'' | b'"' | b'`' | b'/')
    }

    /// Decides whether a `{` at the current position opens an object literal.
    fn brace_opens_object(&self) -> bool {
        let Some(prev) = self.prev else {
            return false;
        };
        if let Some(word) = self.prev_word() {
            return is_one_of(word, OBJECT_PREFIX_KEYWORDS);
        }
        match self.src[prev] {
            // `=>` is followed by a function body
            b'>' => prev == 0 || self.src[prev - 1] != b'=',
            b => matches!(
                b,
                b'(' | b'['
                    | b','
                    | b':'
                    | b'='
                    | b'?'
                    | b'!'
                    | b'&'
                    | b'|'
                    | b'+'
                    | b'-'
                    | b'*'
                    | b'%'
                    | b'<'
                    | b'~'
                    | b'^'
            ),
        }
    }

    /// The identifier or keyword ending at the last significant byte, if any.
    fn prev_word(&self) -> Option<&'a [u8]> {
        let prev = self.prev?;
        if !is_ident_byte(self.src[prev]) {
            return None;
        }
        let start = self.src[..=prev]
            .iter()
            .rposition(|&c| !is_ident_byte(c))
            .map_or(0, |i| i + 1);
        Some(&self.src[start..=prev])
    }

    fn skip_string(&mut self, quote: u8) -> ElmpackResult<()> {
        let start = self.pos;
        self.pos += 1;
        while let Some(&b) = self.src.get(self.pos) {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => break,
                _ if b == quote => {
                    self.pos += 1;
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(malformed(format!(
            "unterminated string literal starting at byte {start}"
        )))
    }

    fn skip_template(&mut self) -> ElmpackResult<()> {
        let start = self.pos;
        self.pos += 1;
        while let Some(&b) = self.src.get(self.pos) {
            match b {
                b'\\' => self.pos += 2,
                b'`' => {
                    self.pos += 1;
                    return Ok(());
                }
                b'$' if self.src.get(self.pos + 1) == Some(&b'{') => {
                    self.pos += 2;
                    self.prev = None;
                    self.braces.push(true);
                    self.skip_substitution(start)?;
                }
                _ => self.pos += 1,
            }
        }
        Err(malformed(format!(
            "unterminated template literal starting at byte {start}"
        )))
    }

    /// Skips a `${ ... }` template substitution, which may itself contain braces.
    fn skip_substitution(&mut self, template_start: usize) -> ElmpackResult<()> {
        let mut depth = 1usize;
        while depth > 0 {
            match self.next_brace()? {
                Some((_, Brace::Open)) => depth += 1,
                Some((_, Brace::Close)) => depth -= 1,
                None => {
                    return Err(malformed(format!(
                        "unterminated template literal starting at byte {template_start}"
                    )))
                }
            }
        }
        Ok(())
    }

    fn skip_line_comment(&mut self) {
        let end = self.src[self.pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map_or(self.src.len(), |i| self.pos + i);
        self.pos = end;
    }

    fn skip_block_comment(&mut self) -> ElmpackResult<()> {
        let start = self.pos;
        let end = self.src[start + 2..]
            .windows(2)
            .position(|w| w == b"*/")
            .ok_or_else(|| {
                malformed(format!("unterminated block comment starting at byte {start}"))
            })?;
        self.pos = start + 2 + end + 2;
        Ok(())
    }

    fn skip_regex(&mut self) -> ElmpackResult<()> {
        let start = self.pos;
        let mut in_class = false;
        self.pos += 1;
        while let Some(&b) = self.src.get(self.pos) {
            match b {
                b'\\' => self.pos += 2,
                b'\n' => break,
                b'[' => {
                    in_class = true;
                    self.pos += 1;
                }
                b']' => {
                    in_class = false;
                    self.pos += 1;
                }
                b'/' if !in_class => {
                    self.pos += 1;
                    while self.src.get(self.pos).is_some_and(u8::is_ascii_alphabetic) {
                        self.pos += 1;
                    }
                    return Ok(());
                }
                _ => self.pos += 1,
            }
        }
        Err(malformed(format!(
            "unterminated regular expression starting at byte {start}"
        )))
    }
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn is_one_of(word: &[u8], keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| keyword.as_bytes() == word)
}
