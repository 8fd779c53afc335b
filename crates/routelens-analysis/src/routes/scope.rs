//! Handler scope extraction.
//!
//! Given a candidate, find the request handler among the declaring call's
//! arguments and return the text of its body. The search window runs from
//! where the handler arguments begin to the `)` that closes the call (or the
//! next route declaration, whichever comes first). Inside the window we look
//! for a parameter named `req`, `request` or `ctx`, step over the rest of its
//! parameter list and any return type annotation, and require the body's `{`
//! right after `)` or `=>`. The body is then cut out by depth-balanced brace
//! counting, so nested blocks and callbacks do not end the scope early.
//!
//! Known limitation: braces and parentheses inside string or template
//! literals are counted.

use std::sync::OnceLock;

use regex::Regex;

use super::text::{matching_delimiter, regex, skip_whitespace};
use super::types::RouteCandidate;

/// Parameter names that identify a request handler.
pub const REQUEST_IDENTIFIERS: &[&str] = &["req", "request", "ctx"];

/// Outcome of scope extraction. Both states are normal results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerScope<'a> {
    /// Text strictly between the handler's opening and closing braces.
    Found { body: &'a str, offset: usize },
    /// No handler signature in the window, or its braces never balanced.
    NotFound,
}

impl<'a> HandlerScope<'a> {
    /// Text input inference should run over: the handler body, or the whole
    /// file when no body was isolated (more recall, less precision).
    pub fn analysis_text(&self, whole_file: &'a str) -> &'a str {
        match self {
            HandlerScope::Found { body, .. } => body,
            HandlerScope::NotFound => whole_file,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, HandlerScope::Found { .. })
    }
}

/// A request parameter: `req,` / `req)` / `req:` inside a parameter list,
/// or a bare `ctx =>`. Group 1 is the terminator.
fn request_param_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(&format!(
            r"\b(?:{})\b\s*([,):]|=>)",
            REQUEST_IDENTIFIERS.join("|")
        ))
    })
}

/// End of the handler search window for `candidates[index]`: the call's
/// closing `)`, or the next declaration at or past the arguments if that
/// comes first.
pub fn search_window_end(candidates: &[RouteCandidate], index: usize) -> usize {
    let candidate = &candidates[index];
    candidates[index + 1..]
        .iter()
        .map(|c| c.match_position)
        .find(|&pos| pos >= candidate.arguments_offset)
        .map_or(candidate.call_end, |next| next.min(candidate.call_end))
}

/// Isolate the handler body for `candidate`.
///
/// `window_end` bounds the search; see [`search_window_end`].
pub fn extract_handler_scope<'a>(
    text: &'a str,
    candidate: &RouteCandidate,
    window_end: usize,
) -> HandlerScope<'a> {
    let start = candidate.arguments_offset.min(text.len());
    let end = window_end.clamp(start, text.len());
    let Some(window) = text.get(start..end) else {
        return HandlerScope::NotFound;
    };

    let Some(caps) = request_param_regex().captures(window) else {
        return HandlerScope::NotFound;
    };
    let (Some(param), Some(terminator)) = (caps.get(0), caps.get(1)) else {
        return HandlerScope::NotFound;
    };

    let after_params = if terminator.as_str() == "=>" {
        start + terminator.start()
    } else {
        match closing_paren(text, start + param.start(), end) {
            Some(close) => close + 1,
            None => return HandlerScope::NotFound,
        }
    };

    let Some(open) = body_open_brace(text, after_params, end) else {
        return HandlerScope::NotFound;
    };
    match matching_delimiter(text, open, b'{', b'}') {
        Some(close) => HandlerScope::Found {
            body: &text[open + 1..close],
            offset: open + 1,
        },
        None => HandlerScope::NotFound,
    }
}

/// The `)` ending the parameter list that contains `from`.
fn closing_paren(text: &str, from: usize, limit: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, &byte) in text.as_bytes()[from..limit].iter().enumerate() {
        match byte {
            b'(' => depth += 1,
            b')' if depth == 0 => return Some(from + i),
            b')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// After a parameter list: an optional `: ReturnType`, an optional `=>`,
/// then the body's `{`. Anything else (an expression body) is no body.
fn body_open_brace(text: &str, from: usize, limit: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = skip_whitespace(text, from);
    if bytes.get(i) == Some(&b':') {
        i = skip_return_type(text, i + 1, limit)?;
    }
    if text[i..].starts_with("=>") {
        i = skip_whitespace(text, i + 2);
    }
    (i < limit && bytes.get(i) == Some(&b'{')).then_some(i)
}

/// Skip a return type annotation; returns the offset of the `=>` or body
/// `{` that follows it.
fn skip_return_type(text: &str, from: usize, limit: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth = 0usize;
    let mut i = from;
    while i < limit {
        match bytes[i] {
            b'=' if bytes.get(i + 1) == Some(&b'>') => {
                if depth == 0 {
                    return Some(i);
                }
                i += 1;
            }
            b'(' | b'[' | b'<' => depth += 1,
            b')' | b']' | b'>' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return None,
            b'{' if depth == 0 => {
                // An object type is followed by `=>`; a body is not.
                let close = matching_delimiter(text, i, b'{', b'}')?;
                let next = skip_whitespace(text, close + 1);
                if text[next..].starts_with("=>") {
                    return Some(next);
                }
                return Some(i);
            }
            b'{' => {
                i = matching_delimiter(text, i, b'{', b'}')?;
            }
            _ => {}
        }
        i += 1;
    }
    None
}
