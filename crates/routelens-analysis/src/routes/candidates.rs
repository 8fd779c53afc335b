//! Route pattern matcher.
//!
//! Two declaration idioms are recognized, each scanned over the full text:
//!
//! - direct calls: `app.get('/path', ...)`, `router.post("/path", ...)`
//! - chained routes: `router.route('/path').get(...).post(...)`
//!
//! Candidates come back in order of first occurrence. Nothing is
//! deduplicated here; overlapping matches are each reported.

use std::sync::OnceLock;

use regex::Regex;

use super::text::{matching_delimiter, read_string_literal, regex, skip_whitespace};
use super::types::RouteCandidate;

/// Identifiers that routes are registered on in the direct-call idiom.
pub const DECLARING_IDENTIFIERS: &[&str] = &["app", "router"];

/// Verb tokens, matched case-insensitively.
pub const HTTP_VERBS: &[&str] = &["get", "post", "put", "delete", "patch", "head", "options", "all"];

/// Declaring identifier recorded for chained `.route(...)` declarations.
pub const CHAINED_ROUTE_IDENTIFIER: &str = "router";

fn direct_call_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(&format!(
            r"\b({})\s*\.\s*((?i:{}))\s*\(",
            DECLARING_IDENTIFIERS.join("|"),
            HTTP_VERBS.join("|")
        ))
    })
}

fn route_call_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\.\s*route\s*\("))
}

/// A `.verb(` link at the very start of the haystack.
fn chained_verb_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(&format!(r"^\s*\.\s*((?i:{}))\s*\(", HTTP_VERBS.join("|"))))
}

/// Tie-break between idioms reporting the same offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Idiom {
    DirectCall,
    ChainedRoute,
}

/// Scan `text` for route declarations.
pub fn find_candidates(text: &str) -> Vec<RouteCandidate> {
    let mut found: Vec<(Idiom, RouteCandidate)> = Vec::new();
    found.extend(direct_calls(text).map(|c| (Idiom::DirectCall, c)));
    found.extend(chained_routes(text).into_iter().map(|c| (Idiom::ChainedRoute, c)));

    // Stable: equal keys keep discovery order.
    found.sort_by_key(|(idiom, c)| (c.match_position, *idiom));
    found.into_iter().map(|(_, c)| c).collect()
}

fn direct_calls(text: &str) -> impl Iterator<Item = RouteCandidate> + '_ {
    direct_call_regex().captures_iter(text).filter_map(move |caps| {
        let whole = caps.get(0)?;
        let identifier = caps.get(1)?.as_str();
        let verb = caps.get(2)?.as_str();
        let (path, after_literal) = read_string_literal(text, whole.end())?;

        // `app.get('env')` is Express's settings getter. Setting names never
        // start with `/`; a bare path literal still counts as a declaration.
        let closes_after_literal =
            text.as_bytes().get(skip_whitespace(text, after_literal)) == Some(&b')');
        if closes_after_literal && !path.starts_with('/') {
            return None;
        }

        let open_paren = whole.end() - 1;
        Some(RouteCandidate {
            method: verb.to_ascii_uppercase(),
            path: path.to_string(),
            declaring_identifier: identifier.to_string(),
            match_position: whole.start(),
            arguments_offset: after_literal,
            call_end: matching_delimiter(text, open_paren, b'(', b')').unwrap_or(text.len()),
        })
    })
}

fn chained_routes(text: &str) -> Vec<RouteCandidate> {
    let mut candidates = Vec::new();

    for route_call in route_call_regex().find_iter(text) {
        let Some((path, after_literal)) = read_string_literal(text, route_call.end()) else {
            continue;
        };
        let close = skip_whitespace(text, after_literal);
        if text.as_bytes().get(close) != Some(&b')') {
            continue;
        }

        // Walk `.verb(...)` links until the chain ends.
        let mut cursor = close + 1;
        while let Some(caps) = chained_verb_regex().captures(&text[cursor..]) {
            let (Some(link), Some(verb)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let open_paren = cursor + link.end() - 1;
            let dot = cursor + skip_whitespace(&text[cursor..], 0);
            let close_paren = matching_delimiter(text, open_paren, b'(', b')');

            candidates.push(RouteCandidate {
                method: verb.as_str().to_ascii_uppercase(),
                path: path.to_string(),
                declaring_identifier: CHAINED_ROUTE_IDENTIFIER.to_string(),
                match_position: dot,
                arguments_offset: open_paren + 1,
                call_end: close_paren.unwrap_or(text.len()),
            });

            match close_paren {
                Some(close_paren) => cursor = close_paren + 1,
                None => break,
            }
        }
    }

    candidates
}
