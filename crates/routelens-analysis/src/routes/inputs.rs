//! Input field inference.
//!
//! Every recognizer runs independently over the analysis text and the
//! results are unioned into [`ExpectedInputs`], whose sorted sets make the
//! outcome independent of the order accesses appear in.
//!
//! Recognized forms, for `req`, `request` and `ctx`:
//!
//! | form | example |
//! |---|---|
//! | dotted accessor | `req.body.name`, `req.query?.page` |
//! | bracket accessor | `req.headers['x-api-key']`, `req.params["id"]` |
//! | destructuring | `const { name, email } = req.body` |
//! | path placeholder | `:id` in `/users/:id` (always, scope or not) |

use std::sync::OnceLock;

use regex::Regex;
use smallvec::SmallVec;

use super::scope::REQUEST_IDENTIFIERS;
use super::text::{matching_delimiter, regex};
use super::types::{ExpectedInputs, InputCategory};

fn accessor_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(&format!(
            concat!(
                r"\b(?:{})\s*\.\s*(body|params|query|headers)\s*",
                r"(?:\??\.\s*([A-Za-z_$][\w$]*)",
                r#"|\[\s*(?:'([^'\n]*)'|"([^"\n]*)"|`([^`\n]*)`)\s*\])"#,
            ),
            REQUEST_IDENTIFIERS.join("|")
        ))
    })
}

fn declaration_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"\b(?:const|let|var)\s*\{"))
}

/// What follows a destructuring pattern's closing brace: an optional TS
/// annotation, `=`, an optional `ctx.` prefix (`ctx.request.body`) and the
/// source. Group 2 captures what follows the source so member access
/// (`req.body.user`) can be rejected.
fn destructuring_source_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(&format!(
            concat!(
                r"^\s*(?::[^=;]+)?=\s*",
                r"(?:ctx\s*\.\s*)?(?:{})\s*\.\s*(body|params|query|headers)\b(\s*\??[.\[]?)",
            ),
            REQUEST_IDENTIFIERS.join("|")
        ))
    })
}

fn path_placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r":([A-Za-z_][A-Za-z0-9_]*)"))
}

/// Infer the inputs a handler reads.
///
/// `analysis_text` is the handler body, or the whole file when no body was
/// isolated. Path placeholders are added regardless.
pub fn extract_inputs(analysis_text: &str, route_path: &str) -> ExpectedInputs {
    let mut inputs = ExpectedInputs::new();
    collect_accessors(analysis_text, &mut inputs);
    collect_destructuring(analysis_text, &mut inputs);
    for name in path_params(route_path) {
        inputs.insert(InputCategory::Params, name);
    }
    inputs
}

/// Placeholder names in a route path (`/items/:id/:subId` → `id`, `subId`).
///
/// A colon not followed by an identifier character contributes nothing.
pub fn path_params(route_path: &str) -> impl Iterator<Item = &str> {
    path_placeholder_regex()
        .captures_iter(route_path)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
}

fn collect_accessors(text: &str, inputs: &mut ExpectedInputs) {
    for caps in accessor_regex().captures_iter(text) {
        let Some(category) = caps
            .get(1)
            .and_then(|m| InputCategory::from_segment(m.as_str()))
        else {
            continue;
        };
        // Exactly one of the field alternatives participates.
        if let Some(field) = (2..=5).find_map(|i| caps.get(i)) {
            inputs.insert(category, field.as_str());
        }
    }
}

fn collect_destructuring(text: &str, inputs: &mut ExpectedInputs) {
    for declaration in declaration_regex().find_iter(text) {
        let open = declaration.end() - 1;
        let Some(close) = matching_delimiter(text, open, b'{', b'}') else {
            continue;
        };
        let Some(caps) = destructuring_source_regex().captures(&text[close + 1..]) else {
            continue;
        };
        let trailing = caps.get(2).map(|m| m.as_str().trim()).unwrap_or("");
        if !trailing.is_empty() && trailing != "?" {
            // `= req.body.user` binds fields of `user`, not of the body.
            continue;
        }
        let Some(category) = caps
            .get(1)
            .and_then(|m| InputCategory::from_segment(m.as_str()))
        else {
            continue;
        };
        for name in split_bindings(&text[open + 1..close]) {
            inputs.insert(category, name);
        }
    }
}

/// Split a destructuring pattern on its top-level commas. Renames
/// (`a: b`), defaults (`a = {}`) and nested patterns (`a: { b }`) are kept
/// as written.
fn split_bindings(pattern: &str) -> SmallVec<[&str; 8]> {
    let mut names: SmallVec<[&str; 8]> = SmallVec::new();
    let mut depth: usize = 0;
    let mut from = 0;
    for (offset, byte) in pattern.bytes().enumerate() {
        match byte {
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => depth = depth.saturating_sub(1),
            b',' if depth == 0 => {
                names.push(pattern[from..offset].trim());
                from = offset + 1;
            }
            _ => {}
        }
    }
    names.push(pattern[from..].trim());
    names.retain(|name| !name.is_empty());
    names
}
