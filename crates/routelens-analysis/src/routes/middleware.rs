//! Middleware registrations (`<ident>.use(...)`).
//!
//! A flat pass over the file, independent of route extraction:
//!
//! - `app.use('/api/users', userRoutes)` → `{ path: "/api/users", name: "userRoutes" }`
//! - `app.use(express.json())` → `{ path: "*", name: "express.json" }`
//!
//! Inline functions and argument lists that fit neither shape are skipped.

use std::sync::OnceLock;

use regex::Regex;

use super::text::{read_string_literal, regex};
use super::types::MiddlewareEntry;

/// Path recorded for registrations without a mount prefix.
pub const WILDCARD_PATH: &str = "*";

/// Words that can start an argument but never name a middleware.
const NON_NAMES: &[&str] = &["function", "async", "new", "await", "class"];

/// `<ident>.use(` on any receiver.
fn use_call_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| regex(r"[A-Za-z_$][\w$]*\s*\.\s*use\s*\("))
}

/// A (possibly dotted) identifier at the start of the haystack, followed by
/// the character that ends it.
fn callee_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        regex(r"^\s*([A-Za-z_$][\w$]*(?:\s*\.\s*[A-Za-z_$][\w$]*)*)\s*([(),]?)")
    })
}

/// Find middleware registrations in discovery order.
pub fn extract_middleware(text: &str) -> Vec<MiddlewareEntry> {
    use_call_regex()
        .find_iter(text)
        .filter_map(|call| parse_use_arguments(text, call.end()))
        .collect()
}

fn parse_use_arguments(text: &str, args_start: usize) -> Option<MiddlewareEntry> {
    if let Some((path, after_literal)) = read_string_literal(text, args_start) {
        let rest = text[after_literal..].trim_start();
        let rest = rest.strip_prefix(',')?;
        let (name, _) = callee(rest)?;
        return Some(MiddlewareEntry {
            path: path.to_string(),
            name,
        });
    }

    // Bare form: a single identifier, or a call such as `cors()`.
    let (name, terminator) = callee(&text[args_start..])?;
    if terminator != "(" && terminator != ")" {
        return None;
    }
    Some(MiddlewareEntry {
        path: WILDCARD_PATH.to_string(),
        name,
    })
}

/// Leading identifier chain of `haystack`, whitespace removed, plus the
/// character right after it (empty if none of `(`, `)`, `,`).
fn callee(haystack: &str) -> Option<(String, &str)> {
    let caps = callee_regex().captures(haystack)?;
    let name: String = caps
        .get(1)?
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if NON_NAMES.contains(&name.as_str()) {
        return None;
    }
    let terminator = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    Some((name, terminator))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(text: &str) -> Vec<(String, String)> {
        extract_middleware(text)
            .into_iter()
            .map(|e| (e.path, e.name))
            .collect()
    }

    fn pair(path: &str, name: &str) -> (String, String) {
        (path.to_string(), name.to_string())
    }

    #[test]
    fn test_mounted_router() {
        assert_eq!(
            entries("app.use('/api/users', userRoutes);"),
            vec![pair("/api/users", "userRoutes")]
        );
    }

    #[test]
    fn test_bare_identifier_and_calls() {
        let text = "app.use(express.json());\napp.use(cors());\nrouter.use(logger);";
        assert_eq!(
            entries(text),
            vec![pair("*", "express.json"), pair("*", "cors"), pair("*", "logger")]
        );
    }

    #[test]
    fn test_path_with_call_argument() {
        assert_eq!(
            entries("router.use('/__apitest', express.static(staticPath));"),
            vec![pair("/__apitest", "express.static")]
        );
    }

    #[test]
    fn test_inline_function_skipped() {
        let text = "app.use(function (req, res, next) { next(); });\napp.use('/x', (req, res, next) => next());";
        assert!(entries(text).is_empty());
    }

    #[test]
    fn test_multiple_bare_arguments_skipped() {
        assert!(entries("app.use(helmet, cors);").is_empty());
    }

    #[test]
    fn test_any_receiver() {
        assert_eq!(
            entries("const api = express.Router();\napi.use(authenticate);"),
            vec![pair("*", "authenticate")]
        );
    }

    #[test]
    fn test_hooks_are_not_use_calls() {
        assert!(entries("const [a, b] = React.useState(0); reuse(x);").is_empty());
    }

    #[test]
    fn test_discovery_order() {
        let text = "app.use(a);\napp.use('/b', b);\napp.use(c);";
        let names: Vec<_> = entries(text).into_iter().map(|(_, n)| n).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
