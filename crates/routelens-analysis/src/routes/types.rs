//! Route records and the inferred input schema attached to them.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Request-derived input categories. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputCategory {
    Body,
    Params,
    Query,
    Headers,
}

impl InputCategory {
    pub const ALL: [InputCategory; 4] = [
        InputCategory::Body,
        InputCategory::Params,
        InputCategory::Query,
        InputCategory::Headers,
    ];

    /// Accessor segment as written in source (`req.<segment>`).
    pub fn as_str(&self) -> &'static str {
        match self {
            InputCategory::Body => "body",
            InputCategory::Params => "params",
            InputCategory::Query => "query",
            InputCategory::Headers => "headers",
        }
    }

    pub fn from_segment(segment: &str) -> Option<InputCategory> {
        match segment {
            "body" => Some(InputCategory::Body),
            "params" => Some(InputCategory::Params),
            "query" => Some(InputCategory::Query),
            "headers" => Some(InputCategory::Headers),
            _ => None,
        }
    }
}

impl fmt::Display for InputCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field names a handler appears to read, per category.
///
/// Sets are ordered, so serialization is sorted and independent of the order
/// the accesses appeared in. Empty categories are left out of the output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectedInputs {
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub body: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub params: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub query: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub headers: BTreeSet<String>,
}

impl ExpectedInputs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a field. Surrounding whitespace is trimmed; blank names are
    /// dropped. Returns whether the set changed.
    pub fn insert(&mut self, category: InputCategory, field: &str) -> bool {
        let field = field.trim();
        if field.is_empty() {
            return false;
        }
        self.get_mut(category).insert(field.to_string())
    }

    pub fn get(&self, category: InputCategory) -> &BTreeSet<String> {
        match category {
            InputCategory::Body => &self.body,
            InputCategory::Params => &self.params,
            InputCategory::Query => &self.query,
            InputCategory::Headers => &self.headers,
        }
    }

    fn get_mut(&mut self, category: InputCategory) -> &mut BTreeSet<String> {
        match category {
            InputCategory::Body => &mut self.body,
            InputCategory::Params => &mut self.params,
            InputCategory::Query => &mut self.query,
            InputCategory::Headers => &mut self.headers,
        }
    }

    pub fn has(&self, category: InputCategory) -> bool {
        !self.get(category).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        InputCategory::ALL.iter().all(|c| !self.has(*c))
    }

    /// Non-empty categories in fixed order.
    pub fn categories(&self) -> impl Iterator<Item = (InputCategory, &BTreeSet<String>)> + '_ {
        InputCategory::ALL
            .into_iter()
            .map(move |c| (c, self.get(c)))
            .filter(|(_, fields)| !fields.is_empty())
    }
}

/// A tentative route match, before scope and input analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteCandidate {
    /// Upper-cased verb (`GET`, `POST`, ..., `ALL`).
    pub method: String,
    /// Contents of the path literal, verbatim.
    pub path: String,
    /// Object the route was registered on. `router` for chained routes.
    pub declaring_identifier: String,
    /// Byte offset where the declaration starts.
    pub match_position: usize,
    /// Byte offset where the handler arguments begin (just past the path
    /// literal, or past the verb's `(` for chained routes).
    pub arguments_offset: usize,
    /// Byte offset of the `)` closing the declaring call, or the end of the
    /// text when the call never closes.
    pub call_end: usize,
}

/// A discovered route with its inferred inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub method: String,
    pub path: String,
    /// Identifier supplied by the caller for the source text.
    pub file: String,
    /// 1-based line of the declaration.
    pub line: u32,
    /// Declaring identifier, kept for diagnostics.
    pub framework: String,
    pub expected_inputs: ExpectedInputs,
}

/// A `.use(...)` registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MiddlewareEntry {
    /// Mount prefix, or `*` when the call had no path argument.
    pub path: String,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_trims_and_drops_blank() {
        let mut inputs = ExpectedInputs::new();
        assert!(inputs.insert(InputCategory::Body, "  name "));
        assert!(!inputs.insert(InputCategory::Body, "name"));
        assert!(!inputs.insert(InputCategory::Body, "   "));
        assert_eq!(inputs.body.iter().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_empty_categories_are_omitted() {
        let mut inputs = ExpectedInputs::new();
        inputs.insert(InputCategory::Query, "limit");
        let json = serde_json::to_value(&inputs).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 1);
        assert_eq!(json["query"], serde_json::json!(["limit"]));
    }

    #[test]
    fn test_case_sensitive() {
        let mut inputs = ExpectedInputs::new();
        inputs.insert(InputCategory::Headers, "X-Token");
        inputs.insert(InputCategory::Headers, "x-token");
        assert_eq!(inputs.headers.len(), 2);
    }

    #[test]
    fn test_categories_order() {
        let mut inputs = ExpectedInputs::new();
        inputs.insert(InputCategory::Headers, "a");
        inputs.insert(InputCategory::Body, "b");
        let order: Vec<_> = inputs.categories().map(|(c, _)| c).collect();
        assert_eq!(order, vec![InputCategory::Body, InputCategory::Headers]);
    }

    #[test]
    fn test_route_serializes_camel_case() {
        let route = Route {
            method: "GET".into(),
            path: "/".into(),
            file: "app.js".into(),
            line: 1,
            framework: "app".into(),
            expected_inputs: ExpectedInputs::new(),
        };
        let json = serde_json::to_value(&route).unwrap();
        assert!(json.get("expectedInputs").is_some());
        assert_eq!(json["expectedInputs"], serde_json::json!({}));
    }
}
