//! Aggregate statistics over a finished route list.

use std::collections::BTreeMap;

use routelens_core::types::collections::FxHashSet;
use serde::{Deserialize, Serialize};

use super::types::{InputCategory, Route};

/// Key used when a route has no method or framework recorded.
pub const UNKNOWN_KEY: &str = "unknown";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanStatistics {
    pub total_routes: usize,
    pub method_counts: BTreeMap<String, usize>,
    pub framework_counts: BTreeMap<String, usize>,
    pub files_with_routes_count: usize,
    pub routes_with_param_inputs: usize,
    pub routes_with_body_inputs: usize,
    pub routes_with_query_inputs: usize,
}

/// Reduce `routes` to statistics. Pure; the routes are only read.
pub fn aggregate(routes: &[Route]) -> ScanStatistics {
    let mut stats = ScanStatistics {
        total_routes: routes.len(),
        ..Default::default()
    };
    let mut files: FxHashSet<&str> = FxHashSet::default();

    for route in routes {
        *stats.method_counts.entry(count_key(&route.method)).or_default() += 1;
        *stats
            .framework_counts
            .entry(count_key(&route.framework))
            .or_default() += 1;
        files.insert(route.file.as_str());

        let inputs = &route.expected_inputs;
        if inputs.has(InputCategory::Params) {
            stats.routes_with_param_inputs += 1;
        }
        if inputs.has(InputCategory::Body) {
            stats.routes_with_body_inputs += 1;
        }
        if inputs.has(InputCategory::Query) {
            stats.routes_with_query_inputs += 1;
        }
    }

    stats.files_with_routes_count = files.len();
    stats
}

fn count_key(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        UNKNOWN_KEY.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::types::ExpectedInputs;

    fn route(method: &str, file: &str, framework: &str, inputs: &[(InputCategory, &str)]) -> Route {
        let mut expected_inputs = ExpectedInputs::new();
        for (category, field) in inputs {
            expected_inputs.insert(*category, field);
        }
        Route {
            method: method.to_string(),
            path: "/".to_string(),
            file: file.to_string(),
            line: 1,
            framework: framework.to_string(),
            expected_inputs,
        }
    }

    #[test]
    fn test_empty() {
        assert_eq!(aggregate(&[]), ScanStatistics::default());
    }

    #[test]
    fn test_counts() {
        let routes = vec![
            route("GET", "a.js", "app", &[(InputCategory::Params, "id"), (InputCategory::Params, "x")]),
            route("GET", "a.js", "router", &[(InputCategory::Query, "q")]),
            route("POST", "b.js", "router", &[(InputCategory::Body, "name"), (InputCategory::Params, "id")]),
            route("", "c.js", "", &[(InputCategory::Headers, "authorization")]),
        ];
        let stats = aggregate(&routes);

        assert_eq!(stats.total_routes, 4);
        assert_eq!(stats.method_counts.get("GET"), Some(&2));
        assert_eq!(stats.method_counts.get("POST"), Some(&1));
        assert_eq!(stats.method_counts.get(UNKNOWN_KEY), Some(&1));
        assert_eq!(stats.framework_counts.get("router"), Some(&2));
        assert_eq!(stats.framework_counts.get(UNKNOWN_KEY), Some(&1));
        assert_eq!(stats.files_with_routes_count, 3);
        // Once per route, not once per field.
        assert_eq!(stats.routes_with_param_inputs, 2);
        assert_eq!(stats.routes_with_body_inputs, 1);
        assert_eq!(stats.routes_with_query_inputs, 1);
    }

    #[test]
    fn test_routes_untouched() {
        let routes = vec![route("GET", "a.js", "app", &[])];
        let before = routes.clone();
        let _ = aggregate(&routes);
        assert_eq!(routes, before);
    }
}
