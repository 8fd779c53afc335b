//! Property tests for the extraction engine.

use proptest::prelude::*;
use routelens_analysis::routes::candidates::find_candidates;
use routelens_analysis::routes::extract_routes;
use routelens_analysis::routes::inputs::extract_inputs;

fn verb() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["get", "post", "put", "delete", "patch", "head", "options", "all", "GET", "Post"])
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]{0,10}"
}

fn segment() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z0-9-]{1,8}",
        identifier().prop_map(|name| format!(":{name}")),
    ]
}

fn route_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 0..5).prop_map(|segments| format!("/{}", segments.join("/")))
}

proptest! {
    #[test]
    fn direct_call_yields_one_candidate(
        object in prop::sample::select(vec!["app", "router"]),
        verb in verb(),
        path in route_path(),
    ) {
        let text = format!("{object}.{verb}('{path}', (req, res) => {{ res.end(); }});");
        let candidates = find_candidates(&text);
        prop_assert_eq!(candidates.len(), 1);
        prop_assert_eq!(&candidates[0].method, &verb.to_ascii_uppercase());
        prop_assert_eq!(&candidates[0].path, &path);
        prop_assert_eq!(candidates[0].declaring_identifier.as_str(), object);
    }

    #[test]
    fn handlerless_path_call_yields_one_candidate(
        object in prop::sample::select(vec!["app", "router"]),
        verb in verb(),
        path in route_path(),
    ) {
        let text = format!("{object}.{verb}('{path}')");
        let candidates = find_candidates(&text);
        prop_assert_eq!(candidates.len(), 1);
        prop_assert_eq!(&candidates[0].path, &path);
    }

    #[test]
    fn placeholders_always_become_params(names in prop::collection::vec(identifier(), 1..4)) {
        let path = names.iter().map(|n| format!("/:{n}")).collect::<String>();
        let text = format!("router.get('{path}', lookup);");
        let routes = extract_routes("r.js", &text);
        prop_assert_eq!(routes.len(), 1);
        for name in &names {
            prop_assert!(routes[0].expected_inputs.params.contains(name));
        }
    }

    #[test]
    fn extraction_is_idempotent(path in route_path(), fields in prop::collection::vec(identifier(), 0..6)) {
        let body: String = fields.iter().map(|f| format!("req.body.{f};\n")).collect();
        let text = format!("app.post('{path}', (req, res) => {{\n{body}}});");
        prop_assert_eq!(extract_routes("a.js", &text), extract_routes("a.js", &text));
    }

    #[test]
    fn access_order_does_not_matter(fields in prop::collection::vec(identifier(), 1..8)) {
        let forward: String = fields.iter().map(|f| format!("req.query.{f}; ")).collect();
        let backward: String = fields.iter().rev().map(|f| format!("req.query.{f}; ")).collect();
        prop_assert_eq!(extract_inputs(&forward, "/"), extract_inputs(&backward, "/"));
    }

    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,200}") {
        let _ = extract_routes("fuzz.js", &text);
    }
}
