use fnrouter::testing::ApiTestHarness;
use fnrouter::{handler, Api, ApiConfig, FunctionEvent, Next, Request, Response, ResponseCtx};
use serde_json::json;

mod tracing_util;
use tracing_util::TestTracing;

fn echo_param(req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
    ctx.json(json!({ "id": req.param("id") }))
}

fn echo_query(req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
    ctx.json(json!({ "q": req.query("q"), "limit": req.query("limit") }))
}

fn echo_body(req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
    ctx.json(json!({ "body": &req.body }))
}

fn plain(_req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
    ctx.text("pong")
}

fn go_home(_req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
    ctx.redirect("/home")
}

#[test]
fn test_prefix_stripping() {
    let _tracing = TestTracing::init();
    let mut api = Api::with_config(ApiConfig {
        strip_prefix: Some("/.netlify/functions/api".to_string()),
    });
    api.get("/users/:id", vec![handler(echo_param)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.get("/.netlify/functions/api/users/42");
    assert_eq!(res.status_code, 200);
    assert_eq!(res.body_json(), Some(json!({ "id": "42" })));

    // Paths without the prefix still match directly.
    let res = harness.get("/users/42");
    assert_eq!(res.status_code, 200);
}

#[test]
fn test_stripping_entire_path_falls_back_to_root() {
    let mut api = Api::with_config(ApiConfig {
        strip_prefix: Some("/fn".to_string()),
    });
    api.get("/", vec![handler(plain)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.get("/fn");
    assert_eq!(res.status_code, 200);
    assert_eq!(res.body.as_deref(), Some("pong"));
}

#[test]
fn test_unmatched_path_is_404() {
    let _tracing = TestTracing::init();
    let mut api = Api::new();
    api.get("/here", vec![handler(plain)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.get("/elsewhere");
    assert_eq!(res.status_code, 404);
    assert!(res.body.is_none());
}

#[test]
fn test_unparseable_method_is_404() {
    let _tracing = TestTracing::init();
    let mut api = Api::new();
    api.get("/here", vec![handler(plain)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.request(FunctionEvent::new("NOT A METHOD", "/here"));
    assert_eq!(res.status_code, 404);
}

#[test]
fn test_query_from_path_and_event_map_merge() {
    let mut api = Api::new();
    api.get("/search", vec![handler(echo_query)]);
    let harness = ApiTestHarness::new(api);

    // Event map takes precedence over pairs embedded in the path.
    let mut event = FunctionEvent::new("GET", "/search?q=from-path&limit=10");
    event
        .query_string_parameters
        .insert("q".to_string(), "from-map".to_string());
    let res = harness.request(event);
    assert_eq!(res.status_code, 200);
    assert_eq!(
        res.body_json(),
        Some(json!({ "q": "from-map", "limit": "10" }))
    );
}

#[test]
fn test_params_are_percent_decoded() {
    let mut api = Api::new();
    api.get("/files/:id", vec![handler(echo_param)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.get("/files/hello%20world");
    assert_eq!(res.status_code, 200);
    assert_eq!(res.body_json(), Some(json!({ "id": "hello world" })));
}

#[test]
fn test_json_body_is_parsed() {
    let mut api = Api::new();
    api.post("/echo", vec![handler(echo_body)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.post("/echo", json!({ "sku": "a-1", "qty": 2 }));
    assert_eq!(res.status_code, 200);
    assert_eq!(
        res.body_json(),
        Some(json!({ "body": { "sku": "a-1", "qty": 2 } }))
    );
}

#[test]
fn test_non_json_body_falls_back_to_raw_string() {
    let mut api = Api::new();
    api.post("/echo", vec![handler(echo_body)]);
    let harness = ApiTestHarness::new(api);

    let mut event = FunctionEvent::new("POST", "/echo");
    event.body = Some("plain old text".to_string());
    let res = harness.request(event);
    assert_eq!(res.status_code, 200);
    assert_eq!(res.body_json(), Some(json!({ "body": "plain old text" })));
}

#[test]
fn test_text_response_is_serialized_raw() {
    let mut api = Api::new();
    api.get("/ping", vec![handler(plain)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.get("/ping");
    assert_eq!(res.status_code, 200);
    assert_eq!(
        res.headers.get("content-type").map(String::as_str),
        Some("text/plain")
    );
    // Raw text, not a JSON-quoted string.
    assert_eq!(res.body.as_deref(), Some("pong"));
}

#[test]
fn test_redirect_response() {
    let mut api = Api::new();
    api.get("/old", vec![handler(go_home)]);
    let harness = ApiTestHarness::new(api);

    let res = harness.get("/old");
    assert_eq!(res.status_code, 302);
    assert_eq!(res.headers.get("location").map(String::as_str), Some("/home"));
    assert!(res.body.is_none());
}

#[test]
fn test_headers_are_lowercased_for_handlers() {
    fn read_header(req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
        ctx.json(json!({ "ct": req.header("content-type") }))
    }

    let mut api = Api::new();
    api.get("/inspect", vec![handler(read_header)]);
    let harness = ApiTestHarness::new(api);

    let mut event = FunctionEvent::new("GET", "/inspect");
    event
        .headers
        .insert("Content-Type".to_string(), "application/json".to_string());
    let res = harness.request(event);
    assert_eq!(res.body_json(), Some(json!({ "ct": "application/json" })));
}

#[test]
fn test_harness_verb_helpers() {
    fn created(_req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
        ctx.with_status(201).json(json!({ "created": true }))
    }
    fn gone(_req: &mut Request, ctx: &mut ResponseCtx, _next: Next<'_>) -> Response {
        ctx.with_status(204).json(serde_json::Value::Null)
    }

    let mut api = Api::new();
    api.post("/items", vec![handler(created)]);
    api.put("/items/:id", vec![handler(echo_param)]);
    api.patch("/items/:id", vec![handler(echo_param)]);
    api.delete("/items/:id", vec![handler(gone)]);
    let harness = ApiTestHarness::new(api);

    assert_eq!(harness.post("/items", json!({})).status_code, 201);
    assert_eq!(
        harness.put("/items/5", json!({})).body_json(),
        Some(json!({ "id": "5" }))
    );
    assert_eq!(
        harness.patch("/items/5", json!({})).body_json(),
        Some(json!({ "id": "5" }))
    );
    let res = harness.delete("/items/5");
    assert_eq!(res.status_code, 204);
    assert!(res.body.is_none());
}
