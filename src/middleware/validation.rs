use jsonschema::Validator;
use serde_json::{json, Value};

use crate::handler::{Handler, Next};
use crate::request::Request;
use crate::response::{Response, ResponseCtx};

const NULL: Value = Value::Null;

fn schema_errors(validator: &Validator, instance: &Value) -> Vec<String> {
    validator.iter_errors(instance).map(|e| e.to_string()).collect()
}

/// Middleware validating the parsed request body against a JSON Schema.
///
/// Synthesized at the front of a route's handler chain when
/// [`RouteOptions::body_schema`](crate::router::RouteOptions) is set. On
/// mismatch it short-circuits with a 400 response carrying the error list; on
/// success it invokes the continuation. A missing body validates as JSON null.
pub struct BodyValidator {
    validator: Validator,
}

impl BodyValidator {
    /// Compile the schema. Panics on an invalid schema: registration-time
    /// failure, never per request.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn new(schema: &Value) -> Self {
        Self {
            validator: jsonschema::validator_for(schema).expect("invalid body schema"),
        }
    }
}

impl Handler for BodyValidator {
    fn call(&self, req: &mut Request, ctx: &mut ResponseCtx, next: Next<'_>) -> Response {
        let instance = req.body.as_ref().unwrap_or(&NULL);
        let errors = schema_errors(&self.validator, instance);
        if !errors.is_empty() {
            return ctx.with_status(400).json(json!({
                "message": "Invalid request body",
                "errors": errors,
            }));
        }
        next.run(req, ctx)
    }
}

/// Middleware validating the query parameters, as an object of strings,
/// against a JSON Schema.
///
/// Synthesized ahead of [`BodyValidator`] when both schemas are configured.
pub struct QueryValidator {
    validator: Validator,
}

impl QueryValidator {
    /// Compile the schema. Panics on an invalid schema: registration-time
    /// failure, never per request.
    #[allow(clippy::expect_used)]
    #[must_use]
    pub fn new(schema: &Value) -> Self {
        Self {
            validator: jsonschema::validator_for(schema).expect("invalid query schema"),
        }
    }
}

impl Handler for QueryValidator {
    fn call(&self, req: &mut Request, ctx: &mut ResponseCtx, next: Next<'_>) -> Response {
        let instance = Value::Object(
            req.query
                .iter()
                .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                .collect(),
        );
        let errors = schema_errors(&self.validator, &instance);
        if !errors.is_empty() {
            return ctx.with_status(400).json(json!({
                "message": "Invalid query params",
                "errors": errors,
            }));
        }
        next.run(req, ctx)
    }
}
