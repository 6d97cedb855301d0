//! Service façades
//!
//! Provides the named grouping of exported methods representing one monitored
//! infrastructure entity. A façade is built once at process start; its name,
//! route, and method table are immutable afterwards.

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::availability::AvailabilitySource;
use crate::rpc::dispatch::{dispatch, MethodRegistry, ParamShape};
use crate::rpc::envelope::Response;
use crate::rpc::validate::validate_request;

/// The monitored entities of the standard catalog and their routes.
pub const STANDARD_ENTITIES: [(&str, &str); 5] = [
    ("/database", "DATABASE"),
    ("/server", "SERVER HARDWARE"),
    ("/app", "APPLICATION"),
    ("/link", "INTERNET LINK"),
    ("/router", "INTERNET ROUTER"),
];

pub const SINGLE_SERVICE_ROUTE: &str = "/rpc";

pub struct Facade {
    name: Arc<str>,
    route: String,
    registry: MethodRegistry,
}

impl Facade {
    pub fn new(
        route: impl Into<String>,
        name: &str,
        source: &Arc<dyn AvailabilitySource>,
    ) -> Self {
        let name: Arc<str> = Arc::from(name);

        let mut registry = MethodRegistry::new();
        let handler_name = Arc::clone(&name);
        let handler_source = Arc::clone(source);
        registry.register(
            "get_disponibility",
            ParamShape::DateRange,
            // The date range is validated but does not influence the sample.
            Arc::new(move |_params| {
                Ok(json!({
                    "name": handler_name.as_ref(),
                    "disponibility": handler_source.sample(),
                }))
            }),
        );
        registry.register("ping", ParamShape::NoParams, Arc::new(|_params| Ok(json!({}))));

        Self {
            name,
            route: route.into(),
            registry,
        }
    }

    /// One façade at `/rpc` labeled with the configured service name.
    pub fn single(name: &str, source: &Arc<dyn AvailabilitySource>) -> Self {
        Self::new(SINGLE_SERVICE_ROUTE, name, source)
    }

    /// The five-entity catalog of the default deployment.
    pub fn standard_set(source: &Arc<dyn AvailabilitySource>) -> Vec<Arc<Self>> {
        STANDARD_ENTITIES
            .iter()
            .map(|(route, name)| Arc::new(Self::new(*route, name, source)))
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Process one raw request body into a response envelope. Every failure
    /// mode ends here as an encoded error; nothing propagates to the
    /// transport loop.
    pub fn handle(&self, raw: &[u8]) -> Response {
        let response = match validate_request(raw, &self.registry) {
            Ok(call) => match dispatch(&self.registry, &call) {
                Ok(result) => Response::success(call.id, result),
                Err(error) => Response::failure(&error),
            },
            Err(error) => Response::failure(&error),
        };

        match &response.error {
            Some(error) => info!(
                facade = %self.name,
                code = error.code,
                outcome = "failure",
                "rpc request handled"
            ),
            None => info!(facade = %self.name, outcome = "success", "rpc request handled"),
        }

        response
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::domain::availability::FixedSource;

    use super::*;

    fn facade(disponibility: f64) -> Facade {
        let source: Arc<dyn AvailabilitySource> = Arc::new(FixedSource(disponibility));
        Facade::single("DATABASE", &source)
    }

    #[test]
    fn disponibility_result_is_wrapped_with_the_service_name() {
        let response = facade(0.5).handle(
            br#"{"jsonrpc":"2.0","id":1,"method":"get_disponibility","params":["2020-01-01","2020-01-31"]}"#,
        );

        assert_eq!(response.id, json!(1));
        assert_eq!(
            response.result,
            Some(json!({"name": "DATABASE", "disponibility": 0.5}))
        );
    }

    #[test]
    fn ping_returns_a_raw_empty_object() {
        let response = facade(0.5).handle(br#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
        assert_eq!(response.result, Some(json!({})));
    }

    #[test]
    fn validation_failures_are_encoded_not_raised() {
        let response = facade(0.5).handle(br#"{"jsonrpc":"2.0","method":"get_disponibility"}"#);
        let error = response.error.expect("error envelope");
        assert_eq!(error.code, -32089);
        assert_eq!(response.id, Value::Null);
    }

    #[test]
    fn the_date_range_does_not_influence_the_sample() {
        let facade = facade(0.25);
        for params in [
            r#"["2020-01-01","2020-01-31"]"#,
            r#"["1999-12-31","2000-01-01"]"#,
        ] {
            let body =
                format!(r#"{{"jsonrpc":"2.0","id":1,"method":"get_disponibility","params":{params}}}"#);
            let response = facade.handle(body.as_bytes());
            let result = response.result.expect("result");
            assert_eq!(result["disponibility"], json!(0.25));
        }
    }

    #[test]
    fn standard_set_exposes_the_five_entities() {
        let source: Arc<dyn AvailabilitySource> = Arc::new(FixedSource(1.0));
        let facades = Facade::standard_set(&source);

        assert_eq!(facades.len(), 5);
        assert_eq!(facades[0].route(), "/database");
        assert_eq!(facades[0].name(), "DATABASE");
        assert_eq!(facades[4].route(), "/router");
        assert_eq!(facades[4].name(), "INTERNET ROUTER");
    }
}
