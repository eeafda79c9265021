//! URL generation - turning an action identifier plus resolved parameters into
//! a concrete URL.
//!
//! `UrlGenerator` keeps a registry of routes keyed by action identifier and
//! fills the route's URI template from a parameter mapping:
//! - entity values substitute their `route_key()`
//! - scalars substitute their plain string form
//! - parameters not consumed by the path are appended as a query string
//!
//! A required placeholder with no usable value is an `UnresolvableParameters`
//! failure, the only kind callers are expected to recover from.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use anyhow::{bail, Result};
use serde_json::Value;
use tracing::debug;

use crate::route::Route;
use crate::value::ParamValue;

/// Failure kinds of URL generation.
#[derive(Debug, Clone)]
pub enum UrlGenerationError {
    /// One or more required path placeholders had no usable value.
    ///
    /// This is the only recoverable kind; constructibility checks convert it
    /// to `false`.
    UnresolvableParameters {
        /// Route name.
        route: String,
        /// Placeholder names that could not be filled, in path order.
        missing: Vec<String>,
    },

    /// No route is registered under the requested action identifier.
    UnknownAction {
        /// The action identifier that was requested.
        action: String,
    },

    /// A parameter value cannot be rendered into a URL (e.g. an array or
    /// object scalar).
    UnsubstitutableParameter {
        /// Route name.
        route: String,
        /// The offending parameter name.
        param: String,
    },
}

impl std::fmt::Display for UrlGenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UrlGenerationError::UnresolvableParameters { route, missing } => {
                write!(
                    f,
                    "missing required parameters for route [{}]: [{}]",
                    route,
                    missing.join(", ")
                )
            }
            UrlGenerationError::UnknownAction { action } => {
                write!(f, "no route registered for action [{}]", action)
            }
            UrlGenerationError::UnsubstitutableParameter { route, param } => {
                write!(
                    f,
                    "parameter [{}] of route [{}] cannot be rendered into a URL",
                    param, route
                )
            }
        }
    }
}

impl std::error::Error for UrlGenerationError {}

/// Outcome of rendering a single parameter value into URL text.
enum Rendered {
    Text(String),
    Absent,
}

/// Registry of routes keyed by action identifier, with URI template filling.
#[derive(Debug, Default)]
pub struct UrlGenerator {
    /// Maps action identifier -> route.
    routes: HashMap<String, Route>,
}

impl UrlGenerator {
    /// Create an empty generator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a generator from a route table.
    pub fn from_routes(routes: impl IntoIterator<Item = Route>) -> Result<Self> {
        let mut generator = Self::new();
        for route in routes {
            generator.register(route)?;
        }
        Ok(generator)
    }

    /// Register a route under its action identifier.
    ///
    /// Duplicate action identifiers are a configuration error.
    pub fn register(&mut self, route: Route) -> Result<()> {
        if self.routes.contains_key(&route.action) {
            bail!("duplicate action identifier: {}", route.action);
        }
        debug!(action = %route.action, uri = %route.uri, "registered route");
        self.routes.insert(route.action.clone(), route);
        Ok(())
    }

    /// Number of registered routes.
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Generate a URL for an action identifier from a parameter mapping.
    ///
    /// Placeholders are filled in path order. Optional placeholders
    /// (`{param?}`) elide cleanly when no value is present; required ones are
    /// collected and reported together as `UnresolvableParameters`. Leftover
    /// parameters become a query string.
    pub fn action(
        &self,
        action: &str,
        params: &BTreeMap<String, ParamValue>,
    ) -> Result<String, UrlGenerationError> {
        let route = self
            .routes
            .get(action)
            .ok_or_else(|| UrlGenerationError::UnknownAction {
                action: action.to_string(),
            })?;

        let mut used = BTreeSet::new();
        let mut missing = Vec::new();
        let mut path = String::new();

        for segment in route.uri.split('/') {
            if segment.is_empty() {
                continue;
            }
            let filled = fill_segment(route, segment, params, &mut used, &mut missing)?;
            if !filled.is_empty() {
                path.push('/');
                path.push_str(&filled);
            }
        }

        if !missing.is_empty() {
            return Err(UrlGenerationError::UnresolvableParameters {
                route: route.name.clone(),
                missing,
            });
        }

        if path.is_empty() {
            path.push('/');
        }

        // Unconsumed parameters go into the query string, in name order.
        let mut query = String::new();
        for (name, value) in params {
            if used.contains(name.as_str()) {
                continue;
            }
            let text = match render(route, name, value)? {
                Rendered::Text(text) => text,
                Rendered::Absent => continue,
            };
            query.push(if query.is_empty() { '?' } else { '&' });
            query.push_str(name);
            query.push('=');
            query.push_str(&text);
        }
        path.push_str(&query);

        debug!(action = action, url = %path, "generated url");
        Ok(path)
    }
}

/// Substitute every placeholder in one path segment.
///
/// Returns the filled segment text; an empty result means the segment elides
/// (an optional placeholder with no value). Required placeholders without a
/// value are pushed onto `missing` so they can be reported together.
fn fill_segment(
    route: &Route,
    segment: &str,
    params: &BTreeMap<String, ParamValue>,
    used: &mut BTreeSet<String>,
    missing: &mut Vec<String>,
) -> Result<String, UrlGenerationError> {
    let mut out = String::new();
    let mut rest = segment;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('}') else {
            // Unbalanced brace: keep the remainder literal.
            out.push_str(&rest[open..]);
            return Ok(out);
        };
        let inner = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        let (name, optional) = match inner.strip_suffix('?') {
            Some(name) => (name, true),
            None => (inner, false),
        };
        used.insert(name.to_string());

        match params.get(name) {
            Some(value) => match render(route, name, value)? {
                Rendered::Text(text) => out.push_str(&text),
                Rendered::Absent if optional => {}
                Rendered::Absent => missing.push(name.to_string()),
            },
            None if optional => {}
            None => missing.push(name.to_string()),
        }
    }
    out.push_str(rest);
    Ok(out)
}

/// Render one parameter value as URL text.
fn render(
    route: &Route,
    name: &str,
    value: &ParamValue,
) -> Result<Rendered, UrlGenerationError> {
    match value {
        ParamValue::Entity(entity) => Ok(Rendered::Text(entity.route_key())),
        ParamValue::Scalar(Value::Null) => Ok(Rendered::Absent),
        ParamValue::Scalar(Value::String(s)) => Ok(Rendered::Text(s.clone())),
        ParamValue::Scalar(Value::Number(n)) => Ok(Rendered::Text(n.to_string())),
        ParamValue::Scalar(Value::Bool(b)) => Ok(Rendered::Text(b.to_string())),
        ParamValue::Scalar(_) => Err(UrlGenerationError::UnsubstitutableParameter {
            route: route.name.clone(),
            param: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::RouteEntity;

    #[derive(Debug)]
    struct Team {
        id: u64,
    }

    impl RouteEntity for Team {
        fn entity_type(&self) -> &str {
            "Team"
        }

        fn exists(&self) -> bool {
            true
        }

        fn route_key(&self) -> String {
            self.id.to_string()
        }
    }

    fn params(entries: Vec<(&str, ParamValue)>) -> BTreeMap<String, ParamValue> {
        entries
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect()
    }

    fn generator() -> UrlGenerator {
        UrlGenerator::from_routes(vec![
            Route::new("home", "HomeController@index", "/"),
            Route::new("teams.show", "TeamController@show", "/teams/{team}"),
            Route::new(
                "teams.members",
                "TeamController@members",
                "/teams/{team}/members/{member?}",
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_substitutes_entity_route_key() {
        let url = generator()
            .action(
                "TeamController@show",
                &params(vec![("team", ParamValue::entity(Team { id: 7 }))]),
            )
            .unwrap();
        assert_eq!(url, "/teams/7");
    }

    #[test]
    fn test_missing_required_parameter() {
        let err = generator()
            .action("TeamController@show", &params(vec![]))
            .unwrap_err();
        match err {
            UrlGenerationError::UnresolvableParameters { route, missing } => {
                assert_eq!(route, "teams.show");
                assert_eq!(missing, ["team"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_placeholder_elides() {
        let url = generator()
            .action(
                "TeamController@members",
                &params(vec![("team", ParamValue::scalar(3))]),
            )
            .unwrap();
        assert_eq!(url, "/teams/3/members");
    }

    #[test]
    fn test_extra_parameters_become_query_string() {
        let url = generator()
            .action(
                "TeamController@show",
                &params(vec![
                    ("team", ParamValue::scalar(3)),
                    ("page", ParamValue::scalar(2)),
                ]),
            )
            .unwrap();
        assert_eq!(url, "/teams/3?page=2");
    }

    #[test]
    fn test_null_scalar_counts_as_absent() {
        let err = generator()
            .action(
                "TeamController@show",
                &params(vec![("team", ParamValue::null())]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            UrlGenerationError::UnresolvableParameters { .. }
        ));
    }

    #[test]
    fn test_unknown_action() {
        let err = generator().action("Missing@action", &params(vec![])).unwrap_err();
        assert!(matches!(err, UrlGenerationError::UnknownAction { .. }));
    }

    #[test]
    fn test_unsubstitutable_parameter() {
        let err = generator()
            .action(
                "TeamController@show",
                &params(vec![(
                    "team",
                    ParamValue::scalar(serde_json::json!(["a", "b"])),
                )]),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            UrlGenerationError::UnsubstitutableParameter { .. }
        ));
    }

    #[test]
    fn test_root_route() {
        let url = generator()
            .action("HomeController@index", &params(vec![]))
            .unwrap();
        assert_eq!(url, "/");
    }

    #[test]
    fn test_duplicate_action_rejected() {
        let mut generator = UrlGenerator::new();
        generator
            .register(Route::new("a", "Controller@x", "/a"))
            .unwrap();
        assert!(generator
            .register(Route::new("b", "Controller@x", "/b"))
            .is_err());
    }
}
