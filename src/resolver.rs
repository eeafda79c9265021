//! Parameter resolution - matching a route's handler signature against
//! provided values.
//!
//! Resolution is a two-step scan per signature parameter:
//! 1. **Name match**: a default parameter stored under the exact parameter
//!    name wins, regardless of type.
//! 2. **Type match**: otherwise the provided values are scanned in order and
//!    the first entity whose concrete type equals the declared type wins.
//!
//! Parameters matching neither way are omitted from the result, as are
//! explicit nulls (an explicitly-provided null is indistinguishable from "not
//! provided").

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::route::{Route, SignatureParam};
use crate::url::{UrlGenerationError, UrlGenerator};
use crate::value::{ParamValue, RouteEntity};

/// Resolves route handler parameters from a primary entity and a set of
/// default parameters.
///
/// Both fields are fixed at construction; every call derives its provided
/// values fresh, so a shared instance is safe for concurrent use.
#[derive(Debug)]
pub struct ParameterResolver {
    /// Primary entity, prepended to the provided values when it exists.
    ///
    /// Held positionally (not under a name), so it is only reachable through
    /// type-based matching.
    entity: Option<ParamValue>,
    /// Caller-supplied overrides, in insertion order. Order matters for the
    /// type scan: first structural match wins.
    defaults: Vec<(String, ParamValue)>,
}

impl ParameterResolver {
    /// Create a resolver from an optional primary entity and default
    /// parameters.
    pub fn new(
        entity: Option<Arc<dyn RouteEntity>>,
        defaults: Vec<(String, ParamValue)>,
    ) -> Self {
        Self {
            entity: entity.map(ParamValue::Entity),
            defaults,
        }
    }

    /// A resolver with no primary entity.
    pub fn without_entity(defaults: Vec<(String, ParamValue)>) -> Self {
        Self {
            entity: None,
            defaults,
        }
    }

    /// Resolve arguments for a route.
    ///
    /// Returns a mapping from parameter name to resolved value containing
    /// only the parameters that resolved to a usable value; unresolved
    /// parameters and explicit nulls are omitted.
    pub fn for_route(&self, route: &Route) -> BTreeMap<String, ParamValue> {
        let provided = self.provided_values();

        let mut resolved = BTreeMap::new();
        for param in &route.signature {
            let Some(value) = self.resolve_parameter(param, &provided) else {
                trace!(route = %route.name, param = %param.name, "parameter unresolved");
                continue;
            };
            if value.is_null() {
                trace!(route = %route.name, param = %param.name, "explicit null dropped");
                continue;
            }
            resolved.insert(param.name.clone(), value.clone());
        }

        debug!(
            route = %route.name,
            resolved = resolved.len(),
            signature = route.signature.len(),
            "resolved route parameters"
        );
        resolved
    }

    /// Test whether the route's action can generate a URL from the resolved
    /// arguments.
    ///
    /// `Ok(false)` exactly when generation fails with unresolvable
    /// parameters; any other generation failure propagates unchanged, since
    /// it signals a configuration error rather than a resolvable runtime
    /// condition.
    pub fn can_route_be_constructed(
        &self,
        route: &Route,
        urls: &UrlGenerator,
    ) -> Result<bool, UrlGenerationError> {
        match urls.action(&route.action, &self.for_route(route)) {
            Ok(_) => Ok(true),
            Err(UrlGenerationError::UnresolvableParameters { .. }) => Ok(false),
            Err(err) => Err(err),
        }
    }

    /// The provided values for one resolution pass: the primary entity (when
    /// it exists) followed by the default parameter values.
    fn provided_values(&self) -> Vec<&ParamValue> {
        let mut provided = Vec::with_capacity(self.defaults.len() + 1);
        if let Some(entity) = &self.entity {
            if entity.as_entity().is_some_and(|e| e.exists()) {
                provided.push(entity);
            }
        }
        provided.extend(self.defaults.iter().map(|(_, value)| value));
        provided
    }

    /// Resolve one signature parameter: name match first, then ordered type
    /// scan.
    fn resolve_parameter<'a>(
        &'a self,
        param: &SignatureParam,
        provided: &[&'a ParamValue],
    ) -> Option<&'a ParamValue> {
        if let Some((_, value)) = self
            .defaults
            .iter()
            .find(|(name, _)| name == &param.name)
        {
            return Some(value);
        }

        let declared = param.type_name.as_deref()?;
        provided
            .iter()
            .copied()
            .find(|value| {
                value
                    .as_entity()
                    .is_some_and(|entity| entity.entity_type() == declared)
            })
    }
}
