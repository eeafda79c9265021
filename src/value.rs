//! Provided parameter values - the tagged union handed to the resolver.
//!
//! Callers supply route parameters as either domain entity handles or plain
//! scalars. Entities participate in type-based matching and know how to render
//! themselves into a URL; scalars are carried as-is.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// Handle to a domain entity usable as a route parameter.
///
/// This is the entity boundary: the resolver never inspects the entity beyond
/// these three questions.
pub trait RouteEntity: fmt::Debug + Send + Sync {
    /// Concrete type identifier, compared against a signature parameter's
    /// declared type during type-based matching (e.g. "Post", "App\\Team").
    fn entity_type(&self) -> &str;

    /// Whether the entity is backed by a persisted identity.
    ///
    /// A transient placeholder returns `false` and is never offered as a
    /// provided parameter.
    fn exists(&self) -> bool;

    /// The value substituted into a generated URL for this entity.
    fn route_key(&self) -> String;
}

/// A value provided for route parameter resolution.
///
/// Either a domain entity handle or an arbitrary scalar. Only entities are
/// candidates for type-based matching; scalars can only resolve by name.
#[derive(Debug, Clone)]
pub enum ParamValue {
    /// A domain entity handle.
    Entity(Arc<dyn RouteEntity>),
    /// A plain scalar (string, number, bool, null).
    Scalar(Value),
}

impl ParamValue {
    /// Wrap an entity.
    pub fn entity<E: RouteEntity + 'static>(entity: E) -> Self {
        ParamValue::Entity(Arc::new(entity))
    }

    /// Wrap a scalar.
    pub fn scalar(value: impl Into<Value>) -> Self {
        ParamValue::Scalar(value.into())
    }

    /// An explicitly-null scalar.
    ///
    /// Resolution treats an explicit null the same as an absent value: it is
    /// dropped from the resolved mapping.
    pub fn null() -> Self {
        ParamValue::Scalar(Value::Null)
    }

    /// True only for the explicit-null scalar.
    pub fn is_null(&self) -> bool {
        matches!(self, ParamValue::Scalar(Value::Null))
    }

    /// The entity handle, if this value is one.
    pub fn as_entity(&self) -> Option<&dyn RouteEntity> {
        match self {
            ParamValue::Entity(entity) => Some(entity.as_ref()),
            ParamValue::Scalar(_) => None,
        }
    }

    /// The scalar, if this value is one.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            ParamValue::Entity(_) => None,
            ParamValue::Scalar(value) => Some(value),
        }
    }
}

impl From<Value> for ParamValue {
    fn from(value: Value) -> Self {
        ParamValue::Scalar(value)
    }
}
