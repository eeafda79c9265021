//! Endpoint Resolver
//!
//! Resolves route handler parameters from a small set of provided values and
//! tests whether a named route can actually be constructed from them.
//!
//! This crate provides:
//! - [`value`]: Provided parameter values (entity handles and scalars)
//! - [`route`]: Route and signature-parameter descriptors
//! - [`resolver`]: The two-step resolution algorithm (name match, then type match)
//! - [`url`]: URL generation from an action identifier and resolved parameters
//!
//! # Resolution
//!
//! Given an optional primary entity plus caller-supplied default parameters,
//! [`ParameterResolver`] walks a route's handler signature in order and
//! matches each parameter:
//! - by **name** against the default parameters, regardless of type
//! - by **type** against the provided values (primary entity first, when it
//!   exists), first match wins
//!
//! Parameters with no match are omitted from the result, never null-valued.
//! [`ParameterResolver::can_route_be_constructed`] then answers whether the
//! resolved arguments are sufficient for the route's action to generate a
//! URL, recovering only from the unresolvable-parameters failure kind.

pub mod resolver;
pub mod route;
pub mod url;
pub mod value;

pub use resolver::ParameterResolver;
pub use route::{Route, SignatureParam};
pub use url::{UrlGenerationError, UrlGenerator};
pub use value::{ParamValue, RouteEntity};
