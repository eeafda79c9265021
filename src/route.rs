//! Route descriptors - name, action identifier, URI template and signature.
//!
//! A `Route` is read-only input owned by the routing layer. The resolver only
//! needs the ordered `(name, declared type)` pairs of the handler signature;
//! the URL generator additionally consumes the URI template and the action
//! identifier.

use serde::{Deserialize, Serialize};

/// A named, typed parameter descriptor from a route handler's signature.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureParam {
    /// Parameter name, matched exactly against provided parameter names.
    pub name: String,
    /// Declared type identifier, matched exactly against entity types.
    ///
    /// `None` models an untyped handler parameter, which can only resolve by
    /// name.
    pub type_name: Option<String>,
}

impl SignatureParam {
    /// A typed parameter descriptor.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: Some(type_name.into()),
        }
    }

    /// An untyped parameter descriptor.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: None,
        }
    }
}

/// A route as seen by the resolver and the URL generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    /// Human-readable route name (e.g. "posts.show").
    pub name: String,
    /// Action identifier used to request URL generation
    /// (e.g. "PostController@show").
    pub action: String,
    /// Path template. Placeholders are `{param}`; a trailing `?` inside the
    /// braces marks the placeholder optional (e.g. "/posts/{post}/{comment?}").
    pub uri: String,
    /// Ordered handler signature parameters.
    #[serde(default)]
    pub signature: Vec<SignatureParam>,
}

impl Route {
    /// A route with an empty signature.
    pub fn new(
        name: impl Into<String>,
        action: impl Into<String>,
        uri: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            action: action.into(),
            uri: uri.into(),
            signature: Vec::new(),
        }
    }

    /// Append a typed signature parameter.
    pub fn with_param(mut self, name: impl Into<String>, type_name: impl Into<String>) -> Self {
        self.signature.push(SignatureParam::new(name, type_name));
        self
    }

    /// Append an untyped signature parameter.
    pub fn with_untyped_param(mut self, name: impl Into<String>) -> Self {
        self.signature.push(SignatureParam::untyped(name));
        self
    }
}
