use std::collections::BTreeMap;

use derive_setters::Setters;
use serde::{Deserialize, Serialize};

use crate::method::Method;

/// Request configuration for one selection key, registered through
/// [`crate::Client::configure`]. An entry for `currentPost` might look like:
///
/// ```json
/// {
///   "path": "/posts/1",
///   "headers": { "x-api-key": "secret" }
/// }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Setters)]
#[serde(default)]
pub struct EndpointConfig {
    /// Replaces the selection key as the URL path. Never sent to the
    /// transport as anything else.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Extra headers, applied over the client-wide ones.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,

    /// Overrides the per-call method chosen by `get`/`post`/`fetch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<Method>,

    /// Static query parameters appended after the document arguments.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub query: Vec<(String, String)>,
}
