use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::endpoint::EndpointConfig;
use crate::error::{Error, Result};
use crate::method::Method;
use crate::native_http::NativeHttp;
use crate::parser::parse;
use crate::project::project;
use crate::request_template::RequestTemplate;
use crate::selection::Selection;
use crate::HttpIO;

/// Executes selection documents against a REST endpoint.
///
/// Each top-level selection becomes one request; its response is projected
/// down to the requested fields and merged into a single object keyed by
/// alias (or selection name when no alias is given):
///
/// ```no_run
/// # async fn example() -> qrest::Result<()> {
/// let client = qrest::Client::new();
/// let data = client
///     .get("https://reqres.in/api", "users { page data { first_name } }")
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn HttpIO>,
    config: BTreeMap<String, EndpointConfig>,
    headers: BTreeMap<String, String>,
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

impl Client {
    pub fn new() -> Self {
        Self::with_transport(NativeHttp::default())
    }

    /// Swaps the HTTP transport, e.g. for a caching or recording client.
    pub fn with_transport(transport: impl HttpIO) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Default::default(),
            headers: Default::default(),
        }
    }

    /// Registers request configuration for one selection key. A later call
    /// with the same key replaces the earlier entry. Lookup at fetch time is
    /// by selection name, never by alias.
    pub fn configure(mut self, key: &str, config: EndpointConfig) -> Self {
        self.config.insert(key.to_string(), config);
        self
    }

    /// A header sent with every request, under per-endpoint overrides.
    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    /// Parses `document` and performs one GET per top-level selection.
    pub async fn fetch(&self, base_url: &str, document: &str) -> Result<Value> {
        self.fetch_with(base_url, document, Method::GET).await
    }

    pub async fn get(&self, base_url: &str, document: &str) -> Result<Value> {
        self.fetch_with(base_url, document, Method::GET).await
    }

    pub async fn post(&self, base_url: &str, document: &str) -> Result<Value> {
        self.fetch_with(base_url, document, Method::POST).await
    }

    async fn fetch_with(&self, base_url: &str, document: &str, method: Method) -> Result<Value> {
        let selections = parse(document)?;
        let template = RequestTemplate::new(base_url)
            .method(method)
            .headers(self.headers.clone());

        let mut data = Map::new();
        for selection in &selections {
            let field = match selection {
                Selection::Field(field) => field,
                Selection::All => return Err(Error::TopLevelPassthrough),
            };

            let config = self.config.get(&field.name).cloned().unwrap_or_default();
            let request = template.to_request(field, &config)?;
            tracing::debug!(
                method = %request.method(),
                url = %request.url(),
                selection = %field.name,
                "dispatching selection"
            );

            let response = self.transport.execute(request).await?;
            data.insert(
                field.output_key().to_string(),
                project(&field.selection, &response.body),
            );
        }

        Ok(Value::Object(data))
    }
}
