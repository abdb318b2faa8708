pub mod client;
pub mod endpoint;
pub mod error;
pub mod method;
pub mod native_http;
pub mod parser;
pub mod project;
pub mod request_template;
pub mod response;
pub mod selection;

pub use client::Client;
pub use endpoint::EndpointConfig;
pub use error::{Error, Result};
pub use method::Method;
pub use native_http::NativeHttp;
pub use parser::parse;
pub use project::project;
pub use response::Response;
pub use selection::{Arg, Selection, SelectionField};

#[async_trait::async_trait]
pub trait HttpIO: Sync + Send + 'static {
    async fn execute(&self, request: reqwest::Request) -> anyhow::Result<Response>;
}
