use crate::response::Response;
use crate::HttpIO;

/// Default transport on a shared `reqwest::Client`. The response body is
/// decoded as JSON regardless of status code; non-JSON bodies surface as a
/// transport error.
#[derive(Clone, Default)]
pub struct NativeHttp {
    client: reqwest::Client,
}

impl NativeHttp {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl HttpIO for NativeHttp {
    async fn execute(&self, request: reqwest::Request) -> anyhow::Result<Response> {
        let response = self.client.execute(request).await?;
        tracing::debug!(status = %response.status(), "received response");
        Response::from_reqwest(response).await
    }
}
