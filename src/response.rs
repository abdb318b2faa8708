use derive_setters::Setters;

/// A decoded transport response. The body is already JSON at this boundary;
/// status and headers ride along for transports that want to inspect them.
#[derive(Clone, Debug, Default, Setters)]
pub struct Response {
    pub status: reqwest::StatusCode,
    pub headers: reqwest::header::HeaderMap,
    pub body: serde_json::Value,
}

impl Response {
    pub async fn from_reqwest(response: reqwest::Response) -> anyhow::Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.json().await?;
        Ok(Response { status, headers, body })
    }
}
