use std::collections::BTreeMap;

use derive_setters::Setters;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::endpoint::EndpointConfig;
use crate::error::Result;
use crate::method::Method;
use crate::selection::SelectionField;

/// Builds one concrete request per top-level selection.
///
/// The URL is `<base>/<path>[/<id>][?<args>]`: the path is the selection
/// name unless the endpoint config overrides it, an `id` argument becomes a
/// path segment instead of a query parameter, and the remaining arguments
/// are encoded as the query string in document order.
#[derive(Clone, Debug, Setters)]
pub struct RequestTemplate {
    pub base_url: String,
    pub method: Method,
    pub headers: BTreeMap<String, String>,
}

impl RequestTemplate {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            method: Method::default(),
            headers: Default::default(),
        }
    }

    pub fn to_request(
        &self,
        field: &SelectionField,
        config: &EndpointConfig,
    ) -> Result<reqwest::Request> {
        let url = self.create_url(field, config)?;
        let method = config.method.unwrap_or(self.method);
        let mut request = reqwest::Request::new(method.into_reqwest(), url);
        *request.headers_mut() = self.create_headers(config);
        Ok(request)
    }

    fn create_url(&self, field: &SelectionField, config: &EndpointConfig) -> Result<Url> {
        let path = config.path.as_deref().unwrap_or(field.name.as_str());
        let mut url = format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );

        // last `id` wins, mirroring how repeated assignments would behave
        let id = field
            .args
            .iter()
            .rev()
            .find(|arg| arg.name == "id")
            .and_then(|arg| scalar_string(&arg.value));
        if let Some(id) = id {
            url.push('/');
            url.push_str(&id);
        }

        let mut url = Url::parse(&url)?;

        let mut pairs = Vec::new();
        for arg in &field.args {
            if arg.name == "id" {
                continue;
            }
            encode_pairs(arg.name.clone(), &arg.value, &mut pairs);
        }
        for (key, value) in &config.query {
            pairs.push((key.clone(), value.clone()));
        }

        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }

    fn create_headers(&self, config: &EndpointConfig) -> HeaderMap {
        let mut header_map = HeaderMap::new();
        for (key, value) in self.headers.iter().chain(config.headers.iter()) {
            let name = match HeaderName::from_bytes(key.as_bytes()) {
                Ok(name) => name,
                Err(_) => continue,
            };
            if let Ok(value) = HeaderValue::from_str(value) {
                header_map.insert(name, value);
            }
        }
        header_map
    }
}

/// Flattens an argument value into query-string pairs. Lists encode as
/// `key[]=value` per element and objects as `key[inner]=value`, recursively.
fn encode_pairs(key: String, value: &Value, pairs: &mut Vec<(String, String)>) {
    match value {
        Value::Array(items) => {
            for item in items {
                encode_pairs(format!("{}[]", key), item, pairs);
            }
        }
        Value::Object(fields) => {
            for (name, item) in fields {
                encode_pairs(format!("{}[{}]", key, name), item, pairs);
            }
        }
        Value::String(text) => pairs.push((key, text.clone())),
        Value::Null => pairs.push((key, "null".to_string())),
        other => pairs.push((key, other.to_string())),
    }
}

fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(boolean) => Some(boolean.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::selection::Arg;

    fn to_url(field: &SelectionField, config: &EndpointConfig) -> String {
        RequestTemplate::new("http://localhost:3000")
            .to_request(field, config)
            .unwrap()
            .url()
            .to_string()
    }

    #[test]
    fn test_path_from_selection_name() {
        let field = SelectionField::new("users");
        assert_eq!(
            to_url(&field, &EndpointConfig::default()),
            "http://localhost:3000/users"
        );
    }

    #[test]
    fn test_slashes_are_normalized() {
        let field = SelectionField::new("users");
        let config = EndpointConfig::default().path(Some("/users".to_string()));
        let request = RequestTemplate::new("http://localhost:3000/")
            .to_request(&field, &config)
            .unwrap();
        assert_eq!(request.url().to_string(), "http://localhost:3000/users");
    }

    #[test]
    fn test_id_argument_becomes_path_segment() {
        let field = SelectionField::new("posts").args(vec![Arg::new("id", json!(1))]);
        assert_eq!(
            to_url(&field, &EndpointConfig::default()),
            "http://localhost:3000/posts/1"
        );
    }

    #[test]
    fn test_last_id_wins() {
        let field = SelectionField::new("posts").args(vec![
            Arg::new("id", json!(1)),
            Arg::new("id", json!(2)),
        ]);
        assert_eq!(
            to_url(&field, &EndpointConfig::default()),
            "http://localhost:3000/posts/2"
        );
    }

    #[test]
    fn test_arguments_encode_as_query_string() {
        let field = SelectionField::new("posts").args(vec![
            Arg::new("page", json!(2)),
            Arg::new("search", json!("fuchsia rose")),
        ]);
        assert_eq!(
            to_url(&field, &EndpointConfig::default()),
            "http://localhost:3000/posts?page=2&search=fuchsia+rose"
        );
    }

    #[test]
    fn test_id_is_excluded_from_query_string() {
        let field = SelectionField::new("posts").args(vec![
            Arg::new("id", json!(7)),
            Arg::new("page", json!(1)),
        ]);
        assert_eq!(
            to_url(&field, &EndpointConfig::default()),
            "http://localhost:3000/posts/7?page=1"
        );
    }

    #[test]
    fn test_list_argument_bracket_encoding() {
        let field = SelectionField::new("posts").args(vec![Arg::new("tags", json!(["a", "b"]))]);
        let url = to_url(&field, &EndpointConfig::default());
        assert_eq!(url, "http://localhost:3000/posts?tags%5B%5D=a&tags%5B%5D=b");
    }

    #[test]
    fn test_object_argument_bracket_encoding() {
        let field = SelectionField::new("posts")
            .args(vec![Arg::new("filter", json!({"year": 2000, "color": "cerulean"}))]);
        let url = to_url(&field, &EndpointConfig::default());
        assert_eq!(
            url,
            "http://localhost:3000/posts?filter%5Byear%5D=2000&filter%5Bcolor%5D=cerulean"
        );
    }

    #[test]
    fn test_config_path_override() {
        let field = SelectionField::new("currentPost");
        let config = EndpointConfig::default().path(Some("/posts/1".to_string()));
        assert_eq!(to_url(&field, &config), "http://localhost:3000/posts/1");
    }

    #[test]
    fn test_static_query_appended_after_arguments() {
        let field = SelectionField::new("posts").args(vec![Arg::new("page", json!(2))]);
        let config =
            EndpointConfig::default().query(vec![("per_page".to_string(), "6".to_string())]);
        assert_eq!(
            to_url(&field, &config),
            "http://localhost:3000/posts?page=2&per_page=6"
        );
    }

    #[test]
    fn test_config_headers_override_template_headers() {
        let field = SelectionField::new("users");
        let config = EndpointConfig::default().headers(BTreeMap::from([(
            "x-api-key".to_string(),
            "endpoint".to_string(),
        )]));
        let request = RequestTemplate::new("http://localhost:3000")
            .headers(BTreeMap::from([
                ("x-api-key".to_string(), "client".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ]))
            .to_request(&field, &config)
            .unwrap();
        assert_eq!(request.headers().get("x-api-key").unwrap(), "endpoint");
        assert_eq!(request.headers().get("accept").unwrap(), "application/json");
    }

    #[test]
    fn test_config_method_override() {
        let field = SelectionField::new("users");
        let config = EndpointConfig::default().method(Some(Method::POST));
        let request = RequestTemplate::new("http://localhost:3000")
            .to_request(&field, &config)
            .unwrap();
        assert_eq!(request.method(), reqwest::Method::POST);
    }

    #[test]
    fn test_base_url_without_scheme() {
        let field = SelectionField::new("users");
        let result =
            RequestTemplate::new("reqres.in/api").to_request(&field, &EndpointConfig::default());
        assert!(matches!(result, Err(crate::error::Error::UrlParse(_))));
    }
}
