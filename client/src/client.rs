use crate::config::ApiConfig;
use crate::store::VariableStore;
use crate::types::{
    Application, AuditLogPage, EnvType, EnvironmentVariable, ImportTarget, NewVariable,
};
use async_trait::async_trait;
use http::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("HTTP client error: {0}")]
    ReqwestError(#[from] reqwest::Error),
    #[error("invalid API key: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),
    #[error("API URL cannot be used as a base: {0}")]
    InvalidUrl(Url),
    #[error("request was not authorized")]
    Unauthorized,
    #[error("resource not found")]
    NotFound,
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Deserialize)]
struct ApiErrorResponse {
    #[serde(alias = "error", alias = "error_message")]
    message: String,
}

/// Typed client for the EnvSync API.
///
/// Build one per process and pass it to whatever needs it. Cloning is cheap,
/// clones share the underlying connection pool.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        if config.url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(config.url.clone()));
        }

        let mut headers = HeaderMap::new();
        if let Some(api_key) = &config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {api_key}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(ApiClient {
            client,
            base_url: config.url.clone(),
        })
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, ClientError> {
        self.get(&["api", "applications"], &[]).await
    }

    pub async fn get_application(&self, app_id: &str) -> Result<Application, ClientError> {
        self.get(&["api", "applications", app_id], &[]).await
    }

    pub async fn list_env_types(&self, app_id: &str) -> Result<Vec<EnvType>, ClientError> {
        self.get(&["api", "applications", app_id, "env_types"], &[])
            .await
    }

    pub async fn list_variables(
        &self,
        app_id: &str,
        env_type_id: &str,
    ) -> Result<Vec<EnvironmentVariable>, ClientError> {
        self.get(&variables_path(app_id, env_type_id), &[]).await
    }

    pub async fn create_variable(
        &self,
        app_id: &str,
        env_type_id: &str,
        variable: &NewVariable,
    ) -> Result<EnvironmentVariable, ClientError> {
        let url = self.endpoint(&variables_path(app_id, env_type_id))?;
        tracing::debug!(key = %variable.key, %url, "Creating variable");

        let response = self.client.post(url).json(variable).send().await?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    pub async fn delete_variable(
        &self,
        app_id: &str,
        env_type_id: &str,
        key: &str,
    ) -> Result<(), ClientError> {
        let mut segments = variables_path(app_id, env_type_id);
        segments.push(key);
        let url = self.endpoint(&segments)?;

        let response = self.client.delete(url).send().await?;
        check_status(response).await?;
        Ok(())
    }

    /// `page` is 1-based.
    pub async fn list_audit_logs(
        &self,
        page: usize,
        per_page: usize,
    ) -> Result<AuditLogPage, ClientError> {
        let page = page.to_string();
        let per_page = per_page.to_string();
        self.get(
            &["api", "audit_logs"],
            &[("page", page.as_str()), ("per_page", per_page.as_str())],
        )
        .await
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> Result<T, ClientError> {
        let mut url = self.endpoint(segments)?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        let response = self.client.get(url).send().await?;
        let response = check_status(response).await?;
        Ok(response.json::<T>().await?)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn variables_path<'a>(app_id: &'a str, env_type_id: &'a str) -> Vec<&'a str> {
    vec![
        "api",
        "applications",
        app_id,
        "env_types",
        env_type_id,
        "variables",
    ]
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ApiErrorResponse>(&body)
        .map(|e| e.message)
        .unwrap_or(body);

    tracing::warn!(status = %status, message = %message, "API request failed");

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(ClientError::Unauthorized),
        StatusCode::NOT_FOUND => Err(ClientError::NotFound),
        StatusCode::CONFLICT => Err(ClientError::Conflict(message)),
        _ => Err(ClientError::Api {
            status: status.as_u16(),
            message,
        }),
    }
}

#[async_trait]
impl VariableStore for ApiClient {
    async fn existing_keys(&self, target: &ImportTarget) -> Result<Vec<String>, ClientError> {
        let variables = self
            .list_variables(&target.app_id, &target.env_type_id)
            .await?;
        Ok(variables.into_iter().map(|v| v.key).collect())
    }

    async fn create_variable(
        &self,
        target: &ImportTarget,
        variable: NewVariable,
    ) -> Result<EnvironmentVariable, ClientError> {
        ApiClient::create_variable(self, &target.app_id, &target.env_type_id, &variable).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutils::start_mock_server;
    use http::Method;
    use serde_json::json;

    fn variable_json(key: &str, value: &str) -> serde_json::Value {
        json!({
            "id": format!("var_{key}"),
            "key": key,
            "value": value,
            "sensitive": false,
            "env_type_id": "env_1",
            "app_id": "app_1",
            "created_at": "2024-03-01T10:00:00Z",
            "updated_at": "2024-03-01T10:00:00Z"
        })
    }

    fn test_client(port: u16) -> ApiClient {
        let url = Url::parse(&format!("http://127.0.0.1:{port}/")).unwrap();
        ApiClient::new(&ApiConfig::new(url).with_api_key("secret-token")).unwrap()
    }

    #[tokio::test]
    async fn test_list_variables() {
        let port = start_mock_server(|req| {
            assert_eq!(req.method(), Method::GET);
            assert_eq!(
                req.uri().path(),
                "/api/applications/app_1/env_types/env_1/variables"
            );
            assert_eq!(
                req.headers().get(AUTHORIZATION).unwrap(),
                "Bearer secret-token"
            );
            (
                StatusCode::OK,
                json!([variable_json("FOO", "1"), variable_json("BAR", "2")]),
            )
        })
        .await;

        let client = test_client(port);
        let variables = client.list_variables("app_1", "env_1").await.unwrap();
        assert_eq!(variables.len(), 2);
        assert_eq!(variables[0].key, "FOO");

        let keys = client
            .existing_keys(&ImportTarget::new("app_1", "env_1"))
            .await
            .unwrap();
        assert_eq!(keys, vec!["FOO".to_string(), "BAR".to_string()]);
    }

    #[tokio::test]
    async fn test_create_variable() {
        let port = start_mock_server(|req| {
            assert_eq!(req.method(), Method::POST);
            let body: NewVariable = serde_json::from_slice(req.body()).unwrap();
            assert_eq!(body.key, "API_KEY");
            assert!(body.sensitive);
            (StatusCode::CREATED, variable_json(&body.key, &body.value))
        })
        .await;

        let client = test_client(port);
        let created = client
            .create_variable(
                "app_1",
                "env_1",
                &NewVariable {
                    key: "API_KEY".into(),
                    value: "abc123".into(),
                    sensitive: true,
                },
            )
            .await
            .unwrap();
        assert_eq!(created.key, "API_KEY");
        assert_eq!(created.value, "abc123");
    }

    #[tokio::test]
    async fn test_error_mapping() {
        let port = start_mock_server(|req| match req.uri().path() {
            "/api/applications/missing" => (StatusCode::NOT_FOUND, json!({})),
            "/api/applications/forbidden" => (StatusCode::UNAUTHORIZED, json!({})),
            "/api/applications/app_1/env_types/env_1/variables" => (
                StatusCode::CONFLICT,
                json!({"message": "Key already exists"}),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "database unavailable"}),
            ),
        })
        .await;

        let client = test_client(port);

        assert!(matches!(
            client.get_application("missing").await.unwrap_err(),
            ClientError::NotFound
        ));
        assert!(matches!(
            client.get_application("forbidden").await.unwrap_err(),
            ClientError::Unauthorized
        ));

        let err = client
            .create_variable(
                "app_1",
                "env_1",
                &NewVariable {
                    key: "FOO".into(),
                    value: "1".into(),
                    sensitive: false,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Conflict(ref m) if m == "Key already exists"));

        match client.list_applications().await.unwrap_err() {
            ClientError::Api { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "database unavailable");
            }
            e => panic!("unexpected error: {e}"),
        }
    }

    #[tokio::test]
    async fn test_audit_log_pagination_query() {
        let port = start_mock_server(|req| {
            assert_eq!(req.uri().path(), "/api/audit_logs");
            assert_eq!(req.uri().query(), Some("page=3&per_page=25"));
            (StatusCode::OK, json!({"items": [], "total": 120}))
        })
        .await;

        let page = test_client(port).list_audit_logs(3, 25).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total, 120);
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = Url::parse("http://localhost:4000/base/").unwrap();
        let client = ApiClient::new(&ApiConfig::new(url)).unwrap();
        let endpoint = client.endpoint(&["api", "applications", "a b"]).unwrap();
        assert_eq!(
            endpoint.as_str(),
            "http://localhost:4000/base/api/applications/a%20b"
        );
    }
}
