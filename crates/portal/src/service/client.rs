use reqwest::{Client, RequestBuilder, Response, Url};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use shared::{
    errors::ApiError,
    utils::{Method, Metrics, Status},
};
use std::time::{Duration, Instant};
use tracing::{debug, error, warn};

/// Thin HTTP wrapper over the backend REST API. Every call is resolved
/// against the configured base URL and may carry a bearer token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: Url,
    http: Client,
    metrics: Metrics,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration, metrics: Metrics) -> Result<Self, ApiError> {
        let base = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            base,
            http,
            metrics,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base
            .join(path)
            .map_err(|e| ApiError::InvalidUrl(format!("{path}: {e}")))
    }

    pub async fn get<T>(
        &self,
        path: &str,
        query: &[(String, String)],
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let request = self.http.get(self.endpoint(path)?).query(query);
        self.execute(Method::Get, request, bearer).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.post(self.endpoint(path)?).json(body);
        self.execute(Method::Post, request, bearer).await
    }

    pub async fn patch<B, T>(&self, path: &str, body: &B, bearer: Option<&str>) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.http.patch(self.endpoint(path)?).json(body);
        self.execute(Method::Patch, request, bearer).await
    }

    pub async fn delete(&self, path: &str, bearer: Option<&str>) -> Result<(), ApiError> {
        let request = self.http.delete(self.endpoint(path)?);
        self.send(Method::Delete, request, bearer).await?;
        Ok(())
    }

    async fn execute<T>(
        &self,
        method: Method,
        request: RequestBuilder,
        bearer: Option<&str>,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
    {
        let response = self.send(method, request, bearer).await?;

        response.json::<T>().await.map_err(|e| {
            error!("Backend response could not be decoded: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    async fn send(
        &self,
        method: Method,
        request: RequestBuilder,
        bearer: Option<&str>,
    ) -> Result<Response, ApiError> {
        let request = match bearer {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let start = Instant::now();
        let result = request.send().await;
        let elapsed = start.elapsed().as_secs_f64();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                error!("Backend unreachable ({method:?}): {e}");
                self.metrics.record(method, Status::Error, elapsed);
                return Err(ApiError::Network(e.to_string()));
            }
        };

        let status = response.status();
        let url = response.url().path().to_string();

        if status.is_success() {
            debug!("{method:?} {url} -> {status}");
            self.metrics.record(method, Status::Success, elapsed);
            return Ok(response);
        }

        self.metrics.record(method, Status::Error, elapsed);

        let body: Value = response.json().await.unwrap_or(Value::Null);
        let err = ApiError::from_status(status.as_u16(), &body);

        warn!("{method:?} {url} -> {status}: {err}");
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_join_under_base_path() {
        let client = ApiClient::new(
            "http://127.0.0.1:8000/api/",
            Duration::from_secs(1),
            Metrics::new(),
        )
        .unwrap();

        assert_eq!(
            client.endpoint("admin/users/me/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/admin/users/me/"
        );
        assert_eq!(
            client.endpoint("token/refresh/").unwrap().as_str(),
            "http://127.0.0.1:8000/api/token/refresh/"
        );
    }

    #[test]
    fn rejects_invalid_base() {
        assert!(matches!(
            ApiClient::new("not a url", Duration::from_secs(1), Metrics::new()),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_backend_is_network_error() {
        let client = ApiClient::new(
            "http://127.0.0.1:9/api/",
            Duration::from_millis(500),
            Metrics::new(),
        )
        .unwrap();

        let result: Result<Value, ApiError> = client.get("admin/users/me/", &[], Some("t")).await;
        assert!(matches!(result, Err(ApiError::Network(_))));
    }
}
