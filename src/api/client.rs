//! reqwest implementation of the backend interface.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::api::BookstoreApi;
use crate::error::{PustakaError, Result};
use crate::query::QueryParams;
use crate::types::{ListPage, Pagination, Resource};

pub struct HttpApi {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpApi {
    pub fn new(base_url: Url, token: Option<SecretString>, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| PustakaError::Api(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut parts = url
                .path_segments_mut()
                .map_err(|_| PustakaError::Config("base URL cannot be a base".to_string()))?;
            parts.pop_if_empty();
            for segment in segments {
                parts.push(segment);
            }
        }
        Ok(url)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => req.bearer_auth(token.expose_secret()),
            None => req,
        }
    }

    /// Map a non-success response to an error, preferring the backend's
    /// `{error}` message when the body carries one.
    async fn check(resp: Response) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let path = resp.url().path().to_string();
        let body: Option<Value> = resp.json().await.ok();
        let message = body
            .as_ref()
            .and_then(|v| v.get("error"))
            .and_then(Value::as_str)
            .map(str::to_string);

        Err(match (status, message) {
            (StatusCode::NOT_FOUND, _) => PustakaError::RecordNotFound(path),
            (StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN, msg) => PustakaError::Auth(
                msg.unwrap_or_else(|| format!("request to {} was rejected", path)),
            ),
            (_, Some(msg)) => PustakaError::Api(msg),
            (status, None) => PustakaError::Api(format!("{} returned {}", path, status)),
        })
    }

    fn parse_list(resource: Resource, body: Value) -> Result<ListPage> {
        let rows = body
            .get(resource.plural_key())
            .and_then(Value::as_array)
            .cloned()
            .ok_or_else(|| {
                PustakaError::ResponseShape(format!(
                    "list response missing '{}' array",
                    resource.plural_key()
                ))
            })?;

        let pagination: Pagination = body
            .get("pagination")
            .cloned()
            .map(serde_json::from_value)
            .transpose()?
            .ok_or_else(|| {
                PustakaError::ResponseShape("list response missing 'pagination'".to_string())
            })?;

        Ok(ListPage { rows, pagination })
    }
}

#[async_trait]
impl BookstoreApi for HttpApi {
    async fn list(&self, resource: Resource, params: &QueryParams) -> Result<ListPage> {
        let mut url = self.url(&[resource.path()])?;
        for (k, v) in params.iter() {
            url.query_pairs_mut().append_pair(k, v);
        }

        let resp = self.authorize(self.client.get(url)).send().await?;
        let body: Value = Self::check(resp).await?.json().await?;
        Self::parse_list(resource, body)
    }

    async fn get(&self, resource: Resource, id: u64) -> Result<Value> {
        let url = self.url(&[resource.path(), &id.to_string()])?;
        let resp = self.authorize(self.client.get(url)).send().await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn create(&self, resource: Resource, body: Value) -> Result<Value> {
        let url = self.url(&[resource.path()])?;
        let resp = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn update(&self, resource: Resource, id: u64, body: Value) -> Result<Value> {
        let url = self.url(&[resource.path(), &id.to_string()])?;
        let resp = self
            .authorize(self.client.put(url))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete(&self, resource: Resource, id: u64) -> Result<()> {
        let url = self.url(&[resource.path(), &id.to_string()])?;
        let resp = self.authorize(self.client.delete(url)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }

    async fn create_sub(
        &self,
        resource: Resource,
        id: u64,
        sub_resource: &str,
        body: Value,
    ) -> Result<Value> {
        let url = self.url(&[resource.path(), &id.to_string(), sub_resource])?;
        let resp = self
            .authorize(self.client.post(url))
            .json(&body)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn upload_photo(
        &self,
        resource: Resource,
        id: u64,
        file_name: String,
        bytes: Vec<u8>,
    ) -> Result<Value> {
        let url = self.url(&["upload", resource.path(), "photo", &id.to_string()])?;
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new().part("file", part);

        let resp = self
            .authorize(self.client.post(url))
            .multipart(form)
            .send()
            .await?;
        Ok(Self::check(resp).await?.json().await?)
    }

    async fn delete_photo(&self, resource: Resource, id: u64) -> Result<()> {
        let url = self.url(&["upload", resource.path(), "photo", &id.to_string()])?;
        let resp = self.authorize(self.client.delete(url)).send().await?;
        Self::check(resp).await?;
        Ok(())
    }
}
