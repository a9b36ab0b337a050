//! Thin typed wrapper over the store's REST commands.

use std::time::Duration;

use reqwest::{header, Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::error;

use crate::error::{CacheError, Result};
use crate::models::{DelRequest, Reply, SaddRequest, SetexRequest};

/// Reply the store gives to a successful `PING`.
pub const PONG: &str = "PONG";

/// Reply the store gives to a successful write.
pub const OK: &str = "OK";

// == Rest Store ==
/// Client for one store endpoint.
///
/// Each call returns the raw `result` of the reply; status and decoding
/// failures come back as `CacheError` for the caller to judge.
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    base_url: String,
    token: String,
}

impl RestStore {
    /// Creates a client for `base_url` authenticating with `token`.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // == Commands ==

    /// `POST /ping`; any reply other than `PONG` is an `UnexpectedReply`.
    pub async fn ping(&self) -> Result<()> {
        let reply: Reply<serde_json::Value> = self.send(self.request(Method::POST, "/ping")).await?;
        match reply.result.as_str() {
            Some(PONG) => Ok(()),
            _ => Err(CacheError::UnexpectedReply(reply.result.to_string())),
        }
    }

    /// `GET /get/{key}`; the raw stored string, if any.
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = format!("/get/{}", urlencoding::encode(key));
        let reply: Reply<Option<String>> = self.send(self.request(Method::GET, &path)).await?;
        Ok(reply.result)
    }

    /// `POST /setex`; true when the store acknowledges with `OK`.
    pub async fn setex(&self, key: &str, ttl: u64, value: String) -> Result<bool> {
        let body = SetexRequest {
            key: key.to_string(),
            ex: ttl,
            value,
        };
        let reply: Reply<serde_json::Value> = self.post("/setex", &body).await?;
        Ok(reply.result.as_str() == Some(OK))
    }

    /// `POST /del`; number of keys actually removed.
    pub async fn del(&self, keys: &[String]) -> Result<u64> {
        let body = DelRequest {
            keys: keys.to_vec(),
        };
        let reply: Reply<u64> = self.post("/del", &body).await?;
        Ok(reply.result)
    }

    /// `POST /sadd`; number of members newly added.
    pub async fn sadd(&self, key: &str, members: &[String]) -> Result<u64> {
        let body = SaddRequest {
            key: key.to_string(),
            members: members.to_vec(),
        };
        let reply: Reply<u64> = self.post("/sadd", &body).await?;
        Ok(reply.result)
    }

    /// `GET /smembers/{key}`; empty when the set does not exist.
    pub async fn smembers(&self, key: &str) -> Result<Vec<String>> {
        let path = format!("/smembers/{}", urlencoding::encode(key));
        let reply: Reply<Option<Vec<String>>> = self.send(self.request(Method::GET, &path)).await?;
        Ok(reply.result.unwrap_or_default())
    }

    // == Plumbing ==

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token)
            .header(header::CONTENT_TYPE, "application/json")
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("").to_string();
            error!(status = status.as_u16(), %reason, "Store API error");
            return Err(CacheError::Status {
                status: status.as_u16(),
                reason,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = RestStore::new("http://localhost:8079/", "t", Duration::from_secs(1)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:8079");
    }
}
