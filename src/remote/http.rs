use super::WorklogApi;
use crate::config::RemoteConfig;
use crate::errors::{AppError, AppResult};
use crate::models::line_item::{LookupSnapshot, PersistAck, RemoteLineItem};
use chrono::NaiveDate;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Blocking JSON client. Every call is bounded by the configured timeout
/// and is never retried.
pub struct HttpWorklogApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpWorklogApi {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> AppResult<Self> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(AppError::Config(
                "remote.base_url is not set; run `rworklog config --edit`".into(),
            ));
        }

        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("rworklog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: token.trim().to_string(),
        })
    }

    pub fn from_config(cfg: &RemoteConfig) -> AppResult<Self> {
        Self::new(
            &cfg.base_url,
            &cfg.api_token,
            Duration::from_secs(cfg.timeout_secs.max(1)),
        )
    }

    fn day_url(&self, day: NaiveDate) -> String {
        format!("{}/days/{}/items", self.base_url, day.format("%Y-%m-%d"))
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        if self.token.is_empty() {
            req
        } else {
            req.bearer_auth(&self.token)
        }
    }

    fn decode<T: DeserializeOwned>(url: &str, resp: Response) -> AppResult<T> {
        let status = resp.status();
        if !status.is_success() {
            return Err(AppError::RemoteStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

impl WorklogApi for HttpWorklogApi {
    fn fetch_day(&self, day: NaiveDate) -> AppResult<Vec<RemoteLineItem>> {
        let url = self.day_url(day);
        let resp = self.authorized(self.client.get(&url)).send()?;
        Self::decode(&url, resp)
    }

    fn persist_day(&self, day: NaiveDate, items: &[RemoteLineItem]) -> AppResult<Vec<PersistAck>> {
        let url = self.day_url(day);
        let resp = self.authorized(self.client.put(&url)).json(items).send()?;
        Self::decode(&url, resp)
    }

    fn fetch_lookups(&self) -> AppResult<LookupSnapshot> {
        let url = format!("{}/lookups", self.base_url);
        let resp = self.authorized(self.client.get(&url)).send()?;
        Self::decode(&url, resp)
    }
}
