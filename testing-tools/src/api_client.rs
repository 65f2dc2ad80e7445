use anyhow::Result;
use log::*;
use reqwest::{Client, Method};
use serde_json::Value;

/// Status and raw body of a broker reply. Bodies are kept as text since a
/// broker may be configured to send malformed JSON.
#[derive(Debug, Clone)]
pub struct BrokerResponse {
    pub status: u16,
    pub body: String,
}

impl BrokerResponse {
    pub fn json(&self) -> Result<Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

pub struct BrokerClient {
    client: Client,
    base_url: String,
}

impl BrokerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn catalog(&self) -> Result<BrokerResponse> {
        self.send(Method::GET, "/v2/catalog", None).await
    }

    pub async fn provision(
        &self,
        instance_id: &str,
        body: &Value,
        accepts_incomplete: bool,
    ) -> Result<BrokerResponse> {
        let path = with_flag(
            format!("/v2/service_instances/{instance_id}"),
            accepts_incomplete,
        );
        self.send(Method::PUT, &path, Some(body)).await
    }

    pub async fn update(
        &self,
        instance_id: &str,
        body: &Value,
        accepts_incomplete: bool,
    ) -> Result<BrokerResponse> {
        let path = with_flag(
            format!("/v2/service_instances/{instance_id}"),
            accepts_incomplete,
        );
        self.send(Method::PATCH, &path, Some(body)).await
    }

    pub async fn deprovision(
        &self,
        instance_id: &str,
        accepts_incomplete: bool,
    ) -> Result<BrokerResponse> {
        let path = with_flag(
            format!("/v2/service_instances/{instance_id}"),
            accepts_incomplete,
        );
        self.send(Method::DELETE, &path, None).await
    }

    pub async fn last_operation(&self, instance_id: &str) -> Result<BrokerResponse> {
        self.send(
            Method::GET,
            &format!("/v2/service_instances/{instance_id}/last_operation"),
            None,
        )
        .await
    }

    pub async fn bind(
        &self,
        instance_id: &str,
        binding_id: &str,
        body: &Value,
    ) -> Result<BrokerResponse> {
        self.send(
            Method::PUT,
            &format!("/v2/service_instances/{instance_id}/service_bindings/{binding_id}"),
            Some(body),
        )
        .await
    }

    pub async fn unbind(&self, instance_id: &str, binding_id: &str) -> Result<BrokerResponse> {
        self.send(
            Method::DELETE,
            &format!("/v2/service_instances/{instance_id}/service_bindings/{binding_id}"),
            None,
        )
        .await
    }

    pub async fn config(&self) -> Result<BrokerResponse> {
        self.send(Method::GET, "/config", None).await
    }

    pub async fn merge_config(&self, payload: &Value) -> Result<BrokerResponse> {
        self.send(Method::POST, "/config", Some(payload)).await
    }

    pub async fn reset_config(&self) -> Result<BrokerResponse> {
        self.send(Method::POST, "/config/reset", None).await
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<BrokerResponse> {
        let url = format!("{}{}", self.base_url, path);
        debug!("{method} {url}");

        let mut request = self.client.request(method, &url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!("{status} {body}");

        Ok(BrokerResponse { status, body })
    }
}

fn with_flag(path: String, accepts_incomplete: bool) -> String {
    if accepts_incomplete {
        format!("{path}?accepts_incomplete=true")
    } else {
        path
    }
}
