//! HTTP 传输层
//!
//! [`Transport`] 是请求编排与网络之间的接缝：生产环境使用 reqwest，
//! 测试中可以替换为脚本化实现。超时由调用方通过丢弃 future 实现取消。

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::trace;

use crate::errors::{ClientError, Result};

/// 一次 JSON POST 请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub body: Bytes,
    pub bearer_token: Option<String>,
}

/// 原始响应：状态码与完整响应体
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// 发送请求并读取完整响应体
    ///
    /// 返回的 future 被丢弃时必须中止进行中的请求。
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// 基于 reqwest 的传输实现
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("shortlinker-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::transport(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_json(&self, request: HttpRequest) -> Result<HttpResponse> {
        let mut builder = self
            .client
            .post(&request.url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(request.body);

        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await.map_err(|e| {
            ClientError::transport(format!("Request to {} failed: {}", request.url, e))
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            ClientError::transport(format!("Failed to read response body: {}", e))
        })?;

        trace!("POST {} -> {} ({} bytes)", request.url, status, body.len());
        Ok(HttpResponse { status, body })
    }
}
