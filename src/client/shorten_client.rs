use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::time::timeout;
use tracing::{debug, warn};

use super::transport::{HttpRequest, HttpResponse, Transport};
use crate::errors::{ClientError, DomainError, Result};
use crate::models::{ShortenRequest, ShortenResult, WireResponse};

/// 默认请求超时
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// 缩短请求编排器
///
/// 发出一次请求、限时等待、把结果归类为 [`ShortenResult`] 或 [`ClientError`]。
/// 不触碰缓存和通知，这些由调用方负责。
pub struct ShortenClient {
    endpoint: String,
    timeout: Duration,
    transport: Arc<dyn Transport>,
}

impl ShortenClient {
    /// `api_base_url` 为服务根地址，请求发往 `{api_base_url}/shorten`
    pub fn new(api_base_url: &str, timeout: Duration, transport: Arc<dyn Transport>) -> Result<Self> {
        let endpoint = format!("{}/shorten", api_base_url.trim().trim_end_matches('/'));
        let parsed = url::Url::parse(&endpoint)
            .map_err(|e| ClientError::config(format!("Invalid API base URL '{}': {}", api_base_url, e)))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::config(format!(
                "API base URL must use http or https: {}",
                api_base_url
            )));
        }

        Ok(Self {
            endpoint,
            timeout,
            transport,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// 提交缩短请求
    ///
    /// 超时后丢弃进行中的请求并返回 [`ClientError::Timeout`]。
    /// 不做任何重试。
    pub async fn submit(
        &self,
        request: &ShortenRequest,
        auth_token: Option<&str>,
    ) -> Result<ShortenResult> {
        let body = serde_json::to_vec(request)
            .map_err(|e| ClientError::parse(format!("Failed to encode request: {}", e)))?;

        let http_request = HttpRequest {
            url: self.endpoint.clone(),
            body: Bytes::from(body),
            bearer_token: auth_token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        };

        debug!(
            "Shortening {} via {} (auth: {})",
            request.original_url,
            self.endpoint,
            http_request.bearer_token.is_some()
        );

        let response = match timeout(self.timeout, self.transport.post_json(http_request)).await {
            Ok(response) => response?,
            Err(_) => {
                warn!(
                    "Shorten request to {} timed out after {:?}",
                    self.endpoint, self.timeout
                );
                return Err(ClientError::Timeout(self.timeout));
            }
        };

        classify_response(response)
    }
}

/// 把原始响应归类
///
/// 1. 响应体无法解析 → `Parse`（无论状态码）
/// 2. 非 2xx → `Server`，detail 取自 `detail` / `message`，否则为 "HTTP <status>"
/// 3. 2xx 但缺少 `short_url` → `Domain(MissingShortUrl)`
pub fn classify_response(response: HttpResponse) -> Result<ShortenResult> {
    let status = response.status;
    let parsed: WireResponse = serde_json::from_slice(&response.body).map_err(|e| {
        ClientError::parse(format!("Invalid response body (HTTP {}): {}", status, e))
    })?;

    if !response.is_success() {
        let detail = parsed
            .error_detail()
            .unwrap_or_else(|| format!("HTTP {}", status));
        return Err(ClientError::server(status, detail));
    }

    let short_url = parsed
        .short_url
        .filter(|s| !s.trim().is_empty())
        .ok_or(DomainError::MissingShortUrl)?;

    Ok(ShortenResult {
        short_url,
        short_code: parsed.short_code,
        already_exists: parsed.already_exists.unwrap_or(false),
        expires_at: parsed.expires_at,
    })
}
