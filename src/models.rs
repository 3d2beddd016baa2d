//! 请求/响应与历史记录的数据结构

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// 校验后的缩短请求（即请求体）
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShortenRequest {
    pub original_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u16>,
}

/// 成功的缩短结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub short_url: String,
    pub short_code: Option<String>,
    pub already_exists: bool,
    pub expires_at: Option<DateTime<Utc>>,
}

/// `/shorten` 的响应体
///
/// 成功与失败共用一个结构，所有字段可选；是否满足约定由调用方判断。
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WireResponse {
    #[serde(default)]
    pub short_url: Option<String>,
    #[serde(default)]
    pub short_code: Option<String>,
    #[serde(default)]
    pub already_exists: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_timestamp")]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl WireResponse {
    /// 错误详情：优先 `detail`，其次 `message`
    ///
    /// 非字符串的 detail（例如校验错误数组）以紧凑 JSON 呈现
    pub fn error_detail(&self) -> Option<String> {
        let detail = match &self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.clone()),
            Some(serde_json::Value::Null) | None => None,
            Some(serde_json::Value::String(_)) => None,
            Some(other) => Some(other.to_string()),
        };
        detail.or_else(|| self.message.clone().filter(|m| !m.is_empty()))
    }
}

/// 历史记录中的一条链接
///
/// 只由"新建"的成功结果产生，之后不再修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkRecord {
    pub original: String,
    pub short: String,
    #[serde(alias = "date")]
    pub created_at: DateTime<Utc>,
    #[serde(
        default,
        alias = "expires_at",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub expires_at: Option<DateTime<Utc>>,
}

impl LinkRecord {
    pub fn new(original: impl Into<String>, result: &ShortenResult) -> Self {
        Self {
            original: original.into(),
            short: result.short_url.clone(),
            created_at: Utc::now(),
            expires_at: result.expires_at,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }
}

/// 时间戳解析：RFC3339，或不带时区的 ISO-8601（按 UTC 处理）
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(dt) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(Some(dt.with_timezone(&Utc)));
    }
    NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| Some(naive.and_utc()))
        .map_err(serde::de::Error::custom)
}
