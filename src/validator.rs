//! 表单输入校验
//!
//! 把原始表单字段规范化为 [`ShortenRequest`]，不做任何 I/O

use crate::errors::ValidationError;
use crate::models::ShortenRequest;

const ALIAS_MIN_LEN: usize = 3;
const ALIAS_MAX_LEN: usize = 20;
const EXPIRY_MIN_DAYS: i64 = 1;
const EXPIRY_MAX_DAYS: i64 = 365;

/// 校验并规范化表单输入
///
/// - URL 为空 → `EmptyUrl`
/// - 缺少 http:// 或 https:// 时自动补 `https://`
/// - 别名为空视为未填写，否则必须匹配 `[A-Za-z0-9_-]{3,20}`
/// - 过期天数为空视为未填写，否则必须是 1..=365 的整数
pub fn validate(
    raw_url: &str,
    raw_alias: Option<&str>,
    raw_expiry_days: Option<&str>,
) -> Result<ShortenRequest, ValidationError> {
    let url = raw_url.trim();
    if url.is_empty() {
        return Err(ValidationError::EmptyUrl);
    }

    let original_url = if has_http_scheme(url) {
        url.to_string()
    } else {
        format!("https://{}", url)
    };

    let custom_alias = match raw_alias.map(str::trim).filter(|a| !a.is_empty()) {
        Some(alias) if is_valid_alias(alias) => Some(alias.to_string()),
        Some(_) => return Err(ValidationError::BadAlias),
        None => None,
    };

    let expires_in_days = match raw_expiry_days.map(str::trim).filter(|e| !e.is_empty()) {
        Some(raw) => Some(parse_expiry(raw)?),
        None => None,
    };

    Ok(ShortenRequest {
        original_url,
        custom_alias,
        expires_in_days,
    })
}

fn has_http_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn is_valid_alias(alias: &str) -> bool {
    (ALIAS_MIN_LEN..=ALIAS_MAX_LEN).contains(&alias.len())
        && alias
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
}

fn parse_expiry(raw: &str) -> Result<u16, ValidationError> {
    let days: i64 = raw.parse().map_err(|_| ValidationError::BadExpiry)?;
    if !(EXPIRY_MIN_DAYS..=EXPIRY_MAX_DAYS).contains(&days) {
        return Err(ValidationError::BadExpiry);
    }
    u16::try_from(days).map_err(|_| ValidationError::BadExpiry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_https() {
        let req = validate("example.com", None, None).unwrap();
        assert_eq!(req.original_url, "https://example.com");
    }

    #[test]
    fn test_keeps_existing_scheme() {
        assert_eq!(
            validate("http://example.com", None, None).unwrap().original_url,
            "http://example.com"
        );
        assert_eq!(
            validate("HTTPS://Example.com/a?b=1", None, None)
                .unwrap()
                .original_url,
            "HTTPS://Example.com/a?b=1"
        );
    }

    #[test]
    fn test_empty_url() {
        assert_eq!(validate("", None, None), Err(ValidationError::EmptyUrl));
        assert_eq!(validate("   ", None, None), Err(ValidationError::EmptyUrl));
    }

    #[test]
    fn test_trims_input() {
        let req = validate("  example.com/path  ", Some(" my_link "), Some(" 30 ")).unwrap();
        assert_eq!(req.original_url, "https://example.com/path");
        assert_eq!(req.custom_alias.as_deref(), Some("my_link"));
        assert_eq!(req.expires_in_days, Some(30));
    }

    #[test]
    fn test_alias_rules() {
        assert_eq!(
            validate("example.com", Some("ab"), None),
            Err(ValidationError::BadAlias)
        );
        assert_eq!(
            validate("example.com", Some("a".repeat(21).as_str()), None),
            Err(ValidationError::BadAlias)
        );
        assert_eq!(
            validate("example.com", Some("has space"), None),
            Err(ValidationError::BadAlias)
        );
        assert_eq!(
            validate("example.com", Some("ünï"), None),
            Err(ValidationError::BadAlias)
        );
        assert!(validate("example.com", Some("abc"), None).is_ok());
        assert!(validate("example.com", Some("A-b_9"), None).is_ok());
        assert!(validate("example.com", Some("a".repeat(20).as_str()), None).is_ok());
    }

    #[test]
    fn test_empty_alias_is_absent() {
        let req = validate("example.com", Some(""), None).unwrap();
        assert_eq!(req.custom_alias, None);
        let req = validate("example.com", Some("   "), None).unwrap();
        assert_eq!(req.custom_alias, None);
    }

    #[test]
    fn test_expiry_rules() {
        for bad in ["0", "366", "-1", "1.5", "ten", "99999999999999999999"] {
            assert_eq!(
                validate("example.com", None, Some(bad)),
                Err(ValidationError::BadExpiry),
                "expiry {:?} should be rejected",
                bad
            );
        }
        assert_eq!(
            validate("example.com", None, Some("1")).unwrap().expires_in_days,
            Some(1)
        );
        assert_eq!(
            validate("example.com", None, Some("365"))
                .unwrap()
                .expires_in_days,
            Some(365)
        );
        assert_eq!(
            validate("example.com", None, Some("")).unwrap().expires_in_days,
            None
        );
    }

    #[test]
    fn test_alias_checked_before_expiry() {
        assert_eq!(
            validate("example.com", Some("x"), Some("0")),
            Err(ValidationError::BadAlias)
        );
    }
}
