use std::fmt;
use std::time::Duration;

/// 输入校验失败原因（在任何网络请求之前产生）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyUrl,
    BadAlias,
    BadExpiry,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUrl => write!(f, "Please enter a URL to shorten"),
            Self::BadAlias => write!(
                f,
                "Custom alias must be 3-20 characters: letters, numbers, '-' or '_'"
            ),
            Self::BadExpiry => write!(
                f,
                "Expiry must be a whole number of days between 1 and 365"
            ),
        }
    }
}

/// 2xx 响应但内容不满足约定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    MissingShortUrl,
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingShortUrl => write!(f, "Server response did not include a short URL"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ClientError {
    Validation(ValidationError),
    Timeout(Duration),
    Parse(String),
    Server { status: u16, detail: String },
    Domain(DomainError),
    Transport(String),
    Storage(String),
    Config(String),
    Clipboard(String),
}

impl ClientError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "C001",
            ClientError::Timeout(_) => "C002",
            ClientError::Parse(_) => "C003",
            ClientError::Server { .. } => "C004",
            ClientError::Domain(_) => "C005",
            ClientError::Transport(_) => "C006",
            ClientError::Storage(_) => "C007",
            ClientError::Config(_) => "C008",
            ClientError::Clipboard(_) => "C009",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "Validation Error",
            ClientError::Timeout(_) => "Timeout Error",
            ClientError::Parse(_) => "Parse Error",
            ClientError::Server { .. } => "Server Error",
            ClientError::Domain(_) => "Domain Error",
            ClientError::Transport(_) => "Transport Error",
            ClientError::Storage(_) => "Storage Error",
            ClientError::Config(_) => "Configuration Error",
            ClientError::Clipboard(_) => "Clipboard Error",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            ClientError::Validation(e) => e.to_string(),
            ClientError::Timeout(d) => format!("Request timed out after {}s", d.as_secs_f64()),
            ClientError::Parse(msg) => msg.clone(),
            ClientError::Server { status, detail } => format!("HTTP {}: {}", status, detail),
            ClientError::Domain(e) => e.to_string(),
            ClientError::Transport(msg) => msg.clone(),
            ClientError::Storage(msg) => msg.clone(),
            ClientError::Config(msg) => msg.clone(),
            ClientError::Clipboard(msg) => msg.clone(),
        }
    }

    /// 面向用户的提示文本（用于通知）
    ///
    /// 服务端错误原样展示 detail，其余错误使用固定文案
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Server { detail, .. } => detail.clone(),
            ClientError::Parse(_) => "Unexpected response from server".to_string(),
            ClientError::Transport(_) => {
                "Could not reach the server. Please try again.".to_string()
            }
            ClientError::Clipboard(_) => "Failed to copy. Please try again.".to_string(),
            other => other.message(),
        }
    }

    /// 格式化为彩色输出
    pub fn format_colored(&self) -> String {
        use colored::Colorize;
        format!(
            "{} {} {}\n  {}",
            "[ERROR]".red().bold(),
            self.code().yellow(),
            self.error_type().red(),
            self.message().white()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for ClientError {}

// 便捷的构造函数
impl ClientError {
    pub fn parse<T: Into<String>>(msg: T) -> Self {
        ClientError::Parse(msg.into())
    }

    pub fn server<T: Into<String>>(status: u16, detail: T) -> Self {
        ClientError::Server {
            status,
            detail: detail.into(),
        }
    }

    pub fn transport<T: Into<String>>(msg: T) -> Self {
        ClientError::Transport(msg.into())
    }

    pub fn storage<T: Into<String>>(msg: T) -> Self {
        ClientError::Storage(msg.into())
    }

    pub fn config<T: Into<String>>(msg: T) -> Self {
        ClientError::Config(msg.into())
    }

    pub fn clipboard<T: Into<String>>(msg: T) -> Self {
        ClientError::Clipboard(msg.into())
    }
}

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Validation(err)
    }
}

impl From<DomainError> for ClientError {
    fn from(err: DomainError) -> Self {
        ClientError::Domain(err)
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<config::ConfigError> for ClientError {
    fn from(err: config::ConfigError) -> Self {
        ClientError::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
