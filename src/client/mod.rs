//! 短链接服务客户端
//!
//! # Architecture
//!
//! ```text
//! App → ShortenClient (timeout + classification) → Transport → backend
//! ```
//!
//! `ShortenClient` 只负责一次请求的发出与结果归类，缓存与通知由 [`crate::app::App`] 驱动。

mod shorten_client;
mod transport;

pub use shorten_client::{DEFAULT_TIMEOUT, ShortenClient, classify_response};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Transport};
