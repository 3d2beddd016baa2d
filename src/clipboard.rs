//! 剪贴板访问

use crate::errors::{ClientError, Result};

pub trait Clipboard {
    fn copy_text(&mut self, text: &str) -> Result<()>;
}

/// 系统剪贴板
///
/// 在 Linux 上剪贴板内容由本进程持有，因此句柄在首次复制后保留到会话结束。
#[derive(Default)]
pub struct SystemClipboard {
    #[cfg(feature = "clipboard")]
    handle: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(feature = "clipboard")]
impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, text: &str) -> Result<()> {
        if self.handle.is_none() {
            let handle = arboard::Clipboard::new()
                .map_err(|e| ClientError::clipboard(format!("Clipboard unavailable: {}", e)))?;
            self.handle = Some(handle);
        }

        match self.handle.as_mut() {
            Some(handle) => handle
                .set_text(text.to_string())
                .map_err(|e| ClientError::clipboard(format!("Failed to set clipboard: {}", e))),
            None => Err(ClientError::clipboard("Clipboard unavailable")),
        }
    }
}

#[cfg(not(feature = "clipboard"))]
impl Clipboard for SystemClipboard {
    fn copy_text(&mut self, _text: &str) -> Result<()> {
        Err(ClientError::clipboard(
            "Clipboard support is not enabled in this build",
        ))
    }
}
