use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::info;

use crate::error::Result;

/// Shutdown request shared with the Ctrl-C handler, polled once per loop iteration.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag {
    requested: Arc<AtomicBool>,
}

impl ShutdownFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a flag and register it as the process SIGINT / Ctrl-C handler.
    ///
    /// Can only be called once per process.
    pub fn install() -> Result<Self> {
        let flag = Self::new();
        let handler_flag = flag.clone();
        ctrlc::set_handler(move || {
            info!("signal caught: interrupt");
            handler_flag.request();
        })?;
        Ok(flag)
    }

    pub fn request(&self) {
        self.requested.store(true, Ordering::SeqCst);
    }

    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod shutdown_tests {
    use super::ShutdownFlag;

    #[test]
    fn clones_share_the_request() {
        let flag = ShutdownFlag::new();
        let handler = flag.clone();
        assert!(!flag.is_requested());
        handler.request();
        assert!(flag.is_requested());
    }
}
