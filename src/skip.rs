use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot request to end the running phase early.
///
/// Clones share the same flag. The signal handler only ever stores `true`;
/// the countdown is the single consumer and clears it.
#[derive(Debug, Clone, Default)]
pub struct SkipToken {
    flag: Arc<AtomicBool>,
}

impl SkipToken {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn request(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn is_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Returns whether a skip was pending, clearing it.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }

    pub fn clear(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }

    /// Route SIGUSR1 to this token.
    #[cfg(unix)]
    pub fn listen(&self) -> io::Result<()> {
        signal_hook::flag::register(signal_hook::consts::SIGUSR1, Arc::clone(&self.flag))?;
        tracing::debug!("Registered SIGUSR1 skip handler");
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn listen(&self) -> io::Result<()> {
        tracing::warn!("Skipping phases by signal is not supported on this platform");
        Ok(())
    }
}
