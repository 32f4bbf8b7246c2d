//! # Outbound Ports (Driven Ports / SPI)
//!
//! Dependencies the verifier needs from its environment.

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    /// Seconds since the unix epoch.
    fn now(&self) -> u64;
}

/// System time implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            // Clock before the epoch: report 0 rather than panic
            .unwrap_or(0)
    }
}
