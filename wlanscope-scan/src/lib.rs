/*!
 * wlanscope wireless scanning
 * Adapter enumeration and visible-network scans behind one trait
 */

pub mod linux;
pub mod simulated;
mod ssid;

use thiserror::Error;

pub use linux::LinuxScanner;
pub use simulated::SimulatedScanner;
pub use ssid::{dbm_to_quality, decode_ssid};

/// A local wireless interface, captured once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Adapter {
    /// Stable position assigned at enumeration time.
    pub index: usize,
    /// Kernel interface name, used to address the adapter when scanning.
    pub name: String,
    /// Human readable label. Resolving it is slow, so it is never re-queried.
    pub display_name: String,
}

impl Adapter {
    pub fn new(index: usize, name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            index,
            name: name.into(),
            display_name: display_name.into(),
        }
    }
}

/// One network seen during a single scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkObservation {
    ssid: Vec<u8>,
    signal_dbm: i32,
    link_quality: u8,
}

impl NetworkObservation {
    /// Link quality is clamped to 0..=100.
    pub fn new(ssid: impl Into<Vec<u8>>, signal_dbm: i32, link_quality: i32) -> Self {
        Self {
            ssid: ssid.into(),
            signal_dbm,
            link_quality: link_quality.clamp(0, 100) as u8,
        }
    }

    /// Raw SSID bytes as reported by the driver, padding included.
    pub fn ssid_bytes(&self) -> &[u8] {
        &self.ssid
    }

    pub fn ssid(&self) -> String {
        decode_ssid(&self.ssid)
    }

    pub fn signal_dbm(&self) -> i32 {
        self.signal_dbm
    }

    pub fn link_quality(&self) -> u8 {
        self.link_quality
    }
}

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to enumerate wireless adapters: {0}")]
    Enumerate(#[source] std::io::Error),

    #[error("failed to run {command}: {source}")]
    Command {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{adapter}: driver reported: {message}")]
    Driver { adapter: String, message: String },

    #[error("{adapter}: {message}")]
    Adapter { adapter: String, message: String },
}

/// Source of adapters and scan results.
///
/// The dashboard drives one implementation from a single task, so the
/// futures are not required to be `Send`.
#[allow(async_fn_in_trait)]
pub trait WirelessScanner {
    /// Enumerate adapters in a stable order. Called once per process.
    async fn list_adapters(&self) -> Result<Vec<Adapter>, ScanError>;

    /// Fresh list of visible networks, in the order the backend returned them.
    async fn scan(&self, adapter: &Adapter) -> Result<Vec<NetworkObservation>, ScanError>;
}
