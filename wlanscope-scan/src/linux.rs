/*!
 * Linux wireless discovery
 * sysfs for adapters, iw for scan results
 */

use std::fs;
use std::path::{Path, PathBuf};

use tokio::process::Command;

use crate::{dbm_to_quality, Adapter, NetworkObservation, ScanError, WirelessScanner};

const SYS_CLASS_NET: &str = "/sys/class/net";

pub struct LinuxScanner {
    net_dir: PathBuf,
    iw_binary: String,
}

impl Default for LinuxScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl LinuxScanner {
    pub fn new() -> Self {
        Self {
            net_dir: PathBuf::from(SYS_CLASS_NET),
            iw_binary: "iw".to_string(),
        }
    }

    /// Read interfaces from another sysfs root.
    pub fn with_net_dir(mut self, net_dir: impl Into<PathBuf>) -> Self {
        self.net_dir = net_dir.into();
        self
    }

    pub fn with_iw_binary(mut self, iw_binary: impl Into<String>) -> Self {
        self.iw_binary = iw_binary.into();
        self
    }

    fn is_wireless(interface_dir: &Path) -> bool {
        interface_dir.join("wireless").exists() || interface_dir.join("phy80211").exists()
    }

    fn driver_name(interface_dir: &Path) -> Option<String> {
        let target = fs::read_link(interface_dir.join("device").join("driver")).ok()?;
        target
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
    }

    async fn run_iw(&self, args: &[&str]) -> Result<std::process::Output, ScanError> {
        Command::new(&self.iw_binary)
            .args(args)
            .output()
            .await
            .map_err(|source| ScanError::Command {
                command: format!("{} {}", self.iw_binary, args.join(" ")),
                source,
            })
    }
}

impl WirelessScanner for LinuxScanner {
    async fn list_adapters(&self) -> Result<Vec<Adapter>, ScanError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.net_dir).map_err(ScanError::Enumerate)? {
            let entry = entry.map_err(ScanError::Enumerate)?;
            if Self::is_wireless(&entry.path()) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        // read_dir order is unspecified
        names.sort();

        let adapters = names
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let display_name = match Self::driver_name(&self.net_dir.join(&name)) {
                    Some(driver) => format!("{name} ({driver})"),
                    None => name.clone(),
                };
                Adapter::new(index, name, display_name)
            })
            .collect::<Vec<_>>();

        tracing::info!("Found {} wireless adapter(s)", adapters.len());
        Ok(adapters)
    }

    async fn scan(&self, adapter: &Adapter) -> Result<Vec<NetworkObservation>, ScanError> {
        let output = self.run_iw(&["dev", &adapter.name, "scan"]).await?;

        // Live scans need CAP_NET_ADMIN; the cached results usually do not.
        let output = if output.status.success() {
            output
        } else {
            tracing::debug!(
                "Live scan on {} refused, falling back to cached results",
                adapter.name
            );
            self.run_iw(&["dev", &adapter.name, "scan", "dump"]).await?
        };

        if !output.status.success() {
            return Err(ScanError::Driver {
                adapter: adapter.name.clone(),
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let networks = parse_iw_scan(&String::from_utf8_lossy(&output.stdout));
        tracing::debug!("{}: {} network(s) visible", adapter.name, networks.len());
        Ok(networks)
    }
}

#[derive(Default)]
struct BssEntry {
    ssid: Option<Vec<u8>>,
    signal_dbm: Option<i32>,
}

impl BssEntry {
    fn finish(self) -> NetworkObservation {
        let dbm = self.signal_dbm.unwrap_or(-100);
        NetworkObservation::new(
            self.ssid.unwrap_or_default(),
            dbm,
            i32::from(dbm_to_quality(dbm)),
        )
    }
}

/// Parse `iw dev <if> scan` output into observations, in output order.
pub fn parse_iw_scan(output: &str) -> Vec<NetworkObservation> {
    let mut networks = Vec::new();
    let mut current: Option<BssEntry> = None;

    for line in output.lines() {
        if line.starts_with("BSS ") {
            if let Some(entry) = current.take() {
                networks.push(entry.finish());
            }
            current = Some(BssEntry::default());
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };
        let trimmed = line.trim_start();

        if let Some(rest) = trimmed.strip_prefix("signal:") {
            if let Some(value) = rest.trim().split_whitespace().next() {
                if let Ok(dbm) = value.parse::<f64>() {
                    entry.signal_dbm = Some(dbm.round() as i32);
                }
            }
        } else if let Some(rest) = trimmed.strip_prefix("SSID:") {
            if entry.ssid.is_none() {
                let raw = rest.strip_prefix(' ').unwrap_or(rest);
                entry.ssid = Some(unescape_ssid(raw));
            }
        }
    }

    if let Some(entry) = current {
        networks.push(entry.finish());
    }
    networks
}

/// Undo iw's `\xNN` escaping of SSID bytes.
fn unescape_ssid(escaped: &str) -> Vec<u8> {
    let bytes = escaped.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' && bytes.get(i + 1) == Some(&b'x') {
            let decoded = bytes
                .get(i + 2..i + 4)
                .and_then(|hex| std::str::from_utf8(hex).ok())
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    out
}
