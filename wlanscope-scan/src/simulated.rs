/*!
 * Simulated wireless backend
 * Deterministic adapters and networks for demos and development
 */

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{dbm_to_quality, Adapter, NetworkObservation, ScanError, WirelessScanner};

struct SimulatedAdapter {
    name: String,
    display_name: String,
    networks: Vec<(Vec<u8>, i32)>,
}

pub struct SimulatedScanner {
    adapters: Vec<SimulatedAdapter>,
    failing: HashSet<usize>,
    scans: AtomicU64,
}

impl Default for SimulatedScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedScanner {
    /// Two adapters with a handful of networks each, one of them hidden.
    pub fn new() -> Self {
        Self::empty()
            .with_adapter(
                "wlan0",
                "Intel Wi-Fi 6 AX201",
                &[
                    (b"HomeNet".as_slice(), -42),
                    (b"Neighbor_5G".as_slice(), -67),
                    (b"\0\0\0\0\0\0\0\0".as_slice(), -74),
                    (b"coffee-shop guest".as_slice(), -58),
                    (b"PRINTER-4F2A".as_slice(), -83),
                ],
            )
            .with_adapter(
                "wlan1",
                "Realtek RTL8812AU USB",
                &[
                    (b"HomeNet".as_slice(), -55),
                    (b"xfinitywifi".as_slice(), -71),
                    (b"Neighbor_5G".as_slice(), -79),
                ],
            )
    }

    pub fn empty() -> Self {
        Self {
            adapters: Vec::new(),
            failing: HashSet::new(),
            scans: AtomicU64::new(0),
        }
    }

    pub fn with_adapter(mut self, name: &str, display_name: &str, networks: &[(&[u8], i32)]) -> Self {
        self.adapters.push(SimulatedAdapter {
            name: name.to_string(),
            display_name: display_name.to_string(),
            networks: networks
                .iter()
                .map(|(ssid, dbm)| (ssid.to_vec(), *dbm))
                .collect(),
        });
        self
    }

    /// Make every scan of the adapter at `index` fail with a driver error.
    pub fn with_failing_adapter(mut self, index: usize) -> Self {
        self.failing.insert(index);
        self
    }

    /// Number of scans served so far, failed ones included.
    pub fn scan_count(&self) -> u64 {
        self.scans.load(Ordering::Relaxed)
    }
}

impl WirelessScanner for SimulatedScanner {
    async fn list_adapters(&self) -> Result<Vec<Adapter>, ScanError> {
        Ok(self
            .adapters
            .iter()
            .enumerate()
            .map(|(index, adapter)| Adapter::new(index, &adapter.name, &adapter.display_name))
            .collect())
    }

    async fn scan(&self, adapter: &Adapter) -> Result<Vec<NetworkObservation>, ScanError> {
        let tick = self.scans.fetch_add(1, Ordering::Relaxed);

        if self.failing.contains(&adapter.index) {
            return Err(ScanError::Adapter {
                adapter: adapter.name.clone(),
                message: "device not ready".to_string(),
            });
        }

        let simulated = self
            .adapters
            .get(adapter.index)
            .ok_or_else(|| ScanError::Adapter {
                adapter: adapter.name.clone(),
                message: "no such adapter".to_string(),
            })?;

        Ok(simulated
            .networks
            .iter()
            .enumerate()
            .map(|(i, (ssid, base))| {
                // Small bounded wobble so the bars move between refreshes.
                let drift = ((tick * 7 + i as u64 * 13) % 7) as i32 - 3;
                let dbm = (base + drift).min(0);
                NetworkObservation::new(ssid.clone(), dbm, i32::from(dbm_to_quality(dbm)))
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn adapters_are_indexed_in_insertion_order() {
        let scanner = SimulatedScanner::new();
        let adapters = scanner.list_adapters().await.unwrap();
        assert_eq!(adapters.len(), 2);
        assert_eq!(adapters[0], Adapter::new(0, "wlan0", "Intel Wi-Fi 6 AX201"));
        assert_eq!(adapters[1].index, 1);
    }

    #[tokio::test]
    async fn signals_drift_within_bounds() {
        let scanner = SimulatedScanner::new();
        let adapter = Adapter::new(0, "wlan0", "wlan0");
        for _ in 0..10 {
            let networks = scanner.scan(&adapter).await.unwrap();
            assert_eq!(networks.len(), 5);
            assert!((-45..=-39).contains(&networks[0].signal_dbm()));
            assert_eq!(networks[2].ssid(), "");
        }
        assert_eq!(scanner.scan_count(), 10);
    }

    #[tokio::test]
    async fn failing_adapter_reports_error() {
        let scanner = SimulatedScanner::new().with_failing_adapter(1);
        let adapters = scanner.list_adapters().await.unwrap();
        assert!(scanner.scan(&adapters[0]).await.is_ok());
        let err = scanner.scan(&adapters[1]).await.unwrap_err();
        assert!(matches!(err, ScanError::Adapter { .. }));
    }
}
