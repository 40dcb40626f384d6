//! One adapter's share of a refresh pass: scan, sort, lay out.

use ratatui::text::Line;
use wlanscope_scan::{Adapter, NetworkObservation, ScanError, WirelessScanner};

use crate::config::DashboardConfig;
use crate::sort::{sort_networks, SortState};
use crate::ui;

pub struct AdapterBlock {
    pub lines: Vec<Line<'static>>,
    /// Set when the scan failed; the block then carries the error line instead of rows.
    pub error: Option<ScanError>,
}

/// Scan one adapter and render its block. A failed scan is reported in the
/// block and never propagated.
pub async fn scan_adapter<S: WirelessScanner>(
    scanner: &S,
    adapter: &Adapter,
    sort: &SortState,
    config: &DashboardConfig,
) -> AdapterBlock {
    let result = scanner.scan(adapter).await;
    if let Err(err) = &result {
        tracing::warn!("Scan failed on {}: {}", adapter.name, err);
    }
    render_block(adapter, result, sort, config)
}

pub fn render_block(
    adapter: &Adapter,
    result: Result<Vec<NetworkObservation>, ScanError>,
    sort: &SortState,
    config: &DashboardConfig,
) -> AdapterBlock {
    let mut lines = ui::adapter_header(adapter);

    let mut networks = match result {
        Ok(networks) => networks,
        Err(err) => {
            lines.push(ui::scan_failure(&err.to_string()));
            return AdapterBlock {
                lines,
                error: Some(err),
            };
        }
    };

    lines.push(ui::column_caption(sort, &config.columns));
    if networks.is_empty() {
        lines.push(ui::no_networks());
    }

    sort_networks(&mut networks, sort);
    lines.extend(
        networks
            .iter()
            .enumerate()
            .map(|(i, network)| ui::network_row(i + 1, network, config)),
    );

    AdapterBlock { lines, error: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::line_text;
    use wlanscope_scan::SimulatedScanner;

    fn adapter() -> Adapter {
        Adapter::new(0, "wlan0", "Test Adapter")
    }

    fn networks() -> Vec<NetworkObservation> {
        vec![
            NetworkObservation::new(b"zeta".to_vec(), -70, 60),
            NetworkObservation::new(Vec::new(), -50, 100),
            NetworkObservation::new(b"Alpha".to_vec(), -90, 20),
        ]
    }

    #[test]
    fn block_has_header_caption_and_sorted_rows() {
        let block = render_block(
            &adapter(),
            Ok(networks()),
            &SortState::by_name(),
            &DashboardConfig::default(),
        );
        assert!(block.error.is_none());

        let text: Vec<String> = block.lines.iter().map(line_text).collect();
        assert_eq!(text.len(), 2 + 1 + 3);
        assert_eq!(text[1], "eth0 \"Test Adapter\":");
        assert!(text[2].contains("SSID ▲"));
        // hidden SSID sorts first by its empty name but shows the placeholder
        assert!(text[3].starts_with("1   <unknown/hidden>"));
        assert!(text[4].starts_with("2   Alpha"));
        assert!(text[5].starts_with("3   zeta"));
    }

    #[test]
    fn signal_sort_puts_strongest_first() {
        let block = render_block(
            &adapter(),
            Ok(networks()),
            &SortState::by_signal(),
            &DashboardConfig::default(),
        );
        let text: Vec<String> = block.lines.iter().map(line_text).collect();
        assert!(text[3].contains("-50 dBm"));
        assert!(text[4].contains("-70 dBm"));
        assert!(text[5].contains("-90 dBm"));
    }

    #[test]
    fn unset_sort_keeps_scan_order() {
        let block = render_block(
            &adapter(),
            Ok(networks()),
            &SortState::unset(),
            &DashboardConfig::default(),
        );
        let text: Vec<String> = block.lines.iter().map(line_text).collect();
        assert!(text[3].starts_with("1   zeta"));
        assert!(text[5].starts_with("3   Alpha"));
    }

    #[test]
    fn failed_scan_renders_error_line_only() {
        let err = ScanError::Driver {
            adapter: "wlan0".to_string(),
            message: "Device or resource busy".to_string(),
        };
        let block = render_block(&adapter(), Err(err), &SortState::by_name(), &DashboardConfig::default());

        assert!(matches!(block.error, Some(ScanError::Driver { .. })));
        assert_eq!(block.lines.len(), 3);
        assert!(line_text(&block.lines[2]).contains("Device or resource busy"));
    }

    #[test]
    fn empty_scan_says_so() {
        let block = render_block(&adapter(), Ok(Vec::new()), &SortState::by_name(), &DashboardConfig::default());
        assert!(line_text(block.lines.last().unwrap()).contains("no networks visible"));
    }

    #[tokio::test]
    async fn scanner_failure_is_contained() {
        let scanner = SimulatedScanner::new().with_failing_adapter(0);
        let adapters = scanner.list_adapters().await.unwrap();
        let config = DashboardConfig::default();

        let failed = scan_adapter(&scanner, &adapters[0], &SortState::by_name(), &config).await;
        let ok = scan_adapter(&scanner, &adapters[1], &SortState::by_name(), &config).await;

        assert!(failed.error.is_some());
        assert!(ok.error.is_none());
        assert_eq!(ok.lines.len(), 2 + 1 + 3);
    }
}
