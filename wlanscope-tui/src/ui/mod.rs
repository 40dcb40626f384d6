/*!
 * wlanscope line layout
 * Header, caption and network rows for the signal dashboard
 */

pub mod signal;

use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use wlanscope_scan::{decode_ssid, Adapter, NetworkObservation};

use crate::config::{ColumnWidths, DashboardConfig};
use crate::console::Key;
use crate::sort::{SortColumn, SortDirection, SortState};

// Console palette
const HIGHLIGHT: Color = Color::Cyan;
const INDEX: Color = Color::DarkGray;
const ERROR: Color = Color::Red;
const MUTED: Color = Color::Gray;

pub const HIDDEN_SSID: &str = "<unknown/hidden>";
pub const BANNER: &str = "wlanscope - WiFi Signal Strength Analyzer";

const INDEX_WIDTH: usize = 3;

/// SSID as shown in the name column.
///
/// Longer names are cut to `width` and lose trailing whitespace; empty names
/// get a placeholder.
pub fn display_ssid(raw: &[u8], width: usize) -> String {
    let ssid = decode_ssid(raw);
    if ssid.is_empty() {
        return HIDDEN_SSID.to_string();
    }
    if ssid.chars().count() > width {
        let cut: String = ssid.chars().take(width).collect();
        return cut.trim_end().to_string();
    }
    ssid
}

pub fn status_header(clock: &str) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(BANNER, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(format!("Last update: {clock}")).alignment(Alignment::Right),
    ]
}

pub fn adapter_header(adapter: &Adapter) -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("eth{} \"{}\":", adapter.index, adapter.display_name),
            Style::default().fg(HIGHLIGHT),
        )),
    ]
}

fn marker(sort: &SortState, column: SortColumn) -> &'static str {
    if sort.column != column {
        return "";
    }
    match sort.direction {
        SortDirection::Ascending => " ▲",
        SortDirection::Descending => " ▼",
    }
}

/// Width of the `Signal: -NN dBm ` field between the two separators.
fn signal_field_width(columns: &ColumnWidths) -> usize {
    "Signal: ".len() + columns.signal + " dBm ".len()
}

pub fn column_caption(sort: &SortState, columns: &ColumnWidths) -> Line<'static> {
    let name = format!("SSID{}", marker(sort, SortColumn::Name));
    let signal = format!("Signal{}", marker(sort, SortColumn::Signal));
    let caption = format!(
        "{:<iw$} {:<sw$}|{:<fw$}|Quality",
        "#",
        name,
        signal,
        iw = INDEX_WIDTH,
        sw = columns.ssid,
        fw = signal_field_width(columns),
    );
    Line::from(Span::styled(
        caption,
        Style::default().fg(MUTED).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn network_row(index: usize, network: &NetworkObservation, config: &DashboardConfig) -> Line<'static> {
    let columns = &config.columns;
    let quality = i32::from(network.link_quality());
    let bar = signal::render(quality, columns.bar, &config.color_bands);

    Line::from(vec![
        Span::styled(
            format!("{:<iw$}", index, iw = INDEX_WIDTH),
            Style::default().fg(INDEX),
        ),
        Span::raw(format!(
            " {:<sw$}|Signal: {:>dw$} dBm |",
            display_ssid(network.ssid_bytes(), columns.ssid),
            network.signal_dbm(),
            sw = columns.ssid,
            dw = columns.signal,
        )),
        Span::styled(bar.glyphs, Style::default().fg(bar.color)),
        Span::raw(format!(" {:>3}%", network.link_quality())),
    ])
}

pub fn scan_failure(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("    scan failed: {message}"),
        Style::default().fg(ERROR),
    ))
}

pub fn no_networks() -> Line<'static> {
    Line::from(Span::styled("    no networks visible", Style::default().fg(MUTED)))
}

pub fn no_adapters() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "No wireless adapters found",
            Style::default().fg(MUTED),
        )),
    ]
}

pub fn footer(sort_enabled: bool, last_key: Option<Key>) -> Vec<Line<'static>> {
    let hint = if sort_enabled {
        "Press [Space] to pause or [Escape] to quit. Sort: [n] name, [s] signal."
    } else {
        "Press [Space] to pause or [Escape] to quit."
    };
    let mut spans = vec![Span::raw(hint)];
    if let Some(key) = last_key {
        spans.push(Span::styled(
            format!("  Last key: {}", key.label()),
            Style::default().fg(MUTED),
        ));
    }
    vec![Line::from(""), Line::from(spans)]
}

pub fn paused_prompt() -> Vec<Line<'static>> {
    vec![
        Line::from(""),
        Line::from(Span::styled(
            "PAUSED: Press any key to continue",
            Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
        )),
    ]
}

pub fn fatal_report(message: &str) -> Vec<Line<'static>> {
    let error = Style::default().fg(ERROR);
    let mut lines = vec![Line::from(Span::styled(BANNER, error))];
    lines.push(Line::from(""));
    lines.extend(
        message
            .lines()
            .map(|line| Line::from(Span::styled(line.to_string(), error))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from("Press any key to exit"));
    lines
}

#[cfg(test)]
pub(crate) fn line_text(line: &Line<'_>) -> String {
    line.spans.iter().map(|span| span.content.as_ref()).collect()
}
