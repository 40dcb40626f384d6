//! Link-quality bar and color band selection.

use ratatui::style::Color;

use crate::config::ColorBand;

pub const FILLED: char = '▄';
pub const BLANK: char = ' ';

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalBar {
    pub glyphs: String,
    pub color: Color,
}

/// Number of filled cells for `quality` on a bar `width` cells wide.
///
/// Quality is clamped to 0..=100 first, so the result is always within 0..=width.
pub fn filled_cells(quality: i32, width: usize) -> usize {
    let quality = quality.clamp(0, 100) as usize;
    match width.checked_mul(quality) {
        Some(cells) => cells / 100,
        // only reachable for widths far past any terminal
        None => width / 100 * quality,
    }
}

pub fn render_bar(quality: i32, width: usize) -> String {
    let filled = filled_cells(quality, width);
    let mut glyphs = String::with_capacity(width.saturating_mul(FILLED.len_utf8()));
    glyphs.extend(std::iter::repeat(FILLED).take(filled));
    glyphs.extend(std::iter::repeat(BLANK).take(width.saturating_sub(filled)));
    glyphs
}

/// First band whose threshold the quality exceeds; the last band is the floor.
pub fn band_color(quality: i32, bands: &[ColorBand]) -> Color {
    bands
        .iter()
        .find(|band| quality > i32::from(band.above))
        .or_else(|| bands.last())
        .map_or(Color::Reset, |band| band.color)
}

pub fn render(quality: i32, width: usize, bands: &[ColorBand]) -> SignalBar {
    SignalBar {
        glyphs: render_bar(quality, width),
        color: band_color(quality, bands),
    }
}
