use std::cmp::Ordering;

use wlanscope_scan::NetworkObservation;

use crate::console::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Unset,
    Name,
    Signal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self::by_name()
    }
}

impl SortState {
    pub const fn unset() -> Self {
        Self {
            column: SortColumn::Unset,
            direction: SortDirection::Ascending,
        }
    }

    pub const fn by_name() -> Self {
        Self {
            column: SortColumn::Name,
            direction: SortDirection::Ascending,
        }
    }

    /// Strongest first.
    pub const fn by_signal() -> Self {
        Self {
            column: SortColumn::Signal,
            direction: SortDirection::Descending,
        }
    }

    /// Starting state: by name when sorting is enabled, scan order otherwise.
    pub fn initial(sort_enabled: bool) -> Self {
        if sort_enabled {
            Self::by_name()
        } else {
            Self::unset()
        }
    }

    /// Apply a key command. Returns whether the state changed.
    ///
    /// Pressing the key of the active column flips its direction; switching
    /// columns resets the direction to that column's default.
    pub fn on_command(&mut self, command: Command) -> bool {
        let next = match (command, self.column) {
            (Command::SortByName, SortColumn::Name) | (Command::SortBySignal, SortColumn::Signal) => Self {
                column: self.column,
                direction: self.direction.flipped(),
            },
            (Command::SortByName, _) => Self::by_name(),
            (Command::SortBySignal, _) => Self::by_signal(),
            _ => return false,
        };
        *self = next;
        true
    }

    pub fn compare(&self, a: &NetworkObservation, b: &NetworkObservation) -> Ordering {
        let ordering = match self.column {
            SortColumn::Unset => return Ordering::Equal,
            SortColumn::Name => compare_ssid(a.ssid_bytes(), b.ssid_bytes()),
            SortColumn::Signal => a.signal_dbm().cmp(&b.signal_dbm()),
        };
        self.direction.apply(ordering)
    }
}

fn trim_padding(raw: &[u8]) -> &[u8] {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    &raw[..end]
}

/// ASCII case-insensitive ordinal comparison, ignoring NUL padding.
pub fn compare_ssid(a: &[u8], b: &[u8]) -> Ordering {
    let a = trim_padding(a).iter().map(u8::to_ascii_lowercase);
    let b = trim_padding(b).iter().map(u8::to_ascii_lowercase);
    a.cmp(b)
}

/// Stable sort; equal elements keep scan order.
pub fn sort_networks(networks: &mut [NetworkObservation], state: &SortState) {
    if state.column == SortColumn::Unset {
        return;
    }
    networks.sort_by(|a, b| state.compare(a, b));
}
