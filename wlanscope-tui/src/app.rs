use ratatui::text::Line;
use std::time::Duration;
use wlanscope_scan::{Adapter, WirelessScanner};

use crate::config::DashboardConfig;
use crate::console::{Command, Console, Key};
use crate::cycle;
use crate::error::{DashboardError, RenderError};
use crate::sort::SortState;
use crate::ui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    Stopped,
}

#[derive(Debug)]
pub struct DashboardState {
    pub phase: Phase,
    /// Shown in the footer.
    pub last_key: Option<Key>,
    pub passes: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            phase: Phase::Running,
            last_key: None,
            passes: 0,
        }
    }
}

impl DashboardState {
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Key consumed during a running pass. Quit stops, pause pauses, the rest
    /// leaves the phase alone and is returned for the caller to act on.
    pub fn on_key(&mut self, key: Key) -> Command {
        self.last_key = Some(key);
        let command = key.command();
        match command {
            Command::Quit => self.phase = Phase::Stopped,
            Command::Pause => self.phase = Phase::Paused,
            _ => {}
        }
        command
    }

    /// Key that ends a pause. Only quit has meaning here; anything else resumes.
    pub fn on_resume_key(&mut self, key: Key) {
        self.last_key = Some(key);
        self.phase = if key.is_quit() {
            Phase::Stopped
        } else {
            Phase::Running
        };
    }
}

/// The refresh loop and everything it mutates.
pub struct App<'a, S, C> {
    config: &'a DashboardConfig,
    scanner: &'a S,
    console: &'a mut C,
    adapters: Vec<Adapter>,
    pub sort: SortState,
    pub state: DashboardState,
}

impl<'a, S: WirelessScanner, C: Console> App<'a, S, C> {
    /// Enumerate adapters once; they stay fixed for the rest of the run.
    pub async fn start(
        config: &'a DashboardConfig,
        scanner: &'a S,
        console: &'a mut C,
    ) -> Result<Self, DashboardError> {
        let adapters = scanner
            .list_adapters()
            .await
            .map_err(DashboardError::Enumerate)?;
        tracing::info!("Monitoring {} adapter(s)", adapters.len());

        Ok(Self {
            config,
            scanner,
            console,
            adapters,
            sort: SortState::initial(config.sort_enabled),
            state: DashboardState::default(),
        })
    }

    pub async fn run(&mut self) -> Result<(), DashboardError> {
        // A pause always resolves inside the pass that started it.
        while self.state.is_running() {
            self.pass().await?;
        }
        tracing::info!("Stopped after {} pass(es)", self.state.passes);
        Ok(())
    }

    /// Sleep, redraw every adapter, then act on at most one key press.
    pub async fn pass(&mut self) -> Result<(), DashboardError> {
        tokio::time::sleep(Duration::from_millis(self.config.poll_interval_ms)).await;
        self.state.passes += 1;

        self.console.clear()?;
        let clock = chrono::Local::now().format("%I:%M:%S").to_string();
        let mut frame = ui::status_header(&clock);
        let mut pending = None;
        let mut failed = 0;

        if self.adapters.is_empty() {
            frame.extend(ui::no_adapters());
            self.console.draw(&frame)?;
            pending = self.poll_key()?;
        }

        for adapter in &self.adapters {
            let block = cycle::scan_adapter(self.scanner, adapter, &self.sort, self.config).await;
            if block.error.is_some() {
                failed += 1;
            }
            frame.extend(block.lines);
            self.console.draw(&frame)?;

            // One key per pass; later presses wait in the terminal buffer.
            if pending.is_none() {
                pending = self
                    .console
                    .poll_key()
                    .map_err(DashboardError::Input)?;
                if pending.is_some_and(Key::is_quit) {
                    break;
                }
            }
        }

        if failed > 0 {
            tracing::debug!("{} adapter(s) failed to scan in pass {}", failed, self.state.passes);
        }
        self.finish_pass(pending, frame)
    }

    fn poll_key(&mut self) -> Result<Option<Key>, DashboardError> {
        self.console.poll_key().map_err(DashboardError::Input)
    }

    fn finish_pass(&mut self, pending: Option<Key>, mut frame: Vec<Line<'static>>) -> Result<(), DashboardError> {
        let command = match pending {
            Some(key) => self.state.on_key(key),
            None => Command::None,
        };

        match command {
            Command::Quit => {}
            Command::Pause => {
                frame.extend(ui::paused_prompt());
                self.console.draw(&frame)?;
                tracing::debug!("Paused");

                let key = self.console.read_key().map_err(DashboardError::Input)?;
                self.state.on_resume_key(key);
            }
            Command::SortByName | Command::SortBySignal => {
                if self.config.sort_enabled && self.sort.on_command(command) {
                    tracing::debug!("Sort changed to {:?}", self.sort);
                }
                frame.extend(ui::footer(self.config.sort_enabled, self.state.last_key));
                self.console.draw(&frame)?;
            }
            Command::None => {
                frame.extend(ui::footer(self.config.sort_enabled, self.state.last_key));
                self.console.draw(&frame)?;
            }
        }
        Ok(())
    }
}

/// Run the dashboard until quit. Fatal errors are shown on the console and
/// acknowledged with a key press before they are returned.
pub async fn run<S: WirelessScanner, C: Console>(
    config: &DashboardConfig,
    scanner: &S,
    console: &mut C,
) -> Result<(), DashboardError> {
    let result = drive(config, scanner, console).await;

    if let Err(err) = &result {
        tracing::error!("Dashboard stopped: {}", err);
        if let Err(report_err) = report_fatal(console, &err.to_string()) {
            tracing::error!("Could not display error: {}", report_err);
        }
    }
    result
}

async fn drive<S: WirelessScanner, C: Console>(
    config: &DashboardConfig,
    scanner: &S,
    console: &mut C,
) -> Result<(), DashboardError> {
    let mut app = App::start(config, scanner, console).await?;
    app.run().await
}

fn report_fatal<C: Console>(console: &mut C, message: &str) -> Result<(), RenderError> {
    console.clear()?;
    console.draw(&ui::fatal_report(message))?;
    console.read_key()?;
    Ok(())
}
