// Interactive lookup screen
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::Result;
pub use app::{App, MessageType, StatusMessage};

use crate::config::Config;
use crate::display::PanelView;
use crate::suggest::MatchMode;
use crate::system::QuerySystem;
use terminal::TerminalGuard;

/// Run the interactive lookup screen.
///
/// `address` is a scanned page address the session starts from; its identifier (or
/// the last stored one) is pre-filled in the input.
pub fn run_interactive(config: &Config, address: Option<&str>) -> Result<()> {
    let store = config.load_store()?;
    let session = config.open_session()?;
    let options = config.system_options(address, MatchMode::default())?;
    let system = QuerySystem::new(store, session, PanelView::new(), options);
    let mut app = App::new(system);

    tracing::info!(state_dir = %config.state_dir.display(), "interactive session started");

    let mut guard = TerminalGuard::enter()?;
    let res = app.run(guard.terminal_mut());
    guard.restore()?;

    res
}
