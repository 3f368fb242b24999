// kpidash: terminal dashboard for event KPIs.

mod app;
mod config;
mod error;
mod kpi;
mod logging;
mod prefs;
mod state;
mod ui;

use tracing::{info, warn};

use crate::app::App;
use crate::config::Settings;
use crate::error::Result;
use crate::prefs::{FlagStore, JsonFlagStore, MemoryFlagStore};

/// Open the persisted flag store, falling back to memory when it is unreadable.
fn open_flag_store(settings: &Settings) -> Box<dyn FlagStore> {
    let Some(path) = prefs::prefs_path(settings.data_dir.as_deref()) else {
        warn!("no data directory; preferences will not be saved");
        return Box::new(MemoryFlagStore::new());
    };

    match JsonFlagStore::load(&path) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to load preferences");
            Box::new(MemoryFlagStore::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::load()?;
    let _guard = logging::init_tracing(&settings)?;
    info!(?settings, "starting kpidash");

    let flags = open_flag_store(&settings);
    let mut app = App::new(&settings, flags);

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    if let Err(e) = &result {
        warn!(error = %e, "exited with error");
    }
    result
}
