mod bootstrap;

use anyhow::Result;
use clap::Parser;
use metrics_core::settings::Settings;
use metrics_data::cache::{FileCache, SessionCache};
use metrics_runtime::store::MetricsStore;
use metrics_ui::app::{App, DashboardView};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::ensure_directories()?;
    bootstrap::setup_logging(&settings.log_level, settings.log_file.as_ref())?;

    tracing::info!("Copilot Metrics v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!("View: {}, Theme: {}", settings.view, settings.theme);

    let cache = FileCache::new(&FileCache::default_dir());

    if settings.clear {
        cache.clear()?;
        println!("Session cache cleared.");
        return Ok(());
    }

    let mut store = MetricsStore::new(Box::new(cache));

    if let Some(path) = &settings.data {
        tracing::info!("Loading metrics from {}", path.display());
        store.load(path).await;
    }

    if let Some(message) = store.error() {
        // The dashboard stays usable with prior (or empty) state; the error
        // is surfaced in the footer as well.
        eprintln!("warning: {}", message);
    }

    let error = store.error().map(|e| e.to_string());
    let snapshot = store.snapshot().clone();

    let app = App::new(
        &settings.theme,
        DashboardView::from_name(&settings.view),
        error,
    );
    app.run_dashboard(snapshot).await?;

    Ok(())
}
