use anyhow::{Context, Result};
use tastepuzzle_app_shell::AppShell;
use tastepuzzle_data::Store;
use tastepuzzle_foundation::Settings;
use winit::event_loop::EventLoop;

mod app;
mod raster;

const LOCAL_USER: &str = "local";

fn main() -> Result<()> {
    env_logger::init();

    let store = Store::open_default().context("Failed to open the recipe database")?;
    let user = store.ensure_user(LOCAL_USER)?;
    let settings = Settings::load();

    let shell = AppShell::new(store, user, settings);
    let mut app = app::App::new(shell);

    let event_loop = EventLoop::new().context("Failed to create event loop")?;
    event_loop.run_app(&mut app)?;
    Ok(())
}
