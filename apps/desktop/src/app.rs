//! The windowed event pump around the headless shell.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, Context, Result};
use log::error;
use pixels::{Pixels, SurfaceTexture};
use tastepuzzle_app_shell::{AppShell, Tab};
use tastepuzzle_data::Store;
use tastepuzzle_ui_graphics::{Point, Scene};
use winit::application::ApplicationHandler;
use winit::dpi::{LogicalSize, PhysicalSize};
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{Key, NamedKey};
use winit::window::{Window, WindowId};

use crate::raster;
use tastepuzzle_ui_graphics::Color;

const WINDOW_BACKGROUND: Color = Color::from_hex(0xf5f5f5);
const SCROLL_LINE: f32 = 40.0;

pub struct App {
    shell: AppShell<Store>,
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    size: PhysicalSize<u32>,
    cursor: Point,
    query: String,
}

impl App {
    pub fn new(shell: AppShell<Store>) -> Self {
        Self {
            shell,
            window: None,
            pixels: None,
            size: PhysicalSize::new(1, 1),
            cursor: Point::ZERO,
            query: String::new(),
        }
    }

    fn resume(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attributes = Window::default_attributes()
            .with_title("TastePuzzle")
            .with_inner_size(LogicalSize::new(1024.0, 768.0));
        let window = Arc::new(
            event_loop
                .create_window(attributes)
                .context("Failed to create window")?,
        );

        self.size = window.inner_size();
        let surface = SurfaceTexture::new(self.size.width, self.size.height, window.clone());
        let pixels = Pixels::new(self.size.width, self.size.height, surface)
            .context("Failed to create framebuffer")?;

        self.shell.layout(self.size.width as f32);
        window.request_redraw();
        self.window = Some(window);
        self.pixels = Some(pixels);
        Ok(())
    }

    fn handle_window_event(&mut self, event_loop: &ActiveEventLoop, event: WindowEvent) -> Result<()> {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if size.width > 0 && size.height > 0 {
                    self.size = size;
                    if let Some(pixels) = self.pixels.as_mut() {
                        pixels.resize_surface(size.width, size.height)?;
                        pixels.resize_buffer(size.width, size.height)?;
                    }
                    // Relayout only; the data stays as loaded.
                    self.shell.layout(size.width as f32);
                    self.request_redraw();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = Point::new(position.x as f32, position.y as f32);
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => {
                if self.shell.click(self.cursor) {
                    self.request_redraw();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, lines) => -lines * SCROLL_LINE,
                    MouseScrollDelta::PixelDelta(position) => -position.y as f32,
                };
                self.shell.scroll_by(dy, self.size.height as f32);
                self.request_redraw();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                self.handle_key(event.logical_key);
            }
            WindowEvent::RedrawRequested => {
                self.render()?;
            }
            _ => {}
        }
        Ok(())
    }

    /// Keyboard map: Tab cycles tabs, Escape clears filters, F1/F2
    /// toggle the favorites/cooked filters, F3 cycles the max-time
    /// filter, Delete removes checked cart rows, Enter exports the cart,
    /// everything printable types into the recipe search.
    fn handle_key(&mut self, key: Key) {
        match key {
            Key::Named(NamedKey::Tab) => {
                let next = match self.shell.tab() {
                    Tab::Browser => Tab::Cart,
                    Tab::Cart => Tab::Profile,
                    Tab::Profile => Tab::Browser,
                };
                self.shell.select_tab(next);
                self.refresh();
            }
            Key::Named(NamedKey::Escape) => {
                self.query.clear();
                self.shell.reset_filters();
                self.refresh();
            }
            Key::Named(NamedKey::F1) => {
                let on = self.shell.filters().favorites_only;
                self.shell.set_favorites_only(!on);
                self.refresh();
            }
            Key::Named(NamedKey::F2) => {
                let on = self.shell.filters().cooked_only;
                self.shell.set_cooked_only(!on);
                self.refresh();
            }
            Key::Named(NamedKey::F3) => {
                let next = next_time_choice(self.shell.filters().max_time);
                self.shell.set_max_time_filter(next);
                self.refresh();
            }
            Key::Named(NamedKey::Delete) if self.shell.tab() == Tab::Cart => {
                self.shell.remove_checked_cart_items();
                self.refresh();
            }
            Key::Named(NamedKey::Enter) if self.shell.tab() == Tab::Cart => {
                self.shell.export_cart(&export_path());
                self.request_redraw();
            }
            Key::Named(NamedKey::Backspace) => {
                self.query.pop();
                self.shell.set_name_filter(self.query.clone(), Instant::now());
            }
            Key::Character(text) => {
                self.query.push_str(&text);
                self.shell.set_name_filter(self.query.clone(), Instant::now());
            }
            Key::Named(NamedKey::Space) => {
                self.query.push(' ');
                self.shell.set_name_filter(self.query.clone(), Instant::now());
            }
            _ => {}
        }
    }

    fn refresh(&mut self) {
        self.shell.layout(self.size.width as f32);
        self.request_redraw();
    }

    fn render(&mut self) -> Result<()> {
        let pixels = self
            .pixels
            .as_mut()
            .ok_or_else(|| anyhow!("Framebuffer not created yet"))?;

        self.shell.layout(self.size.width as f32);
        let mut scene = Scene::new();
        self.shell.paint(&mut scene);

        raster::rasterize(
            &scene,
            pixels.frame_mut(),
            self.size.width,
            self.size.height,
            WINDOW_BACKGROUND,
        );
        pixels.render().context("Failed to present frame")?;
        Ok(())
    }

    fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Advances the max-time filter: unlimited, then each choice in order,
/// then back to unlimited.
fn next_time_choice(current: Option<u32>) -> Option<u32> {
    use tastepuzzle_foundation::TIME_CHOICES_MINUTES;
    match current {
        None => TIME_CHOICES_MINUTES.first().copied(),
        Some(minutes) => TIME_CHOICES_MINUTES
            .iter()
            .position(|&choice| choice == minutes)
            .and_then(|i| TIME_CHOICES_MINUTES.get(i + 1))
            .copied(),
    }
}

/// Where the exported shopping list lands.
fn export_path() -> std::path::PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| std::path::PathBuf::from("."))
        .join("shopping_list.txt")
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if let Err(err) = self.resume(event_loop) {
            error!("Failed to resume: {err:#}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Err(err) = self.handle_window_event(event_loop, event) {
            error!("Failed to handle event: {err:#}");
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shell.tick(Instant::now()) {
            self.shell.layout(self.size.width as f32);
            self.request_redraw();
        }
        // Sleep until the pending debounce, or indefinitely.
        match self.shell.next_deadline() {
            Some(deadline) => event_loop.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tastepuzzle_foundation::TIME_CHOICES_MINUTES;

    #[test]
    fn test_time_filter_cycles_through_every_choice() {
        let mut current = None;
        let mut seen = Vec::new();
        loop {
            current = next_time_choice(current);
            match current {
                Some(minutes) => seen.push(minutes),
                None => break,
            }
        }
        assert_eq!(seen, TIME_CHOICES_MINUTES.to_vec());
    }

    #[test]
    fn test_export_path_is_a_file_name() {
        let path = export_path();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("shopping_list.txt")
        );
    }
}
