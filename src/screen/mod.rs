// src/screen/mod.rs

//! The screen factory and the resources it hands out.
//!
//! Every resource owns its native handle and releases it exactly once, either
//! through `release()` or on drop. All of them hold the adapter through an `Rc`,
//! which also keeps them on the thread that created them.

mod buffer;
mod texture;
mod window;

pub use buffer::{Buffer, RgbaImage, RgbaImageMut};
pub use texture::Texture;
pub use window::Window;

use crate::config::CONFIG;
use crate::error::{Result, ScreenError};
use crate::geom::Point;
use crate::native::SdlAdapter;
use log::{debug, error, info};
use std::rc::{Rc, Weak};
use std::sync::{mpsc, Arc};
use window::NativeWindow;

/// Options for [`Screen::new_window`]. A zero dimension takes the configured
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NewWindowOptions {
    pub width: u32,
    pub height: u32,
}

/// Per-call drawing options. Currently carries nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DrawOptions {}

/// A 2x3 affine transform, row-major, mapping source to destination space.
pub type Affine = [[f32; 3]; 2];

/// Outcome of [`Window::publish`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PublishResult {
    /// Whether the back buffer still holds the published frame. Never
    /// guaranteed by SDL.
    pub back_buffer_preserved: bool,
}

/// Factory for buffers, textures and windows.
///
/// Textures are created by a renderer, so the screen remembers the renderer of
/// the most recently created window. It does not keep that window alive.
pub struct Screen<A: SdlAdapter> {
    adapter: Rc<A>,
    renderer: Weak<NativeWindow<A>>,
}

fn check_size(size: Point) -> Result<()> {
    if size.x < 0 || size.y < 0 {
        return Err(ScreenError::InvalidSize(size));
    }
    Ok(())
}

fn window_dimension(requested: u32, default: u32) -> Result<i32> {
    let value = if requested == 0 { default } else { requested };
    i32::try_from(value)
        .map_err(|_| ScreenError::Platform(format!("window dimension {} out of range", value)))
}

impl<A: SdlAdapter> Screen<A> {
    pub(crate) fn new(adapter: Rc<A>) -> Self {
        Screen {
            adapter,
            renderer: Weak::new(),
        }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Creates a zeroed CPU pixel buffer of `size`.
    pub fn new_buffer(&self, size: Point) -> Result<Buffer<A>> {
        check_size(size)?;
        let surface = self
            .adapter
            .create_rgba_surface(size.x, size.y)
            .map_err(|e| {
                error!("Failed to create {}x{} surface: {:#}", size.x, size.y, e);
                ScreenError::allocation(e)
            })?;
        debug!("Created {}x{} buffer", size.x, size.y);
        Ok(Buffer::new(Rc::clone(&self.adapter), surface, size))
    }

    /// Creates a streaming texture on the renderer of the most recent window.
    ///
    /// Fails with [`ScreenError::Prereq`] when no window is alive.
    pub fn new_texture(&self, size: Point) -> Result<Texture<A>> {
        check_size(size)?;
        let owner = self
            .renderer
            .upgrade()
            .ok_or(ScreenError::Prereq("no renderer yet"))?;
        let texture = self
            .adapter
            .create_streaming_texture(owner.renderer(), size.x, size.y)
            .map_err(|e| {
                error!("Failed to create {}x{} texture: {:#}", size.x, size.y, e);
                ScreenError::allocation(e)
            })?;
        debug!("Created {}x{} texture", size.x, size.y);
        Ok(Texture::new(owner, texture, size))
    }

    /// Creates a window together with its renderer.
    pub fn new_window(&mut self, opts: &NewWindowOptions) -> Result<Window<A>> {
        let defaults = &CONFIG.window;
        let width = window_dimension(opts.width, defaults.width)?;
        let height = window_dimension(opts.height, defaults.height)?;

        let (window, renderer) = self
            .adapter
            .create_window_and_renderer(width, height, defaults.high_dpi)
            .map_err(|e| {
                error!("Failed to create {}x{} window: {:#}", width, height, e);
                ScreenError::platform(e)
            })?;
        let native = Rc::new(NativeWindow::new(Rc::clone(&self.adapter), window, renderer));
        let id = self.adapter.window_id(native.window());

        // The native pair is destroyed by `native`'s drop if this fails.
        let user_event = self.adapter.register_user_event().map_err(|e| {
            error!("Failed to register user event for window {}: {:#}", id, e);
            ScreenError::platform(e)
        })?;
        let (tx, rx) = mpsc::channel();
        let waker = Arc::new(self.adapter.waker(user_event, id));

        self.renderer = Rc::downgrade(&native);
        info!("Created window {} ({}x{})", id, width, height);
        Ok(Window::new(native, id, user_event, tx, rx, waker))
    }
}

impl<A: SdlAdapter> std::fmt::Debug for Screen<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Screen")
            .field("adapter", &self.adapter)
            .field("has_renderer", &(self.renderer.strong_count() > 0))
            .finish()
    }
}
