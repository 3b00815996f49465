// src/native/mod.rs

//! Defines the `SdlAdapter` trait: the slice of SDL2 the screen driver needs.
//!
//! The screen types never call SDL directly. They go through an adapter so the
//! driver can be exercised without a display: [`live::LiveSdlAdapter`] forwards
//! to SDL2 (feature `sdl`), [`mock::MockSdlAdapter`] keeps everything in memory.
//!
//! Native events are first decoded into [`NativeEvent`], a plain Rust
//! descriptor, which the translator in `crate::translate` maps to portable events.

use crate::color::{DrawOp, NativeColor};
use crate::geom::{Point, Rectangle};
use crate::waker::EventLoopWaker;
use anyhow::Result;
use std::fmt;

pub mod keysym;
#[cfg(feature = "sdl")]
pub mod live;
pub mod mock;

/// Base of the application-registered event type range (`SDL_USEREVENT`).
pub const SDL_USEREVENT: u32 = 0x8000;

/// Mirrors `SDL_Rect`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl NativeRect {
    pub fn to_rectangle(self) -> Rectangle {
        Rectangle::new(
            self.x,
            self.y,
            self.x.saturating_add(self.w),
            self.y.saturating_add(self.h),
        )
    }
}

impl From<Rectangle> for NativeRect {
    fn from(r: Rectangle) -> Self {
        NativeRect {
            x: r.min.x,
            y: r.min.y,
            w: r.dx(),
            h: r.dy(),
        }
    }
}

/// Converts a rectangle for calls where a null `SDL_Rect` means "everything".
/// Only [`Rectangle::ZERO`] maps to `None`; callers skip other empty rectangles.
pub fn to_native_rect(r: Rectangle) -> Option<NativeRect> {
    if r == Rectangle::ZERO {
        None
    } else {
        Some(r.into())
    }
}

/// `SDL_WindowEventID`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WindowEventId {
    Shown,
    Hidden,
    Exposed,
    Moved,
    Resized,
    SizeChanged,
    Minimized,
    Maximized,
    Restored,
    Enter,
    Leave,
    FocusGained,
    FocusLost,
    Close,
    Other(u8),
}

impl WindowEventId {
    pub fn from_raw(raw: u8) -> Self {
        match raw {
            1 => WindowEventId::Shown,
            2 => WindowEventId::Hidden,
            3 => WindowEventId::Exposed,
            4 => WindowEventId::Moved,
            5 => WindowEventId::Resized,
            6 => WindowEventId::SizeChanged,
            7 => WindowEventId::Minimized,
            8 => WindowEventId::Maximized,
            9 => WindowEventId::Restored,
            10 => WindowEventId::Enter,
            11 => WindowEventId::Leave,
            12 => WindowEventId::FocusGained,
            13 => WindowEventId::FocusLost,
            14 => WindowEventId::Close,
            other => WindowEventId::Other(other),
        }
    }
}

/// A decoded native event record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEvent {
    Quit,
    Window {
        window_id: u32,
        event: WindowEventId,
    },
    Key {
        window_id: u32,
        keycode: keysym::Keycode,
        modifiers: u16,
        pressed: bool,
    },
    MouseMotion {
        window_id: u32,
        x: i32,
        y: i32,
    },
    MouseButton {
        window_id: u32,
        button: u8,
        x: i32,
        y: i32,
        pressed: bool,
    },
    MouseWheel {
        window_id: u32,
        x: i32,
        y: i32,
    },
    /// An application-registered event, e.g. one pushed by an `EventLoopWaker`.
    User {
        event_type: u32,
        window_id: u32,
    },
    /// Any event category the driver does not translate.
    Other {
        event_type: u32,
    },
}

/// Capability provider for the native windowing and rendering library.
///
/// Handles are owned by the screen types, which call the matching
/// destroy/free method exactly once from `Drop`. Methods returning `Result`
/// report the native diagnostic (`SDL_GetError`) on failure.
pub trait SdlAdapter: fmt::Debug + 'static {
    /// CPU surface in byte-order RGBA, pitch `width * 4`.
    type Surface;
    /// Streaming texture in byte-order RGBA.
    type Texture;
    type Window;
    type Renderer;
    type Waker: EventLoopWaker + 'static;

    // --- Library lifetime ---
    fn init(&self) -> Result<()>;
    fn quit(&self);

    // --- Surfaces ---
    fn create_rgba_surface(&self, width: i32, height: i32) -> Result<Self::Surface>;
    fn free_surface(&self, surface: &mut Self::Surface);
    fn surface_pitch(&self, surface: &Self::Surface) -> usize;
    fn surface_pixels<'s>(&self, surface: &'s Self::Surface) -> &'s [u8];
    fn surface_pixels_mut<'s>(&self, surface: &'s mut Self::Surface) -> &'s mut [u8];

    // --- Textures ---
    fn create_streaming_texture(
        &self,
        renderer: &Self::Renderer,
        width: i32,
        height: i32,
    ) -> Result<Self::Texture>;
    fn destroy_texture(&self, texture: &mut Self::Texture);
    /// Write-locks `rect` and returns the row pitch in bytes.
    fn lock_texture(&self, texture: &mut Self::Texture, rect: NativeRect) -> Result<usize>;
    /// The bytes of the currently locked region, starting at its top-left pixel.
    /// Empty when the texture is not locked.
    fn locked_pixels<'t>(&self, texture: &'t mut Self::Texture) -> &'t mut [u8];
    fn unlock_texture(&self, texture: &mut Self::Texture);

    // --- Windows and renderers ---
    fn create_window_and_renderer(
        &self,
        width: i32,
        height: i32,
        high_dpi: bool,
    ) -> Result<(Self::Window, Self::Renderer)>;
    fn destroy_renderer(&self, renderer: &mut Self::Renderer);
    fn destroy_window(&self, window: &mut Self::Window);
    fn window_id(&self, window: &Self::Window) -> u32;

    /// Maps a color to a pixel value in the window surface's format.
    fn map_window_color(&self, window: &Self::Window, color: NativeColor) -> Result<u32>;
    /// Fills `rect` (`None` = whole surface) of the window surface.
    fn fill_window_surface(
        &self,
        window: &Self::Window,
        rect: Option<NativeRect>,
        pixel: u32,
    ) -> Result<()>;
    /// Blits `src_rect` (`None` = whole surface) of `src` to `dst` on the window surface.
    fn blit_to_window(
        &self,
        src: &Self::Surface,
        src_rect: Option<NativeRect>,
        window: &Self::Window,
        dst: Point,
    ) -> Result<()>;
    fn update_window_surface(&self, window: &Self::Window) -> Result<()>;

    fn render_copy(
        &self,
        renderer: &Self::Renderer,
        texture: &Self::Texture,
        src: NativeRect,
        dst: NativeRect,
        op: DrawOp,
    ) -> Result<()>;
    fn render_present(&self, renderer: &Self::Renderer);

    // --- Events ---
    /// Reserves a user event type id.
    fn register_user_event(&self) -> Result<u32>;
    /// A thread-safe handle that pushes `event_type` events for `window_id`.
    fn waker(&self, event_type: u32, window_id: u32) -> Self::Waker;
    /// Blocks until the next native event is available.
    fn wait_event(&self) -> Result<NativeEvent>;
}
