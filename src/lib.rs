// src/lib.rs

//! `sdl-screen`: drives a portable 2-D screen abstraction (buffers, textures,
//! windows and a normalized event stream) on top of SDL2.
//!
//! Application code only sees the types re-exported here; the native library is
//! reached through an [`SdlAdapter`](native::SdlAdapter), which is either the live
//! SDL2 binding (feature `sdl`) or the in-memory [`MockSdlAdapter`](native::mock::MockSdlAdapter).

pub mod color;
pub mod config;
pub mod driver;
pub mod error;
pub mod event;
pub mod geom;
pub mod keys;
pub mod native;
pub mod screen;
pub mod translate;
pub mod waker;

pub use color::{Color, DrawOp};
pub use config::{Config, CONFIG};
pub use driver::run;
#[cfg(feature = "sdl")]
pub use driver::main;
pub use error::ScreenError;
pub use event::{
    CustomEvent, Direction, Event, KeyEvent, LifecycleEvent, LifecycleStage, MouseEvent,
    PaintEvent,
};
pub use geom::{Point, Rectangle};
pub use keys::{KeyCode, Modifiers, MouseButton};
pub use screen::{
    Affine, Buffer, DrawOptions, NewWindowOptions, PublishResult, RgbaImage, RgbaImageMut, Screen,
    Texture, Window,
};
pub use waker::{EventLoopWaker, EventSender};
