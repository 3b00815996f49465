// src/native/live.rs

//! `SdlAdapter` over the raw SDL2 C API (`sdl2::sys`).
//!
//! Handles wrap non-null SDL pointers. They are only valid on the thread that
//! called `init`. The screen types share the adapter through an `Rc`, so
//! neither they nor the handles they own can leave that thread.

use super::{NativeEvent, NativeRect, SdlAdapter, WindowEventId};
use crate::color::{DrawOp, NativeColor};
use crate::geom::Point;
use crate::waker::EventLoopWaker;
use anyhow::{anyhow, Result};
use libc::c_int;
use log::{debug, warn};
use sdl2::sys;
use std::cell::Cell;
use std::ffi::{c_void, CStr};
use std::mem;
use std::ptr::{self, NonNull};

/// Byte-order RGBA: R, G, B, A in memory regardless of host endianness.
#[cfg(target_endian = "little")]
const RGBA_BYTES: u32 = sys::SDL_PixelFormatEnum::SDL_PIXELFORMAT_ABGR8888 as u32;
#[cfg(target_endian = "big")]
const RGBA_BYTES: u32 = sys::SDL_PixelFormatEnum::SDL_PIXELFORMAT_RGBA8888 as u32;

/// Returns SDL's last-error diagnostic.
fn last_error() -> String {
    // SAFETY: SDL_GetError always returns a valid, NUL-terminated string.
    unsafe { CStr::from_ptr(sys::SDL_GetError()) }
        .to_string_lossy()
        .into_owned()
}

fn check(status: c_int, call: &str) -> Result<()> {
    if status < 0 {
        Err(anyhow!("{} failed: {}", call, last_error()))
    } else {
        Ok(())
    }
}

fn non_null<T>(raw: *mut T, call: &str) -> Result<NonNull<T>> {
    NonNull::new(raw).ok_or_else(|| anyhow!("{} failed: {}", call, last_error()))
}

fn sdl_rect(r: NativeRect) -> sys::SDL_Rect {
    sys::SDL_Rect {
        x: r.x,
        y: r.y,
        w: r.w,
        h: r.h,
    }
}

#[derive(Debug)]
pub struct SdlSurface(NonNull<sys::SDL_Surface>);

#[derive(Debug)]
pub struct SdlTexture {
    raw: NonNull<sys::SDL_Texture>,
    /// Start and length of the locked region while a lock is held.
    locked: Option<(NonNull<u8>, usize)>,
}

#[derive(Debug)]
pub struct SdlWindow(NonNull<sys::SDL_Window>);

#[derive(Debug)]
pub struct SdlRenderer(NonNull<sys::SDL_Renderer>);

/// Pushes a user event; `SDL_PushEvent` may be called from any thread.
#[derive(Debug, Clone)]
pub struct SdlWaker {
    event_type: u32,
    window_id: u32,
}

impl EventLoopWaker for SdlWaker {
    fn wake(&self) -> Result<()> {
        // SAFETY: SDL_Event is a plain C union; an all-zero value is valid and
        // only the user-event fields are read back. SDL copies the event.
        let status = unsafe {
            let mut event: sys::SDL_Event = mem::zeroed();
            event.user.type_ = self.event_type;
            event.user.windowID = self.window_id;
            sys::SDL_PushEvent(&mut event)
        };
        check(status, "SDL_PushEvent")
    }
}

/// A live implementation of `SdlAdapter` that calls actual SDL2 functions.
#[derive(Debug, Default)]
pub struct LiveSdlAdapter {
    /// False before `init` and after `quit`. Releasing handles once SDL has
    /// shut down would touch freed state, so release calls become no-ops.
    alive: Cell<bool>,
}

impl LiveSdlAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn window_surface(&self, window: &SdlWindow) -> Result<NonNull<sys::SDL_Surface>> {
        // SAFETY: `window` is a live SDL window; the surface belongs to it.
        non_null(
            unsafe { sys::SDL_GetWindowSurface(window.0.as_ptr()) },
            "SDL_GetWindowSurface",
        )
    }
}

fn decode(event: &sys::SDL_Event) -> NativeEvent {
    use sys::SDL_EventType as T;

    // SAFETY: `type_` is shared by every member of the union; each arm only
    // reads the member selected by it.
    unsafe {
        let ty = event.type_;
        match ty {
            t if t == T::SDL_QUIT as u32 => NativeEvent::Quit,
            t if t == T::SDL_WINDOWEVENT as u32 => NativeEvent::Window {
                window_id: event.window.windowID,
                event: WindowEventId::from_raw(event.window.event),
            },
            t if t == T::SDL_KEYDOWN as u32 || t == T::SDL_KEYUP as u32 => NativeEvent::Key {
                window_id: event.key.windowID,
                keycode: event.key.keysym.sym,
                modifiers: event.key.keysym.mod_,
                pressed: t == T::SDL_KEYDOWN as u32,
            },
            t if t == T::SDL_MOUSEMOTION as u32 => NativeEvent::MouseMotion {
                window_id: event.motion.windowID,
                x: event.motion.x,
                y: event.motion.y,
            },
            t if t == T::SDL_MOUSEBUTTONDOWN as u32 || t == T::SDL_MOUSEBUTTONUP as u32 => {
                NativeEvent::MouseButton {
                    window_id: event.button.windowID,
                    button: event.button.button,
                    x: event.button.x,
                    y: event.button.y,
                    pressed: t == T::SDL_MOUSEBUTTONDOWN as u32,
                }
            }
            t if t == T::SDL_MOUSEWHEEL as u32 => {
                let wheel = event.wheel;
                let flip = if wheel.direction
                    == sys::SDL_MouseWheelDirection::SDL_MOUSEWHEEL_FLIPPED as u32
                {
                    -1
                } else {
                    1
                };
                NativeEvent::MouseWheel {
                    window_id: wheel.windowID,
                    x: wheel.x * flip,
                    y: wheel.y * flip,
                }
            }
            t if t >= T::SDL_USEREVENT as u32 && t < T::SDL_LASTEVENT as u32 => NativeEvent::User {
                event_type: t,
                window_id: event.user.windowID,
            },
            t => NativeEvent::Other { event_type: t },
        }
    }
}

impl SdlAdapter for LiveSdlAdapter {
    type Surface = SdlSurface;
    type Texture = SdlTexture;
    type Window = SdlWindow;
    type Renderer = SdlRenderer;
    type Waker = SdlWaker;

    fn init(&self) -> Result<()> {
        // SAFETY: plain FFI call; paired with SDL_Quit in `quit`.
        let status = unsafe { sys::SDL_Init(sys::SDL_INIT_VIDEO | sys::SDL_INIT_EVENTS) };
        check(status, "SDL_Init")?;
        self.alive.set(true);
        debug!("SDL initialized");
        Ok(())
    }

    fn quit(&self) {
        if self.alive.replace(false) {
            // SAFETY: SDL was initialized by `init`.
            unsafe { sys::SDL_Quit() };
            debug!("SDL shut down");
        }
    }

    fn create_rgba_surface(&self, width: i32, height: i32) -> Result<SdlSurface> {
        // SAFETY: plain FFI call; a null result is turned into an error.
        let raw = unsafe { sys::SDL_CreateRGBSurfaceWithFormat(0, width, height, 32, RGBA_BYTES) };
        let surface = non_null(raw, "SDL_CreateRGBSurfaceWithFormat")?;
        // Blits copy rather than blend, like every other upload path.
        // SAFETY: `surface` was just created.
        let status = unsafe {
            sys::SDL_SetSurfaceBlendMode(surface.as_ptr(), sys::SDL_BlendMode::SDL_BLENDMODE_NONE)
        };
        if let Err(e) = check(status, "SDL_SetSurfaceBlendMode") {
            // SAFETY: `surface` is owned here and freed once.
            unsafe { sys::SDL_FreeSurface(surface.as_ptr()) };
            return Err(e);
        }
        Ok(SdlSurface(surface))
    }

    fn free_surface(&self, surface: &mut SdlSurface) {
        if self.alive.get() {
            // SAFETY: the surface is live and this is its only release.
            unsafe { sys::SDL_FreeSurface(surface.0.as_ptr()) };
        }
    }

    fn surface_pitch(&self, surface: &SdlSurface) -> usize {
        // SAFETY: reading a field of a live surface.
        unsafe { (*surface.0.as_ptr()).pitch as usize }
    }

    fn surface_pixels<'s>(&self, surface: &'s SdlSurface) -> &'s [u8] {
        // SAFETY: RGBA surfaces never need locking; `pixels` spans pitch * h
        // bytes and lives as long as the surface.
        unsafe {
            let s = &*surface.0.as_ptr();
            if s.pixels.is_null() {
                return &[];
            }
            std::slice::from_raw_parts(s.pixels as *const u8, s.pitch as usize * s.h as usize)
        }
    }

    fn surface_pixels_mut<'s>(&self, surface: &'s mut SdlSurface) -> &'s mut [u8] {
        // SAFETY: as for `surface_pixels`; the `&mut` borrow of the handle
        // makes this the only view.
        unsafe {
            let s = &*surface.0.as_ptr();
            if s.pixels.is_null() {
                return &mut [];
            }
            std::slice::from_raw_parts_mut(s.pixels as *mut u8, s.pitch as usize * s.h as usize)
        }
    }

    fn create_streaming_texture(
        &self,
        renderer: &SdlRenderer,
        width: i32,
        height: i32,
    ) -> Result<SdlTexture> {
        // SAFETY: `renderer` is live; a null result is turned into an error.
        let raw = unsafe {
            sys::SDL_CreateTexture(
                renderer.0.as_ptr(),
                RGBA_BYTES,
                sys::SDL_TextureAccess::SDL_TEXTUREACCESS_STREAMING as c_int,
                width,
                height,
            )
        };
        Ok(SdlTexture {
            raw: non_null(raw, "SDL_CreateTexture")?,
            locked: None,
        })
    }

    fn destroy_texture(&self, texture: &mut SdlTexture) {
        if self.alive.get() {
            // SAFETY: the texture is live and this is its only release. Its
            // renderer is kept alive by the owning screen handle.
            unsafe { sys::SDL_DestroyTexture(texture.raw.as_ptr()) };
        }
    }

    fn lock_texture(&self, texture: &mut SdlTexture, rect: NativeRect) -> Result<usize> {
        let r = sdl_rect(rect);
        let mut pixels: *mut c_void = ptr::null_mut();
        let mut pitch: c_int = 0;
        // SAFETY: all out-pointers are valid for the duration of the call.
        let status =
            unsafe { sys::SDL_LockTexture(texture.raw.as_ptr(), &r, &mut pixels, &mut pitch) };
        check(status, "SDL_LockTexture")?;
        let start = non_null(pixels as *mut u8, "SDL_LockTexture")?;
        let pitch = pitch as usize;
        let len = match rect.h {
            h if h > 0 => pitch * (h as usize - 1) + rect.w as usize * 4,
            _ => 0,
        };
        texture.locked = Some((start, len));
        Ok(pitch)
    }

    fn locked_pixels<'t>(&self, texture: &'t mut SdlTexture) -> &'t mut [u8] {
        match texture.locked {
            // SAFETY: SDL guarantees the locked region is writable for `len`
            // bytes until SDL_UnlockTexture.
            Some((start, len)) => unsafe { std::slice::from_raw_parts_mut(start.as_ptr(), len) },
            None => &mut [],
        }
    }

    fn unlock_texture(&self, texture: &mut SdlTexture) {
        if texture.locked.take().is_some() {
            // SAFETY: the texture is live and currently locked.
            unsafe { sys::SDL_UnlockTexture(texture.raw.as_ptr()) };
        }
    }

    fn create_window_and_renderer(
        &self,
        width: i32,
        height: i32,
        high_dpi: bool,
    ) -> Result<(SdlWindow, SdlRenderer)> {
        let flags = if high_dpi {
            sys::SDL_WindowFlags::SDL_WINDOW_ALLOW_HIGHDPI as u32
        } else {
            0
        };
        let mut window: *mut sys::SDL_Window = ptr::null_mut();
        let mut renderer: *mut sys::SDL_Renderer = ptr::null_mut();
        // SAFETY: both out-pointers are valid for the duration of the call.
        let status = unsafe {
            sys::SDL_CreateWindowAndRenderer(width, height, flags, &mut window, &mut renderer)
        };
        check(status, "SDL_CreateWindowAndRenderer")?;
        Ok((
            SdlWindow(non_null(window, "SDL_CreateWindowAndRenderer")?),
            SdlRenderer(non_null(renderer, "SDL_CreateWindowAndRenderer")?),
        ))
    }

    fn destroy_renderer(&self, renderer: &mut SdlRenderer) {
        if self.alive.get() {
            // SAFETY: the renderer is live and this is its only release.
            unsafe { sys::SDL_DestroyRenderer(renderer.0.as_ptr()) };
        }
    }

    fn destroy_window(&self, window: &mut SdlWindow) {
        if self.alive.get() {
            // SAFETY: the window is live and this is its only release.
            unsafe { sys::SDL_DestroyWindow(window.0.as_ptr()) };
        }
    }

    fn window_id(&self, window: &SdlWindow) -> u32 {
        // SAFETY: plain FFI call on a live window.
        unsafe { sys::SDL_GetWindowID(window.0.as_ptr()) }
    }

    fn map_window_color(&self, window: &SdlWindow, color: NativeColor) -> Result<u32> {
        let surface = self.window_surface(window)?;
        // SAFETY: the window surface and its format are live.
        let format = unsafe { (*surface.as_ptr()).format };
        // SAFETY: `format` belongs to a live surface.
        Ok(unsafe {
            match color {
                NativeColor::Rgb(r, g, b) => sys::SDL_MapRGB(format, r, g, b),
                NativeColor::Rgba(r, g, b, a) => sys::SDL_MapRGBA(format, r, g, b, a),
            }
        })
    }

    fn fill_window_surface(
        &self,
        window: &SdlWindow,
        rect: Option<NativeRect>,
        pixel: u32,
    ) -> Result<()> {
        let surface = self.window_surface(window)?;
        let r = rect.map(sdl_rect);
        let rp = r.as_ref().map_or(ptr::null(), |r| r as *const sys::SDL_Rect);
        // SAFETY: `surface` is live; `rp` is null or points at `r`.
        check(
            unsafe { sys::SDL_FillRect(surface.as_ptr(), rp, pixel) },
            "SDL_FillRect",
        )
    }

    fn blit_to_window(
        &self,
        src: &SdlSurface,
        src_rect: Option<NativeRect>,
        window: &SdlWindow,
        dst: Point,
    ) -> Result<()> {
        let surface = self.window_surface(window)?;
        let sr = src_rect.map(sdl_rect);
        let srp = sr.as_ref().map_or(ptr::null(), |r| r as *const sys::SDL_Rect);
        let mut dr = sys::SDL_Rect {
            x: dst.x,
            y: dst.y,
            w: 0,
            h: 0,
        };
        // SAFETY: both surfaces are live; rect pointers are null or local.
        check(
            unsafe { sys::SDL_UpperBlit(src.0.as_ptr(), srp, surface.as_ptr(), &mut dr) },
            "SDL_BlitSurface",
        )
    }

    fn update_window_surface(&self, window: &SdlWindow) -> Result<()> {
        // SAFETY: plain FFI call on a live window.
        check(
            unsafe { sys::SDL_UpdateWindowSurface(window.0.as_ptr()) },
            "SDL_UpdateWindowSurface",
        )
    }

    fn render_copy(
        &self,
        renderer: &SdlRenderer,
        texture: &SdlTexture,
        src: NativeRect,
        dst: NativeRect,
        op: DrawOp,
    ) -> Result<()> {
        let mode = match op {
            DrawOp::Src => sys::SDL_BlendMode::SDL_BLENDMODE_NONE,
            DrawOp::Over => sys::SDL_BlendMode::SDL_BLENDMODE_BLEND,
        };
        let (sr, dr) = (sdl_rect(src), sdl_rect(dst));
        // SAFETY: renderer and texture are live and the texture is unlocked.
        unsafe {
            check(
                sys::SDL_SetTextureBlendMode(texture.raw.as_ptr(), mode),
                "SDL_SetTextureBlendMode",
            )?;
            check(
                sys::SDL_RenderCopy(renderer.0.as_ptr(), texture.raw.as_ptr(), &sr, &dr),
                "SDL_RenderCopy",
            )
        }
    }

    fn render_present(&self, renderer: &SdlRenderer) {
        // SAFETY: plain FFI call on a live renderer.
        unsafe { sys::SDL_RenderPresent(renderer.0.as_ptr()) };
    }

    fn register_user_event(&self) -> Result<u32> {
        // SAFETY: plain FFI call.
        let id = unsafe { sys::SDL_RegisterEvents(1) };
        if id == u32::MAX {
            return Err(anyhow!("SDL_RegisterEvents failed: no user event ids left"));
        }
        Ok(id)
    }

    fn waker(&self, event_type: u32, window_id: u32) -> SdlWaker {
        SdlWaker {
            event_type,
            window_id,
        }
    }

    fn wait_event(&self) -> Result<NativeEvent> {
        // SAFETY: zeroed SDL_Event is valid; SDL fills it in on success.
        let mut event: sys::SDL_Event = unsafe { mem::zeroed() };
        // SAFETY: `event` is valid for writes for the duration of the call.
        if unsafe { sys::SDL_WaitEvent(&mut event) } == 0 {
            let err = last_error();
            warn!("SDL_WaitEvent failed: {}", err);
            return Err(anyhow!("SDL_WaitEvent failed: {}", err));
        }
        Ok(decode(&event))
    }
}
