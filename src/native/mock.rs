// src/native/mock.rs

//! In-memory `SdlAdapter` used by the tests.
//!
//! Surfaces, textures and window surfaces are plain byte vectors. Every call is
//! recorded, failures can be scripted per operation, and presented frames are
//! captured so tests can assert on the pixels a user would have seen.

use super::{NativeEvent, NativeRect, SdlAdapter, SDL_USEREVENT};
use crate::color::{DrawOp, NativeColor};
use crate::geom::{clip_copy, Point, Rectangle};
use crate::waker::EventLoopWaker;
use anyhow::{anyhow, bail, Result};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// How long `wait_event` blocks on an empty queue before reporting an error.
/// Keeps a test with a missing event from hanging forever.
const WAIT_TIMEOUT: Duration = Duration::from_secs(5);

/// Initial contents of window surfaces and render targets.
const OPAQUE_BLACK: [u8; 4] = [0, 0, 0, 255];

/// Operations whose next invocation can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOp {
    Init,
    CreateSurface,
    CreateTexture,
    LockTexture,
    CreateWindow,
    MapColor,
    FillWindow,
    Blit,
    UpdateWindowSurface,
    RenderCopy,
    RegisterUserEvent,
}

/// Records a call made to the adapter for later inspection in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Init,
    Quit,
    CreateSurface { width: i32, height: i32 },
    FreeSurface { id: u32 },
    CreateTexture { window_id: u32, width: i32, height: i32 },
    DestroyTexture { id: u32 },
    LockTexture { id: u32, rect: NativeRect },
    UnlockTexture { id: u32 },
    CreateWindow { width: i32, height: i32, high_dpi: bool },
    DestroyRenderer { window_id: u32 },
    DestroyWindow { window_id: u32 },
    FillWindow { window_id: u32, rect: Option<NativeRect>, pixel: u32 },
    Blit { window_id: u32, src_rect: Option<NativeRect>, dst: Point },
    UpdateWindowSurface { window_id: u32 },
    RenderCopy { window_id: u32, texture: u32, src: NativeRect, dst: NativeRect, op: DrawOp },
    RenderPresent { window_id: u32 },
    RegisterUserEvent { event_type: u32 },
}

#[derive(Debug)]
pub struct MockSurface {
    id: u32,
    width: i32,
    height: i32,
    pixels: Vec<u8>,
}

/// A streaming texture. Rows are padded to 16 bytes so callers that assume a
/// pitch of `width * 4` get caught.
#[derive(Debug)]
pub struct MockTexture {
    id: u32,
    width: i32,
    height: i32,
    pitch: usize,
    pixels: Vec<u8>,
    locked: Option<NativeRect>,
}

#[derive(Debug)]
pub struct MockWindow {
    id: u32,
}

#[derive(Debug)]
pub struct MockRenderer {
    window_id: u32,
}

#[derive(Debug)]
struct WindowState {
    width: i32,
    height: i32,
    /// The window surface, one RGBA quad per pixel.
    surface: Vec<[u8; 4]>,
    /// The renderer's back buffer.
    target: Vec<[u8; 4]>,
    presented: Option<Vec<[u8; 4]>>,
    renderer_alive: bool,
    window_alive: bool,
}

impl WindowState {
    fn bounds(&self) -> Rectangle {
        Rectangle::from_size(Point::new(self.width, self.height))
    }

    fn index(&self, p: Point) -> usize {
        (p.y * self.width + p.x) as usize
    }
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    failures: HashMap<MockOp, String>,
    next_id: u32,
    next_user_event: u32,
    windows: HashMap<u32, WindowState>,
    live_surfaces: usize,
    live_textures: usize,
    locked_textures: usize,
}

impl MockState {
    fn take_failure(&mut self, op: MockOp) -> Result<()> {
        match self.failures.remove(&op) {
            Some(msg) => Err(anyhow!(msg)),
            None => Ok(()),
        }
    }

    fn new_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn window(&mut self, id: u32) -> Result<&mut WindowState> {
        match self.windows.get_mut(&id) {
            Some(w) if w.window_alive => Ok(w),
            _ => Err(anyhow!("Invalid window")),
        }
    }
}

type EventQueue = Arc<(Mutex<VecDeque<NativeEvent>>, Condvar)>;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn push(queue: &EventQueue, event: NativeEvent) {
    let (events, ready) = &**queue;
    lock(events).push_back(event);
    ready.notify_one();
}

/// Mock implementation of the `SdlAdapter` trait for testing.
///
/// Clones share state, so a test can keep one handle for assertions while the
/// screen owns another.
#[derive(Debug, Clone, Default)]
pub struct MockSdlAdapter {
    state: Arc<Mutex<MockState>>,
    events: EventQueue,
}

impl MockSdlAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        lock(&self.state)
    }

    fn record(&self, call: MockCall) {
        self.state().calls.push(call);
    }

    /// Retrieves a copy of the recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state().calls.clear();
    }

    /// Makes the next call of `op` fail with `msg` as the native diagnostic.
    pub fn fail_next(&self, op: MockOp, msg: &str) {
        self.state().failures.insert(op, msg.to_string());
    }

    /// Appends a native event to the queue, waking a blocked `wait_event`.
    pub fn push_event(&self, event: NativeEvent) {
        push(&self.events, event);
    }

    pub fn pending_events(&self) -> usize {
        lock(&self.events.0).len()
    }

    /// The pixel at `(x, y)` of the last frame presented on `window_id`, as RGBA.
    pub fn presented_pixel(&self, window_id: u32, x: i32, y: i32) -> Option<[u8; 4]> {
        let state = self.state();
        let w = state.windows.get(&window_id)?;
        let p = Point::new(x, y);
        if !w.bounds().contains(p) {
            return None;
        }
        w.presented.as_ref().map(|frame| frame[w.index(p)])
    }

    /// The pixel at `(x, y)` of the window surface, whether presented or not.
    pub fn surface_pixel(&self, window_id: u32, x: i32, y: i32) -> Option<[u8; 4]> {
        let state = self.state();
        let w = state.windows.get(&window_id)?;
        let p = Point::new(x, y);
        w.bounds().contains(p).then(|| w.surface[w.index(p)])
    }

    pub fn window_ids(&self) -> Vec<u32> {
        let mut ids: Vec<u32> = self.state().windows.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Surfaces and textures created but not yet freed.
    pub fn live_resources(&self) -> (usize, usize) {
        let state = self.state();
        (state.live_surfaces, state.live_textures)
    }

    pub fn locked_textures(&self) -> usize {
        self.state().locked_textures
    }
}

/// Wakes a blocked `MockSdlAdapter::wait_event` by pushing a user event.
#[derive(Debug, Clone)]
pub struct MockWaker {
    events: EventQueue,
    event_type: u32,
    window_id: u32,
}

impl EventLoopWaker for MockWaker {
    fn wake(&self) -> Result<()> {
        push(
            &self.events,
            NativeEvent::User {
                event_type: self.event_type,
                window_id: self.window_id,
            },
        );
        Ok(())
    }
}

fn unpack_argb(pixel: u32) -> [u8; 4] {
    let [a, r, g, b] = pixel.to_be_bytes();
    [r, g, b, a]
}

fn blend_over(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let a = src[3] as u32;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a)) / 255) as u8;
    [
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        (a + dst[3] as u32 * (255 - a) / 255) as u8,
    ]
}

impl SdlAdapter for MockSdlAdapter {
    type Surface = MockSurface;
    type Texture = MockTexture;
    type Window = MockWindow;
    type Renderer = MockRenderer;
    type Waker = MockWaker;

    fn init(&self) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::Init);
        state.take_failure(MockOp::Init)
    }

    fn quit(&self) {
        self.record(MockCall::Quit);
    }

    fn create_rgba_surface(&self, width: i32, height: i32) -> Result<MockSurface> {
        let mut state = self.state();
        state.calls.push(MockCall::CreateSurface { width, height });
        state.take_failure(MockOp::CreateSurface)?;
        if width < 0 || height < 0 {
            bail!("Parameter 'width' is invalid");
        }
        state.live_surfaces += 1;
        Ok(MockSurface {
            id: state.new_id(),
            width,
            height,
            pixels: vec![0; (width * height * 4) as usize],
        })
    }

    fn free_surface(&self, surface: &mut MockSurface) {
        let mut state = self.state();
        state.calls.push(MockCall::FreeSurface { id: surface.id });
        state.live_surfaces -= 1;
    }

    fn surface_pitch(&self, surface: &MockSurface) -> usize {
        surface.width as usize * 4
    }

    fn surface_pixels<'s>(&self, surface: &'s MockSurface) -> &'s [u8] {
        &surface.pixels
    }

    fn surface_pixels_mut<'s>(&self, surface: &'s mut MockSurface) -> &'s mut [u8] {
        &mut surface.pixels
    }

    fn create_streaming_texture(
        &self,
        renderer: &MockRenderer,
        width: i32,
        height: i32,
    ) -> Result<MockTexture> {
        let mut state = self.state();
        state.calls.push(MockCall::CreateTexture {
            window_id: renderer.window_id,
            width,
            height,
        });
        state.take_failure(MockOp::CreateTexture)?;
        if width <= 0 || height <= 0 {
            bail!("Texture dimensions are limited to 1x1 and larger");
        }
        match state.windows.get(&renderer.window_id) {
            Some(w) if w.renderer_alive => {}
            _ => bail!("Invalid renderer"),
        }
        let pitch = (width as usize * 4 + 15) & !15;
        state.live_textures += 1;
        Ok(MockTexture {
            id: state.new_id(),
            width,
            height,
            pitch,
            pixels: vec![0; pitch * height as usize],
            locked: None,
        })
    }

    fn destroy_texture(&self, texture: &mut MockTexture) {
        let mut state = self.state();
        state.calls.push(MockCall::DestroyTexture { id: texture.id });
        state.live_textures -= 1;
        if texture.locked.take().is_some() {
            state.locked_textures -= 1;
        }
    }

    fn lock_texture(&self, texture: &mut MockTexture, rect: NativeRect) -> Result<usize> {
        let mut state = self.state();
        state.calls.push(MockCall::LockTexture {
            id: texture.id,
            rect,
        });
        state.take_failure(MockOp::LockTexture)?;
        if texture.locked.is_some() {
            bail!("SDL_LockTexture(): texture is already locked");
        }
        let bounds = Rectangle::from_size(Point::new(texture.width, texture.height));
        if !rect.to_rectangle().is_inside(&bounds) {
            bail!("Parameter 'rect' is invalid");
        }
        texture.locked = Some(rect);
        state.locked_textures += 1;
        Ok(texture.pitch)
    }

    fn locked_pixels<'t>(&self, texture: &'t mut MockTexture) -> &'t mut [u8] {
        match texture.locked {
            Some(rect) => {
                let offset = rect.y as usize * texture.pitch + rect.x as usize * 4;
                &mut texture.pixels[offset..]
            }
            None => &mut [],
        }
    }

    fn unlock_texture(&self, texture: &mut MockTexture) {
        let mut state = self.state();
        state.calls.push(MockCall::UnlockTexture { id: texture.id });
        if texture.locked.take().is_some() {
            state.locked_textures -= 1;
        }
    }

    fn create_window_and_renderer(
        &self,
        width: i32,
        height: i32,
        high_dpi: bool,
    ) -> Result<(MockWindow, MockRenderer)> {
        let mut state = self.state();
        state.calls.push(MockCall::CreateWindow {
            width,
            height,
            high_dpi,
        });
        state.take_failure(MockOp::CreateWindow)?;
        if width <= 0 || height <= 0 {
            bail!("Window size must be positive");
        }
        let id = state.new_id();
        let len = (width * height) as usize;
        state.windows.insert(
            id,
            WindowState {
                width,
                height,
                surface: vec![OPAQUE_BLACK; len],
                target: vec![OPAQUE_BLACK; len],
                presented: None,
                renderer_alive: true,
                window_alive: true,
            },
        );
        Ok((MockWindow { id }, MockRenderer { window_id: id }))
    }

    fn destroy_renderer(&self, renderer: &mut MockRenderer) {
        let mut state = self.state();
        state.calls.push(MockCall::DestroyRenderer {
            window_id: renderer.window_id,
        });
        if let Some(w) = state.windows.get_mut(&renderer.window_id) {
            w.renderer_alive = false;
        }
    }

    fn destroy_window(&self, window: &mut MockWindow) {
        let mut state = self.state();
        state.calls.push(MockCall::DestroyWindow {
            window_id: window.id,
        });
        if let Some(w) = state.windows.get_mut(&window.id) {
            w.window_alive = false;
        }
    }

    fn window_id(&self, window: &MockWindow) -> u32 {
        window.id
    }

    fn map_window_color(&self, window: &MockWindow, color: NativeColor) -> Result<u32> {
        let mut state = self.state();
        state.take_failure(MockOp::MapColor)?;
        state.window(window.id)?;
        let (r, g, b, a) = match color {
            NativeColor::Rgb(r, g, b) => (r, g, b, 0xFF),
            NativeColor::Rgba(r, g, b, a) => (r, g, b, a),
        };
        Ok(u32::from_be_bytes([a, r, g, b]))
    }

    fn fill_window_surface(
        &self,
        window: &MockWindow,
        rect: Option<NativeRect>,
        pixel: u32,
    ) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::FillWindow {
            window_id: window.id,
            rect,
            pixel,
        });
        state.take_failure(MockOp::FillWindow)?;
        let w = state.window(window.id)?;
        let r = rect
            .map(NativeRect::to_rectangle)
            .unwrap_or_else(|| w.bounds())
            .intersect(&w.bounds());
        let quad = unpack_argb(pixel);
        for y in r.min.y..r.max.y {
            for x in r.min.x..r.max.x {
                let i = w.index(Point::new(x, y));
                w.surface[i] = quad;
            }
        }
        Ok(())
    }

    fn blit_to_window(
        &self,
        src: &MockSurface,
        src_rect: Option<NativeRect>,
        window: &MockWindow,
        dst: Point,
    ) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::Blit {
            window_id: window.id,
            src_rect,
            dst,
        });
        state.take_failure(MockOp::Blit)?;
        let w = state.window(window.id)?;
        let src_bounds = Rectangle::from_size(Point::new(src.width, src.height));
        let sr = src_rect.map(NativeRect::to_rectangle).unwrap_or(src_bounds);
        let (dr, sp) = clip_copy(dst, sr, src_bounds, w.bounds());
        for y in 0..dr.dy() {
            for x in 0..dr.dx() {
                let s = (((sp.y + y) * src.width + sp.x + x) * 4) as usize;
                let i = w.index(Point::new(dr.min.x + x, dr.min.y + y));
                w.surface[i].copy_from_slice(&src.pixels[s..s + 4]);
            }
        }
        Ok(())
    }

    fn update_window_surface(&self, window: &MockWindow) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::UpdateWindowSurface {
            window_id: window.id,
        });
        state.take_failure(MockOp::UpdateWindowSurface)?;
        let w = state.window(window.id)?;
        w.presented = Some(w.surface.clone());
        Ok(())
    }

    fn render_copy(
        &self,
        renderer: &MockRenderer,
        texture: &MockTexture,
        src: NativeRect,
        dst: NativeRect,
        op: DrawOp,
    ) -> Result<()> {
        let mut state = self.state();
        state.calls.push(MockCall::RenderCopy {
            window_id: renderer.window_id,
            texture: texture.id,
            src,
            dst,
            op,
        });
        state.take_failure(MockOp::RenderCopy)?;
        if texture.locked.is_some() {
            bail!("Texture is locked");
        }
        if (src.w, src.h) != (dst.w, dst.h) {
            bail!("mock renderer does not scale");
        }
        let w = match state.windows.get_mut(&renderer.window_id) {
            Some(w) if w.renderer_alive => w,
            _ => bail!("Invalid renderer"),
        };
        let tex_bounds = Rectangle::from_size(Point::new(texture.width, texture.height));
        let (dr, sp) = clip_copy(
            Point::new(dst.x, dst.y),
            src.to_rectangle(),
            tex_bounds,
            w.bounds(),
        );
        for y in 0..dr.dy() {
            for x in 0..dr.dx() {
                let s = (sp.y + y) as usize * texture.pitch + (sp.x + x) as usize * 4;
                let mut quad = [0u8; 4];
                quad.copy_from_slice(&texture.pixels[s..s + 4]);
                let i = w.index(Point::new(dr.min.x + x, dr.min.y + y));
                w.target[i] = match op {
                    DrawOp::Src => quad,
                    DrawOp::Over => blend_over(quad, w.target[i]),
                };
            }
        }
        Ok(())
    }

    fn render_present(&self, renderer: &MockRenderer) {
        let mut state = self.state();
        state.calls.push(MockCall::RenderPresent {
            window_id: renderer.window_id,
        });
        if let Some(w) = state.windows.get_mut(&renderer.window_id) {
            if w.renderer_alive {
                w.presented = Some(w.target.clone());
            }
        }
    }

    fn register_user_event(&self) -> Result<u32> {
        let mut state = self.state();
        state.take_failure(MockOp::RegisterUserEvent)?;
        let event_type = SDL_USEREVENT + state.next_user_event;
        state.next_user_event += 1;
        state.calls.push(MockCall::RegisterUserEvent { event_type });
        Ok(event_type)
    }

    fn waker(&self, event_type: u32, window_id: u32) -> MockWaker {
        MockWaker {
            events: Arc::clone(&self.events),
            event_type,
            window_id,
        }
    }

    fn wait_event(&self) -> Result<NativeEvent> {
        let (events, ready) = &*self.events;
        let guard = lock(events);
        let (mut queue, _) = ready
            .wait_timeout_while(guard, WAIT_TIMEOUT, |q| q.is_empty())
            .unwrap_or_else(PoisonError::into_inner);
        queue
            .pop_front()
            .ok_or_else(|| anyhow!("mock event queue stayed empty for {:?}", WAIT_TIMEOUT))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_should_pad_texture_rows() -> Result<()> {
        let adapter = MockSdlAdapter::new();
        let (_w, r) = adapter.create_window_and_renderer(8, 8, false)?;
        let t = adapter.create_streaming_texture(&r, 3, 2)?;
        assert_eq!(t.pitch, 16);
        assert_eq!(t.pixels.len(), 32);
        Ok(())
    }

    #[test]
    fn it_should_reject_double_locks() -> Result<()> {
        let adapter = MockSdlAdapter::new();
        let (_w, r) = adapter.create_window_and_renderer(8, 8, false)?;
        let mut t = adapter.create_streaming_texture(&r, 4, 4)?;
        let rect = NativeRect { x: 0, y: 0, w: 4, h: 4 };
        adapter.lock_texture(&mut t, rect)?;
        assert!(adapter.lock_texture(&mut t, rect).is_err());
        adapter.unlock_texture(&mut t);
        assert_eq!(adapter.locked_textures(), 0);
        Ok(())
    }

    #[test]
    fn it_should_consume_scripted_failures_once() {
        let adapter = MockSdlAdapter::new();
        adapter.fail_next(MockOp::CreateWindow, "No available video device");
        let err = adapter.create_window_and_renderer(8, 8, false).unwrap_err();
        assert_eq!(err.to_string(), "No available video device");
        assert!(adapter.create_window_and_renderer(8, 8, false).is_ok());
    }

    #[test]
    fn it_should_deliver_waker_events_across_threads() -> Result<()> {
        let adapter = MockSdlAdapter::new();
        let waker = adapter.waker(SDL_USEREVENT, 7);
        let handle = std::thread::spawn(move || waker.wake());
        let event = adapter.wait_event()?;
        handle.join().expect("waker thread panicked")?;
        assert_eq!(
            event,
            NativeEvent::User {
                event_type: SDL_USEREVENT,
                window_id: 7
            }
        );
        Ok(())
    }

    #[test]
    fn it_should_blend_over_by_source_alpha() {
        assert_eq!(blend_over([255, 0, 0, 255], [0, 0, 255, 255]), [255, 0, 0, 255]);
        assert_eq!(blend_over([255, 0, 0, 0], [0, 0, 255, 255]), [0, 0, 255, 255]);
    }
}
