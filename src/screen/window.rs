// src/screen/window.rs

use super::{Affine, Buffer, DrawOptions, PublishResult, Texture};
use crate::color::{to_native_color, Color, DrawOp};
use crate::error::{Result, ScreenError};
use crate::event::{CustomEvent, Event, LifecycleStage};
use crate::geom::{Point, Rectangle};
use crate::native::{to_native_rect, NativeEvent, SdlAdapter};
use crate::translate::translate;
use crate::waker::{EventLoopWaker, EventSender, Payload};
use log::{debug, error, info, trace};
use std::any::Any;
use std::rc::Rc;
use std::sync::{mpsc, Arc};

/// The native window and renderer pair, shared by a [`Window`] and the
/// textures created on its renderer.
pub(crate) struct NativeWindow<A: SdlAdapter> {
    adapter: Rc<A>,
    window: A::Window,
    renderer: A::Renderer,
}

impl<A: SdlAdapter> NativeWindow<A> {
    pub(super) fn new(adapter: Rc<A>, window: A::Window, renderer: A::Renderer) -> Self {
        NativeWindow {
            adapter,
            window,
            renderer,
        }
    }

    pub(super) fn adapter(&self) -> &A {
        &self.adapter
    }

    pub(super) fn window(&self) -> &A::Window {
        &self.window
    }

    pub(super) fn renderer(&self) -> &A::Renderer {
        &self.renderer
    }
}

impl<A: SdlAdapter> Drop for NativeWindow<A> {
    fn drop(&mut self) {
        let id = self.adapter.window_id(&self.window);
        self.adapter.destroy_renderer(&mut self.renderer);
        self.adapter.destroy_window(&mut self.window);
        info!("Destroyed window {}", id);
    }
}

/// A native window with its renderer, and the source of the event stream.
pub struct Window<A: SdlAdapter> {
    native: Rc<NativeWindow<A>>,
    id: u32,
    stage: LifecycleStage,
    user_event: u32,
    rx: mpsc::Receiver<Payload>,
    sender: EventSender,
    /// A `copy` hit the renderer since the last publish.
    renderer_dirty: bool,
}

impl<A: SdlAdapter> Window<A> {
    pub(super) fn new(
        native: Rc<NativeWindow<A>>,
        id: u32,
        user_event: u32,
        tx: mpsc::Sender<Payload>,
        rx: mpsc::Receiver<Payload>,
        waker: Arc<dyn EventLoopWaker>,
    ) -> Self {
        Window {
            native,
            id,
            stage: LifecycleStage::default(),
            user_event,
            rx,
            sender: EventSender::new(tx, waker),
            renderer_dirty: false,
        }
    }

    fn adapter(&self) -> &A {
        self.native.adapter()
    }

    /// The native window id.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// The lifecycle stage as of the last event returned by `next_event`.
    pub fn stage(&self) -> LifecycleStage {
        self.stage
    }

    /// Blocks until the next portable event.
    ///
    /// Native records that translate to nothing (duplicate lifecycle changes,
    /// horizontal-only wheel motion, untranslated categories) are skipped.
    pub fn next_event(&mut self) -> Result<Event> {
        loop {
            let native = self.adapter().wait_event().map_err(|e| {
                error!("Waiting for events on window {} failed: {:#}", self.id, e);
                ScreenError::platform(e)
            })?;

            if let NativeEvent::User {
                event_type,
                window_id,
            } = native
            {
                if event_type != self.user_event || window_id != self.id {
                    trace!("Window {}: ignoring user event {:#x}", self.id, event_type);
                    continue;
                }
                match self.rx.try_recv() {
                    Ok(payload) => return Ok(Event::Custom(CustomEvent::new(payload))),
                    Err(_) => {
                        trace!("Window {}: wake-up with no queued payload", self.id);
                        continue;
                    }
                }
            }

            let Some(event) = translate(self.stage, &native) else {
                trace!("Window {}: {:?} produced no event", self.id, native);
                continue;
            };
            if let Event::Lifecycle(change) = &event {
                debug!(
                    "Window {}: lifecycle {:?} -> {:?}",
                    self.id, change.from, change.to
                );
                self.stage = change.to;
            } else {
                debug!("Window {}: {:?}", self.id, event);
            }
            return Ok(event);
        }
    }

    /// A handle other threads can use to inject events into this window.
    pub fn sender(&self) -> EventSender {
        self.sender.clone()
    }

    /// Injects `payload`; it comes back from `next_event` as `Event::Custom`.
    pub fn send<T: Any + Send>(&self, payload: T) -> Result<()> {
        self.sender.send(payload)
    }

    /// Blits `sr` of `src` onto the window surface with `sr.min` at `dp`.
    /// `Rectangle::ZERO` means the whole buffer; any other empty `sr` blits nothing.
    pub fn upload(&mut self, dp: Point, src: &Buffer<A>, sr: Rectangle) -> Result<()> {
        if is_degenerate(sr) {
            trace!("Window {}: upload of empty {:?} skipped", self.id, sr);
            return Ok(());
        }
        trace!("Window {}: upload {:?} to {:?}", self.id, sr, dp);
        let native = &self.native;
        native
            .adapter()
            .blit_to_window(src.surface(), to_native_rect(sr), native.window(), dp)
            .map_err(ScreenError::platform)
    }

    /// Fills `dr` of the window surface. `Rectangle::ZERO` means the whole
    /// surface; any other empty `dr` fills nothing.
    ///
    /// `Src` maps the color without alpha; `Over` maps it with alpha.
    pub fn fill(&mut self, dr: Rectangle, color: Color, op: DrawOp) -> Result<()> {
        if is_degenerate(dr) {
            trace!("Window {}: fill of empty {:?} skipped", self.id, dr);
            return Ok(());
        }
        trace!("Window {}: fill {:?} with {:?} ({:?})", self.id, dr, color, op);
        let native = &self.native;
        let adapter = native.adapter();
        let pixel = adapter
            .map_window_color(native.window(), to_native_color(color, op))
            .map_err(ScreenError::platform)?;
        adapter
            .fill_window_surface(native.window(), to_native_rect(dr), pixel)
            .map_err(ScreenError::platform)
    }

    /// Copies `sr` of `src` through the renderer to a rectangle of the same
    /// size anchored at `dp`. `Rectangle::ZERO` means the whole texture; any
    /// other empty `sr` copies nothing.
    pub fn copy(
        &mut self,
        dp: Point,
        src: &Texture<A>,
        sr: Rectangle,
        op: DrawOp,
        _opts: &DrawOptions,
    ) -> Result<()> {
        if !Rc::ptr_eq(src.owner(), &self.native) {
            return Err(ScreenError::Platform(
                "texture was created on another window's renderer".to_string(),
            ));
        }
        let sr = match sr {
            Rectangle::ZERO => src.bounds(),
            sr if sr.is_empty() => {
                trace!("Window {}: copy of empty {:?} skipped", self.id, sr);
                return Ok(());
            }
            sr => sr,
        };
        // A destination reaching past i32::MAX lies beyond any renderer target.
        if dp.x.checked_add(sr.dx()).is_none() || dp.y.checked_add(sr.dy()).is_none() {
            trace!("Window {}: copy to {:?} is off the target", self.id, dp);
            return Ok(());
        }
        let dst = Rectangle::with_origin(dp, sr.size());
        trace!("Window {}: copy {:?} to {:?} ({:?})", self.id, sr, dst, op);
        let native = &self.native;
        native
            .adapter()
            .render_copy(native.renderer(), src.native(), sr.into(), dst.into(), op)
            .map_err(ScreenError::platform)?;
        self.renderer_dirty = true;
        Ok(())
    }

    /// Affine texture drawing is not supported by this driver.
    pub fn draw(
        &mut self,
        _src2dst: Affine,
        _src: &Texture<A>,
        _sr: Rectangle,
        _op: DrawOp,
        _opts: &DrawOptions,
    ) -> Result<()> {
        Err(ScreenError::NotImplemented("Window::draw"))
    }

    /// Scaled texture drawing is not supported by this driver.
    pub fn scale(
        &mut self,
        _dr: Rectangle,
        _src: &Texture<A>,
        _sr: Rectangle,
        _op: DrawOp,
        _opts: &DrawOptions,
    ) -> Result<()> {
        Err(ScreenError::NotImplemented("Window::scale"))
    }

    /// Shows what has been drawn: the renderer if a `copy` happened since the
    /// last publish, the window surface otherwise.
    pub fn publish(&mut self) -> Result<PublishResult> {
        let native = &self.native;
        if self.renderer_dirty {
            trace!("Window {}: presenting renderer", self.id);
            native.adapter().render_present(native.renderer());
            self.renderer_dirty = false;
        } else {
            trace!("Window {}: updating window surface", self.id);
            native
                .adapter()
                .update_window_surface(native.window())
                .map_err(ScreenError::platform)?;
        }
        Ok(PublishResult::default())
    }

    /// Closes the window. Its renderer is destroyed first, once every texture
    /// created on it has been released too.
    pub fn release(self) {
        drop(self)
    }
}

/// Empty, but not the zero rectangle that stands for "everything".
fn is_degenerate(r: Rectangle) -> bool {
    r != Rectangle::ZERO && r.is_empty()
}

impl<A: SdlAdapter> std::fmt::Debug for Window<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("id", &self.id)
            .field("stage", &self.stage)
            .finish_non_exhaustive()
    }
}
