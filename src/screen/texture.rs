// src/screen/texture.rs

use super::window::NativeWindow;
use super::Buffer;
use crate::color::{Color, DrawOp};
use crate::error::{Result, ScreenError};
use crate::geom::{clip_copy, Point, Rectangle};
use crate::native::SdlAdapter;
use log::{error, trace};
use std::rc::Rc;

/// A GPU-resident streaming texture in byte-order RGBA.
///
/// The texture keeps the renderer that created it alive, so the renderer is
/// only destroyed once the window and all of its textures are gone.
pub struct Texture<A: SdlAdapter> {
    owner: Rc<NativeWindow<A>>,
    texture: A::Texture,
    size: Point,
}

/// A write lock on a region of a texture. Unlocks on drop, so every early
/// return leaves the texture usable for copies.
struct TextureLock<'t, A: SdlAdapter> {
    adapter: &'t A,
    texture: &'t mut A::Texture,
    pitch: usize,
    row_len: usize,
}

impl<'t, A: SdlAdapter> TextureLock<'t, A> {
    /// Locks `rect`, which must be non-empty and inside the texture.
    fn acquire(adapter: &'t A, texture: &'t mut A::Texture, rect: Rectangle) -> Result<Self> {
        let pitch = adapter.lock_texture(texture, rect.into()).map_err(|e| {
            error!("Failed to lock texture region {:?}: {:#}", rect, e);
            ScreenError::platform(e)
        })?;
        let mut lock = TextureLock {
            adapter,
            texture,
            pitch,
            row_len: rect.dx() as usize * 4,
        };
        let needed = pitch * (rect.dy() as usize - 1) + lock.row_len;
        if pitch < lock.row_len || lock.pixels().len() < needed {
            return Err(ScreenError::Platform(format!(
                "locked texture region too small: pitch {}, {} bytes for {:?}",
                pitch,
                lock.pixels().len(),
                rect
            )));
        }
        Ok(lock)
    }

    fn pixels(&mut self) -> &mut [u8] {
        self.adapter.locked_pixels(self.texture)
    }

    /// Row `y` of the locked region, relative to its top.
    fn row(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.pitch;
        let len = self.row_len;
        &mut self.pixels()[start..start + len]
    }
}

impl<A: SdlAdapter> Drop for TextureLock<'_, A> {
    fn drop(&mut self) {
        self.adapter.unlock_texture(self.texture);
    }
}

impl<A: SdlAdapter> Texture<A> {
    pub(super) fn new(owner: Rc<NativeWindow<A>>, texture: A::Texture, size: Point) -> Self {
        Texture {
            owner,
            texture,
            size,
        }
    }

    pub(super) fn owner(&self) -> &Rc<NativeWindow<A>> {
        &self.owner
    }

    pub(super) fn native(&self) -> &A::Texture {
        &self.texture
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.size)
    }

    /// Copies `sr` of `src` so that `sr.min` lands on `dp`.
    ///
    /// Rows and columns that fall outside the source or the texture are dropped.
    pub fn upload(&mut self, dp: Point, src: &Buffer<A>, sr: Rectangle) -> Result<()> {
        let (dr, sp) = clip_copy(dp, sr, src.bounds(), self.bounds());
        if dr.is_empty() {
            trace!("Texture upload of {:?} to {:?} clipped away", sr, dp);
            return Ok(());
        }
        trace!("Texture upload {:?} from {:?}", dr, sp);

        let img = src.rgba();
        let stride = img.stride();
        let pix = img.pix();
        let row_len = dr.dx() as usize * 4;
        let mut lock = TextureLock::acquire(self.owner.adapter(), &mut self.texture, dr)?;
        for y in 0..dr.dy() as usize {
            let start = (sp.y as usize + y) * stride + sp.x as usize * 4;
            lock.row(y).copy_from_slice(&pix[start..start + row_len]);
        }
        Ok(())
    }

    /// Sets every pixel of `dr` inside the texture to `color`.
    ///
    /// The bytes written do not depend on `op`: a streaming lock hands out
    /// write-only memory, so there is nothing to blend against.
    pub fn fill(&mut self, dr: Rectangle, color: Color, op: DrawOp) -> Result<()> {
        let dr = dr.intersect(&self.bounds());
        if dr.is_empty() {
            return Ok(());
        }
        trace!("Texture fill {:?} with {:?} ({:?})", dr, color, op);

        let quad = color.to_rgba8();
        let mut lock = TextureLock::acquire(self.owner.adapter(), &mut self.texture, dr)?;
        for y in 0..dr.dy() as usize {
            for px in lock.row(y).chunks_exact_mut(4) {
                px.copy_from_slice(&quad);
            }
        }
        Ok(())
    }

    /// Reads back the part of `r` inside the texture, tightly packed (stride
    /// `width * 4`). Returns the rectangle actually read with its bytes.
    pub fn read_pixels(&mut self, r: Rectangle) -> Result<(Rectangle, Vec<u8>)> {
        let r = r.intersect(&self.bounds());
        if r.is_empty() {
            return Ok((r, Vec::new()));
        }
        let mut out = Vec::with_capacity(r.dx() as usize * r.dy() as usize * 4);
        let mut lock = TextureLock::acquire(self.owner.adapter(), &mut self.texture, r)?;
        for y in 0..r.dy() as usize {
            out.extend_from_slice(lock.row(y));
        }
        Ok((r, out))
    }

    /// Destroys the native texture now rather than at end of scope.
    pub fn release(self) {
        drop(self)
    }
}

impl<A: SdlAdapter> Drop for Texture<A> {
    fn drop(&mut self) {
        trace!("Destroying {}x{} texture", self.size.x, self.size.y);
        self.owner.adapter().destroy_texture(&mut self.texture);
    }
}

impl<A: SdlAdapter> std::fmt::Debug for Texture<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture").field("size", &self.size).finish()
    }
}
