// src/screen/buffer.rs

use crate::geom::{Point, Rectangle};
use crate::native::SdlAdapter;
use log::trace;
use std::rc::Rc;

/// A CPU-resident RGBA pixel buffer backed by a native surface.
///
/// Pixels are stored in byte order R, G, B, A with a stride of `width * 4`.
pub struct Buffer<A: SdlAdapter> {
    adapter: Rc<A>,
    surface: A::Surface,
    size: Point,
}

impl<A: SdlAdapter> Buffer<A> {
    pub(super) fn new(adapter: Rc<A>, surface: A::Surface, size: Point) -> Self {
        Buffer {
            adapter,
            surface,
            size,
        }
    }

    pub(super) fn surface(&self) -> &A::Surface {
        &self.surface
    }

    pub fn size(&self) -> Point {
        self.size
    }

    pub fn bounds(&self) -> Rectangle {
        Rectangle::from_size(self.size)
    }

    /// A read-only view of the pixels. No copy is made.
    pub fn rgba(&self) -> RgbaImage<'_> {
        RgbaImage {
            pix: self.adapter.surface_pixels(&self.surface),
            stride: self.adapter.surface_pitch(&self.surface),
            rect: self.bounds(),
        }
    }

    /// A writable view of the pixels. No copy is made.
    pub fn rgba_mut(&mut self) -> RgbaImageMut<'_> {
        let stride = self.adapter.surface_pitch(&self.surface);
        let rect = self.bounds();
        RgbaImageMut {
            pix: self.adapter.surface_pixels_mut(&mut self.surface),
            stride,
            rect,
        }
    }

    /// Frees the native surface now rather than at end of scope.
    pub fn release(self) {
        drop(self)
    }
}

impl<A: SdlAdapter> Drop for Buffer<A> {
    fn drop(&mut self) {
        trace!("Freeing {}x{} buffer", self.size.x, self.size.y);
        self.adapter.free_surface(&mut self.surface);
    }
}

impl<A: SdlAdapter> std::fmt::Debug for Buffer<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Buffer").field("size", &self.size).finish()
    }
}

fn pixel_offset(stride: usize, rect: Rectangle, x: i32, y: i32) -> Option<usize> {
    let p = Point::new(x, y);
    rect.contains(p)
        .then(|| (p.y - rect.min.y) as usize * stride + (p.x - rect.min.x) as usize * 4)
}

/// Borrowed RGBA pixels laid out row by row, `stride` bytes apart.
#[derive(Debug, Clone, Copy)]
pub struct RgbaImage<'a> {
    pix: &'a [u8],
    stride: usize,
    rect: Rectangle,
}

impl<'a> RgbaImage<'a> {
    pub fn pix(&self) -> &'a [u8] {
        self.pix
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bounds(&self) -> Rectangle {
        self.rect
    }

    /// The bytes of row `y`, `bounds().dx() * 4` long.
    pub fn row(&self, y: i32) -> Option<&'a [u8]> {
        let start = pixel_offset(self.stride, self.rect, self.rect.min.x, y)?;
        self.pix.get(start..start + self.rect.dx() as usize * 4)
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let i = pixel_offset(self.stride, self.rect, x, y)?;
        let mut quad = [0; 4];
        quad.copy_from_slice(self.pix.get(i..i + 4)?);
        Some(quad)
    }
}

/// Mutable counterpart of [`RgbaImage`].
#[derive(Debug)]
pub struct RgbaImageMut<'a> {
    pix: &'a mut [u8],
    stride: usize,
    rect: Rectangle,
}

impl RgbaImageMut<'_> {
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn bounds(&self) -> Rectangle {
        self.rect
    }

    /// Writes one pixel. Returns false if `(x, y)` is out of bounds.
    pub fn set_pixel(&mut self, x: i32, y: i32, rgba: [u8; 4]) -> bool {
        match pixel_offset(self.stride, self.rect, x, y)
            .and_then(|i| self.pix.get_mut(i..i + 4))
        {
            Some(dst) => {
                dst.copy_from_slice(&rgba);
                true
            }
            None => false,
        }
    }
}
