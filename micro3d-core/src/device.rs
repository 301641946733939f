/// Pixel storage: the owning [`FrameBuffer`] and the per-draw [`Device`] view.
use crate::color::Color;
use crate::error::{Error, Result};

/// Owned pixel buffer, one packed color per pixel at index `x + y * width`.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Width over height, or 1.0 for an empty buffer.
    pub fn aspect(&self) -> f32 {
        if self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.pack());
    }

    /// Reallocate for new dimensions. Previous contents are discarded.
    pub fn resize(&mut self, width: usize, height: usize) {
        if width == self.width && height == self.height {
            return;
        }
        log::debug!(
            "frame buffer resized {}x{} -> {}x{}",
            self.width,
            self.height,
            width,
            height
        );
        self.width = width;
        self.height = height;
        self.pixels = vec![0; width * height];
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::unpack(self.pixels[x + y * self.width]))
        } else {
            None
        }
    }

    /// RGBA bytes, row by row, alpha forced opaque.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|&p| Color::unpack(p).to_rgba8())
            .collect()
    }

    /// Lend the pixels to the rasterizer for one draw call.
    pub fn device(&mut self) -> Device<'_> {
        Device {
            width: self.width,
            height: self.height,
            buffer: &mut self.pixels,
        }
    }
}

/// Mutable view of a pixel buffer for the duration of one draw call.
///
/// Every write goes through [`Device::pixel`], which drops coordinates
/// outside `[0, width) x [0, height)`.
pub struct Device<'a> {
    width: usize,
    height: usize,
    buffer: &'a mut [u32],
}

impl<'a> Device<'a> {
    /// Wrap a buffer owned elsewhere. Its length must be `width * height`.
    pub fn new(buffer: &'a mut [u32], width: usize, height: usize) -> Result<Self> {
        let expected = width * height;
        if buffer.len() != expected {
            return Err(Error::BufferSize {
                width,
                height,
                expected,
                actual: buffer.len(),
            });
        }
        Ok(Self {
            width,
            height,
            buffer,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bounds-checked write; out-of-range coordinates are ignored.
    #[inline]
    pub fn pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.buffer[x + y * self.width] = color.pack();
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color::unpack(self.buffer[x + y * self.width]))
        } else {
            None
        }
    }
}
