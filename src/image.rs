/*
 * // Copyright (c) Radzivon Bartoshyk. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
use crate::{BlurError, MismatchedSize};

/// One RGB raster element.
///
/// Channels are stored as `u8`, convolution accumulates them as `f32`.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Pixel {
        Pixel { r, g, b }
    }
}

#[derive(Debug)]
pub enum BufferStore<'a> {
    Borrowed(&'a mut [Pixel]),
    Owned(Vec<Pixel>),
}

impl BufferStore<'_> {
    #[allow(clippy::should_implement_trait)]
    pub fn borrow(&self) -> &[Pixel] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn borrow_mut(&mut self) -> &mut [Pixel] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub(crate) fn resize(&mut self, new_size: usize) {
        match self {
            Self::Borrowed(_) => {}
            Self::Owned(vec) => vec.resize(new_size, Pixel::default()),
        }
    }
}

/// Immutable image store.
///
/// Pixels are laid out row-major, the pixel at `(row, col)` lives at flat
/// index `row * width + col`.
pub struct BlurImage<'a> {
    pub data: std::borrow::Cow<'a, [Pixel]>,
    pub width: u32,
    pub height: u32,
}

/// Mutable image store.
///
/// If it owns its vector it does auto resizing on operations working
/// out-of-place, so [BlurImageMut::default] is a valid empty destination.
pub struct BlurImageMut<'a> {
    pub data: BufferStore<'a>,
    pub width: u32,
    pub height: u32,
}

impl Default for BlurImageMut<'_> {
    fn default() -> Self {
        BlurImageMut {
            data: BufferStore::Owned(Vec::new()),
            width: 0,
            height: 0,
        }
    }
}

impl<'a> BlurImage<'a> {
    /// Allocates a zeroed image of the given dimensions.
    pub fn alloc(width: u32, height: u32) -> Self {
        Self {
            data: std::borrow::Cow::Owned(vec![
                Pixel::default();
                width as usize * height as usize
            ]),
            width,
            height,
        }
    }

    /// Borrows existing pixel data.
    pub fn borrow(arr: &'a [Pixel], width: u32, height: u32) -> Self {
        Self {
            data: std::borrow::Cow::Borrowed(arr),
            width,
            height,
        }
    }

    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks that the buffer holds at least `width * height` pixels.
    ///
    /// A zero-sized image is well formed, blurring it yields an empty result.
    #[inline]
    pub fn check_layout(&self) -> Result<(), BlurError> {
        if self.data.len() < self.num_pixels() {
            return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: self.num_pixels(),
                received: self.data.len(),
            }));
        }
        Ok(())
    }

    /// Checks if it is matches the size of the other image
    #[inline]
    pub fn size_matches_mut(&self, other: &BlurImageMut<'_>) -> Result<(), BlurError> {
        if self.width == other.width && self.height == other.height {
            return Ok(());
        }
        Err(BlurError::ImagesMustMatch)
    }
}

impl<'a> BlurImageMut<'a> {
    /// Allocates a zeroed image of the given dimensions.
    pub fn alloc(width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Owned(vec![
                Pixel::default();
                width as usize * height as usize
            ]),
            width,
            height,
        }
    }

    /// Mutable borrows existing pixel data.
    pub fn borrow(arr: &'a mut [Pixel], width: u32, height: u32) -> Self {
        Self {
            data: BufferStore::Borrowed(arr),
            width,
            height,
        }
    }

    #[inline]
    pub fn num_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks if layout matches necessary requirements.
    ///
    /// An owned buffer is resized to match `other`, a borrowed buffer must
    /// already match its dimensions and carry enough pixels.
    #[inline]
    pub fn check_layout(&mut self, other: Option<&BlurImage<'_>>) -> Result<(), BlurError> {
        if let Some(other) = other {
            if matches!(self.data, BufferStore::Owned(_)) {
                self.resize(other.width, other.height);
                return Ok(());
            }
            if self.width != other.width || self.height != other.height {
                return Err(BlurError::ImagesMustMatch);
            }
        }
        let data_len = self.data.borrow().len();
        if data_len < self.num_pixels() {
            return Err(BlurError::MinimumSliceSizeMismatch(MismatchedSize {
                expected: self.num_pixels(),
                received: data_len,
            }));
        }
        Ok(())
    }

    #[inline]
    pub fn to_immutable_ref(&self) -> BlurImage<'_> {
        BlurImage {
            data: std::borrow::Cow::Borrowed(self.data.borrow()),
            width: self.width,
            height: self.height,
        }
    }

    #[inline]
    #[allow(clippy::should_implement_trait)]
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.resize(width as usize * height as usize);
    }
}
