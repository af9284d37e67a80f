// Copyright (c) Radzivon Bartoshyk. All rights reserved.
//
// Redistribution and use in source and binary forms, with or without modification,
// are permitted provided that the following conditions are met:
//
// 1.  Redistributions of source code must retain the above copyright notice, this
// list of conditions and the following disclaimer.
//
// 2.  Redistributions in binary form must reproduce the above copyright notice,
// this list of conditions and the following disclaimer in the documentation
// and/or other materials provided with the distribution.
//
// 3.  Neither the name of the copyright holder nor the names of its
// contributors may be used to endorse or promote products derived from
// this software without specific prior written permission.
//
// THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
// AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
// IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
// DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
// FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
// DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
// SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
// CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
// OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
// OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.

use crate::image::{BlurImage, Pixel};
use crate::kernel::ConvolutionKernel;
use crate::partition::Portion;
use crate::unsafe_slice::UnsafeSlice;
use num_traits::AsPrimitive;

/// Convolves every pixel inside the portion rectangle, reading only the
/// source image and the kernel, writing only the portion's own rows of `dst`.
///
/// SAFETY of the unchecked writes: portions coming from
/// [crate::split_into_portions] are pairwise disjoint and in range, no other
/// worker touches this rectangle.
pub(crate) fn blur_portion(
    src: &BlurImage,
    dst: &UnsafeSlice<Pixel>,
    kernel: &ConvolutionKernel,
    portion: &Portion,
) {
    let width = src.width as usize;
    for row in portion.y..portion.y + portion.height {
        for col in portion.x..portion.x + portion.width {
            let blurred = blur_pixel(src, kernel, row, col);
            unsafe { dst.write(row * width + col, blurred) };
        }
    }
}

/// Weighted average of the valid spatial neighborhood of `(row, col)`.
///
/// The divisor is the sum of weights actually applied, so a window clipped by
/// the image border renormalizes instead of darkening the edge. The center
/// tap is always valid for an in-bounds target, the divisor can never be
/// zero.
fn blur_pixel(src: &BlurImage, kernel: &ConvolutionKernel, row: usize, col: usize) -> Pixel {
    let width = src.width as usize;
    let height = src.height as usize;
    let half = kernel.half() as isize;
    let pixels = src.data.as_ref();

    let mut r = 0f32;
    let mut g = 0f32;
    let mut b = 0f32;
    let mut weight_sum = 0f32;

    for tap_row in 0..kernel.size() {
        let row_offset = tap_row as isize - half;
        for tap_col in 0..kernel.size() {
            let col_offset = tap_col as isize - half;
            if !is_valid_neighbor(width, height, row, col, row_offset, col_offset) {
                continue;
            }
            let neighbor_row = (row as isize + row_offset) as usize;
            let neighbor_col = (col as isize + col_offset) as usize;
            let neighbor = pixels[neighbor_row * width + neighbor_col];
            let weight = kernel.weight(tap_row, tap_col);
            r += weight * AsPrimitive::<f32>::as_(neighbor.r);
            g += weight * AsPrimitive::<f32>::as_(neighbor.g);
            b += weight * AsPrimitive::<f32>::as_(neighbor.b);
            weight_sum += weight;
        }
    }

    Pixel {
        r: (r / weight_sum).as_(),
        g: (g / weight_sum).as_(),
        b: (b / weight_sum).as_(),
    }
}

/// Decides whether the kernel tap at `(row_offset, col_offset)` relative to
/// the target pixel lands on a real neighbor.
///
/// A tap whose column leaves the image must be dropped, not wrapped: the
/// buffer is row-major, so naive flat-index arithmetic near the left or right
/// border would silently read the far column of the adjacent row.
#[inline]
pub(crate) fn is_valid_neighbor(
    width: usize,
    height: usize,
    target_row: usize,
    target_col: usize,
    row_offset: isize,
    col_offset: isize,
) -> bool {
    let neighbor_row = target_row as isize + row_offset;
    let neighbor_col = target_col as isize + col_offset;
    neighbor_row >= 0
        && neighbor_row < height as isize
        && neighbor_col >= 0
        && neighbor_col < width as isize
}
