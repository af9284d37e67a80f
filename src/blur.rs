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

use crate::convolve::blur_portion;
use crate::image::{BlurImage, BlurImageMut};
use crate::kernel::ConvolutionKernel;
use crate::partition::split_into_portions;
use crate::unsafe_slice::UnsafeSlice;
use crate::BlurError;

/// Worker cap used by [WorkerBudget::Default].
pub const DEFAULT_WORKER_BUDGET: usize = 16;

/// Caps how many parallel workers a blur may spawn.
///
/// The cap is independent of the image size, larger images get coarser
/// portions rather than more workers.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Default, Hash)]
pub enum WorkerBudget {
    /// Use up to [DEFAULT_WORKER_BUDGET] workers.
    #[default]
    Default,
    /// Use up to the given number of workers. A budget of zero is rejected
    /// with [BlurError::ZeroWorkerBudget].
    Fixed(usize),
}

impl WorkerBudget {
    /// Returns the worker cap for this budget.
    #[inline]
    pub fn limit(&self) -> usize {
        match self {
            WorkerBudget::Default => DEFAULT_WORKER_BUDGET,
            WorkerBudget::Fixed(limit) => *limit,
        }
    }
}

/// Convolves the whole source image against the kernel into `dst`.
///
/// The image is tiled into disjoint rectangular portions, one worker blurs
/// each portion, and the call returns only after every worker has finished,
/// no partial result is ever observable. Workers share the immutable source
/// and kernel and write to statically partitioned ranges of the destination,
/// so no synchronization is needed beyond the final join.
///
/// An owned destination is resized to the source dimensions, a borrowed one
/// must already match them. Whatever the destination held before the call is
/// fully overwritten.
///
/// A zero-sized source produces an empty destination and is not an error.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image.
/// * `kernel`: Convolution kernel, see [ConvolutionKernel] for more info.
/// * `worker_budget`: Worker cap, see [WorkerBudget] for more info.
pub fn tile_blur(
    src: &BlurImage,
    dst: &mut BlurImageMut,
    kernel: &ConvolutionKernel,
    worker_budget: WorkerBudget,
) -> Result<(), BlurError> {
    src.check_layout()?;
    dst.check_layout(Some(src))?;
    if src.width == 0 || src.height == 0 {
        return Ok(());
    }
    let budget = worker_budget.limit();
    if budget == 0 {
        return Err(BlurError::ZeroWorkerBudget);
    }

    let portions = split_into_portions(src.width as usize, src.height as usize, budget);
    if let [portion] = portions.as_slice() {
        let slice = UnsafeSlice::new(dst.data.borrow_mut());
        blur_portion(src, &slice, kernel, portion);
        return Ok(());
    }

    // degenerate dimensions can tile into more portions than the budget,
    // the pool still caps concurrent workers at the budget
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(portions.len().min(budget))
        .build()
        .map_err(|_| BlurError::ThreadPoolBuildFailed)?;
    pool.scope(|scope| {
        let slice = UnsafeSlice::new(dst.data.borrow_mut());
        for &portion in portions.iter() {
            scope.spawn(move |_| {
                blur_portion(src, &slice, kernel, &portion);
            });
        }
    });
    Ok(())
}

/// Performs gaussian blur on the image.
///
/// Builds a normalized 2D gaussian kernel and convolves the image against it
/// with [tile_blur]. Windows clipped by the border renormalize over the
/// weights actually applied, edges neither darken nor lighten.
///
/// # Arguments
///
/// * `src`: Source image.
/// * `dst`: Destination image.
/// * `kernel_size`: Length of gaussian kernel, must be odd. If zero, then sigma must be set.
/// * `sigma`: Sigma for a gaussian kernel. If zero or negative then it is derived from `kernel_size`.
/// * `worker_budget`: Worker cap, see [WorkerBudget] for more info.
pub fn gaussian_blur(
    src: &BlurImage,
    dst: &mut BlurImageMut,
    kernel_size: u32,
    sigma: f32,
    worker_budget: WorkerBudget,
) -> Result<(), BlurError> {
    let kernel = ConvolutionKernel::gaussian(kernel_size, sigma)?;
    tile_blur(src, dst, &kernel, worker_budget)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Pixel;

    fn ramp_image(width: u32, height: u32) -> Vec<Pixel> {
        (0..width as usize * height as usize)
            .map(|i| Pixel::new(i as u8, i as u8, i as u8))
            .collect()
    }

    #[test]
    fn test_four_by_four_ones_kernel() {
        // pixel i holds (i, i, i); centers average their full 3x3 window,
        // the corner renormalizes over its 4 valid neighbors
        let pixels = ramp_image(4, 4);
        let src = BlurImage::borrow(&pixels, 4, 4);
        let kernel = ConvolutionKernel::try_new(3, vec![1.; 9]).unwrap();
        let mut dst = BlurImageMut::default();
        tile_blur(&src, &mut dst, &kernel, WorkerBudget::Fixed(4)).unwrap();
        let out = dst.data.borrow();
        assert_eq!(out[5], Pixel::new(5, 5, 5));
        assert_eq!(out[6], Pixel::new(6, 6, 6));
        assert_eq!(out[9], Pixel::new(9, 9, 9));
        assert_eq!(out[10], Pixel::new(10, 10, 10));
        // corner 0: (0 + 1 + 4 + 5) / 4 = 2.5, truncated
        assert_eq!(out[0], Pixel::new(2, 2, 2));
    }

    #[test]
    fn test_identity_kernel_reproduces_source() {
        let pixels = ramp_image(13, 9);
        let src = BlurImage::borrow(&pixels, 13, 9);
        let mut dst = BlurImageMut::default();
        tile_blur(&src, &mut dst, &ConvolutionKernel::identity(), WorkerBudget::Default).unwrap();
        assert_eq!(dst.data.borrow(), pixels.as_slice());
    }

    #[test]
    fn test_single_pixel_image_renormalizes_to_identity() {
        // only the center weight is ever valid on a 1x1 image
        let pixels = vec![Pixel::new(200, 100, 50)];
        let src = BlurImage::borrow(&pixels, 1, 1);
        let kernel = ConvolutionKernel::try_new(3, vec![1.; 9]).unwrap();
        let mut dst = BlurImageMut::default();
        tile_blur(&src, &mut dst, &kernel, WorkerBudget::Default).unwrap();
        assert_eq!(dst.data.borrow(), pixels.as_slice());
    }

    #[test]
    fn test_deterministic_across_runs() {
        let pixels = ramp_image(31, 17);
        let src = BlurImage::borrow(&pixels, 31, 17);
        let kernel = ConvolutionKernel::gaussian(5, 1.2).unwrap();
        let mut first = BlurImageMut::default();
        let mut second = BlurImageMut::default();
        tile_blur(&src, &mut first, &kernel, WorkerBudget::Default).unwrap();
        tile_blur(&src, &mut second, &kernel, WorkerBudget::Default).unwrap();
        assert_eq!(first.data.borrow(), second.data.borrow());
    }

    #[test]
    fn test_parallel_matches_single_worker() {
        let pixels = ramp_image(23, 29);
        let src = BlurImage::borrow(&pixels, 23, 29);
        let kernel = ConvolutionKernel::gaussian(3, 0.8).unwrap();
        let mut parallel = BlurImageMut::default();
        let mut sequential = BlurImageMut::default();
        tile_blur(&src, &mut parallel, &kernel, WorkerBudget::Fixed(16)).unwrap();
        tile_blur(&src, &mut sequential, &kernel, WorkerBudget::Fixed(1)).unwrap();
        assert_eq!(parallel.data.borrow(), sequential.data.borrow());
    }

    #[test]
    fn test_borrowed_destination_fully_overwritten() {
        let pixels = ramp_image(8, 8);
        let src = BlurImage::borrow(&pixels, 8, 8);
        let mut stale = vec![Pixel::new(0xAA, 0xAA, 0xAA); 64];
        let mut dst = BlurImageMut::borrow(&mut stale, 8, 8);
        tile_blur(&src, &mut dst, &ConvolutionKernel::identity(), WorkerBudget::Default).unwrap();
        assert_eq!(dst.data.borrow(), pixels.as_slice());
    }

    #[test]
    fn test_zero_sized_source_yields_empty_destination() {
        let src = BlurImage::alloc(0, 5);
        let kernel = ConvolutionKernel::identity();
        let mut dst = BlurImageMut::default();
        tile_blur(&src, &mut dst, &kernel, WorkerBudget::Default).unwrap();
        assert_eq!(dst.width, 0);
        assert_eq!(dst.height, 5);
        assert!(dst.data.borrow().is_empty());
    }

    #[test]
    fn test_zero_worker_budget_rejected() {
        let pixels = ramp_image(4, 4);
        let src = BlurImage::borrow(&pixels, 4, 4);
        let mut dst = BlurImageMut::default();
        assert_eq!(
            tile_blur(&src, &mut dst, &ConvolutionKernel::identity(), WorkerBudget::Fixed(0)),
            Err(BlurError::ZeroWorkerBudget)
        );
    }

    #[test]
    fn test_degenerate_dimensions_still_cover() {
        // 5x5 against a grid of 4 tiles into 25 one-pixel portions
        let pixels = ramp_image(5, 5);
        let src = BlurImage::borrow(&pixels, 5, 5);
        let mut dst = BlurImageMut::default();
        tile_blur(&src, &mut dst, &ConvolutionKernel::identity(), WorkerBudget::Default).unwrap();
        assert_eq!(dst.data.borrow(), pixels.as_slice());
    }

    #[test]
    fn test_gaussian_blur_flat_image_stays_flat() {
        // renormalization keeps a solid color flat even at the edges, up to
        // accumulation rounding and the truncating store
        let pixels = vec![Pixel::new(126, 66, 77); 40 * 25];
        let src = BlurImage::borrow(&pixels, 40, 25);
        let mut dst = BlurImageMut::default();
        gaussian_blur(&src, &mut dst, 5, 2., WorkerBudget::Default).unwrap();
        for (i, px) in dst.data.borrow().iter().enumerate() {
            for (channel, expected) in [(px.r, 126i32), (px.g, 66), (px.b, 77)] {
                let diff = (channel as i32 - expected).abs();
                assert!(
                    diff <= 1,
                    "Diff expected to be less than 1 but it was {diff} at {i}"
                );
            }
        }
    }
}
