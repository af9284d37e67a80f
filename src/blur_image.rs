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
use crate::{tile_blur, BlurImage, BlurImageMut, ConvolutionKernel, Pixel, WorkerBudget};
use image::{DynamicImage, RgbImage};

/// Convolves a dynamic image provided by the image crate.
///
/// The input is flattened to 8-bit RGB before blurring, any alpha is
/// discarded.
///
/// # Arguments
///
/// * `image`: Dynamic image provided by image crate.
/// * `kernel`: Convolution kernel, see [ConvolutionKernel] for more info.
/// * `worker_budget`: Worker cap, see [WorkerBudget] for more info.
#[must_use]
pub fn tile_blur_image(
    image: DynamicImage,
    kernel: &ConvolutionKernel,
    worker_budget: WorkerBudget,
) -> Option<DynamicImage> {
    let rgb_image = image.to_rgb8();
    let width = rgb_image.width();
    let height = rgb_image.height();

    let pixels = rgb_image
        .as_raw()
        .chunks_exact(3)
        .map(|chunk| Pixel::new(chunk[0], chunk[1], chunk[2]))
        .collect::<Vec<Pixel>>();
    let src = BlurImage::borrow(&pixels, width, height);
    let mut dst = BlurImageMut::default();
    tile_blur(&src, &mut dst, kernel, worker_budget).ok()?;

    let mut interleaved = Vec::with_capacity(pixels.len() * 3);
    for px in dst.data.borrow() {
        interleaved.extend_from_slice(&[px.r, px.g, px.b]);
    }
    let new_rgb_image = RgbImage::from_raw(width, height, interleaved)?;
    Some(DynamicImage::ImageRgb8(new_rgb_image))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blur_rgb_image() {
        let mut rgb_image = RgbImage::new(32, 32);
        for px in rgb_image.pixels_mut() {
            *px = image::Rgb([126, 66, 77]);
        }
        let kernel = ConvolutionKernel::gaussian(5, 1.5).unwrap();
        let blurred = tile_blur_image(
            DynamicImage::ImageRgb8(rgb_image),
            &kernel,
            WorkerBudget::Default,
        )
        .unwrap()
        .into_rgb8();
        assert_eq!(blurred.width(), 32);
        assert_eq!(blurred.height(), 32);
        for (i, chunk) in blurred.as_raw().chunks_exact(3).enumerate() {
            for (channel, expected) in chunk.iter().zip([126i32, 66, 77]) {
                let diff = (*channel as i32 - expected).abs();
                assert!(
                    diff <= 1,
                    "Diff expected to be less than 1 but it was {diff} at {i}"
                );
            }
        }
    }
}
