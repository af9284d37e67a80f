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
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Portion-parallel image blurring.
//!
//! The image is tiled into disjoint rectangular portions, one worker
//! convolves each portion against a shared kernel, and the fork-join
//! dispatcher returns once every portion has been written. Windows clipped
//! by the image border renormalize over the weights actually applied, so
//! edges neither darken nor lighten.
//!
//! ```
//! use tileblur::{gaussian_blur, BlurImage, BlurImageMut, WorkerBudget};
//!
//! let src = BlurImage::alloc(640, 480);
//! let mut dst = BlurImageMut::default();
//! gaussian_blur(&src, &mut dst, 5, 1.5, WorkerBudget::Default).unwrap();
//! ```

mod blur;
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
mod blur_image;
mod convolve;
mod image;
mod kernel;
mod partition;
mod unsafe_slice;
mod util;

pub use blur::{gaussian_blur, tile_blur, WorkerBudget, DEFAULT_WORKER_BUDGET};
#[cfg(feature = "image")]
#[cfg_attr(docsrs, doc(cfg(feature = "image")))]
pub use blur_image::tile_blur_image;
pub use image::{BlurImage, BlurImageMut, BufferStore, Pixel};
pub use kernel::{kernel_size_for_sigma, sigma_size, ConvolutionKernel};
pub use partition::{portion_grid_size, split_into_portions, Portion};
pub use util::{BlurError, MismatchedSize};
