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

use crate::{BlurError, MismatchedSize};

/// Square convolution kernel with an odd side length.
///
/// Invariants are enforced at construction, a constructed kernel is always
/// well formed: `size` is odd and at least 1, `weights` holds exactly
/// `size * size` row-major entries. Weights do not have to sum to 1, the
/// convolution normalizes by the weights actually applied per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvolutionKernel {
    size: usize,
    weights: Vec<f32>,
}

impl ConvolutionKernel {
    /// Validates and wraps a row-major weight matrix.
    pub fn try_new(size: usize, weights: Vec<f32>) -> Result<ConvolutionKernel, BlurError> {
        if size == 0 || size % 2 == 0 {
            return Err(BlurError::OddKernel(size));
        }
        if weights.len() != size * size {
            return Err(BlurError::KernelSizeMismatch(MismatchedSize {
                expected: size * size,
                received: weights.len(),
            }));
        }
        Ok(ConvolutionKernel { size, weights })
    }

    /// 1x1 kernel with a single unit weight, blurring with it reproduces the
    /// source image exactly.
    pub fn identity() -> ConvolutionKernel {
        ConvolutionKernel {
            size: 1,
            weights: vec![1.],
        }
    }

    /// Builds a normalized 2D gaussian kernel.
    ///
    /// If `sigma` is zero or negative it is derived from `kernel_size`, if
    /// `kernel_size` is zero it is derived from `sigma`. At least one of the
    /// two must be usable.
    pub fn gaussian(kernel_size: u32, sigma: f32) -> Result<ConvolutionKernel, BlurError> {
        if kernel_size == 0 && sigma <= 0. {
            return Err(BlurError::NegativeOrZeroSigma);
        }
        let sigma = if sigma <= 0. {
            sigma_size(kernel_size as f32)
        } else {
            sigma
        };
        let size = if kernel_size == 0 {
            kernel_size_for_sigma(sigma) as usize
        } else {
            kernel_size as usize
        };
        if size % 2 == 0 {
            return Err(BlurError::OddKernel(size));
        }

        let mean = (size / 2) as f32;
        let mut weights: Vec<f32> = vec![0.; size * size];
        let mut sum_norm: f32 = 0.;
        for y in 0..size {
            let dy = (y as f32 - mean) / sigma;
            for x in 0..size {
                let dx = (x as f32 - mean) / sigma;
                let new_weight = f32::exp(-0.5 * (dx * dx + dy * dy));
                weights[y * size + x] = new_weight;
                sum_norm += new_weight;
            }
        }

        if sum_norm != 0f32 {
            let sum_scale = 1f32 / sum_norm;
            for item in weights.iter_mut() {
                *item *= sum_scale;
            }
        }

        Ok(ConvolutionKernel { size, weights })
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Window reach from the center, `size / 2`.
    #[inline]
    pub fn half(&self) -> usize {
        self.size / 2
    }

    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Weight of the tap at `(row, col)` of the kernel matrix.
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f32 {
        self.weights[row * self.size + col]
    }
}

/// Computes sigma from kernel size
pub fn sigma_size(kernel_size: f32) -> f32 {
    let safe_kernel_size = if kernel_size <= 1. { 2. } else { kernel_size };
    0.3f32 * ((safe_kernel_size - 1.) * 0.5f32 - 1f32) + 0.8f32
}

/// Computes kernel size from sigma
pub fn kernel_size_for_sigma(sigma: f32) -> u32 {
    let possible_size = (((((sigma - 0.8f32) / 0.3f32) + 1f32) * 2f32) + 1f32).max(3f32) as u32;
    if possible_size % 2 == 0 {
        return possible_size + 1;
    }
    possible_size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_kernel_rejected() {
        assert_eq!(
            ConvolutionKernel::try_new(4, vec![1.; 16]),
            Err(BlurError::OddKernel(4))
        );
    }

    #[test]
    fn test_zero_kernel_rejected() {
        assert_eq!(
            ConvolutionKernel::try_new(0, vec![]),
            Err(BlurError::OddKernel(0))
        );
    }

    #[test]
    fn test_weights_length_must_match() {
        assert_eq!(
            ConvolutionKernel::try_new(3, vec![1.; 8]),
            Err(BlurError::KernelSizeMismatch(MismatchedSize {
                expected: 9,
                received: 8,
            }))
        );
    }

    #[test]
    fn test_gaussian_is_normalized() {
        let kernel = ConvolutionKernel::gaussian(5, 1.5).unwrap();
        assert_eq!(kernel.size(), 5);
        let sum: f32 = kernel.weights().iter().sum();
        assert!(
            (sum - 1.).abs() < 1e-5,
            "Weights expected to sum to 1 but summed to {sum}"
        );
        // symmetric bell, the center weight dominates
        let center = kernel.weight(2, 2);
        assert!(center > kernel.weight(0, 0));
        assert_eq!(kernel.weight(0, 0), kernel.weight(4, 4));
    }

    #[test]
    fn test_gaussian_derives_size_from_sigma() {
        let kernel = ConvolutionKernel::gaussian(0, 2.).unwrap();
        assert_ne!(kernel.size() % 2, 0);
        assert!(kernel.size() >= 3);
    }

    #[test]
    fn test_gaussian_rejects_unusable_parameters() {
        assert_eq!(
            ConvolutionKernel::gaussian(0, 0.),
            Err(BlurError::NegativeOrZeroSigma)
        );
    }

    #[test]
    fn test_identity_kernel() {
        let kernel = ConvolutionKernel::identity();
        assert_eq!(kernel.size(), 1);
        assert_eq!(kernel.half(), 0);
        assert_eq!(kernel.weight(0, 0), 1.);
    }
}
