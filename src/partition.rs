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

/// Rectangular sub-region of the destination image owned by exactly one
/// worker.
///
/// Portions produced by one [split_into_portions] call are pairwise disjoint
/// and their union covers the image exactly, this is what makes lock-free
/// parallel writes to the destination sound.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Portion {
    pub x: usize,
    pub y: usize,
    pub width: usize,
    pub height: usize,
}

/// Largest `n` such that `n * n` does not exceed the worker budget.
///
/// A budget of zero degenerates to a grid size of zero, callers must guard
/// against the resulting empty partition.
pub fn portion_grid_size(worker_budget: usize) -> usize {
    let mut n: usize = 1;
    while n.checked_mul(n).is_some_and(|sq| sq <= worker_budget) {
        n += 1;
    }
    n - 1
}

/// Tiles `[0, width) x [0, height)` into portions for up to
/// `portion_grid_size(worker_budget)^2` workers.
///
/// Base column width is `max(width / grid, 1)`; whenever the leftover after
/// the next step would be smaller than one column, the current column absorbs
/// it, so every column is the base width except a wider tail. The same
/// absorption runs along rows, independently per column. Dimensions that do
/// not reach the grid size floor to 1-wide slices, the cover stays exact.
pub fn split_into_portions(width: usize, height: usize, worker_budget: usize) -> Vec<Portion> {
    let grid_size = portion_grid_size(worker_budget);
    if grid_size == 0 || width == 0 || height == 0 {
        return Vec::new();
    }
    let mut portions = Vec::with_capacity(grid_size * grid_size);

    let mut w = (width / grid_size).max(1);
    let mut x = 0usize;
    while x < width {
        let mut h = (height / grid_size).max(1);
        let remainder = width - (x + w);
        if remainder != 0 && remainder < w {
            w += remainder;
        }

        let mut y = 0usize;
        while y < height {
            let remainder = height - (y + h);
            if remainder != 0 && remainder < h {
                h += remainder;
            }
            portions.push(Portion {
                x,
                y,
                width: w,
                height: h,
            });
            y += h;
        }

        x += w;
    }

    portions
}
