//! Windowed minimum reduction (the dark channel).
//!
//! The dark channel of an image is, for every pixel, the minimum value over
//! all three channels and over a `w x w` window centered on that pixel.
//! Borders are handled by edge replication: the image is conceptually padded
//! by `w / 2` copies of its outermost rows and columns, and output `(y, x)`
//! reads the padded window whose top-left corner is `(y, x)`.
//!
//! # Window alignment
//!
//! In source coordinates the window for output row `y` spans rows
//! `y - w/2 ..= y - w/2 + w - 1`, and likewise for columns. For odd `w` this
//! is symmetric. For even `w` the window still has exactly `w` rows, so it
//! reaches one pixel further up (left) than down (right). A window of 2
//! therefore covers the pixel itself and its upper/left neighbour.
//!
//! # Complexity
//!
//! A direct evaluation costs `O(M * N * w^2)`. Because a minimum over a
//! rectangle equals the minimum over its rows of the minimum over its
//! columns, and replicated border samples never fall outside the clamped
//! window, the reduction is computed as a per-pixel channel minimum followed
//! by one horizontal and one vertical sliding-window minimum. Each pass keeps
//! a monotonic deque of candidate indices, giving `O(M * N)` total work that
//! is independent of `w`.

use std::collections::VecDeque;

use crate::api::DehazeError;
use crate::image::{Grid, RgbImage};

/// Compute the dark channel of `image` with a `window x window` patch.
///
/// Returns [`DehazeError::Parameter`] if `window` is zero.
///
/// # Example
///
/// ```
/// use dark_channel::{dark_channel, RgbImage};
///
/// let image = RgbImage::from_rgb8(2, 1, &[30, 10, 20, 90, 80, 70]).unwrap();
///
/// // A 1x1 window only takes the minimum across channels.
/// let dark = dark_channel(&image, 1).unwrap();
/// assert_eq!(dark.values(), &[10.0, 70.0]);
///
/// // A 3x3 window also spreads the minimum to the neighbour.
/// let dark = dark_channel(&image, 3).unwrap();
/// assert_eq!(dark.values(), &[10.0, 10.0]);
/// ```
pub fn dark_channel(image: &RgbImage, window: usize) -> Result<Grid, DehazeError> {
    if window == 0 {
        return Err(DehazeError::parameter("window", "must be at least 1"));
    }

    let width = image.width();
    let height = image.height();

    let mut values: Vec<f64> = image
        .pixels()
        .map(|[r, g, b]| r.min(g).min(b))
        .collect();

    if window > 1 {
        let mut line = vec![0.0; width.max(height)];

        for row in values.chunks_exact_mut(width) {
            line[..width].copy_from_slice(row);
            sliding_min(&line[..width], window, row);
        }

        let mut column = vec![0.0; height];
        for x in 0..width {
            for y in 0..height {
                line[y] = values[y * width + x];
            }
            sliding_min(&line[..height], window, &mut column);
            for y in 0..height {
                values[y * width + x] = column[y];
            }
        }
    }

    Ok(Grid::from_parts(width, height, values))
}

/// One-dimensional edge-replicated sliding minimum.
///
/// `out[i]` is the minimum of `src` over `i - window/2 ..= i - window/2 + window - 1`,
/// with the range clamped to the valid indices of `src`.
fn sliding_min(src: &[f64], window: usize, out: &mut [f64]) {
    let n = src.len();
    // Any window of at least 2n + 1 covers the whole line for every output.
    let window = window.min(2 * n + 1);
    let pad = window / 2;
    let mut candidates: VecDeque<usize> = VecDeque::with_capacity(window.min(n));
    let mut next = 0;

    for (i, slot) in out.iter_mut().enumerate().take(n) {
        // Window end, clamped to the last sample.
        let hi = (i + window - 1).saturating_sub(pad).min(n - 1);
        while next <= hi {
            while candidates.back().is_some_and(|&j| src[j] >= src[next]) {
                candidates.pop_back();
            }
            candidates.push_back(next);
            next += 1;
        }

        let lo = i.saturating_sub(pad);
        while candidates.front().is_some_and(|&j| j < lo) {
            candidates.pop_front();
        }

        // The deque is never empty: index `i` always lies inside the window.
        if let Some(&j) = candidates.front() {
            *slot = src[j];
        }
    }
}
