//! Mean filter over a square window using a summed-area table.

/// Local mean over a `(2 * radius + 1)` square window.
///
/// Windows are clipped at the image border and divided by the number of
/// samples actually covered, so border pixels are not darkened by implicit
/// zero padding. Each call is `O(width * height)` regardless of `radius`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BoxFilter {
    width: usize,
    height: usize,
    radius: usize,
}

impl BoxFilter {
    pub(crate) fn new(width: usize, height: usize, radius: usize) -> Self {
        // A radius of max(width, height) already spans the whole image.
        Self {
            width,
            height,
            radius: radius.min(width.max(height)),
        }
    }

    pub(crate) fn mean(&self, values: &[f64]) -> Vec<f64> {
        let (w, h) = (self.width, self.height);
        debug_assert_eq!(values.len(), w * h);

        // integral[(y * (w + 1)) + x] = sum of values above and left of (y, x)
        let stride = w + 1;
        let mut integral = vec![0.0f64; stride * (h + 1)];
        for y in 0..h {
            let mut row_sum = 0.0;
            for x in 0..w {
                row_sum += values[y * w + x];
                integral[(y + 1) * stride + x + 1] = integral[y * stride + x + 1] + row_sum;
            }
        }

        let mut out = Vec::with_capacity(w * h);
        for y in 0..h {
            let y0 = y.saturating_sub(self.radius);
            let y1 = (y + self.radius + 1).min(h);
            for x in 0..w {
                let x0 = x.saturating_sub(self.radius);
                let x1 = (x + self.radius + 1).min(w);

                let sum = integral[y1 * stride + x1] - integral[y0 * stride + x1]
                    - integral[y1 * stride + x0]
                    + integral[y0 * stride + x0];
                let count = ((y1 - y0) * (x1 - x0)) as f64;
                out.push(sum / count);
            }
        }
        out
    }
}
