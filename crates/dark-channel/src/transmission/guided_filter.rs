//! Edge-aware smoothing of transmission maps.
//!
//! The dark channel is computed over square patches, which leaves the raw
//! transmission map blocky with halos along object boundaries. An
//! [`EdgeAwareFilter`] smooths the map while snapping its edges to the edges
//! of a guidance image.
//!
//! [`GuidedFilter`] is the color-guided filter of He, Sun and Tang
//! ("Guided Image Filtering", ECCV 2010). Inside every window the output is
//! modeled as a linear function of the three guidance channels:
//!
//! ```text
//! q = a . I + b
//! a = (Sigma + eps * U)^-1 * cov(I, p)
//! b = mean(p) - a . mean(I)
//! ```
//!
//! where `Sigma` is the 3x3 covariance of the guidance in the window and `U`
//! is the identity. Coefficients are averaged over all windows covering a
//! pixel before being applied. All window means use [`BoxFilter`], so the
//! cost is `O(M * N)` for any radius.

use super::box_filter::BoxFilter;
use crate::api::DehazeError;
use crate::image::{Grid, RgbImage};

/// An edge-preserving smoothing operator.
///
/// Implementations must return a grid of the same shape as `input`, should
/// approximate `input` where the guidance is uniform, and should follow
/// guidance discontinuities elsewhere. `guidance` holds values in `[0, 1]`.
pub trait EdgeAwareFilter {
    /// Smooth `input` using the structure of `guidance`.
    fn refine(
        &self,
        guidance: &RgbImage,
        input: &Grid,
        radius: usize,
        eps: f64,
    ) -> Result<Grid, DehazeError>;
}

/// Color-guided filter (box-filter based local linear regression).
#[derive(Debug, Clone, Copy, Default)]
pub struct GuidedFilter;

impl EdgeAwareFilter for GuidedFilter {
    fn refine(
        &self,
        guidance: &RgbImage,
        input: &Grid,
        radius: usize,
        eps: f64,
    ) -> Result<Grid, DehazeError> {
        let (width, height) = (input.width(), input.height());
        if (guidance.width(), guidance.height()) != (width, height) {
            return Err(DehazeError::Shape(format!(
                "guidance is {}x{} but input is {}x{}",
                guidance.width(),
                guidance.height(),
                width,
                height
            )));
        }
        let (lo, hi) = guidance.min_max();
        if hi - lo <= 0.0 {
            return Err(DehazeError::Numeric(
                "guidance image has zero variance".to_string(),
            ));
        }

        let n = width * height;
        let boxf = BoxFilter::new(width, height, radius);
        let p = input.values();

        let channel = |c: usize| -> Vec<f64> { guidance.pixels().map(|px| px[c]).collect() };
        let guide = [channel(0), channel(1), channel(2)];

        let product = |a: &[f64], b: &[f64]| -> Vec<f64> {
            a.iter().zip(b).map(|(x, y)| x * y).collect()
        };

        let mean_i = [boxf.mean(&guide[0]), boxf.mean(&guide[1]), boxf.mean(&guide[2])];
        let mean_p = boxf.mean(p);
        let mean_ip = [
            boxf.mean(&product(&guide[0], p)),
            boxf.mean(&product(&guide[1], p)),
            boxf.mean(&product(&guide[2], p)),
        ];

        // Upper triangle of the guidance covariance: rr, rg, rb, gg, gb, bb.
        const PAIRS: [(usize, usize); 6] = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 2), (2, 2)];
        let corr: Vec<Vec<f64>> = PAIRS
            .iter()
            .map(|&(c, d)| boxf.mean(&product(&guide[c], &guide[d])))
            .collect();

        let mut a = [vec![0.0; n], vec![0.0; n], vec![0.0; n]];
        let mut b = vec![0.0; n];

        for k in 0..n {
            let mi = [mean_i[0][k], mean_i[1][k], mean_i[2][k]];
            let cov_ip = [
                mean_ip[0][k] - mi[0] * mean_p[k],
                mean_ip[1][k] - mi[1] * mean_p[k],
                mean_ip[2][k] - mi[2] * mean_p[k],
            ];

            let mut sigma = [0.0; 6];
            for (s, (&(c, d), cr)) in sigma.iter_mut().zip(PAIRS.iter().zip(&corr)) {
                *s = cr[k] - mi[c] * mi[d];
            }
            sigma[0] += eps;
            sigma[3] += eps;
            sigma[5] += eps;

            let coeff = solve_symmetric3(&sigma, &cov_ip).ok_or_else(|| {
                DehazeError::Numeric(format!("singular guidance covariance at pixel {}", k))
            })?;

            for c in 0..3 {
                a[c][k] = coeff[c];
            }
            b[k] = mean_p[k] - coeff[0] * mi[0] - coeff[1] * mi[1] - coeff[2] * mi[2];
        }

        let mean_a = [boxf.mean(&a[0]), boxf.mean(&a[1]), boxf.mean(&a[2])];
        let mean_b = boxf.mean(&b);

        let mut q = Vec::with_capacity(n);
        for k in 0..n {
            let v = mean_a[0][k] * guide[0][k]
                + mean_a[1][k] * guide[1][k]
                + mean_a[2][k] * guide[2][k]
                + mean_b[k];
            if !v.is_finite() {
                return Err(DehazeError::Numeric(format!(
                    "guided filter produced a non-finite value at pixel {}",
                    k
                )));
            }
            q.push(v);
        }

        Ok(Grid::from_parts(width, height, q))
    }
}

/// Solve `S x = v` for a symmetric 3x3 `S` given as its upper triangle
/// `[s00, s01, s02, s11, s12, s22]`.
///
/// Returns `None` unless `S` has a positive determinant.
fn solve_symmetric3(s: &[f64; 6], v: &[f64; 3]) -> Option<[f64; 3]> {
    let [s00, s01, s02, s11, s12, s22] = *s;

    // Cofactors (the adjugate of a symmetric matrix is symmetric).
    let c00 = s11 * s22 - s12 * s12;
    let c01 = s02 * s12 - s01 * s22;
    let c02 = s01 * s12 - s02 * s11;
    let c11 = s00 * s22 - s02 * s02;
    let c12 = s01 * s02 - s00 * s12;
    let c22 = s00 * s11 - s01 * s01;

    let det = s00 * c00 + s01 * c01 + s02 * c02;
    if !(det > 0.0) || !det.is_finite() {
        return None;
    }

    Some([
        (c00 * v[0] + c01 * v[1] + c02 * v[2]) / det,
        (c01 * v[0] + c11 * v[1] + c12 * v[2]) / det,
        (c02 * v[0] + c12 * v[1] + c22 * v[2]) / det,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half_split_guidance(width: usize, height: usize) -> RgbImage {
        let data = (0..width * height)
            .flat_map(|i| {
                let v = if i % width < width / 2 { 0.1 } else { 0.9 };
                [v, v, v]
            })
            .collect();
        RgbImage::from_values(width, height, data).unwrap()
    }

    #[test]
    fn test_solve_symmetric3_identity_and_general() {
        let x = solve_symmetric3(&[1.0, 0.0, 0.0, 1.0, 0.0, 1.0], &[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(x, [1.0, 2.0, 3.0]);

        // [[4,1,0],[1,3,1],[0,1,2]] * [1, -1, 2] = [3, 0, 3]
        let x = solve_symmetric3(&[4.0, 1.0, 0.0, 3.0, 1.0, 2.0], &[3.0, 0.0, 3.0]).unwrap();
        for (got, want) in x.iter().zip([1.0, -1.0, 2.0]) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_solve_symmetric3_singular() {
        assert!(solve_symmetric3(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0], &[1.0; 3]).is_none());
    }

    #[test]
    fn test_constant_input_is_preserved() {
        let guidance = half_split_guidance(8, 6);
        let input = Grid::filled(8, 6, 0.4).unwrap();
        let out = GuidedFilter.refine(&guidance, &input, 2, 1e-3).unwrap();
        for &v in out.values() {
            assert!((v - 0.4).abs() < 1e-9, "got {}", v);
        }
    }

    #[test]
    fn test_follows_guidance_edges() {
        let (w, h) = (12, 4);
        let guidance = half_split_guidance(w, h);
        // Input matches the guidance edge but is noisy inside each half.
        let values: Vec<f64> = (0..w * h)
            .map(|i| {
                let base = if i % w < w / 2 { 0.2 } else { 0.8 };
                base + if i % 2 == 0 { 0.05 } else { -0.05 }
            })
            .collect();
        let input = Grid::new(w, h, values).unwrap();
        let out = GuidedFilter.refine(&guidance, &input, 2, 1e-4).unwrap();

        for y in 0..h {
            let left = out.get(y, w / 2 - 1);
            let right = out.get(y, w / 2);
            assert!(right - left > 0.4, "edge smeared: {} -> {}", left, right);
        }
    }

    #[test]
    fn test_shape_preserved() {
        let guidance = half_split_guidance(5, 3);
        let input = Grid::filled(5, 3, 1.0).unwrap();
        let out = GuidedFilter.refine(&guidance, &input, 40, 1e-3).unwrap();
        assert_eq!((out.width(), out.height()), (5, 3));
    }

    #[test]
    fn test_huge_radius_acts_globally() {
        let guidance = half_split_guidance(6, 4);
        let input = Grid::filled(6, 4, 0.7).unwrap();
        let out = GuidedFilter.refine(&guidance, &input, usize::MAX, 1e-3).unwrap();
        assert_eq!((out.width(), out.height()), (6, 4));
        for &v in out.values() {
            assert!((v - 0.7).abs() < 1e-9, "got {}", v);
        }
    }

    #[test]
    fn test_flat_guidance_is_numeric_error() {
        let guidance = RgbImage::uniform(4, 4, [0.5; 3]).unwrap();
        let input = Grid::filled(4, 4, 0.3).unwrap();
        assert!(matches!(
            GuidedFilter.refine(&guidance, &input, 1, 1e-3),
            Err(DehazeError::Numeric(_))
        ));
    }
}
