//! Post-processing of leverage curves.
//!
//! A curve is a list of `[travel, leverage]` samples. The shock stroke is the
//! area under the reciprocal of the leverage ratio over the wheel travel,
//! since the leverage ratio is the derivative of the travel by the stroke.
use crate::{error::Result, CorrectCfg, Error};

/// Area under `1 / leverage` by the trapezoid rule.
pub fn integral(curve: &[[f64; 2]]) -> f64 {
    curve
        .windows(2)
        .map(|w| {
            let [[x0, y0], [x1, y1]] = [w[0], w[1]];
            (x1 - x0) * (y0.recip() + y1.recip()) * 0.5
        })
        .sum()
}

/// Relative error of the curve integral against the stroke.
pub fn stroke_error(curve: &[[f64; 2]], stroke: f64) -> f64 {
    (integral(curve) - stroke) / stroke
}

/// Rescale the travel axis so the last sample lands on `travel`.
pub fn scale_travel(curve: &[[f64; 2]], travel: f64) -> Result<Vec<[f64; 2]>> {
    match curve.last() {
        Some(&[last, _]) if last != 0. && last.is_finite() => Ok(curve
            .iter()
            .map(|&[x, y]| [x / last * travel, y])
            .collect()),
        _ => Err(Error::StaticAxle),
    }
}

/// Nudge every leverage value until the curve integral matches the stroke.
///
/// This is a bounded heuristic: when the iteration cap is reached, the best
/// effort curve is returned.
pub fn correct(curve: &[[f64; 2]], stroke: f64, cfg: &CorrectCfg) -> Vec<[f64; 2]> {
    let mut curve = curve.to_vec();
    let err0 = stroke_error(&curve, stroke);
    let mut err = err0;
    let mut iter = 0;
    while err.abs() > cfg.tol && iter < cfg.max_iter {
        let y_min = curve.iter().map(|&[_, y]| y).fold(f64::INFINITY, f64::min);
        // Too little area means the leverage is too high
        let adj = if err < 0. { -y_min * cfg.step } else { y_min * cfg.step };
        curve.iter_mut().for_each(|[_, y]| *y += adj);
        err = stroke_error(&curve, stroke);
        iter += 1;
    }
    if err.abs() > cfg.tol {
        tracing::warn!(iter, err0, err, "stroke correction reached its cap");
    } else {
        tracing::debug!(iter, err0, err, "stroke corrected");
    }
    curve
}

/// Resample the curve at `res` evenly spaced travel positions from zero to
/// the last sample, taking the leverage of the nearest sample.
///
/// Return an empty curve if the input is empty or `res < 2`.
pub fn quantize(curve: &[[f64; 2]], res: usize) -> Vec<[f64; 2]> {
    let Some(&[last, _]) = curve.last() else { return Vec::new() };
    if res < 2 {
        return Vec::new();
    }
    let delta = last / (res - 1) as f64;
    (0..res)
        .map(|i| {
            let x = i as f64 * delta;
            let mut nearest = curve[0];
            for &p in &curve[1..] {
                if (p[0] - x).abs() < (nearest[0] - x).abs() {
                    nearest = p;
                }
            }
            [x, nearest[1]]
        })
        .collect()
}

/// Divide the leverage by the average leverage ratio.
pub fn normalize(curve: &[[f64; 2]], avg: f64) -> Vec<[f64; 2]> {
    curve.iter().map(|&[x, y]| [x, y / avg]).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn constant_leverage_integral() {
        let curve = [[0., 2.], [50., 2.], [100., 2.]];
        assert_abs_diff_eq!(integral(&curve), 50., epsilon = 1e-12);
        assert_abs_diff_eq!(stroke_error(&curve, 50.), 0., epsilon = 1e-12);
        assert_eq!(integral(&curve[..1]), 0.);
    }

    #[test]
    fn scale_to_travel() {
        let curve = [[0.5, 3.], [1., 2.5], [2., 2.]];
        let scaled = scale_travel(&curve, 160.).unwrap();
        assert_eq!(scaled, [[40., 3.], [80., 2.5], [160., 2.]]);
        assert_eq!(scale_travel(&[[0., 1.]], 160.), Err(Error::StaticAxle));
        assert_eq!(scale_travel(&[], 160.), Err(Error::StaticAxle));
    }

    #[test]
    fn correct_to_stroke() {
        let curve = (0..=20)
            .map(|i| {
                let x = i as f64 * 8.;
                [x, 3. - x / 160.]
            })
            .collect::<Vec<_>>();
        let stroke = integral(&curve) * 1.02;
        let corrected = correct(&curve, stroke, &CorrectCfg::new());
        assert!(stroke_error(&corrected, stroke).abs() < 1e-5);
        // Shape is kept, only shifted
        let shift = corrected[0][1] - curve[0][1];
        assert!(shift < 0.);
        for (c, r) in corrected.iter().zip(&curve) {
            assert_eq!(c[0], r[0]);
            assert_abs_diff_eq!(c[1] - r[1], shift, epsilon = 1e-9);
        }
    }

    #[test]
    fn correct_gives_up_at_cap() {
        let curve = [[0., 2.], [100., 2.]];
        let cfg = CorrectCfg::new().max_iter(3);
        let corrected = correct(&curve, 25., &cfg);
        assert!(stroke_error(&corrected, 25.).abs() > 1e-5);
        assert!(corrected[0][1] > 2.);
    }

    #[test]
    fn quantize_nearest() {
        let curve = [[10., 3.], [40., 2.8], [60., 2.6], [100., 2.4]];
        let q = quantize(&curve, 3);
        assert_eq!(q, [[0., 3.], [50., 2.8], [100., 2.4]]);
        assert!(quantize(&curve, 1).is_empty());
        assert!(quantize(&[], 6).is_empty());
    }

    #[test]
    fn normalize_by_average() {
        let curve = normalize(&[[0., 3.], [160., 2.]], 160. / 60.);
        assert_abs_diff_eq!(curve[0][1], 1.125, epsilon = 1e-12);
        assert_abs_diff_eq!(curve[1][1], 0.75, epsilon = 1e-12);
    }
}
