//! Falloff curves for stamp strength.
//!
//! A [`FalloffCurve`] maps `[0, 1]` to `[0, 1]`. The painter evaluates the distance curve
//! at the normalized distance from the stamp edge (`0` at the edge, `1` at the center), and the
//! angle curve at the normalized facing ratio above the angle threshold.

/// Scalar function from `[0, 1]` to `[0, 1]`.
pub trait FalloffCurve: Send + Sync {
    fn evaluate(&self, t: f32) -> f32;
}

/// Cubic smoothstep `t²(3 − 2t)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SmoothStep;

impl FalloffCurve for SmoothStep {
    #[inline]
    fn evaluate(&self, t: f32) -> f32 {
        smoothstep01(t)
    }
}

/// Identity ramp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Linear;

impl FalloffCurve for Linear {
    #[inline]
    fn evaluate(&self, t: f32) -> f32 {
        t.clamp(0.0, 1.0)
    }
}

impl<F> FalloffCurve for F
where
    F: Fn(f32) -> f32 + Send + Sync,
{
    #[inline]
    fn evaluate(&self, t: f32) -> f32 {
        self(t)
    }
}

#[inline]
pub fn smoothstep01(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Share of full strength kept just below the angle threshold.
pub const BELOW_THRESHOLD_CAP: f32 = 0.2;

/// Cleaning efficiency for a facing ratio `d = dot(normal, -view)`.
///
/// Below `cos_threshold` the efficiency drops quadratically towards zero and never exceeds
/// [`BELOW_THRESHOLD_CAP`]. From the threshold up to head-on (`d = 1`) it follows `curve`,
/// which defaults to [`SmoothStep`]. Returns `0` for back-facing input (`d ≤ 0`).
pub fn angle_efficiency(d: f32, cos_threshold: f32, curve: Option<&dyn FalloffCurve>) -> f32 {
    if d.is_nan() || d <= 0.0 {
        return 0.0;
    }
    let d = d.min(1.0);

    if d < cos_threshold {
        let t = d / cos_threshold;
        return t * t * BELOW_THRESHOLD_CAP;
    }

    let span = 1.0 - cos_threshold;
    if span <= f32::EPSILON {
        return 1.0;
    }
    let t = ((d - cos_threshold) / span).clamp(0.0, 1.0);
    match curve {
        Some(curve) => curve.evaluate(t).clamp(0.0, 1.0),
        None => smoothstep01(t),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} != {b}");
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep01(0.0), 0.0);
        assert_eq!(smoothstep01(1.0), 1.0);
        approx_eq(smoothstep01(0.5), 0.5);
        assert_eq!(smoothstep01(-1.0), 0.0);
        assert_eq!(smoothstep01(2.0), 1.0);
    }

    #[test]
    fn closures_are_curves() {
        let square = |t: f32| t * t;
        approx_eq(square.evaluate(0.5), 0.25);
        approx_eq(Linear.evaluate(0.3), 0.3);
    }

    #[test]
    fn head_on_is_full_efficiency() {
        let cos = 45f32.to_radians().cos();
        approx_eq(angle_efficiency(1.0, cos, None), 1.0);
    }

    #[test]
    fn back_facing_is_zero() {
        assert_eq!(angle_efficiency(0.0, 0.5, None), 0.0);
        assert_eq!(angle_efficiency(-0.7, 0.5, None), 0.0);
        assert_eq!(angle_efficiency(f32::NAN, 0.5, None), 0.0);
    }

    #[test]
    fn below_threshold_is_capped() {
        let cos = 0.5;
        approx_eq(angle_efficiency(0.25, cos, None), 0.05);
        assert!(angle_efficiency(0.4999, cos, None) <= BELOW_THRESHOLD_CAP);
        // Exactly at the threshold the smoothstep segment starts from zero.
        assert_eq!(angle_efficiency(0.5, cos, None), 0.0);
    }

    #[test]
    fn zero_degree_threshold_only_accepts_head_on() {
        assert_eq!(angle_efficiency(1.0, 1.0, None), 1.0);
        approx_eq(angle_efficiency(0.5, 1.0, None), 0.05);
    }

    #[test]
    fn angle_curve_overrides_upper_segment() {
        let flat = |_t: f32| 0.75;
        approx_eq(angle_efficiency(0.9, 0.5, Some(&flat)), 0.75);
        // The lower segment is unaffected.
        approx_eq(angle_efficiency(0.25, 0.5, Some(&flat)), 0.05);
    }
}
