use image::Rgb;

// Breakpoints of the classic "hot" map: red ramps first, then green, then blue.
const RED_END: f64 = 0.365079;
const GREEN_END: f64 = 0.746032;
const RED_FLOOR: f64 = 0.0416;

fn ramp(t: f64, start: f64, end: f64) -> f64 {
    ((t - start) / (end - start)).clamp(0.0, 1.0)
}

/// Map `t` in [0, 1] onto black -> red -> yellow -> white.
pub fn hot(t: f64) -> Rgb<u8> {
    let t = t.clamp(0.0, 1.0);
    let r = RED_FLOOR + (1.0 - RED_FLOOR) * ramp(t, 0.0, RED_END);
    let g = ramp(t, RED_END, GREEN_END);
    let b = ramp(t, GREEN_END, 1.0);
    let to_u8 = |c: f64| (c * 255.0).round() as u8;
    Rgb([to_u8(r), to_u8(g), to_u8(b)])
}

/// Position of `v` between `lo` and `hi`. A flat range maps everything to the
/// top of the scale.
pub fn normalize(v: u8, lo: u8, hi: u8) -> f64 {
    if hi <= lo {
        return 1.0;
    }
    (v.saturating_sub(lo)) as f64 / (hi - lo) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hot_endpoints() {
        assert_eq!(hot(0.0), Rgb([11, 0, 0]));
        assert_eq!(hot(1.0), Rgb([255, 255, 255]));
        assert_eq!(hot(RED_END), Rgb([255, 0, 0]));
        assert_eq!(hot(GREEN_END), Rgb([255, 255, 0]));
    }

    #[test]
    fn hot_is_monotonic() {
        let mut prev = hot(0.0);
        for i in 1..=100 {
            let c = hot(i as f64 / 100.0);
            for k in 0..3 {
                assert!(c.0[k] >= prev.0[k]);
            }
            prev = c;
        }
    }

    #[test]
    fn normalize_handles_flat_range() {
        assert_eq!(normalize(7, 7, 7), 1.0);
        assert_eq!(normalize(0, 0, 200), 0.0);
        assert_eq!(normalize(100, 0, 200), 0.5);
    }
}
