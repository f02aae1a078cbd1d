//! Color space conversion
//!
//! Provides conversion between the color spaces the extractor needs:
//! - sRGB <-> OKLab <-> OKLCH (perceptual lightness / chroma / hue)
//! - linear sRGB -> CIE XYZ (D65) -> CIE L*a*b*
//!
//! OKLCH drives the hue histogram. CIE L*a*b* is only used as the input
//! to [`crate::distance::ciede2000`].
//!
//! All functions are total: values that drift slightly out of range from
//! floating-point noise are clamped instead of producing NaN.

/// OKLab color representation
///
/// - `l`: Lightness in range [0.0, 1.0]
/// - `a`: Green-red opponent axis
/// - `b`: Blue-yellow opponent axis
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Oklab {
    /// Create a new OKLab color
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// OKLCH color representation (polar OKLab)
///
/// - `l`: Lightness in range [0.0, 1.0]
/// - `c`: Chroma, in practice [0.0, ~0.4] for sRGB colors
/// - `h`: Hue in degrees, [0.0, 360.0)
///
/// Hue has no meaningful direction when `c` is near zero; it is still
/// produced, and is exactly 0 for perfectly neutral colors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Oklch {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Oklch {
    /// Create a new OKLCH color
    pub fn new(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }
}

/// CIE XYZ color representation (D65 illuminant, Y of white = 1.0)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Xyz {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Xyz {
    /// Create a new XYZ color
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// CIE L*a*b* color representation (D65 white point)
///
/// - `l`: Lightness in range [0.0, 100.0]
/// - `a`: Green-Red component
/// - `b`: Blue-Yellow component
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

impl Lab {
    /// Create a new LAB color
    pub fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }
}

/// D65 reference white used by [`xyz_to_lab`]
const D65_WHITE: Xyz = Xyz {
    x: 0.95047,
    y: 1.0,
    z: 1.08883,
};

/// CIE L*a*b* transfer breakpoint, (6/29)^3 rounded
const LAB_EPSILON: f64 = 0.008856;

/// Slope of the linear segment of the L*a*b* transfer
const LAB_KAPPA_SLOPE: f64 = 7.787;

// --- sRGB transfer function ---

/// sRGB gamma -> linear, for one channel in [0.0, 1.0]
#[inline]
pub fn srgb_to_linear(u: f64) -> f64 {
    if u < 0.04045 {
        u / 12.92
    } else {
        ((u + 0.055) / 1.055).powf(2.4)
    }
}

/// Linear -> sRGB gamma, for one channel in [0.0, 1.0]
///
/// Input is clamped to [0.0, 1.0].
#[inline]
pub fn linear_to_srgb(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    if u <= 0.0031308 {
        12.92 * u
    } else {
        1.055 * u.powf(1.0 / 2.4) - 0.055
    }
}

// --- OKLab (Bjorn Ottosson) ---

/// Convert linear sRGB to OKLab
#[allow(clippy::excessive_precision)]
pub fn linear_rgb_to_oklab(r: f64, g: f64, b: f64) -> Oklab {
    let l = 0.4122214708 * r + 0.5363325363 * g + 0.0514459929 * b;
    let m = 0.2119034982 * r + 0.6806995451 * g + 0.1073969566 * b;
    let s = 0.0883024619 * r + 0.2817188376 * g + 0.6299787005 * b;

    let l_ = l.max(0.0).cbrt();
    let m_ = m.max(0.0).cbrt();
    let s_ = s.max(0.0).cbrt();

    Oklab {
        l: 0.2104542553 * l_ + 0.7936177850 * m_ - 0.0040720468 * s_,
        a: 1.9779984951 * l_ - 2.4285922050 * m_ + 0.4505937099 * s_,
        b: 0.0259040371 * l_ + 0.7827717662 * m_ - 0.8086757660 * s_,
    }
}

/// Convert OKLab to linear sRGB (unclamped)
#[allow(clippy::excessive_precision)]
pub fn oklab_to_linear_rgb(lab: Oklab) -> [f64; 3] {
    let l_ = lab.l + 0.3963377774 * lab.a + 0.2158037573 * lab.b;
    let m_ = lab.l - 0.1055613458 * lab.a - 0.0638541728 * lab.b;
    let s_ = lab.l - 0.0894841775 * lab.a - 1.2914855480 * lab.b;

    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    [
        4.0767416621 * l - 3.3077115913 * m + 0.2309699292 * s,
        -1.2684380046 * l + 2.6097574011 * m - 0.3413193965 * s,
        -0.0041960863 * l - 0.7034186147 * m + 1.7076147010 * s,
    ]
}

/// Convert 8-bit sRGB to OKLab
pub fn rgb_to_oklab(r: u8, g: u8, b: u8) -> Oklab {
    linear_rgb_to_oklab(
        srgb_to_linear(r as f64 / 255.0),
        srgb_to_linear(g as f64 / 255.0),
        srgb_to_linear(b as f64 / 255.0),
    )
}

/// Convert OKLab to OKLCH, hue normalized to [0, 360)
pub fn oklab_to_oklch(lab: Oklab) -> Oklch {
    let c = (lab.a * lab.a + lab.b * lab.b).sqrt();
    let h = lab.b.atan2(lab.a).to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative angles
    let h = if h >= 360.0 { 0.0 } else { h };
    Oklch { l: lab.l, c, h }
}

/// Convert OKLCH to OKLab
pub fn oklch_to_oklab(lch: Oklch) -> Oklab {
    let h = lch.h.to_radians();
    let c = lch.c.max(0.0);
    Oklab {
        l: lch.l,
        a: c * h.cos(),
        b: c * h.sin(),
    }
}

/// Convert 8-bit sRGB to OKLCH
///
/// This is the perceptual model the hue histogram is built in.
pub fn rgb_to_oklch(r: u8, g: u8, b: u8) -> Oklch {
    oklab_to_oklch(rgb_to_oklab(r, g, b))
}

/// Convert OKLCH to gamma-encoded sRGB in [0.0, 1.0]
///
/// Out-of-gamut colors are clamped per channel in linear light.
pub fn oklch_to_rgb(lch: Oklch) -> [f64; 3] {
    let [r, g, b] = oklab_to_linear_rgb(oklch_to_oklab(lch));
    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b)]
}

/// Convert OKLCH to 8-bit sRGB
pub fn oklch_to_rgb8(lch: Oklch) -> (u8, u8, u8) {
    let [r, g, b] = oklch_to_rgb(lch);
    let to_u8 = |u: f64| (u * 255.0).round().clamp(0.0, 255.0) as u8;
    (to_u8(r), to_u8(g), to_u8(b))
}

// --- CIE XYZ / L*a*b* ---

/// Convert linear sRGB to CIE XYZ (D65)
#[allow(clippy::excessive_precision)]
pub fn linear_rgb_to_xyz(r: f64, g: f64, b: f64) -> Xyz {
    Xyz {
        x: 0.4124564 * r + 0.3575761 * g + 0.1804375 * b,
        y: 0.2126729 * r + 0.7151522 * g + 0.0721750 * b,
        z: 0.0193339 * r + 0.1191920 * g + 0.9503041 * b,
    }
}

#[inline]
fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA_SLOPE * t + 16.0 / 116.0
    }
}

/// Convert CIE XYZ to CIE L*a*b* (D65 white point)
pub fn xyz_to_lab(xyz: Xyz) -> Lab {
    let fx = lab_f(xyz.x / D65_WHITE.x);
    let fy = lab_f(xyz.y / D65_WHITE.y);
    let fz = lab_f(xyz.z / D65_WHITE.z);
    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert OKLCH to CIE L*a*b*
///
/// The path is OKLCH -> linear sRGB (clamped to [0, 1]) -> gamma-encoded
/// sRGB -> linear sRGB -> XYZ -> L*a*b*. The gamma round trip is kept so
/// the result matches a color that has actually been encoded as sRGB.
pub fn oklch_to_lab(lch: Oklch) -> Lab {
    let [r, g, b] = oklch_to_rgb(lch);
    let xyz = linear_rgb_to_xyz(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    xyz_to_lab(xyz)
}

/// Convert 8-bit sRGB to CIE L*a*b*
pub fn rgb_to_lab(r: u8, g: u8, b: u8) -> Lab {
    let xyz = linear_rgb_to_xyz(
        srgb_to_linear(r as f64 / 255.0),
        srgb_to_linear(g as f64 / 255.0),
        srgb_to_linear(b as f64 / 255.0),
    );
    xyz_to_lab(xyz)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-3;

    #[test]
    fn test_transfer_roundtrip() {
        for i in 0..=255u8 {
            let u = i as f64 / 255.0;
            let back = linear_to_srgb(srgb_to_linear(u));
            assert!((back - u).abs() < 1e-9, "channel {i}");
        }
    }

    #[test]
    fn test_white_and_black() {
        let white = rgb_to_oklch(255, 255, 255);
        assert!((white.l - 1.0).abs() < EPS);
        assert!(white.c < 1e-3);

        let black = rgb_to_oklch(0, 0, 0);
        assert_eq!(black.l, 0.0);
        assert_eq!(black.c, 0.0);
        assert_eq!(black.h, 0.0);
    }

    #[test]
    fn test_primary_hues() {
        // Reference values from the OKLab reference implementation
        let red = rgb_to_oklch(255, 0, 0);
        assert!((red.l - 0.628).abs() < EPS);
        assert!((red.c - 0.2577).abs() < EPS);
        assert!((red.h - 29.23).abs() < 0.1);

        let green = rgb_to_oklch(0, 255, 0);
        assert!((green.h - 142.5).abs() < 0.1);

        let blue = rgb_to_oklch(0, 0, 255);
        assert!((blue.h - 264.05).abs() < 0.1);
    }

    #[test]
    fn test_hue_range() {
        for &(r, g, b) in &[(255, 0, 128), (10, 200, 30), (1, 2, 3), (250, 250, 251)] {
            let lch = rgb_to_oklch(r, g, b);
            assert!((0.0..360.0).contains(&lch.h));
            assert!(lch.c >= 0.0);
        }
    }

    #[test]
    fn test_oklch_roundtrip_primaries() {
        let colors = [
            (255, 0, 0),
            (0, 255, 0),
            (0, 0, 255),
            (255, 255, 0),
            (0, 255, 255),
            (128, 64, 32),
        ];
        for (r, g, b) in colors {
            let back = oklch_to_rgb8(rgb_to_oklch(r, g, b));
            assert_eq!(back, (r, g, b), "roundtrip failed for ({r},{g},{b})");
        }
    }

    #[test]
    fn test_lab_white_reference() {
        let lab = rgb_to_lab(255, 255, 255);
        assert!((lab.l - 100.0).abs() < 0.01);
        assert!(lab.a.abs() < 0.01);
        assert!(lab.b.abs() < 0.01);
    }

    #[test]
    fn test_lab_red_reference() {
        let lab = rgb_to_lab(255, 0, 0);
        assert!((lab.l - 53.24).abs() < 0.05);
        assert!((lab.a - 80.09).abs() < 0.1);
        assert!((lab.b - 67.20).abs() < 0.1);
    }

    #[test]
    fn test_oklch_to_lab_matches_rgb_to_lab() {
        let lch = rgb_to_oklch(40, 120, 200);
        let via_oklch = oklch_to_lab(lch);
        let direct = rgb_to_lab(40, 120, 200);
        assert!((via_oklch.l - direct.l).abs() < 0.05);
        assert!((via_oklch.a - direct.a).abs() < 0.05);
        assert!((via_oklch.b - direct.b).abs() < 0.05);
    }

    #[test]
    fn test_out_of_range_tolerated() {
        let lab = oklch_to_lab(Oklch::new(1.02, 0.5, 123.0));
        assert!(lab.l.is_finite() && lab.a.is_finite() && lab.b.is_finite());
        let rgb = oklch_to_rgb(Oklch::new(-0.1, -0.2, 400.0));
        assert!(rgb.iter().all(|c| (0.0..=1.0).contains(c)));
    }
}
