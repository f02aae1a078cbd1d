//! Perceptual color difference
//!
//! Implements the CIEDE2000 color-difference formula with unit weighting
//! factors (kL = kC = kH = 1).
//!
//! # See also
//!
//! Sharma, Wu & Dalal (2005), "The CIEDE2000 Color-Difference Formula:
//! Implementation Notes, Supplementary Test Data, and Mathematical
//! Observations", Color Research & Application 30(1).

use crate::colorspace::{Lab, Oklch, oklch_to_lab};

/// 25^7, the chroma pivot of the G and R_C terms
const POW25_7: f64 = 6_103_515_625.0;

#[inline]
fn hue_degrees(b: f64, a: f64) -> f64 {
    if a == 0.0 && b == 0.0 {
        0.0
    } else {
        b.atan2(a).to_degrees().rem_euclid(360.0)
    }
}

/// CIEDE2000 difference between two CIE L*a*b* colors
pub fn ciede2000(lab1: Lab, lab2: Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_bar = 0.5 * (c1 + c2);
    let c_bar7 = c_bar.powi(7);
    let g = 0.5 * (1.0 - (c_bar7 / (c_bar7 + POW25_7)).sqrt());

    let a1p = (1.0 + g) * lab1.a;
    let a2p = (1.0 + g) * lab2.a;
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_degrees(lab1.b, a1p);
    let h2p = hue_degrees(lab2.b, a2p);

    let delta_lp = lab2.l - lab1.l;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp_deg = if chroma_product == 0.0 {
        0.0
    } else {
        let dh = h2p - h1p;
        if dh > 180.0 {
            dh - 360.0
        } else if dh < -180.0 {
            dh + 360.0
        } else {
            dh
        }
    };
    let delta_hp = 2.0 * chroma_product.sqrt() * (delta_hp_deg.to_radians() / 2.0).sin();

    let l_bar_p = 0.5 * (lab1.l + lab2.l);
    let c_bar_p = 0.5 * (c1p + c2p);
    let h_bar_p = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        0.5 * (h1p + h2p)
    } else if h1p + h2p < 360.0 {
        0.5 * (h1p + h2p + 360.0)
    } else {
        0.5 * (h1p + h2p - 360.0)
    };

    let t = 1.0 - 0.17 * (h_bar_p - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar_p).to_radians().cos()
        + 0.32 * (3.0 * h_bar_p + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar_p - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((h_bar_p - 275.0) / 25.0).powi(2)).exp();
    let c_bar_p7 = c_bar_p.powi(7);
    let r_c = 2.0 * (c_bar_p7 / (c_bar_p7 + POW25_7)).sqrt();
    let l_off = (l_bar_p - 50.0).powi(2);
    let s_l = 1.0 + 0.015 * l_off / (20.0 + l_off).sqrt();
    let s_c = 1.0 + 0.045 * c_bar_p;
    let s_h = 1.0 + 0.015 * c_bar_p * t;
    let r_t = -(2.0 * delta_theta).to_radians().sin() * r_c;

    let dl = delta_lp / s_l;
    let dc = delta_cp / s_c;
    let dh = delta_hp / s_h;

    (dl * dl + dc * dc + dh * dh + r_t * dc * dh).max(0.0).sqrt()
}

/// Perceptual distance between two OKLCH colors
///
/// Both colors are converted to CIE L*a*b* through [`oklch_to_lab`] and
/// compared with [`ciede2000`].
pub fn perceptual_distance(c1: Oklch, c2: Oklch) -> f64 {
    ciede2000(oklch_to_lab(c1), oklch_to_lab(c2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lab(l: f64, a: f64, b: f64) -> Lab {
        Lab::new(l, a, b)
    }

    #[test]
    fn test_identical_is_zero() {
        let c = lab(50.0, 2.6772, -79.7751);
        assert_eq!(ciede2000(c, c), 0.0);
    }

    #[test]
    fn test_sharma_reference_pairs() {
        // Selected pairs from the Sharma et al. supplementary test data
        let cases = [
            (lab(50.0, 2.6772, -79.7751), lab(50.0, 0.0, -82.7485), 2.0425),
            (lab(50.0, 3.1571, -77.2803), lab(50.0, 0.0, -82.7485), 2.8615),
            (lab(50.0, 2.8361, -74.0200), lab(50.0, 0.0, -82.7485), 3.4412),
            (lab(50.0, -1.3802, -84.2814), lab(50.0, 0.0, -82.7485), 1.0000),
            (lab(50.0, 0.0, 0.0), lab(50.0, -1.0, 2.0), 2.3669),
            (lab(50.0, 2.49, -0.001), lab(50.0, -2.49, 0.0009), 7.1792),
            (lab(50.0, 2.5, 0.0), lab(73.0, 25.0, -18.0), 27.1492),
            (lab(50.0, 2.5, 0.0), lab(56.0, -27.0, -3.0), 31.9030),
            (lab(60.2574, -34.0099, 36.2677), lab(60.4626, -34.1751, 39.4387), 1.2644),
            (lab(22.7233, 20.0904, -46.6940), lab(23.0331, 14.9730, -42.5619), 2.0373),
            (lab(90.8027, -2.0831, 1.4410), lab(91.1528, -1.6435, 0.0447), 1.4441),
            (lab(2.0776, 0.0795, -1.1350), lab(0.9033, -0.0636, -0.5514), 0.9082),
        ];
        for (i, (a, b, expected)) in cases.iter().enumerate() {
            let got = ciede2000(*a, *b);
            assert!(
                (got - expected).abs() < 1e-4,
                "pair {i}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn test_symmetric() {
        let a = lab(40.0, 30.0, -20.0);
        let b = lab(45.0, -10.0, 15.0);
        assert!((ciede2000(a, b) - ciede2000(b, a)).abs() < 1e-9);
    }

    #[test]
    fn test_zero_chroma_hue_ignored() {
        let gray = lab(50.0, 0.0, 0.0);
        let other = lab(55.0, 0.0, 0.0);
        let d = ciede2000(gray, other);
        assert!(d.is_finite() && d > 0.0);
    }

    #[test]
    fn test_perceptual_distance_orders() {
        let base = Oklch::new(0.6, 0.12, 30.0);
        let near = Oklch::new(0.6, 0.12, 33.0);
        let far = Oklch::new(0.6, 0.12, 210.0);
        let d_near = perceptual_distance(base, near);
        let d_far = perceptual_distance(base, far);
        assert!(d_near > 0.0);
        assert!(d_near < d_far);
        assert_eq!(perceptual_distance(base, base), 0.0);
    }
}
