//! Reference CIELAB values.
//!
//! Computed independently in double precision with the tabulated sRGB
//! matrix and the D65 white `(0.95047, 1.0, 1.08883)`, rounded to four
//! decimals.

use approx::assert_abs_diff_eq;
use hue_color::{LabConverter, lab_of};
use hue_core::Rgb8;

/// `(rgb, [L, a, b])`
const REFERENCE: &[([u8; 3], [f64; 3])] = &[
    ([0, 0, 0], [0.0, 0.0, 0.0]),
    ([1, 1, 1], [0.2742, 0.0, 0.0]),
    ([10, 20, 30], [5.9485, -0.6687, -8.1375]),
    ([128, 128, 128], [53.5850, 0.0, 0.0]),
    ([255, 255, 255], [100.0, 0.0, 0.0]),
    ([255, 0, 0], [53.2408, 80.0925, 67.2032]),
    ([0, 255, 0], [87.7347, -86.1827, 83.1793]),
    ([0, 0, 255], [32.2970, 79.1875, -107.8602]),
    ([255, 255, 0], [97.1393, -21.5537, 94.4780]),
    ([0, 255, 255], [91.1132, -48.0875, -14.1312]),
    ([255, 0, 255], [60.3242, 98.2343, -60.8249]),
    ([64, 128, 192], [52.2107, 0.0981, -39.4880]),
    ([200, 100, 50], [53.6295, 36.3058, 45.3795]),
    ([250, 128, 114], [67.2641, 45.2265, 29.0943]),
];

#[test]
fn lab_of_matches_reference() {
    for &([r, g, b], [l, a, bb]) in REFERENCE {
        let lab = lab_of(Rgb8::new(r, g, b));
        assert_abs_diff_eq!(lab.l, l, epsilon = 1e-3);
        assert_abs_diff_eq!(lab.a, a, epsilon = 1e-3);
        assert_abs_diff_eq!(lab.b, bb, epsilon = 1e-3);
    }
}

#[test]
fn converter_matches_reference() {
    let conv = LabConverter::new();
    for &([r, g, b], _) in REFERENCE {
        let rgb = Rgb8::new(r, g, b);
        assert_eq!(conv.convert(rgb), lab_of(rgb), "{rgb}");
    }
}

#[test]
fn report_rounding() {
    assert_eq!(lab_of(Rgb8::new(255, 0, 0)).to_string(), "(53.24, 80.09, 67.20)");
    assert_eq!(lab_of(Rgb8::new(0, 0, 255)).to_string(), "(32.30, 79.19, -107.86)");
    assert_eq!(lab_of(Rgb8::new(200, 100, 50)).to_string(), "(53.63, 36.31, 45.38)");
}

/// Same chain assembled from the building blocks, with the matrix derived
/// from chromaticities instead of the tabulated one.
#[test]
fn derived_matrix_chain() {
    use hue_color::xyz_to_lab;
    use hue_math::Vec3;
    use hue_primaries::{SRGB, rgb_to_xyz_matrix};
    use hue_transfer::srgb;

    let m = rgb_to_xyz_matrix(&SRGB);
    for &([r, g, b], [l, a, bb]) in REFERENCE {
        let linear = Vec3::from_array(srgb::eotf_rgb([r, g, b].map(|c| c as f64 / 255.0)));
        let lab = xyz_to_lab(m * linear);
        assert_abs_diff_eq!(lab.l, l, epsilon = 0.05);
        assert_abs_diff_eq!(lab.a, a, epsilon = 0.05);
        assert_abs_diff_eq!(lab.b, bb, epsilon = 0.05);
    }
}
