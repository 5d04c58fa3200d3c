use super::*;
use crate::blend::mode::BlendMode;

const STEPS: [f32; 7] = [0.0, 0.1, 0.3, 0.5, 0.7, 0.9, 1.0];

fn grid() -> Vec<Rgb> {
    let mut out = Vec::new();
    for &r in &STEPS {
        for &g in &STEPS {
            for &b in &STEPS {
                out.push(Rgb::new(r, g, b));
            }
        }
    }
    out
}

fn approx(a: Rgb, b: Rgb) -> bool {
    (a.r - b.r).abs() < 1e-5 && (a.g - b.g).abs() < 1e-5 && (a.b - b.b).abs() < 1e-5
}

#[test]
fn pointwise_outputs_stay_in_unit_range() {
    let colors = grid();
    for mode in BlendMode::ALL {
        let Some(f) = mode.pointwise() else { continue };
        for &input in colors.iter().step_by(5) {
            for &layer in colors.iter().step_by(3) {
                let out = f(input, layer);
                for c in out.to_array() {
                    assert!(c.is_finite(), "{mode} {input:?} {layer:?} -> {out:?}");
                    if mode != BlendMode::ToneCurve {
                        assert!(
                            (0.0..=1.0).contains(&c),
                            "{mode} {input:?} {layer:?} -> {out:?}"
                        );
                    }
                }
            }
        }
    }
}

#[test]
fn normal_returns_layer_and_eraser_returns_input() {
    let input = Rgb::new(0.2, 0.4, 0.6);
    let layer = Rgb::new(0.9, 0.1, 0.3);
    assert_eq!(normal(input, layer), layer);
    assert_eq!(eraser(input, layer), input);
}

#[test]
fn screen_is_dual_of_multiply() {
    let colors = grid();
    for &a in colors.iter().step_by(7) {
        for &b in colors.iter().step_by(11) {
            let inv = |c: Rgb| c.map(|v| 1.0 - v);
            assert_eq!(screen(a, b), inv(multiply(inv(a), inv(b))));
        }
    }
}

#[test]
fn dodge_with_full_layer_saturates() {
    let out = dodge(Rgb::new(0.0, 0.5, 1.0), Rgb::splat(1.0));
    assert_eq!(out, Rgb::splat(1.0));
    let out = dodge(Rgb::splat(0.25), Rgb::splat(0.5));
    assert_eq!(out, Rgb::splat(0.5));
}

#[test]
fn burn_with_empty_layer_is_black() {
    let out = burn(Rgb::new(0.0, 0.5, 1.0), Rgb::splat(0.0));
    assert_eq!(out, Rgb::splat(0.0));
    let out = burn(Rgb::splat(0.75), Rgb::splat(0.5));
    assert_eq!(out, Rgb::splat(0.5));
}

#[test]
fn divide_by_empty_layer_saturates() {
    let out = divide(Rgb::new(0.0, 0.5, 1.0), Rgb::splat(0.0));
    assert_eq!(out, Rgb::splat(1.0));
    let out = divide(Rgb::splat(0.25), Rgb::splat(0.5));
    assert_eq!(out, Rgb::splat(0.5));
}

#[test]
fn addition_and_subtract_saturate() {
    assert_eq!(
        addition(Rgb::splat(0.75), Rgb::splat(0.5)),
        Rgb::splat(1.0)
    );
    assert_eq!(
        subtract(Rgb::splat(0.25), Rgb::splat(0.5)),
        Rgb::splat(0.0)
    );
}

#[test]
fn hard_light_midpoint_takes_multiply_branch() {
    // At exactly 0.5 the low branch gives in * 1.0.
    assert_eq!(hard_light(Rgb::splat(0.3), Rgb::splat(0.5)), Rgb::splat(0.3));
    // Above 0.5 the screen branch applies: full layer gives 1.
    assert_eq!(hard_light(Rgb::splat(0.3), Rgb::splat(1.0)), Rgb::splat(1.0));
}

#[test]
fn grain_extract_and_merge_are_centered() {
    let c = Rgb::new(0.2, 0.5, 0.8);
    assert!(approx(grain_extract(c, c), Rgb::splat(0.5)));
    assert!(approx(grain_merge(c, Rgb::splat(0.5)), c));
}

#[test]
fn color_with_achromatic_layer_is_gray_at_input_lightness() {
    let cases = [
        (Rgb::new(0.8, 0.2, 0.4), 0.5),
        (Rgb::new(1.0, 0.0, 0.0), 0.5),
        (Rgb::new(0.2, 0.2, 0.6), 0.4),
        (Rgb::splat(0.9), 0.9),
    ];
    for (input, lightness) in cases {
        for gray in [0.0, 0.3, 1.0] {
            let out = color(input, Rgb::splat(gray));
            assert!(approx(out, Rgb::splat(lightness)), "{input:?} -> {out:?}");
        }
    }
}

#[test]
fn color_takes_hue_and_saturation_from_layer() {
    let out = color(Rgb::splat(0.5), Rgb::new(1.0, 0.0, 0.0));
    assert!(approx(out, Rgb::new(1.0, 0.0, 0.0)));

    // Channel ordering follows the layer (green max, blue mid, red min).
    let out = color(Rgb::new(0.6, 0.2, 0.2), Rgb::new(0.1, 0.9, 0.5));
    assert!(out.g > out.b && out.b > out.r, "{out:?}");
    // Lightness follows the input.
    let l = (out.max_channel() + out.min_channel()) / 2.0;
    assert!((l - 0.4).abs() < 1e-5);
}

#[test]
fn hue_with_gray_layer_keeps_input() {
    let input = Rgb::new(0.8, 0.2, 0.4);
    assert!(approx(hue(input, Rgb::splat(0.5)), input));
}

#[test]
fn hue_takes_layer_hue() {
    let out = hue(Rgb::new(0.8, 0.4, 0.4), Rgb::new(0.0, 0.0, 1.0));
    assert!(approx(out, Rgb::new(0.4, 0.4, 0.8)));
}

#[test]
fn saturation_and_value_replace_components() {
    let out = saturation(Rgb::new(0.8, 0.4, 0.4), Rgb::splat(0.3));
    assert!(approx(out, Rgb::splat(0.8)));

    let out = value(Rgb::new(0.8, 0.4, 0.4), Rgb::splat(0.4));
    assert!(approx(out, Rgb::new(0.4, 0.2, 0.2)));
}

#[test]
fn s_curve_control_points() {
    let x = 0.5f32;
    assert_eq!(s_curve(x, 0.0), 0.5);
    assert!((s_curve(x, 0.25) - (x * 0.5).sqrt()).abs() < 1e-6);
    assert!((s_curve(x, 0.5) - x).abs() < 1e-6);
    assert!((s_curve(x, 0.75) - 2.0 * x * x).abs() < 1e-6);
    assert!((s_curve(x, 1.0) - 4.0 * x * x * x).abs() < 1e-6);
}

#[test]
fn tone_curve_identity_at_half() {
    let c = Rgb::new(0.1, 0.6, 0.9);
    assert!(approx(tone_curve(c, Rgb::splat(0.5)), c));
}

#[test]
fn sepia_default_layer_tints_warm() {
    let out = sepia(Rgb::splat(0.1), Rgb::new(1.0, 0.5, 0.0));
    // c = 0.7
    assert!((out.r - 0.189 * 0.7).abs() < 1e-5);
    assert!((out.g - 0.16 * 0.7).abs() < 1e-5);
    assert!((out.b - 0.131 * 0.7).abs() < 1e-5);
    assert_eq!(sepia(Rgb::splat(1.0), Rgb::splat(1.0)), Rgb::splat(1.0));
}

#[test]
fn brightness_contrast_neutral_is_identity() {
    let c = Rgb::new(0.1, 0.5, 0.9);
    assert!(approx(brightness_contrast(c, Rgb::new(0.5, 0.5, 0.0)), c));
}

#[test]
fn brightness_extremes() {
    let c = Rgb::new(0.1, 0.5, 0.9);
    assert!(approx(
        brightness_contrast(c, Rgb::new(0.0, 0.5, 0.0)),
        Rgb::splat(0.0)
    ));
    assert!(approx(
        brightness_contrast(c, Rgb::new(1.0, 0.5, 0.0)),
        Rgb::splat(1.0)
    ));
}

#[test]
fn zero_contrast_flattens_to_gray() {
    let c = Rgb::new(0.1, 0.5, 0.9);
    assert_eq!(
        brightness_contrast(c, Rgb::new(0.5, 0.0, 0.0)),
        Rgb::splat(0.5)
    );
}

#[test]
fn out_of_range_layer_saturates_dodge_and_divide() {
    // Drawing pixel with RGB above alpha: [200, 200, 200, 100].
    let layer = crate::color::sample::unpack_rgba8([200, 200, 200, 100]).unpremultiply();
    assert!(layer.r > 1.0);
    let input = Rgb::splat(0.4);
    assert_eq!(dodge(input, layer), Rgb::splat(1.0));
    assert_eq!(divide(input, Rgb::splat(-0.2)), Rgb::splat(1.0));
}
