use rand::SeedableRng;
use rand::rngs::StdRng;

use super::*;
use crate::blend::mode::BlendMode;
use crate::foundation::surface::Surface;

fn rng() -> StdRng {
    StdRng::seed_from_u64(1)
}

#[test]
fn transparent_mask_copies_background_verbatim() {
    let snap = Surface::filled(4, 4, [90, 90, 90, 255]).unwrap();
    let px = PixelInputs {
        src: [200, 10, 30, 255],
        drawing: [0, 0, 0, 0],
        blending: [1, 2, 3, 4],
    };
    for mode in BlendMode::ALL {
        let opts = FilterOptions::resolve(mode, Some(&snap), Some(&snap)).unwrap();
        assert_eq!(composite_pixel(&opts, px, 2, 2, &mut rng()), [1, 2, 3, 4], "{mode}");
    }
}

#[test]
fn opaque_mask_in_normal_mode_replaces_background() {
    let opts = FilterOptions::resolve(BlendMode::Normal, None, None).unwrap();
    for drawing in [[0, 0, 0, 255], [255, 255, 255, 255], [12, 200, 99, 255], [1, 2, 254, 255]] {
        let px = PixelInputs {
            src: [50, 60, 70, 255],
            drawing,
            blending: [210, 220, 230, 255],
        };
        assert_eq!(composite_pixel(&opts, px, 0, 0, &mut rng()), drawing);
    }
}

#[test]
fn opaque_mask_in_eraser_mode_restores_source() {
    let opts = FilterOptions::resolve(BlendMode::Eraser, None, None).unwrap();
    let px = PixelInputs {
        src: [50, 60, 70, 255],
        drawing: [255, 0, 0, 255],
        blending: [210, 220, 230, 255],
    };
    assert_eq!(composite_pixel(&opts, px, 0, 0, &mut rng()), [50, 60, 70, 255]);
}

#[test]
fn partial_alpha_mixes_over_background() {
    let opts = FilterOptions::resolve(BlendMode::Normal, None, None).unwrap();
    let px = PixelInputs {
        src: [0, 0, 0, 255],
        drawing: [128, 0, 0, 128],
        blending: [0, 0, 0, 255],
    };
    assert_eq!(composite_pixel(&opts, px, 0, 0, &mut rng()), [128, 0, 0, 255]);
}

#[test]
fn output_is_opaque_even_for_translucent_background() {
    let opts = FilterOptions::resolve(BlendMode::Multiply, None, None).unwrap();
    let px = PixelInputs {
        src: [255, 255, 255, 255],
        drawing: [255, 255, 255, 255],
        blending: [0, 0, 0, 10],
    };
    assert_eq!(composite_pixel(&opts, px, 0, 0, &mut rng()), [255, 255, 255, 255]);
}

#[test]
fn tone_curve_overshoot_is_clamped_on_pack() {
    let opts = FilterOptions::resolve(BlendMode::ToneCurve, None, None).unwrap();
    let px = PixelInputs {
        src: [255, 255, 255, 255],
        drawing: [255, 255, 255, 255],
        blending: [0, 0, 0, 255],
    };
    assert_eq!(composite_pixel(&opts, px, 0, 0, &mut rng()), [255, 255, 255, 255]);
}
