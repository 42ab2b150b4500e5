use super::*;

fn solid(rgba_premul: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(2, 1, [rgba_premul, rgba_premul].concat()).unwrap()
}

#[test]
fn half_black_tint_darkens_white() {
    let tint = Tint::new(HexColor::BLACK, 0.5).unwrap();
    let out = apply_tint(&solid([255, 255, 255, 255]), tint);
    let px = &out.rgba8_premul[0..4];
    assert!((i16::from(px[0]) - 127).abs() <= 1, "{px:?}");
    assert_eq!(px[3], 255);
}

#[test]
fn full_tint_replaces_color_but_keeps_alpha() {
    let tint = Tint::new(HexColor::rgb(255, 0, 0), 1.0).unwrap();
    let out = apply_tint(&solid([64, 64, 64, 128]), tint);
    assert_eq!(&out.rgba8_premul[0..4], &[128, 0, 0, 128]);
}

#[test]
fn transparent_pixels_stay_transparent() {
    let tint = Tint::new(HexColor::rgb(0, 0, 128), 0.5).unwrap();
    let out = apply_tint(&solid([0, 0, 0, 0]), tint);
    assert_eq!(&out.rgba8_premul[0..4], &[0, 0, 0, 0]);
}

#[test]
fn zero_alpha_is_identity() {
    let tint = Tint::new(HexColor::rgb(0, 255, 0), 0.0).unwrap();
    let src = solid([10, 20, 30, 255]);
    assert_eq!(apply_tint(&src, tint), src);
}

#[test]
fn rejects_out_of_range_alpha() {
    assert!(Tint::new(HexColor::WHITE, 1.5).is_err());
    assert!(Tint::new(HexColor::WHITE, f32::NAN).is_err());
}

#[test]
fn cache_key_tracks_color_and_weight() {
    let a = Tint::new(HexColor::BLACK, 0.5).unwrap();
    let b = Tint::new(HexColor::BLACK, 0.5).unwrap();
    let c = Tint::new(HexColor::WHITE, 0.5).unwrap();
    assert_eq!(a.cache_key(), b.cache_key());
    assert_ne!(a.cache_key(), c.cache_key());
}
