use super::*;
use crate::foundation::core::Point;
use crate::scene::Placement;

fn solid(w: u32, h: u32, premul: [u8; 4]) -> PreparedImage {
    let data: Vec<u8> = std::iter::repeat_n(premul, (w * h) as usize).flatten().collect();
    PreparedImage::from_premul(w, h, data).unwrap()
}

fn close(a: [u8; 4], b: [u8; 4]) -> bool {
    a.iter()
        .zip(b.iter())
        .all(|(x, y)| (i16::from(*x) - i16::from(*y)).abs() <= 3)
}

#[test]
fn empty_scene_is_clear_color() {
    let mut r = CpuRasterizer::new();
    let canvas = Canvas::new(16, 8).unwrap();
    let frame = r
        .render(&Scene::new(), canvas, HexColor::WHITE, None)
        .unwrap();
    assert_eq!(frame.data.len(), canvas.rgba_len());
    assert!(frame.data.iter().all(|&b| b == 255));
}

#[test]
fn background_is_drawn_centered_and_tinted() {
    let mut scene = Scene::new();
    scene.set_background(
        solid(20, 20, [255, 255, 255, 255]),
        Placement {
            center: Point::new(32.0, 32.0),
            scale: 1.0,
            angle_deg: 0.0,
        },
        None,
    );
    let canvas = Canvas::new(64, 64).unwrap();
    let mut r = CpuRasterizer::new();

    let plain = r.render(&scene, canvas, HexColor::rgb(0, 0, 255), None).unwrap();
    assert!(close(plain.pixel(32, 32).unwrap(), [255, 255, 255, 255]));
    assert!(close(plain.pixel(2, 2).unwrap(), [0, 0, 255, 255]));

    let tint = Tint::new(HexColor::rgb(255, 0, 0), 1.0).unwrap();
    let tinted = r.render(&scene, canvas, HexColor::rgb(0, 0, 255), Some(tint)).unwrap();
    assert!(close(tinted.pixel(32, 32).unwrap(), [255, 0, 0, 255]));
    // Outside the template the clear color is untouched by the tint.
    assert!(close(tinted.pixel(2, 2).unwrap(), [0, 0, 255, 255]));
}

#[test]
fn designs_are_not_tinted_and_draw_above_background() {
    let mut scene = Scene::new();
    let center = Point::new(32.0, 32.0);
    scene.set_background(
        solid(40, 40, [255, 255, 255, 255]),
        Placement {
            center,
            scale: 1.0,
            angle_deg: 0.0,
        },
        None,
    );
    scene.add_design(
        solid(10, 10, [0, 255, 0, 255]),
        Placement {
            center,
            scale: 1.0,
            angle_deg: 0.0,
        },
        None,
    );
    let tint = Tint::new(HexColor::BLACK, 1.0).unwrap();
    let mut r = CpuRasterizer::new();
    let frame = r
        .render(&scene, Canvas::new(64, 64).unwrap(), HexColor::WHITE, Some(tint))
        .unwrap();
    assert!(close(frame.pixel(32, 32).unwrap(), [0, 255, 0, 255]));
    assert!(close(frame.pixel(16, 16).unwrap(), [0, 0, 0, 255]));
}

#[test]
fn paint_cache_drops_removed_objects() {
    let mut scene = Scene::new();
    let id = scene.add_design(
        solid(4, 4, [255, 0, 0, 255]),
        Placement {
            center: Point::new(8.0, 8.0),
            scale: 1.0,
            angle_deg: 0.0,
        },
        None,
    );
    let canvas = Canvas::new(16, 16).unwrap();
    let mut r = CpuRasterizer::new();
    r.render(&scene, canvas, HexColor::WHITE, None).unwrap();
    assert_eq!(r.paint_cache.len(), 1);

    scene.remove(id);
    let frame = r.render(&scene, canvas, HexColor::WHITE, None).unwrap();
    assert!(r.paint_cache.is_empty());
    assert!(close(frame.pixel(8, 8).unwrap(), [255, 255, 255, 255]));
}
