use super::*;
use crate::foundation::core::Vec2;

fn img(w: u32, h: u32) -> PreparedImage {
    PreparedImage::from_premul(w, h, vec![255; (w * h * 4) as usize]).unwrap()
}

fn centered(x: f64, y: f64) -> Placement {
    Placement {
        center: Point::new(x, y),
        scale: 1.0,
        angle_deg: 0.0,
    }
}

#[test]
fn background_is_replaced_never_accumulated() {
    let mut scene = Scene::new();
    scene.add_design(img(4, 4), centered(10.0, 10.0), None);
    let first = scene.set_background(img(8, 8), centered(50.0, 50.0), None);
    let second = scene.set_background(img(16, 16), centered(50.0, 50.0), None);

    assert_ne!(first, second);
    assert_eq!(
        scene
            .objects()
            .iter()
            .filter(|o| o.kind() == LayerKind::Background)
            .count(),
        1
    );
    assert_eq!(scene.objects()[0].id(), second);
    assert_eq!(scene.background().unwrap().image().width, 16);
    assert_eq!(scene.designs().count(), 1);
}

#[test]
fn background_cannot_be_selected() {
    let mut scene = Scene::new();
    let bg = scene.set_background(img(8, 8), centered(50.0, 50.0), None);
    assert!(scene.select(bg).is_err());
    assert!(scene.select(ObjectId(999)).is_err());
    assert_eq!(scene.selection(), None);
}

#[test]
fn remove_clears_selection() {
    let mut scene = Scene::new();
    let d = scene.add_design(img(4, 4), centered(10.0, 10.0), Some("logo.png".into()));
    scene.select(d).unwrap();
    let removed = scene.remove(d).unwrap();
    assert_eq!(removed.label(), Some("logo.png"));
    assert_eq!(scene.selection(), None);
    assert!(scene.is_empty());
}

#[test]
fn hit_test_prefers_topmost_design() {
    let mut scene = Scene::new();
    scene.set_background(img(100, 100), centered(50.0, 50.0), None);
    let low = scene.add_design(img(20, 20), centered(50.0, 50.0), None);
    let high = scene.add_design(img(10, 10), centered(52.0, 52.0), None);

    assert_eq!(scene.hit_test(Point::new(52.0, 52.0)), Some(high));
    assert_eq!(scene.hit_test(Point::new(42.0, 42.0)), Some(low));
    // Background area only.
    assert_eq!(scene.hit_test(Point::new(5.0, 5.0)), None);
}

#[test]
fn rotated_object_bounds_and_containment() {
    let mut p = centered(50.0, 50.0);
    p.rotate_by(90.0);
    let mut scene = Scene::new();
    let id = scene.add_design(img(40, 10), p, None);
    let obj = scene.get(id).unwrap();

    let b = obj.bounds();
    assert!((b.width() - 10.0).abs() < 1e-9);
    assert!((b.height() - 40.0).abs() < 1e-9);
    assert!(obj.contains(Point::new(50.0, 68.0)));
    assert!(!obj.contains(Point::new(68.0, 50.0)));

    let obj = scene.get_mut(id).unwrap();
    obj.placement.move_by(Vec2::new(10.0, 0.0)).unwrap();
    assert!(scene.get(id).unwrap().contains(Point::new(60.0, 68.0)));
}

#[test]
fn placement_fit_width_scales_to_target() {
    let p = Placement::fit_width(Point::new(400.0, 300.0), 800, 400.0);
    assert!((p.scale - 0.5).abs() < 1e-12);
    let t = p.transform(800, 600);
    let top_left = t * Point::new(0.0, 0.0);
    assert!((top_left.x - 200.0).abs() < 1e-9);
    assert!((top_left.y - 150.0).abs() < 1e-9);
}

#[test]
fn placement_rejects_out_of_range_results() {
    let mut p = centered(50.0, 50.0);
    let before = p;
    assert!(p.scale_by(f64::MAX).is_err());
    assert!(p.scale_by(1e-12).is_err());
    assert!(p.move_by(Vec2::new(f64::INFINITY, 0.0)).is_err());
    assert!(p.move_by(Vec2::new(0.0, -2e6)).is_err());
    assert_eq!(p, before);

    p.scale_by(2.0).unwrap();
    p.move_by(Vec2::new(-5.0, 5.0)).unwrap();
    assert_eq!(p.center, Point::new(45.0, 55.0));
}
