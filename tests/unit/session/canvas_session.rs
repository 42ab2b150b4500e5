use super::*;
use crate::assets::MemoryTemplateSource;
use crate::foundation::core::Canvas;

fn solid(w: u32, h: u32, premul: [u8; 4]) -> PreparedImage {
    let data: Vec<u8> = std::iter::repeat_n(premul, (w * h) as usize).flatten().collect();
    PreparedImage::from_premul(w, h, data).unwrap()
}

fn png_bytes(w: u32, h: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba(rgba));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

fn small_config() -> SessionConfig {
    SessionConfig {
        canvas: Canvas::new(200, 160).unwrap(),
        template_width: 100.0,
        design_width: 40.0,
        ..SessionConfig::default()
    }
}

fn memory_session() -> CanvasSession {
    let mut src = MemoryTemplateSource::new();
    for garment in GarmentType::ALL {
        for view in GarmentView::ALL {
            src.insert(garment, view, solid(50, 50, [255, 255, 255, 255]));
        }
    }
    CanvasSession::new(small_config(), Arc::new(Catalog::builtin()), Arc::new(src)).unwrap()
}

fn backgrounds(s: &CanvasSession) -> usize {
    s.objects()
        .iter()
        .filter(|o| o.kind() == LayerKind::Background)
        .count()
}

#[test]
fn new_session_draws_blank_canvas() {
    let s = memory_session();
    let frame = s.frame().unwrap();
    assert_eq!((frame.width, frame.height), (200, 160));
    assert_eq!(frame.pixel(0, 0), Some([255, 255, 255, 255]));
    assert!(!s.has_template());
}

#[test]
fn every_template_replaces_the_background_once() {
    let mut s = memory_session();
    for garment in GarmentType::ALL {
        for view in GarmentView::ALL {
            s.load_template(garment, view).unwrap();
            assert_eq!(backgrounds(&s), 1);
            let bg = s.background().unwrap();
            assert_eq!(bg.label(), Some(Template::default_path(garment, view).as_str()));
            assert_eq!(bg.placement().scale, 2.0);
            assert_eq!(bg.placement().center, s.config().canvas.center());
        }
    }
    assert_eq!(s.objects().len(), 1);
}

#[test]
fn template_switch_keeps_designs_and_tint() {
    let mut s = memory_session();
    s.load_template(GarmentType::Tshirt, GarmentView::Front).unwrap();
    s.set_tint_color(HexColor::BLACK).unwrap();
    let design = s.add_user_image(&png_bytes(8, 8, [255, 0, 0, 255]), Some("logo.png")).unwrap();

    s.load_template(GarmentType::Hoodie, GarmentView::Back).unwrap();
    assert!(s.scene().get(design).is_some());
    assert_eq!(s.tint().unwrap().color, HexColor::BLACK);
    assert_eq!(s.template().unwrap().garment, GarmentType::Hoodie);
}

#[test]
fn tint_darkens_background_but_not_canvas() {
    let mut s = memory_session();
    s.load_template(GarmentType::Tshirt, GarmentView::Front).unwrap();
    s.set_tint_color(HexColor::BLACK).unwrap();
    let frame = s.frame().unwrap();
    let [r, g, b, a] = frame.pixel(100, 80).unwrap();
    assert!((120..=135).contains(&r), "r={r}");
    assert_eq!((r, g, b, a), (r, r, r, 255));
    assert_eq!(frame.pixel(2, 2), Some([255, 255, 255, 255]));

    s.clear_tint().unwrap();
    assert_eq!(s.frame().unwrap().pixel(100, 80), Some([255, 255, 255, 255]));
}

#[test]
fn added_design_is_centered_scaled_and_selected() {
    let mut s = memory_session();
    let id = s.add_user_image(&png_bytes(80, 20, [0, 0, 255, 255]), Some("logo.png")).unwrap();
    assert_eq!(s.selection(), Some(id));
    let obj = s.scene().get(id).unwrap();
    assert_eq!(obj.kind(), LayerKind::Design);
    assert_eq!(obj.placement().scale, 0.5);
    assert_eq!(obj.label(), Some("logo.png"));
    assert_eq!(s.frame().unwrap().pixel(100, 80), Some([0, 0, 255, 255]));
}

#[test]
fn svg_design_is_accepted() {
    let mut s = memory_session();
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10"><rect width="10" height="10" fill="#00ff00"/></svg>"##;
    let id = s.add_user_image(svg, None).unwrap();
    let obj = s.scene().get(id).unwrap();
    assert!(obj.image().width >= 40);
}

#[test]
fn bad_upload_is_an_upload_error_and_changes_nothing() {
    let mut s = memory_session();
    let first = s.add_user_image(&png_bytes(4, 4, [1, 2, 3, 255]), None).unwrap();
    let err = s.add_user_image(b"definitely not an image", None).unwrap_err();
    assert!(matches!(err, MockwearError::Upload(_)));
    assert!(matches!(s.add_user_image(&[], None), Err(MockwearError::Upload(_))));
    assert_eq!(s.objects().len(), 1);
    assert_eq!(s.selection(), Some(first));
}

#[test]
fn replace_swaps_design_only_after_decoding() {
    let mut s = memory_session();
    let first = s.add_user_image(&png_bytes(4, 4, [1, 2, 3, 255]), Some("a.png")).unwrap();

    assert!(s.replace_user_image(first, b"junk", Some("b.png")).is_err());
    assert!(s.scene().get(first).is_some());

    let second = s
        .replace_user_image(first, &png_bytes(4, 4, [9, 9, 9, 255]), Some("b.png"))
        .unwrap();
    assert!(s.scene().get(first).is_none());
    assert_eq!(s.scene().designs().count(), 1);
    assert_eq!(s.selection(), Some(second));
}

#[test]
fn four_quarter_turns_restore_orientation() {
    let mut s = memory_session();
    let id = s.add_user_image(&png_bytes(8, 4, [0, 0, 0, 255]), None).unwrap();
    let before = s.scene().get(id).unwrap().transform();
    for _ in 0..4 {
        assert!(s.rotate_step().unwrap());
    }
    let obj = s.scene().get(id).unwrap();
    assert_eq!(obj.placement().angle_deg, 0.0);
    let after = obj.transform();
    for (a, b) in before.as_coeffs().iter().zip(after.as_coeffs()) {
        assert!((a - b).abs() < 1e-9);
    }

    s.rotate_selection(-90.0).unwrap();
    assert_eq!(s.scene().get(id).unwrap().placement().angle_deg, 270.0);
    assert!(s.rotate_selection(f64::NAN).is_err());
}

#[test]
fn scale_requires_positive_finite_factor() {
    let mut s = memory_session();
    let id = s.add_user_image(&png_bytes(40, 40, [0, 0, 0, 255]), None).unwrap();
    assert!(s.zoom_in().unwrap());
    assert!((s.scene().get(id).unwrap().placement().scale - 1.1).abs() < 1e-12);
    assert!(s.zoom_out().unwrap());
    assert!((s.scene().get(id).unwrap().placement().scale - 0.99).abs() < 1e-12);

    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            s.scale_selection(bad),
            Err(MockwearError::Validation(_))
        ));
    }
}

#[test]
fn runaway_scale_is_rejected_and_design_stays_visible() {
    let mut s = memory_session();
    let id = s.add_user_image(&png_bytes(40, 40, [0, 0, 255, 255]), None).unwrap();
    let before = s.scene().get(id).unwrap().placement();

    assert!(s.scale_selection(1e200).is_err());
    assert!(s.scale_selection(1e-300).is_err());
    assert!(matches!(
        s.move_selection(1e300, 0.0),
        Err(MockwearError::Validation(_))
    ));
    assert_eq!(s.scene().get(id).unwrap().placement(), before);

    assert_eq!(s.select_at(Point::new(100.0, 80.0)), Some(id));
    assert_eq!(s.frame().unwrap().pixel(100, 80), Some([0, 0, 255, 255]));
    assert!(s.zoom_in().unwrap());
}

#[test]
fn selection_ops_without_selection_are_noops() {
    let mut s = memory_session();
    s.load_template(GarmentType::Polo, GarmentView::Side).unwrap();
    assert_eq!(s.delete_selection().unwrap(), None);
    assert!(!s.rotate_selection(90.0).unwrap());
    assert!(!s.scale_selection(2.0).unwrap());
    assert!(!s.move_selection(5.0, 5.0).unwrap());
    assert_eq!(backgrounds(&s), 1);
}

#[test]
fn background_is_locked() {
    let mut s = memory_session();
    let bg = s.load_template(GarmentType::Tshirt, GarmentView::Front).unwrap();
    assert!(s.select(bg).is_err());
    assert_eq!(s.select_at(Point::new(100.0, 80.0)), None);
    assert_eq!(s.delete_selection().unwrap(), None);
    assert!(s.has_template());
}

#[test]
fn select_at_hits_topmost_design_and_delete_removes_it() {
    let mut s = memory_session();
    let a = s.add_user_image(&png_bytes(40, 40, [255, 0, 0, 255]), None).unwrap();
    let b = s.add_user_image(&png_bytes(40, 40, [0, 255, 0, 255]), None).unwrap();
    s.clear_selection();

    assert_eq!(s.select_at(Point::new(100.0, 80.0)), Some(b));
    assert_eq!(s.select_at(Point::new(1.0, 1.0)), None);
    assert_eq!(s.selection(), None);

    s.select(b).unwrap();
    assert!(s.move_selection(50.0, 0.0).unwrap());
    assert_eq!(s.select_at(Point::new(100.0, 80.0)), Some(a));
    assert_eq!(s.delete_selection().unwrap(), Some(a));
    assert!(s.scene().get(a).is_none());
    assert_eq!(s.selection(), None);
}

#[test]
fn export_without_template_is_a_noop() {
    let mut s = memory_session();
    s.add_user_image(&png_bytes(4, 4, [0, 0, 0, 255]), None).unwrap();
    assert_eq!(s.export_png().unwrap(), None);
}

#[test]
fn export_encodes_canvas_sized_png() {
    let mut s = memory_session();
    s.load_template(GarmentType::Tshirt, GarmentView::Front).unwrap();
    let mockup = s.export_png().unwrap().unwrap();
    assert_eq!((mockup.width, mockup.height), (200, 160));
    assert_eq!(mockup.file_name(), "mockup.png");
    let decoded = image::load_from_memory(&mockup.png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (200, 160));
}

#[test]
fn stale_ticket_is_discarded() {
    let mut s = memory_session();
    let older = s.begin_template_load(GarmentType::Tshirt, GarmentView::Front).unwrap();
    let newer = s.begin_template_load(GarmentType::Hoodie, GarmentView::Side).unwrap();
    assert!(newer.generation() > older.generation());

    let img = s.source.load(older.template());
    assert_eq!(
        s.finish_template_load(older, img).unwrap(),
        TemplateLoadOutcome::Stale
    );
    assert!(!s.has_template());

    let img = s.source.load(newer.template());
    let outcome = s.finish_template_load(newer, img).unwrap();
    assert!(matches!(outcome, TemplateLoadOutcome::Applied(_)));
    assert_eq!(s.template().unwrap().garment, GarmentType::Hoodie);
}

#[test]
fn stale_failure_is_also_discarded() {
    let mut s = memory_session();
    let older = s.begin_template_load(GarmentType::Tshirt, GarmentView::Front).unwrap();
    let _newer = s.begin_template_load(GarmentType::Tshirt, GarmentView::Back).unwrap();
    let outcome = s
        .finish_template_load(older, Err(MockwearError::template_load("boom")))
        .unwrap();
    assert_eq!(outcome, TemplateLoadOutcome::Stale);
}

#[test]
fn background_thread_load_applies() {
    let mut s = memory_session();
    let ticket = s.begin_template_load(GarmentType::Polo, GarmentView::Front).unwrap();
    let pending = s.spawn_template_load(ticket).unwrap();
    assert_eq!(pending.ticket().template().garment, GarmentType::Polo);
    let (ticket, image) = pending.join();
    let outcome = s.finish_template_load(ticket, image).unwrap();
    assert!(matches!(outcome, TemplateLoadOutcome::Applied(_)));
    assert_eq!(backgrounds(&s), 1);
}

#[test]
fn failed_load_keeps_previous_background() {
    let src = MemoryTemplateSource::new().with(
        GarmentType::Tshirt,
        GarmentView::Front,
        solid(10, 10, [255, 255, 255, 255]),
    );
    let mut s =
        CanvasSession::new(small_config(), Arc::new(Catalog::builtin()), Arc::new(src)).unwrap();
    let bg = s.load_template(GarmentType::Tshirt, GarmentView::Front).unwrap();
    let err = s.load_template(GarmentType::Hoodie, GarmentView::Front).unwrap_err();
    assert!(matches!(err, MockwearError::TemplateLoad(_)));
    assert_eq!(s.background().unwrap().id(), bg);
    assert_eq!(s.template().unwrap().garment, GarmentType::Tshirt);
}

#[test]
fn invalid_config_is_rejected() {
    let cfg = SessionConfig {
        tint_alpha: 3.0,
        ..SessionConfig::default()
    };
    assert!(CanvasSession::builtin(cfg).is_err());
}
