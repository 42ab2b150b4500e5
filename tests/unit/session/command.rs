use super::*;
use crate::assets::{MemoryTemplateSource, PreparedImage};
use crate::catalog::Catalog;
use crate::foundation::core::Canvas;
use crate::session::config::SessionConfig;
use std::sync::Arc;

fn session() -> CanvasSession {
    let data = vec![255u8; 30 * 30 * 4];
    let src = MemoryTemplateSource::new().with(
        GarmentType::Tshirt,
        GarmentView::Front,
        PreparedImage::from_premul(30, 30, data).unwrap(),
    );
    let cfg = SessionConfig {
        canvas: Canvas::new(120, 90).unwrap(),
        ..SessionConfig::default()
    };
    CanvasSession::new(cfg, Arc::new(Catalog::builtin()), Arc::new(src)).unwrap()
}

fn png(w: u32, h: u32) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(w, h, image::Rgba([10, 20, 30, 255]));
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

#[test]
fn commands_drive_a_full_session() {
    let mut s = session();
    assert_eq!(
        s.apply(SessionCommand::Export).unwrap(),
        CommandOutcome::Exported(None)
    );

    let bg = s
        .apply(SessionCommand::LoadTemplate {
            garment: GarmentType::Tshirt,
            view: GarmentView::Front,
        })
        .unwrap();
    assert!(matches!(bg, CommandOutcome::Object(_)));

    s.apply(SessionCommand::SetTint(HexColor::rgb(0xff, 0, 0))).unwrap();
    let CommandOutcome::Object(id) = s
        .apply(SessionCommand::AddImage(DesignUpload::new("logo.png", png(10, 10))))
        .unwrap()
    else {
        panic!("expected object");
    };
    assert_eq!(s.selection(), Some(id));

    assert_eq!(
        s.apply(SessionCommand::RotateSelection(45.0)).unwrap(),
        CommandOutcome::Done
    );
    s.apply(SessionCommand::ScaleSelection(1.1)).unwrap();
    s.apply(SessionCommand::MoveSelection(Vec2::new(3.0, -2.0))).unwrap();
    let p = s.scene().get(id).unwrap().placement();
    assert_eq!(p.angle_deg, 45.0);
    assert_eq!(p.center, Point::new(63.0, 43.0));

    let CommandOutcome::Exported(Some(mockup)) = s.apply(SessionCommand::Export).unwrap() else {
        panic!("expected export");
    };
    assert_eq!((mockup.width, mockup.height), (120, 90));

    assert_eq!(
        s.apply(SessionCommand::DeleteSelection).unwrap(),
        CommandOutcome::Object(id)
    );
    assert_eq!(
        s.apply(SessionCommand::DeleteSelection).unwrap(),
        CommandOutcome::NoSelection
    );
    assert_eq!(
        s.apply(SessionCommand::RotateSelection(90.0)).unwrap(),
        CommandOutcome::NoSelection
    );
}

#[test]
fn select_commands_and_replace() {
    let mut s = session();
    let CommandOutcome::Object(a) = s
        .apply(SessionCommand::AddImage(DesignUpload::new("a.png", png(20, 20))))
        .unwrap()
    else {
        panic!("expected object");
    };
    s.apply(SessionCommand::ClearSelection).unwrap();
    assert_eq!(s.selection(), None);
    assert_eq!(
        s.apply(SessionCommand::SelectAt(Point::new(60.0, 45.0))).unwrap(),
        CommandOutcome::Object(a)
    );
    assert_eq!(
        s.apply(SessionCommand::SelectAt(Point::new(-500.0, -500.0))).unwrap(),
        CommandOutcome::NoSelection
    );
    s.apply(SessionCommand::Select(a)).unwrap();

    let CommandOutcome::Object(b) = s
        .apply(SessionCommand::ReplaceImage {
            old: a,
            upload: DesignUpload::new("b.png", png(20, 20)),
        })
        .unwrap()
    else {
        panic!("expected object");
    };
    assert_ne!(a, b);
    assert_eq!(s.scene().designs().count(), 1);
    assert_eq!(s.scene().get(b).unwrap().label(), Some("b.png"));
}

#[test]
fn failing_command_reports_typed_error() {
    let mut s = session();
    let err = s
        .apply(SessionCommand::LoadTemplate {
            garment: GarmentType::Hoodie,
            view: GarmentView::Side,
        })
        .unwrap_err();
    assert!(matches!(err, crate::MockwearError::TemplateLoad(_)));
    assert!(s.apply(SessionCommand::Select(ObjectId(999))).is_err());
}
