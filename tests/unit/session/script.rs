use super::*;
use crate::session::config::SessionConfig;

fn write_png(path: &Path, w: u32, h: u32) {
    image::RgbaImage::from_pixel(w, h, image::Rgba([200, 10, 10, 255]))
        .save(path)
        .unwrap();
}

#[test]
fn parses_tagged_steps() {
    let script = Script::from_reader(
        r##"[
            {"op": "load_template", "garment": "hoodie"},
            {"op": "tint", "color": "#000080"},
            {"op": "add_image", "path": "logo.png"},
            {"op": "rotate", "degrees": 90},
            {"op": "zoom_in"},
            {"op": "move", "dx": 10, "dy": -5},
            {"op": "export", "path": "out/mockup.png"}
        ]"##
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(script.steps.len(), 7);
    assert_eq!(
        script.steps[0],
        ScriptStep::LoadTemplate {
            garment: GarmentType::Hoodie,
            view: GarmentView::Front
        }
    );
    assert_eq!(
        script.steps[1],
        ScriptStep::Tint {
            color: HexColor::rgb(0, 0, 0x80)
        }
    );
    assert_eq!(script.steps[4].op(), "zoom_in");

    assert!(matches!(
        Script::from_reader(r#"[{"op": "explode"}]"#.as_bytes()),
        Err(MockwearError::Serde(_))
    ));
}

#[test]
fn configured_steps_resolve_against_config() {
    let cfg = SessionConfig {
        rotate_step_deg: 45.0,
        ..SessionConfig::default()
    };
    let dir = Path::new(".");
    assert_eq!(
        ScriptStep::RotateStep.to_command(&cfg, dir).unwrap(),
        SessionCommand::RotateSelection(45.0)
    );
    assert_eq!(
        ScriptStep::ZoomOut.to_command(&cfg, dir).unwrap(),
        SessionCommand::ScaleSelection(0.9)
    );
    assert!(matches!(
        ScriptStep::AddImage {
            path: PathBuf::from("does-not-exist.png")
        }
        .to_command(&cfg, dir),
        Err(MockwearError::Upload(_))
    ));
}

#[test]
fn runs_script_and_writes_export() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("logo.png"), 64, 64);

    let script = Script {
        steps: vec![
            ScriptStep::LoadTemplate {
                garment: GarmentType::Tshirt,
                view: GarmentView::Front,
            },
            ScriptStep::Tint {
                color: HexColor::BLACK,
            },
            ScriptStep::AddImage {
                path: PathBuf::from("logo.png"),
            },
            ScriptStep::RotateStep,
            ScriptStep::Export {
                path: Some(PathBuf::from("out/mockup.png")),
            },
        ],
    };
    let mut session = CanvasSession::builtin(SessionConfig::default()).unwrap();
    let mockup = run_script(&mut session, &script, dir.path()).unwrap().unwrap();
    assert_eq!((mockup.width, mockup.height), (800, 600));

    let written = std::fs::read(dir.path().join("out/mockup.png")).unwrap();
    assert_eq!(written, mockup.png);
}

#[test]
fn script_without_template_exports_nothing() {
    let script = Script {
        steps: vec![ScriptStep::Export { path: None }],
    };
    let mut session = CanvasSession::builtin(SessionConfig::default()).unwrap();
    assert_eq!(run_script(&mut session, &script, Path::new(".")).unwrap(), None);
}
