use super::*;

#[test]
fn default_duration_is_three_seconds() {
    let t = Toast::success("Color updated successfully!");
    assert_eq!(t.kind(), ToastKind::Success);
    assert_eq!(t.duration(), Duration::from_millis(3000));
    assert_eq!(t.message(), "Color updated successfully!");
    assert_eq!(ToastKind::default(), ToastKind::Info);
}

#[test]
fn expires_after_duration() {
    let start = Instant::now();
    let t = Toast::error("nope").shown_at(start);
    assert!(!t.is_expired_at(start));
    assert!(!t.is_expired_at(start + Duration::from_millis(2999)));
    assert!(t.is_expired_at(start + Duration::from_millis(3000)));

    let short = Toast::info("hi")
        .with_duration(Duration::from_millis(10))
        .shown_at(start);
    assert!(short.is_expired_at(start + Duration::from_millis(10)));
}

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&ToastKind::Error).unwrap(), "\"error\"");
    assert_eq!(ToastKind::Success.as_str(), "success");
}
