use super::*;

#[test]
fn parses_hex_forms() {
    assert_eq!(HexColor::parse("#ff0000").unwrap(), HexColor::rgb(255, 0, 0));
    assert_eq!(HexColor::parse("228B22").unwrap(), HexColor::rgb(0x22, 0x8b, 0x22));
    assert_eq!(HexColor::parse("#fff").unwrap(), HexColor::WHITE);
    let c = HexColor::parse("#0000ff80").unwrap();
    assert_eq!(c.a, 128);
    assert_eq!(c.to_string(), "#0000ff80");
}

#[test]
fn rejects_malformed_hex() {
    assert!(HexColor::parse("#12345").is_err());
    assert!(HexColor::parse("#gg0000").is_err());
    assert!(HexColor::parse("#ééé").is_err());
    assert!(matches!(
        HexColor::parse("nope"),
        Err(MockwearError::Color(_))
    ));
}

#[test]
fn serde_uses_hex_strings() {
    let opt = ColorOption::new("Navy", HexColor::rgb(0, 0, 0x80));
    let json = serde_json::to_value(&opt).unwrap();
    assert_eq!(json, serde_json::json!({"name": "Navy", "value": "#000080"}));
    let back: ColorOption = serde_json::from_value(json).unwrap();
    assert_eq!(back, opt);
}

#[test]
fn premul_of_opaque_is_identity() {
    let c = HexColor::rgb(0x80, 0x00, 0x20).to_premul();
    assert_eq!(c.to_array(), [0x80, 0x00, 0x20, 0xff]);
}
