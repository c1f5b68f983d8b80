use super::*;

#[test]
fn empty_request_gets_documented_defaults() {
    let spec = CardRequest::default().into_spec();
    assert_eq!(spec.size, CanvasSize::DEFAULT);
    assert_eq!(spec.accent, Rgb::new(0x3b, 0x82, 0xf6));
    assert_eq!(spec.dpi.get(), 300);
    assert_eq!(spec.theme, "pro-modern");
    assert!(spec.logo.is_none());
    assert_eq!(spec, CardSpec::default());
}

#[test]
fn garbage_values_fall_back_without_error() {
    let spec = CardRequest {
        size: "abc".into(),
        accent: "#zzz".into(),
        dpi: "-3".into(),
        logo: Some(b"nope".to_vec()),
        ..Default::default()
    }
    .into_spec();
    assert_eq!(spec.size, CanvasSize::DEFAULT);
    assert_eq!(spec.accent, DEFAULT_ACCENT);
    assert_eq!(spec.dpi, Dpi::DEFAULT);
    assert!(spec.logo.is_none());
}

#[test]
fn fields_are_trimmed_and_sizes_clamped() {
    let spec = CardRequest {
        name: "  Jane Doe ".into(),
        url: " https://example.com\n".into(),
        size: " 100 X 100 ".into(),
        accent: "#f00".into(),
        dpi: "600".into(),
        theme: " pro-dark ".into(),
        ..Default::default()
    }
    .into_spec();
    assert_eq!(spec.name, "Jane Doe");
    assert_eq!(spec.url, "https://example.com");
    assert_eq!((spec.size.width(), spec.size.height()), (400, 250));
    assert_eq!(spec.accent, Rgb::new(255, 0, 0));
    assert_eq!(spec.dpi.get(), 600);
    assert_eq!(spec.theme, "pro-dark");
}

#[test]
fn request_deserializes_with_missing_fields() {
    let req: CardRequest = serde_json::from_str(r#"{"name": "X", "url": "https://example.com"}"#)
        .unwrap();
    assert_eq!(req.name, "X");
    assert_eq!(req.theme, "");
    assert!(req.logo.is_none());
}
