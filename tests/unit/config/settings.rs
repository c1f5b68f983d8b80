use super::*;

#[test]
fn env_dirs_come_first_then_local_fonts() {
    let env = std::env::join_paths(["/opt/a", "/opt/b"]).unwrap();
    let dirs = font_dirs_from(Some(env), None);
    assert_eq!(dirs[0], PathBuf::from("/opt/a"));
    assert_eq!(dirs[1], PathBuf::from("/opt/b"));
    assert_eq!(dirs[2], PathBuf::from("fonts"));
    assert!(dirs.len() > 3);
}

#[test]
fn without_env_local_fonts_lead() {
    let dirs = font_dirs_from(None, Some(PathBuf::from("/home/someone")));
    assert_eq!(dirs[0], PathBuf::from("fonts"));
    assert!(dirs.iter().any(|d| d.starts_with("/home/someone")));
}

#[test]
fn empty_json_takes_defaults() {
    let cfg = RenderConfig::from_json("{}").unwrap();
    assert_eq!(cfg, RenderConfig::default());
    assert!(cfg.load_themes().unwrap().is_none());
}

#[test]
fn explicit_fields_are_kept() {
    let cfg = RenderConfig::from_json(r#"{"font_dirs": ["/srv/fonts"], "themes": "themes.json"}"#)
        .unwrap();
    assert_eq!(cfg.font_dirs, vec![PathBuf::from("/srv/fonts")]);
    assert_eq!(cfg.themes, Some(PathBuf::from("themes.json")));
}

#[test]
fn unknown_fields_are_rejected() {
    let err = RenderConfig::from_json(r#"{"font_dir": []}"#).unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}

#[test]
fn configured_catalog_is_loaded() {
    let path = std::env::temp_dir().join(format!("cardsmith-themes-{}.json", std::process::id()));
    std::fs::write(&path, ThemeRegistry::builtin().to_json().unwrap()).unwrap();
    let cfg = RenderConfig {
        font_dirs: Vec::new(),
        themes: Some(path.clone()),
    };
    let registry = cfg.load_themes().unwrap().unwrap();
    assert_eq!(registry.len(), 12);
    std::fs::remove_file(&path).unwrap();

    assert!(cfg.load_themes().is_err());
}
