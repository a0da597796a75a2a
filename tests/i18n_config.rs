use refrigeration_diagnostic_toolbox::config::{self, Config};
use refrigeration_diagnostic_toolbox::diagnosis::ValidationMode;
use refrigeration_diagnostic_toolbox::i18n::{keys, parse_toml_to_map, resolve_language, Translator};
use refrigeration_diagnostic_toolbox::refrigeration::{FaultPatternKey, Severity};

#[test]
fn translator_picks_language_tables() {
    let ko = Translator::new("ko");
    let en = Translator::new("en-US");
    assert_eq!(ko.t(keys::MAIN_MENU_EXIT), "0) 종료");
    assert_eq!(en.t(keys::MAIN_MENU_EXIT), "0) Exit");
    assert_eq!(ko.severity(Severity::Critical), "위험");
    assert_eq!(en.severity(Severity::Critical), "Critical");
    assert_eq!(ko.pattern_name(FaultPatternKey::LowLow), FaultPatternKey::LowLow.name());
    // 알 수 없는 코드는 ko
    assert_eq!(Translator::new("fr").language_code(), "ko");
}

#[test]
fn explicit_language_beats_config() {
    assert_eq!(resolve_language("en", Some("ko")), "en");
    assert_eq!(resolve_language("auto", Some("ko")), "ko");
}

#[test]
fn language_pack_flattens_tables() {
    let map = parse_toml_to_map(
        r#"
        [main_menu]
        exit = "0) Quit"
        [general]
        error_prefix = "Oops"
        "#,
    )
    .expect("pack");
    assert_eq!(map.get("main_menu.exit").map(String::as_str), Some("0) Quit"));
    assert_eq!(map.get(keys::ERROR_PREFIX).map(String::as_str), Some("Oops"));
    assert!(parse_toml_to_map("number = 1").is_none());
}

#[test]
fn config_created_then_reloaded() {
    let dir = std::env::temp_dir().join(format!("rdt_config_{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("config.toml");
    let _ = std::fs::remove_file(&path);

    let mut cfg = config::load_from(&path).expect("create default");
    assert!(path.exists());
    assert_eq!(cfg.default_refrigerant, Config::default().default_refrigerant);
    assert_eq!(cfg.validation, ValidationMode::Lenient);

    cfg.validation = ValidationMode::Strict;
    cfg.default_ambient_c = 35.0;
    cfg.save().expect("save");

    let reloaded = config::load_from(&path).expect("reload");
    assert_eq!(reloaded.validation, ValidationMode::Strict);
    assert_eq!(reloaded.default_ambient_c, 35.0);

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn partial_config_fills_defaults() {
    let cfg: Config = toml::from_str("default_refrigerant = \"R-404A\"").expect("partial");
    assert_eq!(cfg.default_refrigerant, "R-404A");
    assert_eq!(cfg.default_ambient_c, 30.0);
    assert_eq!(cfg.report_dir, ".");
}
