use std::fs;

use recase::{CasingSettings, Engine, ErrorCode, LanguageRegistry, QuoteCarry};

#[test]
fn settings_file_drives_the_engine() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("recase.json");
    fs::write(
        &path,
        r#"{
            "convention": "camel",
            "language": "lua",
            "ignore": ["love_*"],
            "quoteCarry": "line",
            "languages": [
                {
                    "name": "lua",
                    "keywords": ["local", "function", "end", "return"],
                    "delimiters": ["(", ")", ",", "=", "."]
                }
            ]
        }"#,
    )
    .unwrap();

    let settings = CasingSettings::load(path.to_str().unwrap()).unwrap();
    assert_eq!(settings.quote_carry(), QuoteCarry::Line);

    let engine = Engine::new(&settings, &LanguageRegistry::builtin()).unwrap();
    assert_eq!(engine.language(), "lua");

    let outcome = engine.run_content("local player_speed = love_speed(2)\nreturn player_speed\n");
    assert_eq!(outcome.reports.len(), 1);
    assert_eq!(outcome.reports[0].converted, "playerSpeed");
    assert_eq!(
        outcome.content(),
        "local playerSpeed = love_speed(2)\nreturn playerSpeed\n"
    );
}

#[test]
fn missing_settings_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let err = CasingSettings::load(path.to_str().unwrap()).unwrap_err();
    assert_eq!(err.code, ErrorCode::InternalIoError);
}

#[test]
fn malformed_settings_file_is_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"convention\": ").unwrap();

    let err = CasingSettings::load(path.to_str().unwrap()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
}

#[test]
fn settings_without_convention_cannot_build_engine() {
    let settings = CasingSettings::from_json(r#"{"language": "c"}"#, "inline").unwrap();

    let err = Engine::new(&settings, &LanguageRegistry::builtin()).unwrap_err();
    assert_eq!(err.code, ErrorCode::ConfigMissingKey);
}
