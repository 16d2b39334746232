use super::*;

#[test]
fn test_defaults() {
    let settings = DatSettings::default();
    assert!(!settings.parse.keep_extension);
    assert!(settings.parse.clean_names);
    assert!(!settings.write.ignore_blanks);
    assert!(!settings.write.game_name);
}

#[test]
fn test_partial_document_fills_defaults() {
    let settings = DatSettings::from_toml_str("[write]\nignore_blanks = true\n").unwrap();
    assert!(settings.write.ignore_blanks);
    assert!(!settings.write.game_name);
    assert_eq!(settings.parse, ParseSettings::default());

    let empty = DatSettings::from_toml_str("").unwrap();
    assert_eq!(empty, DatSettings::default());
}

#[test]
fn test_invalid_document() {
    let result = DatSettings::from_toml_str("[parse]\nclean_names = \"sometimes\"\n");
    assert!(matches!(result, Err(DatError::Settings(_))));
}

#[test]
fn test_load_missing_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let settings = DatSettings::load(dir.path().join("settings.toml")).unwrap();
    assert_eq!(settings, DatSettings::default());
}

#[test]
fn test_save_then_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("settings.toml");
    let settings = DatSettings {
        parse: ParseSettings {
            keep_extension: true,
            clean_names: false,
        },
        write: WriteSettings {
            ignore_blanks: true,
            game_name: true,
        },
    };

    settings.save(&path).unwrap();
    assert_eq!(DatSettings::load(&path).unwrap(), settings);
    assert!(!path.with_extension("toml.tmp").exists());
}

#[test]
fn test_option_conversion() {
    let settings = DatSettings::from_toml_str(
        "[parse]\nkeep_extension = true\n[write]\ngame_name = true\n",
    )
    .unwrap();

    let parse = settings.parse_options(2, 5, "roms.sfv");
    assert_eq!(parse.system_id, 2);
    assert_eq!(parse.source_id, 5);
    assert_eq!(parse.source_name, "roms.sfv");
    assert!(parse.keep_extension);
    assert!(parse.clean_names);

    let write = settings.write_options();
    assert!(write.game_name);
    assert!(!write.ignore_blanks);
}

#[test]
fn test_settings_path_location() {
    let path = settings_path();
    assert!(path.ends_with("romdat/settings.toml"));
}
