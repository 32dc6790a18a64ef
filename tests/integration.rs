// SPDX-License-Identifier: MPL-2.0
use stream_player::config::{self, Config, DEFAULT_TOAST_DURATION_MS};
use stream_player::i18n::fluent::I18n;
use stream_player::ui::notifications::Notification;
use tempfile::tempdir;

#[test]
fn language_change_via_config() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");

    let mut english = Config::default();
    english.general.language = Some("en-US".to_string());
    config::save_to_path(&english, &path).expect("Failed to write initial config file");

    let loaded = config::load_from_path(&path).expect("Failed to load initial config");
    let i18n_en = I18n::new(None, &loaded);
    assert_eq!(i18n_en.current_locale().to_string(), "en-US");

    let mut spanish = Config::default();
    spanish.general.language = Some("es".to_string());
    config::save_to_path(&spanish, &path).expect("Failed to write spanish config file");

    let loaded = config::load_from_path(&path).expect("Failed to load spanish config");
    let i18n_es = I18n::new(None, &loaded);
    assert_eq!(i18n_es.current_locale().to_string(), "es");
    assert_eq!(
        i18n_es.notification_text(&Notification::error("notification-session-expired")),
        i18n_es.tr("notification-session-expired")
    );
    assert_ne!(
        i18n_es.tr("notification-session-expired"),
        i18n_en.tr("notification-session-expired")
    );
}

#[test]
fn cli_language_overrides_config() {
    let mut config = Config::default();
    config.general.language = Some("es".to_string());
    let i18n = I18n::new(Some("en-US".to_string()), &config);
    assert_eq!(i18n.current_locale().to_string(), "en-US");
}

#[test]
fn partial_settings_file_keeps_defaults() {
    let dir = tempdir().expect("Failed to create temporary directory");
    let path = dir.path().join("settings.toml");
    std::fs::write(&path, "[player]\ndefault_quality = \"480p\"\nvolume = 0.5\n")
        .expect("Failed to write settings");

    let loaded = config::load_from_path(&path).expect("Failed to load settings");
    assert_eq!(loaded.player.default_quality, "480p");
    assert_eq!(loaded.player.volume, Some(0.5));
    assert_eq!(
        loaded.notifications.toast_duration_ms,
        Some(DEFAULT_TOAST_DURATION_MS)
    );
    assert_eq!(loaded.preview, Config::default().preview);
}

#[test]
fn broken_settings_file_falls_back_with_warning() {
    let dir = tempdir().expect("Failed to create temporary directory");
    std::fs::write(dir.path().join("settings.toml"), "[player\nvolume = ")
        .expect("Failed to write settings");

    let (loaded, warning) = config::load_with_override(Some(dir.path().to_path_buf()));
    assert_eq!(loaded, Config::default());
    assert_eq!(warning.as_deref(), Some("notification-config-load-error"));
}
