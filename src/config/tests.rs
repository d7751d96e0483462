use super::expand::expand_user_with;
use super::load::{default_config_path, resolve_config_path};
use super::schema::*;
use crate::error::CatalogError;
use crate::testing::{EnvGuard, env_lock};
use std::collections::HashMap;
use std::path::PathBuf;

fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn expand_user_replaces_leading_tilde_with_home() {
    let p = expand_user_with("~/Music", vars(&[("HOME", "/home/u")])).unwrap();
    assert_eq!(p, PathBuf::from("/home/u/Music"));
}

#[test]
fn expand_user_falls_back_to_userprofile() {
    let p = expand_user_with("~/Music", vars(&[("USERPROFILE", "C:/Users/u")])).unwrap();
    assert_eq!(p, PathBuf::from("C:/Users/u/Music"));
}

#[test]
fn expand_user_without_home_is_a_config_error() {
    let err = expand_user_with("~/Music", vars(&[])).unwrap_err();
    assert!(matches!(err, CatalogError::Config(_)));
}

#[test]
fn expand_user_leaves_plain_paths_alone() {
    let lookup = vars(&[("HOME", "/home/u")]);
    assert_eq!(
        expand_user_with("/srv/music", &lookup).unwrap(),
        PathBuf::from("/srv/music")
    );
    // Only a leading `~/` is a shorthand.
    assert_eq!(
        expand_user_with("music/~/x", &lookup).unwrap(),
        PathBuf::from("music/~/x")
    );
    assert_eq!(expand_user_with("~", &lookup).unwrap(), PathBuf::from("~"));
}

#[test]
fn expand_user_substitutes_env_vars_first() {
    let lookup = vars(&[("HOME", "/home/u"), ("LIB", "/srv/lib"), ("SUB", "rock")]);
    assert_eq!(
        expand_user_with("$LIB/${SUB}/live", &lookup).unwrap(),
        PathBuf::from("/srv/lib/rock/live")
    );
    assert_eq!(
        expand_user_with("$UNSET/a", &lookup).unwrap(),
        PathBuf::from("/a")
    );
    assert_eq!(
        expand_user_with("/cost$/x", &lookup).unwrap(),
        PathBuf::from("/cost$/x")
    );
}

#[test]
fn expand_user_rejects_empty_input() {
    let lookup = vars(&[("HOME", "/home/u")]);
    assert!(matches!(
        expand_user_with("", &lookup),
        Err(CatalogError::Config(_))
    ));
    assert!(matches!(
        expand_user_with("$NOTHING", &lookup),
        Err(CatalogError::Config(_))
    ));
}

#[test]
fn expand_user_reads_process_environment() {
    let _lock = env_lock();
    let _g = EnvGuard::set("HOME", "/tmp/radioman-home");
    assert_eq!(
        super::expand_user("~/Music").unwrap(),
        PathBuf::from("/tmp/radioman-home/Music")
    );
}

#[test]
fn resolve_config_path_prefers_radioman_config_path() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("RADIOMAN_CONFIG_PATH", "/tmp/radioman-test-config.toml");
    assert_eq!(
        resolve_config_path().unwrap(),
        PathBuf::from("/tmp/radioman-test-config.toml")
    );
}

#[test]
fn default_config_path_prefers_xdg_config_home() {
    let _lock = env_lock();
    let _g1 = EnvGuard::set("XDG_CONFIG_HOME", "/tmp/xdg-config-home");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-should-not-win");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/xdg-config-home")
            .join("radioman")
            .join("config.toml")
    );
}

#[test]
fn default_config_path_falls_back_to_home_dot_config() {
    let _lock = env_lock();
    let _g1 = EnvGuard::remove("XDG_CONFIG_HOME");
    let _g2 = EnvGuard::set("HOME", "/tmp/home-dir");

    assert_eq!(
        default_config_path().unwrap(),
        PathBuf::from("/tmp/home-dir")
            .join(".config")
            .join("radioman")
            .join("config.toml")
    );
}

#[test]
fn defaults_match_the_conventional_layout() {
    let s = Settings::default();
    assert_eq!(s.library.refresh_interval_secs, 300);
    assert_eq!(s.radio.default_playlist, "iTunes Music");
    assert_eq!(s.bootstrap.manual_playlist, "manual");
    assert_eq!(s.bootstrap.directory_playlists.len(), 2);
    assert_eq!(s.bootstrap.playlist_roots, vec!["/playlists", "playlists"]);
    assert!(s.validate().is_ok());
}

#[test]
fn validate_rejects_zero_interval() {
    let mut s = Settings::default();
    s.library.refresh_interval_secs = 0;
    assert!(s.validate().is_err());
}

#[test]
fn settings_load_from_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[radio]
name = "Kitchen"
default_playlist = "jazz"

[library]
refresh_interval_secs = 30
follow_links = false

[bootstrap]
manual_playlist = ""
include_working_dir = false
playlist_roots = ["/srv/playlists"]
directory_playlists = [
  { name = "jazz", path = "~/Music/Jazz" },
]

[log]
filter = "radioman=debug"
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RADIOMAN_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::remove("RADIOMAN__LIBRARY__REFRESH_INTERVAL_SECS");

    let s = Settings::load().unwrap();
    assert_eq!(s.radio.name, "Kitchen");
    assert_eq!(s.radio.default_playlist, "jazz");
    assert_eq!(s.library.refresh_interval_secs, 30);
    assert!(!s.library.follow_links);
    assert_eq!(s.bootstrap.manual_playlist, "");
    assert!(!s.bootstrap.include_working_dir);
    assert_eq!(s.bootstrap.playlist_roots, vec!["/srv/playlists"]);
    assert_eq!(
        s.bootstrap.directory_playlists,
        vec![DirectoryPlaylist {
            name: "jazz".into(),
            path: "~/Music/Jazz".into(),
        }]
    );
    assert_eq!(s.log.filter, "radioman=debug");
}

#[test]
fn settings_env_overrides_config_file() {
    let _lock = env_lock();

    let dir = tempfile::tempdir().unwrap();
    let cfg_path = dir.path().join("config.toml");
    std::fs::write(
        &cfg_path,
        r#"
[library]
refresh_interval_secs = 30
"#,
    )
    .unwrap();

    let _g1 = EnvGuard::set("RADIOMAN_CONFIG_PATH", cfg_path.to_str().unwrap());
    let _g2 = EnvGuard::set("RADIOMAN__LIBRARY__REFRESH_INTERVAL_SECS", "7");

    let s = Settings::load().unwrap();
    assert_eq!(s.library.refresh_interval_secs, 7);
}
