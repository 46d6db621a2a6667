use tasteshift_store::{DbRuntimeSettings, PreferenceStore};
use tasteshift_types::ThemeId;

#[test]
fn preferences_survive_reopen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("prefs.db");
    let path = path.to_str().expect("utf-8 path");

    {
        let store = PreferenceStore::open(path, DbRuntimeSettings::default()).expect("open");
        store.set_theme(ThemeId::Brooklyn).expect("set theme");
        store.set_speech_api_key("sk-live").expect("set key");
    }

    let store = PreferenceStore::open(path, DbRuntimeSettings::default()).expect("reopen");
    assert_eq!(store.theme().unwrap(), Some(ThemeId::Brooklyn));
    assert_eq!(store.speech_api_key().unwrap().as_deref(), Some("sk-live"));
    assert_eq!(store.lookup_url().unwrap(), None);
}

#[test]
fn file_database_uses_wal() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("wal.db");
    let pool = tasteshift_store::create_pool(
        path.to_str().expect("utf-8 path"),
        DbRuntimeSettings::default(),
    )
    .expect("pool");
    let conn = pool.get().expect("connection");
    let mode: String = conn
        .query_row("PRAGMA journal_mode;", [], |row| row.get(0))
        .expect("journal mode");
    assert_eq!(mode, "wal");
}
