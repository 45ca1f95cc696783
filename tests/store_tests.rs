use ctfcred::core::credential::{Credential, CredentialFields, IMPORT_MARKER};
use ctfcred::core::defaults::Defaults;
use ctfcred::core::error::VaultError;
use ctfcred::core::set::CredentialSet;
use ctfcred::filesystem::store::FileByteStore;
use ctfcred::vault::codec::YamlCodec;
use ctfcred::vault::service::CredentialStore;
use ctfcred::vault::transfer::import_usernames;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn file_store(path: &Path, backups: usize) -> CredentialStore {
    CredentialStore::new(
        Arc::new(FileByteStore::new_with_backups(path.to_path_buf(), backups)),
        Arc::new(YamlCodec),
    )
}

fn sample_set() -> CredentialSet {
    [
        Credential::new(
            CredentialFields {
                username: Some("tony".into()),
                password: Some("tonyPassword".into()),
                otp_secret: Some("OTPO".into()),
                url: Some("https://example.com".into()),
                domain: Some("example.com".into()),
                note: Some("this is tony".into()),
                ..Default::default()
            },
            1_700_000_000,
            None,
        ),
        Credential::new(
            CredentialFields {
                username: Some("timmy".into()),
                alias: Some("tim (admin)".into()),
                ..Default::default()
            },
            1_700_000_100,
            None,
        ),
    ]
    .into_iter()
    .collect()
}

#[test]
fn save_then_load_reproduces_the_set() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    let store = file_store(&path, 0);
    let set = sample_set();
    let defaults = Defaults::new(Some("https://ctf.local".into()), Some("corp".into()));

    store.save(&set, &defaults).unwrap();
    let mut loaded_defaults = Defaults::default();
    let loaded = store.load(&mut loaded_defaults).unwrap();

    assert_eq!(loaded, set);
    assert_eq!(loaded_defaults, defaults);
    let tony = loaded.get(1).unwrap();
    assert_eq!(tony.username.as_deref(), Some("tony"));
    assert_eq!(tony.otp_str(), Some("OTPO"));
    assert_eq!(tony.created_at, 1_700_000_000);
    assert!(tony.note_is_custom);
    let timmy = loaded.get(2).unwrap();
    assert_eq!(timmy.display_name(), "tim (admin)");
    assert!(!timmy.note_is_custom);
}

#[test]
fn first_load_creates_an_empty_private_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join(".ctfcred.yml");
    let store = file_store(&path, 0);

    let loaded = store.load(&mut Defaults::default()).unwrap();

    assert!(loaded.is_empty());
    assert!(path.is_file());
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }
}

#[test]
fn persisted_file_uses_the_documented_layout() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    file_store(&path, 0)
        .save(&sample_set(), &Defaults::default())
        .unwrap();

    let text = fs::read_to_string(&path).unwrap();
    for key in [
        "credentials:",
        "username: tony",
        "password: tonyPassword",
        "otp: OTPO",
        "custom_note: true",
        "timestamp: 1700000000",
        "alias: null",
        "default_url: null",
        "default_domain: null",
    ] {
        assert!(text.contains(key), "missing `{key}` in:\n{text}");
    }
}

#[test]
fn record_without_a_required_key_is_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    fs::write(
        &path,
        "credentials:\n- username: a\n  password: null\n  otp: null\n  note: null\n  custom_note: null\n  url: null\n  domain: null\n  timestamp: 0\n",
    )
    .unwrap();

    let err = file_store(&path, 0)
        .load(&mut Defaults::default())
        .unwrap_err();

    assert_eq!(
        err.downcast_ref::<VaultError>(),
        Some(&VaultError::MissingField("alias".into()))
    );
}

#[test]
fn garbage_file_is_malformed_storage() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    fs::write(&path, "credentials: [unterminated\n").unwrap();

    let err = file_store(&path, 0)
        .load(&mut Defaults::default())
        .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<VaultError>(),
        Some(VaultError::MalformedStorage(_))
    ));
}

#[test]
fn merge_skips_credentials_already_present() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    let store = file_store(&path, 0);

    let first = store
        .merge_into(import_usernames(["alice/bob\n", "carol\n"], true))
        .unwrap();
    let second = store
        .merge_into(import_usernames(["carol\n", "dave\n"], false))
        .unwrap();

    assert_eq!(first, 2);
    assert_eq!(second, 1);
    let loaded = store.load(&mut Defaults::default()).unwrap();
    assert_eq!(loaded.len(), 3);
    assert!(loaded.iter().all(|c| c.note == IMPORT_MARKER));
    assert_eq!(loaded.get(1).unwrap().domain.as_deref(), Some("alice"));
}

#[test]
fn merge_keeps_the_stored_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    let store = file_store(&path, 0);
    store
        .save(
            &sample_set(),
            &Defaults::new(None, Some("stored.org".into())),
        )
        .unwrap();

    store
        .merge_into(import_usernames(["eve\n"], false))
        .unwrap();

    let mut defaults = Defaults::default();
    store.load(&mut defaults).unwrap();
    assert_eq!(defaults, Defaults::new(None, Some("stored.org".into())));
}

#[test]
fn backups_rotate_on_save() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(".ctfcred.yml");
    let store = file_store(&path, 2);
    let set = sample_set();

    store.save(&set, &Defaults::default()).unwrap();
    store.save(&set, &Defaults::default()).unwrap();
    store.save(&set, &Defaults::default()).unwrap();

    assert!(dir.path().join(".ctfcred.yml.1").is_file());
    assert!(dir.path().join(".ctfcred.yml.2").is_file());
    assert!(!dir.path().join(".ctfcred.yml.3").exists());
}
