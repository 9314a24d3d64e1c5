//! Session files on disk, replayed end to end.

use std::fs;

use orderfsm::{Account, State};
use orderfsm_cli::config::SessionConfig;
use orderfsm_cli::error::Error;
use orderfsm_cli::session::Session;

const SESSION: &str = r#"
events = [
    "ack",
    "placed",
    "modify-ack",
    "modified 4 20",
    "partial 5",
    "modify-ack",
    "modified-partial 5 12",
    "partial 12",
    "filled 0",
]

[account]
base = 0
quote = 1000

[order]
exchange = "deribit"
market = "btcusd"
strategy = "rebate_eater"
id = 11
price = 2
volume = 10
"#;

#[test]
fn replay_session_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(&path, SESSION).unwrap();

    let config = SessionConfig::load(&path).unwrap();
    let script = config.script().unwrap();
    let account = Account::from(config.account);
    let mut session = Session::open(config.order, &account);
    assert_eq!(account.quote(), 980);

    let outcomes = session.run(&script);
    assert_eq!(outcomes.len(), 9);
    assert!(outcomes.iter().all(|o| !o.is_refused()), "{outcomes:?}");
    assert_eq!(session.refused(), 0);
    assert_eq!(session.order().state(), State::Filled);

    // 5 bought @ 4, then 12 @ 5
    assert_eq!(account.base(), 17);
    assert_eq!(account.quote(), 1000 - 20 - 60);
}

#[test]
fn refusals_are_counted_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.toml");
    let toml = SESSION.replace("\"placed\",", "\"placed\",\n    \"expired\",");
    fs::write(&path, toml).unwrap();

    let config = SessionConfig::load(&path).unwrap();
    let account = Account::from(config.account);
    let mut session = Session::open(config.order, &account);

    let outcomes = session.run(&config.script().unwrap());
    assert!(outcomes[2].is_refused());
    assert_eq!(session.refused(), 1);
    assert_eq!(session.order().state(), State::Filled);
}

#[test]
fn missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = SessionConfig::load(&path).unwrap_err();
    match err {
        Error::ConfigRead { path: reported, .. } => assert_eq!(reported, path),
        other => panic!("expected ConfigRead, got {other}"),
    }
}

#[test]
fn bad_script_line_fails_to_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.toml");
    fs::write(&path, SESSION.replace("\"partial 12\"", "\"partial twelve\"")).unwrap();

    let err = SessionConfig::load(&path).unwrap_err();
    assert!(matches!(err, Error::Script { line: 8, .. }), "{err}");
}
