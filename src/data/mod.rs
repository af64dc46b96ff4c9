use log::info;
use serde::Serialize;
use std::env;
use std::path::{Path, PathBuf};

use crate::error::PollError;
use crate::models::{validate_polls, Poll};

/// JSON gateway for the poll collection: the text produced here is the only
/// wire format in the system, and any conforming file must import cleanly.

/// Default path for export/import, from the environment or a fixed name.
pub fn default_data_file() -> PathBuf {
    env::var("POLLS_FILE")
        .unwrap_or_else(|_| "group_polls_data.json".to_string())
        .into()
}

/// Renders the full collection as a JSON array in store order, indented
/// with four spaces. Key order is fixed (struct field order, option labels
/// sorted), so the same state always produces byte-identical text.
pub fn export_polls(polls: &[Poll]) -> Result<String, PollError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    polls.serialize(&mut serializer).map_err(PollError::Format)?;
    Ok(String::from_utf8(buf).expect("serde_json writes valid UTF-8"))
}

/// Parses an uploaded payload back into polls without touching any store.
///
/// Two phases keep import atomic for the caller: a parse failure is a
/// `Format` error, a parsed-but-wrong-shape payload (missing fields, wrong
/// types, negative counts, duplicate ids) is a `Validation` error, and only
/// a fully valid result is worth passing to `PollStore::replace_all`.
pub fn import_polls(text: &str) -> Result<Vec<Poll>, PollError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(PollError::Format)?;
    let polls: Vec<Poll> = serde_json::from_value(value)
        .map_err(|err| PollError::Validation(format!("payload does not match the poll schema: {err}")))?;
    validate_polls(&polls)?;
    Ok(polls)
}

pub async fn save_to_file(path: &Path, polls: &[Poll]) -> Result<(), PollError> {
    let text = export_polls(polls)?;
    tokio::fs::write(path, text).await?;
    info!("Exported {} poll(s) to {}", polls.len(), path.display());
    Ok(())
}

pub async fn load_from_file(path: &Path) -> Result<Vec<Poll>, PollError> {
    let text = tokio::fs::read_to_string(path).await?;
    let polls = import_polls(&text)?;
    info!("Imported {} poll(s) from {}", polls.len(), path.display());
    Ok(polls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::PollStore;

    fn labels(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn export_import_round_trip_preserves_everything() {
        let mut store = PollStore::new();
        store.create_poll("Lunch?", &labels(&["Pizza", "Tacos"])).unwrap();
        store.create_poll("Movie night?", &labels(&["Yes", "No"])).unwrap();
        store.cast_vote(1, "Pizza").unwrap();
        store.cast_vote(2, "No").unwrap();

        let original = store.list_polls().to_vec();
        let text = export_polls(store.list_polls()).unwrap();
        let imported = import_polls(&text).unwrap();
        store.replace_all(imported).unwrap();

        assert_eq!(store.list_polls(), &original[..]);
    }

    #[test]
    fn export_is_byte_stable() {
        let mut store = PollStore::new();
        store.create_poll("Lunch?", &labels(&["Pizza", "Tacos"])).unwrap();
        let first = export_polls(store.list_polls()).unwrap();
        let second = export_polls(store.list_polls()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn import_rejects_non_json() {
        let err = import_polls("not json").unwrap_err();
        assert!(matches!(err, PollError::Format(_)));
    }

    #[test]
    fn import_rejects_missing_fields() {
        let err = import_polls(r#"[{"id":1}]"#).unwrap_err();
        assert!(matches!(err, PollError::Validation(_)));
    }

    #[test]
    fn import_rejects_negative_counts() {
        let payload = r#"[{"id":1,"title":"T","options":{"A":-1},"status":"Open"}]"#;
        let err = import_polls(payload).unwrap_err();
        assert!(matches!(err, PollError::Validation(_)));
    }

    #[test]
    fn import_rejects_unknown_status() {
        let payload = r#"[{"id":1,"title":"T","options":{"A":0},"status":"Paused"}]"#;
        let err = import_polls(payload).unwrap_err();
        assert!(matches!(err, PollError::Validation(_)));
    }

    #[test]
    fn import_rejects_duplicate_ids() {
        let payload = r#"[
            {"id":1,"title":"A","options":{"x":0},"status":"Open"},
            {"id":1,"title":"B","options":{"y":0},"status":"Closed"}
        ]"#;
        let err = import_polls(payload).unwrap_err();
        assert!(matches!(err, PollError::Validation(_)));
    }

    #[test]
    fn import_accepts_closed_status() {
        let payload = r#"[{"id":1,"title":"T","options":{"A":3},"status":"Closed"}]"#;
        let polls = import_polls(payload).unwrap();
        assert_eq!(polls[0].options["A"], 3);
    }

    #[tokio::test]
    async fn save_and_load_round_trip() {
        let mut store = PollStore::new();
        store.create_poll("Lunch?", &labels(&["Pizza", "Tacos"])).unwrap();
        store.cast_vote(1, "Pizza").unwrap();

        let path = std::env::temp_dir().join("group_vote_save_load_test.json");
        save_to_file(&path, store.list_polls()).await.unwrap();
        let polls = load_from_file(&path).await.unwrap();
        assert_eq!(polls, store.list_polls());
        let _ = tokio::fs::remove_file(&path).await;
    }

    // The end-to-end scenario: create with a duplicate label, vote, export.
    #[test]
    fn lunch_scenario_exports_expected_json() {
        let mut store = PollStore::new();
        store
            .create_poll("Lunch?", &labels(&["Pizza", "Tacos", "Pizza"]))
            .unwrap();
        store.cast_vote(1, "Pizza").unwrap();
        store.cast_vote(1, "Pizza").unwrap();
        store.cast_vote(1, "Tacos").unwrap();

        let text = export_polls(store.list_polls()).unwrap();
        let expected = r#"[
    {
        "id": 1,
        "title": "Lunch?",
        "options": {
            "Pizza": 2,
            "Tacos": 1
        },
        "status": "Open"
    }
]"#;
        assert_eq!(text, expected);
    }
}
