use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};

use crate::state::store::StoreError;

/// A record is a JSON object; the store owns its `id` field.
pub type Record = Map<String, Value>;

/// Identifier assigned by the store on create.
pub type RecordId = u64;

/// Shape of one resource kind: where it is mounted, what it requires on
/// create, and how payloads become (or patch) records.
///
/// `build` and `merge` never see or return the `id` field; the store strips
/// it from payloads and stamps it itself.
pub trait Schema: Send + Sync + 'static {
    /// Path segment the collection is served under (`/users`).
    const PATH: &'static str;

    /// Singular label used in messages ("User created").
    const LABEL: &'static str;

    /// Plural label used in list messages ("All users").
    const PLURAL: &'static str;

    /// Field that must be present and non-empty on create.
    const REQUIRED: &'static str;

    /// Message returned when `REQUIRED` is missing.
    const REQUIRED_MESSAGE: &'static str;

    /// Turn a validated create payload into a new record (without id).
    fn build(fields: Record) -> Record;

    /// Apply a partial update onto an existing record.
    fn merge(record: &mut Record, patch: Record);

    /// Example records loaded when seeding is enabled.
    fn seed() -> Vec<Record> {
        Vec::new()
    }

    fn validate(fields: &Record) -> Result<(), StoreError> {
        match fields.get(Self::REQUIRED) {
            Some(value) if is_truthy(value) => Ok(()),
            _ => Err(StoreError::Validation(Self::REQUIRED_MESSAGE.to_string())),
        }
    }
}

/// Loose truthiness: `null`, `false`, `0`, `NaN` and `""` are empty.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn object(value: Value) -> Record {
    match value {
        Value::Object(map) => map,
        _ => Record::new(),
    }
}

//
// ─────────────────────────────────────────────────────────────
//  Users: free-form records, every payload field is kept
// ─────────────────────────────────────────────────────────────
//
pub struct Users;

impl Schema for Users {
    const PATH: &'static str = "users";
    const LABEL: &'static str = "User";
    const PLURAL: &'static str = "users";
    const REQUIRED: &'static str = "name";
    const REQUIRED_MESSAGE: &'static str = "Name is required";

    fn build(fields: Record) -> Record {
        fields
    }

    fn merge(record: &mut Record, patch: Record) {
        record.extend(patch);
    }

    fn seed() -> Vec<Record> {
        vec![object(json!({ "name": "John" })), object(json!({ "name": "Emma" }))]
    }
}

//
// ─────────────────────────────────────────────────────────────
//  Tasks: { title, completed }
// ─────────────────────────────────────────────────────────────
//
pub struct Tasks;

impl Schema for Tasks {
    const PATH: &'static str = "tasks";
    const LABEL: &'static str = "Task";
    const PLURAL: &'static str = "tasks";
    const REQUIRED: &'static str = "title";
    const REQUIRED_MESSAGE: &'static str = "Title is required";

    fn build(mut fields: Record) -> Record {
        let title = fields.remove("title").unwrap_or(Value::Null);
        object(json!({ "title": title, "completed": false }))
    }

    // `completed` is always stored as a boolean.
    fn merge(record: &mut Record, mut patch: Record) {
        if let Some(completed) = patch.remove("completed") {
            record.insert("completed".to_string(), Value::Bool(is_truthy(&completed)));
        }
        record.extend(patch);
    }

    fn seed() -> Vec<Record> {
        vec![
            object(json!({ "title": "Learn Node.js", "completed": false })),
            object(json!({ "title": "Practice HTTP Server", "completed": true })),
        ]
    }
}

//
// ─────────────────────────────────────────────────────────────
//  Posts (served at /tweet): { text, createdAt }
// ─────────────────────────────────────────────────────────────
//
pub struct Posts;

impl Schema for Posts {
    const PATH: &'static str = "tweet";
    const LABEL: &'static str = "Tweet";
    const PLURAL: &'static str = "tweets";
    const REQUIRED: &'static str = "text";
    const REQUIRED_MESSAGE: &'static str = "Tweet text is required";

    fn build(mut fields: Record) -> Record {
        let text = fields.remove("text").unwrap_or(Value::Null);
        object(json!({ "text": text, "createdAt": now_iso() }))
    }

    // createdAt is fixed at creation.
    fn merge(record: &mut Record, mut patch: Record) {
        patch.remove("createdAt");
        record.extend(patch);
    }
}
