//! API models for response payloads

use auth::{IdentifierKind, User};
use chrono::{DateTime, Utc};
use media::Image;
use serde::Serialize;
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Image as returned to its owner; the owner id stays server-side
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageView {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub size: i64,
    pub created_at: DateTime<Utc>,
}

impl From<Image> for ImageView {
    fn from(image: Image) -> Self {
        Self {
            id: image.id,
            url: image.url,
            filename: image.filename,
            size: image.size,
            created_at: image.created_at,
        }
    }
}

/// Public view of a user: `{id, <email|username>, name}`
///
/// The identifier field is named after the configured [`IdentifierKind`].
pub fn user_json(kind: IdentifierKind, id: Uuid, identifier: &str, name: Option<&str>) -> Value {
    let mut user = Map::new();
    user.insert("id".to_string(), json!(id));
    user.insert(kind.field_name().to_string(), json!(identifier));
    user.insert("name".to_string(), json!(name));
    Value::Object(user)
}

pub fn user_view(kind: IdentifierKind, user: &User) -> Value {
    user_json(kind, user.id, &user.identifier, user.name.as_deref())
}
