use crate::model::{Resource, ResourceKind};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use store_framework::{Filterable, StoreEntity};

/// Type-safe identifier for Users.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl From<u64> for UserId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Represents a console user as the server returns it.
///
/// # Store Framework
/// This struct implements [`StoreEntity`], so a
/// [`CollectionStore`](store_framework::CollectionStore) can mirror the `/users` collection.
/// Fields missing from a server response fall back to empty values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub password: String,
    /// Stored reference of the uploaded avatar.
    #[serde(default)]
    pub avatar: String,
}

/// Payload for creating or updating a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub avatar: String,
}

impl UserDraft {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            ..Self::default()
        }
    }
}

impl StoreEntity for User {
    type Id = UserId;
    type Draft = UserDraft;

    fn id(&self) -> &UserId {
        &self.id
    }

    fn to_draft(&self) -> UserDraft {
        UserDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            password: self.password.clone(),
            avatar: self.avatar.clone(),
        }
    }
}

impl Filterable for User {
    fn search_text(&self) -> &str {
        &self.name
    }

    fn range_value(&self) -> Option<f64> {
        None
    }
}

impl Resource for User {
    const KIND: ResourceKind = ResourceKind::Users;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default_to_empty() {
        let user: User = serde_json::from_str(r#"{"id": 3, "name": "Alice"}"#).unwrap();
        assert_eq!(user.id, UserId(3));
        assert_eq!(user.name, "Alice");
        assert!(user.email.is_empty());
        assert!(user.avatar.is_empty());
    }

    #[test]
    fn draft_serializes_without_id() {
        let draft = UserDraft::new("Alice", "alice@example.com");
        let json = serde_json::to_value(&draft).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["email"], "alice@example.com");
    }
}
