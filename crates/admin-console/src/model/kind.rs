use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::{self, Display};
use store_framework::{Filterable, StoreEntity};

/// The remote collections the console manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Users,
    Products,
}

impl ResourceKind {
    /// Path segment of the collection endpoint (`/users`, `/products`).
    pub fn path(&self) -> &'static str {
        match self {
            ResourceKind::Users => "users",
            ResourceKind::Products => "products",
        }
    }

    /// Human name of one record, used in notifications.
    pub fn singular(&self) -> &'static str {
        match self {
            ResourceKind::Users => "User",
            ResourceKind::Products => "Product",
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// The remote call that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Create,
    Update,
    Delete,
    Upload,
}

impl Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Upload => "upload",
        };
        f.write_str(name)
    }
}

/// A record kind served by a JSON collection endpoint.
///
/// The id's `Display` is used verbatim as the `/{kind}/{id}` path segment, and the draft
/// is what gets sent as the JSON body of create and update calls.
pub trait Resource: StoreEntity + Filterable + Serialize + DeserializeOwned {
    const KIND: ResourceKind;
}
