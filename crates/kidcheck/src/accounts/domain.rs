use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::password::PasswordHash;

/// Identifier wrapper for registered accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub String);

/// Free-form account tag. Known values get their own variant; anything else passes through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AccountKind {
    Parent,
    Staff,
    Other(String),
}

impl AccountKind {
    pub fn as_str(&self) -> &str {
        match self {
            AccountKind::Parent => "parent",
            AccountKind::Staff => "staff",
            AccountKind::Other(value) => value,
        }
    }
}

impl From<String> for AccountKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "parent" => AccountKind::Parent,
            "staff" => AccountKind::Staff,
            _ => AccountKind::Other(value),
        }
    }
}

impl From<&str> for AccountKind {
    fn from(value: &str) -> Self {
        AccountKind::from(value.to_string())
    }
}

impl From<AccountKind> for String {
    fn from(value: AccountKind) -> Self {
        match value {
            AccountKind::Other(value) => value,
            known => known.as_str().to_string(),
        }
    }
}

/// Registration input accepted by [`super::AccountDirectory::register`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub child_name: String,
    pub kind: AccountKind,
}

/// Stored account. Never mutated after registration.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub(crate) password: PasswordHash,
    pub child_name: String,
    pub kind: AccountKind,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn verify_password(&self, candidate: &str) -> bool {
        self.password.verify(candidate)
    }

    /// Caller-facing view with the credential removed.
    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            id: self.id.clone(),
            name: self.name.clone(),
            email: self.email.clone(),
            child_name: self.child_name.clone(),
            user_type: self.kind.clone(),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountProfile {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub child_name: String,
    pub user_type: AccountKind,
    pub created_at: DateTime<Utc>,
}
