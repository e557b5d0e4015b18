use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub fullname: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserLogin {
    pub email: String,
    pub password: String,
}

impl UserLogin {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() || self.password.is_empty()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRegister {
    pub fullname: String,
    pub email: String,
    pub password: String,
}

impl UserRegister {
    /// True when any of the three fields is missing.
    pub fn is_empty(&self) -> bool {
        self.fullname.is_empty() || self.email.is_empty() || self.password.is_empty()
    }
}
