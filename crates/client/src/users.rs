use serde::{Deserialize, Serialize};

use crate::{Client, Id, Result};

#[derive(Debug, Serialize, Deserialize)]
pub struct User {
    pub id: Id,
    pub name: String,
}

impl Client {
    /// The user the access token belongs to
    pub fn me(&self) -> Result<User> {
        self.get("users/self")
    }
}
