use serde::{Deserialize, Serialize};

/// Merchant identity, set once per receipt.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    mid: String,
    name: String,
    address: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    website: String,
}

impl Store {
    pub fn new(
        mid: impl Into<String>,
        name: impl Into<String>,
        address: impl Into<String>,
        email: impl Into<String>,
        website: impl Into<String>,
    ) -> Self {
        Self {
            mid: mid.into(),
            name: name.into(),
            address: address.into(),
            email: email.into(),
            website: website.into(),
        }
    }

    /// Merchant id.
    pub fn mid(&self) -> &str {
        &self.mid
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn website(&self) -> &str {
        &self.website
    }
}
