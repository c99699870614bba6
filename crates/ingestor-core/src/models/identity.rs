use std::fmt;

/// The identity that owns an uploaded image.
///
/// Used as the first segment of the storage key and recorded in the object metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwningIdentity {
    Account(String),
    ChampionFund(String),
}

impl OwningIdentity {
    pub fn id(&self) -> &str {
        match self {
            OwningIdentity::Account(id) | OwningIdentity::ChampionFund(id) => id,
        }
    }

    /// Object metadata key under which the identity is recorded.
    pub fn metadata_key(&self) -> &'static str {
        match self {
            OwningIdentity::Account(_) => "accountid",
            OwningIdentity::ChampionFund(_) => "championfundid",
        }
    }
}

impl fmt::Display for OwningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}
