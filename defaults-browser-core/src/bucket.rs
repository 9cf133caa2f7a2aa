use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A `Bucket` is the provenance class of a stored key.
///
/// Every key that survives reserved-key and exclusion filtering belongs to
/// [`Bucket::User`] unless it matches one of the rule lists for the other
/// buckets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Bucket {
    /// Keys written by the application itself.
    User,
    /// Keys written by the operating system or its frameworks.
    System,
    /// Keys written by the Facebook SDK.
    Facebook,
    /// Keys written by the Firebase SDK (including Performance Monitoring).
    Firebase,
}

impl Bucket {
    /// Returns the human-readable title for the bucket.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Self::User => "User",
            Self::System => "System",
            Self::Facebook => "Facebook",
            Self::Firebase => "Firebase",
        }
    }
}
