//! Archived representation of URLs.
//!
//! Stores have no URL primitive. A URL is persisted as a `Data` blob holding
//! a CBOR-encoded keyed archive, which is why it can only be recovered with
//! the store's URL accessor and never through the generic value accessor.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{InspectorError, InspectorResult};

#[derive(Debug, Serialize, Deserialize)]
struct UrlArchive {
    url: String,
}

/// Archives `url` into the blob format persisted by stores.
///
/// # Errors
///
/// Returns [`InspectorError::InvariantViolation`] if CBOR encoding fails.
pub fn archive_url(url: &Url) -> InspectorResult<Vec<u8>> {
    let archive = UrlArchive {
        url: url.as_str().to_string(),
    };
    let mut bytes = Vec::new();
    ciborium::into_writer(&archive, &mut bytes)
        .map_err(|err| InspectorError::InvariantViolation(format!("URL archive: {err}")))?;
    Ok(bytes)
}

/// Recovers a URL from an archived blob. Any other blob yields `None`.
#[must_use]
pub fn unarchive_url(bytes: &[u8]) -> Option<Url> {
    let archive: UrlArchive = ciborium::from_reader(bytes).ok()?;
    Url::parse(&archive.url).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_round_trip() {
        let url = Url::parse("https://example.com/path?q=1").unwrap();
        let bytes = archive_url(&url).unwrap();
        assert_eq!(unarchive_url(&bytes), Some(url));
    }

    #[test]
    fn test_unarchive_rejects_other_blobs() {
        assert_eq!(unarchive_url(b"{\"url\": \"https://example.com\"}"), None);
        assert_eq!(unarchive_url(&[0xDE, 0xAD]), None);
        assert_eq!(unarchive_url(&[]), None);
    }
}
