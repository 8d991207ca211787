//! The HTTP header contract callers enforce before decoding a request.
//!
//! Transport is not this crate's concern; these constants and
//! [`check_headers`] exist so every adapter applies the same contract.

use thiserror::Error;

pub const OPENRTB_VERSION_HEADER: &str = "x-openrtb-version";
pub const OPENRTB_VERSION: &str = "2.5";

pub const CONTENT_ENCODING_HEADER: &str = "Content-Encoding";
pub const CONTENT_ENCODING_GZIP: &str = "gzip";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    #[error("missing x-openrtb-version header")]
    MissingVersion,
    #[error("unsupported OpenRTB version '{0}', expected 2.5")]
    UnsupportedVersion(String),
    #[error("unsupported content encoding '{0}', expected gzip")]
    UnsupportedEncoding(String),
}

/// Checks the values of the version and encoding headers.
///
/// The version header is mandatory and must be exactly `2.5`. The encoding
/// header may be absent; when present it must name gzip (content codings
/// are case-insensitive).
///
/// ```rust
/// use bidcheck::openrtb::{check_headers, HeaderError};
///
/// assert!(check_headers(Some("2.5"), Some("gzip")).is_ok());
/// assert!(check_headers(Some("2.5"), None).is_ok());
/// assert_eq!(
///     check_headers(Some("2.6"), None),
///     Err(HeaderError::UnsupportedVersion("2.6".to_string()))
/// );
/// ```
pub fn check_headers(version: Option<&str>, encoding: Option<&str>) -> Result<(), HeaderError> {
    match version.map(str::trim) {
        None | Some("") => return Err(HeaderError::MissingVersion),
        Some(OPENRTB_VERSION) => {}
        Some(other) => return Err(HeaderError::UnsupportedVersion(other.to_string())),
    }

    if let Some(encoding) = encoding {
        if !encoding.trim().eq_ignore_ascii_case(CONTENT_ENCODING_GZIP) {
            return Err(HeaderError::UnsupportedEncoding(encoding.to_string()));
        }
    }

    Ok(())
}
