//! Shared-image link parsing.
//!
//! Profile images are hosted on Google Drive and pasted as share links. The
//! accepted shapes are:
//! - `https://drive.google.com/file/d/<id>` optionally followed by `/view` or
//!   `/preview` and any query string;
//! - `https://drive.google.com/open?id=<id>`;
//! - `https://drive.google.com/uc?id=<id>` (with or without `export=view`).

use thiserror::Error;
use url::Url;

const DRIVE_HOST: &str = "drive.google.com";

/// Reasons a value is not a recognised shared-image link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkShapeError {
    /// The value was empty once trimmed.
    #[error("link must not be empty")]
    Empty,
    /// The value is not an absolute URL.
    #[error("link is not a valid URL")]
    Malformed,
    /// The URL does not use `https`.
    #[error("link must use https, found {scheme}")]
    UnsupportedScheme {
        /// Scheme found in the URL.
        scheme: String,
    },
    /// The URL is not hosted on the shared drive.
    #[error("link must point to drive.google.com, found {host}")]
    UnsupportedHost {
        /// Host found in the URL, empty when absent.
        host: String,
    },
    /// The path or query does not carry a file identifier.
    #[error("link does not identify a shared file")]
    MissingFileId,
    /// The file identifier contains characters outside `[A-Za-z0-9_-]`.
    #[error("shared file identifier is malformed")]
    InvalidFileId,
}

/// A validated shared-image link reduced to its file identifier.
///
/// # Examples
/// ```
/// use field_rules::SharedImageLink;
///
/// let link = SharedImageLink::parse(
///     "https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing",
/// )
/// .unwrap();
/// assert_eq!(link.file_id(), "1AbC_d-9");
/// assert_eq!(
///     link.direct_url(),
///     "https://drive.google.com/uc?export=view&id=1AbC_d-9"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedImageLink {
    file_id: String,
}

impl SharedImageLink {
    /// Parse a pasted share link.
    ///
    /// # Errors
    /// Returns a [`LinkShapeError`] describing the first shape violation.
    pub fn parse(raw: &str) -> Result<Self, LinkShapeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(LinkShapeError::Empty);
        }

        let url = Url::parse(trimmed).map_err(|_| LinkShapeError::Malformed)?;
        if url.scheme() != "https" {
            return Err(LinkShapeError::UnsupportedScheme {
                scheme: url.scheme().to_owned(),
            });
        }

        let host = url.host_str().unwrap_or_default();
        if host != DRIVE_HOST {
            return Err(LinkShapeError::UnsupportedHost {
                host: host.to_owned(),
            });
        }

        let file_id = Self::file_id_from(&url).ok_or(LinkShapeError::MissingFileId)?;
        if !file_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(LinkShapeError::InvalidFileId);
        }

        Ok(Self { file_id })
    }

    fn file_id_from(url: &Url) -> Option<String> {
        let segments: Vec<&str> = url
            .path_segments()
            .map(|segments| segments.filter(|s| !s.is_empty()).collect())
            .unwrap_or_default();

        match segments.as_slice() {
            ["file", "d", id] | ["file", "d", id, "view" | "preview"] => Some((*id).to_owned()),
            ["open" | "uc"] => url
                .query_pairs()
                .find(|(key, _)| key == "id")
                .map(|(_, value)| value.into_owned())
                .filter(|id| !id.is_empty()),
            _ => None,
        }
    }

    /// Shared file identifier.
    #[must_use]
    pub fn file_id(&self) -> &str {
        self.file_id.as_str()
    }

    /// Direct-view URL suitable for an image source.
    #[must_use]
    pub fn direct_url(&self) -> String {
        format!("https://{DRIVE_HOST}/uc?export=view&id={}", self.file_id)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for link shape parsing.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("https://drive.google.com/file/d/1AbC_d-9/view?usp=sharing", "1AbC_d-9")]
    #[case("https://drive.google.com/file/d/1AbC_d-9", "1AbC_d-9")]
    #[case("https://drive.google.com/file/d/1AbC_d-9/preview", "1AbC_d-9")]
    #[case("https://drive.google.com/open?id=xyz123", "xyz123")]
    #[case("https://drive.google.com/uc?export=view&id=xyz123", "xyz123")]
    #[case("  https://drive.google.com/file/d/abc/view  ", "abc")]
    fn accepts_drive_share_links(#[case] raw: &str, #[case] expected_id: &str) {
        let link = SharedImageLink::parse(raw).expect("link should parse");
        assert_eq!(link.file_id(), expected_id);
    }

    #[rstest]
    #[case("", LinkShapeError::Empty)]
    #[case("not a url", LinkShapeError::Malformed)]
    #[case(
        "http://drive.google.com/file/d/abc/view",
        LinkShapeError::UnsupportedScheme { scheme: "http".to_owned() }
    )]
    #[case(
        "https://example.com/x.jpg",
        LinkShapeError::UnsupportedHost { host: "example.com".to_owned() }
    )]
    #[case("https://drive.google.com/drive/folders/abc", LinkShapeError::MissingFileId)]
    #[case("https://drive.google.com/open?usp=sharing", LinkShapeError::MissingFileId)]
    #[case("https://drive.google.com/file/d/a%20b/view", LinkShapeError::InvalidFileId)]
    fn rejects_other_shapes(#[case] raw: &str, #[case] expected: LinkShapeError) {
        assert_eq!(SharedImageLink::parse(raw), Err(expected));
    }

    #[rstest]
    fn direct_url_uses_export_view() {
        let link = SharedImageLink::parse("https://drive.google.com/open?id=q1")
            .expect("link should parse");
        assert_eq!(link.direct_url(), "https://drive.google.com/uc?export=view&id=q1");
    }
}
