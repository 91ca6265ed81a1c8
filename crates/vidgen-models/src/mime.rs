//! Supported reference MIME types.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME types accepted for an input reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferenceMime {
    Jpeg,
    Png,
    Webp,
    Mp4,
}

impl ReferenceMime {
    /// All accepted types, in the order they are reported to callers.
    pub const ALL: &'static [ReferenceMime] = &[
        ReferenceMime::Jpeg,
        ReferenceMime::Png,
        ReferenceMime::Webp,
        ReferenceMime::Mp4,
    ];

    /// Canonical lowercase MIME string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferenceMime::Jpeg => "image/jpeg",
            ReferenceMime::Png => "image/png",
            ReferenceMime::Webp => "image/webp",
            ReferenceMime::Mp4 => "video/mp4",
        }
    }

    /// Whether the type is an image (resizable) as opposed to video.
    pub fn is_image(&self) -> bool {
        !matches!(self, ReferenceMime::Mp4)
    }

    /// Maps a file extension (without dot) onto a supported type.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ReferenceMime::Jpeg),
            "png" => Some(ReferenceMime::Png),
            "webp" => Some(ReferenceMime::Webp),
            "mp4" => Some(ReferenceMime::Mp4),
            _ => None,
        }
    }

    /// Infers the type from a filename's extension.
    pub fn for_filename(name: &str) -> Option<Self> {
        Path::new(name)
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    /// Comma-separated list of all accepted MIME strings, for error
    /// messages.
    pub fn supported_list() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ReferenceMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReferenceMime {
    type Err = MimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "image/jpeg" | "image/jpg" => Ok(ReferenceMime::Jpeg),
            "image/png" => Ok(ReferenceMime::Png),
            "image/webp" => Ok(ReferenceMime::Webp),
            "video/mp4" => Ok(ReferenceMime::Mp4),
            _ => Err(MimeParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unsupported MIME type: {0}")]
pub struct MimeParseError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive_and_trimmed() {
        assert_eq!(" Image/JPEG ".parse::<ReferenceMime>().unwrap(), ReferenceMime::Jpeg);
        assert_eq!("VIDEO/MP4".parse::<ReferenceMime>().unwrap(), ReferenceMime::Mp4);
        assert!("image/gif".parse::<ReferenceMime>().is_err());
    }

    #[test]
    fn extension_table() {
        assert_eq!(ReferenceMime::for_filename("ref.JPG"), Some(ReferenceMime::Jpeg));
        assert_eq!(ReferenceMime::for_filename("a/b/ref.jpeg"), Some(ReferenceMime::Jpeg));
        assert_eq!(ReferenceMime::for_filename("ref.webp"), Some(ReferenceMime::Webp));
        assert_eq!(ReferenceMime::for_filename("clip.mp4"), Some(ReferenceMime::Mp4));
        assert_eq!(ReferenceMime::for_filename("ref.gif"), None);
        assert_eq!(ReferenceMime::for_filename("noext"), None);
    }

    #[test]
    fn filename_round_trip_is_canonical() {
        // Inferring from a filename and re-parsing the canonical string
        // is idempotent and lowercase.
        for name in ["a.jpg", "b.PNG", "c.webp", "d.Mp4"] {
            let mime = ReferenceMime::for_filename(name).unwrap();
            let reparsed = mime.as_str().parse::<ReferenceMime>().unwrap();
            assert_eq!(mime, reparsed);
            assert_eq!(mime.as_str(), mime.as_str().to_ascii_lowercase());
        }
    }

    #[test]
    fn image_classification() {
        assert!(ReferenceMime::Jpeg.is_image());
        assert!(ReferenceMime::Webp.is_image());
        assert!(!ReferenceMime::Mp4.is_image());
    }

    #[test]
    fn supported_list_enumerates_all() {
        let list = ReferenceMime::supported_list();
        for mime in ReferenceMime::ALL {
            assert!(list.contains(mime.as_str()));
        }
    }
}
