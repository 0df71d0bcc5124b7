//! File naming, classification, and size formatting.

use super::AttachmentDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

const FORBIDDEN_CHARACTERS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];
const RESERVED_NAMES: [&str; 4] = ["CON", "PRN", "AUX", "NUL"];
const RESERVED_NUMBERED: [&str; 2] = ["COM", "LPT"];
const SIZE_UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
const SIZE_STEP: u128 = 1024;
const RANDOM_SUFFIX_LENGTH: usize = 6;

/// Original name of an uploaded file: 1 to 255 characters after trimming,
/// free of path-hostile and control characters, and not a reserved device
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileName(String);

impl FileName {
    /// Maximum permitted length in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Creates a validated file name.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentDomainError::EmptyFileName`],
    /// [`AttachmentDomainError::FileNameTooLong`],
    /// [`AttachmentDomainError::ForbiddenCharacter`], or
    /// [`AttachmentDomainError::ReservedFileName`] for the first rule the
    /// name breaks.
    pub fn new(value: impl Into<String>) -> Result<Self, AttachmentDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AttachmentDomainError::EmptyFileName);
        }
        if trimmed.chars().count() > Self::MAX_LENGTH {
            return Err(AttachmentDomainError::FileNameTooLong {
                max: Self::MAX_LENGTH,
            });
        }
        if let Some(bad) = trimmed
            .chars()
            .find(|ch| ch.is_ascii_control() || FORBIDDEN_CHARACTERS.contains(ch))
        {
            return Err(AttachmentDomainError::ForbiddenCharacter(bad));
        }
        if is_reserved_name(trimmed) {
            return Err(AttachmentDomainError::ReservedFileName(trimmed.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the name as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Matches `CON`, `PRN`, `AUX`, `NUL`, `COM1`-`COM9`, and `LPT1`-`LPT9`,
/// alone or followed by an extension.
fn is_reserved_name(name: &str) -> bool {
    let device = name
        .split_once('.')
        .map_or(name, |(stem, _)| stem)
        .to_ascii_uppercase();
    if RESERVED_NAMES.contains(&device.as_str()) {
        return true;
    }
    RESERVED_NUMBERED.iter().any(|prefix| {
        device.strip_prefix(prefix).is_some_and(|digit| {
            digit.len() == 1 && digit.chars().all(|ch| ('1'..='9').contains(&ch))
        })
    })
}

/// Storage location of an attachment's bytes; never blank.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FilePath(String);

impl FilePath {
    /// Creates a validated file path.
    ///
    /// # Errors
    ///
    /// Returns [`AttachmentDomainError::BlankFilePath`] when the path is
    /// empty or whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, AttachmentDomainError> {
        let path = value.into();
        if path.trim().is_empty() {
            return Err(AttachmentDomainError::BlankFilePath);
        }
        Ok(Self(path))
    }

    /// Returns the path as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Broad kind of file, derived from its MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCategory {
    /// `image/*`.
    Image,
    /// `application/pdf`.
    Pdf,
    /// Word processing formats.
    Document,
    /// Spreadsheet formats.
    Spreadsheet,
    /// `text/*`.
    Text,
    /// Anything else.
    Other,
}

impl FileCategory {
    /// Classifies a MIME type.
    ///
    /// Spreadsheet markers are checked before document markers, since the
    /// Office Open XML spreadsheet type also contains `document`.
    #[must_use]
    pub fn from_mime(file_type: &str) -> Self {
        if file_type.starts_with("image/") {
            Self::Image
        } else if file_type == "application/pdf" {
            Self::Pdf
        } else if file_type.contains("excel") || file_type.contains("spreadsheet") {
            Self::Spreadsheet
        } else if file_type.contains("word") || file_type.contains("document") {
            Self::Document
        } else if file_type.starts_with("text/") {
            Self::Text
        } else {
            Self::Other
        }
    }
}

/// Returns the lowercased text after the last `.`, or an empty string.
#[must_use]
pub fn file_extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default()
}

/// Builds a stored name of the form `<stem>_<millis>_<suffix>.<ext>`.
///
/// The stem is the original name without its extension, with every character
/// outside `[A-Za-z0-9._-]` replaced by `_`. Only the first six characters of
/// `random` are used, and the extension is lowercased and dropped when empty.
#[must_use]
pub fn safe_file_name(original: &str, unix_millis: i64, random: &str) -> String {
    let (stem, extension) = match original.rsplit_once('.') {
        Some((base, ext)) if !ext.is_empty() => (base, ext.to_lowercase()),
        _ => (original, String::new()),
    };
    let clean_stem: String = stem
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-') {
                ch
            } else {
                '_'
            }
        })
        .collect();
    let suffix: String = random.chars().take(RANDOM_SUFFIX_LENGTH).collect();
    if extension.is_empty() {
        format!("{clean_stem}_{unix_millis}_{suffix}")
    } else {
        format!("{clean_stem}_{unix_millis}_{suffix}.{extension}")
    }
}

/// Renders a byte count with binary units and up to two decimals, e.g.
/// `1.5 KB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 B".to_owned();
    }
    let total = u128::from(bytes);
    let mut unit = SIZE_UNITS.first().copied().unwrap_or("B");
    let mut divisor: u128 = 1;
    for candidate in SIZE_UNITS.iter().skip(1) {
        let next = divisor * SIZE_STEP;
        if total < next {
            break;
        }
        divisor = next;
        unit = candidate;
    }

    let hundredths = (total * 100 + divisor.div_euclid(2)).div_euclid(divisor);
    let whole = hundredths.div_euclid(100);
    let fraction = hundredths.rem_euclid(100);
    if fraction == 0 {
        format!("{whole} {unit}")
    } else if fraction.rem_euclid(10) == 0 {
        format!("{whole}.{} {unit}", fraction.div_euclid(10))
    } else {
        format!("{whole}.{fraction:02} {unit}")
    }
}
