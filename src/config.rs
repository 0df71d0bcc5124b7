//! Tunable limits shared by the comment and attachment services.
//!
//! Every field has a default, so a partial JSON document only overrides what
//! it names:
//!
//! ```
//! use quadrant::config::ServiceConfig;
//!
//! let config = ServiceConfig::from_json_str(r#"{"comments": {"max_content_chars": 2000}}"#)
//!     .expect("valid configuration");
//! assert_eq!(config.comments.max_content_chars, 2000);
//! assert_eq!(config.attachments.max_per_task, 50);
//! ```

use crate::comment::domain::OrphanPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// MIME types accepted for attachments unless configured otherwise.
pub const DEFAULT_ALLOWED_FILE_TYPES: [&str; 9] = [
    "image/jpeg",
    "image/png",
    "image/gif",
    "application/pdf",
    "text/plain",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
];

/// Errors returned while loading a configuration document.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this schema.
    #[error("malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A limit that must be positive is zero.
    #[error("configuration value `{0}` must be greater than zero")]
    ZeroLimit(&'static str),

    /// The attachment allow-list is empty.
    #[error("at least one attachment file type must be allowed")]
    NoAllowedFileTypes,
}

/// Limits applied to attachment uploads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentLimits {
    /// Largest single file in bytes.
    pub max_file_size_bytes: u64,
    /// Largest combined size of one task's attachments in bytes.
    pub max_total_size_bytes: u64,
    /// Most attachments one task may hold.
    pub max_per_task: usize,
    /// Accepted MIME types.
    pub allowed_file_types: Vec<String>,
}

impl Default for AttachmentLimits {
    fn default() -> Self {
        Self {
            max_file_size_bytes: 10 * 1024 * 1024, // 10 MiB
            max_total_size_bytes: 100 * 1024 * 1024, // 100 MiB
            max_per_task: 50,
            allowed_file_types: DEFAULT_ALLOWED_FILE_TYPES
                .iter()
                .map(|mime| (*mime).to_owned())
                .collect(),
        }
    }
}

impl AttachmentLimits {
    /// Returns `true` when `file_type` is on the allow-list.
    #[must_use]
    pub fn allows(&self, file_type: &str) -> bool {
        self.allowed_file_types
            .iter()
            .any(|allowed| allowed == file_type)
    }
}

/// Rules applied to task comments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommentSettings {
    /// Longest comment in characters after trimming.
    pub max_content_chars: usize,
    /// Most active comments one task may hold.
    pub max_per_task: usize,
    /// Minutes after creation during which the author may edit; `None`
    /// means no limit.
    pub edit_window_minutes: Option<u32>,
    /// How the threaded view treats replies whose parent is missing.
    pub orphan_policy: OrphanPolicy,
}

impl Default for CommentSettings {
    fn default() -> Self {
        Self {
            max_content_chars: 1000,
            max_per_task: 1000,
            edit_window_minutes: None,
            orphan_policy: OrphanPolicy::default(),
        }
    }
}

/// Limits for every configurable service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Attachment upload limits.
    pub attachments: AttachmentLimits,
    /// Comment rules.
    pub comments: CommentSettings,
}

impl ServiceConfig {
    /// Creates a strict configuration: comments are editable for 30 minutes
    /// and attachments are capped at 5 MiB each.
    #[must_use]
    pub fn strict() -> Self {
        Self {
            attachments: AttachmentLimits {
                max_file_size_bytes: 5 * 1024 * 1024, // 5 MiB
                ..AttachmentLimits::default()
            },
            comments: CommentSettings {
                edit_window_minutes: Some(30),
                ..CommentSettings::default()
            },
        }
    }

    /// Parses and validates a JSON configuration document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Malformed`] for invalid JSON and the other
    /// [`ConfigError`] variants when a limit is unusable.
    pub fn from_json_str(document: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every limit admits at least one item.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroLimit`] naming the first zero limit or
    /// [`ConfigError::NoAllowedFileTypes`] for an empty allow-list.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let limits = [
            (
                "attachments.max_file_size_bytes",
                self.attachments.max_file_size_bytes == 0,
            ),
            (
                "attachments.max_total_size_bytes",
                self.attachments.max_total_size_bytes == 0,
            ),
            ("attachments.max_per_task", self.attachments.max_per_task == 0),
            (
                "comments.max_content_chars",
                self.comments.max_content_chars == 0,
            ),
            ("comments.max_per_task", self.comments.max_per_task == 0),
        ];
        if let Some((name, _)) = limits.iter().find(|(_, is_zero)| *is_zero) {
            return Err(ConfigError::ZeroLimit(*name));
        }
        if self.attachments.allowed_file_types.is_empty() {
            return Err(ConfigError::NoAllowedFileTypes);
        }
        Ok(())
    }
}
