//! Fluent, validating constructor for [`Message`].
//!
//! Each setter consumes and returns the builder so calls chain. The two
//! URL-shaped fields (`icon`, `url`) are validated and return
//! `Result<Self, ValidationError>`; everything else is stored as given.
//!
//! ```text
//! let message = MessageBuilder::new()
//!     .title("Deploy")
//!     .body("finished")
//!     .url("https://ci.example.com/run/42")?
//!     .build();
//! ```

use url::Url;

use crate::errors::ValidationError;
use crate::message::{Message, MessageLevel, MessageSound};

/// Builds a [`Message`] field by field.
#[derive(Clone, Debug, Default)]
pub struct MessageBuilder {
    message: Message,
}

impl MessageBuilder {
    /// Start from an empty message.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the message as archived.
    pub fn archive(mut self) -> Self {
        self.message.is_archive = Some("1".to_string());
        self
    }

    /// Set the badge number.
    pub fn badge(mut self, badge: i64) -> Self {
        self.message.badge = Some(badge);
        self
    }

    /// Set the body.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.message.body = Some(body.into());
        self
    }

    /// Set the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.message.category = Some(category.into());
        self
    }

    /// Set the clipboard text.
    pub fn copy(mut self, copy: impl Into<String>) -> Self {
        self.message.copy = Some(copy.into());
        self
    }

    /// Set the target device key.
    pub fn device_key(mut self, device_key: impl Into<String>) -> Self {
        self.message.device_key = Some(device_key.into());
        self
    }

    /// Set the group.
    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.message.group = Some(group.into());
        self
    }

    /// Set the icon URL.
    ///
    /// Fails with `IS_NOT_URL` if `icon` is not a well-formed URL.
    /// A failure consumes the builder; clone it first to recover from a
    /// rejected value.
    pub fn icon(mut self, icon: impl Into<String>) -> Result<Self, ValidationError> {
        let icon = icon.into();
        if !is_url(&icon) {
            return Err(ValidationError::is_not_url("icon"));
        }
        self.message.icon = Some(icon);
        Ok(self)
    }

    /// Set the interruption level.
    pub fn level(mut self, level: MessageLevel) -> Self {
        self.message.level = Some(level);
        self
    }

    /// Set the tone.
    pub fn sound(mut self, sound: MessageSound) -> Self {
        self.message.sound = Some(sound);
        self
    }

    /// Set the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.message.title = Some(title.into());
        self
    }

    /// Set the URL opened on tap.
    ///
    /// Fails with `IS_NOT_URL` if `url` is not a well-formed URL.
    /// A failure consumes the builder; clone it first to recover from a
    /// rejected value.
    pub fn url(mut self, url: impl Into<String>) -> Result<Self, ValidationError> {
        let url = url.into();
        if !is_url(&url) {
            return Err(ValidationError::is_not_url("url"));
        }
        self.message.url = Some(url);
        Ok(self)
    }

    /// Snapshot of the message accumulated so far.
    ///
    /// The builder is left untouched and can keep going.
    pub fn build(&self) -> Message {
        self.message.clone()
    }
}

/// Scheme plus authority, at minimum.
pub(crate) fn is_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok_and(|url| url.has_host())
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
