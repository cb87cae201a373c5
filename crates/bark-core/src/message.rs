//! Notification payload sent to the Bark server.
//!
//! Every field is optional; absent fields are omitted from the JSON body.
//! Field names follow the server contract (`device_key`, `isArchive`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One notification.
///
/// Usually produced by [`MessageBuilder`](crate::builder::MessageBuilder),
/// which validates the URL-shaped fields.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Badge number shown on the app icon.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<i64>,

    /// Notification body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,

    /// Notification category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Text copied to the clipboard when the notification is copied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,

    /// Target device key (plaintext push only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_key: Option<String>,

    /// Group the notification is filed under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Icon URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Archive flag. The server expects the literal string `"1"`.
    #[serde(
        rename = "isArchive",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub is_archive: Option<String>,

    /// Interruption level.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<MessageLevel>,

    /// Notification tone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sound: Option<MessageSound>,

    /// Notification title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// URL opened when the notification is tapped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl Message {
    /// Copy of this message without a device key.
    ///
    /// Encrypted pushes carry the device key in the request path, never in
    /// the encrypted body.
    pub fn without_device_key(&self) -> Self {
        Self {
            device_key: None,
            ..self.clone()
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MessageLevel
// ─────────────────────────────────────────────────────────────────────────────

/// Interruption level of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MessageLevel {
    /// Default: lights the screen and plays the sound.
    Active,
    /// Breaks through Focus modes.
    TimeSensitive,
    /// Added to the list without lighting the screen.
    Passive,
    /// Plays even when the device is muted.
    Critical,
}

impl MessageLevel {
    /// Every level the server accepts.
    pub const ALL: [Self; 4] = [Self::Active, Self::TimeSensitive, Self::Passive, Self::Critical];

    /// Wire name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::TimeSensitive => "timeSensitive",
            Self::Passive => "passive",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for MessageLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| format!("unknown message level: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// MessageSound
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! sounds {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// Notification tones bundled with the Bark app.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum MessageSound {
            $(
                #[doc = concat!("`", $name, "`")]
                #[serde(rename = $name)]
                $variant,
            )+
        }

        impl MessageSound {
            /// Every tone the server accepts.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Wire name.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }
    };
}

sounds! {
    Alarm => "alarm",
    Anticipate => "anticipate",
    Bell => "bell",
    Birdsong => "birdsong",
    Bloom => "bloom",
    Calypso => "calypso",
    Chime => "chime",
    Choo => "choo",
    Descent => "descent",
    Electronic => "electronic",
    Fanfare => "fanfare",
    Glass => "glass",
    GoToSleep => "gotosleep",
    HealthNotification => "healthnotification",
    Horn => "horn",
    Ladder => "ladder",
    MailSent => "mailsent",
    Minuet => "minuet",
    MultiwayInvitation => "multiwayinvitation",
    NewMail => "newmail",
    NewsFlash => "newsflash",
    Noir => "noir",
    PaymentSuccess => "paymentsuccess",
    Shake => "shake",
    SherwoodForest => "sherwoodforest",
    Silence => "silence",
    Spell => "spell",
    Suspense => "suspense",
    Telegraph => "telegraph",
    Tiptoes => "tiptoes",
    Typewriters => "typewriters",
    Update => "update",
}

impl fmt::Display for MessageSound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageSound {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|sound| sound.as_str() == s)
            .ok_or_else(|| format!("unknown message sound: {s}"))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
