//! # bark-client
//!
//! HTTP client for the Bark push-notification server.
//!
//! - [`client::BarkClient`]: `health`, `info`, `ping`, `push`, `push_encrypted`
//! - [`encryption::policy`]: key/IV length rules keyed by algorithm
//! - [`encryption::cipher`]: AES-CBC/ECB with PKCS#7 padding, base64 output
//! - [`classifier`]: maps a failed exchange to exactly one `ResponseError`
//!
//! Every operation is one independent HTTP exchange. Nothing is retried and
//! no state is shared between calls beyond the immutable base address.
//!
//! # Example
//!
//! ```no_run
//! use bark_client::BarkClient;
//! use bark_core::{EncryptionAlgorithm, MessageBuilder};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = BarkClient::new("https://api.day.app")?;
//! let message = MessageBuilder::new().title("Deploy").body("finished").build();
//! client
//!     .push_encrypted(
//!         "device-key",
//!         &message,
//!         EncryptionAlgorithm::AES_128_CBC,
//!         "1234567890123456",
//!         "1111111111111111",
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]

pub mod classifier;
pub mod client;
pub mod encryption;

pub use classifier::{FailedExchange, classify_miscellaneous_failure, classify_push_failure};
pub use client::BarkClient;
pub use encryption::{cipher, policy};
