//! # bark-core
//!
//! Foundation types for the Bark push-notification client.
//!
//! This crate provides the vocabulary the client crates depend on:
//!
//! - **Messages**: [`message::Message`] with [`message::MessageLevel`] and [`message::MessageSound`]
//! - **Builder**: [`builder::MessageBuilder`], a fluent validating constructor
//! - **Algorithms**: [`algorithm::EncryptionAlgorithm`] as explicit `{family, key size, mode}` facets
//! - **Responses**: [`response::ServerResponse`] envelope and [`response::InfoResponse`]
//! - **Errors**: [`errors::ValidationError`], [`errors::EncryptionError`],
//!   [`errors::ResponseError`] and the [`errors::BarkError`] union
//! - **Logging**: [`logging::init_subscriber`] for binaries
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by all other bark crates.

#![deny(unsafe_code)]

pub mod algorithm;
pub mod builder;
pub mod errors;
pub mod logging;
pub mod message;
pub mod response;

pub use algorithm::{BlockMode, CipherFamily, EncryptionAlgorithm, KeySize};
pub use builder::MessageBuilder;
pub use errors::{
    BarkError, EncryptionError, EncryptionErrorKind, HttpStatusError, ResponseError,
    ResponseErrorKind, ValidationError, ValidationErrorKind,
};
pub use message::{Message, MessageLevel, MessageSound};
pub use response::{InfoResponse, ServerResponse};

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_exports_work() {
        let _message = MessageBuilder::new().title("t").build();
        let _algorithm = EncryptionAlgorithm::AES_256_ECB;
        let _response = ServerResponse::default();
    }
}
