//! Encrypted-push support.
//!
//! [`policy`] runs first and rejects bad key/IV material before anything
//! else happens; [`cipher`] then produces the base64 ciphertext.

pub mod cipher;
pub mod policy;
