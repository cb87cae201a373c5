//! Key and IV length rules.
//!
//! Key and IV are raw key-material strings; lengths are byte counts of
//! their UTF-8 encoding. The IV rule is mode-independent: an ECB push still
//! needs a 16-byte IV even though the cipher never reads it.

use bark_core::EncryptionAlgorithm;
use bark_core::algorithm::AES_BLOCK_LEN;
use bark_core::errors::EncryptionError;

/// Check that `key` is exactly the algorithm's key size in bytes.
pub fn validate_key(algorithm: EncryptionAlgorithm, key: &str) -> Result<(), EncryptionError> {
    let expected = algorithm.key_len_bytes();
    if key.len() == expected {
        Ok(())
    } else {
        Err(EncryptionError::key_is_not_correct(expected))
    }
}

/// Check that `iv` is exactly one AES block (16 bytes).
pub fn validate_iv(iv: &str) -> Result<(), EncryptionError> {
    if iv.len() == AES_BLOCK_LEN {
        Ok(())
    } else {
        Err(EncryptionError::iv_is_not_correct(AES_BLOCK_LEN))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use bark_core::errors::EncryptionErrorKind;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn mandated_lengths_accepted() {
        for algorithm in EncryptionAlgorithm::ALL {
            let key = "k".repeat(algorithm.key_len_bytes());
            assert!(validate_key(algorithm, &key).is_ok(), "{algorithm}");
        }
    }

    #[test]
    fn key_error_names_expected_length() {
        let err = validate_key(EncryptionAlgorithm::AES_256_ECB, "short").unwrap_err();
        assert_eq!(err.kind(), EncryptionErrorKind::KeyIsNotCorrect);
        assert_eq!(err.message(), "The length of key is not 32");
    }

    #[test]
    fn key_length_counts_bytes() {
        // 8 two-byte characters: 8 chars, 16 bytes
        let key = "é".repeat(8);
        assert!(validate_key(EncryptionAlgorithm::AES_128_CBC, &key).is_ok());
    }

    #[test]
    fn iv_error_message() {
        let err = validate_iv("ab").unwrap_err();
        assert_eq!(err, EncryptionError::iv_is_not_correct(16));
    }

    fn any_algorithm() -> impl Strategy<Value = EncryptionAlgorithm> {
        proptest::sample::select(EncryptionAlgorithm::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn key_accepted_iff_exact_length(algorithm in any_algorithm(), len in 0usize..64) {
            let key = "a".repeat(len);
            let result = validate_key(algorithm, &key);
            if len == algorithm.key_len_bytes() {
                prop_assert!(result.is_ok());
            } else {
                let err = result.unwrap_err();
                prop_assert_eq!(err.kind(), EncryptionErrorKind::KeyIsNotCorrect);
            }
        }

        #[test]
        fn iv_accepted_iff_sixteen_bytes(iv in "[ -~]{0,40}") {
            let result = validate_iv(&iv);
            if iv.len() == 16 {
                prop_assert!(result.is_ok());
            } else {
                prop_assert_eq!(result.unwrap_err().kind(), EncryptionErrorKind::IvIsNotCorrect);
            }
        }
    }
}
