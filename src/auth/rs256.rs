// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! RS256 signature verification (RSASSA-PKCS1-v1_5 over SHA-256).
//!
//! The registry stores a bare modulus per key; the public key is rebuilt
//! with the fixed exponent and checked with the `rsa` crate's PKCS#1 v1.5
//! verifier, which rejects signatures that are not exactly the modulus
//! length or not below the modulus and compares the encoded blocks in
//! constant time.

use rsa::traits::PublicKeyParts;
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};

/// Public exponent shared by every registered key.
///
/// Keys are registered as a modulus only; the exponent is not configurable
/// per key.
pub const RSA_EXPONENT: u32 = 65_537;

/// Verify an RS256 signature over `message` with the key `(modulus, 65537)`.
///
/// Returns `false` for every failure: unusable modulus, wrong signature
/// length, signature representative out of range, or mismatch.
pub fn verify_rs256(modulus: &[u8], message: &[u8], signature: &[u8]) -> bool {
    let Ok(key) = RsaPublicKey::new(
        BigUint::from_bytes_be(modulus),
        BigUint::from(RSA_EXPONENT),
    ) else {
        return false;
    };
    if signature.len() != key.size() || &BigUint::from_bytes_be(signature) >= key.n() {
        return false;
    }

    let digest = Sha256::digest(message);
    key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{
        modulus_of, sign_rs256, FIXTURE_MESSAGE, FIXTURE_SIGNATURE_HEX,
        KID1_MODULUS_HEX, KID1_PRIVATE_KEY_PEM, KID2_PRIVATE_KEY_PEM,
    };

    fn kid1_modulus() -> Vec<u8> {
        alloy::primitives::hex::decode(KID1_MODULUS_HEX).unwrap()
    }

    #[test]
    fn accepts_known_answer_vector() {
        // Signature produced independently with `openssl dgst -sha256 -sign`.
        let signature = alloy::primitives::hex::decode(FIXTURE_SIGNATURE_HEX).unwrap();
        assert!(verify_rs256(
            &kid1_modulus(),
            FIXTURE_MESSAGE.as_bytes(),
            &signature
        ));
    }

    #[test]
    fn fixture_modulus_matches_private_key() {
        assert_eq!(modulus_of(KID1_PRIVATE_KEY_PEM), kid1_modulus());
    }

    #[test]
    fn accepts_fresh_signature() {
        let message = b"eyJhbGciOiJSUzI1NiJ9.eyJzdWIiOiJib2IifQ";
        let signature = sign_rs256(KID1_PRIVATE_KEY_PEM, message);
        assert!(verify_rs256(&kid1_modulus(), message, &signature));
    }

    #[test]
    fn rejects_any_flipped_signature_bit() {
        let message = FIXTURE_MESSAGE.as_bytes();
        let signature = alloy::primitives::hex::decode(FIXTURE_SIGNATURE_HEX).unwrap();
        let modulus = kid1_modulus();

        for index in [0, 1, 17, 128, signature.len() - 1] {
            for bit in [0x01u8, 0x80] {
                let mut tampered = signature.clone();
                tampered[index] ^= bit;
                assert!(
                    !verify_rs256(&modulus, message, &tampered),
                    "byte {index} bit {bit:#x} flipped but still verified"
                );
            }
        }
    }

    #[test]
    fn rejects_any_flipped_message_bit() {
        let signature = alloy::primitives::hex::decode(FIXTURE_SIGNATURE_HEX).unwrap();
        let modulus = kid1_modulus();
        let message = FIXTURE_MESSAGE.as_bytes();

        for index in [0, message.len() / 2, message.len() - 1] {
            let mut tampered = message.to_vec();
            tampered[index] ^= 0x01;
            assert!(!verify_rs256(&modulus, &tampered, &signature));
        }
    }

    #[test]
    fn rejects_signature_from_other_key() {
        let message = FIXTURE_MESSAGE.as_bytes();
        let signature = sign_rs256(KID2_PRIVATE_KEY_PEM, message);
        assert!(!verify_rs256(&kid1_modulus(), message, &signature));
        assert!(verify_rs256(
            &modulus_of(KID2_PRIVATE_KEY_PEM),
            message,
            &signature
        ));
    }

    #[test]
    fn rejects_wrong_length_signatures() {
        let message = FIXTURE_MESSAGE.as_bytes();
        let signature = alloy::primitives::hex::decode(FIXTURE_SIGNATURE_HEX).unwrap();
        let modulus = kid1_modulus();

        assert!(!verify_rs256(&modulus, message, &signature[1..]));
        let mut extended = vec![0u8];
        extended.extend_from_slice(&signature);
        assert!(!verify_rs256(&modulus, message, &extended));
        assert!(!verify_rs256(&modulus, message, &[]));
    }

    #[test]
    fn rejects_signature_not_below_modulus() {
        let modulus = kid1_modulus();
        assert!(!verify_rs256(&modulus, b"m", &modulus));
        assert!(!verify_rs256(&modulus, b"m", &vec![0xff; modulus.len()]));
    }

    #[test]
    fn unusable_modulus_is_false_not_panic() {
        let signature = alloy::primitives::hex::decode(FIXTURE_SIGNATURE_HEX).unwrap();
        assert!(!verify_rs256(&[], b"m", &signature));
        assert!(!verify_rs256(&[0x00], b"m", &[0x00]));
        assert!(!verify_rs256(&[0x00, 0x00], b"m", &[]));
        // 256-bit modulus is too short to hold a SHA-256 DigestInfo block.
        assert!(!verify_rs256(&[0xc5; 32], b"m", &[0x01; 32]));
    }
}
