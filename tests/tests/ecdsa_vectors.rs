//! ECDSA signatures produced by an independent implementation

use tpm2crypt_algorithms::error::Error;
use tpm2crypt_algorithms::{ExternalBackend, MathBackend, NativeBackend};
use tpm2crypt_api::{CurveId, EccParameter, EccSignature, HashAlg, SigScheme};
use tpm2crypt_tests::fixtures::*;
use tpm2crypt_tests::*;

const CASES: [(CurveId, HashAlg, &str, &str); 2] = [
    (CurveId::NIST_P256, HashAlg::Sha256, ECDSA_P256_R, ECDSA_P256_S),
    (CurveId::NIST_P384, HashAlg::Sha384, ECDSA_P384_R, ECDSA_P384_S),
];

fn signature(hash: HashAlg, r: &str, s: &str) -> EccSignature {
    EccSignature {
        scheme: SigScheme::ECDSA,
        hash,
        r: EccParameter::from_slice(&unhex(r)).unwrap(),
        s: EccParameter::from_slice(&unhex(s)).unwrap(),
    }
}

fn check_vectors<B: MathBackend>(b: &B) {
    for (id, hash, r, s) in CASES {
        let curve = b.curve_init(id).unwrap();
        let (_, q) = ecdsa_key(id);
        let sig = signature(hash, r, s);
        tpm2crypt_sign::verify(b, &curve, &q, &sig, &message_digest(hash)).unwrap();

        let mut other = message_digest(hash);
        other[0] ^= 1;
        let err = tpm2crypt_sign::verify(b, &curve, &q, &sig, &other).unwrap_err();
        assert!(matches!(err, Error::Signature { .. }), "{}", curve.name());
    }
}

#[test]
fn test_vectors_verify_native() {
    check_vectors(&NativeBackend::new());
}

#[test]
fn test_vectors_verify_external() {
    check_vectors(&ExternalBackend::new());
}

#[test]
fn test_fixture_private_keys_match_public_points() {
    let b = NativeBackend::new();
    for (id, ..) in CASES {
        let curve = b.curve_init(id).unwrap();
        let (d, q) = ecdsa_key(id);
        let point = b.point_mul(&curve, &b.from_be_bytes(&d), &curve.g).unwrap();
        assert_eq!(b.point_to_wire(&curve, &point).unwrap(), q);
    }
}

#[test]
fn test_own_signatures_verify_under_fixture_keys() {
    let b = ExternalBackend::new();
    let mut rng = seeded_rng(17);
    for (id, hash, ..) in CASES {
        let curve = b.curve_init(id).unwrap();
        let (d, q) = ecdsa_key(id);
        let digest = message_digest(hash);
        let sig = tpm2crypt_sign::sign(&b, &curve, SigScheme::ECDSA, hash, &d, &digest, &mut rng).unwrap();
        assert_eq!(sig.r.len(), curve.order_bytes());
        tpm2crypt_sign::verify(&b, &curve, &q, &sig, &digest).unwrap();
    }
}

#[test]
fn test_swapped_components_are_rejected() {
    let b = NativeBackend::new();
    let curve = b.curve_init(CurveId::NIST_P256).unwrap();
    let (_, q) = ecdsa_key(CurveId::NIST_P256);
    let sig = signature(HashAlg::Sha256, ECDSA_P256_S, ECDSA_P256_R);
    assert!(tpm2crypt_sign::verify(&b, &curve, &q, &sig, &message_digest(HashAlg::Sha256)).is_err());
}
