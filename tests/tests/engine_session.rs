//! Whole sessions against the engine, including failure-mode containment

use tpm2crypt_algorithms::{ExternalBackend, NativeBackend};
use tpm2crypt_api::{
    CurveId, EccParameter, EccPoint, EccSignature, Error, FailureCode, HashAlg, KeyExchangeScheme,
    RsaScheme, SigScheme,
};
use tpm2crypt_tests::fixtures::*;
use tpm2crypt_tests::*;

fn off_curve(q: &EccPoint) -> EccPoint {
    let mut y = q.y.as_slice().to_vec();
    let last = y.len() - 1;
    y[last] ^= 1;
    EccPoint {
        x: q.x.clone(),
        y: EccParameter::from_slice(&y).unwrap(),
    }
}

#[test]
fn test_fixture_key_through_engine() {
    let mut engine = engine(ExternalBackend::new(), 3);
    let key = engine.rsa_load_key(rsa_2048_public(), &unhex(RSA_2048_P)).unwrap();

    for (hash, sig) in [(HashAlg::Sha1, RSA_2048_PSS_SHA1), (HashAlg::Sha384, RSA_2048_PSS_SHA384)] {
        engine
            .rsa_verify(key.public(), RsaScheme::RSAPSS, hash, &message_digest(hash), &unhex(sig))
            .unwrap();
    }
    let pt = engine
        .rsa_decrypt(&key, RsaScheme::OAEP, HashAlg::Sha512, LABEL, &unhex(RSA_2048_OAEP_SHA512))
        .unwrap();
    assert_eq!(pt.as_slice(), PLAINTEXT);
    let pt = engine
        .rsa_decrypt(&key, RsaScheme::RSAES, HashAlg::Sha256, &[], &unhex(RSA_2048_RSAES))
        .unwrap();
    assert_eq!(pt.as_slice(), PLAINTEXT);

    // Randomized encodings from the engine's own DRBG still round-trip
    let ct = engine
        .rsa_encrypt(key.public(), RsaScheme::OAEP, HashAlg::Sha256, LABEL, PLAINTEXT)
        .unwrap();
    assert_ne!(hex::encode(&ct), RSA_2048_OAEP_SHA256);
    let pt = engine
        .rsa_decrypt(&key, RsaScheme::OAEP, HashAlg::Sha256, LABEL, &ct)
        .unwrap();
    assert_eq!(pt.as_slice(), PLAINTEXT);
}

#[test]
fn test_fixture_ecdsa_through_engine() {
    let mut engine = engine(NativeBackend::new(), 4);
    let (_, q) = ecdsa_key(CurveId::NIST_P384);
    let sig = EccSignature {
        scheme: SigScheme::ECDSA,
        hash: HashAlg::Sha384,
        r: EccParameter::from_slice(&unhex(ECDSA_P384_R)).unwrap(),
        s: EccParameter::from_slice(&unhex(ECDSA_P384_S)).unwrap(),
    };
    let digest = message_digest(HashAlg::Sha384);
    engine.ecc_verify(CurveId::NIST_P384, &q, &sig, &digest).unwrap();

    let err = engine
        .ecc_verify(CurveId::NIST_P384, &off_curve(&q), &sig, &digest)
        .unwrap_err();
    assert_eq!(err, Error::EccPoint);
    assert_eq!(engine.failure_code(), None);
}

#[test]
fn test_two_engines_agree_on_shared_secrets() {
    let mut alice = engine(NativeBackend::new(), 10);
    let mut bob = engine(ExternalBackend::new(), 11);
    let curve = CurveId::NIST_P256;

    let (d_a, q_a) = alice.ecc_create_key(curve).unwrap();
    let (d_b, q_b) = bob.ecc_create_key(curve).unwrap();
    assert_eq!(
        alice.ecdh_zgen(curve, d_a.as_slice(), &q_b).unwrap(),
        bob.ecdh_zgen(curve, d_b.as_slice(), &q_a).unwrap()
    );

    let (z, ephemeral) = alice.ecdh_key_gen(curve, &q_b).unwrap();
    assert_eq!(bob.ecdh_zgen(curve, d_b.as_slice(), &ephemeral).unwrap(), z);

    let (de_a, qe_a) = alice.ecc_create_key(curve).unwrap();
    let (de_b, qe_b) = bob.ecc_create_key(curve).unwrap();
    let za = alice
        .two_phase_exchange(curve, KeyExchangeScheme::ECMQV, d_a.as_slice(), de_a.as_slice(), &q_b, &qe_b)
        .unwrap();
    let zb = bob
        .two_phase_exchange(curve, KeyExchangeScheme::ECMQV, d_b.as_slice(), de_b.as_slice(), &q_a, &qe_a)
        .unwrap();
    assert_eq!(za, zb);
}

#[test]
fn test_fatal_error_is_contained() {
    let mut engine = engine(NativeBackend::new(), 12);
    let curve = CurveId::SM2_P256;
    let (d, q) = engine.ecc_create_key(curve).unwrap();
    let digest = message_digest(HashAlg::Sha256);
    let sig = engine
        .ecc_sign(curve, SigScheme::SM2, HashAlg::Sha256, d.as_slice(), &digest)
        .unwrap();
    engine.ecc_verify(curve, &q, &sig, &digest).unwrap();

    // SM2 expects a validated key; a bad one is an internal fault
    let err = engine.ecc_verify(curve, &off_curve(&q), &sig, &digest).unwrap_err();
    assert_eq!(
        err,
        Error::Failure {
            code: FailureCode::Parameter
        }
    );
    assert!(engine.failure_mode().location().is_some());

    // Nothing runs until reset, and every refusal carries the same code
    for result in [
        engine.get_random(16).map(|_| ()),
        engine.ecc_verify(curve, &q, &sig, &digest),
        engine.ecc_create_key(curve).map(|_| ()),
        engine.rsa_verify(
            &rsa_2048_public(),
            RsaScheme::RSASSA,
            HashAlg::Sha256,
            &digest,
            &unhex(RSA_2048_RSASSA_SHA256),
        ),
    ] {
        assert_eq!(
            result,
            Err(Error::Failure {
                code: FailureCode::Parameter
            })
        );
    }

    engine.reset().unwrap();
    assert_eq!(engine.failure_code(), None);
    engine.ecc_verify(curve, &q, &sig, &digest).unwrap();
    assert_eq!(engine.get_random(16).unwrap().len(), 16);
}

#[test]
fn test_recoverable_errors_do_not_latch() {
    let mut engine = engine(NativeBackend::new(), 13);
    let digest = message_digest(HashAlg::Sha256);
    let (d, _) = ecdsa_key(CurveId::NIST_P256);

    assert!(matches!(
        engine.ecc_sign(CurveId(0x7777), SigScheme::ECDSA, HashAlg::Sha256, &d, &digest),
        Err(Error::Curve)
    ));
    assert_eq!(
        engine.ecc_sign(CurveId::NIST_P256, SigScheme(0x0001), HashAlg::Sha256, &d, &digest),
        Err(Error::Scheme)
    );
    assert_eq!(
        engine.rsa_verify(
            &rsa_2048_public(),
            RsaScheme::RSASSA,
            HashAlg::Sha1,
            &message_digest(HashAlg::Sha1),
            &unhex(RSA_2048_RSASSA_SHA256),
        ),
        Err(Error::Signature)
    );
    assert_eq!(engine.failure_code(), None);
    assert_eq!(engine.get_random(8).unwrap().len(), 8);
}
