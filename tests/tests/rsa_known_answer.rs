//! RSA 2048 known-answer vectors for every padding scheme and hash

use tpm2crypt_algorithms::error::Error;
use tpm2crypt_algorithms::rsa::{self, ExpDCache, RsaPrivateKey};
use tpm2crypt_algorithms::{ExternalBackend, MathBackend, NativeBackend};
use tpm2crypt_api::{HashAlg, RsaScheme};
use tpm2crypt_tests::fixtures::*;
use tpm2crypt_tests::*;

fn vectors(hash: HashAlg) -> (&'static str, &'static str, &'static str) {
    match hash {
        HashAlg::Sha1 => (RSA_2048_RSASSA_SHA1, RSA_2048_PSS_SHA1, RSA_2048_OAEP_SHA1),
        HashAlg::Sha256 => (RSA_2048_RSASSA_SHA256, RSA_2048_PSS_SHA256, RSA_2048_OAEP_SHA256),
        HashAlg::Sha384 => (RSA_2048_RSASSA_SHA384, RSA_2048_PSS_SHA384, RSA_2048_OAEP_SHA384),
        HashAlg::Sha512 => (RSA_2048_RSASSA_SHA512, RSA_2048_PSS_SHA512, RSA_2048_OAEP_SHA512),
    }
}

fn check_known_answers<B: MathBackend>(b: &B) {
    let key = rsa_2048_private(b);
    assert_eq!(key.public().bits(), 2048);
    assert_eq!(key.public().size(), 256);

    for hash in HashAlg::ALL {
        let (rsassa, pss, oaep) = vectors(hash);
        let digest = message_digest(hash);

        let sig = rsa::sign(b, &key, RsaScheme::RSASSA, hash, &digest, &mut StreamSource::new()).unwrap();
        assert_eq!(hex::encode(&sig), rsassa, "RSASSA {:?}", hash);
        rsa::verify(b, key.public(), RsaScheme::RSASSA, hash, &digest, &sig).unwrap();

        let sig = rsa::sign(b, &key, RsaScheme::RSAPSS, hash, &digest, &mut StreamSource::new()).unwrap();
        assert_eq!(hex::encode(&sig), pss, "PSS {:?}", hash);
        rsa::verify(b, key.public(), RsaScheme::RSAPSS, hash, &digest, &sig).unwrap();

        let ct = rsa::encrypt(
            b,
            key.public(),
            RsaScheme::OAEP,
            hash,
            LABEL,
            PLAINTEXT,
            &mut StreamSource::new(),
        )
        .unwrap();
        assert_eq!(hex::encode(&ct), oaep, "OAEP {:?}", hash);
        let pt = rsa::decrypt(b, &key, RsaScheme::OAEP, hash, LABEL, &unhex(oaep)).unwrap();
        assert_eq!(pt.as_slice(), PLAINTEXT);
    }

    let ct = rsa::encrypt(
        b,
        key.public(),
        RsaScheme::RSAES,
        HashAlg::Sha256,
        &[],
        PLAINTEXT,
        &mut StreamSource::new(),
    )
    .unwrap();
    assert_eq!(hex::encode(&ct), RSA_2048_RSAES);
    let pt = rsa::decrypt(b, &key, RsaScheme::RSAES, HashAlg::Sha256, &[], &ct).unwrap();
    assert_eq!(pt.as_slice(), PLAINTEXT);
}

#[test]
fn test_known_answers_native() {
    check_known_answers(&NativeBackend::new());
}

#[test]
fn test_known_answers_external() {
    check_known_answers(&ExternalBackend::new());
}

#[test]
fn test_pss_consumes_one_digest_of_salt() {
    let b = NativeBackend::new();
    let key = rsa_2048_private(&b);
    for hash in HashAlg::ALL {
        let mut rng = StreamSource::new();
        rsa::sign(&b, &key, RsaScheme::RSAPSS, hash, &message_digest(hash), &mut rng).unwrap();
        assert_eq!(rng.position(), hash.digest_size());
    }
}

#[test]
fn test_wrong_oaep_label_fails() {
    let b = NativeBackend::new();
    let key = rsa_2048_private(&b);
    let ct = unhex(RSA_2048_OAEP_SHA256);
    let err = rsa::decrypt(&b, &key, RsaScheme::OAEP, HashAlg::Sha256, b"TPM2CRYPT", &ct).unwrap_err();
    assert!(matches!(err, Error::Decryption { .. }));
    assert!(!err.is_fatal());
}

#[test]
fn test_signature_under_other_hash_is_rejected() {
    let b = NativeBackend::new();
    let public = rsa_2048_public();
    let sig = unhex(RSA_2048_RSASSA_SHA256);
    let digest = message_digest(HashAlg::Sha256);
    rsa::verify(&b, &public, RsaScheme::RSASSA, HashAlg::Sha256, &digest, &sig).unwrap();

    let err = rsa::verify(
        &b,
        &public,
        RsaScheme::RSASSA,
        HashAlg::Sha384,
        &message_digest(HashAlg::Sha384),
        &sig,
    )
    .unwrap_err();
    assert!(matches!(err, Error::Signature { .. }));
}

#[test]
fn test_key_from_one_prime_reproduces_signatures() {
    let b = ExternalBackend::new();
    let mut cache = ExpDCache::new();
    let key = RsaPrivateKey::from_prime(&b, &mut cache, rsa_2048_public(), &unhex(RSA_2048_P)).unwrap();
    assert_eq!(key.q(), unhex(RSA_2048_Q).as_slice());
    assert_eq!(cache.len(), 1);

    let digest = message_digest(HashAlg::Sha512);
    let sig = rsa::sign(&b, &key, RsaScheme::RSASSA, HashAlg::Sha512, &digest, &mut StreamSource::new()).unwrap();
    assert_eq!(hex::encode(sig), RSA_2048_RSASSA_SHA512);

    // Loading by the other prime lands in a second cache slot
    let again = RsaPrivateKey::from_prime(&b, &mut cache, rsa_2048_public(), &unhex(RSA_2048_Q)).unwrap();
    assert_eq!(again.q(), unhex(RSA_2048_P).as_slice());
    assert_eq!(cache.len(), 2);
}
