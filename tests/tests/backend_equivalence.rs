//! The built-in and the num-bigint backends must be interchangeable

use proptest::prelude::*;
use tpm2crypt_algorithms::{ExternalBackend, MathBackend, NativeBackend};
use tpm2crypt_api::{CurveId, HashAlg, KeyExchangeScheme, SigScheme};
use tpm2crypt_tests::*;

const CURVES: [CurveId; 7] = [
    CurveId::NIST_P192,
    CurveId::NIST_P224,
    CurveId::NIST_P256,
    CurveId::NIST_P384,
    CurveId::NIST_P521,
    CurveId::BN_P256,
    CurveId::SM2_P256,
];

/// Moduli must exceed one
fn above_one(bytes: &[u8]) -> bool {
    let mut rest = bytes.iter().skip_while(|&&b| b == 0);
    match (rest.next(), rest.next()) {
        (None, _) => false,
        (Some(&b), None) => b > 1,
        _ => true,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_modular_arithmetic_agrees(
        a in proptest::collection::vec(any::<u8>(), 0..96),
        c in proptest::collection::vec(any::<u8>(), 0..96),
        m in proptest::collection::vec(any::<u8>(), 1..64),
    ) {
        prop_assume!(above_one(&m));
        let (n, e) = (NativeBackend::new(), ExternalBackend::new());

        let (an, cn, mn) = (n.from_be_bytes(&a), n.from_be_bytes(&c), n.from_be_bytes(&m));
        let (ae, ce, me) = (e.from_be_bytes(&a), e.from_be_bytes(&c), e.from_be_bytes(&m));

        let (qn, rn) = n.div_rem(&an, &mn).unwrap();
        let (qe, re) = e.div_rem(&ae, &me).unwrap();
        prop_assert_eq!(n.to_be_bytes(&qn), e.to_be_bytes(&qe));
        prop_assert_eq!(n.to_be_bytes(&rn), e.to_be_bytes(&re));

        let pn = n.mod_mult(&an, &cn, &mn).unwrap();
        let pe = e.mod_mult(&ae, &ce, &me).unwrap();
        prop_assert_eq!(n.to_be_bytes(&pn), e.to_be_bytes(&pe));

        let inv_n = n.mod_inverse(&an, &mn).unwrap().map(|x| n.to_be_bytes(&x));
        let inv_e = e.mod_inverse(&ae, &me).unwrap().map(|x| e.to_be_bytes(&x));
        prop_assert_eq!(inv_n, inv_e);
    }

    #[test]
    fn prop_mod_exp_agrees(
        base in proptest::collection::vec(any::<u8>(), 0..48),
        exp in proptest::collection::vec(any::<u8>(), 0..16),
        m in proptest::collection::vec(any::<u8>(), 1..48),
    ) {
        let (n, e) = (NativeBackend::new(), ExternalBackend::new());
        let mut m = m;
        let last = m.len() - 1;
        m[last] |= 1;
        prop_assume!(above_one(&m));

        let rn = n.mod_exp(&n.from_be_bytes(&base), &n.from_be_bytes(&exp), &n.from_be_bytes(&m)).unwrap();
        let re = e.mod_exp(&e.from_be_bytes(&base), &e.from_be_bytes(&exp), &e.from_be_bytes(&m)).unwrap();
        prop_assert_eq!(n.to_be_bytes(&rn), e.to_be_bytes(&re));
    }

    #[test]
    fn prop_scalar_multiplication_agrees(k in proptest::collection::vec(any::<u8>(), 1..20), which in 0usize..7) {
        let (n, e) = (NativeBackend::new(), ExternalBackend::new());
        let id = CURVES[which];
        let (cn, ce) = (n.curve_init(id).unwrap(), e.curve_init(id).unwrap());
        let pn = n.point_mul(&cn, &n.from_be_bytes(&k), &cn.g).unwrap();
        let pe = e.point_mul(&ce, &e.from_be_bytes(&k), &ce.g).unwrap();
        match (n.point_to_wire(&cn, &pn), e.point_to_wire(&ce, &pe)) {
            (Ok(wn), Ok(we)) => prop_assert_eq!(wn, we),
            (Err(_), Err(_)) => {}
            (a, b) => prop_assert!(false, "backends disagree: {:?} vs {:?}", a, b),
        }
    }
}

#[test]
fn test_signatures_cross_backends() {
    let (n, e) = (NativeBackend::new(), ExternalBackend::new());
    let mut rng = seeded_rng(5);
    let cases = [
        (CurveId::NIST_P256, SigScheme::ECDSA, HashAlg::Sha256),
        (CurveId::NIST_P384, SigScheme::EC_SCHNORR, HashAlg::Sha384),
        (CurveId::SM2_P256, SigScheme::SM2, HashAlg::Sha256),
        (CurveId::BN_P256, SigScheme::ECDSA, HashAlg::Sha1),
    ];
    for (id, scheme, hash) in cases {
        let (cn, ce) = (n.curve_init(id).unwrap(), e.curve_init(id).unwrap());
        let (d, q) = tpm2crypt_algorithms::ec::generate_key_pair(&n, &cn, &mut rng).unwrap();
        let d = n.to_be_bytes_padded(&d, cn.order_bytes()).unwrap();
        let q = n.point_to_wire(&cn, &q).unwrap();
        let digest = message_digest(hash);

        let sig = tpm2crypt_sign::sign(&n, &cn, scheme, hash, &d, &digest, &mut rng).unwrap();
        tpm2crypt_sign::verify(&e, &ce, &q, &sig, &digest).unwrap();

        let sig = tpm2crypt_sign::sign(&e, &ce, scheme, hash, &d, &digest, &mut rng).unwrap();
        tpm2crypt_sign::verify(&n, &cn, &q, &sig, &digest).unwrap();
    }
}

#[test]
fn test_key_exchange_cross_backends() {
    let (n, e) = (NativeBackend::new(), ExternalBackend::new());
    let mut rng = seeded_rng(9);
    for scheme in [KeyExchangeScheme::ECDH, KeyExchangeScheme::ECMQV, KeyExchangeScheme::SM2] {
        let id = if scheme == KeyExchangeScheme::SM2 {
            CurveId::SM2_P256
        } else {
            CurveId::NIST_P256
        };
        let (cn, ce) = (n.curve_init(id).unwrap(), e.curve_init(id).unwrap());
        let mut pair = || {
            let (d, q) = tpm2crypt_algorithms::ec::generate_key_pair(&n, &cn, &mut rng).unwrap();
            (
                n.to_be_bytes_padded(&d, cn.order_bytes()).unwrap(),
                n.point_to_wire(&cn, &q).unwrap(),
            )
        };
        let (ds_a, qs_a) = pair();
        let (de_a, qe_a) = pair();
        let (ds_b, qs_b) = pair();
        let (de_b, qe_b) = pair();

        let a = tpm2crypt_exchange::two_phase(&n, &cn, scheme, &ds_a, &de_a, &qs_b, &qe_b).unwrap();
        let b = tpm2crypt_exchange::two_phase(&e, &ce, scheme, &ds_b, &de_b, &qs_a, &qe_a).unwrap();
        assert_eq!(a.z1, b.z1, "{:?}", scheme);
        assert_eq!(a.z2, b.z2, "{:?}", scheme);
    }
}
