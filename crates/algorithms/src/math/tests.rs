use super::*;
use crate::error::Error;
use proptest::prelude::*;
use tpm2crypt_api::FailureCode;

const NATIVE: NativeBackend = NativeBackend;
const EXTERNAL: ExternalBackend = ExternalBackend;

fn fatal_code(err: Error) -> FailureCode {
    match err {
        Error::Fatal { code, .. } => code,
        other => panic!("expected fatal error, got {:?}", other),
    }
}

fn nonzero(bytes: &[u8]) -> bool {
    bytes.iter().any(|&b| b != 0)
}

fn bytes(max: usize) -> impl Strategy<Value = Vec<u8>> {
    proptest::collection::vec(any::<u8>(), 0..max)
}

/// Runs `op` on both backends and compares the encoded results
fn same<F, G>(native: F, external: G)
where
    F: FnOnce(&NativeBackend) -> Result<Vec<u8>>,
    G: FnOnce(&ExternalBackend) -> Result<Vec<u8>>,
{
    let n = native(&NATIVE);
    let e = external(&EXTERNAL);
    match (n, e) {
        (Ok(a), Ok(b)) => assert_eq!(hex::encode(a), hex::encode(b)),
        (Err(a), Err(b)) => assert_eq!(a.is_fatal(), b.is_fatal()),
        (a, b) => panic!("backends disagree: {:?} vs {:?}", a, b),
    }
}

#[test]
fn test_bit_test_reads_single_bits() {
    // 0x8001_0000_0000_0000_0005: bits 0, 2, 64 and 79 are set
    let bytes = [0x80, 0x01, 0, 0, 0, 0, 0, 0, 0, 0x05];
    let n = NATIVE.from_be_bytes(&bytes);
    let e = EXTERNAL.from_be_bytes(&bytes);
    for bit in [0, 1, 2, 3, 63, 64, 65, 79, 80, 1000] {
        let expected = matches!(bit, 0 | 2 | 64 | 79);
        assert_eq!(NATIVE.bit_test(&n, bit), expected, "native bit {}", bit);
        assert_eq!(EXTERNAL.bit_test(&e, bit), expected, "external bit {}", bit);
    }
}

#[test]
fn test_backend_names() {
    assert_eq!(NATIVE.name(), "native");
    assert_eq!(EXTERNAL.name(), "num-bigint");
}

#[test]
fn test_zero_encodes_as_empty() {
    assert!(NATIVE.to_be_bytes(&NATIVE.from_word(0)).is_empty());
    assert!(EXTERNAL.to_be_bytes(&EXTERNAL.from_word(0)).is_empty());
    assert_eq!(EXTERNAL.to_be_bytes_padded(&EXTERNAL.from_word(0), 3).unwrap(), vec![0, 0, 0]);
}

#[test]
fn test_division_by_zero_is_fatal_on_both() {
    let a = [0x12u8, 0x34];
    let code = fatal_code(NATIVE.div_rem(&NATIVE.from_be_bytes(&a), &NATIVE.from_word(0)).unwrap_err());
    assert_eq!(code, FailureCode::DivideByZero);
    let code = fatal_code(EXTERNAL.div_rem(&EXTERNAL.from_be_bytes(&a), &EXTERNAL.from_word(0)).unwrap_err());
    assert_eq!(code, FailureCode::DivideByZero);

    assert!(NATIVE.mod_word(&NATIVE.from_word(9), 0).unwrap_err().is_fatal());
    assert!(EXTERNAL.mod_word(&EXTERNAL.from_word(9), 0).unwrap_err().is_fatal());
}

#[test]
fn test_underflow_is_fatal_on_both() {
    assert!(NATIVE.sub(&NATIVE.from_word(1), &NATIVE.from_word(2)).unwrap_err().is_fatal());
    assert!(EXTERNAL.sub(&EXTERNAL.from_word(1), &EXTERNAL.from_word(2)).unwrap_err().is_fatal());
}

#[test]
fn test_mod_inverse_absent() {
    assert_eq!(NATIVE.mod_inverse(&NATIVE.from_word(6), &NATIVE.from_word(9)).unwrap(), None);
    assert_eq!(EXTERNAL.mod_inverse(&EXTERNAL.from_word(6), &EXTERNAL.from_word(9)).unwrap(), None);
    let inv = NATIVE.mod_inverse(&NATIVE.from_word(3), &NATIVE.from_word(7)).unwrap().unwrap();
    assert!(NATIVE.eq_word(&inv, 5));
}

#[test]
fn test_mod_sub_wraps() {
    for (a, b, expected) in [(3u64, 5u64, 9u64), (5, 3, 2), (0, 0, 0), (18, 1, 6)] {
        let m = NATIVE.from_word(11);
        let r = NATIVE.mod_sub(&NATIVE.from_word(a), &NATIVE.from_word(b), &m).unwrap();
        assert!(NATIVE.eq_word(&r, expected), "{} - {}", a, b);
    }
}

#[test]
fn test_point_mul_matches_across_backends() {
    for id in [CurveId::NIST_P256, CurveId::NIST_P384, CurveId::SM2_P256] {
        let cn = NATIVE.curve_init(id).unwrap();
        let ce = EXTERNAL.curve_init(id).unwrap();
        let k = hex::decode("0d6c3f0e2bb3a9b6c2e44f5d38d9ab5e7a34c1e0b2c07f1a6d8e9f0a1b2c3d4e").unwrap();
        let pn = NATIVE.point_mul(&cn, &NATIVE.from_be_bytes(&k), &cn.g).unwrap();
        let pe = EXTERNAL.point_mul(&ce, &EXTERNAL.from_be_bytes(&k), &ce.g).unwrap();
        assert_eq!(NATIVE.point_to_wire(&cn, &pn).unwrap(), EXTERNAL.point_to_wire(&ce, &pe).unwrap());
        assert!(NATIVE.point_is_on_curve(&cn, &pn).unwrap());
    }
}

#[test]
fn test_point_mul2_equals_sum() {
    let c = NATIVE.curve_init(CurveId::NIST_P256).unwrap();
    let u = NATIVE.from_word(0x1234_5678);
    let v = NATIVE.from_word(0x9abc_def0);
    let q = NATIVE.point_mul(&c, &NATIVE.from_word(7), &c.g).unwrap();
    let combined = NATIVE.point_mul2(&c, &u, &c.g, &v, &q).unwrap();

    // u*G + v*(7G) == (u + 7v)*G
    let scalar = NATIVE
        .add(&u, &NATIVE.mul(&v, &NATIVE.from_word(7)).unwrap())
        .unwrap();
    let direct = NATIVE.point_mul(&c, &scalar, &c.g).unwrap();
    assert_eq!(combined, direct);
}

#[test]
fn test_order_times_generator_is_infinity() {
    let c = EXTERNAL.curve_init(CurveId::NIST_P192).unwrap();
    let r = EXTERNAL.point_mul(&c, &c.n, &c.g).unwrap();
    assert!(crate::ec::arith::is_infinity(&EXTERNAL, &r));
    assert!(EXTERNAL.point_to_wire(&c, &r).is_err());
}

#[test]
fn test_negate_then_add_is_infinity() {
    let c = NATIVE.curve_init(CurveId::NIST_P224).unwrap();
    let neg = NATIVE.point_negate(&c, &c.g).unwrap();
    assert!(NATIVE.point_is_on_curve(&c, &neg).unwrap());
    let sum = NATIVE.point_add(&c, &c.g, &neg).unwrap();
    assert!(crate::ec::arith::is_infinity(&NATIVE, &sum));
}

proptest! {
    #[test]
    fn prop_add_sub_mul_agree(a in bytes(80), b in bytes(80)) {
        same(
            |n| n.add(&n.from_be_bytes(&a), &n.from_be_bytes(&b)).map(|r| n.to_be_bytes(&r)),
            |e| e.add(&e.from_be_bytes(&a), &e.from_be_bytes(&b)).map(|r| e.to_be_bytes(&r)),
        );
        same(
            |n| n.sub(&n.from_be_bytes(&a), &n.from_be_bytes(&b)).map(|r| n.to_be_bytes(&r)),
            |e| e.sub(&e.from_be_bytes(&a), &e.from_be_bytes(&b)).map(|r| e.to_be_bytes(&r)),
        );
        same(
            |n| n.mul(&n.from_be_bytes(&a), &n.from_be_bytes(&b)).map(|r| n.to_be_bytes(&r)),
            |e| e.mul(&e.from_be_bytes(&a), &e.from_be_bytes(&b)).map(|r| e.to_be_bytes(&r)),
        );
    }

    #[test]
    fn prop_div_rem_agree(a in bytes(128), d in bytes(64)) {
        prop_assume!(nonzero(&d));
        let qn = NATIVE.div_rem(&NATIVE.from_be_bytes(&a), &NATIVE.from_be_bytes(&d)).unwrap();
        let qe = EXTERNAL.div_rem(&EXTERNAL.from_be_bytes(&a), &EXTERNAL.from_be_bytes(&d)).unwrap();
        prop_assert_eq!(NATIVE.to_be_bytes(&qn.0), EXTERNAL.to_be_bytes(&qe.0));
        prop_assert_eq!(NATIVE.to_be_bytes(&qn.1), EXTERNAL.to_be_bytes(&qe.1));
    }

    #[test]
    fn prop_shifts_and_bits_agree(a in bytes(64), s in 0usize..200) {
        let an = NATIVE.from_be_bytes(&a);
        let ae = EXTERNAL.from_be_bytes(&a);
        prop_assert_eq!(NATIVE.bits(&an), EXTERNAL.bits(&ae));
        prop_assert_eq!(NATIVE.bit_test(&an, s), EXTERNAL.bit_test(&ae, s));
        prop_assert_eq!(
            NATIVE.to_be_bytes(&NATIVE.shift_left(&an, s).unwrap()),
            EXTERNAL.to_be_bytes(&EXTERNAL.shift_left(&ae, s).unwrap())
        );
        prop_assert_eq!(
            NATIVE.to_be_bytes(&NATIVE.shift_right(&an, s).unwrap()),
            EXTERNAL.to_be_bytes(&EXTERNAL.shift_right(&ae, s).unwrap())
        );
        prop_assert_eq!(
            NATIVE.to_be_bytes(&NATIVE.mask_bits(&an, s).unwrap()),
            EXTERNAL.to_be_bytes(&EXTERNAL.mask_bits(&ae, s).unwrap())
        );
    }

    #[test]
    fn prop_modular_ops_agree(a in bytes(64), b in bytes(64), m in bytes(64)) {
        prop_assume!(nonzero(&m));
        let (an, bn, mn) = (NATIVE.from_be_bytes(&a), NATIVE.from_be_bytes(&b), NATIVE.from_be_bytes(&m));
        let (ae, be, me) = (EXTERNAL.from_be_bytes(&a), EXTERNAL.from_be_bytes(&b), EXTERNAL.from_be_bytes(&m));
        prop_assert_eq!(
            NATIVE.to_be_bytes(&NATIVE.mod_mult(&an, &bn, &mn).unwrap()),
            EXTERNAL.to_be_bytes(&EXTERNAL.mod_mult(&ae, &be, &me).unwrap())
        );
        prop_assert_eq!(
            NATIVE.mod_inverse(&an, &mn).unwrap().map(|r| NATIVE.to_be_bytes(&r)),
            EXTERNAL.mod_inverse(&ae, &me).unwrap().map(|r| EXTERNAL.to_be_bytes(&r))
        );
        prop_assert_eq!(
            NATIVE.to_be_bytes(&NATIVE.gcd(&an, &mn).unwrap()),
            EXTERNAL.to_be_bytes(&EXTERNAL.gcd(&ae, &me).unwrap())
        );
        prop_assert_eq!(NATIVE.mod_word(&an, 65521).unwrap(), EXTERNAL.mod_word(&ae, 65521).unwrap());
    }

    #[cfg(feature = "rsa")]
    #[test]
    fn prop_mod_exp_agrees(a in bytes(64), x in bytes(32), m in bytes(64)) {
        prop_assume!(nonzero(&m));
        let r = NATIVE.mod_exp(&NATIVE.from_be_bytes(&a), &NATIVE.from_be_bytes(&x), &NATIVE.from_be_bytes(&m)).unwrap();
        let s = EXTERNAL.mod_exp(&EXTERNAL.from_be_bytes(&a), &EXTERNAL.from_be_bytes(&x), &EXTERNAL.from_be_bytes(&m)).unwrap();
        prop_assert_eq!(NATIVE.to_be_bytes(&r), EXTERNAL.to_be_bytes(&s));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_scalar_mul_agrees(k in proptest::collection::vec(any::<u8>(), 1..33)) {
        let cn = NATIVE.curve_init(CurveId::NIST_P256).unwrap();
        let ce = EXTERNAL.curve_init(CurveId::NIST_P256).unwrap();
        let pn = NATIVE.point_mul(&cn, &NATIVE.from_be_bytes(&k), &cn.g).unwrap();
        let pe = EXTERNAL.point_mul(&ce, &EXTERNAL.from_be_bytes(&k), &ce.g).unwrap();
        let wn = NATIVE.point_to_wire(&cn, &pn).ok();
        let we = EXTERNAL.point_to_wire(&ce, &pe).ok();
        prop_assert_eq!(wn, we);
    }
}
