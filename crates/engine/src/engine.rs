//! The crypto instance and its command boundary

use log::{debug, warn};
use tpm2crypt_algorithms::drbg::{EntropySource, RandomSource, SystemDrbg};
use tpm2crypt_algorithms::ec::{generate_key_pair, EccCurve, EccPoint};
use tpm2crypt_algorithms::error::{validate, Error as AlgError, Result as AlgResult};
use tpm2crypt_algorithms::MathBackend;
use tpm2crypt_api::{
    CurveId, EccParameter, EccPoint as WirePoint, EccSignature, Error, FailureCode, HashAlg,
    KeyExchangeScheme, Result, SigScheme,
};
use tpm2crypt_common::SecretVec;
use tpm2crypt_exchange::TwoPhaseOutput;
use tpm2crypt_sign::common::{private_scalar, validated_point};
use tpm2crypt_sign::ecdaa::{self, Basename};
use tpm2crypt_sign::{CancelSignal, CommitState};

#[cfg(feature = "rsa")]
use tpm2crypt_algorithms::rsa::{self, ExpDCache, RsaPrivateKey, RsaPublicKey};
#[cfg(feature = "rsa")]
use tpm2crypt_api::RsaScheme;

use crate::config::EngineConfig;
use crate::failure::FailureMode;
use crate::self_test;

/// State a command runs against
///
/// One of each per instance: the math backend, the instance DRBG, the RSA
/// private-exponent cache and the ECDAA commit state.
pub struct EngineState<B: MathBackend, S: EntropySource> {
    /// Math backend
    pub backend: B,
    /// Instance DRBG
    pub drbg: SystemDrbg<S>,
    /// Cache of `(Q, D)` for recently loaded RSA keys
    #[cfg(feature = "rsa")]
    pub cache: ExpDCache,
    /// ECDAA commit nonce and outstanding counters
    pub commit: CommitState,
}

impl<B: MathBackend, S: EntropySource> EngineState<B, S> {
    fn curve(&self, id: CurveId) -> AlgResult<EccCurve<B::Int>> {
        self.backend.curve_init(id)
    }
}

/// Wire-form result of an ECDAA commit
#[derive(Debug, Clone, PartialEq)]
pub struct CommitOutput {
    /// Counter to sign with
    pub counter: u64,
    /// `[d]M`, when a basename was given
    pub k: Option<WirePoint>,
    /// `[r]M`, when a basename was given
    pub l: Option<WirePoint>,
    /// `[r]P1`
    pub e: WirePoint,
}

/// A software TPM's crypto instance
///
/// Every operation runs through [`CryptoEngine::execute`]. A fatal condition
/// raised anywhere below it latches failure mode; from then on every call
/// returns the same [`Error::Failure`] without doing any work until
/// [`CryptoEngine::reset`] succeeds.
pub struct CryptoEngine<B: MathBackend, S: EntropySource> {
    state: EngineState<B, S>,
    config: EngineConfig,
    failure: FailureMode,
}

impl<B: MathBackend, S: EntropySource> CryptoEngine<B, S> {
    /// Build an instance and run startup
    ///
    /// A startup failure does not prevent construction; the instance is
    /// simply in failure mode, see [`CryptoEngine::failure_code`].
    pub fn startup(backend: B, source: S, config: EngineConfig) -> Self {
        let mut engine = Self {
            state: EngineState {
                drbg: SystemDrbg::new(source, config.drbg),
                backend,
                #[cfg(feature = "rsa")]
                cache: ExpDCache::new(),
                commit: CommitState::new([0u8; 32]),
            },
            config,
            failure: FailureMode::default(),
        };
        if let Err(e) = engine.initialize() {
            warn!("startup failed: {}", e);
        }
        engine
    }

    fn initialize(&mut self) -> Result<()> {
        let run_self_tests = self.config.run_self_tests;
        let personalization = self.config.personalization.clone();
        self.execute(|st| {
            if run_self_tests {
                self_test::power_on(&st.backend)?;
            }
            st.drbg.reinstantiate(&personalization)?;
            st.commit = CommitState::generate(&mut st.drbg)?;
            #[cfg(feature = "rsa")]
            st.cache.clear();
            debug!("engine started on the {} backend", st.backend.name());
            Ok(())
        })
    }

    /// Full reset: leave failure mode, wipe all state and start again
    pub fn reset(&mut self) -> Result<()> {
        self.state.drbg.uninstantiate();
        self.failure.clear();
        self.initialize()
    }

    /// The command boundary
    ///
    /// In failure mode `op` is not run and the recorded failure is returned.
    /// A fatal error out of `op` is latched before being returned.
    pub fn execute<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut EngineState<B, S>) -> AlgResult<T>,
    {
        if let Some(code) = self.failure.code() {
            return Err(Error::Failure { code });
        }
        op(&mut self.state).map_err(|e| {
            if let AlgError::Fatal { code, location } = e {
                self.failure.enter(code, location);
            }
            Error::from(e)
        })
    }

    /// Recorded failure, if the instance is in failure mode
    pub fn failure_code(&self) -> Option<FailureCode> {
        self.failure.code()
    }

    /// Failure-mode details, including where the failure was raised
    pub fn failure_mode(&self) -> &FailureMode {
        &self.failure
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// `count` bytes from the instance DRBG
    pub fn get_random(&mut self, count: usize) -> Result<Vec<u8>> {
        self.execute(|st| {
            let mut out = vec![0u8; count];
            st.drbg.fill(&mut out)?;
            Ok(out)
        })
    }

    /// Reseed the instance DRBG with fresh entropy and `additional`
    pub fn stir_random(&mut self, additional: &[u8]) -> Result<()> {
        self.execute(|st| st.drbg.reseed(additional))
    }

    /// Fresh key pair on `curve`: the private scalar padded to the order
    /// size, and the public point
    pub fn ecc_create_key(&mut self, curve: CurveId) -> Result<(SecretVec, WirePoint)> {
        self.execute(|st| {
            let c = st.curve(curve)?;
            let (d, q) = generate_key_pair(&st.backend, &c, &mut st.drbg)?;
            let d = SecretVec::new(st.backend.to_be_bytes_padded(&d, c.order_bytes())?);
            Ok((d, st.backend.point_to_wire(&c, &q)?))
        })
    }

    /// ECDSA, EC-Schnorr or SM2 signature over `digest`
    pub fn ecc_sign(
        &mut self,
        curve: CurveId,
        scheme: SigScheme,
        hash: HashAlg,
        d: &[u8],
        digest: &[u8],
    ) -> Result<EccSignature> {
        self.execute(|st| {
            let c = st.curve(curve)?;
            tpm2crypt_sign::sign(&st.backend, &c, scheme, hash, d, digest, &mut st.drbg)
        })
    }

    /// Check an ECDSA, EC-Schnorr or SM2 signature
    pub fn ecc_verify(
        &mut self,
        curve: CurveId,
        q: &WirePoint,
        signature: &EccSignature,
        digest: &[u8],
    ) -> Result<()> {
        self.execute(|st| {
            let c = st.curve(curve)?;
            tpm2crypt_sign::verify(&st.backend, &c, q, signature, digest)
        })
    }

    /// ECDAA commit with private key `d` of the key named `name`
    ///
    /// `p1` defaults to the generator. `basename` selects `M` and adds `K`
    /// and `L` to the output. `cancel` is polled between multiplications.
    pub fn ecdaa_commit<C: CancelSignal + ?Sized>(
        &mut self,
        curve: CurveId,
        d: &[u8],
        name: &[u8],
        p1: Option<&WirePoint>,
        basename: Option<Basename<'_>>,
        cancel: &C,
    ) -> Result<CommitOutput> {
        self.execute(|st| {
            let b = &st.backend;
            let c = st.curve(curve)?;
            let d = private_scalar(b, &c, d)?;
            let p1 = p1.map(|p| validated_point(b, &c, p)).transpose()?;
            let out = ecdaa::commit(b, &c, &mut st.commit, &d, name, p1.as_ref(), basename, cancel)?;
            let wire = |p: Option<EccPoint<B::Int>>| p.map(|p| b.point_to_wire(&c, &p)).transpose();
            Ok(CommitOutput {
                counter: out.counter,
                e: b.point_to_wire(&c, &out.e)?,
                k: wire(out.k)?,
                l: wire(out.l)?,
            })
        })
    }

    /// ECDAA signature over `digest` using commit `counter`
    ///
    /// The signature's `r` carries the nonce. A counter that is not
    /// outstanding is a `Value` error.
    #[allow(clippy::too_many_arguments)]
    pub fn ecdaa_sign(
        &mut self,
        curve: CurveId,
        counter: u64,
        name: &[u8],
        hash: HashAlg,
        d: &[u8],
        digest: &[u8],
    ) -> Result<EccSignature> {
        self.execute(|st| {
            let b = &st.backend;
            let c = st.curve(curve)?;
            validate::length("digest", digest.len(), hash.digest_size())?;
            let d = private_scalar(b, &c, d)?;
            let (nonce, s) =
                ecdaa::sign(b, &c, &mut st.commit, counter, name, hash, &d, digest, &mut st.drbg)?;
            Ok(EccSignature {
                scheme: SigScheme::ECDAA,
                hash,
                r: to_param(&nonce)?,
                s: to_param(&b.to_be_bytes_padded(&s, c.order_bytes())?)?,
            })
        })
    }

    /// Check an ECDAA signature against commitment `e`
    ///
    /// `q` is the signer's key relative to `p1`, which defaults to the
    /// generator.
    pub fn ecdaa_verify(
        &mut self,
        curve: CurveId,
        p1: Option<&WirePoint>,
        e: &WirePoint,
        q: &WirePoint,
        signature: &EccSignature,
        digest: &[u8],
    ) -> Result<()> {
        self.execute(|st| {
            let b = &st.backend;
            let c = st.curve(curve)?;
            if signature.scheme != SigScheme::ECDAA {
                return Err(AlgError::Scheme {
                    context: "ECDAA verification",
                });
            }
            let p1 = match p1 {
                Some(p) => validated_point(b, &c, p)?,
                None => c.g.clone(),
            };
            let e = validated_point(b, &c, e)?;
            let q = validated_point(b, &c, q)?;
            let s = b.from_be_bytes(signature.s.as_slice());
            ecdaa::verify(
                b,
                &c,
                signature.hash,
                &p1,
                &e,
                &q,
                signature.r.as_slice(),
                digest,
                &s,
            )
        })
    }

    /// One-pass ECDH: `Z = [h·d]Q`
    pub fn ecdh_zgen(&mut self, curve: CurveId, d: &[u8], q: &WirePoint) -> Result<WirePoint> {
        self.execute(|st| {
            let c = st.curve(curve)?;
            tpm2crypt_exchange::ecdh_zgen(&st.backend, &c, d, q)
        })
    }

    /// Ephemeral key pair plus its shared point with peer `q`
    ///
    /// Returns `(Z, ephemeral public point)`.
    pub fn ecdh_key_gen(&mut self, curve: CurveId, q: &WirePoint) -> Result<(WirePoint, WirePoint)> {
        self.execute(|st| {
            let b = &st.backend;
            let c = st.curve(curve)?;
            let q = validated_point(b, &c, q)?;
            let (d, public) = generate_key_pair(b, &c, &mut st.drbg)?;
            let z = tpm2crypt_exchange::zgen::zgen(b, &c, &d, &q)?;
            Ok((b.point_to_wire(&c, &z)?, b.point_to_wire(&c, &public)?))
        })
    }

    /// Second phase of a two-phase key exchange
    pub fn two_phase_exchange(
        &mut self,
        curve: CurveId,
        scheme: KeyExchangeScheme,
        ds_a: &[u8],
        de_a: &[u8],
        qs_b: &WirePoint,
        qe_b: &WirePoint,
    ) -> Result<TwoPhaseOutput> {
        self.execute(|st| {
            let c = st.curve(curve)?;
            tpm2crypt_exchange::two_phase(&st.backend, &c, scheme, ds_a, de_a, qs_b, qe_b)
        })
    }
}

fn to_param(bytes: &[u8]) -> AlgResult<EccParameter> {
    EccParameter::from_slice(bytes).map_err(|_| AlgError::Length {
        context: "ECC parameter",
        expected: EccParameter::CAPACITY,
        actual: bytes.len(),
    })
}

#[cfg(feature = "rsa")]
impl<B: MathBackend, S: EntropySource> CryptoEngine<B, S> {
    /// Fresh RSA key of `bits` bits; an exponent of zero selects 65537
    pub fn rsa_create_key(&mut self, bits: usize, exponent: u32) -> Result<RsaPrivateKey> {
        self.execute(|st| rsa::generate_key(&st.backend, bits, exponent, &mut st.drbg))
    }

    /// Rebuild a private key from its public part and one prime, going
    /// through the exponent cache
    pub fn rsa_load_key(&mut self, public: RsaPublicKey, p: &[u8]) -> Result<RsaPrivateKey> {
        self.execute(|st| RsaPrivateKey::from_prime(&st.backend, &mut st.cache, public, p))
    }

    /// Encrypt `message` under `scheme`
    pub fn rsa_encrypt(
        &mut self,
        key: &RsaPublicKey,
        scheme: RsaScheme,
        hash: HashAlg,
        label: &[u8],
        message: &[u8],
    ) -> Result<Vec<u8>> {
        self.execute(|st| rsa::encrypt(&st.backend, key, scheme, hash, label, message, &mut st.drbg))
    }

    /// Decrypt `ciphertext` under `scheme`
    pub fn rsa_decrypt(
        &mut self,
        key: &RsaPrivateKey,
        scheme: RsaScheme,
        hash: HashAlg,
        label: &[u8],
        ciphertext: &[u8],
    ) -> Result<SecretVec> {
        self.execute(|st| rsa::decrypt(&st.backend, key, scheme, hash, label, ciphertext))
    }

    /// RSASSA or PSS signature over `digest`
    pub fn rsa_sign(
        &mut self,
        key: &RsaPrivateKey,
        scheme: RsaScheme,
        hash: HashAlg,
        digest: &[u8],
    ) -> Result<Vec<u8>> {
        self.execute(|st| rsa::sign(&st.backend, key, scheme, hash, digest, &mut st.drbg))
    }

    /// Check an RSASSA or PSS signature
    pub fn rsa_verify(
        &mut self,
        key: &RsaPublicKey,
        scheme: RsaScheme,
        hash: HashAlg,
        digest: &[u8],
        signature: &[u8],
    ) -> Result<()> {
        self.execute(|st| rsa::verify(&st.backend, key, scheme, hash, digest, signature))
    }
}

impl<B: MathBackend, S: EntropySource> core::fmt::Debug for CryptoEngine<B, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CryptoEngine")
            .field("backend", &self.state.backend.name())
            .field("failure", &self.failure)
            .finish_non_exhaustive()
    }
}
