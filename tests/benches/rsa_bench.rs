use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use tpm2crypt_algorithms::rsa::{self, ExpDCache, RsaPrivateKey};
use tpm2crypt_algorithms::{ExternalBackend, MathBackend, NativeBackend};
use tpm2crypt_api::{HashAlg, RsaScheme};
use tpm2crypt_tests::fixtures::RSA_2048_P;
use tpm2crypt_tests::*;

fn bench_private_ops<B: MathBackend>(c: &mut Criterion, b: &B) {
    let mut group = c.benchmark_group(format!("rsa2048-{}", b.name()));
    group.sample_size(10);
    let key = rsa_2048_private(b);
    let digest = message_digest(HashAlg::Sha256);

    for scheme in [RsaScheme::RSASSA, RsaScheme::RSAPSS] {
        group.bench_with_input(BenchmarkId::new("sign", scheme.0), &scheme, |bench, &scheme| {
            bench.iter(|| {
                black_box(rsa::sign(b, &key, scheme, HashAlg::Sha256, &digest, &mut StreamSource::new()))
            })
        });
    }

    let ct = rsa::encrypt(
        b,
        key.public(),
        RsaScheme::OAEP,
        HashAlg::Sha256,
        LABEL,
        PLAINTEXT,
        &mut StreamSource::new(),
    )
    .expect("fixture encryption");
    group.bench_function("oaep-decrypt", |bench| {
        bench.iter(|| black_box(rsa::decrypt(b, &key, RsaScheme::OAEP, HashAlg::Sha256, LABEL, &ct)))
    });
    group.finish();
}

fn bench_key_load(c: &mut Criterion) {
    let b = NativeBackend::new();
    let p = unhex(RSA_2048_P);
    let mut group = c.benchmark_group("rsa2048-load");
    group.sample_size(10);
    group.bench_function("cold", |bench| {
        bench.iter(|| {
            let mut cache = ExpDCache::new();
            black_box(RsaPrivateKey::from_prime(&b, &mut cache, rsa_2048_public(), &p))
        })
    });
    let mut cache = ExpDCache::new();
    group.bench_function("cached", |bench| {
        bench.iter(|| black_box(RsaPrivateKey::from_prime(&b, &mut cache, rsa_2048_public(), &p)))
    });
    group.finish();
}

fn bench_rsa(c: &mut Criterion) {
    bench_private_ops(c, &NativeBackend::new());
    bench_private_ops(c, &ExternalBackend::new());
    bench_key_load(c);
}

criterion_group!(benches, bench_rsa);
criterion_main!(benches);
