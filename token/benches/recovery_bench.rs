// Recovery-path benchmarks.
//
// Covers the typed-data digest, secp256k1 recoverable signing, public-key
// recovery, claim authentication end to end, and the redirected transfer
// hot path at various redirect-table sizes.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use backup_token::config::CHAIN_ID_DEVNET;
use backup_token::crypto::ecdsa::{Secp256k1Recovery, SignerRecovery};
use backup_token::crypto::keys::Wallet;
use backup_token::eip712::{recovery_digest, Eip712Domain};
use backup_token::recovery::RecoveryAuthenticator;
use backup_token::token::BackupToken;

fn bench_recovery_digest(c: &mut Criterion) {
    let domain = Eip712Domain::backup_token(CHAIN_ID_DEVNET, Wallet::generate().address());
    let wallet = Wallet::generate().address();

    c.bench_function("eip712/recovery_digest", |b| {
        b.iter(|| recovery_digest(&domain, wallet));
    });
}

fn bench_sign_claim(c: &mut Criterion) {
    let domain = Eip712Domain::backup_token(CHAIN_ID_DEVNET, Wallet::generate().address());
    let wallet = Wallet::generate();
    let digest = recovery_digest(&domain, wallet.address());

    c.bench_function("secp256k1/sign_prehash", |b| {
        b.iter(|| wallet.sign_prehash(&digest).unwrap());
    });
}

fn bench_recover_signer(c: &mut Criterion) {
    let domain = Eip712Domain::backup_token(CHAIN_ID_DEVNET, Wallet::generate().address());
    let wallet = Wallet::generate();
    let digest = recovery_digest(&domain, wallet.address());
    let signature = wallet.sign_prehash(&digest).unwrap();
    let recovery = Secp256k1Recovery;

    c.bench_function("secp256k1/recover_signer", |b| {
        b.iter(|| recovery.recover_signer(&digest, &signature).unwrap());
    });
}

fn bench_authenticate_claim(c: &mut Criterion) {
    let domain = Eip712Domain::backup_token(CHAIN_ID_DEVNET, Wallet::generate().address());
    let wallet = Wallet::generate();
    let signature = wallet
        .sign_prehash(&recovery_digest(&domain, wallet.address()))
        .unwrap();
    let authenticator = RecoveryAuthenticator::new(domain);

    c.bench_function("recovery/authenticate_claim", |b| {
        b.iter(|| authenticator.verify(wallet.address(), &signature).unwrap());
    });
}

fn bench_redirected_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("token/redirected_transfer");

    for flagged in [0usize, 100, 1_000, 10_000] {
        let owner = Wallet::generate();
        let mut token = BackupToken::new(
            CHAIN_ID_DEVNET,
            Wallet::generate().address(),
            u64::MAX / 2,
            owner.address(),
        )
        .unwrap();

        // Flag `flagged` accounts, then aim every transfer at one of them
        // so the gate lookup pays for the table size.
        let mut target = owner.address();
        for _ in 0..flagged.max(1) {
            let user = Wallet::generate();
            let backup = Wallet::generate();
            token.register_backup(user.address(), backup.address()).unwrap();
            target = user.address();
            if flagged > 0 {
                let sig = user
                    .sign_prehash(&token.recovery_digest(user.address()))
                    .unwrap();
                token.recover(&sig, user.address(), user.address()).unwrap();
            }
        }

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(flagged), &target, |b, to| {
            b.iter(|| token.transfer(owner.address(), *to, 1).unwrap());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_recovery_digest,
    bench_sign_claim,
    bench_recover_signer,
    bench_authenticate_claim,
    bench_redirected_transfer,
);
criterion_main!(benches);
