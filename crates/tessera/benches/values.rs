//! Value core benchmarks using divan
//!
//! Benchmarks for comparison, arithmetic and type sniffing.

use tessera::types::Timestamp;
use tessera::{ScalarValue, TypeSniffer, Variant};

fn main() {
    divan::main();
}

// === Scalar Benchmarks ===

mod scalar {
    use super::*;

    #[divan::bench]
    fn same_tag_compare(bencher: divan::Bencher) {
        let a = ScalarValue::from(41i64);
        let b = ScalarValue::from(42i64);

        bencher.bench_local(|| divan::black_box(&a).compare(divan::black_box(&b)));
    }

    #[divan::bench]
    fn promoted_compare(bencher: divan::Bencher) {
        let a = ScalarValue::from(41i32);
        let b = ScalarValue::from(41.5f64);

        bencher.bench_local(|| divan::black_box(&a).compare(divan::black_box(&b)));
    }

    #[divan::bench]
    fn wrapping_add(bencher: divan::Bencher) {
        let a = ScalarValue::from(i32::MAX);
        let b = ScalarValue::from(7i32);

        bencher.bench_local(|| divan::black_box(&a).add(divan::black_box(&b)));
    }

    #[divan::bench]
    fn date_compare(bencher: divan::Bencher) {
        let a = ScalarValue::date(Timestamp::from_ymd_hms(2024, 1, 15, 8, 0, 0).unwrap());
        let b = ScalarValue::date(Timestamp::from_ymd_hms(2024, 1, 15, 20, 0, 0).unwrap());

        bencher.bench_local(|| divan::black_box(&a).equals(divan::black_box(&b)));
    }
}

// === Variant Benchmarks ===

mod variant {
    use super::*;

    #[divan::bench]
    fn numeric_vs_text(bencher: divan::Bencher) {
        let a = Variant::from(12345i32);
        let b = Variant::from("12345");

        bencher.bench_local(|| divan::black_box(&a).equals(divan::black_box(&b)));
    }

    #[divan::bench]
    fn binary_compare(bencher: divan::Bencher) {
        let a = Variant::from(vec![7u8; 256]);
        let mut bytes = vec![7u8; 256];
        bytes[255] = 8;
        let b = Variant::from(bytes);

        bencher.bench_local(|| divan::black_box(&a).compare(divan::black_box(&b)));
    }
}

// === Sniffer Benchmarks ===

mod sniffer {
    use super::*;

    fn samples(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{}.{}", i, i % 10)).collect()
    }

    #[divan::bench(args = [100, 1000, 10000])]
    fn observe_decimals(bencher: divan::Bencher, n: usize) {
        let samples = samples(n);

        bencher.bench_local(|| {
            let mut sniffer = TypeSniffer::new();
            sniffer.observe_all(samples.iter().map(|s| Some(s.as_str())));
            sniffer.best_type()
        });
    }
}
