use rayon::prelude::*;
use std::time::Instant;

use qrcoding::{encode, encode_into, ECLevel, MaskPattern, Plan, Version};

fn bench<F: FnMut()>(name: &str, iters: u32, mut f: F) {
    let start = Instant::now();
    for _ in 0..iters {
        f();
    }
    let elapsed = start.elapsed();
    println!("{name:<36}| {:>10.2?} per iter | {iters} iters", elapsed / iters);
}

fn main() {
    println!("Running encoding benchmarks");
    println!("{}", "-".repeat(72));

    let total_start = Instant::now();

    // Cold plan construction, bypassing the cache
    for v in [1, 10, 25, 40] {
        let ver = Version::new(v);
        bench(&format!("plan build v{v}"), 50, || {
            let _ = Plan::new(ver, ECLevel::M, MaskPattern::new(0));
        });
    }

    let inputs = [
        ("numeric 40", "1234567890".repeat(4)),
        ("alphanumeric 300", "HELLO WORLD ".repeat(25)),
        ("byte 1000", "The quick brown fox. ".repeat(48)),
        ("numeric 7089", "9".repeat(7089)),
    ];
    for (name, text) in inputs.iter() {
        bench(&format!("encode {name}"), 200, || {
            encode(text, ECLevel::L).unwrap();
        });

        let mut buf = Vec::new();
        bench(&format!("encode_into {name}"), 200, || {
            let code = encode_into(std::mem::take(&mut buf), text, ECLevel::L).unwrap();
            buf = code.into_bitmap();
        });
    }

    let code = encode(&"0123456789".repeat(4), ECLevel::L).unwrap();
    bench("png render numeric 40", 200, || {
        code.to_png(8).unwrap();
    });

    let texts = (0..4096).map(|i| format!("https://example.com/item/{i}")).collect::<Vec<_>>();
    let start = Instant::now();
    texts.par_iter().for_each(|t| {
        encode(t, ECLevel::Q).unwrap();
    });
    println!("{:<36}| {:>10.2?} total | {} codes", "parallel encode", start.elapsed(), texts.len());

    println!("{}", "-".repeat(72));
    println!("Total time elapsed: {:?}", total_start.elapsed());
}
