//! Criterion benchmarks for the peripheral keyboard translation table.
//!
//! Run with:
//! ```bash
//! cargo bench --package tabvnc-core --bench keymap_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tabvnc_core::KeyMapper;

// ── Representative key codes for benchmarking ─────────────────────────────────

const BENCH_CARDKB_CODES: &[u8] = &[
    b'a', b'Z', b'0', b' ', b'~',
    0x0D, // Enter
    0x08, // Backspace
    0x1B, // Escape
    0x09, // Tab
    0xB4, 0xB5, 0xB6, 0xB7, // arrows
    0xFF, // Delete
    0x00, // idle
    0x80, // unmapped
];

fn bench_cardkb_single(c: &mut Criterion) {
    c.bench_function("keymap_cardkb_single", |b| {
        b.iter(|| KeyMapper::cardkb_to_keysym(black_box(0xB5)))
    });
}

fn bench_cardkb_common(c: &mut Criterion) {
    c.bench_function("keymap_cardkb_common_codes", |b| {
        b.iter(|| {
            BENCH_CARDKB_CODES
                .iter()
                .filter(|code| !KeyMapper::cardkb_to_keysym(black_box(**code)).is_none())
                .count()
        })
    });
}

fn bench_cardkb_all_bytes(c: &mut Criterion) {
    c.bench_function("keymap_cardkb_all_256", |b| {
        b.iter(|| (0..=u8::MAX).map(|code| KeyMapper::cardkb_to_keysym(code).value()).sum::<u32>())
    });
}

criterion_group!(benches, bench_cardkb_single, bench_cardkb_common, bench_cardkb_all_bytes);
criterion_main!(benches);
