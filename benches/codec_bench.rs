use compound_vlstr::{CodecConfig, CompoundLayout, MemberKind, PointerWidth, VlStrCodec};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

const RECORDS: usize = 1_000;

fn layout() -> CompoundLayout {
    CompoundLayout::builder(PointerWidth::W64)
        .member("id", MemberKind::Int(8))
        .member("name", MemberKind::VlString)
        .member("score", MemberKind::Float(8))
        .member("comment", MemberKind::VlString)
        .build()
        .unwrap()
}

fn codec() -> VlStrCodec {
    VlStrCodec::new(CodecConfig {
        pointer_width: PointerWidth::W64,
        ..CodecConfig::default()
    })
}

fn filled(codec: &mut VlStrCodec, layout: &CompoundLayout) -> Vec<u8> {
    let mut buf = vec![0u8; layout.record_size() * RECORDS];
    for r in 0..RECORDS {
        codec.encode_member(layout, &mut buf, r, "name", "user:abc123").unwrap();
        codec.encode_member(layout, &mut buf, r, "comment", "héllo wörld").unwrap();
    }
    buf
}

// ─── Encode ─────────────────────────────────────────────────────────────────

fn bench_encode(c: &mut Criterion) {
    let layout = layout();
    let name = layout.member("name").unwrap().offset();

    c.bench_function("encode_1k_records", |b| {
        b.iter_batched(
            || (codec(), vec![0u8; layout.record_size() * RECORDS]),
            |(mut codec, mut buf)| {
                for r in 0..RECORDS {
                    let at = r * layout.record_size() + name;
                    black_box(codec.encode(black_box("user:abc123"), &mut buf, at).unwrap());
                }
                (codec, buf)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

// ─── Decode ─────────────────────────────────────────────────────────────────

fn bench_decode(c: &mut Criterion) {
    let layout = layout();
    let mut codec = codec();
    let buf = filled(&mut codec, &layout);
    let name = layout.member("name").unwrap().offset();

    c.bench_function("decode_str_1k_records", |b| {
        b.iter(|| {
            for r in 0..RECORDS {
                black_box(codec.decode_str(&buf, r * layout.record_size() + name).unwrap());
            }
        })
    });

    c.bench_function("decode_owned_1k_records", |b| {
        b.iter(|| {
            for r in 0..RECORDS {
                black_box(codec.decode(&buf, r * layout.record_size() + name).unwrap());
            }
        })
    });
}

// ─── Release ────────────────────────────────────────────────────────────────

fn bench_release(c: &mut Criterion) {
    let layout = layout();
    let schema = layout.slot_schema().unwrap();

    c.bench_function("release_all_1k_records", |b| {
        b.iter_batched(
            || {
                let mut codec = codec();
                let buf = filled(&mut codec, &layout);
                (codec, buf)
            },
            |(mut codec, mut buf)| {
                black_box(codec.release_all(&mut buf, &schema).unwrap());
                (codec, buf)
            },
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_encode, bench_decode, bench_release);
criterion_main!(benches);
