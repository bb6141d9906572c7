use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::path::Path;
use khmer_lexseg::{syllables, Dictionary, KhmerSegmenter};

fn benchmark_segmentation(c: &mut Criterion) {
    let dict_path = Path::new("data/khmer_dictionary_words.txt");

    let dictionary = if dict_path.exists() {
        Dictionary::load(dict_path).expect("Failed to load dictionary")
    } else {
        eprintln!("Dictionary file not found, using built-in sample words.");
        ["កង", "កម្លាំង", "រក្សា", "សន្តិសុខ", "និង", "សណ្តាប់ធ្នាប់", "សាធារណៈ"]
            .into_iter()
            .collect()
    };
    let segmenter = KhmerSegmenter::new(dictionary);

    let text = "កងកម្លាំងរក្សាសន្តិសុខនិងសណ្តាប់ធ្នាប់សាធារណៈ"; // "Security and public order forces"

    c.bench_function("segment_short_sentence", |b| {
        b.iter(|| segmenter.segment(black_box(text)))
    });

    let long_text = text.repeat(50);
    c.bench_function("segment_long_paragraph", |b| {
        b.iter(|| segmenter.segment(black_box(&long_text)))
    });

    c.bench_function("syllables_short_sentence", |b| {
        b.iter(|| syllables(black_box(text)).len())
    });
}

criterion_group!(benches, benchmark_segmentation);
criterion_main!(benches);
