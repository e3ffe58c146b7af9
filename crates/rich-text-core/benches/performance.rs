use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use rich_text_core::{DocumentOffset, LineVisualData, ParagraphCache, Selection, TextRunManager};

fn large_text(paragraph_count: usize) -> String {
    let mut out = String::with_capacity(paragraph_count * 64);
    for i in 0..paragraph_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (rich-text-core benchmark)\r\n"
        ));
    }
    // Drop the final delimiter so no trailing empty paragraph is created.
    out.truncate(out.len() - 2);
    out
}

fn loaded_document(paragraph_count: usize) -> TextRunManager {
    let mut manager = TextRunManager::default();
    manager
        .insert_text(DocumentOffset(0), &large_text(paragraph_count))
        .unwrap();
    manager
}

fn bench_large_document_load(c: &mut Criterion) {
    let text = large_text(5_000);
    c.bench_function("document_load/5k_paragraphs", |b| {
        b.iter(|| {
            let mut manager = TextRunManager::default();
            manager
                .insert_text(DocumentOffset(0), black_box(&text))
                .unwrap();
            black_box(manager.paragraph_manager().paragraph_count());
        })
    });
}

fn bench_typing_in_middle(c: &mut Criterion) {
    c.bench_function("typing_middle/100_inserts", |b| {
        b.iter_batched(
            || loaded_document(1_000),
            |mut manager| {
                let middle = manager.paragraph_manager().paragraphs()[500].id();
                let start = manager
                    .paragraph_manager()
                    .get_paragraph_start_offset(middle)
                    .unwrap();
                let mut offset = DocumentOffset(start.0 + 10);
                for _ in 0..100 {
                    offset = manager.insert_text(offset, "x").unwrap();
                }
                black_box(manager.document_length());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_remove_across_paragraphs(c: &mut Criterion) {
    c.bench_function("remove/merge_100_paragraphs", |b| {
        b.iter_batched(
            || loaded_document(1_000),
            |mut manager| {
                let paragraphs = manager.paragraph_manager().paragraphs();
                let start = manager
                    .paragraph_manager()
                    .get_paragraph_start_offset(paragraphs[400].id())
                    .unwrap();
                let end = manager
                    .paragraph_manager()
                    .get_paragraph_start_offset(paragraphs[500].id())
                    .unwrap();
                manager
                    .remove(Selection::from_offsets(start, end))
                    .unwrap();
                black_box(manager.paragraph_manager().paragraph_count());
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_cache_validation(c: &mut Criterion) {
    let manager = loaded_document(5_000);
    let lines: Vec<LineVisualData> = manager
        .paragraph_manager()
        .paragraphs()
        .iter()
        .map(|p| LineVisualData::attach(p, 0, p.run_count()).unwrap())
        .collect();

    c.bench_function("cache_validation/5k_lines", |b| {
        b.iter(|| {
            let dirty = lines
                .iter()
                .filter(|line| line.is_dirty(manager.paragraph_manager()).unwrap())
                .count();
            black_box(dirty);
        })
    });
}

criterion_group!(
    benches,
    bench_large_document_load,
    bench_typing_in_middle,
    bench_remove_across_paragraphs,
    bench_cache_validation
);
criterion_main!(benches);
