use criterion::{black_box, criterion_group, criterion_main, Criterion};
use notemark_editor::{DocumentState, Edit, EditorConfig, OffsetIndex, Selection};
use notemark_parser::StyleAttribute;

fn large_note() -> String {
    let mut source = String::new();
    for i in 0..500 {
        source.push_str(&format!(
            "Day {}: [ {} ]{{style| color: crimson}} nights, [breakfast]{{style| font: Georgia, size: {}}} included\n",
            i,
            i % 7,
            10 + i % 20
        ));
    }
    source
}

fn build_index(c: &mut Criterion) {
    let source = large_note();

    c.bench_function("build_index_500_lines", |b| {
        b.iter(|| OffsetIndex::build(black_box(&source)))
    });

    let index = OffsetIndex::build(&source);
    let middle = source.len() / 2;
    c.bench_function("find_enclosing", |b| {
        b.iter(|| index.find_enclosing(black_box(middle)))
    });
}

fn keystroke(c: &mut Criterion) {
    // Every keystroke rebuilds the index and resolves the selection
    let source = large_note();
    let state = DocumentState::new(source.clone(), &EditorConfig::default());
    let mut typed = source.clone();
    typed.push('x');

    c.bench_function("text_changed_500_lines", |b| {
        b.iter(|| state.text_changed(black_box(typed.clone()), Selection::cursor(typed.len())))
    });

    let state = state.selection_changed(Selection::new(0, 3)).state;
    let edit = Edit::Insert {
        attributes: vec![StyleAttribute::Color("red".to_string())],
    };
    c.bench_function("insert_500_lines", |b| b.iter(|| state.apply(black_box(&edit))));
}

criterion_group!(benches, build_index, keystroke);
criterion_main!(benches);
