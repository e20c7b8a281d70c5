use criterion::{Criterion, black_box, criterion_group, criterion_main};
use quillmark::{HtmlOptions, parse};

fn gen_sections(n: usize) -> String {
    (1..=n)
        .map(|i| {
            format!(
                "* Section {i}\n\nParagraph under section {i} with a link \
                 https://example.com/{i} and a note[fn:{i}].\n\n"
            )
        })
        .collect()
}

fn gen_list(n: usize) -> String {
    let mut s = String::new();
    for i in 0..n {
        s.push_str(&format!("- item {i}\n"));
    }
    s
}

fn gen_keyword_blocks(n: usize) -> String {
    (0..n)
        .map(|i| format!("%pre\nfn demo_{i}() {{\n    body();\n}}\n\n"))
        .collect()
}

fn compile(input: &str) -> String {
    parse(input).unwrap().to_html(&HtmlOptions::default())
}

fn bench_documents(c: &mut Criterion) {
    let cases: Vec<(&str, String)> = vec![
        ("headings_and_paragraphs", gen_sections(200)),
        ("list_items", gen_list(1000)),
        ("keyword_blocks", gen_keyword_blocks(200)),
    ];
    for (name, input) in &cases {
        c.bench_function(name, |b| b.iter(|| compile(black_box(input))));
    }
}

criterion_group!(benches, bench_documents);
criterion_main!(benches);
