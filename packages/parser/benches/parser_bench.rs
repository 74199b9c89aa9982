use criterion::{black_box, criterion_group, criterion_main, Criterion};
use quire_parser::parse;

fn parse_single_paragraph(c: &mut Criterion) {
    let source = r#"<p style="text-align:left"><strong>Hello</strong> world</p>"#;

    c.bench_function("parse_single_paragraph", |b| {
        b.iter(|| parse(black_box(source)))
    });
}

fn parse_article(c: &mut Criterion) {
    let mut source = String::new();
    for i in 0..50 {
        source.push_str(&format!(
            r#"<p style="text-align:justify">Paragraph {} with <em>some</em> <u><strong>formatted</strong></u> text &amp; entities.</p>"#,
            i
        ));
        source.push_str("<ul><li>first</li><li><em>second</em></li></ul>");
        source.push_str("<ol><li>one</li><li>two</li><li>three</li></ol>");
    }

    c.bench_function("parse_article", |b| b.iter(|| parse(black_box(&source))));
}

criterion_group!(benches, parse_single_paragraph, parse_article);
criterion_main!(benches);
