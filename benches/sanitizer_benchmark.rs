use criterion::{criterion_group, criterion_main, Criterion};
use f3rva_site::sanitizer::{sanitize_html, sanitize_json};
use f3rva_site::services::seo::{breadcrumb_schema, BreadcrumbItem};
use std::hint::black_box;

/// A long backblast with the usual mix of formatting, links and lists.
fn backblast(paragraphs: usize) -> String {
    let mut html = String::new();
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p class=\"para\">Round {i}: <strong>20 merkins</strong>, <em>15 squats</em> and a \
             <a href=\"https://f3rva.org/exicon/{i}\" target=\"_blank\">mosey</a>.</p>\
             <ul><li>Mary</li><li>Plank <b>jacks</b></li></ul>"
        ));
    }
    html
}

/// Same content with hostile markup mixed in.
fn hostile_backblast(paragraphs: usize) -> String {
    let mut html = backblast(paragraphs);
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<img src=x onerror=\"alert({i})\"><script>steal({i})</script>\
             <a href=\"javascript:alert({i})\">click</a><iframe src=\"//evil\"></iframe>"
        ));
    }
    html
}

fn benchmark_sanitize_html(c: &mut Criterion) {
    let clean = backblast(50);
    let hostile = hostile_backblast(50);

    let mut group = c.benchmark_group("sanitize_html");

    group.bench_function("clean_backblast", |b| {
        b.iter(|| sanitize_html(black_box(&clean)))
    });

    group.bench_function("hostile_backblast", |b| {
        b.iter(|| sanitize_html(black_box(&hostile)))
    });

    group.finish();
}

fn benchmark_sanitize_json(c: &mut Criterion) {
    let items: Vec<_> = (0..20)
        .map(|i| BreadcrumbItem {
            name: format!("</script><b>Crumb {i}</b>"),
            item: format!("https://f3rva.org/{i}"),
        })
        .collect();
    let schema = breadcrumb_schema(&items);

    c.bench_function("sanitize_json_breadcrumbs", |b| {
        b.iter(|| sanitize_json(black_box(&schema)))
    });
}

criterion_group!(benches, benchmark_sanitize_html, benchmark_sanitize_json);
criterion_main!(benches);
