use criterion::{black_box, criterion_group, criterion_main, Criterion};
use jmastat::{parse_year_tables, strip_revision_note};

/// A result page with thirty year rows, roughly the size the portal serves.
fn fixture_page() -> String {
    let mut page = String::from("<html><body><table class=\"data2_s\"><tr><th>Year</th></tr>");
    for year in 1991..2021 {
        page.push_str(&format!("<tr><td>{year}</td>"));
        for month in 1..=12 {
            page.push_str(&format!("<td>{month}.{}</td>", year % 10));
        }
        page.push_str("<td>6.5</td></tr>");
    }
    page.push_str("</table></body></html>");
    page
}

fn bench_scrape(c: &mut Criterion) {
    let page = fixture_page();
    c.bench_function("parse_year_tables", |b| {
        b.iter(|| parse_year_tables(black_box(&page), black_box("WAKKANAI")))
    });
    c.bench_function("strip_revision_note", |b| {
        b.iter(|| strip_revision_note(black_box("5.3\nRevision: 12.-")))
    });
}

criterion_group!(benches, bench_scrape);
criterion_main!(benches);
