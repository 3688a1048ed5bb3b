use criterion::{criterion_group, criterion_main, Criterion};
use std::path::Path;

fn bench_parse_message(c: &mut Criterion) {
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("recipients.txt");

    c.bench_function("parse_recipients_message", |b| {
        b.iter(|| enronmail::parser::parse_email(&fixture_path).unwrap())
    });
}

fn bench_ingest_maildir(c: &mut Criterion) {
    let maildir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("maildir");
    let config = enronmail::config::Config::default();

    c.bench_function("ingest_fixture_maildir", |b| {
        b.iter(|| {
            let mut documents = 0usize;
            enronmail::ingest::ingest_dir(
                &maildir,
                &config,
                &mut |payload| {
                    documents += payload.records.len();
                    Ok(())
                },
                None,
            )
            .unwrap();
            documents
        })
    });
}

criterion_group!(benches, bench_parse_message, bench_ingest_maildir);
criterion_main!(benches);
