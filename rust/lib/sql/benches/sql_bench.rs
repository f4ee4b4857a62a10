use criterion::{black_box, criterion_group, criterion_main, Criterion};

use chirp_sql::{SQLStore, SqliteStore, Value};

fn seeded_store(rows: i64) -> SqliteStore {
    let store = SqliteStore::open_in_memory().unwrap();
    store
        .exec(
            "CREATE TABLE posts (id INTEGER PRIMARY KEY AUTOINCREMENT, author TEXT NOT NULL, body TEXT NOT NULL, created_at TEXT NOT NULL)",
            &[],
        )
        .unwrap();

    for i in 0..rows {
        store
            .insert(
                "INSERT INTO posts (author, body, created_at) VALUES (?1, ?2, ?3)",
                &[
                    Value::Text(format!("user-{}", i % 50)),
                    Value::Text(format!("post number {}", i)),
                    Value::Text(format!("2026-01-01T00:00:{:02}+00:00", i % 60)),
                ],
            )
            .unwrap();
    }
    store
}

fn bench_insert(c: &mut Criterion) {
    let store = seeded_store(0);

    c.bench_function("sqlite_insert_rowid", |b| {
        b.iter(|| {
            let id = store
                .insert(
                    "INSERT INTO posts (author, body, created_at) VALUES (?1, ?2, ?3)",
                    &[
                        Value::Text("bench-user".to_string()),
                        Value::Text("bench body".to_string()),
                        Value::Text("2026-01-01T00:00:00+00:00".to_string()),
                    ],
                )
                .unwrap();
            black_box(id);
        });
    });
}

fn bench_query_by_id(c: &mut Criterion) {
    let store = seeded_store(10000);

    let mut i = 0i64;
    c.bench_function("sqlite_query_by_id", |b| {
        b.iter(|| {
            let rows = store
                .query(
                    "SELECT id, author, body FROM posts WHERE id = ?1",
                    &[Value::Integer(black_box(1 + i % 10000))],
                )
                .unwrap();
            assert_eq!(rows.len(), 1);
            i += 1;
        });
    });
}

fn bench_query_newest_first(c: &mut Criterion) {
    let store = seeded_store(10000);

    c.bench_function("sqlite_query_newest_first_50", |b| {
        b.iter(|| {
            let rows = store
                .query(
                    "SELECT id, author, body FROM posts WHERE author = ?1 ORDER BY created_at DESC, id DESC LIMIT 50",
                    &[Value::Text(black_box("user-7".to_string()))],
                )
                .unwrap();
            assert_eq!(rows.len(), 50);
        });
    });
}

criterion_group!(benches, bench_insert, bench_query_by_id, bench_query_newest_first);
criterion_main!(benches);
