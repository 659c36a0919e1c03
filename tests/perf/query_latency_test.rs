use std::time::{Instant, SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection};

use crate::config::SearchMode;
use crate::discovery::ProfileLocator;
use crate::model::SearchRequest;
use crate::search::RankedAggregator;

fn p95_ms(samples: &mut [f64]) -> f64 {
    samples.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let last = samples.len().saturating_sub(1);
    let idx = ((last as f64) * 0.95).round() as usize;
    samples[idx.min(last)]
}

fn seed_profile(path: &std::path::Path, pages: i64) {
    let mut conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE moz_places (id INTEGER PRIMARY KEY, url TEXT, title TEXT, last_visit_date INTEGER);
         CREATE TABLE moz_bookmarks (id INTEGER PRIMARY KEY, type INTEGER, fk INTEGER, parent INTEGER, title TEXT);
         CREATE TABLE moz_historyvisits (id INTEGER PRIMARY KEY, place_id INTEGER, visit_date INTEGER);",
    )
    .unwrap();

    let tx = conn.transaction().unwrap();
    for i in 0..pages {
        tx.execute(
            "INSERT INTO moz_places (id, url, title, last_visit_date) VALUES (?1, ?2, ?3, ?4)",
            params![i, format!("https://docs.example/page-{i:05}"), format!("Document {i:05}"), i],
        )
        .unwrap();
        tx.execute(
            "INSERT INTO moz_historyvisits (place_id, visit_date) VALUES (?1, ?2)",
            params![i, i],
        )
        .unwrap();
        if i % 10 == 0 {
            tx.execute(
                "INSERT INTO moz_bookmarks (type, fk, parent, title) VALUES (1, ?1, 2, ?2)",
                params![i, format!("Bookmark {i:05}")],
            )
            .unwrap();
        }
    }
    tx.commit().unwrap();
}

#[test]
fn warm_query_p95_under_250ms() {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let root = std::env::temp_dir().join(format!("placesfind-perf-{unique}"));
    for profile in ["a.default", "b.work"] {
        let dir = root.join(profile);
        std::fs::create_dir_all(&dir).unwrap();
        seed_profile(&dir.join("places.sqlite"), 5_000);
    }

    let aggregator = RankedAggregator::new(ProfileLocator::new(root.clone(), "places.sqlite"));
    let request = SearchRequest::new("page-04", 40, SearchMode::Both);

    for _ in 0..5 {
        let _ = aggregator.search(&request).unwrap();
    }

    let mut samples = Vec::with_capacity(40);
    for _ in 0..40 {
        let start = Instant::now();
        let outcome = aggregator.search(&request).unwrap();
        samples.push(start.elapsed().as_secs_f64() * 1000.0);
        assert_eq!(outcome.results().count(), 80);
    }
    let p95 = p95_ms(&mut samples);

    std::fs::remove_dir_all(&root).unwrap();
    assert!(p95 <= 250.0, "p95 too high: {p95:.3}ms (budget 250.0ms)");
}
