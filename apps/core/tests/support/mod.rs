#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, Connection};

const SCHEMA: &str = "
    CREATE TABLE moz_places (
        id INTEGER PRIMARY KEY,
        url LONGVARCHAR,
        title LONGVARCHAR,
        last_visit_date INTEGER
    );
    CREATE TABLE moz_bookmarks (
        id INTEGER PRIMARY KEY,
        type INTEGER,
        fk INTEGER DEFAULT NULL,
        parent INTEGER,
        title LONGVARCHAR
    );
    CREATE TABLE moz_historyvisits (
        id INTEGER PRIMARY KEY,
        place_id INTEGER,
        visit_date INTEGER
    );";

pub fn unique_suffix() -> String {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    format!("{}-{unique}", std::process::id())
}

/// Temporary profiles root, removed on drop.
pub struct TempRoot {
    pub path: PathBuf,
}

impl TempRoot {
    pub fn new(label: &str) -> Self {
        let path = std::env::temp_dir().join(format!("placesfind-{label}-{}", unique_suffix()));
        std::fs::create_dir_all(&path).expect("temp root should be created");
        Self { path }
    }

    pub fn profile_dir(&self, name: &str) -> PathBuf {
        let dir = self.path.join(name);
        std::fs::create_dir_all(&dir).expect("profile dir should be created");
        dir
    }

    pub fn places(&self, profile: &str) -> PlacesDb {
        PlacesDb::create(&self.profile_dir(profile).join("places.sqlite"))
    }
}

impl Drop for TempRoot {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Minimal places store with the tables the search reads.
pub struct PlacesDb {
    pub path: PathBuf,
    pub conn: Connection,
}

impl PlacesDb {
    pub fn create(path: &Path) -> Self {
        let conn = Connection::open(path).expect("fixture db should open");
        conn.execute_batch(SCHEMA).expect("fixture schema should apply");
        Self {
            path: path.to_path_buf(),
            conn,
        }
    }

    pub fn place(&self, url: Option<&str>, title: Option<&str>, last_visit: Option<i64>) -> i64 {
        self.conn
            .execute(
                "INSERT INTO moz_places (url, title, last_visit_date) VALUES (?1, ?2, ?3)",
                params![url, title, last_visit],
            )
            .expect("place should insert");
        self.conn.last_insert_rowid()
    }

    pub fn bookmark(&self, place_id: i64, title: Option<&str>) {
        self.conn
            .execute(
                "INSERT INTO moz_bookmarks (type, fk, parent, title) VALUES (1, ?1, 2, ?2)",
                params![place_id, title],
            )
            .expect("bookmark should insert");
    }

    pub fn folder(&self, title: &str) {
        self.conn
            .execute(
                "INSERT INTO moz_bookmarks (type, fk, parent, title) VALUES (2, NULL, 1, ?1)",
                params![title],
            )
            .expect("folder should insert");
    }

    pub fn visits(&self, place_id: i64, count: usize) {
        for n in 0..count {
            self.conn
                .execute(
                    "INSERT INTO moz_historyvisits (place_id, visit_date) VALUES (?1, ?2)",
                    params![place_id, n as i64],
                )
                .expect("visit should insert");
        }
    }

    pub fn bookmarked_page(&self, title: &str, url: &str, last_visit: Option<i64>) -> i64 {
        let id = self.place(Some(url), Some(title), last_visit);
        self.bookmark(id, Some(title));
        id
    }

    pub fn visited_page(&self, title: &str, url: &str, last_visit: i64) -> i64 {
        let id = self.place(Some(url), Some(title), Some(last_visit));
        self.visits(id, 1);
        id
    }
}
