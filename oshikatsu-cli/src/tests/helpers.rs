//! Test helpers for seeding a throwaway catalogue.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use oshikatsu_core::SqliteCatalog;
use tempfile::TempDir;

const SEED_SQL: &str = "
INSERT INTO celebrities (id, name, slug) VALUES ('c-1', 'Aoi', 'aoi');
INSERT INTO episodes (id, celebrity_id, title, description)
    VALUES ('ep-1', 'c-1', 'Harbour cafe vlog', 'Coffee at Joe''s Cafe in a denim jacket');
INSERT INTO locations (id, celebrity_id, name, tags) VALUES
    ('loc-1', 'c-1', 'Joe''s Cafe', '[\"coffee\"]'),
    ('loc-2', 'c-1', 'Museum of Art', '[]');
INSERT INTO items (id, celebrity_id, name, brand, category, slug) VALUES
    ('item-1', 'c-1', 'Denim jacket', 'Supreme', 'outerwear', 'denim-jacket');
";

/// Pages the seeded catalogue publishes, including home and static pages.
pub(super) const SEEDED_PAGE_COUNT: usize = 10;

/// Temporary workspace holding a seeded SQLite catalogue.
pub(super) struct CatalogFixture {
    _dir: TempDir,
    root: Utf8PathBuf,
    db: Utf8PathBuf,
}

impl std::fmt::Debug for CatalogFixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogFixture")
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl CatalogFixture {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let db = root.join("catalog.db");
        SqliteCatalog::create(db.as_std_path()).expect("create schema");
        rusqlite::Connection::open(db.as_std_path())
            .expect("open for seeding")
            .execute_batch(SEED_SQL)
            .expect("seed rows");
        Self {
            _dir: dir,
            root,
            db,
        }
    }

    pub(super) fn root(&self) -> &Utf8Path {
        &self.root
    }

    pub(super) fn db(&self) -> &Utf8Path {
        &self.db
    }

    /// Write `contents` to `name` under the workspace root.
    pub(super) fn write(&self, name: &str, contents: &[u8]) -> Utf8PathBuf {
        let path = self.root.join(name);
        fs::write(path.as_std_path(), contents).expect("write fixture file");
        path
    }
}
