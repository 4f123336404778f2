//! SQLite-backed catalogue used by the command-line tools and tests.
//!
//! The schema mirrors the hosted backend's tables closely enough for the
//! review workflow and sitemap generation: one table per record kind and one
//! join table per link kind. Tags are stored as JSON arrays of strings and
//! timestamps as RFC 3339 text.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Mutex,
};

use chrono::{DateTime, Utc};
use log::debug;
use rusqlite::{Connection, ErrorCode, OpenFlags, OptionalExtension, params};

use super::{CatalogError, CatalogStore, LinkStore};
use crate::{
    CandidateSet, CatalogEntry, EntityKind, Episode, EpisodeLink, Item, LinkTarget, Location,
    SuggestionKind,
};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS celebrities (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    slug TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS episodes (
    id TEXT PRIMARY KEY,
    celebrity_id TEXT NOT NULL REFERENCES celebrities(id),
    title TEXT NOT NULL,
    description TEXT,
    notes TEXT,
    slug TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS locations (
    id TEXT PRIMARY KEY,
    celebrity_id TEXT NOT NULL REFERENCES celebrities(id),
    name TEXT NOT NULL,
    address TEXT,
    tags TEXT NOT NULL DEFAULT '[]',
    slug TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS items (
    id TEXT PRIMARY KEY,
    celebrity_id TEXT NOT NULL REFERENCES celebrities(id),
    name TEXT NOT NULL,
    brand TEXT,
    category TEXT,
    tags TEXT NOT NULL DEFAULT '[]',
    slug TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS episode_locations (
    episode_id TEXT NOT NULL REFERENCES episodes(id),
    location_id TEXT NOT NULL REFERENCES locations(id),
    created_at TEXT NOT NULL,
    PRIMARY KEY (episode_id, location_id)
);
CREATE TABLE IF NOT EXISTS episode_items (
    episode_id TEXT NOT NULL REFERENCES episodes(id),
    item_id TEXT NOT NULL REFERENCES items(id),
    created_at TEXT NOT NULL,
    PRIMARY KEY (episode_id, item_id)
);
";

const ENTRY_QUERIES: [(EntityKind, &str); 4] = [
    (
        EntityKind::Celebrity,
        "SELECT c.id, COALESCE(c.slug, c.id), c.updated_at,
            (SELECT COUNT(*) FROM episodes AS e WHERE e.celebrity_id = c.id)
         FROM celebrities AS c ORDER BY c.rowid",
    ),
    (
        EntityKind::Episode,
        "SELECT e.id, COALESCE(e.slug, e.id), e.updated_at,
            (SELECT COUNT(*) FROM episode_locations AS l WHERE l.episode_id = e.id)
          + (SELECT COUNT(*) FROM episode_items AS i WHERE i.episode_id = e.id)
         FROM episodes AS e ORDER BY e.rowid",
    ),
    (
        EntityKind::Location,
        "SELECT l.id, COALESCE(l.slug, l.id), l.updated_at,
            (SELECT COUNT(*) FROM episode_locations AS el WHERE el.location_id = l.id)
         FROM locations AS l ORDER BY l.rowid",
    ),
    (
        EntityKind::Item,
        "SELECT i.id, COALESCE(i.slug, i.id), i.updated_at,
            (SELECT COUNT(*) FROM episode_items AS ei WHERE ei.item_id = i.id)
         FROM items AS i ORDER BY i.rowid",
    ),
];

type EntryRow = (String, String, Option<String>, i64);

/// Catalogue store backed by a single SQLite database file.
pub struct SqliteCatalog {
    connection: Mutex<Connection>,
    path: PathBuf,
}

impl fmt::Debug for SqliteCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteCatalog")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl SqliteCatalog {
    /// Open an existing catalogue database for reading and link writes.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let connection = Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_WRITE)
            .map_err(|source| CatalogError::OpenDatabase {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::from_connection(connection, path))
    }

    /// Open or create a catalogue database and ensure the schema exists.
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|source| CatalogError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;
        connection
            .execute_batch(SCHEMA)
            .map_err(|source| CatalogError::Query {
                operation: "create catalogue schema",
                source,
            })?;
        Ok(Self::from_connection(connection, path))
    }

    fn from_connection(connection: Connection, path: &Path) -> Self {
        Self {
            connection: Mutex::new(connection),
            path: path.to_path_buf(),
        }
    }

    /// Location of the database on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn with_connection<T>(
        &self,
        operation: &'static str,
        f: impl FnOnce(&Connection) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let connection = self
            .connection
            .lock()
            .map_err(|_| CatalogError::Unavailable { operation })?;
        f(&connection)
    }
}

impl CatalogStore for SqliteCatalog {
    fn episode(&self, episode_id: &str) -> Result<Episode, CatalogError> {
        self.with_connection("read episode", |connection| {
            connection
                .query_row(
                    "SELECT id, celebrity_id, title, description, notes
                     FROM episodes WHERE id = ?1",
                    [episode_id],
                    |row| {
                        Ok(Episode {
                            id: row.get(0)?,
                            celebrity_id: row.get(1)?,
                            title: row.get(2)?,
                            description: row.get(3)?,
                            notes: row.get(4)?,
                        })
                    },
                )
                .optional()
                .map_err(|source| CatalogError::Query {
                    operation: "read episode",
                    source,
                })?
                .ok_or_else(|| CatalogError::UnknownEpisode {
                    episode_id: episode_id.to_owned(),
                })
        })
    }

    fn candidates_for_celebrity(&self, celebrity_id: &str) -> Result<CandidateSet, CatalogError> {
        self.with_connection("read candidates", |connection| {
            let locations = read_locations(connection, celebrity_id)?;
            let items = read_items(connection, celebrity_id)?;
            debug!(
                "loaded {} locations and {} items for celebrity {celebrity_id}",
                locations.len(),
                items.len()
            );
            Ok(CandidateSet::new(locations, items))
        })
    }

    fn links_for_episode(&self, episode_id: &str) -> Result<Vec<EpisodeLink>, CatalogError> {
        self.with_connection("read episode links", |connection| {
            let mut links = Vec::new();
            for kind in [SuggestionKind::Location, SuggestionKind::Item] {
                let (table, column, _) = link_table(kind);
                let sql = format!(
                    "SELECT {column} FROM {table} WHERE episode_id = ?1 ORDER BY rowid"
                );
                let ids = query_strings(connection, &sql, episode_id, "read episode links")?;
                links.extend(
                    ids.into_iter()
                        .map(|id| EpisodeLink::new(episode_id, LinkTarget::new(kind, id))),
                );
            }
            Ok(links)
        })
    }

    fn catalog_entries(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        self.with_connection("list catalogue entries", |connection| {
            let mut entries = Vec::new();
            for (kind, sql) in ENTRY_QUERIES {
                for row in query_entry_rows(connection, sql)? {
                    entries.push(entry_from_row(kind, row)?);
                }
            }
            Ok(entries)
        })
    }
}

impl LinkStore for SqliteCatalog {
    fn create_link(&self, link: &EpisodeLink) -> Result<(), CatalogError> {
        self.with_connection("create link", |connection| {
            if !row_exists(connection, "SELECT 1 FROM episodes WHERE id = ?1", &link.episode_id)? {
                return Err(CatalogError::UnknownEpisode {
                    episode_id: link.episode_id.clone(),
                });
            }
            let kind = link.target.kind();
            let entity_id = link.target.entity_id();
            let (table, column, entity_table) = link_table(kind);
            let exists_sql = format!("SELECT 1 FROM {entity_table} WHERE id = ?1");
            if !row_exists(connection, &exists_sql, entity_id)? {
                return Err(CatalogError::UnknownEntity {
                    kind,
                    entity_id: entity_id.to_owned(),
                });
            }

            let insert_sql = format!(
                "INSERT INTO {table} (episode_id, {column}, created_at) VALUES (?1, ?2, ?3)"
            );
            let created_at = Utc::now().to_rfc3339();
            match connection.execute(&insert_sql, params![link.episode_id, entity_id, created_at]) {
                Ok(_) => {
                    debug!("recorded link {link}");
                    Ok(())
                }
                Err(rusqlite::Error::SqliteFailure(failure, _))
                    if failure.code == ErrorCode::ConstraintViolation =>
                {
                    Err(CatalogError::DuplicateLink {
                        episode_id: link.episode_id.clone(),
                        kind,
                        entity_id: entity_id.to_owned(),
                    })
                }
                Err(source) => Err(CatalogError::Query {
                    operation: "insert link",
                    source,
                }),
            }
        })
    }
}

/// Join table, link column, and entity table for a link kind.
const fn link_table(kind: SuggestionKind) -> (&'static str, &'static str, &'static str) {
    match kind {
        SuggestionKind::Location => ("episode_locations", "location_id", "locations"),
        SuggestionKind::Item => ("episode_items", "item_id", "items"),
    }
}

fn row_exists(connection: &Connection, sql: &str, id: &str) -> Result<bool, CatalogError> {
    connection
        .query_row(sql, [id], |_| Ok(()))
        .optional()
        .map(|row| row.is_some())
        .map_err(|source| CatalogError::Query {
            operation: "check record exists",
            source,
        })
}

fn query_strings(
    connection: &Connection,
    sql: &str,
    key: &str,
    operation: &'static str,
) -> Result<Vec<String>, CatalogError> {
    let mut statement = connection
        .prepare(sql)
        .map_err(|source| CatalogError::Query { operation, source })?;
    let rows = statement
        .query_map([key], |row| row.get::<_, String>(0))
        .map_err(|source| CatalogError::Query { operation, source })?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|source| CatalogError::Query { operation, source })
}

fn read_locations(connection: &Connection, celebrity_id: &str) -> Result<Vec<Location>, CatalogError> {
    let operation = "read locations";
    let mut statement = connection
        .prepare(
            "SELECT id, name, address, tags FROM locations
             WHERE celebrity_id = ?1 ORDER BY rowid",
        )
        .map_err(|source| CatalogError::Query { operation, source })?;
    let rows = statement
        .query_map([celebrity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, String>(3)?,
            ))
        })
        .map_err(|source| CatalogError::Query { operation, source })?;

    let mut locations = Vec::new();
    for row in rows {
        let (id, name, address, raw_tags) =
            row.map_err(|source| CatalogError::Query { operation, source })?;
        let tags = parse_tags(EntityKind::Location, &id, &raw_tags)?;
        locations.push(Location {
            id,
            name,
            address,
            tags,
        });
    }
    Ok(locations)
}

fn read_items(connection: &Connection, celebrity_id: &str) -> Result<Vec<Item>, CatalogError> {
    let operation = "read items";
    let mut statement = connection
        .prepare(
            "SELECT id, name, brand, category, tags FROM items
             WHERE celebrity_id = ?1 ORDER BY rowid",
        )
        .map_err(|source| CatalogError::Query { operation, source })?;
    let rows = statement
        .query_map([celebrity_id], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<String>>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, String>(4)?,
            ))
        })
        .map_err(|source| CatalogError::Query { operation, source })?;

    let mut items = Vec::new();
    for row in rows {
        let (id, name, brand, category, raw_tags) =
            row.map_err(|source| CatalogError::Query { operation, source })?;
        let tags = parse_tags(EntityKind::Item, &id, &raw_tags)?;
        items.push(Item {
            id,
            name,
            brand,
            category,
            tags,
        });
    }
    Ok(items)
}

fn parse_tags(kind: EntityKind, id: &str, raw: &str) -> Result<Vec<String>, CatalogError> {
    serde_json::from_str(raw).map_err(|source| CatalogError::InvalidTags {
        kind,
        id: id.to_owned(),
        source,
    })
}

fn query_entry_rows(connection: &Connection, sql: &str) -> Result<Vec<EntryRow>, CatalogError> {
    let operation = "list catalogue entries";
    let mut statement = connection
        .prepare(sql)
        .map_err(|source| CatalogError::Query { operation, source })?;
    let rows = statement
        .query_map([], |row| -> rusqlite::Result<EntryRow> {
            Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?))
        })
        .map_err(|source| CatalogError::Query { operation, source })?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|source| CatalogError::Query { operation, source })
}

fn entry_from_row(kind: EntityKind, row: EntryRow) -> Result<CatalogEntry, CatalogError> {
    let (id, slug, raw_updated_at, raw_count) = row;
    let updated_at = raw_updated_at
        .map(|raw| parse_timestamp(kind, &id, raw))
        .transpose()?;
    let link_count = u32::try_from(raw_count).map_err(|_| CatalogError::CountOutOfRange {
        kind,
        id: id.clone(),
        raw: raw_count,
    })?;
    Ok(CatalogEntry {
        kind,
        id,
        slug,
        updated_at,
        link_count,
    })
}

fn parse_timestamp(kind: EntityKind, id: &str, raw: String) -> Result<DateTime<Utc>, CatalogError> {
    match DateTime::parse_from_rfc3339(&raw) {
        Ok(parsed) => Ok(parsed.with_timezone(&Utc)),
        Err(source) => Err(CatalogError::InvalidTimestamp {
            kind,
            id: id.to_owned(),
            raw,
            source,
        }),
    }
}
