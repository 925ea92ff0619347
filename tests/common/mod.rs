//! Shared test utilities for integration tests.
//!
//! Import from integration test files as:
//! ```ignore
//! mod common;
//! ```

use std::path::PathBuf;
use tempfile::TempDir;

/// Initialize tracing for tests, respecting RUST_LOG env var.
///
/// Safe to call multiple times, subsequent calls are no-ops.
#[allow(dead_code)]
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init()
        .ok();
}

#[allow(dead_code)]
pub const ALGEBRA_ORG: &str = r#":PROPERTIES:
:ID:       a
:END:
#+title: Algebra
#+filetags: :math:algebra:

Groups act on sets, see [[id:b][Basis]].
The identity is \(e\).

* Worked example
:PROPERTIES:
:ID:       b
:END:
\[ g \cdot h = h \cdot g \]
#+begin_src python
print("commutes")
#+end_src
"#;

#[allow(dead_code)]
pub const INBOX_ORG: &str = r#":PROPERTIES:
:ID:       d
:END:
#+title: Inbox

Things to file.
"#;

/// One node row for the scratch org-roam database.
#[allow(dead_code)]
pub struct NodeFixture<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub file: &'a str,
    pub tags: &'a [&'a str],
    /// `(type, dest)` in body order
    pub links: &'a [(&'a str, &'a str)],
}

/// Write the fixture org files into `temp_dir` and return their paths as
/// `(algebra.org, inbox.org)`.
#[allow(dead_code)]
pub fn write_org_files(temp_dir: &TempDir) -> (PathBuf, PathBuf) {
    let algebra = temp_dir.path().join("algebra.org");
    let inbox = temp_dir.path().join("inbox.org");
    std::fs::write(&algebra, ALGEBRA_ORG).unwrap();
    std::fs::write(&inbox, INBOX_ORG).unwrap();
    (algebra, inbox)
}

/// org-roam stores every string as an elisp literal.
#[allow(dead_code)]
fn quoted(value: &str) -> String {
    format!("\"{value}\"")
}

/// Create an org-roam style SQLite database at `db_path` holding `nodes`.
///
/// Only the columns roam-graph reads are populated meaningfully. Values are quoted the way
/// emacsql writes them, and link rows carry increasing `pos` values in body order.
#[cfg(feature = "service")]
#[allow(dead_code)]
pub async fn create_roam_db(
    db_path: &std::path::Path,
    nodes: &[NodeFixture<'_>],
) -> Result<(), Box<dyn std::error::Error>> {
    use sqlx::{
        sqlite::{SqliteConnectOptions, SqliteJournalMode},
        ConnectOptions, Connection,
    };

    let mut conn = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Delete)
        .connect()
        .await?;

    for schema in [
        "CREATE TABLE files (file UNIQUE PRIMARY KEY, title, hash NOT NULL, atime NOT NULL, mtime NOT NULL);",
        "CREATE TABLE nodes (id NOT NULL PRIMARY KEY, file NOT NULL, level NOT NULL, pos NOT NULL, todo, priority, scheduled text, deadline text, title, properties, olp);",
        "CREATE TABLE tags (node_id NOT NULL, tag);",
        "CREATE TABLE links (pos NOT NULL, source NOT NULL, dest NOT NULL, type NOT NULL, properties NOT NULL);",
    ] {
        sqlx::query(schema).execute(&mut conn).await?;
    }

    for node in nodes {
        sqlx::query("INSERT INTO nodes (id, file, level, pos, title) VALUES (?, ?, ?, ?, ?);")
            .bind(quoted(node.id))
            .bind(quoted(node.file))
            .bind(0_i64)
            .bind(1_i64)
            .bind(quoted(node.title))
            .execute(&mut conn)
            .await?;
        for tag in node.tags {
            sqlx::query("INSERT INTO tags (node_id, tag) VALUES (?, ?);")
                .bind(quoted(node.id))
                .bind(quoted(tag))
                .execute(&mut conn)
                .await?;
        }
        // Insert in reverse so the reader has to order by pos
        for (pos, (kind, dest)) in node.links.iter().enumerate().rev() {
            sqlx::query(
                "INSERT INTO links (pos, source, dest, type, properties) VALUES (?, ?, ?, ?, ?);",
            )
            .bind((pos as i64 + 1) * 10)
            .bind(quoted(node.id))
            .bind(quoted(dest))
            .bind(quoted(kind))
            .bind("(:outline nil)")
            .execute(&mut conn)
            .await?;
        }
    }

    conn.close().await?;
    Ok(())
}
