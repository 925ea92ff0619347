use crate::{
    error::RoamError,
    paths::expand_home,
    properties::RawLink,
    source::{RecordSource, RoamRecords},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow},
    ConnectOptions, Connection, Row,
};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

const NODES_QUERY: &str = "SELECT id, file, title FROM nodes ORDER BY id ASC;";
const TAGS_QUERY: &str = "SELECT node_id, tag FROM tags ORDER BY node_id ASC;";
const LINKS_QUERY: &str = "SELECT source, dest, type FROM links ORDER BY source ASC, pos ASC;";

/// org-roam stores strings as elisp literals (`"value"`).
fn clean(value: &str) -> String {
    value.replace('"', "")
}

fn text_column(row: &SqliteRow, column: &str) -> Result<String, RoamError> {
    let value: Option<String> = row.try_get(column)?;
    Ok(value.as_deref().map(clean).unwrap_or_default())
}

/// Reads node records out of an org-roam SQLite database. The database is opened read-only.
#[derive(Debug, Clone)]
pub struct SqliteRecordSource {
    path: PathBuf,
}

impl SqliteRecordSource {
    /// Fails with [RoamError::Precondition] if `db_path` (after `~` expansion) is not a file.
    pub fn open(db_path: &str) -> Result<SqliteRecordSource, RoamError> {
        let path = expand_home(db_path);
        if !path.is_file() {
            return Err(RoamError::Precondition(format!(
                "No such file or directory: {}",
                path.display()
            )));
        }
        Ok(SqliteRecordSource { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection, RoamError> {
        tracing::debug!("Connecting to org-roam db: {:?}", self.path);
        let options = SqliteConnectOptions::new()
            .filename(&self.path)
            .read_only(true)
            .disable_statement_logging();
        Ok(options.connect().await?)
    }
}

impl RecordSource for SqliteRecordSource {
    fn load_records(
        &self,
    ) -> impl std::future::Future<Output = Result<RoamRecords, RoamError>> + Send {
        async move {
            let mut conn = self.connect().await?;

            let node_rows = sqlx::query(NODES_QUERY)
                .fetch_all(&mut conn)
                .await
                .map_err(|e| {
                    tracing::error!(
                        "[SqliteRecordSource.load_records] SQL error processing '{}'\n\terror: {}",
                        NODES_QUERY,
                        e
                    );
                    e
                })?;

            let mut records = RoamRecords::default();
            let mut position = BTreeMap::new();
            for row in node_rows.iter() {
                let id = text_column(row, "id")?;
                let file = text_column(row, "file")?;
                let title = text_column(row, "title")?;
                position.insert(id.clone(), records.len());
                // By convention a node's reference list starts with the node itself
                records.push(
                    &id,
                    &title,
                    &file,
                    Vec::<String>::new(),
                    [RawLink::id(id.clone())],
                );
            }

            let tag_rows = sqlx::query(TAGS_QUERY).fetch_all(&mut conn).await?;
            for row in tag_rows.iter() {
                let node_id = text_column(row, "node_id")?;
                match position.get(&node_id) {
                    Some(idx) => {
                        records.tags[*idx].insert(text_column(row, "tag")?);
                    }
                    None => tracing::debug!("Skipping tag row for unknown node {}", node_id),
                }
            }

            let link_rows = sqlx::query(LINKS_QUERY).fetch_all(&mut conn).await?;
            for row in link_rows.iter() {
                let source = text_column(row, "source")?;
                match position.get(&source) {
                    Some(idx) => records.links[*idx].push(RawLink::new(
                        text_column(row, "type")?,
                        text_column(row, "dest")?,
                    )),
                    None => tracing::debug!("Skipping link row for unknown node {}", source),
                }
            }

            conn.close().await?;

            tracing::info!(
                "Loaded org-roam records from {:?}.\n \
                 \tnode count:\t{} \n \
                 \ttag rows:\t{} \n \
                 \tlink rows:\t{}",
                self.path,
                records.len(),
                tag_rows.len(),
                link_rows.len()
            );
            Ok(records)
        }
    }
}
