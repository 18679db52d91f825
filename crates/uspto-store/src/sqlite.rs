//! Relational sink backed by SQLite

use crate::{StoreConfig, StoreError};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Transaction};
use std::path::Path;
use tracing::debug;
use uspto_domain::{DocumentType, Metadata, PatentRecord, PatentSink, ReferentialDocument};

/// Timestamp format of `created_at` / `updated_at`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Patent table columns in insert order
pub const PATENT_COLUMNS: [&str; 20] = [
    "publication_title",
    "publication_number",
    "publication_date",
    "publication_type",
    "grant_date",
    "application_num",
    "application_date",
    "authors",
    "organizations",
    "attorneys",
    "attorney_organizations",
    "sections",
    "section_classes",
    "section_class_subclasses",
    "section_class_subclass_groups",
    "abstract",
    "description",
    "claims",
    "created_at",
    "updated_at",
];

/// Columns an upsert never touches
const READ_ONLY_COLUMNS: [&str; 2] = ["publication_number", "created_at"];

/// One row of the patent table, columns as stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatentRow {
    /// Primary key
    pub publication_number: String,
    /// Invention title
    pub publication_title: String,
    /// Publication date
    pub publication_date: String,
    /// Application type
    pub publication_type: String,
    /// Grant date (grants only)
    pub grant_date: Option<String>,
    /// Application number
    pub application_num: String,
    /// Application date
    pub application_date: String,
    /// Comma-joined inventor names
    pub authors: String,
    /// Comma-joined applicant organizations
    pub organizations: String,
    /// Comma-joined attorney names
    pub attorneys: String,
    /// Comma-joined attorney organizations
    pub attorney_organizations: String,
    /// Comma-joined sections
    pub sections: String,
    /// Comma-joined classes
    pub section_classes: String,
    /// Comma-joined subclasses
    pub section_class_subclasses: String,
    /// Comma-joined groups
    pub section_class_subclass_groups: String,
    /// Newline-joined abstract blocks
    pub abstract_text: String,
    /// Newline-joined description blocks
    pub description: String,
    /// Newline-joined claim blocks
    pub claims: String,
    /// First insert time
    pub created_at: String,
    /// Last upsert time
    pub updated_at: String,
}

/// SQLite implementation of [`PatentSink`]
///
/// Each flush is one transaction: patents are upserted on
/// `publication_number`, referential documents are appended with conflicts
/// ignored. Any failure rolls the whole batch back.
///
/// # Thread Safety
///
/// SQLite connections are not thread-safe. Each thread should open its own sink.
pub struct SqliteSink {
    conn: Connection,
    config: StoreConfig,
    name: String,
    upsert_sql: String,
    referential_sql: String,
}

impl SqliteSink {
    /// Open (or create) the database named in the config
    pub fn open(config: StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open(&config.database_path)?;
        let name = format!("sqlite:{}", config.database_path.display());
        Self::with_connection(conn, config, name)
    }

    /// Open an in-memory database (useful for testing)
    pub fn in_memory(config: StoreConfig) -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::with_connection(conn, config, "sqlite::memory:".to_string())
    }

    /// Open a database at an explicit path with default table names
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        Self::open(StoreConfig {
            database_path: path.as_ref().to_path_buf(),
            ..StoreConfig::default()
        })
    }

    fn with_connection(
        conn: Connection,
        config: StoreConfig,
        name: String,
    ) -> Result<Self, StoreError> {
        config.validate().map_err(StoreError::InvalidData)?;

        let upsert_sql = upsert_statement(&config.patent_table);
        let referential_sql = referential_statement(&config.referential_table);
        let sink = Self {
            conn,
            config,
            name,
            upsert_sql,
            referential_sql,
        };
        sink.initialize_schema()?;
        Ok(sink)
    }

    /// Initialize the database schema
    fn initialize_schema(&self) -> Result<(), StoreError> {
        let schema = include_str!("schema.sql")
            .replace("{patent_table}", &self.config.patent_table)
            .replace("{referential_table}", &self.config.referential_table);
        self.conn.execute_batch(&schema)?;
        Ok(())
    }

    /// Write a batch stamped with an explicit timestamp
    pub fn flush_at(&mut self, batch: &[PatentRecord], timestamp: &str) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        write_patents(&tx, &self.upsert_sql, batch, timestamp)?;
        if self.config.include_referential {
            write_referential(&tx, &self.referential_sql, batch, timestamp)?;
        }
        tx.commit()?;

        debug!("Committed {} patents to {}", batch.len(), self.name);
        Ok(batch.len())
    }

    /// Fetch one patent row
    pub fn get_patent(&self, publication_number: &str) -> Result<Option<PatentRow>, StoreError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE publication_number = ?1",
            PATENT_COLUMNS.join(", "),
            self.config.patent_table
        );
        let row = self
            .conn
            .query_row(&sql, params![publication_number], |row| {
                Ok(PatentRow {
                    publication_title: row.get(0)?,
                    publication_number: row.get(1)?,
                    publication_date: row.get(2)?,
                    publication_type: row.get(3)?,
                    grant_date: row.get(4)?,
                    application_num: row.get(5)?,
                    application_date: row.get(6)?,
                    authors: row.get(7)?,
                    organizations: row.get(8)?,
                    attorneys: row.get(9)?,
                    attorney_organizations: row.get(10)?,
                    sections: row.get(11)?,
                    section_classes: row.get(12)?,
                    section_class_subclasses: row.get(13)?,
                    section_class_subclass_groups: row.get(14)?,
                    abstract_text: row.get(15)?,
                    description: row.get(16)?,
                    claims: row.get(17)?,
                    created_at: row.get(18)?,
                    updated_at: row.get(19)?,
                })
            })
            .optional()?;
        Ok(row)
    }

    /// Number of patent rows
    pub fn count_patents(&self) -> Result<usize, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.config.patent_table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Referential documents stored for one patent, in insert order
    pub fn referential_documents_for(
        &self,
        publication_number: &str,
    ) -> Result<Vec<ReferentialDocument>, StoreError> {
        let sql = format!(
            "SELECT uspto_publication_number, reference, cited_by_examiner, document_type,
                    country, kind, metadata
             FROM {} WHERE uspto_publication_number = ?1 ORDER BY id",
            self.config.referential_table
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(params![publication_number], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?,
                row.get::<_, Option<bool>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
            ))
        })?;

        let mut documents = Vec::new();
        for row in rows {
            let (number, reference, cited_by_examiner, document_type, country, kind, metadata) =
                row?;
            let document_type = DocumentType::parse(&document_type).ok_or_else(|| {
                StoreError::InvalidData(format!("Unknown document type: {}", document_type))
            })?;
            let metadata: Metadata = serde_json::from_str(&metadata)?;
            documents.push(ReferentialDocument {
                uspto_publication_number: number,
                reference,
                cited_by_examiner,
                document_type,
                country,
                kind,
                metadata,
            });
        }
        Ok(documents)
    }

    /// Number of referential rows
    pub fn count_referential_documents(&self) -> Result<usize, StoreError> {
        let sql = format!("SELECT COUNT(*) FROM {}", self.config.referential_table);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl PatentSink for SqliteSink {
    type Error = StoreError;

    fn flush(&mut self, batch: &[PatentRecord]) -> Result<usize, Self::Error> {
        let now = chrono::Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.flush_at(batch, &now)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

fn upsert_statement(table: &str) -> String {
    let placeholders: Vec<String> = (1..=PATENT_COLUMNS.len()).map(|i| format!("?{}", i)).collect();
    let updates: Vec<String> = PATENT_COLUMNS
        .iter()
        .filter(|c| !READ_ONLY_COLUMNS.contains(*c))
        .map(|c| format!("{c} = excluded.{c}"))
        .collect();

    format!(
        "INSERT INTO {} ({}) VALUES ({})
         ON CONFLICT(publication_number) DO UPDATE SET {}",
        table,
        PATENT_COLUMNS.join(", "),
        placeholders.join(", "),
        updates.join(", ")
    )
}

fn referential_statement(table: &str) -> String {
    format!(
        "INSERT INTO {} (uspto_publication_number, reference, cited_by_examiner, document_type,
                         country, metadata, kind, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
         ON CONFLICT DO NOTHING",
        table
    )
}

/// Column values of one record, aligned with [`PATENT_COLUMNS`]
fn patent_values(record: &PatentRecord, timestamp: &str) -> Vec<Option<String>> {
    let c = &record.classification;
    vec![
        Some(record.publication_title.clone()),
        Some(record.publication_number.clone()),
        Some(record.publication_date.clone()),
        Some(record.application_type.clone()),
        record.grant_date.clone(),
        Some(record.application_number.clone()),
        Some(record.application_date.clone()),
        Some(record.authors.join(",")),
        Some(record.organizations.join(",")),
        Some(record.attorneys.join(",")),
        Some(record.attorney_organizations.join(",")),
        Some(c.sections.join(",")),
        Some(c.section_classes.join(",")),
        Some(c.section_class_subclasses.join(",")),
        Some(c.section_class_subclass_groups.join(",")),
        Some(record.abstract_text.join("\n")),
        Some(record.descriptions.join("\n")),
        Some(record.claims.join("\n")),
        Some(timestamp.to_string()),
        Some(timestamp.to_string()),
    ]
}

fn write_patents(
    tx: &Transaction<'_>,
    sql: &str,
    batch: &[PatentRecord],
    timestamp: &str,
) -> Result<(), StoreError> {
    let mut stmt = tx.prepare_cached(sql)?;
    for record in batch {
        stmt.execute(params_from_iter(patent_values(record, timestamp)))?;
    }
    Ok(())
}

fn write_referential(
    tx: &Transaction<'_>,
    sql: &str,
    batch: &[PatentRecord],
    timestamp: &str,
) -> Result<(), StoreError> {
    let mut stmt = tx.prepare_cached(sql)?;
    for document in batch.iter().flat_map(|r| &r.referential_documents) {
        let metadata = serde_json::to_string(&document.metadata)?;
        stmt.execute(params![
            document.uspto_publication_number,
            document.reference,
            document.cited_by_examiner,
            document.document_type.as_str(),
            document.country,
            metadata,
            document.kind,
            timestamp,
            timestamp,
        ])?;
    }
    Ok(())
}
