//! Provider repository contract and SQLite implementation.

use crate::model::provider::Provider;
use crate::model::record::{Document, RecordId};
use crate::query::filter::Filter;
use crate::repo::{limit_to_sql, parse_record_id, RepoResult};
use rusqlite::{params, params_from_iter, Connection, Row};

const PROVIDER_SELECT_SQL: &str = "SELECT
    id,
    name,
    specialty,
    location,
    npi
FROM providers";

/// Repository interface for the providers collection.
pub trait ProviderRepository {
    fn insert_provider(&self, provider: &Provider) -> RepoResult<RecordId>;
    fn find_providers(&self, filter: &Filter, limit: u32) -> RepoResult<Vec<Document<Provider>>>;
}

/// SQLite-backed provider repository.
pub struct SqliteProviderRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteProviderRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ProviderRepository for SqliteProviderRepository<'_> {
    fn insert_provider(&self, provider: &Provider) -> RepoResult<RecordId> {
        provider.validate()?;

        let id = RecordId::generate();
        self.conn.execute(
            "INSERT INTO providers (id, name, specialty, location, npi)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                id.to_string(),
                provider.name.as_str(),
                provider.specialty.as_deref(),
                provider.location.as_deref(),
                provider.npi.as_deref(),
            ],
        )?;

        Ok(id)
    }

    fn find_providers(&self, filter: &Filter, limit: u32) -> RepoResult<Vec<Document<Provider>>> {
        let predicate = filter.to_sql();
        let sql = format!(
            "{PROVIDER_SELECT_SQL} {} ORDER BY rowid ASC LIMIT ?",
            predicate.where_clause
        );
        let mut bind_values = predicate.params;
        bind_values.push(limit_to_sql(limit));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut providers = Vec::new();
        while let Some(row) = rows.next()? {
            providers.push(parse_provider_row(row)?);
        }

        Ok(providers)
    }
}

fn parse_provider_row(row: &Row<'_>) -> RepoResult<Document<Provider>> {
    let id_text: String = row.get("id")?;
    let id = parse_record_id(&id_text, "providers.id")?;
    let provider = Provider {
        name: row.get("name")?,
        specialty: row.get("specialty")?,
        location: row.get("location")?,
        npi: row.get("npi")?,
    };
    Ok(Document::new(id, provider))
}
