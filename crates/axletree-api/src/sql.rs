// Raw-SQL channel: executeSQLQuery / executeSQLUpdate.
//
// Some relationships never made it into the AXL schema (mobility device
// maps, single number reach, license rows); Cisco's sanctioned escape
// hatch is SQL against the cluster's Informix database, tunneled through
// the same SOAP endpoint.

use indexmap::IndexMap;
use tracing::debug;

use crate::client::AxlClient;
use crate::error::Error;
use crate::value::{AxlRecord, AxlValue};

/// One result row: ordered column name → value, `None` for SQL NULL.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SqlRow {
    columns: IndexMap<String, Option<String>>,
}

impl SqlRow {
    /// The value of a column, if present and non-NULL.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).and_then(Option::as_deref)
    }

    /// Whether the row has this column at all (NULL included).
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn columns(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_deref()))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl FromIterator<(String, Option<String>)> for SqlRow {
    fn from_iter<I: IntoIterator<Item = (String, Option<String>)>>(iter: I) -> Self {
        Self { columns: iter.into_iter().collect() }
    }
}

impl AxlClient {
    /// Run a SELECT via `executeSQLQuery`.
    ///
    /// Zero matching rows come back as an empty vec (the server omits
    /// `<return>` entirely in that case).
    pub async fn execute_sql_query(&self, sql: &str) -> Result<Vec<SqlRow>, Error> {
        debug!(sql, "executeSQLQuery");
        let body = AxlRecord::new().with("sql", sql);
        let value = self.call("executeSQLQuery", &body).await?;

        let mut wrapper = match value {
            AxlValue::Empty => return Ok(Vec::new()),
            AxlValue::Node(record) => record,
            _ => {
                return Err(Error::UnexpectedResponse(
                    "executeSQLQuery returned a non-record payload".into(),
                ));
            }
        };

        let rows = wrapper
            .remove("row")
            .map(AxlValue::into_items)
            .unwrap_or_default();
        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let AxlValue::Node(record) = row else {
                return Err(Error::UnexpectedResponse(
                    "non-record <row> in executeSQLQuery response".into(),
                ));
            };
            let mut columns = IndexMap::new();
            for (name, value) in record {
                let cell = match value {
                    AxlValue::Text(s) => Some(s),
                    AxlValue::Fk(fk) => fk.name,
                    _ => None,
                };
                columns.insert(name, cell);
            }
            out.push(SqlRow { columns });
        }

        debug!(rows = out.len(), "executeSQLQuery result");
        Ok(out)
    }

    /// Run an INSERT/UPDATE/DELETE via `executeSQLUpdate`, returning the
    /// affected row count.
    pub async fn execute_sql_update(&self, sql: &str) -> Result<u64, Error> {
        debug!(sql, "executeSQLUpdate");
        let body = AxlRecord::new().with("sql", sql);
        let value = self.call("executeSQLUpdate", &body).await?;

        value
            .as_node()
            .and_then(|record| record.text("rowsUpdated"))
            .and_then(|count| count.parse().ok())
            .ok_or_else(|| {
                Error::UnexpectedResponse("executeSQLUpdate returned no rowsUpdated".into())
            })
    }
}
