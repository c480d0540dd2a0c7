// Canned queries against the cluster's Informix schema, for the joins
// and flags the AXL surface cannot express. Table and column names are
// part of the vendor contract; identifiers travel bare-lowercase, not
// in the braced SOAP form.

use uuid::Uuid;

use axletree_api::value::{parse_uuid, sql_uuid};
use axletree_api::{AxlClient, Error, SqlRow};

use crate::convert::{parse_sql_bool, sql_bool};
use crate::error::CcmError;

/// A device row presenting a directory number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAssociation {
    /// Device name (`SEP...`, `CSF...`).
    pub name: String,
    /// Device pkid.
    pub device: Uuid,
    /// The DN as dialable text.
    pub pattern: String,
}

/// One presence license row from `enduserlicense`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceLicense {
    pub cups: bool,
    pub cupc: bool,
}

/// An assigned directory number with its route partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignedNumber {
    pub pattern: String,
    pub partition: String,
}

/// The canned-query bundle over one client.
pub struct SqlUtils<'a> {
    client: &'a AxlClient,
}

impl<'a> SqlUtils<'a> {
    pub fn new(client: &'a AxlClient) -> Self {
        Self { client }
    }

    /// Devices mapped to a user in `enduserdevicemap` (the mobility
    /// association), as device pkids.
    pub async fn user_device_map(&self, user: Uuid) -> Result<Vec<Uuid>, CcmError> {
        let statement = format!(
            "SELECT fkdevice FROM enduserdevicemap WHERE fkenduser = {}",
            quoted(&sql_uuid(user))
        );
        let rows = self.client.execute_sql_query(&statement).await?;
        rows.iter().map(|row| row_uuid(row, "fkdevice")).collect()
    }

    /// Users holding a directory number as a primary extension, as
    /// enduser pkids.
    pub async fn line_user_map(&self, line: Uuid) -> Result<Vec<Uuid>, CcmError> {
        let statement = format!(
            "SELECT fkenduser FROM endusernumplanmap WHERE fknumplan = {}",
            quoted(&sql_uuid(line))
        );
        let rows = self.client.execute_sql_query(&statement).await?;
        rows.iter().map(|row| row_uuid(row, "fkenduser")).collect()
    }

    /// Devices presenting a directory number, with name, pkid and the DN
    /// text, from the device / numplan map.
    pub async fn line_device_map(&self, line: Uuid) -> Result<Vec<DeviceAssociation>, CcmError> {
        let statement = format!(
            "SELECT d.name, d.pkid, n.dnorpattern AS dn \
             FROM device AS d, numplan AS n, devicenumplanmap AS dnpm \
             WHERE dnpm.fkdevice = d.pkid AND dnpm.fknumplan = n.pkid \
             AND dnpm.fknumplan = {}",
            quoted(&sql_uuid(line))
        );
        let rows = self.client.execute_sql_query(&statement).await?;
        rows.iter().map(device_association).collect()
    }

    /// The presence license row for a user, or `None` when the user has
    /// never been licensed.
    pub async fn presence_license(&self, user: Uuid) -> Result<Option<PresenceLicense>, CcmError> {
        let statement = format!(
            "SELECT enablecups, enablecupc FROM enduserlicense WHERE fkenduser = {}",
            quoted(&sql_uuid(user))
        );
        let rows = self.client.execute_sql_query(&statement).await?;
        if rows.len() > 1 {
            return Err(CcmError::Api(Error::UnexpectedResponse(format!(
                "enduserlicense has {} rows for one user",
                rows.len()
            ))));
        }
        Ok(rows.first().map(|row| PresenceLicense {
            cups: row.get("enablecups").is_some_and(parse_sql_bool),
            cupc: row.get("enablecupc").is_some_and(parse_sql_bool),
        }))
    }

    /// Insert a presence license row with CUPS enabled.
    pub async fn insert_presence_license(&self, user: Uuid, cupc: bool) -> Result<u64, CcmError> {
        let statement = format!(
            "INSERT INTO enduserlicense (fkenduser, enablecups, enablecupc) \
             VALUES ({}, {}, {})",
            quoted(&sql_uuid(user)),
            quoted("t"),
            quoted(sql_bool(cupc))
        );
        Ok(self.client.execute_sql_update(&statement).await?)
    }

    /// Rewrite an existing license row with CUPS enabled and the CUPC
    /// flag as given. Both columns are asserted: a row written outside
    /// this library may carry `enablecups = 'f'`.
    pub async fn update_presence_license(&self, user: Uuid, cupc: bool) -> Result<u64, CcmError> {
        let statement = format!(
            "UPDATE enduserlicense SET enablecups = {}, enablecupc = {} WHERE fkenduser = {}",
            quoted("t"),
            quoted(sql_bool(cupc)),
            quoted(&sql_uuid(user))
        );
        Ok(self.client.execute_sql_update(&statement).await?)
    }

    /// Delete a user's presence license row.
    pub async fn remove_presence_license(&self, user: Uuid) -> Result<u64, CcmError> {
        let statement = format!(
            "DELETE FROM enduserlicense WHERE fkenduser = {}",
            quoted(&sql_uuid(user))
        );
        Ok(self.client.execute_sql_update(&statement).await?)
    }

    /// Toggle BFCP (video desktop sharing) on a device row.
    pub async fn set_bfcp(&self, device: Uuid, enabled: bool) -> Result<u64, CcmError> {
        let statement = format!(
            "UPDATE device SET enablebfcp = {} WHERE pkid = {}",
            quoted(sql_bool(enabled)),
            quoted(&sql_uuid(device))
        );
        Ok(self.client.execute_sql_update(&statement).await?)
    }

    /// The single-number-reach flag for a remote destination, or `None`
    /// when the dynamic row is missing.
    pub async fn single_number_reach(&self, destination: Uuid) -> Result<Option<bool>, CcmError> {
        let statement = format!(
            "SELECT enablesinglenumberreach FROM remotedestinationdynamic \
             WHERE fkremotedestination = {}",
            quoted(&sql_uuid(destination))
        );
        let rows = self.client.execute_sql_query(&statement).await?;
        Ok(rows
            .first()
            .map(|row| row.get("enablesinglenumberreach").is_some_and(parse_sql_bool)))
    }

    /// Write the single-number-reach flag on the dynamic row.
    pub async fn set_single_number_reach(
        &self,
        destination: Uuid,
        enabled: bool,
    ) -> Result<u64, CcmError> {
        let statement = format!(
            "UPDATE remotedestinationdynamic SET enablesinglenumberreach = {} \
             WHERE fkremotedestination = {}",
            quoted(sql_bool(enabled)),
            quoted(&sql_uuid(destination))
        );
        Ok(self.client.execute_sql_update(&statement).await?)
    }

    /// Every DN assigned to at least one device, with its partition,
    /// ordered by pattern.
    pub async fn assigned_directory_numbers(&self) -> Result<Vec<AssignedNumber>, CcmError> {
        let statement = "SELECT dnorpattern AS dn, MIN(r.name) AS name \
                         FROM numplan n, routepartition r \
                         WHERE r.pkid = n.fkroutepartition \
                         AND n.pkid IN (SELECT fknumplan FROM devicenumplanmap \
                         WHERE fkdevice IN (SELECT pkid FROM device)) \
                         GROUP BY dn ORDER BY dn";
        let rows = self.client.execute_sql_query(statement).await?;
        rows.iter().map(assigned_number).collect()
    }

    /// Device DNs no device presents and that are not callable, as
    /// numplan pkids. Candidates for deletion.
    pub async fn inactive_directory_numbers(&self) -> Result<Vec<Uuid>, CcmError> {
        let statement = "SELECT n.pkid FROM numplan n \
                         LEFT OUTER JOIN devicenumplanmap m ON m.fknumplan = n.pkid \
                         WHERE m.fknumplan IS NULL \
                         AND n.tkpatternusage = '2' AND n.iscallable = 'f'";
        let rows = self.client.execute_sql_query(statement).await?;
        rows.iter().map(|row| row_uuid(row, "pkid")).collect()
    }

    /// User ids whose keypad-entered self-service id contains `fragment`.
    pub async fn users_with_self_service_id(
        &self,
        fragment: &str,
    ) -> Result<Vec<String>, CcmError> {
        let statement = format!(
            "SELECT userid FROM enduser WHERE keypadenteredalternateidentifier LIKE {}",
            quoted(&format!("%{fragment}%"))
        );
        let rows = self.client.execute_sql_query(&statement).await?;
        rows.iter()
            .map(|row| row_text(row, "userid").map(str::to_owned))
            .collect()
    }
}

/// Double-quote a literal for Informix, doubling embedded quotes.
fn quoted(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

fn row_text<'r>(row: &'r SqlRow, column: &str) -> Result<&'r str, CcmError> {
    row.get(column).ok_or_else(|| {
        CcmError::Api(Error::UnexpectedResponse(format!(
            "column {column} missing from result row"
        )))
    })
}

fn row_uuid(row: &SqlRow, column: &str) -> Result<Uuid, CcmError> {
    let text = row_text(row, column)?;
    parse_uuid(text).ok_or_else(|| {
        CcmError::Api(Error::UnexpectedResponse(format!(
            "column {column} is not a uuid: {text}"
        )))
    })
}

fn device_association(row: &SqlRow) -> Result<DeviceAssociation, CcmError> {
    Ok(DeviceAssociation {
        name: row_text(row, "name")?.to_owned(),
        device: row_uuid(row, "pkid")?,
        pattern: row_text(row, "dn")?.to_owned(),
    })
}

fn assigned_number(row: &SqlRow) -> Result<AssignedNumber, CcmError> {
    Ok(AssignedNumber {
        pattern: row_text(row, "dn")?.to_owned(),
        partition: row_text(row, "name")?.to_owned(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn row(cells: &[(&str, Option<&str>)]) -> SqlRow {
        cells
            .iter()
            .map(|(name, value)| ((*name).to_owned(), value.map(str::to_owned)))
            .collect()
    }

    #[test]
    fn quoting_doubles_embedded_quotes() {
        assert_eq!(quoted("plain"), "\"plain\"");
        assert_eq!(quoted("O\"Brien"), "\"O\"\"Brien\"");
    }

    #[test]
    fn device_association_reads_the_aliased_columns() {
        let row = row(&[
            ("name", Some("SEP001122334455")),
            ("pkid", Some("3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c")),
            ("dn", Some("1000")),
        ]);
        let assoc = device_association(&row).unwrap();
        assert_eq!(assoc.name, "SEP001122334455");
        assert_eq!(assoc.pattern, "1000");
        assert_eq!(sql_uuid(assoc.device), "3b1a2c4d-9f00-4e5a-8b1c-0d2e3f4a5b6c");
    }

    #[test]
    fn missing_columns_are_reported_by_name() {
        let row = row(&[("name", Some("SEP001122334455"))]);
        let err = device_association(&row).unwrap_err();
        assert!(err.to_string().contains("pkid"));
    }

    #[test]
    fn null_uuid_column_is_an_error() {
        let row = row(&[("fkdevice", None)]);
        assert!(row_uuid(&row, "fkdevice").is_err());
    }
}
