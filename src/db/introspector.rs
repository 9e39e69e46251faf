//! Schema introspection over a [`CatalogProvider`].
//!
//! Backend differences live entirely in the catalog implementations; this
//! module only normalizes arguments and assembles descriptors.

use crate::db::catalog::CatalogProvider;
use crate::db::sql_validator::validate_table_name;
use crate::error::DbResult;
use crate::models::{SchemaDescriptor, TABLE_TYPE_TABLE, TableDescriptor};
use tracing::debug;

/// Answers table and column questions using one catalog.
pub struct SchemaIntrospector<'a, C: CatalogProvider> {
    catalog: &'a mut C,
}

impl<'a, C: CatalogProvider> SchemaIntrospector<'a, C> {
    pub fn new(catalog: &'a mut C) -> Self {
        Self { catalog }
    }

    /// List tables in `schema`, or in the default schema when absent.
    ///
    /// Without `include_system` only ordinary tables are returned. Catalog
    /// order is kept.
    pub async fn list_tables(
        &mut self,
        schema: Option<&str>,
        include_system: bool,
    ) -> DbResult<Vec<TableDescriptor>> {
        let schema = normalize_schema(schema);
        let table_types: Option<&[&str]> = if include_system {
            None
        } else {
            Some(&[TABLE_TYPE_TABLE])
        };

        let tables = self.catalog.list_tables(schema, table_types).await?;
        debug!(
            schema = schema.unwrap_or("<default>"),
            include_system = include_system,
            count = tables.len(),
            "Listed tables"
        );
        Ok(tables)
    }

    /// Describe columns, primary keys and imported foreign keys of a table.
    ///
    /// An empty `table_name` is rejected before the catalog is touched. An
    /// unknown table yields a descriptor with empty lists.
    pub async fn describe_table(
        &mut self,
        table_name: &str,
        schema: Option<&str>,
    ) -> DbResult<SchemaDescriptor> {
        let table_name = validate_table_name(table_name)?;
        let schema = normalize_schema(schema);

        let columns = self.catalog.list_columns(table_name, schema).await?;
        let primary_keys = self.catalog.list_primary_keys(table_name, schema).await?;
        let foreign_keys = self.catalog.list_foreign_keys(table_name, schema).await?;

        debug!(
            table = table_name,
            columns = columns.len(),
            primary_keys = primary_keys.len(),
            foreign_keys = foreign_keys.len(),
            "Described table"
        );

        Ok(SchemaDescriptor {
            table_name: table_name.to_string(),
            schema: schema.map(str::to_string),
            columns,
            primary_keys,
            foreign_keys,
        })
    }
}

/// A blank schema argument means "use the default schema".
fn normalize_schema(schema: Option<&str>) -> Option<&str> {
    schema.map(str::trim).filter(|s| !s.is_empty())
}
