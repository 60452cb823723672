use crate::app::models::{Column, ForeignKeyInfo, NameSet, TableModel};
use sqlx::PgConnection;

// It handles all database interaction.

pub struct Inspector<'a> {
    conn: &'a mut PgConnection,
}

impl<'a> Inspector<'a> {
    pub fn new(conn: &'a mut PgConnection) -> Self {
        Self { conn }
    }

    /// Reads one table's metadata. A table with no columns comes back with an
    /// empty column list and the remaining catalog queries are skipped.
    pub async fn load(&mut self, schema: &str, table: &str) -> sqlx::Result<TableModel> {
        let columns = self.get_columns(schema, table).await?;
        tracing::debug!(schema, table, count = columns.len(), "columns loaded");
        if columns.is_empty() {
            return Ok(TableModel::new(schema, table, columns));
        }

        let primary_keys = self.get_primary_keys(schema, table).await?;
        tracing::debug!(count = primary_keys.len(), "primary key columns loaded");

        let identity_columns = self.get_identity_columns(schema, table).await?;
        tracing::debug!(count = identity_columns.len(), "identity columns loaded");

        let foreign_keys = self.get_foreign_keys(schema, table).await?;
        tracing::debug!(count = foreign_keys.len(), "foreign key rows loaded");

        Ok(TableModel::new(schema, table, columns)
            .with_primary_keys(primary_keys)
            .with_identity_columns(identity_columns)
            .with_foreign_keys(foreign_keys))
    }

    async fn get_columns(&mut self, schema: &str, table: &str) -> sqlx::Result<Vec<Column>> {
        sqlx::query_as::<_, Column>(
            r#"
            SELECT
                c.column_name::text AS name,
                c.udt_name::text AS source_type,
                (c.is_nullable = 'YES') AS is_nullable,
                c.character_maximum_length::int4 AS max_length,
                c.ordinal_position::int4 AS ordinal
            FROM information_schema.columns c
            WHERE c.table_schema = $1 AND c.table_name = $2
            ORDER BY c.ordinal_position
            "#,
        )
        .bind(schema)
        .bind(table)
        .fetch_all(&mut *self.conn)
        .await
    }

    async fn get_primary_keys(&mut self, schema: &str, table: &str) -> sqlx::Result<NameSet> {
        let result: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT kcu.column_name::text
            FROM information_schema.table_constraints tc
            JOIN information_schema.key_column_usage kcu
              ON tc.constraint_name = kcu.constraint_name
              AND tc.table_schema = kcu.table_schema
              AND tc.table_name = kcu.table_name
            WHERE tc.constraint_type = 'PRIMARY KEY'
              AND tc.table_schema = $1
              AND tc.table_name = $2
            "#,
        )
        .bind(schema)
        .bind(table)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(result.into_iter().map(|(name,)| name).collect())
    }

    // Identity columns and serial columns (default drawn from a sequence).
    async fn get_identity_columns(&mut self, schema: &str, table: &str) -> sqlx::Result<NameSet> {
        let result: Vec<(String,)> = sqlx::query_as(
            r#"
            SELECT a.attname::text
            FROM pg_catalog.pg_attribute a
            JOIN pg_catalog.pg_class t ON t.oid = a.attrelid
            JOIN pg_catalog.pg_namespace s ON s.oid = t.relnamespace
            LEFT JOIN pg_catalog.pg_attrdef d
              ON d.adrelid = a.attrelid AND d.adnum = a.attnum
            WHERE s.nspname = $1
              AND t.relname = $2
              AND a.attnum > 0
              AND NOT a.attisdropped
              AND (a.attidentity IN ('a', 'd')
                   OR pg_catalog.pg_get_expr(d.adbin, d.adrelid) LIKE 'nextval(%')
            "#,
        )
        .bind(schema)
        .bind(table)
        .fetch_all(&mut *self.conn)
        .await?;
        Ok(result.into_iter().map(|(name,)| name).collect())
    }

    async fn get_foreign_keys(
        &mut self,
        schema: &str,
        table: &str,
    ) -> sqlx::Result<Vec<ForeignKeyInfo>> {
        sqlx::query_as::<_, ForeignKeyInfo>(
            r#"
            SELECT
                pc.attname::text AS column_name,
                s2.nspname::text AS ref_schema,
                t2.relname::text AS ref_table,
                rc.attname::text AS ref_column
            FROM pg_catalog.pg_constraint fk
            JOIN pg_catalog.pg_class t1 ON t1.oid = fk.conrelid
            JOIN pg_catalog.pg_namespace s1 ON s1.oid = t1.relnamespace
            CROSS JOIN LATERAL unnest(fk.conkey, fk.confkey) AS k(parent_attnum, ref_attnum)
            JOIN pg_catalog.pg_attribute pc
              ON pc.attrelid = fk.conrelid AND pc.attnum = k.parent_attnum
            JOIN pg_catalog.pg_class t2 ON t2.oid = fk.confrelid
            JOIN pg_catalog.pg_namespace s2 ON s2.oid = t2.relnamespace
            JOIN pg_catalog.pg_attribute rc
              ON rc.attrelid = fk.confrelid AND rc.attnum = k.ref_attnum
            WHERE fk.contype = 'f'
              AND s1.nspname = $1
              AND t1.relname = $2
            ORDER BY fk.conname, pc.attnum
            "#,
        )
        .bind(schema)
        .bind(table)
        .fetch_all(&mut *self.conn)
        .await
    }
}
