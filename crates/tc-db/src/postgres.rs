//! Postgres backed document store: one JSONB row per document.

use sqlx::{FromRow, PgPool, types::Json};
use uuid::Uuid;

use crate::{
    error::{StoreError, StoreResult},
    store::{BoxFuture, Direction, Document, DocumentStore, Fields, OrderBy},
};

#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(FromRow)]
struct DocumentRow {
    id: String,
    fields: Json<Fields>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            fields: row.fields.0,
        }
    }
}

impl DocumentStore for PgDocumentStore {
    fn ping(&self) -> BoxFuture<'_, StoreResult<()>> {
        Box::pin(async move {
            sqlx::query("SELECT 1").execute(&self.pool).await?;
            Ok(())
        })
    }

    fn list_documents<'a>(
        &'a self,
        collection: &'a str,
        order_by: Option<OrderBy>,
    ) -> BoxFuture<'a, StoreResult<Vec<Document>>> {
        Box::pin(async move {
            let rows: Vec<DocumentRow> = match order_by {
                None => {
                    sqlx::query_as(
                        // language=PostgreSQL
                        r#"
                            SELECT id, fields
                            FROM documents
                            WHERE collection = $1
                            ORDER BY created_at, id
                        "#,
                    )
                    .bind(collection)
                    .fetch_all(&self.pool)
                    .await?
                }
                Some(OrderBy {
                    field,
                    direction: Direction::Asc,
                }) => {
                    sqlx::query_as(
                        // language=PostgreSQL
                        r#"
                            SELECT id, fields
                            FROM documents
                            WHERE collection = $1
                            ORDER BY fields ->> $2 ASC NULLS FIRST, created_at, id
                        "#,
                    )
                    .bind(collection)
                    .bind(field)
                    .fetch_all(&self.pool)
                    .await?
                }
                Some(OrderBy {
                    field,
                    direction: Direction::Desc,
                }) => {
                    sqlx::query_as(
                        // language=PostgreSQL
                        r#"
                            SELECT id, fields
                            FROM documents
                            WHERE collection = $1
                            ORDER BY fields ->> $2 DESC NULLS LAST, created_at, id
                        "#,
                    )
                    .bind(collection)
                    .bind(field)
                    .fetch_all(&self.pool)
                    .await?
                }
            };

            Ok(rows.into_iter().map(Document::from).collect())
        })
    }

    fn get_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<Document>>> {
        Box::pin(async move {
            let row: Option<DocumentRow> = sqlx::query_as(
                // language=PostgreSQL
                r#"
                    SELECT id, fields
                    FROM documents
                    WHERE collection = $1 AND id = $2
                "#,
            )
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

            Ok(row.map(Document::from))
        })
    }

    fn add_document<'a>(
        &'a self,
        collection: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<String>> {
        Box::pin(async move {
            let id = Uuid::new_v4().to_string();
            sqlx::query(
                // language=PostgreSQL
                r#"
                    INSERT INTO documents (collection, id, fields)
                    VALUES ($1, $2, $3)
                "#,
            )
            .bind(collection)
            .bind(&id)
            .bind(Json(fields))
            .execute(&self.pool)
            .await?;

            Ok(id)
        })
    }

    fn set_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            sqlx::query(
                // language=PostgreSQL
                r#"
                    INSERT INTO documents (collection, id, fields)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (collection, id) DO UPDATE SET fields = EXCLUDED.fields
                "#,
            )
            .bind(collection)
            .bind(id)
            .bind(Json(fields))
            .execute(&self.pool)
            .await?;

            Ok(())
        })
    }

    fn update_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
        fields: Fields,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let result = sqlx::query(
                // language=PostgreSQL
                r#"
                    UPDATE documents
                    SET fields = fields || $3
                    WHERE collection = $1 AND id = $2
                "#,
            )
            .bind(collection)
            .bind(id)
            .bind(Json(fields))
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found(collection, id));
            }
            Ok(())
        })
    }

    fn delete_document<'a>(
        &'a self,
        collection: &'a str,
        id: &'a str,
    ) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let result = sqlx::query(
                // language=PostgreSQL
                r#"
                    DELETE FROM documents
                    WHERE collection = $1 AND id = $2
                "#,
            )
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

            if result.rows_affected() == 0 {
                return Err(StoreError::not_found(collection, id));
            }
            Ok(())
        })
    }
}
