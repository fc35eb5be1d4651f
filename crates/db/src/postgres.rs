//! PostgreSQL-backed [`Store`].
//!
//! One generic [`PgStore`] serves every catalog table. Each record type
//! describes its table through [`PgRecord`]: the table name, the select
//! list, and the writable columns with their binds.

use std::marker::PhantomData;

use async_trait::async_trait;
use catalog_core::types::DbId;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, PgPool, Postgres};

use crate::models::{
    NutrientCategoryRecord, NutrientRecord, PersistedRecord, ProductCategoryRecord,
    ProductNutrientRecord, ProductRecord, ProductSubCategoryRecord, TreatingTypeRecord,
};
use crate::store::{Store, StoreError};

/// Query builder type the bind helpers operate on.
pub type PgQueryAs<'q, O> = QueryAs<'q, Postgres, O, PgArguments>;

/// Table description for a persisted record.
pub trait PgRecord: PersistedRecord + for<'r> FromRow<'r, PgRow> + Unpin {
    const TABLE: &'static str;

    /// Select list, `id` first.
    const COLUMNS: &'static str;

    /// Columns written on insert and update, in bind order.
    const WRITE_COLUMNS: &'static [&'static str];

    /// Bind the values of [`WRITE_COLUMNS`](Self::WRITE_COLUMNS) in order.
    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O>;
}

/// Generic table store over a connection pool.
pub struct PgStore<R> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R> PgStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

impl<R> Clone for PgStore<R> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<R: PgRecord> PgStore<R> {
    fn insert_sql() -> String {
        let placeholders: Vec<String> = (1..=R::WRITE_COLUMNS.len())
            .map(|n| format!("${n}"))
            .collect();
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            R::TABLE,
            R::WRITE_COLUMNS.join(", "),
            placeholders.join(", "),
            R::COLUMNS,
        )
    }

    fn update_sql() -> String {
        // $1 is the id; writes start at $2.
        let assignments: Vec<String> = R::WRITE_COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 2))
            .collect();
        format!(
            "UPDATE {} SET {} WHERE id = $1 RETURNING {}",
            R::TABLE,
            assignments.join(", "),
            R::COLUMNS,
        )
    }
}

#[async_trait]
impl<R: PgRecord> Store<R> for PgStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        let query = format!("SELECT {} FROM {} ORDER BY id", R::COLUMNS, R::TABLE);
        let rows = sqlx::query_as::<_, R>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<R>, StoreError> {
        let query = format!("SELECT {} FROM {} WHERE id = $1", R::COLUMNS, R::TABLE);
        let row = sqlx::query_as::<_, R>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn add(&self, record: R) -> Result<R, StoreError> {
        let query = Self::insert_sql();
        let row = record
            .bind_writes(sqlx::query_as::<_, R>(&query))
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(&self, record: R) -> Result<R, StoreError> {
        let query = Self::update_sql();
        let row = record
            .bind_writes(sqlx::query_as::<_, R>(&query).bind(record.id()))
            .fetch_optional(&self.pool)
            .await?;
        row.ok_or(StoreError::Missing(record.id()))
    }

    async fn remove(&self, record: R) -> Result<(), StoreError> {
        let query = format!("DELETE FROM {} WHERE id = $1", R::TABLE);
        let result = sqlx::query(&query)
            .bind(record.id())
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(record.id()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Table descriptions
// ---------------------------------------------------------------------------

impl PgRecord for ProductCategoryRecord {
    const TABLE: &'static str = "product_categories";
    const COLUMNS: &'static str = "id, title, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &["title", "created_at", "updated_at"];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.title)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgRecord for ProductSubCategoryRecord {
    const TABLE: &'static str = "product_sub_categories";
    const COLUMNS: &'static str = "id, title, product_category_id, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] =
        &["title", "product_category_id", "created_at", "updated_at"];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.title)
            .bind(self.product_category_id)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgRecord for ProductRecord {
    const TABLE: &'static str = "products";
    const COLUMNS: &'static str = "id, title, product_sub_category_id, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] =
        &["title", "product_sub_category_id", "created_at", "updated_at"];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.title)
            .bind(self.product_sub_category_id)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgRecord for NutrientCategoryRecord {
    const TABLE: &'static str = "nutrient_categories";
    const COLUMNS: &'static str = "id, title, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &["title", "created_at", "updated_at"];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.title)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgRecord for NutrientRecord {
    const TABLE: &'static str = "nutrients";
    const COLUMNS: &'static str =
        "id, title, daily_dose, nutrient_category_id, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &[
        "title",
        "daily_dose",
        "nutrient_category_id",
        "created_at",
        "updated_at",
    ];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.title)
            .bind(self.daily_dose)
            .bind(self.nutrient_category_id)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgRecord for TreatingTypeRecord {
    const TABLE: &'static str = "treating_types";
    const COLUMNS: &'static str = "id, title, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &["title", "created_at", "updated_at"];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(&self.title)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}

impl PgRecord for ProductNutrientRecord {
    const TABLE: &'static str = "product_nutrients";
    const COLUMNS: &'static str =
        "id, product_id, nutrient_id, treating_type_id, quality, created_at, updated_at";
    const WRITE_COLUMNS: &'static [&'static str] = &[
        "product_id",
        "nutrient_id",
        "treating_type_id",
        "quality",
        "created_at",
        "updated_at",
    ];

    fn bind_writes<'q, O>(&'q self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(self.product_id)
            .bind(self.nutrient_id)
            .bind(self.treating_type_id)
            .bind(self.quality)
            .bind(self.created_at)
            .bind(self.updated_at)
    }
}
