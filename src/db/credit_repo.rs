// src/db/credit_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CreditStore,
    models::credit::{Credit, NewCredit},
};

#[derive(Clone)]
pub struct CreditRepository {
    pool: PgPool,
}

impl CreditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CreditStore for CreditRepository {
    async fn save(&self, credit: NewCredit) -> Result<Credit, AppError> {
        sqlx::query_as::<_, Credit>(
            r#"
            INSERT INTO credits (
                credit_code, credit_value, day_first_installment,
                number_of_installments, status, customer_id
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, credit_code, credit_value, day_first_installment,
                      number_of_installments, status, customer_id
            "#,
        )
        .bind(credit.credit_code)
        .bind(credit.credit_value)
        .bind(credit.day_first_installment)
        .bind(credit.number_of_installments)
        .bind(credit.status)
        .bind(credit.customer_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Código repetido: probabilidade desprezível, o cliente pode tentar de novo.
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::InternalServerError(anyhow::anyhow!(
                        "credit code collision on {}",
                        credit.credit_code
                    ));
                }
            }
            e.into()
        })
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError> {
        let credit = sqlx::query_as::<_, Credit>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installments, status, customer_id
            FROM credits
            WHERE credit_code = $1
            "#,
        )
        .bind(credit_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(credit)
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let credits = sqlx::query_as::<_, Credit>(
            r#"
            SELECT id, credit_code, credit_value, day_first_installment,
                   number_of_installments, status, customer_id
            FROM credits
            WHERE customer_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(credits)
    }
}
