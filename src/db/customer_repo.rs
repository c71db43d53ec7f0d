// src/db/customer_repo.rs

use async_trait::async_trait;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::CustomerStore,
    models::customer::{Customer, NewCustomer},
};

const CUSTOMER_COLUMNS: &str =
    "id, first_name, last_name, cpf, email, password_hash, income, zip_code, street";

// O repositório de clientes, responsável por todas as interações com a tabela 'customers'
#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Converte violação de chave única (cpf/email) em um erro mais amigável
fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some(c) if c.contains("email") => "Email",
                _ => "Cpf",
            };
            return AppError::UniqueConstraintViolation(format!("{} already registered", field));
        }
    }
    AppError::DatabaseError(e)
}

#[async_trait]
impl CustomerStore for CustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    async fn save(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        sqlx::query_as::<_, Customer>(&format!(
            r#"
            INSERT INTO customers (
                first_name, last_name, cpf, email, password_hash, income, zip_code, street
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(&customer.cpf)
        .bind(&customer.email)
        .bind(&customer.password_hash)
        .bind(customer.income)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .fetch_one(&self.pool)
        .await
        .map_err(map_unique_violation)
    }

    async fn update(&self, customer: Customer) -> Result<Option<Customer>, AppError> {
        let updated = sqlx::query_as::<_, Customer>(&format!(
            r#"
            UPDATE customers
            SET first_name = $2, last_name = $3, income = $4,
                zip_code = $5, street = $6, updated_at = NOW()
            WHERE id = $1
            RETURNING {CUSTOMER_COLUMNS}
            "#
        ))
        .bind(customer.id)
        .bind(&customer.first_name)
        .bind(&customer.last_name)
        .bind(customer.income)
        .bind(&customer.address.zip_code)
        .bind(&customer.address.street)
        .fetch_optional(&self.pool)
        .await?;

        Ok(updated)
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        // Os créditos caem junto pelo ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM customers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
