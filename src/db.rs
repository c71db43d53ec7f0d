// src/db.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        credit::{Credit, NewCredit},
        customer::{Customer, NewCustomer},
    },
};

pub mod customer_repo;
pub use customer_repo::CustomerRepository;
pub mod credit_repo;
pub use credit_repo::CreditRepository;
pub mod memory;
pub use memory::InMemoryStore;

// ---
// Contratos de persistência
// ---
// Os serviços só conhecem estes traits; o Postgres e o store em memória
// são injetados na construção do AppState.

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError>;

    /// Atribui o id. cpf e e-mail duplicados viram UniqueConstraintViolation.
    async fn save(&self, customer: NewCustomer) -> Result<Customer, AppError>;

    /// Grava os campos alteráveis. Retorna None se o id não existe.
    async fn update(&self, customer: Customer) -> Result<Option<Customer>, AppError>;

    /// Remove o cliente e os créditos dele. Retorna false se o id não existe.
    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError>;
}

#[async_trait]
pub trait CreditStore: Send + Sync {
    /// Atribui o id. Colisão de credit_code é erro interno.
    async fn save(&self, credit: NewCredit) -> Result<Credit, AppError>;

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError>;

    /// Lista vazia quando o cliente não tem créditos (ou não existe).
    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError>;
}
