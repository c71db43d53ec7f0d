// src/db/memory.rs

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CreditStore, CustomerStore},
    models::{
        credit::{Credit, NewCredit},
        customer::{Customer, NewCustomer},
    },
};

#[derive(Default)]
struct Tables {
    customers: BTreeMap<i64, Customer>,
    credits: BTreeMap<i64, Credit>,
    last_customer_id: i64,
    last_credit_id: i64,
}

/// Store em memória com as mesmas regras do schema do Postgres:
/// ids sequenciais, cpf/email/credit_code únicos e cascade na remoção do cliente.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn credit_count(&self) -> usize {
        self.tables.read().await.credits.len()
    }

    pub async fn customer_count(&self) -> usize {
        self.tables.read().await.customers.len()
    }

    /// Limpa os créditos (teardown de testes).
    pub async fn delete_all_credits(&self) {
        self.tables.write().await.credits.clear();
    }
}

#[async_trait]
impl CustomerStore for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.customers.get(&id).cloned())
    }

    async fn save(&self, customer: NewCustomer) -> Result<Customer, AppError> {
        let mut tables = self.tables.write().await;

        if tables.customers.values().any(|c| c.cpf == customer.cpf) {
            return Err(AppError::UniqueConstraintViolation("Cpf already registered".to_string()));
        }
        if tables.customers.values().any(|c| c.email == customer.email) {
            return Err(AppError::UniqueConstraintViolation("Email already registered".to_string()));
        }

        tables.last_customer_id += 1;
        let saved = customer.into_customer(tables.last_customer_id);
        tables.customers.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn update(&self, customer: Customer) -> Result<Option<Customer>, AppError> {
        let mut tables = self.tables.write().await;
        match tables.customers.get_mut(&customer.id) {
            Some(stored) => {
                // cpf, e-mail e senha não mudam por aqui
                stored.first_name = customer.first_name;
                stored.last_name = customer.last_name;
                stored.income = customer.income;
                stored.address = customer.address;
                Ok(Some(stored.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete_by_id(&self, id: i64) -> Result<bool, AppError> {
        let mut tables = self.tables.write().await;
        if tables.customers.remove(&id).is_none() {
            return Ok(false);
        }
        tables.credits.retain(|_, credit| credit.customer_id != id);
        Ok(true)
    }
}

#[async_trait]
impl CreditStore for InMemoryStore {
    async fn save(&self, credit: NewCredit) -> Result<Credit, AppError> {
        let mut tables = self.tables.write().await;

        if !tables.customers.contains_key(&credit.customer_id) {
            // Equivalente à violação de chave estrangeira
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "customer {} does not exist",
                credit.customer_id
            )));
        }
        if tables.credits.values().any(|c| c.credit_code == credit.credit_code) {
            return Err(AppError::InternalServerError(anyhow::anyhow!(
                "credit code collision on {}",
                credit.credit_code
            )));
        }

        tables.last_credit_id += 1;
        let saved = credit.into_credit(tables.last_credit_id);
        tables.credits.insert(saved.id, saved.clone());
        Ok(saved)
    }

    async fn find_by_credit_code(&self, credit_code: Uuid) -> Result<Option<Credit>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .credits
            .values()
            .find(|c| c.credit_code == credit_code)
            .cloned())
    }

    async fn find_all_by_customer_id(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .credits
            .values()
            .filter(|c| c.customer_id == customer_id)
            .cloned()
            .collect())
    }
}
