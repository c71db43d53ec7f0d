// src/services/customer_service.rs

use std::sync::Arc;

use bcrypt::hash;
use rust_decimal::Decimal;
use tracing::instrument;

use crate::{
    common::error::AppError,
    db::CustomerStore,
    models::customer::{Address, Customer, CustomerUpdate, NewCustomer},
};

/// Dados de cadastro já validados pelo handler; a senha ainda em texto puro.
#[derive(Debug, Clone)]
pub struct CustomerRegistration {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub income: Decimal,
    pub address: Address,
}

// O "diretório" de clientes: busca por id e o cadastro básico.
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self { store }
    }

    #[instrument(skip(self))]
    pub async fn find_by_id(&self, id: i64) -> Result<Customer, AppError> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Id {} not found", id)))
    }

    #[instrument(skip(self, registration), fields(email = %registration.email))]
    pub async fn save(&self, registration: CustomerRegistration) -> Result<Customer, AppError> {
        // Hashing fora do runtime async
        let password = registration.password;
        let password_hash = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;

        let customer = self
            .store
            .save(NewCustomer {
                first_name: registration.first_name,
                last_name: registration.last_name,
                cpf: registration.cpf,
                email: registration.email,
                password_hash,
                income: registration.income,
                address: registration.address,
            })
            .await?;

        tracing::info!(customer_id = customer.id, "Cliente cadastrado");
        Ok(customer)
    }

    #[instrument(skip(self, changes))]
    pub async fn update(&self, id: i64, changes: CustomerUpdate) -> Result<Customer, AppError> {
        let mut customer = self.find_by_id(id).await?;
        changes.apply_to(&mut customer);

        self.store
            .update(customer)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Id {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        if !self.store.delete_by_id(id).await? {
            return Err(AppError::NotFound(format!("Id {} not found", id)));
        }
        tracing::info!(customer_id = id, "Cliente removido junto com seus créditos");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::InMemoryStore;

    fn build_registration(cpf: &str, email: &str) -> CustomerRegistration {
        CustomerRegistration {
            first_name: "Gabriel".to_string(),
            last_name: "Galera".to_string(),
            cpf: cpf.to_string(),
            email: email.to_string(),
            password: "minhaSenha".to_string(),
            income: Decimal::new(100000, 2),
            address: Address {
                zip_code: "88888333".to_string(),
                street: "Rua dos Galeras".to_string(),
            },
        }
    }

    fn build_service() -> CustomerService {
        CustomerService::new(Arc::new(InMemoryStore::new()))
    }

    #[tokio::test]
    async fn save_hashes_password_and_find_by_id_returns_it() {
        let service = build_service();

        let saved = service
            .save(build_registration("44444444433", "gabgalera@hotmail.com"))
            .await
            .expect("save customer");

        assert_ne!(saved.password_hash, "minhaSenha");
        assert!(bcrypt::verify("minhaSenha", &saved.password_hash).unwrap());

        let found = service.find_by_id(saved.id).await.expect("find customer");
        assert_eq!(found, saved);
    }

    #[tokio::test]
    async fn find_by_id_fails_with_not_found_when_absent() {
        let service = build_service();

        let err = service.find_by_id(42).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Id 42 not found"));
    }

    #[tokio::test]
    async fn duplicate_cpf_is_a_conflict() {
        let service = build_service();
        service
            .save(build_registration("44444444433", "a@mail.com"))
            .await
            .unwrap();

        let err = service
            .save(build_registration("44444444433", "b@mail.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UniqueConstraintViolation(_)));
    }

    #[tokio::test]
    async fn update_changes_mutable_fields_only() {
        let service = build_service();
        let saved = service
            .save(build_registration("44444444433", "a@mail.com"))
            .await
            .unwrap();

        let updated = service
            .update(
                saved.id,
                CustomerUpdate {
                    first_name: "Ana".to_string(),
                    last_name: "Souza".to_string(),
                    income: Decimal::new(250000, 2),
                    address: Address {
                        zip_code: "11111000".to_string(),
                        street: "Av. Brasil".to_string(),
                    },
                },
            )
            .await
            .expect("update customer");

        assert_eq!(updated.first_name, "Ana");
        assert_eq!(updated.income, Decimal::new(250000, 2));
        assert_eq!(updated.cpf, saved.cpf);
        assert_eq!(updated.email, saved.email);
    }

    #[tokio::test]
    async fn delete_missing_customer_is_not_found() {
        let service = build_service();

        let err = service.delete(5).await.unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }
}
