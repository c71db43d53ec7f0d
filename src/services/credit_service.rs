// src/services/credit_service.rs

use std::sync::Arc;

use chrono::{Months, NaiveDate};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    common::{error::AppError, validation::local_today},
    db::CreditStore,
    models::credit::{CreatedCredit, Credit, CreditRequest, NewCredit},
    services::customer_service::CustomerService,
};

/// Janela máxima entre hoje e a primeira parcela.
pub const MAX_MONTHS_TO_FIRST_INSTALLMENT: u32 = 3;

/// A primeira parcela pode cair no máximo 3 meses depois de `today` (inclusive).
pub fn validate_day_first_installment(
    day_first_installment: NaiveDate,
    today: NaiveDate,
) -> Result<(), AppError> {
    let limit = today
        .checked_add_months(Months::new(MAX_MONTHS_TO_FIRST_INSTALLMENT))
        .ok_or_else(|| AppError::ValidationError("Invalid Date".to_string()))?;

    if day_first_installment > limit {
        return Err(AppError::ValidationError("Invalid Date".to_string()));
    }
    Ok(())
}

/// Lista vazia conta como "não encontrado": o store não distingue
/// "cliente sem créditos" de "cliente inexistente".
fn credits_or_not_found(customer_id: i64, credits: Vec<Credit>) -> Result<Vec<Credit>, AppError> {
    if credits.is_empty() {
        return Err(AppError::NotFound(format!("Id {} not found", customer_id)));
    }
    Ok(credits)
}

#[derive(Clone)]
pub struct CreditService {
    store: Arc<dyn CreditStore>,
    customer_service: CustomerService,
}

impl CreditService {
    pub fn new(store: Arc<dyn CreditStore>, customer_service: CustomerService) -> Self {
        Self {
            store,
            customer_service,
        }
    }

    /// Valida e grava um novo crédito em IN_PROGRESS.
    /// Nada é escrito se a data estoura a janela ou se o cliente não existe.
    #[instrument(skip(self, request), fields(customer_id = request.customer_id))]
    pub async fn save(&self, request: CreditRequest) -> Result<CreatedCredit, AppError> {
        // 1. Regra de data, independente do cliente
        if let Err(e) = validate_day_first_installment(request.day_first_installment, local_today()) {
            tracing::warn!(day = %request.day_first_installment, "Primeira parcela fora da janela");
            return Err(e);
        }

        // 2. Resolve o dono pelo diretório (NotFound propaga)
        let customer = self.customer_service.find_by_id(request.customer_id).await?;

        // 3. Monta e grava
        let credit = self.store.save(NewCredit::new(&request)).await?;

        tracing::info!(credit_code = %credit.credit_code, "Crédito criado");
        Ok(CreatedCredit { credit, customer })
    }

    #[instrument(skip(self))]
    pub async fn find_all_by_customer(&self, customer_id: i64) -> Result<Vec<Credit>, AppError> {
        let credits = self.store.find_all_by_customer_id(customer_id).await?;
        credits_or_not_found(customer_id, credits)
    }

    /// Só devolve o crédito ao cliente dono dele.
    #[instrument(skip(self))]
    pub async fn find_by_credit_code(
        &self,
        customer_id: i64,
        credit_code: Uuid,
    ) -> Result<Credit, AppError> {
        let credit = self
            .store
            .find_by_credit_code(credit_code)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Creditcode {} not found", credit_code)))?;

        if credit.customer_id != customer_id {
            tracing::warn!(
                owner_id = credit.customer_id,
                "Tentativa de acesso a crédito de outro cliente"
            );
            return Err(AppError::AuthorizationMismatch);
        }

        Ok(credit)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Days;
    use rust_decimal::Decimal;

    use super::*;
    use crate::{
        db::{CustomerStore, InMemoryStore},
        models::{
            credit::Status,
            customer::{Address, Customer, NewCustomer},
        },
    };

    struct Fixture {
        store: Arc<InMemoryStore>,
        service: CreditService,
    }

    fn build_fixture() -> Fixture {
        let store = Arc::new(InMemoryStore::new());
        let customer_service = CustomerService::new(store.clone());
        let service = CreditService::new(store.clone(), customer_service);
        Fixture { store, service }
    }

    async fn build_customer(store: &InMemoryStore, cpf: &str, email: &str) -> Customer {
        CustomerStore::save(
            store,
            NewCustomer {
                first_name: "Gabriel".to_string(),
                last_name: "Galera".to_string(),
                cpf: cpf.to_string(),
                email: email.to_string(),
                password_hash: "hash".to_string(),
                income: Decimal::new(100000, 2),
                address: Address {
                    zip_code: "88888333".to_string(),
                    street: "Rua dos Galeras".to_string(),
                },
            },
        )
        .await
        .expect("save customer")
    }

    fn build_request(customer_id: i64, day_first_installment: NaiveDate) -> CreditRequest {
        CreditRequest {
            credit_value: Decimal::new(100000000, 2),
            day_first_installment,
            number_of_installments: 3,
            customer_id,
        }
    }

    fn today() -> NaiveDate {
        local_today()
    }

    // --- Regra de data ---

    #[test]
    fn date_window_is_inclusive_at_three_months() {
        let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

        assert!(validate_day_first_installment(NaiveDate::from_ymd_opt(2024, 4, 15).unwrap(), today).is_ok());
        assert!(validate_day_first_installment(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), today).is_ok());

        let err = validate_day_first_installment(NaiveDate::from_ymd_opt(2024, 4, 16).unwrap(), today)
            .unwrap_err();
        assert!(matches!(err, AppError::ValidationError(ref msg) if msg == "Invalid Date"));
    }

    #[test]
    fn date_window_clamps_to_end_of_month() {
        // 30/11/2023 + 3 meses = 29/02/2024 (último dia do mês)
        let today = NaiveDate::from_ymd_opt(2023, 11, 30).unwrap();

        assert!(validate_day_first_installment(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(), today).is_ok());
        assert!(validate_day_first_installment(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), today).is_err());
    }

    // --- save ---

    #[tokio::test]
    async fn save_creates_in_progress_credit_bound_to_customer() {
        let fx = build_fixture();
        let customer = build_customer(&fx.store, "44444444433", "gabgalera@hotmail.com").await;

        let created = fx
            .service
            .save(build_request(customer.id, today().checked_add_months(Months::new(1)).unwrap()))
            .await
            .expect("save credit");

        assert_eq!(created.credit.status, Status::InProgress);
        assert!(!created.credit.credit_code.is_nil());
        assert_eq!(created.credit.customer_id, customer.id);
        assert_eq!(created.customer, customer);
        assert_eq!(fx.store.credit_count().await, 1);
    }

    #[tokio::test]
    async fn save_generates_distinct_codes() {
        let fx = build_fixture();
        let customer = build_customer(&fx.store, "44444444433", "a@mail.com").await;
        let day = today() + Days::new(10);

        let first = fx.service.save(build_request(customer.id, day)).await.unwrap();
        let second = fx.service.save(build_request(customer.id, day)).await.unwrap();

        assert_ne!(first.credit.credit_code, second.credit.credit_code);
        assert_ne!(first.credit.id, second.credit.id);
    }

    #[tokio::test]
    async fn save_rejects_date_beyond_window_without_writing() {
        let fx = build_fixture();
        let customer = build_customer(&fx.store, "44444444433", "a@mail.com").await;

        let err = fx
            .service
            .save(build_request(customer.id, today().checked_add_months(Months::new(36)).unwrap()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(ref msg) if msg == "Invalid Date"));
        assert_eq!(fx.store.credit_count().await, 0);
    }

    #[tokio::test]
    async fn save_rejects_date_beyond_window_even_for_unknown_customer() {
        let fx = build_fixture();

        let err = fx
            .service
            .save(build_request(999, today().checked_add_months(Months::new(36)).unwrap()))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::ValidationError(ref msg) if msg == "Invalid Date"));
        assert_eq!(fx.store.credit_count().await, 0);
    }

    #[tokio::test]
    async fn save_fails_with_not_found_for_unknown_customer() {
        let fx = build_fixture();

        let err = fx
            .service
            .save(build_request(77, today() + Days::new(5)))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(ref msg) if msg == "Id 77 not found"));
        assert_eq!(fx.store.credit_count().await, 0);
    }

    // --- find_all_by_customer ---

    #[tokio::test]
    async fn find_all_returns_store_sequence_unmodified() {
        let fx = build_fixture();
        let customer = build_customer(&fx.store, "44444444433", "a@mail.com").await;
        let day = today() + Days::new(30);
        let first = fx.service.save(build_request(customer.id, day)).await.unwrap();
        let second = fx.service.save(build_request(customer.id, day)).await.unwrap();

        let credits = fx.service.find_all_by_customer(customer.id).await.unwrap();

        assert_eq!(credits, vec![first.credit, second.credit]);
    }

    #[tokio::test]
    async fn find_all_with_no_credits_is_not_found() {
        let fx = build_fixture();
        let customer = build_customer(&fx.store, "44444444433", "a@mail.com").await;

        let err = fx.service.find_all_by_customer(customer.id).await.unwrap_err();

        let expected = format!("Id {} not found", customer.id);
        assert!(matches!(err, AppError::NotFound(ref msg) if *msg == expected));
    }

    // --- find_by_credit_code ---

    #[tokio::test]
    async fn find_by_code_fails_when_code_is_unknown() {
        let fx = build_fixture();
        let code = Uuid::new_v4();

        let err = fx.service.find_by_credit_code(1, code).await.unwrap_err();

        let expected = format!("Creditcode {} not found", code);
        assert!(matches!(err, AppError::NotFound(ref msg) if *msg == expected));
    }

    #[tokio::test]
    async fn find_by_code_rejects_other_customers() {
        let fx = build_fixture();
        let owner = build_customer(&fx.store, "44444444433", "a@mail.com").await;
        let intruder = build_customer(&fx.store, "37192385476", "b@mail.com").await;
        let created = fx
            .service
            .save(build_request(owner.id, today() + Days::new(15)))
            .await
            .unwrap();

        let err = fx
            .service
            .find_by_credit_code(intruder.id, created.credit.credit_code)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::AuthorizationMismatch));
        assert_eq!(err.to_string(), "Contact admin");
    }

    #[tokio::test]
    async fn find_by_code_returns_credit_to_its_owner() {
        let fx = build_fixture();
        let owner = build_customer(&fx.store, "44444444433", "a@mail.com").await;
        let created = fx
            .service
            .save(build_request(owner.id, today() + Days::new(15)))
            .await
            .unwrap();

        let found = fx
            .service
            .find_by_credit_code(owner.id, created.credit.credit_code)
            .await
            .unwrap();

        assert_eq!(found, created.credit);
    }
}
