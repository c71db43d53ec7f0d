// src/models/credit.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::customer::Customer;

// --- Enums (Mapeando o Postgres) ---

// Só IN_PROGRESS é atribuído pelo sistema; APPROVED/REJECTED são terminais.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "credit_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    InProgress,
    Approved,
    Rejected,
}

// --- Structs ---

#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Credit {
    pub id: i64,
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: Status,
    pub customer_id: i64,
}

/// Crédito pronto para ser gravado: código e status já definidos, id ainda não.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCredit {
    pub credit_code: Uuid,
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub status: Status,
    pub customer_id: i64,
}

impl NewCredit {
    /// Gera um credit_code novo e começa sempre em IN_PROGRESS.
    pub fn new(request: &CreditRequest) -> Self {
        Self {
            credit_code: Uuid::new_v4(),
            credit_value: request.credit_value,
            day_first_installment: request.day_first_installment,
            number_of_installments: request.number_of_installments,
            status: Status::InProgress,
            customer_id: request.customer_id,
        }
    }

    pub fn into_credit(self, id: i64) -> Credit {
        Credit {
            id,
            credit_code: self.credit_code,
            credit_value: self.credit_value,
            day_first_installment: self.day_first_installment,
            number_of_installments: self.number_of_installments,
            status: self.status,
            customer_id: self.customer_id,
        }
    }
}

/// Pedido de crédito como chega ao serviço: termos + id do cliente dono.
#[derive(Debug, Clone, PartialEq)]
pub struct CreditRequest {
    pub credit_value: Decimal,
    pub day_first_installment: NaiveDate,
    pub number_of_installments: i32,
    pub customer_id: i64,
}

/// Resultado do save: o crédito gravado e o cliente resolvido pelo diretório.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedCredit {
    pub credit: Credit,
    pub customer: Customer,
}

// --- Respostas da API ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditCreatedView {
    #[schema(example = "6a86dcf5-38cd-45bf-bea6-864e6204df4c")]
    pub credit_code: Uuid,
    #[schema(value_type = f64, example = 1000000.0)]
    pub credit_value: Decimal,
    #[schema(example = 3)]
    pub number_of_installments: i32,
    pub status: Status,
    #[schema(example = "gabgalera@hotmail.com")]
    pub email_customer: String,
    #[schema(value_type = f64, example = 1000000.0)]
    pub credit_value_total: Decimal,
}

impl From<CreatedCredit> for CreditCreatedView {
    fn from(created: CreatedCredit) -> Self {
        let CreatedCredit { credit, customer } = created;
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            email_customer: customer.email,
            // Eco do valor pedido: não há cálculo de juros aqui.
            credit_value_total: credit.credit_value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditSummaryView {
    #[schema(example = "6a86dcf5-38cd-45bf-bea6-864e6204df4c")]
    pub credit_code: Uuid,
    #[schema(value_type = f64, example = 1000000.0)]
    pub credit_value: Decimal,
    #[schema(example = 3)]
    pub number_of_installments: i32,
}

impl From<&Credit> for CreditSummaryView {
    fn from(credit: &Credit) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreditView {
    #[schema(example = "6a86dcf5-38cd-45bf-bea6-864e6204df4c")]
    pub credit_code: Uuid,
    #[schema(value_type = f64, example = 1000000.0)]
    pub credit_value: Decimal,
    #[schema(example = 3)]
    pub number_of_installments: i32,
    pub status: Status,
    #[schema(example = "gabgalera@hotmail.com")]
    pub email_customer: String,
    #[schema(value_type = f64, example = 1000.0)]
    pub income_customer: Decimal,
}

impl CreditView {
    pub fn new(credit: Credit, owner: &Customer) -> Self {
        Self {
            credit_code: credit.credit_code,
            credit_value: credit.credit_value,
            number_of_installments: credit.number_of_installments,
            status: credit.status,
            email_customer: owner.email.clone(),
            income_customer: owner.income,
        }
    }
}
