// src/handlers/credit.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validation::{validate_future_date, validate_positive_decimal},
    },
    config::AppState,
    handlers::customer::CustomerIdQuery,
    models::credit::{CreditCreatedView, CreditRequest, CreditSummaryView, CreditView},
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreditPayload {
    #[validate(custom(function = "validate_positive_decimal"))]
    #[schema(value_type = f64, example = 1000000.0)]
    pub credit_value: Decimal,

    #[validate(custom(function = "validate_future_date"))]
    #[schema(value_type = String, format = Date, example = "2024-05-17")]
    pub day_first_installment: NaiveDate,

    #[validate(range(min = 1, max = 48, message = "must be between 1 and 48"))]
    #[schema(example = 3)]
    pub number_of_installments: i32,

    #[schema(example = 1)]
    pub customer_id: i64,
}

impl From<CreateCreditPayload> for CreditRequest {
    fn from(payload: CreateCreditPayload) -> Self {
        Self {
            credit_value: payload.credit_value,
            day_first_installment: payload.day_first_installment,
            number_of_installments: payload.number_of_installments,
            customer_id: payload.customer_id,
        }
    }
}

// POST /api/credits
#[utoipa::path(
    post,
    path = "/api/credits",
    tag = "Credits",
    request_body = CreateCreditPayload,
    responses(
        (status = 201, description = "Crédito criado em IN_PROGRESS", body = CreditCreatedView),
        (status = 400, description = "Dados inválidos ou data fora da janela (Invalid Date)"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn create_credit(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCreditPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let created = app_state.credit_service.save(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(CreditCreatedView::from(created))))
}

// GET /api/credits?customerId=
#[utoipa::path(
    get,
    path = "/api/credits",
    tag = "Credits",
    params(CustomerIdQuery),
    responses(
        (status = 200, description = "Créditos do cliente", body = Vec<CreditSummaryView>),
        (status = 404, description = "Nenhum crédito para o cliente")
    )
)]
pub async fn list_credits(
    State(app_state): State<AppState>,
    Query(query): Query<CustomerIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let credits = app_state
        .credit_service
        .find_all_by_customer(query.customer_id)
        .await?;

    let summaries: Vec<CreditSummaryView> = credits.iter().map(CreditSummaryView::from).collect();

    Ok((StatusCode::OK, Json(summaries)))
}

// GET /api/credits/{creditCode}?customerId=
#[utoipa::path(
    get,
    path = "/api/credits/{credit_code}",
    tag = "Credits",
    params(
        ("credit_code" = Uuid, Path, description = "Código do crédito"),
        CustomerIdQuery
    ),
    responses(
        (status = 200, description = "Detalhe do crédito", body = CreditView),
        (status = 403, description = "Crédito pertence a outro cliente (Contact admin)"),
        (status = 404, description = "Código não encontrado")
    )
)]
pub async fn find_credit(
    State(app_state): State<AppState>,
    Path(credit_code): Path<Uuid>,
    Query(query): Query<CustomerIdQuery>,
) -> Result<impl IntoResponse, AppError> {
    let credit = app_state
        .credit_service
        .find_by_credit_code(query.customer_id, credit_code)
        .await?;

    // Email e renda vêm do diretório, não de um grafo de objetos
    let owner = app_state.customer_service.find_by_id(credit.customer_id).await?;

    Ok((StatusCode::OK, Json(CreditView::new(credit, &owner))))
}
