// src/handlers/customer.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        validation::{normalize_cpf, validate_cpf, validate_non_negative_decimal},
    },
    config::AppState,
    models::customer::{Address, CustomerUpdate, CustomerView},
    services::customer_service::CustomerRegistration,
};

// =============================================================================
//  PAYLOADS
// =============================================================================

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerPayload {
    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "Gabriel")]
    pub first_name: String,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "Galera")]
    pub last_name: String,

    #[validate(custom(function = "validate_cpf"))]
    #[schema(example = "371.923.854-76")]
    pub cpf: String,

    #[validate(custom(function = "validate_non_negative_decimal"))]
    #[schema(value_type = f64, example = 1000.0)]
    pub income: Decimal,

    #[validate(email(message = "Invalid email"))]
    #[schema(example = "gabgalera@hotmail.com")]
    pub email: String,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "minhaSenha")]
    pub password: String,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "88888333")]
    pub zip_code: String,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "Rua dos Galeras")]
    pub street: String,
}

impl From<CreateCustomerPayload> for CustomerRegistration {
    fn from(payload: CreateCustomerPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            // Guardamos só os dígitos para a unicidade valer com ou sem pontuação
            cpf: normalize_cpf(&payload.cpf),
            email: payload.email,
            password: payload.password,
            income: payload.income,
            address: Address {
                zip_code: payload.zip_code,
                street: payload.street,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "Gabriel")]
    pub first_name: String,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "Galera")]
    pub last_name: String,

    #[validate(custom(function = "validate_non_negative_decimal"))]
    #[schema(value_type = f64, example = 5000.0)]
    pub income: Decimal,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "88888333")]
    pub zip_code: String,

    #[validate(length(min = 1, message = "Invalid input"))]
    #[schema(example = "Rua dos Galeras")]
    pub street: String,
}

impl From<UpdateCustomerPayload> for CustomerUpdate {
    fn from(payload: UpdateCustomerPayload) -> Self {
        Self {
            first_name: payload.first_name,
            last_name: payload.last_name,
            income: payload.income,
            address: Address {
                zip_code: payload.zip_code,
                street: payload.street,
            },
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct CustomerIdQuery {
    /// Id do cliente dono do recurso
    pub customer_id: i64,
}

// =============================================================================
//  HANDLERS
// =============================================================================

// POST /api/customers
#[utoipa::path(
    post,
    path = "/api/customers",
    tag = "Customers",
    request_body = CreateCustomerPayload,
    responses(
        (status = 201, description = "Cliente cadastrado", body = CustomerView),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "CPF ou e-mail já cadastrado")
    )
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state.customer_service.save(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(CustomerView::from(customer))))
}

// GET /api/customers/{id}
#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "Id do cliente")),
    responses(
        (status = 200, description = "Cliente encontrado", body = CustomerView),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn find_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state.customer_service.find_by_id(id).await?;

    Ok((StatusCode::OK, Json(CustomerView::from(customer))))
}

// PATCH /api/customers?customerId=
#[utoipa::path(
    patch,
    path = "/api/customers",
    tag = "Customers",
    params(CustomerIdQuery),
    request_body = UpdateCustomerPayload,
    responses(
        (status = 200, description = "Cliente atualizado", body = CustomerView),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Query(query): Query<CustomerIdQuery>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .customer_service
        .update(query.customer_id, payload.into())
        .await?;

    Ok((StatusCode::OK, Json(CustomerView::from(customer))))
}

// DELETE /api/customers/{id}
#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = "Customers",
    params(("id" = i64, Path, description = "Id do cliente")),
    responses(
        (status = 204, description = "Cliente e créditos removidos"),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn delete_customer(
    State(app_state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    app_state.customer_service.delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
