// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Customers ---
        handlers::customer::create_customer,
        handlers::customer::find_customer,
        handlers::customer::update_customer,
        handlers::customer::delete_customer,

        // --- Credits ---
        handlers::credit::create_credit,
        handlers::credit::list_credits,
        handlers::credit::find_credit,
    ),
    components(
        schemas(
            // --- Customers ---
            models::customer::Address,
            models::customer::CustomerView,
            handlers::customer::CreateCustomerPayload,
            handlers::customer::UpdateCustomerPayload,

            // --- Credits ---
            models::credit::Status,
            models::credit::CreditCreatedView,
            models::credit::CreditSummaryView,
            models::credit::CreditView,
            handlers::credit::CreateCreditPayload,
        )
    ),
    tags(
        (name = "Customers", description = "Cadastro e consulta de clientes"),
        (name = "Credits", description = "Solicitação e consulta de créditos")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/customers",
            "/api/customers/{id}",
            "/api/credits",
            "/api/credits/{credit_code}",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
