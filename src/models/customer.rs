// src/models/customer.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// ---
// 1. Address (Endereço)
// ---
// Valor puro, embutido no cliente. Não tem identidade nem ciclo de vida próprio.
// No banco vira as colunas zip_code/street da tabela customers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    #[schema(example = "88888333")]
    pub zip_code: String,

    #[schema(example = "Rua dos Galeras")]
    pub street: String,
}

// ---
// 2. Customer (O Cliente)
// ---
// Os créditos NÃO ficam aqui dentro: cada Credit guarda o customer_id
// e a travessia é feita pelos repositórios.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,

    #[serde(skip_serializing)] // Nunca sai na API
    pub password_hash: String,

    pub income: Decimal,

    #[sqlx(flatten)]
    pub address: Address,
}

/// Cliente ainda não persistido; o id é atribuído pelo store no primeiro save.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
    pub cpf: String,
    pub email: String,
    pub password_hash: String,
    pub income: Decimal,
    pub address: Address,
}

impl NewCustomer {
    /// Materializa o registro com o id atribuído pelo store.
    pub fn into_customer(self, id: i64) -> Customer {
        Customer {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            cpf: self.cpf,
            email: self.email,
            password_hash: self.password_hash,
            income: self.income,
            address: self.address,
        }
    }
}

/// Campos alteráveis de um cliente já cadastrado.
/// cpf, e-mail e senha ficam de fora.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub first_name: String,
    pub last_name: String,
    pub income: Decimal,
    pub address: Address,
}

impl CustomerUpdate {
    pub fn apply_to(self, customer: &mut Customer) {
        customer.first_name = self.first_name;
        customer.last_name = self.last_name;
        customer.income = self.income;
        customer.address = self.address;
    }
}

// --- Resposta da API ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerView {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Gabriel")]
    pub first_name: String,
    #[schema(example = "Galera")]
    pub last_name: String,
    #[schema(example = "37192385476")]
    pub cpf: String,
    #[schema(value_type = f64, example = 1000.0)]
    pub income: Decimal,
    #[schema(example = "gabgalera@hotmail.com")]
    pub email: String,
    #[schema(example = "88888333")]
    pub zip_code: String,
    #[schema(example = "Rua dos Galeras")]
    pub street: String,
}

impl From<Customer> for CustomerView {
    fn from(customer: Customer) -> Self {
        Self {
            id: customer.id,
            first_name: customer.first_name,
            last_name: customer.last_name,
            cpf: customer.cpf,
            income: customer.income,
            email: customer.email,
            zip_code: customer.address.zip_code,
            street: customer.address.street,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_new_customer() -> NewCustomer {
        NewCustomer {
            first_name: "Gabriel".to_string(),
            last_name: "Galera".to_string(),
            cpf: "44444444433".to_string(),
            email: "gabgalera@hotmail.com".to_string(),
            password_hash: "hash".to_string(),
            income: Decimal::new(100000, 2),
            address: Address {
                zip_code: "88888333".to_string(),
                street: "Rua dos Galeras".to_string(),
            },
        }
    }

    #[test]
    fn view_flattens_address_and_hides_password() {
        let customer = build_new_customer().into_customer(7);

        let json = serde_json::to_value(CustomerView::from(customer.clone())).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["zipCode"], "88888333");
        assert_eq!(json["street"], "Rua dos Galeras");
        assert!(json.get("passwordHash").is_none());

        let raw = serde_json::to_value(&customer).unwrap();
        assert!(raw.get("passwordHash").is_none());
    }

    #[test]
    fn update_keeps_identity_fields() {
        let mut customer = build_new_customer().into_customer(1);
        CustomerUpdate {
            first_name: "Ana".to_string(),
            last_name: "Souza".to_string(),
            income: Decimal::new(500000, 2),
            address: Address {
                zip_code: "11111000".to_string(),
                street: "Av. Brasil".to_string(),
            },
        }
        .apply_to(&mut customer);

        assert_eq!(customer.first_name, "Ana");
        assert_eq!(customer.address.street, "Av. Brasil");
        assert_eq!(customer.cpf, "44444444433");
        assert_eq!(customer.email, "gabgalera@hotmail.com");
        assert_eq!(customer.id, 1);
    }
}
