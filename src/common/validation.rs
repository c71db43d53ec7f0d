// src/common/validation.rs

// Validadores customizados usados nos payloads via #[validate(custom(...))].

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use validator::ValidationError;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

/// Remove pontuação ("371.923.854-76" -> "37192385476").
pub fn normalize_cpf(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CPF válido: 11 dígitos, não todos iguais, com os dois dígitos verificadores corretos.
pub fn validate_cpf(raw: &str) -> Result<(), ValidationError> {
    let invalid = || error("cpf", "Invalid CPF");

    if raw.chars().any(|c| !(c.is_ascii_digit() || c == '.' || c == '-')) {
        return Err(invalid());
    }

    let digits: Vec<u32> = normalize_cpf(raw)
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect();

    if digits.len() != 11 || digits.iter().all(|d| *d == digits[0]) {
        return Err(invalid());
    }

    let check_digit = |len: usize| -> u32 {
        let sum: u32 = digits[..len]
            .iter()
            .enumerate()
            .map(|(i, d)| d * (len as u32 + 1 - i as u32))
            .sum();
        match sum % 11 {
            0 | 1 => 0,
            r => 11 - r,
        }
    };

    if check_digit(9) != digits[9] || check_digit(10) != digits[10] {
        return Err(invalid());
    }

    Ok(())
}

/// Data de hoje no fuso do servidor.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

// Valores monetários são NUMERIC(19,2): no máximo 2 casas e 17 dígitos inteiros.
const MONEY_SCALE: u32 = 2;

fn money_limit() -> Decimal {
    Decimal::from(100_000_000_000_000_000_i64) // 10^17
}

fn validate_money(value: &Decimal) -> Result<(), ValidationError> {
    if value.normalize().scale() > MONEY_SCALE {
        return Err(error("scale", "must have at most 2 decimal places"));
    }
    if value.abs() >= money_limit() {
        return Err(error("range", "must be less than 10^17"));
    }
    Ok(())
}

pub fn validate_positive_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(error("positive", "must be greater than zero"));
    }
    validate_money(value)
}

pub fn validate_non_negative_decimal(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(error("non_negative", "must not be negative"));
    }
    validate_money(value)
}

/// A data da primeira parcela precisa estar no futuro (estritamente depois de hoje).
pub fn validate_future_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value > local_today() {
        Ok(())
    } else {
        Err(error("future", "must be a future date"))
    }
}
