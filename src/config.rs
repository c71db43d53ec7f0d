// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{CreditRepository, CreditStore, CustomerRepository, CustomerStore, InMemoryStore},
    services::{credit_service::CreditService, customer_service::CustomerService},
};

// Configurações lidas do ambiente (.env é opcional)
#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: Option<String>,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());

        let max_connections = match env::var("DATABASE_MAX_CONNECTIONS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS inválido: {raw}"))?,
            Err(_) => 5,
        };

        let acquire_timeout_secs: u64 = match env::var("DATABASE_ACQUIRE_TIMEOUT_SECS") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("DATABASE_ACQUIRE_TIMEOUT_SECS inválido: {raw}"))?,
            Err(_) => 3,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());

        Ok(Self {
            database_url,
            max_connections,
            acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            bind_addr,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub customer_service: CustomerService,
    pub credit_service: CreditService,
}

impl AppState {
    // A assinatura retorna um Result: se o banco falhar, a aplicação não sobe.
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        let Some(database_url) = settings.database_url.as_deref() else {
            tracing::warn!("DATABASE_URL não definida: usando store em memória (dados não persistem)");
            return Ok(Self::in_memory());
        };

        let db_pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(settings.acquire_timeout)
            .connect(database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados")?;

        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

        Ok(Self::from_stores(
            Arc::new(CustomerRepository::new(db_pool.clone())),
            Arc::new(CreditRepository::new(db_pool)),
        ))
    }

    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self::from_stores(store.clone(), store)
    }

    // --- Monta o gráfico de dependências ---
    pub fn from_stores(
        customer_store: Arc<dyn CustomerStore>,
        credit_store: Arc<dyn CreditStore>,
    ) -> Self {
        let customer_service = CustomerService::new(customer_store);
        let credit_service = CreditService::new(credit_store, customer_service.clone());

        Self {
            customer_service,
            credit_service,
        }
    }
}
