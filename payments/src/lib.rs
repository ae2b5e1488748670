//! # Braintree payments
//!
//! Vaults credit cards and issues client tokens through the Braintree GraphQL
//! API. Every operation takes an explicitly built gateway client, there is no
//! process-wide provider configuration.
//!
//! ```no_run
//! use bt_payments::{api, config::GatewayConfig, gateway::{self, client::BraintreeClient}};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let config = GatewayConfig::from_env()?;
//! let gateway: gateway::ImplPaymentGateway = Box::new(BraintreeClient::from_config(&config)?);
//! let client_token = api::token::generate_and_verify_client_token(&gateway).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod consts;
pub mod gateway;
pub mod logger;
pub mod models;
