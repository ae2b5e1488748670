use anyhow::bail;
use bt_payments::{
    api,
    config::{Environment, GatewayConfig},
    gateway::{self, client::BraintreeClient},
    models::card::CardDetails,
};
use clap::{Args, Parser, Subcommand};

#[derive(Args, Debug, Clone)]
pub struct LoadCardArgs {
    /// Braintree API key, sent as a bearer token
    #[arg(long, env = "BRAINTREE_API_KEY", hide_env_values = true)]
    api_key: String,
    #[arg(long, default_value = "4111111111111111")]
    card_number: String,
    /// Expiration date as MM/YY
    #[arg(long, default_value = "12/23")]
    expiration_date: String,
    #[arg(long, default_value = "123")]
    cvv: String,
    /// Overrides BRAINTREE_ENVIRONMENT
    #[arg(long)]
    environment: Option<Environment>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Action {
    /// Check a credit card and load it as a payment method
    LoadCard(LoadCardArgs),
    /// Generate and verify a client token, credentials come from BRAINTREE_* variables
    ClientToken,
}

/// Braintree card loading and client token tools
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct AppArgs {
    /// Log gateway calls to stderr, repeat for more detail
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub action: Action,
}

impl AppArgs {
    pub async fn run(&self) -> anyhow::Result<()> {
        match &self.action {
            Action::LoadCard(LoadCardArgs {
                api_key,
                card_number,
                expiration_date,
                cvv,
                environment,
            }) => {
                let mut config = GatewayConfig::from_env()?;
                if let Some(environment) = environment {
                    config.environment = *environment;
                }

                let card = CardDetails::new(card_number, expiration_date, cvv);
                let result =
                    api::card::check_and_load_credit_card_with_api_key(&config, api_key, &card)
                        .await?;

                println!("{}", serde_json::to_string(&result)?);
                Ok(())
            }
            Action::ClientToken => {
                let config = GatewayConfig::from_env()?;
                let gateway: gateway::ImplPaymentGateway =
                    Box::new(BraintreeClient::from_config(&config)?);

                match api::token::generate_and_verify_client_token(&gateway).await {
                    Ok(client_token) => {
                        println!("Braintree tokens generated and verified successfully.");
                        println!("Generated client token: {client_token}");
                        Ok(())
                    }
                    Err(err) => bail!(
                        "Error occurred while generating and verifying Braintree tokens: {err}"
                    ),
                }
            }
        }
    }
}
