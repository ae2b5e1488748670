//! # Braintree GraphQL client
//!
//! [`BraintreeClient`] talks to the Braintree GraphQL API. It is built from a
//! [`GatewayConfig`] and owns its credentials, so nothing is configured
//! globally.

use anyhow::Context;
use async_trait::async_trait;
use base64::{Engine, prelude::BASE64_STANDARD};
use log::{debug, error, info, warn};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use super::{PaymentGateway, PaymentMethodOutcome, errors::GatewayError, schemas};
use crate::{
    config::{Credentials, Environment, GatewayConfig},
    consts,
    models::{card::CardDetails, client_token::ClientToken},
};

/// Braintree API client for vaulting cards and issuing client tokens
pub struct BraintreeClient {
    /// HTTP client for making API requests
    client: reqwest::Client,
    /// GraphQL endpoint of the configured environment
    endpoint: String,
    environment: Environment,
    /// Value of the `Authorization` header for merchant calls
    authorization: String,
    api_version: String,
    merchant_id: Option<String>,
    merchant_account_id: Option<String>,
}

impl BraintreeClient {
    /// Creates a new client from the gateway configuration
    pub fn from_config(config: &GatewayConfig) -> anyhow::Result<Self> {
        let credentials = config.credentials()?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .context("failed to build braintree http client")?;

        Ok(Self {
            client,
            endpoint: config.endpoint().to_string(),
            environment: config.environment,
            authorization: authorization_header(&credentials),
            api_version: config.api_version.clone(),
            merchant_id: config.merchant_id.clone(),
            merchant_account_id: config.merchant_account_id.clone(),
        })
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Internal method to post any GraphQL document to Braintree
    async fn execute<I, D>(
        &self,
        authorization: &str,
        request: &schemas::GraphQlRequest<I>,
    ) -> Result<schemas::GraphQlResponse<D>, GatewayError>
    where
        I: Serialize + Sync,
        D: DeserializeOwned + Send,
    {
        let response = self
            .client
            .post(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, authorization)
            .header(consts::BRAINTREE_VERSION_HEADER, &self.api_version)
            .header(reqwest::header::ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response body".to_string());

            error!("braintree returned error status {status}");
            debug!("braintree error body: {body}");
            return Err(GatewayError::from_status(status.as_u16(), &body));
        }

        response
            .json::<schemas::GraphQlResponse<D>>()
            .await
            .map_err(|err| GatewayError::Unexpected(format!("failed to parse braintree response: {err}")))
    }
}

/// Header value for the configured credentials
fn authorization_header(credentials: &Credentials) -> String {
    match credentials {
        Credentials::Keys {
            public_key,
            private_key,
        } => format!(
            "Basic {}",
            BASE64_STANDARD.encode(format!("{public_key}:{private_key}"))
        ),
        Credentials::AccessToken(token) => format!("Bearer {token}"),
    }
}

/// Returns the validation messages, or the first error that is a real fault
fn validation_messages(errors: &[schemas::GraphQlError]) -> Result<Vec<String>, GatewayError> {
    let mut messages = Vec::with_capacity(errors.len());
    for err in errors {
        let error_class = err.error_class().unwrap_or_default();
        if let Some(fault) = GatewayError::from_error_class(error_class, &err.message) {
            return Err(fault);
        }
        messages.push(err.message.clone());
    }

    Ok(messages)
}

#[async_trait]
impl PaymentGateway for BraintreeClient {
    async fn create_payment_method(
        &self,
        card: &CardDetails,
    ) -> Result<PaymentMethodOutcome, GatewayError> {
        let tokenize = schemas::GraphQlRequest::new(
            schemas::TOKENIZE_CREDIT_CARD_MUTATION,
            schemas::TokenizeCreditCardInput {
                client_mutation_id: Uuid::new_v4().to_string(),
                credit_card: card.into(),
            },
        );
        let response: schemas::GraphQlResponse<schemas::TokenizeCreditCardData> =
            self.execute(&self.authorization, &tokenize).await?;

        let reasons = validation_messages(&response.errors)?;
        if !reasons.is_empty() {
            warn!(
                "card {} rejected on tokenization: {}",
                card.masked_number(),
                reasons.join(" ")
            );
            return Ok(PaymentMethodOutcome::Rejected { reasons });
        }

        let single_use_id = response
            .data
            .and_then(|data| data.tokenize_credit_card)
            .and_then(|payload| payload.payment_method)
            .map(|payment_method| payment_method.id)
            .ok_or_else(|| {
                GatewayError::Unexpected("tokenizeCreditCard returned no payment method".into())
            })?;

        let vault = schemas::GraphQlRequest::new(
            schemas::VAULT_PAYMENT_METHOD_MUTATION,
            schemas::VaultPaymentMethodInput {
                client_mutation_id: Uuid::new_v4().to_string(),
                payment_method_id: single_use_id,
                verification: schemas::VerificationOptionsInput {
                    merchant_account_id: self.merchant_account_id.clone(),
                },
            },
        );
        let response: schemas::GraphQlResponse<schemas::VaultPaymentMethodData> =
            self.execute(&self.authorization, &vault).await?;

        let reasons = validation_messages(&response.errors)?;
        if !reasons.is_empty() {
            warn!(
                "card {} rejected on vaulting: {}",
                card.masked_number(),
                reasons.join(" ")
            );
            return Ok(PaymentMethodOutcome::Rejected { reasons });
        }

        let payload = response
            .data
            .and_then(|data| data.vault_payment_method)
            .ok_or_else(|| GatewayError::Unexpected("vaultPaymentMethod returned no data".into()))?;

        let verification_status = payload
            .verification
            .as_ref()
            .and_then(|verification| verification.status.clone());

        if payload
            .verification
            .as_ref()
            .is_some_and(|verification| verification.is_failed())
        {
            let status = verification_status.unwrap_or_default();
            warn!(
                "card {} failed verification with status {status}",
                card.masked_number()
            );
            return Ok(PaymentMethodOutcome::Rejected {
                reasons: vec![format!("verification status {status}")],
            });
        }

        let payment_method_id = payload
            .payment_method
            .map(|payment_method| payment_method.id)
            .ok_or_else(|| {
                GatewayError::Unexpected("vaultPaymentMethod returned no payment method".into())
            })?;

        info!(
            "card {} vaulted as payment method {payment_method_id}",
            card.masked_number()
        );

        Ok(PaymentMethodOutcome::Created {
            payment_method_id,
            verification_status,
        })
    }

    async fn generate_client_token(&self) -> Result<ClientToken, GatewayError> {
        let request = schemas::GraphQlRequest::new(
            schemas::CLIENT_TOKEN_MUTATION,
            schemas::CreateClientTokenInput {
                client_mutation_id: Uuid::new_v4().to_string(),
                client_token: schemas::ClientTokenOptionsInput {
                    merchant_account_id: self.merchant_account_id.clone(),
                },
            },
        );
        let response: schemas::GraphQlResponse<schemas::CreateClientTokenData> =
            self.execute(&self.authorization, &request).await?;

        let reasons = validation_messages(&response.errors)?;
        if !reasons.is_empty() {
            return Err(GatewayError::Unexpected(format!(
                "client token request rejected: {}",
                reasons.join(" ")
            )));
        }

        let token = response
            .data
            .and_then(|data| data.create_client_token)
            .and_then(|payload| payload.client_token)
            .map(ClientToken::new)
            .ok_or_else(|| {
                GatewayError::Unexpected("createClientToken returned no client token".into())
            })?;

        info!("client token generated for {} environment", self.environment);
        Ok(token)
    }

    async fn verify_client_token(&self, token: &ClientToken) -> Result<(), GatewayError> {
        let payload = token
            .decode()
            .map_err(|err| GatewayError::Unexpected(err.to_string()))?;

        if payload.authorization_fingerprint.trim().is_empty() {
            return Err(GatewayError::Unexpected(
                "client token carries no authorization fingerprint".into(),
            ));
        }

        if let Some(issued_for) = payload.environment.as_deref() {
            if issued_for.parse::<Environment>().ok() != Some(self.environment) {
                return Err(GatewayError::Unexpected(format!(
                    "client token was issued for {issued_for}, client is configured for {}",
                    self.environment
                )));
            }
        }

        if let (Some(expected), Some(issued_for)) = (&self.merchant_id, &payload.merchant_id) {
            if expected != issued_for {
                return Err(GatewayError::Unexpected(format!(
                    "client token was issued for merchant {issued_for}, expected {expected}"
                )));
            }
        }

        let ping = schemas::GraphQlRequest::without_variables(schemas::PING_QUERY);
        let response: schemas::GraphQlResponse<schemas::PingData> = self
            .execute(
                &format!("Bearer {}", payload.authorization_fingerprint),
                &ping,
            )
            .await?;

        let reasons = validation_messages(&response.errors)?;
        if !reasons.is_empty() {
            return Err(GatewayError::Unexpected(format!(
                "client token rejected: {}",
                reasons.join(" ")
            )));
        }

        match response.data.and_then(|data| data.ping) {
            Some(answer) if answer == "pong" => {
                info!("client token verified");
                Ok(())
            }
            answer => Err(GatewayError::Unexpected(format!(
                "unexpected ping answer from braintree: {answer:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::errors::ErrorKind;

    fn graphql_error(message: &str, error_class: Option<&str>) -> schemas::GraphQlError {
        schemas::GraphQlError {
            message: message.into(),
            extensions: Some(schemas::GraphQlErrorExtensions {
                error_class: error_class.map(String::from),
                legacy_code: None,
            }),
        }
    }

    #[test]
    fn test_basic_authorization_header() {
        let header = authorization_header(&Credentials::Keys {
            public_key: "public".into(),
            private_key: "private".into(),
        });

        assert_eq!(header, "Basic cHVibGljOnByaXZhdGU=");
    }

    #[test]
    fn test_bearer_authorization_header() {
        let header = authorization_header(&Credentials::AccessToken("YOUR_API_KEY".into()));

        assert_eq!(header, "Bearer YOUR_API_KEY");
    }

    #[test]
    fn test_validation_messages_collects_validation_errors() {
        let errors = vec![
            graphql_error("Credit card number is invalid.", Some("VALIDATION")),
            graphql_error("CVV is required.", Some("VALIDATION")),
        ];

        assert_eq!(
            validation_messages(&errors).unwrap(),
            vec!["Credit card number is invalid.", "CVV is required."]
        );
    }

    #[test]
    fn test_validation_messages_stops_on_fault() {
        let errors = vec![
            graphql_error("Credit card number is invalid.", Some("VALIDATION")),
            graphql_error("Authentication failed.", Some("AUTHENTICATION")),
        ];

        let err = validation_messages(&errors).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert_eq!(err.message(), "Authentication failed.");
    }

    #[test]
    fn test_validation_messages_unclassified_is_unexpected() {
        let errors = vec![graphql_error("weird", None)];

        assert_eq!(
            validation_messages(&errors).unwrap_err().kind(),
            ErrorKind::Unexpected
        );
    }

    #[test]
    fn test_from_config_picks_environment_endpoint() {
        let config = GatewayConfig::with_access_token(Environment::Production, "token");
        let client = BraintreeClient::from_config(&config).unwrap();

        assert_eq!(client.endpoint(), consts::PRODUCTION_GRAPHQL_URL);
        assert_eq!(client.environment(), Environment::Production);
        assert_eq!(client.authorization, "Bearer token");
    }

    #[test]
    fn test_from_config_honours_endpoint_override() {
        let mut config = GatewayConfig::with_access_token(Environment::Sandbox, "token");
        config.graphql_url = Some("http://127.0.0.1:8080/graphql".into());

        let client = BraintreeClient::from_config(&config).unwrap();

        assert_eq!(client.endpoint(), "http://127.0.0.1:8080/graphql");
        assert_eq!(client.environment(), Environment::Sandbox);
    }

    #[test]
    fn test_from_config_requires_credentials() {
        let mut config = GatewayConfig::with_access_token(Environment::Sandbox, "token");
        config.access_token = None;

        assert!(BraintreeClient::from_config(&config).is_err());
    }
}
