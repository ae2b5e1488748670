//! # Braintree GraphQL schemas
//!
//! Request bodies and response documents for the few GraphQL operations the
//! gateway client issues. Only the fields that are read are modelled.

use serde::{Deserialize, Serialize};

use crate::models::card::CardDetails;

pub const TOKENIZE_CREDIT_CARD_MUTATION: &str = "mutation tokenizeCreditCard($input: TokenizeCreditCardInput!) { tokenizeCreditCard(input: $input) { clientMutationId paymentMethod { id } } }";
pub const VAULT_PAYMENT_METHOD_MUTATION: &str = "mutation vaultPaymentMethod($input: VaultPaymentMethodInput!) { vaultPaymentMethod(input: $input) { clientMutationId paymentMethod { id usage } verification { id status } } }";
pub const CLIENT_TOKEN_MUTATION: &str = "mutation createClientToken($input: CreateClientTokenInput) { createClientToken(input: $input) { clientToken } }";
pub const PING_QUERY: &str = "query { ping }";

/// Verification statuses meaning the card was refused
pub const FAILED_VERIFICATION_STATUSES: [&str; 3] =
    ["PROCESSOR_DECLINED", "GATEWAY_REJECTED", "FAILED"];

#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest<T> {
    pub query: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<VariableInput<T>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VariableInput<T> {
    pub input: T,
}

impl<T> GraphQlRequest<T> {
    pub fn new(query: &'static str, input: T) -> Self {
        Self {
            query,
            variables: Some(VariableInput { input }),
        }
    }
}

impl GraphQlRequest<()> {
    pub fn without_variables(query: &'static str) -> Self {
        Self {
            query,
            variables: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    pub extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlErrorExtensions {
    pub error_class: Option<String>,
    pub legacy_code: Option<String>,
}

impl GraphQlError {
    pub fn error_class(&self) -> Option<&str> {
        self.extensions
            .as_ref()
            .and_then(|extensions| extensions.error_class.as_deref())
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditCardInput {
    pub number: String,
    pub expiration_month: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_year: Option<String>,
    pub cvv: String,
}

impl From<&CardDetails> for CreditCardInput {
    fn from(card: &CardDetails) -> Self {
        let (expiration_month, expiration_year) = card.expiration_parts();
        Self {
            number: card.number.clone(),
            expiration_month,
            expiration_year,
            cvv: card.cvv.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizeCreditCardInput {
    pub client_mutation_id: String,
    pub credit_card: CreditCardInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationOptionsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_account_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPaymentMethodInput {
    pub client_mutation_id: String,
    pub payment_method_id: String,
    pub verification: VerificationOptionsInput,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientTokenOptionsInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_account_id: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientTokenInput {
    pub client_mutation_id: String,
    pub client_token: ClientTokenOptionsInput,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethodNode {
    pub id: String,
    pub usage: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationNode {
    pub id: Option<String>,
    pub status: Option<String>,
}

impl VerificationNode {
    pub fn is_failed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|status| FAILED_VERIFICATION_STATUSES.contains(&status))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizeCreditCardPayload {
    pub payment_method: Option<PaymentMethodNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenizeCreditCardData {
    pub tokenize_credit_card: Option<TokenizeCreditCardPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPaymentMethodPayload {
    pub payment_method: Option<PaymentMethodNode>,
    pub verification: Option<VerificationNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultPaymentMethodData {
    pub vault_payment_method: Option<VaultPaymentMethodPayload>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientTokenPayload {
    pub client_token: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientTokenData {
    pub create_client_token: Option<CreateClientTokenPayload>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PingData {
    pub ping: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_request_body() {
        let card = CardDetails::new("4111111111111111", "12/23", "123");
        let request = GraphQlRequest::new(
            TOKENIZE_CREDIT_CARD_MUTATION,
            TokenizeCreditCardInput {
                client_mutation_id: "mutation-1".into(),
                credit_card: CreditCardInput::from(&card),
            },
        );

        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["query"], TOKENIZE_CREDIT_CARD_MUTATION);
        assert_eq!(
            body["variables"]["input"],
            serde_json::json!({
                "clientMutationId": "mutation-1",
                "creditCard": {
                    "number": "4111111111111111",
                    "expirationMonth": "12",
                    "expirationYear": "23",
                    "cvv": "123"
                }
            })
        );
    }

    #[test]
    fn test_ping_request_has_no_variables() {
        let body = serde_json::to_value(GraphQlRequest::without_variables(PING_QUERY)).unwrap();

        assert_eq!(body, serde_json::json!({ "query": "query { ping }" }));
    }

    #[test]
    fn test_validation_error_response() {
        let response: GraphQlResponse<TokenizeCreditCardData> = serde_json::from_value(
            serde_json::json!({
                "data": { "tokenizeCreditCard": null },
                "errors": [{
                    "message": "Credit card number is invalid.",
                    "extensions": { "errorClass": "VALIDATION", "legacyCode": "81715" }
                }]
            }),
        )
        .unwrap();

        assert!(response.data.unwrap().tokenize_credit_card.is_none());
        assert_eq!(response.errors[0].error_class(), Some("VALIDATION"));
    }

    #[test]
    fn test_failed_verification_status() {
        let declined = VerificationNode {
            id: None,
            status: Some("PROCESSOR_DECLINED".into()),
        };
        let verified = VerificationNode {
            id: None,
            status: Some("VERIFIED".into()),
        };

        assert!(declined.is_failed());
        assert!(!verified.is_failed());
    }
}
