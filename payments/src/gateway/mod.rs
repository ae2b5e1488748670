pub mod client;
pub mod errors;
pub mod schemas;

use async_trait::async_trait;

use crate::models::{card::CardDetails, client_token::ClientToken};
use errors::GatewayError;

/// What the provider decided about a payment method creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethodOutcome {
    Created {
        payment_method_id: String,
        verification_status: Option<String>,
    },
    /// Declined or failed validation, no fault on the way to the provider
    Rejected { reasons: Vec<String> },
}

impl PaymentMethodOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PaymentMethodOutcome::Created { .. })
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Tokenizes the card and vaults it as a payment method, verifying it on the way
    async fn create_payment_method(
        &self,
        card: &CardDetails,
    ) -> Result<PaymentMethodOutcome, GatewayError>;

    /// Issues a brand new client token
    async fn generate_client_token(&self) -> Result<ClientToken, GatewayError>;

    /// Checks a client token was issued for this gateway and is accepted by it
    async fn verify_client_token(&self, token: &ClientToken) -> Result<(), GatewayError>;
}

pub type ImplPaymentGateway = Box<dyn PaymentGateway>;
