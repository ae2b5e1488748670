use log::{error, info};

use crate::{
    config::GatewayConfig,
    consts,
    gateway::{
        self,
        client::BraintreeClient,
        errors::{ErrorKind, GatewayError},
    },
    models::{card::CardDetails, check_result::CardCheckResult},
};

/// Checks a credit card with Braintree and loads it as a payment method.
///
/// A card the provider refuses comes back as a failed [`CardCheckResult`].
/// Faults on the way to the provider are returned as errors instead, with a
/// clarifying message for authentication, not found, server and unexpected
/// errors. Other kinds are returned untouched.
///
/// # Arguments
/// * `gateway` - Configured payment gateway
/// * `card` - Card details, validated by the provider only
pub async fn check_and_load_credit_card(
    gateway: &gateway::ImplPaymentGateway,
    card: &CardDetails,
) -> Result<CardCheckResult, GatewayError> {
    info!("checking credit card {}", card.masked_number());

    match gateway.create_payment_method(card).await {
        Ok(outcome) if outcome.is_success() => Ok(CardCheckResult::loaded()),
        Ok(outcome) => {
            info!("credit card check failed: {outcome:?}");
            Ok(CardCheckResult::check_failed())
        }
        Err(err) => {
            error!("credit card check errored: [{}] {err}", err.kind());
            Err(clarify_error(err))
        }
    }
}

/// Same as [`check_and_load_credit_card`] with a client built around `api_key`.
///
/// `config` supplies the environment, endpoint and timeouts, its credentials
/// are replaced by the API key.
pub async fn check_and_load_credit_card_with_api_key(
    config: &GatewayConfig,
    api_key: &str,
    card: &CardDetails,
) -> anyhow::Result<CardCheckResult> {
    let config = config.with_api_key(api_key);
    let gateway: gateway::ImplPaymentGateway = Box::new(BraintreeClient::from_config(&config)?);

    Ok(check_and_load_credit_card(&gateway, card).await?)
}

fn clarify_error(err: GatewayError) -> GatewayError {
    let message = match err.kind() {
        ErrorKind::Authentication => consts::INVALID_API_KEY_MSG,
        ErrorKind::NotFound => consts::ENDPOINT_NOT_FOUND_MSG,
        ErrorKind::Server => consts::SERVER_FAILURE_MSG,
        ErrorKind::Unexpected => consts::UNEXPECTED_REQUEST_MSG,
        _ => return err,
    };

    err.with_message(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::{MockPaymentGateway, PaymentMethodOutcome};

    fn example_card() -> CardDetails {
        CardDetails::new("4111111111111111", "12/23", "123")
    }

    fn gateway_returning(
        result: Result<PaymentMethodOutcome, GatewayError>,
    ) -> gateway::ImplPaymentGateway {
        let mut mock_gateway = MockPaymentGateway::new();
        mock_gateway
            .expect_create_payment_method()
            .withf(|card| card.number == "4111111111111111" && card.expiration_date == "12/23")
            .times(1)
            .return_once(move |_| result);
        mock_gateway.expect_generate_client_token().never();

        Box::new(mock_gateway)
    }

    #[tokio::test]
    async fn test_card_loaded() {
        let gateway = gateway_returning(Ok(PaymentMethodOutcome::Created {
            payment_method_id: "pm_123".into(),
            verification_status: Some("VERIFIED".into()),
        }));

        let result = check_and_load_credit_card(&gateway, &example_card())
            .await
            .unwrap();

        assert!(result.success);
        assert_eq!(result.message, "Credit card successfully checked and loaded.");
    }

    #[tokio::test]
    async fn test_card_rejected_is_a_failed_record() {
        let gateway = gateway_returning(Ok(PaymentMethodOutcome::Rejected {
            reasons: vec!["Credit card number is invalid.".into()],
        }));

        let result = check_and_load_credit_card(&gateway, &example_card())
            .await
            .unwrap();

        assert_eq!(
            result,
            CardCheckResult {
                success: false,
                message: "Credit card check failed. Please check the provided details.".into()
            }
        );
    }

    #[tokio::test]
    async fn test_authentication_error_is_clarified() {
        let gateway = gateway_returning(Err(GatewayError::Authentication(
            "braintree returned status 401".into(),
        )));

        let err = check_and_load_credit_card(&gateway, &example_card())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Authentication);
        assert!(err.to_string().contains("Invalid or unauthorized API key."));
    }

    #[tokio::test]
    async fn test_clarified_error_messages() {
        let cases = [
            (
                GatewayError::NotFound("404".into()),
                "Braintree API endpoint not found.",
            ),
            (
                GatewayError::Server("500".into()),
                "Error on the Braintree server.",
            ),
            (
                GatewayError::Unexpected("connection reset".into()),
                "Unexpected error during API request.",
            ),
        ];

        for (raw, expected) in cases {
            let kind = raw.kind();
            let gateway = gateway_returning(Err(raw));

            let err = check_and_load_credit_card(&gateway, &example_card())
                .await
                .unwrap_err();

            assert_eq!(err.kind(), kind);
            assert_eq!(err.to_string(), expected);
        }
    }

    #[tokio::test]
    async fn test_other_errors_pass_through() {
        let gateway = gateway_returning(Err(GatewayError::Authorization(
            "braintree returned status 403".into(),
        )));

        let err = check_and_load_credit_card(&gateway, &example_card())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            GatewayError::Authorization("braintree returned status 403".into())
        );
    }
}
