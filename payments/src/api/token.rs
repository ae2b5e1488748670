use log::{error, info};

use crate::{
    consts,
    gateway::{
        self,
        errors::{ErrorKind, GatewayError},
    },
    models::client_token::ClientToken,
};

/// Generates a new client token and verifies it before handing it out.
///
/// Every call issues a new token. Authentication, authorization, not found and
/// server errors are returned with a clarifying prefix, anything else is
/// returned untouched. There is no partial result.
pub async fn generate_and_verify_client_token(
    gateway: &gateway::ImplPaymentGateway,
) -> Result<ClientToken, GatewayError> {
    let client_token = gateway
        .generate_client_token()
        .await
        .map_err(clarify_error)?;

    gateway
        .verify_client_token(&client_token)
        .await
        .map_err(clarify_error)?;

    info!("client token generated and verified");
    Ok(client_token)
}

fn clarify_error(err: GatewayError) -> GatewayError {
    error!("client token flow errored: [{}] {err}", err.kind());

    let prefix = match err.kind() {
        ErrorKind::Authentication => consts::AUTHENTICATION_ERROR_PREFIX,
        ErrorKind::Authorization => consts::AUTHORIZATION_ERROR_PREFIX,
        ErrorKind::NotFound => consts::NOT_FOUND_ERROR_PREFIX,
        ErrorKind::Server => consts::SERVER_ERROR_PREFIX,
        _ => return err,
    };

    let message = match err.message().trim() {
        "" => prefix.to_string(),
        detail => format!("{prefix} {detail}"),
    };
    err.with_message(message)
}
