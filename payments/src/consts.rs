pub const SANDBOX_GRAPHQL_URL: &str = "https://payments.sandbox.braintree-api.com/graphql";
pub const PRODUCTION_GRAPHQL_URL: &str = "https://payments.braintree-api.com/graphql";
pub const BRAINTREE_API_VERSION: &str = "2019-01-01";
pub const BRAINTREE_VERSION_HEADER: &str = "Braintree-Version";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

pub const CARD_LOADED_MSG: &str = "Credit card successfully checked and loaded.";
pub const CARD_CHECK_FAILED_MSG: &str =
    "Credit card check failed. Please check the provided details.";

pub const INVALID_API_KEY_MSG: &str = "Invalid or unauthorized API key.";
pub const ENDPOINT_NOT_FOUND_MSG: &str = "Braintree API endpoint not found.";
pub const SERVER_FAILURE_MSG: &str = "Error on the Braintree server.";
pub const UNEXPECTED_REQUEST_MSG: &str = "Unexpected error during API request.";

pub const AUTHENTICATION_ERROR_PREFIX: &str = "Authentication error.";
pub const AUTHORIZATION_ERROR_PREFIX: &str = "Authorization error.";
pub const NOT_FOUND_ERROR_PREFIX: &str = "Resource not found error.";
pub const SERVER_ERROR_PREFIX: &str = "Server error.";
