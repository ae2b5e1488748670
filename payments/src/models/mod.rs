pub mod card;
pub mod check_result;
pub mod client_token;
