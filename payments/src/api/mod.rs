//! # API Module
//!
//! The two operations exposed on top of the payment gateway. They share no
//! state and never call each other.
//!
//! ## Modules
//!
//! - [`card`] - Checking and loading a credit card as a payment method
//! - [`token`] - Generating and verifying client tokens

pub mod card;
pub mod token;
