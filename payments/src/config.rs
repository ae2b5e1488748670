//! Gateway configuration management.
//!
//! All Braintree settings are read from environment variables. Nothing here is
//! process-wide: callers load a [`GatewayConfig`] and hand it to
//! [`crate::gateway::client::BraintreeClient::from_config`], so two clients with
//! different credentials can live side by side.
//!
//! # Security Notes
//! - Private keys and access tokens are never logged
//! - Credentials are never hard-coded, they must come from the environment

use anyhow::{Context, bail};
use derive_more::{Display, Error};
use envconfig::Envconfig;
use std::{fmt, str::FromStr, time::Duration};

use crate::consts;

/// Braintree environment a client talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display)]
pub enum Environment {
    #[default]
    #[display("sandbox")]
    Sandbox,
    #[display("production")]
    Production,
}

impl Environment {
    /// GraphQL endpoint for the environment
    pub fn graphql_url(&self) -> &'static str {
        match self {
            Environment::Sandbox => consts::SANDBOX_GRAPHQL_URL,
            Environment::Production => consts::PRODUCTION_GRAPHQL_URL,
        }
    }
}

#[derive(Debug, Display, Error)]
#[display("unknown braintree environment: {_0}")]
pub struct UnknownEnvironment(#[error(not(source))] String);

impl FromStr for Environment {
    type Err = UnknownEnvironment;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            other => Err(UnknownEnvironment(other.to_string())),
        }
    }
}

/// Credentials sent on every request.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// API key pair, sent as HTTP Basic auth
    Keys {
        public_key: String,
        private_key: String,
    },
    /// OAuth access token or API key, sent as a bearer token
    AccessToken(String),
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::Keys { public_key, .. } => f
                .debug_struct("Keys")
                .field("public_key", public_key)
                .field("private_key", &"***")
                .finish(),
            Credentials::AccessToken(_) => f.debug_tuple("AccessToken").field(&"***").finish(),
        }
    }
}

/// Gateway configuration read from the environment.
#[derive(Envconfig, Clone)]
pub struct GatewayConfig {
    /// Values: "sandbox", "production"
    #[envconfig(from = "BRAINTREE_ENVIRONMENT", default = "sandbox")]
    pub environment: Environment,

    /// Merchant id, checked against issued client tokens when present
    #[envconfig(from = "BRAINTREE_MERCHANT_ID")]
    pub merchant_id: Option<String>,

    /// Public half of the API key pair (SEMI-SENSITIVE)
    #[envconfig(from = "BRAINTREE_PUBLIC_KEY")]
    pub public_key: Option<String>,

    /// 🔒 SENSITIVE: private half of the API key pair
    #[envconfig(from = "BRAINTREE_PRIVATE_KEY")]
    pub private_key: Option<String>,

    /// 🔒 SENSITIVE: access token, used when no key pair is configured
    #[envconfig(from = "BRAINTREE_ACCESS_TOKEN")]
    pub access_token: Option<String>,

    /// Merchant account the client tokens are issued for
    #[envconfig(from = "BRAINTREE_MERCHANT_ACCOUNT_ID")]
    pub merchant_account_id: Option<String>,

    #[envconfig(from = "BRAINTREE_API_VERSION", default = "2019-01-01")]
    pub api_version: String,

    #[envconfig(from = "BRAINTREE_TIMEOUT_SECS", default = "60")]
    pub timeout_secs: u64,

    /// GraphQL endpoint overriding the environment one, e.g. a proxy
    #[envconfig(from = "BRAINTREE_GRAPHQL_URL")]
    pub graphql_url: Option<String>,
}

impl GatewayConfig {
    /// Loads the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        Self::init_from_env()
            .context("failed to load braintree configuration from environment")?
            .validated()
            .context("invalid braintree configuration")
    }

    /// Rejects values that would make every request fail
    pub fn validated(self) -> anyhow::Result<Self> {
        if self.timeout_secs == 0 {
            bail!("BRAINTREE_TIMEOUT_SECS must be greater than zero");
        }

        Ok(self)
    }

    /// Same configuration authenticating with `api_key` as a bearer token
    pub fn with_api_key(&self, api_key: &str) -> Self {
        Self {
            public_key: None,
            private_key: None,
            access_token: Some(api_key.to_string()),
            ..self.clone()
        }
    }

    /// Endpoint requests are posted to
    pub fn endpoint(&self) -> &str {
        self.graphql_url
            .as_deref()
            .unwrap_or_else(|| self.environment.graphql_url())
    }

    /// Builds a configuration around a single API key, the rest left at defaults
    pub fn with_access_token(environment: Environment, api_key: &str) -> Self {
        Self {
            environment,
            merchant_id: None,
            public_key: None,
            private_key: None,
            access_token: Some(api_key.to_string()),
            merchant_account_id: None,
            api_version: consts::BRAINTREE_API_VERSION.into(),
            timeout_secs: consts::DEFAULT_TIMEOUT_SECS,
            graphql_url: None,
        }
    }

    /// Picks the credentials to use, the key pair wins over an access token
    pub fn credentials(&self) -> anyhow::Result<Credentials> {
        match (&self.public_key, &self.private_key, &self.access_token) {
            (Some(public_key), Some(private_key), _) => Ok(Credentials::Keys {
                public_key: public_key.clone(),
                private_key: private_key.clone(),
            }),
            (Some(_), None, _) | (None, Some(_), _) => {
                bail!("BRAINTREE_PUBLIC_KEY and BRAINTREE_PRIVATE_KEY must be set together")
            }
            (None, None, Some(token)) => Ok(Credentials::AccessToken(token.clone())),
            (None, None, None) => bail!(
                "no braintree credentials configured, set BRAINTREE_PUBLIC_KEY/BRAINTREE_PRIVATE_KEY or BRAINTREE_ACCESS_TOKEN"
            ),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
