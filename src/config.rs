//! Gateway configuration

use std::{fs, path::Path};

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading the configuration file.
    #[error("failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error.
    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_norway::Error),
}

/// Which gateway environment the storefront talks to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayEnvironment {
    /// Test environment with sandbox credentials.
    #[default]
    Sandbox,

    /// Production environment.
    Live,
}

/// What the gateway should do with an approved payment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentIntent {
    /// Capture funds immediately.
    #[default]
    Capture,

    /// Authorize now, capture later.
    Authorize,
}

/// PayPal hosted-button settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PayPalConfig {
    /// Client id for the PayPal SDK.
    pub client_id: String,

    /// ISO currency code orders are created in.
    pub currency: String,

    /// Capture behavior.
    pub intent: PaymentIntent,

    /// Sandbox or live.
    pub environment: GatewayEnvironment,
}

impl Default for PayPalConfig {
    fn default() -> Self {
        Self {
            client_id: "AW8Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q9Q"
                .to_owned(),
            currency: "USD".to_owned(),
            intent: PaymentIntent::Capture,
            environment: GatewayEnvironment::Sandbox,
        }
    }
}

/// Stripe card-form settings. Only the publishable key belongs here;
/// secret keys stay server-side with the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StripeConfig {
    /// Publishable key for the card form.
    pub publishable_key: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            publishable_key: "pk_test_51234567890abcdefghijklmnopqrstuvwxyz".to_owned(),
        }
    }
}

/// Paths the storefront calls on its payment API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiEndpoints {
    /// Create a card payment intent.
    pub create_payment_intent: String,

    /// Confirm a card payment.
    pub confirm_payment: String,

    /// Process a completed PayPal order.
    pub process_paypal: String,

    /// Gateway webhook receiver.
    pub webhooks: String,
}

impl Default for ApiEndpoints {
    fn default() -> Self {
        Self {
            create_payment_intent: "/payments/create-intent".to_owned(),
            confirm_payment: "/payments/confirm".to_owned(),
            process_paypal: "/payments/paypal".to_owned(),
            webhooks: "/payments/webhooks".to_owned(),
        }
    }
}

/// Payment API location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL the endpoint paths hang off.
    pub base_url: String,

    /// Endpoint paths.
    pub endpoints: ApiEndpoints,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://your-api-domain.com/api".to_owned(),
            endpoints: ApiEndpoints::default(),
        }
    }
}

/// Full gateway configuration, shipped with sandbox defaults and
/// overridden from YAML when going live.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    /// PayPal settings.
    pub paypal: PayPalConfig,

    /// Stripe settings.
    pub stripe: StripeConfig,

    /// Payment API settings.
    pub api: ApiConfig,
}

impl PaymentConfig {
    /// Parse a configuration from YAML. Missing sections keep their
    /// sandbox defaults.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the YAML does not parse.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_norway::from_str(contents)?)
    }

    /// Load a configuration file.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml(&contents)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_point_at_the_sandbox() {
        let config = PaymentConfig::default();

        assert_eq!(config.paypal.environment, GatewayEnvironment::Sandbox);
        assert_eq!(config.paypal.intent, PaymentIntent::Capture);
        assert_eq!(config.paypal.currency, "USD");
        assert!(config.stripe.publishable_key.starts_with("pk_test_"));
        assert_eq!(config.api.endpoints.webhooks, "/payments/webhooks");
    }

    #[test]
    fn yaml_overrides_merge_over_defaults() -> TestResult {
        let config = PaymentConfig::from_yaml(
            "paypal:\n  client_id: live-client\n  environment: live\nstripe:\n  publishable_key: pk_live_abc\n",
        )?;

        assert_eq!(config.paypal.client_id, "live-client");
        assert_eq!(config.paypal.environment, GatewayEnvironment::Live);
        assert_eq!(config.stripe.publishable_key, "pk_live_abc");

        // Untouched sections keep their defaults.
        assert_eq!(config.api.base_url, "https://your-api-domain.com/api");

        Ok(())
    }

    #[test]
    fn unknown_environment_fails_to_parse() {
        let result = PaymentConfig::from_yaml("paypal:\n  environment: staging\n");

        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn load_reads_a_file_from_disk() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "api:\n  base_url: https://shop.example/api")?;

        let config = PaymentConfig::load(file.path())?;

        assert_eq!(config.api.base_url, "https://shop.example/api");

        Ok(())
    }
}
