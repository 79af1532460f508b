use crate::estimate::{PricingTable, BASE_PRICE_PER_SQFT};
use crate::notification::Mailbox;

const DEFAULT_NOTIFY_TO: &str = "info@pvchaiti.com";
const DEFAULT_NOTIFY_FROM: &str = "noreply@pvchaiti.com";
const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub notify_to: String,
    pub notify_from: String,
    pub database_url: Option<String>, // Log store when unset
    pub mail_api_url: Option<String>,
    pub mail_api_key: Option<String>,
    pub base_price_per_sqft: f64,
    pub max_body_bytes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            notify_to: DEFAULT_NOTIFY_TO.to_string(),
            notify_from: DEFAULT_NOTIFY_FROM.to_string(),
            database_url: None,
            mail_api_url: None,
            mail_api_key: None,
            base_price_per_sqft: BASE_PRICE_PER_SQFT,
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self::from_vars(|key| std::env::var(key).ok())?;

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!("Notifications: {} -> {}", config.notify_from, config.notify_to);
        match &config.mail_api_url {
            Some(url) => tracing::info!("Mail API configured: {}", url),
            None => tracing::warn!("No mail API configured, notifications will only be logged"),
        }
        if config.database_url.is_none() {
            tracing::warn!("No database configured, submissions will only be logged");
        }

        Ok(config)
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| var(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let database_url = non_blank("DATABASE_URL")
            .or_else(|| non_blank("DB_URL"))
            .map(|url| -> anyhow::Result<String> {
                if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                    anyhow::bail!("DATABASE_URL must start with postgresql:// or postgres://");
                }
                Ok(url)
            })
            .transpose()?;

        let mail_api_url = non_blank("MAIL_API_URL")
            .map(|url| -> anyhow::Result<String> {
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    anyhow::bail!("MAIL_API_URL must start with http:// or https://");
                }
                url::Url::parse(&url)
                    .map_err(|e| anyhow::anyhow!("MAIL_API_URL is not a valid URL: {}", e))?;
                Ok(url)
            })
            .transpose()?;
        let mail_api_key = non_blank("MAIL_API_KEY");

        match (&mail_api_url, &mail_api_key) {
            (Some(_), None) => anyhow::bail!("MAIL_API_KEY is required when MAIL_API_URL is set"),
            (None, Some(_)) => anyhow::bail!("MAIL_API_URL is required when MAIL_API_KEY is set"),
            _ => {}
        }

        let config = Self {
            port: non_blank("PORT")
                .map(|p| p.trim().parse::<u16>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?
                .unwrap_or(defaults.port),
            notify_to: non_blank("NOTIFY_TO").unwrap_or(defaults.notify_to),
            notify_from: non_blank("NOTIFY_FROM").unwrap_or(defaults.notify_from),
            database_url,
            mail_api_url,
            mail_api_key,
            base_price_per_sqft: non_blank("BASE_PRICE_PER_SQFT")
                .map(|p| p.trim().parse::<f64>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("BASE_PRICE_PER_SQFT must be a number"))?
                .unwrap_or(defaults.base_price_per_sqft),
            max_body_bytes: non_blank("MAX_BODY_BYTES")
                .map(|b| b.trim().parse::<usize>())
                .transpose()
                .map_err(|_| anyhow::anyhow!("MAX_BODY_BYTES must be a positive integer"))?
                .unwrap_or(defaults.max_body_bytes),
        };

        if !config.base_price_per_sqft.is_finite() || config.base_price_per_sqft <= 0.0 {
            anyhow::bail!("BASE_PRICE_PER_SQFT must be a positive number");
        }
        if config.max_body_bytes == 0 {
            anyhow::bail!("MAX_BODY_BYTES must be a positive integer");
        }

        Ok(config)
    }

    pub fn mailbox(&self) -> Mailbox {
        Mailbox {
            to: self.notify_to.clone(),
            from: self.notify_from.clone(),
        }
    }

    pub fn pricing(&self) -> PricingTable {
        PricingTable::with_base_price(self.base_price_per_sqft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_vars(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.notify_to, "info@pvchaiti.com");
        assert_eq!(config.notify_from, "noreply@pvchaiti.com");
        assert_eq!(config.database_url, None);
        assert_eq!(config.mail_api_url, None);
        assert_eq!(config.base_price_per_sqft, 450.0);
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_db_url_alias() {
        let config = load(&[("DB_URL", "postgres://localhost/pvc")]).unwrap();
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/pvc"));
    }

    #[test]
    fn test_rejects_non_postgres_url() {
        assert!(load(&[("DATABASE_URL", "mysql://localhost/pvc")]).is_err());
    }

    #[test]
    fn test_mail_api_requires_both_values() {
        assert!(load(&[("MAIL_API_URL", "https://api.sendgrid.com")]).is_err());
        assert!(load(&[("MAIL_API_KEY", "secret")]).is_err());

        let config = load(&[
            ("MAIL_API_URL", "https://api.sendgrid.com"),
            ("MAIL_API_KEY", "secret"),
        ])
        .unwrap();
        assert_eq!(config.mail_api_key.as_deref(), Some("secret"));
    }

    #[test]
    fn test_mail_api_url_scheme() {
        let result = load(&[("MAIL_API_URL", "ftp://mail"), ("MAIL_API_KEY", "secret")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_numbers() {
        assert!(load(&[("PORT", "eighty")]).is_err());
        assert!(load(&[("BASE_PRICE_PER_SQFT", "-5")]).is_err());
        assert!(load(&[("BASE_PRICE_PER_SQFT", "free")]).is_err());
        assert!(load(&[("MAX_BODY_BYTES", "0")]).is_err());
    }

    #[test]
    fn test_pricing_and_mailbox() {
        let config = load(&[("BASE_PRICE_PER_SQFT", "500"), ("NOTIFY_TO", "sales@pvchaiti.com")])
            .unwrap();
        assert_eq!(config.pricing().base_price_per_sqft, 500.0);
        assert_eq!(config.mailbox().to, "sales@pvchaiti.com");
        assert_eq!(config.mailbox().from, "noreply@pvchaiti.com");
    }
}
