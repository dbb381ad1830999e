use std::{env, net::SocketAddr};

use chrono::NaiveDate;

use crate::{error::AppError, policy::TravelPolicy};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub listen_addr: SocketAddr,
    pub cookie_secret: String,
    /// Lowercased emails allowed through the login gate. Empty means open access.
    pub authorized_emails: Vec<String>,
    pub policy: TravelPolicy,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://travel.db?mode=rwc".to_string());
        let listen_addr: SocketAddr = env::var("APP_LISTEN_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .map_err(|err| AppError::Config(format!("invalid APP_LISTEN_ADDR: {err}")))?;

        let cookie_secret = env::var("COOKIE_SECRET")
            .unwrap_or_else(|_| "change-me-arrow-travel-cookie-secret".to_string());

        let authorized_emails = env::var("AUTHORIZED_EMAILS")
            .map(|raw| {
                raw.split(',')
                    .map(|email| email.trim().to_ascii_lowercase())
                    .filter(|email| !email.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        let mut policy = TravelPolicy::default();
        if let Ok(raw) = env::var("POLICY_LIMIT_DAYS") {
            policy.max_days_per_year = raw
                .parse()
                .map_err(|err| AppError::Config(format!("invalid POLICY_LIMIT_DAYS: {err}")))?;
        }
        if let Ok(raw) = env::var("POLICY_START_DATE") {
            policy.start_date = NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|err| AppError::Config(format!("invalid POLICY_START_DATE: {err}")))?;
        }

        Ok(Self {
            database_url,
            listen_addr,
            cookie_secret,
            authorized_emails,
            policy,
        })
    }

    pub fn email_authorized(&self, email: &str) -> bool {
        if self.authorized_emails.is_empty() {
            return true;
        }
        let needle = email.trim().to_ascii_lowercase();
        self.authorized_emails.iter().any(|known| *known == needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(emails: &[&str]) -> AppConfig {
        AppConfig {
            database_url: "sqlite::memory:".into(),
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            cookie_secret: "test".into(),
            authorized_emails: emails.iter().map(|email| email.to_string()).collect(),
            policy: TravelPolicy::default(),
        }
    }

    #[test]
    fn allowlist_matches_case_insensitively() {
        let config = config_with(&["sof@arrowship.example"]);
        assert!(config.email_authorized("  Sof@Arrowship.example "));
        assert!(!config.email_authorized("stranger@elsewhere.example"));
    }

    #[test]
    fn empty_allowlist_admits_everyone() {
        let config = config_with(&[]);
        assert!(config.email_authorized("anyone@anywhere.example"));
    }
}
