// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed server configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Environment-based configuration management

use std::env;

use serde::{Deserialize, Serialize};

use crate::constants::{defaults, env_config};
use crate::errors::{AppError, AppResult};

/// Environment type for deployment-specific behavior
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Display name
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Testing => "testing",
        }
    }
}

/// Database connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Connection string, e.g. `sqlite:./data/strive.db`
    pub url: String,
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database settings
    pub database: DatabaseConfig,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error when a set variable fails to parse (e.g. a
    /// non-numeric port); unset variables fall back to defaults.
    pub fn from_env() -> AppResult<Self> {
        let http_port = match env::var(env_config::HTTP_PORT) {
            Ok(raw) => raw.parse::<u16>().map_err(|e| {
                AppError::invalid_input(format!(
                    "{} must be a port number, got '{raw}': {e}",
                    env_config::HTTP_PORT
                ))
            })?,
            Err(_) => defaults::HTTP_PORT,
        };

        let database_url = env::var(env_config::DATABASE_URL)
            .unwrap_or_else(|_| defaults::DATABASE_URL.to_owned());

        let environment = Environment::from_str_or_default(
            &env::var(env_config::ENVIRONMENT)
                .unwrap_or_else(|_| defaults::ENVIRONMENT.to_owned()),
        );

        Ok(Self {
            http_port,
            database: DatabaseConfig { url: database_url },
            environment,
        })
    }

    /// One-line summary for the startup log
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "environment={} http_port={} database={}",
            self.environment.as_str(),
            self.http_port,
            self.database.url
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_parsing() {
        assert_eq!(
            Environment::from_str_or_default("prod"),
            Environment::Production
        );
        assert_eq!(
            Environment::from_str_or_default("TEST"),
            Environment::Testing
        );
        assert_eq!(
            Environment::from_str_or_default("anything-else"),
            Environment::Development
        );
        assert!(Environment::Production.is_production());
    }
}
