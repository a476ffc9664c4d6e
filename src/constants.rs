// ABOUTME: Application constants and configuration defaults
// ABOUTME: Central home for env var names, limits, and default values
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! Application constants and configuration values

/// Service identity used in logs and startup banners
pub mod service_names {
    /// Canonical service name
    pub const STRIVE_SERVER: &str = "strive-server";
}

/// Environment variable names read by [`crate::config`]
pub mod env_config {
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Database connection string
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
    /// Log output format (json, pretty, compact)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
}

/// Default values applied when the environment leaves them unset
pub mod defaults {
    /// Default HTTP listen port
    pub const HTTP_PORT: u16 = 8081;
    /// Default database URL (in-process SQLite file)
    pub const DATABASE_URL: &str = "sqlite:./data/strive.db";
    /// Default deployment environment
    pub const ENVIRONMENT: &str = "development";
}

/// Hard limits enforced by the API layer
pub mod limits {
    /// Default page size for goal listings
    pub const DEFAULT_PAGE_SIZE: u32 = 20;
    /// Maximum page size a caller may request
    pub const MAX_PAGE_SIZE: u32 = 100;
    /// Request timeout applied by the HTTP layer, in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// HTTP header names consumed by the route layer
pub mod headers {
    /// Identity header placed by the upstream auth collaborator
    pub const USER_ID: &str = "x-user-id";
    /// Role header for administrative surfaces
    pub const USER_ROLE: &str = "x-user-role";
}
