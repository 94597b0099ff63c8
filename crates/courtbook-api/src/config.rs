//! Server configuration read from the environment.

use std::net::SocketAddr;

use courtbook_clock::domain::catalog::ClockTypeCatalog;

use crate::error::AppError;

/// Name of the variable pointing at an extra clock-type catalog.
pub const CLOCK_TYPES_VAR: &str = "COURTBOOK_CLOCK_TYPES";

/// Settings the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Bind address.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Path of a YAML file with clock types merged over the built-in ones.
    pub clock_types_path: Option<String>,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of
    /// a variable if it is set.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `PORT` is not a valid `u16`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?;
        let clock_types_path = lookup(CLOCK_TYPES_VAR).filter(|path| !path.trim().is_empty());

        Ok(Self {
            host,
            port,
            clock_types_path,
        })
    }

    /// The socket address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if host and port do not form an address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }

    /// The built-in clock types, with the configured file merged over them.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or parsed.
    pub fn clock_type_catalog(&self) -> Result<ClockTypeCatalog, AppError> {
        let mut catalog = ClockTypeCatalog::built_in().clone();
        if let Some(path) = &self.clock_types_path {
            let yaml = std::fs::read_to_string(path)
                .map_err(|e| AppError::Config(format!("cannot read {path}: {e}")))?;
            merge_yaml(&mut catalog, &yaml)?;
        }
        Ok(catalog)
    }
}

/// Merges the clock types listed in `yaml` over `catalog`.
///
/// # Errors
///
/// Returns `AppError::Config` if the YAML is not a list of clock types.
pub fn merge_yaml(catalog: &mut ClockTypeCatalog, yaml: &str) -> Result<(), AppError> {
    let extra = ClockTypeCatalog::from_yaml_str(yaml).map_err(|e| AppError::Config(e.to_string()))?;
    catalog.merge(extra.iter().map(|clock_type| (**clock_type).clone()));
    Ok(())
}
