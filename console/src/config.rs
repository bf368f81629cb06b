use std::net::{IpAddr, SocketAddr};

/// Base URL of the hosted car movies API.
pub const DEFAULT_API_URL: &str = "https://carsmoviesinventoryproject-production.up.railway.app/api/v1";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be a valid {expected}, got {value:?}")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Console configuration loaded from environment variables.
///
/// | Env Var             | Default                  |
/// |---------------------|--------------------------|
/// | `HOST`              | `0.0.0.0`                |
/// | `PORT`              | `8050`                   |
/// | `MOVIES_API_URL`    | [`DEFAULT_API_URL`]      |
/// | `MOVIES_FETCH_SIZE` | `100`                    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleConfig {
    pub host: IpAddr,
    pub port: u16,
    pub api_url: String,
    /// Number of movies requested from the API on every refresh.
    pub fetch_size: u32,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = parse(&lookup, "HOST", "0.0.0.0", "IP address")?;
        let port = parse(&lookup, "PORT", "8050", "port number")?;
        let api_url = lookup("MOVIES_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let fetch_size = parse(&lookup, "MOVIES_FETCH_SIZE", "100", "page size")?;

        Ok(Self {
            host,
            port,
            api_url,
            fetch_size,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: &str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    let value = lookup(var).unwrap_or_else(|| default.to_string());
    value.trim().parse().map_err(|_| ConfigError::Invalid { var, expected, value })
}
