//! Runtime settings for the static shell, read from the environment.
//!
//! | Variable              | Default     |
//! |-----------------------|-------------|
//! | `CAMPUS_HOST`         | `127.0.0.1` |
//! | `CAMPUS_PORT`         | `8080`      |
//! | `CAMPUS_OPEN_BROWSER` | `true`      |

use log::warn;
use std::env;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Open the default browser on the served URL after startup.
    pub open_browser: bool,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("CAMPUS_HOST")
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string());

        let port = match lookup("CAMPUS_PORT") {
            Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
                warn!("invalid CAMPUS_PORT {:?}, using {}", raw, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let open_browser = lookup("CAMPUS_OPEN_BROWSER")
            .map(|raw| {
                !matches!(
                    raw.trim().to_ascii_lowercase().as_str(),
                    "0" | "false" | "no" | "off"
                )
            })
            .unwrap_or(true);

        Self {
            host,
            port,
            open_browser,
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
