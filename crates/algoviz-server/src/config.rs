//! Server configuration read from environment variables.
//!
//! - `ALGOVIZ_BIND`: listen address (default: "0.0.0.0")
//! - `ALGOVIZ_PORT`: listen port (default: 3000)
//! - `ALGOVIZ_MAX_*`: one override per [`InputLimits`] field
//!
//! A variable that is set but does not parse is a startup error; it is never
//! silently replaced by the default.

use std::str::FromStr;

use algoviz_core::InputLimits;

/// Environment variable names for each limit, paired with its setter.
const LIMIT_VARS: [(&str, fn(&mut InputLimits, usize)); 10] = [
    ("ALGOVIZ_MAX_ARRAY_LEN", |l, v| l.max_array_len = v),
    ("ALGOVIZ_MAX_GRAPH_NODES", |l, v| l.max_graph_nodes = v),
    ("ALGOVIZ_MAX_GRAPH_EDGES", |l, v| l.max_graph_edges = v),
    ("ALGOVIZ_MAX_DP_CELLS", |l, v| l.max_dp_cells = v),
    ("ALGOVIZ_MAX_COIN_AMOUNT", |l, v| l.max_coin_amount = v),
    ("ALGOVIZ_MAX_COINS", |l, v| l.max_coins = v),
    ("ALGOVIZ_MAX_QUEENS", |l, v| l.max_queens = v),
    ("ALGOVIZ_MAX_FACTORIAL_N", |l, v| l.max_factorial_n = v),
    ("ALGOVIZ_MAX_FIBONACCI_N", |l, v| l.max_fibonacci_n = v),
    ("ALGOVIZ_MAX_TREE_NODES", |l, v| l.max_tree_nodes = v),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var}={value:?} is not valid: {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub limits: InputLimits,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: "0.0.0.0".to_string(),
            port: 3000,
            limits: InputLimits::default(),
        }
    }
}

impl ServerConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds a config from any variable source; unset variables keep their
    /// defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();

        if let Some(bind) = lookup("ALGOVIZ_BIND") {
            config.bind = bind;
        }
        if let Some(port) = parse(&lookup, "ALGOVIZ_PORT")? {
            config.port = port;
        }
        for (var, set) in LIMIT_VARS {
            if let Some(value) = parse(&lookup, var)? {
                set(&mut config.limits, value);
            }
        }
        Ok(config)
    }

    /// `bind:port`, ready for `TcpListener::bind`.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

fn parse<T>(lookup: &impl Fn(&str) -> Option<String>, var: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let Some(raw) = lookup(var) else {
        return Ok(None);
    };
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|e: T::Err| ConfigError::Invalid {
            var,
            value: raw.clone(),
            reason: e.to_string(),
        })
}
