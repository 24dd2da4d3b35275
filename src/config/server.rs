// ABOUTME: HTTP listener configuration for the gateway.
// ABOUTME: Parses formats like "host", "host:port", ":port", and "[::1]:port".

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("listen address cannot be empty".to_string());
        }

        // Bracketed IPv6: [addr] or [addr]:port
        if let Some(rest) = s.strip_prefix('[') {
            let close = rest
                .find(']')
                .ok_or_else(|| format!("unterminated IPv6 address: {}", s))?;
            let host = &rest[..close];
            let port = match rest[close + 1..].strip_prefix(':') {
                Some(port_str) => parse_port(port_str)?,
                None if rest.len() == close + 1 => default_port(),
                None => return Err(format!("invalid listen address: {}", s)),
            };
            return Ok(ServerConfig {
                host: host.to_string(),
                port,
            });
        }

        // Parse format: [host][:port]
        let (host, port) = if let Some(colon_pos) = s.rfind(':') {
            let port = parse_port(&s[colon_pos + 1..])?;
            (&s[..colon_pos], port)
        } else {
            (s, default_port())
        };

        let host = if host.is_empty() {
            default_host()
        } else {
            host.to_string()
        };

        Ok(ServerConfig { host, port })
    }

    /// Socket address string suitable for `TcpListener::bind`.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.host.trim().is_empty() {
            return Err("server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("server port cannot be 0".to_string());
        }
        Ok(())
    }
}

fn parse_port(port_str: &str) -> Result<u16, String> {
    port_str
        .parse::<u16>()
        .map_err(|_| format!("invalid port: {}", port_str))
}
