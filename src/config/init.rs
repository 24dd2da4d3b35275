// ABOUTME: Config scaffolding for new installations.
// ABOUTME: Creates dockbridge.yml template files.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

/// Write a default `dockbridge.yml` into `dir`, returning its path.
pub fn init_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&Config::default());
    std::fs::write(&config_path, yaml)?;

    Ok(config_path)
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"server:
  host: {}
  port: {}

engine:
  # Engine endpoint (default: DOCKER_HOST, then Docker and Podman sockets)
  # runtime: docker
  # socket: /var/run/docker.sock
  timeout: {}s
"#,
        config.server.host,
        config.server.port,
        config.engine.timeout.as_secs()
    )
}
