use crate::config::types::{ArchiverConfig, Config, StorageConfig, UserAgentConfig};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_archiver_config(&config.archiver)?;
    validate_storage_config(&config.storage)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates crawl behavior configuration
fn validate_archiver_config(config: &ArchiverConfig) -> Result<(), ConfigError> {
    // Traversal is sequential and unbounded in breadth; a deep crawl of a
    // densely linked site can take hours, so keep the depth bound small.
    if config.max_depth > 16 {
        return Err(ConfigError::Validation(format!(
            "max_depth must be <= 16, got {}",
            config.max_depth
        )));
    }

    if config.fetch_timeout_secs < 1 || config.fetch_timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "fetch_timeout_secs must be between 1 and 120, got {}",
            config.fetch_timeout_secs
        )));
    }

    Ok(())
}

/// Validates snapshot store configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.root_path.is_empty() {
        return Err(ConfigError::Validation(
            "root_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.name.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    if !config
        .name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "user-agent name must contain only alphanumeric characters and hyphens, got '{}'",
            config.name
        )));
    }

    if config.version.is_empty() {
        return Err(ConfigError::Validation(
            "user-agent version cannot be empty".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_excessive_depth_rejected() {
        let mut config = Config::default();
        config.archiver.max_depth = 17;
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.archiver.fetch_timeout_secs = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_root_path_rejected() {
        let mut config = Config::default();
        config.storage.root_path = String::new();
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_user_agent_name_characters() {
        let mut config = Config::default();
        config.user_agent.name = "my archiver".to_string();
        assert!(validate(&config).is_err());

        config.user_agent.name = "my-archiver".to_string();
        assert!(validate(&config).is_ok());
    }
}
