use std::path::Path;

use schemashift_core::ConversionSettings;

use crate::CliError;

/// Load engine limits from a TOML file. Missing keys keep their defaults.
pub fn load_settings(path: &Path) -> Result<ConversionSettings, CliError> {
    let content = std::fs::read_to_string(path)?;
    let settings: ConversionSettings = toml::from_str(&content)?;
    if settings.max_non_key_column_length == 0 {
        return Err(CliError::InvalidConfig(
            "max_non_key_column_length must be greater than zero".to_string(),
        ));
    }
    Ok(settings)
}
