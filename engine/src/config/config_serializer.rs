use std::any::type_name;

use serde::{Deserialize, Serialize};

pub trait ConfigSerializer<TConfig> {
    fn serialize(&self, config: &TConfig) -> Result<String, String>;
    fn deserialize(&self, content: &str) -> Result<TConfig, String>;
}

/// YAML on disk. A blank file (for example one truncated by hand) reads as an
/// empty mapping, so `#[serde(default)]` fields fall back to their defaults.
#[derive(Default)]
pub struct YamlConfigSerializer;

impl YamlConfigSerializer {
    pub fn new() -> Self {
        Self
    }
}

impl<TConfig> ConfigSerializer<TConfig> for YamlConfigSerializer
where
    TConfig: for<'de> Deserialize<'de> + Serialize,
{
    fn serialize(&self, config: &TConfig) -> Result<String, String> {
        serde_yaml_ng::to_string(config)
            .map_err(|e| format!("Failed to write {} as YAML: {}", type_name::<TConfig>(), e))
    }

    fn deserialize(&self, content: &str) -> Result<TConfig, String> {
        let content = if content.trim().is_empty() { "{}" } else { content };
        serde_yaml_ng::from_str(content)
            .map_err(|e| format!("Failed to read {} from YAML: {}", type_name::<TConfig>(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
    struct Window {
        #[serde(default)]
        width: u32,
        #[serde(default)]
        title: String,
    }

    #[test]
    fn test_blank_content_uses_field_defaults() {
        let serializer = YamlConfigSerializer::new();
        let window: Window = serializer.deserialize("  \n").unwrap();
        assert_eq!(window, Window::default());
    }

    #[test]
    fn test_error_names_the_config_type() {
        let serializer = YamlConfigSerializer::new();
        let err = ConfigSerializer::<Window>::deserialize(&serializer, "width: wide").unwrap_err();
        assert!(err.contains("Window"), "{}", err);
    }
}
