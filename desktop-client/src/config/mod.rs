mod client_config;

pub use client_config::{ClientConfig, ClientConfigManager, get_config_manager};
