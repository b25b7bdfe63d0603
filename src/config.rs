// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Proteus-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Proteus and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Playground configuration: the custom component vocabulary, the startup
//! resources, and the editor's auxiliary definitions.
//!
//! A static, fixed set supplied at configuration time; nothing in here is
//! ever derived from evaluation. The built-in default mirrors the component
//! kit the playground was conceived around.

use std::fmt;

use serde::Deserialize;

use crate::format::markup::{validate_markup_name, MarkupNameError};
use crate::preview::{ComponentRegistry, ComponentSpec, ElementCategory};
use crate::resource::{ResourceDescriptor, ResourceKind};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlaygroundConfig {
    pub components: Vec<ComponentConfig>,
    pub resources: Vec<ResourceDescriptor>,
    /// Definition lines registered with the editor widget as typing aid.
    pub definitions: Vec<String>,
}

#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidComponentName { name: String, reason: MarkupNameError },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid playground config: {err}"),
            Self::InvalidComponentName { name, reason } => {
                write!(f, "invalid component name in config: {name} ({reason})")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidComponentName { .. } => None,
        }
    }
}

impl PlaygroundConfig {
    /// Parses and validates a host-supplied JSON config.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        for component in &config.components {
            validate_markup_name(&component.name).map_err(|reason| {
                ConfigError::InvalidComponentName { name: component.name.clone(), reason }
            })?;
        }
        Ok(config)
    }

    /// The vocabulary the playground ships with: a small slice of the Ionic
    /// component kit, matching the assets in [`Self::default_resources`].
    pub fn builtin() -> Self {
        Self {
            components: vec![
                ComponentConfig {
                    name: "ion-button".to_owned(),
                    description: Some("A clickable button".to_owned()),
                },
                ComponentConfig {
                    name: "ion-badge".to_owned(),
                    description: Some("A small status descriptor".to_owned()),
                },
                ComponentConfig {
                    name: "ion-card".to_owned(),
                    description: Some("A content container".to_owned()),
                },
                ComponentConfig { name: "ion-chip".to_owned(), description: None },
            ],
            resources: Self::default_resources(),
            definitions: vec![
                "ion-button: <ion-button>label</ion-button>".to_owned(),
                "ion-badge: <ion-badge>text</ion-badge>".to_owned(),
                "ion-card: <ion-card>content</ion-card>".to_owned(),
            ],
        }
    }

    fn default_resources() -> Vec<ResourceDescriptor> {
        vec![
            ResourceDescriptor::new(
                "https://cdn.jsdelivr.net/npm/@ionic/core@4.6.2/dist/ionic/ionic.esm.js",
                ResourceKind::Script,
            ),
            ResourceDescriptor::new(
                "https://cdn.jsdelivr.net/npm/@ionic/core@4.6.2/css/ionic.bundle.css",
                ResourceKind::Stylesheet,
            ),
        ]
    }

    /// Builds the full evaluation vocabulary: builtins plus the configured
    /// custom components.
    pub fn component_registry(&self) -> ComponentRegistry {
        let mut registry = ComponentRegistry::with_builtins();
        for component in &self.components {
            let mut spec = ComponentSpec::new(component.name.as_str(), ElementCategory::Custom);
            if let Some(description) = &component.description {
                spec = spec.with_description(description.clone());
            }
            registry.register(spec);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, PlaygroundConfig};
    use crate::preview::ElementCategory;

    #[test]
    fn builtin_config_registers_its_components() {
        let config = PlaygroundConfig::builtin();
        let registry = config.component_registry();

        assert!(registry.contains("ion-button"));
        assert!(registry.contains("div"));
        assert_eq!(
            registry.get("ion-button").map(|spec| spec.category()),
            Some(ElementCategory::Custom)
        );
    }

    #[test]
    fn from_json_accepts_a_minimal_config() {
        let config = PlaygroundConfig::from_json(r#"{}"#).expect("parse");
        assert!(config.components.is_empty());
        assert!(config.resources.is_empty());
    }

    #[test]
    fn from_json_parses_components_and_resources() {
        let raw = r#"{
            "components": [
                {"name": "x-gauge", "description": "A dial"},
                {"name": "x-spark"}
            ],
            "resources": [
                {"url": "https://cdn.example.net/x.js", "kind": "script"}
            ],
            "definitions": ["x-gauge: <x-gauge/>"]
        }"#;

        let config = PlaygroundConfig::from_json(raw).expect("parse");
        assert_eq!(config.components.len(), 2);
        assert_eq!(config.resources.len(), 1);
        assert!(config.component_registry().contains("x-gauge"));
    }

    #[test]
    fn from_json_rejects_malformed_json() {
        let err = PlaygroundConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_json_rejects_unknown_fields() {
        let err = PlaygroundConfig::from_json(r#"{"scripts": []}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn from_json_rejects_invalid_component_names() {
        let err =
            PlaygroundConfig::from_json(r#"{"components": [{"name": "1bad"}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidComponentName { .. }));
    }
}
