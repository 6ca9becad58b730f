use graph_walk_core::{GraphConfig, LabelPolicy, MAX_VERTEX_RADIUS};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};
use crate::util::parse_bool;

/// Value domain of a setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SettingKind {
    Bool,
    Real { min: f64, max: f64 },
    Choice(&'static [&'static str]),
}

/// Static description of a named setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingDef {
    pub name: &'static str,
    pub short_desc: &'static str,
    pub long_desc: &'static str,
    pub kind: SettingKind,
}

pub const DIRECTED: &str = "graph_walk.directed";
pub const DEFAULT_WEIGHT: &str = "graph_walk.default_weight";
pub const VERTEX_RADIUS: &str = "graph_walk.vertex_radius";
pub const LABEL_POLICY: &str = "graph_walk.label_policy";

pub static REGISTRY: [SettingDef; 4] = [
    SettingDef {
        name: DIRECTED,
        short_desc: "Treat edges as one-way",
        long_desc: "When off, new edges are mirrored and traversals follow both directions. \
                    Changing it does not add or drop mirrors on existing edges.",
        kind: SettingKind::Bool,
    },
    SettingDef {
        name: DEFAULT_WEIGHT,
        short_desc: "Weight of edges created without one",
        long_desc: "Used when an edge is drawn without a typed weight.",
        kind: SettingKind::Real {
            min: 0.0,
            max: 1.0e9,
        },
    },
    SettingDef {
        name: VERTEX_RADIUS,
        short_desc: "Hit-test radius of new vertices",
        long_desc: "Radius in canvas units around a vertex centre that counts as a hit.",
        kind: SettingKind::Real {
            min: 1.0,
            max: MAX_VERTEX_RADIUS,
        },
    },
    SettingDef {
        name: LABEL_POLICY,
        short_desc: "Vertex label validation",
        long_desc: "free_form accepts any label; integer requires whole-number labels.",
        kind: SettingKind::Choice(&["free_form", "integer"]),
    },
];

/// Look up a setting definition by name (case-insensitive).
pub fn lookup(name: &str) -> Option<&'static SettingDef> {
    REGISTRY.iter().find(|d| d.name.eq_ignore_ascii_case(name.trim()))
}

/// Current values of all settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Settings {
    config: GraphConfig,
}

impl Settings {
    pub fn from_config(config: GraphConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Set a value from its text form, checking it against the registry.
    pub fn set(&mut self, name: &str, value: &str) -> Result<()> {
        let def = lookup(name).ok_or_else(|| SessionError::UnknownSetting(name.to_string()))?;
        let invalid = |reason: String| SessionError::InvalidSetting {
            name: def.name,
            value: value.to_string(),
            reason,
        };

        match def.kind {
            SettingKind::Bool => {
                let b = parse_bool(value).ok_or_else(|| invalid("expected on or off".into()))?;
                self.config.directed = b;
            }
            SettingKind::Real { min, max } => {
                let v: f64 = value
                    .trim()
                    .parse()
                    .map_err(|_| invalid("expected a number".into()))?;
                if !(v >= min && v <= max) {
                    return Err(invalid(format!("must be between {} and {}", min, max)));
                }
                if def.name == DEFAULT_WEIGHT {
                    self.config.default_weight = v;
                } else {
                    self.config.vertex_radius = v;
                }
            }
            SettingKind::Choice(choices) => {
                let policy = match value.trim().to_lowercase().as_str() {
                    "free_form" => LabelPolicy::FreeForm,
                    "integer" => LabelPolicy::Integer,
                    _ => return Err(invalid(format!("expected one of {}", choices.join(", ")))),
                };
                self.config.label_policy = policy;
            }
        }
        Ok(())
    }

    /// Text form of a setting's current value.
    pub fn get(&self, name: &str) -> Result<String> {
        let def = lookup(name).ok_or_else(|| SessionError::UnknownSetting(name.to_string()))?;
        let text = match def.name {
            DIRECTED => (if self.config.directed { "on" } else { "off" }).to_string(),
            DEFAULT_WEIGHT => self.config.default_weight.to_string(),
            VERTEX_RADIUS => self.config.vertex_radius.to_string(),
            _ => match self.config.label_policy {
                LabelPolicy::FreeForm => "free_form".to_string(),
                LabelPolicy::Integer => "integer".to_string(),
            },
        };
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph_walk_core::GraphError;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.get(DIRECTED).unwrap(), "off");
        assert_eq!(s.get(DEFAULT_WEIGHT).unwrap(), "1");
        assert_eq!(s.get(VERTEX_RADIUS).unwrap(), "15");
        assert_eq!(s.get(LABEL_POLICY).unwrap(), "free_form");
    }

    #[test]
    fn test_set_and_get() {
        let mut s = Settings::default();
        s.set("graph_walk.directed", "on").unwrap();
        s.set("GRAPH_WALK.DEFAULT_WEIGHT", " 2.5").unwrap();
        s.set(LABEL_POLICY, "Integer").unwrap();
        assert!(s.config().directed);
        assert_eq!(s.config().default_weight, 2.5);
        assert_eq!(s.config().label_policy, LabelPolicy::Integer);
    }

    #[test]
    fn test_out_of_range() {
        let mut s = Settings::default();
        let err = s.set(VERTEX_RADIUS, "0.5").unwrap_err();
        assert!(matches!(err, SessionError::InvalidSetting { name: VERTEX_RADIUS, .. }));
        assert!(s.set(DEFAULT_WEIGHT, "-3").is_err());
        assert!(s.set(DEFAULT_WEIGHT, "NaN").is_err());
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_unknown_setting() {
        let mut s = Settings::default();
        assert_eq!(
            s.set("graph_walk.colour", "red"),
            Err(SessionError::UnknownSetting("graph_walk.colour".into()))
        );
        assert!(s.get("nope").is_err());
    }

    #[test]
    fn test_bad_choice_lists_options() {
        let mut s = Settings::default();
        let err = s.set(LABEL_POLICY, "roman").unwrap_err();
        assert!(err.to_string().contains("free_form, integer"));
    }

    #[test]
    fn test_registry_names_unique() {
        for (i, a) in REGISTRY.iter().enumerate() {
            assert!(REGISTRY[i + 1..].iter().all(|b| b.name != a.name));
        }
    }

    #[test]
    fn test_from_config_validates() {
        let config = GraphConfig {
            directed: true,
            vertex_radius: 40.0,
            ..GraphConfig::default()
        };
        let s = Settings::from_config(config).unwrap();
        assert_eq!(s.get(DIRECTED).unwrap(), "on");
        assert_eq!(s.get(VERTEX_RADIUS).unwrap(), "40");

        let bad = GraphConfig {
            default_weight: f64::NAN,
            ..GraphConfig::default()
        };
        assert!(matches!(
            Settings::from_config(bad),
            Err(SessionError::Graph(GraphError::InvalidConfig { field: "default_weight", .. }))
        ));
    }

    #[test]
    fn test_serializes_as_config() {
        let s = Settings::default();
        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(json["directed"], false);
        assert_eq!(json["label_policy"], "free_form");
    }
}
