//! # Configuration
//!
//! Settings for an [`EditSession`](crate::session::EditSession).

use serde::{Deserialize, Serialize};

/// Configuration for one editing session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// When false every field is disabled and confirmation is refused. Default: true.
    pub editable: bool,
    /// Largest difference between two reals still treated as equal. Default: 1e-13.
    pub real_tolerance: f64,
    /// Recompute the report after every edit rather than only on confirm. Default: true.
    pub validate_on_edit: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            editable: true,
            real_tolerance: 1e-13,
            validate_on_edit: true,
        }
    }
}

impl EditorConfig {
    pub fn read_only() -> Self {
        Self {
            editable: false,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"editable": false}"#).unwrap();
        assert!(!config.editable);
        assert!(config.validate_on_edit);
        assert_eq!(config.real_tolerance, 1e-13);
    }
}
