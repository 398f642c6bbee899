// Chunk: docs/chunks/editor_config - Editor configuration (tab size, brace style, line endings)

//! Editor settings that shape edit commands.
//!
//! Settings persistence lives outside this crate; callers hand over a JSON
//! document (or build the struct directly) and the session reads it.

use serde::{Deserialize, Serialize};

use crate::error::{EditError, EditResult};
use crate::tabs::MAX_TAB_SIZE;
use crate::types::LineEnding;

/// Brace-style flags for the document type being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// GNU style: open braces on their own indented line, close braces dedent.
    pub brace_gnu: bool,
    /// ANSI style: indent after an open brace, close braces dedent.
    pub brace_ansi: bool,
    /// Put a space between an identifier and a typed `(`.
    pub fn_brace: bool,
}

/// Configuration for an [`EditSession`](crate::EditSession).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub tab_size: usize,
    /// Tab inserts a tab character rather than spaces to the next stop.
    pub insert_tabs: bool,
    pub auto_indent: bool,
    pub disable_drag_drop: bool,
    pub line_ending: LineEnding,
    pub source: SourceOptions,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_size: 4,
            insert_tabs: true,
            auto_indent: true,
            disable_drag_drop: false,
            line_ending: LineEnding::Lf,
            source: SourceOptions::default(),
        }
    }
}

impl EditorConfig {
    /// Parses and validates a JSON configuration. Missing fields take defaults.
    pub fn from_json(json: &str) -> EditResult<Self> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges serde cannot express.
    pub fn validate(&self) -> EditResult<()> {
        if self.tab_size == 0 || self.tab_size > MAX_TAB_SIZE {
            return Err(EditError::InvalidConfig(format!(
                "tab_size must be between 1 and {}, got {}",
                MAX_TAB_SIZE, self.tab_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.tab_size, 4);
        assert!(config.insert_tabs);
        assert!(config.auto_indent);
        assert_eq!(config.source, SourceOptions::default());
    }

    #[test]
    fn test_from_json_partial() {
        let config =
            EditorConfig::from_json(r#"{"tab_size": 8, "source": {"brace_ansi": true}}"#).unwrap();
        assert_eq!(config.tab_size, 8);
        assert!(config.source.brace_ansi);
        assert!(!config.source.brace_gnu);
        assert!(config.insert_tabs);
    }

    #[test]
    fn test_from_json_line_ending() {
        let config = EditorConfig::from_json(r#"{"line_ending": "crlf"}"#).unwrap();
        assert_eq!(config.line_ending, LineEnding::CrLf);
    }

    #[test]
    fn test_from_json_rejects_bad_tab_size() {
        let err = EditorConfig::from_json(r#"{"tab_size": 0}"#).unwrap_err();
        assert!(matches!(err, EditError::InvalidConfig(_)));
        let err = EditorConfig::from_json(r#"{"tab_size": 65}"#).unwrap_err();
        assert!(matches!(err, EditError::InvalidConfig(_)));
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = EditorConfig::from_json("{tab_size").unwrap_err();
        assert!(matches!(err, EditError::ConfigParse(_)));
    }

    #[test]
    fn test_round_trips_through_json() {
        let config = EditorConfig {
            insert_tabs: false,
            ..EditorConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(EditorConfig::from_json(&json).unwrap(), config);
    }
}
