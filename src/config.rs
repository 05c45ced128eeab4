//! Processing configuration: the ordered filter list and the two sort keys.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::{ColumnRef, FilterRule, SortKey};
use crate::error::ConfigError;

// Columns of the municipal event agenda export.
const TITLE: usize = 1; // B  TITULO
const FREE: usize = 3; // D  GRATUITO
const WEEKDAYS: usize = 5; // F  DIAS-SEMANA
const DISTRICT: usize = 21; // V  DISTRITO-INSTALACION
const KIND: usize = 23; // X  TIPO
const AUDIENCE: usize = 24; // Y  AUDIENCIA

/// Everything one processing run needs besides the table itself.
///
/// `filters` is applied in order; a row removed by an earlier rule is never
/// seen by a later one, so reordering the list can change the result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessConfig {
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
    pub filters: Vec<FilterRule>,
    pub primary: SortKey,
    pub secondary: SortKey,
}

fn default_sheet_name() -> String {
    "INCOMING".to_string()
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for ProcessConfig {
    fn default() -> Self {
        ProcessConfig {
            sheet_name: default_sheet_name(),
            filters: vec![
                FilterRule::ExcludeSubstring {
                    column: ColumnRef::from_index(TITLE),
                    substrings: strings(&["infantil", "mujer", "deport", "centros de mayores"]),
                    case_sensitive: false,
                },
                FilterRule::RequireAnySubstring {
                    column: ColumnRef::from_index(WEEKDAYS),
                    substrings: strings(&["V", "S", "D"]),
                },
                FilterRule::ExcludeExactValue {
                    column: ColumnRef::from_index(FREE),
                    values: strings(&["1"]),
                },
                FilterRule::ExcludeSubstring {
                    column: ColumnRef::from_index(KIND),
                    substrings: strings(&["Flamenco", "CuentacuentosTiteresMarionetas"]),
                    case_sensitive: true,
                },
                FilterRule::ExcludeSubstring {
                    column: ColumnRef::from_index(AUDIENCE),
                    substrings: strings(&["Niños", "Familias", "Mayores"]),
                    case_sensitive: true,
                },
                FilterRule::ExcludeExactValue {
                    column: ColumnRef::from_index(DISTRICT),
                    values: strings(&["USERA", "VILLAVERDE"]),
                },
            ],
            primary: SortKey::new(
                ColumnRef::from_index(KIND),
                "ProgramacionDestacadaAgendaCultura",
            ),
            secondary: SortKey::new(ColumnRef::from_index(WEEKDAYS), "V"),
        }
    }
}

impl ProcessConfig {
    /// Parse a JSON config. Column letters are validated here, so a bad
    /// letter fails before any row is touched.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
