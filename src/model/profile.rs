use std::path::Path;

use serde::Deserialize;

use crate::families::defs::CARBAPENEMASE_FAMILIES;
use crate::input::InputError;

/// Total expected family observations across the reference set. Dataset
/// constant; it is not derived from the tables.
pub const DEFAULT_CONCORDANCE_DENOMINATOR: u32 = 33;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictionLayout {
    pub sample_column: String,
    pub best_hit_column: String,
    pub identity_index: usize,
    pub coverage_index: usize,
    pub depth_index: usize,
}

impl Default for PredictionLayout {
    fn default() -> Self {
        Self {
            sample_column: "Sample".to_string(),
            best_hit_column: "Best_hit".to_string(),
            identity_index: 15,
            coverage_index: 16,
            depth_index: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReferenceLayout {
    pub strain_column: String,
    pub microarray_index: usize,
    pub phenotype_index: usize,
}

impl Default for ReferenceLayout {
    fn default() -> Self {
        Self {
            strain_column: "Strain_ID".to_string(),
            microarray_index: 3,
            phenotype_index: 12,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BenchmarkProfile {
    pub carbapenemase_families: Vec<String>,
    pub concordance_denominator: u32,
    pub predictions: PredictionLayout,
    pub reference: ReferenceLayout,
}

impl Default for BenchmarkProfile {
    fn default() -> Self {
        Self::default_v1()
    }
}

impl BenchmarkProfile {
    pub fn default_v1() -> Self {
        Self {
            carbapenemase_families: CARBAPENEMASE_FAMILIES
                .iter()
                .map(|f| f.to_string())
                .collect(),
            concordance_denominator: DEFAULT_CONCORDANCE_DENOMINATOR,
            predictions: PredictionLayout::default(),
            reference: ReferenceLayout::default(),
        }
    }

    pub fn from_json_str(text: &str) -> Result<Self, InputError> {
        let profile: Self = serde_json::from_str(text)
            .map_err(|e| InputError::Parse(format!("invalid profile: {e}")))?;
        if profile.carbapenemase_families.iter().any(|f| f.is_empty()) {
            return Err(InputError::Parse(
                "invalid profile: empty carbapenemase family".to_string(),
            ));
        }
        Ok(profile)
    }

    pub fn load(path: &Path) -> Result<Self, InputError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/profile.rs"]
mod tests;
