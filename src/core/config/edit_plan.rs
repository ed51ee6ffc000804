//! Edit plans
//!
//! An edit plan lists the accent builds, glyph scales, and Unicode mappings
//! to apply to a font. The built-in plan is the Selectric plan; a different
//! plan can be loaded from a JSON file:
//!
//! ```json
//! {
//!   "accents": [
//!     {"target": "eacute", "base": "e", "accent": "quoteright", "gap": 35,
//!      "transform": {"rotate_deg": -40}}
//!   ],
//!   "scales": [{"glyph": "numbersign", "factor": 0.92}],
//!   "mappings": [{"codepoint": 233, "glyph": "eacute"}]
//! }
//! ```

use crate::editing::{AccentRecipe, AccentTransform};
use crate::geometry::Quadrant;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Uniform scale of an existing glyph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScaleSpec {
    pub glyph: String,
    pub factor: f64,
}

/// One codepoint → glyph name entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MappingSpec {
    pub codepoint: u32,
    pub glyph: String,
}

/// Everything one run does to a font, applied in field order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditPlan {
    #[serde(default)]
    pub accents: Vec<AccentRecipe>,
    #[serde(default)]
    pub scales: Vec<ScaleSpec>,
    #[serde(default)]
    pub mappings: Vec<MappingSpec>,
}

impl Default for EditPlan {
    fn default() -> Self {
        Self::selectric()
    }
}

impl EditPlan {
    /// The accents and fixes the IBM Selectric font needs
    pub fn selectric() -> Self {
        let acute = AccentTransform {
            rotate_deg: -40.0,
            ..Default::default()
        };
        let grave = AccentTransform {
            rotate_deg: 60.0,
            x_shift: 100,
            rotate_origin: Quadrant::BottomRight.into(),
            ..Default::default()
        };

        Self {
            accents: vec![
                AccentRecipe::new("eacute", "e", "quoteright", 35).with_transform(acute),
                AccentRecipe::new("Eacute", "E", "quoteright", 45).with_transform(acute),
                AccentRecipe::new("agrave", "a", "quoteleft", 30).with_transform(AccentTransform {
                    y_shift: -5,
                    ..grave
                }),
                AccentRecipe::new("Agrave", "A", "quoteleft", 10).with_transform(AccentTransform {
                    scale: 0.85,
                    y_shift: -15,
                    ..grave
                }),
            ],
            scales: vec![ScaleSpec {
                glyph: "numbersign".to_string(),
                factor: 0.92,
            }],
            mappings: [
                (0x00E9, "eacute"),
                (0x00C9, "Eacute"),
                (0x00E0, "agrave"),
                (0x00C0, "Agrave"),
                (0x0023, "numbersign"),
            ]
            .into_iter()
            .map(|(codepoint, glyph)| MappingSpec {
                codepoint,
                glyph: glyph.to_string(),
            })
            .collect(),
        }
    }

    /// Parse and validate a JSON plan
    pub fn from_json(json: &str) -> Result<Self> {
        let plan: EditPlan = serde_json::from_str(json).context("Invalid edit plan")?;
        plan.validate().map_err(anyhow::Error::msg)?;
        Ok(plan)
    }

    /// Load a plan file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read edit plan {}", path.display()))?;
        let plan = Self::from_json(&contents)
            .with_context(|| format!("Failed to load edit plan {}", path.display()))?;
        debug!("Loaded edit plan from {:?}", path);
        Ok(plan)
    }

    /// Check the numbers a JSON plan could get wrong
    pub fn validate(&self) -> Result<(), String> {
        for recipe in &self.accents {
            let transform = &recipe.transform;
            if !(transform.scale.is_finite() && transform.scale > 0.0) {
                return Err(format!(
                    "Accent '{}': scale must be a positive number, got {}",
                    recipe.target, transform.scale
                ));
            }
            if !transform.rotate_deg.is_finite() {
                return Err(format!(
                    "Accent '{}': rotate_deg must be finite",
                    recipe.target
                ));
            }
        }
        for scale in &self.scales {
            if !(scale.factor.is_finite() && scale.factor > 0.0) {
                return Err(format!(
                    "Scale of '{}': factor must be a positive number, got {}",
                    scale.glyph, scale.factor
                ));
            }
        }
        for mapping in &self.mappings {
            if char::from_u32(mapping.codepoint).is_none() {
                return Err(format!(
                    "Mapping for '{}': U+{:04X} is not a Unicode scalar value",
                    mapping.glyph, mapping.codepoint
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RotateOrigin;

    #[test]
    fn selectric_plan_contents() {
        let plan = EditPlan::selectric();
        let targets: Vec<_> = plan.accents.iter().map(|a| a.target.as_str()).collect();
        assert_eq!(targets, ["eacute", "Eacute", "agrave", "Agrave"]);

        let agrave = &plan.accents[2];
        assert_eq!(agrave.base, "a");
        assert_eq!(agrave.accent, "quoteleft");
        assert_eq!(agrave.gap, 30);
        assert_eq!(agrave.transform.rotate_deg, 60.0);
        assert_eq!(agrave.transform.scale, 1.0);
        assert_eq!((agrave.transform.x_shift, agrave.transform.y_shift), (100, -5));
        assert_eq!(
            agrave.transform.rotate_origin,
            RotateOrigin::Quadrant(Quadrant::BottomRight)
        );

        let agrave_cap = &plan.accents[3];
        assert_eq!(agrave_cap.transform.scale, 0.85);
        assert_eq!(agrave_cap.transform.y_shift, -15);
        assert_eq!(plan.accents[1].gap, 45);
        assert_eq!(plan.accents[1].transform.rotate_origin, RotateOrigin::default());

        assert_eq!(plan.scales[0].factor, 0.92);
        assert_eq!(plan.mappings.len(), 5);
        assert_eq!(plan.mappings[4].codepoint, 0x23);
        assert!(plan.validate().is_ok());
    }

    #[test]
    fn plan_json_roundtrip() {
        let plan = EditPlan::selectric();
        let json = serde_json::to_string_pretty(&plan).unwrap();
        assert_eq!(EditPlan::from_json(&json).unwrap(), plan);
    }

    #[test]
    fn partial_plans_default_to_empty_lists() {
        let plan = EditPlan::from_json(r#"{"mappings": [{"codepoint": 233, "glyph": "eacute"}]}"#)
            .unwrap();
        assert!(plan.accents.is_empty());
        assert!(plan.scales.is_empty());
        assert_eq!(plan.mappings[0].glyph, "eacute");
    }

    #[test]
    fn bad_plans_are_rejected() {
        assert!(EditPlan::from_json(r#"{"accent": []}"#).is_err());
        assert!(EditPlan::from_json(r#"{"scales": [{"glyph": "x", "factor": 0}]}"#).is_err());
        assert!(
            EditPlan::from_json(r#"{"mappings": [{"codepoint": 55296, "glyph": "x"}]}"#).is_err()
        );
        assert!(EditPlan::from_json("not json").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        fs::write(&path, r#"{"scales": [{"glyph": "numbersign", "factor": 0.5}]}"#).unwrap();
        let plan = EditPlan::load(&path).unwrap();
        assert_eq!(plan.scales[0].factor, 0.5);

        let error = EditPlan::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(format!("{error:#}").contains("missing.json"));
    }
}
