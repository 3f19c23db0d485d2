//! Technique catalog loader.

use std::path::Path;

use combat_core::TechniqueDefinition;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Technique file structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechniqueFile {
    pub techniques: Vec<TechniqueDefinition>,
}

/// Loader for technique definitions from RON files.
pub struct TechniqueLoader;

impl TechniqueLoader {
    /// Load technique definitions from a RON file containing a `TechniqueFile`.
    pub fn load(path: &Path) -> LoadResult<Vec<TechniqueDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse technique definitions from RON text.
    pub fn parse(content: &str) -> LoadResult<Vec<TechniqueDefinition>> {
        let file: TechniqueFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse technique catalog RON: {}", e))?;
        Ok(file.techniques)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_core::EffectPayload;
    use combat_core::env::{EffectTarget, TechniqueKind};

    #[test]
    fn parses_payloads_and_defaults() {
        let techniques = TechniqueLoader::parse(
            r#"(
                techniques: [
                    (
                        id: "venom_needle",
                        kind: Offense,
                        cooldown: 4.0,
                        power: 30.0,
                        accuracy: Some(90.0),
                        effects: [
                            ApplyStatus((status: "poison", duration: 6.0, power: Some(25.0))),
                            Shield(value: 5),
                        ],
                    ),
                    (id: "meditate", kind: Support, effects: [RestoreQi(value: 15.0)]),
                ],
            )"#,
        )
        .unwrap();

        assert_eq!(techniques.len(), 2);
        let needle = &techniques[0];
        assert_eq!(needle.kind, TechniqueKind::Offense);
        assert_eq!(needle.qi_cost_base, 0.0);
        match &needle.effects[0] {
            EffectPayload::ApplyStatus(application) => {
                assert_eq!(application.target, EffectTarget::Target);
                assert_eq!(application.power, Some(25.0));
            }
            other => panic!("unexpected payload {other:?}"),
        }
        assert_eq!(techniques[1].accuracy(), 100.0);
    }

    #[test]
    fn reports_parse_errors() {
        let error = TechniqueLoader::parse("(techniques: [(kind: Offense)])").unwrap_err();
        assert!(error.to_string().contains("technique catalog"));
    }
}
