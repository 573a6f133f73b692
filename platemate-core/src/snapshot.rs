//! Versioned recipe snapshots.
//!
//! Favorites and meal-plan records embed a full copy of the recipe as an
//! opaque JSON string. Snapshots carry a schema version so records written by
//! a newer build are rejected rather than misread. Unversioned documents (a
//! bare recipe object) are read as version 0.

use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;
use crate::types::Recipe;

pub const SNAPSHOT_VERSION: u32 = 1;

#[derive(Serialize)]
struct SnapshotOut<'a> {
    version: u32,
    recipe: &'a Recipe,
}

#[derive(Deserialize)]
struct SnapshotIn {
    recipe: Recipe,
}

pub fn encode_recipe(recipe: &Recipe) -> Result<String, SnapshotError> {
    serde_json::to_string(&SnapshotOut {
        version: SNAPSHOT_VERSION,
        recipe,
    })
    .map_err(|e| SnapshotError::Encode(e.to_string()))
}

pub fn decode_recipe(snapshot: &str) -> Result<Recipe, SnapshotError> {
    let value: serde_json::Value =
        serde_json::from_str(snapshot).map_err(|e| SnapshotError::Decode(e.to_string()))?;

    let Some(version) = value.get("version") else {
        return serde_json::from_value(value).map_err(|e| SnapshotError::Decode(e.to_string()));
    };

    let found = version
        .as_u64()
        .and_then(|v| u32::try_from(v).ok())
        .ok_or_else(|| SnapshotError::Decode(format!("invalid snapshot version: {}", version)))?;
    if found > SNAPSHOT_VERSION {
        return Err(SnapshotError::UnsupportedVersion {
            found,
            supported: SNAPSHOT_VERSION,
        });
    }

    let snapshot: SnapshotIn =
        serde_json::from_value(value).map_err(|e| SnapshotError::Decode(e.to_string()))?;
    Ok(snapshot.recipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_recipes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sample() -> Recipe {
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        generate_recipes(&["chicken", "broccoli", "rice"], &[], 1, &mut rng)
            .pop()
            .unwrap()
    }

    #[test]
    fn test_round_trip() {
        let recipe = sample();
        let encoded = encode_recipe(&recipe).unwrap();
        assert!(encoded.starts_with("{\"version\":1,"));
        assert_eq!(decode_recipe(&encoded).unwrap(), recipe);
    }

    #[test]
    fn test_unversioned_recipe_accepted() {
        let recipe = sample();
        let bare = serde_json::to_string(&recipe).unwrap();
        assert_eq!(decode_recipe(&bare).unwrap(), recipe);
    }

    #[test]
    fn test_newer_version_rejected() {
        let recipe = sample();
        let doc = serde_json::json!({ "version": 2, "recipe": recipe }).to_string();
        match decode_recipe(&doc) {
            Err(SnapshotError::UnsupportedVersion { found, supported }) => {
                assert_eq!(found, 2);
                assert_eq!(supported, SNAPSHOT_VERSION);
            }
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(decode_recipe("not json"), Err(SnapshotError::Decode(_))));
        assert!(matches!(
            decode_recipe(r#"{"version":"one"}"#),
            Err(SnapshotError::Decode(_))
        ));
        assert!(matches!(
            decode_recipe(r#"{"version":1,"recipe":{"title":"x"}}"#),
            Err(SnapshotError::Decode(_))
        ));
    }
}
