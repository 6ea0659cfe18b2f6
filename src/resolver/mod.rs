// Backend model resolution
//
// Either a fixed model id from configuration, or auto-discovery: filter the
// backend's model listing down to generation-capable entries, then pick the
// first one matching a configurable priority list of name markers. Ties
// within a marker fall back to listing order, which the backend does not
// guarantee to be stable.

use thiserror::Error;

use crate::gemini::ModelDescriptor;

/// Capability tag a model must carry to answer prompts.
pub const GENERATE_CONTENT: &str = "generateContent";

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no usable model: the backend offers no model supporting content generation")]
    NoUsableModel,
}

/// How the backend model is chosen, collapsed from the per-revision
/// copy-pasted variants into one configurable strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelStrategy {
    /// Use this id verbatim.
    Fixed(String),
    /// Discover from the backend listing, preferring the first marker in
    /// `priority` that matches any usable model name.
    Auto { priority: Vec<String> },
}

/// Default marker priority: fast tier first, then high capability.
pub fn default_priority() -> Vec<String> {
    vec!["flash".to_string(), "pro".to_string()]
}

/// Pick a model id from the backend listing.
pub fn resolve(
    candidates: &[ModelDescriptor],
    priority: &[String],
) -> Result<String, ResolveError> {
    let usable: Vec<&str> = candidates
        .iter()
        .filter(|m| m.supports(GENERATE_CONTENT))
        .map(|m| m.name.as_str())
        .collect();

    if usable.is_empty() {
        return Err(ResolveError::NoUsableModel);
    }

    for marker in priority {
        if let Some(name) = usable.iter().find(|name| name.contains(marker.as_str())) {
            return Ok(model_id(name).to_string());
        }
    }

    Ok(model_id(usable[0]).to_string())
}

/// The listing returns names as `models/<id>`; the generate endpoint
/// wants the bare id.
fn model_id(name: &str) -> &str {
    name.strip_prefix("models/").unwrap_or(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generation_model(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            supported_generation_methods: vec![GENERATE_CONTENT.to_string()],
        }
    }

    fn embedding_model(name: &str) -> ModelDescriptor {
        ModelDescriptor {
            name: name.to_string(),
            supported_generation_methods: vec!["embedContent".to_string()],
        }
    }

    #[test]
    fn test_fast_tier_marker_wins_regardless_of_position() {
        let candidates = vec![
            generation_model("modelA-pro"),
            generation_model("modelB-flash"),
            generation_model("modelC"),
        ];
        let resolved = resolve(&candidates, &default_priority()).unwrap();
        assert_eq!(resolved, "modelB-flash");
    }

    #[test]
    fn test_high_capability_marker_is_second_choice() {
        let candidates = vec![generation_model("modelA-pro"), generation_model("modelC")];
        let resolved = resolve(&candidates, &default_priority()).unwrap();
        assert_eq!(resolved, "modelA-pro");
    }

    #[test]
    fn test_first_listed_when_no_marker_matches() {
        let candidates = vec![generation_model("modelC"), generation_model("modelD")];
        let resolved = resolve(&candidates, &default_priority()).unwrap();
        assert_eq!(resolved, "modelC");
    }

    #[test]
    fn test_empty_filtered_list_is_no_usable_model() {
        let candidates = vec![embedding_model("embedder-001")];
        assert!(matches!(
            resolve(&candidates, &default_priority()),
            Err(ResolveError::NoUsableModel)
        ));

        assert!(matches!(
            resolve(&[], &default_priority()),
            Err(ResolveError::NoUsableModel)
        ));
    }

    #[test]
    fn test_listing_prefix_is_stripped() {
        let candidates = vec![generation_model("models/gemini-flash-latest")];
        let resolved = resolve(&candidates, &default_priority()).unwrap();
        assert_eq!(resolved, "gemini-flash-latest");
    }

    #[test]
    fn test_custom_priority_order() {
        let candidates = vec![
            generation_model("modelA-pro"),
            generation_model("modelB-flash"),
        ];
        let priority = vec!["pro".to_string(), "flash".to_string()];
        assert_eq!(resolve(&candidates, &priority).unwrap(), "modelA-pro");
    }
}
