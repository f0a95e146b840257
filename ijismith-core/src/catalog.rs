//! The fixed catalog of models offered in the selection menu.

/// A display name mapped to a provider-qualified OpenRouter model id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub id: &'static str,
}

/// Model used when no preference has been saved.
pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";

pub const MODEL_CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "GPT-4.1 Mini",
        id: DEFAULT_MODEL,
    },
    CatalogEntry {
        name: "DeepSeek Chat V3.1 (Free)",
        id: "deepseek/deepseek-chat-v3.1:free",
    },
    CatalogEntry {
        name: "Llama 4 Maverick (Free)",
        id: "meta-llama/llama-4-maverick:free",
    },
    CatalogEntry {
        name: "Gemini 2.5 Flash Lite",
        id: "google/gemini-2.5-flash-lite",
    },
];

/// Position of a model id in the catalog, if it is listed.
pub fn position_of(id: &str) -> Option<usize> {
    MODEL_CATALOG.iter().position(|entry| entry.id == id)
}

/// Display name for a model id, falling back to the id itself.
pub fn display_name(id: &str) -> &str {
    MODEL_CATALOG
        .iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.name)
        .unwrap_or(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_listed_first() {
        assert_eq!(position_of(DEFAULT_MODEL), Some(0));
    }

    #[test]
    fn test_ids_are_unique() {
        for (i, entry) in MODEL_CATALOG.iter().enumerate() {
            assert_eq!(position_of(entry.id), Some(i));
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("google/gemini-2.5-flash-lite"), "Gemini 2.5 Flash Lite");
        assert_eq!(display_name("someone/unlisted"), "someone/unlisted");
    }
}
