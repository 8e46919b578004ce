/// Caption styles offered to the user
///
/// The set is fixed. A style is only a request parameter from the client's
/// point of view; the backend decides what it means.

/// A tone preset for caption generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    Casual,
    Professional,
    Funny,
    Inspirational,
    Minimalist,
    Poetic,
}

impl Style {
    /// All styles in display order
    pub const ALL: [Style; 6] = [
        Style::Casual,
        Style::Professional,
        Style::Funny,
        Style::Inspirational,
        Style::Minimalist,
        Style::Poetic,
    ];

    /// Identifier sent to the backend
    pub fn id(self) -> &'static str {
        match self {
            Style::Casual => "casual",
            Style::Professional => "professional",
            Style::Funny => "funny",
            Style::Inspirational => "inspirational",
            Style::Minimalist => "minimalist",
            Style::Poetic => "poetic",
        }
    }

    /// Button label
    pub fn name(self) -> &'static str {
        match self {
            Style::Casual => "Casual",
            Style::Professional => "Professional",
            Style::Funny => "Funny",
            Style::Inspirational => "Inspirational",
            Style::Minimalist => "Minimalist",
            Style::Poetic => "Poetic",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Style::Casual => {
                "Friendly, conversational captions that feel natural and relatable."
            }
            Style::Professional => {
                "Polished, business-appropriate captions for your professional content."
            }
            Style::Funny => "Humorous, witty captions to make your audience smile or laugh.",
            Style::Inspirational => {
                "Motivational captions to inspire and encourage your followers."
            }
            Style::Minimalist => "Short, simple captions that let your image do the talking.",
            Style::Poetic => {
                "Artistic, flowery language that adds a touch of poetry to your posts."
            }
        }
    }

    /// Look up a style by its identifier (exact, lowercase match)
    pub fn from_id(id: &str) -> Option<Style> {
        Style::ALL.into_iter().find(|style| style.id() == id)
    }
}

impl std::fmt::Display for Style {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Description for a raw style id
///
/// Ids outside the known set have no description, and the selector renders
/// nothing for them rather than guessing one.
pub fn describe(id: &str) -> Option<&'static str> {
    Style::from_id(id).map(Style::description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for style in Style::ALL {
            assert_eq!(Style::from_id(style.id()), Some(style));
        }
    }

    #[test]
    fn test_display_order_and_default() {
        let ids: Vec<&str> = Style::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(
            ids,
            ["casual", "professional", "funny", "inspirational", "minimalist", "poetic"]
        );
        assert_eq!(Style::default(), Style::Casual);
    }

    #[test]
    fn test_unknown_id_has_no_description() {
        assert_eq!(describe("gothic"), None);
        assert_eq!(describe("Casual"), None);
        assert_eq!(describe(""), None);
    }

    #[test]
    fn test_known_descriptions() {
        assert_eq!(
            describe("minimalist"),
            Some("Short, simple captions that let your image do the talking.")
        );
        assert_eq!(Style::Funny.to_string(), "Funny");
    }
}
