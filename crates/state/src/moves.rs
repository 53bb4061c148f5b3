use bdr_core::PlayerIdx;

/// Advisory classification of a strategic move.
///
/// Used for scoring hints and UI grouping only; the search engine never
/// branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize)]
pub enum Category {
    Pricing,
    Product,
    Marketing,
    Acquisition,
    Partnership,
    Technology,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Pricing,
        Category::Product,
        Category::Marketing,
        Category::Acquisition,
        Category::Partnership,
        Category::Technology,
        Category::Other,
    ];
    pub fn label(&self) -> &'static str {
        match self {
            Category::Pricing => "Pricing",
            Category::Product => "Product",
            Category::Marketing => "Marketing",
            Category::Acquisition => "Acquisition",
            Category::Partnership => "Partnership",
            Category::Technology => "Technology",
            Category::Other => "Other",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl From<&str> for Category {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "pricing" => Category::Pricing,
            "product" => Category::Product,
            "marketing" => Category::Marketing,
            "acquisition" => Category::Acquisition,
            "partnership" => Category::Partnership,
            "technology" => Category::Technology,
            _ => Category::Other,
        }
    }
}

/// A strategic action proposed for one player.
///
/// `label` is the human-readable identity of the move and must be non-empty;
/// `rationale` is optional advisory text carried through for the UI.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Move {
    pub label: String,
    pub category: Category,
    pub acting_player: PlayerIdx,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

impl Move {
    pub fn new(label: impl Into<String>, category: Category, acting_player: PlayerIdx) -> Self {
        Self {
            label: label.into(),
            category,
            acting_player,
            rationale: None,
        }
    }
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = Some(rationale.into());
        self
    }
    /// True when the label carries actual content.
    pub fn is_labeled(&self) -> bool {
        !self.label.trim().is_empty()
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.category, self.label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn category_from_str_is_case_insensitive() {
        assert_eq!(Category::from("pricing"), Category::Pricing);
        assert_eq!(Category::from("Partnership"), Category::Partnership);
        assert_eq!(Category::from("unheard of"), Category::Other);
    }
    #[test]
    fn blank_labels_are_rejected() {
        assert!(Move::new("Raise prices", Category::Pricing, 0).is_labeled());
        assert!(!Move::new("   ", Category::Pricing, 0).is_labeled());
    }
}
