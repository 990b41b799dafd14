use serde::{Deserialize, Serialize};

/// Display name and fill color for one acquisition status code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusLabel {
    pub label: String,
    pub color: String, // Hex code
}

impl StatusLabel {
    pub fn new(label: &str, color: &str) -> Self {
        StatusLabel {
            label: label.to_string(),
            color: color.to_string(),
        }
    }
}

/// Ordered status table. Position `i` describes status code `i + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatusLabelTable {
    labels: Vec<StatusLabel>,
}

impl StatusLabelTable {
    pub fn new(labels: Vec<StatusLabel>) -> Self {
        StatusLabelTable { labels }
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StatusLabel> {
        self.labels.iter()
    }

    /// Look up a 1-based status code. Codes outside the table yield `None`.
    pub fn get(&self, code: u32) -> Option<&StatusLabel> {
        if code == 0 {
            return None;
        }
        self.labels.get(code as usize - 1)
    }

    pub fn color_for<'a>(&'a self, code: Option<u32>, fallback: &'a str) -> &'a str {
        code.and_then(|c| self.get(c))
            .map(|l| l.color.as_str())
            .unwrap_or(fallback)
    }

    /// Resolve a chart category (slice or legend text) back to its status code.
    pub fn code_for_category(&self, category: &str) -> Option<u32> {
        let category = category.trim();
        self.labels
            .iter()
            .position(|l| l.label == category)
            .map(|idx| idx as u32 + 1)
    }
}

impl Default for StatusLabelTable {
    fn default() -> Self {
        StatusLabelTable::new(vec![
            StatusLabel::new("Paid", "#00734d"),
            StatusLabel::new("For Payment Processing", "#0070ff"),
            StatusLabel::new("For Legal Pass", "#ffff00"),
            StatusLabel::new("For Offer to Buy", "#ffaa00"),
            StatusLabel::new("For Notice of Taking", "#ff5733"),
            StatusLabel::new("With PTE", "#70ad47"),
            StatusLabel::new("For Expropriation", "#ff0000"),
        ])
    }
}
