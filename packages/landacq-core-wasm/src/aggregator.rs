use crate::models::{ChartSlice, ParcelFeature};
use crate::status_labels::StatusLabelTable;

/// Per-status counts; index `i` holds the count for status code `i + 1`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedCounts {
    counts: Vec<usize>,
}

impl AggregatedCounts {
    pub fn as_slice(&self) -> &[usize] {
        &self.counts
    }

    pub fn get(&self, code: u32) -> usize {
        if code == 0 {
            return 0;
        }
        self.counts.get(code as usize - 1).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Share of the counted total per status, 0 to 100. All zero for an empty total.
    pub fn percentages(&self) -> Vec<f64> {
        let total = self.total();
        self.counts
            .iter()
            .map(|&c| {
                if total == 0 {
                    0.0
                } else {
                    c as f64 * 100.0 / total as f64
                }
            })
            .collect()
    }

    /// Chart dataset: one slice per label, including zero-count slices.
    pub fn to_chart_slices(&self, labels: &StatusLabelTable) -> Vec<ChartSlice> {
        labels
            .iter()
            .zip(self.counts.iter().zip(self.percentages()))
            .enumerate()
            .map(|(idx, (label, (&value, percent)))| ChartSlice {
                category: label.label.clone(),
                value,
                color: label.color.clone(),
                status_code: idx as u32 + 1,
                percent,
                legend_text: format!("{:.0}% ({})", percent, value),
            })
            .collect()
    }
}

/// Count features per status code.
///
/// Features without a status, or with a code the label table does not cover,
/// are skipped.
pub fn aggregate<'a, I>(features: I, labels: &StatusLabelTable) -> AggregatedCounts
where
    I: IntoIterator<Item = &'a ParcelFeature>,
{
    let mut counts = vec![0usize; labels.len()];
    for feature in features {
        if let Some(code) = feature.status_code {
            if let Some(slot) = (code as usize).checked_sub(1).and_then(|i| counts.get_mut(i)) {
                *slot += 1;
            }
        }
    }
    AggregatedCounts { counts }
}
