//! Journal rows

use super::IntegralError;
use serde::{Deserialize, Serialize};

/// One day of the journal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub date: String,
    /// Meaning density, 1–7
    pub meaning: f64,
    /// Alignment (purity of attention), 0–1
    pub alignment: f64,
    /// Friction (interruptions, doubt), 1–7
    pub friction: f64,
    /// Subjective flow, 1–7 (recorded, not used by the integral)
    pub flow: f64,
    /// Magnitude of action, 1–10
    pub action_volume: f64,
    /// What boundary was defined that day
    pub note: String,
}

impl JournalEntry {
    pub fn new(
        date: impl Into<String>,
        meaning: f64,
        alignment: f64,
        friction: f64,
        flow: f64,
        action_volume: f64,
        note: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            meaning,
            alignment,
            friction,
            flow,
            action_volume,
            note: note.into(),
        }
    }

    /// Check every field against its scale
    pub fn validate(&self, row: usize) -> Result<(), IntegralError> {
        let checks: [(&'static str, f64, f64, f64); 5] = [
            ("meaning", self.meaning, 1.0, 7.0),
            ("alignment", self.alignment, 0.0, 1.0),
            ("friction", self.friction, 1.0, 7.0),
            ("flow", self.flow, 1.0, 7.0),
            ("action_volume", self.action_volume, 1.0, 10.0),
        ];

        for (field, value, min, max) in checks {
            if !(min..=max).contains(&value) {
                return Err(IntegralError::OutOfRange {
                    row,
                    date: self.date.clone(),
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

/// Seven-day template journal
pub fn sample_journal() -> Vec<JournalEntry> {
    vec![
        JournalEntry::new("2023-10-01", 5.0, 0.6, 4.0, 3.0, 5.0, "Defined project scope"),
        JournalEntry::new("2023-10-02", 6.0, 0.8, 2.0, 5.0, 6.0, "Aligned with key stakeholder"),
        JournalEntry::new("2023-10-03", 4.0, 0.4, 5.0, 2.0, 4.0, "Friction due to unplanned mtg"),
        JournalEntry::new("2023-10-04", 7.0, 0.9, 1.0, 7.0, 8.0, "Deep work: Core algorithm"),
        JournalEntry::new("2023-10-05", 6.0, 0.8, 2.0, 6.0, 7.0, "Documentation & Cleanup"),
        JournalEntry::new("2023-10-06", 3.0, 0.3, 6.0, 2.0, 3.0, "Recovering from fatigue"),
        JournalEntry::new("2023-10-07", 7.0, 0.95, 1.0, 7.0, 9.0, "Full integration achieved"),
    ]
}
