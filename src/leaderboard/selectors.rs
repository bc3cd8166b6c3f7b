//! CSS locators for the segment leaderboard pages.

use crate::model::FilterDimension;

/// Present once a listing page has rendered at least one result row.
pub const RESULTS_MARKER: &str = "#results table tbody tr";

/// Athlete name anchors, second cell of every result row.
pub const ATHLETE_LINKS: &str = "#results table tbody tr td:nth-child(2) a";

/// Tab that switches an activity page to its laps view.
pub const LAPS_TAB: &str = r#"li[data-tracking-element="laps"] a"#;

pub const LAPS_TABLE: &str = "#efforts-table";

/// Generic results table shown when an activity has no laps view.
pub const MAIN_TABLE: &str = "table.table.dense";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelectors {
    /// Button that opens the option list.
    pub menu: String,
    /// Container holding one anchor per option.
    pub options: String,
}

impl FilterSelectors {
    pub fn for_dimension(dimension: FilterDimension) -> Self {
        let id = match dimension {
            FilterDimension::Sex => "segment-leaderboard-filter-gender",
            FilterDimension::AgeGroup => "segment-leaderboard-filter-age_group",
            FilterDimension::WeightClass => "segment-leaderboard-filter-weight_class",
        };
        Self {
            menu: format!("#{} > button", id),
            options: format!("#{} > ul", id),
        }
    }

    pub fn option_links(&self) -> String {
        format!("{} a", self.options)
    }
}
