use std::fmt;

/// Name of the column that carries the athlete on every main-table row.
pub const ATHLETE_COLUMN: &str = "Nome Atleta";

/// Join key column contributed by every filter set; dropped after merging.
pub const FILTER_JOIN_KEY: &str = "nome_atleta";

/// An athlete as listed on a leaderboard page.
///
/// Both fields are copied out of the listing before any navigation happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AthleteRef {
    pub name: String,
    pub profile_link: String,
}

/// Per-athlete split table.
///
/// Rows are never wider than `headers`; shorter rows are padded with nulls once the
/// table becomes part of a [`Frame`](crate::model::Frame).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LapTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl LapTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Categorical grouping offered as a leaderboard filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterDimension {
    Sex,
    AgeGroup,
    WeightClass,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 3] = [
        FilterDimension::Sex,
        FilterDimension::AgeGroup,
        FilterDimension::WeightClass,
    ];

    /// Column name in the exported table.
    pub fn column(&self) -> &'static str {
        match self {
            FilterDimension::Sex => "sexo",
            FilterDimension::AgeGroup => "faixa_etaria",
            FilterDimension::WeightClass => "peso",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.column())
    }
}

/// One athlete listed under one filter option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRecord {
    /// Column the value lands in, e.g. `sexo`.
    pub category_label: String,
    /// Option text, e.g. `Mulheres`.
    pub value: String,
    pub athlete_name: String,
}

/// All records of one dimension. Empty when the dimension could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSet {
    pub dimension: FilterDimension,
    pub records: Vec<FilterRecord>,
}

impl FilterSet {
    pub fn empty(dimension: FilterDimension) -> Self {
        Self {
            dimension,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, value: impl Into<String>, athlete_name: impl Into<String>) {
        self.records.push(FilterRecord {
            category_label: self.dimension.column().to_string(),
            value: value.into(),
            athlete_name: athlete_name.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
