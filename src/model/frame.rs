//! Minimal column-labelled table used to combine the collected datasets.
//!
//! Cells are optional so that outer unions and left joins can leave gaps. Column
//! names are not required to be unique, mirroring what the source pages allow.

use crate::error::ParseError;
use crate::model::types::{FilterSet, LapTable, ATHLETE_COLUMN, FILTER_JOIN_KEY};
use std::collections::HashMap;

pub type Cell = Option<String>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Frame {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Appends a row, padding missing trailing cells with nulls.
    pub fn push_row(&mut self, mut row: Vec<Cell>) {
        row.resize(self.columns.len(), None);
        self.rows.push(row);
    }

    /// Builds the main-table rows of one athlete, prefixed with the athlete column.
    ///
    /// Rows shorter than the header are padded with nulls.
    pub fn from_athlete_table(athlete: &str, table: &LapTable) -> Self {
        let mut columns = Vec::with_capacity(table.headers.len() + 1);
        columns.push(ATHLETE_COLUMN.to_string());
        columns.extend(table.headers.iter().cloned());

        let mut frame = Frame::new(columns);
        for row in &table.rows {
            let mut cells = Vec::with_capacity(row.len() + 1);
            cells.push(Some(athlete.to_string()));
            cells.extend(row.iter().cloned().map(Some));
            frame.push_row(cells);
        }
        frame
    }

    /// Two-column frame `[<dimension column>, nome_atleta]`, present even when empty.
    pub fn from_filter_set(set: &FilterSet) -> Self {
        let mut frame = Frame::new(vec![
            set.dimension.column().to_string(),
            FILTER_JOIN_KEY.to_string(),
        ]);
        for record in &set.records {
            frame.push_row(vec![
                Some(record.value.clone()),
                Some(record.athlete_name.clone()),
            ]);
        }
        frame
    }

    /// Stacks frames vertically over the union of their columns, in first-seen order.
    ///
    /// Repeated names are matched by occurrence: the second `X` of a frame lands in the
    /// second `X` of the union, so duplicate headers keep their own values.
    pub fn concat(frames: impl IntoIterator<Item = Frame>) -> Self {
        let frames: Vec<Frame> = frames.into_iter().collect();

        let mut columns: Vec<(String, usize)> = Vec::new();
        for frame in &frames {
            for key in occurrence_keys(&frame.columns) {
                if !columns.contains(&key) {
                    columns.push(key);
                }
            }
        }

        let mut result = Frame::new(columns.iter().map(|(name, _)| name.clone()).collect());
        for frame in frames {
            let positions: Vec<usize> = occurrence_keys(&frame.columns)
                .iter()
                .filter_map(|key| columns.iter().position(|c| c == key))
                .collect();
            for row in frame.rows {
                let mut cells: Vec<Cell> = vec![None; result.columns.len()];
                for (cell, &position) in row.into_iter().zip(&positions) {
                    cells[position] = cell;
                }
                result.rows.push(cells);
            }
        }
        result
    }

    /// Left outer join on `self[left_on] == right[right_on]`.
    ///
    /// Every left row is kept. A left row matching several right rows is repeated once
    /// per match, in right-row order. Column names present on both sides get `_x`
    /// (left) and `_y` (right) suffixes.
    pub fn left_join(&self, right: &Frame, left_on: &str, right_on: &str) -> Result<Frame, ParseError> {
        let left_key = self.column_index(left_on).ok_or_else(|| {
            ParseError::UnexpectedStructure(format!("left frame has no column '{}'", left_on))
        })?;
        let right_key = right.column_index(right_on).ok_or_else(|| {
            ParseError::UnexpectedStructure(format!("right frame has no column '{}'", right_on))
        })?;

        let mut columns: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                if right.columns.contains(c) {
                    format!("{}_x", c)
                } else {
                    c.clone()
                }
            })
            .collect();
        columns.extend(right.columns.iter().map(|c| {
            if self.columns.contains(c) {
                format!("{}_y", c)
            } else {
                c.clone()
            }
        }));

        let mut index: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, row) in right.rows.iter().enumerate() {
            if let Some(key) = row[right_key].as_deref() {
                index.entry(key).or_default().push(i);
            }
        }

        let mut result = Frame::new(columns);
        for row in &self.rows {
            let matches = row[left_key]
                .as_deref()
                .and_then(|key| index.get(key))
                .map(Vec::as_slice)
                .unwrap_or_default();

            if matches.is_empty() {
                result.push_row(row.clone());
                continue;
            }
            for &i in matches {
                let mut cells = row.clone();
                cells.extend(right.rows[i].iter().cloned());
                result.push_row(cells);
            }
        }
        Ok(result)
    }

    /// Removes every column whose name starts with `prefix`.
    pub fn drop_columns_with_prefix(&mut self, prefix: &str) {
        let keep: Vec<bool> = self.columns.iter().map(|c| !c.starts_with(prefix)).collect();
        if keep.iter().all(|&k| k) {
            return;
        }

        self.columns = self
            .columns
            .drain(..)
            .zip(&keep)
            .filter_map(|(c, &k)| k.then_some(c))
            .collect();
        for row in &mut self.rows {
            *row = row
                .drain(..)
                .zip(&keep)
                .filter_map(|(cell, &k)| k.then_some(cell))
                .collect();
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Values of the first column called `name`.
    #[cfg(test)]
    pub fn column_values(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[index].as_deref()).collect())
    }

    /// Renders the header and the first `n` rows as tab separated lines.
    pub fn preview(&self, n: usize) -> String {
        let mut lines = vec![self.columns.join("\t")];
        for row in self.rows.iter().take(n) {
            let cells: Vec<&str> = row.iter().map(|c| c.as_deref().unwrap_or("")).collect();
            lines.push(cells.join("\t"));
        }
        lines.join("\n")
    }
}

/// Pairs each column name with how many times it appeared before.
fn occurrence_keys(columns: &[String]) -> Vec<(String, usize)> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    columns
        .iter()
        .map(|name| {
            let count = seen.entry(name.as_str()).or_default();
            let key = (name.clone(), *count);
            *count += 1;
            key
        })
        .collect()
}
