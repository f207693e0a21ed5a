//! Column selection and tabular recordings.

use std::io::{self, Write};

use cool_network::Network;
use serde::{Deserialize, Serialize};

use crate::error::SimResult;

/// Selects every readable path of the network.
pub const ALL: &str = "*";

/// Name of the time column in transient recordings.
pub const TIME: &str = "time";

/// Paths to record. `"*"` expands to every readable path in declaration
/// order; in config files a bare `"*"` and a list are both accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SelectionRepr", into = "SelectionRepr")]
pub struct Selection(Vec<String>);

#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SelectionRepr {
    One(String),
    Many(Vec<String>),
}

impl From<SelectionRepr> for Selection {
    fn from(r: SelectionRepr) -> Self {
        match r {
            SelectionRepr::One(p) => Selection(vec![p]),
            SelectionRepr::Many(ps) => Selection(ps),
        }
    }
}

impl From<Selection> for SelectionRepr {
    fn from(s: Selection) -> Self {
        match s.0.as_slice() {
            [one] if one == ALL => SelectionRepr::One(one.clone()),
            _ => SelectionRepr::Many(s.0),
        }
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::all()
    }
}

impl Selection {
    pub fn all() -> Self {
        Selection(vec![ALL.to_string()])
    }

    pub fn paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Selection(paths.into_iter().map(Into::into).collect())
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    /// Concrete column list for `net`: wildcards expanded, duplicates
    /// dropped, every path checked for readability.
    pub fn resolve(&self, net: &Network) -> SimResult<Vec<String>> {
        let mut out: Vec<String> = Vec::new();
        for entry in &self.0 {
            let expanded = if entry == ALL {
                net.paths()
            } else {
                net.get(entry)?;
                vec![entry.clone()]
            };
            for path in expanded {
                if !out.contains(&path) {
                    out.push(path);
                }
            }
        }
        Ok(out)
    }
}

/// Accumulates rows of network values behind a leading key column
/// (`time` for transients, the swept path for sweeps).
#[derive(Debug, Clone)]
pub struct Recorder {
    key: String,
    paths: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Recorder {
    pub fn new(net: &Network, selection: &Selection, key: impl Into<String>) -> SimResult<Self> {
        let key = key.into();
        let mut paths = selection.resolve(net)?;
        paths.retain(|p| *p != key);
        Ok(Self {
            key,
            paths,
            rows: Vec::new(),
        })
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Read the current network values, without the key.
    pub fn sample(&self, net: &Network) -> SimResult<Vec<f64>> {
        self.paths
            .iter()
            .map(|p| net.get(p).map_err(Into::into))
            .collect()
    }

    /// Append `key` followed by the current network values.
    pub fn record(&mut self, net: &Network, key: f64) -> SimResult<()> {
        let mut row = Vec::with_capacity(self.paths.len() + 1);
        row.push(key);
        row.extend(self.sample(net)?);
        self.rows.push(row);
        Ok(())
    }

    /// Append a row already laid out as `[key, values...]`.
    pub(crate) fn push_row(&mut self, row: Vec<f64>) {
        self.rows.push(row);
    }

    pub fn finish(self) -> Recording {
        let mut columns = Vec::with_capacity(self.paths.len() + 1);
        columns.push(self.key);
        columns.extend(self.paths);
        Recording {
            columns,
            rows: self.rows,
        }
    }
}

/// A finished table: one header, one row per record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<f64>>,
}

impl Recording {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All values of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<Vec<f64>> {
        let i = self.column_index(name)?;
        Some(self.rows.iter().map(|r| r[i]).collect())
    }

    pub fn value(&self, row: usize, name: &str) -> Option<f64> {
        let i = self.column_index(name)?;
        self.rows.get(row).map(|r| r[i])
    }

    /// Comma-separated, one header line. Values use the shortest
    /// representation that parses back to the same `f64`.
    pub fn write_csv<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{}", self.columns.join(","))?;
        for row in &self.rows {
            let line: Vec<String> = row.iter().map(f64::to_string).collect();
            writeln!(w, "{}", line.join(","))?;
        }
        Ok(())
    }
}
