//! Piecewise-linear boundary schedules.

use std::collections::BTreeMap;

use cool_network::BoundaryInputs;
use serde::{Deserialize, Serialize};

use crate::error::{SimError, SimResult};

/// A `[time, value]` table interpolated linearly between points and held
/// constant outside the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<[f64; 2]>", into = "Vec<[f64; 2]>")]
pub struct Schedule {
    points: Vec<[f64; 2]>,
}

impl Schedule {
    /// Times must be finite and strictly increasing; the table must not be
    /// empty.
    pub fn new(points: Vec<[f64; 2]>) -> Result<Self, &'static str> {
        if points.is_empty() {
            return Err("schedule has no points");
        }
        if points.iter().flatten().any(|v| !v.is_finite()) {
            return Err("schedule contains a non-finite entry");
        }
        if points.windows(2).any(|w| w[1][0] <= w[0][0]) {
            return Err("schedule times must be strictly increasing");
        }
        Ok(Self { points })
    }

    /// A schedule holding one value for all time.
    pub fn constant(value: f64) -> Self {
        Self {
            points: vec![[0.0, value]],
        }
    }

    pub fn points(&self) -> &[[f64; 2]] {
        &self.points
    }

    /// Value at time `t`. Knot times return the tabulated value exactly.
    pub fn at(&self, t: f64) -> f64 {
        let first = self.points[0];
        let last = self.points[self.points.len() - 1];
        if t <= first[0] {
            return first[1];
        }
        if t >= last[0] {
            return last[1];
        }
        // First knot strictly after t; 1..len by the checks above.
        let i = self.points.partition_point(|p| p[0] <= t);
        let [t0, v0] = self.points[i - 1];
        let [t1, v1] = self.points[i];
        v0 + (v1 - v0) * (t - t0) / (t1 - t0)
    }
}

impl TryFrom<Vec<[f64; 2]>> for Schedule {
    type Error = &'static str;

    fn try_from(points: Vec<[f64; 2]>) -> Result<Self, Self::Error> {
        Schedule::new(points)
    }
}

impl From<Schedule> for Vec<[f64; 2]> {
    fn from(s: Schedule) -> Self {
        s.points
    }
}

/// Named schedules keyed by boundary path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedules(BTreeMap<String, Schedule>);

impl Schedules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<String>, schedule: Schedule) -> Self {
        self.0.insert(path.into(), schedule);
        self
    }

    /// Build from raw tables, naming the offending path on failure.
    pub fn from_tables<I, K>(tables: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = (K, Vec<[f64; 2]>)>,
        K: Into<String>,
    {
        let mut out = BTreeMap::new();
        for (path, points) in tables {
            let path = path.into();
            let schedule = Schedule::new(points).map_err(|what| SimError::Schedule {
                path: path.clone(),
                what,
            })?;
            out.insert(path, schedule);
        }
        Ok(Self(out))
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every schedule sampled at `t`.
    pub fn boundary_at(&self, t: f64) -> BoundaryInputs {
        self.0.iter().map(|(k, s)| (k.as_str(), s.at(t))).collect()
    }
}
