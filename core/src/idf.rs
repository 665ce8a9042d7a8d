use crate::{RankError, Result, Units};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

/// df and IDF for one corpus snapshot. Document and sentence pools each get their own.
#[derive(Debug, Clone, Serialize)]
pub struct IdfTable {
    total_units: usize,
    df: HashMap<String, u32>,
    idf: HashMap<String, f64>,
}

impl IdfTable {
    /// Number of units the table was built over.
    pub fn total_units(&self) -> usize { self.total_units }

    pub fn len(&self) -> usize { self.idf.len() }

    pub fn is_empty(&self) -> bool { self.idf.is_empty() }

    pub fn contains(&self, token: &str) -> bool { self.idf.contains_key(token) }

    pub fn idf(&self, token: &str) -> Option<f64> { self.idf.get(token).copied() }

    pub fn df(&self, token: &str) -> Option<u32> { self.df.get(token).copied() }

    /// IDF used for scoring. Tokens this corpus never saw weigh nothing.
    pub fn weight(&self, token: &str) -> f64 { self.idf(token).unwrap_or(0.0) }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.idf.iter().map(|(t, v)| (t.as_str(), *v))
    }
}

/// Compute df and `ln(N / df)` for every token present in at least one unit.
pub fn compute_idfs(units: &Units) -> Result<IdfTable> {
    let total_units = units.len();
    if total_units == 0 {
        return Err(RankError::InvalidCorpus);
    }

    let mut df: HashMap<String, u32> = HashMap::new();
    for tokens in units.values() {
        let seen_in_unit: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in seen_in_unit {
            match df.get_mut(token) {
                Some(count) => *count += 1,
                None => { df.insert(token.to_string(), 1); }
            }
        }
    }

    let n = total_units as f64;
    let idf = df.iter().map(|(t, &d)| (t.clone(), (n / d as f64).ln())).collect();
    tracing::debug!(total_units, vocabulary = df.len(), "computed idf table");
    Ok(IdfTable { total_units, df, idf })
}
