use crate::{IdfTable, RankError, Result, TokenFilterPolicy, Units};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};

/// Distinct query tokens. Multiplicity in the input text is discarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query(BTreeSet<String>);

impl Query {
    pub fn parse<P: TokenFilterPolicy + ?Sized>(text: &str, policy: &P) -> Self {
        Self::from_tokens(policy.tokenize(text))
    }

    pub fn from_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Query(tokens.into_iter().map(Into::into).collect())
    }

    pub fn len(&self) -> usize { self.0.len() }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn contains(&self, token: &str) -> bool { self.0.contains(token) }
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ { self.0.iter().map(String::as_str) }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredFile {
    pub name: String,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredSentence {
    pub text: String,
    pub idf_sum: f64,
    pub density: f64,
}

/// Score every document and return them all, best first.
pub fn score_files(query: &Query, files: &Units, idfs: &IdfTable) -> Vec<ScoredFile> {
    let mut scored: Vec<ScoredFile> = files
        .iter()
        .map(|(name, words)| {
            let mut tf: HashMap<&str, u32> = HashMap::new();
            for w in words {
                if query.contains(w) {
                    *tf.entry(w.as_str()).or_insert(0) += 1;
                }
            }
            // summed in query order so the result does not depend on hash order
            let score: f64 = query
                .iter()
                .map(|q| tf.get(q).map_or(0.0, |&count| count as f64 * idfs.weight(q)))
                .sum();
            ScoredFile { name: name.clone(), score }
        })
        .collect();
    // ties go to the lexically smaller name
    scored.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    scored
}

/// Names of the `n` documents with the highest TF-IDF score for `query`.
pub fn top_files(query: &Query, files: &Units, idfs: &IdfTable, n: usize) -> Vec<String> {
    score_files(query, files, idfs).into_iter().take(n).map(|f| f.name).collect()
}

/// Score every sentence and return them all, best first.
///
/// A matching query token adds its IDF once however often it repeats; density
/// is matched distinct query tokens over the sentence's token count.
pub fn score_sentences(query: &Query, sentences: &Units, idfs: &IdfTable) -> Result<Vec<ScoredSentence>> {
    let mut scored = Vec::with_capacity(sentences.len());
    for (text, words) in sentences {
        if words.is_empty() {
            return Err(RankError::EmptyUnit(text.clone()));
        }
        let mut idf_sum = 0.0;
        let mut matched = 0usize;
        for q in query.iter() {
            if words.iter().any(|w| w == q) {
                matched += 1;
                idf_sum += idfs.weight(q);
            }
        }
        let density = matched as f64 / words.len() as f64;
        scored.push(ScoredSentence { text: text.clone(), idf_sum, density });
    }
    scored.sort_by(compare_sentences);
    Ok(scored)
}

/// The `n` sentences that best answer `query`, most relevant first.
pub fn top_sentences(query: &Query, sentences: &Units, idfs: &IdfTable, n: usize) -> Result<Vec<String>> {
    Ok(score_sentences(query, sentences, idfs)?.into_iter().take(n).map(|s| s.text).collect())
}

fn compare_sentences(a: &ScoredSentence, b: &ScoredSentence) -> Ordering {
    b.idf_sum
        .total_cmp(&a.idf_sum)
        .then_with(|| b.density.total_cmp(&a.density))
        .then_with(|| a.text.cmp(&b.text))
}
