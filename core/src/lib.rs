pub mod corpus;
pub mod idf;
pub mod pipeline;
pub mod ranking;
pub mod sentence;
pub mod tokenizer;

pub use corpus::{load_corpus, Corpus};
pub use idf::{compute_idfs, IdfTable};
pub use pipeline::{Answer, Engine, RankOptions};
pub use ranking::{score_files, score_sentences, top_files, top_sentences, Query, ScoredFile, ScoredSentence};
pub use sentence::{extract_sentences, PunctSplitter, SentenceSplitter};
pub use tokenizer::{tokenize, Stopwords, TokenFilter, TokenFilterPolicy, Tokenizer, WordTokenizer};

use std::collections::BTreeMap;

/// Unit id (file name or sentence text) -> filtered tokens of that unit.
pub type Units = BTreeMap<String, Vec<String>>;

#[derive(Debug, thiserror::Error)]
pub enum RankError {
    #[error("corpus has no units; idf is undefined")]
    InvalidCorpus,
    #[error("unit {0:?} has no tokens")]
    EmptyUnit(String),
}

pub type Result<T> = std::result::Result<T, RankError>;
