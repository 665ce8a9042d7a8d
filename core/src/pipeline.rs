use crate::{
    compute_idfs, extract_sentences, score_files, score_sentences, Corpus, IdfTable, PunctSplitter, Query,
    Result, ScoredFile, ScoredSentence, SentenceSplitter, TokenFilter, TokenFilterPolicy, Units,
};
use serde::{Deserialize, Serialize};

pub const FILE_MATCHES: usize = 1;
pub const SENTENCE_MATCHES: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankOptions {
    #[serde(default = "default_files")]
    pub file_matches: usize,
    #[serde(default = "default_sentences")]
    pub sentence_matches: usize,
}
fn default_files() -> usize { FILE_MATCHES }
fn default_sentences() -> usize { SENTENCE_MATCHES }

impl Default for RankOptions {
    fn default() -> Self { Self { file_matches: FILE_MATCHES, sentence_matches: SENTENCE_MATCHES } }
}

#[derive(Debug, Clone, Serialize)]
pub struct Answer {
    pub query: Query,
    pub files: Vec<ScoredFile>,
    pub sentences: Vec<ScoredSentence>,
}

/// A loaded corpus with its document-level IDF table, ready to answer queries.
pub struct Engine<P = TokenFilter, S = PunctSplitter> {
    corpus: Corpus,
    file_words: Units,
    file_idfs: IdfTable,
    policy: P,
    splitter: S,
}

impl Engine {
    pub fn new(corpus: Corpus) -> Result<Self> {
        Self::with_collaborators(corpus, TokenFilter::english(), PunctSplitter)
    }
}

impl<P: TokenFilterPolicy, S: SentenceSplitter> Engine<P, S> {
    pub fn with_collaborators(corpus: Corpus, policy: P, splitter: S) -> Result<Self> {
        let file_words: Units = corpus.iter().map(|(name, text)| (name.clone(), policy.tokenize(text))).collect();
        let file_idfs = compute_idfs(&file_words)?;
        tracing::info!(num_files = file_words.len(), vocabulary = file_idfs.len(), "engine ready");
        Ok(Self { corpus, file_words, file_idfs, policy, splitter })
    }

    pub fn corpus(&self) -> &Corpus { &self.corpus }
    pub fn file_words(&self) -> &Units { &self.file_words }

    /// Rank files, pull sentences from the winners, rank those against a
    /// sentence-scoped IDF table.
    pub fn ask(&self, text: &str, opts: &RankOptions) -> Result<Answer> {
        let query = Query::parse(text, &self.policy);
        if query.is_empty() {
            tracing::debug!(text, "query has no content terms; ranking by tie order only");
        } else {
            tracing::debug!(query_terms = query.len(), "parsed query");
        }

        let mut files = score_files(&query, &self.file_words, &self.file_idfs);
        files.truncate(opts.file_matches);

        let winners = files.iter().filter_map(|f| self.corpus.get(&f.name).map(String::as_str));
        let pool = extract_sentences(winners, &self.splitter, &self.policy);
        let sentences = if pool.is_empty() {
            Vec::new()
        } else {
            let idfs = compute_idfs(&pool)?;
            let mut ranked = score_sentences(&query, &pool, &idfs)?;
            ranked.truncate(opts.sentence_matches);
            ranked
        };
        Ok(Answer { query, files, sentences })
    }
}
