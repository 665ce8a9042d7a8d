use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // words (with inner apostrophes/hyphens), numbers, then any run of other non-space chars
    static ref RE: Regex = Regex::new(
        r"(?u)\p{L}[\p{L}\p{N}_]*(?:['’-][\p{L}\p{N}]+)*|\p{N}+(?:[.,]\p{N}+)*|[^\s\p{L}\p{N}]+"
    ).expect("valid regex");
    static ref DEFAULT_FILTER: TokenFilter = TokenFilter::english();
}

const ENGLISH_STOPWORDS: &[&str] = &[
    "i","me","my","myself","we","our","ours","ourselves","you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
    "he","him","his","himself","she","she's","her","hers","herself","it","it's","its","itself","they","them","their","theirs","themselves",
    "what","which","who","whom","this","that","that'll","these","those","am","is","are","was","were","be","been","being",
    "have","has","had","having","do","does","did","doing","a","an","the","and","but","if","or","because","as","until","while",
    "of","at","by","for","with","about","against","between","into","through","during","before","after","above","below",
    "to","from","up","down","in","out","on","off","over","under","again","further","then","once","here","there",
    "when","where","why","how","all","any","both","each","few","more","most","other","some","such","no","nor","not",
    "only","own","same","so","than","too","very","s","t","can","will","just","don","don't","should","should've","now",
    "d","ll","m","o","re","ve","y","ain","aren","aren't","couldn","couldn't","didn","didn't","doesn","doesn't",
    "hadn","hadn't","hasn","hasn't","haven","haven't","isn","isn't","ma","mightn","mightn't","mustn","mustn't",
    "needn","needn't","shan","shan't","shouldn","shouldn't","wasn","wasn't","weren","weren't","won","won't","wouldn","wouldn't",
    // clitics split off by the tokenizer
    "'s","'re","'ll","'ve","'d","'m","n't",
];

const CLITICS: &[&str] = &["'s", "'re", "'ll", "'ve", "'d", "'m"];

/// Splits raw text into word tokens. Punctuation and contraction clitics come
/// back as their own tokens; case is left untouched.
pub trait Tokenizer {
    fn words(&self, text: &str) -> Vec<String>;
}

/// Regex tokenizer over NFKC-normalized text.
#[derive(Debug, Clone, Copy, Default)]
pub struct WordTokenizer;

impl Tokenizer for WordTokenizer {
    fn words(&self, text: &str) -> Vec<String> {
        let normalized = text.nfkc().collect::<String>();
        let mut words = Vec::new();
        for m in RE.find_iter(&normalized) {
            let (head, clitic) = split_clitic(m.as_str());
            words.push(head.to_string());
            if let Some(clitic) = clitic {
                words.push(clitic.to_string());
            }
        }
        words
    }
}

/// `Python's` -> `Python` + `'s`, `don’t` -> `do` + `n’t`.
fn split_clitic(word: &str) -> (&str, Option<&str>) {
    let Some(idx) = word.rfind(['\'', '’']) else { return (word, None) };
    if idx == 0 {
        return (word, None);
    }
    let suffix = fold_apostrophe(&word[idx..].to_lowercase());
    if suffix == "'t" {
        let head = &word[..idx];
        if head.len() > 1 && head.ends_with(['n', 'N']) {
            let at = idx - 1;
            return (&word[..at], Some(&word[at..]));
        }
        return (word, None);
    }
    if CLITICS.contains(&suffix.as_str()) {
        return (&word[..idx], Some(&word[idx..]));
    }
    (word, None)
}

fn fold_apostrophe(token: &str) -> String { token.replace('’', "'") }

/// A fixed set of words discarded by the filter. Entries are expected lower-case.
#[derive(Debug, Clone, Default)]
pub struct Stopwords(HashSet<String>);

impl Stopwords {
    pub fn english() -> Self { ENGLISH_STOPWORDS.iter().copied().collect() }
    pub fn none() -> Self { Self::default() }
    pub fn contains(&self, token: &str) -> bool { self.0.contains(token) }
}

impl<S: Into<String>> FromIterator<S> for Stopwords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Stopwords(iter.into_iter().map(Into::into).collect())
    }
}

/// Turns text into the ordered content tokens every ranking pass consumes.
/// Corpus text and query text must go through the same policy.
pub trait TokenFilterPolicy {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Lower-cases and folds `’` to `'`, then drops punctuation-only tokens and stopwords.
#[derive(Debug, Clone)]
pub struct TokenFilter<T = WordTokenizer> {
    tokenizer: T,
    stopwords: Stopwords,
}

impl TokenFilter<WordTokenizer> {
    pub fn english() -> Self { Self::new(WordTokenizer, Stopwords::english()) }
}

impl Default for TokenFilter<WordTokenizer> {
    fn default() -> Self { Self::english() }
}

impl<T: Tokenizer> TokenFilter<T> {
    pub fn new(tokenizer: T, stopwords: Stopwords) -> Self { Self { tokenizer, stopwords } }

    /// Filter already tokenized words. Order and multiplicity of survivors are kept.
    pub fn filter<I, S>(&self, raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        raw.into_iter()
            .map(|w| fold_apostrophe(&w.as_ref().to_lowercase()))
            .filter(|w| !w.is_empty() && !is_punctuation(w) && !self.stopwords.contains(w))
            .collect()
    }
}

impl<T: Tokenizer> TokenFilterPolicy for TokenFilter<T> {
    fn tokenize(&self, text: &str) -> Vec<String> { self.filter(self.tokenizer.words(text)) }
}

/// True for a non-empty token made only of punctuation characters.
pub fn is_punctuation(token: &str) -> bool {
    !token.is_empty()
        && token.chars().all(|c| c.is_ascii_punctuation() || (!c.is_alphanumeric() && !c.is_whitespace()))
}

/// Tokenize with the default English policy.
pub fn tokenize(text: &str) -> Vec<String> { DEFAULT_FILTER.tokenize(text) }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("The cat sat, quietly!");
        assert_eq!(t, vec!["cat", "sat", "quietly"]);
    }

    #[test]
    fn punctuation_is_split_off() {
        let w = WordTokenizer.words("Hello, world... (really)?");
        assert_eq!(w, vec!["Hello", ",", "world", "...", "(", "really", ")?"]);
    }

    #[test]
    fn filter_keeps_order_and_multiplicity() {
        let f = TokenFilter::english();
        let out = f.filter(["Dog", "the", "DOG", ".", "bites", "dog"]);
        assert_eq!(out, vec!["dog", "dog", "bites", "dog"]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let f = TokenFilter::english();
        assert!(f.filter(Vec::<String>::new()).is_empty());
        assert!(f.tokenize("").is_empty());
        assert!(f.tokenize("the of and , .").is_empty());
    }

    #[test]
    fn clitics_are_split_for_both_apostrophes() {
        let w = WordTokenizer.words("Python's it’s don't can’t they're o'clock");
        assert_eq!(
            w,
            vec!["Python", "'s", "it", "’s", "do", "n't", "ca", "n’t", "they", "'re", "o'clock"]
        );
    }

    #[test]
    fn curly_contractions_hit_the_stopword_list() {
        assert_eq!(tokenize("Python's creator said it’s fine and don’t worry."), vec!["python", "creator", "said", "fine", "worry"]);
        assert_eq!(tokenize("She’s here, isn’t she?"), Vec::<String>::new());
    }

    #[test]
    fn custom_stopwords() {
        let f = TokenFilter::new(WordTokenizer, ["rust"].into_iter().collect());
        assert_eq!(f.tokenize("Rust and the crab"), vec!["and", "the", "crab"]);
    }

    #[test]
    fn punctuation_detection() {
        assert!(is_punctuation("."));
        assert!(is_punctuation("--"));
        assert!(is_punctuation("“"));
        assert!(!is_punctuation("a."));
        assert!(!is_punctuation(""));
    }
}
