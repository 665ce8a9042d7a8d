use crate::{TokenFilterPolicy, Units};
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    // terminator run, optional closing quotes/brackets, then the gap to the next sentence
    static ref BOUNDARY: Regex = Regex::new(r#"[.!?]+["'”’)\]]*\s+"#).expect("valid regex");
    // always followed by a name, never end a sentence
    static ref TITLES: HashSet<&'static str> = {
        let words: &[&str] = &["mr","mrs","ms","dr","prof","st","gen","col","lt","sgt","capt","rev"];
        words.iter().copied().collect()
    };
    static ref ABBREVIATIONS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "sr","jr","vs","fig","jan","feb","mar","apr","jun","jul","aug","sep","sept","oct","nov","dec",
            "e.g","i.e","u.s","u.k","a.m","p.m","approx","dept","est","inc","ltd","co","corp",
        ];
        words.iter().copied().collect()
    };
}

/// Splits a passage into sentences.
pub trait SentenceSplitter {
    fn sentences(&self, text: &str) -> Vec<String>;
}

/// Splits after `.`, `!` or `?` followed by whitespace. Titles and initials
/// never end a sentence; other abbreviations do when a capital follows.
#[derive(Debug, Clone, Copy, Default)]
pub struct PunctSplitter;

impl SentenceSplitter for PunctSplitter {
    fn sentences(&self, text: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut start = 0;
        for m in BOUNDARY.find_iter(text) {
            let terminator = m.as_str().trim_end();
            if terminator.starts_with('.') && !terminator.starts_with("..") && is_abbreviation(&text[start..m.start()], &text[m.end()..]) {
                continue;
            }
            push_trimmed(&mut out, &text[start..m.end()]);
            start = m.end();
        }
        push_trimmed(&mut out, &text[start..]);
        out
    }
}

fn push_trimmed(out: &mut Vec<String>, s: &str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s.to_string());
    }
}

fn is_abbreviation(before: &str, after: &str) -> bool {
    let word = before
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric());
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        // the pronoun "I" is not an initial
        return c.is_uppercase() && c != 'I';
    }
    let word = word.to_lowercase();
    if TITLES.contains(word.as_str()) {
        return true;
    }
    let capital_follows = after.chars().next().map_or(false, char::is_uppercase);
    ABBREVIATIONS.contains(word.as_str()) && !capital_follows
}

/// Build the sentence pool for a set of passages: newline-delimited paragraphs,
/// then sentences, each run through `policy`. Sentences left without tokens
/// are dropped; identical sentence texts collapse into one entry.
pub fn extract_sentences<'a, I, P, S>(texts: I, splitter: &S, policy: &P) -> Units
where
    I: IntoIterator<Item = &'a str>,
    P: TokenFilterPolicy + ?Sized,
    S: SentenceSplitter + ?Sized,
{
    let mut pool = Units::new();
    for text in texts {
        for passage in text.split('\n') {
            for sentence in splitter.sentences(passage) {
                let tokens = policy.tokenize(&sentence);
                if !tokens.is_empty() {
                    pool.insert(sentence, tokens);
                }
            }
        }
    }
    tracing::debug!(sentences = pool.len(), "extracted sentence pool");
    pool
}
