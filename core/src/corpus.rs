use anyhow::{bail, Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// File name -> raw text.
pub type Corpus = BTreeMap<String, String>;

/// Read every regular, non-hidden file directly inside `dir`.
/// With `ext` set, only files with that extension are read.
pub fn load_corpus<P: AsRef<Path>>(dir: P, ext: Option<&str>) -> Result<Corpus> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        bail!("corpus directory {} does not exist or is not a directory", dir.display());
    }

    let mut corpus = Corpus::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.with_context(|| format!("reading {}", dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if name.starts_with('.') {
            continue;
        }
        if let Some(want) = ext {
            let got = entry.path().extension().and_then(|s| s.to_str());
            if got != Some(want.trim_start_matches('.')) {
                continue;
            }
        }
        let bytes = fs::read(entry.path()).with_context(|| format!("reading {}", entry.path().display()))?;
        corpus.insert(name, String::from_utf8_lossy(&bytes).into_owned());
    }
    tracing::info!(dir = %dir.display(), num_files = corpus.len(), "loaded corpus");
    Ok(corpus)
}
