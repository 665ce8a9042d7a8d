use anyhow::{Context, Result};
use clap::Parser;
use questions_core::{load_corpus, Engine, RankOptions};
use std::io::{self, BufRead, Write};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "questions")]
#[command(about = "Answer a question from a directory of text files", long_about = None)]
struct Cli {
    /// Corpus directory; every file directly inside it is a document
    corpus: String,
    /// Query text. Prompted for on stdin when omitted
    #[arg(short, long)]
    query: Option<String>,
    /// Number of top files to pull sentences from
    #[arg(long, default_value_t = 1)]
    files: usize,
    /// Number of sentences to print
    #[arg(long, default_value_t = 1)]
    sentences: usize,
    /// Only load files with this extension (e.g. txt)
    #[arg(long)]
    ext: Option<String>,
    /// Print the ranked files with their scores before the answer
    #[arg(long, default_value_t = false)]
    show_files: bool,
    /// Print the whole answer as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdin = io::stdin();
    let stdout = io::stdout();
    run(&cli, &mut stdin.lock(), &mut stdout.lock())
}

fn run(cli: &Cli, input: &mut impl BufRead, out: &mut impl Write) -> Result<()> {
    let corpus = load_corpus(&cli.corpus, cli.ext.as_deref())?;
    let engine = Engine::new(corpus).with_context(|| format!("building index over {}", cli.corpus))?;

    let query = match &cli.query {
        Some(q) => q.clone(),
        None => prompt(input, out)?,
    };
    let opts = RankOptions { file_matches: cli.files, sentence_matches: cli.sentences };
    let answer = engine.ask(&query, &opts)?;
    tracing::info!(files = ?answer.files.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(), "top files");

    if cli.json {
        serde_json::to_writer_pretty(&mut *out, &answer)?;
        writeln!(out)?;
        return Ok(());
    }
    if cli.show_files {
        for f in &answer.files {
            writeln!(out, "{}\t{:.4}", f.name, f.score)?;
        }
    }
    for s in &answer.sentences {
        writeln!(out, "{}", s.text)?;
    }
    Ok(())
}

fn prompt(input: &mut impl BufRead, out: &mut impl Write) -> Result<String> {
    write!(out, "Query: ")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line).context("reading query from stdin")?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
