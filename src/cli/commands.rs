//! CLI command definitions and handlers

use clap::Subcommand;
use std::path::PathBuf;

use crate::eval::report::DEFAULT_REPORT_FILE;
use crate::eval::runner::DEFAULT_SENTENCES_PER_RUN;

/// Commands for the polyglot translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate a single sentence
    Translate {
        /// Sentence to translate
        #[arg(short, long)]
        sentence: String,

        /// Source language (default: English)
        #[arg(long, default_value = "English")]
        source: String,

        /// Destination language
        #[arg(short, long)]
        destination: String,

        /// Provider/model identifier (e.g. gpt-4o, mistral-large-latest)
        #[arg(short, long)]
        llm: String,
    },

    /// Run the batch evaluation against the reference corpora
    Evaluate {
        /// Report file to append score lines to
        #[arg(short, long, default_value = DEFAULT_REPORT_FILE)]
        report: PathBuf,

        /// Directory for cached reference corpora
        #[arg(long, default_value = ".")]
        corpus_dir: PathBuf,

        /// Number of sentences to translate per run
        #[arg(short, long, default_value_t = DEFAULT_SENTENCES_PER_RUN)]
        limit: usize,

        /// Model identifiers to evaluate (defaults to the built-in set)
        #[arg(long = "llm")]
        llms: Vec<String>,
    },

    /// Start the HTTP API server
    Server {
        /// Bind address (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Listen port (default: 8000)
        #[arg(short, long, default_value_t = 8000)]
        port: u16,
    },
}

/// Handle the one-shot translate command
pub async fn handle_translate(
    sentence: String,
    source: String,
    destination: String,
    llm: String,
) -> anyhow::Result<()> {
    use crate::core::config::TranslatorConfig;
    use crate::core::models::TranslationRequest;
    use crate::core::router::TranslationRouter;

    let config = TranslatorConfig::from_env();
    let router = TranslationRouter::new(&config);

    let request = TranslationRequest::new(sentence, source, destination, llm);
    let result = router.translate(&request).await;

    println!("{}", serde_json::to_string(&result)?);

    Ok(())
}

/// Handle the batch evaluation command
pub async fn handle_evaluate(
    report: PathBuf,
    corpus_dir: PathBuf,
    limit: usize,
    llms: Vec<String>,
) -> anyhow::Result<()> {
    use crate::core::config::TranslatorConfig;
    use crate::core::router::TranslationRouter;
    use crate::eval::corpus::CorpusStore;
    use crate::eval::report::{append_line, RunSummary};
    use crate::eval::runner::{collect_pairs, score_run, EVALUATION_LANGUAGES, EVALUATION_LLMS};
    use indicatif::{ProgressBar, ProgressStyle};
    use std::time::Instant;
    use tracing::{info, warn};

    let start_time = Instant::now();

    info!("Starting evaluation");
    info!("Report: {}", report.display());
    info!("Corpus directory: {}", corpus_dir.display());
    info!("Sentences per run: {}", limit);

    let config = TranslatorConfig::from_env();
    let router = TranslationRouter::new(&config);

    let store = CorpusStore::new(&corpus_dir);
    store.ensure_all().await?;

    println!("Processing files...");
    let corpora = store.load_all();
    if corpora.english.is_empty() {
        warn!("English corpus is empty; every run will score zero");
    }

    let llms: Vec<String> = if llms.is_empty() {
        EVALUATION_LLMS.iter().map(|llm| llm.to_string()).collect()
    } else {
        llms
    };

    let mut runs = 0;
    let mut total_skipped = 0;

    for llm in &llms {
        for language in EVALUATION_LANGUAGES {
            let Some(references) = corpora.reference_for(language) else {
                warn!("No reference corpus for {}", language);
                continue;
            };

            println!("Translating from English to {language} with {llm}...");

            let pb = ProgressBar::new(corpora.english.len().min(limit) as u64);
            pb.set_style(ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
                .unwrap()
                .progress_chars("=>-"));

            let run = collect_pairs(
                &router,
                llm,
                language,
                &corpora.english,
                references,
                limit,
                Some(&pb),
            )
            .await;
            pb.finish_and_clear();

            println!("Calculating BLEU and CHR scores...");
            let (bleu, chrf) = score_run(&run.references, &run.candidates)?;

            let summary = RunSummary {
                llm: llm.clone(),
                language: language.to_string(),
                bleu,
                chrf,
                skipped: run.skip_count(),
                attempted: run.attempted,
            };
            let line = summary.format_line();
            append_line(&report, &line)?;

            info!("{}", line);
            runs += 1;
            total_skipped += run.skip_count();
        }
    }

    let duration = start_time.elapsed();
    info!(
        "Completed: {} runs, {} sentences skipped in {:?}",
        runs, total_skipped, duration
    );

    println!("\n✅ Evaluation completed!");
    println!("   Runs: {}", runs);
    println!("   Skipped sentences: {}", total_skipped);
    println!("   Time: {:?}", duration);
    println!("   Report: {}", report.display());

    Ok(())
}

/// Handle the server command
pub async fn handle_server(host: String, port: u16) -> anyhow::Result<()> {
    use crate::server::api::run_server;
    use tracing::info;

    info!("Starting HTTP server on {}:{}", host, port);
    println!("🚀 Server starting on http://{}:{}", host, port);

    run_server(host, port).await?;

    Ok(())
}
