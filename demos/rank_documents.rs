//! Ranks documents against a query with a local llama.cpp reranker.
//!
//! ```text
//! RERANK_MODEL_PATH=models/bge-reranker-v2-m3.gguf RUST_LOG=rerank=debug \
//!     cargo run --example rank_documents -- "what is deep learning" \
//!     "Deep learning uses layered neural networks." "Bake the bread for 40 minutes."
//! ```

use anyhow::{Context, Result};
use rerank::{CancellationToken, Config, Document, RankingEngine};

const SAMPLE_DOCUMENTS: &[&str] = &[
    "Deep learning is a subset of machine learning based on neural networks.",
    "AI research covers reasoning, perception and learning.",
    "Cooking recipes for a quick weeknight dinner.",
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let query = args
        .next()
        .unwrap_or_else(|| "what is machine learning".to_string());
    let contents: Vec<String> = args.collect();
    let documents = if contents.is_empty() {
        Document::from_contents(SAMPLE_DOCUMENTS.iter().copied())
    } else {
        Document::from_contents(contents)
    };

    let config = Config::from_env().context("reading RERANK_* environment")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c.cancel();
        }
    });

    let engine = RankingEngine::load(config, &cancel)
        .await
        .context("starting ranking engine")?;

    let results = engine.rank(&query, &documents, 0, &cancel).await?;

    println!("model: {}", engine.model_name());
    println!("query: {query}");
    for result in &results {
        println!(
            "{:>8.3}  [{}] {}",
            result.score, result.document.id, result.document.content
        );
    }
    if results.is_empty() {
        println!("no documents scored at or above {}", engine.threshold());
    }

    engine.close();
    Ok(())
}
