//! Drives health -> upload -> ask against a running backend.
//!
//! cargo run -p pdf_chat_client --example smoke -- path/to/file.pdf "What is this about?"

use anyhow::{bail, Context, Result};
use pdf_chat_client::{ClientConfig, DocumentSession, FileCandidate, HttpDocumentApi, Role};
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = match args.next() {
        Some(p) => PathBuf::from(p),
        None => bail!("usage: smoke <file.pdf> [question]"),
    };
    let question = args
        .next()
        .unwrap_or_else(|| "What are the main topics discussed in this document?".to_string());

    let config = ClientConfig::from_env()?;
    println!("🔍 Testing PDF chat backend at {}", config.base_url());
    let mut session = DocumentSession::new(Arc::new(HttpDocumentApi::new(config)?));

    println!("\n📋 Health Check:");
    match session.check_health().await {
        Ok(health) => println!("Status: {}", health.status),
        Err(e) => println!("Health check failed: {}", e),
    }

    println!("\n📚 Upload:");
    let candidate = FileCandidate::from_path(&path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    session.select_file(candidate)?;
    session.submit_upload().await.context("upload failed")?;
    println!("Loaded {} (job {})", path.display(), session.job_id().unwrap_or("-"));

    println!("\n🔍 Question:");
    session.submit_question(&question).await.context("ask failed")?;

    for message in session.transcript() {
        let who = match message.role {
            Role::User => "You",
            Role::Assistant => "Assistant",
        };
        println!("{}:", who);
        for paragraph in message.paragraphs() {
            println!("  {}", paragraph);
        }
    }

    println!("\n✅ Smoke test completed!");
    Ok(())
}
