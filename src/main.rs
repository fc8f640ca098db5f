//! gcsnip - Google Cloud snippets CLI

// coverage_nightly cfg が設定されている場合のみ coverage_attribute を有効化
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use anyhow::Result;
use clap::Parser;

use gcsnip::driver::{Args, SnippetRunner};

#[cfg_attr(coverage_nightly, coverage(off))]
#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    // Load configuration (--project overrides the file)
    let config = args.load_config()?;

    let runner = SnippetRunner::new(config);
    runner.run(args.command).await
}
