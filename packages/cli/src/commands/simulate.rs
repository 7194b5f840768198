use crate::config::Config;
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;
use swatch_common::TokenSet;
use swatch_plugin::{Dispatcher, Envelope, MemoryHost, VariableCollection};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// JSON array of message envelopes sent by the UI
    pub messages: PathBuf,

    /// Tokens file (overrides tokensFile from the config)
    #[arg(short, long)]
    pub tokens: Option<PathBuf>,

    /// JSON array of variable collections the host starts with
    #[arg(short, long)]
    pub collections: Option<PathBuf>,
}

pub fn simulate(args: SimulateArgs, cwd: &str) -> Result<()> {
    let config = Config::load(cwd)?;
    let tokens = config.load_tokens(cwd, args.tokens.as_deref())?;

    let messages_path = PathBuf::from(cwd).join(&args.messages);
    let content = fs::read_to_string(&messages_path)
        .with_context(|| format!("Failed to read {}", messages_path.display()))?;
    let messages: Vec<Envelope> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not an array of messages", messages_path.display()))?;

    let collections: Vec<VariableCollection> = match &args.collections {
        Some(path) => {
            let path = PathBuf::from(cwd).join(path);
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("{} is not an array of collections", path.display()))?
        }
        None => Vec::new(),
    };

    let host = replay(&messages, tokens, collections);

    for notification in host.notifications() {
        eprintln!("{} {}", "notify:".blue().bold(), notification);
    }
    println!("{}", serde_json::to_string_pretty(&host)?);

    Ok(())
}

/// Start a session and feed it every message in order
pub fn replay(
    messages: &[Envelope],
    tokens: TokenSet,
    collections: Vec<VariableCollection>,
) -> MemoryHost {
    let mut dispatcher = Dispatcher::new(MemoryHost::new().with_collections(collections), tokens);
    dispatcher.start();
    for message in messages {
        dispatcher.handle(message);
    }
    dispatcher.into_host()
}
