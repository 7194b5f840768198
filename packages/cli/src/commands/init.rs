use crate::config::{Config, DEFAULT_CONFIG_NAME};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Spec directory
    #[arg(short, long, default_value = "specs")]
    pub spec_dir: String,

    /// Force overwrite existing config
    #[arg(short, long)]
    pub force: bool,
}

const TOKENS_FILE: &str = "tokens.json";

const EXAMPLE_TOKENS: &str = r##"{
  "color": {
    "primary": { "type": "paint", "color": "#3366ff" },
    "on-primary": { "type": "paint", "color": "#ffffff" }
  },
  "type": {
    "button": {
      "type": "typography",
      "fontFamily": "Inter",
      "fontStyle": "Medium",
      "fontSize": 14,
      "lineHeight": 20
    }
  }
}
"##;

const EXAMPLE_SPEC: &str = r##"{
  "meta": {
    "id": "button",
    "title": "Button",
    "description": "Primary call to action",
    "tags": ["actions"]
  },
  "component": {
    "name": "Button",
    "frame": { "width": 120, "height": 40, "padding": { "horizontal": 16, "vertical": 10 } },
    "layers": [
      {
        "kind": "rectangle",
        "name": "background",
        "tokens": { "fill": "color.primary" },
        "cornerRadius": 6,
        "fallback": { "fill": "#3366ff" }
      },
      {
        "kind": "text",
        "name": "label",
        "characters": "Click me",
        "tokens": { "typography": "type.button", "fill": "color.on-primary" },
        "fallback": { "fontFamily": "Inter", "fontStyle": "Medium", "fontSize": 14, "fill": "#ffffff" }
      }
    ],
    "variants": {
      "name": "Button",
      "properties": [ { "name": "size", "values": ["md", "lg"] } ],
      "nodes": [
        { "id": "button-md", "properties": { "size": "md" } },
        {
          "id": "button-lg",
          "properties": { "size": "lg" },
          "overrides": { "layers": { "label": { "characters": "Click me now" } } }
        }
      ]
    }
  }
}
"##;

pub fn init(args: InitArgs, cwd: &str) -> Result<()> {
    let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

    // Check if config already exists
    if config_path.exists() && !args.force {
        println!(
            "{} {} already exists",
            "⚠️".yellow(),
            DEFAULT_CONFIG_NAME.bright_white()
        );
        println!("Use --force to overwrite");
        return Ok(());
    }

    println!("{}", "📝 Initializing Swatch project...".bright_blue().bold());

    let spec_dir = PathBuf::from(cwd).join(&args.spec_dir);
    if !spec_dir.exists() {
        fs::create_dir_all(&spec_dir)?;
        println!("  {} Created {}/", "✓".green(), args.spec_dir);
    }

    let example_file = spec_dir.join("button.json");
    if !example_file.exists() {
        fs::write(&example_file, EXAMPLE_SPEC)?;
        println!("  {} Created {}/button.json", "✓".green(), args.spec_dir);
    }

    let tokens_file = PathBuf::from(cwd).join(TOKENS_FILE);
    if !tokens_file.exists() {
        fs::write(&tokens_file, EXAMPLE_TOKENS)?;
        println!("  {} Created {}", "✓".green(), TOKENS_FILE);
    }

    let config = Config {
        spec_dir: args.spec_dir.clone(),
        tokens_file: Some(TOKENS_FILE.to_string()),
        ..Config::default()
    };
    fs::write(&config_path, serde_json::to_string_pretty(&config)?)?;

    println!("  {} Created {}", "✓".green(), DEFAULT_CONFIG_NAME);
    println!();
    println!("{}", "✅ Project initialized!".green().bold());
    println!();
    println!("Next steps:");
    println!("  1. Edit {}/button.json", args.spec_dir);
    println!("  2. Run: swatch validate");
    println!("  3. Run: swatch render {}/button.json", args.spec_dir);

    Ok(())
}
