//! Scour CLI
//!
//! Sanitizes an HTML fragment against the built-in whitelist and prints the
//! result, or dumps the tokenizer event stream for debugging.

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use scour_html::{Event, Sanitizer};

/// Scour: whitelist HTML fragment sanitizer
#[derive(Parser, Debug)]
#[command(name = "scour")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Sanitize a file
    scour ./comment.html

    # Sanitize standard input
    echo '<b onclick="x()">hi</b>' | scour

    # Sanitize inline HTML and report what was removed
    scour --warnings --html '<a href="javascript:x">link</a><script>y</script>'

    # Show the tokenizer event stream
    scour --events --html '<p>a<p>b'
"#)]
struct Cli {
    /// Path to the HTML fragment (reads standard input if omitted)
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Sanitize this HTML string instead of a file
    #[arg(long, value_name = "HTML", conflicts_with = "path")]
    html: Option<String>,

    /// Print the tokenizer event stream instead of sanitized output
    #[arg(long)]
    events: bool,

    /// Print a warning for every element, attribute or tag that was changed
    #[arg(long)]
    warnings: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let html = read_input(&cli)?;

    let mut sanitizer = Sanitizer::new();
    if cli.warnings {
        sanitizer = sanitizer.with_warnings();
    }

    if cli.events {
        print_events(&sanitizer, &html)?;
        return Ok(());
    }

    let output = sanitizer
        .sanitize(&html)
        .context("failed to sanitize input")?;
    println!("{output}");
    Ok(())
}

fn read_input(cli: &Cli) -> anyhow::Result<String> {
    if let Some(ref html) = cli.html {
        Ok(html.clone())
    } else if let Some(ref path) = cli.path {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))
    } else {
        let mut html = String::new();
        let _ = io::stdin()
            .read_to_string(&mut html)
            .context("failed to read standard input")?;
        Ok(html)
    }
}

/// Print one line per event, with the open-element depth as indentation.
fn print_events(sanitizer: &Sanitizer, html: &str) -> anyhow::Result<()> {
    println!("{}", "=== Events ===".bold());
    let mut depth = 0usize;
    for event in sanitizer.events(html) {
        let event = event.context("failed to tokenize input")?;
        if matches!(event, Event::EndTag { .. }) {
            depth = depth.saturating_sub(1);
        }
        println!("{}{event}", "  ".repeat(depth));
        if let Event::StartTag {
            self_closing: false,
            ..
        } = event
        {
            depth += 1;
        }
    }
    Ok(())
}
