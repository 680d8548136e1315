//! Terminal output for the `hackrx` commands.
//!
//! Status goes to stdout and diagnostics to stderr. With colors off every
//! symbol becomes a bracketed tag, which keeps piped output greppable.

use crate::rag::indexer::IndexPaths;
use crate::rag::pipeline::IngestionRun;
use owo_colors::OwoColorize;

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    /// Print the server banner with the bound address.
    pub fn banner(&self, addr: &str) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n   {}\n",
                "HackRx".bright_cyan().bold(),
                version.dimmed(),
                "Policy document question answering".bright_white()
            );
        } else {
            println!("\n   HackRx {}\n   Policy document question answering\n", version);
        }
        self.kv("listening", addr);
    }

    pub fn info(&self, message: &str) {
        if self.colored {
            println!("  {} {}", "•".blue(), message);
        } else {
            println!("  [INFO] {}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {}", message);
        }
    }

    /// Print `[n/total] message` for a multi-stage command.
    pub fn step(&self, step_num: u32, total: u32, message: &str) {
        let counter = format!("[{}/{}]", step_num, total);
        if self.colored {
            println!("  {} {}", counter.dimmed(), message.bright_white());
        } else {
            println!("  {} {}", counter, message);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {}: {}", key, value);
        }
    }

    /// Summarise a finished ingestion and where its files landed.
    pub fn ingestion(&self, run: &IngestionRun, paths: &IndexPaths) {
        let headline = format!("Indexed {}", run.source);
        if self.colored {
            println!("  {} {}", "✓".green().bold(), headline.green());
        } else {
            println!("  [OK] {}", headline);
        }
        self.kv("run", &run.id.to_string());
        self.kv("chunks", &run.chunks.to_string());
        self.kv("dimensions", &run.dimensions.to_string());
        self.kv("index", &paths.index.display().to_string());
        self.kv("texts", &paths.texts.display().to_string());
    }

    /// Suggest the `ingest` invocation that would create a missing index.
    pub fn missing_index(&self, paths: &IndexPaths) {
        let command = format!("$ hackrx ingest <source> --base-name {}", base_name(paths));
        if self.colored {
            eprintln!("\n  {} {}", "💡".dimmed(), "Build the index first:".dimmed().italic());
            eprintln!("     {}", command.bright_cyan());
        } else {
            eprintln!("\n  [TIP] Build the index first:");
            eprintln!("     {}", command);
        }
    }

    /// Prompt shown before each interactive question.
    pub fn prompt(&self) -> String {
        let label = "Enter your query (type 'stop' to end):";
        if self.colored {
            format!("\n{} {}\n> ", "?".bright_yellow().bold(), label.bright_white())
        } else {
            format!("\n[?] {}\n> ", label)
        }
    }

    pub fn complete(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }
}

fn base_name(paths: &IndexPaths) -> String {
    paths
        .index
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}
