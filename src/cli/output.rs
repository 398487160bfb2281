//! Terminal output for `stockroom-server`.
//!
//! Every line is either a status line (a colored glyph, or a bracketed tag
//! when colors are off) or a section heading.

use owo_colors::OwoColorize;
use std::fmt::Display;

pub struct Output {
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

    /// Writes one status line: `glyph text` when colored, `[tag] text` otherwise.
    fn status(&self, glyph: impl Display, tag: &str, text: impl Display) {
        if self.colored {
            println!("  {glyph} {text}");
        } else {
            println!("  [{tag}] {text}");
        }
    }

    /// Name and version, printed before `serve` and `init`.
    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!("\n   {} {}\n", "stockroom".bright_cyan().bold(), version.dimmed());
        } else {
            println!("\n   stockroom {version}\n");
        }
    }

    pub fn info(&self, message: &str) {
        self.status("•".blue(), "INFO", message);
    }

    pub fn warning(&self, message: &str) {
        self.status("⚠".yellow().bold(), "WARN", message.yellow());
    }

    /// Goes to stderr so scripted `init` runs can separate failures.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("  {} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("  [ERROR] {message}");
        }
    }

    /// A scaffolded file or directory; `kind` is e.g. `config` or `directory`.
    pub fn created(&self, kind: &str, path: &str) {
        if self.colored {
            self.status(
                "✓".green().bold(),
                "CREATED",
                format_args!("{} {}", kind.dimmed(), path.bright_white()),
            );
        } else {
            self.status("", "CREATED", format_args!("{kind} {path}"));
        }
    }

    pub fn skipped(&self, path: &str, reason: &str) {
        if self.colored {
            self.status(
                "○".yellow(),
                "SKIPPED",
                format_args!("{} {}", path.dimmed(), format!("({reason})").yellow()),
            );
        } else {
            self.status("", "SKIPPED", format_args!("{path} ({reason})"));
        }
    }

    pub fn header(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.bright_white().bold().underline());
        } else {
            println!("\n  === {title} ===");
        }
    }

    pub fn subheader(&self, title: &str) {
        if self.colored {
            println!("\n  {}", title.cyan().bold());
        } else {
            println!("\n  --- {title} ---");
        }
    }

    /// Indented `key: value`, used for the listen address and database.
    pub fn kv(&self, key: &str, value: &str) {
        if self.colored {
            println!("    {}: {}", key.dimmed(), value.bright_white());
        } else {
            println!("    {key}: {value}");
        }
    }

    pub fn hint(&self, message: &str) {
        println!();
        self.status("›".dimmed(), "TIP", message.dimmed());
    }

    /// A shell command the operator is expected to run next.
    pub fn command(&self, cmd: &str) {
        let line = format!("$ {cmd}");
        if self.colored {
            println!("     {}", line.bright_cyan());
        } else {
            println!("     {line}");
        }
    }

    pub fn complete(&self, message: &str) {
        println!();
        self.status("✓".green().bold(), "DONE", message.bright_green().bold());
    }

    pub fn newline(&self) {
        println!();
    }
}
