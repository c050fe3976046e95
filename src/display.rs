//! Colored terminal output for the command-line watcher.

use std::io::{self, Write};

use chrono::Utc;
use owo_colors::{OwoColorize, Style};

use crate::alert::Rule;
use crate::chat::{ChatMessage, Payload, RichText};
use crate::config::{ColorLookup, Rgba};
use crate::watcher::{MessageOutcome, WatchedChannels};

/// Get current timestamp in the same format as tracing.
fn timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ").to_string()
}

/// Render rich text for a truecolor terminal.
///
/// Foreground and glow markers nest; the innermost active one applies.
/// Ids missing from `colors` render bold (foreground) or underlined (glow).
/// Opaque payloads have no terminal form and are skipped.
#[must_use]
pub fn render_rich_text(text: &RichText, colors: &dyn ColorLookup) -> String {
    let mut out = String::new();
    let mut foreground: Vec<u16> = Vec::new();
    let mut glow: Vec<u16> = Vec::new();

    for payload in text.payloads() {
        match payload {
            Payload::Text(run) => {
                match run_style(foreground.last(), glow.last(), colors) {
                    Some(style) => out.push_str(&run.style(style).to_string()),
                    None => out.push_str(run),
                }
            }
            Payload::ForegroundOn(id) => foreground.push(*id),
            Payload::ForegroundOff => {
                foreground.pop();
            }
            Payload::GlowOn(id) => glow.push(*id),
            Payload::GlowOff => {
                glow.pop();
            }
            Payload::Opaque(_) => {}
        }
    }
    out
}

fn run_style(
    foreground: Option<&u16>,
    glow: Option<&u16>,
    colors: &dyn ColorLookup,
) -> Option<Style> {
    if foreground.is_none() && glow.is_none() {
        return None;
    }
    let mut style = Style::new();
    if let Some(&id) = foreground {
        style = match colors.resolve_foreground(id) {
            Some(Rgba { r, g, b, .. }) => style.truecolor(r, g, b),
            None => style.bold(),
        };
    }
    if let Some(&id) = glow {
        style = match colors.resolve_glow(id) {
            Some(Rgba { r, g, b, .. }) => style.on_truecolor(r, g, b),
            None => style.underline(),
        };
    }
    Some(style)
}

/// Print one processed chat message.
pub fn print_message(message: &ChatMessage, outcome: &MessageOutcome, colors: &dyn ColorLookup) {
    let tag = format!("[{}]", message.channel.display_name());
    let marker = if outcome.is_match() {
        "*".yellow().bold().to_string()
    } else {
        " ".to_string()
    };
    println!(
        "{} {} {} {}: {}",
        timestamp().dimmed(),
        marker,
        tag.cyan().bold(),
        render_rich_text(&message.sender, colors),
        render_rich_text(&message.body, colors)
    );
    let _ = io::stdout().flush();
}

/// Print which rules fired for a message.
pub fn print_alert(rules: &[Rule], outcome: &MessageOutcome) {
    for &index in &outcome.matched_rules {
        let Some(rule) = rules.get(index) else {
            continue;
        };
        let sound = if outcome.sound_rule == Some(index) {
            " (sound)".green().to_string()
        } else {
            String::new()
        };
        println!("{} {}{}", "[ALERT]".yellow().bold(), rule.name.bold(), sound);
    }
    let _ = io::stdout().flush();
}

/// Print one rule's readiness.
pub fn print_rule_status(position: usize, rule: &Rule) {
    let state = if !rule.enabled {
        "[OFF]".dimmed().to_string()
    } else if rule.can_match() {
        "[OK]".green().bold().to_string()
    } else if rule.pattern.is_empty() {
        "[EMPTY]".yellow().bold().to_string()
    } else {
        "[INVALID]".red().bold().to_string()
    };
    let sound = if !rule.play_sound {
        "silent".dimmed().to_string()
    } else if !rule.sound_ready() {
        "sound unavailable".red().to_string()
    } else if rule.use_custom_sound {
        format!("sound {}", rule.custom_sound_path.display())
    } else {
        format!("sound {}", rule.builtin_sound.display_name())
    };
    let kind = if rule.is_regex { "regex" } else { "text" };

    println!(
        "{:>3}. {} {} {}={:?} ({})",
        position + 1,
        state,
        rule.name.bold(),
        kind,
        rule.pattern,
        sound
    );
}

/// Print the watched channel summary.
pub fn print_watched(index: &WatchedChannels) {
    println!("{} {}", "[WATCHING]".blue().bold(), index);
    let _ = io::stdout().flush();
}
