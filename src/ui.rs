//! Terminal output for the capture banner, progress, and results

use crate::api::Completion;
use crate::input::KeyBindings;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use textwrap::{wrap, Options};

/// Display the capture instructions
pub fn show_banner(bindings: &KeyBindings) {
    println!(
        "{}",
        format!(
            "Enter your prompt (multiline). Submit with {}, abort with {}.",
            bindings.submit, bindings.abort
        )
        .dimmed()
    );
    println!();
}

/// Get terminal width for proper text wrapping with margins
fn get_terminal_width() -> usize {
    let full_width = terminal_size::terminal_size()
        .map(|(width, _)| width.0 as usize)
        .unwrap_or(80); // Default to 80 if we can't detect terminal size

    // Add left and right margins (4 chars each side = 8 total)
    let margin = 8;
    if full_width > margin {
        full_width - margin
    } else {
        full_width.saturating_sub(4) // Minimum margin if terminal is very narrow
    }
}

/// Wrap text to fit terminal width with margins
pub fn wrap_text(text: &str) -> String {
    let width = get_terminal_width();
    let options = Options::new(width)
        .break_words(false) // Don't break words
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit);

    let left_margin = "  "; // 2 spaces left margin

    let lines: Vec<String> = text
        .lines()
        .flat_map(|line| {
            if line.trim().is_empty() {
                vec![String::new()]
            } else {
                wrap(line, &options)
                    .into_iter()
                    .map(|cow| format!("{}{}", left_margin, cow))
                    .collect::<Vec<_>>()
            }
        })
        .collect();

    lines.join("\n")
}

/// Format the timing and token-usage summary for a completion
pub fn summary_line(completion: &Completion) -> String {
    format!(
        "[ {:.2}s, {} prompt + {} completion tokens ]",
        completion.elapsed.as_secs_f64(),
        completion.prompt_tokens,
        completion.completion_tokens
    )
}

/// Display a completion: summary line first, then the reply
pub fn display_completion(completion: &Completion) {
    println!();
    println!("{}", summary_line(completion).dimmed());
    println!();
    println!("{}", wrap_text(&completion.reply));
    println!();
}

/// Display an error message
pub fn display_error(error: &str) {
    eprintln!("{} {}", "Error:".red().bold(), error);
}

/// Display the abort notice
pub fn display_aborted() {
    println!();
    println!("{}", "Aborted.".dimmed());
}

/// Create a spinner for the in-flight request
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .template("{spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::time::Duration;

    fn completion(prompt_tokens: u32, completion_tokens: u32, millis: u64) -> Completion {
        Completion {
            reply: "4".to_string(),
            prompt_tokens,
            completion_tokens,
            elapsed: Duration::from_millis(millis),
        }
    }

    #[test]
    fn summary_line_reports_all_counters() {
        let line = summary_line(&completion(12, 5, 1240));
        assert_eq!(line, "[ 1.24s, 12 prompt + 5 completion tokens ]");
    }

    #[test]
    fn summary_line_handles_zero_duration() {
        let line = summary_line(&completion(0, 0, 0));
        assert_eq!(line, "[ 0.00s, 0 prompt + 0 completion tokens ]");
    }

    #[test]
    fn wrap_text_preserves_blank_lines() {
        let wrapped = wrap_text("a\n\nb");
        assert_eq!(wrapped, "  a\n\n  b");
    }
}
