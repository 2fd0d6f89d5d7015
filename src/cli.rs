//! CLI surface
//!
//! The program takes no arguments: running it starts one
//! capture -> request -> report cycle. The parser exists for the
//! `--help`/`--version` surface and to document the key bindings.

use clap::Parser;

/// promptline - send one multiline prompt to an LLM from your terminal
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
KEYS:\n  Ctrl-S  submit the prompt\n  Ctrl-C  abort without sending\n\n\
CONFIG:\n  prompts.txt in the working directory supplies the system prompt.\n  \
OPENAI_API_KEY (environment or .env) supplies the credential.")]
pub struct Cli {}
