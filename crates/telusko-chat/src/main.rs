//! A terminal chat client for TeluskoBot.

#[macro_use]
extern crate tracing;

use std::env;
use std::io::Write as _;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use telusko_chat_core::{Chat, ChatBuilder, SendOutcome};
use telusko_chat_openai_model::{OpenAIConfigBuilder, OpenAIProvider};
use tokio::io::{self, AsyncBufReadExt};
use tokio::select;
use tokio::time::sleep;

const BAR_CHAR: &str = "▎";
const GREETING: &str = "Hi, I'm TeluskoBot! Ask me anything!";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // The bearer credential is the only configuration surface; it is
    // read once here and injected into the provider.
    let Ok(api_key) = env::var("OPENAI_API_KEY") else {
        eprintln!("OPENAI_API_KEY environment variable is not set");
        return;
    };

    let config = OpenAIConfigBuilder::with_api_key(api_key).build();
    let provider = OpenAIProvider::new(config);

    let mut chat = ChatBuilder::with_provider(provider)
        .with_system_prompt(include_str!("./system_prompt.md").trim())
        .with_greeting(GREETING)
        .build();

    print_reply(GREETING);

    let progress_style = ProgressStyle::with_template("{spinner} {wide_msg}")
        .unwrap()
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");

    loop {
        print!("> ");
        std::io::stdout().flush().unwrap();

        let Some(line) = read_line().await else {
            break;
        };
        let line = line.trim();
        if line.is_empty() {
            // Empty submissions are never sent.
            continue;
        }

        let outcome = run_send_cycle(&mut chat, line, &progress_style).await;

        match outcome {
            SendOutcome::Replied(reply) => print_reply(&reply.text),
            SendOutcome::Failed { .. } => {
                // The synthetic error reply is the last conversation
                // item; render it visually distinct from a normal one.
                if let Some(reply) = chat.conversation().last() {
                    println!(
                        "{}🤖 {}",
                        BAR_CHAR.bright_red(),
                        reply.text.bright_white()
                    );
                }
            }
        }
        if let Some(banner) = chat.last_error() {
            println!("{}", format!("⚠️  {banner}").bright_yellow());
        }
    }
}

/// Runs one send cycle while ticking a spinner as the typing
/// indicator. The send future is scoped so the chat can be read again
/// for rendering as soon as the cycle resolves.
async fn run_send_cycle(
    chat: &mut Chat,
    text: &str,
    progress_style: &ProgressStyle,
) -> SendOutcome {
    let progress_bar = ProgressBar::new_spinner();
    progress_bar.set_style(progress_style.clone());
    progress_bar.set_message("🤖 Typing...");

    let outcome = {
        let send = chat.send(text);
        tokio::pin!(send);
        loop {
            select! {
                outcome = &mut send => break outcome,
                _ = sleep(Duration::from_millis(100)) => {
                    progress_bar.inc(1);
                }
            }
        }
    };
    progress_bar.finish_and_clear();
    outcome
}

fn print_reply(text: &str) {
    println!("{}🤖 {}", BAR_CHAR.bright_cyan(), text.bright_white());
}

async fn read_line() -> Option<String> {
    let mut stdin = io::BufReader::new(io::stdin());
    let mut line = String::new();

    match stdin.read_line(&mut line).await {
        Ok(count) => {
            if count == 0 {
                return None;
            }
            Some(line)
        }
        Err(err) => {
            error!("error reading input: {}", err);
            None
        }
    }
}
