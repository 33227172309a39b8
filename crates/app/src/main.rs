mod chat;
mod commands;
mod render;
mod state;
mod store;

use anyhow::Result;
use providers::ResponseGateway;
use services::export::ConversationExport;
use services::intent::analyze;
use services::preferences::PreferenceStore;
use shared::config::CoachConfig;
use shared::mode::Mode;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinHandle};
use tracing_subscriber::EnvFilter;

use chat::{PendingSend, ResolvedReply, SendOutcome};
use commands::{Command, HELP};
use state::Action;
use store::SessionStore;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn prompt(store: &SessionStore) {
    let mode = store.state().current_mode();
    print!("{} {} > ", mode.icon(), mode.key());
    let _ = std::io::stdout().flush();
}

/// Resolves once the in-flight reply is ready; never resolves when idle.
async fn next_reply(
    in_flight: &mut Option<JoinHandle<ResolvedReply>>,
) -> Result<ResolvedReply, JoinError> {
    match in_flight {
        Some(handle) => handle.await,
        None => std::future::pending().await,
    }
}

struct Repl {
    store: SessionStore,
    gateway: Arc<ResponseGateway>,
    pending: Option<PendingSend>,
    in_flight: Option<JoinHandle<ResolvedReply>>,
}

enum Flow {
    Continue,
    Quit,
}

impl Repl {
    fn send(&mut self, text: &str) {
        match chat::begin_send(&mut self.store, text) {
            Ok(pending) => {
                if let Some(notice) = render::crisis_notice(&analyze(&pending.message)) {
                    println!("{}", notice);
                }
                println!("Coach is typing...");

                let gateway = self.gateway.clone();
                let request = pending.clone();
                self.in_flight = Some(tokio::spawn(async move {
                    chat::resolve_reply(&gateway, &request).await
                }));
                self.pending = Some(pending);
            }
            Err(e) => println!("{}", e),
        }
    }

    fn finish(&mut self, result: Result<ResolvedReply, JoinError>) {
        self.in_flight = None;
        let Some(pending) = self.pending.take() else {
            return;
        };
        let reply = result.unwrap_or_else(|e| {
            tracing::error!("Reply task failed: {}", e);
            ResolvedReply {
                text: chat::APOLOGY.to_string(),
                source: None,
            }
        });

        if let SendOutcome::Delivered(reply) = chat::complete_send(&mut self.store, &pending, reply)
        {
            tracing::debug!(source = ?reply.source, "Reply delivered");
            let state = self.store.state();
            if let Some(msg) = state.last_bot_message() {
                println!("{}", render::reply(msg, &state.settings, self.store.dark_mode()));
            }
            if let Some(hint) = render::suggestions(&reply.text) {
                println!("{}", hint);
            }
        }
    }

    fn run_command(&mut self, command: Command) -> Flow {
        match command {
            Command::SelectMode(key) => {
                if Mode::from_key(&key).is_none() {
                    println!("Unknown mode '{}'. Available modes:", key);
                    println!("{}", render::mode_list(self.store.state().selected_mode));
                } else {
                    self.store.dispatch(Action::SelectMode(key));
                    println!("{}", render::mode_banner(self.store.state().selected_mode));
                }
            }
            Command::ListModes => {
                println!("{}", render::mode_list(self.store.state().selected_mode))
            }
            Command::Prompts => {
                println!("{}", render::quick_prompts(self.store.state().selected_mode))
            }
            Command::Ai(value) => {
                match value {
                    Some(enabled) => self.store.dispatch(Action::SetAi(enabled)),
                    None => self.store.dispatch(Action::ToggleAi),
                }
                let state = self.store.state();
                let has_key = !state.user_api_key.is_empty() || self.gateway.has_default_key();
                match (state.use_ai, has_key) {
                    (true, true) => println!("Remote replies on"),
                    (true, false) => {
                        println!("Remote replies on, but no API key is set. Use /key <value>.")
                    }
                    (false, _) => println!("Remote replies off, using built-in replies"),
                }
            }
            Command::SetKey(key) => {
                let cleared = key.is_empty();
                self.store.dispatch(Action::SetApiKey(key));
                if cleared {
                    println!("API key cleared");
                } else {
                    println!(
                        "API key saved ({})",
                        services::credentials::mask(&self.store.state().user_api_key)
                    );
                }
            }
            Command::Settings(patch) => {
                self.store.dispatch(Action::MergeSettings(patch));
                println!("{}", render::settings(&self.store.state().settings));
            }
            Command::Stats => {
                let remote = !self.store.state().user_api_key.is_empty()
                    || self.gateway.has_default_key();
                println!("{}", render::stats(self.store.state(), remote));
            }
            Command::Export(path) => {
                let export = ConversationExport::from_messages(&self.store.state().messages);
                let target = path.unwrap_or_else(|| Path::new(".").to_path_buf());
                match export.write_to(&target) {
                    Ok(written) => println!("Conversation saved to {}", written.display()),
                    Err(e) => println!("Export failed: {:#}", e),
                }
            }
            Command::Clear => {
                chat::clear_session(&mut self.store, &self.gateway);
                println!("{}", render::transcript(self.store.state(), self.store.dark_mode()));
            }
            Command::Theme => {
                let dark = self.store.toggle_dark_mode();
                println!("{} theme", if dark { "Dark" } else { "Light" });
            }
            Command::Help => println!("{}", HELP),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        if line.trim().is_empty() {
            return Flow::Continue;
        }
        match commands::parse(line) {
            Some(Ok(command)) => self.run_command(command),
            Some(Err(e)) => {
                println!("{}", e);
                Flow::Continue
            }
            None => {
                self.send(line);
                Flow::Continue
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = CoachConfig::from_env();
    let prefs = PreferenceStore::open(config.config_dir.as_deref());
    let store = SessionStore::with_plaintext_vault(prefs);
    let gateway = Arc::new(ResponseGateway::new(&config)?);

    let mut repl = Repl {
        store,
        gateway,
        pending: None,
        in_flight: None,
    };

    println!("{}", render::mode_banner(repl.store.state().selected_mode));
    println!(
        "{}",
        render::transcript(repl.store.state(), repl.store.dark_mode())
    );
    if let Some(example) = repl.store.state().current_mode().random_quick_prompt() {
        println!("Try: \"{}\"", example);
    }
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    prompt(&repl.store);

    loop {
        tokio::select! {
            result = next_reply(&mut repl.in_flight) => {
                repl.finish(result);
                prompt(&repl.store);
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if let Flow::Quit = repl.handle_line(&line) {
                    break;
                }
                if repl.in_flight.is_none() {
                    prompt(&repl.store);
                }
            }
        }
    }

    if let Some(handle) = repl.in_flight.take() {
        handle.abort();
    }
    tracing::debug!("Exiting");
    Ok(())
}
