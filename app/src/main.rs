//! Terminal front end for the todo store.
//!
//! Loads the list on start, redraws after every state change and reads one
//! command per line from stdin:
//!
//! ```text
//! toggle <id>    flip a todo's checkbox
//! delete <id>    delete a todo
//! add <text>     click the add button with <text> typed in
//! quit           leave (in-flight requests are abandoned)
//! <anything>     type the line into the input box and press Enter
//! ```

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};
use todo_core::{intent_for, render, Config, Dispatcher, Intent, Store, TodoApi, UserInput};

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Input(UserInput),
    Quit,
}

fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    let (head, rest) = line
        .trim_start()
        .split_once(' ')
        .unwrap_or((line.trim_start(), ""));

    let id = rest.trim().parse().ok();
    let input = match (head, id) {
        ("quit" | "exit", _) if rest.trim().is_empty() => return Command::Quit,
        ("toggle", Some(id)) => UserInput::CheckboxChanged(id),
        ("delete", Some(id)) => UserInput::DeleteClicked(id),
        ("add", _) => UserInput::AddClicked(rest.to_string()),
        _ => UserInput::EnterKey(line.to_string()),
    };
    Command::Input(input)
}

fn draw(screen: &str) {
    // Clear and home the cursor before each frame.
    print!("\x1b[2J\x1b[H{screen}\n> ");
    let _ = std::io::stdout().flush();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=info,todo_core=warn".into()),
        )
        .init();

    let config = Config::from_env()?;
    tracing::info!(base_url = %config.base_url, latency = ?config.latency, "starting");

    let store = Store::spawn(Dispatcher::new(TodoApi::from_config(&config)));

    let mut updates = store.subscribe();
    draw(&render(&updates.borrow_and_update()));
    tokio::spawn(async move {
        while updates.changed().await.is_ok() {
            let screen = render(&updates.borrow_and_update());
            draw(&screen);
        }
    });

    store.dispatch(Intent::Load)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let input = match parse_command(&line) {
            Command::Quit => break,
            Command::Input(input) => input,
        };
        if let Some(intent) = intent_for(&store.snapshot(), input, config.owner_id) {
            store.dispatch(intent)?;
        }
    }

    if store.in_flight() > 0 {
        tracing::info!(in_flight = store.in_flight(), "leaving with requests in flight");
    }
    Ok(())
}
