use std::env;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use synapse_cli::commands::{parse_line, show_help, Line};
use synapse_cli::health::wait_for_backend;
use synapse_cli::render::{print_documents, print_graph, print_updates};
use synapse_client::HttpBackend;
use synapse_core::config::Config;
use synapse_explorer::{Command, MemoryNavigation, QueryController, Session, Update};

struct Args {
    location: Option<String>,
    max_attempts: Option<usize>,
    skip_health: bool,
}

fn parse_args() -> Args {
    let args: Vec<String> = env::args().skip(1).collect();
    let mut parsed = Args { location: None, max_attempts: None, skip_health: false };
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--skip-health" => parsed.skip_health = true,
            "--max-attempts" => match args.get(i + 1).and_then(|n| n.parse::<usize>().ok()) {
                Some(n) => {
                    parsed.max_attempts = Some(n);
                    i += 1;
                }
                None => {
                    eprintln!("Error: --max-attempts requires a number");
                    std::process::exit(1);
                }
            },
            "--help" | "-h" => {
                println!("Usage: synapse [--max-attempts N] [--skip-health] [\"?query=...&node=...&page=...\"]");
                std::process::exit(0);
            }
            other if !other.starts_with("--") => parsed.location = Some(other.to_string()),
            other => {
                eprintln!("Unknown option: {}", other);
                std::process::exit(1);
            }
        }
        i += 1;
    }
    parsed
}

fn read_lines(tx: mpsc::UnboundedSender<String>) {
    for line in io::stdin().lock().lines() {
        let Ok(line) = line else { break };
        if tx.send(line).is_err() {
            break;
        }
    }
}

fn prompt() -> io::Result<()> {
    print!("search> ");
    io::stdout().flush()
}

/// Move through history and re-hydrate from the entry landed on.
fn step_history(session: &mut Session<MemoryNavigation>, backwards: bool) -> Vec<Update> {
    let mut moved = false;
    let updates = session.apply_with(|controller, _| {
        let nav = controller.navigation_mut().port_mut();
        moved = if backwards { nav.back() } else { nav.forward() };
        if moved {
            controller.hydrate_from_url()
        } else {
            Vec::new()
        }
    });
    if !moved {
        println!("Nothing {} in history", if backwards { "back" } else { "forward" });
    }
    updates
}

enum Event {
    Line(Option<String>),
    Updates(Vec<Update>),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let config = Config::load().map_err(|e| {
        eprintln!("Error loading config: {}", e);
        e
    })?;
    let settings = config.settings()?;
    let args = parse_args();

    println!("🔍 Synapse Explorer");
    println!("===================");
    println!("Backend: {}", settings.base_url);

    let backend = Arc::new(HttpBackend::new(&settings.base_url, settings.request_timeout())?);
    if !args.skip_health {
        wait_for_backend(&*backend, settings.health_retry(), args.max_attempts).await?;
    }
    println!();
    show_help();

    let nav = match &args.location {
        Some(location) => MemoryNavigation::starting_at(location),
        None => MemoryNavigation::new(),
    };
    let mut session = Session::new(QueryController::new(nav, settings), backend);
    session.start();

    let (tx, mut lines) = mpsc::unbounded_channel();
    std::thread::spawn(move || read_lines(tx));
    prompt()?;

    loop {
        let event = tokio::select! {
            line = lines.recv() => Event::Line(line),
            updates = session.next_updates(), if !session.is_idle() => Event::Updates(updates),
        };

        let input = match event {
            Event::Updates(updates) => {
                if !updates.is_empty() {
                    print_updates(session.controller(), &updates);
                    prompt()?;
                }
                continue;
            }
            Event::Line(None) => break,
            Event::Line(Some(input)) => input,
        };

        let Some(line) = parse_line(&input) else {
            prompt()?;
            continue;
        };
        let updates = match line {
            Line::Search(text) => {
                session.apply(Command::Input(text));
                session.apply(Command::Commit(None))
            }
            Line::Spell(text) => session.apply(Command::Input(text)),
            Line::Accept => {
                if session.controller().suggestion().is_none() {
                    println!("No suggestion to accept");
                }
                session.apply(Command::AcceptSuggestion)
            }
            Line::Node(id) => {
                let graph = session.controller().graph();
                match graph.node(&id) {
                    Some(node) => {
                        println!("➡️  {} ({} links)", node.id, graph.links_touching(&node.id).count());
                        session.apply(Command::NodeClick(id))
                    }
                    None => {
                        println!("❌ Unknown node: {} (/graph lists nodes)", id);
                        Vec::new()
                    }
                }
            }
            Line::Tag(tag) => session.apply(Command::TagClick(tag)),
            Line::Page(page) => session.apply(Command::Page(page)),
            Line::Tagged(id) => {
                let titles: Vec<&str> = session.controller().documents_tagged(&id).map(|d| d.title.as_str()).collect();
                if titles.is_empty() {
                    println!("No documents on this page tagged {}", id);
                }
                for title in titles {
                    println!("  • {}", title);
                }
                Vec::new()
            }
            Line::Docs => {
                print_documents(session.controller());
                Vec::new()
            }
            Line::Graph => {
                print_graph(session.controller());
                Vec::new()
            }
            Line::Back => step_history(&mut session, true),
            Line::Forward => step_history(&mut session, false),
            Line::Help => {
                show_help();
                Vec::new()
            }
            Line::Quit => {
                println!("👋 Goodbye!");
                break;
            }
            Line::Invalid(message) => {
                println!("❌ {}", message);
                Vec::new()
            }
        };
        print_updates(session.controller(), &updates);
        prompt()?;
    }

    Ok(())
}
