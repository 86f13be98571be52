//! Bookify: book recommendations and reading assistant
//!
//! Usage:
//!   bookify                     - Start the desktop app
//!   bookify recommend [query]   - Fetch recommendations once and print them
//!   bookify ask <message>       - Ask the assistant once and print the reply
//!   bookify config              - Show resolved settings
//!   bookify help                - Show help

mod app;
mod ui;

use std::env;

use anyhow::{anyhow, bail, Context};
use iced::{window, Size, Task};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use app::Bookify;
use bookify::backend::{BackendClient, Genre};
use bookify::state::{ChatController, RecommendationController, RequestState, Role};
use bookify::Settings;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    // Help must work even when the settings are broken
    if args.get(1).is_some_and(|cmd| is_help(cmd)) {
        print_help();
        return Ok(());
    }

    let settings = Settings::load()?;
    init_logging(&settings);

    if args.len() > 1 {
        return handle_cli_command(&args[1], &args[2..], &settings);
    }

    start_app(settings)
}

fn is_help(cmd: &str) -> bool {
    matches!(cmd, "help" | "--help" | "-h")
}

fn print_help() {
    println!("Bookify - book recommendations and reading assistant\n");
    println!("Usage: bookify [command]\n");
    println!("Commands:");
    println!("  (none)                        Start the desktop app");
    println!("  recommend [options] [query]   Fetch recommendations once");
    println!("      --genre <name>            fiction, fantasy, mystery, romance or any");
    println!("      --min-rating <1.0-5.0>    Minimum rating (default 4.0)");
    println!("  ask <message>                 Ask the book assistant once");
    println!("  config                        Show resolved settings");
    println!("  help                          Show this help message");
    println!("\nSettings come from BOOKIFY_* environment variables, ./bookify.toml");
    println!("or the user config file shown by 'bookify config'.");
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    // use try_init to avoid panic if a subscriber is already set
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

fn backend_client(settings: &Settings) -> anyhow::Result<BackendClient> {
    BackendClient::with_timeout(&settings.backend_url, settings.request_timeout())
        .context("failed to create HTTP client")
}

fn handle_cli_command(cmd: &str, args: &[String], settings: &Settings) -> anyhow::Result<()> {
    match cmd {
        "recommend" | "search" => run_recommend(args, settings),
        "ask" | "chat" => run_ask(args, settings),
        "config" => {
            println!("backend_url          = {}", settings.backend_url);
            println!("request_timeout_secs = {}", settings.request_timeout_secs);
            println!("log_filter           = {}", settings.log_filter);
            match Settings::user_config_path() {
                Some(path) => println!("\nUser config file: {}", path.display()),
                None => println!("\nNo user config directory on this platform"),
            }
            Ok(())
        }
        _ => bail!("Unknown command: {}. Run 'bookify help' for usage", cmd),
    }
}

fn run_recommend(args: &[String], settings: &Settings) -> anyhow::Result<()> {
    let mut controller = RecommendationController::new();
    let mut query = Vec::new();

    let mut args = args.iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--genre" => {
                let value = args.next().ok_or_else(|| anyhow!("--genre needs a value"))?;
                let genre = Genre::parse(value).ok_or_else(|| anyhow!("unknown genre: {}", value))?;
                controller.set_genre(genre);
            }
            "--min-rating" => {
                let value = args
                    .next()
                    .ok_or_else(|| anyhow!("--min-rating needs a value"))?;
                let rating: f32 = value
                    .parse()
                    .with_context(|| format!("invalid rating: {}", value))?;
                controller.set_min_rating(rating);
            }
            word => query.push(word),
        }
    }
    controller.set_query(query.join(" "));

    let client = backend_client(settings)?;
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    let call = controller.submit();
    let done = rt.block_on(call.run(client));
    controller.finish(done);

    match controller.state() {
        RequestState::Failed(message) => bail!("{}", message),
        _ if controller.results().is_empty() => println!("No recommendations found."),
        _ => {
            for book in controller.results() {
                println!("{} - {} ({}) ★ {:.1}", book.title, book.author, book.year, book.rating);
                if !book.description.is_empty() {
                    println!("    {}", book.description);
                }
                if let Some(reason) = &book.match_reason {
                    println!("    Why: {}", reason);
                }
            }
        }
    }
    Ok(())
}

fn run_ask(args: &[String], settings: &Settings) -> anyhow::Result<()> {
    let mut chat = ChatController::new();
    let Some(call) = chat.send(&args.join(" ")) else {
        bail!("Usage: bookify ask <message>");
    };

    let client = backend_client(settings)?;
    let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
    let done = rt.block_on(call.run(client));
    chat.finish(done);

    for turn in chat.transcript() {
        let speaker = match turn.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        println!("{}: {}\n", speaker, turn.text);
    }
    Ok(())
}

fn start_app(settings: Settings) -> anyhow::Result<()> {
    let backend = backend_client(&settings)?;
    tracing::info!("Starting Bookify against {}", backend.base_url());

    iced::application("Bookify", Bookify::update, Bookify::view)
        .theme(Bookify::theme)
        .window(window::Settings {
            size: Size::new(1100.0, 720.0),
            position: window::Position::Centered,
            min_size: Some(Size::new(720.0, 480.0)),
            ..Default::default()
        })
        .antialiasing(true)
        .run_with(move || (Bookify::new(backend.clone()), Task::none()))
        .context("desktop app exited with an error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_aliases() {
        for cmd in ["help", "--help", "-h"] {
            assert!(is_help(cmd));
        }
        assert!(!is_help("recommend"));
        assert!(!is_help("config"));
    }
}
