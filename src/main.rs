use anyhow::Result;
use clap::Parser;
use std::path::Path;
use tracing::{error, info, Subscriber};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use trainify::cli::{Cli, Commands, EntityKind};
use trainify::config::Config;
use trainify::repository::PageQuery;
use trainify::session::{AuthSession, FileSessionStore};
use trainify::table::SortDirection;

/// Log to `dir/log_file`, and to stderr as well outside the TUI
fn build_subscriber(dir: &Path, log_file: &str, tui_mode: bool) -> impl Subscriber + Send + Sync {
    let file_appender = tracing_appender::rolling::never(dir, log_file);
    let file_layer = fmt::layer()
        .with_writer(file_appender)
        .with_ansi(false)
        .with_filter(EnvFilter::from_default_env())
        .boxed();

    // stderr would draw over the TUI, so the dashboard logs to the file only
    let stderr_layer = (!tui_mode).then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(EnvFilter::from_default_env())
            .boxed()
    });

    tracing_subscriber::registry().with(file_layer).with(stderr_layer)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set default log level to INFO if not specified
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "trainify=info");
    }

    let config = Config::from_env()?;
    config.validate()?;

    let tui_mode = matches!(cli.command, None | Some(Commands::Tui));
    build_subscriber(Path::new("."), &config.log_file, tui_mode).init();

    let mut session = AuthSession::restore(Box::new(FileSessionStore::new(
        config.session_path.clone(),
    )))?;

    match cli.command {
        None | Some(Commands::Tui) => {
            if let Err(e) = trainify::tui::run_tui(config, session).await {
                error!("TUI exited with error: {}", e);
                return Err(e);
            }
        }

        Some(Commands::List {
            entity,
            page,
            page_size,
            sort,
            desc,
            search,
        }) => {
            let kind = EntityKind::parse(&entity)?;
            let mut query = PageQuery::new(page_size.unwrap_or(config.page_size)).with_page(page.max(1));
            if let Some(search) = search {
                query = query.with_search(&search);
            }
            if let Some(sort) = sort {
                let direction = if desc {
                    SortDirection::Desc
                } else {
                    SortDirection::Asc
                };
                query = query.with_sort(&sort, direction);
            }

            info!("Listing {} (page {})", entity, query.page);
            print!("{}", kind.render(&query).await?);
        }

        Some(Commands::Login { email, password }) => {
            let user = session.login(&email, &password)?;
            println!("Signed in as {} ({})", user.email, user.role.as_str());
        }

        Some(Commands::Logout) => {
            session.logout()?;
            println!("Signed out");
        }

        Some(Commands::Whoami) => match session.user() {
            Some(user) => println!("{} <{}> ({})", user.name, user.email, user.role.as_str()),
            None => println!("Not signed in"),
        },
    }

    Ok(())
}
