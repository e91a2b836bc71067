use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    AuthHeaderProvider, BearerTokenAuth, ErrorNotifier, Storefront, StorefrontClient, UiAction,
};
use shared::domain::{OrderId, ProductId};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod config;

use config::{load_settings, normalize_base_url, DEFAULT_CONFIG_FILE};

#[derive(Parser, Debug)]
#[command(about = "Storefront cart and order history client")]
struct Args {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    token: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the cart.
    Cart,
    /// Add one unit of a product.
    Add { product_id: i64 },
    Increase { product_id: i64 },
    /// Take one unit away; the line is removed at zero.
    Decrease { product_id: i64 },
    Set { product_id: i64, quantity: u32 },
    Remove { product_id: i64 },
    Clear,
    Checkout,
    /// List past orders.
    Orders,
    /// Show one order with its line items.
    Order { order_id: i64 },
    /// Interactive session driven by numbered page actions.
    Shell,
}

struct ConsoleNotifier;

impl ErrorNotifier for ConsoleNotifier {
    fn notify_error(&self, message: &str) {
        eprintln!("error: {message}");
    }

    fn notify_success(&self, message: &str) {
        println!("{message}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(&args.config);
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(token) = args.token {
        settings.auth_token = Some(token);
    }
    let base_url = normalize_base_url(&settings.base_url)?;

    let auth: Arc<dyn AuthHeaderProvider> =
        Arc::new(BearerTokenAuth::from_optional(settings.auth_token));
    let client = StorefrontClient::new(&base_url, Arc::clone(&auth))
        .context("failed to build storefront client")?;
    tracing::info!(%base_url, signed_in = auth.is_logged_in(), "storefront client ready");

    let mut store = Storefront::new(Arc::new(client), auth, Arc::new(ConsoleNotifier));
    store.enter().await;

    let ok = run_command(&mut store, args.command).await?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

async fn run_command(store: &mut Storefront, command: Command) -> Result<bool> {
    let ok = match command {
        Command::Cart => store.dispatch(UiAction::ShowCart).await,
        Command::Add { product_id } | Command::Increase { product_id } => {
            store.dispatch(UiAction::AddOne(ProductId(product_id))).await
        }
        Command::Decrease { product_id } => {
            store.dispatch(UiAction::DecreaseOne(ProductId(product_id))).await
        }
        Command::Set {
            product_id,
            quantity,
        } => store.set_quantity(ProductId(product_id), quantity).await,
        Command::Remove { product_id } => {
            store.dispatch(UiAction::Remove(ProductId(product_id))).await
        }
        Command::Clear => store.dispatch(UiAction::ClearCart).await,
        Command::Checkout => store.dispatch(UiAction::Checkout).await,
        Command::Orders => store.show_orders().await,
        Command::Order { order_id } => store.show_order(OrderId(order_id)).await,
        Command::Shell => {
            run_shell(store).await?;
            return Ok(true);
        }
    };

    print!("{}", store.page().render_text());
    Ok(ok)
}

async fn run_shell(store: &mut Storefront) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    store.dispatch(UiAction::ShowCart).await;

    loop {
        let actions = store.page().actions();
        print!("{}", store.page().render_text());
        println!("---");
        for (index, (label, action)) in actions.iter().enumerate() {
            println!("{:>3}) {label} ({})", index + 1, action.name());
        }
        println!("  q) quit");

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            return Ok(());
        };
        let choice = line.trim();
        if choice.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        match choice
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| actions.get(index))
        {
            Some((_, action)) => {
                store.dispatch(action.clone()).await;
            }
            None => eprintln!("unknown choice: {choice}"),
        }
    }
}
