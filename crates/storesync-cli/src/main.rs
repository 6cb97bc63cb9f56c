use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use storesync_core::SyncConfig;
use storesync_core::app::{
    hydrate, hydrate_json, load_user_detail_page, load_users_page, user_detail_view,
    HydrationReport,
};
use storesync_core::impls::{Dispatcher, MockUserApi};
use storesync_core::ports::UserSource;
use storesync_core::typed::StoreRegistry;

#[derive(Debug, Parser)]
#[command(name = "storesync", about = "Server-to-client store synchronization demo")]
struct Cli {
    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the user list latency
    #[arg(long)]
    users_latency_ms: Option<u64>,

    /// Override the user detail latency
    #[arg(long)]
    detail_latency_ms: Option<u64>,

    /// Make the mock API fail every request
    #[arg(long)]
    outage: bool,

    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load the user list page and hydrate in-process
    Users,

    /// Load a user detail page and hydrate in-process
    User {
        id: Option<String>,
    },

    /// Load a page, send it through JSON, then hydrate from the JSON
    Wire {
        /// Detail page id (list page when omitted)
        #[arg(long)]
        id: Option<String>,
    },
}

fn load_config(cli: &Cli) -> anyhow::Result<SyncConfig> {
    let mut config = match &cli.config {
        Some(path) => SyncConfig::from_path(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SyncConfig::default(),
    };
    if let Some(ms) = cli.users_latency_ms {
        config.users_latency_ms = ms;
    }
    if let Some(ms) = cli.detail_latency_ms {
        config.detail_latency_ms = ms;
    }
    Ok(config)
}

fn print_report(registry: &StoreRegistry, report: &HydrationReport) -> anyhow::Result<()> {
    for name in &report.applied {
        let snapshot = registry.handle(*name).snapshot()?;
        println!("{name}: {}", serde_json::to_string_pretty(&snapshot)?);
    }
    for (key, value) in &report.raw {
        println!("(raw) {key}: {value}");
    }
    for (key, err) in &report.failed {
        println!("(failed) {key}: {err}");
    }
    Ok(())
}

/// 描画してから、失敗があればページ層のエラーとして返す
fn finish(registry: &StoreRegistry, report: HydrationReport) -> anyhow::Result<()> {
    print_report(registry, &report)?;
    report
        .into_result()
        .map_err(|e| anyhow::anyhow!("{} {e}", e.status_code()))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // (A) サーバー側: 設定とデータ取得元
    let config = load_config(&cli)?;
    let mut api = MockUserApi::new(&config);
    if cli.outage {
        api = api.with_outage("mock outage");
    }
    let source: Arc<dyn UserSource> = Arc::new(api);

    // (B) クライアント側: registry と dispatcher（プロセスで 1 つ）
    let registry = Arc::new(StoreRegistry::new());
    let dispatcher = Dispatcher::new(registry.clone());

    // (C) loading の変化を表示する購読者
    let mut loading = registry.users().loading.subscribe();
    let watcher = tokio::spawn(async move {
        while loading.changed().await.is_ok() {
            let now = *loading.borrow_and_update();
            tracing::info!(loading = now, "usersStore loading changed");
        }
    });

    // (D) ページを読み込んで hydrate
    match cli.command {
        Command::Users => {
            let page = load_users_page(source);
            let report = hydrate(&dispatcher, page).await;
            finish(&registry, report)?;
        }
        Command::User { id } => {
            let page = load_user_detail_page(source, id.as_deref())
                .map_err(|e| anyhow::anyhow!("{} {e}", e.status_code()))?;
            let report = hydrate(&dispatcher, page).await;
            finish(&registry, report)?;

            let id = id.unwrap_or_default();
            match user_detail_view(&registry, &id) {
                Ok(user) => println!("rendered: {} <{}>", user.name, user.email),
                Err(e) => anyhow::bail!("{} {e}", e.status_code()),
            }
        }
        Command::Wire { id } => {
            let page = match id.as_deref() {
                Some(id) => load_user_detail_page(source, Some(id))
                    .map_err(|e| anyhow::anyhow!("{} {e}", e.status_code()))?,
                None => load_users_page(source),
            };
            let wire = page.into_json().await?;
            println!("wire: {}", serde_json::to_string(&wire)?);

            let report = hydrate_json(&dispatcher, wire).await;
            finish(&registry, report)?;
        }
    }

    // (E) サンプルなので購読者を止める
    watcher.abort();
    Ok(())
}
