use anyhow::Context;
use clap::Parser;
use std::io::Write;
use surprise_page::config::load_profile_draft;
use surprise_page::utils::error::{ErrorSeverity, PageError};
use surprise_page::utils::{logger, validation::Validate};
use surprise_page::{AppConfig, CliConfig, PublishFlow};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting surprise-page");
    tracing::debug!("CLI config: {:?}", cli);

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let draft = load_profile_draft(&cli.profile)
        .with_context(|| format!("Failed to read profile '{}'", cli.profile))?;
    let profile = match config.defaults.apply(draft) {
        Ok(profile) => profile,
        Err(e) => exit_with(&e),
    };

    let fetcher = config.build_fetcher()?;
    let publisher = config.build_publisher()?;
    let flow = if cli.no_embed || !config.resolver.enabled {
        tracing::info!("🔗 Media embedding disabled, images load from their URLs");
        PublishFlow::without_resolver(publisher)
    } else {
        PublishFlow::new(surprise_page::MediaResolver::new(fetcher), publisher)
    };

    if cli.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the page is printed instead of published");
        let (document, report) = flow.render(profile).await;
        tracing::info!(
            "{} media item(s) embedded, {} left external",
            report.embedded(),
            report.failed()
        );
        std::io::stdout()
            .write_all(document.as_bytes())
            .context("Failed to write page to stdout")?;
        return Ok(());
    }

    let flow = match config.build_metadata_sink()? {
        Some(sink) => flow.with_metadata(sink),
        None => flow,
    };

    match flow.run(profile).await {
        Ok(outcome) => {
            println!("✅ Your page is ready!");
            println!("🔗 {}", outcome.receipt.locator);
            if !outcome.metadata_saved && config.metadata.kind != "none" {
                eprintln!("⚠️ The page was published but its metadata could not be saved");
            }
        }
        Err(e) => exit_with(&e),
    }

    Ok(())
}

fn load_config(cli: &CliConfig) -> surprise_page::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            AppConfig::from_file(path)?
        }
        None => AppConfig::default(),
    };

    // 命令列參數優先於設定檔
    if let Some(output_path) = &cli.output_path {
        config.publisher.output_path = Some(output_path.clone());
    }

    config.validate()?;
    Ok(config)
}

fn exit_with(e: &PageError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
