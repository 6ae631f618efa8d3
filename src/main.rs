use clap::Parser;
use small_dex::utils::logger;
use small_dex::{CliConfig, Session, Shell, SourceResolver};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting small-dex");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 合併 TOML 與命令列設定並驗證
    let settings = match config.settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.exit_code().max(1));
        }
    };

    tracing::debug!("Settings: {:?}", settings);

    let session = Session::new(SourceResolver::new(&settings));
    let shell = Shell::new(
        session,
        &settings,
        BufReader::new(tokio::io::stdin()),
        std::io::stdout(),
    )
    .with_initial_file(config.file.clone());

    if let Err(e) = shell.run().await {
        tracing::error!(
            "❌ Shell failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
