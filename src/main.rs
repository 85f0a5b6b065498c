use clap::Parser;
use loan_scout::utils::{logger, validation::Validate};
use loan_scout::{CliConfig, Command, GraphQlLoanClient, LoanScanner};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);

    tracing::info!("Starting loan-scout");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置；只有配置錯誤會中止程式
    let config = match cli.scan_config().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    let client = match GraphQlLoanClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!("❌ Could not build HTTP client: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!("Using endpoint {}", client.endpoint());

    let pages = config.scan.pages;
    let scanner = LoanScanner::new(client, &config);

    match cli.command() {
        Command::Debug { .. } => {
            let direct = scanner.debug_age_field(pages).await;
            tracing::info!("Printed {} LoanDirect records from {} pages", direct.len(), pages);
        }
        Command::Youth { .. } => {
            let youth = scanner.collect_youth_loans(pages).await;
            let range = config.age_range();

            println!(
                "\nFound {} loans with borrower age {}-{}:",
                youth.len(),
                range.min,
                range.max
            );
            for loan in &youth {
                println!("{}", loan);
            }
        }
    }

    Ok(())
}
