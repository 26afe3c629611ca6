use clap::Parser;
use detail_booking::core::calendar::detect_platform;
use detail_booking::domain::ports::{BookingSubmitter, ConfigProvider};
use detail_booking::utils::error::ErrorSeverity;
use detail_booking::utils::logger::{self, LogFormat};
use detail_booking::utils::validation::Validate;
use detail_booking::{
    BookingConfig, BookingEngine, BookingReceipt, BookingRequest, BookingWizard, CalendarExporter,
    CliConfig, DryRunSubmitter, FormRelaySubmitter, LocalStorage, RelaySettings, SystemClock,
};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliConfig::parse();

    // 初始化日誌
    let log_format = if args.log_json {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    logger::init_logger(log_format, args.verbose)?;

    tracing::info!("🚀 Starting detail-booking");
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    if let Err(e) = args.validate() {
        tracing::error!("❌ Argument validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let config = if Path::new(&args.config).exists() {
        tracing::info!("📁 Loading configuration from: {}", args.config);
        match BookingConfig::from_file(&args.config) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        }
    } else {
        tracing::warn!("⚠️ Config file '{}' not found, using defaults", args.config);
        BookingConfig::default()
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let request = match BookingRequest::from_file(&args.request) {
        Ok(request) => request,
        Err(e) => {
            eprintln!("❌ Failed to load booking request '{}': {}", args.request, e);
            std::process::exit(1);
        }
    };
    if let Err(e) = request.validate() {
        tracing::error!("❌ Booking request is invalid: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let submitter: Box<dyn BookingSubmitter> = if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - the booking will not be sent");
        Box::new(DryRunSubmitter)
    } else if config.relay_endpoint().is_empty() {
        eprintln!("❌ No relay endpoint configured");
        eprintln!("💡 Set [relay] endpoint in {} or pass --dry-run", args.config);
        std::process::exit(1);
    } else {
        Box::new(FormRelaySubmitter::new(RelaySettings::from_config(&config)))
    };

    let wizard = BookingWizard::new(submitter, SystemClock);
    let exporter = CalendarExporter::new(config.calendar_settings());
    let storage = LocalStorage::new(config.output_path().to_string());
    let mut engine = BookingEngine::new(wizard, exporter, storage);

    let platform = detect_platform(&args.user_agent);

    match engine.run(&request, platform).await {
        Ok(receipt) => {
            tracing::info!("✅ Booking confirmed!");
            print_receipt(&receipt);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Booking failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2, // 可重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn print_receipt(receipt: &BookingReceipt) {
    println!("✅ Booking Confirmed!");
    println!("📋 Appointment Details:");
    println!("  Service: {}", receipt.service);
    println!("  Vehicle: {}", receipt.vehicle);
    println!(
        "  When: {} at {}",
        receipt.date.format("%A, %B %-d, %Y"),
        receipt.time
    );
    println!("📁 Calendar file: {}", receipt.ics_path);
    println!();
    println!("📅 Add to calendar:");
    for link in &receipt.links {
        println!("  {}: {}", link.name, link.url);
    }
}
