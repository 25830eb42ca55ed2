use std::io::{self, Write};

use calc_suite::app::{commands::run_gpa_command, repl};
use calc_suite::domain::ports::ConfigProvider;
use calc_suite::utils::logger;
use calc_suite::{AppSettings, CalculatorEngine, CliConfig, Command, GpaLedger, JsonFileStore, SuiteError};
use clap::Parser;

fn report_failure(e: &SuiteError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code());
}

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 設定檔錯誤發生在日誌初始化之前，直接輸出到 stderr
    let settings = match AppSettings::resolve(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Configuration validation failed: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    if settings.json_logging() {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!("CLI config: {:?}", cli);
    tracing::debug!("Resolved settings: {:?}", settings);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Calc(args) => {
            let mut engine = CalculatorEngine::with_angle_mode(settings.angle_mode());
            match &args.keys {
                Some(keys) => {
                    let display = repl::run_keys(&mut engine, keys);
                    writeln!(out, "{}", display)?;
                }
                None => {
                    if let Err(e) = repl::run_session(&mut engine, io::stdin().lock(), &mut out) {
                        report_failure(&e);
                    }
                }
            }
        }
        Command::Gpa(command) => {
            let store = JsonFileStore::new(settings.data_file());
            let mut ledger = GpaLedger::new(store);
            // 資料檔損壞時不要繼續，避免下一次儲存覆蓋掉它
            if let Err(e) = ledger.load() {
                report_failure(&e);
            }
            if let Err(e) = run_gpa_command(&mut ledger, command, &mut out) {
                report_failure(&e);
            }
        }
    }

    out.flush()?;
    Ok(())
}
