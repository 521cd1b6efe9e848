use std::process::ExitCode;

use clap::Parser;
use medconsult_lib::cli::{self, Cli};
use medconsult_lib::{app, config};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::FAILURE } else { ExitCode::SUCCESS };
        }
    };

    if args.help {
        print!("{}", cli::install_guide());
        return ExitCode::SUCCESS;
    }
    if args.version {
        println!("{}", cli::version_string());
        return ExitCode::SUCCESS;
    }

    // Credentials may live in a local .env file.
    let _ = dotenvy::dotenv();

    if args.check_deps {
        let statuses = cli::check_dependencies(
            &config::ModelConfig::from_env(),
            &config::roster_path(),
            &config::report_dir(),
        );
        print!("{}", cli::format_dependency_report(&statuses));
        return ExitCode::SUCCESS;
    }

    let guard = match medconsult_lib::init_tracing(&config::report_dir(), config::LOG_FILE) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    // The consultation is blocking I/O; it runs on one blocking thread while
    // this task watches for Ctrl-C.
    let session = tokio::task::spawn_blocking(app::run_interactive);

    tokio::select! {
        joined = session => match joined {
            Ok(Ok(summary)) => {
                tracing::info!(turns = summary.turns, reports = summary.reports.len(), "Exiting");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) if e.is_interrupt() => {
                println!("\n\nConsultation ended. Goodbye!");
                tracing::info!("Input closed, exiting");
                ExitCode::SUCCESS
            }
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Consultation failed");
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
            Err(e) => {
                tracing::error!(error = %e, "Consultation thread panicked");
                eprintln!("Error: the consultation stopped unexpectedly. See {} for details.", config::LOG_FILE);
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            println!("\n\nConsultation interrupted by user. Goodbye!");
            tracing::info!("Interrupted by user");
            // The blocking reader cannot be cancelled; flush logs and leave.
            drop(guard);
            std::process::exit(0);
        }
    }
}
