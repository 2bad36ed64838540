mod cli;

use std::io;
use std::process::ExitCode;

use anyhow::Result;
use is_terminal::IsTerminal;
use jmeter_runner::{
    logging,
    printer::{JsonPrinter, TextPrinter},
    Config, EngineSettings, ExecutionResult, Orchestrator,
};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = cli::Cli::parse();

    // Load config once; CLI flags override it
    let cfg = Config::load();
    let log_filter = args.log_level.clone().unwrap_or_else(|| cfg.log_filter());
    logging::init_tracing(&log_filter)?;
    for path in &cfg.loaded_files {
        tracing::debug!(path = %path.display(), "loaded config file");
    }

    let mut settings = EngineSettings::from_config(&cfg);
    if let Some(bin) = &args.jmeter_bin {
        settings.binary = bin.clone();
    }
    if let Some(opts) = &args.java_opts {
        settings = settings.with_java_opts(opts);
    }
    tracing::debug!(?settings, config = %cfg.config_path.display(), "engine settings");

    let orchestrator = Orchestrator::new(settings);
    let request = args.request();
    let color = !args.no_color && io::stdout().is_terminal();

    if args.dry_run {
        return match orchestrator.plan(&request) {
            Ok(plan) => {
                if args.json {
                    JsonPrinter.print(&plan)?;
                } else {
                    TextPrinter { color }.print_plan(&plan);
                }
                Ok(ExitCode::SUCCESS)
            }
            Err(err) => {
                let result: ExecutionResult = err.into();
                print_result(&args, color, &result)?;
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let result = if request.gui_mode {
        orchestrator
            .run(&request.test_file, true, request.properties.clone())
            .await
    } else {
        orchestrator
            .run_batch(
                &request.test_file,
                request.properties.clone(),
                request.generate_report,
                request.report_output_dir.clone(),
                request.log_file.clone(),
            )
            .await
    };

    print_result(&args, color, &result)?;
    Ok(if result.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_result(
    args: &cli::Cli,
    color: bool,
    result: &ExecutionResult,
) -> Result<()> {
    if args.json {
        JsonPrinter.print(result)
    } else {
        TextPrinter { color }.print_result(result);
        Ok(())
    }
}
