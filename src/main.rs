mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use emaillistverify::core::config::load_config_file;
use emaillistverify::utils::{extract_domain, is_disposable_domain, is_valid_syntax};
use emaillistverify::{ApiClient, BulkManager, Config, ConfigBuilder, PollOptions, ResultType};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::process::ExitCode;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{default_level},elv_client={default_level},elv_transport={default_level},elv_bulk={default_level}"
        ))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_config(cli: &Cli) -> Result<Config> {
    let mut builder = ConfigBuilder::new();
    if let Some((file, path)) = load_config_file(cli.config.as_deref())? {
        tracing::info!("Loaded configuration from {}", path.display());
        builder = builder.with_file(&file, Some(path.as_path()));
    }
    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout(Duration::from_secs(secs));
    }
    if let Some(url) = &cli.base_url {
        builder = builder.base_url(url.as_str());
    }
    Ok(builder.build()?)
}

async fn run(cli: Cli) -> Result<()> {
    if let Command::Check { email } = &cli.command {
        return check(email);
    }

    let config = build_config(&cli).context("invalid configuration")?;
    let secret = cli
        .secret
        .clone()
        .context("missing API secret: pass --secret or set EMAILLISTVERIFY_SECRET")?;
    let client = ApiClient::from_config(secret, &config)?;

    match cli.command {
        Command::Verify { email, detailed } => {
            if detailed {
                print_json(&client.verify_email_detailed(&email).await?)
            } else {
                print_json(&client.verify_email(&email).await?)
            }
        }
        Command::Credits => print_json(&client.get_credits().await?),
        Command::Batch {
            file,
            emails,
            max_batch_size,
        } => {
            let mut all = emails;
            if let Some(path) = file {
                let contents = tokio::fs::read_to_string(&path)
                    .await
                    .with_context(|| format!("reading {}", path.display()))?;
                all.extend(
                    contents
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty() && !line.starts_with('#'))
                        .map(String::from),
                );
            }
            anyhow::ensure!(!all.is_empty(), "no addresses given");
            let size = max_batch_size.unwrap_or(config.max_batch_size);
            print_json(&client.verify_batch(all.as_slice(), size).await?)
        }
        Command::Upload { file, filename } => {
            let file_id = client.bulk_upload(&file, filename.as_deref()).await?;
            println!("{file_id}");
            Ok(())
        }
        Command::Status { file_id } => print_json(&client.get_bulk_status(&file_id).await?),
        Command::Wait {
            file_id,
            interval,
            max_wait,
        } => {
            let mut options = PollOptions::from(&config);
            if let Some(secs) = interval {
                options.check_interval = Duration::from_secs(secs);
            }
            if let Some(secs) = max_wait {
                options.max_wait = Duration::from_secs(secs);
            }
            let spinner = spinner(format!("Waiting for bulk job {file_id}"));
            let result = client.wait_for_bulk_completion(&file_id, &options).await;
            spinner.finish_and_clear();
            print_json(&result?)
        }
        Command::Download {
            file_id,
            clean,
            output,
        } => {
            let result_type = if clean { ResultType::Clean } else { ResultType::All };
            let body = client.download_bulk_result_as(&file_id, result_type).await?;
            match output {
                Some(path) => tokio::fs::write(&path, body)
                    .await
                    .with_context(|| format!("writing {}", path.display()))?,
                None => print!("{body}"),
            }
            Ok(())
        }
        Command::Process {
            input,
            output,
            no_wait,
        } => {
            let manager = BulkManager::new(client);
            let spinner = spinner(format!("Processing {}", input.display()));
            let result = manager.process_csv_file(&input, &output, !no_wait).await;
            spinner.finish_and_clear();
            print_json(&result?)
        }
        Command::Check { email } => check(&email),
    }
}

#[derive(Serialize)]
struct OfflineCheck {
    email: String,
    valid_syntax: bool,
    domain: Option<String>,
    disposable: bool,
}

fn check(email: &str) -> Result<()> {
    let domain = extract_domain(email);
    let disposable = domain.as_deref().is_some_and(is_disposable_domain);
    print_json(&OfflineCheck {
        email: email.to_string(),
        valid_syntax: is_valid_syntax(email),
        domain,
        disposable,
    })
}

fn spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg} [{elapsed}]") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
