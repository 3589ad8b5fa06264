use std::env;
use std::process::ExitCode;

use chrono::{Local, Utc};
use klukka::activity::project_title;
use klukka::cli::Command;
use klukka::window::window_for;
use klukka::{init_logging, load_report, ActiveTracking, Config, ConfigManager};
use klukka_api::{ExportFilter, KlukkaApi, KlukkaClient, LogNavigator, Login};
use log::{error, info};

const MAIL_ENV: &str = "KLUKKA_MAIL";
const PASSWORD_ENV: &str = "KLUKKA_PASSWORD";

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            error!("{message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> Result<(), String> {
    let command = Command::parse(args)?;
    let config = ConfigManager::new()
        .map(|manager| manager.load())
        .unwrap_or_default()
        .with_env_overrides();

    let api = connect(&config).await?;
    let now = Local::now();

    match command {
        Command::Report { preset, group_id } => {
            let preset = preset.unwrap_or(config.default_preset);
            let window = window_for(preset, &now);
            let report = load_report(&api, preset, window, group_id, &now)
                .await
                .map_err(|err| err.to_string())?
                .ok_or("no activity data returned")?;
            for line in report.lines() {
                println!("{line}");
            }
        }
        Command::Active => {
            let Some(interval) = api.active().await.map_err(|err| err.to_string())? else {
                println!("Nothing is being tracked");
                return Ok(());
            };
            let projects = api
                .projects()
                .await
                .map_err(|err| err.to_string())?
                .unwrap_or_default();
            let all: Vec<_> = projects.own.into_iter().chain(projects.group).collect();
            let title = project_title(&all, interval.project_id).to_string();
            let tracking = ActiveTracking::new(interval, title);
            println!("{}", tracking.summary(Utc::now()));
        }
        Command::Export {
            preset,
            detailed,
            group_id,
            output,
        } => {
            let preset = preset.unwrap_or(config.default_preset);
            let filter = ExportFilter::new(window_for(preset, &now), detailed);
            let file = api
                .download_export(&filter, group_id)
                .await
                .map_err(|err| err.to_string())?
                .ok_or("export failed")?;
            let path = output.unwrap_or_else(|| file.filename.clone().into());
            tokio::fs::write(&path, &file.bytes)
                .await
                .map_err(|err| err.to_string())?;
            info!("wrote {} bytes to {}", file.bytes.len(), path.display());
        }
    }
    Ok(())
}

/// Builds the API and logs in with environment credentials unless the session is still valid.
async fn connect(config: &Config) -> Result<KlukkaApi, String> {
    let client = KlukkaClient::new(config.client_config()).map_err(|err| err.to_string())?;
    let api = KlukkaApi::new(client, LogNavigator);

    if api.validate().await.map_err(|err| err.to_string())? {
        return Ok(api);
    }

    let (Ok(mail), Ok(password)) = (env::var(MAIL_ENV), env::var(PASSWORD_ENV)) else {
        return Err(format!("set {MAIL_ENV} and {PASSWORD_ENV} to log in"));
    };
    if !api
        .login(&Login { mail, password })
        .await
        .map_err(|err| err.to_string())?
    {
        return Err("login failed".to_string());
    }
    info!("logged in against {}", config.base_url);
    Ok(api)
}
