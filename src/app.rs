use crate::cli::{Command, PlanArgs};
use crate::config::Config;
use crate::planner::PlanApi;
use crate::preferences::file::PreferenceFile;
use crate::preferences::{Field, PreferenceModel};
use crate::render::render_result;
use crate::request;
use crate::state::{Action, Session, Submitter, View};
use crate::timetable::{PlanResult, transform_body};
use crate::utils::fmt_duration;
use anyhow::Context;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use yansi::Paint;

/// Main application struct: the plan service client plus its submission guard.
pub struct App {
    submitter: Submitter,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let api = PlanApi::new(&config.api_url, config.request_timeout)
            .context("Failed to create plan API client")?;

        info!(
            endpoint = %api.endpoint(),
            request_timeout = ?config.request_timeout,
            slow_request_threshold = fmt_duration(config.slow_request_threshold),
            "plan API client ready"
        );

        let submitter =
            Submitter::new(Arc::new(api)).with_slow_threshold(config.slow_request_threshold);
        Ok(App { submitter })
    }

    /// Run one command to completion and report how it went.
    pub async fn run(self, command: Command) -> ExitCode {
        let outcome = match command {
            Command::Plan(args) => self.plan(args).await,
            Command::Render { file, json } => render_file(&file, json),
        };

        match outcome {
            Ok(code) => code,
            Err(e) => {
                error!(error = ?e, "command failed");
                eprintln!("{} {e:#}", "error:".red().bold());
                ExitCode::FAILURE
            }
        }
    }

    async fn plan(&self, args: PlanArgs) -> anyhow::Result<ExitCode> {
        let mut session = Session::with_model(load_preferences(args.preferences.as_deref())?);
        for action in edit_actions(&args)? {
            session.dispatch(action);
        }

        if args.dry_run {
            let validated = session.model().validate()?;
            println!("{}", serde_json::to_string_pretty(&request::build(&validated))?);
            return Ok(ExitCode::SUCCESS);
        }

        session.submit(&self.submitter).await;

        match (session.view(), session.result()) {
            (View::Result, Some(result)) => {
                print_result(result, args.json)?;
                Ok(ExitCode::SUCCESS)
            }
            _ => {
                let message = session.error().unwrap_or("Failed to generate plan");
                eprintln!("{} {message}", "error:".red().bold());
                Ok(ExitCode::FAILURE)
            }
        }
    }
}

fn load_preferences(path: Option<&Path>) -> anyhow::Result<PreferenceModel> {
    let mut model = PreferenceModel::new();
    if let Some(path) = path {
        PreferenceFile::load(path)?.apply(&mut model)?;
        info!(path = %path.display(), "preferences loaded");
    }
    Ok(model)
}

/// Command-line edits in the order they apply: fields, periods, then the flag.
pub fn edit_actions(args: &PlanArgs) -> anyhow::Result<Vec<Action>> {
    let mut actions = Vec::with_capacity(args.fields.len() + args.periods.len() + 1);
    for (name, value) in &args.fields {
        actions.push(Action::SetField(Field::parse(name, value)?));
    }
    for &(day, period) in &args.periods {
        actions.push(Action::TogglePeriod(day, period));
    }
    if args.no_preference {
        actions.push(Action::SetNoPreference(true));
    }
    Ok(actions)
}

fn render_file(path: &Path, json: bool) -> anyhow::Result<ExitCode> {
    let body = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let result = transform_body(&body)
        .with_context(|| format!("Malformed plan response in {}", path.display()))?;
    print_result(&result, json)?;
    Ok(ExitCode::SUCCESS)
}

fn print_result(result: &PlanResult, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
    } else {
        print!("{}", render_result(result));
    }
    Ok(())
}
