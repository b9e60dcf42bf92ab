//! Drives a [`Form`]: prompts, submits, runs the fetch and prints the result.

use anyhow::Result;
use inquire::{InquireError, Select, Text};
use meteo_core::{
    Action, Config, Coordinate, ForecastProvider, Form, RequestState, provider_from_config,
    run_fetch,
};
use std::{fmt, process::ExitCode};

use crate::render::{FormView, submit_caption};

/// One lookup, printed; non-zero exit on failure.
pub async fn show_once(config: &Config, coordinate: Coordinate) -> Result<ExitCode> {
    let provider = provider_from_config(config)?;
    let mut form = Form::new(coordinate, config.settle_policy);

    search(&mut form, provider.as_ref()).await;
    println!("{}", FormView(&form));

    match form.state() {
        RequestState::Failure(_) => Ok(ExitCode::FAILURE),
        _ => Ok(ExitCode::SUCCESS),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Search,
    EditLatitude,
    EditLongitude,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Search => f.write_str(submit_caption(false)),
            MenuItem::EditLatitude => f.write_str("Edit latitude"),
            MenuItem::EditLongitude => f.write_str("Edit longitude"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

/// The interactive form. Esc or Ctrl-C at any prompt leaves the loop.
pub async fn interactive(config: &Config) -> Result<()> {
    let provider = provider_from_config(config)?;
    let mut form = Form::from_config(config);

    loop {
        println!("{}", FormView(&form));

        let menu = vec![MenuItem::Search, MenuItem::EditLatitude, MenuItem::EditLongitude, MenuItem::Quit];
        let choice = match Select::new("Choose:", menu).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(?choice, "Menu selection");

        let action = match choice {
            MenuItem::Search => {
                search(&mut form, provider.as_ref()).await;
                continue;
            }
            MenuItem::EditLatitude => {
                match prompt_field("Latitude:", &form.coordinate().latitude)? {
                    Some(value) => Action::SetLatitude(value),
                    None => break,
                }
            }
            MenuItem::EditLongitude => {
                match prompt_field("Longitude:", &form.coordinate().longitude)? {
                    Some(value) => Action::SetLongitude(value),
                    None => break,
                }
            }
            MenuItem::Quit => break,
        };
        form.update(action);
    }

    Ok(())
}

fn prompt_field(label: &str, current: &str) -> Result<Option<String>> {
    match Text::new(label).with_initial_value(current).prompt() {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(err) => Err(err.into()),
    }
}

async fn search(form: &mut Form, provider: &dyn ForecastProvider) {
    let Some(ticket) = form.update(Action::Submit) else {
        return;
    };
    eprintln!("{}", submit_caption(true));

    let settled = run_fetch(provider, ticket).await;
    form.update(settled);
}
