use std::process::ExitCode;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use canvas_client::Client;
use canvas_duedates::{
    calendar, collect_from, json, weekly::WeeklyReport, Assignment, Error as DueDatesError,
};
use chrono::{DateTime, Utc};
use log::info;

use crate::config::Config;

/// Exit status used when everything worked but nothing is due
const NOTHING_DUE: u8 = 2;

fn client(config: &Config) -> Result<Client> {
    Ok(Client::new(config.credential())?.with_per_page(config.per_page))
}

/// Fetch and order assignments, or `None` if there aren't any.
fn fetch(config: &Config) -> Result<Option<Vec<Assignment>>> {
    let client = client(config)?;
    info!("fetching assignments from {}", client.creds.base_url());

    let collection = collect_from(&client, &config.window())
        .context("error getting assignments from Canvas")?;
    for skip in collection.failed_courses() {
        eprintln!("Skipped course {}: {}", skip.course, skip.reason);
    }

    match collection.into_non_empty() {
        Ok(assignments) => Ok(Some(assignments)),
        Err(DueDatesError::NoAssignmentsFound) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn nothing_due() -> ExitCode {
    eprintln!("No assignments found");
    ExitCode::from(NOTHING_DUE)
}

/// Print the weekly schedule, then write the calendar
pub fn sync(config: &Config, output: Option<Utf8PathBuf>) -> Result<ExitCode> {
    let Some(assignments) = fetch(config)? else {
        return Ok(nothing_due());
    };

    print!("{}", WeeklyReport::new(&assignments));
    write_calendar(config, &assignments, output)?;

    Ok(ExitCode::SUCCESS)
}

pub fn assignments(config: &Config, pretty: bool) -> Result<ExitCode> {
    let Some(assignments) = fetch(config)? else {
        return Ok(nothing_due());
    };

    let out = if pretty {
        json::to_json_pretty(&assignments)?
    } else {
        json::to_json(&assignments)?
    };
    println!("{}", out);

    Ok(ExitCode::SUCCESS)
}

pub fn calendar(config: &Config, output: Option<Utf8PathBuf>) -> Result<ExitCode> {
    let Some(assignments) = fetch(config)? else {
        return Ok(nothing_due());
    };

    write_calendar(config, &assignments, output)?;

    Ok(ExitCode::SUCCESS)
}

pub fn weekly(config: &Config) -> Result<ExitCode> {
    let Some(assignments) = fetch(config)? else {
        return Ok(nothing_due());
    };

    print!("{}", WeeklyReport::new(&assignments));

    Ok(ExitCode::SUCCESS)
}

pub fn whoami(config: &Config) -> Result<ExitCode> {
    let client = client(config)?;
    let me = client.me().context("error checking access token")?;

    println!(
        "Logged in to {} as {} (user {})",
        client.creds.base_url(),
        me.name,
        me.id
    );

    Ok(ExitCode::SUCCESS)
}

pub fn configure(
    url: String,
    token: Option<String>,
    since: Option<DateTime<Utc>>,
) -> Result<ExitCode> {
    let mut config = Config::load_file()?;
    config.base_url = Some(url);
    if let Some(token) = token {
        config.token = Some(token.into());
    }
    if let Some(since) = since {
        config.window_start = since;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path);
    if config.token.is_none() {
        println!(
            "No access token saved, so it will be read from ${}",
            crate::config::TOKEN_VAR
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn write_calendar(
    config: &Config,
    assignments: &[Assignment],
    output: Option<Utf8PathBuf>,
) -> Result<()> {
    let path = output.unwrap_or_else(|| config.output.clone());
    let doc = calendar::write_with(assignments, &config.calendar_options()?);
    doc.write_to_file(&path)
        .with_context(|| format!("error writing calendar to {}", path))?;

    println!("\nCalendar saved as {} ({} events)", path, doc.events());
    if doc.skipped() > 0 {
        eprintln!("{} assignments couldn't be added to the calendar", doc.skipped());
    }

    Ok(())
}

