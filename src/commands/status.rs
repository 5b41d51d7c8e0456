use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    cli::StatusArgs,
    services::{AuthService, LoginOutcome, LoginRequest},
    AppCtx,
};

use beeline_api::account::DataPlan;

/// Result of one `status` run, also printed as JSON with `--json`.
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct StatusReport {
    pub date: String,
    pub account: Option<String>,
    pub authenticated: bool,
    pub balance: Option<f64>,
    pub data_plan: Option<DataPlan>,
}

pub async fn handle(args: StatusArgs, ctx: &AppCtx) -> Result<()> {
    let mut report = StatusReport {
        date: format_date(Utc::now()),
        ..Default::default()
    };
    if !args.json {
        println!("Date: {}", report.date);
    }

    let auth_service = AuthService::with_defaults(ctx.settings_store.as_ref(), ctx.session_dir.clone());
    let request = LoginRequest {
        login: args.login,
        password: args.password,
        persist_session: args.persist_session,
    };

    match auth_service.login(request).await? {
        LoginOutcome::NotConfigured => bail!(
            "No login given, run `beeline status <LOGIN>` or `beeline config --login <LOGIN>` first"
        ),
        LoginOutcome::Rejected { login, error } => {
            warn!("{}", error);
            if !args.json {
                println!("Authentication failed");
            }
            report.account = Some(login.to_string());
        }
        LoginOutcome::SignedIn { login, mut client } => {
            report.account = Some(login.to_string());
            report.authenticated = true;
            info!("Fetching balance ...");
            match client.snapshot().await {
                Ok(snapshot) => {
                    report.balance = Some(snapshot.balance);
                    report.data_plan = snapshot.data_plan;
                }
                Err(e) => warn!("Could not get the balance: {}", e),
            }
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for line in render(&report) {
            println!("{line}");
        }
    }

    Ok(())
}

/// Timestamp in the C locale, e.g. `18 Oct 2026 09:05:00 UTC`.
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d %b %Y %H:%M:%S UTC").to_string()
}

/// Lines printed after the date.
pub fn render(report: &StatusReport) -> Vec<String> {
    let Some(balance) = report.balance else {
        return vec!["Balance: Unknown".to_string()];
    };

    let mut lines = Vec::new();
    if let Some(account) = &report.account {
        lines.push(format!("Account: +7{account}"));
    }
    lines.push(format!("Balance: {balance:?} RUB"));
    if let Some(data_plan) = &report.data_plan {
        lines.push(format!(
            "Data plan: {:?} GB (out of {:?} GB)",
            data_plan.used, data_plan.total
        ));
    }
    lines
}
