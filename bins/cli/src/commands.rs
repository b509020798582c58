//! Command handlers.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use chrono::Utc;
use forgeboard_core::auth::UserRole;
use forgeboard_core::dashboard::{DashboardError, DashboardNote, NoteKey};
use forgeboard_core::import::{
    ImportKind, ImportSummary, export_filename, template_filename, write_order_template,
    write_orders, write_production, write_production_template,
};
use forgeboard_core::settings::{Settings, SettingsService};
use forgeboard_db::repositories::{
    DashboardRepoError, ImportRunError, SettingsRepoError,
};
use forgeboard_db::{
    DashboardRepository, ImportRepository, NoteRepository, OrderRepository, ProductionRepository,
    SettingsRepository, UserRepository,
};
use forgeboard_shared::types::UserId;
use forgeboard_shared::{AppConfig, AppError};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use tracing::info;

use crate::args::{Command, NoteCommand, PeriodArgs, SettingsCommand};

/// Runs one command against the configured database.
pub async fn execute(command: Command, config: &AppConfig) -> anyhow::Result<()> {
    if let Command::Template { kind, out } = &command {
        return write_template(*kind, out);
    }

    let db = Arc::new(
        forgeboard_db::connect_with(&config.database)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?,
    );

    match command {
        Command::SalesDashboard { period, rep_email } => {
            sales_dashboard(&db, &period, rep_email.as_deref()).await
        }
        Command::ProductionDashboard { period } => production_dashboard(&db, &period).await,
        Command::Import {
            kind,
            file,
            mode,
            commit,
        } => {
            let mode = mode.map_or(config.import.mode, Into::into);
            let policy = commit.map_or(config.import.commit_policy, Into::into);
            import(&db, kind, &file, mode, policy).await
        }
        Command::Export { kind, out } => export(&db, kind, &out).await,
        Command::FiscalYears { years_back } => {
            let settings = load_settings(&db).await?;
            let calendar = settings
                .calendar()
                .map_err(|e| AppError::Validation(e.to_string()))?;
            for label in calendar.all_fiscal_years(years_back.unwrap_or(config.dashboard.years_back))
            {
                println!("{label}");
            }
            Ok(())
        }
        Command::Note(NoteCommand::Get { period, role }) => {
            let key = note_key(&db, &period, role).await?;
            let note = NoteRepository::new(db).find(&key).await?;
            print_json(&note)
        }
        Command::Note(NoteCommand::Set {
            period,
            role,
            author_email,
            body,
        }) => set_note(&db, &period, role, &author_email, &body).await,
        Command::Settings(SettingsCommand::Show) => print_json(&load_settings(&db).await?),
        Command::Settings(SettingsCommand::SplitTarget { yearly }) => {
            split_target(&db, yearly).await
        }
        Command::Template { kind, out } => write_template(kind, &out),
    }
}

async fn sales_dashboard(
    db: &Arc<DatabaseConnection>,
    period: &PeriodArgs,
    rep_email: Option<&str>,
) -> anyhow::Result<()> {
    let settings = load_settings(db).await?;
    let (fiscal_year, month) = resolve_period(&settings, period)?;

    let sales_rep = match rep_email {
        Some(email) => Some(find_sales_rep(db, email).await?),
        None => None,
    };

    let metrics = DashboardRepository::new(Arc::clone(db))
        .sales(&fiscal_year, &month, sales_rep)
        .await
        .map_err(dashboard_error)?;
    print_json(&metrics)
}

async fn production_dashboard(db: &Arc<DatabaseConnection>, period: &PeriodArgs) -> anyhow::Result<()> {
    let settings = load_settings(db).await?;
    let (fiscal_year, month) = resolve_period(&settings, period)?;

    let metrics = DashboardRepository::new(Arc::clone(db))
        .production(&fiscal_year, &month)
        .await
        .map_err(dashboard_error)?;
    print_json(&metrics)
}

async fn import(
    db: &Arc<DatabaseConnection>,
    kind: ImportKind,
    file: &Path,
    mode: forgeboard_shared::ImportMode,
    policy: forgeboard_shared::CommitPolicy,
) -> anyhow::Result<()> {
    let reader = BufReader::new(
        File::open(file).with_context(|| format!("Failed to open {}", file.display()))?,
    );
    let repo = ImportRepository::new(db.clone(), policy);

    let summary: ImportSummary = match kind {
        ImportKind::Orders => repo.import_orders(reader, mode).await,
        ImportKind::Production => repo.import_production(reader, mode).await,
    }
    .map_err(|e| match e {
        ImportRunError::File(err) => AppError::Import(err.to_string()),
        ImportRunError::Database(err) => AppError::Database(err.to_string()),
    })?;

    for error in &summary.errors {
        eprintln!("{error}");
    }
    print_json(&summary)
}

async fn export(db: &Arc<DatabaseConnection>, kind: ImportKind, out: &Path) -> anyhow::Result<()> {
    let path = output_path(out, &export_filename(kind, Utc::now().date_naive()))?;
    let mut writer = BufWriter::new(
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?,
    );

    let rows = match kind {
        ImportKind::Orders => {
            let rows = OrderRepository::new(Arc::clone(db)).export_rows().await?;
            write_orders(&mut writer, &rows)?;
            rows.len()
        }
        ImportKind::Production => {
            let batches = ProductionRepository::new(Arc::clone(db)).list().await?;
            write_production(&mut writer, &batches)?;
            batches.len()
        }
    };
    writer.flush()?;

    info!(kind = %kind, rows, path = %path.display(), "Export written");
    println!("{}", path.display());
    Ok(())
}

fn write_template(kind: ImportKind, out: &Path) -> anyhow::Result<()> {
    let path = output_path(out, &template_filename(kind))?;
    let mut writer = BufWriter::new(
        File::create(&path).with_context(|| format!("Failed to create {}", path.display()))?,
    );
    match kind {
        ImportKind::Orders => write_order_template(&mut writer)?,
        ImportKind::Production => write_production_template(&mut writer)?,
    }
    writer.flush()?;

    println!("{}", path.display());
    Ok(())
}

async fn set_note(
    db: &Arc<DatabaseConnection>,
    period: &PeriodArgs,
    role: UserRole,
    author_email: &str,
    body: &str,
) -> anyhow::Result<()> {
    let key = note_key(db, period, role).await?;
    let author = UserRepository::new(Arc::clone(db))
        .find_by_email(author_email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {author_email}")))?;

    let note = DashboardNote::compose(key, body, UserId::new(author.id), author.role.into())
        .map_err(|e| match e {
            DashboardError::NoteForbidden { .. } => AppError::BusinessRule(e.to_string()),
            DashboardError::Period(_) => AppError::Validation(e.to_string()),
        })?;

    let saved = NoteRepository::new(Arc::clone(db)).upsert(&note).await?;
    print_json(&saved)
}

async fn split_target(db: &Arc<DatabaseConnection>, yearly: i32) -> anyhow::Result<()> {
    let repo = SettingsRepository::new(Arc::clone(db));
    let mut settings = repo.get().await.map_err(settings_error)?;
    let calendar = settings
        .calendar()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    settings.yearly_box_target = yearly;
    settings.monthly_box_targets = SettingsService::even_split(yearly, &calendar);

    let saved = repo.save(&settings).await.map_err(settings_error)?;
    print_json(&saved)
}

async fn note_key(
    db: &Arc<DatabaseConnection>,
    period: &PeriodArgs,
    role: UserRole,
) -> anyhow::Result<NoteKey> {
    let settings = load_settings(db).await?;
    let (fiscal_year, month) = resolve_period(&settings, period)?;
    Ok(NoteKey::new(&fiscal_year, &month, role).map_err(|e| AppError::Validation(e.to_string()))?)
}

async fn find_sales_rep(db: &Arc<DatabaseConnection>, email: &str) -> anyhow::Result<UserId> {
    let user = UserRepository::new(Arc::clone(db))
        .find_by_email(email)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {email}")))?;

    if UserRole::from(user.role) != UserRole::Sales {
        return Err(AppError::Validation(format!("{email} is not a sales account")).into());
    }
    Ok(UserId::new(user.id))
}

async fn load_settings(db: &Arc<DatabaseConnection>) -> anyhow::Result<Settings> {
    Ok(SettingsRepository::new(Arc::clone(db))
        .get()
        .await
        .map_err(settings_error)?)
}

/// Fills in today's fiscal year and month where not given.
fn resolve_period(settings: &Settings, period: &PeriodArgs) -> Result<(String, String), AppError> {
    let calendar = settings
        .calendar()
        .map_err(|e| AppError::Validation(e.to_string()))?;
    let today = Utc::now().date_naive();

    let fiscal_year = match &period.fy {
        Some(label) => label.clone(),
        None => {
            calendar
                .fiscal_year_of(today)
                .map_err(|e| AppError::Validation(e.to_string()))?
                .label
        }
    };
    let month = period
        .month
        .clone()
        .unwrap_or_else(|| calendar.fiscal_month_of(today).to_string());

    Ok((fiscal_year, month))
}

fn output_path(dir: &Path, filename: &str) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    Ok(dir.join(filename))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn dashboard_error(err: DashboardRepoError) -> AppError {
    match err {
        DashboardRepoError::Dashboard(e) => AppError::Validation(e.to_string()),
        DashboardRepoError::Settings(e) => settings_error(e),
        DashboardRepoError::Database(e) => AppError::Database(e.to_string()),
    }
}

fn settings_error(err: SettingsRepoError) -> AppError {
    match err {
        SettingsRepoError::Invalid(e) => AppError::Validation(e.to_string()),
        SettingsRepoError::Encode(e) => AppError::Internal(e.to_string()),
        SettingsRepoError::Database(e) => AppError::Database(e.to_string()),
    }
}
