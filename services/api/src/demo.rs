use crate::infra::{pipeline_service, ApiPipelineService, InMemoryNotificationPublisher};
use chrono::{Local, NaiveDate};
use clap::Args;
use hireflow::catalog::{CandidateId, StageId};
use hireflow::config::AppConfig;
use hireflow::error::AppError;
use hireflow::workflows::pipeline::{
    CandidateDetailView, DashboardView, JobFilter, PipelineBoardView, PipelineEvent,
    PipelineSummary,
};
use std::fmt::Write as _;
use std::time::Duration;

#[derive(Args, Debug)]
pub(crate) struct BoardArgs {
    /// Job id to restrict the board to, or "all"
    #[arg(long, default_value = JobFilter::ALL_TOKEN)]
    pub(crate) job: String,
    /// Seed date for the catalog (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct SummaryArgs {
    /// Seed date for the catalog (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DashboardArgs {
    /// Seed date for the catalog (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seed date for the catalog (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Job id for the closing filtered board, or "all"
    #[arg(long)]
    pub(crate) job: Option<String>,
    /// Skip the stage editing portion of the demo.
    #[arg(long)]
    pub(crate) skip_stage_editing: bool,
}

fn seed_date(today: Option<NaiveDate>) -> NaiveDate {
    today.unwrap_or_else(|| Local::now().date_naive())
}

pub(crate) fn run_board(args: BoardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (service, _) = pipeline_service(config.pipeline, seed_date(args.today));
    let view = service.board(JobFilter::from_token(&args.job));
    print!("{}", render_board(&view));
    Ok(())
}

pub(crate) fn run_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let (service, _) = pipeline_service(config.pipeline, seed_date(args.today));
    print!("{}", render_summary(&service.summary()));
    Ok(())
}

pub(crate) fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let today = seed_date(args.today);
    let (service, _) = pipeline_service(config.pipeline, today);
    print!("{}", render_dashboard(&service.dashboard(today)));
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        today,
        job,
        skip_stage_editing,
    } = args;

    let config = AppConfig::load()?;
    let advisory_delay = config.pipeline.advisory_delay;
    let today = seed_date(today);
    let (service, notifier) = pipeline_service(config.pipeline, today);

    println!("Hiring pipeline demo");
    print!("{}", render_board(&service.board(JobFilter::All)));

    println!("\nCandidate moves");
    let script = [
        ("Olivia Davis: New -> Screening", move_event(5, 1, 2, 0)),
        ("David Chen: Screening -> Interview", move_event(2, 2, 3, 0)),
        (
            "Assessment column dragged ahead of Interview",
            PipelineEvent::ReorderColumns {
                source_index: 3,
                destination_index: Some(2),
            },
        ),
        ("Emma Thompson dropped in place", move_event(1, 3, 3, 0)),
    ];
    for (label, event) in script {
        match service.apply(event) {
            Ok(receipt) if receipt.notices.is_empty() => println!("- {label}: no change"),
            Ok(receipt) => println!("- {label}: {} notice(s)", receipt.notices.len()),
            Err(err) => println!("- {label}: rejected ({err})"),
        }
    }

    if !skip_stage_editing {
        run_stage_editing(&service);
    }

    match service.candidate_detail(CandidateId(2)) {
        Ok(detail) => print!("\n{}", render_candidate(&detail)),
        Err(err) => println!("\nCandidate detail unavailable: {err}"),
    }

    // Let a pending advisory timer fire before printing the feed.
    tokio::time::sleep(advisory_delay + Duration::from_millis(50)).await;
    print!("\n{}", render_notices(&notifier));

    print!("\n{}", render_dashboard(&service.dashboard(today)));

    let filter = job
        .as_deref()
        .map(JobFilter::from_token)
        .unwrap_or_default();
    print!("\n{}", render_board(&service.board(filter)));

    Ok(())
}

fn run_stage_editing(service: &ApiPipelineService) {
    println!("\nStage editing");
    let added = match service.add_stage("Reference Check", "bg-orange-500") {
        Ok(column) => {
            println!("- Added stage {} ({})", column.title, column.id);
            Some(column.id)
        }
        Err(err) => {
            println!("- Add stage rejected: {err}");
            None
        }
    };

    match service.add_stage("   ", "bg-gray-500") {
        Ok(column) => println!("- Unexpectedly added blank stage {}", column.id),
        Err(err) => println!("- Blank stage rejected: {err}"),
    }

    match service.delete_stage(StageId(3)) {
        Ok(_) => println!("- Interview stage deleted"),
        Err(err) => println!("- Interview stage kept: {err}"),
    }

    if let Some(id) = added {
        match service.delete_stage(id) {
            Ok(columns) => println!("- Removed stage {id}; {} stages remain", columns.len()),
            Err(err) => println!("- Remove stage {id} rejected: {err}"),
        }
    }
}

fn move_event(candidate: u32, source: u32, destination: u32, index: usize) -> PipelineEvent {
    PipelineEvent::MoveCandidate {
        candidate_id: CandidateId(candidate),
        source_column_id: StageId(source),
        destination_column_id: StageId(destination),
        destination_index: index,
    }
}

pub(crate) fn render_board(view: &PipelineBoardView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pipeline board (job filter: {})", view.filter);
    for column in &view.columns {
        let _ = writeln!(out, "{} [{}]", column.title, column.count);
        for card in &column.cards {
            let job = card.job_title.as_deref().unwrap_or("unknown job");
            let _ = writeln!(
                out,
                "  - #{} {} | {} | applied {}",
                card.id, card.name, job, card.applied_date
            );
        }
    }
    out
}

pub(crate) fn render_summary(summary: &PipelineSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Hiring status ({} candidates)", summary.total);
    for entry in &summary.stages {
        let _ = writeln!(
            out,
            "- {}: {} ({:.0}%)",
            entry.title, entry.candidates, entry.share_pct
        );
    }
    if let Some(busiest) = summary.busiest_stage() {
        let _ = writeln!(out, "Busiest stage: {}", busiest.title);
    }
    out
}

pub(crate) fn render_dashboard(view: &DashboardView) -> String {
    let totals = &view.totals;
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard for {}", view.today);
    let _ = writeln!(
        out,
        "New applications {} | Open jobs {} | Interviewing {} | Hired this month {}",
        totals.new_applications, totals.open_jobs, totals.interviewing, totals.hired_this_month
    );

    let trend: Vec<String> = view
        .application_trend
        .iter()
        .map(|point| format!("{} {}", point.date.format("%m-%d"), point.applications))
        .collect();
    let _ = writeln!(out, "Applications: {}", trend.join(", "));

    let _ = writeln!(out, "Applications by department");
    for share in &view.department_distribution {
        let _ = writeln!(out, "- {}: {}", share.department, share.applications);
    }

    out.push_str(&render_summary(&view.hiring_status));

    let _ = writeln!(out, "Recent activity");
    for activity in &view.recent_activity {
        let _ = writeln!(
            out,
            "- {} {}",
            activity.timestamp.format("%Y-%m-%d %H:%M"),
            activity.content
        );
    }
    out
}

fn render_candidate(detail: &CandidateDetailView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Candidate #{} {}", detail.id, detail.name);
    let _ = writeln!(out, "  Stage: {}", detail.status.name);
    if let Some(job) = &detail.job {
        let _ = writeln!(out, "  Job: {} ({})", job.title, job.department.name);
    }
    match detail.annotation {
        Some(annotation) => {
            let _ = writeln!(
                out,
                "  Match score {} | fit {}%",
                annotation.score, annotation.fit_percentage
            );
        }
        None => {
            let _ = writeln!(out, "  Match score: scoring disabled");
        }
    }
    out
}

fn render_notices(notifier: &InMemoryNotificationPublisher) -> String {
    let notices = notifier.notices();
    let mut out = String::new();
    if notices.is_empty() {
        let _ = writeln!(out, "Notifications: none");
        return out;
    }

    let _ = writeln!(out, "Notifications");
    for notice in notices {
        let _ = writeln!(out, "- {}: {}", notice.title(), notice.description());
    }
    out
}
