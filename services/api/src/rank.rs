use chrono::Utc;
use clap::Args;
use crewmatch::error::AppError;
use crewmatch::workflows::roster::RosterImporter;
use crewmatch::workflows::shortlist::{
    JobId, JobOpening, MissingEntity, ShortlistBuilder, ShortlistItem, ShortlistServiceError,
    WorkerProfile, WorkerStatus,
};
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Worker roster CSV
    #[arg(long)]
    pub(crate) workers: PathBuf,
    /// Job openings CSV
    #[arg(long)]
    pub(crate) jobs: PathBuf,
    /// Job to rank the roster against
    #[arg(long)]
    pub(crate) job_id: String,
    /// Score standby and blocked workers as well
    #[arg(long)]
    pub(crate) include_inactive: bool,
    /// Show at most this many candidates
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the ranking as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let jobs = RosterImporter::jobs_from_path(&args.jobs)?;
    let workers = RosterImporter::workers_from_path(&args.workers)?;
    let job_id = JobId(args.job_id.trim().to_string());

    let job = jobs
        .into_iter()
        .find(|job| job.id == job_id)
        .ok_or_else(|| ShortlistServiceError::NotFound(MissingEntity::Job(job_id.clone())))?;

    let ranking = rank_workers(&job, workers, args.include_inactive, args.limit)?;

    if args.json {
        match serde_json::to_string_pretty(&ranking) {
            Ok(json) => println!("{json}"),
            Err(err) => println!("Ranking payload unavailable: {err}"),
        }
        return Ok(());
    }

    render_ranking(&job, &ranking);
    Ok(())
}

pub(crate) fn rank_workers(
    job: &JobOpening,
    workers: Vec<WorkerProfile>,
    include_inactive: bool,
    limit: Option<usize>,
) -> Result<Vec<ShortlistItem>, AppError> {
    let pool: Vec<WorkerProfile> = workers
        .into_iter()
        .filter(|worker| include_inactive || worker.status == WorkerStatus::Active)
        .collect();

    let mut items = ShortlistBuilder::default()
        .build(job, &pool, Utc::now())
        .map_err(ShortlistServiceError::from)?;
    if let Some(limit) = limit {
        items.truncate(limit);
    }
    Ok(items)
}

fn render_ranking(job: &JobOpening, ranking: &[ShortlistItem]) {
    println!(
        "Ranking for {} - {} ({}, {} openings, priority {})",
        job.code,
        job.title,
        job.profession_required,
        job.quantity,
        job.priority.label()
    );
    for (position, item) in ranking.iter().enumerate() {
        println!("{:>3}. {:<12} {:>4}", position + 1, item.worker_id.0, item.score);
        for reason in &item.reasons {
            println!("       - {reason}");
        }
    }
}
