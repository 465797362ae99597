use crate::infra::{InMemoryJobRegistry, InMemoryWorkerRegistry};
use clap::Args;
use crewmatch::error::AppError;
use crewmatch::workflows::roster::RosterImporter;
use crewmatch::workflows::shortlist::{
    ActorId, InMemoryShortlistRepository, JobId, JobOpening, JobPriority, MatchingConfig,
    RegistryError, Shortlist, ShortlistItemStatus, ShortlistService, WorkerId, WorkerProfile,
    WorkerRegistry, WorkerStatus,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Optional worker roster CSV. Defaults to a synthetic roster.
    #[arg(long)]
    pub(crate) workers: Option<PathBuf>,
    /// Optional job openings CSV. Defaults to a synthetic opening.
    #[arg(long)]
    pub(crate) jobs: Option<PathBuf>,
    /// Job to walk through. Defaults to the first job in the roster.
    #[arg(long)]
    pub(crate) job_id: Option<String>,
    /// Recruiter recorded as the actor for every step
    #[arg(long, default_value = "demo-recruiter")]
    pub(crate) actor: String,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        workers,
        jobs,
        job_id,
        actor,
    } = args;

    let jobs = match jobs {
        Some(path) => RosterImporter::jobs_from_path(path)?,
        None => synthetic_jobs(),
    };
    let workers = match workers {
        Some(path) => RosterImporter::workers_from_path(path)?,
        None => synthetic_workers(),
    };
    let job_id = match job_id {
        Some(id) => JobId(id),
        None => match jobs.first() {
            Some(job) => job.id.clone(),
            None => {
                println!("Roster contains no job openings; nothing to demo");
                return Ok(());
            }
        },
    };

    let worker_registry = Arc::new(InMemoryWorkerRegistry::with_workers(workers));
    let service = ShortlistService::new(
        Arc::new(InMemoryJobRegistry::with_jobs(jobs)),
        worker_registry.clone(),
        Arc::new(InMemoryShortlistRepository::default()),
        MatchingConfig {
            include_inactive_workers: true,
            ..MatchingConfig::default()
        },
    );
    let actor = ActorId(actor);

    println!("Shortlist workflow demo");
    let shortlist = service.generate_shortlist(&job_id, &actor)?;
    render_shortlist(&shortlist);

    let Some(lead) = shortlist.items.first().map(|item| item.worker_id.clone()) else {
        return Ok(());
    };
    println!("\nRecruiter decisions");
    for status in [ShortlistItemStatus::Contacted, ShortlistItemStatus::Approved] {
        let change = service.set_item_status(&shortlist.id, &lead, status, &actor)?;
        println!(
            "- {}: {} -> {} (revision {})",
            lead, change.previous, change.item.status, change.item.revision
        );
    }

    let standby = standby_candidate(&worker_registry, &shortlist, &lead)?;
    if let Some(worker_id) = standby {
        let change = service.set_item_status(
            &shortlist.id,
            &worker_id,
            ShortlistItemStatus::Approved,
            &actor,
        )?;
        if let Some(promotion) = change.promotion {
            println!(
                "- {} approved while {}; recommended status {}",
                promotion.worker_id,
                promotion.current_status.label(),
                promotion.recommended_status.label()
            );
            let promoted = service.confirm_promotion(&worker_id, &actor)?;
            println!("  Promotion confirmed: {promoted}");
        }
    }

    println!("\nWorker notes");
    for item in shortlist.items.iter().take(3) {
        for note in worker_registry.notes_for(&item.worker_id).map_err(to_app_error)? {
            println!("- {}: {}", note.worker_id, note.text);
        }
    }

    let rebuilt = service.generate_shortlist(&job_id, &actor)?;
    let history = service.shortlist_history(&job_id)?;
    println!(
        "\nRegenerated shortlist {}; {} builds on record, previous build active: {}",
        rebuilt.id,
        history.len(),
        history.iter().any(|entry| entry.id == shortlist.id && entry.is_active())
    );

    Ok(())
}

fn standby_candidate(
    workers: &InMemoryWorkerRegistry,
    shortlist: &Shortlist,
    skip: &WorkerId,
) -> Result<Option<WorkerId>, AppError> {
    for item in shortlist.items.iter().filter(|item| &item.worker_id != skip) {
        let worker = workers.worker(&item.worker_id).map_err(to_app_error)?;
        if worker.is_some_and(|worker| worker.status == WorkerStatus::Standby) {
            return Ok(Some(item.worker_id.clone()));
        }
    }
    Ok(None)
}

fn to_app_error(err: RegistryError) -> AppError {
    AppError::Shortlist(err.into())
}

fn render_shortlist(shortlist: &Shortlist) {
    println!(
        "- Shortlist {} for job {} ({} candidates)",
        shortlist.id,
        shortlist.job_id,
        shortlist.items.len()
    );
    for item in &shortlist.items {
        println!("  {:>4}  {}", item.score, item.worker_id.0);
        for reason in &item.reasons {
            println!("        {reason}");
        }
    }
}

fn synthetic_jobs() -> Vec<JobOpening> {
    vec![JobOpening {
        id: JobId("job-demo-01".to_string()),
        code: "TUB-01".to_string(),
        title: "Tuberos industriales".to_string(),
        profession_required: "TUBERO".to_string(),
        documentation_required: vec!["Pasaporte de la UE (Europeo)".to_string()],
        languages_required: vec!["Español".to_string()],
        location_country: "España".to_string(),
        quantity: 3,
        priority: JobPriority::High,
    }]
}

fn synthetic_workers() -> Vec<WorkerProfile> {
    vec![
        profile("w-101", WorkerStatus::Active, "TUBERO", "Tubero", "Madrid, España"),
        profile("w-102", WorkerStatus::Standby, "TUBERO", "Tubero", "Gijón, España"),
        profile("w-103", WorkerStatus::Active, "SOLDADOR", "Soldadura TIG", "Oporto, Portugal"),
        profile("w-104", WorkerStatus::Blocked, "TUBERO", "Tubero", "Cádiz, España"),
    ]
}

fn profile(
    id: &str,
    status: WorkerStatus,
    profession: &str,
    tag: &str,
    location: &str,
) -> WorkerProfile {
    WorkerProfile {
        id: WorkerId(id.to_string()),
        status,
        profession: profession.to_string(),
        tags: vec![tag.to_string()],
        documentation: vec!["Pasaporte de la UE (Europeo)".to_string()],
        languages: vec!["Español".to_string()],
        location: location.to_string(),
    }
}
