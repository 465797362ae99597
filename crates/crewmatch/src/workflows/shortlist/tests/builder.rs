use super::common::*;
use crate::workflows::shortlist::builder::ShortlistBuilder;
use crate::workflows::shortlist::domain::{JobId, ShortlistItemStatus, WorkerStatus};
use crate::workflows::shortlist::error::ValidationError;

fn worker_ids(items: &[crate::workflows::shortlist::domain::ShortlistItem]) -> Vec<&str> {
    items.iter().map(|item| item.worker_id.0.as_str()).collect()
}

#[test]
fn build_sorts_descending_and_keeps_input_order_for_ties() {
    let builder = ShortlistBuilder::new(engine());
    let mut standby = pipe_fitter("w-standby");
    standby.status = WorkerStatus::Standby;
    let pool = vec![
        unrelated_worker("w-zero-a"),
        pipe_fitter("w-top-a"),
        standby,
        unrelated_worker("w-zero-b"),
        pipe_fitter("w-top-b"),
    ];

    let items = builder
        .build(&pipe_fitter_job(), &pool, fixed_now())
        .expect("build succeeds");

    assert_eq!(
        worker_ids(&items),
        vec!["w-top-a", "w-top-b", "w-standby", "w-zero-a", "w-zero-b"]
    );
    let scores: Vec<u32> = items.iter().map(|item| item.score).collect();
    assert_eq!(scores, vec![115, 115, 95, 0, 0]);
    assert!(items.windows(2).all(|pair| pair[0].score >= pair[1].score));
}

#[test]
fn build_keeps_zero_score_workers_as_suggestions() {
    let builder = ShortlistBuilder::default();
    let pool = vec![unrelated_worker("w-1")];

    let items = builder
        .build(&pipe_fitter_job(), &pool, fixed_now())
        .expect("build succeeds");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].score, 0);
    assert_eq!(items[0].status, ShortlistItemStatus::Suggested);
    assert_eq!(items[0].updated_at, fixed_now());
    assert_eq!(items[0].revision, 0);
}

#[test]
fn build_rejects_empty_pool() {
    let builder = ShortlistBuilder::default();

    match builder.build(&pipe_fitter_job(), &[], fixed_now()) {
        Err(ValidationError::EmptyWorkerPool { job_id }) => assert_eq!(job_id.0, "job-tub-01"),
        other => panic!("expected empty pool validation error, got {other:?}"),
    }
}

#[test]
fn build_rejects_job_without_id() {
    let builder = ShortlistBuilder::default();
    let mut job = pipe_fitter_job();
    job.id = JobId("  ".to_string());

    let result = builder.build(&job, &[pipe_fitter("w-1")], fixed_now());

    assert_eq!(result, Err(ValidationError::MissingJobId));
}

#[test]
fn build_scores_repeated_worker_once() {
    let builder = ShortlistBuilder::default();
    let mut duplicate = unrelated_worker("w-1");
    duplicate.profession = "TUBERO".to_string();
    let pool = vec![pipe_fitter("w-1"), duplicate, pipe_fitter("w-2")];

    let items = builder
        .build(&pipe_fitter_job(), &pool, fixed_now())
        .expect("build succeeds");

    assert_eq!(worker_ids(&items), vec!["w-1", "w-2"]);
    assert_eq!(items[0].score, 115);
}
