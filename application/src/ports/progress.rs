//! Progress notification port
//!
//! Defines the interface for reporting progress during a review run.

use peer_review_domain::{ProviderIdentity, Role, Stage};

/// Callback for progress updates during a review run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (console, web UI, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: Stage, total_tasks: usize);

    /// Called when a task completes within a stage
    fn on_task_complete(&self, stage: Stage, role: Role, identity: &ProviderIdentity, success: bool);

    /// Called when every task of a stage has succeeded
    fn on_stage_complete(&self, stage: Stage);

    /// Called when the run stops on a failure
    fn on_failed(&self, _stage: Stage) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: Stage, _total_tasks: usize) {}
    fn on_task_complete(
        &self,
        _stage: Stage,
        _role: Role,
        _identity: &ProviderIdentity,
        _success: bool,
    ) {
    }
    fn on_stage_complete(&self, _stage: Stage) {}
}
