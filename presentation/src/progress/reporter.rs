//! Progress reporting for review runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use peer_review_application::ProgressNotifier;
use peer_review_domain::{ProviderIdentity, Role, Stage};
use std::sync::Mutex;

/// Reports progress during a review run with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn stage_title(stage: Stage) -> String {
        format!("Stage {}: {}", stage.number(), stage.display_name())
    }

    fn task_label(role: Role, identity: &ProviderIdentity) -> String {
        match role {
            Role::Summarizer => format!("{identity} (summarizer)"),
            _ => identity.to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(Self::stage_title(stage));
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _stage: Stage, role: Role, identity: &ProviderIdentity, success: bool) {
        if let Ok(slot) = self.stage_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let label = Self::task_label(role, identity);
            let status = if success {
                format!("{} {}", "v".green(), label)
            } else {
                format!("{} {}", "x".red(), label)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: Stage) {
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("Stage {} complete!", stage.number()).green().to_string());
        }
    }

    fn on_failed(&self, stage: Stage) {
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.abandon_with_message(format!("Stage {} failed", stage.number()).red().to_string());
        }
    }
}
