//! Run Review use case
//!
//! Orchestrates the three-stage review pipeline:
//!
//! 1. **Initial** — every participant answers the prompt (fan-out)
//! 2. **Critique** — every participant critiques its counterpart's answer (fan-out)
//! 3. **Summary** — the summarizer condenses both critiques (single task)
//!
//! Each stage is a barrier: its tasks run concurrently in a [`JoinSet`] and
//! the next stage starts only after all of them succeed. The first failure
//! aborts the remaining tasks of the stage and ends the run.

use crate::config::{ReviewRoster, ReviewSettings};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::use_cases::invoke_provider::ProviderInvoker;
use peer_review_domain::{
    ParticipantOutputs, PipelineState, Prompt, PromptTemplate, ReviewError, ReviewResult, Role,
    Stage, StageOutput, StageTask, aggregate,
};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

/// Use case for running a full review
pub struct RunReviewUseCase {
    roster: Arc<ReviewRoster>,
    invoker: ProviderInvoker,
    settings: ReviewSettings,
}

impl RunReviewUseCase {
    pub fn new(roster: ReviewRoster, settings: ReviewSettings) -> Self {
        Self {
            roster: Arc::new(roster),
            invoker: ProviderInvoker::new(settings.retry),
            settings,
        }
    }

    pub fn settings(&self) -> &ReviewSettings {
        &self.settings
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, prompt: &Prompt) -> Result<ReviewResult, ReviewError> {
        self.execute_with_progress(prompt, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        prompt: &Prompt,
        progress: &dyn ProgressNotifier,
    ) -> Result<ReviewResult, ReviewError> {
        let mut state = PipelineState::Pending.advance();
        info!(
            a = %self.roster.label(Role::A),
            b = %self.roster.label(Role::B),
            summarizer = %self.roster.label(Role::Summarizer),
            "Starting review"
        );

        // Stage 1: Initial responses
        let outputs = self
            .run_stage(&state, self.initial_tasks(prompt), progress)
            .await?;
        let initial = Self::collect(Stage::Initial, outputs)?;
        state = state.advance();

        // Stage 2: Cross-critique
        let outputs = self
            .run_stage(&state, self.critique_tasks(prompt, &initial), progress)
            .await?;
        let critiques = Self::collect(Stage::Critique, outputs)?;
        state = state.advance();

        // Stage 3: Summary
        let outputs = self
            .run_stage(&state, vec![self.summary_task(&critiques)], progress)
            .await?;
        let summary = outputs
            .into_iter()
            .find(|o| o.role == Role::Summarizer)
            .map(|o| o.text)
            .ok_or_else(|| {
                error!("Summary stage finished without a summarizer output");
                ReviewError::unknown()
            })?;
        state = state.advance();

        info!(state = %state, "Review finished");
        Ok(aggregate(prompt, initial, critiques, summary))
    }

    fn initial_tasks(&self, prompt: &Prompt) -> Vec<StageTask> {
        Role::PARTICIPANTS
            .iter()
            .map(|&role| {
                StageTask::new(
                    Stage::Initial,
                    role,
                    PromptTemplate::initial_system(),
                    PromptTemplate::initial_user(prompt.content()),
                )
            })
            .collect()
    }

    /// Each participant critiques its counterpart's stage-1 output, never its own.
    fn critique_tasks(&self, prompt: &Prompt, initial: &ParticipantOutputs) -> Vec<StageTask> {
        Role::PARTICIPANTS
            .iter()
            .filter_map(|&role| {
                let peer = role.counterpart()?;
                let peer_response = initial.get(peer)?;
                Some(StageTask::new(
                    Stage::Critique,
                    role,
                    PromptTemplate::critique_system(),
                    PromptTemplate::critique_user(
                        prompt.content(),
                        &self.roster.label(peer),
                        peer_response,
                    ),
                ))
            })
            .collect()
    }

    /// The summary sees the two critiques and nothing else.
    fn summary_task(&self, critiques: &ParticipantOutputs) -> StageTask {
        StageTask::new(
            Stage::Summary,
            Role::Summarizer,
            PromptTemplate::summary_system(),
            PromptTemplate::summary_user(
                &self.roster.label(Role::A),
                &critiques.a,
                &self.roster.label(Role::B),
                &critiques.b,
            ),
        )
    }

    /// Run one stage: start every task, then join on all of them.
    async fn run_stage(
        &self,
        state: &PipelineState,
        tasks: Vec<StageTask>,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<StageOutput>, ReviewError> {
        let Some(stage) = state.current_stage() else {
            error!(state = %state, "Stage requested outside a running state");
            return Err(ReviewError::unknown());
        };

        info!("Stage {}: {} ({} tasks)", stage.number(), stage, tasks.len());
        progress.on_stage_start(stage, tasks.len());

        let mut join_set = JoinSet::new();
        for task in tasks {
            let binding = self.roster.binding(task.role).clone();
            let invoker = self.invoker;

            join_set.spawn(async move {
                let result = invoker
                    .invoke(
                        task.role,
                        &binding,
                        &task.system_instruction,
                        &task.user_message,
                    )
                    .await;
                (task.role, binding, result)
            });
        }

        let mut outputs = Vec::with_capacity(join_set.len());

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((role, binding, Ok(text))) => {
                    info!("{} ({}) finished stage {}", role, binding.identity(), stage.number());
                    progress.on_task_complete(stage, role, binding.identity(), true);
                    outputs.push(StageOutput::new(stage, role, text));
                }
                Ok((role, binding, Err(e))) => {
                    progress.on_task_complete(stage, role, binding.identity(), false);
                    return Err(Self::fail(state, &mut join_set, progress, e));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                    return Err(Self::fail(state, &mut join_set, progress, ReviewError::unknown()));
                }
            }
        }

        progress.on_stage_complete(stage);
        Ok(outputs)
    }

    /// Abort the stage's remaining tasks and surface `error`.
    fn fail(
        state: &PipelineState,
        join_set: &mut JoinSet<impl Send + 'static>,
        progress: &dyn ProgressNotifier,
        error: ReviewError,
    ) -> ReviewError {
        let pending = join_set.len();
        join_set.abort_all();

        if let Some(stage) = state.current_stage() {
            progress.on_failed(stage);
        }
        let failed = state.fail(error.clone());
        warn!(
            state = %failed,
            aborted = pending,
            "Review stopped: {}",
            error.user_message()
        );
        error
    }

    fn collect(stage: Stage, outputs: Vec<StageOutput>) -> Result<ParticipantOutputs, ReviewError> {
        ParticipantOutputs::collect(stage, outputs).ok_or_else(|| {
            error!("Stage {} finished without one output per participant", stage.number());
            ReviewError::unknown()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use crate::ports::text_generation::{ProviderBinding, ProviderError};
    use crate::testing::{ScriptedProvider, ok};
    use peer_review_domain::ProviderIdentity;
    use std::sync::Mutex;
    use std::time::Duration;

    fn initial() -> &'static str {
        PromptTemplate::initial_system()
    }

    fn critique() -> &'static str {
        PromptTemplate::critique_system()
    }

    fn summary() -> &'static str {
        PromptTemplate::summary_system()
    }

    fn settings() -> ReviewSettings {
        ReviewSettings {
            retry: RetryPolicy::default().with_backoff(Duration::ZERO),
            ..Default::default()
        }
    }

    struct Fixture {
        a: Arc<ScriptedProvider>,
        b: Arc<ScriptedProvider>,
        s: Arc<ScriptedProvider>,
    }

    impl Fixture {
        fn new(a: ScriptedProvider, b: ScriptedProvider, s: ScriptedProvider) -> Self {
            Self {
                a: Arc::new(a),
                b: Arc::new(b),
                s: Arc::new(s),
            }
        }

        fn happy() -> Self {
            Self::new(
                ScriptedProvider::new("alpha")
                    .on(initial(), vec![ok("4")])
                    .on(critique(), vec![ok("Alpha critique of Four.")]),
                ScriptedProvider::new("beta")
                    .on(initial(), vec![ok("Four.")])
                    .on(critique(), vec![ok("Beta critique of 4")]),
                ScriptedProvider::new("gamma").on(summary(), vec![ok("Both agree.")]),
            )
        }

        fn use_case(&self) -> RunReviewUseCase {
            let roster = ReviewRoster::new(
                ProviderBinding::new(self.a.clone(), "model-a"),
                ProviderBinding::new(self.b.clone(), "model-b"),
                ProviderBinding::new(self.s.clone(), "model-s"),
            );
            RunReviewUseCase::new(roster, settings())
        }
    }

    fn prompt() -> Prompt {
        Prompt::parse("What is 2+2?", 10_000).unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_result() {
        let fixture = Fixture::happy();
        let result = fixture.use_case().execute(&prompt()).await.unwrap();

        assert_eq!(
            result,
            ReviewResult {
                prompt: "What is 2+2?".to_string(),
                initial_response_a: "4".to_string(),
                initial_response_b: "Four.".to_string(),
                critique_a_of_b: "Alpha critique of Four.".to_string(),
                critique_b_of_a: "Beta critique of 4".to_string(),
                summary: "Both agree.".to_string(),
            }
        );
        assert_eq!(fixture.a.call_count(), 2);
        assert_eq!(fixture.b.call_count(), 2);
        assert_eq!(fixture.s.call_count(), 1);
    }

    #[tokio::test]
    async fn test_outputs_are_trimmed() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![ok("  4\n")])
                .on(critique(), vec![ok("\tcrit a ")]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![Ok(None)])
                .on(critique(), vec![ok("crit b\n\n")]),
            ScriptedProvider::new("gamma").on(summary(), vec![ok(" sum ")]),
        );
        let result = fixture.use_case().execute(&prompt()).await.unwrap();
        assert_eq!(result.initial_response_a, "4");
        assert_eq!(result.initial_response_b, "");
        assert_eq!(result.critique_a_of_b, "crit a");
        assert_eq!(result.critique_b_of_a, "crit b");
        assert_eq!(result.summary, "sum");
    }

    #[tokio::test]
    async fn test_initial_tasks_share_instruction_and_raw_prompt() {
        let fixture = Fixture::happy();
        fixture.use_case().execute(&prompt()).await.unwrap();

        assert_eq!(fixture.a.calls_with_system(initial()), vec!["What is 2+2?"]);
        assert_eq!(fixture.b.calls_with_system(initial()), vec!["What is 2+2?"]);
        assert_eq!(fixture.a.calls()[0].0, "model-a");
        assert_eq!(fixture.s.calls()[0].0, "model-s");
    }

    #[tokio::test]
    async fn test_each_participant_critiques_the_other() {
        let fixture = Fixture::happy();
        fixture.use_case().execute(&prompt()).await.unwrap();

        let a_critique = &fixture.a.calls_with_system(critique())[0];
        let b_critique = &fixture.b.calls_with_system(critique())[0];

        assert_eq!(
            a_critique,
            &PromptTemplate::critique_user("What is 2+2?", "beta", "Four.")
        );
        assert_eq!(
            b_critique,
            &PromptTemplate::critique_user("What is 2+2?", "alpha", "4")
        );
    }

    #[tokio::test]
    async fn test_summary_sees_only_critiques() {
        let fixture = Fixture::happy();
        fixture.use_case().execute(&prompt()).await.unwrap();

        let summary_input = &fixture.s.calls_with_system(summary())[0];
        assert_eq!(
            summary_input,
            &PromptTemplate::summary_user(
                "alpha",
                "Alpha critique of Four.",
                "beta",
                "Beta critique of 4"
            )
        );
        assert!(!summary_input.contains("What is 2+2?"));
    }

    #[tokio::test]
    async fn test_stage_one_failure_starts_nothing_else() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha").on(
                initial(),
                vec![Err(ProviderError::Auth("invalid x-api-key".into()))],
            ),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(critique(), vec![ok("unused")]),
            ScriptedProvider::new("gamma").on(summary(), vec![ok("unused")]),
        );

        let err = fixture.use_case().execute(&prompt()).await.unwrap_err();

        assert_eq!(err.role(), Some(Role::A));
        assert_eq!(
            err.user_message(),
            "Unable to connect to alpha. Please check your API key and try again."
        );
        assert_eq!(fixture.a.calls_with_system(initial()).len(), 1);
        assert!(fixture.a.calls_with_system(critique()).is_empty());
        assert!(fixture.b.calls_with_system(critique()).is_empty());
        assert_eq!(fixture.s.call_count(), 0);
    }

    #[tokio::test]
    async fn test_stage_two_failure_skips_summary() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![ok("4")])
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(
                    critique(),
                    vec![Err(ProviderError::Http {
                        status: 400,
                        body: "bad request".into(),
                    })],
                ),
            ScriptedProvider::new("gamma").on(summary(), vec![ok("unused")]),
        );

        let err = fixture.use_case().execute(&prompt()).await.unwrap_err();
        assert_eq!(err.role(), Some(Role::B));
        assert_eq!(fixture.s.call_count(), 0);
    }

    #[tokio::test]
    async fn test_summary_failure_is_reported_for_summarizer() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![ok("4")])
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("gamma").on(summary(), vec![Err(ProviderError::Timeout)]),
        );

        let err = fixture.use_case().execute(&prompt()).await.unwrap_err();
        assert_eq!(err.role(), Some(Role::Summarizer));
        assert_eq!(
            err,
            ReviewError::provider(
                Role::Summarizer,
                ProviderIdentity::new("gamma"),
                "Request to gamma timed out. Please try again."
            )
        );
        // timeout is transient: one retry
        assert_eq!(fixture.s.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transient_failure_inside_stage_is_retried() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(
                    initial(),
                    vec![Err(ProviderError::Other("429 Too Many Requests".into())), ok("4")],
                )
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("gamma").on(summary(), vec![ok("done")]),
        );

        let result = fixture.use_case().execute(&prompt()).await.unwrap();
        assert_eq!(result.initial_response_a, "4");
        assert_eq!(fixture.a.calls_with_system(initial()).len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fail_fast_cancels_slow_sibling() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![Err(ProviderError::Auth("revoked".into()))]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .delayed(initial(), Duration::from_secs(60)),
            ScriptedProvider::new("gamma"),
        );

        let start = tokio::time::Instant::now();
        let err = fixture.use_case().execute(&prompt()).await.unwrap_err();
        assert_eq!(err.role(), Some(Role::A));
        assert!(start.elapsed() < Duration::from_secs(60));

        // the aborted sibling never completes, even after its delay passes
        tokio::time::sleep(Duration::from_secs(120)).await;
        assert!(fixture.b.call_count() <= 1);
        assert_eq!(fixture.b.finished_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_critique_failure_cancels_slow_critique() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![ok("4")])
                .on(critique(), vec![Err(ProviderError::Auth("revoked".into()))]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(critique(), vec![ok("too terse")])
                .delayed(critique(), Duration::from_secs(60)),
            ScriptedProvider::new("gamma").on(summary(), vec![ok("done")]),
        );

        let start = tokio::time::Instant::now();
        let err = fixture.use_case().execute(&prompt()).await.unwrap_err();
        assert_eq!(err.role(), Some(Role::A));
        assert!(start.elapsed() < Duration::from_secs(60));

        tokio::time::sleep(Duration::from_secs(120)).await;
        // only beta's initial answer ran to completion
        assert_eq!(fixture.b.finished_count(), 1);
        assert_eq!(fixture.s.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stage_two_waits_for_slowest_stage_one_task() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![ok("4")])
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(critique(), vec![ok("fine")])
                .delayed(initial(), Duration::from_secs(5)),
            ScriptedProvider::new("gamma").on(summary(), vec![ok("done")]),
        );

        let start = tokio::time::Instant::now();
        fixture.use_case().execute(&prompt()).await.unwrap();

        let a_critique_start = fixture.a.started_at(critique())[0];
        assert!(a_critique_start.duration_since(start) >= Duration::from_secs(5));
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl ProgressNotifier for RecordingProgress {
        fn on_stage_start(&self, stage: Stage, total_tasks: usize) {
            self.events
                .lock()
                .unwrap()
                .push(format!("start {} {}", stage.as_str(), total_tasks));
        }

        fn on_task_complete(
            &self,
            stage: Stage,
            role: Role,
            _identity: &ProviderIdentity,
            success: bool,
        ) {
            self.events
                .lock()
                .unwrap()
                .push(format!("task {} {} {}", stage.as_str(), role.as_str(), success));
        }

        fn on_stage_complete(&self, stage: Stage) {
            self.events
                .lock()
                .unwrap()
                .push(format!("complete {}", stage.as_str()));
        }

        fn on_failed(&self, stage: Stage) {
            self.events
                .lock()
                .unwrap()
                .push(format!("failed {}", stage.as_str()));
        }
    }

    #[tokio::test]
    async fn test_progress_events_per_stage() {
        let fixture = Fixture::happy();
        let progress = RecordingProgress::default();
        fixture
            .use_case()
            .execute_with_progress(&prompt(), &progress)
            .await
            .unwrap();

        let events = progress.events.lock().unwrap().clone();
        let starts: Vec<_> = events.iter().filter(|e| e.starts_with("start")).collect();
        assert_eq!(starts, vec!["start initial 2", "start critique 2", "start summary 1"]);
        assert_eq!(events.iter().filter(|e| e.ends_with("true")).count(), 5);
        assert_eq!(events.last().unwrap(), "complete summary");
    }

    #[tokio::test]
    async fn test_progress_reports_failure() {
        let fixture = Fixture::new(
            ScriptedProvider::new("alpha")
                .on(initial(), vec![ok("4")])
                .on(critique(), vec![Err(ProviderError::Auth("nope".into()))]),
            ScriptedProvider::new("beta")
                .on(initial(), vec![ok("Four.")])
                .on(critique(), vec![ok("fine")]),
            ScriptedProvider::new("gamma"),
        );
        let progress = RecordingProgress::default();
        let _ = fixture
            .use_case()
            .execute_with_progress(&prompt(), &progress)
            .await;

        let events = progress.events.lock().unwrap().clone();
        assert!(events.contains(&"task critique a false".to_string()));
        assert_eq!(events.last().unwrap(), "failed critique");
        assert!(!events.iter().any(|e| e.contains("summary")));
    }
}
