//! Run Voting use case
//!
//! Self-consistency: generate several completions for the same prompt at a
//! rising temperature, normalize each answer and let the majority decide.
//!
//! Paths run one after another. A failed or timed-out path is logged and
//! skipped; only a round in which nothing votes is an error.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, LlmGateway};
use crate::ports::progress::{NoProgress, VotingProgressNotifier};
use crate::use_cases::shared::{cancellable, generate_with_timeout, is_cancelled};
use cod_domain::util::log_preview;
use cod_domain::{
    GenerationParams, Model, PathResponse, Prompt, ReasoningMethod, SessionConfig, VotingSession,
    path_temperature, segment,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur during a voting round
#[derive(Error, Debug)]
pub enum RunVotingError {
    #[error("Voting requires at least one path")]
    NoPaths,

    #[error("No valid responses")]
    NoValidResponses,

    #[error("Voting round cancelled")]
    Cancelled,
}

/// Input for the RunVoting use case
#[derive(Debug, Clone)]
pub struct RunVotingInput {
    /// Full prompt, system prompt already applied
    pub prompt: Prompt,
    pub model: Model,
    /// Method used to segment every path's completion
    pub method: ReasoningMethod,
    pub word_limit: usize,
    pub paths: usize,
    /// Base temperature of the diversity ramp
    pub temperature: f64,
    /// Sampling parameters; the temperature is overridden per path
    pub generation: GenerationParams,
}

impl RunVotingInput {
    /// Round for `prompt` using the session's model, method and voting settings
    pub fn from_session(prompt: Prompt, config: &SessionConfig) -> Self {
        Self {
            prompt,
            model: config.model.clone(),
            method: config.method,
            word_limit: config.word_limit,
            paths: config.self_consistency.paths,
            temperature: config.self_consistency.temperature,
            generation: config.generation,
        }
    }

    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }
}

/// Use case for running a self-consistency voting round
pub struct RunVotingUseCase {
    gateway: Arc<dyn LlmGateway>,
    execution: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl RunVotingUseCase {
    pub fn new(gateway: Arc<dyn LlmGateway>) -> Self {
        Self {
            gateway,
            execution: ExecutionParams::default(),
            conversation_logger: Arc::new(NoConversationLogger),
            cancellation_token: None,
        }
    }

    pub fn with_execution_params(mut self, execution: ExecutionParams) -> Self {
        self.execution = execution;
        self
    }

    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the round with default (no-op) progress
    pub async fn execute(&self, input: RunVotingInput) -> Result<VotingSession, RunVotingError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the round with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunVotingInput,
        progress: &dyn VotingProgressNotifier,
    ) -> Result<VotingSession, RunVotingError> {
        if input.paths == 0 {
            return Err(RunVotingError::NoPaths);
        }

        info!(
            "Starting voting round: {} paths, base temperature {:.2}, method {}",
            input.paths, input.temperature, input.method
        );
        progress.on_round_start(input.paths);

        let mut responses = Vec::with_capacity(input.paths);
        let mut failed_paths = Vec::new();

        for index in 0..input.paths {
            if is_cancelled(&self.cancellation_token) {
                return Err(RunVotingError::Cancelled);
            }

            let temperature = path_temperature(input.temperature, index);
            progress.on_path_start(index, temperature);

            let request = CompletionRequest::new(
                input.model.clone(),
                input.prompt.clone(),
                input.generation.at_temperature(temperature),
            );
            let generated = cancellable(
                &self.cancellation_token,
                generate_with_timeout(
                    self.gateway.as_ref(),
                    &request,
                    self.execution.request_timeout,
                ),
            )
            .await
            .ok_or(RunVotingError::Cancelled)?;

            match generated {
                Ok(raw) => {
                    let result = segment(&raw, input.method, input.word_limit);
                    let response = PathResponse::new(index, temperature, result);
                    debug!(
                        "Path {} (t={:.2}) answered: {:?}",
                        index + 1,
                        temperature,
                        response.vote_key.as_deref().map(|k| log_preview(k, 80))
                    );
                    progress.on_path_complete(index, true);
                    responses.push(response);
                }
                Err(e) => {
                    warn!("Path {} failed: {}", index + 1, e);
                    progress.on_path_complete(index, false);
                    failed_paths.push(index);
                }
            }
        }

        progress.on_tallying();
        let session = VotingSession::resolve(input.paths, input.temperature, responses, failed_paths)
            .ok_or(RunVotingError::NoValidResponses)?;

        info!(
            "Voting resolved: '{}' with {}/{} votes ({:.0}%)",
            log_preview(&session.winning_answer, 60),
            session.agreement_count,
            session.paths,
            session.agreement_percentage
        );
        if !session.failed_paths.is_empty() {
            warn!(
                "{} of {} paths failed",
                session.failed_paths.len(),
                session.paths
            );
        }

        self.conversation_logger.log(ConversationEvent::new(
            "voting_round",
            serde_json::json!({
                "model": input.model.to_string(),
                "paths": session.paths,
                "temperature": session.temperature,
                "failed_paths": session.failed_paths,
                "tally": session.tally,
                "winning_answer": session.winning_answer,
                "agreement_count": session.agreement_count,
                "agreement_percentage": session.agreement_percentage,
            }),
        ));

        progress.on_round_complete(&session);
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::GatewayError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    enum Scripted {
        Text(&'static str),
        Fail,
        Hang,
    }

    struct MockGateway {
        script: Mutex<VecDeque<Scripted>>,
        temperatures: Mutex<Vec<f64>>,
    }

    impl MockGateway {
        fn new(script: Vec<Scripted>) -> Self {
            Self {
                script: Mutex::new(VecDeque::from(script)),
                temperatures: Mutex::new(Vec::new()),
            }
        }

        fn temperatures(&self) -> Vec<f64> {
            self.temperatures.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl LlmGateway for MockGateway {
        async fn generate(&self, request: &CompletionRequest) -> Result<String, GatewayError> {
            self.temperatures
                .lock()
                .unwrap()
                .push(request.params.temperature);
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Scripted::Text(text)) => Ok(text.to_string()),
                Some(Scripted::Fail) => Err(GatewayError::Connection("refused".to_string())),
                Some(Scripted::Hang) => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok("too late".to_string())
                }
                None => Err(GatewayError::Other("No more responses".to_string())),
            }
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl VotingProgressNotifier for RecordingProgress {
        fn on_round_start(&self, paths: usize) {
            self.events.lock().unwrap().push(format!("start:{paths}"));
        }

        fn on_path_complete(&self, index: usize, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("path:{index}:{success}"));
        }

        fn on_tallying(&self) {
            self.events.lock().unwrap().push("tally".to_string());
        }

        fn on_round_complete(&self, session: &VotingSession) {
            self.events
                .lock()
                .unwrap()
                .push(format!("done:{}", session.winning_answer));
        }
    }

    fn input(paths: usize) -> RunVotingInput {
        let config = SessionConfig::default().with_self_consistency(true);
        RunVotingInput::from_session(Prompt::from_user("What is 20 - 12?"), &config)
            .with_paths(paths)
    }

    fn use_case(gateway: Arc<MockGateway>) -> RunVotingUseCase {
        RunVotingUseCase::new(gateway)
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn test_majority_answer_wins() {
        let gateway = Arc::new(MockGateway::new(vec![
            Scripted::Text("20 - 12 = 8\n#### 8"),
            Scripted::Text("20 - 12 = 8\n#### 8"),
            Scripted::Text("20 - 11 = 9\n#### 9"),
        ]));
        let session = use_case(gateway.clone()).execute(input(3)).await.unwrap();

        assert_eq!(session.winning_answer, "8");
        assert_eq!(session.agreement_count, 2);
        assert_eq!(session.agreement_percentage, 67.0);
        assert_eq!(session.winner.answer.as_deref(), Some("8"));
        assert!(session.failed_paths.is_empty());
    }

    #[tokio::test]
    async fn test_temperature_ramp_per_path() {
        let gateway = Arc::new(MockGateway::new(vec![
            Scripted::Text("#### 1"),
            Scripted::Text("#### 1"),
            Scripted::Text("#### 1"),
        ]));
        use_case(gateway.clone()).execute(input(3)).await.unwrap();

        let temps = gateway.temperatures();
        assert_eq!(temps.len(), 3);
        for (t, expected) in temps.iter().zip([0.9, 0.95, 1.0]) {
            assert!((t - expected).abs() < 1e-9, "{t} != {expected}");
        }
    }

    #[tokio::test]
    async fn test_failed_path_is_skipped() {
        let gateway = Arc::new(MockGateway::new(vec![
            Scripted::Text("a\n#### 8"),
            Scripted::Fail,
            Scripted::Text("c\n#### 8"),
        ]));
        let session = use_case(gateway).execute(input(3)).await.unwrap();

        assert_eq!(session.failed_paths, vec![1]);
        assert_eq!(session.responses.len(), 2);
        assert_eq!(session.agreement_count, 2);
        assert_eq!(session.agreement_percentage, 67.0);
    }

    #[tokio::test]
    async fn test_all_paths_failing_is_an_error() {
        let gateway = Arc::new(MockGateway::new(vec![Scripted::Fail, Scripted::Fail]));
        let err = use_case(gateway).execute(input(2)).await.unwrap_err();
        assert!(matches!(err, RunVotingError::NoValidResponses));
        assert_eq!(err.to_string(), "No valid responses");
    }

    #[tokio::test]
    async fn test_responses_without_answers_cast_no_votes() {
        let gateway = Arc::new(MockGateway::new(vec![
            Scripted::Text("thinking only\n####"),
            Scripted::Text("   "),
        ]));
        let err = use_case(gateway).execute(input(2)).await.unwrap_err();
        assert!(matches!(err, RunVotingError::NoValidResponses));
    }

    #[tokio::test]
    async fn test_zero_paths_rejected() {
        let gateway = Arc::new(MockGateway::new(vec![]));
        let err = use_case(gateway.clone()).execute(input(0)).await.unwrap_err();
        assert!(matches!(err, RunVotingError::NoPaths));
        assert!(gateway.temperatures().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timed_out_path_does_not_sink_the_round() {
        let gateway = Arc::new(MockGateway::new(vec![
            Scripted::Text("#### 42"),
            Scripted::Hang,
            Scripted::Text("#### 42"),
        ]));
        let session = use_case(gateway)
            .with_execution_params(
                ExecutionParams::default().with_request_timeout(Some(Duration::from_secs(5))),
            )
            .execute(input(3))
            .await
            .unwrap();

        assert_eq!(session.failed_paths, vec![1]);
        assert_eq!(session.winning_answer, "42");
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();
        let gateway = Arc::new(MockGateway::new(vec![Scripted::Text("#### 1")]));
        let err = use_case(gateway.clone())
            .with_cancellation(token)
            .execute(input(1))
            .await
            .unwrap_err();
        assert!(matches!(err, RunVotingError::Cancelled));
        assert!(gateway.temperatures().is_empty());
    }

    #[tokio::test]
    async fn test_progress_callbacks_in_order() {
        let gateway = Arc::new(MockGateway::new(vec![Scripted::Text("#### 5"), Scripted::Fail]));
        let progress = RecordingProgress::default();
        use_case(gateway)
            .execute_with_progress(input(2), &progress)
            .await
            .unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec!["start:2", "path:0:true", "path:1:false", "tally", "done:5"]
        );
    }
}
