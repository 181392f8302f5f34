//! Run Chat use case
//!
//! One chat turn: classify the query, pick the system prompt, then either
//! ask the model once or run a voting round, and segment what comes back.

use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, VotingProgressNotifier};
use crate::use_cases::run_voting::{RunVotingError, RunVotingInput, RunVotingUseCase};
use crate::use_cases::shared::{cancellable, generate_with_timeout};
use cod_domain::util::log_preview;
use cod_domain::{
    ComplexityProfile, CompletionResult, Message, Prompt, Question, SessionConfig, VotingSession,
    analyze, apply_system_prompt, segment,
};
use std::sync::Arc;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Errors that can occur during a chat turn
#[derive(Error, Debug)]
pub enum RunChatError {
    #[error("Query is empty")]
    EmptyQuery,

    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    #[error("Voting failed: {0}")]
    Voting(#[from] RunVotingError),

    #[error("Request cancelled")]
    Cancelled,
}

/// Input for the RunChat use case
#[derive(Debug, Clone)]
pub struct RunChatInput {
    pub query: String,
    /// Earlier user/assistant messages of the thread, oldest first
    pub history: Vec<Message>,
    pub config: SessionConfig,
}

impl RunChatInput {
    pub fn new(query: impl Into<String>, config: SessionConfig) -> Self {
        Self {
            query: query.into(),
            history: Vec::new(),
            config,
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }
}

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    pub profile: ComplexityProfile,
    pub system_prompt: String,
    /// Completion shown to the user (the voting winner when voting ran)
    pub result: CompletionResult,
    pub voting: Option<VotingSession>,
}

impl ChatOutcome {
    /// Message to append to the thread for the next turn
    pub fn assistant_message(&self) -> Message {
        Message::assistant(self.result.raw_text.clone())
    }
}

/// Use case for running one chat turn
pub struct RunChatUseCase {
    gateway: Arc<dyn LlmGateway>,
    execution: ExecutionParams,
    conversation_logger: Arc<dyn ConversationLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl RunChatUseCase {
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

    pub async fn execute(&self, input: RunChatInput) -> Result<ChatOutcome, RunChatError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the turn; `progress` only hears from voting rounds
    pub async fn execute_with_progress(
        &self,
        input: RunChatInput,
        progress: &dyn VotingProgressNotifier,
    ) -> Result<ChatOutcome, RunChatError> {
        let question = Question::try_new(input.query).map_err(|_| RunChatError::EmptyQuery)?;
        let config = input.config;

        let profile = analyze(question.content());
        let system_prompt = config.system_prompt_for(&profile);
        debug!(
            "Query profile: complexity={}, math={}, logic={}, multi_step={}",
            profile.complexity, profile.has_math, profile.has_logic, profile.multi_step
        );

        let mut messages = input.history;
        messages.push(Message::user(question.content()));
        let mut prompt = Prompt::new(messages);
        apply_system_prompt(&mut prompt, &system_prompt);

        info!(
            "Chat turn [{}]: {}",
            config.method,
            log_preview(question.content(), 100)
        );
        self.conversation_logger.log(ConversationEvent::new(
            "user_query",
            serde_json::json!({
                "query": question.content(),
                "method": config.method.as_str(),
                "complexity": profile.complexity.as_str(),
                "system_prompt": system_prompt,
            }),
        ));

        if config.voting_enabled() {
            let mut voting = RunVotingUseCase::new(Arc::clone(&self.gateway))
                .with_execution_params(self.execution.clone())
                .with_conversation_logger(Arc::clone(&self.conversation_logger));
            if let Some(token) = &self.cancellation_token {
                voting = voting.with_cancellation(token.clone());
            }

            let session = voting
                .execute_with_progress(RunVotingInput::from_session(prompt, &config), progress)
                .await?;

            return Ok(ChatOutcome {
                profile,
                system_prompt,
                result: session.winner.clone(),
                voting: Some(session),
            });
        }

        let request = CompletionRequest::new(config.model.clone(), prompt, config.generation);
        let raw = cancellable(
            &self.cancellation_token,
            generate_with_timeout(
                self.gateway.as_ref(),
                &request,
                self.execution.request_timeout,
            ),
        )
        .await
        .ok_or(RunChatError::Cancelled)??;

        let result = segment(&raw, config.method, config.word_limit);
        debug!(
            "Completion: {} thinking words, {} answer words, {}/{} steps over limit",
            result.thinking_word_count,
            result.answer_word_count,
            result.steps_over_limit,
            result.draft_steps
        );

        self.conversation_logger.log(ConversationEvent::new(
            "completion",
            serde_json::json!({
                "model": config.model.to_string(),
                "temperature": config.generation.temperature,
                "raw_text": result.raw_text,
                "answer": result.answer,
                "thinking_word_count": result.thinking_word_count,
                "answer_word_count": result.answer_word_count,
            }),
        ));

        Ok(ChatOutcome {
            profile,
            system_prompt,
            result,
            voting: None,
        })
    }
}
