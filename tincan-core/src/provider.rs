//! Activity provider: turns course events into queued statements.
//!
//! The provider is inert until [`ActivityProvider::init`] binds it to a
//! session. From then on every statement passes the verb filter before it
//! reaches the delivery queue.

use std::sync::{Arc, Mutex, PoisonError, RwLock};

use tincan_queue::{Flush, StatementQueue};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::assembler::StatementAssembler;
use crate::course::{Course, ObjectiveRepository, Question};
use crate::error::TincanError;
use crate::errors_handler::ErrorsHandler;
use crate::events::{CourseEvent, EventBus, EventSeq};
use crate::filter::VerbFilter;
use crate::model::{Activity, Actor, Context, Statement, StatementResult, Verb};
use crate::session::Session;
use crate::settings::XapiSettings;

/// State created by a successful activation.
struct Activation {
    assembler: StatementAssembler,
    filter: VerbFilter,
}

/// Statement producer for one course player.
pub struct ActivityProvider {
    queue: StatementQueue<Statement>,
    errors: Arc<ErrorsHandler>,
    objectives: Arc<dyn ObjectiveRepository>,
    activation: RwLock<Option<Arc<Activation>>>,
    subscriptions: Mutex<CancellationToken>,
}

impl ActivityProvider {
    pub fn new(
        queue: StatementQueue<Statement>,
        errors: Arc<ErrorsHandler>,
        objectives: Arc<dyn ObjectiveRepository>,
    ) -> Self {
        Self {
            queue,
            errors,
            objectives,
            activation: RwLock::new(None),
            subscriptions: Mutex::new(CancellationToken::new()),
        }
    }

    /// Validate learner data and build the actor.
    ///
    /// Invalid data is surfaced as `actorDataIsIncorrect`.
    pub fn create_actor(&self, name: &str, email: &str) -> Result<Actor, TincanError> {
        Actor::new(name, email).map_err(|e| self.surface(e))
    }

    /// Bind the provider to a course launch.
    ///
    /// Fails with [`TincanError::Configuration`] when the settings carry no
    /// usable positive verb; the provider then stays uninitialized.
    pub fn init(
        &self,
        settings: &XapiSettings,
        course_id: &str,
        actor: Actor,
        activity_name: &str,
        activity_url: Option<&str>,
    ) -> Result<(), TincanError> {
        let positive_verb = settings
            .positive_verb()
            .map_err(|e| self.surface(e.into()))?;

        let session = Arc::new(Session::activate(
            course_id,
            actor,
            activity_name,
            activity_url,
        ));
        let activation = Activation {
            assembler: StatementAssembler::new(
                session,
                settings.default_language.clone(),
                positive_verb,
                Arc::clone(&self.objectives),
            ),
            filter: VerbFilter::from_settings(settings),
        };

        *self
            .activation
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::new(activation));

        info!(course_id, %positive_verb, "activity provider initialized");
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.activation().is_ok()
    }

    /// Session the provider is bound to.
    pub fn session(&self) -> Result<Session, TincanError> {
        Ok(self.activation()?.assembler.session().clone())
    }

    pub fn queue(&self) -> &StatementQueue<Statement> {
        &self.queue
    }

    /// Assemble a statement for the active session.
    pub fn build_statement(
        &self,
        verb: Verb,
        result: Option<StatementResult>,
        object: Option<Activity>,
        context: Option<Context>,
    ) -> Result<Statement, TincanError> {
        let activation = self.activation()?;
        Ok(activation
            .assembler
            .build_statement(verb, result, object, context))
    }

    /// Enqueue the statement if its verb is allowed.
    ///
    /// Returns whether the statement was enqueued.
    pub fn push_if_supported(&self, statement: Statement) -> Result<bool, TincanError> {
        let activation = self.activation()?;
        self.push(&activation, statement)
    }

    pub fn course_started(&self) -> Result<(), TincanError> {
        let activation = self.activation()?;
        let statement = activation.assembler.course_started();
        self.push(&activation, statement)?;
        Ok(())
    }

    /// Enqueue the course result statements followed by a flush marker.
    ///
    /// Nothing is enqueued when the course payload is rejected. The returned
    /// barrier resolves once the queue has drained.
    pub fn course_finished(&self, course: Option<&Course>) -> Result<Flush, TincanError> {
        let activation = self.activation()?;
        let statements = activation
            .assembler
            .course_finished(course)
            .map_err(|e| self.surface(e.into()))?;

        for statement in statements {
            self.push(&activation, statement)?;
        }

        Ok(self.queue.flush()?)
    }

    pub fn learning_content_experienced(
        &self,
        question: Option<&Question>,
        spent_time: Option<f64>,
    ) -> Result<(), TincanError> {
        let activation = self.activation()?;
        let statement = activation
            .assembler
            .learning_content_experienced(question, spent_time)
            .map_err(|e| self.surface(e.into()))?;

        self.push(&activation, statement)?;
        Ok(())
    }

    /// Enqueue the `answered` statement for a submitted question.
    ///
    /// A question that cannot be encoded is logged and skipped.
    pub fn answers_submitted(&self, question: Option<&Question>) -> Result<(), TincanError> {
        let activation = self.activation()?;

        match activation.assembler.question_answered(question) {
            Ok(statement) => {
                self.push(&activation, statement)?;
            }
            Err(e) => {
                let question_id = question.map(|q| q.id.as_str()).unwrap_or_default();
                error!(question_id, "failed to dispatch answered statement: {}", e);
            }
        }

        Ok(())
    }

    /// Route one event to its handler.
    ///
    /// `courseFinished` yields the flush barrier of its batch.
    pub fn handle(&self, event: CourseEvent) -> Result<Option<Flush>, TincanError> {
        match event {
            CourseEvent::CourseStarted => self.course_started().map(|()| None),
            CourseEvent::CourseFinished { course } => {
                self.course_finished(course.as_ref()).map(Some)
            }
            CourseEvent::LearningContentExperienced {
                question,
                spent_time,
            } => self
                .learning_content_experienced(question.as_ref(), spent_time)
                .map(|()| None),
            CourseEvent::AnswersSubmitted { question } => {
                self.answers_submitted(question.as_ref()).map(|()| None)
            }
        }
    }

    /// Spawn a listener that feeds bus events into this provider.
    ///
    /// A `courseFinished` event is not followed by the next one until its
    /// batch has drained.
    pub fn subscribe(self: &Arc<Self>, bus: &EventBus) -> JoinHandle<()> {
        let provider = Arc::clone(self);
        let mut event_rx = bus.subscribe();
        let cancel = self.subscription_token();

        tokio::spawn(async move {
            info!("activity provider listening for course events");

            loop {
                tokio::select! {
                    biased;

                    _ = cancel.cancelled() => {
                        info!("course event subscription turned off");
                        break;
                    }
                    received = event_rx.recv() => match received {
                        Some((seq, event)) => provider.dispatch(seq, event).await,
                        None => {
                            info!("event bus closed, stopping activity provider listener");
                            break;
                        }
                    },
                }
            }
        })
    }

    /// Stop every listener started by [`ActivityProvider::subscribe`].
    pub fn turn_off_subscriptions(&self) {
        let mut token = self
            .subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        token.cancel();
        *token = CancellationToken::new();
    }

    async fn dispatch(&self, seq: EventSeq, event: CourseEvent) {
        let name = event.name();
        debug!(seq, event = name, "handling course event");

        match self.handle(event) {
            Ok(Some(flush)) => {
                if let Err(e) = flush.await {
                    error!(seq, event = name, "statement batch did not drain: {}", e);
                }
            }
            Ok(None) => {}
            Err(e) => warn!(seq, event = name, "course event rejected: {}", e),
        }
    }

    fn subscription_token(&self) -> CancellationToken {
        self.subscriptions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .child_token()
    }

    fn activation(&self) -> Result<Arc<Activation>, TincanError> {
        let current = self
            .activation
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        current.clone().ok_or(TincanError::ActorNotInitialized)
    }

    fn push(&self, activation: &Activation, statement: Statement) -> Result<bool, TincanError> {
        if !activation.filter.is_allowed(&statement) {
            return Ok(false);
        }
        self.queue.enqueue(statement)?;
        Ok(true)
    }

    /// Show the error view for errors that carry a message.
    fn surface(&self, error: TincanError) -> TincanError {
        if let Some(message) = error.error_message() {
            self.errors.handle_error(message);
        }
        error
    }
}
