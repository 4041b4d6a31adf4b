//! Runs one registration from form edits through email dispatch.

use super::state::SubmissionState;
use crate::company::{CompanyConfig, Host};
use crate::delivery::{BatchDispatcher, DeliveryOutcome};
use crate::domain::{
    apply_phone_edit, find_country_code, sanitize_phone_input, validate_form, FormErrors, FormField, ValidationError,
    VisitorFormData,
};
use crate::error::{DeliveryError, SubmissionError, SubmissionResult};
use crate::network::{NetworkInfo, TimeoutPolicy};
use crate::templates::{host_notification, visitor_confirmation, Clock, SystemClock};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

const INVALID_FIELDS_MESSAGE: &str = "Please correct the highlighted fields and try again.";
const UNKNOWN_HOST_MESSAGE: &str =
    "The selected host could not be found. Please choose another host.";
const DELIVERY_FAILED_MESSAGE: &str =
    "We couldn't send your confirmation email. Please try again.";
const TIMED_OUT_MESSAGE: &str =
    "The request timed out. Please check your connection and try again.";
const ABORTED_MESSAGE: &str = "The submission was cancelled.";

/// Result of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReport {
    /// Endpoint id of the visitor confirmation, when one was returned
    pub visitor_message_id: Option<String>,

    /// Whether the host notification was delivered too
    pub host_notified: bool,

    pub host_message_id: Option<String>,
}

/// Owns the form for one registration and drives its submission.
pub struct SubmissionOrchestrator {
    company: Arc<CompanyConfig>,
    dispatcher: BatchDispatcher,
    clock: Arc<dyn Clock>,
    timeouts: TimeoutPolicy,
    network: NetworkInfo,
    form: VisitorFormData,
    errors: FormErrors,
    failure: Option<String>,
    state: Arc<watch::Sender<SubmissionState>>,
}

impl SubmissionOrchestrator {
    pub fn new(company: Arc<CompanyConfig>, dispatcher: BatchDispatcher) -> Self {
        let (state, _) = watch::channel(SubmissionState::Idle);
        Self {
            company,
            dispatcher,
            clock: Arc::new(SystemClock),
            timeouts: TimeoutPolicy::default(),
            network: NetworkInfo::online(),
            form: VisitorFormData::default(),
            errors: FormErrors::default(),
            failure: None,
            state: Arc::new(state),
        }
    }

    /// Use `clock` for the registration time stamped into host notifications.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_timeouts(mut self, timeouts: TimeoutPolicy) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_network(mut self, network: NetworkInfo) -> Self {
        self.network = network;
        self
    }

    pub fn company(&self) -> &CompanyConfig {
        &self.company
    }

    pub fn form(&self) -> &VisitorFormData {
        &self.form
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        *self.state.borrow()
    }

    pub fn is_submitting(&self) -> bool {
        self.state().is_submitting()
    }

    /// Watch state transitions, e.g. to disable a submit control while
    /// [`SubmissionState::is_submitting`] holds.
    pub fn subscribe(&self) -> watch::Receiver<SubmissionState> {
        self.state.subscribe()
    }

    /// User-facing explanation of the last failed attempt.
    pub fn failure_message(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    /// Timeout that the next dispatch will arm.
    pub fn submit_timeout(&self) -> Duration {
        self.timeouts.timeout_for(&self.network)
    }

    pub fn set_network_info(&mut self, network: NetworkInfo) {
        self.network = network;
    }

    /// Apply an edit to one field and clear that field's error.
    ///
    /// Phone edits are reduced to digits and dropped when they would start
    /// with `0`. Unknown country codes are rejected. Returns whether the edit
    /// was accepted.
    pub fn update_field(&mut self, field: FormField, value: impl Into<String>) -> bool {
        let value = value.into();
        match field {
            FormField::PhoneNumber => return self.update_phone_number(&value),
            FormField::CountryCode => return self.set_country_code(&value),
            _ => self.form.set(field, value),
        }
        self.errors.clear(field);
        true
    }

    /// Apply a raw phone edit. Returns false if the edit was dropped.
    pub fn update_phone_number(&mut self, raw: &str) -> bool {
        if sanitize_phone_input(raw).is_none() {
            tracing::debug!("Rejected phone edit with leading zero");
            return false;
        }
        self.form.phone_number = apply_phone_edit(&self.form.phone_number, raw);
        self.errors.clear(FormField::PhoneNumber);
        true
    }

    /// Select a dialing code from the supported list.
    pub fn set_country_code(&mut self, code: &str) -> bool {
        if find_country_code(code).is_none() {
            tracing::warn!(code, "Ignoring unsupported country code");
            return false;
        }
        self.form.country_code = code.to_string();
        self.errors.clear(FormField::CountryCode);
        true
    }

    /// Replace the whole form, e.g. when loading a saved registration.
    pub fn load_form(&mut self, form: VisitorFormData) {
        self.form = form;
        self.errors.clear_all();
    }

    /// Run validation without submitting and keep the resulting errors.
    pub fn validate(&mut self) -> bool {
        let (valid, errors) = validate_form(&self.form);
        self.errors = errors;
        valid
    }

    /// Back to an empty form with no errors.
    pub fn reset(&mut self) {
        self.form = VisitorFormData::default();
        self.errors.clear_all();
        self.failure = None;
        self.set_state(SubmissionState::Idle);
    }

    /// Submit with no external abort signal; only the timeout can cancel.
    pub async fn submit(&mut self) -> SubmissionResult<SubmissionReport> {
        self.submit_with_cancellation(&CancellationToken::new())
            .await
    }

    /// Submit the current form.
    ///
    /// Cancelling `abort` stops in-flight deliveries and fails the attempt.
    /// The network-dependent timeout cancels a child of `abort`, so firing
    /// it never affects the caller's token.
    pub async fn submit_with_cancellation(
        &mut self,
        abort: &CancellationToken,
    ) -> SubmissionResult<SubmissionReport> {
        self.failure = None;
        self.set_state(SubmissionState::Validating);

        if !self.validate() {
            tracing::info!(
                fields = self.errors.len(),
                "Submission blocked by validation errors"
            );
            self.failure = Some(INVALID_FIELDS_MESSAGE.to_string());
            self.set_state(SubmissionState::Idle);
            return Err(SubmissionError::Validation(self.errors.clone()));
        }

        self.set_state(SubmissionState::Resolving);
        // Stands if the caller drops this future before the attempt concludes
        self.failure = Some(ABORTED_MESSAGE.to_string());
        let _attempt = AttemptGuard(self.state.clone());

        let host = match self.company.lookup_host(&self.form.host) {
            Some(host) => host.clone(),
            None => {
                let host_id = self.form.host.clone();
                tracing::error!(host = %host_id, "Selected host is not in the directory");
                self.errors
                    .insert(ValidationError::UnknownHost(host_id.clone()));
                return Err(self.fail(SubmissionError::HostNotFound(host_id), UNKNOWN_HOST_MESSAGE));
            }
        };

        if abort.is_cancelled() {
            tracing::info!("Submission aborted before dispatch");
            return Err(self.fail(SubmissionError::Cancelled, ABORTED_MESSAGE));
        }

        self.set_state(SubmissionState::Dispatching);
        let outcomes = self.dispatch(&host, abort).await;

        let [visitor, host_outcome]: [DeliveryOutcome; 2] = match outcomes.try_into() {
            Ok(pair) => pair,
            Err(outcomes) => {
                let outcomes: Vec<DeliveryOutcome> = outcomes;
                let error = DeliveryError::Other(format!(
                    "expected 2 delivery outcomes, got {}",
                    outcomes.len()
                ));
                tracing::error!(error = %error, "Batch returned an unexpected shape");
                return Err(self.fail(
                    SubmissionError::VisitorDelivery(error),
                    DELIVERY_FAILED_MESSAGE,
                ));
            }
        };

        report_host_outcome(&host, &host_outcome);

        match visitor {
            DeliveryOutcome::Delivered { message_id, .. } => {
                tracing::info!(
                    host = %host.id,
                    host_notified = host_outcome.is_success(),
                    "Visitor registration submitted"
                );
                let report = SubmissionReport {
                    visitor_message_id: message_id,
                    host_notified: host_outcome.is_success(),
                    host_message_id: host_outcome.message_id().map(str::to_string),
                };
                self.form = VisitorFormData::default();
                self.errors.clear_all();
                self.failure = None;
                self.set_state(SubmissionState::CompletedSuccess);
                Ok(report)
            }
            DeliveryOutcome::Failed { error, attempts } => {
                tracing::error!(
                    attempts,
                    error = %error,
                    "Visitor confirmation could not be delivered"
                );
                Err(self.fail(
                    SubmissionError::VisitorDelivery(error),
                    DELIVERY_FAILED_MESSAGE,
                ))
            }
            DeliveryOutcome::Cancelled { attempts } => {
                let message = if abort.is_cancelled() {
                    tracing::info!(attempts, "Submission aborted");
                    ABORTED_MESSAGE
                } else {
                    tracing::error!(
                        attempts,
                        timeout_ms = self.submit_timeout().as_millis() as u64,
                        "Submission timed out"
                    );
                    TIMED_OUT_MESSAGE
                };
                Err(self.fail(SubmissionError::Cancelled, message))
            }
        }
    }

    async fn dispatch(&self, host: &Host, abort: &CancellationToken) -> Vec<DeliveryOutcome> {
        let token = abort.child_token();
        let timeout = self.submit_timeout();
        let _timer = TimeoutGuard::arm(token.clone(), timeout);

        let messages = [
            visitor_confirmation(&self.form, host, &self.company),
            host_notification(&self.form, host, &self.company, self.clock.now()),
        ];
        tracing::debug!(
            host = %host.id,
            timeout_ms = timeout.as_millis() as u64,
            "Dispatching visitor and host emails"
        );

        self.dispatcher.send_all(&messages, &token).await
    }

    fn fail(&mut self, error: SubmissionError, message: &str) -> SubmissionError {
        self.failure = Some(message.to_string());
        self.set_state(SubmissionState::CompletedFailure);
        error
    }

    fn set_state(&self, state: SubmissionState) {
        let previous = self.state.send_replace(state);
        if previous != state {
            tracing::debug!(from = %previous, to = %state, "Submission state changed");
        }
    }
}

fn report_host_outcome(host: &Host, outcome: &DeliveryOutcome) {
    match outcome {
        DeliveryOutcome::Delivered { .. } => {}
        DeliveryOutcome::Failed { error, attempts } => tracing::warn!(
            host = %host.id,
            attempts,
            error = %error,
            "Host notification failed"
        ),
        DeliveryOutcome::Cancelled { attempts } => tracing::warn!(
            host = %host.id,
            attempts,
            "Host notification cancelled"
        ),
    }
}

/// Cancels a token after a delay unless dropped first.
struct TimeoutGuard(JoinHandle<()>);

impl TimeoutGuard {
    fn arm(token: CancellationToken, after: Duration) -> Self {
        Self(tokio::spawn(async move {
            tokio::time::sleep(after).await;
            token.cancel();
        }))
    }
}

impl Drop for TimeoutGuard {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Concludes an attempt whose future was dropped while submitting.
struct AttemptGuard(Arc<watch::Sender<SubmissionState>>);

impl Drop for AttemptGuard {
    fn drop(&mut self) {
        let abandoned = self.0.send_if_modified(|state| {
            if state.is_submitting() {
                *state = SubmissionState::CompletedFailure;
                true
            } else {
                false
            }
        });
        if abandoned {
            tracing::warn!("Submission dropped before it concluded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::AsyncEmailClient;
    use crate::delivery::{DeliveryClient, RetryPolicy};
    use crate::error::DeliveryResult;
    use crate::models::{EmailMessage, HealthStatus, SendReceipt};
    use async_trait::async_trait;

    struct AcceptAll;

    #[async_trait]
    impl AsyncEmailClient for AcceptAll {
        async fn send_email(&self, message: &EmailMessage) -> DeliveryResult<SendReceipt> {
            Ok(SendReceipt {
                message_id: Some(format!("id-{}", message.to)),
            })
        }

        async fn health(&self) -> DeliveryResult<HealthStatus> {
            Err(DeliveryError::Other("unused".to_string()))
        }
    }

    fn orchestrator() -> SubmissionOrchestrator {
        let delivery = DeliveryClient::new(Arc::new(AcceptAll), RetryPolicy::none());
        SubmissionOrchestrator::new(
            Arc::new(CompanyConfig::default()),
            BatchDispatcher::new(delivery),
        )
    }

    fn fill(orchestrator: &mut SubmissionOrchestrator) {
        orchestrator.update_field(FormField::VisitorName, "John Doe");
        orchestrator.update_field(FormField::VisitorEmail, "john@x.com");
        orchestrator.update_field(FormField::PhoneNumber, "712345678");
        orchestrator.update_field(FormField::PurposeOfVisit, "Meeting");
        orchestrator.update_field(FormField::Host, "raphael-mwangi");
    }

    #[test]
    fn test_starts_idle_with_empty_form() {
        let orchestrator = orchestrator();
        assert_eq!(orchestrator.state(), SubmissionState::Idle);
        assert!(!orchestrator.is_submitting());
        assert_eq!(orchestrator.form(), &VisitorFormData::default());
        assert!(orchestrator.failure_message().is_none());
    }

    #[test]
    fn test_edit_clears_only_that_field_error() {
        let mut orchestrator = orchestrator();
        assert!(!orchestrator.validate());
        assert_eq!(orchestrator.errors().len(), 5);

        orchestrator.update_field(FormField::VisitorName, "J");
        assert!(!orchestrator.errors().contains(FormField::VisitorName));
        assert!(orchestrator.errors().contains(FormField::VisitorEmail));
        assert_eq!(orchestrator.errors().len(), 4);
    }

    #[test]
    fn test_leading_zero_phone_edit_is_dropped() {
        let mut orchestrator = orchestrator();
        assert!(!orchestrator.update_field(FormField::PhoneNumber, "0"));
        assert_eq!(orchestrator.form().phone_number, "");

        assert!(orchestrator.update_field(FormField::PhoneNumber, "71"));
        assert!(!orchestrator.update_field(FormField::PhoneNumber, "0712345678"));
        assert_eq!(orchestrator.form().phone_number, "71");
    }

    #[test]
    fn test_phone_edit_strips_formatting() {
        let mut orchestrator = orchestrator();
        assert!(orchestrator.update_field(FormField::PhoneNumber, "712 345-678"));
        assert_eq!(orchestrator.form().phone_number, "712345678");

        assert!(orchestrator.update_field(FormField::PhoneNumber, ""));
        assert_eq!(orchestrator.form().phone_number, "");
    }

    #[test]
    fn test_unknown_country_code_rejected() {
        let mut orchestrator = orchestrator();
        assert!(!orchestrator.set_country_code("+999"));
        assert_eq!(orchestrator.form().country_code, "+254");

        assert!(orchestrator.update_field(FormField::CountryCode, "+256"));
        assert_eq!(orchestrator.form().country_code, "+256");
    }

    #[test]
    fn test_submit_timeout_follows_network() {
        let mut orchestrator = orchestrator();
        assert_eq!(orchestrator.submit_timeout(), Duration::from_secs(30));

        orchestrator.set_network_info(NetworkInfo {
            online: true,
            effective_type: Some("2g".to_string()),
            downlink_mbps: None,
        });
        assert_eq!(orchestrator.submit_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_reset() {
        let mut orchestrator = orchestrator();
        fill(&mut orchestrator);
        orchestrator.update_field(FormField::VisitorEmail, "bad");
        orchestrator.validate();
        assert!(!orchestrator.errors().is_empty());

        orchestrator.reset();
        assert_eq!(orchestrator.form(), &VisitorFormData::default());
        assert!(orchestrator.errors().is_empty());
        assert_eq!(orchestrator.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_submit_success_resets_form() {
        let mut orchestrator = orchestrator();
        fill(&mut orchestrator);

        let report = orchestrator.submit().await.unwrap();
        assert_eq!(
            report.visitor_message_id.as_deref(),
            Some("id-john@x.com")
        );
        assert!(report.host_notified);
        assert_eq!(
            report.host_message_id.as_deref(),
            Some("id-raphael.mwangi@smoothtel.com")
        );
        assert_eq!(orchestrator.state(), SubmissionState::CompletedSuccess);
        assert!(!orchestrator.is_submitting());
        assert_eq!(orchestrator.form(), &VisitorFormData::default());
    }

    #[tokio::test]
    async fn test_validation_failure_returns_to_idle() {
        let mut orchestrator = orchestrator();
        orchestrator.update_field(FormField::VisitorName, "John Doe");

        let err = orchestrator.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::Validation(ref e) if e.len() == 4));
        assert_eq!(orchestrator.state(), SubmissionState::Idle);
        assert_eq!(orchestrator.failure_message(), Some(INVALID_FIELDS_MESSAGE));
        assert_eq!(orchestrator.form().visitor_name, "John Doe");
    }

    #[tokio::test]
    async fn test_unknown_host_fails() {
        let mut orchestrator = orchestrator();
        fill(&mut orchestrator);
        orchestrator.update_field(FormField::Host, "nobody");

        let err = orchestrator.submit().await.unwrap_err();
        assert!(matches!(err, SubmissionError::HostNotFound(ref id) if id == "nobody"));
        assert_eq!(orchestrator.state(), SubmissionState::CompletedFailure);
        assert_eq!(
            orchestrator.errors().message(FormField::Host).as_deref(),
            Some("Please select a valid host")
        );
        assert_eq!(orchestrator.failure_message(), Some(UNKNOWN_HOST_MESSAGE));
    }

    #[tokio::test]
    async fn test_pre_cancelled_abort() {
        let mut orchestrator = orchestrator();
        fill(&mut orchestrator);

        let abort = CancellationToken::new();
        abort.cancel();
        let err = orchestrator
            .submit_with_cancellation(&abort)
            .await
            .unwrap_err();
        assert!(matches!(err, SubmissionError::Cancelled));
        assert_eq!(orchestrator.failure_message(), Some(ABORTED_MESSAGE));
        assert_eq!(orchestrator.form().visitor_name, "John Doe");
    }
}
