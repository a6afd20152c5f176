//! Contact form with a simulated submission, plus the toast notifications
//! that report how it went.

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ContactConfig;
use crate::tween::{Easing, Tween};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Email, Field::Subject, Field::Message];

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Name => "Your Name",
            Field::Email => "Your Email",
            Field::Subject => "Subject",
            Field::Message => "Your Message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Subject => &mut self.subject,
            Field::Message => &mut self.message,
        }
    }

    /// First required field left blank.
    pub fn missing(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| self.field(*field).trim().is_empty())
    }
}

// ============================================================================
// DELIVERY
// ============================================================================

#[derive(Debug, Error)]
pub enum SendError {
    #[error("message could not be delivered: {0}")]
    Rejected(String),
}

pub trait Outbox {
    fn deliver(&mut self, message: &ContactMessage) -> Result<(), SendError>;
}

/// Accepts everything. There is no backend behind the form.
#[derive(Debug, Default)]
pub struct SimulatedOutbox;

impl Outbox for SimulatedOutbox {
    fn deliver(&mut self, _message: &ContactMessage) -> Result<(), SendError> {
        Ok(())
    }
}

// ============================================================================
// FORM
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Field(Field),
    Send,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitStatus {
    Success,
    Failure,
}

impl SubmitStatus {
    pub fn message(self) -> &'static str {
        match self {
            SubmitStatus::Success => "Message sent successfully!",
            SubmitStatus::Failure => "Failed to send message. Please try again.",
        }
    }
}

/// Something the rest of the page should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Missing(Field),
    Finished(SubmitStatus),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    Sending { since: Duration },
    Done { status: SubmitStatus, since: Duration },
}

const SPINNER: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];

pub struct ContactForm {
    message: ContactMessage,
    focus: Focus,
    editing: bool,
    phase: Phase,
    outbox: Box<dyn Outbox>,
    submit_delay: Duration,
    status_for: Duration,
}

impl ContactForm {
    pub fn new(config: &ContactConfig, outbox: impl Outbox + 'static) -> Self {
        Self {
            message: ContactMessage::default(),
            focus: Focus::Field(Field::Name),
            editing: false,
            phase: Phase::Idle,
            outbox: Box::new(outbox),
            submit_delay: Duration::from_millis(config.submit_delay_ms),
            status_for: Duration::from_millis(config.status_ms),
        }
    }

    pub fn message(&self) -> &ContactMessage {
        &self.message
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn is_sending(&self) -> bool {
        matches!(self.phase, Phase::Sending { .. })
    }

    pub fn status(&self) -> Option<SubmitStatus> {
        match self.phase {
            Phase::Done { status, .. } => Some(status),
            _ => None,
        }
    }

    pub fn start_editing(&mut self) {
        self.editing = true;
    }

    pub fn stop_editing(&mut self) {
        self.editing = false;
    }

    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Field(Field::Name) => Focus::Field(Field::Email),
            Focus::Field(Field::Email) => Focus::Field(Field::Subject),
            Focus::Field(Field::Subject) => Focus::Field(Field::Message),
            Focus::Field(Field::Message) => Focus::Send,
            Focus::Send => Focus::Field(Field::Name),
        };
    }

    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Field(Field::Name) => Focus::Send,
            Focus::Field(Field::Email) => Focus::Field(Field::Name),
            Focus::Field(Field::Subject) => Focus::Field(Field::Email),
            Focus::Field(Field::Message) => Focus::Field(Field::Subject),
            Focus::Send => Focus::Field(Field::Message),
        };
    }

    pub fn input(&mut self, ch: char) {
        if self.is_sending() {
            return;
        }
        if let Focus::Field(field) = self.focus {
            self.message.field_mut(field).push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.is_sending() {
            return;
        }
        if let Focus::Field(field) = self.focus {
            self.message.field_mut(field).pop();
        }
    }

    /// Enter moves through the fields and submits from the button.
    pub fn enter(&mut self, now: Duration) -> Option<FormEvent> {
        match self.focus {
            Focus::Field(_) => {
                self.focus_next();
                None
            }
            Focus::Send => self.submit(now),
        }
    }

    /// Start sending. Blank required fields block the submission and take
    /// the focus; a form that is already sending ignores the request.
    pub fn submit(&mut self, now: Duration) -> Option<FormEvent> {
        if self.is_sending() {
            return None;
        }
        if let Some(field) = self.message.missing() {
            self.focus = Focus::Field(field);
            return Some(FormEvent::Missing(field));
        }
        info!("contact form submitted");
        self.phase = Phase::Sending { since: now };
        None
    }

    /// Timer hook. Finishes the pending submission once its delay is over
    /// and clears the status banner after it has been shown long enough.
    pub fn poll(&mut self, now: Duration) -> Option<FormEvent> {
        match self.phase {
            Phase::Sending { since } if now.saturating_sub(since) >= self.submit_delay => {
                let status = match self.outbox.deliver(&self.message) {
                    Ok(()) => {
                        info!("contact message delivered");
                        self.message = ContactMessage::default();
                        self.focus = Focus::Field(Field::Name);
                        SubmitStatus::Success
                    }
                    Err(e) => {
                        warn!(error = %e, "contact message failed");
                        SubmitStatus::Failure
                    }
                };
                self.phase = Phase::Done { status, since: now };
                Some(FormEvent::Finished(status))
            }
            Phase::Done { since, .. } if now.saturating_sub(since) >= self.status_for => {
                self.phase = Phase::Idle;
                None
            }
            _ => None,
        }
    }

    pub fn button_label(&self, now: Duration) -> String {
        match self.phase {
            Phase::Sending { since } => {
                let frame = (now.saturating_sub(since).as_millis() / 80) as usize % SPINNER.len();
                format!("{} Sending...", SPINNER[frame])
            }
            _ => "➤ Send Message".to_string(),
        }
    }
}

// ============================================================================
// TOASTS
// ============================================================================

const TOAST_ENTER_DELAY: Duration = Duration::from_millis(100);
const TOAST_SLIDE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    created: Duration,
}

/// Notifications that slide in from the right edge and leave on their own.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: Vec<Toast>,
    hold: Duration,
}

impl Toasts {
    pub fn new(hold: Duration) -> Self {
        Self {
            items: Vec::new(),
            hold,
        }
    }

    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind, now: Duration) {
        self.items.push(Toast {
            message: message.into(),
            kind,
            created: now,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop toasts that have finished sliding out.
    pub fn prune(&mut self, now: Duration) {
        let lifetime = self.hold + TOAST_SLIDE;
        self.items
            .retain(|toast| now.saturating_sub(toast.created) < lifetime);
    }

    /// How far a toast is pushed off screen: 1 fully hidden, 0 fully shown.
    pub fn offset(&self, toast: &Toast, now: Duration) -> f64 {
        let age = now.saturating_sub(toast.created);
        let slide = Tween::new(TOAST_SLIDE, Easing::InOutCubic);
        let shown = slide.with_delay(TOAST_ENTER_DELAY).progress(age);
        let leaving = slide.with_delay(self.hold).progress(age);
        (1.0 - shown + leaving).clamp(0.0, 1.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FailingOutbox;

    impl Outbox for FailingOutbox {
        fn deliver(&mut self, _message: &ContactMessage) -> Result<(), SendError> {
            Err(SendError::Rejected("backend unavailable".to_string()))
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn filled(outbox: impl Outbox + 'static) -> ContactForm {
        let mut form = ContactForm::new(&ContactConfig::default(), outbox);
        for (field, text) in Field::ALL.into_iter().zip(["Ada", "ada@example.com", "Hi", "Hello!"]) {
            form.focus = Focus::Field(field);
            text.chars().for_each(|ch| form.input(ch));
        }
        form
    }

    #[test]
    fn blank_fields_block_submission() {
        let mut form = ContactForm::new(&ContactConfig::default(), SimulatedOutbox);
        "Ada".chars().for_each(|ch| form.input(ch));

        assert_eq!(form.submit(ms(0)), Some(FormEvent::Missing(Field::Email)));
        assert_eq!(form.focus(), Focus::Field(Field::Email));
        assert!(!form.is_sending());
    }

    #[test]
    fn simulated_submission_succeeds_after_the_delay() {
        let mut form = filled(SimulatedOutbox);
        assert_eq!(form.submit(ms(1000)), None);
        assert!(form.is_sending());
        assert!(form.button_label(ms(1100)).ends_with("Sending..."));

        assert_eq!(form.poll(ms(2999)), None);
        assert_eq!(
            form.poll(ms(3000)),
            Some(FormEvent::Finished(SubmitStatus::Success))
        );
        assert_eq!(form.message(), &ContactMessage::default());
        assert_eq!(form.status(), Some(SubmitStatus::Success));

        form.poll(ms(6000));
        assert_eq!(form.status(), None);
    }

    #[test]
    fn failed_delivery_keeps_the_message() {
        let mut form = filled(FailingOutbox);
        form.submit(ms(0));
        assert_eq!(
            form.poll(ms(2000)),
            Some(FormEvent::Finished(SubmitStatus::Failure))
        );
        assert_eq!(form.message().name, "Ada");
        assert_eq!(
            form.status().map(SubmitStatus::message),
            Some("Failed to send message. Please try again.")
        );
    }

    #[test]
    fn sending_form_ignores_input_and_resubmits() {
        let mut form = filled(SimulatedOutbox);
        form.submit(ms(0));
        form.input('x');
        form.backspace();
        assert_eq!(form.message().message, "Hello!");
        assert_eq!(form.submit(ms(10)), None);
        assert_eq!(
            form.poll(ms(2000)),
            Some(FormEvent::Finished(SubmitStatus::Success))
        );
    }

    #[test]
    fn enter_walks_the_fields_then_submits() {
        let mut form = filled(SimulatedOutbox);
        form.focus = Focus::Field(Field::Name);
        for _ in 0..4 {
            assert_eq!(form.enter(ms(0)), None);
        }
        assert_eq!(form.focus(), Focus::Send);
        form.enter(ms(0));
        assert!(form.is_sending());
    }

    #[test]
    fn focus_cycles_both_ways() {
        let mut form = ContactForm::new(&ContactConfig::default(), SimulatedOutbox);
        form.focus_prev();
        assert_eq!(form.focus(), Focus::Send);
        form.focus_next();
        assert_eq!(form.focus(), Focus::Field(Field::Name));
    }

    #[test]
    fn toasts_slide_in_hold_and_leave() {
        let mut toasts = Toasts::new(ms(3000));
        toasts.push("saved", ToastKind::Success, ms(0));
        let toast = toasts.iter().next().unwrap().clone();

        assert_eq!(toasts.offset(&toast, ms(50)), 1.0);
        assert_eq!(toasts.offset(&toast, ms(400)), 0.0);
        assert_eq!(toasts.offset(&toast, ms(2000)), 0.0);
        assert!(toasts.offset(&toast, ms(3150)) > 0.0);

        toasts.prune(ms(3299));
        assert_eq!(toasts.len(), 1);
        toasts.prune(ms(3300));
        assert!(toasts.is_empty());
    }
}
