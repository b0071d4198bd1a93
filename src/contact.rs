//! Contact form validation
//!
//! Submission is simulated: nothing is sent over the network. A valid form
//! shows an acknowledgement and resets, an invalid one shows an inline error.

use std::cell::Cell;
use std::fmt;

use thiserror::Error;

pub const FORM_ID: &str = "contact-form";
pub const MESSAGE_ID: &str = "cf-msg";

pub const ERROR_TEXT: &str = "Please fill all fields.";
pub const SUCCESS_TEXT: &str = "✅ Message sent! Siddhartha will get back to you soon.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [
        ContactField::Name,
        ContactField::Email,
        ContactField::Message,
    ];

    /// Id of the input element
    pub fn element_id(&self) -> &'static str {
        match self {
            ContactField::Name => "cf-name",
            ContactField::Email => "cf-email",
            ContactField::Message => "cf-message",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Message => "message",
        }
    }
}

impl fmt::Display for ContactField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContactError {
    #[error("missing fields: {}", join_fields(.0))]
    MissingFields(Vec<ContactField>),
}

fn join_fields(fields: &[ContactField]) -> String {
    fields
        .iter()
        .map(ContactField::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Raw field values as read from the form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// A validated, trimmed submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }

    /// All three fields must be non-empty after trimming
    pub fn validate(&self) -> Result<ContactSubmission, ContactError> {
        let missing: Vec<_> = ContactField::ALL
            .into_iter()
            .filter(|&f| self.get(f).trim().is_empty())
            .collect();
        if !missing.is_empty() {
            return Err(ContactError::MissingFields(missing));
        }
        Ok(ContactSubmission {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// State of the inline status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormMessage {
    pub class: &'static str,
    pub text: &'static str,
}

impl FormMessage {
    pub const ERROR: FormMessage = FormMessage {
        class: "form-msg error",
        text: ERROR_TEXT,
    };
    pub const SUCCESS: FormMessage = FormMessage {
        class: "form-msg success",
        text: SUCCESS_TEXT,
    };
    pub const CLEARED: FormMessage = FormMessage {
        class: "form-msg",
        text: "",
    };

    /// Message shown right after a submit attempt
    pub fn for_result(result: &Result<ContactSubmission, ContactError>) -> Self {
        match result {
            Ok(_) => Self::SUCCESS,
            Err(_) => Self::ERROR,
        }
    }
}

/// Timeout id of the scheduled status-message clear
///
/// A new submit cancels the previous clear so it can't wipe the newer message.
#[derive(Debug, Default)]
pub struct PendingClear(Cell<Option<i32>>);

impl PendingClear {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove the scheduled clear, returning its id for cancellation
    pub fn take(&self) -> Option<i32> {
        self.0.take()
    }

    /// Record a newly scheduled clear. Returns the one it replaces, if any.
    pub fn schedule(&self, id: i32) -> Option<i32> {
        self.0.replace(Some(id))
    }

    /// Called when timeout `id` fires; only forgets it if it is still current
    pub fn finish(&self, id: i32) {
        if self.0.get() == Some(id) {
            self.0.set(None);
        }
    }

    pub fn is_pending(&self) -> bool {
        self.0.get().is_some()
    }
}

/// Wire the contact form's submit handler (WASM only)
#[cfg(target_arch = "wasm32")]
pub fn install(page: &crate::page::Page) -> crate::page::PageResult<()> {
    use web_sys::HtmlFormElement;

    use crate::page::listen;

    let Some(form) = page.by_id::<HtmlFormElement>(FORM_ID) else {
        return Ok(());
    };
    let submit_page = page.clone();
    let submit_form = form.clone();
    let pending = std::rc::Rc::new(PendingClear::new());
    listen(&form, "submit", move |event| {
        event.prevent_default();
        submit(&submit_page, &submit_form, &pending);
    })
}

/// Current value of an input or textarea. A missing element reads as empty.
#[cfg(target_arch = "wasm32")]
fn read_field(page: &crate::page::Page, field: ContactField) -> String {
    use wasm_bindgen::JsCast;
    use web_sys::{HtmlInputElement, HtmlTextAreaElement};

    let Some(el) = page.element(field.element_id()) else {
        return String::new();
    };
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.value()
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        area.value()
    } else {
        String::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn show(status: &web_sys::Element, message: FormMessage) {
    status.set_class_name(message.class);
    status.set_text_content(Some(message.text));
}

#[cfg(target_arch = "wasm32")]
fn submit(
    page: &crate::page::Page,
    form: &web_sys::HtmlFormElement,
    pending: &std::rc::Rc<PendingClear>,
) {
    use crate::consts::FORM_MESSAGE_CLEAR_MS;

    if let Some(id) = pending.take() {
        page.clear_timeout(id);
    }

    let mut fields = ContactFields::default();
    for field in ContactField::ALL {
        fields.set(field, read_field(page, field));
    }
    let result = fields.validate();
    let status = page.element(MESSAGE_ID);
    if let Some(status) = &status {
        show(status, FormMessage::for_result(&result));
    }

    match result {
        Err(err) => log::info!("Contact form rejected: {}", err),
        Ok(submission) => {
            // Simulated send; nothing leaves the page
            log::info!("Contact message from {} accepted", submission.email);
            form.reset();
            if let Some(status) = status {
                // The timer's own id is only known after scheduling
                let own_id = std::rc::Rc::new(Cell::new(None::<i32>));
                let fired = (pending.clone(), own_id.clone());
                let cleared = page.set_timeout(FORM_MESSAGE_CLEAR_MS, move || {
                    let (pending, own_id) = fired;
                    if let Some(id) = own_id.get() {
                        pending.finish(id);
                    }
                    show(&status, FormMessage::CLEARED);
                });
                match cleared {
                    Ok(id) => {
                        own_id.set(Some(id));
                        pending.schedule(id);
                    }
                    Err(err) => log::warn!("Form message will not clear: {}", err),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_empty_message_is_error() {
        let form = fields("Ada", "ada@example.com", "");
        let result = form.validate();
        assert_eq!(
            result,
            Err(ContactError::MissingFields(vec![ContactField::Message]))
        );
        assert_eq!(FormMessage::for_result(&result), FormMessage::ERROR);
        assert_eq!(FormMessage::ERROR.text, "Please fill all fields.");
        // Validation never touches the fields
        assert_eq!(form, fields("Ada", "ada@example.com", ""));
    }

    #[test]
    fn test_whitespace_only_counts_as_empty() {
        let result = fields("  ", "a@b.c", "\n\t").validate();
        assert_eq!(
            result,
            Err(ContactError::MissingFields(vec![
                ContactField::Name,
                ContactField::Message
            ]))
        );
    }

    #[test]
    fn test_valid_submission_is_trimmed() {
        let result = fields(" Ada ", "ada@example.com\n", "  Hello there ").validate();
        let submission = result.as_ref().unwrap();
        assert_eq!(submission.name, "Ada");
        assert_eq!(submission.email, "ada@example.com");
        assert_eq!(submission.message, "Hello there");
        assert_eq!(FormMessage::for_result(&result), FormMessage::SUCCESS);
    }

    #[test]
    fn test_field_set_get() {
        let mut form = ContactFields::default();
        for field in ContactField::ALL {
            form.set(field, field.as_str().to_uppercase());
        }
        assert_eq!(form.get(ContactField::Email), "EMAIL");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_error_display() {
        let err = ContactError::MissingFields(vec![ContactField::Name, ContactField::Email]);
        assert_eq!(err.to_string(), "missing fields: name, email");
    }

    #[test]
    fn test_cleared_message() {
        assert_eq!(FormMessage::CLEARED.class, "form-msg");
        assert!(FormMessage::CLEARED.text.is_empty());
    }

    #[test]
    fn test_clear_delay() {
        assert_eq!(crate::consts::FORM_MESSAGE_CLEAR_MS, 5000);
    }

    #[test]
    fn test_new_submit_cancels_pending_clear() {
        let pending = PendingClear::new();
        assert_eq!(pending.schedule(7), None);
        // Second submit inside the window: old clear is handed back for cancelling
        assert_eq!(pending.take(), Some(7));
        assert!(!pending.is_pending());
        assert_eq!(pending.schedule(9), None);
        assert_eq!(pending.schedule(11), Some(9));
    }

    #[test]
    fn test_stale_timer_does_not_forget_newer_clear() {
        let pending = PendingClear::new();
        pending.schedule(3);
        pending.take();
        pending.schedule(4);
        pending.finish(3);
        assert!(pending.is_pending());
        pending.finish(4);
        assert!(!pending.is_pending());
    }
}
