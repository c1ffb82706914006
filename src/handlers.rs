//! Dashboard UI events expressed as request descriptors plus the step that
//! interprets the response. Nothing here touches the network until
//! [`Action::run`] is awaited, and the caller decides what a failure means to
//! the user.

use crate::api::{self, COMMAND, UPDATE};
use crate::client::JsonClient;
use crate::envelope::{UpdateEnvelope, UpdateOutcome};
use crate::errors::ClientError;
use crate::export::EventExport;
use crate::models::{CommandFields, RequestDescriptor, decode_record};
use chrono::{DateTime, Utc};
use serde_json::{Value, json};
use std::fmt;

type Completion<T> = Box<dyn FnOnce(Value) -> Result<T, ClientError> + Send>;

pub struct Action<T> {
    pub descriptor: RequestDescriptor,
    complete: Completion<T>,
}

impl<T> Action<T> {
    pub fn new(
        descriptor: RequestDescriptor,
        complete: impl FnOnce(Value) -> Result<T, ClientError> + Send + 'static,
    ) -> Self {
        Self {
            descriptor,
            complete: Box::new(complete),
        }
    }

    /// Interprets a response that was obtained some other way.
    pub fn complete(self, response: Value) -> Result<T, ClientError> {
        (self.complete)(response)
    }

    pub async fn run(self, client: &JsonClient) -> Result<T, ClientError> {
        let Self {
            descriptor,
            complete,
        } = self;
        let response = client.send_request(&descriptor).await?;
        complete(response)
    }
}

impl<T> fmt::Debug for Action<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

pub fn form_submitted<I, K, V>(fields: I) -> Result<Action<UpdateOutcome>, ClientError>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    update_action(&UpdateEnvelope::from_fields(fields))
}

/// Switch ids look like `switch-<name>`.
pub fn switch_toggled(
    table: &str,
    attribute: &str,
    switch_id: &str,
    checked: bool,
) -> Result<Action<UpdateOutcome>, ClientError> {
    let name = switch_id
        .split('-')
        .nth(1)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| ClientError::MalformedElementId(switch_id.to_string()))?;
    update_action(&UpdateEnvelope::toggle(table, attribute, name, checked))
}

pub fn edit_button_clicked(button_id: &str) -> Result<Action<CommandFields>, ClientError> {
    let name = ModalKind::Edit.target(button_id)?;
    let descriptor = RequestDescriptor::post(COMMAND, json!({ "command": name }));
    Ok(Action::new(descriptor, decode_record))
}

pub fn export_clicked(id: &str, rpg_name: &str, now: DateTime<Utc>) -> Action<EventExport> {
    let rpg_name = rpg_name.to_string();
    Action::new(RequestDescriptor::get(api::rpg_events_path(id)), move |value| {
        EventExport::build(value, &rpg_name, now)
    })
}

fn update_action(envelope: &UpdateEnvelope) -> Result<Action<UpdateOutcome>, ClientError> {
    let descriptor = RequestDescriptor::post_json(UPDATE, envelope)?;
    Ok(Action::new(descriptor, |value| {
        Ok(UpdateOutcome::from_response(value))
    }))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Create,
    Edit,
    Delete,
}

impl ModalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ModalKind::Create => "create",
            ModalKind::Edit => "edit",
            ModalKind::Delete => "delete",
        }
    }

    pub fn modal_selector(self) -> String {
        format!("#popup-{}-form", self.as_str())
    }

    pub fn button_prefix(self) -> String {
        format!("open-{}-form-btn-", self.as_str())
    }

    pub fn opened_by(self, button_id: &str) -> bool {
        button_id.starts_with(&self.button_prefix())
    }

    /// Record name carried by a button id. Ids without this modal's prefix
    /// fall back to their last `-` segment.
    pub fn target(self, button_id: &str) -> Result<&str, ClientError> {
        let prefix = self.button_prefix();
        let name = match button_id.strip_prefix(prefix.as_str()) {
            Some(name) => name,
            None => button_id.rsplit_once('-').map(|(_, last)| last).unwrap_or(""),
        };
        if name.is_empty() {
            return Err(ClientError::MalformedElementId(button_id.to_string()));
        }
        Ok(name)
    }
}

/// Name written into the delete form before its modal opens.
pub fn delete_target(button_id: &str) -> Result<&str, ClientError> {
    ModalKind::Delete.target(button_id)
}
