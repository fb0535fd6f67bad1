use std::collections::HashMap;

use crate::PromptTemplate;
use faithcheck_core::{FaithcheckError, Message, Value};

#[derive(Debug, Clone)]
pub enum MessagePromptTemplate {
    System(PromptTemplate),
    Human(PromptTemplate),
}

impl MessagePromptTemplate {
    pub fn system(template: &str) -> Self {
        Self::System(PromptTemplate::new(template))
    }

    pub fn human(template: &str) -> Self {
        Self::Human(PromptTemplate::new(template))
    }

    pub fn format(&self, vars: &HashMap<String, Value>) -> Result<Message, FaithcheckError> {
        match self {
            MessagePromptTemplate::System(t) => Ok(Message::system(t.render(vars)?)),
            MessagePromptTemplate::Human(t) => Ok(Message::user(t.render(vars)?)),
        }
    }
}

/// An ordered list of message templates rendered into one conversation turn.
#[derive(Debug, Clone)]
pub struct ChatPromptTemplate {
    messages: Vec<MessagePromptTemplate>,
}

impl ChatPromptTemplate {
    pub fn new(messages: Vec<MessagePromptTemplate>) -> Self {
        Self { messages }
    }

    /// The common shape: one fixed system instruction followed by a user turn.
    pub fn system_and_human(system: &str, human: &str) -> Self {
        Self::new(vec![
            MessagePromptTemplate::system(system),
            MessagePromptTemplate::human(human),
        ])
    }

    pub fn format_messages(
        &self,
        vars: &HashMap<String, Value>,
    ) -> Result<Vec<Message>, FaithcheckError> {
        self.messages.iter().map(|tmpl| tmpl.format(vars)).collect()
    }
}
