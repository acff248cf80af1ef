//! The logical unit a [`crate::Batch`] is made of.

use crate::error::{BatchError, BatchResult};
use crate::value::MySqlValue;

bitflags::bitflags! {
    /// Mirrors the subset of ADO.NET-style `CommandBehavior` this core
    /// understands. Only `CLOSE_CONNECTION` is actually load-bearing here
    /// (§4.7 guard 6); the rest exist so the type is a believable carrier
    /// for the flags a caller one layer up would set.
    pub struct CommandBehavior: u32 {
        const DEFAULT = 0;
        const SINGLE_RESULT = 0b0001;
        const SCHEMA_ONLY = 0b0010;
        const CLOSE_CONNECTION = 0b0100;
        const SEQUENTIAL_ACCESS = 0b1000;
    }
}

/// This core only ever deals in text commands; kept as an enum (rather than
/// collapsing to a bool) so the Prepared-Statement Coordinator has a named
/// thing to reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Text,
}

#[derive(Debug, Clone)]
pub struct CommandParameter {
    pub name: String,
    pub value: MySqlValue,
}

/// A single logical SQL command plus its parameters, as submitted inside a
/// [`crate::Batch`].
#[derive(Debug, Clone)]
pub struct BatchCommand {
    pub text: String,
    pub kind: CommandKind,
    pub parameters: Vec<CommandParameter>,
    pub behavior: CommandBehavior,
    pub(crate) statement_id: Option<u32>,
}

impl BatchCommand {
    pub fn new(text: impl Into<String>) -> Self {
        BatchCommand {
            text: text.into(),
            kind: CommandKind::Text,
            parameters: Vec::new(),
            behavior: CommandBehavior::DEFAULT,
            statement_id: None,
        }
    }

    pub fn with_parameter(mut self, name: impl Into<String>, value: MySqlValue) -> Self {
        self.parameters.push(CommandParameter {
            name: name.into(),
            value,
        });
        self
    }

    pub fn with_behavior(mut self, behavior: CommandBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn is_prepared(&self) -> bool {
        self.statement_id.is_some()
    }

    /// §4.7 guard 6: non-empty/non-whitespace text, and no `CloseConnection`.
    pub(crate) fn validate(&self) -> BatchResult<()> {
        if self.text.trim().is_empty() {
            return Err(BatchError::invalid_operation(
                "command text must not be empty or whitespace",
            ));
        }
        if self.behavior.contains(CommandBehavior::CLOSE_CONNECTION) {
            return Err(BatchError::unsupported(
                "CloseConnection command behavior is not supported inside a batch",
            ));
        }
        Ok(())
    }

    /// Renders `self.text` with each `?` placeholder replaced, in order, by
    /// the SQL literal for the corresponding parameter. Used by the
    /// Concatenated creator, which can't bind parameters server-side because
    /// COM_QUERY text mode has no protocol support for them.
    pub(crate) fn render_text(&self) -> BatchResult<String> {
        if self.parameters.is_empty() {
            return Ok(self.text.clone());
        }

        let mut rendered = String::with_capacity(self.text.len());
        let mut params = self.parameters.iter();
        for ch in self.text.chars() {
            if ch == '?' {
                let param = params.next().ok_or_else(|| {
                    BatchError::invalid_operation(
                        "more `?` placeholders than supplied parameters",
                    )
                })?;
                rendered.push_str(&param.value.render_literal());
            } else {
                rendered.push(ch);
            }
        }
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_text() {
        let command = BatchCommand::new("   ");
        assert!(matches!(
            command.validate(),
            Err(BatchError::InvalidOperation(_))
        ));
    }

    #[test]
    fn rejects_close_connection_behavior() {
        let command =
            BatchCommand::new("SELECT 1").with_behavior(CommandBehavior::CLOSE_CONNECTION);
        assert!(matches!(command.validate(), Err(BatchError::Unsupported(_))));
    }

    #[test]
    fn render_text_substitutes_placeholders_in_order() {
        let command = BatchCommand::new("SELECT ?, ?")
            .with_parameter("a", MySqlValue::Int(1))
            .with_parameter("b", MySqlValue::Bytes(b"x".to_vec()));
        assert_eq!(command.render_text().unwrap(), "SELECT 1, 'x'");
    }
}
