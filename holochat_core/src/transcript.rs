//! The append-only conversation record.

use crate::Message;

/// Ordered, append-only record of exchanged messages.
///
/// A transcript starts life with exactly one seed message (the greeting)
/// and only ever grows from there. Insertion order is the display order;
/// nothing reorders, rewrites, or truncates entries during a session.
#[derive(Debug, Clone)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    /// Create a transcript holding only the seed message.
    #[must_use]
    pub fn seeded(greeting: Message) -> Self {
        Self {
            messages: vec![greeting],
        }
    }

    /// Append a message at the end. Content is not validated here; the
    /// controller decides what is worth submitting.
    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Read-only snapshot in insertion order.
    #[must_use]
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// The most recent entry. Never `None` for a seeded transcript.
    #[must_use]
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    #[test]
    fn seeded_transcript_has_exactly_one_message() {
        let transcript = Transcript::seeded(Message::assistant("Greetings."));

        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.all()[0].role, Role::Assistant);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut transcript = Transcript::seeded(Message::assistant("Greetings."));
        transcript.append(Message::user("Hello"));
        transcript.append(Message::assistant("Welcome, traveler."));

        let all = transcript.all();
        assert_eq!(all.len(), 3);
        assert_eq!(all[1].content, "Hello");
        assert_eq!(all[2].content, "Welcome, traveler.");
        assert_eq!(transcript.last().map(|m| m.role), Some(Role::Assistant));
    }

    #[test]
    fn empty_content_is_accepted_by_the_store_itself() {
        let mut transcript = Transcript::seeded(Message::assistant("Greetings."));
        transcript.append(Message::user(""));

        assert_eq!(transcript.len(), 2);
        assert_eq!(transcript.all()[1].content, "");
    }
}
