//! Page console: the sink for human-readable diagnostics

use std::collections::VecDeque;

/// Log level for console messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// A console message
#[derive(Debug, Clone)]
pub struct ConsoleMessage {
    pub level: LogLevel,
    pub message: String,
}

impl ConsoleMessage {
    /// Create a new console message
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Bounded message buffer; the oldest messages are dropped first
pub struct Console {
    messages: VecDeque<ConsoleMessage>,
    max_messages: usize,
}

impl Console {
    /// Create a new console
    pub fn new() -> Self {
        Self {
            messages: VecDeque::new(),
            max_messages: 1000,
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.add_message(ConsoleMessage::new(LogLevel::Info, message));
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.add_message(ConsoleMessage::new(LogLevel::Warn, message));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.add_message(ConsoleMessage::new(LogLevel::Error, message));
    }

    fn add_message(&mut self, message: ConsoleMessage) {
        if self.messages.len() >= self.max_messages {
            self.messages.pop_front();
        }
        self.messages.push_back(message);
    }

    /// Get all messages
    pub fn messages(&self) -> impl Iterator<Item = &ConsoleMessage> {
        self.messages.iter()
    }

    /// Messages at one level, oldest first
    pub fn messages_at(&self, level: LogLevel) -> impl Iterator<Item = &ConsoleMessage> {
        self.messages.iter().filter(move |m| m.level == level)
    }

    /// Get message count
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Set max messages
    pub fn set_max_messages(&mut self, max: usize) {
        self.max_messages = max;
        while self.messages.len() > max {
            self.messages.pop_front();
        }
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
