//! Logger capability handed to function handlers.

use std::fmt::Display;
use std::sync::Arc;

/// Named log sink with optional key/value extras.
///
/// Messages are rendered as tab-separated `key=value` pairs, extras first in
/// insertion order and the message last under `msg`, then emitted as tracing
/// events.
#[derive(Debug, Clone)]
pub struct Logger {
    name: Arc<str>,
    extras: Vec<(String, String)>,
}

impl Logger {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            extras: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extras(&self) -> &[(String, String)] {
        &self.extras
    }

    /// Return a copy with `key` set to `value`, or removed when `value` is `None`.
    pub fn extra<V: Into<String>>(&self, key: impl Into<String>, value: Option<V>) -> Logger {
        let key = key.into();
        let mut extras = self.extras.clone();
        match value {
            Some(value) => {
                let value = value.into();
                match extras.iter_mut().find(|(k, _)| *k == key) {
                    Some(entry) => entry.1 = value,
                    None => extras.push((key, value)),
                }
            }
            None => extras.retain(|(k, _)| *k != key),
        }
        Logger {
            name: Arc::clone(&self.name),
            extras,
        }
    }

    pub fn debug(&self, msg: impl Display) {
        tracing::debug!(logger = %self.name, "{}", self.render(msg));
    }

    pub fn info(&self, msg: impl Display) {
        tracing::info!(logger = %self.name, "{}", self.render(msg));
    }

    pub fn warn(&self, msg: impl Display) {
        tracing::warn!(logger = %self.name, "{}", self.render(msg));
    }

    pub fn error(&self, msg: impl Display) {
        tracing::error!(logger = %self.name, "{}", self.render(msg));
    }

    fn render(&self, msg: impl Display) -> String {
        let mut line = String::new();
        for (key, value) in &self.extras {
            line.push_str(key);
            line.push('=');
            line.push_str(value);
            line.push('\t');
        }
        line.push_str("msg=");
        line.push_str(&msg.to_string());
        line
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extras(logger: &Logger) -> Vec<(&str, &str)> {
        logger
            .extras()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn extra_adds_overwrites_and_removes() {
        let log = Logger::new("test");
        assert!(log.extras().is_empty());

        let log = log
            .extra("a", Some("b"))
            .extra("c", None::<String>)
            .extra("d", Some("e"));
        assert_eq!(extras(&log), vec![("a", "b"), ("d", "e")]);

        let log = log.extra("a", None::<String>).extra("d", Some("f"));
        assert_eq!(extras(&log), vec![("d", "f")]);
    }

    #[test]
    fn extra_leaves_original_untouched() {
        let base = Logger::new("base");
        let child = base.extra("k", Some("v"));
        assert!(base.extras().is_empty());
        assert_eq!(child.name(), "base");
    }

    #[test]
    fn render_puts_message_last() {
        let log = Logger::new("test").extra("a", Some("b"));
        assert_eq!(log.render("hello"), "a=b\tmsg=hello");
        assert_eq!(Logger::new("test").render(42), "msg=42");
    }
}
