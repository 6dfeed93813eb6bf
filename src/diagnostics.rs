//! Error and warning reporting context
//!
//! A single `Diagnostics` value is created by the host and shared as
//! `Rc<Diagnostics>` with whatever needs to report problems. Each report is
//! forwarded to the `log` facade and, when its level passes the filter, to the
//! optional sink (e.g. a toast area in the UI).

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use log::{Level, LevelFilter};

/// One reported problem
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    /// Component that produced the report, also used as the log target
    pub source: &'static str,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.level, self.source, self.message)
    }
}

type Sink = Rc<dyn Fn(&Diagnostic)>;

/// Level filter plus optional sink, mutable through a shared reference
pub struct Diagnostics {
    level: Cell<LevelFilter>,
    sink: RefCell<Option<Sink>>,
}

impl Default for Diagnostics {
    fn default() -> Self {
        Self::new(LevelFilter::Warn)
    }
}

impl fmt::Debug for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagnostics")
            .field("level", &self.level.get())
            .field("has_sink", &self.sink.borrow().is_some())
            .finish()
    }
}

impl Diagnostics {
    pub fn new(level: LevelFilter) -> Self {
        Self {
            level: Cell::new(level),
            sink: RefCell::new(None),
        }
    }

    pub fn level(&self) -> LevelFilter {
        self.level.get()
    }

    pub fn set_level(&self, level: LevelFilter) {
        self.level.set(level);
    }

    /// Installs the callback that receives reports passing the filter
    ///
    /// The sink may itself call `set_sink` or `clear_sink`; the change takes
    /// effect from the next report.
    pub fn set_sink(&self, sink: impl Fn(&Diagnostic) + 'static) {
        *self.sink.borrow_mut() = Some(Rc::new(sink));
    }

    pub fn clear_sink(&self) {
        *self.sink.borrow_mut() = None;
    }

    /// Reports a message; returns whether it reached the sink
    pub fn report(&self, level: Level, source: &'static str, message: impl Into<String>) -> bool {
        let diagnostic = Diagnostic {
            level,
            source,
            message: message.into(),
        };
        log::log!(target: source, level, "{}", diagnostic.message);

        if level > self.level.get() {
            return false;
        }
        // Released before the call so the sink can replace itself
        let sink = self.sink.borrow().clone();
        match sink {
            Some(sink) => {
                sink(&diagnostic);
                true
            }
            None => false,
        }
    }

    pub fn error(&self, source: &'static str, message: impl Into<String>) -> bool {
        self.report(Level::Error, source, message)
    }

    pub fn warn(&self, source: &'static str, message: impl Into<String>) -> bool {
        self.report(Level::Warn, source, message)
    }

    pub fn info(&self, source: &'static str, message: impl Into<String>) -> bool {
        self.report(Level::Info, source, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collecting() -> (Diagnostics, Rc<RefCell<Vec<Diagnostic>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let diagnostics = Diagnostics::default();
        let sink_seen = Rc::clone(&seen);
        diagnostics.set_sink(move |d| sink_seen.borrow_mut().push(d.clone()));
        (diagnostics, seen)
    }

    #[test]
    fn test_filter_applies_to_sink() {
        let (diagnostics, seen) = collecting();
        assert!(diagnostics.warn("parser", "bad input"));
        assert!(!diagnostics.info("state", "angle changed"));
        assert_eq!(seen.borrow().len(), 1);
        assert_eq!(seen.borrow()[0].to_string(), "[WARN] parser: bad input");

        diagnostics.set_level(LevelFilter::Info);
        assert!(diagnostics.info("state", "angle changed"));
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_off_and_cleared_sink() {
        let (diagnostics, seen) = collecting();
        diagnostics.set_level(LevelFilter::Off);
        assert!(!diagnostics.error("config", "unreadable"));

        diagnostics.set_level(LevelFilter::Trace);
        diagnostics.clear_sink();
        assert!(!diagnostics.error("config", "unreadable"));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_sink_can_remove_itself() {
        let diagnostics = Rc::new(Diagnostics::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let owner = Rc::downgrade(&diagnostics);
        let sink_seen = Rc::clone(&seen);
        diagnostics.set_sink(move |d| {
            sink_seen.borrow_mut().push(d.message.clone());
            if let Some(diagnostics) = owner.upgrade() {
                diagnostics.clear_sink();
            }
        });

        assert!(diagnostics.error("interaction", "first"));
        assert!(!diagnostics.error("interaction", "second"));
        assert_eq!(seen.borrow().as_slice(), &["first".to_string()]);
    }

    #[test]
    fn test_sink_can_replace_itself() {
        let diagnostics = Rc::new(Diagnostics::default());
        let seen = Rc::new(RefCell::new(Vec::new()));
        let owner = Rc::downgrade(&diagnostics);
        let sink_seen = Rc::clone(&seen);
        diagnostics.set_sink(move |_| {
            if let Some(diagnostics) = owner.upgrade() {
                let replaced_seen = Rc::clone(&sink_seen);
                diagnostics.set_sink(move |d| replaced_seen.borrow_mut().push(d.to_string()));
            }
        });

        diagnostics.warn("parser", "swapped");
        diagnostics.warn("parser", "kept");
        assert_eq!(seen.borrow().as_slice(), &["[WARN] parser: kept".to_string()]);
    }
}
