//! Per-call resolution state.
//!
//! A [`ResolutionContext`] lives for exactly one top-level resolution. It
//! records every [`ResolutionStep`] taken and the set of URIs entered so far,
//! so a redirect cycle surfaces as [`WrapError::InfiniteLoop`] instead of a
//! hang.
//!
//! Nested aggregators resolve inside a *sub-history* context: it shares the
//! visited set with its parent (cycles are detected across nesting levels)
//! but records its own steps, which the aggregator then attaches to its own
//! step as `sub_history`. A *sub* context instead copies the visited set, so
//! what it enters stays private to it.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::debug;

use crate::error::{WrapError, WrapResult};
use crate::resolution::ResolutionResult;
use crate::uri::Uri;

/// One step in a resolution history.
#[derive(Debug, Clone)]
pub struct ResolutionStep {
    /// The URI handed to the resolver.
    pub source_uri: Uri,
    /// Which resolver produced this step.
    pub description: String,
    /// What the resolver answered; errors are kept as their message.
    pub result: Result<ResolutionResult, String>,
    /// Steps taken by nested resolvers, if this resolver aggregates others.
    pub sub_history: Vec<ResolutionStep>,
}

impl ResolutionStep {
    /// A step with a successful answer.
    #[must_use]
    pub fn new(source_uri: Uri, description: impl Into<String>, result: ResolutionResult) -> Self {
        Self {
            source_uri,
            description: description.into(),
            result: Ok(result),
            sub_history: Vec::new(),
        }
    }

    /// A step whose resolver failed.
    #[must_use]
    pub fn failed(source_uri: Uri, description: impl Into<String>, error: &WrapError) -> Self {
        Self {
            source_uri,
            description: description.into(),
            result: Err(error.to_string()),
            sub_history: Vec::new(),
        }
    }

    /// Attach the steps recorded by nested resolvers.
    #[must_use]
    pub fn with_sub_history(mut self, sub_history: Vec<ResolutionStep>) -> Self {
        self.sub_history = sub_history;
        self
    }

    /// Whether the resolver answered `NotFound`.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(&self.result, Ok(r) if r.is_not_found())
    }
}

impl fmt::Display for ResolutionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            Ok(result) => write!(f, "{} => {} => {result}", self.source_uri, self.description),
            Err(message) => write!(
                f,
                "{} => {} => error ({message})",
                self.source_uri, self.description
            ),
        }
    }
}

/// Render a history as indented lines, nested steps indented further.
#[must_use]
pub fn format_history(history: &[ResolutionStep]) -> Vec<String> {
    let mut lines = Vec::new();
    push_history_lines(history, 0, &mut lines);
    lines
}

fn push_history_lines(history: &[ResolutionStep], depth: usize, lines: &mut Vec<String>) {
    for step in history {
        lines.push(format!("{}{step}", "  ".repeat(depth)));
        push_history_lines(&step.sub_history, depth.saturating_add(1), lines);
    }
}

#[derive(Debug, Clone, Default)]
struct Visited {
    order: Vec<Uri>,
    seen: HashSet<Uri>,
}

/// Mutable record of one resolution call.
#[derive(Debug, Default)]
pub struct ResolutionContext {
    visited: Arc<Mutex<Visited>>,
    history: Vec<ResolutionStep>,
}

impl ResolutionContext {
    /// A fresh context with no history and nothing visited.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `uri` as entered.
    ///
    /// # Errors
    ///
    /// Returns [`WrapError::InfiniteLoop`] if `uri` was already entered
    /// within this resolution.
    pub fn start_resolution(&mut self, uri: &Uri) -> WrapResult<()> {
        let mut visited = self.visited.lock().unwrap_or_else(PoisonError::into_inner);
        if !visited.seen.insert(uri.clone()) {
            debug!(uri = %uri, path = ?visited.order, "Resolution cycle detected");
            return Err(WrapError::InfiniteLoop { uri: uri.clone() });
        }
        visited.order.push(uri.clone());
        Ok(())
    }

    /// Whether `uri` has been entered within this resolution.
    #[must_use]
    pub fn is_visited(&self, uri: &Uri) -> bool {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .seen
            .contains(uri)
    }

    /// URIs entered so far, in the order they were entered.
    #[must_use]
    pub fn resolution_path(&self) -> Vec<Uri> {
        self.visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .order
            .clone()
    }

    /// Append a step to this context's history.
    pub fn track_step(&mut self, step: ResolutionStep) {
        self.history.push(step);
    }

    /// Steps recorded so far by this context (not its parents).
    #[must_use]
    pub fn get_history(&self) -> &[ResolutionStep] {
        &self.history
    }

    /// Consume the context and return its history.
    #[must_use]
    pub fn into_history(self) -> Vec<ResolutionStep> {
        self.history
    }

    /// A child context sharing this context's visited set with an empty
    /// history of its own.
    #[must_use]
    pub fn create_sub_history_context(&self) -> Self {
        Self {
            visited: Arc::clone(&self.visited),
            history: Vec::new(),
        }
    }

    /// A child context starting from a snapshot of this context's visited
    /// set, with an empty history.
    ///
    /// Re-entering a URI the parent is resolving still fails, but URIs the
    /// child enters are not visible to the parent. Used to load helper
    /// wrappers (resolver extensions) that may be loaded again later in the
    /// same resolution.
    #[must_use]
    pub fn create_sub_context(&self) -> Self {
        let visited = self
            .visited
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        Self {
            visited: Arc::new(Mutex::new(visited)),
            history: Vec::new(),
        }
    }
}
