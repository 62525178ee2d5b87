//! Resolution outcomes.

use std::fmt;
use std::sync::Arc;

use crate::context::ResolutionStep;
use crate::uri::Uri;
use crate::wrapper::{WrapPackage, Wrapper};

/// What a resolver produced for one URI.
///
/// `NotFound` means "this resolver does not claim the URI; try the next
/// one". It is never an error.
#[derive(Clone)]
pub enum ResolutionResult {
    /// Redirect to another URI.
    Uri(Uri),
    /// A package that can be instantiated into a wrapper.
    Package(Uri, Arc<dyn WrapPackage>),
    /// A ready-to-invoke wrapper.
    Wrapper(Uri, Arc<dyn Wrapper>),
    /// No claim.
    NotFound,
}

impl ResolutionResult {
    /// Whether this is [`ResolutionResult::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Whether this result ends resolution with something loadable.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Package(..) | Self::Wrapper(..))
    }

    /// The URI carried by this result, if any.
    #[must_use]
    pub fn uri(&self) -> Option<&Uri> {
        match self {
            Self::Uri(uri) | Self::Package(uri, _) | Self::Wrapper(uri, _) => Some(uri),
            Self::NotFound => None,
        }
    }

    /// Short label for the variant.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uri(_) => "uri",
            Self::Package(..) => "package",
            Self::Wrapper(..) => "wrapper",
            Self::NotFound => "not-found",
        }
    }
}

impl fmt::Debug for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => f.debug_tuple("Uri").field(uri).finish(),
            Self::Package(uri, _) => f.debug_tuple("Package").field(uri).finish(),
            Self::Wrapper(uri, _) => f.debug_tuple("Wrapper").field(uri).finish(),
            Self::NotFound => f.write_str("NotFound"),
        }
    }
}

impl fmt::Display for ResolutionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uri(uri) => write!(f, "uri ({uri})"),
            Self::Package(uri, _) => write!(f, "package ({uri})"),
            Self::Wrapper(uri, _) => write!(f, "wrapper ({uri})"),
            Self::NotFound => f.write_str("not found"),
        }
    }
}

/// The outcome of a top-level resolution together with its history.
#[derive(Debug, Clone)]
pub struct Resolution {
    /// The URI that was requested.
    pub uri: Uri,
    /// The terminal result.
    pub result: ResolutionResult,
    /// Every step taken, in order.
    pub history: Vec<ResolutionStep>,
}

impl Resolution {
    /// Whether nothing claimed the requested URI.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.result.is_not_found()
    }
}
