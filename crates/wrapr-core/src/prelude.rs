//! Prelude module - commonly used types for convenient import.
//!
//! Use `use wrapr_core::prelude::*;` to import all essential types.

// Addressing
pub use crate::{Uri, WRAP_SCHEME};

// Errors
pub use crate::{WrapError, WrapResult};

// Resolution
pub use crate::{Resolution, ResolutionContext, ResolutionResult, ResolutionStep, UriResolver};

// Packages and invocation
pub use crate::{
    Client, Env, FileContent, GetFileOptions, InvokeOptions, Invoker, WrapManifest, WrapPackage,
    Wrapper, WrapperType,
};
