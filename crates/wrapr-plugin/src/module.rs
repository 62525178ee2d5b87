//! Plugin module trait and a closure-backed method table.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use wrapr_core::{Env, InvokeOptions, Invoker, WrapError, WrapResult};

/// The in-process implementation behind a plugin wrapper.
///
/// A module declares the methods it supports up front; the wrapper rejects
/// anything else with [`WrapError::MethodNotFound`] before the module is
/// called.
#[async_trait]
pub trait PluginModule: Send + Sync {
    /// Names of the methods this module implements.
    fn methods(&self) -> Vec<String>;

    /// Whether `method` is one of [`PluginModule::methods`].
    fn has_method(&self, method: &str) -> bool {
        self.methods().iter().any(|m| m == method)
    }

    /// Execute `options.method`. Only called for names listed by
    /// `methods()`. Errors are returned to the caller unchanged.
    async fn invoke_method(
        &self,
        options: &InvokeOptions,
        invoker: &dyn Invoker,
    ) -> WrapResult<Value>;
}

/// Signature of a synchronous plugin method.
pub type MethodFn = Arc<dyn Fn(Value, Option<&Env>) -> Result<Value, String> + Send + Sync>;

/// A [`PluginModule`] assembled from named closures at registration time.
///
/// Useful for small plugins that never call back into the client. A closure's
/// error message becomes [`WrapError::Invocation`].
#[derive(Clone, Default)]
pub struct MethodTable {
    methods: BTreeMap<String, MethodFn>,
}

impl MethodTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a method, replacing any previous method of the same name.
    #[must_use]
    pub fn with_method<F>(mut self, name: impl Into<String>, method: F) -> Self
    where
        F: Fn(Value, Option<&Env>) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.methods.insert(name.into(), Arc::new(method));
        self
    }
}

impl std::fmt::Debug for MethodTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodTable")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[async_trait]
impl PluginModule for MethodTable {
    fn methods(&self) -> Vec<String> {
        self.methods.keys().cloned().collect()
    }

    fn has_method(&self, method: &str) -> bool {
        self.methods.contains_key(method)
    }

    async fn invoke_method(
        &self,
        options: &InvokeOptions,
        _invoker: &dyn Invoker,
    ) -> WrapResult<Value> {
        let Some(func) = self.methods.get(&options.method) else {
            return Err(WrapError::MethodNotFound {
                uri: options.uri.clone(),
                method: options.method.clone(),
            });
        };
        func(options.args.clone(), options.env.as_ref()).map_err(|message| {
            WrapError::Invocation {
                uri: options.uri.clone(),
                method: options.method.clone(),
                message,
            }
        })
    }
}
