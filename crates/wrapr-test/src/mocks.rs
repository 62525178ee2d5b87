//! Mock implementations for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{Value, json};

use wrapr_core::{
    Client, Env, FileContent, GetFileOptions, InvokeOptions, Invoker, ResolutionContext,
    ResolutionResult, ResolutionStep, Uri, UriResolver, WrapError, WrapManifest, WrapPackage,
    WrapResult, Wrapper,
};

use crate::fixtures::test_manifest;

/// An invoker that rejects every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInvoker;

#[async_trait]
impl Invoker for NoopInvoker {
    async fn invoke(&self, uri: &Uri, method: &str, _args: Value) -> WrapResult<Value> {
        Err(WrapError::Invocation {
            uri: uri.clone(),
            method: method.to_string(),
            message: "no invoker available in this test".into(),
        })
    }
}

#[derive(Debug, Clone)]
enum Scripted {
    Answer(ResolutionResult),
    Fail(String),
}

/// A resolver that answers the same thing for every URI and counts calls.
///
/// Clones share the call counter, so a test can keep one handle while the
/// other is owned by an aggregator.
#[derive(Debug, Clone)]
pub struct MockResolver {
    name: String,
    script: Scripted,
    calls: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<Uri>>>,
}

impl MockResolver {
    /// A resolver that always answers `result`.
    #[must_use]
    pub fn new(name: impl Into<String>, result: ResolutionResult) -> Self {
        Self {
            name: name.into(),
            script: Scripted::Answer(result),
            calls: Arc::new(AtomicUsize::new(0)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A resolver that always answers `NotFound`.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::new(name, ResolutionResult::NotFound)
    }

    /// A resolver that always fails with [`WrapError::Resolver`].
    #[must_use]
    pub fn failing(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            script: Scripted::Fail(message.into()),
            ..Self::not_found(name)
        }
    }

    /// How many times `try_resolve` has been called.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Every URI this resolver was asked about, in call order.
    #[must_use]
    pub fn seen(&self) -> Vec<Uri> {
        self.seen.lock().map(|g| g.clone()).unwrap_or_default()
    }

    /// Share this resolver as a trait object.
    #[must_use]
    pub fn shared(&self) -> Arc<dyn UriResolver> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl UriResolver for MockResolver {
    fn description(&self) -> String {
        self.name.clone()
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        _client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(uri.clone());
        }

        match &self.script {
            Scripted::Answer(result) => {
                context.track_step(ResolutionStep::new(
                    uri.clone(),
                    self.description(),
                    result.clone(),
                ));
                Ok(result.clone())
            },
            Scripted::Fail(message) => {
                let err = WrapError::resolver(self.description(), uri, message);
                context.track_step(ResolutionStep::failed(
                    uri.clone(),
                    self.description(),
                    &err,
                ));
                Err(err)
            },
        }
    }
}

/// A wrapper that records invocations and answers from a script.
///
/// Methods without a scripted response echo the call back as JSON:
/// `{"uri", "method", "args", "env"}`.
#[derive(Debug, Clone)]
pub struct MockWrapper {
    manifest: WrapManifest,
    responses: HashMap<String, Value>,
    files: HashMap<String, Vec<u8>>,
    invocations: Arc<Mutex<Vec<InvokeOptions>>>,
}

impl MockWrapper {
    /// A wrapper with a wasm manifest named `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self::with_manifest(test_manifest(name))
    }

    /// A wrapper with an explicit manifest.
    #[must_use]
    pub fn with_manifest(manifest: WrapManifest) -> Self {
        Self {
            manifest,
            responses: HashMap::new(),
            files: HashMap::new(),
            invocations: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Answer `method` with `value`.
    #[must_use]
    pub fn with_response(mut self, method: impl Into<String>, value: Value) -> Self {
        self.responses.insert(method.into(), value);
        self
    }

    /// Bundle a file.
    #[must_use]
    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.into(), contents.into());
        self
    }

    /// Every invocation received, in order.
    #[must_use]
    pub fn invocations(&self) -> Vec<InvokeOptions> {
        self.invocations
            .lock()
            .map(|g| g.clone())
            .unwrap_or_default()
    }

    /// Share this wrapper as a trait object.
    #[must_use]
    pub fn shared(&self) -> Arc<dyn Wrapper> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl Wrapper for MockWrapper {
    fn manifest(&self) -> &WrapManifest {
        &self.manifest
    }

    async fn invoke(&self, options: &InvokeOptions, _invoker: &dyn Invoker) -> WrapResult<Value> {
        if let Ok(mut log) = self.invocations.lock() {
            log.push(options.clone());
        }
        if let Some(response) = self.responses.get(&options.method) {
            return Ok(response.clone());
        }
        Ok(json!({
            "uri": options.uri.to_string(),
            "method": options.method,
            "args": options.args,
            "env": options.env,
        }))
    }

    async fn get_file(&self, path: &str) -> WrapResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| WrapError::FileNotFound {
                path: path.to_string(),
            })
    }
}

/// A package that hands out a shared [`MockWrapper`] and counts instantiations.
#[derive(Debug, Clone)]
pub struct MockPackage {
    wrapper: MockWrapper,
    created: Arc<AtomicUsize>,
}

impl MockPackage {
    /// A package around `wrapper`.
    #[must_use]
    pub fn new(wrapper: MockWrapper) -> Self {
        Self {
            wrapper,
            created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many wrappers have been created.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    /// Share this package as a trait object.
    #[must_use]
    pub fn shared(&self) -> Arc<dyn WrapPackage> {
        Arc::new(self.clone())
    }
}

#[async_trait]
impl WrapPackage for MockPackage {
    async fn get_manifest(&self) -> WrapResult<WrapManifest> {
        Ok(self.wrapper.manifest().clone())
    }

    async fn create_wrapper(&self) -> WrapResult<Arc<dyn Wrapper>> {
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(self.wrapper.shared())
    }
}

/// A minimal [`Client`] for exercising resolvers in isolation.
///
/// `try_resolve_uri` asks each configured resolver in order and returns the
/// first non-`NotFound` answer; it does not follow redirects.
#[derive(Debug, Default)]
pub struct MockClient {
    interfaces: HashMap<Uri, Vec<Uri>>,
    envs: HashMap<Uri, Env>,
    resolvers: Vec<Arc<dyn UriResolver>>,
}

impl MockClient {
    /// An empty client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interface implementations.
    #[must_use]
    pub fn with_interface(mut self, interface: Uri, implementations: Vec<Uri>) -> Self {
        self.interfaces
            .entry(interface)
            .or_default()
            .extend(implementations);
        self
    }

    /// Register an environment.
    #[must_use]
    pub fn with_env(mut self, uri: Uri, env: Env) -> Self {
        self.envs.insert(uri, env);
        self
    }

    /// Append a resolver.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn UriResolver>) -> Self {
        self.resolvers.push(resolver);
        self
    }
}

#[async_trait]
impl Invoker for MockClient {
    async fn invoke(&self, uri: &Uri, method: &str, args: Value) -> WrapResult<Value> {
        let mut context = ResolutionContext::new();
        let wrapper = self.load_wrapper(uri, &mut context).await?;
        let options = InvokeOptions::new(uri.clone(), method, args)
            .with_env(self.get_env_by_uri(uri).cloned());
        wrapper.invoke(&options, self).await
    }
}

#[async_trait]
impl Client for MockClient {
    fn get_interfaces(&self) -> &HashMap<Uri, Vec<Uri>> {
        &self.interfaces
    }

    fn get_envs(&self) -> &HashMap<Uri, Env> {
        &self.envs
    }

    async fn try_resolve_uri(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        for resolver in &self.resolvers {
            let result = resolver.try_resolve(uri, self, context).await?;
            if !result.is_not_found() {
                return Ok(result);
            }
        }
        Ok(ResolutionResult::NotFound)
    }

    async fn load_wrapper(
        &self,
        uri: &Uri,
        context: &mut ResolutionContext,
    ) -> WrapResult<Arc<dyn Wrapper>> {
        match self.try_resolve_uri(uri, context).await? {
            ResolutionResult::Wrapper(_, wrapper) => Ok(wrapper),
            ResolutionResult::Package(_, package) => package.create_wrapper().await,
            ResolutionResult::Uri(_) | ResolutionResult::NotFound => Err(WrapError::UriNotFound {
                uri: uri.clone(),
                history: context.get_history().to_vec(),
            }),
        }
    }

    async fn get_manifest(&self, uri: &Uri) -> WrapResult<WrapManifest> {
        let mut context = ResolutionContext::new();
        Ok(self.load_wrapper(uri, &mut context).await?.manifest().clone())
    }

    async fn get_file(&self, uri: &Uri, options: &GetFileOptions) -> WrapResult<FileContent> {
        let mut context = ResolutionContext::new();
        let wrapper = self.load_wrapper(uri, &mut context).await?;
        options.decode(wrapper.get_file(&options.path).await?)
    }
}
