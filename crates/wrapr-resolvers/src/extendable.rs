//! Resolution delegated to wrappers implementing the resolver extension
//! interface.
//!
//! Every implementation registered for the extension interface becomes a
//! [`UriResolverWrapper`]. Each one loads its wrapper through the client and
//! invokes `tryResolveUri` with the URI's authority and path. The wrapper
//! answers `{"uri": "..."}` to redirect, or `null` (or an object without
//! `uri`) to decline.
//!
//! An extension that is itself being resolved in the current context is
//! skipped, so loading it can fall through to the resolvers after this one.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, warn};

use wrapr_core::{
    Client, InvokeOptions, ResolutionContext, ResolutionResult, ResolutionStep, Uri, UriResolver,
    WrapError, WrapResult,
};

use crate::aggregator::{ResolverSet, aggregate};

/// Method every resolver extension exposes.
pub const TRY_RESOLVE_URI_METHOD: &str = "tryResolveUri";

/// The interface resolver extensions implement by default.
#[must_use]
pub fn default_extension_interface() -> Uri {
    Uri::from_static("ens", "uri-resolver.core.wrapr.eth")
}

/// Consults every registered implementation of a resolver extension
/// interface, in registration order.
#[derive(Debug, Clone)]
pub struct ExtendableUriResolver {
    extension_interface: Uri,
    name: Option<String>,
}

impl Default for ExtendableUriResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtendableUriResolver {
    /// Use the default extension interface.
    #[must_use]
    pub fn new() -> Self {
        Self::with_interface(default_extension_interface())
    }

    /// Use a custom extension interface.
    #[must_use]
    pub fn with_interface(extension_interface: Uri) -> Self {
        Self {
            extension_interface,
            name: None,
        }
    }

    /// Override the name recorded in resolution histories.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The interface whose implementations are consulted.
    #[must_use]
    pub fn extension_interface(&self) -> &Uri {
        &self.extension_interface
    }
}

#[async_trait]
impl ResolverSet for ExtendableUriResolver {
    fn name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| "ExtendableUriResolver".to_string())
    }

    async fn get_uri_resolvers(
        &self,
        _uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<Vec<Arc<dyn UriResolver>>> {
        Ok(client
            .get_implementations(&self.extension_interface)
            .iter()
            .filter(|implementation| {
                let loading = context.is_visited(implementation);
                if loading {
                    debug!(
                        extension = %implementation,
                        "Skipping extension while it is being loaded"
                    );
                }
                !loading
            })
            .map(|implementation| {
                Arc::new(UriResolverWrapper::new(
                    implementation.clone(),
                    self.extension_interface.clone(),
                )) as Arc<dyn UriResolver>
            })
            .collect())
    }
}

#[async_trait]
impl UriResolver for ExtendableUriResolver {
    fn description(&self) -> String {
        self.name()
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        aggregate(self, uri, client, context).await
    }
}

/// One resolver extension, addressed by its implementation URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriResolverWrapper {
    implementation: Uri,
    extension_interface: Uri,
}

impl UriResolverWrapper {
    /// Wrap the extension at `implementation`, which must implement
    /// `extension_interface`.
    #[must_use]
    pub fn new(implementation: Uri, extension_interface: Uri) -> Self {
        Self {
            implementation,
            extension_interface,
        }
    }

    /// The extension's own URI.
    #[must_use]
    pub fn implementation(&self) -> &Uri {
        &self.implementation
    }

    async fn resolve_with_extension(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let wrapper = client
            .load_wrapper(&self.implementation, context)
            .await
            .map_err(|err| {
                if matches!(err, WrapError::InfiniteLoop { .. }) {
                    err
                } else {
                    WrapError::resolver(
                        self.description(),
                        uri,
                        format!("failed to load extension: {err}"),
                    )
                }
            })?;

        if !wrapper.manifest().implements(&self.extension_interface) {
            warn!(
                extension = %self.implementation,
                interface = %self.extension_interface,
                "Registered resolver extension does not declare the extension interface"
            );
            return Ok(ResolutionResult::NotFound);
        }

        let options = InvokeOptions::new(
            self.implementation.clone(),
            TRY_RESOLVE_URI_METHOD,
            json!({ "authority": uri.authority(), "path": uri.path() }),
        )
        .with_env(client.get_env_by_uri(&self.implementation).cloned());

        let answer = wrapper
            .invoke(&options, client)
            .await
            .map_err(|err| WrapError::resolver(self.description(), uri, err))?;

        self.interpret(uri, answer)
    }

    fn interpret(&self, uri: &Uri, answer: Value) -> WrapResult<ResolutionResult> {
        let target = match answer {
            Value::Null => return Ok(ResolutionResult::NotFound),
            Value::Object(mut fields) => fields.remove("uri"),
            other => {
                return Err(WrapError::resolver(
                    self.description(),
                    uri,
                    format!("unexpected {TRY_RESOLVE_URI_METHOD} result: {other}"),
                ));
            },
        };
        match target {
            None | Some(Value::Null) => Ok(ResolutionResult::NotFound),
            Some(Value::String(text)) => {
                let next = Uri::parse(&text)
                    .map_err(|err| WrapError::resolver(self.description(), uri, err))?;
                debug!(uri = %uri, extension = %self.implementation, to = %next, "Extension redirected");
                Ok(ResolutionResult::Uri(next))
            },
            Some(other) => Err(WrapError::resolver(
                self.description(),
                uri,
                format!("'uri' must be a string, got {other}"),
            )),
        }
    }
}

#[async_trait]
impl UriResolver for UriResolverWrapper {
    fn description(&self) -> String {
        format!("ResolverExtension ({})", self.implementation)
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let mut sub_context = context.create_sub_context();
        let outcome = self
            .resolve_with_extension(uri, client, &mut sub_context)
            .await;
        let step = match &outcome {
            Ok(result) => ResolutionStep::new(uri.clone(), self.description(), result.clone()),
            Err(err) => ResolutionStep::failed(uri.clone(), self.description(), err),
        };
        context.track_step(step.with_sub_history(sub_context.into_history()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapr_core::{WrapManifest, WrapperType};
    use wrapr_test::{MockClient, MockResolver, MockWrapper, test_uri};

    fn extension(name: &str, answer: Value) -> MockWrapper {
        let manifest = WrapManifest::new(name, WrapperType::Wasm)
            .with_implements(default_extension_interface());
        MockWrapper::with_manifest(manifest).with_response(TRY_RESOLVE_URI_METHOD, answer)
    }

    fn client_with(extensions: Vec<(&str, MockWrapper)>) -> MockClient {
        let mut client = MockClient::new().with_interface(
            default_extension_interface(),
            extensions.iter().map(|(uri, _)| test_uri(uri)).collect(),
        );
        for (uri, wrapper) in extensions {
            client = client.with_resolver(
                MockResolver::new(
                    format!("serve {uri}"),
                    ResolutionResult::Wrapper(test_uri(uri), wrapper.shared()),
                )
                .shared(),
            );
        }
        client
    }

    #[tokio::test]
    async fn test_extension_redirects_uri() {
        let ext = extension("ens-resolver", json!({ "uri": "ipfs/QmHash" }));
        let client = client_with(vec![("ens/ens-resolver.eth", ext.clone())]);
        let mut ctx = ResolutionContext::new();

        let result = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(u) if u == test_uri("ipfs/QmHash")));
        let calls = ext.invocations();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, TRY_RESOLVE_URI_METHOD);
        assert_eq!(
            calls[0].args,
            json!({ "authority": "ens", "path": "target.eth" })
        );
    }

    #[tokio::test]
    async fn test_null_answer_moves_to_next_extension() {
        let first = extension("first", Value::Null);
        let second = extension("second", json!({ "uri": "ens/found.eth" }));
        let client = client_with(vec![
            ("ens/first.eth", first),
            ("ens/second.eth", second),
        ]);
        let mut ctx = ResolutionContext::new();

        let result = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(u) if u == test_uri("ens/found.eth")));
        let step = &ctx.get_history()[0];
        assert_eq!(step.description, "ExtendableUriResolver");
        assert_eq!(step.sub_history.len(), 2);
        assert!(step.sub_history[0].is_not_found());
    }

    #[tokio::test]
    async fn test_no_extensions_is_not_found() {
        let mut ctx = ResolutionContext::new();
        let result = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &MockClient::new(), &mut ctx)
            .await
            .unwrap();

        assert!(result.is_not_found());
        assert!(ctx.get_history()[0].sub_history.is_empty());
    }

    #[tokio::test]
    async fn test_extension_missing_interface_is_skipped() {
        let rogue = MockWrapper::new("rogue").with_response(
            TRY_RESOLVE_URI_METHOD,
            json!({ "uri": "ens/hijacked.eth" }),
        );
        let client = client_with(vec![("ens/rogue.eth", rogue.clone())]);
        let mut ctx = ResolutionContext::new();

        let result = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert!(result.is_not_found());
        assert!(rogue.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_unloadable_extension_is_resolver_error() {
        let client = MockClient::new()
            .with_interface(default_extension_interface(), vec![test_uri("ens/gone.eth")]);
        let mut ctx = ResolutionContext::new();

        let err = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &client, &mut ctx)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            WrapError::Resolver { ref resolver, .. } if resolver == "ResolverExtension (wrap://ens/gone.eth)"
        ));
        assert!(ctx.get_history()[0].result.is_err());
    }

    #[tokio::test]
    async fn test_malformed_answer_is_resolver_error() {
        let ext = extension("broken", json!({ "uri": 42 }));
        let client = client_with(vec![("ens/broken.eth", ext)]);
        let mut ctx = ResolutionContext::new();

        let err = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &client, &mut ctx)
            .await
            .unwrap_err();

        assert!(matches!(err, WrapError::Resolver { .. }));
    }

    #[tokio::test]
    async fn test_extension_being_loaded_is_skipped() {
        let ext = extension("ens-resolver", json!({ "uri": "ens/elsewhere.eth" }));
        let client = client_with(vec![("ens/ens-resolver.eth", ext.clone())]);
        let mut ctx = ResolutionContext::new();
        ctx.start_resolution(&test_uri("ens/ens-resolver.eth")).unwrap();

        let result = ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/ens-resolver.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert!(result.is_not_found());
        assert!(ctx.get_history()[0].sub_history.is_empty());
        assert!(ext.invocations().is_empty());
    }

    #[tokio::test]
    async fn test_extension_receives_its_env() {
        let ext = extension("configured", Value::Null);
        let env = wrapr_test::test_env([("network", json!("mainnet"))]);
        let client = client_with(vec![("ens/configured.eth", ext.clone())])
            .with_env(test_uri("ens/configured.eth"), env.clone());
        let mut ctx = ResolutionContext::new();

        ExtendableUriResolver::new()
            .try_resolve(&test_uri("ens/target.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert_eq!(ext.invocations()[0].env, Some(env));
    }
}
