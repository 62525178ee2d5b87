//! Interface URI to implementation URI.

use async_trait::async_trait;

use wrapr_core::{
    Client, ResolutionContext, ResolutionResult, ResolutionStep, Uri, UriResolver, WrapResult,
};

/// Redirects an interface URI to its first registered implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct InterfaceImplementationResolver;

impl InterfaceImplementationResolver {
    /// Create the resolver. Implementations are read from the client.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UriResolver for InterfaceImplementationResolver {
    fn description(&self) -> String {
        "InterfaceImplementationResolver".to_string()
    }

    async fn try_resolve(
        &self,
        uri: &Uri,
        client: &dyn Client,
        context: &mut ResolutionContext,
    ) -> WrapResult<ResolutionResult> {
        let (result, description) = match client.get_interfaces().get(uri) {
            None => (ResolutionResult::NotFound, self.description()),
            Some(implementations) => match implementations.first() {
                Some(first) => (ResolutionResult::Uri(first.clone()), self.description()),
                None => (
                    ResolutionResult::NotFound,
                    format!("{} (no implementations)", self.description()),
                ),
            },
        };
        context.track_step(ResolutionStep::new(uri.clone(), description, result.clone()));
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapr_test::{MockClient, test_uri};

    #[tokio::test]
    async fn test_first_implementation_wins() {
        let client = MockClient::new().with_interface(
            test_uri("ens/iface.eth"),
            vec![test_uri("ens/impl-a.eth"), test_uri("ens/impl-b.eth")],
        );
        let mut ctx = ResolutionContext::new();

        let result = InterfaceImplementationResolver::new()
            .try_resolve(&test_uri("ens/iface.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert!(matches!(result, ResolutionResult::Uri(u) if u == test_uri("ens/impl-a.eth")));
    }

    #[tokio::test]
    async fn test_unimplemented_interface_is_distinguishable() {
        let client = MockClient::new().with_interface(test_uri("ens/iface.eth"), Vec::new());
        let mut ctx = ResolutionContext::new();
        let resolver = InterfaceImplementationResolver::new();

        let declared = resolver
            .try_resolve(&test_uri("ens/iface.eth"), &client, &mut ctx)
            .await
            .unwrap();
        let unknown = resolver
            .try_resolve(&test_uri("ens/other.eth"), &client, &mut ctx)
            .await
            .unwrap();

        assert!(declared.is_not_found());
        assert!(unknown.is_not_found());
        let history = ctx.get_history();
        assert_eq!(
            history[0].description,
            "InterfaceImplementationResolver (no implementations)"
        );
        assert_eq!(history[1].description, "InterfaceImplementationResolver");
    }
}
