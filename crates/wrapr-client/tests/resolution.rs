//! Integration tests for URI resolution through a configured client.

use std::sync::Arc;

use serde_json::{Value, json};

use wrapr_client::WrapClient;
use wrapr_config::ClientConfigBuilder;
use wrapr_core::{ResolutionResult, UriResolver, WrapError, WrapManifest, WrapperType};
use wrapr_plugin::{MethodTable, PluginPackage};
use wrapr_resolvers::{
    ExtendableUriResolver, InterfaceImplementationResolver, RedirectResolver,
    TRY_RESOLVE_URI_METHOD, UriResolverAggregator, default_extension_interface,
};
use wrapr_test::{MockPackage, MockResolver, MockWrapper, init_test_logging, test_uri};

#[tokio::test]
async fn test_miss_records_one_step_per_resolver() {
    init_test_logging();
    let interfaces: Arc<dyn UriResolver> = Arc::new(InterfaceImplementationResolver::new());
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_resolvers([
            MockResolver::not_found("first").shared(),
            MockResolver::not_found("second").shared(),
            interfaces,
        ])
        .unwrap();
    let client = WrapClient::new(builder.build());

    let resolution = client.resolve_uri(&test_uri("ens/nobody.eth")).await.unwrap();

    assert!(resolution.is_not_found());
    assert_eq!(resolution.history.len(), 3);
    assert!(resolution.history.iter().all(|s| s.is_not_found()));
}

#[tokio::test]
async fn test_redirect_cycle_fails_with_infinite_loop() {
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_redirect(test_uri("ens/a.eth"), test_uri("ens/b.eth"))
        .unwrap()
        .add_redirect(test_uri("ens/b.eth"), test_uri("ens/a.eth"))
        .unwrap();
    let client = WrapClient::new(builder.build());

    let err = client.resolve_uri(&test_uri("ens/a.eth")).await.unwrap_err();

    assert!(matches!(
        err.root_cause(),
        WrapError::InfiniteLoop { uri } if *uri == test_uri("ens/a.eth")
    ));
    let history = err.history().unwrap();
    assert!(!history.is_empty());
}

#[tokio::test]
async fn test_redirect_cycle_inside_one_aggregator() {
    let a_to_b: Arc<dyn UriResolver> = Arc::new(RedirectResolver::new(
        test_uri("ens/a.eth"),
        test_uri("ens/b.eth"),
    ));
    let b_to_a: Arc<dyn UriResolver> = Arc::new(RedirectResolver::new(
        test_uri("ens/b.eth"),
        test_uri("ens/a.eth"),
    ));
    let mut builder = ClientConfigBuilder::new();
    builder.set_resolver(Arc::new(UriResolverAggregator::new(vec![a_to_b, b_to_a])));
    let client = WrapClient::new(builder.build());

    let err = client.resolve_uri(&test_uri("ens/a.eth")).await.unwrap_err();

    assert!(matches!(err, WrapError::Resolution { .. }));
    assert!(matches!(err.root_cause(), WrapError::InfiniteLoop { .. }));
}

#[tokio::test]
async fn test_chain_short_circuits_on_first_answer() {
    let r1 = MockResolver::not_found("r1");
    let r2 = MockResolver::new("r2", ResolutionResult::Uri(test_uri("ens/x.eth")));
    let r3 = MockResolver::new(
        "r3",
        ResolutionResult::Package(
            test_uri("ens/p.eth"),
            MockPackage::new(MockWrapper::new("p")).shared(),
        ),
    );
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_resolvers([r1.shared(), r2.shared(), r3.shared()])
        .unwrap();
    let client = WrapClient::new(builder.build());

    let resolution = client.resolve_uri(&test_uri("ens/a.eth")).await.unwrap();

    assert!(matches!(resolution.result, ResolutionResult::Uri(ref u) if *u == test_uri("ens/x.eth")));
    assert_eq!(r3.calls(), 0);
    assert_eq!(r2.seen(), [test_uri("ens/a.eth"), test_uri("ens/x.eth")]);
}

#[tokio::test]
async fn test_interface_resolves_to_first_implementation() {
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_interface_implementations(
            test_uri("ens/iface.eth"),
            [test_uri("ens/w1.eth"), test_uri("ens/w2.eth")],
        )
        .add_resolver(Arc::new(InterfaceImplementationResolver::new()))
        .unwrap();
    let client = WrapClient::new(builder.build());

    let resolution = client.resolve_uri(&test_uri("ens/iface.eth")).await.unwrap();

    assert!(matches!(resolution.result, ResolutionResult::Uri(ref u) if *u == test_uri("ens/w1.eth")));
}

#[tokio::test]
async fn test_resolver_error_is_not_masked() {
    let fallback = MockResolver::new("fallback", ResolutionResult::Uri(test_uri("ens/b.eth")));
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_resolvers([
            MockResolver::failing("broken", "registry entry is malformed").shared(),
            fallback.shared(),
        ])
        .unwrap();
    let client = WrapClient::new(builder.build());

    let err = client.resolve_uri(&test_uri("ens/a.eth")).await.unwrap_err();

    assert!(matches!(err.root_cause(), WrapError::Resolver { .. }));
    assert_eq!(fallback.calls(), 0);
    assert_eq!(err.history().map(<[_]>::len), Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_resolutions_do_not_share_history() {
    let mut builder = ClientConfigBuilder::new();
    for i in 0..16 {
        builder
            .add_redirect(
                test_uri(&format!("ens/alias-{i}.eth")),
                test_uri(&format!("ens/target-{i}.eth")),
            )
            .unwrap();
    }
    let client = WrapClient::new(builder.build());

    let mut handles = Vec::new();
    for i in 0..16 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            let uri = test_uri(&format!("ens/alias-{i}.eth"));
            (i, client.resolve_uri(&uri).await.unwrap())
        }));
    }

    for handle in handles {
        let (i, resolution) = handle.await.unwrap();
        let alias = test_uri(&format!("ens/alias-{i}.eth"));
        let target = test_uri(&format!("ens/target-{i}.eth"));

        assert!(matches!(resolution.result, ResolutionResult::Uri(ref u) if *u == target));
        assert!(
            resolution
                .history
                .iter()
                .all(|s| s.source_uri == alias || s.source_uri == target),
            "history of resolution {i} leaked steps from another call"
        );
    }
}

fn extension_plugin() -> PluginPackage {
    let table = MethodTable::new().with_method(TRY_RESOLVE_URI_METHOD, |args, _env| {
        if args["authority"] == "ens" && args["path"] == "target.eth" {
            Ok(json!({ "uri": "wrap://ens/final.eth" }))
        } else {
            Ok(Value::Null)
        }
    });
    let manifest = WrapManifest::new("ens-resolver", WrapperType::Plugin)
        .with_implements(default_extension_interface());
    PluginPackage::new(Arc::new(table), manifest)
}

#[tokio::test]
async fn test_extension_plugin_redirects_through_client() {
    let final_package = MockPackage::new(MockWrapper::new("final"));
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_interface_implementations(
            default_extension_interface(),
            [test_uri("plugin/ens-resolver")],
        )
        .add_plugin(test_uri("plugin/ens-resolver"), extension_plugin())
        .unwrap()
        .add_resolver(Arc::new(ExtendableUriResolver::new()))
        .unwrap()
        .add_package(test_uri("ens/final.eth"), final_package.shared())
        .unwrap();
    let client = WrapClient::new(builder.build());

    let resolution = client.resolve_uri(&test_uri("ens/target.eth")).await.unwrap();

    assert!(matches!(
        resolution.result,
        ResolutionResult::Package(ref u, _) if *u == test_uri("ens/final.eth")
    ));
    // target: plugin miss, extension redirect. final: plugin miss, extension
    // declines, package hit.
    assert_eq!(resolution.history.len(), 5);
    let extension_step = &resolution.history[1];
    assert_eq!(extension_step.description, "ExtendableUriResolver");
    assert_eq!(extension_step.sub_history.len(), 1);
    assert!(!extension_step.sub_history[0].sub_history.is_empty());
}

#[tokio::test]
async fn test_extension_served_after_extendable_resolver() {
    let final_package = MockPackage::new(MockWrapper::new("final"));
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_interface_implementations(default_extension_interface(), [test_uri("plugin/ext")])
        .add_resolver(Arc::new(ExtendableUriResolver::new()))
        .unwrap()
        .add_plugin(test_uri("plugin/ext"), extension_plugin())
        .unwrap()
        .add_package(test_uri("ens/final.eth"), final_package.shared())
        .unwrap();
    let client = WrapClient::new(builder.build());

    let resolution = client.resolve_uri(&test_uri("ens/target.eth")).await.unwrap();

    assert!(matches!(
        resolution.result,
        ResolutionResult::Package(ref u, _) if *u == test_uri("ens/final.eth")
    ));
    // target: extension redirect. final: extension declines, plugin miss,
    // package hit.
    assert_eq!(resolution.history.len(), 4);
    let load_steps = &resolution.history[0].sub_history[0].sub_history;
    assert!(load_steps[0].is_not_found());
}

#[tokio::test]
async fn test_unserved_extension_does_not_resolve_itself() {
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_interface_implementations(
            default_extension_interface(),
            [test_uri("ens/self-hosted.eth")],
        )
        .add_resolver(Arc::new(ExtendableUriResolver::new()))
        .unwrap();
    let client = WrapClient::new(builder.build());

    let resolution = client
        .resolve_uri(&test_uri("ens/self-hosted.eth"))
        .await
        .unwrap();

    assert!(resolution.is_not_found());
    assert_eq!(resolution.history.len(), 1);
    assert!(resolution.history[0].sub_history.is_empty());
}
