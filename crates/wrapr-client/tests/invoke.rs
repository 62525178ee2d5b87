//! Integration tests for invoking wrappers through the client.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};

use wrapr_client::WrapClient;
use wrapr_config::ClientConfigBuilder;
use wrapr_core::{
    Client, FileContent, GetFileOptions, InvokeOptions, Invoker, Uri, WrapError, WrapResult,
    WrapperType,
};
use wrapr_plugin::{MethodTable, PluginModule, PluginPackage};
use wrapr_test::{MockPackage, MockWrapper, test_env, test_uri};

fn math_plugin() -> PluginPackage {
    let table = MethodTable::new()
        .with_method("add", |args, _env| {
            let a = args["a"].as_i64().ok_or("missing 'a'")?;
            let b = args["b"].as_i64().ok_or("missing 'b'")?;
            Ok(json!(a.saturating_add(b)))
        })
        .with_method("network", |_args, env| {
            Ok(env
                .and_then(|e| e.get("network"))
                .cloned()
                .unwrap_or(Value::Null))
        });
    PluginPackage::from_module("math", Arc::new(table))
}

/// Calls `math.add` through the invoker it is handed.
struct Doubler;

#[async_trait]
impl PluginModule for Doubler {
    fn methods(&self) -> Vec<String> {
        vec!["double".to_string()]
    }

    async fn invoke_method(
        &self,
        options: &InvokeOptions,
        invoker: &dyn Invoker,
    ) -> WrapResult<Value> {
        let math = Uri::parse("plugin/math")?;
        let n = &options.args["n"];
        invoker.invoke(&math, "add", json!({ "a": n, "b": n })).await
    }
}

fn client() -> WrapClient {
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_plugin(test_uri("plugin/math"), math_plugin())
        .unwrap()
        .add_plugin(
            test_uri("plugin/doubler"),
            PluginPackage::from_module("doubler", Arc::new(Doubler)),
        )
        .unwrap()
        .add_redirect(test_uri("ens/math.eth"), test_uri("plugin/math"))
        .unwrap()
        .set_env(test_uri("plugin/math"), test_env([("network", json!("mainnet"))]));
    WrapClient::new(builder.build())
}

#[tokio::test]
async fn test_invoke_plugin_method() {
    let result = client()
        .invoke(&test_uri("plugin/math"), "add", json!({ "a": 2, "b": 3 }))
        .await
        .unwrap();
    assert_eq!(result, json!(5));
}

#[tokio::test]
async fn test_invoke_follows_redirect_and_attaches_env() {
    let result = client()
        .invoke(&test_uri("ens/math.eth"), "network", Value::Null)
        .await
        .unwrap();
    assert_eq!(result, json!("mainnet"));
}

#[tokio::test]
async fn test_plugin_can_invoke_other_wrappers() {
    let result = client()
        .invoke(&test_uri("plugin/doubler"), "double", json!({ "n": 21 }))
        .await
        .unwrap();
    assert_eq!(result, json!(42));
}

#[tokio::test]
async fn test_unknown_method_is_method_not_found() {
    let err = client()
        .invoke(&test_uri("plugin/math"), "divide", Value::Null)
        .await
        .unwrap_err();
    assert!(matches!(err, WrapError::MethodNotFound { ref method, .. } if method == "divide"));
}

#[tokio::test]
async fn test_plugin_method_failure_is_invocation_error() {
    let err = client()
        .invoke(&test_uri("plugin/math"), "add", json!({ "a": 1 }))
        .await
        .unwrap_err();
    assert!(matches!(err, WrapError::Invocation { ref message, .. } if message == "missing 'b'"));
}

#[tokio::test]
async fn test_unresolvable_uri_is_uri_not_found() {
    let err = client()
        .invoke(&test_uri("ens/unknown.eth"), "add", Value::Null)
        .await
        .unwrap_err();

    let WrapError::UriNotFound { uri, history } = err else {
        panic!("expected UriNotFound, got {err:?}");
    };
    assert_eq!(uri, test_uri("ens/unknown.eth"));
    // Two plugin resolvers and one redirect, all declining.
    assert_eq!(history.len(), 3);
}

#[tokio::test]
async fn test_get_manifest_and_file() {
    let wrapper = MockWrapper::new("docs").with_file("README.md", "# docs");
    let mut builder = ClientConfigBuilder::new();
    builder
        .add_package(test_uri("ens/docs.eth"), MockPackage::new(wrapper).shared())
        .unwrap();
    let client = WrapClient::new(builder.build());

    let manifest = client.get_manifest(&test_uri("ens/docs.eth")).await.unwrap();
    assert_eq!(manifest.name, "docs");
    assert_eq!(manifest.wrapper_type, WrapperType::Wasm);

    let text = client
        .get_file(&test_uri("ens/docs.eth"), &GetFileOptions::utf8("README.md"))
        .await
        .unwrap();
    assert_eq!(text, FileContent::Text("# docs".to_string()));

    let bytes = client
        .get_file(&test_uri("ens/docs.eth"), &GetFileOptions::bytes("README.md"))
        .await
        .unwrap();
    assert_eq!(bytes, FileContent::Bytes(b"# docs".to_vec()));

    let missing = client
        .get_file(&test_uri("ens/docs.eth"), &GetFileOptions::bytes("nope.txt"))
        .await
        .unwrap_err();
    assert!(matches!(missing, WrapError::FileNotFound { .. }));
}

#[tokio::test]
async fn test_plugin_manifest_type() {
    let manifest = client()
        .get_manifest(&test_uri("plugin/math"))
        .await
        .unwrap();
    assert_eq!(manifest.wrapper_type, WrapperType::Plugin);
}
