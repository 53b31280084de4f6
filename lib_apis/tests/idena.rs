use std::time::Duration;

use lib_apis::chains::idena::{ActivateInviteArgs, BaseTxArgs, IdenaApi, SendInviteArgs, SendTxArgs, TransactionsArgs};
use lib_apis::retrieve::{ApiError, ClientOptions};
use mockito::{Matcher, ServerGuard};
use serde_json::{json, Value};

fn api(server: &ServerGuard, key: Option<&str>) -> IdenaApi {
    IdenaApi::with_options(
        &server.url(),
        key.map(str::to_string),
        ClientOptions::no_retries(Duration::from_secs(5)),
    )
    .unwrap()
}

async fn rpc_mock(server: &mut ServerGuard, request: Value, reply: Value) -> mockito::Mock {
    server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(request))
        .with_status(200)
        .with_body(reply.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_get_balance_posts_envelope_with_key() {
    let mut server = mockito::Server::new_async().await;
    let result = json!({"stake": "2300.5", "balance": "120.25", "nonce": 14, "mempoolNonce": 14});
    let mock = rpc_mock(
        &mut server,
        json!({"method": "dna_getBalance", "params": ["0xabc"], "id": 1, "key": "node-key"}),
        json!({"jsonrpc": "2.0", "id": 1, "result": result}),
    )
    .await;

    let balance = api(&server, Some("node-key")).get_balance("0xabc").await.unwrap();

    assert_eq!(balance, result);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_identities_without_key_sends_empty_params() {
    let mut server = mockito::Server::new_async().await;
    let result = json!([{"address": "0x1", "state": "Human"}, {"address": "0x2", "state": "Newbie"}]);
    let mock = rpc_mock(
        &mut server,
        json!({"method": "dna_identities", "params": [], "id": 1}),
        json!({"jsonrpc": "2.0", "id": 1, "result": result}),
    )
    .await;

    assert_eq!(api(&server, None).identities().await.unwrap(), result);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_transactions_sends_object_param() {
    let mut server = mockito::Server::new_async().await;
    let result = json!({"transactions": [], "token": null});
    let mock = rpc_mock(
        &mut server,
        json!({"method": "bcn_transactions", "params": [{"address": "0xabc", "count": 20}], "id": 1}),
        json!({"jsonrpc": "2.0", "id": 1, "result": result}),
    )
    .await;

    let page = api(&server, None)
        .transactions(&TransactionsArgs::new("0xabc", 20))
        .await
        .unwrap();

    assert_eq!(page, result);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_send_transaction_surfaces_rpc_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = rpc_mock(
        &mut server,
        json!({
            "method": "dna_sendTransaction",
            "params": [{"from": "0xfrom", "to": "0xto", "amount": 10.0}],
            "id": 1
        }),
        json!({"jsonrpc": "2.0", "id": 1, "error": {"code": -32000, "message": "insufficient funds"}}),
    )
    .await;

    let args = SendTxArgs {
        from: "0xfrom".into(),
        to: Some("0xto".into()),
        amount: 10.0,
        ..Default::default()
    };
    let err = api(&server, None).send_transaction(&args).await.unwrap_err();

    assert!(matches!(err, ApiError::Rpc { code: -32000, .. }));
    let record = err.to_record();
    assert_eq!(record.message, "insufficient funds");
    assert_eq!(record.code, Some(-32000));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_block_at_and_null_result() {
    let mut server = mockito::Server::new_async().await;
    let block = rpc_mock(
        &mut server,
        json!({"method": "bcn_blockAt", "params": [4200000], "id": 1}),
        json!({"jsonrpc": "2.0", "id": 1, "result": {"height": 4200000}}),
    )
    .await;
    let tx = rpc_mock(
        &mut server,
        json!({"method": "bcn_transaction", "params": ["0xdead"], "id": 1}),
        json!({"jsonrpc": "2.0", "id": 1}),
    )
    .await;

    let node = api(&server, None);
    assert_eq!(node.block_at(4_200_000).await.unwrap()["height"], json!(4200000));
    assert_eq!(node.transaction("0xdead").await.unwrap(), Value::Null);

    block.assert_async().await;
    tx.assert_async().await;
}

#[tokio::test]
async fn test_http_failure_is_status_error() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let err = api(&server, Some("wrong")).epoch().await.unwrap_err();

    assert_eq!(err.code(), Some(403));
    assert_eq!(err.to_record().message, "forbidden");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_non_envelope_reply_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"error": "not an rpc error object"}"#)
        .create_async()
        .await;

    let err = api(&server, None).syncing().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

macro_rules! check_rpc {
    ($server:expr, $method:expr, $params:expr, $call:expr) => {{
        let result = json!({"method": $method, "height": 4_200_000});
        let mock = rpc_mock(
            &mut $server,
            json!({"method": $method, "params": $params, "id": 1}),
            json!({"jsonrpc": "2.0", "id": 1, "result": result}),
        )
        .await;
        assert_eq!($call.await.unwrap(), result, "method {}", $method);
        mock.assert_async().await;
    }};
}

#[tokio::test]
async fn test_every_method_sends_its_envelope_and_returns_result() {
    let mut server = mockito::Server::new_async().await;
    let node = api(&server, None);
    let page = TransactionsArgs {
        token: Some("0x1f".into()),
        ..TransactionsArgs::new("0xabc", 10)
    };

    check_rpc!(server, "dna_identities", json!([]), node.identities());
    check_rpc!(server, "dna_identity", json!(["0xabc"]), node.identity("0xabc"));
    check_rpc!(server, "dna_epoch", json!([]), node.epoch());
    check_rpc!(server, "dna_ceremonyIntervals", json!([]), node.ceremony_intervals());
    check_rpc!(server, "dna_getBalance", json!(["0xabc"]), node.get_balance("0xabc"));
    check_rpc!(server, "dna_getCoinbaseAddr", json!([]), node.get_coinbase_addr());
    check_rpc!(server, "dna_version", json!([]), node.node_version());
    check_rpc!(
        server,
        "dna_sendTransaction",
        json!([{"type": 0, "from": "0xfrom", "amount": 1.5, "maxFee": 0.25}]),
        node.send_transaction(&SendTxArgs {
            tx_type: Some(0),
            from: "0xfrom".into(),
            amount: 1.5,
            max_fee: Some(0.25),
            ..Default::default()
        })
    );
    check_rpc!(
        server,
        "dna_sendInvite",
        json!([{"to": "0xto", "amount": 2.0}]),
        node.send_invite(&SendInviteArgs {
            to: Some("0xto".into()),
            amount: 2.0,
            ..Default::default()
        })
    );
    check_rpc!(
        server,
        "dna_activateInvite",
        json!([{"key": "invite-key", "to": "0xto"}]),
        node.activate_invite(&ActivateInviteArgs {
            key: "invite-key".into(),
            to: Some("0xto".into()),
            ..Default::default()
        })
    );
    check_rpc!(server, "dna_becomeOnline", json!([{}]), node.become_online(&BaseTxArgs::default()));
    check_rpc!(
        server,
        "dna_becomeOffline",
        json!([{"nonce": 7}]),
        node.become_offline(&BaseTxArgs {
            nonce: Some(7),
            ..Default::default()
        })
    );
    check_rpc!(server, "bcn_lastBlock", json!([]), node.last_block());
    check_rpc!(server, "bcn_blockAt", json!([4200000]), node.block_at(4_200_000));
    check_rpc!(server, "bcn_block", json!(["0xbeef"]), node.block("0xbeef"));
    check_rpc!(server, "bcn_transaction", json!(["0xdead"]), node.transaction("0xdead"));
    check_rpc!(
        server,
        "bcn_transactions",
        json!([{"address": "0xabc", "count": 10, "token": "0x1f"}]),
        node.transactions(&page)
    );
    check_rpc!(
        server,
        "bcn_pendingTransactions",
        json!([{"address": "0xabc", "count": 10, "token": "0x1f"}]),
        node.pending_transactions(&page)
    );
    check_rpc!(server, "bcn_syncing", json!([]), node.syncing());
    check_rpc!(server, "bcn_mempool", json!(["0xabc"]), node.mempool("0xabc"));
    check_rpc!(server, "net_peers", json!([]), node.peers());
    check_rpc!(server, "net_ipfsAddress", json!([]), node.ipfs_address());
    check_rpc!(
        server,
        "dna_getEpochs",
        json!([1, "x"]),
        node.call("dna_getEpochs", vec![json!(1), json!("x")])
    );
}
