//! Integration tests for the snailpay client against a mock server

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::task;
use snailpay::{
    ClientConfig, ListPayment, PaymentLinkParams, SnailClient, SnailError, SubscriptionLinkParams,
};

const API_KEY: &str = "sk_test_snail";

fn client_for(server: &ServerGuard) -> SnailClient {
    SnailClient::with_config(API_KEY, ClientConfig::new(server.url())).unwrap()
}

#[tokio::test]
async fn test_verify_payment_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/verify-payment")
        .match_query(Matcher::UrlEncoded("code".into(), "ABCDEFGHIJ".into()))
        .match_header("authorization", API_KEY)
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(
            json!({
                "created": 1000,
                "customer": "c1",
                "email": "a@b.com",
                "status": "paid",
                "amount": 500,
                "product": "p1",
                "subscription": false
            })
            .to_string(),
        )
        .create_async()
        .await;

    let payment = client_for(&server).verify_payment("ABCDEFGHIJ").await.unwrap();

    assert_eq!(payment.amount, 500);
    assert_eq!(payment.status, "paid");
    assert_eq!(payment.customer, "c1");
    assert_eq!(payment.created, 1000);
    assert!(!payment.subscription);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_payment_short_code_never_hits_network() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/verify-payment")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client_for(&server);
    for code in ["", "short", "ABCDEFGHIJK"] {
        let err = client.verify_payment(code).await.unwrap_err();
        assert!(matches!(err, SnailError::InvalidCode), "code {code:?}: {err}");
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_verify_payment_non_200_is_invalid_code_regardless_of_body() {
    let mut server = Server::new_async().await;
    for (status, body) in [
        (404, "code not found"),
        (500, "{\"created\":1,\"amount\":5}"),
        (401, ""),
    ] {
        let mock = server
            .mock("GET", "/verify-payment")
            .match_query(Matcher::Any)
            .with_status(status)
            .with_body(body)
            .create_async()
            .await;

        let err = client_for(&server)
            .verify_payment("ABCDEFGHIJ")
            .await
            .unwrap_err();
        assert!(err.is_invalid_code(), "status {status}: {err}");
        assert_eq!(err.to_string(), "The payment was invalid.");

        mock.remove_async().await;
    }
}

#[tokio::test]
async fn test_create_payment_link_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/payment-link")
        .match_header("authorization", API_KEY)
        .match_body(Matcher::Json(json!({
            "image": "https://img.example/shell.png",
            "name": "Shell",
            "price": 4.5
        })))
        .with_status(200)
        .with_body(r#"{"url":"https://snailpay.app/pay/abc"}"#)
        .create_async()
        .await;

    let params = PaymentLinkParams::new("Shell", "https://img.example/shell.png", 4.5);
    let link = client_for(&server).create_payment_link(&params).await.unwrap();

    assert_eq!(link.url, "https://snailpay.app/pay/abc");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_create_payment_link_failure_carries_server_text() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/payment-link")
        .with_status(400)
        .with_body("bad request")
        .create_async()
        .await;

    let params = PaymentLinkParams::new("Shell", "", 1.0);
    let err = client_for(&server)
        .create_payment_link(&params)
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "bad request");
    assert_eq!(err.status(), Some(400));
}

#[tokio::test]
async fn test_subscription_link_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/subscription-link")
        .match_body(Matcher::PartialJson(json!({"name": "Monthly snail", "price": 12.0})))
        .with_status(200)
        .with_body(r#"{"url":"https://snailpay.app/sub/xyz"}"#)
        .create_async()
        .await;

    let params = SubscriptionLinkParams::new("Monthly snail", "https://img.example/s.png", 12.0);
    let link = client_for(&server).subscription_link(&params).await.unwrap();

    assert_eq!(link.url, "https://snailpay.app/sub/xyz");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_payments_round_trip() {
    let expected = vec![
        ListPayment {
            amount: 500,
            customer: "c1".to_string(),
            email: "a@b.com".to_string(),
            id: "pay_1".to_string(),
            timestamp: 1_700_000_000,
            status: "paid".to_string(),
        },
        ListPayment {
            amount: 120,
            customer: "c2".to_string(),
            email: "c@d.com".to_string(),
            id: "pay_2".to_string(),
            timestamp: 1_700_000_100,
            status: "refunded".to_string(),
        },
    ];

    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/payment-list")
        .with_status(200)
        .with_body(serde_json::to_string(&expected).unwrap())
        .create_async()
        .await;

    let payments = client_for(&server).list_payments().await.unwrap();
    assert_eq!(payments, expected);
}

#[tokio::test]
async fn test_list_subscriptions_null_is_empty() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/subscription-list")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let subscriptions = client_for(&server).list_subscriptions().await.unwrap();
    assert!(subscriptions.is_empty());
}

#[tokio::test]
async fn test_list_link_urls() {
    let mut server = Server::new_async().await;
    let _payment_links = server
        .mock("GET", "/payment-link-list")
        .with_status(200)
        .with_body(r#"["https://snailpay.app/pay/a","https://snailpay.app/pay/b"]"#)
        .create_async()
        .await;
    let _subscription_links = server
        .mock("GET", "/subscription-link-list")
        .with_status(403)
        .with_body("forbidden")
        .create_async()
        .await;

    let client = client_for(&server);
    assert_eq!(
        client.list_payment_links().await.unwrap(),
        vec!["https://snailpay.app/pay/a", "https://snailpay.app/pay/b"]
    );

    let err = client.list_subscription_links().await.unwrap_err();
    assert!(matches!(err, SnailError::RemoteFailure { status: 403, .. }));
    assert_eq!(err.to_string(), "forbidden");
}

#[tokio::test]
async fn test_list_payouts() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/payout")
        .with_status(200)
        .with_body(
            json!({
                "PayoutList": [
                    {"date": 1_700_000_000, "amount": 2500, "arrival_date": 1_700_200_000, "status": "paid"}
                ],
                "Withdrawn": 25.0,
                "Balance": 10.5,
                "Pending": 3.0
            })
            .to_string(),
        )
        .create_async()
        .await;

    let payouts = client_for(&server).list_payouts().await.unwrap();

    assert_eq!(payouts.payout_list.len(), 1);
    assert_eq!(payouts.payout_list[0].amount, 2500);
    assert_eq!(payouts.payout_list[0].status, "paid");
    assert_eq!(payouts.withdrawn, 25.0);
    assert_eq!(payouts.balance, 10.5);
    assert_eq!(payouts.pending, 3.0);
}

#[tokio::test]
async fn test_malformed_success_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/payout")
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = client_for(&server).list_payouts().await.unwrap_err();
    assert!(matches!(err, SnailError::Decode(_)), "got {err}");
}

#[tokio::test]
async fn test_new_payout() {
    let mut server = Server::new_async().await;
    let ok = server
        .mock("POST", "/new-payout")
        .match_header("authorization", API_KEY)
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body("")
        .create_async()
        .await;

    client_for(&server).new_payout().await.unwrap();
    ok.assert_async().await;
    ok.remove_async().await;

    let _failing = server
        .mock("POST", "/new-payout")
        .with_status(402)
        .with_body("insufficient balance")
        .create_async()
        .await;

    let err = client_for(&server).new_payout().await.unwrap_err();
    assert_eq!(err.to_string(), "402 Payment Required");
}

#[tokio::test]
async fn test_refund_payments_success() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/refund-payment")
        .match_body(Matcher::Json(json!({"payments": ["p1", "p2"]})))
        .with_status(200)
        .with_body("not json, ignored")
        .create_async()
        .await;

    client_for(&server)
        .refund_payments(["p1", "p2"])
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_refund_payments_failure_uses_status_line() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/refund-payment")
        .with_status(500)
        .with_body("database exploded")
        .create_async()
        .await;

    let err = client_for(&server)
        .refund_payments(vec!["p1".to_string(), "p2".to_string()])
        .await
        .unwrap_err();

    assert!(matches!(err, SnailError::RemoteFailure { status: 500, .. }));
    assert_eq!(err.to_string(), "500 Internal Server Error");
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    // Nothing listens on port 1
    let client = SnailClient::with_config(API_KEY, ClientConfig::new("http://127.0.0.1:1")).unwrap();

    let err = client.list_payments().await.unwrap_err();
    assert!(matches!(err, SnailError::Transport(_)), "got {err}");

    let err = client.verify_payment("ABCDEFGHIJ").await.unwrap_err();
    assert!(matches!(err, SnailError::Transport(_)), "got {err}");

    let err = client.refund_payments(["p1"]).await.unwrap_err();
    assert!(matches!(err, SnailError::Transport(_)), "got {err}");
}

#[tokio::test]
async fn test_new_payout_failure_keeps_server_reason_phrase() {
    // mockito only sets canonical reason phrases, so answer by hand.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    task::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(b"HTTP/1.1 500 Ledger Locked\r\ncontent-length: 0\r\nconnection: close\r\n\r\n")
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client =
        SnailClient::with_config(API_KEY, ClientConfig::new(format!("http://{}", addr))).unwrap();
    let err = client.new_payout().await.unwrap_err();

    assert!(matches!(err, SnailError::RemoteFailure { status: 500, .. }));
    assert_eq!(err.to_string(), "500 Ledger Locked");
}

#[tokio::test]
async fn test_verify_payment_array_body_is_decode_error() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/verify-payment")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let err = client_for(&server)
        .verify_payment("ABCDEFGHIJ")
        .await
        .unwrap_err();
    assert!(matches!(err, SnailError::Decode(_)), "got {err}");
}
