//! Drives the stdio server loop with in-memory input and output.

use std::sync::Arc;

use meetup_server::handlers::Dispatcher;
use meetup_server::resolver::Resolver;
use meetup_server::server::MeetupServer;
use meetup_server::store::InMemoryStore;
use serde_json::Value;

async fn run_lines(input: &str) -> Vec<Value> {
    let dispatcher = Dispatcher::new(&Resolver::new(Arc::new(InMemoryStore::new())));
    let server = MeetupServer::new(dispatcher);

    let mut output = Vec::new();
    server
        .serve(tokio::io::BufReader::new(input.as_bytes()), &mut output)
        .await
        .unwrap();

    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn serves_create_and_list_in_order() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","id":1,"method":"mutation","params":{"field":"createMeetup","arguments":{"input":{"title":"Go Night","location":"Online"}}}}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":"two","method":"query","params":{"field":"meetups"}}"#,
        "\n",
    );

    let responses = run_lines(input).await;
    assert_eq!(responses.len(), 2);

    assert_eq!(responses[0]["id"], 1);
    let created = &responses[0]["result"]["data"]["createMeetup"];
    assert_eq!(created["title"], "Go Night");

    assert_eq!(responses[1]["id"], "two");
    assert_eq!(responses[1]["result"]["data"]["meetups"][0], *created);
}

#[tokio::test]
async fn parse_errors_do_not_stop_the_loop() {
    let input = concat!(
        "this is not json\n",
        "\n",
        r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#,
        "\n",
    );

    let responses = run_lines(input).await;
    assert_eq!(responses.len(), 2, "blank lines are skipped");
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert!(responses[0]["id"].is_null(), "unknown id is reported as null");
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"], serde_json::json!({}));
}

#[tokio::test]
async fn wrong_protocol_version_is_invalid_request() {
    let input = "{\"jsonrpc\":\"1.0\",\"id\":5,\"method\":\"ping\"}\n";

    let responses = run_lines(input).await;
    assert_eq!(responses[0]["id"], 5);
    assert_eq!(responses[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn notifications_produce_no_output() {
    let input = concat!(
        r#"{"jsonrpc":"2.0","method":"ping"}"#,
        "\n",
        r#"{"jsonrpc":"2.0","id":1,"method":"query","params":{"field":"meetups"}}"#,
    );

    let responses = run_lines(input).await;
    assert_eq!(responses.len(), 1, "final line without newline is still served");
    assert_eq!(responses[0]["result"]["data"]["meetups"], serde_json::json!([]));
}

#[tokio::test]
async fn oversized_line_is_rejected_and_skipped() {
    let mut input = format!("{{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"{}\"}}\n", "x".repeat(2 * 1024 * 1024));
    input.push_str(r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#);
    input.push('\n');

    let responses = run_lines(&input).await;
    assert_eq!(responses.len(), 2, "the tail of the long line must not be parsed");
    assert_eq!(responses[0]["error"]["code"], -32700);
    assert_eq!(responses[1]["id"], 2);
    assert_eq!(responses[1]["result"], serde_json::json!({}));
}

#[tokio::test]
async fn oversized_final_line_without_newline_ends_cleanly() {
    let input = "y".repeat(1024 * 1024 + 1);

    let responses = run_lines(&input).await;
    assert_eq!(responses.len(), 1);
    assert_eq!(responses[0]["error"]["code"], -32700);
}

#[tokio::test]
async fn null_id_gets_a_response() {
    let input = "{\"jsonrpc\":\"2.0\",\"id\":null,\"method\":\"ping\"}\n";

    let responses = run_lines(input).await;
    assert_eq!(responses.len(), 1);
    assert!(responses[0]["id"].is_null());
    assert_eq!(responses[0]["result"], serde_json::json!({}));
}
