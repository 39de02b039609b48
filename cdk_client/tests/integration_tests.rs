//! Integration tests for the CDK client
//!
//! These drive a client through a recording transport the way a host shell
//! would: Init first, then service results, topic messages and command
//! responses.

use cdk_client::{
    CallbackHooks, CdkClient, CdkError, CdkHooks, CdkSender, ClientConfig, Dispatch, EventKind,
    NoopHooks, RecordingTransport, ServiceResult,
};
use serde_json::{json, Value};
use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Init(String),
    Service(String, String, Value),
    Message(String, Value),
    Cmd(String, Value),
}

/// Hook set that records every call it receives
#[derive(Clone, Default)]
struct RecordingHooks {
    calls: Rc<RefCell<Vec<Call>>>,
}

impl RecordingHooks {
    fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }
}

impl CdkHooks for RecordingHooks {
    fn on_init(&mut self, cdk: &mut dyn CdkSender) {
        self.calls
            .borrow_mut()
            .push(Call::Init(cdk.app_uid().to_string()));
    }

    fn on_service(&mut self, _cdk: &mut dyn CdkSender, name: &str, command: &str, result: &Value) {
        self.calls.borrow_mut().push(Call::Service(
            name.to_string(),
            command.to_string(),
            result.clone(),
        ));
    }

    fn on_message(&mut self, _cdk: &mut dyn CdkSender, topic: &str, content: &Value) {
        self.calls
            .borrow_mut()
            .push(Call::Message(topic.to_string(), content.clone()));
    }

    fn on_cmd(&mut self, _cdk: &mut dyn CdkSender, cmd: &str, resp: &Value) {
        self.calls
            .borrow_mut()
            .push(Call::Cmd(cmd.to_string(), resp.clone()));
    }
}

fn listening_client(
    config: ClientConfig,
) -> (CdkClient<RecordingTransport>, RecordingTransport, RecordingHooks) {
    let transport = RecordingTransport::new();
    let hooks = RecordingHooks::default();
    let mut client = CdkClient::with_config(transport.clone(), hooks.clone(), config);
    client.init().unwrap();
    (client, transport, hooks)
}

fn init(client: &mut CdkClient<RecordingTransport>, app_uid: &str) {
    let dispatch = client.process_message(&json!({
        "event": "Onion.CDK.Init",
        "content": {"appUid": app_uid}
    }));
    assert!(dispatch.is_delivered());
}

#[test]
fn test_init_assigns_uid_and_fires_once() {
    let (mut client, _transport, hooks) = listening_client(ClientConfig::default());
    assert_eq!(client.app_uid(), "");

    init(&mut client, "abc123");

    assert_eq!(client.app_uid(), "abc123");
    assert_eq!(hooks.calls(), vec![Call::Init("abc123".to_string())]);
}

#[test]
fn test_service_result_reaches_hook() {
    let (mut client, _transport, hooks) = listening_client(ClientConfig::default());

    client.process_message(&json!({
        "event": "Onion.CDK.Service",
        "content": {"name": "fs", "command": "list", "result": ["a", "b"]}
    }));

    assert_eq!(
        hooks.calls(),
        vec![Call::Service(
            "fs".to_string(),
            "list".to_string(),
            json!(["a", "b"])
        )]
    );
}

#[test]
fn test_topic_message_reaches_hook() {
    let (mut client, _transport, hooks) = listening_client(ClientConfig::default());

    client.process_message(&json!({
        "event": "Onion.CDK.Message",
        "content": {"topic": "clock", "content": "12:00"}
    }));

    assert_eq!(
        hooks.calls(),
        vec![Call::Message("clock".to_string(), json!("12:00"))]
    );
}

#[test]
fn test_command_response_reaches_hook() {
    let (mut client, _transport, hooks) = listening_client(ClientConfig::default());

    client.process_message(&json!({
        "event": "Onion.CDK.Command",
        "content": {"cmd": "wifi-scan", "resp": {"networks": 3}}
    }));

    assert_eq!(
        hooks.calls(),
        vec![Call::Cmd("wifi-scan".to_string(), json!({"networks": 3}))]
    );
}

#[test]
fn test_unrecognized_messages_fire_nothing() {
    let (mut client, transport, hooks) = listening_client(ClientConfig::default());

    let junk = [
        json!({"event": "Unknown.Type", "content": {"appUid": "x"}}),
        json!({"content": {"appUid": "x"}}),
        json!(null),
        json!("Onion.CDK.Init"),
        json!({"event": "Onion.CDK.Toast", "content": {"message": "echo"}}),
        json!({"event": "Onion.CDK.Subscribe", "content": {"topic": "clock"}}),
        json!({"event": "Onion.CDK.Message", "content": "not an object"}),
        json!({"event": "Onion.CDK.Service", "content": {"name": "fs"}}),
    ];
    for data in &junk {
        assert!(matches!(client.process_message(data), Dispatch::Ignored(_)));
    }

    assert!(hooks.calls().is_empty());
    assert_eq!(client.app_uid(), "");
    assert!(transport.posted().is_empty());
}

#[test]
fn test_messages_are_handled_in_order() {
    let (mut client, _transport, hooks) = listening_client(ClientConfig::default());

    init(&mut client, "uid");
    for minute in ["12:00", "12:01", "12:02"] {
        client.process_message(&json!({
            "event": "Onion.CDK.Message",
            "content": {"topic": "clock", "content": minute}
        }));
    }

    let topics: Vec<Value> = hooks
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            Call::Message(_, content) => Some(content),
            _ => None,
        })
        .collect();
    assert_eq!(topics, vec![json!("12:00"), json!("12:01"), json!("12:02")]);
}

#[test]
fn test_subscribe_posts_one_envelope() {
    let (mut client, transport, _hooks) = listening_client(ClientConfig::default());

    let event_id = client.subscribe("clock").unwrap();

    let envelopes = transport.envelopes();
    assert_eq!(envelopes.len(), 1);
    assert_eq!(envelopes[0].event, EventKind::Subscribe);
    assert_eq!(envelopes[0].content, json!({"topic": "clock"}));
    assert_eq!(envelopes[0].event_id, event_id);
    assert_eq!(transport.posted()[0].data["event"], "Onion.CDK.Subscribe");
}

#[test]
fn test_outbound_operations_payloads() {
    let (mut client, transport, _hooks) = listening_client(ClientConfig::default());

    client.service("fs", "list").unwrap();
    client.send_cmd("reboot", json!({"delay": 5})).unwrap();
    client.send_toast("Saved").unwrap();

    let posted: Vec<Value> = transport.posted().into_iter().map(|m| m.data).collect();
    assert_eq!(posted[0]["event"], "Onion.CDK.Service");
    assert_eq!(posted[0]["content"], json!({"service": "fs", "command": "list"}));
    assert_eq!(posted[1]["event"], "Onion.CDK.Command");
    assert_eq!(posted[1]["content"], json!({"cmd": "reboot", "params": {"delay": 5}}));
    assert_eq!(posted[2]["event"], "Onion.CDK.Toast");
    assert_eq!(posted[2]["content"], json!({"message": "Saved"}));
}

#[test]
fn test_instance_tracks_uid_at_call_time() {
    let (mut client, transport, _hooks) = listening_client(ClientConfig::default());

    client.send_toast("before").unwrap();
    init(&mut client, "abc123");
    client.send_toast("after").unwrap();

    let envelopes = transport.envelopes();
    assert_eq!(envelopes[0].instance, "");
    assert_eq!(envelopes[1].instance, "abc123");
}

#[test]
fn test_event_ids_are_fresh() {
    let (mut client, _transport, _hooks) = listening_client(ClientConfig::default());

    let mut seen = HashSet::new();
    for i in 0..200 {
        let id = client.send_event(EventKind::Toast, json!({"message": i})).unwrap();
        assert!(seen.insert(id), "event id reused");
    }
}

#[test]
fn test_publish_disabled_by_default() {
    let (mut client, transport, _hooks) = listening_client(ClientConfig::default());

    let err = client.publish("clock", json!("12:00")).unwrap_err();
    assert!(matches!(err, CdkError::PublishDisabled { ref topic } if topic == "clock"));
    assert!(transport.posted().is_empty());
}

#[test]
fn test_publish_when_enabled() {
    let (mut client, transport, _hooks) =
        listening_client(ClientConfig::default().with_publish(true));

    client.publish("clock", json!("12:00")).unwrap();

    let posted = transport.posted();
    assert_eq!(posted.len(), 1);
    assert_eq!(posted[0].data["event"], "Onion.CDK.Publish");
    assert_eq!(posted[0].data["content"], json!({"topic": "clock", "content": "12:00"}));
}

#[test]
fn test_service_callback_by_echoed_event_id() {
    let (mut client, _transport, hooks) = listening_client(ClientConfig::default());
    let results = Rc::new(RefCell::new(Vec::new()));

    let sink = results.clone();
    let event_id = client
        .service_with(
            "fs",
            "list",
            Box::new(move |result: &ServiceResult| sink.borrow_mut().push(result.result.clone())),
        )
        .unwrap();
    assert_eq!(client.pending_services(), 1);

    client.process_message(&json!({
        "event": "Onion.CDK.Service",
        "eventId": event_id.as_str(),
        "content": {"name": "fs", "command": "list", "result": ["a"]}
    }));

    assert_eq!(*results.borrow(), vec![json!(["a"])]);
    assert_eq!(client.pending_services(), 0);
    // Hooks still see the result
    assert_eq!(hooks.calls().len(), 1);

    // A second result for the same call has no callback left to run
    client.process_message(&json!({
        "event": "Onion.CDK.Service",
        "eventId": event_id.as_str(),
        "content": {"name": "fs", "command": "list", "result": ["b"]}
    }));
    assert_eq!(results.borrow().len(), 1);
    assert_eq!(hooks.calls().len(), 2);
}

#[test]
fn test_service_callback_by_name_and_command() {
    let (mut client, _transport, _hooks) = listening_client(ClientConfig::default());
    let order = Rc::new(RefCell::new(Vec::new()));

    for tag in ["first", "second"] {
        let order = order.clone();
        client
            .service_with(
                "net",
                "scan",
                Box::new(move |_: &ServiceResult| order.borrow_mut().push(tag)),
            )
            .unwrap();
    }

    let result = json!({
        "event": "Onion.CDK.Service",
        "eventId": "host-side-id",
        "content": {"name": "net", "command": "scan", "result": []}
    });
    client.process_message(&result);
    assert_eq!(*order.borrow(), vec!["first"]);

    client.process_message(&result);
    assert_eq!(*order.borrow(), vec!["first", "second"]);
}

#[test]
fn test_cancelled_service_callback_never_runs() {
    let (mut client, _transport, _hooks) = listening_client(ClientConfig::default());
    let ran = Rc::new(RefCell::new(false));

    let flag = ran.clone();
    let event_id = client
        .service_with(
            "fs",
            "list",
            Box::new(move |_: &ServiceResult| *flag.borrow_mut() = true),
        )
        .unwrap();
    assert!(client.cancel_service(&event_id));

    client.process_message(&json!({
        "event": "Onion.CDK.Service",
        "eventId": event_id.as_str(),
        "content": {"name": "fs", "command": "list", "result": null}
    }));
    assert!(!*ran.borrow());
}

#[test]
fn test_hooks_can_send_from_init() {
    let transport = RecordingTransport::new();
    let hooks = CallbackHooks::new().on_init(|cdk| {
        cdk.subscribe("clock").unwrap();
        cdk.send_toast("ready").unwrap();
    });
    let mut client = CdkClient::new(transport.clone(), hooks);
    client.init().unwrap();

    init(&mut client, "abc123");

    let envelopes = transport.envelopes();
    assert_eq!(envelopes.len(), 2);
    assert_eq!(envelopes[0].event, EventKind::Subscribe);
    assert_eq!(envelopes[0].instance, "abc123");
    assert_eq!(envelopes[1].event, EventKind::Toast);
}

#[test]
fn test_multiple_hook_sets_in_registration_order() {
    let transport = RecordingTransport::new();
    let order = Rc::new(RefCell::new(Vec::new()));

    let first = order.clone();
    let mut client = CdkClient::new(
        transport,
        CallbackHooks::new()
            .on_message(move |_, topic, _| first.borrow_mut().push(format!("a:{topic}"))),
    );
    let second = order.clone();
    let id = client.add_hooks(
        CallbackHooks::new()
            .on_message(move |_, topic, _| second.borrow_mut().push(format!("b:{topic}"))),
    );
    client.init().unwrap();

    let message = json!({"event": "Onion.CDK.Message", "content": {"topic": "t", "content": 1}});
    client.process_message(&message);
    assert_eq!(*order.borrow(), vec!["a:t", "b:t"]);

    assert!(client.remove_hooks(id));
    assert!(!client.remove_hooks(id));
    client.process_message(&message);
    assert_eq!(*order.borrow(), vec!["a:t", "b:t", "a:t"]);
}

#[test]
fn test_dispose_stops_traffic_both_ways() {
    let (mut client, transport, hooks) = listening_client(ClientConfig::default());
    client
        .service_with("fs", "list", Box::new(|_: &ServiceResult| {}))
        .unwrap();

    client.dispose().unwrap();

    assert_eq!(transport.detach_count(), 1);
    assert_eq!(client.pending_services(), 0);
    assert!(matches!(client.subscribe("clock"), Err(CdkError::Disposed)));

    let dispatch = client.process_message(&json!({
        "event": "Onion.CDK.Init",
        "content": {"appUid": "late"}
    }));
    assert!(!dispatch.is_delivered());
    assert!(hooks.calls().is_empty());
    assert_eq!(client.app_uid(), "");
}

#[test]
fn test_independent_clients_share_nothing() {
    let (mut a, transport_a, hooks_a) = listening_client(ClientConfig::default());
    let (mut b, transport_b, hooks_b) = listening_client(ClientConfig::default());

    init(&mut a, "app-a");
    b.send_toast("hello").unwrap();

    assert_eq!(a.app_uid(), "app-a");
    assert_eq!(b.app_uid(), "");
    assert_eq!(hooks_a.calls().len(), 1);
    assert!(hooks_b.calls().is_empty());
    assert!(transport_a.posted().is_empty());
    assert_eq!(transport_b.posted().len(), 1);
}

#[test]
#[should_panic(expected = "hook failure")]
fn test_hook_panics_propagate() {
    let mut client = CdkClient::new(
        RecordingTransport::new(),
        CallbackHooks::new().on_init(|_| panic!("hook failure")),
    );
    client.init().unwrap();
    init(&mut client, "abc123");
}

#[test]
fn test_noop_hooks_accept_everything() {
    let mut client = CdkClient::new(RecordingTransport::new(), NoopHooks);
    client.init().unwrap();
    init(&mut client, "abc123");
    let dispatch = client.process_message(&json!({
        "event": "Onion.CDK.Command",
        "content": {"cmd": "x"}
    }));
    assert!(dispatch.is_delivered());
}
