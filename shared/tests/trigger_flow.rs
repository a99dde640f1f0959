// End-to-end trigger handling against the in-memory directory
// Run with: cargo test -p groups-shared --test trigger_flow

use groups_shared::{
    AssignError, CognitoTriggerEvent, DirectoryError, GroupAssigner, GroupAssignmentRequest,
    InMemoryDirectory, RuntimeConfig,
};
use serde_json::json;
use std::sync::Arc;

fn seeded_directory() -> Arc<InMemoryDirectory> {
    let directory = Arc::new(InMemoryDirectory::new());
    directory.add_user("pool1", "alice");
    directory.add_user("pool1", "bob");
    directory.add_user("pool2", "carol");
    directory.add_group("pool1", "hvgn-view");
    directory.add_group("pool2", "hvgn-view");
    directory
}

fn default_assigner(directory: &Arc<InMemoryDirectory>) -> GroupAssigner {
    let config = RuntimeConfig::from_group_name(None).unwrap();
    GroupAssigner::new(directory.clone(), config.group_name).unwrap()
}

#[tokio::test]
async fn test_repeat_trigger_is_idempotent() {
    let directory = seeded_directory();
    let assigner = default_assigner(&directory);
    let event = CognitoTriggerEvent::new("pool1", "alice");

    assigner.handle_trigger(event.clone()).await.unwrap();
    assigner.handle_trigger(event).await.unwrap();

    assert_eq!(
        directory.members("pool1", "hvgn-view"),
        Some(vec!["alice".to_string()])
    );
    assert_eq!(directory.requests().len(), 2);
}

#[tokio::test]
async fn test_group_name_never_comes_from_event() {
    let directory = seeded_directory();
    let assigner = default_assigner(&directory);

    let payloads = vec![
        json!({ "userPoolId": "pool1", "userName": "alice" }),
        json!({
            "userPoolId": "pool1",
            "userName": "bob",
            "groupName": "admins",
            "GroupName": "admins",
            "request": {
                "userAttributes": { "custom:group": "admins" },
                "groupName": "admins"
            }
        }),
        json!({
            "userPoolId": "pool2",
            "userName": "carol",
            "triggerSource": "PostConfirmation_ConfirmSignUp",
            "request": { "clientMetadata": { "group": "admins" } }
        }),
    ];

    for payload in payloads {
        let event: CognitoTriggerEvent = serde_json::from_value(payload).unwrap();
        assigner.handle_trigger(event).await.unwrap();
    }

    let requests = directory.requests();
    assert_eq!(requests.len(), 3);
    assert!(requests.iter().all(|r| r.group_name == "hvgn-view"));
}

#[tokio::test]
async fn test_directory_error_propagates_unchanged() {
    let directory = seeded_directory();
    let assigner = default_assigner(&directory);

    let err = assigner
        .handle_trigger(CognitoTriggerEvent::new("pool1", "mallory"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AssignError::Directory(DirectoryError::UserNotFound(_))
    ));

    let denied = DirectoryError::PermissionDenied("not allowed".to_string());
    directory.fail_with(denied.clone());
    let err = assigner
        .handle_trigger(CognitoTriggerEvent::new("pool1", "alice"))
        .await
        .unwrap_err();
    assert_eq!(err, AssignError::Directory(denied));
    assert_eq!(directory.requests().len(), 2);
}

#[tokio::test]
async fn test_missing_group_is_not_created() {
    let directory = seeded_directory();
    let assigner = GroupAssigner::new(directory.clone(), "admins").unwrap();

    let err = assigner
        .handle_trigger(CognitoTriggerEvent::new("pool1", "alice"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AssignError::Directory(DirectoryError::GroupNotFound(_))
    ));
    assert_eq!(directory.members("pool1", "admins"), None);
}

#[tokio::test]
async fn test_output_event_equals_input_event() {
    let directory = seeded_directory();
    let assigner = default_assigner(&directory);
    let payload = json!({
        "version": "1",
        "region": "us-east-1",
        "userPoolId": "pool1",
        "userName": "alice",
        "callerContext": { "awsSdkVersion": "aws-sdk-js-3", "clientId": "abc" },
        "triggerSource": "PostAuthentication_Authentication",
        "request": {
            "userAttributes": { "email": "a@x.com" },
            "newDeviceUsed": true
        },
        "response": {}
    });

    let event: CognitoTriggerEvent = serde_json::from_value(payload.clone()).unwrap();
    let output = assigner.handle_trigger(event).await.unwrap();

    assert_eq!(serde_json::to_value(&output).unwrap(), payload);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_triggers_do_not_interfere() {
    let directory = seeded_directory();
    let assigner = default_assigner(&directory);

    let alice = tokio::spawn({
        let assigner = assigner.clone();
        async move {
            assigner
                .handle_trigger(CognitoTriggerEvent::new("pool1", "alice"))
                .await
        }
    });
    let bob = tokio::spawn({
        let assigner = assigner.clone();
        async move {
            assigner
                .handle_trigger(CognitoTriggerEvent::new("pool1", "bob"))
                .await
        }
    });

    let (alice, bob) = tokio::join!(alice, bob);
    assert_eq!(alice.unwrap().unwrap().user_name, "alice");
    assert_eq!(bob.unwrap().unwrap().user_name, "bob");

    let mut requests = directory.requests();
    requests.sort_by(|a, b| a.username.cmp(&b.username));
    assert_eq!(
        requests,
        vec![
            GroupAssignmentRequest::new("hvgn-view", "pool1", "alice"),
            GroupAssignmentRequest::new("hvgn-view", "pool1", "bob"),
        ]
    );
    assert_eq!(
        directory.members("pool1", "hvgn-view"),
        Some(vec!["alice".to_string(), "bob".to_string()])
    );
}

#[tokio::test]
async fn test_non_string_attributes_still_assign_and_pass_through() {
    let directory = seeded_directory();
    let assigner = default_assigner(&directory);
    let payload = json!({
        "userPoolId": "pool1",
        "userName": "alice",
        "request": {
            "userAttributes": { "email_verified": true, "custom:logins": 3 },
            "clientMetadata": null
        },
        "response": null
    });

    let event: CognitoTriggerEvent = serde_json::from_value(payload.clone()).unwrap();
    let output = assigner.handle_trigger(event).await.unwrap();

    assert_eq!(serde_json::to_value(&output).unwrap(), payload);
    assert_eq!(
        directory.requests(),
        vec![GroupAssignmentRequest::new("hvgn-view", "pool1", "alice")]
    );
}
