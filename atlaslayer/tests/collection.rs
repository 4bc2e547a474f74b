use atlaslayer::{memory::RecordingTransport, prelude::*};
use serde::Deserialize;
use serde_json::{Value, json};

struct Users;

impl CollectionBinding for Users {
    const DATA_SOURCE: &'static str = "ojeda";
    const DATABASE: &'static str = "app_name";
    const COLLECTION: &'static str = "users";
}

fn setup() -> (DataApi<RecordingTransport>, RecordingTransport) {
    let transport = RecordingTransport::new();
    (DataApi::new(transport.clone()), transport)
}

fn doc(value: Value) -> Document {
    into_document(value)
}

fn people(n: usize) -> Vec<Document> {
    (0..n)
        .map(|i| doc(json!({ "name": format!("user-{i}"), "seq": i })))
        .collect()
}

#[tokio::test]
async fn insert_posts_document_with_context_and_returns_inserted_id() {
    let (api, transport) = setup();
    transport
        .respond(Action::InsertOne, Ok(json!({ "insertedId": "65f1c0ffee0000000000beef" })))
        .await;

    let result = api
        .bind::<Users>()
        .insert(doc(json!({ "name": "John", "email": "user@test.com" })))
        .await;

    assert_eq!(result, Response::Value(json!({ "insertedId": "65f1c0ffee0000000000beef" })));

    let calls = transport.calls().await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].action, Action::InsertOne);
    assert_eq!(
        calls[0].body,
        json!({
            "dataSource": "ojeda",
            "database": "app_name",
            "collection": "users",
            "document": { "name": "John", "email": "user@test.com" },
        }),
    );
}

#[tokio::test]
async fn select_posts_find_with_listing_defaults_and_unwraps_documents() {
    let (api, transport) = setup();
    transport
        .respond(Action::Find, Ok(json!({ "documents": [{ "name": "John", "email": "user@test.com" }] })))
        .await;

    let result = api
        .bind::<Users>()
        .select(doc(json!({ "name": "John" })), ListOptions::default().limit(10))
        .await;

    assert_eq!(result, Response::Documents(vec![json!({ "name": "John", "email": "user@test.com" })]));

    let calls = transport.calls_to(Action::Find).await;
    assert_eq!(
        calls[0].body,
        json!({
            "dataSource": "ojeda",
            "database": "app_name",
            "collection": "users",
            "filter": { "name": "John" },
            "limit": 10,
            "sort": { "_id": 1 },
            "skip": 0,
            "projection": {},
        }),
    );
}

#[tokio::test]
async fn all_lists_with_empty_filter_limit_100_sorted_by_id() {
    let (api, transport) = setup();

    let result = api.bind::<Users>().all(ListOptions::default()).await;

    assert_eq!(result, Response::Documents(vec![]));

    let body = &transport.calls().await[0].body;
    assert_eq!(body["filter"], json!({}));
    assert_eq!(body["limit"], json!(100));
    assert_eq!(body["sort"], json!({ "_id": 1 }));
}

#[tokio::test]
async fn insert_all_chunks_2500_documents_into_three_ordered_calls() {
    let (api, transport) = setup();

    let result = api.bind::<Users>().insert_all(people(2500)).await;

    let calls = transport.calls().await;
    let sizes = calls
        .iter()
        .map(|call| call.body["documents"].as_array().unwrap().len())
        .collect::<Vec<_>>();
    assert_eq!(sizes, vec![1000, 1000, 500]);
    assert!(calls.iter().all(|call| call.action == Action::InsertMany));
    assert_eq!(calls[0].body["documents"][0]["seq"], json!(0));
    assert_eq!(calls[1].body["documents"][0]["seq"], json!(1000));
    assert_eq!(calls[2].body["documents"][0]["seq"], json!(2000));
    assert_eq!(calls[2].body["documents"][499]["seq"], json!(2499));
    assert_eq!(calls[2].body["collection"], json!("users"));

    match result {
        Response::Batch(chunks) => {
            assert_eq!(chunks.len(), 3);
            let acknowledged = chunks
                .iter()
                .map(|chunk| chunk.clone().into_value()["insertedIds"].as_array().unwrap().len())
                .collect::<Vec<_>>();
            assert_eq!(acknowledged, vec![1000, 1000, 500]);
        }
        other => panic!("expected a batch, got {other:?}"),
    }
}

#[tokio::test]
async fn insert_all_of_nothing_issues_no_calls() {
    let (api, transport) = setup();

    assert_eq!(api.bind::<Users>().insert_all(vec![]).await, Response::Batch(vec![]));
    assert!(transport.calls().await.is_empty());
}

#[tokio::test]
async fn insert_all_reports_partial_failure_per_chunk() {
    let (api, transport) = setup();
    transport.respond(Action::InsertMany, Ok(json!({ "insertedIds": ["a"] }))).await;
    transport
        .respond(
            Action::InsertMany,
            Err(TransportError::Status { status: 400, payload: json!({ "error": "duplicate key" }) }),
        )
        .await;
    transport.respond(Action::InsertMany, Ok(json!({ "insertedIds": ["c"] }))).await;

    let result = api.bind::<Users>().insert_all(people(2001)).await;

    assert_eq!(transport.calls().await.len(), 3);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!([
            { "insertedIds": ["a"] },
            { "code": 400, "error": { "error": "duplicate key" } },
            { "insertedIds": ["c"] },
        ]),
    );
    assert_eq!(result.failures().len(), 1);
}

#[tokio::test]
async fn destroy_by_id_posts_delete_one_and_returns_deleted_count() {
    let (api, transport) = setup();
    transport.respond(Action::DeleteOne, Ok(json!({ "deletedCount": 1 }))).await;

    let result = api.bind::<Users>().destroy(Filter::by_id("abc123")).await;

    assert_eq!(result, Response::Value(json!({ "deletedCount": 1 })));
    assert_eq!(
        transport.calls_to(Action::DeleteOne).await[0].body["filter"],
        json!({ "_id": { "$oid": "abc123" } }),
    );
}

#[tokio::test]
async fn destroy_failure_is_returned_as_code_and_error() {
    let (api, transport) = setup();
    transport
        .respond(
            Action::DeleteOne,
            Err(TransportError::Status { status: 401, payload: json!({ "error": "invalid session" }) }),
        )
        .await;

    let result = api.bind::<Users>().destroy(Filter::by_id("abc123")).await;

    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({ "code": 401, "error": { "error": "invalid session" } }),
    );
}

#[tokio::test]
async fn connection_faults_are_failures_without_status() {
    let (api, transport) = setup();
    transport
        .respond(Action::Find, Err(TransportError::Connection("connection refused".into())))
        .await;

    let result = api.bind::<Users>().all(ListOptions::default()).await;

    assert_eq!(
        result.failure(),
        Some(&Failure::new(None, json!("Connection error: connection refused"))),
    );
}

#[tokio::test]
async fn filters_pass_through_unmodified() {
    let (api, transport) = setup();
    let users = api.bind::<Users>();
    let filter = doc(json!({ "age": { "$gte": 21 }, "$or": [{ "name": "John" }, { "name": "Jane" }] }));

    users.select(filter.clone(), ListOptions::default()).await;
    users.destroy(filter.clone()).await;
    users.destroy_all(filter.clone()).await;
    users.update(filter.clone(), doc(json!({ "active": false }))).await;
    users.update_all(filter.clone(), doc(json!({ "active": false }))).await;

    let calls = transport.calls().await;
    assert_eq!(
        calls.iter().map(|call| call.action).collect::<Vec<_>>(),
        vec![Action::Find, Action::DeleteOne, Action::DeleteMany, Action::UpdateOne, Action::UpdateMany],
    );
    assert!(calls.iter().all(|call| call.body["filter"] == Value::Object(filter.clone())));
}

#[tokio::test]
async fn update_wraps_set_fields_and_never_sends_them_raw() {
    let (api, transport) = setup();
    let users = api.bind::<Users>();

    users
        .update(Filter::by_id("abc123"), doc(json!({ "name": "John Doe" })))
        .await;
    users
        .update_all(doc(json!({ "name": "John" })), doc(json!({ "text": "hello" })))
        .await;

    let calls = transport.calls().await;
    assert_eq!(calls[0].body["update"], json!({ "$set": { "name": "John Doe" } }));
    assert_eq!(calls[0].body["upsert"], json!(false));
    assert_eq!(calls[1].body["update"], json!({ "$set": { "text": "hello" } }));
    assert!(calls.iter().all(|call| call.body.get("set").is_none()));
}

#[tokio::test]
async fn upsert_sets_the_upsert_flag() {
    let (api, transport) = setup();

    let result = api
        .bind::<Users>()
        .upsert(doc(json!({ "email": "user@test.com" })), doc(json!({ "name": "John" })))
        .await;

    let body = &transport.calls_to(Action::UpdateOne).await[0].body;
    assert_eq!(body["upsert"], json!(true));
    assert_eq!(body["update"], json!({ "$set": { "name": "John" } }));
    assert!(result.into_value().get("upsertedId").is_some());
}

#[tokio::test]
async fn replace_sends_the_replacement_document() {
    let (api, transport) = setup();

    api.bind::<Users>()
        .replace(Filter::by_id("abc123"), doc(json!({ "name": "John Doe", "email": "john@test.com" })))
        .await;

    let body = &transport.calls_to(Action::ReplaceOne).await[0].body;
    assert_eq!(body["replacement"], json!({ "name": "John Doe", "email": "john@test.com" }));
    assert_eq!(body["upsert"], json!(false));
}

#[tokio::test]
async fn find_by_id_returns_the_document_envelope() {
    let (api, transport) = setup();
    transport
        .respond(Action::FindOne, Ok(json!({ "document": { "_id": "abc123", "name": "John" } })))
        .await;

    let result = api.bind::<Users>().find_by_id("abc123").await;

    assert_eq!(result, Response::Value(json!({ "document": { "_id": "abc123", "name": "John" } })));
    assert_eq!(
        transport.calls().await[0].body,
        json!({
            "dataSource": "ojeda",
            "database": "app_name",
            "collection": "users",
            "filter": { "_id": { "$oid": "abc123" } },
            "projection": {},
        }),
    );
}

#[tokio::test]
async fn size_counts_through_an_aggregate_pipeline() {
    let (api, transport) = setup();
    transport
        .respond(Action::Aggregate, Ok(json!({ "documents": [{ "count": 7 }] })))
        .await;

    let users = api.bind::<Users>();
    assert_eq!(users.size().await, Response::Value(json!({ "count": 7 })));
    assert_eq!(users.size().await, Response::Value(json!({ "count": 0 })));

    assert_eq!(
        transport.calls().await[0].body["pipeline"],
        json!([{ "$match": {} }, { "$count": "count" }]),
    );
}

#[tokio::test]
async fn ad_hoc_contexts_and_typed_results() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct User {
        name: String,
        email: String,
    }

    let (api, transport) = setup();
    transport
        .respond(Action::Find, Ok(json!({ "documents": [{ "name": "Jane", "email": "jane@test.com" }] })))
        .await;

    let archive = api.collection(TargetContext::new("cluster1", "archive", "people"));
    assert_eq!(archive.name(), "people");

    let users: Vec<User> = archive
        .all(ListOptions::default())
        .await
        .deserialize()
        .unwrap();

    assert_eq!(users, vec![User { name: "Jane".into(), email: "jane@test.com".into() }]);
    assert_eq!(transport.calls().await[0].body["dataSource"], json!("cluster1"));
}

#[tokio::test]
async fn boxed_transports_are_transports() {
    let transport = RecordingTransport::new();
    let api: DataApi<Box<dyn Transport>> = DataApi::new(Box::new(transport.clone()));

    api.bind::<Users>().destroy_all(Filter::all()).await;

    assert_eq!(transport.calls_to(Action::DeleteMany).await[0].body["filter"], json!({}));
}
