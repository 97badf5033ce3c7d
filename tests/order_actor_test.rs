use chrono::NaiveDate;
use collection_actor::ActorClient;
use factory_floor::clock::Clock;
use factory_floor::model::{OrderCreate, OrderStatus, ProductionOrder};
use factory_floor::storage::{fixture, Collection};

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, d).unwrap()
}

fn clock() -> Clock {
    Clock::fixed(day(10, 28))
}

fn new_order(reference: &str) -> OrderCreate {
    OrderCreate {
        product_name: "Capot Inox".into(),
        reference: reference.into(),
        quantity_planned: 400,
        start_date: day(11, 6),
        due_date: day(11, 10),
        assigned_machine_ids: vec!["M-01".into()],
        assigned_operator_ids: vec![],
    }
}

/// Real order actor seeded with the fixture orders: production drives progress and status.
#[tokio::test]
async fn test_produced_quantity_drives_status() {
    let orders: Vec<ProductionOrder> = fixture(Collection::Orders).unwrap();
    let (actor, client) = factory_floor::order_actor::new(8, orders, clock());
    let handle = tokio::spawn(actor.run(()));

    // OP-2023-002: 1200 planned, still planned.
    let order = client
        .update_produced_quantity("OP-2023-002".into(), 300)
        .await
        .unwrap();
    assert_eq!(order.progress, 25);
    assert_eq!(order.status, OrderStatus::InProgress);

    let order = client
        .update_produced_quantity("OP-2023-002".into(), 1500)
        .await
        .unwrap();
    assert_eq!(order.progress, 100);
    assert_eq!(order.status, OrderStatus::Completed);
    assert_eq!(order.quantity_produced, 1500);

    // Negative quantities are clamped; a delayed order keeps its status.
    let order = client
        .update_produced_quantity("OP-2023-004".into(), -20)
        .await
        .unwrap();
    assert_eq!(order.quantity_produced, 0);
    assert_eq!(order.progress, 0);
    assert_eq!(order.status, OrderStatus::Delayed);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_status_changes_fill_progress() {
    let orders: Vec<ProductionOrder> = fixture(Collection::Orders).unwrap();
    let (actor, client) = factory_floor::order_actor::new(8, orders, clock());
    let handle = tokio::spawn(actor.run(()));

    let order = client
        .update_status("OP-2023-002".into(), OrderStatus::InProgress)
        .await
        .unwrap();
    assert_eq!(order.progress, 1);

    let order = client
        .update_status("OP-2023-001".into(), OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(order.progress, 100);
    assert_eq!(order.quantity_produced, 5000);

    let order = client
        .update_status("OP-2023-004".into(), OrderStatus::Planned)
        .await
        .unwrap();
    assert_eq!((order.status, order.progress), (OrderStatus::Planned, 22));

    drop(client);
    handle.await.unwrap();
}

/// Generated identifiers skip the ones already taken.
#[tokio::test]
async fn test_order_ids_are_unique_after_a_collision() {
    let mut orders: Vec<ProductionOrder> = fixture(Collection::Orders).unwrap();
    orders.truncate(2);
    // Two orders, but numbering already reached 3.
    orders[1].id = "OP-2023-003".into();

    let (actor, client) = factory_floor::order_actor::new(8, orders, clock());
    let handle = tokio::spawn(actor.run(()));

    let first = client.add_order(new_order("REF-CI-01")).await.unwrap();
    let second = client.add_order(new_order("REF-CI-02")).await.unwrap();
    assert_eq!(first, "OP-2023-004");
    assert_eq!(second, "OP-2023-005");

    let created = client.get(first).await.unwrap().unwrap();
    assert_eq!(created.status, OrderStatus::Planned);
    assert_eq!((created.progress, created.quantity_produced), (0, 0));
    assert_eq!(client.list().await.unwrap().len(), 4);

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_schedule_replaces_machines_and_dates() {
    let orders: Vec<ProductionOrder> = fixture(Collection::Orders).unwrap();
    let (actor, client) = factory_floor::order_actor::new(8, orders, clock());
    let handle = tokio::spawn(actor.run(()));

    let order = client
        .schedule("OP-2023-002".into(), "M-03".into(), day(11, 3), day(11, 8))
        .await
        .unwrap();
    assert_eq!(order.assigned_machine_ids, ["M-03"]);
    assert_eq!((order.start_date, order.due_date), (day(11, 3), day(11, 8)));

    drop(client);
    handle.await.unwrap();
}
