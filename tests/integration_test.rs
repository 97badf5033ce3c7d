use chrono::NaiveDate;
use collection_actor::ActorClient;
use factory_floor::analysis::{analyze, GeminiSummarizer, ERROR_MESSAGE};
use factory_floor::clock::Clock;
use factory_floor::config::AiConfig;
use factory_floor::lifecycle::PlantSystem;
use factory_floor::metrics::MetricsService;
use factory_floor::model::{
    Machine, MachineCreate, MachineStatus, MaintenanceRecord, MaintenanceType, OrderStatus, QualityReport,
    QualityReportCreate, StepCreate, TraceabilityEventCreate, TraceabilityKind,
};
use factory_floor::planning::{layout, Granularity};
use factory_floor::storage::{Collection, JsonStore};
use std::collections::BTreeMap;

fn day(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, m, d).unwrap()
}

fn clock() -> Clock {
    Clock::fixed(day(10, 28))
}

/// End-to-end run over the fixture plant with every actor live.
#[tokio::test]
async fn test_full_plant_integration() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let system = PlantSystem::start(store.clone(), clock(), 16);
    let metrics = MetricsService::new(system.clients.clone(), system.revision(), clock());

    let before = metrics.metrics().await.expect("Failed to compute metrics");
    assert_eq!(before.oee.global, 38);

    // Repair the broken CNC and log the intervention.
    system
        .clients
        .machines
        .set_status("M-02".into(), MachineStatus::Running)
        .await
        .expect("Failed to set status");
    let machine = system
        .clients
        .machines
        .log_maintenance(
            "M-02".into(),
            MaintenanceRecord {
                date: day(10, 28),
                kind: MaintenanceType::Corrective,
                description: "Remplacement broche".into(),
                technician: "Paul Martin".into(),
            },
        )
        .await
        .expect("Failed to log maintenance");
    assert_eq!(machine.maintenance_log.len(), 3);
    // Entry ids are scoped to the machine: ML-03 is taken.
    assert_eq!(machine.maintenance_log[2].id, "ML-04");
    assert_eq!(machine.last_maintenance, day(10, 28));

    // Metrics see both mutations.
    let after = metrics.metrics().await.expect("Failed to compute metrics");
    assert_eq!(after.oee.availability, 75);
    assert_eq!(after.maintenance.incidents_count, 0);
    assert_eq!(after.maintenance.mttr, 9.5);

    // Quality reports go to the front.
    let report_id = system
        .clients
        .quality
        .add_report(QualityReportCreate {
            order_id: "OP-2023-001".into(),
            checked_quantity: 80,
            rejected_quantity: 4,
            defect_reason: Some("Dimensions".into()),
            inspector: "Marie Curie".into(),
        })
        .await
        .expect("Failed to add report");
    let reports = system.clients.quality.list().await.unwrap();
    assert_eq!(reports[0].id, report_id);
    assert_eq!(reports[0].date, day(10, 28));

    let after = metrics.metrics().await.unwrap();
    assert_eq!(after.quality.top_defects[0].count, 19);

    // Process routing and traceability.
    let step = system
        .clients
        .processes
        .add_step(
            "PROC-001".into(),
            StepCreate {
                name: "Ebavurage".into(),
                machine_type: "Manuel".into(),
                standard_time: 4.0,
                instructions: "Lime fine".into(),
            },
        )
        .await
        .expect("Failed to add step");
    let process = system.clients.processes.get("PROC-001".into()).await.unwrap().unwrap();
    assert_eq!(step.order as usize, process.steps.len());

    system
        .clients
        .traceability
        .record_event(TraceabilityEventCreate {
            order_id: "OP-2023-001".into(),
            timestamp: None,
            kind: TraceabilityKind::Quality,
            description: "Contrôle final".into(),
            actor: "Marie Curie".into(),
            details: BTreeMap::from([("Report".to_string(), report_id.clone())]),
        })
        .await
        .expect("Failed to record event");
    let history = system
        .clients
        .traceability
        .events_for_order("OP-2023-001")
        .await
        .unwrap();
    assert!(history.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));
    assert_eq!(history.last().unwrap().description, "Contrôle final");

    // Every collection was mirrored to disk.
    let stored: Vec<QualityReport> = store.read(Collection::Quality).unwrap().unwrap();
    assert_eq!(stored[0].id, report_id);

    drop(metrics);
    system.shutdown().await.expect("Failed to shutdown system");
}

/// Deleting a machine leaves the orders that reference it untouched.
#[tokio::test]
async fn test_machine_delete_does_not_cascade() {
    let dir = tempfile::tempdir().unwrap();
    let system = PlantSystem::start(JsonStore::new(dir.path()), clock(), 8);

    system.clients.machines.delete("M-02".into()).await.unwrap();

    assert!(system.clients.machines.get("M-02".into()).await.unwrap().is_none());
    let order = system
        .clients
        .orders
        .get("OP-2023-003".into())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(order.assigned_machine_ids, ["M-02"]);
    assert_eq!(order.status, OrderStatus::Completed);

    system.shutdown().await.unwrap();
}

/// A corrupt collection file is replaced by the fixtures; the others load from disk.
#[tokio::test]
async fn test_corrupt_file_falls_back_to_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let mut machines: Vec<Machine> = factory_floor::storage::fixture(Collection::Machines).unwrap();
    machines.truncate(1);
    store.save(Collection::Machines, &machines).unwrap();
    std::fs::write(store.path(Collection::Orders), "[{\"id\": 12").unwrap();

    let system = PlantSystem::start(store, clock(), 8);
    let snapshot = system.snapshot().await.unwrap();
    assert_eq!(snapshot.machines.len(), 1);
    assert_eq!(snapshot.orders.len(), 4);

    system.shutdown().await.unwrap();
}

/// Restarting the plant on the same directory picks up earlier mutations.
#[tokio::test]
async fn test_mutations_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    let system = PlantSystem::start(JsonStore::new(dir.path()), clock(), 8);
    system
        .clients
        .materials
        .adjust_stock("MAT-01".into(), 100.0)
        .await
        .unwrap();
    system.shutdown().await.unwrap();

    let system = PlantSystem::start(JsonStore::new(dir.path()), clock(), 8);
    let low = system.clients.materials.low_stock().await.unwrap();
    assert!(low.is_empty());
    system.shutdown().await.unwrap();
}

/// After deletions leave a gap, new identifiers continue past the highest one in use.
#[tokio::test]
async fn test_ids_continue_after_the_highest_stored_id() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    // 130 machines were created, the first 65 deleted.
    let template: Machine = factory_floor::storage::fixture::<Machine>(Collection::Machines)
        .unwrap()
        .remove(0);
    let machines: Vec<Machine> = (66..=130)
        .map(|n| Machine {
            id: format!("M-{n:02}"),
            ..template.clone()
        })
        .collect();
    store.save(Collection::Machines, &machines).unwrap();

    let system = PlantSystem::start(store, clock(), 8);
    let id = system
        .clients
        .machines
        .add_machine(MachineCreate {
            name: "Presse 200T".into(),
            reference: "PR-200".into(),
            machine_type: "Presse".into(),
            function: "Emboutissage".into(),
            capacity: "200 T".into(),
            purchase_cost: 90000.0,
            status: MachineStatus::Idle,
        })
        .await
        .expect("Failed to add machine");
    assert_eq!(id, "M-131");
    assert_eq!(system.clients.machines.list().await.unwrap().len(), 66);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_timeline_over_live_orders() {
    let dir = tempfile::tempdir().unwrap();
    let system = PlantSystem::start(JsonStore::new(dir.path()), clock(), 8);
    let orders = system.clients.orders.list().await.unwrap();

    let october = layout(&orders, day(10, 1), day(10, 1), "");
    assert_eq!(october.granularity, Granularity::Day);
    assert_eq!(october.columns.len(), 31);

    let quarter = layout(&orders, day(9, 1), day(11, 1), "");
    assert_eq!(quarter.granularity, Granularity::Week);

    let year = layout(&orders, day(1, 1), day(12, 1), "");
    assert_eq!(year.granularity, Granularity::Month);
    assert_eq!(year.rows.len(), 4);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_analysis_falls_back_when_the_model_is_unreachable() {
    let summarizer = GeminiSummarizer::new(AiConfig {
        api_key: Some("test-key".into()),
        endpoint: "http://127.0.0.1:9".into(),
        timeout_secs: 2,
        ..AiConfig::default()
    })
    .unwrap();

    let html = analyze(&summarizer, &[], &[], &[]).await;
    assert_eq!(html, ERROR_MESSAGE);
}
