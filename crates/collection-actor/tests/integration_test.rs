use async_trait::async_trait;
use collection_actor::{CollectionActor, CollectionEntity, FrameworkError, MAX_ID_ATTEMPTS};
use std::sync::{Arc, Mutex};

// --- Test Entities ---

#[derive(Clone, Debug, PartialEq)]
struct WorkCell {
    id: String,
    name: String,
    load: u32,
}

#[derive(Debug)]
struct WorkCellCreate {
    name: String,
}

#[derive(Debug)]
struct WorkCellUpdate {
    name: Option<String>,
    load: Option<u32>,
}

#[derive(Debug)]
enum WorkCellAction {
    AddLoad(u32),
}

#[derive(Debug, thiserror::Error)]
enum WorkCellError {
    #[error("Load {0} exceeds capacity")]
    Overloaded(u32),
    #[error("Name must not be empty")]
    EmptyName,
}

const CAPACITY: u32 = 100;

#[async_trait]
impl CollectionEntity for WorkCell {
    type Id = String;
    type Create = WorkCellCreate;
    type Update = WorkCellUpdate;
    type Action = WorkCellAction;
    type ActionResult = u32;
    type Context = ();
    type Error = WorkCellError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, params: WorkCellCreate, _: &()) -> Result<Self, WorkCellError> {
        if params.name.is_empty() {
            return Err(WorkCellError::EmptyName);
        }
        Ok(Self {
            id,
            name: params.name,
            load: 0,
        })
    }

    async fn on_update(&mut self, update: WorkCellUpdate, _: &()) -> Result<(), WorkCellError> {
        // Applied field by field so a late failure leaves a half-updated draft behind.
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(load) = update.load {
            if load > CAPACITY {
                return Err(WorkCellError::Overloaded(load));
            }
            self.load = load;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: WorkCellAction, _: &()) -> Result<u32, WorkCellError> {
        match action {
            WorkCellAction::AddLoad(extra) => {
                let load = self.load + extra;
                if load > CAPACITY {
                    return Err(WorkCellError::Overloaded(load));
                }
                self.load = load;
                Ok(load)
            }
        }
    }
}

#[derive(Clone, Debug)]
struct Note {
    id: String,
    text: String,
}

#[derive(Debug, thiserror::Error)]
#[error("note error")]
struct NoteError;

#[async_trait]
impl CollectionEntity for Note {
    type Id = String;
    type Create = String;
    type Update = ();
    type Action = ();
    type ActionResult = ();
    type Context = ();
    type Error = NoteError;

    const INSERT_AT_FRONT: bool = true;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, text: String, _: &()) -> Result<Self, NoteError> {
        Ok(Self { id, text })
    }

    async fn on_create(&mut self, _: &()) -> Result<(), NoteError> {
        if self.text.trim().is_empty() {
            return Err(NoteError);
        }
        Ok(())
    }

    async fn on_update(&mut self, _: (), _: &()) -> Result<(), NoteError> {
        Ok(())
    }

    async fn handle_action(&mut self, _: (), _: &()) -> Result<(), NoteError> {
        Ok(())
    }
}

fn sequential(prefix: &'static str) -> impl FnMut() -> String + Send + 'static {
    let mut n = 0;
    move || {
        n += 1;
        format!("{prefix}-{n}")
    }
}

// --- Tests ---

#[tokio::test]
async fn full_lifecycle() {
    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    tokio::spawn(actor.run(()));

    let id = client
        .create(WorkCellCreate {
            name: "Press line".into(),
        })
        .await
        .unwrap();
    assert_eq!(id, "WC-1");

    let load = client
        .perform_action(id.clone(), WorkCellAction::AddLoad(40))
        .await
        .unwrap();
    assert_eq!(load, 40);

    let updated = client
        .update(
            id.clone(),
            WorkCellUpdate {
                name: Some("Press line 2".into()),
                load: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Press line 2");
    assert_eq!(updated.load, 40);

    client.delete(id.clone()).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
}

#[tokio::test]
async fn list_keeps_creation_order_and_seeded_records() {
    let seed = vec![WorkCell {
        id: "WC-0".into(),
        name: "Seeded".into(),
        load: 5,
    }];
    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    tokio::spawn(actor.seeded(seed).run(()));

    for name in ["A", "B", "C"] {
        client
            .create(WorkCellCreate { name: name.into() })
            .await
            .unwrap();
    }

    let names: Vec<_> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["Seeded", "A", "B", "C"]);
}

#[tokio::test]
async fn front_insertion_lists_newest_first() {
    let (actor, client) = CollectionActor::<Note>::new(10, sequential("N"));
    tokio::spawn(actor.run(()));

    client.create("first".into()).await.unwrap();
    client.create("second".into()).await.unwrap();

    let texts: Vec<_> = client
        .list()
        .await
        .unwrap()
        .into_iter()
        .map(|n| n.text)
        .collect();
    assert_eq!(texts, ["second", "first"]);
}

#[tokio::test]
async fn on_create_failure_rejects_the_record() {
    let (actor, client) = CollectionActor::<Note>::new(10, sequential("N"));
    tokio::spawn(actor.run(()));

    assert!(client.create("  ".into()).await.is_err());
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn colliding_ids_are_regenerated() {
    let candidates = Arc::new(Mutex::new(vec!["WC-2", "WC-1", "WC-1"]));
    let source = candidates.clone();
    let (actor, client) = CollectionActor::<WorkCell>::new(10, move || {
        source
            .lock()
            .unwrap()
            .pop()
            .unwrap_or("WC-X")
            .to_string()
    });
    tokio::spawn(actor.run(()));

    let first = client
        .create(WorkCellCreate { name: "A".into() })
        .await
        .unwrap();
    let second = client
        .create(WorkCellCreate { name: "B".into() })
        .await
        .unwrap();

    assert_eq!(first, "WC-1");
    assert_eq!(second, "WC-2");
    assert!(candidates.lock().unwrap().is_empty());
}

#[tokio::test]
async fn exhausted_id_space_is_reported() {
    let (actor, client) = CollectionActor::<WorkCell>::new(10, || "WC-1".to_string());
    tokio::spawn(actor.run(()));

    client
        .create(WorkCellCreate { name: "A".into() })
        .await
        .unwrap();
    let result = client.create(WorkCellCreate { name: "B".into() }).await;

    assert!(matches!(
        result,
        Err(FrameworkError::IdSpaceExhausted(n)) if n == MAX_ID_ATTEMPTS
    ));
    assert_eq!(client.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_update_is_not_committed() {
    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    tokio::spawn(actor.run(()));

    let id = client
        .create(WorkCellCreate { name: "A".into() })
        .await
        .unwrap();

    let result = client
        .update(
            id.clone(),
            WorkCellUpdate {
                name: Some("Renamed".into()),
                load: Some(500),
            },
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));

    let stored = client.get(id.clone()).await.unwrap().unwrap();
    assert_eq!(stored.name, "A");

    let action = client
        .perform_action(id.clone(), WorkCellAction::AddLoad(101))
        .await;
    assert!(action.is_err());
    assert_eq!(client.get(id).await.unwrap().unwrap().load, 0);
}

#[tokio::test]
async fn rejected_create_does_not_store_anything() {
    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    tokio::spawn(actor.run(()));

    let result = client.create(WorkCellCreate { name: String::new() }).await;
    match result {
        Err(FrameworkError::EntityError(e)) => {
            assert_eq!(e.to_string(), "Name must not be empty")
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(client.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_ids_are_not_found() {
    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    tokio::spawn(actor.run(()));

    assert!(client.get("WC-9".into()).await.unwrap().is_none());
    assert!(matches!(
        client.delete("WC-9".into()).await,
        Err(FrameworkError::NotFound(id)) if id == "WC-9"
    ));
    assert!(matches!(
        client
            .update(
                "WC-9".into(),
                WorkCellUpdate {
                    name: None,
                    load: None
                }
            )
            .await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client
            .perform_action("WC-9".into(), WorkCellAction::AddLoad(1))
            .await,
        Err(FrameworkError::NotFound(_))
    ));
}

#[tokio::test]
async fn observers_see_every_successful_mutation() {
    let snapshots: Arc<Mutex<Vec<usize>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = snapshots.clone();

    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    let actor = actor.with_observer(move |items: &[WorkCell]| sink.lock().unwrap().push(items.len()));
    tokio::spawn(actor.run(()));

    let a = client
        .create(WorkCellCreate { name: "A".into() })
        .await
        .unwrap();
    client
        .create(WorkCellCreate { name: "B".into() })
        .await
        .unwrap();
    // Rejected: no notification.
    let _ = client
        .perform_action(a.clone(), WorkCellAction::AddLoad(1000))
        .await;
    client
        .perform_action(a.clone(), WorkCellAction::AddLoad(10))
        .await
        .unwrap();
    client.delete(a).await.unwrap();

    assert_eq!(*snapshots.lock().unwrap(), vec![1, 2, 2, 1]);
}

#[tokio::test]
async fn dropped_actor_reports_closed() {
    let (actor, client) = CollectionActor::<WorkCell>::new(10, sequential("WC"));
    drop(actor);

    let result = client.list().await;
    assert!(matches!(result, Err(FrameworkError::ActorClosed)));
}
