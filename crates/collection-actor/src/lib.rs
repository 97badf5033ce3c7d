//! # Collection Actor
//!
//! An actor-per-collection runtime. Each collection of records (production orders,
//! machines, materials, …) is owned by a single Tokio task that processes requests
//! sequentially, so the records need no lock and every caller sees mutations in the
//! order they were accepted.
//!
//! ## Layers
//!
//! 1. **Entity** ([`CollectionEntity`]): the record type, its create/update payloads,
//!    its actions and its error type.
//! 2. **Runtime** ([`CollectionActor`]): owns an ordered `Vec` of records, generates
//!    identifiers, runs the entity hooks and notifies [`ChangeObserver`]s.
//! 3. **Interface** ([`CollectionClient`]): a cloneable handle; typed wrappers implement
//!    [`ActorClient`] to get `get`/`list`/`delete` for free.
//!
//! ## Example
//!
//! ```rust
//! use collection_actor::{CollectionActor, CollectionEntity};
//! use async_trait::async_trait;
//! use std::sync::{Arc, Mutex};
//!
//! #[derive(Clone, Debug)]
//! struct Pallet { id: String, units: u32 }
//!
//! #[derive(Debug)] struct PalletCreate { units: u32 }
//! #[derive(Debug)] struct PalletUpdate { units: u32 }
//! #[derive(Debug)] enum PalletAction { Pick(u32) }
//!
//! #[derive(Debug, thiserror::Error)]
//! enum PalletError {
//!     #[error("not enough units")]
//!     Short,
//! }
//!
//! #[async_trait]
//! impl CollectionEntity for Pallet {
//!     type Id = String;
//!     type Create = PalletCreate;
//!     type Update = PalletUpdate;
//!     type Action = PalletAction;
//!     type ActionResult = u32;
//!     type Context = ();
//!     type Error = PalletError;
//!
//!     fn id(&self) -> &String { &self.id }
//!
//!     fn from_create(id: String, params: PalletCreate, _: &()) -> Result<Self, PalletError> {
//!         Ok(Self { id, units: params.units })
//!     }
//!
//!     async fn on_update(&mut self, update: PalletUpdate, _: &()) -> Result<(), PalletError> {
//!         self.units = update.units;
//!         Ok(())
//!     }
//!
//!     async fn handle_action(&mut self, action: PalletAction, _: &()) -> Result<u32, PalletError> {
//!         match action {
//!             PalletAction::Pick(n) if n <= self.units => { self.units -= n; Ok(self.units) }
//!             PalletAction::Pick(_) => Err(PalletError::Short),
//!         }
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut n = 0;
//!     let changes = Arc::new(Mutex::new(0));
//!     let seen = changes.clone();
//!
//!     let (actor, client) = CollectionActor::<Pallet>::new(8, move || { n += 1; format!("P-{n}") });
//!     let actor = actor.with_observer(move |_: &[Pallet]| *seen.lock().unwrap() += 1);
//!     tokio::spawn(actor.run(()));
//!
//!     let id = client.create(PalletCreate { units: 10 }).await.unwrap();
//!     assert_eq!(id, "P-1");
//!     assert_eq!(client.perform_action(id.clone(), PalletAction::Pick(4)).await.unwrap(), 6);
//!
//!     // A failed action leaves the record untouched.
//!     assert!(client.perform_action(id.clone(), PalletAction::Pick(40)).await.is_err());
//!     assert_eq!(client.get(id).await.unwrap().unwrap().units, 6);
//!     assert_eq!(*changes.lock().unwrap(), 2);
//! }
//! ```
//!
//! ## Context Injection
//!
//! Dependencies are handed to [`CollectionActor::run`] rather than to `new`, so every
//! actor of a system can be constructed first and wired afterwards.
//!
//! ## Testing
//!
//! The [`mock`] module provides a scripted [`mock::MockClient`] and raw-channel helpers
//! for testing code that sits on top of a client.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod observer;

pub use actor::{CollectionActor, MAX_ID_ATTEMPTS};
pub use client::CollectionClient;
pub use client_trait::ActorClient;
pub use entity::CollectionEntity;
pub use error::FrameworkError;
pub use message::{CollectionRequest, Response};
pub use observer::ChangeObserver;
