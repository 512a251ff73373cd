use async_trait::async_trait;
use resource_actor::{ActorEntity, FrameworkError, ResourceActor};

#[derive(Clone, Debug, PartialEq)]
struct Shelf {
    id: u32,
    label: String,
    units: u32,
}

#[derive(Debug)]
struct ShelfCreate {
    label: String,
    units: u32,
}

#[derive(Debug)]
struct ShelfUpdate {
    label: Option<String>,
}

#[derive(Debug)]
enum ShelfAction {
    Take(u32),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum ShelfError {
    #[error("only {available} units left")]
    Empty { available: u32 },
    #[error("label must not be blank")]
    BlankLabel,
}

#[async_trait]
impl ActorEntity for Shelf {
    type Id = u32;
    type Create = ShelfCreate;
    type Update = ShelfUpdate;
    type Action = ShelfAction;
    type ActionResult = u32;
    type Context = ();
    type Error = ShelfError;

    fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, ShelfError> {
        if params.label.trim().is_empty() {
            return Err(ShelfError::BlankLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            units: params.units,
        })
    }

    async fn on_update(&mut self, update: ShelfUpdate, _: &()) -> Result<(), ShelfError> {
        if let Some(label) = update.label {
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: ShelfAction, _: &()) -> Result<u32, ShelfError> {
        match action {
            ShelfAction::Take(n) => {
                if n > self.units {
                    return Err(ShelfError::Empty {
                        available: self.units,
                    });
                }
                self.units -= n;
                Ok(self.units)
            }
        }
    }
}

#[tokio::test]
async fn full_lifecycle_with_typed_errors() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    let handle = tokio::spawn(actor.run(()));

    let id = client
        .create(ShelfCreate {
            label: "iPhone 15".into(),
            units: 3,
        })
        .await
        .unwrap();
    assert_eq!(id, 1);

    let left = client.perform_action(id, ShelfAction::Take(2)).await.unwrap();
    assert_eq!(left, 1);

    let err = client
        .perform_action(id, ShelfAction::Take(5))
        .await
        .unwrap_err();
    assert_eq!(
        err.downcast_entity::<ShelfError>().unwrap(),
        ShelfError::Empty { available: 1 }
    );

    let updated = client
        .update(
            id,
            ShelfUpdate {
                label: Some("iPhone 15 Pro".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "iPhone 15 Pro");
    assert_eq!(updated.units, 1);

    client.delete(id).await.unwrap();
    assert!(client.get(id).await.unwrap().is_none());
    assert!(matches!(
        client.delete(id).await,
        Err(FrameworkError::NotFound(_))
    ));

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn failed_create_stores_nothing_and_list_is_ordered() {
    let (actor, client) = ResourceActor::<Shelf>::new(10);
    tokio::spawn(actor.run(()));

    let err = client
        .create(ShelfCreate {
            label: "  ".into(),
            units: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(err.downcast_entity::<ShelfError>().unwrap(), ShelfError::BlankLabel);

    for label in ["Moto G84", "Pixel 8", "Xiaomi 13T"] {
        client
            .create(ShelfCreate {
                label: label.into(),
                units: 1,
            })
            .await
            .unwrap();
    }

    let shelves = client.list().await.unwrap();
    let labels: Vec<&str> = shelves.iter().map(|s| s.label.as_str()).collect();
    assert_eq!(labels, vec!["Moto G84", "Pixel 8", "Xiaomi 13T"]);
    let ids: Vec<u32> = shelves.iter().map(|s| s.id).collect();
    assert_eq!(ids, vec![2, 3, 4], "failed create still consumes an id");
}

#[tokio::test]
async fn concurrent_actions_never_oversell() {
    let (actor, client) = ResourceActor::<Shelf>::new(64);
    tokio::spawn(actor.run(()));

    let id = client
        .create(ShelfCreate {
            label: "Galaxy S24".into(),
            units: 20,
        })
        .await
        .unwrap();

    let mut handles = vec![];
    for _ in 0..50 {
        let client = client.clone();
        handles.push(tokio::spawn(async move {
            client.perform_action(id, ShelfAction::Take(1)).await
        }));
    }

    let mut taken = 0;
    let mut refused = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => taken += 1,
            Err(_) => refused += 1,
        }
    }

    assert_eq!(taken, 20);
    assert_eq!(refused, 30);
    assert_eq!(client.get(id).await.unwrap().unwrap().units, 0);
}
