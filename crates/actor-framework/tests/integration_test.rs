use actor_framework::{ActorEntity, FrameworkError, ResourceActor, ResourceClient};
use async_trait::async_trait;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct GiftCard {
    id: u32,
    code: String,
    balance: u64,
    locked: bool,
}

#[derive(Debug)]
struct GiftCardCreate {
    code: String,
    balance: u64,
}

#[derive(Debug)]
struct GiftCardUpdate {
    code: Option<String>,
    locked: Option<bool>,
}

#[derive(Debug)]
enum GiftCardAction {
    Spend(u64),
}

#[derive(Debug, PartialEq, thiserror::Error)]
enum GiftCardError {
    #[error("code {0} already issued")]
    DuplicateCode(String),
    #[error("requested {requested}, available {available}")]
    Exhausted { requested: u64, available: u64 },
    #[error("card is locked")]
    Locked,
}

#[async_trait]
impl ActorEntity for GiftCard {
    type Id = u32;
    type Create = GiftCardCreate;
    type Update = GiftCardUpdate;
    type Action = GiftCardAction;
    type ActionResult = u64;
    type Context = ();
    type Error = GiftCardError;

    fn from_create_params(id: u32, params: GiftCardCreate) -> Result<Self, Self::Error> {
        Ok(Self {
            id,
            code: params.code,
            balance: params.balance,
            locked: false,
        })
    }

    fn check_conflict(&self, other: &Self) -> Result<(), Self::Error> {
        if self.code == other.code {
            return Err(GiftCardError::DuplicateCode(self.code.clone()));
        }
        Ok(())
    }

    async fn on_update(&mut self, update: GiftCardUpdate, _ctx: &()) -> Result<(), Self::Error> {
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(locked) = update.locked {
            self.locked = locked;
        }
        Ok(())
    }

    async fn on_delete(&self, _ctx: &()) -> Result<(), Self::Error> {
        if self.locked {
            return Err(GiftCardError::Locked);
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: GiftCardAction, _ctx: &()) -> Result<u64, Self::Error> {
        match action {
            GiftCardAction::Spend(amount) => {
                // Mutates before validating; the actor must discard the draft on error.
                let available = self.balance;
                self.balance = self.balance.saturating_sub(amount);
                if amount > available {
                    return Err(GiftCardError::Exhausted {
                        requested: amount,
                        available,
                    });
                }
                Ok(self.balance)
            }
        }
    }
}

fn spawn_actor() -> ResourceClient<GiftCard> {
    let (actor, client) = ResourceActor::new(10);
    tokio::spawn(actor.run(()));
    client
}

async fn issue(client: &ResourceClient<GiftCard>, code: &str, balance: u64) -> GiftCard {
    client
        .create(GiftCardCreate {
            code: code.to_string(),
            balance,
        })
        .await
        .unwrap()
}

fn entity_error(err: FrameworkError) -> GiftCardError {
    err.into_entity_error::<GiftCardError>()
        .expect("expected a gift card error")
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let client = spawn_actor();

    let card = issue(&client, "WELCOME", 500).await;
    assert_eq!(card.id, 1);

    let remaining = client
        .perform_action(card.id, GiftCardAction::Spend(200))
        .await
        .unwrap();
    assert_eq!(remaining, 300);
    assert_eq!(client.get(card.id).await.unwrap().unwrap().balance, 300);

    let updated = client
        .update(
            card.id,
            GiftCardUpdate {
                code: Some("HELLO".into()),
                locked: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.code, "HELLO");

    client.delete(card.id).await.unwrap();
    assert!(client.get(card.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_failed_action_leaves_entity_untouched() {
    let client = spawn_actor();
    let card = issue(&client, "WELCOME", 100).await;

    let err = client
        .perform_action(card.id, GiftCardAction::Spend(150))
        .await
        .unwrap_err();
    assert_eq!(
        entity_error(err),
        GiftCardError::Exhausted {
            requested: 150,
            available: 100
        }
    );

    assert_eq!(client.get(card.id).await.unwrap().unwrap().balance, 100);
}

#[tokio::test]
async fn test_conflicts_rejected_on_create_and_update() {
    let client = spawn_actor();
    issue(&client, "WELCOME", 100).await;
    let second = issue(&client, "SPRING", 100).await;

    let err = client
        .create(GiftCardCreate {
            code: "WELCOME".into(),
            balance: 1,
        })
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), GiftCardError::DuplicateCode("WELCOME".into()));

    let err = client
        .update(
            second.id,
            GiftCardUpdate {
                code: Some("WELCOME".into()),
                locked: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(entity_error(err), GiftCardError::DuplicateCode("WELCOME".into()));
    assert_eq!(client.get(second.id).await.unwrap().unwrap().code, "SPRING");

    // Re-saving an entity's own code is not a conflict.
    let same = client
        .update(
            second.id,
            GiftCardUpdate {
                code: Some("SPRING".into()),
                locked: None,
            },
        )
        .await;
    assert!(same.is_ok());

    assert_eq!(client.list().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_follows_creation_order() {
    let client = spawn_actor();
    for i in 0..12 {
        issue(&client, &format!("CODE{i}"), i).await;
    }

    let ids: Vec<u32> = client.list().await.unwrap().iter().map(|c| c.id).collect();
    assert_eq!(ids, (1..=12).collect::<Vec<_>>());
}

#[tokio::test]
async fn test_missing_ids_and_refused_deletes() {
    let client = spawn_actor();

    assert!(matches!(
        client.perform_action(42, GiftCardAction::Spend(1)).await,
        Err(FrameworkError::NotFound(_))
    ));
    assert!(matches!(
        client.delete(42).await,
        Err(FrameworkError::NotFound(_))
    ));

    let card = issue(&client, "LOCKED", 10).await;
    client
        .update(
            card.id,
            GiftCardUpdate {
                code: None,
                locked: Some(true),
            },
        )
        .await
        .unwrap();
    let err = client.delete(card.id).await.unwrap_err();
    assert_eq!(entity_error(err), GiftCardError::Locked);
    assert!(client.get(card.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_concurrent_actions_never_overdraw() {
    let client = spawn_actor();
    let card = issue(&client, "SHARED", 10).await;

    let mut tasks = Vec::new();
    for _ in 0..25 {
        let client = client.clone();
        tasks.push(tokio::spawn(async move {
            client.perform_action(card.id, GiftCardAction::Spend(1)).await
        }));
    }

    let mut successes = 0;
    for task in tasks {
        if task.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 10);
    assert_eq!(client.get(card.id).await.unwrap().unwrap().balance, 0);
}
