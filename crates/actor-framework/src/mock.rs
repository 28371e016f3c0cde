//! # Mock Clients
//!
//! Test doubles that stand in for a running [`ResourceActor`](crate::ResourceActor).
//!
//! | | `MockClient` | Real actor |
//! |---|---|---|
//! | State | scripted replies | real store |
//! | Error injection | `return_err(...)` | needs matching state |
//! | Use case | code *around* a client, actors with dependencies | the actor itself, full system |
//!
//! Two styles are supported:
//!
//! * [`MockClient`] keeps a FIFO queue of expectations. Each incoming request must
//!   match the next expectation in kind and id, otherwise the mock task panics and the
//!   caller observes [`FrameworkError::ActorDropped`].
//! * [`create_mock_client`] hands out the raw receiver so a test can inspect each
//!   request and reply by hand with [`expect_create`], [`expect_get`] and
//!   [`expect_action`].
//!
//! ```rust,ignore
//! let mut accounts = MockClient::<Account>::new();
//! accounts.expect_get(AccountId(1)).return_ok(Some(alice));
//! accounts.expect_action(AccountId(1)).return_err(FrameworkError::EntityError(
//!     Box::new(AccountError::InsufficientFunds { requested: 900, available: 100 }),
//! ));
//!
//! tokio::spawn(order_actor.run((AccountClient::new(accounts.client()), products)));
//! // ... drive the order actor ...
//! accounts.verify();
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn push<T: ActorEntity>(queue: &Queue<T>, expectation: Expectation<T>) {
    queue
        .lock()
        .expect("mock expectation queue poisoned")
        .push_back(expectation);
}

fn answer<I: PartialEq, R>(
    kind: &str,
    expected: &I,
    got: &I,
    respond_to: oneshot::Sender<Result<R, FrameworkError>>,
    response: Result<R, FrameworkError>,
) {
    if expected != got {
        panic!("{kind} request addressed an unexpected id");
    }
    let _ = respond_to.send(response);
}

/// A scripted stand-in for a resource actor.
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Spawns the mock task with an empty expectation queue.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue
                    .lock()
                    .expect("mock expectation queue poisoned")
                    .pop_front();

                match (request, next) {
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: want, response }),
                    ) => answer("Get", &want, &id, respond_to, response),
                    (
                        ResourceRequest::List { respond_to },
                        Some(Expectation::List { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Create { respond_to, .. },
                        Some(Expectation::Create { response }),
                    ) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: want, response }),
                    ) => answer("Update", &want, &id, respond_to, response),
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: want, response }),
                    ) => answer("Delete", &want, &id, respond_to, response),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: want, response }),
                    ) => answer("Action", &want, &id, respond_to, response),
                    _ => panic!("Unexpected request or expectation mismatch"),
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// A client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> Reply<T, Option<T>> {
        self.reply(move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> Reply<T, Vec<T>> {
        self.reply(|response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> Reply<T, T> {
        self.reply(|response| Expectation::Create { response })
    }

    pub fn expect_update(&mut self, id: T::Id) -> Reply<T, T> {
        self.reply(move |response| Expectation::Update { id, response })
    }

    pub fn expect_delete(&mut self, id: T::Id) -> Reply<T, ()> {
        self.reply(move |response| Expectation::Delete { id, response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> Reply<T, T::ActionResult> {
        self.reply(move |response| Expectation::Action { id, response })
    }

    /// Panics if some expectation was never consumed.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("mock expectation queue poisoned")
            .len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }

    fn reply<R>(
        &mut self,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Reply<T, R> {
        Reply {
            build: Box::new(build),
            expectations: self.expectations.clone(),
        }
    }
}

/// Pending expectation; finish it with [`Reply::return_ok`] or [`Reply::return_err`].
pub struct Reply<T: ActorEntity, R> {
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
    expectations: Queue<T>,
}

impl<T: ActorEntity, R> Reply<T, R> {
    pub fn return_ok(self, value: R) {
        push(&self.expectations, (self.build)(Ok(value)));
    }

    pub fn return_err(self, error: FrameworkError) {
        push(&self.expectations, (self.build)(Err(error)));
    }
}

/// Creates a client together with the receiving end of its channel.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Takes the next request if it is a `Create`.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is a `Get`.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is an `Action`.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(
    T::Id,
    T::Action,
    oneshot::Sender<Result<T::ActionResult, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    #[derive(Clone, Debug, PartialEq)]
    struct Coupon {
        id: u32,
        code: String,
    }

    #[derive(Debug)]
    struct CouponCreate {
        code: String,
    }

    #[derive(Debug)]
    enum CouponAction {
        Redeem,
    }

    #[derive(Debug, thiserror::Error)]
    #[error("coupon error")]
    struct CouponError;

    #[async_trait]
    impl ActorEntity for Coupon {
        type Id = u32;
        type Create = CouponCreate;
        type Update = ();
        type Action = CouponAction;
        type ActionResult = bool;
        type Context = ();
        type Error = CouponError;

        fn from_create_params(id: u32, params: CouponCreate) -> Result<Self, Self::Error> {
            Ok(Self {
                id,
                code: params.code,
            })
        }

        async fn on_update(&mut self, _: (), _: &()) -> Result<(), Self::Error> {
            Ok(())
        }

        async fn handle_action(&mut self, _: CouponAction, _: &()) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    fn coupon(id: u32, code: &str) -> Coupon {
        Coupon {
            id,
            code: code.to_string(),
        }
    }

    #[tokio::test]
    async fn test_raw_receiver_create() {
        let (client, mut receiver) = create_mock_client::<Coupon>(10);

        let create_task = tokio::spawn(async move {
            client
                .create(CouponCreate {
                    code: "SPRING".to_string(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create request");
        assert_eq!(payload.code, "SPRING");
        responder.send(Ok(coupon(1, "SPRING"))).unwrap();

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, 1);
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_create().return_ok(coupon(1, "SPRING"));
        mock.expect_get(1).return_ok(Some(coupon(1, "SPRING")));
        mock.expect_list().return_ok(vec![coupon(1, "SPRING")]);
        mock.expect_action(1).return_ok(true);
        mock.expect_delete(1)
            .return_err(FrameworkError::NotFound("1".to_string()));

        let client = mock.client();
        let created = client
            .create(CouponCreate {
                code: "SPRING".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.code, "SPRING");
        assert!(client.get(1).await.unwrap().is_some());
        assert_eq!(client.list().await.unwrap().len(), 1);
        assert!(client.perform_action(1, CouponAction::Redeem).await.unwrap());
        assert!(matches!(
            client.delete(1).await,
            Err(FrameworkError::NotFound(_))
        ));

        mock.verify();
    }

    #[tokio::test]
    async fn test_mismatched_id_drops_the_reply() {
        let mut mock = MockClient::<Coupon>::new();
        mock.expect_get(1).return_ok(None);

        let result = mock.client().get(2).await;
        assert!(matches!(result, Err(FrameworkError::ActorDropped)));
    }
}
