use crate::clients::{AccountClient, OrderClient, ProductClient};
use crate::media::MediaStore;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Owns the three resource actors of the store.
///
/// The Account and Product actors are independent. The Order actor receives clones of
/// both clients as its context, which is how checkout reaches them.
///
/// ```ignore
/// let system = StoreSystem::new(MediaStore::new("uploads"), 32);
/// let account = system.account_client.register(params).await?;
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub account_client: AccountClient,
    pub product_client: ProductClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns every actor on the current Tokio runtime.
    pub fn new(media: MediaStore, channel_capacity: usize) -> Self {
        let (account_actor, account_inner) = crate::account_actor::new(channel_capacity);
        let (product_actor, product_inner) = crate::product_actor::new(channel_capacity);
        let (order_actor, order_inner) = crate::order_actor::new(channel_capacity);

        let account_client = AccountClient::new(account_inner);
        let product_client = ProductClient::new(product_inner);
        let order_client = OrderClient::new(order_inner);

        let account_handle = tokio::spawn(account_actor.run(()));
        let product_handle = tokio::spawn(product_actor.run(media));
        let order_handle = tokio::spawn(
            order_actor.run((account_client.clone(), product_client.clone())),
        );

        info!(channel_capacity, "Store actors started");
        Self {
            account_client,
            product_client,
            order_client,
            handles: vec![account_handle, product_handle, order_handle],
        }
    }

    /// Closes every channel and waits for the actors to drain.
    ///
    /// The Order actor goes first: it holds the remaining Account and Product senders,
    /// so those actors only stop once it has.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store actors");
        drop(self.order_client);
        drop(self.account_client);
        drop(self.product_client);

        let mut handles = self.handles;
        handles.reverse();
        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = ?e, "Actor task failed");
                return Err(format!("Actor task failed: {e:?}"));
            }
        }
        info!("Store shutdown complete");
        Ok(())
    }
}
