use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use biolink::server::{serve, SharedStore};
use biolink::store::MemoryLinkStore;
use tokio::sync::Notify;

pub struct ServerHandle {
    pub addr: SocketAddr,
    pub store: SharedStore,
    shutdown: Arc<Notify>,
}

impl ServerHandle {
    pub async fn with_memory_store() -> Self {
        Self::for_store(Arc::new(MemoryLinkStore::new())).await
    }

    pub async fn for_store(store: SharedStore) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let notify = Arc::new(Notify::new());
        let shutdown = notify.clone();

        let served = store.clone();
        tokio::spawn(async move {
            serve(served, listener, async move { notify.notified().await })
                .await
                .unwrap()
        });

        Self {
            addr,
            store,
            shutdown,
        }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for ServerHandle {
    fn drop(&mut self) {
        self.shutdown.notify_one()
    }
}
