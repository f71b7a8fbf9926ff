//! Type-safe hub of in-process clients.
//!
//! Providers register an implementation once under its interface type;
//! consumers fetch it with `get::<dyn my::Api>()`. The key is
//! `type_name::<T>()`, which also works for trait objects.

use parking_lot::RwLock;
use std::{any::Any, collections::HashMap, sync::Arc};

#[derive(Debug, thiserror::Error)]
pub enum ClientHubError {
    #[error("client not found: {type_name}")]
    NotFound { type_name: &'static str },

    #[error("type mismatch in hub for {type_name}")]
    TypeMismatch { type_name: &'static str },
}

type Boxed = Box<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct ClientHub {
    map: RwLock<HashMap<&'static str, Boxed>>,
}

impl ClientHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `client` under interface `T`. Re-registering replaces the
    /// previous value; Arcs already handed out stay valid.
    pub fn register<T>(&self, client: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        self.map
            .write()
            .insert(std::any::type_name::<T>(), Box::new(client));
    }

    pub fn get<T>(&self) -> Result<Arc<T>, ClientHubError>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let type_name = std::any::type_name::<T>();
        let r = self.map.read();
        let boxed = r
            .get(type_name)
            .ok_or(ClientHubError::NotFound { type_name })?;
        boxed
            .downcast_ref::<Arc<T>>()
            .cloned()
            .ok_or(ClientHubError::TypeMismatch { type_name })
    }

    pub fn remove<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let boxed = self.map.write().remove(std::any::type_name::<T>())?;
        boxed.downcast::<Arc<T>>().ok().map(|b| *b)
    }

    pub fn len(&self) -> usize {
        self.map.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[async_trait::async_trait]
    trait Directory: Send + Sync {
        async fn size(&self) -> usize;
    }

    struct Fixed(usize);

    #[async_trait::async_trait]
    impl Directory for Fixed {
        async fn size(&self) -> usize {
            self.0
        }
    }

    #[tokio::test]
    async fn register_and_get_dyn_trait() {
        let hub = ClientHub::new();
        let api: Arc<dyn Directory> = Arc::new(Fixed(7));
        hub.register::<dyn Directory>(api.clone());

        let got = hub.get::<dyn Directory>().unwrap();
        assert_eq!(got.size().await, 7);
        assert!(Arc::ptr_eq(&api, &got));
        assert_eq!(hub.len(), 1);
    }

    #[tokio::test]
    async fn missing_and_removed_clients() {
        let hub = ClientHub::new();
        assert!(matches!(
            hub.get::<dyn Directory>(),
            Err(ClientHubError::NotFound { .. })
        ));

        hub.register::<dyn Directory>(Arc::new(Fixed(1)));
        hub.register::<dyn Directory>(Arc::new(Fixed(2)));
        assert_eq!(hub.get::<dyn Directory>().unwrap().size().await, 2);

        let removed = hub.remove::<dyn Directory>().unwrap();
        assert_eq!(removed.size().await, 2);
        assert!(hub.is_empty());
    }
}
