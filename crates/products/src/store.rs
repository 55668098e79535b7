//! The remote product store seam and the errors of a save attempt.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;
use thiserror::Error;

use bizadmin_core::{DomainError, ProductId};

use crate::form::{ProductFormData, ProductPayload};

/// Prefix the backend puts on messages caused by client-correctable input.
pub const CLIENT_VALIDATION_PREFIX: &str = "[VALIDATION] ";

/// Fallback shown when a remote failure carries no message.
pub const GENERIC_SAVE_FAILURE: &str = "Erro ao salvar o produto";

/// Errors reported by a [`ProductStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend refused the record because of user input.
    #[error("{0}")]
    ClientValidation(String),

    #[error("product not found: {0}")]
    NotFound(ProductId),

    /// Anything else the backend or transport reported.
    #[error(transparent)]
    Remote(#[from] anyhow::Error),
}

impl StoreError {
    /// Build a client-validation error from the backend's raw message.
    pub fn client_validation(raw: impl AsRef<str>) -> Self {
        Self::ClientValidation(raw.as_ref().replacen(CLIENT_VALIDATION_PREFIX, "", 1))
    }

    pub fn is_client_validation(&self) -> bool {
        matches!(self, Self::ClientValidation(_))
    }
}

/// Why [`ProductForm::save`](crate::form::ProductForm::save) did not save.
#[derive(Debug, Error)]
pub enum SaveError {
    /// Rejected locally; the store was never called.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SaveError {
    /// Text for the toast shown to the user.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_SAVE_FAILURE.to_string()
        } else {
            message
        }
    }
}

/// Remote backend that persists product records.
///
/// One call per save; the returned record replaces the form contents.
#[async_trait::async_trait]
pub trait ProductStore: Send + Sync {
    async fn save_product(&self, payload: &ProductPayload) -> Result<ProductFormData, StoreError>;
}

/// In-memory product store (tests/dev).
///
/// Assigns identifiers and timestamps the way the backend does and enforces
/// SKU uniqueness per company.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    products: RwLock<HashMap<ProductId, ProductFormData>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn get(&self, id: ProductId) -> Result<Option<ProductFormData>, StoreError> {
        let products = self
            .products
            .read()
            .map_err(|_| anyhow::anyhow!("product store lock poisoned"))?;
        Ok(products.get(&id).cloned())
    }

    pub fn len(&self) -> usize {
        self.products.read().map(|p| p.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl ProductStore for InMemoryProductStore {
    async fn save_product(&self, payload: &ProductPayload) -> Result<ProductFormData, StoreError> {
        let mut products = self
            .products
            .write()
            .map_err(|_| anyhow::anyhow!("product store lock poisoned"))?;

        let mut record = ProductFormData::from(payload.clone());
        let now = Utc::now();

        if let Some(sku) = record.details.sku.as_deref().filter(|s| !s.trim().is_empty()) {
            let taken = products.values().any(|p| {
                p.details.id != record.details.id
                    && p.details.empresa_id == record.details.empresa_id
                    && p.details.sku.as_deref() == Some(sku)
            });
            if taken {
                return Err(StoreError::client_validation(format!(
                    "{CLIENT_VALIDATION_PREFIX}SKU '{sku}' já cadastrado."
                )));
            }
        }

        let id = match record.details.id {
            Some(id) => {
                let existing = products.get(&id).ok_or(StoreError::NotFound(id))?;
                record.details.created_at = existing.details.created_at;
                id
            }
            None => {
                let id = ProductId::new();
                record.details.id = Some(id);
                record.details.created_at = Some(now);
                id
            }
        };
        record.details.updated_at = Some(now);

        products.insert(id, record.clone());
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::ProductForm;

    #[test]
    fn client_validation_strips_backend_prefix() {
        let err = StoreError::client_validation("[VALIDATION] Largura inválida.");
        assert!(err.is_client_validation());
        assert_eq!(err.to_string(), "Largura inválida.");
    }

    #[test]
    fn empty_remote_message_falls_back_to_generic_text() {
        let err = SaveError::Store(StoreError::Remote(anyhow::anyhow!("")));
        assert_eq!(err.user_message(), GENERIC_SAVE_FAILURE);

        let err = SaveError::Store(StoreError::Remote(anyhow::anyhow!("timeout")));
        assert_eq!(err.user_message(), "timeout");
    }

    #[tokio::test]
    async fn in_memory_store_assigns_id_and_timestamps() {
        let store = InMemoryProductStore::new();
        let mut form = ProductForm::new();
        form.set_nome("Caneca");
        let payload = form.prepare_submit().unwrap();

        let saved = store.save_product(&payload).await.unwrap();
        let id = saved.details.id.expect("id assigned");
        assert!(saved.details.created_at.is_some());
        assert_eq!(saved.details.created_at, saved.details.updated_at);
        assert_eq!(store.get(id).unwrap(), Some(saved));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn in_memory_store_rejects_unknown_id_on_update() {
        let store = InMemoryProductStore::new();
        let mut form = ProductForm::new();
        form.set_nome("Caneca");
        let mut payload = form.prepare_submit().unwrap();
        let id = ProductId::new();
        payload.details.id = Some(id);

        let err = store.save_product(&payload).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(missing) if missing == id));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn in_memory_store_enforces_sku_uniqueness() {
        let store = InMemoryProductStore::new();
        let mut first = ProductForm::new();
        first.set_nome("Caneca azul");
        first.set_sku("CAN-001");
        store.save_product(&first.prepare_submit().unwrap()).await.unwrap();

        let mut second = ProductForm::new();
        second.set_nome("Caneca verde");
        second.set_sku("CAN-001");
        let err = store
            .save_product(&second.prepare_submit().unwrap())
            .await
            .unwrap_err();
        assert!(err.is_client_validation());
        assert_eq!(err.to_string(), "SKU 'CAN-001' já cadastrado.");
    }
}
