//! Wires the split form, the gateway and the store together.

use collabsplit_builder::{SplitForm, SplitRequest};
use collabsplit_gateway::{LedgerClient, LedgerGateway, ObjectResponse, TransactionReceipt};
use collabsplit_types::{Address, Mist, ObjectId, SplitRecord};
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::error::AppError;
use crate::inflight::{RequestKey, RequestTracker};
use crate::record::parse_split_record;
use crate::store::{SplitStore, StoreAction};

/// Owns the gateway, the store and the request tracker.
///
/// Every remote call runs under a request token so an identical call cannot
/// be issued while the first is in flight. Failures are recorded in the
/// store's error as their display string and also returned to the caller.
pub struct SplitController<C> {
    gateway: LedgerGateway<C>,
    store: Mutex<SplitStore>,
    tracker: RequestTracker,
}

impl<C: LedgerClient> SplitController<C> {
    pub fn new(gateway: LedgerGateway<C>) -> Self {
        Self {
            gateway,
            store: Mutex::new(SplitStore::new()),
            tracker: RequestTracker::new(),
        }
    }

    pub fn gateway(&self) -> &LedgerGateway<C> {
        &self.gateway
    }

    pub fn tracker(&self) -> &RequestTracker {
        &self.tracker
    }

    /// A copy of the current store contents.
    pub fn snapshot(&self) -> SplitStore {
        self.store().clone()
    }

    pub fn dispatch(&self, action: StoreAction) {
        self.store().dispatch(action);
    }

    pub fn select_split(&self, id: Option<ObjectId>) {
        self.dispatch(StoreAction::SelectSplit(id));
    }

    /// Validate the form and create the split it describes.
    ///
    /// A validation failure is recorded on both the form and the store, and no
    /// remote call is made.
    pub async fn submit_form(
        &self,
        form: &mut SplitForm,
        signer: &Address,
    ) -> Result<TransactionReceipt, AppError> {
        let request = match form.submit() {
            Ok(request) => request,
            Err(err) => {
                let err = AppError::from(err);
                self.dispatch(StoreAction::SetError(Some(err.to_string())));
                return Err(err);
            }
        };
        self.create_split(&request, signer).await
    }

    pub async fn create_split(
        &self,
        request: &SplitRequest,
        signer: &Address,
    ) -> Result<TransactionReceipt, AppError> {
        let key = RequestKey::CreateSplit {
            signer: signer.clone(),
            request: request.clone(),
        };
        self.tracked(key, self.gateway.create_split_request(request, signer))
            .await
    }

    pub async fn deposit(
        &self,
        split_id: &ObjectId,
        amount: Mist,
        signer: &Address,
    ) -> Result<TransactionReceipt, AppError> {
        let key = RequestKey::Deposit {
            split_id: split_id.clone(),
        };
        self.tracked(key, self.gateway.deposit(split_id, amount, signer))
            .await
    }

    pub async fn distribute(
        &self,
        split_id: &ObjectId,
        signer: &Address,
    ) -> Result<TransactionReceipt, AppError> {
        let key = RequestKey::Distribute {
            split_id: split_id.clone(),
        };
        self.tracked(key, self.gateway.distribute(split_id, signer))
            .await
    }

    /// Fetch the split object verbatim, without touching the cache.
    pub async fn fetch_split_data(&self, split_id: &ObjectId) -> Result<ObjectResponse, AppError> {
        let key = RequestKey::Fetch {
            split_id: split_id.clone(),
        };
        self.tracked(key, self.gateway.get_split_data(split_id))
            .await
    }

    /// Fetch a split, parse it and cache it in the store.
    pub async fn refresh_split(&self, split_id: &ObjectId) -> Result<SplitRecord, AppError> {
        let response = self.fetch_split_data(split_id).await?;
        match parse_split_record(split_id, &response) {
            Ok(record) => {
                self.dispatch(StoreAction::UpsertSplit(record.clone()));
                Ok(record)
            }
            Err(err) => {
                self.dispatch(StoreAction::SetError(Some(err.to_string())));
                Err(err)
            }
        }
    }

    async fn tracked<T, E, F>(&self, key: RequestKey, fut: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, E>>,
        AppError: From<E>,
    {
        let token = match self.tracker.begin(key) {
            Ok(token) => token,
            Err(err) => {
                tracing::warn!(error = %err, "duplicate request refused");
                self.dispatch(StoreAction::SetError(Some(err.to_string())));
                return Err(err);
            }
        };

        {
            let mut store = self.store();
            store.dispatch(StoreAction::SetLoading(true));
            store.dispatch(StoreAction::SetError(None));
        }

        let result = token.run(fut).await;

        let mut store = self.store();
        store.dispatch(StoreAction::SetLoading(self.tracker.in_flight_count() > 0));
        if let Err(err) = &result {
            store.dispatch(StoreAction::SetError(Some(err.to_string())));
        }
        result
    }

    fn store(&self) -> MutexGuard<'_, SplitStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
