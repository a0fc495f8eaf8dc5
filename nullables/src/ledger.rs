//! Nullable ledger client — record transactions without executing them.

use collabsplit_gateway::{
    Argument, CallArg, Command, ExecuteRequest, LedgerClient, LedgerError, ObjectDataOptions,
    ObjectResponse, TransactionBlock, TransactionReceipt,
};
use collabsplit_types::ObjectId;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::{Notify, Semaphore};

/// Error code the null ledger uses when a gas-coin split exceeds the balance.
pub const INSUFFICIENT_BALANCE_CODE: i64 = -32002;

#[derive(Default)]
struct State {
    executed: Vec<ExecuteRequest>,
    fetched: Vec<ObjectId>,
    objects: HashMap<ObjectId, Value>,
    failures: VecDeque<LedgerError>,
    gas_balance: Option<u64>,
}

#[derive(Default)]
struct Inner {
    state: Mutex<State>,
    arrived: Notify,
    gate: Option<Arc<Semaphore>>,
}

/// A ledger client that keeps everything in memory.
///
/// Clones share state, so a test can hand one clone to the code under test
/// and inspect the other.
#[derive(Clone, Default)]
pub struct NullLedgerClient {
    inner: Arc<Inner>,
}

/// Holds submissions in flight until released.
#[derive(Clone)]
pub struct SubmissionGate {
    permits: Arc<Semaphore>,
}

impl SubmissionGate {
    /// Let `n` held submissions complete.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }
}

impl NullLedgerClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client whose submissions wait on the returned gate before completing.
    pub fn gated() -> (Self, SubmissionGate) {
        let permits = Arc::new(Semaphore::new(0));
        let client = Self {
            inner: Arc::new(Inner {
                gate: Some(permits.clone()),
                ..Inner::default()
            }),
        };
        (client, SubmissionGate { permits })
    }

    /// Track a gas-coin balance; splits larger than it fail.
    pub fn with_gas_balance(self, balance: u64) -> Self {
        self.state().gas_balance = Some(balance);
        self
    }

    /// Serve `content` as the Move content of object `id`.
    pub fn insert_object(&self, id: ObjectId, content: Value) {
        self.state().objects.insert(id, content);
    }

    /// Fail the next call (submission or fetch) with `err`.
    pub fn fail_next(&self, err: LedgerError) {
        self.state().failures.push_back(err);
    }

    /// Every sign-and-execute request received, in order.
    pub fn executed(&self) -> Vec<ExecuteRequest> {
        self.state().executed.clone()
    }

    /// Every object id fetched, in order.
    pub fn fetched(&self) -> Vec<ObjectId> {
        self.state().fetched.clone()
    }

    pub fn gas_balance(&self) -> Option<u64> {
        self.state().gas_balance
    }

    /// Wait until at least `n` submissions have been received.
    pub async fn wait_for_submissions(&self, n: usize) {
        loop {
            let notified = self.inner.arrived.notified();
            if self.state().executed.len() >= n {
                return;
            }
            notified.await;
        }
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn execute_now(&self, request: &ExecuteRequest) -> Result<TransactionReceipt, LedgerError> {
        let mut state = self.state();
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }

        let carved = gas_coin_withdrawal(&request.transaction_block)?;
        if let Some(balance) = state.gas_balance {
            let remaining = balance.checked_sub(carved).ok_or_else(|| LedgerError::Rpc {
                code: INSUFFICIENT_BALANCE_CODE,
                message: format!("InsufficientCoinBalance: need {carved}, have {balance}"),
            })?;
            state.gas_balance = Some(remaining);
        }

        Ok(TransactionReceipt(json!({
            "digest": format!("null-tx-{}", state.executed.len()),
            "effects": { "status": { "status": "success" } },
        })))
    }
}

impl LedgerClient for NullLedgerClient {
    async fn sign_and_execute_transaction_block(
        &self,
        request: ExecuteRequest,
    ) -> Result<TransactionReceipt, LedgerError> {
        self.state().executed.push(request.clone());
        self.inner.arrived.notify_waiters();

        if let Some(gate) = &self.inner.gate {
            let permit = gate
                .acquire()
                .await
                .map_err(|e| LedgerError::Transport(e.to_string()))?;
            permit.forget();
        }

        self.execute_now(&request)
    }

    async fn get_object(
        &self,
        id: ObjectId,
        options: ObjectDataOptions,
    ) -> Result<ObjectResponse, LedgerError> {
        let mut state = self.state();
        state.fetched.push(id.clone());
        if let Some(err) = state.failures.pop_front() {
            return Err(err);
        }

        let response = match state.objects.get(&id) {
            Some(content) => {
                let mut data = json!({ "objectId": id.as_str(), "version": "1" });
                if options.show_content {
                    data["content"] = content.clone();
                }
                json!({ "data": data })
            }
            None => json!({ "error": { "code": "notExists", "object_id": id.as_str() } }),
        };
        Ok(ObjectResponse(response))
    }
}

/// Total amount a transaction splits off the gas coin.
fn gas_coin_withdrawal(tx: &TransactionBlock) -> Result<u64, LedgerError> {
    let mut total: u64 = 0;
    for command in &tx.commands {
        let Command::SplitCoins {
            coin: Argument::GasCoin,
            amounts,
        } = command
        else {
            continue;
        };
        for amount in amounts {
            let value = match tx.input(*amount) {
                Some(CallArg::Pure { value }) => value.as_u64(),
                _ => None,
            }
            .ok_or_else(|| LedgerError::InvalidResponse("split amount is not a u64".into()))?;
            total = total
                .checked_add(value)
                .ok_or_else(|| LedgerError::InvalidResponse("split amount overflow".into()))?;
        }
    }
    Ok(total)
}
