//! The three contract operations plus the split fetch.

use collabsplit_builder::SplitRequest;
use collabsplit_types::{Address, BasisPoints, Mist, ObjectId};

use crate::client::{
    ExecuteRequest, LedgerClient, ObjectDataOptions, ObjectResponse, TransactionReceipt,
};
use crate::deployment::{
    Deployment, CREATE_SPLIT_FUNCTION, DEPOSIT_FUNCTION, DISTRIBUTE_FUNCTION,
};
use crate::error::LedgerError;
use crate::transaction::TransactionBlock;

/// Issues split contract calls through a [`LedgerClient`].
///
/// Every call is single-shot and non-idempotent. The gateway does not know
/// which state a split is in; guarding e.g. a second `distribute` is the
/// contract's job.
pub struct LedgerGateway<C> {
    client: C,
    deployment: Deployment,
    gas_budget: Option<u64>,
}

impl<C: LedgerClient> LedgerGateway<C> {
    pub fn new(client: C, deployment: Deployment) -> Self {
        Self {
            client,
            deployment,
            gas_budget: None,
        }
    }

    /// Attach `gas_budget` to every transaction built from now on.
    pub fn with_gas_budget(mut self, gas_budget: Option<u64>) -> Self {
        self.gas_budget = gas_budget;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    /// `create_split(addresses, basis_points)`.
    pub fn build_create_split(
        &self,
        members: &[Address],
        basis_points: &[BasisPoints],
    ) -> Result<TransactionBlock, LedgerError> {
        let mut tx = self.new_transaction();
        let members = tx.pure(members)?;
        let basis_points = tx.pure(basis_points)?;
        tx.move_call(
            self.deployment.target(CREATE_SPLIT_FUNCTION),
            vec![members, basis_points],
        );
        Ok(tx)
    }

    /// Split `amount` off the gas coin, then `deposit(split, coin)`.
    pub fn build_deposit(
        &self,
        split_id: &ObjectId,
        amount: Mist,
    ) -> Result<TransactionBlock, LedgerError> {
        let mut tx = self.new_transaction();
        let amount = tx.pure(&amount)?;
        let gas = tx.gas();
        let coins = tx.split_coins(gas, vec![amount]);
        let split = tx.object(split_id);
        let mut arguments = vec![split];
        arguments.extend(coins);
        tx.move_call(self.deployment.target(DEPOSIT_FUNCTION), arguments);
        Ok(tx)
    }

    /// `distribute(split)`.
    pub fn build_distribute(&self, split_id: &ObjectId) -> TransactionBlock {
        let mut tx = self.new_transaction();
        let split = tx.object(split_id);
        tx.move_call(self.deployment.target(DISTRIBUTE_FUNCTION), vec![split]);
        tx
    }

    /// Create a split from pre-converted basis points, signed by `signer`.
    pub async fn create_split(
        &self,
        members: &[Address],
        basis_points: &[BasisPoints],
        signer: &Address,
    ) -> Result<TransactionReceipt, LedgerError> {
        let tx = self.build_create_split(members, basis_points)?;
        tracing::info!(members = members.len(), signer = %signer, "submitting create_split");
        self.execute(tx, signer).await
    }

    /// Create a split from a validated request.
    pub async fn create_split_request(
        &self,
        request: &SplitRequest,
        signer: &Address,
    ) -> Result<TransactionReceipt, LedgerError> {
        self.create_split(request.addresses(), request.basis_points(), signer)
            .await
    }

    /// Deposit `amount` into the split. Insufficient funds come back as the ledger's error.
    pub async fn deposit(
        &self,
        split_id: &ObjectId,
        amount: Mist,
        signer: &Address,
    ) -> Result<TransactionReceipt, LedgerError> {
        let tx = self.build_deposit(split_id, amount)?;
        tracing::info!(split = %split_id, %amount, signer = %signer, "submitting deposit");
        self.execute(tx, signer).await
    }

    /// Ask the contract to pay out the split's balance.
    pub async fn distribute(
        &self,
        split_id: &ObjectId,
        signer: &Address,
    ) -> Result<TransactionReceipt, LedgerError> {
        let tx = self.build_distribute(split_id);
        tracing::info!(split = %split_id, signer = %signer, "submitting distribute");
        self.execute(tx, signer).await
    }

    /// Fetch the split object with its content, unmodified.
    pub async fn get_split_data(&self, split_id: &ObjectId) -> Result<ObjectResponse, LedgerError> {
        tracing::debug!(split = %split_id, "fetching split object");
        self.client
            .get_object(split_id.clone(), ObjectDataOptions::with_content())
            .await
    }

    fn new_transaction(&self) -> TransactionBlock {
        let mut tx = TransactionBlock::new();
        if let Some(budget) = self.gas_budget {
            tx.set_gas_budget(budget);
        }
        tx
    }

    async fn execute(
        &self,
        transaction_block: TransactionBlock,
        signer: &Address,
    ) -> Result<TransactionReceipt, LedgerError> {
        let request = ExecuteRequest {
            signer: signer.clone(),
            transaction_block,
        };
        match self.client.sign_and_execute_transaction_block(request).await {
            Ok(receipt) => {
                tracing::debug!(digest = receipt.digest().unwrap_or("-"), "transaction executed");
                Ok(receipt)
            }
            Err(err) => {
                tracing::warn!(error = %err, "transaction failed");
                Err(err)
            }
        }
    }
}
