//! Fund supply service.
//!
//! Mint and burn are multisig-gated: callers hand over the signatures
//! collected for the approved action together with the digest that was
//! signed, and the quorum is re-verified here before any supply change.
//! Buy and sell are open operations priced at NAV per token.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use log::debug;
use serde_json::json;

use super::fund_errors::FundError;
use super::fund_model::FundMetadata;
use crate::errors::Result;
use crate::governance::{AdminSignature, AdminVerifier};
use crate::positions::{PositionRepositoryTrait, PositionStatus};
use crate::transactions::{NewTransaction, Transaction, TransactionKind, TransactionServiceTrait};

/// Service owning the token supply and holder balances.
pub struct FundService {
    metadata: RwLock<FundMetadata>,
    balances: RwLock<HashMap<String, u64>>,
    verifier: Arc<dyn AdminVerifier>,
    positions: Arc<dyn PositionRepositoryTrait>,
    transactions: Arc<dyn TransactionServiceTrait>,
}

impl FundService {
    /// Creates the service, crediting the initial supply to the treasury.
    pub fn new(
        metadata: FundMetadata,
        verifier: Arc<dyn AdminVerifier>,
        positions: Arc<dyn PositionRepositoryTrait>,
        transactions: Arc<dyn TransactionServiceTrait>,
    ) -> Self {
        let mut balances = HashMap::new();
        if metadata.total_supply > 0 {
            balances.insert(metadata.treasury_address.clone(), metadata.total_supply);
        }
        Self {
            metadata: RwLock::new(metadata),
            balances: RwLock::new(balances),
            verifier,
            positions,
            transactions,
        }
    }

    /// Snapshot of the token metadata.
    pub fn metadata(&self) -> FundMetadata {
        self.metadata.read().unwrap().clone()
    }

    /// OVT balance of an address.
    pub fn balance_of(&self, address: &str) -> u64 {
        self.balances
            .read()
            .unwrap()
            .get(address)
            .copied()
            .unwrap_or(0)
    }

    /// Whether a payment proof is acceptable.
    ///
    /// Testnet stand-in for Bitcoin transaction verification: any non-empty
    /// proof passes.
    pub fn verify_payment(&self, payment_proof: &[u8]) -> bool {
        !payment_proof.is_empty()
    }

    /// Mints new supply into the treasury. Requires an approved quorum.
    pub async fn mint(
        &self,
        amount: u64,
        digest: &[u8; 32],
        signatures: &[AdminSignature],
    ) -> Result<Transaction> {
        self.verifier.verify_quorum(digest, signatures)?;

        {
            let mut metadata = self.metadata.write().unwrap();
            metadata.total_supply = metadata
                .total_supply
                .checked_add(amount)
                .ok_or(FundError::ArithmeticOverflow)?;

            let mut balances = self.balances.write().unwrap();
            let treasury = balances
                .entry(metadata.treasury_address.clone())
                .or_insert(0);
            *treasury = treasury
                .checked_add(amount)
                .ok_or(FundError::ArithmeticOverflow)?;
        }

        debug!("Minted {} OVT to treasury", amount);
        self.transactions
            .record(NewTransaction::new(TransactionKind::Mint, amount))
            .await
    }

    /// Burns supply from the treasury. Requires an approved quorum.
    pub async fn burn(
        &self,
        amount: u64,
        digest: &[u8; 32],
        signatures: &[AdminSignature],
    ) -> Result<Transaction> {
        self.verifier.verify_quorum(digest, signatures)?;

        {
            let mut metadata = self.metadata.write().unwrap();
            let mut balances = self.balances.write().unwrap();

            let treasury = balances
                .entry(metadata.treasury_address.clone())
                .or_insert(0);
            if *treasury < amount {
                return Err(FundError::InsufficientFunds {
                    available: *treasury,
                    requested: amount,
                }
                .into());
            }

            *treasury -= amount;
            metadata.total_supply = metadata
                .total_supply
                .checked_sub(amount)
                .ok_or(FundError::ArithmeticOverflow)?;
        }

        debug!("Burned {} OVT from treasury", amount);
        self.transactions
            .record(NewTransaction::new(TransactionKind::Burn, amount))
            .await
    }

    /// Buys OVT with Bitcoin, priced at NAV per token.
    ///
    /// Returns the recorded transaction; the charged amount in sats rides in
    /// its details.
    pub async fn buy(
        &self,
        buyer: &str,
        ovt_amount: u64,
        payment_proof: &[u8],
    ) -> Result<Transaction> {
        if !self.verify_payment(payment_proof) {
            return Err(FundError::InvalidPaymentProof.into());
        }

        let total_price = {
            let mut metadata = self.metadata.write().unwrap();
            let price_per_token = metadata
                .price_per_token_sats()
                .ok_or(FundError::ZeroSupply)?;
            let total_price = price_per_token
                .checked_mul(ovt_amount)
                .ok_or(FundError::ArithmeticOverflow)?;

            metadata.total_supply = metadata
                .total_supply
                .checked_add(ovt_amount)
                .ok_or(FundError::ArithmeticOverflow)?;

            let mut balances = self.balances.write().unwrap();
            let balance = balances.entry(buyer.to_string()).or_insert(0);
            *balance = balance
                .checked_add(ovt_amount)
                .ok_or(FundError::ArithmeticOverflow)?;

            total_price
        };

        debug!(
            "Buy: {} OVT to {} for {} sats",
            ovt_amount, buyer, total_price
        );
        self.transactions
            .record(
                NewTransaction::new(TransactionKind::Mint, ovt_amount).with_details(json!({
                    "buyer": buyer,
                    "totalPriceSats": total_price,
                })),
            )
            .await
    }

    /// Sells OVT for Bitcoin, priced at NAV per token.
    pub async fn sell(
        &self,
        seller: &str,
        ovt_amount: u64,
        btc_address: &str,
    ) -> Result<Transaction> {
        let total_price = {
            let mut metadata = self.metadata.write().unwrap();
            let mut balances = self.balances.write().unwrap();

            let balance = balances.get_mut(seller).ok_or(FundError::InsufficientFunds {
                available: 0,
                requested: ovt_amount,
            })?;
            if *balance < ovt_amount {
                return Err(FundError::InsufficientFunds {
                    available: *balance,
                    requested: ovt_amount,
                }
                .into());
            }

            let price_per_token = metadata
                .price_per_token_sats()
                .ok_or(FundError::ZeroSupply)?;
            let total_price = price_per_token
                .checked_mul(ovt_amount)
                .ok_or(FundError::ArithmeticOverflow)?;

            *balance -= ovt_amount;
            metadata.total_supply = metadata
                .total_supply
                .checked_sub(ovt_amount)
                .ok_or(FundError::ArithmeticOverflow)?;

            total_price
        };

        debug!(
            "Sell: {} OVT from {} paying {} sats to {}",
            ovt_amount, seller, total_price, btc_address
        );
        self.transactions
            .record(
                NewTransaction::new(TransactionKind::Burn, ovt_amount).with_details(json!({
                    "seller": seller,
                    "btcAddress": btc_address,
                    "payoutSats": total_price,
                })),
            )
            .await
    }

    /// Recomputes the NAV as liquid treasury plus unexited position value.
    pub fn update_nav(&self, liquid_treasury_sats: u64) -> Result<u64> {
        let mut illiquid: u64 = 0;
        for position in self.positions.list()? {
            if position.status == PositionStatus::Exited {
                continue;
            }
            illiquid = illiquid
                .checked_add(position.current_value_sats)
                .ok_or(FundError::ArithmeticOverflow)?;
        }

        let nav = liquid_treasury_sats
            .checked_add(illiquid)
            .ok_or(FundError::ArithmeticOverflow)?;

        self.metadata.write().unwrap().nav_sats = nav;
        debug!("NAV updated to {} sats", nav);
        Ok(nav)
    }
}
