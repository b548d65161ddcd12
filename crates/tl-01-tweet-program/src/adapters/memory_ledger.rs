//! # In-Memory Ledger
//!
//! Single-node stand-in for replicated ledger storage. Commits stage every
//! change against an overlay and only then write the overlay back, so a
//! failing change leaves storage untouched.

use crate::domain::entities::{Account, StateChange};
use crate::domain::query::RecordQuery;
use crate::domain::value_objects::Pubkey;
use crate::errors::LedgerError;
use crate::ports::outbound::LedgerState;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use tracing::trace;

/// In-memory implementation of `LedgerState`.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<Pubkey, Account>>,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Credits `lamports` to a wallet account, creating it if needed.
    ///
    /// # Errors
    ///
    /// `LamportOverflow` if the balance would exceed `u64::MAX`.
    pub fn airdrop(&self, address: Pubkey, lamports: u64) -> Result<u64, LedgerError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?;
        let account = accounts
            .entry(address)
            .or_insert_with(|| Account::wallet(0));
        account.lamports = account
            .lamports
            .checked_add(lamports)
            .ok_or(LedgerError::LamportOverflow(address))?;
        Ok(account.lamports)
    }

    /// Number of live accounts.
    ///
    /// # Errors
    ///
    /// `LockPoisoned` if a writer panicked.
    pub fn account_count(&self) -> Result<usize, LedgerError> {
        Ok(self
            .accounts
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?
            .len())
    }

    /// Overwrites an account verbatim, bypassing all checks.
    ///
    /// Only for seeding fixtures such as corrupted records.
    ///
    /// # Errors
    ///
    /// `LockPoisoned` if a writer panicked.
    pub fn insert_raw(&self, address: Pubkey, account: Account) -> Result<(), LedgerError> {
        self.accounts
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?
            .insert(address, account);
        Ok(())
    }
}

/// Pending writes; `None` marks an erased account.
type Overlay = HashMap<Pubkey, Option<Account>>;

fn current(accounts: &HashMap<Pubkey, Account>, staged: &Overlay, address: &Pubkey) -> Option<Account> {
    match staged.get(address) {
        Some(pending) => pending.clone(),
        None => accounts.get(address).cloned(),
    }
}

fn stage(
    accounts: &HashMap<Pubkey, Account>,
    staged: &mut Overlay,
    change: StateChange,
) -> Result<(), LedgerError> {
    match change {
        StateChange::CreateAccount {
            address,
            owner,
            payer,
            lamports,
            data,
        } => {
            if current(accounts, staged, &address).is_some() {
                return Err(LedgerError::AccountExists(address));
            }
            let mut funder =
                current(accounts, staged, &payer).ok_or(LedgerError::AccountMissing(payer))?;
            if funder.lamports < lamports {
                return Err(LedgerError::InsufficientLamports {
                    address: payer,
                    required: lamports,
                    available: funder.lamports,
                });
            }
            funder.lamports -= lamports;
            staged.insert(payer, Some(funder));
            staged.insert(
                address,
                Some(Account {
                    lamports,
                    owner,
                    data,
                }),
            );
        }
        StateChange::WriteData { address, data } => {
            let mut account =
                current(accounts, staged, &address).ok_or(LedgerError::AccountMissing(address))?;
            account.data = data;
            staged.insert(address, Some(account));
        }
        StateChange::CloseAccount {
            address,
            beneficiary,
        } => {
            let closing =
                current(accounts, staged, &address).ok_or(LedgerError::AccountMissing(address))?;
            staged.insert(address, None);
            let mut receiver =
                current(accounts, staged, &beneficiary).unwrap_or_else(|| Account::wallet(0));
            receiver.lamports = receiver
                .lamports
                .checked_add(closing.lamports)
                .ok_or(LedgerError::LamportOverflow(beneficiary))?;
            staged.insert(beneficiary, Some(receiver));
        }
    }
    Ok(())
}

#[async_trait]
impl LedgerState for InMemoryLedger {
    async fn get_account(&self, address: &Pubkey) -> Result<Option<Account>, LedgerError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?;
        Ok(accounts.get(address).cloned())
    }

    async fn commit(&self, changes: Vec<StateChange>) -> Result<(), LedgerError> {
        let mut accounts = self
            .accounts
            .write()
            .map_err(|_| LedgerError::LockPoisoned)?;

        let mut staged = Overlay::new();
        for change in changes {
            stage(&accounts, &mut staged, change)?;
        }

        trace!(touched = staged.len(), "applying staged changes");
        for (address, pending) in staged {
            match pending {
                Some(account) => {
                    accounts.insert(address, account);
                }
                None => {
                    accounts.remove(&address);
                }
            }
        }
        Ok(())
    }

    async fn scan(
        &self,
        owner: &Pubkey,
        query: &RecordQuery,
    ) -> Result<Vec<(Pubkey, Account)>, LedgerError> {
        let accounts = self
            .accounts
            .read()
            .map_err(|_| LedgerError::LockPoisoned)?;
        let mut matches: Vec<(Pubkey, Account)> = accounts
            .iter()
            .filter(|(_, account)| account.owner == *owner && query.matches(&account.data))
            .map(|(address, account)| (*address, account.clone()))
            .collect();
        matches.sort_by_key(|(address, _)| *address);
        Ok(matches)
    }
}

// =============================================================================
// TESTS
// =============================================================================
