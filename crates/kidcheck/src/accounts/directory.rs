use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::domain::{Account, AccountId, AccountKind, Registration};
use super::password::PasswordHash;
use crate::clock::{Clock, SystemClock};
use crate::ids::next_id;

/// Process-wide set of registered accounts, keyed by unique email.
pub struct AccountDirectory {
    accounts: Mutex<Vec<Account>>,
    clock: Arc<dyn Clock>,
}

impl Default for AccountDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountDirectory {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            accounts: Mutex::new(Vec::new()),
            clock,
        }
    }

    /// Store a new account unless its email is already registered.
    pub fn register(&self, registration: Registration) -> Result<Account, DirectoryError> {
        let mut accounts = self.lock()?;
        if first_with_email(&accounts, &registration.email).is_some() {
            return Err(DirectoryError::DuplicateAccount);
        }

        let Registration {
            name,
            email,
            password,
            child_name,
            kind,
        } = registration;

        let account = Account {
            id: AccountId(next_id()),
            name,
            email,
            password: PasswordHash::new(&password),
            child_name,
            kind,
            created_at: self.clock.now(),
        };
        accounts.push(account.clone());
        debug!(account_id = %account.id.0, kind = account.kind.as_str(), "account registered");
        Ok(account)
    }

    /// First account matching email, password and kind together. No match is not an error.
    pub fn login(
        &self,
        email: &str,
        password: &str,
        kind: &AccountKind,
    ) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.lock()?;
        Ok(accounts
            .iter()
            .find(|account| {
                account.email == email && &account.kind == kind && account.verify_password(password)
            })
            .cloned())
    }

    pub fn find_by_email(&self, email: &str) -> Result<Option<Account>, DirectoryError> {
        let accounts = self.lock()?;
        Ok(first_with_email(&accounts, email).cloned())
    }

    /// Snapshot of every account in registration order.
    pub fn list_all(&self) -> Result<Vec<Account>, DirectoryError> {
        Ok(self.lock()?.clone())
    }

    pub fn len(&self) -> Result<usize, DirectoryError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, DirectoryError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<Account>>, DirectoryError> {
        self.accounts.lock().map_err(|_| DirectoryError::Unavailable)
    }

    #[cfg(test)]
    pub(crate) fn poisoned() -> Self {
        let directory = Self::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = directory.accounts.lock();
            panic!("poison account directory");
        }));
        directory
    }
}

fn first_with_email<'a>(accounts: &'a [Account], email: &str) -> Option<&'a Account> {
    accounts.iter().find(|account| account.email == email)
}

/// Failures raised by the account directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("User already exists")]
    DuplicateAccount,
    #[error("account directory unavailable")]
    Unavailable,
}
