use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use tracing::debug;

use super::domain::{
    CheckinRequest, NewCheckinRequest, RequestId, RequestStats, RequestStatus, StatusUpdate,
};
use crate::clock::{Clock, SystemClock};
use crate::ids::next_id;

const RESPONSE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Process-wide collection of check-in requests in insertion order.
pub struct RequestLedger {
    requests: Mutex<Vec<CheckinRequest>>,
    clock: Arc<dyn Clock>,
}

impl Default for RequestLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestLedger {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            clock,
        }
    }

    pub fn create(&self, new_request: NewCheckinRequest) -> Result<CheckinRequest, LedgerError> {
        let NewCheckinRequest {
            kind,
            child_name,
            child_grade,
            parent_email,
            parent_name,
            message,
        } = new_request;

        let request = CheckinRequest {
            id: RequestId(next_id()),
            kind,
            child_name,
            child_grade,
            parent_email,
            parent_name,
            message,
            status: RequestStatus::Pending,
            feedback: None,
            response_time: None,
            created_at: self.clock.now(),
            updated_at: None,
        };

        self.lock()?.push(request.clone());
        debug!(request_id = %request.id.0, kind = request.kind.as_str(), "request created");
        Ok(request)
    }

    /// Every request, newest first.
    pub fn list_all(&self) -> Result<Vec<CheckinRequest>, LedgerError> {
        let requests = self.lock()?;
        Ok(newest_first(requests.iter()))
    }

    pub fn list_by_parent_email(&self, email: &str) -> Result<Vec<CheckinRequest>, LedgerError> {
        let requests = self.lock()?;
        Ok(newest_first(
            requests
                .iter()
                .filter(|request| request.parent_email == email),
        ))
    }

    pub fn find_by_id(&self, id: &RequestId) -> Result<Option<CheckinRequest>, LedgerError> {
        let requests = self.lock()?;
        Ok(requests.iter().find(|request| &request.id == id).cloned())
    }

    /// Apply a staff decision. Any status is accepted and requests may be updated repeatedly.
    pub fn update(
        &self,
        id: &RequestId,
        update: StatusUpdate,
    ) -> Result<CheckinRequest, LedgerError> {
        let mut requests = self.lock()?;
        let request = requests
            .iter_mut()
            .find(|request| &request.id == id)
            .ok_or(LedgerError::RequestNotFound)?;

        let now = self.clock.now();
        request.status = update.status;
        request.feedback = update.feedback;
        request.response_time = Some(
            now.with_timezone(&Local)
                .format(RESPONSE_TIME_FORMAT)
                .to_string(),
        );
        request.updated_at = Some(now);

        debug!(request_id = %request.id.0, status = request.status.as_str(), "request updated");
        Ok(request.clone())
    }

    /// Remove a request. `false` means no request had that id.
    pub fn delete(&self, id: &RequestId) -> Result<bool, LedgerError> {
        let mut requests = self.lock()?;
        match requests.iter().position(|request| &request.id == id) {
            Some(index) => {
                requests.remove(index);
                debug!(request_id = %id.0, "request deleted");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn count_pending(&self) -> Result<usize, LedgerError> {
        let requests = self.lock()?;
        Ok(requests
            .iter()
            .filter(|request| request.status.is_pending())
            .count())
    }

    pub fn count_processed(&self) -> Result<usize, LedgerError> {
        let requests = self.lock()?;
        Ok(requests
            .iter()
            .filter(|request| !request.status.is_pending())
            .count())
    }

    /// Pending, processed and total counts read under one lock.
    pub fn stats(&self) -> Result<RequestStats, LedgerError> {
        let requests = self.lock()?;
        let pending = requests
            .iter()
            .filter(|request| request.status.is_pending())
            .count();
        Ok(RequestStats {
            pending,
            processed: requests.len() - pending,
            total: requests.len(),
        })
    }

    pub fn len(&self) -> Result<usize, LedgerError> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, LedgerError> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Vec<CheckinRequest>>, LedgerError> {
        self.requests.lock().map_err(|_| LedgerError::Unavailable)
    }

    #[cfg(test)]
    pub(crate) fn poisoned() -> Self {
        let ledger = Self::new();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = ledger.requests.lock();
            panic!("poison request ledger");
        }));
        ledger
    }
}

/// Sort by creation time, newest first. Reversing insertion order before the stable sort
/// puts the later-inserted request first when timestamps tie.
fn newest_first<'a>(
    requests: impl DoubleEndedIterator<Item = &'a CheckinRequest>,
) -> Vec<CheckinRequest> {
    let mut sorted: Vec<CheckinRequest> = requests.rev().cloned().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Failures raised by the request ledger.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("Request not found")]
    RequestNotFound,
    #[error("request ledger unavailable")]
    Unavailable,
}
