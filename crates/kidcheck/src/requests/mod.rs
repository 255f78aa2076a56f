//! Check-in and check-out requests raised by parents and resolved by staff.

pub mod domain;
pub mod ledger;
pub mod router;

#[cfg(test)]
mod tests;

pub use domain::{
    CheckinRequest, NewCheckinRequest, RequestId, RequestKind, RequestStats, RequestStatus,
    StatusUpdate,
};
pub use ledger::{LedgerError, RequestLedger};
pub use router::{
    request_router, CreateRequestPayload, DeleteRequestPayload, ListRequestsQuery,
    UpdateRequestPayload,
};
