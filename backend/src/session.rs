//! The single "currently selected route".
//!
//! Route requests can finish out of order: the last request to start is not
//! necessarily the last to finish. Every request takes a [`RequestTicket`]
//! before doing any work, and its result is only committed if no newer ticket
//! has been issued in the meantime.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    RwLock,
};

use shared::{RouteData, TravelMode};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("request {ticket} was superseded by request {current}")]
    Superseded { ticket: u64, current: u64 },
    #[error("no route has been selected yet")]
    NoSelection,
    #[error("route alternative {index} does not exist ({available} available)")]
    NoSuchAlternative { index: usize, available: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    generation: u64,
}

impl RequestTicket {
    pub fn id(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone)]
pub struct SelectedRoute {
    pub request_id: u64,
    pub mode: TravelMode,
    pub index: usize,
    pub route: RouteData,
}

#[derive(Debug, Default)]
struct Committed {
    request_id: u64,
    mode: TravelMode,
    alternatives: Vec<RouteData>,
    selected: usize,
}

#[derive(Debug, Default)]
pub struct RouteSession {
    issued: AtomicU64,
    committed: RwLock<Option<Committed>>,
}

impl RouteSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request; every earlier ticket becomes stale.
    pub fn begin(&self) -> RequestTicket {
        let generation = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        RequestTicket { generation }
    }

    /// Replace the committed alternatives wholesale and select the first one,
    /// unless a newer request has started since `ticket` was issued.
    pub fn commit(
        &self,
        ticket: RequestTicket,
        mode: TravelMode,
        alternatives: Vec<RouteData>,
    ) -> Result<(), SessionError> {
        let mut committed = self
            .committed
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let current = self.issued.load(Ordering::SeqCst);
        if current != ticket.generation {
            tracing::warn!(
                "Discarding stale route result {} (current request {})",
                ticket.generation,
                current
            );
            return Err(SessionError::Superseded {
                ticket: ticket.generation,
                current,
            });
        }

        *committed = Some(Committed {
            request_id: ticket.generation,
            mode,
            alternatives,
            selected: 0,
        });
        Ok(())
    }

    pub fn select(&self, index: usize) -> Result<SelectedRoute, SessionError> {
        let mut committed = self
            .committed
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let state = committed.as_mut().ok_or(SessionError::NoSelection)?;

        if index >= state.alternatives.len() {
            return Err(SessionError::NoSuchAlternative {
                index,
                available: state.alternatives.len(),
            });
        }
        state.selected = index;
        Ok(SelectedRoute {
            request_id: state.request_id,
            mode: state.mode,
            index,
            route: state.alternatives[index].clone(),
        })
    }

    pub fn selected(&self) -> Option<SelectedRoute> {
        let committed = self
            .committed
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let state = committed.as_ref()?;
        let route = state.alternatives.get(state.selected)?.clone();
        Some(SelectedRoute {
            request_id: state.request_id,
            mode: state.mode,
            index: state.selected,
            route,
        })
    }
}
