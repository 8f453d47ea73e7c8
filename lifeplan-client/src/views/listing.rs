use tracing::debug;

/// Handle for one fetch of a [`Listing`]. Later tickets carry higher numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// The in-memory copy of a list plus the bookkeeping to keep it fresh.
///
/// Fetches may finish out of order. Once a ticket has settled, success or
/// failure, the results of every older ticket are dropped, so a slow response
/// for an old filter can never overwrite a newer one.
#[derive(Debug, Clone)]
pub struct Listing<T> {
    items: Vec<T>,
    issued: u64,
    settled: u64,
    loaded: bool,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            issued: 0,
            settled: 0,
            loaded: false,
        }
    }
}

impl<T> Listing<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// At least one fetch has been applied.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// The newest issued fetch has not settled yet.
    pub fn is_loading(&self) -> bool {
        self.issued > self.settled
    }

    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        Ticket(self.issued)
    }

    /// Apply the result of a fetch. Returns false when the ticket was stale and
    /// the items were dropped.
    pub fn complete(&mut self, ticket: Ticket, items: Vec<T>) -> bool {
        if !self.settle(ticket) {
            return false;
        }
        self.items = items;
        self.loaded = true;
        true
    }

    /// Record a failed fetch. The current items stay.
    pub fn fail(&mut self, ticket: Ticket) -> bool {
        self.settle(ticket)
    }

    fn settle(&mut self, ticket: Ticket) -> bool {
        if ticket.0 <= self.settled {
            debug!(
                ticket = ticket.0,
                settled = self.settled,
                "dropping stale list response"
            );
            return false;
        }
        self.settled = ticket.0;
        true
    }
}
