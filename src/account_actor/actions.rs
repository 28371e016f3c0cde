//! Ledger actions for the Account actor.
//!
//! Each action is one message to the actor, so the check and the balance change happen
//! in a single step that no other request can interleave with.

/// Balance mutations. Both return the new balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerAction {
    /// Adds funds (top-up, admin credit).
    Credit(u64),
    /// Removes funds if the balance covers them (withdrawal, checkout).
    Debit(u64),
}
