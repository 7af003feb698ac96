//! Transient state of the transaction form.
//!
//! At most one edit is active. Starting an edit, cancelling, or clearing the
//! attachment discards any pending receipt and invalidates receipt reads that
//! are still in flight: each read holds an [`AttachTicket`] and only the most
//! recent ticket may stage its result.

use super::models::Receipt;

/// Handle for an in-flight receipt read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachTicket {
    generation: u64,
}

#[derive(Debug, Default)]
pub struct EditSession {
    editing_id: Option<String>,
    pending_receipt: Option<Receipt>,
    remove_existing_receipt: bool,
    attach_generation: u64,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start editing `id`, discarding whatever the previous session staged
    pub fn begin_edit(&mut self, id: &str) {
        self.clear_pending();
        self.editing_id = Some(id.to_string());
    }

    /// Leave edit mode and discard pending receipt state
    pub fn cancel(&mut self) {
        self.clear_pending();
        self.editing_id = None;
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.editing_id.as_deref()
    }

    pub fn is_editing(&self, id: &str) -> bool {
        self.editing_id.as_deref() == Some(id)
    }

    pub fn pending_receipt(&self) -> Option<&Receipt> {
        self.pending_receipt.as_ref()
    }

    pub fn remove_existing_receipt(&self) -> bool {
        self.remove_existing_receipt
    }

    /// Stage a receipt to be saved with the form. Staging a new receipt
    /// overrides an earlier request to remove the existing one.
    pub fn stage_for_edit(&mut self, receipt: Option<Receipt>) {
        if receipt.is_some() {
            self.remove_existing_receipt = false;
        }
        self.pending_receipt = receipt;
    }

    /// Drop the receipt on save. Outside an edit there is nothing to remove,
    /// so this only clears the pending attachment.
    pub fn mark_for_removal(&mut self) {
        let editing = self.editing_id.is_some();
        self.clear_pending();
        self.remove_existing_receipt = editing;
    }

    pub fn clear_pending(&mut self) {
        self.pending_receipt = None;
        self.remove_existing_receipt = false;
        self.attach_generation += 1;
    }

    /// Register a new receipt read, superseding any read still in flight
    pub fn begin_attach(&mut self) -> AttachTicket {
        self.attach_generation += 1;
        AttachTicket {
            generation: self.attach_generation,
        }
    }

    /// Whether `ticket` belongs to the most recent read
    pub fn is_current(&self, ticket: AttachTicket) -> bool {
        ticket.generation == self.attach_generation
    }

    /// Stage the result of a read. Returns `false` and discards the receipt
    /// when the ticket has been superseded.
    pub fn complete_attach(&mut self, ticket: AttachTicket, receipt: Receipt) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.stage_for_edit(Some(receipt));
        true
    }
}
