//! Reassembly of multi-sentence AIS messages

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::core::{Channel, Validity};
use crate::error::AisError;
use crate::frame::{RawSentence, MAX_FRAGMENTS};

/// Key correlating the fragments of one message within a context
pub type FragmentKey = (Option<u8>, Channel);

/// A message whose fragments have only partly arrived
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PendingAssembly {
    fragment_total: u8,
    fragments: Vec<Option<String>>,
    received: u8,
    fill_bits: u8,
}

impl PendingAssembly {
    fn new(fragment_total: u8) -> Self {
        PendingAssembly {
            fragment_total,
            fragments: vec![None; fragment_total as usize],
            received: 0,
            fill_bits: 0,
        }
    }

    /// Number of fragments the message was announced with
    pub fn fragment_total(&self) -> u8 {
        self.fragment_total
    }

    /// Number of distinct fragments stored so far
    pub fn received(&self) -> u8 {
        self.received
    }

    /// Whether every fragment has arrived
    pub fn is_complete(&self) -> bool {
        self.received == self.fragment_total
    }

    fn has(&self, index: u8) -> bool {
        self.fragments[index as usize - 1].is_some()
    }

    fn store(&mut self, sentence: &RawSentence) {
        self.fragments[sentence.fragment_index as usize - 1] = Some(sentence.payload.clone());
        self.received += 1;
        if sentence.fragment_index == self.fragment_total {
            self.fill_bits = sentence.fill_bits;
        }
    }

    fn concatenate(self) -> (String, u8) {
        let payload = self.fragments.into_iter().flatten().collect::<String>();
        (payload, self.fill_bits)
    }
}

/// Caller-owned correlation state for one input stream
///
/// Fragments are only ever matched against other fragments of the same
/// context, so independent receivers must use independent contexts.
#[derive(Debug, Clone, Default)]
pub struct CorrelationContext {
    pending: HashMap<FragmentKey, PendingAssembly>,
}

impl CorrelationContext {
    /// Create an empty context
    pub fn new() -> Self {
        CorrelationContext {
            pending: HashMap::new(),
        }
    }

    /// Number of messages awaiting fragments
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no message is awaiting fragments
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Pending assembly for a sequential id and channel
    pub fn pending(&self, seq_id: Option<u8>, channel: Channel) -> Option<&PendingAssembly> {
        self.pending.get(&(seq_id, channel))
    }

    /// Drop every pending assembly
    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// A complete payload ready for de-armoring
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssembledPayload {
    /// Armored payload of all fragments, in index order
    pub payload: String,
    /// Fill bits of the final fragment
    pub fill_bits: u8,
    /// Number of sentences the payload was assembled from
    pub fragment_count: u8,
    /// Radio channel of the fragments
    pub channel: Channel,
}

/// Result of feeding one sentence to the assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FragmentOutcome {
    /// The sentence completed a message
    Complete(AssembledPayload),
    /// The sentence was stored; more fragments are needed
    Pending,
    /// The sentence was dropped
    Rejected(AisError),
}

impl FragmentOutcome {
    /// Validity hint for the sentence that produced this outcome
    pub fn validity(&self) -> Validity {
        match self {
            FragmentOutcome::Complete(_) => Validity::Valid,
            FragmentOutcome::Pending => Validity::Partial,
            FragmentOutcome::Rejected(_) => Validity::Invalid,
        }
    }

    /// The assembled payload, if the message is complete
    pub fn into_payload(self) -> Option<AssembledPayload> {
        match self {
            FragmentOutcome::Complete(payload) => Some(payload),
            _ => None,
        }
    }
}

/// Groups fragments by sequential id and channel
pub struct FragmentAssembler;

impl FragmentAssembler {
    /// Feed one framed sentence into `context`
    ///
    /// Single-sentence messages pass straight through. A first fragment
    /// (re)starts an assembly; later fragments are stored at their index.
    /// Orphans, duplicates and fragments disagreeing with the pending
    /// fragment count are rejected without failing the stream.
    pub fn ingest(context: &mut CorrelationContext, sentence: &RawSentence) -> FragmentOutcome {
        let (index, total) = (sentence.fragment_index, sentence.fragment_total);
        if total == 0 || total > MAX_FRAGMENTS || index == 0 || index > total {
            debug!(seq_id = ?sentence.seq_id, index, total, "fragment numbering out of range");
            return FragmentOutcome::Rejected(AisError::fragment(format!(
                "Fragment {index}/{total} is not a valid position"
            )));
        }

        if total == 1 {
            return FragmentOutcome::Complete(AssembledPayload {
                payload: sentence.payload.clone(),
                fill_bits: sentence.fill_bits,
                fragment_count: 1,
                channel: sentence.channel,
            });
        }

        let key = (sentence.seq_id, sentence.channel);

        if index < total && sentence.fill_bits != 0 {
            debug!(
                seq_id = ?sentence.seq_id,
                index,
                fill_bits = sentence.fill_bits,
                "ignoring fill bits of non-final fragment"
            );
        }

        if index == 1 {
            let mut assembly = PendingAssembly::new(total);
            assembly.store(sentence);
            if let Some(stale) = context.pending.insert(key, assembly) {
                debug!(
                    seq_id = ?sentence.seq_id,
                    channel = %sentence.channel,
                    received = stale.received,
                    total = stale.fragment_total,
                    "first fragment arrived again, discarding stale partial"
                );
            }
            trace!(seq_id = ?sentence.seq_id, total, "started assembly");
            return FragmentOutcome::Pending;
        }

        let Some(assembly) = context.pending.get_mut(&key) else {
            debug!(seq_id = ?sentence.seq_id, index, total, "orphan fragment, dropping");
            return FragmentOutcome::Rejected(AisError::fragment(format!(
                "Fragment {index}/{total} has no pending first fragment"
            )));
        };

        if assembly.fragment_total != total {
            let expected = assembly.fragment_total;
            context.pending.remove(&key);
            debug!(
                seq_id = ?sentence.seq_id,
                index,
                total,
                expected,
                "fragment count changed, dropping fragment and stale partial"
            );
            return FragmentOutcome::Rejected(AisError::fragment(format!(
                "Fragment {index}/{total} conflicts with pending assembly of {expected}"
            )));
        }

        if assembly.has(index) {
            debug!(seq_id = ?sentence.seq_id, index, total, "duplicate fragment, dropping");
            return FragmentOutcome::Rejected(AisError::fragment(format!(
                "Fragment {index}/{total} already received"
            )));
        }

        assembly.store(sentence);
        trace!(
            seq_id = ?sentence.seq_id,
            received = assembly.received,
            total,
            "stored fragment"
        );
        if !assembly.is_complete() {
            return FragmentOutcome::Pending;
        }

        let Some(assembly) = context.pending.remove(&key) else {
            return FragmentOutcome::Pending;
        };
        let (payload, fill_bits) = assembly.concatenate();
        FragmentOutcome::Complete(AssembledPayload {
            payload,
            fill_bits,
            fragment_count: total,
            channel: sentence.channel,
        })
    }
}
