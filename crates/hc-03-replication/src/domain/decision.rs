//! What a received `ChainPayload` asks of us.

use shared_types::Block;

/// Action selected for a received chain, relative to our current tip.
#[derive(Debug, Clone, PartialEq)]
pub enum ChainResponseAction {
    /// Their tip is not ahead of ours.
    Ignore { ours: u64, theirs: u64 },
    /// Their tip links directly onto ours.
    AppendTip(Block),
    /// A lone block that does not link: ask the sender for everything.
    QueryAll,
    /// Several blocks that do not link: try them as a replacement chain.
    ReplaceChain(Vec<Block>),
}

/// Classify `received` against our tip `ours`.
///
/// Blocks are sorted by index first (stable, so duplicates keep their
/// arrival order). Returns `None` for an empty payload.
pub fn classify_chain_response(ours: &Block, mut received: Vec<Block>) -> Option<ChainResponseAction> {
    received.sort_by_key(|b| b.index);
    let theirs = received.last()?;

    if theirs.index <= ours.index {
        return Some(ChainResponseAction::Ignore {
            ours: ours.index,
            theirs: theirs.index,
        });
    }

    if ours.hash == theirs.previous_hash {
        let tip = received.pop()?;
        return Some(ChainResponseAction::AppendTip(tip));
    }

    if received.len() == 1 {
        return Some(ChainResponseAction::QueryAll);
    }

    Some(ChainResponseAction::ReplaceChain(received))
}
