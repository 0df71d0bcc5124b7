//! Threaded view over a flat list of comments.

use super::{Comment, CommentId};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// What the assembler does with a reply whose parent is not in the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrphanPolicy {
    /// Leave the reply out of the threaded view.
    #[default]
    Drop,
    /// Show the reply as a root comment of its own.
    PromoteToRoot,
}

/// A direct reply to a root comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentReply {
    /// The reply itself.
    pub comment: Comment,
    /// Number of comments in the batch that reply to this reply. They are
    /// counted here but not nested.
    pub reply_count: usize,
}

/// A root comment with its direct replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentThread {
    /// The root comment.
    pub comment: Comment,
    /// Direct replies in input order.
    pub replies: Vec<CommentReply>,
    /// Length of `replies`.
    pub reply_count: usize,
}

/// Groups a flat comment list into root threads one level deep.
///
/// Roots and replies keep their input order. A reply to a reply is counted on
/// its parent reply but does not appear in the output. Replies whose parent is
/// absent from `comments` follow `orphans`. When an id occurs more than once
/// only its first occurrence is used. The input is not modified, and the run
/// is linear in the number of comments.
#[must_use]
pub fn assemble_threads(comments: &[Comment], orphans: OrphanPolicy) -> Vec<CommentThread> {
    let mut seen: HashSet<CommentId> = HashSet::with_capacity(comments.len());
    let unique: Vec<&Comment> = comments
        .iter()
        .filter(|comment| seen.insert(comment.id()))
        .collect();

    let mut direct_replies: HashMap<CommentId, usize> = HashMap::new();
    for parent in unique.iter().filter_map(|comment| comment.parent_id()) {
        if seen.contains(&parent) {
            *direct_replies.entry(parent).or_default() += 1;
        }
    }

    let mut threads: Vec<CommentThread> = Vec::new();
    let mut thread_positions: HashMap<CommentId, usize> = HashMap::new();
    for comment in &unique {
        let is_root = match comment.parent_id() {
            None => true,
            Some(parent) => !seen.contains(&parent) && orphans == OrphanPolicy::PromoteToRoot,
        };
        if is_root {
            thread_positions.insert(comment.id(), threads.len());
            threads.push(CommentThread {
                comment: (*comment).clone(),
                replies: Vec::new(),
                reply_count: 0,
            });
        }
    }

    for comment in &unique {
        let Some(position) = comment
            .parent_id()
            .and_then(|parent| thread_positions.get(&parent))
        else {
            continue;
        };
        if let Some(thread) = threads.get_mut(*position) {
            thread.replies.push(CommentReply {
                comment: (*comment).clone(),
                reply_count: direct_replies.get(&comment.id()).copied().unwrap_or(0),
            });
        }
    }

    for thread in &mut threads {
        thread.reply_count = thread.replies.len();
    }
    threads
}
