//! Flat-to-nested comment reconstruction and pure tree transforms.

use std::collections::HashMap;

use crate::models::Comment;

/// Assemble a flat comment list into a reply forest.
///
/// A comment is placed under its parent when the parent is part of `flat`,
/// otherwise it becomes a root. Roots and siblings keep their input order.
/// Comments caught in a parent loop are promoted to roots at the first loop
/// member in input order, so every input comment appears exactly once.
pub fn build_tree(flat: Vec<Comment>) -> Vec<Comment> {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(flat.len());
    for (i, comment) in flat.iter().enumerate() {
        index.entry(comment.id.clone()).or_insert(i);
    }

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len()];
    let mut roots = Vec::new();
    for (i, comment) in flat.iter().enumerate() {
        let parent = comment
            .parent_id
            .as_ref()
            .and_then(|pid| index.get(pid))
            .copied()
            .filter(|&p| p != i);
        match parent {
            Some(p) => children[p].push(i),
            None => roots.push(i),
        }
    }

    let mut slots: Vec<Option<Comment>> = flat
        .into_iter()
        .map(|mut c| {
            c.replies.clear();
            Some(c)
        })
        .collect();
    let mut visited = vec![false; slots.len()];

    let mut tree = Vec::with_capacity(roots.len());
    for root in roots {
        if let Some(node) = assemble(root, &mut slots, &children, &mut visited) {
            tree.push(node);
        }
    }

    // Whatever is still unvisited hangs off a parent loop.
    for i in 0..slots.len() {
        if !visited[i] {
            if let Some(node) = assemble(i, &mut slots, &children, &mut visited) {
                tree.push(node);
            }
        }
    }

    tree
}

/// Build the subtree rooted at `root` without recursing.
fn assemble(
    root: usize,
    slots: &mut [Option<Comment>],
    children: &[Vec<usize>],
    visited: &mut [bool],
) -> Option<Comment> {
    visited[root] = true;
    let mut stack = vec![(slots[root].take()?, children[root].iter())];

    loop {
        let next = match stack.last_mut() {
            Some((_, pending)) => pending.by_ref().copied().find(|&c| !visited[c]),
            None => return None,
        };

        match next {
            Some(child) => {
                visited[child] = true;
                if let Some(node) = slots[child].take() {
                    stack.push((node, children[child].iter()));
                }
            }
            None => {
                let (node, _) = stack.pop()?;
                match stack.last_mut() {
                    Some((parent, _)) => parent.replies.push(node),
                    None => return Some(node),
                }
            }
        }
    }
}

/// Return a copy of `tree` with the like state of `comment_id` flipped.
///
/// `previous_has_liked == false` means the viewer is liking: the count goes up
/// by one and `has_liked` becomes true. Otherwise the count goes down by one
/// (never below zero) and `has_liked` becomes false. Every other node is left
/// as is. The copy is built with an explicit stack, like [`build_tree`].
pub fn with_like_toggled(
    tree: &[Comment],
    comment_id: &str,
    previous_has_liked: bool,
) -> Vec<Comment> {
    let copy = |comment: &Comment| {
        let mut updated = without_replies(comment);
        if comment.id == comment_id {
            updated.has_liked = !previous_has_liked;
            updated.likes_count = if previous_has_liked {
                updated.likes_count.saturating_sub(1)
            } else {
                updated.likes_count.saturating_add(1)
            };
        }
        updated
    };

    let mut out = Vec::with_capacity(tree.len());
    for root in tree {
        let mut stack = vec![(copy(root), root.replies.iter())];
        loop {
            let next = match stack.last_mut() {
                Some((_, pending)) => pending.next(),
                None => break,
            };

            match next {
                Some(child) => stack.push((copy(child), child.replies.iter())),
                None => {
                    let Some((node, _)) = stack.pop() else { break };
                    match stack.last_mut() {
                        Some((parent, _)) => parent.replies.push(node),
                        None => out.push(node),
                    }
                }
            }
        }
    }
    out
}

fn without_replies(comment: &Comment) -> Comment {
    Comment {
        id: comment.id.clone(),
        post_id: comment.post_id.clone(),
        parent_id: comment.parent_id.clone(),
        author_id: comment.author_id.clone(),
        author: comment.author.clone(),
        content: comment.content.clone(),
        created_at: comment.created_at,
        likes_count: comment.likes_count,
        has_liked: comment.has_liked,
        replies: Vec::new(),
    }
}

/// Total number of comments in the forest.
pub fn count_comments(tree: &[Comment]) -> usize {
    let mut count = 0;
    let mut stack: Vec<&Comment> = tree.iter().collect();
    while let Some(comment) = stack.pop() {
        count += 1;
        stack.extend(comment.replies.iter());
    }
    count
}

/// Find a comment anywhere in the forest.
pub fn find_comment<'a>(tree: &'a [Comment], comment_id: &str) -> Option<&'a Comment> {
    let mut stack: Vec<&Comment> = tree.iter().rev().collect();
    while let Some(comment) = stack.pop() {
        if comment.id == comment_id {
            return Some(comment);
        }
        stack.extend(comment.replies.iter().rev());
    }
    None
}

/// Pre-order walk yielding each comment with its nesting depth (roots are 0).
pub fn flatten_with_depth(tree: &[Comment]) -> Vec<(usize, &Comment)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &Comment)> = tree.iter().rev().map(|c| (0, c)).collect();
    while let Some((depth, comment)) = stack.pop() {
        out.push((depth, comment));
        stack.extend(comment.replies.iter().rev().map(|c| (depth + 1, c)));
    }
    out
}
