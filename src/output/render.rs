//! Depth-first renderer that flattens an inventory into indented lines

use crate::tree::{Inventory, Node, NodeKind, Tree, timestamp};

use super::config::RenderConfig;

/// Render an inventory as one line per node, lazily, in display order.
pub fn render_lines<'a>(inventory: &'a Inventory, config: &'a RenderConfig) -> Lines<'a> {
    let root_line = config
        .show_root
        .then(|| inventory.root.display().to_string());
    Lines {
        config,
        root_line,
        stack: vec![level(&inventory.tree)],
    }
}

/// Format the summary line of a single node at `depth` (0 = top level).
pub fn format_line(node: &Node, depth: usize, config: &RenderConfig) -> String {
    let icon = if config.show_icons {
        format!("{} ", icon(node.kind()))
    } else {
        String::new()
    };
    format!(
        "{} {}{} ({}/{} bytes/{})",
        config.indent.repeat(depth + 1),
        icon,
        node.name(),
        node.kind().as_str(),
        node.size(),
        timestamp::to_display(node.modified())
    )
}

fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Folder => "📁",
        NodeKind::Archive => "🗜",
        NodeKind::File => "📄",
    }
}

fn level(tree: &Tree) -> std::vec::IntoIter<&Node> {
    tree.sorted_entries()
        .into_iter()
        .map(|(_, node)| node)
        .collect::<Vec<_>>()
        .into_iter()
}

/// Iterator over rendered lines.
///
/// Holds one pending sibling list per open level, so memory grows with depth
/// and with the width of the open levels only.
pub struct Lines<'a> {
    config: &'a RenderConfig,
    root_line: Option<String>,
    stack: Vec<std::vec::IntoIter<&'a Node>>,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if let Some(line) = self.root_line.take() {
            return Some(line);
        }
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let next = self.stack.last_mut()?.next();
            match next {
                Some(node) => {
                    let line = format_line(node, depth, self.config);
                    if let Some(children) = node.children() {
                        self.stack.push(level(children));
                    }
                    return Some(line);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
