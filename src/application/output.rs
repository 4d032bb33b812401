use colored::Colorize;
use filetree::{Node, Tree};

const INDENT: &str = "  ";

/// Writes results to stdout, colouring directories when the terminal supports it.
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
}

impl Printer {
    pub fn detect() -> Self {
        let color = supports_color::on(supports_color::Stream::Stdout).is_some();
        colored::control::set_override(color);
        Self { color }
    }

    pub fn tree(&self, tree: &Tree) {
        for (id, node) in tree.iter_with_ids() {
            let depth = tree.ancestors(id).count();
            println!("{}{}", INDENT.repeat(depth), self.entry(node));
        }
    }

    pub fn paths<'a>(&self, nodes: impl IntoIterator<Item = &'a Node>) {
        for node in nodes {
            println!("{}", self.path(node));
        }
    }

    pub fn line(&self, text: impl AsRef<str>) {
        println!("{}", text.as_ref());
    }

    fn entry(&self, node: &Node) -> String {
        if node.is_dir() {
            self.directory(format!("{}/", node.name()))
        } else {
            format!("{} ({} bytes)", node.name(), node.size())
        }
    }

    fn path(&self, node: &Node) -> String {
        let path = node.path().display().to_string();
        if node.is_dir() {
            self.directory(path)
        } else {
            path
        }
    }

    fn directory(&self, text: String) -> String {
        if self.color {
            text.blue().bold().to_string()
        } else {
            text
        }
    }
}
