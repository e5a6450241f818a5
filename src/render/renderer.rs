use colored::Colorize;
use scantree::ext::PathExt;
use scantree::{DirNode, LinkView, PathIdentity};

use crate::application::data::OutputMode;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";

/// Turns a scanned tree into output lines.
pub struct Renderer {
    mode: OutputMode,
    color: bool,
}

impl Renderer {
    pub fn new(mode: OutputMode, color: bool) -> Self {
        Renderer { mode, color }
    }

    pub fn render(&self, tree: &DirNode) -> Vec<String> {
        match self.mode {
            OutputMode::Tree => self.render_tree(tree),
            OutputMode::Files => Self::relative_lines(tree.filepaths()),
            OutputMode::Leaves => Self::relative_lines(tree.leafpaths()),
            OutputMode::Dirs => Self::relative_lines(tree.dirpaths()),
            OutputMode::Count => {
                let count = tree.apply(|_| 1usize, |view| view.into_children().sum(), |_| 0);
                vec![count.to_string()]
            }
        }
    }

    fn relative_lines<'a>(paths: impl Iterator<Item = &'a PathIdentity>) -> Vec<String> {
        paths.map(|path| path.relative().slash_display()).collect()
    }

    /// Each subtree folds into its own lines, label first; the parent indents
    /// its children's lines under branch glyphs.
    fn render_tree(&self, tree: &DirNode) -> Vec<String> {
        tree.apply(
            |file| vec![self.label(file.path(), false)],
            |view| {
                let mut lines = vec![self.label(view.path(), true)];
                let children = view.into_children().collect::<Vec<_>>();
                let last = children.len().saturating_sub(1);
                for (index, child) in children.into_iter().enumerate() {
                    let (first_prefix, rest_prefix) = if index == last {
                        (LAST_BRANCH, SPACE)
                    } else {
                        (BRANCH, PIPE)
                    };
                    for (line_index, line) in child.into_iter().enumerate() {
                        let prefix = if line_index == 0 {
                            first_prefix
                        } else {
                            rest_prefix
                        };
                        lines.push(format!("{prefix}{line}"));
                    }
                }
                lines
            },
            |link| vec![self.link_label(link)],
        )
    }

    fn label(&self, path: &PathIdentity, is_dir: bool) -> String {
        let name = path.name().to_string_lossy();
        match (is_dir, self.color) {
            (true, true) => format!("{}/", name.blue().bold()),
            (true, false) => format!("{name}/"),
            (false, _) => name.into_owned(),
        }
    }

    fn link_label(&self, link: LinkView<'_>) -> String {
        let name = link.path().name().to_string_lossy();
        let text = match link {
            LinkView::Cyclic(cyclic) => {
                format!("{name}/ -> {} (cycle)", cyclic.target_path().display())
            }
            LinkView::Unfollowed(_) => format!("{name}/ -> (not followed)"),
        };
        if self.color {
            text.yellow().to_string()
        } else {
            text
        }
    }
}
