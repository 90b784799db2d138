//! Scope-aware, line-selective renderer.
//!
//! Walks a parsed file's CST once to learn, per line, which syntactic nodes
//! start there and which scopes enclose it; then, given a set of lines of
//! interest, expands to a minimal display set that still shows enclosing
//! headers, and renders it with ellipsis markers for the gaps.

use std::collections::{HashMap, HashSet};

use tree_sitter::{Tree, TreeCursor};

const DEFAULT_HEADER_MAX: usize = 10;

/// `(size, start, end)`: a candidate header span for the node beginning a
/// line, in source-line units.
type HeaderSpan = (usize, usize, usize);

pub struct TreeContext {
    pub parent_context: bool,
    pub child_context: bool,
    pub last_line: bool,
    pub margin: usize,
    pub mark_lois: bool,
    pub header_max: usize,
    pub show_top_of_file_parent_scope: bool,
    pub loi_pad: usize,
    pub line_number: bool,

    lois: HashSet<usize>,
    show_lines: HashSet<usize>,
    num_lines: usize,
    lines: Vec<String>,
    done_parent_scopes: HashSet<usize>,
    /// Per-line spans `(start, end)` of every node starting there.
    node_spans: Vec<Vec<(usize, usize)>>,
    scopes: Vec<HashSet<usize>>,
    /// Per-line normalized header `(0, start, end)`, filled by `arrange_headers`.
    headers: Vec<HeaderSpan>,
    /// Per-line candidate headers gathered during `walk`, consumed by
    /// `arrange_headers`.
    raw_header_candidates: HashMap<usize, Vec<HeaderSpan>>,
}

impl TreeContext {
    /// `code` is the full file text; `num_lines` follows the spec's one-past
    /// -end sentinel convention (`lines.len() + 1`).
    pub fn new(code: &str) -> Self {
        let lines: Vec<String> = code.split('\n').map(str::to_string).collect();
        let num_lines = lines.len() + 1;

        TreeContext {
            parent_context: true,
            child_context: false,
            last_line: false,
            margin: 0,
            mark_lois: false,
            header_max: DEFAULT_HEADER_MAX,
            show_top_of_file_parent_scope: false,
            loi_pad: 0,
            line_number: false,
            lois: HashSet::new(),
            show_lines: HashSet::new(),
            num_lines,
            lines,
            done_parent_scopes: HashSet::new(),
            node_spans: vec![Vec::new(); num_lines],
            scopes: vec![HashSet::new(); num_lines],
            headers: vec![(0, 0, 0); num_lines],
            raw_header_candidates: HashMap::new(),
        }
    }

    /// Walk `tree`'s root in pre-order, then normalize headers. Must run
    /// before any LOIs are added.
    pub fn init(&mut self, tree: &Tree) {
        self.walk(&mut tree.walk());
        self.arrange_headers();
    }

    /// Iterative pre-order walk using the cursor's own first-child /
    /// next-sibling / parent navigation — CSTs can get deep enough that a
    /// recursive walk risks overflowing the stack.
    fn walk(&mut self, cursor: &mut TreeCursor) {
        loop {
            let node = cursor.node();
            let start = node.start_position().row;
            let end = node.end_position().row;
            let size = end.saturating_sub(start);

            if start >= self.num_lines {
                return;
            }

            self.node_spans[start].push((start, end));
            if size > 0 {
                self.raw_header_candidates
                    .entry(start)
                    .or_default()
                    .push((size, start, end));
            }

            for i in start..=end.min(self.num_lines - 1) {
                self.scopes[i].insert(start);
            }

            if cursor.goto_first_child() {
                continue;
            }
            if cursor.goto_next_sibling() {
                continue;
            }
            loop {
                if !cursor.goto_parent() {
                    return;
                }
                if cursor.goto_next_sibling() {
                    break;
                }
            }
        }
    }

    /// For each line: keep the smallest enclosing header if several start
    /// there, clipped to `header_max` lines; lines with no multi-line node
    /// get a trivial one-line header.
    fn arrange_headers(&mut self) {
        for line in 0..self.num_lines {
            let candidates = self.raw_header_candidates.remove(&line).unwrap_or_default();
            if candidates.is_empty() {
                self.headers[line] = (0, line, line + 1);
                continue;
            }

            let mut sorted = candidates;
            sorted.sort_by_key(|&(size, _, _)| size);

            let start_end = if sorted.len() > 1 {
                let (size, start, end) = sorted[0];
                if size > self.header_max {
                    (start, start + self.header_max)
                } else {
                    (start, end)
                }
            } else {
                (line, line + 1)
            };

            self.headers[line] = (0, start_end.0, start_end.1);
        }
    }

    pub fn add_lois(&mut self, lois: &[usize]) {
        for &loi in lois {
            if loi < self.num_lines {
                self.lois.insert(loi);
            }
        }
    }

    /// Expand `lois` into `show_lines` per the context-expansion rules,
    /// then close small gaps.
    pub fn add_context(&mut self) {
        if self.lois.is_empty() {
            return;
        }

        for &loi in &self.lois {
            self.show_lines.insert(loi);
        }

        if self.loi_pad > 0 {
            for line in self.show_lines.clone() {
                let start = line.saturating_sub(self.loi_pad);
                let end = (line + self.loi_pad).min(self.num_lines - 1);
                for new_line in start..=end {
                    self.show_lines.insert(new_line);
                }
            }
        }

        if self.last_line && self.num_lines > 2 {
            let bottom = self.num_lines - 2;
            self.show_lines.insert(bottom);
            self.add_parent_scopes(bottom);
        }

        if self.parent_context {
            let lois: Vec<usize> = self.lois.iter().copied().collect();
            for index in lois {
                self.add_parent_scopes(index);
            }
        }

        if self.child_context {
            let lois: Vec<usize> = self.lois.iter().copied().collect();
            for index in lois {
                self.add_child_context(index);
            }
        }

        if self.margin > 0 {
            for i in 0..self.margin.min(self.num_lines) {
                self.show_lines.insert(i);
            }
        }

        self.close_small_gaps();
    }

    fn add_parent_scopes(&mut self, index: usize) {
        if index >= self.num_lines || self.done_parent_scopes.contains(&index) {
            return;
        }
        self.done_parent_scopes.insert(index);

        let scope_starts: Vec<usize> = self.scopes[index].iter().copied().collect();
        for line_num in scope_starts {
            if line_num >= self.headers.len() {
                continue;
            }
            let (_, head_start, head_end) = self.headers[line_num];
            if head_end < self.num_lines && (head_start > 0 || self.show_top_of_file_parent_scope) {
                for i in head_start..head_end {
                    self.show_lines.insert(i);
                }
            }

            if self.last_line {
                let last = self.last_line_of_scope(line_num);
                self.add_parent_scopes(last);
            }
        }
    }

    fn add_child_context(&mut self, index: usize) {
        if index >= self.num_lines || self.node_spans[index].is_empty() {
            return;
        }

        let last_line = self.last_line_of_scope(index);
        let size = last_line.saturating_sub(index);

        if size < 5 {
            for i in index..=last_line.min(self.num_lines - 1) {
                self.show_lines.insert(i);
            }
            return;
        }

        // "Children" here means the *immediate* children of the node at
        // `index` — the same selection `FindAllChildren` makes over live
        // tree-sitter nodes — not every span nested anywhere inside its
        // range. A candidate span nested inside another candidate span is a
        // grandchild (or deeper) and is excluded.
        let mut descendants: Vec<(usize, usize)> = Vec::new();
        for line in index..=last_line.min(self.num_lines - 1) {
            for &(start, end) in &self.node_spans[line] {
                if start > index && end <= last_line {
                    descendants.push((start, end));
                }
            }
        }

        let mut children: Vec<(usize, usize)> = descendants
            .iter()
            .copied()
            .filter(|&(start, end)| {
                !descendants.iter().any(|&(s2, e2)| {
                    (s2, e2) != (start, end) && s2 <= start && e2 >= end
                })
            })
            .collect();
        children.sort_by_key(|&(start, end)| std::cmp::Reverse(end - start));

        let currently_showing = self.show_lines.len();
        let max_to_show = (((size as f64) * 0.10) as usize).min(25).max(5);

        for (child_start, _) in children {
            if self.show_lines.len() > currently_showing + max_to_show {
                return;
            }
            self.add_parent_scopes(child_start);
        }
    }

    fn last_line_of_scope(&self, index: usize) -> usize {
        if index >= self.num_lines {
            return index;
        }
        let mut last = index;
        for &(_, end) in &self.node_spans[index] {
            if end > last {
                last = end;
            }
        }
        last.min(self.num_lines - 1)
    }

    fn close_small_gaps(&mut self) {
        let mut sorted: Vec<usize> = self.show_lines.iter().copied().collect();
        sorted.sort_unstable();

        for w in sorted.windows(2) {
            if w[1] - w[0] == 2 {
                self.show_lines.insert(w[0] + 1);
            }
        }

        for i in 0..self.lines.len() {
            if !self.show_lines.contains(&i) {
                continue;
            }
            let line_is_blank = self.lines[i].trim().is_empty();
            let next_is_blank = self.lines.get(i + 1).is_some_and(|next| next.trim().is_empty());
            if !line_is_blank && i < self.num_lines.saturating_sub(2) && next_is_blank {
                self.show_lines.insert(i + 1);
            }
        }
    }

    /// Render the final `show_lines` set, line-ordered, with ellipsis
    /// markers filling the gaps.
    pub fn format(&self) -> String {
        if self.show_lines.is_empty() {
            return String::new();
        }

        let mut output = String::new();
        let mut dots = !self.show_lines.contains(&0);

        for (index, line) in self.lines.iter().enumerate() {
            if !self.show_lines.contains(&index) {
                if dots {
                    if self.line_number {
                        output.push_str("...⋮...\n");
                    } else {
                        output.push_str("⋮...\n");
                    }
                    dots = false;
                }
                continue;
            }

            let spacer = if self.mark_lois && self.lois.contains(&index) {
                "█"
            } else {
                "|"
            };
            output.push_str(spacer);
            output.push_str(line);
            output.push('\n');
            dots = true;
        }

        output
    }

    pub fn show_lines(&self) -> &HashSet<usize> {
        &self.show_lines
    }

    pub fn num_lines(&self) -> usize {
        self.num_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> Tree {
        let mut parser = Parser::new();
        parser.set_language(&tree_sitter_go::LANGUAGE.into()).unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn show_lines_stays_within_bounds() {
        let source = "package main\n\nfunc Foo() {\n\tprintln(\"hi\")\n}\n";
        let tree = parse(source);
        let mut ctx = TreeContext::new(source);
        ctx.init(&tree);
        ctx.add_lois(&[3]);
        ctx.add_context();

        assert!(ctx.show_lines().len() <= ctx.num_lines());
        assert!(ctx.show_lines().iter().all(|&l| l < ctx.num_lines()));
    }

    #[test]
    fn no_lois_produces_empty_output() {
        let source = "package main\nfunc Foo() {}\n";
        let tree = parse(source);
        let mut ctx = TreeContext::new(source);
        ctx.init(&tree);
        ctx.add_context();
        assert_eq!(ctx.format(), "");
    }

    #[test]
    fn add_child_context_only_expands_immediate_children() {
        // Hand-built spans, bypassing `init`/`walk`, to isolate
        // `add_child_context` from how the candidate set got built: a parent
        // at line 2 spanning 2..8, an immediate child at line 3 spanning
        // 3..7, and a grandchild at line 4 spanning 4..5 nested inside the
        // child. Only the immediate child's header should be pulled in.
        let source = "l0\nl1\nl2\nl3\nl4\nl5\nl6\nl7\nl8\nl9";
        let mut ctx = TreeContext::new(source);
        ctx.node_spans[2] = vec![(2, 8)];
        ctx.node_spans[3] = vec![(3, 7)];
        ctx.node_spans[4] = vec![(4, 5)];
        ctx.scopes[3] = [3].into_iter().collect();
        ctx.scopes[4] = [4].into_iter().collect();
        ctx.headers[3] = (0, 3, 4);
        ctx.headers[4] = (0, 4, 5);

        ctx.add_child_context(2);

        assert!(ctx.show_lines.contains(&3), "immediate child's header should be shown");
        assert!(!ctx.show_lines.contains(&4), "grandchild's header should not be shown");
    }

    #[test]
    fn gap_of_one_blank_line_is_closed() {
        let source = "line0\nline1\n\nline3\nline4\n";
        let tree = parse(source);
        let mut ctx = TreeContext::new(source);
        ctx.init(&tree);
        ctx.add_lois(&[0, 3]);
        ctx.add_context();

        assert!(ctx.show_lines().contains(&0));
        assert!(ctx.show_lines().contains(&3));
    }

    #[test]
    fn unshown_first_line_starts_output_with_ellipsis() {
        let source = "line0\nline1\nline2\n";
        let tree = parse(source);
        let mut ctx = TreeContext::new(source);
        ctx.init(&tree);
        ctx.add_lois(&[2]);
        ctx.add_context();
        let out = ctx.format();
        assert!(out.starts_with('⋮') || out.starts_with("..."));
    }

    #[test]
    fn long_function_header_is_clipped_to_header_max() {
        let mut source = String::from("package main\n\nfunc Foo() {\n");
        for _ in 0..25 {
            source.push_str("\tx := 1\n");
        }
        source.push_str("}\n");

        let tree = parse(&source);
        let mut ctx = TreeContext::new(&source);
        ctx.init(&tree);

        // Line 2 is `func Foo() {` — its header candidate spans the whole
        // function body (26+ lines), well past `header_max`, so it must be
        // clipped to exactly `header_max` lines starting there.
        let (_, start, end) = ctx.headers[2];
        assert_eq!(start, 2);
        assert_eq!(end - start, ctx.header_max);
    }

    #[test]
    fn render_snapshot_for_alternating_shown_lines() {
        // Bypasses `init`/`add_context` to pin down exactly what `format`
        // does with a known `show_lines` set, independent of how that set
        // got built.
        let mut ctx = TreeContext::new("foo\nbar\nbaz\nqux\nquux");
        ctx.mark_lois = true;
        ctx.lois = [0usize, 4].into_iter().collect();
        ctx.show_lines = [0usize, 2, 4].into_iter().collect();

        insta::assert_snapshot!(ctx.format(), @"█foo
⋮...
|baz
⋮...
█quux
");
    }
}
