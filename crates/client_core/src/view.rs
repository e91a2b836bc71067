//! Plain view tree produced by the render functions.
//!
//! Nodes carry a tag, an optional id, classes, text and at most one click
//! action. Renderers build fresh trees; the page swaps them in wholesale.

use crate::action::UiAction;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewNode {
    pub tag: &'static str,
    pub id: Option<String>,
    pub classes: Vec<&'static str>,
    pub text: Option<String>,
    pub attrs: Vec<(&'static str, String)>,
    pub on_click: Option<UiAction>,
    pub children: Vec<ViewNode>,
}

impl ViewNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            ..Self::default()
        }
    }

    pub fn div() -> Self {
        Self::new("div")
    }

    pub fn button(label: impl Into<String>, action: UiAction) -> Self {
        Self::new("button").text(label).on_click(action)
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn class(mut self, class: &'static str) -> Self {
        self.classes.push(class);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    pub fn on_click(mut self, action: UiAction) -> Self {
        self.on_click = Some(action);
        self
    }

    pub fn child(mut self, child: ViewNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn push(&mut self, child: ViewNode) {
        self.children.push(child);
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| *c == class)
    }

    pub fn attr_value(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn find_by_id(&self, id: &str) -> Option<&ViewNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_by_id(id))
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut ViewNode> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_by_id_mut(id))
    }

    pub fn find_by_class(&self, class: &str) -> Vec<&ViewNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.has_class(class) {
                found.push(node);
            }
        });
        found
    }

    /// Clickable nodes in document order.
    pub fn actions(&self) -> Vec<&ViewNode> {
        let mut found = Vec::new();
        self.walk(&mut |node| {
            if node.on_click.is_some() {
                found.push(node);
            }
        });
        found
    }

    /// Text of this node and all descendants, space separated.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.walk(&mut |node| {
            if let Some(text) = node.text.as_deref().filter(|t| !t.is_empty()) {
                parts.push(text);
            }
        });
        parts.join(" ")
    }

    fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a ViewNode)) {
        visit(self);
        for child in &self.children {
            child.walk(&mut *visit);
        }
    }

    /// Terminal rendering: block nodes on their own line, runs of inline
    /// siblings (buttons, spans, images) joined on one line.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(0, &mut out);
        out
    }

    fn write_text(&self, depth: usize, out: &mut String) {
        if let Some(label) = self.label() {
            push_line(out, depth, &label);
        }

        let child_depth = if self.text.is_some() || !self.classes.is_empty() {
            depth + 1
        } else {
            depth
        };
        let mut inline_run: Vec<String> = Vec::new();
        for child in &self.children {
            if child.is_inline() {
                if let Some(label) = child.label() {
                    inline_run.push(label);
                }
                continue;
            }
            if !inline_run.is_empty() {
                push_line(out, child_depth, &inline_run.join(" "));
                inline_run.clear();
            }
            child.write_text(child_depth, out);
        }
        if !inline_run.is_empty() {
            push_line(out, child_depth, &inline_run.join(" "));
        }
    }

    fn is_inline(&self) -> bool {
        matches!(self.tag, "button" | "span" | "img")
    }

    fn label(&self) -> Option<String> {
        match self.tag {
            "button" => Some(format!("[{}]", self.text.as_deref().unwrap_or_default())),
            "img" => self.attr_value("src").map(|src| format!("<image {src}>")),
            "h1" => self.text.as_ref().map(|text| format!("# {text}")),
            "h3" => self.text.as_ref().map(|text| format!("## {text}")),
            _ => self.text.clone(),
        }
    }
}

fn push_line(out: &mut String, depth: usize, line: &str) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(line);
    out.push('\n');
}
