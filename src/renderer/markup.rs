//! Markup generation from component trees

use crate::schema::{Attribute, Component, ComponentType, Ui};

use super::MarkupConfig;

/// Build markup incrementally, one line at a time
pub struct MarkupBuilder {
    config: MarkupConfig,
    output: String,
    indent: usize,
}

/// Pending work for the depth-first walk
enum Step<'a> {
    Open(&'a Component),
    Close(ComponentType),
}

impl MarkupBuilder {
    /// Create a new markup builder
    pub fn new(config: MarkupConfig) -> Self {
        let indent = config.start_indent;
        Self {
            config,
            output: String::new(),
            indent,
        }
    }

    fn push_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str(&self.config.indent);
        }
    }

    /// Open a tag and move one level deeper
    pub fn start_element(&mut self, kind: ComponentType, attributes: &[Attribute]) {
        self.push_indent();
        self.output.push('<');
        self.output.push_str(kind.as_str());
        for attr in attributes {
            self.output.push(' ');
            self.output.push_str(attr.name());
            self.output.push_str("=\"");
            self.output.push_str(&escape_markup(attr.value()));
            self.output.push('"');
        }
        self.output.push_str(">\n");
        self.indent += 1;
    }

    /// Add a text node at the current level
    ///
    /// The text is split on `\n` and each line is indented on its own.
    /// Empty lines get no indentation, so a trailing newline shows up as a
    /// blank line. A `\r` before a newline stays at the end of its line.
    pub fn add_text(&mut self, text: &str) {
        for line in text.split('\n') {
            if !line.is_empty() {
                self.push_indent();
                self.output.push_str(&escape_markup(line));
            }
            self.output.push('\n');
        }
    }

    /// Move one level up and close a tag
    pub fn end_element(&mut self, kind: ComponentType) {
        self.indent = self.indent.saturating_sub(1);
        self.push_indent();
        self.output.push_str("</");
        self.output.push_str(kind.as_str());
        self.output.push_str(">\n");
    }

    /// Render a component and its subtree in pre-order
    ///
    /// Uses an explicit stack, so arbitrarily deep trees built in code
    /// render without recursion.
    pub fn add_component(&mut self, root: &Component) {
        let mut stack = vec![Step::Open(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Open(component) => {
                    self.start_element(component.kind(), component.attributes());
                    if !component.label().is_empty() {
                        self.add_text(component.label());
                    }
                    stack.push(Step::Close(component.kind()));
                    stack.extend(component.children().iter().rev().map(Step::Open));
                }
                Step::Close(kind) => self.end_element(kind),
            }
        }
    }

    /// Finish and return the markup
    pub fn build(self) -> String {
        self.output
    }
}

/// Render every top-level component of a UI, in order
pub fn render_markup(ui: &Ui, config: &MarkupConfig) -> String {
    let mut builder = MarkupBuilder::new(config.clone());
    for component in ui.components() {
        builder.add_component(component);
    }
    builder.build()
}

/// Render a single component subtree
pub fn render_component(component: &Component, config: &MarkupConfig) -> String {
    let mut builder = MarkupBuilder::new(config.clone());
    builder.add_component(component);
    builder.build()
}

/// Escape characters that would otherwise end a text node or attribute
pub fn escape_markup(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
