//! Renders Canvas rich content to plain text.
//!
//! Assignment descriptions come back from Canvas as HTML produced by its rich content editor.
//! Calendar clients and terminals want plain text, so block elements become line breaks, lists get
//! markers, and everything else is flattened to its text.
use html_escape::decode_html_entities;
use log::{debug, warn};
use tl::{Node, NodeHandle, Parser, ParserOptions};

/// Render the given HTML to plain text, one line per `\n`.
pub fn render(html: &str) -> String {
    render_lines(html).join("\n")
}

/// Render the given HTML to a list of plain text lines.
pub fn render_lines(html: &str) -> Vec<String> {
    let dom = match tl::parse(html, ParserOptions::default()) {
        Ok(dom) => dom,
        Err(e) => {
            warn!("couldn't parse rich content, using it verbatim: {:?}", e);
            return html.lines().map(|l| l.trim().to_string()).collect();
        }
    };
    let parser = dom.parser();

    let mut out = Lines::default();
    for handle in dom.children() {
        render_node(parser, handle, &mut out);
    }

    out.finish()
}

fn render_node(parser: &Parser, handle: &NodeHandle, out: &mut Lines) {
    let Some(node) = handle.get(parser) else {
        return;
    };

    match node {
        Node::Tag(t) => {
            let tag_name = t.name().as_utf8_str().to_ascii_lowercase();
            let children: Vec<NodeHandle> = t.children().top().iter().copied().collect();
            match tag_name.as_str() {
                "br" => out.break_line(),
                "script" | "style" | "head" | "title" => {}
                "ul" | "ol" => render_list(parser, &children, tag_name == "ol", out),
                "p" | "div" | "li" | "blockquote" | "pre" | "table" | "tr" | "section"
                | "article" | "header" | "footer" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6"
                | "hr" => {
                    out.end_block();
                    render_all(parser, &children, out);
                    out.end_block();
                }
                "td" | "th" => {
                    render_all(parser, &children, out);
                    out.push_text(" ");
                }
                "span" | "strong" | "b" | "em" | "i" | "u" | "a" | "sup" | "sub" | "code"
                | "small" | "font" | "img" | "thead" | "tbody" | "html" | "body" => {
                    render_all(parser, &children, out)
                }
                s => {
                    debug!("unknown tag: {}", s);
                    render_all(parser, &children, out)
                }
            }
        }
        Node::Raw(s) => out.push_text(&s.as_utf8_str()),
        Node::Comment(_) => {}
    }
}

fn render_all(parser: &Parser, children: &[NodeHandle], out: &mut Lines) {
    for child in children {
        render_node(parser, child, out);
    }
}

/// Lists are rendered item by item, so that items spanning several lines can be indented under
/// their marker.
fn render_list(parser: &Parser, children: &[NodeHandle], ordered: bool, out: &mut Lines) {
    out.end_block();

    let mut i = 0;
    for handle in children {
        let Some(Node::Tag(t)) = handle.get(parser) else {
            continue;
        };
        i += 1;
        let marker = if ordered {
            format!("{}. ", i)
        } else {
            "  - ".to_string()
        };

        let mut item = Lines::default();
        if t.name().as_utf8_str().eq_ignore_ascii_case("li") {
            let item_children: Vec<NodeHandle> = t.children().top().iter().copied().collect();
            render_all(parser, &item_children, &mut item);
        } else {
            render_node(parser, handle, &mut item);
        }

        for (n, line) in item.finish().into_iter().enumerate() {
            let prefix = if n == 0 { marker.as_str() } else { "    " };
            out.push_line(format!("{}{}", prefix, line));
        }
    }

    out.end_block();
}

/// Accumulates output lines, collapsing whitespace the way a browser would.
#[derive(Default)]
struct Lines {
    done: Vec<String>,
    current: String,
    space_pending: bool,
}

impl Lines {
    fn push_text(&mut self, text: &str) {
        let decoded = decode_html_entities(text);
        let words: Vec<&str> = decoded.split_whitespace().collect();
        if words.is_empty() {
            if !decoded.is_empty() {
                self.space_pending = !self.current.is_empty();
            }
            return;
        }

        let leading_space = decoded.starts_with(char::is_whitespace) || self.space_pending;
        if leading_space && !self.current.is_empty() {
            self.current.push(' ');
        }
        self.current.push_str(&words.join(" "));
        self.space_pending = decoded.ends_with(char::is_whitespace);
    }

    fn push_line(&mut self, line: String) {
        self.end_block();
        self.done.push(line.trim_end().to_string());
    }

    fn break_line(&mut self) {
        self.done.push(std::mem::take(&mut self.current));
        self.space_pending = false;
    }

    fn end_block(&mut self) {
        if !self.current.is_empty() {
            self.break_line();
        }
        self.space_pending = false;
    }

    fn finish(mut self) -> Vec<String> {
        self.end_block();

        let start = self.done.iter().position(|l| !l.is_empty());
        let end = self.done.iter().rposition(|l| !l.is_empty());
        match (start, end) {
            (Some(start), Some(end)) => self.done.drain(start..=end).collect(),
            _ => vec![],
        }
    }
}
