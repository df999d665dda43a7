//! Minimal tag tree and its text rendering.
//!
//! The partition list is assembled as a tree of [`Element`]s and written in a
//! single depth-first pass. Tree construction never touches the output, so
//! document shape can be checked structurally and the rendering separately.

use std::io::{self, Write};

/// A tag with ordered attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attributes: Vec<(&'static str, String)>,
    children: Vec<Element>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Append an attribute.
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Append a child.
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Append children.
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = Element>,
    {
        self.children.extend(children);
        self
    }

    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Value of the first attribute called `name`.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn attributes(&self) -> &[(&'static str, String)] {
        &self.attributes
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// Elements in this subtree (including self).
    pub fn subtree_len(&self) -> usize {
        1 + self.children.iter().map(Element::subtree_len).sum::<usize>()
    }
}

/// Attribute quote character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quote {
    /// `'`
    Single,
    /// `"`
    Double,
}

impl Quote {
    pub const fn as_char(&self) -> char {
        match self {
            Quote::Single => '\'',
            Quote::Double => '"',
        }
    }

    /// Entity written in place of the quote character inside a value.
    pub const fn entity(&self) -> &'static str {
        match self {
            Quote::Single => "&apos;",
            Quote::Double => "&quot;",
        }
    }
}

/// Cosmetic rendering choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderStyle {
    /// One level of indentation
    pub indent: String,
    /// Elements shallower than this depth are written flush left
    pub flush_depth: usize,
    /// Attribute quoting
    pub quote: Quote,
}

impl RenderStyle {
    /// Byte-compatible with the partition files already deployed: single
    /// quotes, the two outer tags flush left, three spaces per level below.
    pub fn legacy() -> Self {
        Self {
            indent: "   ".to_string(),
            flush_depth: 2,
            quote: Quote::Single,
        }
    }

    /// Two-space nesting with double quotes.
    pub fn pretty() -> Self {
        Self {
            indent: "  ".to_string(),
            flush_depth: 1,
            quote: Quote::Double,
        }
    }

    fn write_indent<W: Write>(&self, out: &mut W, depth: usize) -> io::Result<()> {
        if depth >= self.flush_depth {
            for _ in 0..=(depth - self.flush_depth) {
                out.write_all(self.indent.as_bytes())?;
            }
        }
        Ok(())
    }
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self::legacy()
    }
}

/// Write `root` and its subtree to `out`.
pub fn write_document<W: Write>(out: &mut W, root: &Element, style: &RenderStyle) -> io::Result<()> {
    write_element(out, root, 0, style)
}

/// Render into a string.
pub fn render_to_string(root: &Element, style: &RenderStyle) -> io::Result<String> {
    let mut buf = Vec::new();
    write_document(&mut buf, root, style)?;
    String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

fn write_element<W: Write>(
    out: &mut W,
    element: &Element,
    depth: usize,
    style: &RenderStyle,
) -> io::Result<()> {
    style.write_indent(out, depth)?;
    write!(out, "<{}", element.tag)?;
    for (name, value) in &element.attributes {
        let quote = style.quote.as_char();
        write!(out, " {}={}", name, quote)?;
        write_escaped(out, value, style.quote)?;
        write!(out, "{}", quote)?;
    }

    if element.children.is_empty() {
        return out.write_all(b" />\n");
    }

    out.write_all(b">\n")?;
    for child in &element.children {
        write_element(out, child, depth + 1, style)?;
    }
    style.write_indent(out, depth)?;
    writeln!(out, "</{}>", element.tag)
}

fn write_escaped<W: Write>(out: &mut W, value: &str, quote: Quote) -> io::Result<()> {
    let mut start = 0;
    for (pos, c) in value.char_indices() {
        let entity = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' => "&gt;",
            c if c == quote.as_char() => quote.entity(),
            _ => continue,
        };
        out.write_all(value[start..pos].as_bytes())?;
        out.write_all(entity.as_bytes())?;
        start = pos + c.len_utf8();
    }
    out.write_all(value[start..].as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Element {
        Element::new("BG").with_child(
            Element::new("PartitionList").with_child(
                Element::new("Partition")
                    .with_attr("name", "P1")
                    .with_child(Element::new("NodeCard").with_attr("id", "R00-M0-N00"))
                    .with_child(Element::new("NodeCard").with_attr("id", "R00-M0-N01")),
            ),
        )
    }

    #[test]
    fn legacy_layout() {
        let text = render_to_string(&sample(), &RenderStyle::legacy()).unwrap();
        let expected = "\
<BG>
<PartitionList>
   <Partition name='P1'>
      <NodeCard id='R00-M0-N00' />
      <NodeCard id='R00-M0-N01' />
   </Partition>
</PartitionList>
</BG>
";
        assert_eq!(text, expected);
    }

    #[test]
    fn pretty_layout() {
        let text = render_to_string(&sample(), &RenderStyle::pretty()).unwrap();
        let expected = "\
<BG>
  <PartitionList>
    <Partition name=\"P1\">
      <NodeCard id=\"R00-M0-N00\" />
      <NodeCard id=\"R00-M0-N01\" />
    </Partition>
  </PartitionList>
</BG>
";
        assert_eq!(text, expected);
    }

    #[test]
    fn escapes_attribute_values() {
        let element = Element::new("Partition").with_attr("name", "a<b>&'c\"");
        assert_eq!(
            render_to_string(&element, &RenderStyle::legacy()).unwrap(),
            "<Partition name='a&lt;b&gt;&amp;&apos;c\"' />\n"
        );
        assert_eq!(
            render_to_string(&element, &RenderStyle::pretty()).unwrap(),
            "<Partition name=\"a&lt;b&gt;&amp;'c&quot;\" />\n"
        );
    }

    #[test]
    fn quote_variants() {
        assert_eq!(Quote::Single.as_char(), '\'');
        assert_eq!(Quote::Single.entity(), "&apos;");
        assert_eq!(Quote::Double.as_char(), '"');
        assert_eq!(Quote::Double.entity(), "&quot;");
    }

    #[test]
    fn escapes_around_multibyte_text() {
        let element = Element::new("Partition").with_attr("name", "«a'b»\"é&");
        assert_eq!(
            render_to_string(&element, &RenderStyle::legacy()).unwrap(),
            "<Partition name='«a&apos;b»\"é&amp;' />\n"
        );
        assert_eq!(
            render_to_string(&element, &RenderStyle::pretty()).unwrap(),
            "<Partition name=\"«a'b»&quot;é&amp;\" />\n"
        );
    }

    #[test]
    fn render_to_string_matches_write_document() {
        let mut buf = Vec::new();
        write_document(&mut buf, &sample(), &RenderStyle::legacy()).unwrap();
        let text = render_to_string(&sample(), &RenderStyle::legacy()).unwrap();
        assert_eq!(text.as_bytes(), buf.as_slice());
    }

    #[test]
    fn attribute_lookup() {
        let element = Element::new("NodeCard").with_attr("id", "R01-M1-N02");
        assert_eq!(element.tag(), "NodeCard");
        assert_eq!(element.attr("id"), Some("R01-M1-N02"));
        assert_eq!(element.attr("name"), None);
        assert_eq!(element.attributes().len(), 1);
    }

    #[test]
    fn subtree_len_counts_every_element() {
        assert_eq!(sample().subtree_len(), 5);
    }

    #[test]
    fn write_error_propagates() {
        struct Closed;
        impl Write for Closed {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let err = write_document(&mut Closed, &sample(), &RenderStyle::legacy()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
