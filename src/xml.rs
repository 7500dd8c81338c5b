//! Indented XML output.
//!
//! [`XmlWriter`] is a thin layer over [`quick_xml::Writer`] that writes the
//! element shapes the responder needs (open/close, text-only leaf, empty leaf)
//! into an in-memory buffer. Text and attribute values are escaped by quick-xml.
//!
//! # Examples
//!
//! ```ignore
//! use oaipmh::xml::XmlWriter;
//!
//! let mut xml = XmlWriter::new();
//! xml.start("header", &[])?;
//! xml.text_element("identifier", &[], "a & b")?;
//! xml.end("header")?;
//! assert!(xml.into_string()?.contains("<identifier>a &amp; b</identifier>"));
//! # Ok::<(), oaipmh::ResponderError>(())
//! ```

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::Result;

/// An attribute as a `(qualified name, value)` pair.
pub type Attr<'a> = (&'a str, &'a str);

/// Buffered, two-space indented XML writer.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl std::fmt::Debug for XmlWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XmlWriter")
            .field("bytes", &self.inner.get_ref().len())
            .finish()
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlWriter {
    /// Creates an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    /// Writes `<?xml version="1.0" encoding="UTF-8"?>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be written.
    pub fn declaration(&mut self) -> Result<()> {
        self.inner
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        Ok(())
    }

    /// Opens an element.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be written.
    pub fn start(&mut self, name: &str, attrs: &[Attr<'_>]) -> Result<()> {
        let start = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Start(start))?;
        Ok(())
    }

    /// Closes an element opened with [`XmlWriter::start`].
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be written.
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.inner.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Writes `<name attrs>text</name>`.
    ///
    /// # Errors
    ///
    /// Returns an error if an event cannot be written.
    pub fn text_element(&mut self, name: &str, attrs: &[Attr<'_>], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.inner.write_event(Event::Text(BytesText::new(text)))?;
        self.end(name)
    }

    /// Writes `<name attrs/>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the event cannot be written.
    pub fn empty_element(&mut self, name: &str, attrs: &[Attr<'_>]) -> Result<()> {
        let empty = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.inner.write_event(Event::Empty(empty))?;
        Ok(())
    }

    /// Consumes the writer and returns the document.
    ///
    /// # Errors
    ///
    /// Returns an error if the buffer is not valid UTF-8.
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.inner.into_inner())?)
    }
}
