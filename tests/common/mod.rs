//! Common test helpers and fixtures shared across the integration tests.

#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use oaipmh::{MemoryCatalog, Record, RecordField, Responder};
use quick_xml::events::Event;
use quick_xml::Reader;

/// Base URL records are identified under in the default configuration.
pub const IDENTIFIER_BASE: &str = "https://github.com/grycap/tosca/blob/main/templates/";

/// A fixed response timestamp so documents are reproducible.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 17, 9, 30, 5).unwrap()
}

/// A responder with the default repository configuration.
pub fn responder() -> Responder {
    Responder::default()
}

/// A small catalog of TOSCA recipes.
pub fn recipe_catalog() -> MemoryCatalog {
    let mut catalog = MemoryCatalog::new();
    catalog.insert(
        "kubernetes.yaml",
        Record::new()
            .with(RecordField::DisplayName, "Kubernetes cluster")
            .with(RecordField::Title, "Kubernetes cluster")
            .with(RecordField::Creator, "GRyCAP")
            .with(RecordField::Date, "2023-03-01")
            .with(RecordField::ResourceType, "TOSCA template")
            .with(RecordField::Rights, "Apache-2.0")
            .with(RecordField::Tag, "kubernetes")
            .with(RecordField::Subject, "kubernetes"),
    );
    catalog.insert(
        "slurm.yaml",
        Record::new()
            .with(RecordField::DisplayName, "SLURM cluster")
            .with(RecordField::Title, "SLURM cluster")
            .with(RecordField::Creator, "GRyCAP")
            .with(RecordField::Date, "2023-06-12")
            .with(RecordField::Childs, "nfs.yaml"),
    );
    catalog.insert(
        "jupyter.yaml",
        Record::new()
            .with(RecordField::DisplayName, "JupyterHub")
            .with(RecordField::Title, "JupyterHub")
            .with(RecordField::Date, "2024-01-15"),
    );
    catalog
}

/// Names of the direct children of the document root, in order.
pub fn top_level_elements(xml: &str) -> Vec<String> {
    children_of(xml, "OAI-PMH")
}

/// Names of the direct children of the first element called `parent`.
pub fn children_of(xml: &str, parent: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    let mut depth = 0usize;
    let mut parent_depth: Option<usize> = None;
    let mut names = Vec::new();

    loop {
        match reader.read_event().expect("response is well-formed XML") {
            Event::Start(e) => {
                let name = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                if parent_depth == Some(depth) {
                    names.push(name.clone());
                }
                depth += 1;
                if parent_depth.is_none() && name == parent {
                    parent_depth = Some(depth);
                }
            },
            Event::Empty(e) => {
                if parent_depth == Some(depth) {
                    names.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
                }
            },
            Event::End(_) => {
                if parent_depth == Some(depth) {
                    return names;
                }
                depth -= 1;
            },
            Event::Eof => return names,
            _ => {},
        }
    }
}

/// The `code` attribute of the response's error element, if any.
pub fn error_code(xml: &str) -> Option<String> {
    let start = xml.find("<error code=\"")? + "<error code=\"".len();
    let end = xml[start..].find('"')? + start;
    Some(xml[start..end].to_string())
}
