//! Per-write configuration.

use crate::properties::PropertySelection;
use crate::report::{Warning, WriteReport};
use crate::write_vtk::Encoding;

/// Options shared by every writer's `write`.
///
/// ```
/// use vtk_writer::{Encoding, WriteOptions};
///
/// let names = ["scalar", "vector"];
/// let options = WriteOptions::new()
///     .names(&names)
///     .meta("time=5.123")
///     .encoding(Encoding::Binary);
/// assert_eq!(options.title, "vtk output");
/// ```
#[derive(Debug, Clone)]
pub struct WriteOptions<'a> {
    /// property names by position in the selection; empty entries fall back to the defaults
    pub names: &'a [&'a str],
    /// title line of legacy files
    pub title: &'a str,
    /// extra `key=value` header attributes, separated by whitespace
    pub meta: Option<&'a str>,
    pub encoding: Encoding,
    pub properties: PropertySelection,
}

impl<'a> Default for WriteOptions<'a> {
    fn default() -> Self {
        Self {
            names: &[],
            title: "vtk output",
            meta: None,
            encoding: Encoding::Ascii,
            properties: PropertySelection::All,
        }
    }
}

impl<'a> WriteOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn names(mut self, names: &'a [&'a str]) -> Self {
        self.names = names;
        self
    }

    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    pub fn meta(mut self, meta: &'a str) -> Self {
        self.meta = Some(meta);
        self
    }

    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn properties(mut self, properties: PropertySelection) -> Self {
        self.properties = properties;
        self
    }

    /// Numeric header attributes as `FieldData` entries. `time` is renamed to `TimeValue`,
    /// the name ParaView reads the time step from.
    pub(crate) fn field_data(&self, report: &mut WriteReport) -> Vec<(String, f64)> {
        let meta = match self.meta {
            Some(meta) => meta,
            None => return Vec::new(),
        };

        let mut out = Vec::new();
        for token in meta.split_whitespace() {
            let parsed = token
                .split_once('=')
                .and_then(|(key, value)| Some((key, value.parse::<f64>().ok()?)))
                .filter(|(key, _)| !key.is_empty());

            match parsed {
                Some(("time", value)) => out.push(("TimeValue".to_string(), value)),
                Some((key, value)) => out.push((key.to_string(), value)),
                None => report.warn(Warning::BadMetaEntry(token.to_string())),
            }
        }
        out
    }
}
