use crate::Error;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// open `path` for writing, logging the failure
pub(crate) fn create(path: &Path) -> Result<BufWriter<File>, Error> {
    match File::create(path) {
        Ok(file) => Ok(BufWriter::new(file)),
        Err(source) => {
            log::error!("could not open {} for writing: {}", path.display(), source);
            Err(Error::Create {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// shortest text that reads back as `value`
pub(crate) fn float_attribute(value: f64) -> String {
    let mut buffer = ryu::Buffer::new();
    buffer.format(value).to_string()
}

/// `x0 x1 y0 y1 z0 z1` extent string, unused dimensions are `0 0`
pub(crate) fn extent_string<const D: usize>(low: [i64; D], high: [i64; D]) -> String {
    let mut parts = Vec::with_capacity(6);
    for d in 0..3 {
        let (l, h) = if d < D { (low[d], high[d]) } else { (0, 0) };
        parts.push(l.to_string());
        parts.push(h.to_string());
    }
    parts.join(" ")
}
