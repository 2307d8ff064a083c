use serde::Deserialize;

/// Yahoo's `{ "raw": 0.0123, "fmt": "1.23%" }` number wrapper.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct RawNum<T> {
    pub(crate) raw: Option<T>,
}

pub fn from_raw<T>(raw: Option<RawNum<T>>) -> Option<T> {
    raw.and_then(|n| n.raw)
}
