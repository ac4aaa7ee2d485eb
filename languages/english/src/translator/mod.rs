//! Signed translation providers. Both return the first translation the
//! service offers; the rest go to `alternatives`.

pub mod baidu;
pub mod youdao;

pub use baidu::BaiduTranslator;
pub use youdao::YoudaoTranslator;

use std::time::{SystemTime, UNIX_EPOCH};

pub(crate) fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
