#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use shade_json as json;
pub use shade_reflect as reflect;
pub use shade_utils as utils;
