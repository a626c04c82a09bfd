#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use fsv_binary as binary;
pub use fsv_reflect as reflect;
pub use fsv_utils as utils;
