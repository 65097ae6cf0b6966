mod node;
mod raw_llrb_map;
mod validate;

pub(crate) use raw_llrb_map::RawLlrbMap;
pub(crate) use validate::validate;
