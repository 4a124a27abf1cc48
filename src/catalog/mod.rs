pub(crate) mod decode;
pub(crate) mod products;
pub(crate) mod store;
