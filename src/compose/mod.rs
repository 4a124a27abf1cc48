pub(crate) mod composite;
pub(crate) mod compositor;
pub(crate) mod placement;
pub(crate) mod still;
