pub(crate) mod controller;
pub(crate) mod frame_loop;
pub(crate) mod notify;
pub(crate) mod snapshot;
