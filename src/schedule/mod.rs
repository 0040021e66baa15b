pub(crate) mod host;
pub(crate) mod scheduler;
pub(crate) mod subscription;
pub(crate) mod virtual_host;
