pub(crate) mod background;
pub(crate) mod props;
