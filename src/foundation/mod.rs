pub(crate) mod basal;
pub(crate) mod error;
