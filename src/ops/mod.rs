pub(crate) mod arith;
pub(crate) mod curves;
pub(crate) mod lambda;
pub(crate) mod math;
pub(crate) mod select;
pub(crate) mod transit;
