pub(crate) mod biguint;

