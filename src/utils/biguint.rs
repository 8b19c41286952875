use crate::constants::SCALAR_NUM_BYTES;
use blstrs::Scalar;
use ff::PrimeField;
use num_bigint::BigUint;

/// The order `r` of the BLS12-381 scalar field, as a `BigUint`.
///
/// `r = 0x73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001`
pub(crate) fn get_scalar_field_order_as_biguint() -> BigUint {
    BigUint::parse_bytes(
        b"73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001",
        16,
    )
    .expect("the BLS12-381 scalar field order is a valid hex literal")
}

/// Converts a `BigUint` that is already reduced mod `r` into a `Scalar`.
pub(crate) fn biguint_to_scalar(n: &BigUint) -> Scalar {
    let mut bytes = n.to_bytes_le();
    bytes.resize(SCALAR_NUM_BYTES, 0u8);

    let repr: [u8; SCALAR_NUM_BYTES] = bytes
        .try_into()
        .expect("a BigUint reduced mod r fits in 32 bytes");

    Option::from(Scalar::from_repr(repr.into()))
        .expect("a BigUint reduced mod r is a canonical Scalar representative")
}
