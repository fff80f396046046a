use std::ops::{BitAnd, BitOr, BitXor, Not};

use verdict_core::Metadata;

use crate::result::BooleanResult;

macro_rules! binary_ops {
    ($trait:ident, $method:ident, $target:ident) => {
        impl<T: Metadata> $trait for BooleanResult<T> {
            type Output = BooleanResult<T>;

            fn $method(self, rhs: BooleanResult<T>) -> BooleanResult<T> {
                BooleanResult::$target(&self, &rhs)
            }
        }

        impl<T: Metadata> $trait<&BooleanResult<T>> for &BooleanResult<T> {
            type Output = BooleanResult<T>;

            fn $method(self, rhs: &BooleanResult<T>) -> BooleanResult<T> {
                BooleanResult::$target(self, rhs)
            }
        }
    };
}

binary_ops!(BitAnd, bitand, and);
binary_ops!(BitOr, bitor, or);
binary_ops!(BitXor, bitxor, xor);

impl<T: Metadata> Not for BooleanResult<T> {
    type Output = BooleanResult<T>;

    fn not(self) -> BooleanResult<T> {
        BooleanResult::not(&self)
    }
}

impl<T: Metadata> Not for &BooleanResult<T> {
    type Output = BooleanResult<T>;

    fn not(self) -> BooleanResult<T> {
        BooleanResult::not(self)
    }
}
